//! Fixed zone movement policy
//!
//! The policy is a property of the platform, not of any request:
//!
//! - the restricted tier may upload to and download from itself only;
//! - the validated tier may upload to either tier but download only from
//!   itself.
//!
//! The table is precomputed at construction and covers every (zone, action)
//! pair, so evaluation is a pure lookup with no failure mode beyond deny.

use zonegate_core::{Action, Zone};

/// Set of zones permitted as targets for one (zone, action) pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ZoneSet {
    restricted: bool,
    validated: bool,
}

impl ZoneSet {
    const fn of(restricted: bool, validated: bool) -> Self {
        Self {
            restricted,
            validated,
        }
    }

    fn contains(self, zone: Zone) -> bool {
        match zone {
            Zone::Restricted => self.restricted,
            Zone::Validated => self.validated,
        }
    }
}

/// Immutable (zone, action) → permitted-targets table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZonePolicyTable {
    // Indexed by [current zone][action].
    targets: [[ZoneSet; 2]; 2],
}

impl ZonePolicyTable {
    /// Build the platform policy table
    pub fn new() -> Self {
        let mut targets = [[ZoneSet::of(false, false); 2]; 2];
        targets[Zone::Restricted.index()][Self::action_index(Action::Upload)] =
            ZoneSet::of(true, false);
        targets[Zone::Restricted.index()][Self::action_index(Action::Download)] =
            ZoneSet::of(true, false);
        targets[Zone::Validated.index()][Self::action_index(Action::Upload)] =
            ZoneSet::of(true, true);
        targets[Zone::Validated.index()][Self::action_index(Action::Download)] =
            ZoneSet::of(false, true);
        Self { targets }
    }

    /// Whether a caller in `current` may perform `action` against `target`
    pub fn permits(&self, current: Zone, action: Action, target: Zone) -> bool {
        self.targets[current.index()][Self::action_index(action)].contains(target)
    }

    fn action_index(action: Action) -> usize {
        match action {
            Action::Upload => 0,
            Action::Download => 1,
        }
    }
}

impl Default for ZonePolicyTable {
    fn default() -> Self {
        Self::new()
    }
}
