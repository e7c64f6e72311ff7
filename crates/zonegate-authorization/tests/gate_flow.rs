//! End-to-end gate behavior: attested transfers, the unattested fallback,
//! and the encrypted environment-claim path.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use rsa::pkcs1::{EncodeRsaPrivateKey, EncodeRsaPublicKey, LineEnding};
use rsa::{RsaPrivateKey, RsaPublicKey};
use zonegate_authorization::{AttestationClaims, AuthorizationGate, Decision};
use zonegate_core::{Action, GateConfig, ZoneConfig};
use zonegate_crypto::EnvelopeCipher;

const SOURCE_IP: &str = "10.0.0.7";
const PROJECT: &str = "test_project";

struct Harness {
    gate: AuthorizationGate,
    private_pem: String,
    secret_b64: String,
}

fn harness() -> Harness {
    let mut rng = rand::thread_rng();
    let private = RsaPrivateKey::new(&mut rng, 2048).unwrap();
    let public_pem = RsaPublicKey::from(&private).to_pkcs1_pem(LineEnding::LF).unwrap();
    let private_pem = private.to_pkcs1_pem(LineEnding::LF).unwrap().to_string();
    let secret_b64 = STANDARD.encode(b"deployment-shared-secret");

    let config = GateConfig::new(ZoneConfig::default(), &public_pem, &secret_b64).unwrap();
    Harness {
        gate: AuthorizationGate::new(&config).unwrap(),
        private_pem,
        secret_b64,
    }
}

impl Harness {
    fn token(&self, zone: &str) -> String {
        self.token_for(SOURCE_IP, PROJECT, zone)
    }

    fn token_for(&self, ip: &str, project_code: &str, zone: &str) -> String {
        let claims = AttestationClaims {
            ip: ip.to_string(),
            project_code: project_code.to_string(),
            zone: zone.to_string(),
        };
        let key = EncodingKey::from_rsa_pem(self.private_pem.as_bytes()).unwrap();
        encode(&Header::new(Algorithm::RS256), &claims, &key).unwrap()
    }

    fn env_claim(&self, zone: &str) -> String {
        EnvelopeCipher::new(&self.secret_b64).unwrap().encrypt(zone)
    }
}

fn deny(status: u16, message: &str) -> Decision {
    Decision::Deny {
        status,
        message: message.to_string(),
    }
}

#[test]
fn attested_greenroom_vm_stays_in_greenroom() {
    let h = harness();
    let token = h.token("greenroom");

    for action in [Action::Upload, Action::Download] {
        let decision =
            h.gate
                .authorize_transfer(action, "greenroom", Some(&token), SOURCE_IP, PROJECT);
        assert_eq!(decision, Decision::Allow, "{action:?} within greenroom");
    }

    assert_eq!(
        h.gate
            .authorize_transfer(Action::Upload, "core", Some(&token), SOURCE_IP, PROJECT),
        deny(403, "Invalid action: upload to core in greenroom"),
    );
    assert_eq!(
        h.gate
            .authorize_transfer(Action::Download, "core", Some(&token), SOURCE_IP, PROJECT),
        deny(403, "Invalid action: download from core in greenroom"),
    );
}

#[test]
fn attested_core_vm_may_push_down_but_not_pull_up() {
    let h = harness();
    let token = h.token("core");

    assert_eq!(
        h.gate
            .authorize_transfer(Action::Upload, "greenroom", Some(&token), SOURCE_IP, PROJECT),
        Decision::Allow,
    );
    assert_eq!(
        h.gate
            .authorize_transfer(Action::Upload, "core", Some(&token), SOURCE_IP, PROJECT),
        Decision::Allow,
    );
    assert_eq!(
        h.gate.authorize_transfer(
            Action::Download,
            "greenroom",
            Some(&token),
            SOURCE_IP,
            PROJECT
        ),
        deny(403, "Invalid action: download from greenroom in core"),
    );
}

#[test]
fn forwarded_chain_first_entry_is_the_observed_ip() {
    let h = harness();
    let token = h.token("greenroom");

    let chain = format!("{SOURCE_IP}, 192.168.1.1");
    assert_eq!(
        h.gate
            .authorize_transfer(Action::Upload, "greenroom", Some(&token), &chain, PROJECT),
        Decision::Allow,
    );

    let spoofed = format!("192.168.1.1, {SOURCE_IP}");
    assert_eq!(
        h.gate
            .authorize_transfer(Action::Upload, "greenroom", Some(&token), &spoofed, PROJECT),
        deny(403, "The ip of VM does not matched with source ip"),
    );
}

#[test]
fn wrong_project_is_denied_with_403() {
    let h = harness();
    let token = h.token_for(SOURCE_IP, "test_project", "greenroom");

    assert_eq!(
        h.gate.authorize_transfer(
            Action::Upload,
            "greenroom",
            Some(&token),
            SOURCE_IP,
            "other_project"
        ),
        deny(403, "The project of VM does not matched with query"),
    );
}

#[test]
fn unknown_target_zone_is_a_400_before_any_verification() {
    let h = harness();
    assert_eq!(
        h.gate
            .authorize_transfer(Action::Upload, "vault", Some("garbage"), SOURCE_IP, PROJECT),
        deny(400, "Invalid zone: vault"),
    );
}

#[test]
fn unattested_callers_may_do_everything_except_upload_to_core() {
    let h = harness();

    assert_eq!(
        h.gate
            .authorize_transfer(Action::Upload, "greenroom", None, SOURCE_IP, PROJECT),
        Decision::Allow,
    );
    assert_eq!(
        h.gate
            .authorize_transfer(Action::Download, "greenroom", None, SOURCE_IP, PROJECT),
        Decision::Allow,
    );
    assert_eq!(
        h.gate
            .authorize_transfer(Action::Download, "core", None, SOURCE_IP, PROJECT),
        Decision::Allow,
    );
    assert_eq!(
        h.gate
            .authorize_transfer(Action::Upload, "core", None, SOURCE_IP, PROJECT),
        deny(403, "Cannot upload to core zone"),
    );
}

#[test]
fn environment_claim_sets_the_current_zone() {
    let h = harness();
    let claim = h.env_claim("greenroom");

    assert_eq!(
        h.gate
            .authorize_environment(Action::Upload, "greenroom", Some(&claim)),
        Decision::Allow,
    );
    assert_eq!(
        h.gate
            .authorize_environment(Action::Upload, "core", Some(&claim)),
        deny(403, "Invalid action: upload to core in greenroom"),
    );
}

#[test]
fn missing_environment_claim_defaults_to_core() {
    let h = harness();

    assert_eq!(
        h.gate.authorize_environment(Action::Upload, "greenroom", None),
        Decision::Allow,
    );
    assert_eq!(
        h.gate.authorize_environment(Action::Download, "core", None),
        Decision::Allow,
    );
    assert_eq!(
        h.gate
            .authorize_environment(Action::Download, "greenroom", None),
        deny(403, "Invalid action: download from greenroom in core"),
    );
}

#[test]
fn undecryptable_environment_claim_is_a_400() {
    let h = harness();
    assert_eq!(
        h.gate
            .authorize_environment(Action::Upload, "greenroom", Some("!!not-a-claim!!")),
        deny(400, "Invalid encryption, could not decrypt message"),
    );
}

#[test]
fn environment_claim_with_foreign_zone_label_is_a_400() {
    let h = harness();
    let claim = h.env_claim("vault");
    assert_eq!(
        h.gate
            .authorize_environment(Action::Upload, "greenroom", Some(&claim)),
        deny(400, "Invalid zone: vault"),
    );
}

#[test]
fn decisions_are_pure_over_identical_inputs() {
    let h = harness();
    let token = h.token("core");
    let first =
        h.gate
            .authorize_transfer(Action::Download, "greenroom", Some(&token), SOURCE_IP, PROJECT);
    let second =
        h.gate
            .authorize_transfer(Action::Download, "greenroom", Some(&token), SOURCE_IP, PROJECT);
    assert_eq!(first, second);
}
