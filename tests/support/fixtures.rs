//! OpenPGP fixtures generated at test time.

use std::sync::OnceLock;

use passdig::core::domain::KeyHandle;
use pgp::crypto::ecc_curve::ECCCurve;
use pgp::crypto::sym::SymmetricKeyAlgorithm;
use pgp::ser::Serialize;
use pgp::{
    ArmorOptions, KeyType, Message, SecretKeyParamsBuilder, SignedPublicKey, SignedSecretKey,
    SubkeyParamsBuilder,
};

/// Passphrase protecting the shared protected key.
pub const PASSPHRASE: &str = "correct horse battery staple";

/// Multi-line entry in the usual layout.
pub const SAMPLE_ENTRY: &str = "hunter2\nlogin: alice@example.com\nurl: https://github.com\n";

/// A generated key pair: EdDSA primary with an ECDH encryption subkey.
pub struct KeyPair {
    pub secret: SignedSecretKey,
    pub public: SignedPublicKey,
    pub passphrase: Option<String>,
}

impl KeyPair {
    pub fn generate(user: &str, passphrase: Option<&str>) -> Self {
        let mut rng = rand::thread_rng();
        let passphrase = passphrase.map(str::to_string);

        let params = SecretKeyParamsBuilder::default()
            .key_type(KeyType::EdDSALegacy)
            .can_certify(true)
            .can_sign(true)
            .primary_user_id(user.to_string())
            .passphrase(passphrase.clone())
            .subkey(
                SubkeyParamsBuilder::default()
                    .key_type(KeyType::ECDH(ECCCurve::Curve25519))
                    .can_encrypt(true)
                    .passphrase(passphrase.clone())
                    .build()
                    .unwrap(),
            )
            .build()
            .unwrap();

        let pw = passphrase.clone().unwrap_or_default();
        let secret = params
            .generate(&mut rng)
            .unwrap()
            .sign(&mut rng, || pw)
            .unwrap();
        let public = SignedPublicKey::from(secret.clone());

        Self {
            secret,
            public,
            passphrase,
        }
    }

    pub fn secret_armored(&self) -> Vec<u8> {
        self.secret.to_armored_bytes(ArmorOptions::default()).unwrap()
    }

    pub fn secret_binary(&self) -> Vec<u8> {
        self.secret.to_bytes().unwrap()
    }

    pub fn public_armored(&self) -> Vec<u8> {
        self.public.to_armored_bytes(ArmorOptions::default()).unwrap()
    }

    /// Encrypt to this key, ASCII-armored.
    pub fn encrypt(&self, plaintext: &[u8]) -> Vec<u8> {
        encrypt_to(plaintext, &[self], true)
    }

    /// Encrypt to this key, binary packets.
    pub fn encrypt_binary(&self, plaintext: &[u8]) -> Vec<u8> {
        encrypt_to(plaintext, &[self], false)
    }

    /// Upper-case hex id of the primary key.
    pub fn key_id(&self) -> String {
        use pgp::types::PublicKeyTrait;
        format!("{:X}", self.secret.key_id())
    }
}

/// Encrypt `plaintext` to the encryption subkeys of `recipients`.
pub fn encrypt_to(plaintext: &[u8], recipients: &[&KeyPair], armor: bool) -> Vec<u8> {
    let mut rng = rand::thread_rng();
    let subkeys: Vec<_> = recipients
        .iter()
        .map(|k| &k.public.public_subkeys[0])
        .collect();

    let message = Message::new_literal_bytes("", plaintext)
        .encrypt_to_keys_seipdv1(&mut rng, SymmetricKeyAlgorithm::AES128, &subkeys[..])
        .unwrap();

    if armor {
        message.to_armored_bytes(ArmorOptions::default()).unwrap()
    } else {
        message.to_bytes().unwrap()
    }
}

/// Key protected by `PASSPHRASE`, shared across tests.
pub fn alice() -> &'static KeyPair {
    static KEY: OnceLock<KeyPair> = OnceLock::new();
    KEY.get_or_init(|| KeyPair::generate("Alice <alice@example.com>", Some(PASSPHRASE)))
}

/// Unprotected key, shared across tests.
pub fn bob() -> &'static KeyPair {
    static KEY: OnceLock<KeyPair> = OnceLock::new();
    KEY.get_or_init(|| KeyPair::generate("Bob <bob@example.com>", None))
}

/// A resolver answering every request with `passphrase`.
pub fn resolver(passphrase: &'static str) -> impl Fn(&KeyHandle) -> Option<String> {
    move |_: &KeyHandle| Some(passphrase.to_string())
}

/// A resolver that has no passphrase.
pub fn no_passphrase(_: &KeyHandle) -> Option<String> {
    None
}
