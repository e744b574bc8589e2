//! PIN encryption with the provider's RSA public key.
//!
//! The provider publishes its key as Base64-encoded DER (X.509 SubjectPublicKeyInfo) and
//! expects PINs encrypted with RSA PKCS#1 v1.5 padding, Base64-encoded. Padding is
//! randomized, so two encryptions of the same PIN differ.

// crates.io
use base64::{Engine as _, engine::general_purpose::STANDARD};
use rsa::{Pkcs1v15Encrypt, RsaPublicKey, pkcs8::DecodePublicKey, traits::PublicKeyParts};
// self
use crate::error::EncryptionError;

/// Parsed provider key ready for encryption.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PinKey(RsaPublicKey);
impl PinKey {
	/// Decodes a Base64 DER SubjectPublicKeyInfo RSA key.
	pub fn from_base64_der(public_key_base64: &str) -> Result<Self, EncryptionError> {
		let der = STANDARD.decode(public_key_base64.trim()).map_err(EncryptionError::KeyDecode)?;
		let key = RsaPublicKey::from_public_key_der(&der).map_err(EncryptionError::KeyParse)?;

		Ok(Self(key))
	}

	/// Modulus size in bits.
	pub fn bits(&self) -> usize {
		self.0.size() * 8
	}

	/// Encrypts `pin` and returns the Base64 ciphertext.
	pub fn encrypt(&self, pin: &str) -> Result<String, EncryptionError> {
		let ciphertext = self
			.0
			.encrypt(&mut rand::thread_rng(), Pkcs1v15Encrypt, pin.as_bytes())
			.map_err(EncryptionError::Cipher)?;

		Ok(STANDARD.encode(ciphertext))
	}
}

/// Encrypts `pin` with a Base64 DER RSA public key and returns the Base64 ciphertext.
pub fn encrypt_pin(pin: &str, public_key_base64: &str) -> Result<String, EncryptionError> {
	PinKey::from_base64_der(public_key_base64)?.encrypt(pin)
}

/// Length of the padded Base64 encoding of a ciphertext produced by a `key_bits` modulus.
///
/// 2048 bits ⇒ 256 bytes ⇒ 344 characters.
pub const fn encoded_ciphertext_len(key_bits: usize) -> usize {
	key_bits.div_ceil(8).div_ceil(3) * 4
}
