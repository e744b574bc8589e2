//! Public key endpoint response.

// self
use crate::_prelude::*;

/// Provider key used to encrypt PINs; fetched per encryption and never stored.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicKeyResponse {
	/// Provider key identifier.
	#[serde(default)]
	pub key_id: String,
	/// Key algorithm label (e.g. `RSA`).
	#[serde(default)]
	pub key_type: String,
	/// Advertised modulus size in bits; zero when not reported.
	#[serde(default)]
	pub key_size: usize,
	/// Base64 DER SubjectPublicKeyInfo.
	pub key: String,
}
