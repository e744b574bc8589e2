//! OTP generation shapes: the inbound request and the provider-bound body.

// self
use crate::{
	_prelude::*,
	model::{IdType, WalletType},
};

/// Provider path for OTP generation.
pub const OTP_PATH: &str = "api/eWallet/v1/payments/otp";

/// Provider-shaped OTP generation request.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateOtpRequest {
	/// Base64 RSA ciphertext of the customer PIN.
	pub encrypted_pin_code: String,
	/// Party identifier, e.g. an MSISDN.
	pub id: String,
	/// Identifier kind.
	pub id_type: IdType,
	/// Wallet to use; provider default when absent.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub wallet_type: Option<WalletType>,
}
impl GenerateOtpRequest {
	/// Builds the request the OTP use case sends for a phone number.
	pub fn for_msisdn(phone_number: impl Into<String>, encrypted_pin_code: String) -> Self {
		Self {
			encrypted_pin_code,
			id: phone_number.into(),
			id_type: IdType::Msisdn,
			wallet_type: Some(WalletType::Principal),
		}
	}
}

/// Inbound OTP request as received from the hosting layer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OtpRequest {
	/// Base64 PIN code.
	pub pin_code: String,
	/// Nine-digit phone number.
	pub phone_number: String,
}
