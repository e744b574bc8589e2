//! Merchant QR code request.

// self
use crate::{_prelude::*, model::MoneyReq};

/// Provider path for merchant QR code generation.
pub const QR_CODE_PATH: &str = "api/eWallet/v4/qrcode";

/// Merchant QR code generation request.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateQrCodeRequest {
	/// Amount encoded in the QR code, when fixed.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub amount: Option<MoneyReq>,
	/// Redirect used when the customer cancels.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub callback_cancel_url: Option<String>,
	/// Redirect used when the payment succeeds.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub callback_success_url: Option<String>,
	/// Six-digit merchant code.
	pub code: String,
	/// Free-form key/value pairs, at most ten.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub metadata: Option<BTreeMap<String, String>>,
	/// Merchant display name.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub name: Option<String>,
	/// Validity window in seconds.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub validity: Option<u64>,
}
