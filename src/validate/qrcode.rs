//! QR code rule table.

// self
use crate::{
	_prelude::*,
	error::ValidationError,
	model::{GenerateQrCodeRequest, Money},
	validate::{self, MoneyCandidate, Rule, TextCandidate},
};

const SHAPE: &str = "QR code";

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct QrCodeCandidate {
	#[serde(default)]
	amount: Option<MoneyCandidate>,
	#[serde(default)]
	callback_cancel_url: Option<String>,
	#[serde(default)]
	callback_success_url: Option<String>,
	#[serde(default)]
	code: Option<TextCandidate>,
	#[serde(default)]
	metadata: Option<BTreeMap<String, String>>,
	#[serde(default)]
	name: Option<String>,
	#[serde(default)]
	validity: Option<i64>,
}

/// Decodes and validates a raw QR code body.
///
/// Rules: `code` present, non-empty and six digits; metadata at most ten entries;
/// `validity`, when present, not negative.
pub fn validate_qr_code_request(raw: &str) -> Result<GenerateQrCodeRequest> {
	let candidate = validate::decode::<QrCodeCandidate>(SHAPE, raw)?;
	let code = validate::require_text("code", candidate.code)?;

	if code.is_empty() {
		return Err(ValidationError::new("code", Rule::Empty).into());
	}

	validate::check_six_digits("code", &code)?;
	validate::check_metadata("metadata", candidate.metadata.as_ref())?;

	let validity = candidate
		.validity
		.map(|v| u64::try_from(v).map_err(|_| ValidationError::new("validity", Rule::Negative)))
		.transpose()?;
	let amount = candidate.amount.and_then(|money| {
		money.value.map(|amount| Money { amount, currency: money.unit })
	});

	Ok(GenerateQrCodeRequest {
		amount,
		callback_cancel_url: candidate.callback_cancel_url,
		callback_success_url: candidate.callback_success_url,
		code,
		metadata: candidate.metadata,
		name: candidate.name,
		validity,
	})
}

/// Returns `true` when `raw` is a valid QR code body.
pub fn is_valid_qr_code_request(raw: &str) -> bool {
	validate_qr_code_request(raw).is_ok()
}
