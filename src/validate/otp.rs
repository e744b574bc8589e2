//! Inbound OTP rule table.

// crates.io
use base64::{Engine as _, engine::general_purpose::STANDARD};
// self
use crate::{
	_prelude::*,
	error::ValidationError,
	model::OtpRequest,
	validate::{self, Rule, TextCandidate},
};

const SHAPE: &str = "OTP";

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct OtpCandidate {
	#[serde(default)]
	pin_code: Option<String>,
	#[serde(default)]
	phone_number: Option<TextCandidate>,
}

/// Decodes and validates a raw OTP body.
///
/// `pin_code_len` is the exact length of the Base64 ciphertext the provider key produces;
/// see [`crate::crypto::encoded_ciphertext_len`].
pub fn validate_otp_request(raw: &str, pin_code_len: usize) -> Result<OtpRequest> {
	let candidate = validate::decode::<OtpCandidate>(SHAPE, raw)?;
	let pin_code = validate::require("pinCode", candidate.pin_code)?;

	check_pin_code(&pin_code, pin_code_len)?;

	let phone_number = validate::require_text("phoneNumber", candidate.phone_number)?;

	validate::check_nine_digits("phoneNumber", &phone_number)?;

	Ok(OtpRequest { pin_code, phone_number })
}

/// Returns `true` when `raw` is a valid OTP body.
pub fn is_valid_otp_request(raw: &str, pin_code_len: usize) -> bool {
	validate_otp_request(raw, pin_code_len).is_ok()
}

fn check_pin_code(pin_code: &str, expected: usize) -> Result<(), ValidationError> {
	let actual = pin_code.chars().count();

	if actual != expected {
		return Err(ValidationError::new("pinCode", Rule::Length { expected, actual }));
	}
	if STANDARD.decode(pin_code).is_err() {
		return Err(ValidationError::new("pinCode", Rule::NotBase64));
	}

	Ok(())
}

#[cfg(test)]
mod tests {
	// crates.io
	use serde_json::json;
	// self
	use super::*;
	use crate::crypto::encoded_ciphertext_len;

	fn pin(len: usize) -> String {
		let raw = STANDARD.encode(vec![7_u8; len / 4 * 3]);

		assert_eq!(raw.len(), len);

		raw
	}

	fn violation(raw: &str) -> ValidationError {
		match validate_otp_request(raw, encoded_ciphertext_len(2048)) {
			Err(Error::Validation(e)) => e,
			other => panic!("Expected a validation error, got {other:?}."),
		}
	}

	#[test]
	fn accepts_valid_request() {
		let body = json!({ "pinCode": pin(344), "phoneNumber": "786175702" }).to_string();
		let request = validate_otp_request(&body, 344).expect("Valid OTP body should pass.");

		assert_eq!(request.phone_number, "786175702");
		assert_eq!(request.pin_code.len(), 344);
	}

	#[test]
	fn pin_code_length_is_exact() {
		let body = json!({ "pinCode": pin(340), "phoneNumber": "786175702" }).to_string();

		assert_eq!(
			violation(&body),
			ValidationError::new("pinCode", Rule::Length { expected: 344, actual: 340 })
		);
	}

	#[test]
	fn pin_code_must_be_base64() {
		let body = json!({ "pinCode": "*".repeat(344), "phoneNumber": "786175702" }).to_string();

		assert_eq!(violation(&body), ValidationError::new("pinCode", Rule::NotBase64));
	}

	#[test]
	fn phone_number_needs_nine_digits() {
		let body = json!({ "pinCode": pin(344), "phoneNumber": "+221786175702" }).to_string();

		assert_eq!(violation(&body).field, "phoneNumber");

		let body = json!({ "pinCode": pin(344) }).to_string();

		assert_eq!(violation(&body), ValidationError::new("phoneNumber", Rule::Missing));
	}

	#[test]
	fn numeric_phone_number_is_accepted() {
		let body = json!({ "pinCode": pin(344), "phoneNumber": 786175702 }).to_string();
		let request = validate_otp_request(&body, 344).expect("Numeric phone number should pass.");

		assert_eq!(request.phone_number, "786175702");
	}

	#[test]
	fn pin_code_is_checked_first() {
		let body = json!({ "phoneNumber": "bad" }).to_string();

		assert_eq!(violation(&body), ValidationError::new("pinCode", Rule::Missing));
		assert!(!is_valid_otp_request("not json", 344));
	}
}
