//! One-step payment rule table.

// self
use crate::{
	_prelude::*,
	error::ValidationError,
	model::{IdType, Merchant, Money, OneStepPaymentRequest, Payer, WalletType},
	validate::{self, MoneyCandidate, TextCandidate},
};

const SHAPE: &str = "one-step payment";
const MIN_AMOUNT: i64 = 1;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PartyCandidate {
	#[serde(default)]
	id: Option<TextCandidate>,
	#[serde(default)]
	id_type: Option<TextCandidate>,
	#[serde(default)]
	name: Option<String>,
	#[serde(default)]
	otp: Option<TextCandidate>,
	#[serde(default)]
	wallet_type: Option<TextCandidate>,
}

#[derive(Debug, Default, Deserialize)]
struct PaymentCandidate {
	#[serde(default)]
	amount: Option<MoneyCandidate>,
	#[serde(default)]
	customer: Option<PartyCandidate>,
	#[serde(default)]
	partner: Option<PartyCandidate>,
	#[serde(default)]
	reference: Option<String>,
	#[serde(default)]
	metadata: Option<BTreeMap<String, String>>,
}
impl PaymentCandidate {
	fn into_request(self) -> Result<OneStepPaymentRequest, ValidationError> {
		let amount = validate::require("amount", self.amount)?;
		let value = validate::require("amount.value", amount.value)?;

		validate::check_minimum("amount.value", value, MIN_AMOUNT)?;

		let customer = validate::require("customer", self.customer)?;
		let customer_id = validate::require_text("customer.id", customer.id)?;

		validate::check_nine_digits("customer.id", &customer_id)?;

		let customer_id_type: IdType = validate::parse_literal(
			"customer.idType",
			&validate::require_text("customer.idType", customer.id_type)?,
		)?;
		let otp = validate::require_text("customer.otp", customer.otp)?;

		validate::check_six_digits("customer.otp", &otp)?;

		let wallet_type = customer
			.wallet_type
			.map(TextCandidate::into_text)
			.map(|raw| validate::parse_literal::<WalletType>("customer.walletType", &raw))
			.transpose()?;
		let partner = validate::require("partner", self.partner)?;
		let partner_id = validate::require_text("partner.id", partner.id)?;

		validate::check_six_digits("partner.id", &partner_id)?;

		let partner_id_type: IdType = validate::parse_literal(
			"partner.idType",
			&validate::require_text("partner.idType", partner.id_type)?,
		)?;
		let reference = validate::require("reference", self.reference)?;

		validate::check_metadata("metadata", self.metadata.as_ref())?;

		Ok(OneStepPaymentRequest {
			amount: Money { amount: value, currency: amount.unit },
			customer: Payer {
				merchant: Merchant {
					id_type: customer_id_type,
					id: customer_id,
					name: customer.name,
				},
				otp,
				wallet_type,
			},
			partner: Merchant { id_type: partner_id_type, id: partner_id, name: partner.name },
			reference,
			metadata: self.metadata,
		})
	}
}

/// Decodes and validates a raw one-step payment body.
///
/// Rules run in order and the first violation is returned: amount, customer id, customer
/// id type, customer OTP, customer wallet type, partner id, partner id type, reference,
/// metadata.
pub fn validate_one_step_payment(raw: &str) -> Result<OneStepPaymentRequest> {
	let candidate = validate::decode::<PaymentCandidate>(SHAPE, raw)?;

	Ok(candidate.into_request()?)
}

impl OneStepPaymentRequest {
	/// Runs the one-step payment rule table against an already typed request.
	///
	/// Enum-typed fields are valid by construction, so only the free-text rules apply.
	pub fn validate(&self) -> Result<(), ValidationError> {
		validate::check_minimum("amount.value", self.amount.amount, MIN_AMOUNT)?;
		validate::check_nine_digits("customer.id", &self.customer.merchant.id)?;
		validate::check_six_digits("customer.otp", &self.customer.otp)?;
		validate::check_six_digits("partner.id", &self.partner.id)?;
		validate::check_metadata("metadata", self.metadata.as_ref())
	}
}

/// Returns `true` when `raw` is a valid one-step payment body.
pub fn is_valid_one_step_payment(raw: &str) -> bool {
	validate_one_step_payment(raw).is_ok()
}

#[cfg(test)]
mod tests {
	// crates.io
	use serde_json::{Value, json};
	// self
	use super::*;
	use crate::{error::MalformedPayloadError, validate::Rule};

	fn valid() -> Value {
		json!({
			"amount": { "value": 1500, "unit": "XOF" },
			"customer": {
				"idType": "MSISDN",
				"id": "786175702",
				"otp": "123456",
				"walletType": "PRINCIPAL"
			},
			"partner": { "idType": "CODE", "id": "599175" },
			"reference": "order-42",
			"metadata": { "channel": "web" }
		})
	}

	fn violation(payload: Value) -> ValidationError {
		match validate_one_step_payment(&payload.to_string()) {
			Err(Error::Validation(e)) => e,
			other => panic!("Expected a validation error, got {other:?}."),
		}
	}

	#[test]
	fn accepts_valid_payment() {
		let request = validate_one_step_payment(&valid().to_string())
			.expect("Valid payment should pass validation.");

		assert_eq!(request.amount, Money::new(1500.0, "XOF"));
		assert_eq!(request.customer.merchant.id_type, IdType::Msisdn);
		assert_eq!(request.customer.wallet_type, Some(WalletType::Principal));
		assert_eq!(request.partner.id, "599175");
		assert!(request.validate().is_ok());
	}

	#[test]
	fn missing_otp_names_the_field() {
		let mut payload = valid();

		payload["customer"].as_object_mut().expect("customer is an object").remove("otp");

		assert_eq!(violation(payload), ValidationError::new("customer.otp", Rule::Missing));
	}

	#[test]
	fn first_violation_wins() {
		let mut payload = valid();

		payload["amount"]["value"] = json!(0);
		payload["customer"]["otp"] = json!("12");
		payload["partner"]["id"] = json!("1");

		assert_eq!(
			violation(payload),
			ValidationError::new("amount.value", Rule::BelowMinimum { min: 1 })
		);
	}

	#[test]
	fn literals_are_exact_matches() {
		let mut payload = valid();

		payload["customer"]["idType"] = json!("msisdn");

		assert_eq!(
			violation(payload),
			ValidationError::new("customer.idType", Rule::NotAllowed { allowed: IdType::LITERALS })
		);

		let mut payload = valid();

		payload["customer"]["walletType"] = json!("SAVINGS");

		assert_eq!(violation(payload).field, "customer.walletType");
	}

	#[test]
	fn wallet_type_is_optional() {
		let mut payload = valid();

		payload["customer"].as_object_mut().expect("customer is an object").remove("walletType");

		let request = validate_one_step_payment(&payload.to_string())
			.expect("Payment without wallet type should pass.");

		assert_eq!(request.customer.wallet_type, None);
	}

	#[test]
	fn numeric_identifiers_face_the_field_rules() {
		let mut payload = valid();

		payload["customer"]["id"] = json!(786175702);
		payload["customer"]["otp"] = json!(123456);
		payload["partner"]["id"] = json!(599175);

		let request = validate_one_step_payment(&payload.to_string())
			.expect("Numeric identifiers should pass validation.");

		assert_eq!(request.customer.merchant.id, "786175702");
		assert_eq!(request.customer.otp, "123456");
		assert_eq!(request.partner.id, "599175");

		let mut payload = valid();

		payload["customer"]["id"] = json!(78617570);

		assert_eq!(
			violation(payload),
			ValidationError::new("customer.id", Rule::Pattern { pattern: validate::NINE_DIGITS })
		);
	}

	#[test]
	fn partner_id_needs_six_digits() {
		let mut payload = valid();

		payload["partner"]["id"] = json!("5991750");

		assert_eq!(violation(payload).field, "partner.id");
	}

	#[test]
	fn reference_must_be_present_but_may_be_empty() {
		let mut payload = valid();

		payload["reference"] = Value::Null;

		assert_eq!(violation(payload), ValidationError::new("reference", Rule::Missing));

		let mut payload = valid();

		payload["reference"] = json!("");

		assert!(validate_one_step_payment(&payload.to_string()).is_ok());
	}

	#[test]
	fn metadata_limit_is_ten_entries() {
		let entries = |n: usize| {
			(0..n).map(|i| (format!("k{i}"), json!(format!("v{i}")))).collect::<serde_json::Map<_, _>>()
		};
		let mut payload = valid();

		payload["metadata"] = Value::Object(entries(10));

		assert!(is_valid_one_step_payment(&payload.to_string()));

		payload["metadata"] = Value::Object(entries(11));

		assert_eq!(
			violation(payload),
			ValidationError::new("metadata", Rule::TooManyEntries { max: 10, actual: 11 })
		);
	}

	#[test]
	fn malformed_json_is_not_a_rule_violation() {
		assert!(matches!(
			validate_one_step_payment("{\"amount\": "),
			Err(Error::MalformedPayload(MalformedPayloadError::Json { .. }))
		));
		assert!(matches!(
			validate_one_step_payment(""),
			Err(Error::MalformedPayload(MalformedPayloadError::Empty { .. }))
		));
		assert!(!is_valid_one_step_payment("[]"));
	}

	#[test]
	fn typed_validation_checks_free_text_fields() {
		let mut request = validate_one_step_payment(&valid().to_string())
			.expect("Valid payment should pass validation.");

		request.customer.otp = "12345".into();

		assert_eq!(
			request.validate(),
			Err(ValidationError::new("customer.otp", Rule::Pattern { pattern: validate::SIX_DIGITS }))
		);
	}
}
