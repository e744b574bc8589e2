//! One-step payment request.

// self
use crate::{
	_prelude::*,
	model::{Merchant, Money, Payer},
};

/// Provider path for one-step payments.
pub const ONE_STEP_PAYMENT_PATH: &str = "api/eWallet/v1/payments/onestep";

/// Payment authorized in a single call with the customer's OTP.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OneStepPaymentRequest {
	/// Amount to debit.
	pub amount: Money,
	/// Paying customer.
	pub customer: Payer,
	/// Receiving merchant.
	pub partner: Merchant,
	/// Caller-side reference.
	pub reference: String,
	/// Free-form key/value pairs, at most ten.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub metadata: Option<BTreeMap<String, String>>,
}
