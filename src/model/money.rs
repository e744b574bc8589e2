//! Monetary amounts on the provider wire.

// self
use crate::_prelude::*;

/// Monetary amount.
///
/// The provider's wire format is `{"value": .., "unit": ..}`; `amount` and `currency` are
/// accepted as aliases when decoding.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Money {
	/// Numeric amount.
	#[serde(rename = "value", alias = "amount")]
	pub amount: f64,
	/// Currency code (e.g. `XOF`).
	#[serde(rename = "unit", alias = "currency", default, skip_serializing_if = "Option::is_none")]
	pub currency: Option<String>,
}
impl Money {
	/// Creates a new amount.
	pub fn new(amount: f64, currency: impl Into<String>) -> Self {
		Self { amount, currency: Some(currency.into()) }
	}
}

/// Amount as carried by QR code requests; same shape as [`Money`].
pub type MoneyReq = Money;
