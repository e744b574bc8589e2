//! Parties to a payment: merchants, payers, and their identifier literals.

// self
use crate::{_prelude::*, validate::Rule};

/// Identifies whether an `id` is an internal merchant code or a phone number.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IdType {
	/// Internal merchant code.
	#[serde(rename = "CODE")]
	Code,
	/// Phone number.
	#[serde(rename = "MSISDN")]
	Msisdn,
}
impl IdType {
	/// Wire literals, in declaration order.
	pub const LITERALS: &'static [&'static str] = &["CODE", "MSISDN"];

	/// Returns the wire literal.
	pub const fn as_str(self) -> &'static str {
		match self {
			IdType::Code => "CODE",
			IdType::Msisdn => "MSISDN",
		}
	}
}
impl FromStr for IdType {
	type Err = Rule;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			"CODE" => Ok(Self::Code),
			"MSISDN" => Ok(Self::Msisdn),
			_ => Err(Rule::NotAllowed { allowed: Self::LITERALS }),
		}
	}
}
impl Display for IdType {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Wallet a payer's funds are drawn from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WalletType {
	/// International wallet.
	#[serde(rename = "INTERNATIONAL")]
	International,
	/// Principal wallet.
	#[serde(rename = "PRINCIPAL")]
	Principal,
}
impl WalletType {
	/// Wire literals, in declaration order.
	pub const LITERALS: &'static [&'static str] = &["INTERNATIONAL", "PRINCIPAL"];

	/// Returns the wire literal.
	pub const fn as_str(self) -> &'static str {
		match self {
			WalletType::International => "INTERNATIONAL",
			WalletType::Principal => "PRINCIPAL",
		}
	}
}
impl FromStr for WalletType {
	type Err = Rule;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			"INTERNATIONAL" => Ok(Self::International),
			"PRINCIPAL" => Ok(Self::Principal),
			_ => Err(Rule::NotAllowed { allowed: Self::LITERALS }),
		}
	}
}
impl Display for WalletType {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Base identity record shared by partners and payers.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Merchant {
	/// Identifier kind.
	pub id_type: IdType,
	/// Merchant code or phone number.
	pub id: String,
	/// Display name.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub name: Option<String>,
}

/// Paying customer: a [`Merchant`] identity plus payment authorization fields.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payer {
	/// Identity of the payer.
	#[serde(flatten)]
	pub merchant: Merchant,
	/// Six-digit one-time password.
	pub otp: String,
	/// Wallet to debit, when not the provider default.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub wallet_type: Option<WalletType>,
}
