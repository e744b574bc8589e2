//! Typed parse-then-validate rule tables for inbound payloads.
//!
//! Each payload is first decoded into a candidate structure whose fields are all optional,
//! so a missing field is a rule violation rather than a decoding failure. The candidate's
//! rule table then runs in a fixed order and stops at the first violation. Text that is
//! not JSON of the expected shape is reported as [`MalformedPayloadError`], which callers
//! can tell apart from a [`ValidationError`].

pub mod otp;
pub mod payment;
pub mod qrcode;

pub use otp::*;
pub use payment::*;
pub use qrcode::*;

// std
use std::sync::LazyLock;
// crates.io
use regex::Regex;
use serde::de::DeserializeOwned;
// self
use crate::{
	_prelude::*,
	error::{MalformedPayloadError, ValidationError},
	model::MAX_METADATA_ENTRIES,
};

/// Pattern for MSISDN-style identifiers.
pub const NINE_DIGITS: &str = "^[0-9]{9}$";
/// Pattern for OTPs and merchant codes.
pub const SIX_DIGITS: &str = "^[0-9]{6}$";

static NINE_DIGITS_RE: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(NINE_DIGITS).expect("Invalid regex pattern"));
static SIX_DIGITS_RE: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(SIX_DIGITS).expect("Invalid regex pattern"));

/// Rule a field failed.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
pub enum Rule {
	/// Field is absent or null.
	#[error("value is required")]
	Missing,
	/// Field is present but empty.
	#[error("value must not be empty")]
	Empty,
	/// Field does not match a pattern.
	#[error("value must match `{pattern}`")]
	Pattern {
		/// Expected pattern.
		pattern: &'static str,
	},
	/// Numeric field is below its minimum.
	#[error("value must be at least {min}")]
	BelowMinimum {
		/// Smallest accepted value.
		min: i64,
	},
	/// Numeric field is negative.
	#[error("value must not be negative")]
	Negative,
	/// Field is not one of the accepted literals (case-sensitive).
	#[error("value must be one of {allowed:?}")]
	NotAllowed {
		/// Accepted literals.
		allowed: &'static [&'static str],
	},
	/// Mapping holds too many entries.
	#[error("at most {max} entries are allowed, got {actual}")]
	TooManyEntries {
		/// Largest accepted entry count.
		max: usize,
		/// Observed entry count.
		actual: usize,
	},
	/// Field has the wrong length.
	#[error("expected {expected} characters, got {actual}")]
	Length {
		/// Required length.
		expected: usize,
		/// Observed length.
		actual: usize,
	},
	/// Field is not valid padded Base64.
	#[error("value is not valid Base64")]
	NotBase64,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct MoneyCandidate {
	#[serde(default, alias = "amount")]
	pub(crate) value: Option<f64>,
	#[serde(default, alias = "currency")]
	pub(crate) unit: Option<String>,
}

/// JSON scalar read as text, so `786175702` and `"786175702"` face the same rules.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum TextCandidate {
	Text(String),
	Number(serde_json::Number),
	Bool(bool),
}
impl TextCandidate {
	pub(crate) fn into_text(self) -> String {
		match self {
			Self::Text(text) => text,
			Self::Number(number) => number.to_string(),
			Self::Bool(flag) => flag.to_string(),
		}
	}
}

/// Decodes `raw` into `T`, reporting the failing JSON path on error.
pub fn decode<T>(shape: &'static str, raw: &str) -> Result<T, MalformedPayloadError>
where
	T: DeserializeOwned,
{
	if raw.trim().is_empty() {
		return Err(MalformedPayloadError::Empty { shape });
	}

	let mut de = serde_json::Deserializer::from_str(raw);
	let value = serde_path_to_error::deserialize(&mut de)
		.map_err(|source| MalformedPayloadError::Json { shape, source })?;

	de.end().map_err(|source| MalformedPayloadError::TrailingCharacters { shape, source })?;

	Ok(value)
}

/// Renders a typed request as JSON for the provider.
pub fn encode<T>(shape: &'static str, value: &T) -> Result<String, MalformedPayloadError>
where
	T: ?Sized + Serialize,
{
	serde_json::to_string(value).map_err(|source| MalformedPayloadError::Serialize { shape, source })
}

pub(crate) fn require<T>(field: &'static str, value: Option<T>) -> Result<T, ValidationError> {
	value.ok_or(ValidationError::new(field, Rule::Missing))
}

pub(crate) fn require_text(
	field: &'static str,
	value: Option<TextCandidate>,
) -> Result<String, ValidationError> {
	require(field, value).map(TextCandidate::into_text)
}

pub(crate) fn check_nine_digits(field: &'static str, value: &str) -> Result<(), ValidationError> {
	check_pattern(field, value, &NINE_DIGITS_RE, NINE_DIGITS)
}

pub(crate) fn check_six_digits(field: &'static str, value: &str) -> Result<(), ValidationError> {
	check_pattern(field, value, &SIX_DIGITS_RE, SIX_DIGITS)
}

pub(crate) fn check_minimum(field: &'static str, value: f64, min: i64) -> Result<(), ValidationError> {
	// Written so NaN fails.
	if value >= min as f64 {
		Ok(())
	} else {
		Err(ValidationError::new(field, Rule::BelowMinimum { min }))
	}
}

pub(crate) fn check_metadata(
	field: &'static str,
	metadata: Option<&BTreeMap<String, String>>,
) -> Result<(), ValidationError> {
	match metadata {
		Some(entries) if entries.len() > MAX_METADATA_ENTRIES => Err(ValidationError::new(
			field,
			Rule::TooManyEntries { max: MAX_METADATA_ENTRIES, actual: entries.len() },
		)),
		_ => Ok(()),
	}
}

pub(crate) fn parse_literal<T>(field: &'static str, value: &str) -> Result<T, ValidationError>
where
	T: FromStr<Err = Rule>,
{
	value.parse().map_err(|rule| ValidationError::new(field, rule))
}

fn check_pattern(
	field: &'static str,
	value: &str,
	re: &Regex,
	pattern: &'static str,
) -> Result<(), ValidationError> {
	if re.is_match(value) {
		Ok(())
	} else {
		Err(ValidationError::new(field, Rule::Pattern { pattern }))
	}
}
