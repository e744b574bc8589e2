//! Optional observability helpers for gateway stages and use cases.
//!
//! # Feature Flags
//!
//! - Enable `tracing` to emit structured spans named `orange_money_gateway.stage` (fields `stage`
//!   and `target`) and `orange_money_gateway.flow` (field `flow`), plus a `warn` event for every
//!   failure propagated to the caller.
//! - Enable `metrics` to increment the `orange_money_gateway_stage_total` and
//!   `orange_money_gateway_flow_total` counters for every attempt/success/failure.

mod metrics;
mod tracing;

pub use metrics::*;
pub use tracing::*;

// self
use crate::_prelude::*;

/// Pipeline stages a request passes through.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Stage {
	/// Configuration checks performed before any network call.
	Configuration,
	/// Inbound payload validation.
	Validation,
	/// OAuth 2.0 client credentials exchange.
	Token,
	/// Public key retrieval.
	PublicKey,
	/// Local PIN encryption.
	Encryption,
	/// Authenticated provider call.
	ApiCall,
}
impl Stage {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			Stage::Configuration => "configuration",
			Stage::Validation => "validation",
			Stage::Token => "token",
			Stage::PublicKey => "public_key",
			Stage::Encryption => "encryption",
			Stage::ApiCall => "api_call",
		}
	}
}
impl Display for Stage {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Use cases exposed to the hosting layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FlowKind {
	/// PIN encryption + OTP generation.
	GenerateOtp,
	/// One-step payment forwarding.
	OneStepPayment,
	/// Merchant QR code generation.
	QrCode,
}
impl FlowKind {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			FlowKind::GenerateOtp => "generate_otp",
			FlowKind::OneStepPayment => "one_step_payment",
			FlowKind::QrCode => "qr_code",
		}
	}
}
impl Display for FlowKind {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Outcome labels recorded for each attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Outcome {
	/// Entry to a stage or flow.
	Attempt,
	/// Successful completion.
	Success,
	/// Failure propagated back to the caller.
	Failure,
}
impl Outcome {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			Outcome::Attempt => "attempt",
			Outcome::Success => "success",
			Outcome::Failure => "failure",
		}
	}
}
impl Display for Outcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Records the terminal outcome of a stage result, logging failures.
pub fn record_stage_result<T>(stage: Stage, result: &Result<T>) {
	match result {
		Ok(_) => record_stage_outcome(stage, Outcome::Success),
		Err(e) => {
			record_stage_outcome(stage, Outcome::Failure);
			log_failure(stage.as_str(), e);
		},
	}
}

/// Records the terminal outcome of a use case result, logging failures.
pub fn record_flow_result<T>(kind: FlowKind, result: &Result<T>) {
	match result {
		Ok(_) => record_flow_outcome(kind, Outcome::Success),
		Err(e) => {
			record_flow_outcome(kind, Outcome::Failure);
			log_failure(kind.as_str(), e);
		},
	}
}
