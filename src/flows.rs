//! Use cases exposed to the hosting layer.
//!
//! Each use case takes the raw inbound body, validates it before any network activity, runs
//! the gateway stages it needs in sequence, and returns the provider's answer. A failing
//! stage aborts the chain; nothing is retried. [`Reply`] turns any use case result into a
//! status code and body the hosting layer can return as-is.

pub mod reply;

mod otp;
mod payment;
mod qrcode;

pub use reply::*;

// self
use crate::{
	_prelude::*,
	obs::{self, FlowKind, GatewaySpan, Outcome, Stage},
};

/// Runs a whole use case inside a flow span and records its outcome.
pub(crate) async fn observe_flow<T, F>(kind: FlowKind, fut: F) -> Result<T>
where
	F: Future<Output = Result<T>>,
{
	let span = GatewaySpan::flow(kind);

	obs::record_flow_outcome(kind, Outcome::Attempt);

	let result = span.instrument(fut).await;

	obs::record_flow_result(kind, &result);

	result
}

/// Runs a synchronous validator under the validation stage.
pub(crate) fn validate_stage<T>(shape: &str, validator: impl FnOnce() -> Result<T>) -> Result<T> {
	let _guard = GatewaySpan::stage(Stage::Validation, shape).entered();

	obs::record_stage_outcome(Stage::Validation, Outcome::Attempt);

	let result = validator();

	obs::record_stage_result(Stage::Validation, &result);

	result
}
