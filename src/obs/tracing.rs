// self
use crate::{
	_prelude::*,
	obs::{FlowKind, Stage},
};

/// Future returned by [`GatewaySpan::instrument`] with the `tracing` feature on.
#[cfg(feature = "tracing")]
pub type Instrumented<F> = tracing::instrument::Instrumented<F>;
/// Without `tracing` the future is returned untouched.
#[cfg(not(feature = "tracing"))]
pub type Instrumented<F> = F;

/// Span wrapper used by gateway stages and use cases.
#[derive(Clone, Debug)]
pub struct GatewaySpan {
	#[cfg(feature = "tracing")]
	span: tracing::Span,
}
impl GatewaySpan {
	/// Creates a span for a single stage; `target` names the endpoint or path involved.
	pub fn stage(stage: Stage, target: &str) -> Self {
		#[cfg(feature = "tracing")]
		{
			let span =
				tracing::info_span!("orange_money_gateway.stage", stage = stage.as_str(), target);

			Self { span }
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = (stage, target);

			Self {}
		}
	}

	/// Creates a span for a whole use case.
	pub fn flow(kind: FlowKind) -> Self {
		#[cfg(feature = "tracing")]
		{
			let span = tracing::info_span!("orange_money_gateway.flow", flow = kind.as_str());

			Self { span }
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = kind;

			Self {}
		}
	}

	/// Enters the span until the returned guard drops; meant for synchronous validation.
	pub fn entered(self) -> GatewaySpanGuard {
		#[cfg(feature = "tracing")]
		{
			GatewaySpanGuard { guard: self.span.entered() }
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = self;

			GatewaySpanGuard {}
		}
	}

	/// Attaches the span to `fut`, so no guard is held across `.await`.
	pub fn instrument<Fut>(&self, fut: Fut) -> Instrumented<Fut>
	where
		Fut: Future,
	{
		#[cfg(feature = "tracing")]
		{
			use tracing::Instrument;

			fut.instrument(self.span.clone())
		}
		#[cfg(not(feature = "tracing"))]
		{
			fut
		}
	}
}

/// RAII guard returned by [`GatewaySpan::entered`].
pub struct GatewaySpanGuard {
	#[cfg(feature = "tracing")]
	#[allow(dead_code)]
	guard: tracing::span::EnteredSpan,
}
impl Debug for GatewaySpanGuard {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("GatewaySpanGuard(..)")
	}
}

/// Emits a `warn` event describing a failure surfaced to the caller.
pub fn log_failure(scope: &'static str, error: &Error) {
	#[cfg(feature = "tracing")]
	{
		tracing::warn!(scope, error = %error, "orange money gateway call failed");
	}
	#[cfg(not(feature = "tracing"))]
	{
		let _ = (scope, error);
	}
}
