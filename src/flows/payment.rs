//! One-step payment forwarding.

// self
use crate::{
	_prelude::*,
	flows,
	gateway::Gateway,
	http::ProviderHttpClient,
	model::ONE_STEP_PAYMENT_PATH,
	oauth::TransportErrorMapper,
	obs::FlowKind,
	validate,
};

impl<C, M> Gateway<C, M>
where
	C: ?Sized + ProviderHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// Validates a raw one-step payment body and forwards it unchanged.
	///
	/// Returns the provider's raw response body.
	pub async fn one_step_payment(&self, raw: &str) -> Result<String> {
		flows::observe_flow(FlowKind::OneStepPayment, async {
			flows::validate_stage("one_step_payment", || validate::validate_one_step_payment(raw))?;

			self.call(ONE_STEP_PAYMENT_PATH, raw).await
		})
		.await
	}
}
