//! Merchant QR code generation.

// self
use crate::{
	_prelude::*,
	flows,
	gateway::Gateway,
	http::ProviderHttpClient,
	model::QR_CODE_PATH,
	oauth::TransportErrorMapper,
	obs::FlowKind,
	validate,
};

impl<C, M> Gateway<C, M>
where
	C: ?Sized + ProviderHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// Validates a raw QR code body and forwards it unchanged.
	///
	/// Returns the provider's raw response body.
	pub async fn generate_qr_code(&self, raw: &str) -> Result<String> {
		flows::observe_flow(FlowKind::QrCode, async {
			flows::validate_stage("qr_code", || validate::validate_qr_code_request(raw))?;

			self.call(QR_CODE_PATH, raw).await
		})
		.await
	}
}
