//! Authenticated access to the provider: Token Provider, Public Key Provider, and API Caller.
//!
//! A [`Gateway`] owns the immutable [`ProviderConfig`], the HTTP transport, and the transport
//! error mapper. Nothing else is shared between requests: every dependent call obtains a
//! fresh bearer token and every encryption fetches the current provider key.

pub mod api;

mod public_key;
mod token;

pub use api::*;

// crates.io
use oauth2::{AsyncHttpClient, HttpRequest, HttpResponse};
// self
use crate::{
	_prelude::*,
	config::ProviderConfig,
	http::{ProviderHttpClient, ResponseMetadataSlot},
	oauth::TransportErrorMapper,
	obs::{self, GatewaySpan, Outcome, Stage},
};
#[cfg(feature = "reqwest")]
use crate::{error::ConfigError, http::ReqwestHttpClient, oauth::ReqwestTransportErrorMapper};

#[cfg(feature = "reqwest")]
/// Gateway specialized for the crate's default reqwest transport stack.
pub type ReqwestGateway = Gateway<ReqwestHttpClient, ReqwestTransportErrorMapper>;

/// Client for a single provider deployment.
#[derive(Clone)]
pub struct Gateway<C, M>
where
	C: ?Sized + ProviderHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// Endpoints and client credentials.
	pub config: ProviderConfig,
	/// HTTP client wrapper used for every outbound provider request.
	pub http_client: Arc<C>,
	/// Mapper applied to transport-layer errors before surfacing them to callers.
	pub transport_mapper: Arc<M>,
}
impl<C, M> Gateway<C, M>
where
	C: ?Sized + ProviderHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// Creates a gateway that reuses the caller-provided transport + mapper pair.
	pub fn with_http_client(
		config: ProviderConfig,
		http_client: impl Into<Arc<C>>,
		mapper: impl Into<Arc<M>>,
	) -> Self {
		Self { config, http_client: http_client.into(), transport_mapper: mapper.into() }
	}
}
#[cfg(feature = "reqwest")]
impl Gateway<ReqwestHttpClient, ReqwestTransportErrorMapper> {
	/// Creates a gateway with its own reqwest transport.
	///
	/// The configured request timeout, when set, becomes the client's per-request deadline.
	pub fn new(config: ProviderConfig) -> Result<Self, ConfigError> {
		let http_client = ReqwestHttpClient::build(config.request_timeout)?;

		Ok(Self::with_http_client(config, http_client, Arc::new(ReqwestTransportErrorMapper)))
	}
}
impl<C, M> Debug for Gateway<C, M>
where
	C: ?Sized + ProviderHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Gateway")
			.field("base_url", &self.config.base_url.as_str())
			.field("token_url", &self.config.token_url.as_str())
			.field("client_id", &self.config.client_id)
			.field("client_secret", &self.config.client_secret)
			.finish()
	}
}

/// Runs `fut` inside a stage span and records its outcome.
pub(crate) async fn observe_stage<T, F>(stage: Stage, target: &str, fut: F) -> Result<T>
where
	F: Future<Output = Result<T>>,
{
	let span = GatewaySpan::stage(stage, target);

	obs::record_stage_outcome(stage, Outcome::Attempt);

	let result = span.instrument(fut).await;

	obs::record_stage_result(stage, &result);

	result
}

/// Sends one request through a fresh transport handle, mapping transport failures for `stage`.
pub(crate) async fn dispatch<C, M>(
	http_client: &C,
	mapper: &M,
	stage: Stage,
	request: HttpRequest,
) -> Result<HttpResponse>
where
	C: ?Sized + ProviderHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	let handle = http_client.with_metadata(ResponseMetadataSlot::default());

	handle
		.call(request)
		.await
		.map_err(|e| Error::Transport(mapper.map_transport_error(stage, e)))
}

/// Lossy UTF-8 view of a response body.
pub(crate) fn body_text(response: &HttpResponse) -> String {
	String::from_utf8_lossy(response.body()).into_owned()
}

#[cfg(all(test, feature = "reqwest"))]
mod tests {
	// self
	use super::*;
	use crate::_preludet::*;

	#[test]
	fn debug_output_redacts_secret() {
		let gateway = build_reqwest_test_gateway("http://127.0.0.1:9/");
		let rendered = format!("{gateway:?}");

		assert!(rendered.contains(TEST_CLIENT_ID));
		assert!(rendered.contains("<redacted>"));
		assert!(!rendered.contains(TEST_CLIENT_SECRET));
	}

	#[test]
	fn new_applies_configured_timeout() {
		let config = ProviderConfig::builder(TEST_CLIENT_ID, TEST_CLIENT_SECRET)
			.request_timeout(Duration::from_secs(5))
			.build()
			.expect("Failed to build provider configuration.");

		assert!(Gateway::new(config).is_ok());
	}
}
