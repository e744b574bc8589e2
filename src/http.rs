//! HTTP transport seam shared by every gateway stage.
//!
//! [`ProviderHttpClient`] lets callers swap the transport (a test double, a client with custom
//! TLS roots) without touching error classification. A transport hands out one handle per
//! request; the handle clears its [`ResponseMetadataSlot`] before sending and records the
//! status and body as soon as a response arrives, which is how a rejected token exchange
//! keeps the provider's raw answer.

// std
use std::ops::Deref;
// crates.io
use oauth2::{AsyncHttpClient, HttpClientError, HttpRequest, HttpResponse};
// self
use crate::_prelude::*;

/// Transport used for token, key, and API requests.
pub trait ProviderHttpClient
where
	Self: 'static + Send + Sync,
{
	/// Error produced by the underlying client.
	type TransportError: 'static + Send + Sync + StdError;

	/// Per-request handle; owns its state so request futures remain `Send`.
	type Handle: for<'c> AsyncHttpClient<
			'c,
			Error = HttpClientError<Self::TransportError>,
			Future: 'c + Send,
		>
		+ 'static
		+ Send
		+ Sync;

	/// Returns a handle that reports response status and body into `slot`.
	fn with_metadata(&self, slot: ResponseMetadataSlot) -> Self::Handle;
}

/// Status and body of the last response seen by a handle.
#[derive(Clone, Debug, Default)]
pub struct ResponseMetadata {
	/// HTTP status code.
	pub status: Option<u16>,
	/// Body decoded as lossy UTF-8.
	pub body: Option<String>,
}

/// Shared cell carrying [`ResponseMetadata`] from a handle to the error mapping code.
#[derive(Clone, Debug, Default)]
pub struct ResponseMetadataSlot(Arc<Mutex<Option<ResponseMetadata>>>);
impl ResponseMetadataSlot {
	/// Replaces the stored metadata.
	pub fn store(&self, meta: ResponseMetadata) {
		*self.0.lock() = Some(meta);
	}

	/// Status of the stored response without consuming it.
	pub fn status(&self) -> Option<u16> {
		self.0.lock().as_ref().and_then(|meta| meta.status)
	}

	/// Removes and returns the stored metadata.
	pub fn take(&self) -> Option<ResponseMetadata> {
		self.0.lock().take()
	}
}

/// reqwest-backed [`ProviderHttpClient`].
///
/// Redirects are disabled so a bearer token is only ever sent to the configured host.
#[cfg(feature = "reqwest")]
#[derive(Clone)]
pub struct ReqwestHttpClient(pub ReqwestClient);
#[cfg(feature = "reqwest")]
impl ReqwestHttpClient {
	/// Uses `client` as is.
	pub fn with_client(client: ReqwestClient) -> Self {
		Self(client)
	}

	/// Builds a client with redirects disabled and an optional per-request deadline.
	pub fn build(timeout: Option<Duration>) -> Result<Self, crate::error::ConfigError> {
		let builder = Self::builder();
		let builder = match timeout {
			Some(timeout) => builder.timeout(timeout),
			None => builder,
		};

		Ok(Self(builder.build()?))
	}

	fn builder() -> reqwest::ClientBuilder {
		ReqwestClient::builder().redirect(reqwest::redirect::Policy::none())
	}
}
#[cfg(feature = "reqwest")]
impl AsRef<ReqwestClient> for ReqwestHttpClient {
	fn as_ref(&self) -> &ReqwestClient {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl Deref for ReqwestHttpClient {
	type Target = ReqwestClient;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl ProviderHttpClient for ReqwestHttpClient {
	type Handle = ReqwestHandle;
	type TransportError = ReqwestError;

	fn with_metadata(&self, slot: ResponseMetadataSlot) -> Self::Handle {
		ReqwestHandle { client: self.0.clone(), slot }
	}
}

/// Request handle returned by [`ReqwestHttpClient`].
#[cfg(feature = "reqwest")]
#[derive(Clone)]
pub struct ReqwestHandle {
	client: ReqwestClient,
	slot: ResponseMetadataSlot,
}
#[cfg(feature = "reqwest")]
impl<'c> AsyncHttpClient<'c> for ReqwestHandle {
	type Error = HttpClientError<ReqwestError>;
	type Future =
		Pin<Box<dyn Future<Output = Result<HttpResponse, Self::Error>> + 'c + Send + Sync>>;

	fn call(&'c self, request: HttpRequest) -> Self::Future {
		Box::pin(async move {
			self.slot.take();

			let request: reqwest::Request = request.try_into().map_err(Box::new)?;
			let response = self.client.execute(request).await.map_err(Box::new)?;
			let status = response.status();
			let headers = response.headers().clone();
			let body = response.bytes().await.map_err(Box::new)?.to_vec();

			self.slot.store(ResponseMetadata {
				status: Some(status.as_u16()),
				body: Some(String::from_utf8_lossy(&body).into_owned()),
			});

			let mut converted = HttpResponse::new(body);

			*converted.status_mut() = status;
			*converted.headers_mut() = headers;

			Ok(converted)
		})
	}
}
