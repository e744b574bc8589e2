//! Shared fixtures and fakes for integration tests.

#![allow(dead_code)]

// std
use std::{
	error::Error as StdError,
	fmt::{Display, Formatter, Result as FmtResult},
	future::Future,
	pin::Pin,
	sync::{
		Arc,
		atomic::{AtomicUsize, Ordering},
	},
};
// crates.io
use base64::{Engine as _, engine::general_purpose::STANDARD};
use httpmock::prelude::*;
// self
use orange_money_gateway::{
	config::ProviderConfig,
	error::TransportError,
	gateway::{Gateway, ReqwestGateway},
	http::{ProviderHttpClient, ResponseMetadataSlot},
	oauth::{
		TransportErrorMapper,
		oauth2::{AsyncHttpClient, HttpClientError, HttpRequest, HttpResponse},
	},
	obs::Stage,
};

pub const CLIENT_ID: &str = "it-client";
pub const CLIENT_SECRET: &str = "it-secret";
pub const PHONE_NUMBER: &str = "786175702";

pub const PRIVATE_2048: &str = include_str!("../fixtures/rsa2048_private.pem");
pub const PUBLIC_2048: &str = include_str!("../fixtures/rsa2048_public.b64");
pub const PRIVATE_4096: &str = include_str!("../fixtures/rsa4096_private.pem");
pub const PUBLIC_4096: &str = include_str!("../fixtures/rsa4096_public.b64");

pub fn config(base_url: &str) -> ProviderConfig {
	ProviderConfig::builder(CLIENT_ID, CLIENT_SECRET)
		.base_url(base_url)
		.build()
		.expect("Failed to build integration test configuration.")
}

pub fn build_gateway(server: &MockServer) -> ReqwestGateway {
	Gateway::new(config(&server.base_url())).expect("Failed to build integration test gateway.")
}

pub async fn mock_token<'a>(server: &'a MockServer, token: &str) -> httpmock::Mock<'a> {
	let body = serde_json::json!({ "access_token": token, "token_type": "bearer", "expires_in": 300 });

	server
		.mock_async(|when, then| {
			when.method(POST).path("/oauth/token").body_includes("grant_type=client_credentials");
			then.status(200).header("content-type", "application/json").json_body(body);
		})
		.await
}

pub async fn mock_public_key<'a>(
	server: &'a MockServer,
	token: &str,
	key: &str,
	bits: usize,
) -> httpmock::Mock<'a> {
	let bearer = format!("Bearer {token}");
	let body = serde_json::json!({
		"keyId": "it-key",
		"keyType": "RSA",
		"keySize": bits,
		"key": key.trim()
	});

	server
		.mock_async(|when, then| {
			when.method(GET).path("/api/account/v1/publicKeys").header("authorization", bearer);
			then.status(200).header("content-type", "application/json").json_body(body);
		})
		.await
}

/// Padded Base64 text of exactly `len` characters; `len` must be a multiple of 4.
pub fn base64_of_len(len: usize) -> String {
	let encoded = STANDARD.encode(vec![0x5a_u8; len / 4 * 3]);

	assert_eq!(encoded.len(), len, "Length must be a multiple of 4.");

	encoded
}

pub fn otp_body(pin_code: &str, phone_number: &str) -> String {
	serde_json::json!({ "pinCode": pin_code, "phoneNumber": phone_number }).to_string()
}

#[derive(Debug)]
pub struct UnreachableError;
impl Display for UnreachableError {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		write!(f, "Network is unreachable.")
	}
}
impl StdError for UnreachableError {}

/// Transport that fails every request and counts how many were attempted.
#[derive(Clone, Debug, Default)]
pub struct CountingHttpClient {
	calls: Arc<AtomicUsize>,
}
impl CountingHttpClient {
	pub fn calls(&self) -> usize {
		self.calls.load(Ordering::SeqCst)
	}
}
impl ProviderHttpClient for CountingHttpClient {
	type Handle = CountingHandle;
	type TransportError = UnreachableError;

	fn with_metadata(&self, slot: ResponseMetadataSlot) -> Self::Handle {
		CountingHandle { calls: self.calls.clone(), slot }
	}
}

pub struct CountingHandle {
	calls: Arc<AtomicUsize>,
	slot: ResponseMetadataSlot,
}
impl<'a> AsyncHttpClient<'a> for CountingHandle {
	type Error = HttpClientError<UnreachableError>;
	type Future =
		Pin<Box<dyn Future<Output = Result<HttpResponse, Self::Error>> + 'a + Send + Sync>>;

	fn call(&'a self, _request: HttpRequest) -> Self::Future {
		let calls = self.calls.clone();
		let slot = self.slot.clone();

		Box::pin(async move {
			slot.take();
			calls.fetch_add(1, Ordering::SeqCst);

			Err(HttpClientError::Reqwest(Box::new(UnreachableError)))
		})
	}
}

#[derive(Clone, Debug, Default)]
pub struct UnreachableMapper;
impl TransportErrorMapper<UnreachableError> for UnreachableMapper {
	fn map_transport_error(
		&self,
		stage: Stage,
		error: HttpClientError<UnreachableError>,
	) -> TransportError {
		match error {
			HttpClientError::Reqwest(inner) => TransportError::network(stage, *inner),
			other => TransportError::Other { stage, message: other.to_string() },
		}
	}
}

/// Gateway whose transport never reaches a server, paired with its call counter.
pub fn counting_gateway() -> (Gateway<CountingHttpClient, UnreachableMapper>, CountingHttpClient) {
	let transport = CountingHttpClient::default();
	let gateway = Gateway::with_http_client(
		config("https://provider.invalid/"),
		transport.clone(),
		Arc::new(UnreachableMapper),
	);

	(gateway, transport)
}
