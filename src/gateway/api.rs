//! API Caller: authenticated JSON `POST`s against provider paths.

// crates.io
use oauth2::http::{
	Method, Request,
	header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE},
};
// self
use crate::{
	_prelude::*,
	auth::BearerToken,
	error::TransportError,
	gateway::{self, Gateway},
	http::ProviderHttpClient,
	model::{GenerateOtpRequest, ONE_STEP_PAYMENT_PATH, OTP_PATH, OneStepPaymentRequest},
	oauth::TransportErrorMapper,
	obs::Stage,
	validate,
};

/// Owned future returned by [`Gateway::call_async`]; safe to spawn onto any runtime.
pub type CallFuture = Pin<Box<dyn Future<Output = Result<String>> + 'static + Send>>;

impl<C, M> Gateway<C, M>
where
	C: ?Sized + ProviderHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// Posts `json_body` to `path` under the base endpoint with a freshly issued token.
	///
	/// The path is resolved before any network activity, so an unusable path fails without
	/// contacting the token endpoint. Any 2xx status returns the raw response body;
	/// other statuses become [`Error::Api`].
	pub async fn call(&self, path: &str, json_body: &str) -> Result<String> {
		let url = self.config.resolve(path)?;
		let token = self.fetch_token().await?;

		post_json(
			self.http_client.as_ref(),
			self.transport_mapper.as_ref(),
			url,
			json_body.to_owned(),
			token,
		)
		.await
	}

	/// Posts `json_body` to `path` with a caller-supplied token.
	///
	/// The returned future owns everything it needs, so it can be spawned and awaited
	/// independently of `self`. Ordering between concurrent calls is unspecified.
	pub fn call_async(&self, path: &str, json_body: &str, token: BearerToken) -> CallFuture {
		let resolved = self.config.resolve(path);
		let http_client = self.http_client.clone();
		let mapper = self.transport_mapper.clone();
		let body = json_body.to_owned();

		Box::pin(async move {
			post_json(http_client.as_ref(), mapper.as_ref(), resolved?, body, token).await
		})
	}

	/// Validates and posts a typed one-step payment.
	pub async fn send_payment_request(&self, request: &OneStepPaymentRequest) -> Result<String> {
		request.validate()?;

		let body = validate::encode("one-step payment", request)?;

		self.call(ONE_STEP_PAYMENT_PATH, &body).await
	}

	/// Posts a provider-shaped OTP request and returns the raw response body.
	pub async fn generate_otp_request(&self, request: &GenerateOtpRequest) -> Result<String> {
		let body = validate::encode("OTP", request)?;

		self.call(OTP_PATH, &body).await
	}
}

async fn post_json<C, M>(
	http_client: &C,
	mapper: &M,
	url: Url,
	json_body: String,
	token: BearerToken,
) -> Result<String>
where
	C: ?Sized + ProviderHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	gateway::observe_stage(Stage::ApiCall, url.path(), async {
		let request = Request::builder()
			.method(Method::POST)
			.uri(url.as_str())
			.header(CONTENT_TYPE, "application/json")
			.header(ACCEPT, "application/json")
			.header(AUTHORIZATION, token.header_value())
			.body(json_body.into_bytes())
			.map_err(|source| TransportError::Request { stage: Stage::ApiCall, source })?;
		let response = gateway::dispatch(http_client, mapper, Stage::ApiCall, request).await?;
		let status = response.status();
		let body = gateway::body_text(&response);

		if status.is_success() {
			Ok(body)
		} else {
			Err(Error::Api { stage: Stage::ApiCall, status: status.as_u16(), body })
		}
	})
	.await
}

#[cfg(all(test, feature = "reqwest"))]
mod tests {
	// crates.io
	use httpmock::prelude::*;
	// self
	use super::*;
	use crate::{
		_preludet::*,
		error::ConfigError,
		model::{IdType, Merchant, Money, Payer},
	};

	async fn mock_token(server: &MockServer) -> httpmock::Mock<'_> {
		server
			.mock_async(|when, then| {
				when.method(POST).path("/oauth/token");
				then.status(200)
					.header("content-type", "application/json")
					.json_body(serde_json::json!({ "access_token": "tok-1", "token_type": "bearer" }));
			})
			.await
	}

	#[tokio::test]
	async fn call_posts_json_with_bearer_token() {
		let server = MockServer::start_async().await;

		mock_token(&server).await;

		let mock = server
			.mock_async(|when, then| {
				when.method(POST)
					.path("/api/eWallet/v4/qrcode")
					.header("authorization", "Bearer tok-1")
					.header("content-type", "application/json")
					.body("{\"code\":\"599175\"}");
				then.status(201).body("{\"qrId\":\"q-1\"}");
			})
			.await;
		let gateway = build_reqwest_test_gateway(&server.base_url());
		let body = gateway
			.call("api/eWallet/v4/qrcode", "{\"code\":\"599175\"}")
			.await
			.expect("2xx should succeed.");

		mock.assert_async().await;

		assert_eq!(body, "{\"qrId\":\"q-1\"}");
	}

	#[tokio::test]
	async fn non_2xx_keeps_status_and_body() {
		let server = MockServer::start_async().await;

		mock_token(&server).await;
		server
			.mock_async(|when, then| {
				when.method(POST).path("/api/eWallet/v1/payments/onestep");
				then.status(409).body("{\"detail\":\"duplicate\"}");
			})
			.await;

		let gateway = build_reqwest_test_gateway(&server.base_url());
		let err = gateway
			.call(ONE_STEP_PAYMENT_PATH, "{}")
			.await
			.expect_err("409 should fail.");

		assert!(matches!(
			err,
			Error::Api { stage: Stage::ApiCall, status: 409, ref body } if body.contains("duplicate")
		));
	}

	#[tokio::test]
	async fn bad_path_fails_before_token_exchange() {
		let server = MockServer::start_async().await;
		let token = mock_token(&server).await;
		let gateway = build_reqwest_test_gateway(&server.base_url());
		let err = gateway.call("", "{}").await.expect_err("Empty path should fail.");

		assert!(matches!(err, Error::Config(ConfigError::MissingPath)));

		token.assert_calls_async(0).await;
	}

	#[tokio::test]
	async fn call_async_uses_supplied_token() {
		let server = MockServer::start_async().await;
		let token_mock = mock_token(&server).await;
		let mock = server
			.mock_async(|when, then| {
				when.method(POST).path("/api/eWallet/v1/payments/otp").header("authorization", "Bearer tok-9");
				then.status(200).body("{\"otp\":\"654321\"}");
			})
			.await;
		let gateway = build_reqwest_test_gateway(&server.base_url());
		let future = gateway.call_async(OTP_PATH, "{}", BearerToken::new("tok-9"));

		drop(gateway);

		let body = tokio::spawn(future)
			.await
			.expect("Task should not panic.")
			.expect("Call should succeed.");

		assert_eq!(body, "{\"otp\":\"654321\"}");

		mock.assert_async().await;
		token_mock.assert_calls_async(0).await;
	}

	#[tokio::test]
	async fn invalid_typed_payment_is_not_sent() {
		let server = MockServer::start_async().await;
		let token = mock_token(&server).await;
		let gateway = build_reqwest_test_gateway(&server.base_url());
		let request = OneStepPaymentRequest {
			amount: Money::new(0.5, "XOF"),
			customer: Payer {
				merchant: Merchant { id_type: IdType::Msisdn, id: "786175702".into(), name: None },
				otp: "123456".into(),
				wallet_type: None,
			},
			partner: Merchant { id_type: IdType::Code, id: "599175".into(), name: None },
			reference: "order-42".into(),
			metadata: None,
		};
		let err = gateway.send_payment_request(&request).await.expect_err("Amount below 1 should fail.");

		assert!(matches!(err, Error::Validation(ref e) if e.field == "amount.value"));

		token.assert_calls_async(0).await;
	}

	#[tokio::test]
	async fn generate_otp_request_posts_provider_shape() {
		let server = MockServer::start_async().await;

		mock_token(&server).await;

		let mock = server
			.mock_async(|when, then| {
				when.method(POST)
					.path("/api/eWallet/v1/payments/otp")
					.body_includes("\"idType\":\"MSISDN\"")
					.body_includes("\"walletType\":\"PRINCIPAL\"");
				then.status(200).body("{\"otp\":\"123456\"}");
			})
			.await;
		let gateway = build_reqwest_test_gateway(&server.base_url());
		let request = GenerateOtpRequest::for_msisdn("786175702", "c2VjcmV0".into());
		let body = gateway.generate_otp_request(&request).await.expect("OTP call should succeed.");

		mock.assert_async().await;

		assert!(body.contains("123456"));
	}
}
