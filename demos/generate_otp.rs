//! Runs the OTP use case end to end against mock provider endpoints: token exchange, key
//! fetch, local PIN encryption, then the OTP call.

// std
use std::sync::Arc;
// crates.io
use base64::{Engine as _, engine::general_purpose::STANDARD};
use color_eyre::Result;
use httpmock::prelude::*;
// self
use orange_money_gateway::{
	config::ProviderConfig,
	flows::Reply,
	gateway::Gateway,
	http::ReqwestHttpClient,
	oauth::ReqwestTransportErrorMapper,
	reqwest::Client,
};

const PUBLIC_KEY: &str = include_str!("../tests/fixtures/rsa4096_public.b64");

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let server = MockServer::start_async().await;
	let token_mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/oauth/token");
			then.status(200).header("content-type", "application/json").body(
				"{\"access_token\":\"demo-access\",\"token_type\":\"bearer\",\"expires_in\":300}",
			);
		})
		.await;
	let key_mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/api/account/v1/publicKeys");
			then.status(200).header("content-type", "application/json").json_body(
				serde_json::json!({
					"keyId": "demo-key",
					"keyType": "RSA",
					"keySize": 4096,
					"key": PUBLIC_KEY.trim()
				}),
			);
		})
		.await;
	let otp_mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/api/eWallet/v1/payments/otp");
			then.status(200)
				.header("content-type", "application/json")
				.body("{\"otp\":\"123456\",\"expiresIn\":300}");
		})
		.await;
	let config = ProviderConfig::builder("demo-client", "demo-secret")
		.base_url(server.base_url())
		.build()?;
	let http_client = ReqwestHttpClient::with_client(Client::builder().build()?);
	let gateway = <Gateway<ReqwestHttpClient, ReqwestTransportErrorMapper>>::with_http_client(
		config,
		http_client,
		Arc::new(ReqwestTransportErrorMapper),
	);
	let pin_code = STANDARD.encode([0x5a_u8; 258]);
	let inbound = serde_json::json!({ "pinCode": pin_code, "phoneNumber": "786175702" });
	let reply = Reply::from_result(gateway.generate_otp(&inbound.to_string()).await);

	println!("Reply status: {}", reply.status);
	println!("Reply body: {}", reply.body);

	token_mock.assert_calls_async(2).await;
	key_mock.assert_async().await;
	otp_mock.assert_async().await;

	let rejected = Reply::from_result(
		gateway.generate_otp("{\"pinCode\":\"short\",\"phoneNumber\":\"786175702\"}").await,
	);

	println!("Rejected status: {}", rejected.status);
	println!("Rejected body: {}", rejected.body);

	Ok(())
}
