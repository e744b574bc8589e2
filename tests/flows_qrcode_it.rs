mod support;

// crates.io
use httpmock::prelude::*;
use serde_json::json;
// self
use orange_money_gateway::{
	error::{Error, ValidationError},
	flows::Reply,
	validate::Rule,
};
use support::*;

#[tokio::test]
async fn qr_code_request_is_forwarded() {
	let server = MockServer::start_async().await;

	mock_token(&server, "tok-1").await;

	let raw = json!({
		"amount": { "value": 1000, "unit": "XOF" },
		"callbackCancelUrl": "https://shop.example/cancel",
		"callbackSuccessUrl": "https://shop.example/success",
		"code": "599175",
		"name": "Boutique",
		"validity": 900
	})
	.to_string();
	let forwarded = raw.clone();
	let api = server
		.mock_async(|when, then| {
			when.method(POST).path("/api/eWallet/v4/qrcode").body(forwarded);
			then.status(201).body("{\"deepLink\":\"sameaosnapp://pay?qrId=Q1\",\"qrId\":\"Q1\"}");
		})
		.await;
	let gateway = build_gateway(&server);
	let reply = Reply::from_result(gateway.generate_qr_code(&raw).await);

	assert_eq!(reply.status, 200);
	assert!(reply.body.contains("Q1"));

	api.assert_async().await;
}

#[tokio::test]
async fn empty_code_is_rejected_without_network() {
	let (gateway, transport) = counting_gateway();
	let err = gateway
		.generate_qr_code(&json!({ "code": "" }).to_string())
		.await
		.expect_err("Empty code should fail.");

	assert!(matches!(err, Error::Validation(ValidationError { field: "code", rule: Rule::Empty })));

	let err = gateway
		.generate_qr_code(&json!({ "name": "Boutique" }).to_string())
		.await
		.expect_err("Missing code should fail.");

	assert!(matches!(err, Error::Validation(ValidationError { field: "code", rule: Rule::Missing })));
	assert_eq!(transport.calls(), 0);
}
