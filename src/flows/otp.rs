//! OTP generation: PIN encryption with the current provider key, then the OTP call.

// self
use crate::{
	_prelude::*,
	crypto,
	error::MalformedResponseError,
	flows,
	gateway::{self, Gateway},
	http::ProviderHttpClient,
	model::GenerateOtpRequest,
	oauth::TransportErrorMapper,
	obs::{FlowKind, Stage},
	validate,
};

#[derive(Debug, Deserialize)]
struct OtpResponse {
	#[serde(default)]
	otp: Option<String>,
}

impl<C, M> Gateway<C, M>
where
	C: ?Sized + ProviderHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// Generates an OTP for the inbound `{pinCode, phoneNumber}` body and returns it.
	///
	/// The PIN length is checked against the configured key size before any network call.
	/// The provider key is fetched for this request, the PIN is encrypted locally, and the
	/// request is sent for the phone number's principal wallet.
	pub async fn generate_otp(&self, raw: &str) -> Result<String> {
		flows::observe_flow(FlowKind::GenerateOtp, async {
			let pin_code_len = crypto::encoded_ciphertext_len(self.config.expected_key_bits);
			let request = flows::validate_stage("otp", || {
				validate::validate_otp_request(raw, pin_code_len)
			})?;
			let key = self.fetch_pin_key().await?;
			let encrypted_pin_code = gateway::observe_stage(Stage::Encryption, "pin", async {
				Ok(key.encrypt(&request.pin_code)?)
			})
			.await?;
			let body = self
				.generate_otp_request(&GenerateOtpRequest::for_msisdn(
					request.phone_number,
					encrypted_pin_code,
				))
				.await?;

			extract_otp(&body)
		})
		.await
	}
}

fn extract_otp(body: &str) -> Result<String> {
	let mut de = serde_json::Deserializer::from_str(body);
	let response: OtpResponse = serde_path_to_error::deserialize(&mut de)
		.map_err(|e| MalformedResponseError::json(Stage::ApiCall, e))?;

	Ok(response.otp.ok_or_else(|| MalformedResponseError::missing_field(Stage::ApiCall, "otp"))?)
}
