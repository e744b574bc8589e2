//! Public Key Provider: authenticated retrieval of the provider's PIN encryption key.

// crates.io
use oauth2::http::{
	Method, Request, StatusCode,
	header::{ACCEPT, AUTHORIZATION},
};
// self
use crate::{
	_prelude::*,
	crypto::PinKey,
	error::{KeyFetchError, MalformedResponseError, TransportError},
	gateway::{self, Gateway},
	http::ProviderHttpClient,
	model::PublicKeyResponse,
	oauth::TransportErrorMapper,
	obs::Stage,
};

impl<C, M> Gateway<C, M>
where
	C: ?Sized + ProviderHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// Fetches the provider's current public key.
	///
	/// Obtains a fresh token first; the key is never cached so a rotated key is picked up on
	/// the next call. Only HTTP 200 counts as success.
	pub async fn fetch_public_key(&self) -> Result<PublicKeyResponse> {
		let url = self.config.public_key_url()?;
		let token = self.fetch_token().await?;

		gateway::observe_stage(Stage::PublicKey, url.as_str(), async {
			let request = Request::builder()
				.method(Method::GET)
				.uri(url.as_str())
				.header(AUTHORIZATION, token.header_value())
				.header(ACCEPT, "application/json")
				.body(Vec::new())
				.map_err(|source| TransportError::Request { stage: Stage::PublicKey, source })?;
			let response = gateway::dispatch(
				self.http_client.as_ref(),
				self.transport_mapper.as_ref(),
				Stage::PublicKey,
				request,
			)
			.await?;

			if response.status() != StatusCode::OK {
				return Err(KeyFetchError::Rejected {
					status: response.status().as_u16(),
					body: gateway::body_text(&response),
				}
				.into());
			}

			let mut de = serde_json::Deserializer::from_slice(response.body());
			let key: PublicKeyResponse = serde_path_to_error::deserialize(&mut de)
				.map_err(|e| MalformedResponseError::json(Stage::PublicKey, e))?;

			Ok(key)
		})
		.await
	}

	/// Fetches the current key and parses it for encryption.
	///
	/// A positive advertised `keySize` must match the parsed modulus.
	pub async fn fetch_pin_key(&self) -> Result<PinKey> {
		let response = self.fetch_public_key().await?;

		gateway::observe_stage(Stage::Encryption, &response.key_id, async {
			let key = PinKey::from_base64_der(&response.key)?;

			if response.key_size > 0 && response.key_size != key.bits() {
				return Err(KeyFetchError::KeySizeMismatch {
					key_id: response.key_id.clone(),
					advertised: response.key_size,
					actual: key.bits(),
				}
				.into());
			}

			Ok(key)
		})
		.await
	}
}
