//! Token Provider: OAuth 2.0 client credentials exchange.

// self
use crate::{
	_prelude::*,
	auth::BearerToken,
	gateway::{self, Gateway},
	http::ProviderHttpClient,
	oauth::{ClientCredentialsFacade, TransportErrorMapper},
	obs::Stage,
};

impl<C, M> Gateway<C, M>
where
	C: ?Sized + ProviderHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// Exchanges the configured client credentials for a fresh bearer token.
	///
	/// Tokens are not cached; every call performs one exchange. A non-200 answer becomes
	/// [`AuthError::Rejected`](crate::error::AuthError::Rejected) carrying the raw status and
	/// body, and network failures become [`AuthError::Transport`](crate::error::AuthError).
	pub async fn fetch_token(&self) -> Result<BearerToken> {
		gateway::observe_stage(Stage::Token, self.config.token_url.as_str(), async {
			let facade: ClientCredentialsFacade<C, M> = ClientCredentialsFacade::from_config(
				&self.config,
				self.http_client.clone(),
				self.transport_mapper.clone(),
			)?;

			Ok(facade.exchange().await?)
		})
		.await
	}
}
