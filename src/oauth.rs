//! OAuth 2.0 client credentials facade and transport error mapping.

pub use oauth2;

// crates.io
use oauth2::{
	AuthType, ClientId, ClientSecret, EndpointNotSet, EndpointSet, HttpClientError,
	RequestTokenError, TokenResponse, TokenUrl,
	basic::{BasicClient, BasicRequestTokenError},
};
// self
use crate::{
	_prelude::*,
	auth::BearerToken,
	config::ProviderConfig,
	error::{AuthError, ConfigError, TransportError},
	http::{ProviderHttpClient, ResponseMetadata, ResponseMetadataSlot},
	obs::Stage,
};

type ConfiguredBasicClient =
	BasicClient<EndpointNotSet, EndpointNotSet, EndpointNotSet, EndpointNotSet, EndpointSet>;
type FacadeFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, AuthError>> + 'a + Send>>;

/// Maps HTTP transport failures into stage-tagged [`TransportError`] values.
pub trait TransportErrorMapper<E>
where
	Self: 'static + Send + Sync,
	E: 'static + Send + Sync + StdError,
{
	/// Converts an [`HttpClientError`] emitted by the transport into a gateway error.
	fn map_transport_error(&self, stage: Stage, error: HttpClientError<E>) -> TransportError;
}

/// Default mapper for reqwest-backed transports.
#[cfg(feature = "reqwest")]
#[derive(Clone, Debug, Default)]
pub struct ReqwestTransportErrorMapper;
#[cfg(feature = "reqwest")]
impl TransportErrorMapper<ReqwestError> for ReqwestTransportErrorMapper {
	fn map_transport_error(&self, stage: Stage, err: HttpClientError<ReqwestError>) -> TransportError {
		match err {
			HttpClientError::Reqwest(inner) => map_reqwest_error(stage, *inner),
			HttpClientError::Http(source) => TransportError::Request { stage, source },
			HttpClientError::Io(source) => TransportError::Io { stage, source },
			HttpClientError::Other(message) => TransportError::Other { stage, message },
			_ => TransportError::Other { stage, message: "unrecognized transport failure".into() },
		}
	}
}

/// Client credentials exchange against the configured token endpoint.
///
/// Credentials travel in the form body (`client_secret_post`), alongside
/// `grant_type=client_credentials`. Only HTTP 200 counts as success.
pub(crate) struct ClientCredentialsFacade<C, M>
where
	C: ?Sized + ProviderHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	oauth_client: ConfiguredBasicClient,
	http_client: Arc<C>,
	error_mapper: Arc<M>,
}
impl<C, M> ClientCredentialsFacade<C, M>
where
	C: ?Sized + ProviderHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	pub(crate) fn from_config(
		config: &ProviderConfig,
		http_client: Arc<C>,
		error_mapper: Arc<M>,
	) -> Result<Self, ConfigError> {
		let token_url =
			TokenUrl::new(config.token_url.to_string()).map_err(|source| ConfigError::InvalidUrl {
				endpoint: "token",
				value: config.token_url.to_string(),
				source,
			})?;
		let oauth_client = BasicClient::new(ClientId::new(config.client_id.clone()))
			.set_client_secret(ClientSecret::new(config.client_secret.expose().to_owned()))
			.set_token_uri(token_url)
			.set_auth_type(AuthType::RequestBody);

		Ok(Self { oauth_client, http_client, error_mapper })
	}

	pub(crate) fn exchange(&self) -> FacadeFuture<'_, BearerToken> {
		let meta = ResponseMetadataSlot::default();

		Box::pin(async move {
			let handle = self.http_client.with_metadata(meta.clone());
			let result =
				self.oauth_client.exchange_client_credentials().request_async(&handle).await;
			let token = match result {
				Ok(response) => response.access_token().secret().to_owned(),
				// The provider may omit `token_type`; only `access_token` is required.
				Err(RequestTokenError::Parse(_, body))
					if meta.status().is_none_or(|status| status == 200) =>
					access_token_from_body(&body)?,
				Err(err) => return Err(map_request_error(meta.take(), err, self.error_mapper.as_ref())),
			};

			if token.is_empty() {
				return Err(AuthError::Unexpected { message: "access_token is empty.".into() });
			}

			Ok(BearerToken::new(token))
		})
	}
}

#[derive(Deserialize)]
struct AccessTokenBody {
	access_token: String,
}

fn access_token_from_body(body: &[u8]) -> Result<String, AuthError> {
	let mut deserializer = serde_json::Deserializer::from_slice(body);
	let parsed: AccessTokenBody = serde_path_to_error::deserialize(&mut deserializer)
		.map_err(|source| AuthError::MalformedResponse { source })?;

	Ok(parsed.access_token)
}

fn map_request_error<E, M>(
	meta: Option<ResponseMetadata>,
	err: BasicRequestTokenError<HttpClientError<E>>,
	mapper: &M,
) -> AuthError
where
	E: 'static + Send + Sync + StdError,
	M: ?Sized + TransportErrorMapper<E>,
{
	let rejected = meta.and_then(|meta| {
		meta.status.filter(|status| *status != 200).map(|status| (status, meta.body.unwrap_or_default()))
	});

	match (err, rejected) {
		(RequestTokenError::Request(error), _) =>
			AuthError::Transport(mapper.map_transport_error(Stage::Token, error)),
		(_, Some((status, body))) => AuthError::Rejected { status, body },
		(RequestTokenError::Parse(source, _body), None) => AuthError::MalformedResponse { source },
		(RequestTokenError::ServerResponse(response), None) => AuthError::Unexpected {
			message: format!("OAuth error `{}`.", response.error().as_ref()),
		},
		(RequestTokenError::Other(message), None) => AuthError::Unexpected { message },
	}
}

#[cfg(feature = "reqwest")]
fn map_reqwest_error(stage: Stage, err: ReqwestError) -> TransportError {
	if err.is_timeout() {
		TransportError::timeout(stage, err)
	} else {
		TransportError::network(stage, err)
	}
}
