// self
use crate::{
	_prelude::*,
	auth::Secret,
	config::{DEFAULT_KEY_BITS, ProviderConfig, SANDBOX_BASE_URL, TOKEN_PATH},
	error::ConfigError,
};

/// Builder for [`ProviderConfig`] values.
#[derive(Debug)]
pub struct ProviderConfigBuilder {
	/// Raw base endpoint; defaults to the sandbox.
	pub base_url: String,
	/// Raw token endpoint override; defaults to `<base>/oauth/token`.
	pub token_url: Option<String>,
	/// OAuth 2.0 client identifier.
	pub client_id: String,
	/// OAuth 2.0 client secret.
	pub client_secret: Secret,
	/// Expected RSA modulus size of inbound encrypted PINs.
	pub expected_key_bits: usize,
	/// Optional per-request deadline.
	pub request_timeout: Option<Duration>,
}
impl ProviderConfigBuilder {
	/// Creates a new builder seeded with client credentials and sandbox defaults.
	pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
		Self {
			base_url: SANDBOX_BASE_URL.into(),
			token_url: None,
			client_id: client_id.into(),
			client_secret: Secret::new(client_secret),
			expected_key_bits: DEFAULT_KEY_BITS,
			request_timeout: None,
		}
	}

	/// Sets the base endpoint.
	pub fn base_url(mut self, url: impl Into<String>) -> Self {
		self.base_url = url.into();

		self
	}

	/// Overrides the token endpoint.
	pub fn token_url(mut self, url: impl Into<String>) -> Self {
		self.token_url = Some(url.into());

		self
	}

	/// Overrides the expected RSA modulus size of inbound encrypted PINs.
	pub fn expected_key_bits(mut self, bits: usize) -> Self {
		self.expected_key_bits = bits;

		self
	}

	/// Applies a deadline to every outbound request.
	pub fn request_timeout(mut self, timeout: Duration) -> Self {
		self.request_timeout = Some(timeout);

		self
	}

	/// Consumes the builder and validates the resulting configuration.
	pub fn build(self) -> Result<ProviderConfig, ConfigError> {
		let raw_base = self.base_url.trim();

		if raw_base.is_empty() {
			return Err(ConfigError::MissingBaseUrl);
		}

		let base_url = if raw_base.ends_with('/') {
			parse_endpoint("base", raw_base)?
		} else {
			parse_endpoint("base", &format!("{raw_base}/"))?
		};
		let token_url = match self.token_url.as_deref().map(str::trim) {
			Some(raw) if !raw.is_empty() => parse_endpoint("token", raw)?,
			_ => base_url.join(TOKEN_PATH).map_err(|source| ConfigError::InvalidUrl {
				endpoint: "token",
				value: format!("{base_url}{TOKEN_PATH}"),
				source,
			})?,
		};

		if self.client_id.trim().is_empty() {
			return Err(ConfigError::MissingCredential { name: "client_id" });
		}
		if self.client_secret.expose().trim().is_empty() {
			return Err(ConfigError::MissingCredential { name: "client_secret" });
		}
		if self.expected_key_bits == 0 || self.expected_key_bits % 8 != 0 {
			return Err(ConfigError::InvalidKeySize { bits: self.expected_key_bits });
		}

		Ok(ProviderConfig {
			base_url,
			token_url,
			client_id: self.client_id,
			client_secret: self.client_secret,
			expected_key_bits: self.expected_key_bits,
			request_timeout: self.request_timeout,
		})
	}
}

fn parse_endpoint(name: &'static str, raw: &str) -> Result<Url, ConfigError> {
	let url = Url::parse(raw).map_err(|source| ConfigError::InvalidUrl {
		endpoint: name,
		value: raw.to_owned(),
		source,
	})?;

	match url.scheme() {
		"http" | "https" => Ok(url),
		_ => Err(ConfigError::UnsupportedScheme { endpoint: name, url: url.to_string() }),
	}
}
