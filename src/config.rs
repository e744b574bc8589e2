//! Immutable provider configuration shared by every gateway stage.
//!
//! A [`ProviderConfig`] is assembled once at startup, either through
//! [`ProviderConfigBuilder`] or from the process environment, and is never mutated
//! afterwards. Endpoint validation happens at construction time so an unusable base
//! endpoint is reported before any request is attempted.

/// Builder API for assembling provider configurations.
pub mod builder;
/// Environment loader.
pub mod env;

pub use builder::*;
pub use env::*;

// self
use crate::{_prelude::*, auth::Secret, error::ConfigError};

/// Sandbox endpoint used when no base URL is configured.
pub const SANDBOX_BASE_URL: &str = "https://api.sandbox.orange-sonatel.com/";
/// Token endpoint path, relative to the base endpoint.
pub const TOKEN_PATH: &str = "oauth/token";
/// Public key endpoint path, relative to the base endpoint.
pub const PUBLIC_KEY_PATH: &str = "api/account/v1/publicKeys";
/// Key size the provider publishes today.
pub const DEFAULT_KEY_BITS: usize = 2048;

/// Immutable configuration consumed by the gateway.
#[derive(Clone, Debug)]
pub struct ProviderConfig {
	/// Base endpoint; always ends with a slash.
	pub base_url: Url,
	/// OAuth 2.0 token endpoint.
	pub token_url: Url,
	/// OAuth 2.0 client identifier.
	pub client_id: String,
	/// OAuth 2.0 client secret.
	pub client_secret: Secret,
	/// RSA modulus size the inbound encrypted PIN is expected to match.
	pub expected_key_bits: usize,
	/// Deadline applied to every outbound request, when set.
	pub request_timeout: Option<Duration>,
}
impl ProviderConfig {
	/// Creates a new builder for the provided client credentials.
	pub fn builder(
		client_id: impl Into<String>,
		client_secret: impl Into<String>,
	) -> ProviderConfigBuilder {
		ProviderConfigBuilder::new(client_id, client_secret)
	}

	/// Public key endpoint under the base endpoint.
	pub fn public_key_url(&self) -> Result<Url, ConfigError> {
		self.resolve(PUBLIC_KEY_PATH)
	}

	/// Joins `path` onto the base endpoint.
	///
	/// Leading slashes are ignored so `path` always stays below the base path; paths that
	/// would leave the base origin are rejected.
	pub fn resolve(&self, path: &str) -> Result<Url, ConfigError> {
		let relative = path.trim().trim_start_matches('/');

		if relative.is_empty() {
			return Err(ConfigError::MissingPath);
		}

		let url = self
			.base_url
			.join(relative)
			.map_err(|_| ConfigError::InvalidPath { path: path.to_owned() })?;

		if url.origin() != self.base_url.origin()
			|| !url.path().starts_with(self.base_url.path())
		{
			return Err(ConfigError::InvalidPath { path: path.to_owned() });
		}

		Ok(url)
	}
}
