// self
use crate::{
	_prelude::*,
	config::{ProviderConfig, ProviderConfigBuilder},
	error::ConfigError,
};

/// Base endpoint variable; unset falls back to the sandbox.
pub const ENV_BASE_URL: &str = "OM_BASE_URL";
/// Optional token endpoint override.
pub const ENV_TOKEN_URL: &str = "OM_TOKEN_URL";
/// OAuth 2.0 client identifier variable.
pub const ENV_CLIENT_ID: &str = "ORANGE_MONEY_CLIENT_ID";
/// OAuth 2.0 client secret variable.
pub const ENV_CLIENT_SECRET: &str = "ORANGE_MONEY_CLIENT_SECRET";
/// Optional per-request deadline, in whole seconds.
pub const ENV_REQUEST_TIMEOUT_SECS: &str = "OM_REQUEST_TIMEOUT_SECS";

impl ProviderConfig {
	/// Reads the configuration from the process environment.
	pub fn from_env() -> Result<Self, ConfigError> {
		Self::from_lookup(|name| std::env::var(name).ok())
	}

	/// Reads the configuration through `lookup`, which maps variable names to values.
	pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
	where
		F: Fn(&str) -> Option<String>,
	{
		let client_id =
			lookup(ENV_CLIENT_ID).ok_or(ConfigError::MissingVariable { name: ENV_CLIENT_ID })?;
		let client_secret = lookup(ENV_CLIENT_SECRET)
			.ok_or(ConfigError::MissingVariable { name: ENV_CLIENT_SECRET })?;
		let mut builder = ProviderConfigBuilder::new(client_id, client_secret);

		// Set-but-blank stays blank so the builder reports it.
		if let Some(base) = lookup(ENV_BASE_URL) {
			builder = builder.base_url(base);
		}
		if let Some(token) = lookup(ENV_TOKEN_URL) {
			builder = builder.token_url(token);
		}
		if let Some(raw) = lookup(ENV_REQUEST_TIMEOUT_SECS) {
			let secs = raw.trim().parse::<u64>().ok().filter(|secs| *secs > 0).ok_or_else(|| {
				ConfigError::InvalidVariable { name: ENV_REQUEST_TIMEOUT_SECS, value: raw.clone() }
			})?;

			builder = builder.request_timeout(Duration::from_secs(secs));
		}

		builder.build()
	}
}
