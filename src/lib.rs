//! Orange Money client gateway: OAuth 2.0 client credentials, RSA PIN encryption, strict
//! request validation, and authenticated provider calls behind one stable error taxonomy.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod auth;
pub mod config;
pub mod crypto;
pub mod error;
pub mod flows;
pub mod gateway;
pub mod http;
pub mod model;
pub mod oauth;
pub mod obs;
pub mod validate;
#[cfg(all(any(test, feature = "test"), feature = "reqwest"))]
pub mod _preludet {
	//! Convenience re-exports and helpers for tests; enabled via `cfg(test)` or the `test`
	//! crate feature.

	pub use crate::_prelude::*;

	// self
	use crate::{
		config::ProviderConfig,
		gateway::{Gateway, ReqwestGateway},
		http::ReqwestHttpClient,
		oauth::ReqwestTransportErrorMapper,
	};

	/// Client identifier used by test gateways.
	pub const TEST_CLIENT_ID: &str = "test-client";
	/// Client secret used by test gateways.
	pub const TEST_CLIENT_SECRET: &str = "test-secret";

	/// Builds a configuration whose every endpoint lives under `base_url`.
	pub fn test_config(base_url: &str) -> ProviderConfig {
		ProviderConfig::builder(TEST_CLIENT_ID, TEST_CLIENT_SECRET)
			.base_url(base_url)
			.build()
			.expect("Failed to build test provider configuration.")
	}

	/// Constructs a reqwest-backed [`Gateway`] pointed at `base_url`.
	pub fn build_reqwest_test_gateway(base_url: &str) -> ReqwestGateway {
		Gateway::with_http_client(
			test_config(base_url),
			ReqwestHttpClient::build(None).expect("Failed to build reqwest client."),
			Arc::new(ReqwestTransportErrorMapper),
		)
	}
}

mod _prelude {
	pub use std::{
		collections::BTreeMap,
		error::Error as StdError,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		pin::Pin,
		str::FromStr,
		sync::Arc,
		time::Duration,
	};

	pub use parking_lot::Mutex;
	#[cfg(feature = "reqwest")]
	pub use reqwest::{Client as ReqwestClient, Error as ReqwestError};
	pub use serde::{Deserialize, Serialize};
	pub use thiserror::Error as ThisError;
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

#[cfg(feature = "reqwest")] pub use reqwest;
pub use url;
#[cfg(all(test, feature = "reqwest"))] use {color_eyre as _, httpmock as _};
