//! Gateway-level error types shared across stages, validators, and use cases.

// self
use crate::{_prelude::*, obs::Stage, validate::Rule};

/// Gateway-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;
type JsonPathError = serde_path_to_error::Error<serde_json::Error>;

/// Coarse outcome class the hosting layer maps onto transport-level status codes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StatusClass {
	/// The caller sent something unacceptable; retrying the same input will fail again.
	ClientError,
	/// The gateway, the provider, or the network failed.
	ServerError,
}

/// Canonical gateway error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Local configuration problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Payload parsed but violates a field rule.
	#[error(transparent)]
	Validation(#[from] ValidationError),
	/// Payload could not be decoded into the expected shape.
	#[error(transparent)]
	MalformedPayload(#[from] MalformedPayloadError),
	/// Token exchange failed.
	#[error(transparent)]
	Auth(#[from] AuthError),
	/// Public key retrieval failed.
	#[error(transparent)]
	KeyFetch(#[from] KeyFetchError),
	/// Local PIN encryption failed.
	#[error(transparent)]
	Encryption(#[from] EncryptionError),
	/// Provider answered a call with a non-success status.
	#[error("Provider rejected the {stage} call with HTTP {status}: {body}")]
	Api {
		/// Stage that issued the call.
		stage: Stage,
		/// HTTP status code returned by the provider.
		status: u16,
		/// Raw response body, kept verbatim for diagnostics.
		body: String,
	},
	/// Provider answered with a success status but an unusable body.
	#[error(transparent)]
	MalformedResponse(#[from] MalformedResponseError),
	/// Network-level failure (DNS, TCP, TLS, timeout).
	#[error(transparent)]
	Transport(#[from] TransportError),
}
impl Error {
	/// Classifies the error for the hosting layer.
	pub fn status_class(&self) -> StatusClass {
		match self {
			Self::Validation(_) | Self::MalformedPayload(_) => StatusClass::ClientError,
			_ => StatusClass::ServerError,
		}
	}

	/// Suggested HTTP status for the hosting layer's reply.
	pub fn http_status(&self) -> u16 {
		match self {
			Self::Validation(_) | Self::MalformedPayload(_) => 400,
			Self::Config(_) | Self::Encryption(_) => 500,
			Self::Auth(_)
			| Self::KeyFetch(_)
			| Self::Api { .. }
			| Self::MalformedResponse(_)
			| Self::Transport(_) => 502,
		}
	}

	/// Stage the failure originated from.
	pub fn stage(&self) -> Stage {
		match self {
			Self::Config(_) => Stage::Configuration,
			Self::Validation(_) | Self::MalformedPayload(_) => Stage::Validation,
			Self::Auth(_) => Stage::Token,
			Self::KeyFetch(_) => Stage::PublicKey,
			Self::Encryption(_) => Stage::Encryption,
			Self::Api { stage, .. } => *stage,
			Self::MalformedResponse(e) => e.stage,
			Self::Transport(e) => e.stage(),
		}
	}
}

/// Configuration failures, raised before any network call is attempted.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// HTTP client could not be constructed.
	#[error("Invalid configuration: HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
	/// Base endpoint is empty or unset.
	#[error("Invalid configuration: base endpoint is not configured.")]
	MissingBaseUrl,
	/// An endpoint cannot be parsed.
	#[error("Invalid configuration: the {endpoint} endpoint is not a valid URL: {value}.")]
	InvalidUrl {
		/// Which endpoint failed validation.
		endpoint: &'static str,
		/// Raw value that failed to parse.
		value: String,
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// An endpoint uses a scheme other than `http` or `https`.
	#[error("Invalid configuration: the {endpoint} endpoint must use http or https: {url}.")]
	UnsupportedScheme {
		/// Which endpoint failed validation.
		endpoint: &'static str,
		/// Endpoint URL that failed validation.
		url: String,
	},
	/// Client identifier or secret is blank.
	#[error("Invalid configuration: the {name} credential is empty.")]
	MissingCredential {
		/// Credential label.
		name: &'static str,
	},
	/// Expected key size is zero or not byte aligned.
	#[error(
		"Invalid configuration: expected key size must be a positive multiple of 8 bits, got {bits}."
	)]
	InvalidKeySize {
		/// Rejected bit count.
		bits: usize,
	},
	/// Required environment variable is not set.
	#[error("Invalid configuration: environment variable `{name}` is not set.")]
	MissingVariable {
		/// Variable name.
		name: &'static str,
	},
	/// Environment variable holds an unusable value.
	#[error("Invalid configuration: environment variable `{name}` has an invalid value: {value}.")]
	InvalidVariable {
		/// Variable name.
		name: &'static str,
		/// Rejected value.
		value: String,
	},
	/// Call path is empty.
	#[error("Invalid configuration: provider call path is empty.")]
	MissingPath,
	/// Call path resolves outside the configured base endpoint.
	#[error("Invalid configuration: provider call path `{path}` escapes the base endpoint.")]
	InvalidPath {
		/// Rejected path.
		path: String,
	},
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for ConfigError {
	fn from(e: ReqwestError) -> Self {
		Self::http_client_build(e)
	}
}

/// First field rule a payload violated.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
#[error("Field `{field}` failed validation: {rule}.")]
pub struct ValidationError {
	/// Dotted path of the offending field (e.g. `customer.otp`).
	pub field: &'static str,
	/// Rule that was violated.
	pub rule: Rule,
}
impl ValidationError {
	/// Creates a new violation for `field`.
	pub fn new(field: &'static str, rule: Rule) -> Self {
		Self { field, rule }
	}
}

/// Inbound payload could not be decoded at all.
#[derive(Debug, ThisError)]
pub enum MalformedPayloadError {
	/// Body is missing or blank.
	#[error("The {shape} payload failed validation: it is empty.")]
	Empty {
		/// Request shape label.
		shape: &'static str,
	},
	/// Body is not JSON of the expected shape.
	#[error(
		"The {shape} payload failed validation: malformed at `{}`: {}",
		.source.path(),
		.source.inner()
	)]
	Json {
		/// Request shape label.
		shape: &'static str,
		/// Structured parsing failure with the failing JSON path.
		#[source]
		source: JsonPathError,
	},
	/// Body holds a JSON value followed by extra characters.
	#[error("The {shape} payload failed validation: trailing characters after the JSON value.")]
	TrailingCharacters {
		/// Request shape label.
		shape: &'static str,
		/// Underlying parser failure.
		#[source]
		source: serde_json::Error,
	},
	/// Typed request could not be rendered as JSON.
	#[error("The {shape} payload failed validation: it cannot be serialized: {source}")]
	Serialize {
		/// Request shape label.
		shape: &'static str,
		/// Underlying serializer failure.
		#[source]
		source: serde_json::Error,
	},
}

/// Token exchange failures.
#[derive(Debug, ThisError)]
pub enum AuthError {
	/// Token endpoint answered with a non-200 status.
	#[error("Token endpoint rejected the client credentials with HTTP {status}: {body}")]
	Rejected {
		/// HTTP status code returned by the token endpoint.
		status: u16,
		/// Raw response body.
		body: String,
	},
	/// Token endpoint answered 200 with a body that is not a token response.
	#[error("Token endpoint returned a malformed token response.")]
	MalformedResponse {
		/// Structured parsing failure.
		#[source]
		source: JsonPathError,
	},
	/// Token endpoint answered with something the OAuth client could not interpret.
	#[error("Token endpoint returned an unexpected response: {message}")]
	Unexpected {
		/// Description of the unexpected response.
		message: String,
	},
	/// Token endpoint could not be reached.
	#[error("Token endpoint could not be reached.")]
	Transport(#[from] TransportError),
}

/// Public key retrieval failures.
#[derive(Debug, ThisError)]
pub enum KeyFetchError {
	/// Key endpoint answered with a non-200 status.
	#[error("Public key endpoint returned HTTP {status}: {body}")]
	Rejected {
		/// HTTP status code returned by the key endpoint.
		status: u16,
		/// Raw response body.
		body: String,
	},
	/// Advertised key size does not match the key material.
	#[error("Public key `{key_id}` advertises {advertised} bits but its modulus has {actual} bits.")]
	KeySizeMismatch {
		/// Provider key identifier.
		key_id: String,
		/// `keySize` reported by the provider.
		advertised: usize,
		/// Modulus size parsed from the key.
		actual: usize,
	},
}

/// Local cryptographic failures; never downgraded to an empty ciphertext.
#[derive(Debug, ThisError)]
pub enum EncryptionError {
	/// Public key is not valid Base64.
	#[error("Encryption failed: public key is not valid Base64.")]
	KeyDecode(#[source] base64::DecodeError),
	/// Public key is not an X.509 SubjectPublicKeyInfo RSA key.
	#[error("Encryption failed: public key is not an RSA SubjectPublicKeyInfo.")]
	KeyParse(#[source] rsa::pkcs8::spki::Error),
	/// RSA encryption itself failed (e.g. PIN too long for the modulus).
	#[error("Encryption failed: {0}.")]
	Cipher(#[source] rsa::Error),
}

/// Success status with a body the stage could not use.
#[derive(Debug, ThisError)]
#[error("The {stage} response is malformed: {reason}")]
pub struct MalformedResponseError {
	/// Stage whose response was malformed.
	pub stage: Stage,
	/// Description of the problem, including the JSON path when available.
	pub reason: String,
	/// Structured parsing failure, when one exists.
	#[source]
	pub source: Option<JsonPathError>,
}
impl MalformedResponseError {
	/// Wraps a path-aware JSON failure.
	pub fn json(stage: Stage, source: JsonPathError) -> Self {
		Self { stage, reason: format!("`{}`: {}", source.path(), source.inner()), source: Some(source) }
	}

	/// Reports a required field that is absent.
	pub fn missing_field(stage: Stage, field: &str) -> Self {
		Self { stage, reason: format!("field `{field}` is missing."), source: None }
	}
}

/// Transport-level failures (network, IO), tagged with the stage that issued the request.
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred during the {stage} call.")]
	Network {
		/// Stage that issued the request.
		stage: Stage,
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// Request did not complete before the configured deadline.
	#[error("The {stage} call timed out.")]
	Timeout {
		/// Stage that issued the request.
		stage: Stage,
		/// Transport-specific timeout error.
		#[source]
		source: BoxError,
	},
	/// Underlying IO failure surfaced during transport.
	#[error("I/O error occurred during the {stage} call.")]
	Io {
		/// Stage that issued the request.
		stage: Stage,
		/// IO failure.
		#[source]
		source: std::io::Error,
	},
	/// Outbound request could not be assembled.
	#[error("The {stage} request could not be built.")]
	Request {
		/// Stage that issued the request.
		stage: Stage,
		/// Request construction failure.
		#[source]
		source: oauth2::http::Error,
	},
	/// Transport reported a failure without a structured error.
	#[error("HTTP client error occurred during the {stage} call: {message}")]
	Other {
		/// Stage that issued the request.
		stage: Stage,
		/// Transport-supplied message.
		message: String,
	},
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(stage: Stage, src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Network { stage, source: Box::new(src) }
	}

	/// Wraps a transport-specific timeout error.
	pub fn timeout(stage: Stage, src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Timeout { stage, source: Box::new(src) }
	}

	/// Stage that issued the failed request.
	pub fn stage(&self) -> Stage {
		match self {
			Self::Network { stage, .. }
			| Self::Timeout { stage, .. }
			| Self::Io { stage, .. }
			| Self::Request { stage, .. }
			| Self::Other { stage, .. } => *stage,
		}
	}
}
