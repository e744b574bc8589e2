//! Hosting-layer reply built from a use case result.

// crates.io
use serde_json::json;
// self
use crate::{_prelude::*, error::StatusClass};

/// Status code and body the hosting layer returns to its caller.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Reply {
	/// Transport-level status code.
	pub status: u16,
	/// Response body.
	pub body: String,
}
impl Reply {
	/// Successful reply carrying `body` verbatim.
	pub fn ok(body: impl Into<String>) -> Self {
		Self { status: 200, body: body.into() }
	}

	/// Failure reply with a JSON body naming the failing stage.
	///
	/// Provider rejections keep the provider's status and body under `upstream` so callers
	/// can diagnose them without provider-specific handling.
	pub fn from_error(error: &Error) -> Self {
		let mut body = json!({
			"error": match error.status_class() {
				StatusClass::ClientError => "client_error",
				StatusClass::ServerError => "server_error",
			},
			"stage": error.stage().as_str(),
			"message": error.to_string(),
		});

		if let Error::Api { status, body: upstream, .. } = error {
			body["upstream"] = json!({ "status": status, "body": upstream });
		}

		Self { status: error.http_status(), body: body.to_string() }
	}

	/// Converts any use case result.
	pub fn from_result(result: Result<String>) -> Self {
		match result {
			Ok(body) => Self::ok(body),
			Err(e) => Self::from_error(&e),
		}
	}

	/// Whether the reply reports success.
	pub fn is_success(&self) -> bool {
		(200..300).contains(&self.status)
	}
}
impl From<Result<String>> for Reply {
	fn from(result: Result<String>) -> Self {
		Self::from_result(result)
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::{error::ValidationError, obs::Stage, validate::Rule};

	#[test]
	fn success_passes_body_through() {
		let reply = Reply::from_result(Ok("123456".into()));

		assert_eq!(reply, Reply::ok("123456"));
		assert!(reply.is_success());
	}

	#[test]
	fn validation_failure_is_client_error() {
		let reply: Reply = Err(ValidationError::new("customer.otp", Rule::Missing).into()).into();
		let body: serde_json::Value =
			serde_json::from_str(&reply.body).expect("Reply body should be JSON.");

		assert_eq!(reply.status, 400);
		assert!(!reply.is_success());
		assert_eq!(body["error"], "client_error");
		assert_eq!(body["stage"], "validation");
		assert!(body["message"].as_str().is_some_and(|m| m.contains("customer.otp")));
	}

	#[test]
	fn provider_rejection_keeps_upstream_details() {
		let error = Error::Api { stage: Stage::ApiCall, status: 409, body: "duplicate".into() };
		let reply = Reply::from_error(&error);
		let body: serde_json::Value =
			serde_json::from_str(&reply.body).expect("Reply body should be JSON.");

		assert_eq!(reply.status, 502);
		assert_eq!(body["stage"], "api_call");
		assert_eq!(body["upstream"]["status"], 409);
		assert_eq!(body["upstream"]["body"], "duplicate");
	}
}
