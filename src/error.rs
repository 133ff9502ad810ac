//! Client-level error types shared by the token provider, the request pipeline, and the facades.

// self
use crate::{_prelude::*, auth::ScopeValidationError};

/// Client-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical client error exposed by public APIs.
///
/// Every call either succeeds with a decoded body or fails with exactly one of these variants;
/// nothing is retried or recovered silently.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Token issuance failed.
	#[error(transparent)]
	Authentication(#[from] AuthenticationError),
	/// Resource call exceeded the configured deadline.
	#[error(transparent)]
	Timeout(#[from] TimeoutError),
	/// Upstream returned a non-2xx response or could not be reached.
	#[error(transparent)]
	Upstream(#[from] NormalizedError),
	/// Caller-supplied input was rejected before any network activity.
	#[error(transparent)]
	Validation(#[from] ValidationError),
	/// Local configuration problem.
	#[error(transparent)]
	Config(#[from] ConfigError),

	/// A successful response body did not match the requested type.
	#[error("Response body with status {status} could not be decoded.")]
	Decode {
		/// Structured decoding failure including the offending JSON path.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
		/// HTTP status of the response.
		status: u16,
	},
}
impl Error {
	/// Returns the normalized upstream error, if this is one.
	pub fn as_upstream(&self) -> Option<&NormalizedError> {
		match self {
			Self::Upstream(e) => Some(e),
			_ => None,
		}
	}
}

/// Token issuance failures.
#[derive(Debug, ThisError)]
pub enum AuthenticationError {
	/// The authorization endpoint refused to issue a token.
	#[error("Token endpoint rejected the request: {message}.")]
	Rejected {
		/// Upstream- or client-supplied message summarizing the failure.
		message: String,
		/// HTTP status code, when available.
		status: Option<u16>,
		/// OAuth `error` code, when the endpoint returned one.
		oauth_error: Option<String>,
	},
	/// The authorization endpoint could not be reached.
	#[error("Network error occurred while calling the token endpoint.")]
	Network {
		/// Transport-specific failure.
		#[source]
		source: BoxError,
	},
	/// The authorization endpoint responded with JSON that could not be parsed.
	#[error("Token endpoint returned malformed JSON.")]
	ResponseParse {
		/// Structured parsing failure.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
		/// HTTP status code, when available.
		status: Option<u16>,
	},
	/// The token response parsed but cannot be turned into a credential.
	#[error("Token endpoint response is unusable: {reason}.")]
	InvalidResponse {
		/// Which part of the response was rejected.
		reason: &'static str,
	},
}
impl AuthenticationError {
	/// Wraps a transport failure raised while calling the token endpoint.
	pub fn network(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Network { source: Box::new(src) }
	}

	/// HTTP status reported by the authorization endpoint, if any.
	pub fn status(&self) -> Option<u16> {
		match self {
			Self::Rejected { status, .. } | Self::ResponseParse { status, .. } => *status,
			Self::Network { .. } | Self::InvalidResponse { .. } => None,
		}
	}
}

/// Raised when a resource call exceeds its deadline.
#[derive(Debug, ThisError)]
#[error("Request timed out: {message}.")]
pub struct TimeoutError {
	/// Transport-supplied description of the timeout.
	pub message: String,
}

/// Uniform shape of every upstream or transport failure on a resource call.
///
/// `message` follows a fixed precedence: the first error entry's `longMessage`, then its
/// `message`, then the raw transport text.
#[derive(Clone, Debug, ThisError)]
#[error("eBay API error: {message}")]
pub struct NormalizedError {
	/// Best available human-readable message.
	pub message: String,
	/// Upstream `errorId`, rendered as a string.
	pub upstream_code: Option<String>,
	/// First upstream error entry, verbatim.
	pub upstream_details: Option<JsonValue>,
	/// HTTP status code; `None` when no response was received.
	pub status: Option<u16>,
	/// Retry-After hint supplied with the response.
	pub retry_after: Option<Duration>,
}
impl NormalizedError {
	/// Builds an error from a transport failure that produced no response.
	pub fn from_transport(message: impl Into<String>) -> Self {
		Self {
			message: message.into(),
			upstream_code: None,
			upstream_details: None,
			status: None,
			retry_after: None,
		}
	}

	/// Builds an error from a non-2xx response body.
	///
	/// Bodies that do not match the `{"errors": [..]}` envelope fall back to the transport text
	/// `Request failed with status code <status>`.
	pub fn from_response(status: u16, body: &[u8], retry_after: Option<Duration>) -> Self {
		let first = serde_json::from_slice::<ErrorEnvelope>(body)
			.ok()
			.and_then(|envelope| envelope.errors.into_iter().next());
		let detail = first.as_ref().and_then(|raw| ErrorDetail::deserialize(raw).ok());
		let message = detail
			.as_ref()
			.and_then(|detail| {
				non_empty(detail.long_message.as_deref())
					.or_else(|| non_empty(detail.message.as_deref()))
			})
			.map(str::to_owned)
			.unwrap_or_else(|| format!("Request failed with status code {status}"));
		let upstream_code = detail.and_then(|detail| match detail.error_id {
			Some(JsonValue::String(code)) => Some(code),
			Some(JsonValue::Number(code)) => Some(code.to_string()),
			_ => None,
		});

		Self { message, upstream_code, upstream_details: first, status: Some(status), retry_after }
	}
}

#[derive(Deserialize)]
struct ErrorEnvelope {
	#[serde(default)]
	errors: Vec<JsonValue>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ErrorDetail {
	#[serde(default)]
	error_id: Option<JsonValue>,
	#[serde(default)]
	message: Option<String>,
	#[serde(default)]
	long_message: Option<String>,
}

/// Caller input rejected before any request is sent.
#[derive(Debug, ThisError)]
pub enum ValidationError {
	/// A required argument was empty or missing.
	#[error("{field} is required.")]
	Required {
		/// Argument name, as documented by the upstream API.
		field: &'static str,
	},
	/// An identifier contains characters that would alter the request path.
	#[error("{field} must be a single path segment.")]
	InvalidIdentifier {
		/// Argument name, as documented by the upstream API.
		field: &'static str,
	},
	/// Request paths must be non-empty and absolute.
	#[error("Request path `{path}` must be non-empty and start with '/'.")]
	InvalidPath {
		/// Offending path.
		path: String,
	},
	/// Request body could not be serialized as JSON.
	#[error("Request body could not be serialized as JSON.")]
	InvalidBody {
		/// Serialization failure.
		#[source]
		source: serde_json::Error,
	},
}

/// Configuration and construction failures.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
	/// HTTP request construction failed.
	#[error(transparent)]
	HttpRequest(#[from] oauth2::http::Error),
	/// An endpoint URL could not be parsed.
	#[error("The {endpoint} endpoint is not a valid URL.")]
	InvalidEndpoint {
		/// Which endpoint failed validation.
		endpoint: &'static str,
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// A mandatory setting was empty.
	#[error("The {field} setting is required.")]
	MissingSetting {
		/// Name of the missing setting.
		field: &'static str,
	},
	/// Environment name is not recognized.
	#[error("Unknown environment `{value}`; expected `sandbox` or `production`.")]
	UnknownEnvironment {
		/// Rejected value.
		value: String,
	},
	/// A setting is present but malformed.
	#[error("The {field} setting is invalid: {value}.")]
	InvalidSetting {
		/// Name of the malformed setting.
		field: &'static str,
		/// Rejected value.
		value: String,
	},
	/// Configured scopes cannot be normalized.
	#[error("Configured scopes are invalid.")]
	InvalidScope(#[from] ScopeValidationError),
	/// A header value contains characters HTTP does not allow.
	#[error("The {header} header value is invalid.")]
	InvalidHeader {
		/// Header name.
		header: &'static str,
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

fn non_empty(value: Option<&str>) -> Option<&str> {
	value.filter(|value| !value.trim().is_empty())
}
