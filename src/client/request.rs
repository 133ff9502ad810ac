//! Per-call request descriptor.

// crates.io
use oauth2::http::Method;
// self
use crate::{_prelude::*, client::QueryParams, error::ValidationError};

/// Method, path, query, and optional JSON body of one resource call.
#[derive(Clone, Debug)]
pub struct ApiRequest {
	/// HTTP method.
	pub method: Method,
	/// Absolute resource path appended to the API base URL.
	pub path: String,
	/// Query parameters; omitted from the URL when empty.
	pub query: QueryParams,
	/// JSON body sent with `Content-Type: application/json`.
	pub body: Option<JsonValue>,
}
impl ApiRequest {
	/// Creates a request without query or body.
	pub fn new(method: Method, path: impl Into<String>) -> Self {
		Self { method, path: path.into(), query: QueryParams::default(), body: None }
	}

	/// `GET path`.
	pub fn get(path: impl Into<String>) -> Self {
		Self::new(Method::GET, path)
	}

	/// `POST path`.
	pub fn post(path: impl Into<String>) -> Self {
		Self::new(Method::POST, path)
	}

	/// `PUT path`.
	pub fn put(path: impl Into<String>) -> Self {
		Self::new(Method::PUT, path)
	}

	/// `DELETE path`.
	pub fn delete(path: impl Into<String>) -> Self {
		Self::new(Method::DELETE, path)
	}

	/// Replaces the query parameters.
	pub fn with_query(mut self, query: QueryParams) -> Self {
		self.query = query;

		self
	}

	/// Serializes `body` as the JSON payload.
	pub fn with_json<B>(mut self, body: &B) -> Result<Self, ValidationError>
	where
		B: ?Sized + Serialize,
	{
		let body =
			serde_json::to_value(body).map_err(|source| ValidationError::InvalidBody { source })?;

		self.body = Some(body);

		Ok(self)
	}

	/// Attaches an already serialized JSON payload.
	pub fn with_body(mut self, body: JsonValue) -> Self {
		self.body = Some(body);

		self
	}

	/// Checks that the path is non-empty and absolute.
	pub fn validate(&self) -> Result<(), ValidationError> {
		if self.path.is_empty() || !self.path.starts_with('/') {
			return Err(ValidationError::InvalidPath { path: self.path.clone() });
		}

		Ok(())
	}
}
