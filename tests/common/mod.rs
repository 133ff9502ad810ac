//! Shared fixtures: mock-server configs and an in-process recording transport.

#![allow(dead_code, unused_imports)]

// std
use std::{collections::VecDeque, future::Future, pin::Pin, sync::Arc};
// crates.io
use httpmock::prelude::*;
use parking_lot::Mutex;
// self
pub use ebay_sell_client::{
	ApiClient, Error, Result,
	config::ClientConfig,
	error::{AuthenticationError, ValidationError},
	http::{ApiHttpClient, ResponseMetadata, ResponseMetadataSlot},
	oauth::{
		TransportErrorMapper, map_generic_transport_error,
		oauth2::{
			AsyncHttpClient, HttpClientError, HttpRequest, HttpResponse,
			http::{HeaderValue, StatusCode, header::CONTENT_TYPE},
		},
	},
	obs::CallKind,
};

pub const CLIENT_ID: &str = "client-id";
pub const CLIENT_SECRET: &str = "client-secret";
/// `base64("client-id:client-secret")`
pub const BASIC_AUTH: &str = "Basic Y2xpZW50LWlkOmNsaWVudC1zZWNyZXQ=";
pub const TOKEN_PATH: &str = "/identity/v1/oauth2/token";

/// Config whose API base and token endpoint both point at `server`.
pub fn mock_config(server: &MockServer) -> ClientConfig {
	ClientConfig::builder(CLIENT_ID, CLIENT_SECRET)
		.api_base_url(server.base_url())
		.token_url(server.url(TOKEN_PATH))
		.timeout(std::time::Duration::from_secs(5))
		.build()
		.expect("Mock server config should build.")
}

/// Registers a successful client-credentials response.
pub async fn mock_token<'a>(
	server: &'a MockServer,
	access_token: &str,
	expires_in: u64,
) -> httpmock::Mock<'a> {
	let body = format!(
		"{{\"access_token\":\"{access_token}\",\"token_type\":\"Application Access Token\",\"expires_in\":{expires_in}}}"
	);

	server
		.mock_async(|when, then| {
			when.method(POST)
				.path(TOKEN_PATH)
				.header("authorization", BASIC_AUTH)
				.header("content-type", "application/x-www-form-urlencoded");
			then.status(200).header("content-type", "application/json").body(body);
		})
		.await
}

#[derive(Debug)]
pub struct FakeTransportError(pub String);
impl std::fmt::Display for FakeTransportError {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		f.write_str(&self.0)
	}
}
impl std::error::Error for FakeTransportError {}

/// One request observed by [`RecordingHttpClient`].
#[derive(Clone, Debug)]
pub struct RecordedRequest {
	pub method: String,
	pub uri: String,
	pub headers: Vec<(String, String)>,
	pub body: Vec<u8>,
}
impl RecordedRequest {
	pub fn header(&self, name: &str) -> Option<&str> {
		self.headers
			.iter()
			.find(|(key, _)| key.eq_ignore_ascii_case(name))
			.map(|(_, value)| value.as_str())
	}

	pub fn json(&self) -> serde_json::Value {
		serde_json::from_slice(&self.body).expect("Recorded body should be JSON.")
	}

	pub fn is_token_call(&self) -> bool {
		self.uri.contains(TOKEN_PATH)
	}
}

#[derive(Default)]
struct RecordingState {
	requests: Vec<RecordedRequest>,
	responses: VecDeque<(u16, String)>,
	failure: Option<String>,
	api_failure: Option<String>,
}

/// Transport that answers token calls with a fixed token and API calls from a queue.
///
/// API calls answer `200 {}` once the queue is empty.
#[derive(Clone, Default)]
pub struct RecordingHttpClient(Arc<Mutex<RecordingState>>);
impl RecordingHttpClient {
	/// Every call fails without a response.
	pub fn failing(message: &str) -> Self {
		let client = Self::default();

		client.0.lock().failure = Some(message.to_owned());

		client
	}

	/// Token calls succeed, resource calls fail without a response.
	pub fn fail_api_calls(&self, message: &str) {
		self.0.lock().api_failure = Some(message.to_owned());
	}

	pub fn respond_with(&self, status: u16, body: &str) {
		self.0.lock().responses.push_back((status, body.to_owned()));
	}

	pub fn requests(&self) -> Vec<RecordedRequest> {
		self.0.lock().requests.clone()
	}

	pub fn api_calls(&self) -> Vec<RecordedRequest> {
		self.requests().into_iter().filter(|request| !request.is_token_call()).collect()
	}

	pub fn token_calls(&self) -> usize {
		self.requests().iter().filter(|request| request.is_token_call()).count()
	}

	fn answer(&self, request: &HttpRequest) -> Result<(u16, String), String> {
		let recorded = RecordedRequest {
			method: request.method().to_string(),
			uri: request.uri().to_string(),
			headers: request
				.headers()
				.iter()
				.map(|(key, value)| {
					(key.to_string(), value.to_str().unwrap_or_default().to_owned())
				})
				.collect(),
			body: request.body().clone(),
		};
		let is_token_call = recorded.is_token_call();
		let mut state = self.0.lock();

		state.requests.push(recorded);

		if let Some(message) = state.failure.clone() {
			return Err(message);
		}
		if !is_token_call && let Some(message) = state.api_failure.clone() {
			return Err(message);
		}
		if is_token_call {
			return Ok((
				200,
				"{\"access_token\":\"fake-token\",\"token_type\":\"Application Access Token\",\"expires_in\":7200}"
					.to_owned(),
			));
		}

		Ok(state.responses.pop_front().unwrap_or_else(|| (200, "{}".to_owned())))
	}
}
impl ApiHttpClient for RecordingHttpClient {
	type Handle = RecordingHandle;
	type TransportError = FakeTransportError;

	fn with_metadata(&self, slot: ResponseMetadataSlot) -> Self::Handle {
		RecordingHandle { client: self.clone(), slot }
	}
}

pub struct RecordingHandle {
	client: RecordingHttpClient,
	slot: ResponseMetadataSlot,
}
impl<'c> AsyncHttpClient<'c> for RecordingHandle {
	type Error = HttpClientError<FakeTransportError>;
	type Future =
		Pin<Box<dyn Future<Output = Result<HttpResponse, Self::Error>> + 'c + Send + Sync>>;

	fn call(&'c self, request: HttpRequest) -> Self::Future {
		let client = self.client.clone();
		let slot = self.slot.clone();

		Box::pin(async move {
			slot.take();

			let (status, body) = client.answer(&request).map_err(|message| {
				HttpClientError::Reqwest(Box::new(FakeTransportError(message)))
			})?;

			let mut response = HttpResponse::new(body.into_bytes());

			*response.status_mut() =
				StatusCode::from_u16(status).expect("Fixture status should be valid.");
			response
				.headers_mut()
				.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
			slot.store(ResponseMetadata::from_parts(status, response.headers()));

			Ok(response)
		})
	}
}

/// Mapper that defers to the crate's generic classification.
#[derive(Clone, Copy, Debug, Default)]
pub struct FakeErrorMapper;
impl TransportErrorMapper<FakeTransportError> for FakeErrorMapper {
	fn map_transport_error(
		&self,
		kind: CallKind,
		metadata: Option<&ResponseMetadata>,
		error: HttpClientError<FakeTransportError>,
	) -> Error {
		match error {
			HttpClientError::Reqwest(inner) => map_generic_transport_error(kind, metadata, inner),
			other => map_generic_transport_error(kind, metadata, other),
		}
	}
}

pub type FakeClient = ApiClient<RecordingHttpClient, FakeErrorMapper>;

/// Client over `transport` using the default sandbox endpoints.
pub fn fake_client(transport: &RecordingHttpClient) -> FakeClient {
	let config = ClientConfig::builder(CLIENT_ID, CLIENT_SECRET)
		.build()
		.expect("Sandbox config should build.");

	ApiClient::with_http_client(config, transport.clone(), FakeErrorMapper)
		.expect("Fake client should build.")
}
