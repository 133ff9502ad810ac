//! Authenticated request pipeline.
//!
//! [`ApiClient`] resolves a bearer token from its [`TokenProvider`] before every call, builds the
//! HTTP request from an [`ApiRequest`], dispatches it through the configured [`ApiHttpClient`],
//! and folds the outcome into either the decoded body or one [`Error`] variant.

pub mod query;
pub mod request;

pub use query::*;
pub use request::*;

// crates.io
use oauth2::{
	AsyncHttpClient, HttpRequest, HttpResponse,
	http::{
		HeaderValue, Method,
		header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE},
	},
};
// self
use crate::{
	_prelude::*,
	auth::{AccessToken, TokenProvider},
	config::ClientConfig,
	error::{ConfigError, NormalizedError, ValidationError},
	http::{ApiHttpClient, ResponseMetadataSlot},
	oauth::TransportErrorMapper,
	obs::{self, CallKind, CallOutcome, CallSpan},
};
#[cfg(feature = "reqwest")]
use crate::{http::ReqwestHttpClient, oauth::ReqwestTransportErrorMapper};

/// Header carrying the default marketplace.
pub const MARKETPLACE_ID_HEADER: &str = "X-EBAY-C-MARKETPLACE-ID";

const JSON_MEDIA_TYPE: &str = "application/json";

#[cfg(feature = "reqwest")]
/// Client specialized for the crate's default reqwest transport stack.
pub type ReqwestApiClient = ApiClient<ReqwestHttpClient, ReqwestTransportErrorMapper>;

/// Authenticated entry point to every REST resource.
///
/// Cloning is cheap and clones share one [`TokenProvider`]. Separately constructed clients share
/// nothing.
pub struct ApiClient<C, M>
where
	C: ?Sized + ApiHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	http_client: Arc<C>,
	error_mapper: Arc<M>,
	tokens: Arc<TokenProvider<C, M>>,
	config: Arc<ClientConfig>,
}
#[cfg(feature = "reqwest")]
impl ApiClient<ReqwestHttpClient, ReqwestTransportErrorMapper> {
	/// Creates a client backed by reqwest, applying the configured timeout to every request.
	pub fn new(config: ClientConfig) -> Result<Self> {
		let http_client = ReqwestHttpClient::with_timeout(config.timeout)?;

		Self::with_http_client(config, http_client, ReqwestTransportErrorMapper)
	}
}
impl<C, M> ApiClient<C, M>
where
	C: ?Sized + ApiHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// Creates a client that reuses the caller-provided transport + mapper pair.
	///
	/// The transport is responsible for enforcing [`ClientConfig::timeout`].
	pub fn with_http_client(
		config: ClientConfig,
		http_client: impl Into<Arc<C>>,
		error_mapper: impl Into<Arc<M>>,
	) -> Result<Self> {
		let config = Arc::new(config);
		let http_client = http_client.into();
		let error_mapper = error_mapper.into();
		let tokens = Arc::new(TokenProvider::new(
			config.clone(),
			http_client.clone(),
			error_mapper.clone(),
		)?);

		Ok(Self { http_client, error_mapper, tokens, config })
	}

	/// Returns `true` if a token is held and usable right now.
	pub fn is_authenticated(&self) -> bool {
		self.tokens.is_authenticated()
	}

	/// Configuration the client was built with.
	pub fn config(&self) -> &ClientConfig {
		&self.config
	}

	/// Token provider shared by this client and its clones.
	pub fn tokens(&self) -> &TokenProvider<C, M> {
		&self.tokens
	}

	/// `GET path?query`.
	pub async fn get<T>(&self, path: &str, query: &QueryParams) -> Result<T>
	where
		T: DeserializeOwned,
	{
		self.execute(ApiRequest::get(path).with_query(query.clone())).await
	}

	/// `DELETE path?query`.
	pub async fn delete<T>(&self, path: &str, query: &QueryParams) -> Result<T>
	where
		T: DeserializeOwned,
	{
		self.execute(ApiRequest::delete(path).with_query(query.clone())).await
	}

	/// `POST path` with a JSON body.
	pub async fn post<T, B>(&self, path: &str, body: &B) -> Result<T>
	where
		T: DeserializeOwned,
		B: ?Sized + Serialize,
	{
		self.execute(ApiRequest::post(path).with_json(body)?).await
	}

	/// `PUT path` with a JSON body.
	pub async fn put<T, B>(&self, path: &str, body: &B) -> Result<T>
	where
		T: DeserializeOwned,
		B: ?Sized + Serialize,
	{
		self.execute(ApiRequest::put(path).with_json(body)?).await
	}

	/// Sends `request` and decodes a 2xx body as `T`.
	///
	/// An empty 2xx body decodes as JSON `null`, so `()` and `Option<_>` fit `204` responses.
	pub async fn execute<T>(&self, request: ApiRequest) -> Result<T>
	where
		T: DeserializeOwned,
	{
		const KIND: CallKind = CallKind::ApiRequest;

		request.validate()?;

		let span = CallSpan::new(KIND, method_stage(&request.method));

		obs::record_call_outcome(KIND, CallOutcome::Attempt);

		let result = span.instrument(self.dispatch(request)).await;

		obs::record_call_outcome(KIND, CallOutcome::of(&result));

		result
	}

	async fn dispatch<T>(&self, request: ApiRequest) -> Result<T>
	where
		T: DeserializeOwned,
	{
		let token = self.tokens.access_token().await?;
		let http_request = self.build_request(&request, &token)?;
		let meta = ResponseMetadataSlot::default();
		let handle = self.http_client.with_metadata(meta.clone());
		let response = handle.call(http_request).await.map_err(|err| {
			self.error_mapper.map_transport_error(CallKind::ApiRequest, meta.take().as_ref(), err)
		})?;
		let retry_after = meta.take().and_then(|metadata| metadata.retry_after);

		decode_response(response, retry_after)
	}

	fn build_request(&self, request: &ApiRequest, token: &AccessToken) -> Result<HttpRequest> {
		let mut url = self.resource_url(&request.path)?;

		request.query.append_to(&mut url);

		let authorization = token
			.bearer_header()
			.map_err(|_| ConfigError::InvalidHeader { header: "Authorization" })?;
		let mut builder = oauth2::http::Request::builder()
			.method(request.method.clone())
			.uri(url.as_str())
			.header(AUTHORIZATION, authorization)
			.header(ACCEPT, JSON_MEDIA_TYPE);

		if let Some(marketplace_id) = self.config.marketplace_id.as_deref() {
			let value = HeaderValue::from_str(marketplace_id)
				.map_err(|_| ConfigError::InvalidHeader { header: MARKETPLACE_ID_HEADER })?;

			builder = builder.header(MARKETPLACE_ID_HEADER, value);
		}

		let body = match request.body.as_ref() {
			Some(body) => {
				builder = builder.header(CONTENT_TYPE, JSON_MEDIA_TYPE);

				serde_json::to_vec(body).map_err(|source| ValidationError::InvalidBody { source })?
			},
			None => Vec::new(),
		};

		Ok(builder.body(body).map_err(ConfigError::from)?)
	}

	fn resource_url(&self, path: &str) -> Result<Url> {
		let base = self.config.endpoints.api_base.as_str().trim_end_matches('/');

		Url::parse(&format!("{base}{path}"))
			.map_err(|source| ConfigError::InvalidEndpoint { endpoint: "api", source }.into())
	}
}
impl<C, M> Clone for ApiClient<C, M>
where
	C: ?Sized + ApiHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	fn clone(&self) -> Self {
		Self {
			http_client: self.http_client.clone(),
			error_mapper: self.error_mapper.clone(),
			tokens: self.tokens.clone(),
			config: self.config.clone(),
		}
	}
}
impl<C, M> Debug for ApiClient<C, M>
where
	C: ?Sized + ApiHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("ApiClient")
			.field("config", &self.config)
			.field("tokens", &self.tokens)
			.finish_non_exhaustive()
	}
}

// `retry_after` comes from the metadata slot the transport filled for this response.
fn decode_response<T>(response: HttpResponse, retry_after: Option<Duration>) -> Result<T>
where
	T: DeserializeOwned,
{
	let status = response.status();
	let body = response.body().as_slice();

	if !status.is_success() {
		return Err(NormalizedError::from_response(status.as_u16(), body, retry_after).into());
	}

	let body: &[u8] = if body.iter().all(u8::is_ascii_whitespace) { b"null" } else { body };
	let mut deserializer = serde_json::Deserializer::from_slice(body);

	serde_path_to_error::deserialize(&mut deserializer)
		.map_err(|source| Error::Decode { source, status: status.as_u16() })
}

fn method_stage(method: &Method) -> &'static str {
	if *method == Method::GET {
		"get"
	} else if *method == Method::POST {
		"post"
	} else if *method == Method::PUT {
		"put"
	} else if *method == Method::DELETE {
		"delete"
	} else {
		"other"
	}
}
