//! Token endpoint facade over the `oauth2` crate and transport error mapping.

pub use oauth2;

// crates.io
use oauth2::{
	AuthType, ClientId, ClientSecret, EndpointNotSet, EndpointSet, HttpClientError,
	RequestTokenError, Scope, TokenResponse, TokenUrl,
	basic::{BasicClient, BasicErrorResponse, BasicRequestTokenError},
};
// self
use crate::{
	_prelude::*,
	auth::{Credential, ScopeSet},
	config::ClientConfig,
	error::{AuthenticationError, ConfigError, NormalizedError},
	http::{ApiHttpClient, ResponseMetadata, ResponseMetadataSlot},
	obs::CallKind,
};
#[cfg(feature = "reqwest")] use crate::error::TimeoutError;

type ConfiguredBasicClient =
	BasicClient<EndpointNotSet, EndpointNotSet, EndpointNotSet, EndpointNotSet, EndpointSet>;

/// Maps HTTP transport failures into client [`Error`] values.
///
/// `kind` tells the mapper which call failed: failures while issuing a token must become
/// [`AuthenticationError`]s, failures on resource calls become [`TimeoutError`] or
/// [`NormalizedError`].
pub trait TransportErrorMapper<E>
where
	Self: 'static + Send + Sync,
	E: 'static + Send + Sync + StdError,
{
	/// Converts an [`HttpClientError`] emitted by the transport into a client error.
	fn map_transport_error(
		&self,
		kind: CallKind,
		metadata: Option<&ResponseMetadata>,
		error: HttpClientError<E>,
	) -> Error;
}

/// Default mapper for reqwest-backed transports.
#[cfg(feature = "reqwest")]
#[derive(Clone, Debug, Default)]
pub struct ReqwestTransportErrorMapper;
#[cfg(feature = "reqwest")]
impl TransportErrorMapper<ReqwestError> for ReqwestTransportErrorMapper {
	fn map_transport_error(
		&self,
		kind: CallKind,
		meta: Option<&ResponseMetadata>,
		err: HttpClientError<ReqwestError>,
	) -> Error {
		match err {
			HttpClientError::Reqwest(inner) => map_reqwest_error(kind, *inner),
			HttpClientError::Http(inner) => ConfigError::from(inner).into(),
			HttpClientError::Io(inner) => map_generic_transport_error(kind, meta, inner),
			HttpClientError::Other(message) => map_generic_transport_error(kind, meta, message),
			other => map_generic_transport_error(kind, meta, other),
		}
	}
}

/// Shared fallback for transport failures that carry nothing but a message.
///
/// Custom [`TransportErrorMapper`]s can delegate here for errors they do not classify
/// themselves.
pub fn map_generic_transport_error(
	kind: CallKind,
	meta: Option<&ResponseMetadata>,
	message: impl Display,
) -> Error {
	match kind {
		CallKind::TokenIssuance => AuthenticationError::Rejected {
			message: format!(
				"HTTP client error occurred while calling the token endpoint: {message}"
			),
			status: meta.and_then(|meta| meta.status),
			oauth_error: None,
		}
		.into(),
		CallKind::ApiRequest => NormalizedError::from_transport(message.to_string()).into(),
	}
}

#[cfg(feature = "reqwest")]
fn map_reqwest_error(kind: CallKind, err: ReqwestError) -> Error {
	if err.is_builder() {
		return ConfigError::from(err).into();
	}

	match kind {
		CallKind::TokenIssuance => AuthenticationError::network(err).into(),
		CallKind::ApiRequest if err.is_timeout() =>
			TimeoutError { message: error_chain_message(&err) }.into(),
		CallKind::ApiRequest => NormalizedError::from_transport(error_chain_message(&err)).into(),
	}
}

#[cfg(feature = "reqwest")]
fn error_chain_message(err: &dyn StdError) -> String {
	let mut message = err.to_string();
	let mut source = err.source();

	while let Some(cause) = source {
		message.push_str(": ");
		message.push_str(&cause.to_string());

		source = cause.source();
	}

	message
}

/// Client-credentials exchange against the configured token endpoint.
pub(crate) struct TokenEndpoint<C, M>
where
	C: ?Sized + ApiHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	oauth_client: ConfiguredBasicClient,
	http_client: Arc<C>,
	error_mapper: Arc<M>,
}
impl<C, M> TokenEndpoint<C, M>
where
	C: ?Sized + ApiHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	pub(crate) fn from_config(
		config: &ClientConfig,
		http_client: Arc<C>,
		error_mapper: Arc<M>,
	) -> Result<Self> {
		let token_url = TokenUrl::new(config.endpoints.token.to_string())
			.map_err(|source| ConfigError::InvalidEndpoint { endpoint: "token", source })?;
		let oauth_client = BasicClient::new(ClientId::new(config.client_id.clone()))
			.set_client_secret(ClientSecret::new(config.client_secret().to_owned()))
			.set_auth_type(AuthType::BasicAuth)
			.set_token_uri(token_url);

		Ok(Self { oauth_client, http_client, error_mapper })
	}

	/// Requests a new application token for `scopes`.
	pub(crate) async fn exchange_client_credentials(
		&self,
		scopes: &ScopeSet,
	) -> Result<Credential> {
		let meta = ResponseMetadataSlot::default();
		let instrumented = self.http_client.with_metadata(meta.clone());
		let mut request = self.oauth_client.exchange_client_credentials();

		for scope in scopes {
			request = request.add_scope(Scope::new(scope.to_owned()));
		}

		let response = request
			.request_async(&instrumented)
			.await
			.map_err(|err| map_request_error(meta.take(), err, self.error_mapper.as_ref()))?;
		let expires_in = response
			.expires_in()
			.ok_or(AuthenticationError::InvalidResponse { reason: "expires_in is missing" })?;
		let expires_in = i64::try_from(expires_in.as_secs())
			.map_err(|_| AuthenticationError::InvalidResponse {
				reason: "expires_in is out of range",
			})?;

		Ok(Credential::issued(
			response.access_token().secret(),
			OffsetDateTime::now_utc(),
			Duration::seconds(expires_in),
		)?)
	}
}

fn map_request_error<E, M>(
	meta: Option<ResponseMetadata>,
	err: BasicRequestTokenError<HttpClientError<E>>,
	mapper: &M,
) -> Error
where
	E: 'static + Send + Sync + StdError,
	M: ?Sized + TransportErrorMapper<E>,
{
	let meta_ref = meta.as_ref();
	let status = meta_ref.and_then(|meta| meta.status);

	match err {
		RequestTokenError::ServerResponse(response) => map_server_response_error(response, status),
		RequestTokenError::Request(error) =>
			mapper.map_transport_error(CallKind::TokenIssuance, meta_ref, error),
		RequestTokenError::Parse(error, _body) =>
			AuthenticationError::ResponseParse { source: error, status }.into(),
		RequestTokenError::Other(message) =>
			AuthenticationError::Rejected { message, status, oauth_error: None }.into(),
	}
}

fn map_server_response_error(response: BasicErrorResponse, status: Option<u16>) -> Error {
	let code = response.error().as_ref().to_owned();
	let message = response.error_description().cloned().unwrap_or_else(|| code.clone());

	AuthenticationError::Rejected { message, status, oauth_error: Some(code) }.into()
}
