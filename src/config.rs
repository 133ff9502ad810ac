//! Immutable client configuration: credentials, environment, scopes, and call limits.
//!
//! A [`ClientConfig`] is assembled once, either through [`ClientConfig::builder`] or from the
//! process environment via [`ClientConfig::from_env`], and then moved into an
//! [`ApiClient`](crate::ApiClient). Switching environments means building a new client.

// self
use crate::{_prelude::*, auth::ScopeSet, error::ConfigError};

/// Default deadline applied to every outbound request.
pub const DEFAULT_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(30);
/// Default safety margin subtracted from a credential's expiry before it is reused.
pub const DEFAULT_REFRESH_MARGIN: Duration = Duration::seconds(60);

/// Upstream deployment targeted by a client.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Environment {
	/// Developer sandbox.
	#[default]
	Sandbox,
	/// Live marketplace.
	Production,
}
impl Environment {
	/// Returns a stable lowercase label.
	pub const fn as_str(self) -> &'static str {
		match self {
			Environment::Sandbox => "sandbox",
			Environment::Production => "production",
		}
	}

	/// Base URL every resource path is appended to.
	pub const fn api_base_url(self) -> &'static str {
		match self {
			Environment::Sandbox => "https://api.sandbox.ebay.com",
			Environment::Production => "https://api.ebay.com",
		}
	}

	/// Client-credentials token endpoint.
	pub const fn token_url(self) -> &'static str {
		match self {
			Environment::Sandbox => "https://api.sandbox.ebay.com/identity/v1/oauth2/token",
			Environment::Production => "https://api.ebay.com/identity/v1/oauth2/token",
		}
	}
}
impl Display for Environment {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
impl FromStr for Environment {
	type Err = ConfigError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.trim().to_ascii_lowercase().as_str() {
			"sandbox" => Ok(Environment::Sandbox),
			"production" | "prod" => Ok(Environment::Production),
			_ => Err(ConfigError::UnknownEnvironment { value: s.to_owned() }),
		}
	}
}

/// Endpoints resolved for a client.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiEndpoints {
	/// Base URL of the REST resources.
	pub api_base: Url,
	/// Token endpoint.
	pub token: Url,
}
impl ApiEndpoints {
	/// Resolves the well-known endpoints of `environment`.
	pub fn for_environment(environment: Environment) -> Result<Self, ConfigError> {
		Ok(Self {
			api_base: parse_endpoint("api", environment.api_base_url())?,
			token: parse_endpoint("token", environment.token_url())?,
		})
	}
}

/// Read-only settings shared by the token provider and the request pipeline.
#[derive(Clone)]
pub struct ClientConfig {
	/// Application (client) identifier.
	pub client_id: String,
	client_secret: String,
	/// Environment the endpoints were resolved from.
	pub environment: Environment,
	/// Scopes requested with every token.
	pub scopes: ScopeSet,
	/// Resolved endpoints.
	pub endpoints: ApiEndpoints,
	/// Deadline applied to each outbound request by the default transport.
	pub timeout: std::time::Duration,
	/// A credential is renewed once it is this close to expiring.
	pub refresh_margin: Duration,
	/// Sent as `X-EBAY-C-MARKETPLACE-ID` on resource calls when present.
	pub marketplace_id: Option<String>,
}
impl ClientConfig {
	/// Starts a builder for the provided application credentials.
	pub fn builder(
		client_id: impl Into<String>,
		client_secret: impl Into<String>,
	) -> ClientConfigBuilder {
		ClientConfigBuilder::new(client_id.into(), client_secret.into())
	}

	/// Loads configuration from the process environment.
	///
	/// Reads `EBAY_CLIENT_ID`, `EBAY_CLIENT_SECRET`, and optionally `EBAY_ENVIRONMENT`
	/// (`sandbox` by default), `EBAY_SCOPES` (space separated), `EBAY_MARKETPLACE_ID`, and
	/// `EBAY_TIMEOUT_SECS`.
	pub fn from_env() -> Result<Self, ConfigError> {
		Self::from_env_with(|key| std::env::var(key).ok())
	}

	/// Same as [`from_env`](Self::from_env) but resolves variables through `lookup`.
	pub fn from_env_with<F>(lookup: F) -> Result<Self, ConfigError>
	where
		F: Fn(&str) -> Option<String>,
	{
		let read = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
		let client_id =
			read("EBAY_CLIENT_ID").ok_or(ConfigError::MissingSetting { field: "EBAY_CLIENT_ID" })?;
		let client_secret = read("EBAY_CLIENT_SECRET")
			.ok_or(ConfigError::MissingSetting { field: "EBAY_CLIENT_SECRET" })?;
		let mut builder = Self::builder(client_id, client_secret);

		if let Some(environment) = read("EBAY_ENVIRONMENT") {
			builder = builder.environment(environment.parse()?);
		}
		if let Some(scopes) = read("EBAY_SCOPES") {
			builder = builder.scopes(ScopeSet::from_str(&scopes)?);
		}
		if let Some(marketplace) = read("EBAY_MARKETPLACE_ID") {
			builder = builder.marketplace_id(marketplace.trim());
		}
		if let Some(raw) = read("EBAY_TIMEOUT_SECS") {
			let secs = raw.trim().parse::<u64>().ok().filter(|secs| *secs > 0).ok_or(
				ConfigError::InvalidSetting { field: "EBAY_TIMEOUT_SECS", value: raw.clone() },
			)?;

			builder = builder.timeout(std::time::Duration::from_secs(secs));
		}

		builder.build()
	}

	/// Application secret. Callers must avoid logging it.
	pub fn client_secret(&self) -> &str {
		&self.client_secret
	}
}
impl Debug for ClientConfig {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("ClientConfig")
			.field("client_id", &self.client_id)
			.field("client_secret_set", &!self.client_secret.is_empty())
			.field("environment", &self.environment)
			.field("scopes", &self.scopes)
			.field("endpoints", &self.endpoints)
			.field("timeout", &self.timeout)
			.field("refresh_margin", &self.refresh_margin)
			.field("marketplace_id", &self.marketplace_id)
			.finish()
	}
}

/// Builder for [`ClientConfig`] values.
#[derive(Clone)]
pub struct ClientConfigBuilder {
	client_id: String,
	client_secret: String,
	environment: Environment,
	scopes: Option<ScopeSet>,
	api_base: Option<String>,
	token_url: Option<String>,
	timeout: std::time::Duration,
	refresh_margin: Duration,
	marketplace_id: Option<String>,
}
impl ClientConfigBuilder {
	fn new(client_id: String, client_secret: String) -> Self {
		Self {
			client_id,
			client_secret,
			environment: Environment::default(),
			scopes: None,
			api_base: None,
			token_url: None,
			timeout: DEFAULT_TIMEOUT,
			refresh_margin: DEFAULT_REFRESH_MARGIN,
			marketplace_id: None,
		}
	}

	/// Selects the environment whose endpoints are used.
	pub fn environment(mut self, environment: Environment) -> Self {
		self.environment = environment;

		self
	}

	/// Scopes requested with each token (defaults to the public API scope).
	pub fn scopes(mut self, scopes: ScopeSet) -> Self {
		self.scopes = Some(scopes);

		self
	}

	/// Overrides the resource base URL (proxies, mock servers).
	pub fn api_base_url(mut self, url: impl Into<String>) -> Self {
		self.api_base = Some(url.into());

		self
	}

	/// Overrides the token endpoint.
	pub fn token_url(mut self, url: impl Into<String>) -> Self {
		self.token_url = Some(url.into());

		self
	}

	/// Deadline applied to each request by the default transport.
	pub fn timeout(mut self, timeout: std::time::Duration) -> Self {
		self.timeout = timeout;

		self
	}

	/// Margin before expiry at which a credential is renewed; negative values clamp to zero.
	pub fn refresh_margin(mut self, margin: Duration) -> Self {
		self.refresh_margin = if margin.is_negative() { Duration::ZERO } else { margin };

		self
	}

	/// Default marketplace sent with every resource call.
	pub fn marketplace_id(mut self, marketplace_id: impl Into<String>) -> Self {
		self.marketplace_id = Some(marketplace_id.into());

		self
	}

	/// Validates the settings and produces a [`ClientConfig`].
	pub fn build(self) -> Result<ClientConfig, ConfigError> {
		if self.client_id.trim().is_empty() {
			return Err(ConfigError::MissingSetting { field: "client_id" });
		}
		if self.client_secret.trim().is_empty() {
			return Err(ConfigError::MissingSetting { field: "client_secret" });
		}
		if self.timeout.is_zero() {
			return Err(ConfigError::InvalidSetting { field: "timeout", value: "0s".into() });
		}

		let mut endpoints = ApiEndpoints::for_environment(self.environment)?;

		if let Some(api_base) = self.api_base.as_deref() {
			endpoints.api_base = parse_endpoint("api", api_base)?;
		}
		if let Some(token_url) = self.token_url.as_deref() {
			endpoints.token = parse_endpoint("token", token_url)?;
		}

		let scopes = self
			.scopes
			.filter(|scopes| !scopes.is_empty())
			.unwrap_or_else(ScopeSet::application_default);

		Ok(ClientConfig {
			client_id: self.client_id,
			client_secret: self.client_secret,
			environment: self.environment,
			scopes,
			endpoints,
			timeout: self.timeout,
			refresh_margin: self.refresh_margin,
			marketplace_id: self.marketplace_id.filter(|id| !id.trim().is_empty()),
		})
	}
}
impl Debug for ClientConfigBuilder {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("ClientConfigBuilder")
			.field("client_id", &self.client_id)
			.field("environment", &self.environment)
			.finish_non_exhaustive()
	}
}

fn parse_endpoint(endpoint: &'static str, raw: &str) -> Result<Url, ConfigError> {
	Url::parse(raw).map_err(|source| ConfigError::InvalidEndpoint { endpoint, source })
}
