//! Lazily issued, cached application token with coalesced refreshes.
//!
//! The provider holds at most one [`Credential`]. [`TokenProvider::access_token`] hands it out
//! while it is fresh and otherwise performs a client-credentials exchange. Every refresh runs
//! behind one async guard. A caller that had to wait re-checks the held credential once it owns
//! the guard, so a burst of concurrent callers produces a single token call and a slower refresh
//! can never replace a fresher credential.

mod metrics;

pub use metrics::*;

// self
use crate::{
	_prelude::*,
	auth::{AccessToken, Credential},
	config::ClientConfig,
	http::ApiHttpClient,
	oauth::{TokenEndpoint, TransportErrorMapper},
	obs::{self, CallKind, CallOutcome, CallSpan},
};

/// Owns the application credential for one client.
pub struct TokenProvider<C, M>
where
	C: ?Sized + ApiHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	config: Arc<ClientConfig>,
	endpoint: TokenEndpoint<C, M>,
	credential: RwLock<Option<Credential>>,
	refresh_guard: AsyncMutex<()>,
	metrics: TokenMetrics,
}
impl<C, M> TokenProvider<C, M>
where
	C: ?Sized + ApiHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// Creates a provider that issues tokens through `http_client`.
	pub fn new(
		config: Arc<ClientConfig>,
		http_client: Arc<C>,
		error_mapper: Arc<M>,
	) -> Result<Self> {
		let endpoint = TokenEndpoint::from_config(&config, http_client, error_mapper)?;

		Ok(Self {
			config,
			endpoint,
			credential: RwLock::new(None),
			refresh_guard: AsyncMutex::new(()),
			metrics: TokenMetrics::default(),
		})
	}

	/// Returns a usable access token, issuing a new one when none is held or the held one is
	/// inside the refresh margin.
	///
	/// Failures surface as [`AuthenticationError`](crate::error::AuthenticationError) and are
	/// never retried.
	pub async fn access_token(&self) -> Result<AccessToken> {
		if let Some(token) = self.fresh_token(OffsetDateTime::now_utc()) {
			self.metrics.record_reuse();

			return Ok(token);
		}

		let _singleflight = self.refresh_guard.lock().await;

		// Another caller may have refreshed while this one waited.
		if let Some(token) = self.fresh_token(OffsetDateTime::now_utc()) {
			self.metrics.record_reuse();

			return Ok(token);
		}

		match self.issue().await {
			Ok(credential) => {
				let token = credential.access_token.clone();

				self.store(credential);
				self.metrics.record_issuance();

				Ok(token)
			},
			Err(err) => {
				self.metrics.record_failure();

				Err(err)
			},
		}
	}

	/// Returns `true` if a credential is held and is outside the refresh margin right now.
	pub fn is_authenticated(&self) -> bool {
		self.is_authenticated_at(OffsetDateTime::now_utc())
	}

	/// Same as [`is_authenticated`](Self::is_authenticated) evaluated at `instant`.
	pub fn is_authenticated_at(&self, instant: OffsetDateTime) -> bool {
		self.credential
			.read()
			.as_ref()
			.is_some_and(|credential| credential.is_fresh_at(instant, self.config.refresh_margin))
	}

	/// Drops the held credential so the next [`access_token`](Self::access_token) re-issues.
	pub fn invalidate(&self) {
		self.credential.write().take();
	}

	/// Counters describing issuances, reuses, and failures so far.
	pub fn metrics(&self) -> &TokenMetrics {
		&self.metrics
	}

	pub(crate) fn store(&self, credential: Credential) {
		*self.credential.write() = Some(credential);
	}

	// Only a real exchange is traced and counted under `token_issuance`.
	async fn issue(&self) -> Result<Credential> {
		const KIND: CallKind = CallKind::TokenIssuance;

		let span = CallSpan::new(KIND, "access_token");

		obs::record_call_outcome(KIND, CallOutcome::Attempt);

		let result =
			span.instrument(self.endpoint.exchange_client_credentials(&self.config.scopes)).await;

		obs::record_call_outcome(KIND, CallOutcome::of(&result));

		result
	}

	fn fresh_token(&self, now: OffsetDateTime) -> Option<AccessToken> {
		self.credential
			.read()
			.as_ref()
			.filter(|credential| credential.is_fresh_at(now, self.config.refresh_margin))
			.map(|credential| credential.access_token.clone())
	}
}
impl<C, M> Debug for TokenProvider<C, M>
where
	C: ?Sized + ApiHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("TokenProvider")
			.field("client_id", &self.config.client_id)
			.field("authenticated", &self.is_authenticated())
			.field("metrics", &self.metrics)
			.finish_non_exhaustive()
	}
}
