//! Cached application credential and its lifecycle helpers.

// self
use crate::{_prelude::*, auth::AccessToken, error::AuthenticationError};

/// Freshness of a [`Credential`] at a given instant.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CredentialStatus {
	/// Usable without refreshing.
	Fresh,
	/// Still valid, but inside the refresh safety margin.
	Expiring,
	/// At or past its expiry instant.
	Expired,
}

/// Bearer token plus the instants that bound its validity.
///
/// Credentials are immutable; a refresh replaces the whole value.
#[derive(Clone)]
pub struct Credential {
	/// Token sent as `Authorization: Bearer`.
	pub access_token: AccessToken,
	/// Instant the token endpoint answered.
	pub issued_at: OffsetDateTime,
	/// `issued_at` plus the server-reported lifetime.
	pub expires_at: OffsetDateTime,
}
impl Credential {
	/// Token type attached to every outbound request.
	pub const TOKEN_TYPE: &'static str = "Bearer";

	/// Builds a credential from a token response, rejecting non-positive lifetimes.
	pub fn issued(
		access_token: impl AsRef<str>,
		issued_at: OffsetDateTime,
		expires_in: Duration,
	) -> Result<Self, AuthenticationError> {
		if access_token.as_ref().is_empty() {
			return Err(AuthenticationError::InvalidResponse { reason: "access_token is empty" });
		}
		if !expires_in.is_positive() {
			return Err(AuthenticationError::InvalidResponse {
				reason: "expires_in must be positive",
			});
		}

		let expires_at = issued_at
			.checked_add(expires_in)
			.ok_or(AuthenticationError::InvalidResponse { reason: "expires_in is out of range" })?;

		Ok(Self { access_token: AccessToken::new(access_token), issued_at, expires_at })
	}

	/// Classifies the credential at `instant` using the provided safety margin.
	pub fn status_at(&self, instant: OffsetDateTime, margin: Duration) -> CredentialStatus {
		if instant >= self.expires_at {
			return CredentialStatus::Expired;
		}
		if self.expires_at - margin <= instant {
			return CredentialStatus::Expiring;
		}

		CredentialStatus::Fresh
	}

	/// Returns `true` if the credential may be used at `instant` without refreshing.
	pub fn is_fresh_at(&self, instant: OffsetDateTime, margin: Duration) -> bool {
		matches!(self.status_at(instant, margin), CredentialStatus::Fresh)
	}
}
impl Debug for Credential {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Credential")
			.field("access_token", &"<redacted>")
			.field("issued_at", &self.issued_at)
			.field("expires_at", &self.expires_at)
			.finish()
	}
}

#[cfg(test)]
mod tests {
	// crates.io
	use time::macros;
	// self
	use super::*;

	#[test]
	fn status_transitions_follow_margin() {
		let issued = macros::datetime!(2025-01-01 00:00 UTC);
		let credential = Credential::issued("token", issued, Duration::hours(2))
			.expect("Credential fixture should be valid.");
		let margin = Duration::seconds(60);

		assert_eq!(credential.expires_at, macros::datetime!(2025-01-01 02:00 UTC));
		assert_eq!(
			credential.status_at(macros::datetime!(2025-01-01 01:58 UTC), margin),
			CredentialStatus::Fresh
		);
		assert_eq!(
			credential.status_at(macros::datetime!(2025-01-01 01:59 UTC), margin),
			CredentialStatus::Expiring
		);
		assert_eq!(
			credential.status_at(macros::datetime!(2025-01-01 02:00 UTC), margin),
			CredentialStatus::Expired
		);
		assert!(credential.is_fresh_at(issued, Duration::ZERO));
	}

	#[test]
	fn issued_rejects_unusable_responses() {
		let now = OffsetDateTime::now_utc();

		assert!(matches!(
			Credential::issued("token", now, Duration::ZERO),
			Err(AuthenticationError::InvalidResponse { .. })
		));
		assert!(matches!(
			Credential::issued("", now, Duration::hours(1)),
			Err(AuthenticationError::InvalidResponse { .. })
		));
	}

	#[test]
	fn debug_redacts_token() {
		let credential =
			Credential::issued("visible?", OffsetDateTime::now_utc(), Duration::hours(1))
			.expect("Credential fixture should be valid.");

		assert!(!format!("{credential:?}").contains("visible?"));
	}
}
