//! Redacting wrapper for bearer tokens.

// crates.io
use oauth2::http::{HeaderValue, header::InvalidHeaderValue};
// self
use crate::_prelude::*;

/// Access token handed out by the token provider.
///
/// Formatting never reveals the value; only [`expose`](Self::expose) and
/// [`bearer_header`](Self::bearer_header) read it.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(Arc<str>);
impl AccessToken {
	/// Wraps a raw token string.
	pub fn new(value: impl AsRef<str>) -> Self {
		Self(Arc::from(value.as_ref()))
	}

	/// Returns the raw token. Callers must avoid logging it.
	pub fn expose(&self) -> &str {
		&self.0
	}

	/// Builds a sensitive `Authorization: Bearer <token>` header value.
	pub fn bearer_header(&self) -> Result<HeaderValue, InvalidHeaderValue> {
		let mut value = HeaderValue::from_str(&format!("Bearer {}", self.0))?;

		value.set_sensitive(true);

		Ok(value)
	}
}
impl Debug for AccessToken {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_tuple("AccessToken").field(&"<redacted>").finish()
	}
}
impl Display for AccessToken {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("<redacted>")
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn formatters_redact() {
		let token = AccessToken::new("v^1.1#i^1#secret");

		assert_eq!(format!("{token:?}"), "AccessToken(\"<redacted>\")");
		assert_eq!(format!("{token}"), "<redacted>");
		assert_eq!(token.expose(), "v^1.1#i^1#secret");
	}

	#[test]
	fn bearer_header_is_sensitive() {
		let header =
			AccessToken::new("abc").bearer_header().expect("Plain tokens form valid headers.");

		assert_eq!(header.to_str().expect("Header should be ASCII."), "Bearer abc");
		assert!(header.is_sensitive());
		assert!(AccessToken::new("line\nbreak").bearer_header().is_err());
	}
}
