//! Per-domain facades over the request pipeline.
//!
//! Every facade is a borrowed view over an [`ApiClient`], obtained through an accessor such as
//! [`ApiClient::inventory`]. Facades validate required identifiers and bodies before any network
//! activity, forward optional parameters only when they are `Some`, and otherwise hand the call to
//! the pipeline unchanged. Responses whose schema is not modelled here come back as
//! [`serde_json::Value`].

// Defines a facade struct, its base path, and the `ApiClient` accessor that creates it.
macro_rules! facade {
	($(#[$meta:meta])* $name:ident, $accessor:ident, $base:literal) => {
		$(#[$meta])*
		pub struct $name<'a, C, M>
		where
			C: ?Sized + $crate::http::ApiHttpClient,
			M: ?Sized + $crate::oauth::TransportErrorMapper<C::TransportError>,
		{
			client: &'a $crate::client::ApiClient<C, M>,
		}
		impl<'a, C, M> $name<'a, C, M>
		where
			C: ?Sized + $crate::http::ApiHttpClient,
			M: ?Sized + $crate::oauth::TransportErrorMapper<C::TransportError>,
		{
			/// Path prefix shared by every operation of this facade.
			pub const BASE_PATH: &'static str = $base;

			fn path(&self, suffix: &str) -> String {
				format!("{}{suffix}", Self::BASE_PATH)
			}
		}
		impl<C, M> Clone for $name<'_, C, M>
		where
			C: ?Sized + $crate::http::ApiHttpClient,
			M: ?Sized + $crate::oauth::TransportErrorMapper<C::TransportError>,
		{
			fn clone(&self) -> Self {
				*self
			}
		}
		impl<C, M> Copy for $name<'_, C, M>
		where
			C: ?Sized + $crate::http::ApiHttpClient,
			M: ?Sized + $crate::oauth::TransportErrorMapper<C::TransportError>,
		{
		}
		impl<C, M> std::fmt::Debug for $name<'_, C, M>
		where
			C: ?Sized + $crate::http::ApiHttpClient,
			M: ?Sized + $crate::oauth::TransportErrorMapper<C::TransportError>,
		{
			fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
				f.debug_struct(stringify!($name)).field("base_path", &$base).finish()
			}
		}
		impl<C, M> $crate::client::ApiClient<C, M>
		where
			C: ?Sized + $crate::http::ApiHttpClient,
			M: ?Sized + $crate::oauth::TransportErrorMapper<C::TransportError>,
		{
			#[doc = concat!("Operations under `", $base, "`.")]
			pub fn $accessor(&self) -> $name<'_, C, M> {
				$name { client: self }
			}
		}
	};
}

pub mod compliance;
pub mod fulfillment;
pub mod identity;
pub mod inventory;
pub mod logistics;
pub mod marketing;
pub mod messaging;
pub mod taxonomy;
pub mod translation;

pub use compliance::*;
pub use fulfillment::*;
pub use identity::*;
pub use inventory::*;
pub use logistics::*;
pub use marketing::*;
pub use messaging::*;
pub use taxonomy::*;
pub use translation::*;

// self
use crate::{_prelude::*, error::ValidationError};

/// Validates a path identifier: non-empty after trimming, free of `/`, `\`, `?`, and `#`
/// (escaped or not), and not a `.` or `..` segment.
///
/// Returns the trimmed value.
pub fn require_id<'v>(field: &'static str, value: &'v str) -> Result<&'v str, ValidationError> {
	let value = value.trim();

	if value.is_empty() {
		return Err(ValidationError::Required { field });
	}
	if alters_path(value) {
		return Err(ValidationError::InvalidIdentifier { field });
	}

	Ok(value)
}

// URL parsing resolves dot segments and treats `\` as `/` for https, so both escape the base path.
fn alters_path(value: &str) -> bool {
	let unescaped = value
		.to_ascii_lowercase()
		.replace("%2e", ".")
		.replace("%2f", "/")
		.replace("%5c", "\\")
		.replace("%3f", "?")
		.replace("%23", "#");

	unescaped.contains(['/', '\\', '?', '#']) || unescaped == "." || unescaped == ".."
}

/// Validates a required argument that is not part of the path (query text, message text).
pub fn require_text<'v>(field: &'static str, value: &'v str) -> Result<&'v str, ValidationError> {
	if value.trim().is_empty() {
		return Err(ValidationError::Required { field });
	}

	Ok(value)
}

/// Serializes a required body, rejecting values that serialize to JSON `null`.
pub fn require_body<B>(field: &'static str, body: &B) -> Result<JsonValue, ValidationError>
where
	B: ?Sized + Serialize,
{
	let value =
		serde_json::to_value(body).map_err(|source| ValidationError::InvalidBody { source })?;

	if value.is_null() {
		return Err(ValidationError::Required { field });
	}

	Ok(value)
}
