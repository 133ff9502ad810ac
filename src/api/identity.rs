//! Account owner identity.

// self
use crate::{_prelude::*, client::QueryParams, http::ApiHttpClient, oauth::TransportErrorMapper};

facade! {
	/// Seller account identity.
	IdentityApi, identity, "/commerce/identity/v1"
}

impl<C, M> IdentityApi<'_, C, M>
where
	C: ?Sized + ApiHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// `GET /user`
	pub async fn get_user(&self) -> Result<JsonValue> {
		self.client.get(&self.path("/user"), &QueryParams::new()).await
	}
}
