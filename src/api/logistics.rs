//! eBay-negotiated shipping quotes.

// self
use crate::{
	_prelude::*,
	api::{require_body, require_id},
	client::{ApiRequest, QueryParams},
	http::ApiHttpClient,
	oauth::TransportErrorMapper,
};

facade! {
	/// Shipping quotes for eDelivery labels.
	EDeliveryApi, edelivery, "/sell/logistics/v1"
}

impl<C, M> EDeliveryApi<'_, C, M>
where
	C: ?Sized + ApiHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// `POST /shipping_quote`
	pub async fn create_shipping_quote<B>(&self, quote_request: &B) -> Result<JsonValue>
	where
		B: ?Sized + Serialize,
	{
		let body = require_body("shippingQuoteRequest", quote_request)?;

		self.client.execute(ApiRequest::post(self.path("/shipping_quote")).with_body(body)).await
	}

	/// `GET /shipping_quote/{shippingQuoteId}`
	pub async fn get_shipping_quote(&self, shipping_quote_id: &str) -> Result<JsonValue> {
		let quote_id = require_id("shippingQuoteId", shipping_quote_id)?;

		self.client
			.get(&self.path(&format!("/shipping_quote/{quote_id}")), &QueryParams::new())
			.await
	}
}
