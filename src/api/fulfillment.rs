//! Order fulfillment and payment disputes.

// self
use crate::{
	_prelude::*,
	api::{require_body, require_id},
	client::{ApiRequest, QueryParams},
	http::ApiHttpClient,
	oauth::TransportErrorMapper,
};

facade! {
	/// Orders and shipping fulfillments.
	FulfillmentApi, fulfillment, "/sell/fulfillment/v1"
}

facade! {
	/// Payment disputes raised against orders.
	DisputeApi, disputes, "/sell/fulfillment/v1"
}

impl<C, M> FulfillmentApi<'_, C, M>
where
	C: ?Sized + ApiHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// `GET /order`
	pub async fn get_orders(
		&self,
		filter: Option<&str>,
		limit: Option<u32>,
		offset: Option<u32>,
	) -> Result<JsonValue> {
		let query = QueryParams::new()
			.with_opt("filter", filter)
			.with_opt("limit", limit)
			.with_opt("offset", offset);

		self.client.get(&self.path("/order"), &query).await
	}

	/// `GET /order/{orderId}`
	pub async fn get_order(&self, order_id: &str) -> Result<JsonValue> {
		let order_id = require_id("orderId", order_id)?;

		self.client.get(&self.path(&format!("/order/{order_id}")), &QueryParams::new()).await
	}

	/// `GET /order/{orderId}/shipping_fulfillment`
	pub async fn get_shipping_fulfillments(&self, order_id: &str) -> Result<JsonValue> {
		let order_id = require_id("orderId", order_id)?;

		self.client
			.get(
				&self.path(&format!("/order/{order_id}/shipping_fulfillment")),
				&QueryParams::new(),
			)
			.await
	}

	/// `POST /order/{orderId}/shipping_fulfillment`
	pub async fn create_shipping_fulfillment<B>(
		&self,
		order_id: &str,
		fulfillment: &B,
	) -> Result<JsonValue>
	where
		B: ?Sized + Serialize,
	{
		let order_id = require_id("orderId", order_id)?;
		let body = require_body("fulfillment", fulfillment)?;
		let path = self.path(&format!("/order/{order_id}/shipping_fulfillment"));

		self.client.execute(ApiRequest::post(path).with_body(body)).await
	}
}

impl<C, M> DisputeApi<'_, C, M>
where
	C: ?Sized + ApiHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// `GET /order/dispute`
	pub async fn get_disputes(
		&self,
		filter: Option<&str>,
		limit: Option<u32>,
	) -> Result<JsonValue> {
		let query = QueryParams::new().with_opt("filter", filter).with_opt("limit", limit);

		self.client.get(&self.path("/order/dispute"), &query).await
	}

	/// `GET /order/dispute/{disputeId}`
	pub async fn get_dispute(&self, dispute_id: &str) -> Result<JsonValue> {
		let dispute_id = require_id("disputeId", dispute_id)?;

		self.client
			.get(&self.path(&format!("/order/dispute/{dispute_id}")), &QueryParams::new())
			.await
	}

	/// `PUT /order/dispute/{disputeId}`
	pub async fn update_dispute<B>(&self, dispute_id: &str, update: &B) -> Result<JsonValue>
	where
		B: ?Sized + Serialize,
	{
		let dispute_id = require_id("disputeId", dispute_id)?;
		let body = require_body("disputeData", update)?;
		let path = self.path(&format!("/order/dispute/{dispute_id}"));

		self.client.execute(ApiRequest::put(path).with_body(body)).await
	}
}
