//! Buyer communication: offers to interested buyers, messages, feedback, and notifications.

// self
use crate::{
	_prelude::*,
	api::{require_body, require_id, require_text},
	client::{ApiRequest, QueryParams},
	http::ApiHttpClient,
	oauth::TransportErrorMapper,
};

facade! {
	/// Seller-initiated offers to watchers.
	NegotiationApi, negotiation, "/sell/negotiation/v1"
}

facade! {
	/// Member-to-member messages.
	MessageApi, messages, "/commerce/message/v1"
}

facade! {
	/// Transaction feedback.
	FeedbackApi, feedback, "/commerce/feedback/v1_beta"
}

facade! {
	/// Notification destinations and delivery configuration.
	NotificationApi, notifications, "/commerce/notification/v1"
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct MessageReply<'a> {
	message_text: &'a str,
}

fn paging(filter: Option<&str>, limit: Option<u32>, offset: Option<u32>) -> QueryParams {
	QueryParams::new()
		.with_opt("filter", filter)
		.with_opt("limit", limit)
		.with_opt("offset", offset)
}

impl<C, M> NegotiationApi<'_, C, M>
where
	C: ?Sized + ApiHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// `GET /offer`
	pub async fn get_offers_to_buyers(
		&self,
		filter: Option<&str>,
		limit: Option<u32>,
		offset: Option<u32>,
	) -> Result<JsonValue> {
		self.client.get(&self.path("/offer"), &paging(filter, limit, offset)).await
	}

	/// `POST /offer/{offerId}/send_offer_to_interested_buyers`
	pub async fn send_offer_to_interested_buyers<B>(
		&self,
		offer_id: &str,
		offer: &B,
	) -> Result<JsonValue>
	where
		B: ?Sized + Serialize,
	{
		let offer_id = require_id("offerId", offer_id)?;
		let body = require_body("offerData", offer)?;
		let path = self.path(&format!("/offer/{offer_id}/send_offer_to_interested_buyers"));

		self.client.execute(ApiRequest::post(path).with_body(body)).await
	}
}

impl<C, M> MessageApi<'_, C, M>
where
	C: ?Sized + ApiHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// `GET /message/search`
	pub async fn search_messages(
		&self,
		filter: Option<&str>,
		limit: Option<u32>,
		offset: Option<u32>,
	) -> Result<JsonValue> {
		self.client.get(&self.path("/message/search"), &paging(filter, limit, offset)).await
	}

	/// `GET /message/{messageId}`
	pub async fn get_message(&self, message_id: &str) -> Result<JsonValue> {
		let message_id = require_id("messageId", message_id)?;

		self.client.get(&self.path(&format!("/message/{message_id}")), &QueryParams::new()).await
	}

	/// `POST /message`
	pub async fn send_message<B>(&self, message: &B) -> Result<JsonValue>
	where
		B: ?Sized + Serialize,
	{
		let body = require_body("messageData", message)?;

		self.client.execute(ApiRequest::post(self.path("/message")).with_body(body)).await
	}

	/// `POST /message/{messageId}` with `{"messageText": text}`.
	pub async fn reply_to_message(&self, message_id: &str, text: &str) -> Result<JsonValue> {
		let message_id = require_id("messageId", message_id)?;
		let message_text = require_text("messageContent", text)?;

		self.client
			.post(&self.path(&format!("/message/{message_id}")), &MessageReply { message_text })
			.await
	}
}

impl<C, M> FeedbackApi<'_, C, M>
where
	C: ?Sized + ApiHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// `GET /feedback/{transactionId}`
	pub async fn get_feedback(&self, transaction_id: &str) -> Result<JsonValue> {
		let transaction_id = require_id("transactionId", transaction_id)?;

		self.client
			.get(&self.path(&format!("/feedback/{transaction_id}")), &QueryParams::new())
			.await
	}

	/// `POST /feedback`
	pub async fn leave_feedback_for_buyer<B>(&self, feedback: &B) -> Result<JsonValue>
	where
		B: ?Sized + Serialize,
	{
		let body = require_body("feedbackData", feedback)?;

		self.client.execute(ApiRequest::post(self.path("/feedback")).with_body(body)).await
	}

	/// `GET /feedback/summary`
	pub async fn get_feedback_summary(&self) -> Result<JsonValue> {
		self.client.get(&self.path("/feedback/summary"), &QueryParams::new()).await
	}
}

impl<C, M> NotificationApi<'_, C, M>
where
	C: ?Sized + ApiHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// `GET /notification_config`
	pub async fn get_notification_config(&self) -> Result<JsonValue> {
		self.client.get(&self.path("/notification_config"), &QueryParams::new()).await
	}

	/// `PUT /notification_config`
	pub async fn update_notification_config<B>(&self, config: &B) -> Result<JsonValue>
	where
		B: ?Sized + Serialize,
	{
		let body = require_body("config", config)?;

		self.client
			.execute(ApiRequest::put(self.path("/notification_config")).with_body(body))
			.await
	}

	/// `POST /destination`
	pub async fn create_notification_destination<B>(&self, destination: &B) -> Result<JsonValue>
	where
		B: ?Sized + Serialize,
	{
		let body = require_body("destination", destination)?;

		self.client.execute(ApiRequest::post(self.path("/destination")).with_body(body)).await
	}
}
