//! Promoted listings campaigns, item promotions, and listing recommendations.

// self
use crate::{
	_prelude::*,
	api::{require_body, require_id},
	client::{ApiRequest, QueryParams},
	http::ApiHttpClient,
	oauth::TransportErrorMapper,
};

facade! {
	/// Ad campaigns and item promotions.
	MarketingApi, marketing, "/sell/marketing/v1"
}

facade! {
	/// Listing-level improvement recommendations.
	RecommendationApi, recommendation, "/sell/recommendation/v1"
}

impl<C, M> MarketingApi<'_, C, M>
where
	C: ?Sized + ApiHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// `GET /ad_campaign`
	pub async fn get_campaigns(
		&self,
		campaign_status: Option<&str>,
		marketplace_id: Option<&str>,
		limit: Option<u32>,
	) -> Result<JsonValue> {
		let query = QueryParams::new()
			.with_opt("campaign_status", campaign_status)
			.with_opt("marketplace_id", marketplace_id)
			.with_opt("limit", limit);

		self.client.get(&self.path("/ad_campaign"), &query).await
	}

	/// `GET /ad_campaign/{campaignId}`
	pub async fn get_campaign(&self, campaign_id: &str) -> Result<JsonValue> {
		let campaign_id = require_id("campaignId", campaign_id)?;

		self.client
			.get(&self.path(&format!("/ad_campaign/{campaign_id}")), &QueryParams::new())
			.await
	}

	/// `POST /ad_campaign`
	pub async fn create_campaign<B>(&self, campaign: &B) -> Result<JsonValue>
	where
		B: ?Sized + Serialize,
	{
		let body = require_body("campaign", campaign)?;

		self.client.execute(ApiRequest::post(self.path("/ad_campaign")).with_body(body)).await
	}

	/// `GET /promotion`
	pub async fn get_promotions(
		&self,
		marketplace_id: Option<&str>,
		limit: Option<u32>,
	) -> Result<JsonValue> {
		let query =
			QueryParams::new().with_opt("marketplace_id", marketplace_id).with_opt("limit", limit);

		self.client.get(&self.path("/promotion"), &query).await
	}

	/// `POST /item_promotion`
	pub async fn create_promotion<B>(&self, promotion: &B) -> Result<JsonValue>
	where
		B: ?Sized + Serialize,
	{
		let body = require_body("promotion", promotion)?;

		self.client.execute(ApiRequest::post(self.path("/item_promotion")).with_body(body)).await
	}
}

impl<C, M> RecommendationApi<'_, C, M>
where
	C: ?Sized + ApiHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// `GET /find`
	pub async fn find_listing_recommendations(
		&self,
		filter: Option<&str>,
		limit: Option<u32>,
		offset: Option<u32>,
	) -> Result<JsonValue> {
		let query = QueryParams::new()
			.with_opt("filter", filter)
			.with_opt("limit", limit)
			.with_opt("offset", offset);

		self.client.get(&self.path("/find"), &query).await
	}
}
