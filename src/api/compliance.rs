//! Listing compliance violations and VeRO intellectual-property reports.

// self
use crate::{
	_prelude::*,
	api::{require_body, require_id, require_text},
	client::{ApiRequest, QueryParams},
	http::ApiHttpClient,
	oauth::TransportErrorMapper,
};

facade! {
	/// Listing violations and their suppression.
	ComplianceApi, compliance, "/sell/compliance/v1"
}

facade! {
	/// Verified Rights Owner infringement reports.
	VeroApi, vero, "/sell/compliance/v1"
}

#[derive(Serialize)]
struct SuppressViolation<'a> {
	listing_violation_id: &'a str,
}

impl<C, M> ComplianceApi<'_, C, M>
where
	C: ?Sized + ApiHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// `GET /listing_violation`
	pub async fn get_listing_violations(
		&self,
		compliance_type: &str,
		limit: Option<u32>,
		offset: Option<u32>,
	) -> Result<JsonValue> {
		let compliance_type = require_text("complianceType", compliance_type)?;
		let query = QueryParams::new()
			.with("compliance_type", compliance_type)
			.with_opt("limit", limit)
			.with_opt("offset", offset);

		self.client.get(&self.path("/listing_violation"), &query).await
	}

	/// `GET /listing_violation_summary`
	pub async fn get_listing_violations_summary(
		&self,
		compliance_type: Option<&str>,
	) -> Result<JsonValue> {
		let query = QueryParams::new().with_opt("compliance_type", compliance_type);

		self.client.get(&self.path("/listing_violation_summary"), &query).await
	}

	/// `POST /suppress_violation`
	pub async fn suppress_violation(&self, listing_violation_id: &str) -> Result<JsonValue> {
		let listing_violation_id = require_id("listingViolationId", listing_violation_id)?;

		self.client
			.post(&self.path("/suppress_violation"), &SuppressViolation { listing_violation_id })
			.await
	}
}

impl<C, M> VeroApi<'_, C, M>
where
	C: ?Sized + ApiHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// `POST /vero_report_items`
	pub async fn report_infringement<B>(&self, report: &B) -> Result<JsonValue>
	where
		B: ?Sized + Serialize,
	{
		let body = require_body("infringementData", report)?;

		self.client.execute(ApiRequest::post(self.path("/vero_report_items")).with_body(body)).await
	}

	/// `GET /vero_report_items`
	pub async fn get_reported_items(
		&self,
		filter: Option<&str>,
		limit: Option<u32>,
		offset: Option<u32>,
	) -> Result<JsonValue> {
		let query = QueryParams::new()
			.with_opt("filter", filter)
			.with_opt("limit", limit)
			.with_opt("offset", offset);

		self.client.get(&self.path("/vero_report_items"), &query).await
	}
}
