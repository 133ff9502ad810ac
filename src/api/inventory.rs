//! Listing management: inventory items and offers.

// self
use crate::{
	_prelude::*,
	api::{require_body, require_id},
	client::{ApiRequest, QueryParams},
	http::ApiHttpClient,
	oauth::TransportErrorMapper,
};

facade! {
	/// Inventory items and offers.
	InventoryApi, inventory, "/sell/inventory/v1"
}

/// One page of inventory items.
///
/// Items are kept as raw JSON; only the paging envelope is typed.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InventoryItems {
	/// Link to this page.
	pub href: Option<String>,
	/// Page size the server applied.
	pub limit: Option<u32>,
	/// Link to the next page.
	pub next: Option<String>,
	/// Link to the previous page.
	pub prev: Option<String>,
	/// Number of items on this page.
	pub size: Option<u32>,
	/// Total number of items across pages.
	pub total: Option<u32>,
	/// Items on this page.
	pub inventory_items: Vec<JsonValue>,
}

impl<C, M> InventoryApi<'_, C, M>
where
	C: ?Sized + ApiHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// `GET /inventory_item`
	pub async fn get_inventory_items(
		&self,
		limit: Option<u32>,
		offset: Option<u32>,
	) -> Result<InventoryItems> {
		let query = QueryParams::new().with_opt("limit", limit).with_opt("offset", offset);

		self.client.get(&self.path("/inventory_item"), &query).await
	}

	/// `GET /inventory_item/{sku}`
	pub async fn get_inventory_item(&self, sku: &str) -> Result<JsonValue> {
		let sku = require_id("sku", sku)?;

		self.client.get(&self.path(&format!("/inventory_item/{sku}")), &QueryParams::new()).await
	}

	/// `PUT /inventory_item/{sku}`
	pub async fn create_or_replace_inventory_item<B>(
		&self,
		sku: &str,
		item: &B,
	) -> Result<JsonValue>
	where
		B: ?Sized + Serialize,
	{
		let sku = require_id("sku", sku)?;
		let body = require_body("inventoryItem", item)?;

		self.client
			.execute(ApiRequest::put(self.path(&format!("/inventory_item/{sku}"))).with_body(body))
			.await
	}

	/// `DELETE /inventory_item/{sku}`
	pub async fn delete_inventory_item(&self, sku: &str) -> Result<()> {
		let sku = require_id("sku", sku)?;

		self.client.delete(&self.path(&format!("/inventory_item/{sku}")), &QueryParams::new()).await
	}

	/// `GET /offer`, optionally filtered by SKU and marketplace.
	pub async fn get_offers(
		&self,
		sku: Option<&str>,
		marketplace_id: Option<&str>,
		limit: Option<u32>,
	) -> Result<JsonValue> {
		let query = QueryParams::new()
			.with_opt("sku", sku)
			.with_opt("marketplace_id", marketplace_id)
			.with_opt("limit", limit);

		self.client.get(&self.path("/offer"), &query).await
	}

	/// `POST /offer`
	pub async fn create_offer<B>(&self, offer: &B) -> Result<JsonValue>
	where
		B: ?Sized + Serialize,
	{
		let body = require_body("offer", offer)?;

		self.client.execute(ApiRequest::post(self.path("/offer")).with_body(body)).await
	}

	/// `POST /offer/{offerId}/publish`, sent without a body.
	pub async fn publish_offer(&self, offer_id: &str) -> Result<JsonValue> {
		let offer_id = require_id("offerId", offer_id)?;

		self.client
			.execute(ApiRequest::post(self.path(&format!("/offer/{offer_id}/publish"))))
			.await
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn inventory_page_tolerates_missing_fields() {
		let page: InventoryItems =
			serde_json::from_str(r#"{"inventoryItems":[{"sku":"A"}],"total":1}"#)
				.expect("Partial page should decode.");

		assert_eq!(page.total, Some(1));
		assert_eq!(page.inventory_items.len(), 1);
		assert!(page.next.is_none());

		let empty: InventoryItems = serde_json::from_str("{}").expect("Empty page should decode.");

		assert!(empty.inventory_items.is_empty());
	}
}
