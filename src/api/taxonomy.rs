//! Category trees, suggestions, and item aspects.

// self
use crate::{
	_prelude::*,
	api::{require_id, require_text},
	client::QueryParams,
	http::ApiHttpClient,
	oauth::TransportErrorMapper,
};

facade! {
	/// Category taxonomy lookups.
	TaxonomyApi, taxonomy, "/commerce/taxonomy/v1"
}

impl<C, M> TaxonomyApi<'_, C, M>
where
	C: ?Sized + ApiHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// `GET /get_default_category_tree_id?marketplace_id=`
	pub async fn get_default_category_tree_id(&self, marketplace_id: &str) -> Result<JsonValue> {
		let marketplace_id = require_text("marketplaceId", marketplace_id)?;
		let query = QueryParams::new().with("marketplace_id", marketplace_id.trim());

		self.client.get(&self.path("/get_default_category_tree_id"), &query).await
	}

	/// `GET /category_tree/{categoryTreeId}`
	pub async fn get_category_tree(&self, category_tree_id: &str) -> Result<JsonValue> {
		let tree_id = require_id("categoryTreeId", category_tree_id)?;

		self.client.get(&self.path(&format!("/category_tree/{tree_id}")), &QueryParams::new()).await
	}

	/// `GET /category_tree/{categoryTreeId}/get_category_suggestions?q=`
	pub async fn get_category_suggestions(
		&self,
		category_tree_id: &str,
		q: &str,
	) -> Result<JsonValue> {
		let tree_id = require_id("categoryTreeId", category_tree_id)?;
		let q = require_text("q", q)?;
		let path = self.path(&format!("/category_tree/{tree_id}/get_category_suggestions"));

		self.client.get(&path, &QueryParams::new().with("q", q)).await
	}

	/// `GET /category_tree/{categoryTreeId}/get_item_aspects_for_category/{categoryId}`
	pub async fn get_item_aspects_for_category(
		&self,
		category_tree_id: &str,
		category_id: &str,
	) -> Result<JsonValue> {
		let tree_id = require_id("categoryTreeId", category_tree_id)?;
		let category_id = require_id("categoryId", category_id)?;
		let path = self
			.path(&format!("/category_tree/{tree_id}/get_item_aspects_for_category/{category_id}"));

		self.client.get(&path, &QueryParams::new()).await
	}
}
