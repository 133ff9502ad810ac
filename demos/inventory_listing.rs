//! Lists inventory items through the default reqwest transport against a local mock of the
//! token endpoint and the Inventory API.

// crates.io
use color_eyre::Result;
use httpmock::prelude::*;
// self
use ebay_sell_client::{ApiClient, config::ClientConfig};

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let server = MockServer::start_async().await;
	let token_mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/identity/v1/oauth2/token");
			then.status(200).header("content-type", "application/json").body(
				"{\"access_token\":\"demo-access\",\"token_type\":\"Application Access Token\",\"expires_in\":7200}",
			);
		})
		.await;
	let listing_mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/sell/inventory/v1/inventory_item").query_param("limit", "10");
			then.status(200).header("content-type", "application/json").body(
				"{\"total\":1,\"size\":1,\"limit\":10,\"inventoryItems\":[{\"sku\":\"DEMO-SKU\"}]}",
			);
		})
		.await;
	let config = ClientConfig::builder("demo-client", "demo-secret")
		.api_base_url(server.base_url())
		.token_url(server.url("/identity/v1/oauth2/token"))
		.build()?;
	let client = ApiClient::new(config)?;
	let page = client.inventory().get_inventory_items(Some(10), None).await?;

	println!("Listed {} of {:?} inventory items.", page.inventory_items.len(), page.total);

	for item in &page.inventory_items {
		println!("- {}", item["sku"]);
	}

	// Served from the held credential.
	client.inventory().get_inventory_items(Some(10), None).await?;

	token_mock.assert_async().await;
	listing_mock.assert_calls_async(2).await;

	Ok(())
}
