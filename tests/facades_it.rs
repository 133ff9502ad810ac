#![cfg(feature = "reqwest")]

mod common;

// crates.io
use httpmock::prelude::*;
use serde_json::{Value, json};
// self
use common::*;

fn only_call(transport: &RecordingHttpClient) -> RecordedRequest {
	let mut calls = transport.api_calls();

	assert_eq!(calls.len(), 1, "Exactly one resource call should be sent.");

	calls.remove(0)
}

fn assert_required(err: Error, expected: &'static str) {
	match err {
		Error::Validation(ValidationError::Required { field }) => assert_eq!(field, expected),
		other => panic!("Unexpected error variant: {other:?}."),
	}
}

#[tokio::test]
async fn inventory_listing_with_limit_returns_typed_page() {
	let server = MockServer::start_async().await;
	let _token = mock_token(&server, "inventory-token", 7200).await;
	let listing = server
		.mock_async(|when, then| {
			when.method(GET)
				.path("/sell/inventory/v1/inventory_item")
				.query_param("limit", "10")
				.header("authorization", "Bearer inventory-token");
			then.status(200).json_body(json!({ "inventoryItems": [] }));
		})
		.await;
	let client = ApiClient::new(mock_config(&server)).expect("Client should build.");
	let page = client
		.inventory()
		.get_inventory_items(Some(10), None)
		.await
		.expect("Inventory listing should succeed.");

	assert!(page.inventory_items.is_empty());

	listing.assert_calls_async(1).await;
}

#[tokio::test]
async fn missing_identifiers_fail_without_any_transport_call() {
	let transport = RecordingHttpClient::default();
	let client = fake_client(&transport);

	assert_required(client.inventory().get_inventory_item("").await.unwrap_err(), "sku");
	assert_required(client.inventory().publish_offer("  ").await.unwrap_err(), "offerId");
	assert_required(client.fulfillment().get_order("").await.unwrap_err(), "orderId");
	assert_required(client.disputes().get_dispute("").await.unwrap_err(), "disputeId");
	assert_required(client.marketing().get_campaign("").await.unwrap_err(), "campaignId");
	assert_required(
		client.taxonomy().get_default_category_tree_id("").await.unwrap_err(),
		"marketplaceId",
	);
	assert_required(client.taxonomy().get_category_suggestions("0", "").await.unwrap_err(), "q");
	assert_required(
		client.compliance().get_listing_violations("", Some(10), Some(0)).await.unwrap_err(),
		"complianceType",
	);
	assert_required(
		client.compliance().suppress_violation("").await.unwrap_err(),
		"listingViolationId",
	);
	assert_required(client.messages().get_message("").await.unwrap_err(), "messageId");
	assert_required(
		client.messages().reply_to_message("msg123", "").await.unwrap_err(),
		"messageContent",
	);
	assert_required(client.feedback().get_feedback("").await.unwrap_err(), "transactionId");
	assert_required(
		client.edelivery().get_shipping_quote("").await.unwrap_err(),
		"shippingQuoteId",
	);

	assert!(transport.requests().is_empty());
}

#[tokio::test]
async fn null_bodies_and_empty_translation_inputs_are_rejected() {
	let transport = RecordingHttpClient::default();
	let client = fake_client(&transport);
	let none = Option::<Value>::None;

	assert_required(
		client.disputes().update_dispute("D-1", &none).await.unwrap_err(),
		"disputeData",
	);
	assert_required(
		client.vero().report_infringement(&none).await.unwrap_err(),
		"infringementData",
	);
	assert_required(
		client.negotiation().send_offer_to_interested_buyers("offer123", &none).await.unwrap_err(),
		"offerData",
	);
	assert_required(client.messages().send_message(&none).await.unwrap_err(), "messageData");
	assert_required(
		client.feedback().leave_feedback_for_buyer(&none).await.unwrap_err(),
		"feedbackData",
	);
	assert_required(
		client.notifications().update_notification_config(&none).await.unwrap_err(),
		"config",
	);
	assert_required(
		client.notifications().create_notification_destination(&none).await.unwrap_err(),
		"destination",
	);

	let translation = client.translation();

	assert_required(
		translation.translate("", "es", "ITEM_TITLE", &["Hello"]).await.unwrap_err(),
		"from",
	);
	assert_required(
		translation.translate("en", "", "ITEM_TITLE", &["Hello"]).await.unwrap_err(),
		"to",
	);
	assert_required(
		translation.translate("en", "es", "", &["Hello"]).await.unwrap_err(),
		"translationContext",
	);
	assert_required(
		translation.translate("en", "es", "ITEM_TITLE", &[]).await.unwrap_err(),
		"text",
	);

	assert!(transport.requests().is_empty());
}

#[tokio::test]
async fn identifiers_that_would_alter_the_path_are_rejected() {
	let transport = RecordingHttpClient::default();
	let client = fake_client(&transport);
	let invalid_sku = |err: Error| {
		matches!(err, Error::Validation(ValidationError::InvalidIdentifier { field: "sku" }))
	};

	assert!(invalid_sku(client.inventory().get_inventory_item("../offer").await.unwrap_err()));
	assert!(invalid_sku(client.inventory().delete_inventory_item("..").await.unwrap_err()));
	assert!(invalid_sku(client.inventory().get_inventory_item(".").await.unwrap_err()));
	assert!(invalid_sku(client.inventory().get_inventory_item("a\\b").await.unwrap_err()));

	let err = client.fulfillment().get_order("%2e%2e").await.unwrap_err();

	assert!(matches!(
		err,
		Error::Validation(ValidationError::InvalidIdentifier { field: "orderId" })
	));
	assert!(transport.requests().is_empty());
}

#[tokio::test]
async fn disputes_forward_filter_and_limit() {
	let transport = RecordingHttpClient::default();
	let client = fake_client(&transport);

	transport.respond_with(200, r#"{"paymentDisputeSummaries":[]}"#);
	client
		.disputes()
		.get_disputes(Some("filter:test"), Some(10))
		.await
		.expect("Call should succeed.");

	let call = only_call(&transport);

	assert_eq!(call.method, "GET");
	assert_eq!(
		call.uri,
		"https://api.sandbox.ebay.com/sell/fulfillment/v1/order/dispute?filter=filter%3Atest&limit=10"
	);
}

#[tokio::test]
async fn zero_valued_paging_parameters_are_sent() {
	let transport = RecordingHttpClient::default();
	let client = fake_client(&transport);

	client
		.recommendation()
		.find_listing_recommendations(Some("filter:test"), Some(10), Some(0))
		.await
		.expect("Call should succeed.");

	assert_eq!(
		only_call(&transport).uri,
		"https://api.sandbox.ebay.com/sell/recommendation/v1/find?filter=filter%3Atest&limit=10&offset=0"
	);
}

#[tokio::test]
async fn absent_optional_parameters_produce_no_query_string() {
	let transport = RecordingHttpClient::default();
	let client = fake_client(&transport);

	client
		.negotiation()
		.get_offers_to_buyers(None, None, None)
		.await
		.expect("Call should succeed.");

	assert_eq!(only_call(&transport).uri, "https://api.sandbox.ebay.com/sell/negotiation/v1/offer");
}

#[tokio::test]
async fn taxonomy_paths_and_queries() {
	let transport = RecordingHttpClient::default();
	let client = fake_client(&transport);
	let taxonomy = client.taxonomy();

	taxonomy.get_default_category_tree_id("EBAY_US").await.expect("Call should succeed.");
	taxonomy.get_category_suggestions("0", "iPhone").await.expect("Call should succeed.");
	taxonomy.get_item_aspects_for_category("0", "123").await.expect("Call should succeed.");

	let uris = transport.api_calls().into_iter().map(|call| call.uri).collect::<Vec<_>>();

	assert_eq!(uris, [
		"https://api.sandbox.ebay.com/commerce/taxonomy/v1/get_default_category_tree_id?marketplace_id=EBAY_US",
		"https://api.sandbox.ebay.com/commerce/taxonomy/v1/category_tree/0/get_category_suggestions?q=iPhone",
		"https://api.sandbox.ebay.com/commerce/taxonomy/v1/category_tree/0/get_item_aspects_for_category/123",
	]);
}

#[tokio::test]
async fn compliance_suppression_posts_the_violation_id() {
	let transport = RecordingHttpClient::default();
	let client = fake_client(&transport);

	transport.respond_with(204, "");
	client.compliance().suppress_violation("VIOLATION123").await.expect("Call should succeed.");

	let call = only_call(&transport);

	assert_eq!(call.method, "POST");
	assert_eq!(call.uri, "https://api.sandbox.ebay.com/sell/compliance/v1/suppress_violation");
	assert_eq!(call.header("content-type"), Some("application/json"));
	assert_eq!(call.json(), json!({ "listing_violation_id": "VIOLATION123" }));
}

#[tokio::test]
async fn translation_renames_the_context_field() {
	let transport = RecordingHttpClient::default();
	let client = fake_client(&transport);

	client
		.translation()
		.translate("en", "es", "ITEM_TITLE", &["Hello"])
		.await
		.expect("Call should succeed.");

	let call = only_call(&transport);

	assert_eq!(call.uri, "https://api.sandbox.ebay.com/commerce/translation/v1_beta/translate");
	assert_eq!(
		call.json(),
		json!({ "from": "en", "to": "es", "translationContext": "ITEM_TITLE", "text": ["Hello"] })
	);
}

#[tokio::test]
async fn message_reply_wraps_the_text() {
	let transport = RecordingHttpClient::default();
	let client = fake_client(&transport);

	client.messages().reply_to_message("msg123", "Reply text").await.expect("Call should succeed.");

	let call = only_call(&transport);

	assert_eq!(call.method, "POST");
	assert_eq!(call.uri, "https://api.sandbox.ebay.com/commerce/message/v1/message/msg123");
	assert_eq!(call.json(), json!({ "messageText": "Reply text" }));
}

#[tokio::test]
async fn bodies_are_forwarded_verbatim() {
	let transport = RecordingHttpClient::default();
	let client = fake_client(&transport);
	let update = json!({ "evidence": {}, "submit": true });
	let destination = json!({
		"name": "webhook",
		"endpoint": "https://example.com/webhook",
		"verificationToken": "token123"
	});

	client
		.disputes()
		.update_dispute("DISPUTE123", &update)
		.await
		.expect("Call should succeed.");
	client
		.notifications()
		.create_notification_destination(&destination)
		.await
		.expect("Call should succeed.");

	let calls = transport.api_calls();

	assert_eq!(calls.len(), 2);
	assert_eq!(calls[0].method, "PUT");
	assert_eq!(
		calls[0].uri,
		"https://api.sandbox.ebay.com/sell/fulfillment/v1/order/dispute/DISPUTE123"
	);
	assert_eq!(calls[0].json(), update);
	assert_eq!(calls[1].method, "POST");
	assert_eq!(calls[1].uri, "https://api.sandbox.ebay.com/commerce/notification/v1/destination");
	assert_eq!(calls[1].json(), destination);
}

#[tokio::test]
async fn publish_offer_posts_without_a_body() {
	let transport = RecordingHttpClient::default();
	let client = fake_client(&transport);

	transport.respond_with(200, r#"{"listingId":"1100"}"#);

	let published =
		client.inventory().publish_offer("OFFER-1").await.expect("Call should succeed.");
	let call = only_call(&transport);

	assert_eq!(published["listingId"], "1100");
	assert_eq!(call.method, "POST");
	assert_eq!(call.uri, "https://api.sandbox.ebay.com/sell/inventory/v1/offer/OFFER-1/publish");
	assert!(call.body.is_empty());
	assert!(call.header("content-type").is_none());
}

#[tokio::test]
async fn facades_share_one_token() {
	let transport = RecordingHttpClient::default();
	let client = fake_client(&transport);

	client.identity().get_user().await.expect("Call should succeed.");
	client.feedback().get_feedback_summary().await.expect("Call should succeed.");
	client.notifications().get_notification_config().await.expect("Call should succeed.");

	let uris = transport.api_calls().into_iter().map(|call| call.uri).collect::<Vec<_>>();

	assert_eq!(transport.token_calls(), 1);
	assert_eq!(uris, [
		"https://api.sandbox.ebay.com/commerce/identity/v1/user",
		"https://api.sandbox.ebay.com/commerce/feedback/v1_beta/feedback/summary",
		"https://api.sandbox.ebay.com/commerce/notification/v1/notification_config",
	]);
}
