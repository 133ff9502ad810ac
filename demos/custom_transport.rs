//! Shows how to hand the client a preconfigured reqwest client and share one authenticated
//! client across tasks.

// std
use std::time::Duration;
// crates.io
use color_eyre::Result;
use httpmock::prelude::*;
// self
use ebay_sell_client::{
	ApiClient,
	auth::ScopeSet,
	config::ClientConfig,
	http::ReqwestHttpClient,
	oauth::ReqwestTransportErrorMapper,
	reqwest::Client,
};

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let server = MockServer::start_async().await;
	let token_mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/identity/v1/oauth2/token");
			then.status(200)
				.header("content-type", "application/json")
				.delay(Duration::from_millis(100))
				.body(
					"{\"access_token\":\"demo-access\",\"token_type\":\"Application Access Token\",\"expires_in\":7200}",
				);
		})
		.await;
	let search_mock = server
		.mock_async(|when, then| {
			when.method(GET)
				.path("/commerce/message/v1/message/search")
				.header("user-agent", "ebay-sell-client-demo");
			then.status(200).header("content-type", "application/json").body("{\"messages\":[]}");
		})
		.await;
	let config = ClientConfig::builder("demo-client", "demo-secret")
		.scopes(ScopeSet::new([
			"https://api.ebay.com/oauth/api_scope",
			"https://api.ebay.com/oauth/api_scope/commerce.message",
		])?)
		.api_base_url(server.base_url())
		.token_url(server.url("/identity/v1/oauth2/token"))
		.build()?;
	// The transport owns the timeout when it is supplied by the caller.
	let http_client = ReqwestHttpClient::with_client(
		Client::builder()
			.timeout(Duration::from_secs(10))
			.user_agent("ebay-sell-client-demo")
			.build()?,
	);
	let client = <ApiClient<ReqwestHttpClient, ReqwestTransportErrorMapper>>::with_http_client(
		config,
		http_client,
		ReqwestTransportErrorMapper,
	)?;
	let tasks = (0..4)
		.map(|_| {
			let client = client.clone();

			tokio::spawn(
				async move { client.messages().search_messages(None, Some(5), None).await },
			)
		})
		.collect::<Vec<_>>();

	for task in tasks {
		let messages = task.await??;

		println!("Inbox page: {messages}.");
	}

	println!("Token endpoint calls: {}.", client.tokens().metrics().issuances());

	token_mock.assert_async().await;
	search_mock.assert_calls_async(4).await;

	Ok(())
}
