//! Typed async client for the eBay Sell and Commerce REST APIs.
//!
//! [`ApiClient`] is the authenticated request pipeline: before every call it asks its
//! [`TokenProvider`](auth::TokenProvider) for a valid application access token (issuing or
//! refreshing one lazily, with concurrent refreshes coalesced into a single token call), attaches
//! it as a bearer credential, and folds every failure into [`Error`]. The [`api`] module layers
//! thin per-domain facades (inventory, fulfillment, marketing, messaging, ...) on top of the
//! pipeline's four verbs.
//!
//! ```no_run
//! # async fn demo() -> ebay_sell_client::Result<()> {
//! use ebay_sell_client::{ApiClient, config::{ClientConfig, Environment}};
//!
//! let config = ClientConfig::builder("client-id", "client-secret")
//! 	.environment(Environment::Sandbox)
//! 	.build()?;
//! let client = ApiClient::new(config)?;
//! let items = client.inventory().get_inventory_items(Some(10), None).await?;
//!
//! println!("{} inventory items.", items.inventory_items.len());
//! # Ok(())
//! # }
//! ```

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod api;
pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod oauth;
pub mod obs;

mod _prelude {
	pub use std::{
		collections::BTreeMap,
		error::Error as StdError,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		pin::Pin,
		str::FromStr,
		sync::Arc,
	};

	pub use async_lock::Mutex as AsyncMutex;
	pub use parking_lot::{Mutex, RwLock};
	#[cfg(feature = "reqwest")]
	pub use reqwest::{Client as ReqwestClient, Error as ReqwestError};
	pub use serde::{Deserialize, Serialize, de::DeserializeOwned};
	pub use serde_json::Value as JsonValue;
	pub use thiserror::Error as ThisError;
	pub use time::{Duration, OffsetDateTime};
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

pub use client::ApiClient;
pub use error::{Error, Result};
#[cfg(feature = "reqwest")] pub use reqwest;
pub use url;
#[cfg(test)] use {color_eyre as _, httpmock as _, tokio as _};
