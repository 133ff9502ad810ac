//! Application credential model, scopes, and the token provider.

pub mod credential;
pub mod provider;
pub mod scope;
pub mod secret;

pub use credential::*;
pub use provider::*;
pub use scope::*;
pub use secret::*;
