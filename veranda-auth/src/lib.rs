//! OAuth token lifecycle for Veranda.
//!
//! Keeps a single vendor token in a JSON file, checks its validity per
//! request, refreshes it against the vendor's token endpoint when expired,
//! and turns it into the header mapping upstream-aware handlers receive.
//!
//! ## Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use veranda_auth::{BearerHeaderProvider, OAuthToken, TokenBroker, TokenStore};
//!
//! # fn example(seed: OAuthToken) -> Result<(), Box<dyn std::error::Error>> {
//! let store = TokenStore::open("token.json", &seed)?;
//! let broker = Arc::new(TokenBroker::new(store, "vendor.example.com"));
//! let provider = BearerHeaderProvider::new(broker, "vendor.example.com");
//! // hand `provider` to Application::with_header_provider
//! # Ok(())
//! # }
//! ```

pub mod broker;
pub mod error;
pub mod provider;
pub mod store;
pub mod token;

pub use broker::TokenBroker;
pub use error::{AuthError, Result};
pub use provider::BearerHeaderProvider;
pub use store::TokenStore;
pub use token::OAuthToken;
