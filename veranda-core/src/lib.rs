// Core library for the Veranda web framework
// This module contains the foundational types and the request/response cycle

pub mod application;
pub mod error;
pub mod handler;
pub mod http;
pub mod logging;
pub mod routing;
pub mod static_assets;
pub mod status;
pub mod traits;

// Re-export commonly used types
pub use application::*;
pub use error::*;
pub use handler::*;
pub use http::*;
pub use routing::{Route, Router}; // Explicit exports to avoid ambiguous HandlerFn
pub use static_assets::*;
pub use status::*;
pub use traits::*;
