// Veranda - a minimal web framework for thin pages over third-party REST APIs
//
// This library re-exports the core request cycle (routing, handlers, static
// assets) plus the optional configuration, auth, and templating crates.

// Re-export core functionality
pub use veranda_core::*;

// Re-export optional crates
#[cfg(feature = "config")]
pub use veranda_config;

#[cfg(feature = "auth")]
pub use veranda_auth;

#[cfg(feature = "handlebars")]
pub use veranda_handlebars;
