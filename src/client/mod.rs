//! n8n REST API client and authentication.
//!
//! This module provides the [`N8nClient`] for the public n8n API
//! (`/api/v1`), authenticated with an [`ApiKey`].

mod auth;
mod n8n;

pub use auth::ApiKey;
pub use n8n::N8nClient;
