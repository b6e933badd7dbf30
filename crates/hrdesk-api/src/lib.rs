// hrdesk-api: Async Rust client for the hrdesk HR/CRM REST API

pub mod auth;
pub mod client;
mod endpoints;
pub mod error;
pub mod models;
pub mod transport;
pub mod upload;

pub use auth::AuthContext;
pub use client::{HrClient, Service};
pub use error::Error;
pub use transport::{TlsMode, TransportConfig};
pub use upload::{Attachment, AttachmentField, ContentKind, MAX_ATTACHMENT_BYTES};
