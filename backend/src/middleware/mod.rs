//! Request middleware.
//!
//! - [`Trace`]: per-request trace id, span, and `trace-id` response header.
//! - [`IdentityHeader`]: resolves the gateway-supplied caller id.

pub mod identity;
pub mod trace;

pub use identity::{DEFAULT_IDENTITY_HEADER, IdentityHeader};
pub use trace::Trace;
