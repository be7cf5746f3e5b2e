//! Remote recipe source: TheMealDB endpoints, request tagging and decoding.
//!
//! The HTTP transport is provided by the Zellij host (`web_request`). This
//! module only decides which URL to hit, how to tag the request so its
//! response can be routed back, and how to decode the JSON that comes back.
//!
//! # Architecture
//!
//! - `endpoints`: Search kinds, typed queries and URL construction
//! - `context`: Request tags carried through Zellij's web request context
//! - `response`: JSON envelopes and conversion into domain types

pub mod context;
pub mod endpoints;
pub mod response;

pub use context::{FetchTarget, RequestTag};
pub use endpoints::{RemoteRequest, SearchKind, SearchQuery, DEFAULT_API_BASE};
pub use response::{decode_categories, decode_lookup, decode_meals};
