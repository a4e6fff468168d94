//! Backend Proxy Layer
//!
//! Everything that crosses the HTTP boundary: endpoint DTOs, the reqwest
//! client, and the error normalizer that turns every failure into a uniform
//! shape before the controller sees it.

mod client;
mod dto;
mod error;

pub use client::{ChannelSelector, EventBackend, EventQuery, ProxyClient, ProxyConfig};
pub use dto::{
    AnalyticsBody, BackendErrorBody, ChannelListBody, DateRangeBody, SummaryBody,
    ValidationContext, ValidationRecord,
};
pub use error::{normalize, ApiInfo, ErrorCategory, NormalizedError, NETWORK_SENTINEL};
