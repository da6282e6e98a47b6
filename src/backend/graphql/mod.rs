//! Hosted GraphQL backend: fixed operations, JSON envelope decoding and the
//! HTTP transport.

pub mod client;
pub mod operations;
pub mod response;

pub use client::GraphqlBackend;
pub use operations::GraphqlRequest;
