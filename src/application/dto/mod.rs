//! Data Transfer Objects
//!
//! Request and response body definitions. The wire format is camelCase;
//! request bodies reject unknown fields so server-controlled columns
//! (ids, status, counters) can never be smuggled in.

pub mod request;
pub mod response;
