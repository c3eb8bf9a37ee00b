//! Data Transfer Objects for the remote search service
//!
//! Lightweight representations of the JSON bodies the service accepts and
//! returns. Domain types convert into and out of these at the HTTP boundary.

pub mod job;
pub mod error;
