//! Core domain types
//!
//! These types describe a live-search job from the caller's side: the request
//! that creates it, the handle the service hands back, and the outcome of
//! waiting on it. They are shared by the client library and the CLI.

pub mod job;
pub mod outcome;
pub mod result;
