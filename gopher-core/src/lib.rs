//! Gopher Core
//!
//! Core types for the Gopher live-search job client.
//!
//! This crate contains:
//! - Domain types: jobs, handles, result items and poll outcomes
//! - DTOs: wire shapes exchanged with the remote search service

pub mod domain;
pub mod dto;
