//! Pulse Core
//!
//! Core types for the Pulse scheduled-commit functions.
//!
//! This crate contains:
//! - Domain types: repository addressing, repository state and commit requests
//! - DTOs: typed GraphQL request/response envelopes exchanged with GitHub

pub mod domain;
pub mod dto;
