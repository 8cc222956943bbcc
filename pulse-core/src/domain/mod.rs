//! Core domain types
//!
//! Every value here lives for a single invocation: it is built from
//! configuration or a GitHub response, passed to the next step, then dropped.

pub mod address;
pub mod commit;
pub mod repository;
