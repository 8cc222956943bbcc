//! Service layer
//!
//! Services contain the business logic behind each function. The empty-commit
//! workflow and the greeting are independent and share nothing.

pub mod empty_commit;
pub mod greeting;

pub use empty_commit::{EmptyCommitError, EmptyCommitService, ErrorKind, InvocationStage};
