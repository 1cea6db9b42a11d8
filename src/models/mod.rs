//! Domain values and the request/response types built on them.
//!
//! Constructors here are pure: they validate input and never touch storage.

/// Account model and document validation
pub mod account;
/// Operation type classification
pub mod operation_type;
/// Transaction model and sign normalization
pub mod transaction;
