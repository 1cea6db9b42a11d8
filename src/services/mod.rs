//! Business logic services.
//!
//! Services contain core business logic separated from HTTP handlers.
//! They receive their stores at construction and hold no other state.

pub mod account_service;
pub mod transaction_service;

pub use account_service::AccountService;
pub use transaction_service::TransactionService;
