//! Data models for captured HTTP transactions.
//!
//! This module contains the core data structures used throughout the analyzer
//! for representing a parsed trace, its transactions and their derived attributes.

pub mod category;
pub mod timings;
pub mod transaction;

pub use category::{derive_content_category, ContentCategory, StatusClass};
pub use timings::Timings;
pub use transaction::{
    Creator, NameValuePair, PostData, Request, Response, ResponseContent, Transaction,
    TransactionLog,
};
