//! # group-types
//!
//! Shared domain types for the group data packager.
//!
//! This crate defines the data structures passed between the packager and
//! its hosts:
//! - Payloads: the input batch of segmented texts and the grouped output batch
//! - Groups: `GroupData` made of labeled `Person` members
//! - Settings: host configuration (the packager itself has none)
//!
//! ## Usage
//!
//! ```rust
//! use group_types::InputPayload;
//!
//! let input = InputPayload::new("file-1", vec!["hello".to_string()], vec![1]);
//! assert_eq!(input.len(), 1);
//! ```

pub mod config;
pub mod error;
pub mod group;
pub mod payload;

pub use config::Settings;
pub use error::GroupTypesError;
pub use group::{GroupData, Person};
pub use payload::{InputPayload, InputUnit, OutputEntry, OutputPayload};
