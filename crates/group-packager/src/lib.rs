//! # group-packager
//!
//! Packages a batch of segmented texts into `GroupData` for group-level
//! comparison such as linguistic style matching.
//!
//! The decision is made once per batch from the distribution of segment
//! numbers:
//! - every number seen once: all texts become members of a single group
//! - any number repeated: one group per distinct number, collecting every
//!   text that shares it
//!
//! ```rust
//! use group_packager::pack;
//! use group_types::InputPayload;
//!
//! let input = InputPayload::new(
//!     "chat.csv",
//!     vec!["a".into(), "b".into(), "c".into(), "d".into()],
//!     vec![1, 1, 2, 2],
//! );
//! let output = pack(&input).unwrap();
//! assert_eq!(output.segment_number, vec![1, 2]);
//! assert_eq!(output.segment_id, vec!["0;1;", "0;1;"]);
//! ```

pub mod config;
pub mod error;
pub mod mode;
pub mod packer;

pub use config::PackagerConfig;
pub use error::PackError;
pub use mode::{detect_mode, PackageMode, SegmentIndex};
pub use packer::{pack, validate, GroupPackager, SEGMENT_ID_SEPARATOR};
