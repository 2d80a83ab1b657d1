//! Side-Car contract validation
//!
//! Decides whether an untrusted decoded JSON value conforms to the
//! `sidecar_roadmap_v1` contract and lists every defect found.
//!
//! - Structural errors: wrong type, missing field, empty child array
//! - Semantic errors: duplicate ids within their scope, unknown status,
//!   missing or out-of-range progress
//! - Warnings: blocked items without a `blocker_reason`
//!
//! Errors block rendering; warnings never do.
//!
//! # Example
//!
//! ```rust,ignore
//! use sidecar_validation::parse_and_validate;
//!
//! let checked = parse_and_validate(text);
//! for error in &checked.result.errors {
//!     eprintln!("{error}");
//! }
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

mod document;
mod issue;
mod validator;

pub use document::{parse_and_validate, CheckedDocument};
pub use issue::{ValidationIssue, ValidationResult, INVALID_JSON_MESSAGE};
pub use validator::validate;
