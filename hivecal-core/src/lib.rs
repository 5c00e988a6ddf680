//! Core types for hivecal.
//!
//! This crate turns hive inspection histories into calendar feeds:
//! - `schedule` computes overdue and upcoming inspection occurrences
//! - `ics` serializes occurrences into an RFC 5545 feed (and reads feeds back)
//! - `apiary` and `feed` connect the engine to stored hive data

pub mod apiary;
pub mod config;
pub mod constants;
pub mod error;
pub mod feed;
pub mod hive;
pub mod ics;
pub mod occurrence;
pub mod schedule;

pub use error::{HivecalError, HivecalResult};
pub use hive::{HiveState, HiveStatus};
pub use occurrence::{Occurrence, OccurrenceKind};
