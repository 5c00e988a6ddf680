//! iCalendar feed generation and parsing.
//!
//! Feeds are written by hand as an ordered list of lines so output stays
//! byte-stable; reading them back goes through the icalendar crate's parser.

mod generate;
mod parse;

pub use generate::{escape_text, serialize};
pub use parse::{FeedEvent, parse_feed, unescape_text};
