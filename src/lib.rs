//! Row value decoding for the MySQL/MariaDB text and binary protocols.
//!
//! A row arrives as one optional byte field per column. Load it into a
//! [`decode::TextRowDecoder`] or [`decode::BinaryRowDecoder`] with
//! `reset_row`, then read each column through the typed `get_internal_*`
//! accessors of [`decode::RowDecoder`].

pub mod col;
pub mod constant;
pub mod cursor;
pub mod decode;
pub mod error;
pub mod format;
mod opts;
pub mod protocol;
pub mod range;
pub mod temporal;
pub mod value;

pub use opts::Opts;

#[cfg(test)]
mod cursor_test;
#[cfg(test)]
mod opts_test;
