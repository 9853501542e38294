// src/specs/mod.rs
//! # Page specs
//!
//! Each spec encodes *where the ground truth lives in the HTML* of one remote
//! page and how to shape it into report rows.
//!
//! BIGSdb result pages carry no stable ids or classes on their tables, so the
//! only contract is structural: tables are picked by position among the
//! top-level tables of the document. Keep that contract in one place
//! (`sequence_query::extract`) so a layout change breaks exactly one function.
//!
//! Specs never touch the network or the filesystem; they take a response body
//! and are testable offline against saved pages.
pub mod sequence_query;
