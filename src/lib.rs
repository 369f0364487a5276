//! Messier: Wikipedia Messier-objects table to CSV catalogue
//!
//! This crate converts a saved copy of the Wikipedia "Messier objects" wiki
//! table into a fixed-schema CSV file, optionally downloading each row's
//! image from Wikimedia Commons and producing a 320px thumbnail via an
//! external ImageMagick executable:
//!
//! 1. **Row extraction** -- Split the raw document into row blocks between
//!    `|-` separators and the `|}` terminator, and each block into cells
//! 2. **Cell cleaning** -- Apply a fixed, order-sensitive chain of markup
//!    substitutions per cell, with a dedicated extraction path for the
//!    distance column
//! 3. **Image resolution** -- Translate `[[File:...]]` references into
//!    direct URLs through the Commons imageinfo API and shell out to
//!    ImageMagick for download and thumbnailing
//! 4. **Record assembly** -- Emit one 12-column record per valid row, in
//!    input order, with empty strings for anything unresolved
//!
//! The pipeline is deliberately single-threaded and synchronous: one
//! document read, one sequential row loop, one CSV write at the end. Rows
//! with too few cells are skipped, not fatal; image failures degrade to
//! empty path fields; only a missing input or unwritable output aborts a
//! run.
//!
//! # Key Modules
//!
//! - [`table`] -- Row and cell extraction from wiki table markup
//! - [`clean`] -- Ordered markup substitutions and the distance extractor
//! - [`wikimedia`] -- Commons API lookup and ImageMagick invocation
//! - [`pipeline`] -- Orchestration from input file to CSV
//! - [`models`] -- Column roles and the output record
//! - [`stats`] -- Per-run counters
//! - [`config`] -- Constants for extraction and resolution

pub mod clean;
pub mod config;
pub mod models;
pub mod pipeline;
pub mod stats;
pub mod table;
pub mod wikimedia;
