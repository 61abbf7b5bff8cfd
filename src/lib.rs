//! Flash Flood Dashboard
//!
//! Storm event loading, field derivation, segment filtering and
//! aggregation for a county flash-flood dashboard, plus the HTML page
//! and HTTP server that present the results.
//!
//! This crate provides the core implementation for the
//! `flashflood` CLI tool.
//!
//! ## Getting Started
//!
//! ```bash
//! flashflood render --input storm_data_search_results3.csv --output dashboard.html
//! flashflood serve --variant classic
//! ```

pub mod aggregator;
pub mod commands;
pub mod dashboard;
pub mod output;
pub mod parser;
pub mod segment;
pub mod utils;
