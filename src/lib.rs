//! Ranking points calculator.
//!
//! [`scoring`] holds the pure core: [`scoring::validate`] for typed ranking
//! input and [`scoring::resolve`] for the banded points lookup. Everything else
//! is a caller of those two.

pub mod config;
pub mod diagnostics;
pub mod output;
pub mod scoring;
pub mod tui;
