//! portfolio-tracker: stock portfolio dashboard with simulated live prices.
//!
//! Hexagonal architecture: domain logic in [`domain`], port traits in [`ports`],
//! concrete implementations in [`adapters`]. The background price refresher
//! lives in [`refresher`]; [`cli`] wires everything together.

pub mod domain;
pub mod ports;
pub mod adapters;
pub mod cli;
pub mod logging;
pub mod refresher;
