//! npm-sec-analyzer - withdrawn npm version detection library
//!
//! This library finds versions that were probably published and later
//! withdrawn from the npm registry:
//! - Gap detection over a package's published version sequence
//! - Likelihood classification of each gap
//! - Corroboration against security advisories
//! - Text and JSON reporting

pub mod advisory;
pub mod cli;
pub mod domain;
pub mod error;
pub mod gaps;
pub mod orchestrator;
pub mod output;
pub mod progress;
pub mod registry;
pub mod version;
