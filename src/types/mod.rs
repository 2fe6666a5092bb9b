//! Type definitions for sentiboard

mod analysis;
mod config;
mod error;
mod report;

pub use analysis::*;
pub use config::*;
pub use error::*;
pub use report::*;
