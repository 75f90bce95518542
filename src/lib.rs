//! Applies checksum-keyed text patches (`OFFSET: FIND → REPLACE`) to ROM images.

pub mod checksum;
pub mod error;
pub mod hexfmt;
pub mod parser;
pub mod patch;
pub mod patcher;
pub mod runner;

pub use checksum::Checksum;
pub use error::{Error, Result};
pub use patch::{PatchBlock, PatchTriple};
pub use runner::{run, Report};
