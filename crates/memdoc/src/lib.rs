//! `memdoc` - embedded memory records inside a markdown document
//!
//! This library stores small structured records (id, date, free text) in a
//! sentinel-bounded section of a larger markdown document, keeps the
//! surrounding prose untouched, and exposes insert/update/delete/list both
//! programmatically and as a stdio tool protocol.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod cli;
pub mod codec;
pub mod config;
pub mod error;
pub mod logging;
pub mod record;
pub mod server;
pub mod store;
pub mod tools;

pub use config::Config;
pub use error::{Error, Result};
pub use logging::init_logging;
pub use record::Memory;
pub use server::ToolServer;
pub use store::MemoryStore;
