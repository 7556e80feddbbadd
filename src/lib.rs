pub mod args;
mod backup;
pub mod commands;
mod config;
mod error;
mod export;
pub mod model;
mod seed;
pub mod storage;
mod store;
mod utils;


pub use backup::Backup;
pub use config::Config;
pub use error::{Error, LedgerError, Result};
pub use store::{Store, StoreOptions};
