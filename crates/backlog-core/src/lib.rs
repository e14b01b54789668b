pub mod compile;
pub mod config;
pub mod error;
pub mod ident;
pub mod io;
pub mod ledger;
pub mod parser;
pub mod paths;
pub mod sanitize;
pub mod specs;
pub mod splitter;
pub mod store;
pub mod types;

pub use error::{BacklogError, Result};
