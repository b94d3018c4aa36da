pub mod config;
pub mod dashboard;
pub mod datatypes;
pub mod error;
pub mod export;
pub mod filter;
pub mod protocol;
pub mod session;
pub mod util;
