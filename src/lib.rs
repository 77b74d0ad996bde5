pub mod account;
pub mod alphabet;
pub mod cli;
pub mod config;
pub mod derive;
pub mod error;
pub mod session;
pub mod store;

pub use error::{Error, Result};
