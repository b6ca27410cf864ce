pub mod cli;
pub mod config;
pub mod crypto;
pub mod endpoints;
pub mod errors;
pub mod export;
pub mod index;
pub mod runner;
pub mod store;
pub mod vault;

#[cfg(feature = "keyring-store")]
pub mod keyring;
