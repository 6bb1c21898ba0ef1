pub mod boundary;
pub mod changelog;
pub mod cli;
pub mod config;
pub mod discovery;
pub mod domain;
pub mod error;
pub mod git;
pub mod patch;
pub mod ui;

pub use error::{RelmError, Result};
