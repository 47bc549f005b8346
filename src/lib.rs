rust_i18n::i18n!("locales", fallback = "en-US");

pub mod cli;
pub mod component;
pub mod config;
pub mod error;
pub mod init;
pub mod signal;
pub mod tools;

pub use error::{Result, StoryboardError};
