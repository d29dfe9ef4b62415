pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod server;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::CliArgs;

pub use adapters::{AnthropicClient, MemoryStore, OfflineGenerator, SqliteStore};
pub use config::AppConfig;
pub use crate::core::{generator::HoroscopeGenerator, service::HoroscopeService, zodiac::classify};
pub use domain::model::{BirthdayValue, HoroscopeRequest, HoroscopeResult, Occupation, ZodiacSign};
pub use utils::error::{HoroscopeError, Result};
