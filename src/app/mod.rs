// Application wiring: turns a validated config into the injected dependencies.

use crate::adapters::{AnthropicClient, MemoryStore, OfflineGenerator, SqliteStore};
use crate::config::AppConfig;
use crate::core::service::HoroscopeService;
use crate::domain::ports::{GenerationService, HoroscopeStore};
use crate::server::AppState;
use crate::utils::error::Result;
use std::sync::Arc;

pub fn build_generation_service(config: &AppConfig) -> Arc<dyn GenerationService> {
    if config.generation.enabled {
        tracing::info!("Generation service: {} ({})", config.generation.endpoint, config.generation.model);
        Arc::new(AnthropicClient::new(&config.generation))
    } else {
        tracing::warn!("Generation service disabled, horoscopes will use the built-in template");
        Arc::new(OfflineGenerator)
    }
}

pub async fn build_store(config: &AppConfig) -> Result<Arc<dyn HoroscopeStore>> {
    if config.uses_memory_store() {
        tracing::info!("Using in-memory horoscope store");
        return Ok(Arc::new(MemoryStore::new()));
    }

    let store = SqliteStore::connect(&config.database.url).await?;
    Ok(Arc::new(store))
}

pub async fn build_state(config: &AppConfig) -> Result<AppState> {
    let generation = build_generation_service(config);
    let store = build_store(config).await?;

    Ok(AppState {
        service: HoroscopeService::new(generation, store),
    })
}
