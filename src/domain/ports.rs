use crate::domain::model::{HoroscopeResult, PhotoSource};
use crate::utils::error::Result;
use async_trait::async_trait;

/// External multimodal text generation.
///
/// `Ok(None)` means the service answered (or is switched off) but produced
/// no usable text. `Err` is reserved for call-level failures.
#[async_trait]
pub trait GenerationService: Send + Sync {
    async fn generate_text(&self, prompt: &str, photo: &PhotoSource) -> Result<Option<String>>;
}

#[async_trait]
pub trait HoroscopeStore: Send + Sync {
    /// Persists a result and returns its new id.
    async fn save(&self, result: &HoroscopeResult) -> Result<i64>;

    /// Returns `false` when no result has this id.
    async fn mark_liked(&self, id: i64) -> Result<bool>;

    /// Liked results only, newest first.
    async fn get_all(&self) -> Result<Vec<HoroscopeResult>>;

    async fn get_by_id(&self, id: i64) -> Result<Option<HoroscopeResult>>;
}
