use crate::core::generator::HoroscopeGenerator;
use crate::core::zodiac::classify;
use crate::domain::model::{HoroscopeRequest, HoroscopeResult};
use crate::domain::ports::{GenerationService, HoroscopeStore};
use crate::utils::error::Result;
use std::sync::Arc;

/// Ties classification, generation and persistence together.
#[derive(Clone)]
pub struct HoroscopeService {
    generator: HoroscopeGenerator,
    store: Arc<dyn HoroscopeStore>,
}

impl HoroscopeService {
    pub fn new(generation: Arc<dyn GenerationService>, store: Arc<dyn HoroscopeStore>) -> Self {
        Self {
            generator: HoroscopeGenerator::new(generation),
            store,
        }
    }

    /// Generates and saves a horoscope. Only persistence can fail here.
    pub async fn create(&self, request: &HoroscopeRequest) -> Result<HoroscopeResult> {
        let sign = classify(request.birthday);
        tracing::info!("✨ Generating {} horoscope for {}", sign, request.first_name);

        let text = self.generator.generate(request, sign).await;
        let mut result = HoroscopeResult::new(request, sign, text);

        let id = self.store.save(&result).await?;
        result.id = Some(id);
        tracing::info!("Saved horoscope {}", id);
        Ok(result)
    }

    pub async fn get(&self, id: i64) -> Result<Option<HoroscopeResult>> {
        self.store.get_by_id(id).await
    }

    pub async fn like(&self, id: i64) -> Result<bool> {
        let updated = self.store.mark_liked(id).await?;
        if updated {
            tracing::info!("Horoscope {} marked as liked", id);
        }
        Ok(updated)
    }

    pub async fn liked(&self) -> Result<Vec<HoroscopeResult>> {
        self.store.get_all().await
    }
}
