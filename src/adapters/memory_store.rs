use crate::domain::model::HoroscopeResult;
use crate::domain::ports::HoroscopeStore;
use crate::utils::error::Result;
use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Process-local store; contents are lost on restart.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    records: Arc<Mutex<Vec<HoroscopeResult>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl HoroscopeStore for MemoryStore {
    async fn save(&self, result: &HoroscopeResult) -> Result<i64> {
        let mut records = self.records.lock().await;
        let id = records.last().and_then(|r| r.id).unwrap_or(0) + 1;

        let mut stored = result.clone();
        stored.id = Some(id);
        stored.created_at = Some(Utc::now());
        stored.saved = false;
        records.push(stored);

        Ok(id)
    }

    async fn mark_liked(&self, id: i64) -> Result<bool> {
        let mut records = self.records.lock().await;
        match records.iter_mut().find(|r| r.id == Some(id)) {
            Some(record) => {
                record.saved = true;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn get_all(&self) -> Result<Vec<HoroscopeResult>> {
        let records = self.records.lock().await;
        let mut liked: Vec<HoroscopeResult> = records.iter().filter(|r| r.saved).cloned().collect();
        liked.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(liked)
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<HoroscopeResult>> {
        let records = self.records.lock().await;
        Ok(records.iter().find(|r| r.id == Some(id)).cloned())
    }
}
