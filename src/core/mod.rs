pub mod generator;
pub mod service;
pub mod zodiac;

pub use crate::domain::model::{BirthdayValue, HoroscopeRequest, HoroscopeResult, ZodiacSign};
pub use crate::domain::ports::{GenerationService, HoroscopeStore};
pub use crate::utils::error::Result;
