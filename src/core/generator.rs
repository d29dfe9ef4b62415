use crate::domain::model::{accessory_for, HoroscopeRequest, PhotoSource, ZodiacSign};
use crate::domain::ports::GenerationService;
use crate::utils::error::Result;
use std::sync::Arc;

pub const GENERATION_ERROR_NOTICE: &str = "Error generating your horoscope. Please try again later.";

/// Turns a request into horoscope text using an injected generation service.
///
/// `generate` always returns text:
/// * the service's reply when it is non-empty,
/// * a deterministic template when the reply has no usable text,
/// * [`GENERATION_ERROR_NOTICE`] when the call itself fails.
#[derive(Clone)]
pub struct HoroscopeGenerator {
    service: Arc<dyn GenerationService>,
}

impl HoroscopeGenerator {
    pub fn new(service: Arc<dyn GenerationService>) -> Self {
        Self { service }
    }

    pub async fn generate(&self, request: &HoroscopeRequest, sign: ZodiacSign) -> String {
        match self.try_generate(request, sign).await {
            Ok(Some(text)) => text,
            Ok(None) => {
                tracing::info!(
                    "No usable text from generation service, using template for {}",
                    request.first_name
                );
                fallback_horoscope(request, sign)
            }
            Err(e) => {
                tracing::warn!("❌ Error generating horoscope: {}", e);
                GENERATION_ERROR_NOTICE.to_string()
            }
        }
    }

    async fn try_generate(&self, request: &HoroscopeRequest, sign: ZodiacSign) -> Result<Option<String>> {
        let photo = PhotoSource::parse(&request.photo_url)?;
        let prompt = build_prompt(request, sign);

        tracing::debug!("Requesting horoscope for {} ({})", request.first_name, sign);
        let reply = self.service.generate_text(&prompt, &photo).await?;

        Ok(reply.filter(|text| !text.is_empty()))
    }
}

pub fn build_prompt(request: &HoroscopeRequest, sign: ZodiacSign) -> String {
    format!(
        r#"Make me a very funny, rude, sarcastic horoscope (for the "Next sprint"), poking fun as much as possible from stereotypes perceived for the role and technology stack of the individual whose data is provided

First Name: {first_name}
Birthday: {birthday}
Occupation: {occupation}
Zodiac Sign: {sign}

Please take some cues from the photo such as age / gender / emotion / accessories / clothing / etc, and try to mention or poke fun from at least one detail (or more) from the photo within your response.
Note: The photo was provided separately and you can see it in this conversation."#,
        first_name = request.first_name,
        birthday = request.birthday,
        occupation = request.occupation,
        sign = sign,
    )
}

/// Template used when the service gives nothing back. Same input, same text.
pub fn fallback_horoscope(request: &HoroscopeRequest, sign: ZodiacSign) -> String {
    let accessory = accessory_for(&request.occupation);
    format!(
        "Dear {name}, your {occupation} {sign} Horoscope:\n\
The alignment of JIRA tickets with Mercury retrograde suggests your next sprint will be memorable for all the wrong reasons. \
That determined look in your eyes (from your photo) won't save you from the chaos of conflicting requirements. \
Your manager will praise your \"innovative solutions\" while secretly wondering if you've been randomly generating code.\n\
With Saturn crossing your productivity house, expect to spend hours debugging a problem caused by a single misplaced semicolon. \
That {accessory} you're so proud of won't help when the staging environment mysteriously crashes right before the demo.\n\
But fear not! Venus brings good fortune in the form of a senior developer who takes pity on you after seeing your desperate Slack messages at 2 AM. \
Embrace the chaos, for in the world of IT, the only constant is change, and your outdated tech stack.",
        name = request.first_name,
        occupation = request.occupation,
        sign = sign,
        accessory = accessory,
    )
}
