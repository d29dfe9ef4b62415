use crate::utils::error::{HoroscopeError, Result};
use base64::Engine;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A birthday as `MM/DD`.
///
/// Month must be 1-12 and day 1-31. The day is not checked against the
/// month's length, so `02/30` is a valid value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BirthdayValue {
    month: u8,
    day: u8,
}

impl BirthdayValue {
    pub fn new(month: u8, day: u8) -> Result<Self> {
        if !(1..=12).contains(&month) {
            return Err(HoroscopeError::ValidationError {
                message: format!("birthday month must be between 1 and 12, got {}", month),
            });
        }
        if !(1..=31).contains(&day) {
            return Err(HoroscopeError::ValidationError {
                message: format!("birthday day must be between 1 and 31, got {}", day),
            });
        }
        Ok(Self { month, day })
    }

    pub fn month(&self) -> u8 {
        self.month
    }

    pub fn day(&self) -> u8 {
        self.day
    }
}

impl FromStr for BirthdayValue {
    type Err = HoroscopeError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || HoroscopeError::ValidationError {
            message: format!("birthday must be in MM/DD format, got '{}'", s),
        };

        let (month, day) = s.trim().split_once('/').ok_or_else(invalid)?;
        let month: u8 = month.trim().parse().map_err(|_| invalid())?;
        let day: u8 = day.trim().parse().map_err(|_| invalid())?;
        Self::new(month, day)
    }
}

impl fmt::Display for BirthdayValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}/{:02}", self.month, self.day)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ZodiacSign {
    Aries,
    Taurus,
    Gemini,
    Cancer,
    Leo,
    Virgo,
    Libra,
    Scorpio,
    Sagittarius,
    Capricorn,
    Aquarius,
    Pisces,
}

impl ZodiacSign {
    pub const ALL: [ZodiacSign; 12] = [
        ZodiacSign::Aries,
        ZodiacSign::Taurus,
        ZodiacSign::Gemini,
        ZodiacSign::Cancer,
        ZodiacSign::Leo,
        ZodiacSign::Virgo,
        ZodiacSign::Libra,
        ZodiacSign::Scorpio,
        ZodiacSign::Sagittarius,
        ZodiacSign::Capricorn,
        ZodiacSign::Aquarius,
        ZodiacSign::Pisces,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ZodiacSign::Aries => "Aries",
            ZodiacSign::Taurus => "Taurus",
            ZodiacSign::Gemini => "Gemini",
            ZodiacSign::Cancer => "Cancer",
            ZodiacSign::Leo => "Leo",
            ZodiacSign::Virgo => "Virgo",
            ZodiacSign::Libra => "Libra",
            ZodiacSign::Scorpio => "Scorpio",
            ZodiacSign::Sagittarius => "Sagittarius",
            ZodiacSign::Capricorn => "Capricorn",
            ZodiacSign::Aquarius => "Aquarius",
            ZodiacSign::Pisces => "Pisces",
        }
    }
}

impl fmt::Display for ZodiacSign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The eight job roles offered by the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Occupation {
    AngularDeveloper,
    ReactDeveloper,
    NodeDeveloper,
    BusinessAnalyst,
    QualityAssurance,
    Designer,
    ProductOwner,
    DeliveryLead,
}

pub const DEFAULT_ACCESSORY: &str = "tech gadget";

impl Occupation {
    pub const ALL: [Occupation; 8] = [
        Occupation::AngularDeveloper,
        Occupation::ReactDeveloper,
        Occupation::NodeDeveloper,
        Occupation::BusinessAnalyst,
        Occupation::QualityAssurance,
        Occupation::Designer,
        Occupation::ProductOwner,
        Occupation::DeliveryLead,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Occupation::AngularDeveloper => "Frontend Developer (Angular)",
            Occupation::ReactDeveloper => "Frontend Developer (React)",
            Occupation::NodeDeveloper => "Backend Developer (Node.js)",
            Occupation::BusinessAnalyst => "Business Analyst",
            Occupation::QualityAssurance => "Quality Assurance Engineer",
            Occupation::Designer => "Designer",
            Occupation::ProductOwner => "Product Owner",
            Occupation::DeliveryLead => "Delivery Lead",
        }
    }

    /// Short form used on team boards.
    pub fn short_code(&self) -> &'static str {
        match self {
            Occupation::AngularDeveloper => "FE Dev (Angular)",
            Occupation::ReactDeveloper => "FE Dev (React)",
            Occupation::NodeDeveloper => "BE Dev (node JS)",
            Occupation::BusinessAnalyst => "BA",
            Occupation::QualityAssurance => "QA",
            Occupation::Designer => "Designer",
            Occupation::ProductOwner => "PO",
            Occupation::DeliveryLead => "DL",
        }
    }

    /// Accepts either the full label or the short code.
    pub fn from_label(value: &str) -> Option<Self> {
        let value = value.trim();
        Occupation::ALL
            .into_iter()
            .find(|o| o.label() == value || o.short_code() == value)
    }

    pub fn accessory(&self) -> &'static str {
        match self {
            Occupation::AngularDeveloper => "Angular sticker-covered laptop",
            Occupation::ReactDeveloper => "React hoodie",
            Occupation::NodeDeveloper => "terminal-themed coffee mug",
            Occupation::BusinessAnalyst => "overly detailed spreadsheet",
            Occupation::QualityAssurance => "bug-tracking notebook",
            Occupation::Designer => "pristine MacBook Pro",
            Occupation::ProductOwner => "overflowing kanban board",
            Occupation::DeliveryLead => "fancy noise-canceling headphones",
        }
    }
}

/// Accessory phrase for free-text occupations, with an explicit default arm.
pub fn accessory_for(occupation: &str) -> &'static str {
    match Occupation::from_label(occupation) {
        Some(known) => known.accessory(),
        None => DEFAULT_ACCESSORY,
    }
}

pub const DEFAULT_PHOTO_MEDIA_TYPE: &str = "image/jpeg";

/// Decoded form of a request's `photoUrl`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PhotoSource {
    Base64 { media_type: String, data: String },
    Url { url: String },
}

impl PhotoSource {
    pub fn parse(photo_url: &str) -> Result<Self> {
        let photo_url = photo_url.trim();

        if let Some(rest) = photo_url.strip_prefix("data:") {
            let (header, data) = rest.split_once(',').ok_or_else(|| HoroscopeError::InvalidPhotoError {
                reason: "data URI has no payload".to_string(),
            })?;

            let mut params = header.split(';');
            let media_type = match params.next() {
                Some(mt) if !mt.is_empty() => mt.to_string(),
                _ => DEFAULT_PHOTO_MEDIA_TYPE.to_string(),
            };
            if !params.any(|p| p.eq_ignore_ascii_case("base64")) {
                return Err(HoroscopeError::InvalidPhotoError {
                    reason: "data URI must be base64 encoded".to_string(),
                });
            }

            base64::engine::general_purpose::STANDARD
                .decode(data)
                .map_err(|e| HoroscopeError::InvalidPhotoError {
                    reason: format!("invalid base64 payload: {}", e),
                })?;

            return Ok(PhotoSource::Base64 {
                media_type,
                data: data.to_string(),
            });
        }

        match url::Url::parse(photo_url) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => Ok(PhotoSource::Url {
                url: url.to_string(),
            }),
            _ => Err(HoroscopeError::InvalidPhotoError {
                reason: "photo must be a base64 data URI or an http(s) URL".to_string(),
            }),
        }
    }
}

/// A validated form submission. Not persisted on its own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HoroscopeRequest {
    pub first_name: String,
    pub birthday: BirthdayValue,
    pub photo_url: String,
    pub occupation: String,
}

/// A generated horoscope. `id` and `created_at` are assigned by the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HoroscopeResult {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub id: Option<i64>,
    pub first_name: String,
    pub birthday: String,
    pub photo_url: String,
    pub occupation: String,
    pub zodiac_sign: String,
    pub horoscope: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub saved: bool,
}

impl HoroscopeResult {
    pub fn new(request: &HoroscopeRequest, sign: ZodiacSign, horoscope: String) -> Self {
        Self {
            id: None,
            first_name: request.first_name.clone(),
            birthday: request.birthday.to_string(),
            photo_url: request.photo_url.clone(),
            occupation: request.occupation.clone(),
            zodiac_sign: sign.to_string(),
            horoscope,
            created_at: None,
            saved: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_birthday() {
        let b: BirthdayValue = "07/01".parse().unwrap();
        assert_eq!((b.month(), b.day()), (7, 1));
        assert_eq!(b.to_string(), "07/01");

        let unpadded: BirthdayValue = "7/1".parse().unwrap();
        assert_eq!(unpadded, b);
    }

    #[test]
    fn test_birthday_accepts_out_of_calendar_day() {
        // 02/30 不存在，但只檢查 1-31 範圍
        let b: BirthdayValue = "02/30".parse().unwrap();
        assert_eq!(b.day(), 30);
    }

    #[test]
    fn test_birthday_rejects_bad_input() {
        assert!("13/01".parse::<BirthdayValue>().is_err());
        assert!("00/10".parse::<BirthdayValue>().is_err());
        assert!("01/32".parse::<BirthdayValue>().is_err());
        assert!("01/00".parse::<BirthdayValue>().is_err());
        assert!("0101".parse::<BirthdayValue>().is_err());
        assert!("ab/cd".parse::<BirthdayValue>().is_err());
        assert!("".parse::<BirthdayValue>().is_err());
    }

    #[test]
    fn test_zodiac_sign_labels_are_distinct() {
        let labels: std::collections::HashSet<String> =
            ZodiacSign::ALL.iter().map(|sign| sign.to_string()).collect();
        assert_eq!(labels.len(), 12);
        assert_eq!(ZodiacSign::Sagittarius.to_string(), "Sagittarius");
    }

    // 儲存時生日一律補零成 MM/DD
    #[test]
    fn test_result_stores_zero_padded_birthday() {
        let request = HoroscopeRequest {
            first_name: "Ann".to_string(),
            birthday: "7/1".parse().unwrap(),
            photo_url: "https://example.com/me.jpg".to_string(),
            occupation: "QA".to_string(),
        };
        let result = HoroscopeResult::new(&request, ZodiacSign::Cancer, "text".to_string());
        assert_eq!(result.birthday, "07/01");
        assert_eq!(result.zodiac_sign, "Cancer");
    }

    #[test]
    fn test_occupation_accepts_labels_and_short_codes() {
        assert_eq!(
            Occupation::from_label("Business Analyst"),
            Some(Occupation::BusinessAnalyst)
        );
        assert_eq!(Occupation::from_label("BA"), Some(Occupation::BusinessAnalyst));
        assert_eq!(
            Occupation::from_label("FE Dev (React)"),
            Some(Occupation::ReactDeveloper)
        );
        assert_eq!(Occupation::from_label("Astronaut"), None);
    }

    #[test]
    fn test_accessory_lookup() {
        assert_eq!(accessory_for("BA"), "overly detailed spreadsheet");
        assert_eq!(accessory_for("Business Analyst"), "overly detailed spreadsheet");
        assert_eq!(accessory_for("Designer"), "pristine MacBook Pro");
        assert_eq!(accessory_for("Astronaut"), DEFAULT_ACCESSORY);
        assert_eq!(accessory_for(""), "tech gadget");
    }

    #[test]
    fn test_photo_from_data_uri() {
        let photo = PhotoSource::parse("data:image/png;base64,aGVsbG8=").unwrap();
        assert_eq!(
            photo,
            PhotoSource::Base64 {
                media_type: "image/png".to_string(),
                data: "aGVsbG8=".to_string(),
            }
        );
    }

    #[test]
    fn test_photo_defaults_media_type() {
        let photo = PhotoSource::parse("data:;base64,aGVsbG8=").unwrap();
        assert!(matches!(photo, PhotoSource::Base64 { ref media_type, .. } if media_type == "image/jpeg"));
    }

    #[test]
    fn test_photo_from_url() {
        let photo = PhotoSource::parse("https://example.com/me.jpg").unwrap();
        assert_eq!(
            photo,
            PhotoSource::Url {
                url: "https://example.com/me.jpg".to_string()
            }
        );
    }

    #[test]
    fn test_photo_rejects_garbage() {
        assert!(PhotoSource::parse("data:image/jpeg;base64").is_err());
        assert!(PhotoSource::parse("data:image/jpeg,plain").is_err());
        assert!(PhotoSource::parse("data:image/jpeg;base64,!!!").is_err());
        assert!(PhotoSource::parse("not a photo").is_err());
        assert!(PhotoSource::parse("ftp://example.com/me.jpg").is_err());
    }

    #[test]
    fn test_result_serializes_camel_case() {
        let request = HoroscopeRequest {
            first_name: "Ann".to_string(),
            birthday: "07/01".parse().unwrap(),
            photo_url: "https://example.com/ann.jpg".to_string(),
            occupation: "Business Analyst".to_string(),
        };
        let result = HoroscopeResult::new(&request, ZodiacSign::Cancer, "text".to_string());
        let json = serde_json::to_value(&result).unwrap();

        assert_eq!(json["firstName"], "Ann");
        assert_eq!(json["zodiacSign"], "Cancer");
        assert_eq!(json["photoUrl"], "https://example.com/ann.jpg");
        assert_eq!(json["saved"], false);
        assert!(json.get("id").is_none());
        assert!(json.get("createdAt").is_none());
    }
}
