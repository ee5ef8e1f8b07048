use crate::core::FormData;
use chrono::{DateTime, Datelike, Utc};
use serde::Serialize;
use std::fmt;

/// `PREFIX-YYYY-XXXXXXXX` confirmation number. Simulated; nothing is sent
/// anywhere.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ReferenceNumber(String);

impl ReferenceNumber {
    pub fn generate(prefix: &str) -> Self {
        let suffix = uuid::Uuid::new_v4().simple().to_string();
        Self::from_parts(prefix, Utc::now().year(), &suffix[..8])
    }

    pub fn from_parts(prefix: &str, year: i32, suffix: &str) -> Self {
        Self(format!(
            "{}-{year:04}-{}",
            prefix.to_ascii_uppercase(),
            suffix.to_ascii_uppercase()
        ))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ReferenceNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Receipt {
    pub reference: ReferenceNumber,
    pub flow: &'static str,
    pub submitted_at: DateTime<Utc>,
    pub fields: FormData,
}

impl Receipt {
    pub fn new(reference: ReferenceNumber, flow: &'static str, fields: FormData) -> Self {
        Self {
            reference,
            flow,
            submitted_at: Utc::now(),
            fields,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::ReferenceNumber;
    use regex::Regex;

    #[test]
    fn generated_numbers_follow_the_format() {
        let re = Regex::new(r"^EXH-\d{4}-[0-9A-F]{8}$").expect("regex");
        let a = ReferenceNumber::generate("exh");
        let b = ReferenceNumber::generate("exh");
        assert!(re.is_match(a.as_str()), "{a}");
        assert_ne!(a, b);
    }

    #[test]
    fn from_parts_pads_year() {
        assert_eq!(
            ReferenceNumber::from_parts("req", 987, "abc").to_string(),
            "REQ-0987-ABC"
        );
    }
}
