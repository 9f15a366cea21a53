//! # Course Records
//!
//! The `Course` record as it appears in seed documents and persisted snapshots.

use serde::{de, Deserialize, Deserializer, Serialize};

/// Lowest credit value a stored course may carry
pub const MIN_CREDITS: u8 = 1;
/// Highest credit value a stored course may carry
pub const MAX_CREDITS: u8 = 4;

/// Whether a course is part of the core list or an elective category
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum CourseType {
    #[default]
    Core,
    Elective,
}

impl CourseType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Core => "core",
            Self::Elective => "elective",
        }
    }

    /// Parse the value of a course-type selector; `None` for anything else
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "core" => Some(Self::Core),
            "elective" => Some(Self::Elective),
            _ => None,
        }
    }
}

/// Free-form course details
///
/// Only `description` is edited through the form. Any other fields found in
/// a seed or snapshot (prerequisites, notes, ...) are carried along untouched.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct CourseDetails {
    #[serde(default)]
    pub description: String,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl CourseDetails {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            extra: serde_json::Map::new(),
        }
    }
}

/// A single course in the catalog
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    /// Unique across the whole catalog
    pub course_code: String,
    #[serde(default)]
    pub course_name: String,
    /// Accepts a number or a numeric string on input, always written as a number
    #[serde(deserialize_with = "deserialize_credits")]
    pub credits: u8,
    #[serde(rename = "type", default)]
    pub course_type: CourseType,
    /// Only meaningful for electives
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default)]
    pub details: CourseDetails,
}

impl Course {
    /// Build a core course
    pub fn core(
        code: impl Into<String>,
        name: impl Into<String>,
        credits: u8,
        description: impl Into<String>,
    ) -> Self {
        Self {
            course_code: code.into(),
            course_name: name.into(),
            credits,
            course_type: CourseType::Core,
            category: None,
            details: CourseDetails::new(description),
        }
    }

    /// Build an elective course in `category`
    pub fn elective(
        code: impl Into<String>,
        name: impl Into<String>,
        credits: u8,
        category: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            course_code: code.into(),
            course_name: name.into(),
            credits,
            course_type: CourseType::Elective,
            category: Some(category.into()),
            details: CourseDetails::new(description),
        }
    }

    pub fn description(&self) -> &str {
        &self.details.description
    }

    pub fn credits_in_range(&self) -> bool {
        (MIN_CREDITS..=MAX_CREDITS).contains(&self.credits)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawCredits {
    Whole(u64),
    Fractional(f64),
    Text(String),
}

fn deserialize_credits<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    match RawCredits::deserialize(deserializer)? {
        RawCredits::Whole(n) => u8::try_from(n)
            .map_err(|_| de::Error::custom(format!("credits value {} is too large", n))),
        RawCredits::Fractional(f) => {
            if f.fract() == 0.0 && (0.0..=f64::from(u8::MAX)).contains(&f) {
                Ok(f as u8)
            } else {
                Err(de::Error::custom(format!(
                    "credits must be a whole number, got {}",
                    f
                )))
            }
        }
        RawCredits::Text(s) => s
            .trim()
            .parse::<u8>()
            .map_err(|_| de::Error::custom(format!("credits must be numeric, got {:?}", s))),
    }
}
