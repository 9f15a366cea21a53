//! # Field Validation
//!
//! Raw form input stays a bag of strings until it passes validation. Only
//! then is it turned into a typed [`Course`].

use super::course::{Course, CourseDetails, CourseType, MAX_CREDITS, MIN_CREDITS};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Category selector value meaning "use the new-category field"
pub const NEW_CATEGORY_SENTINEL: &str = "other";

/// Why a form submission was rejected. Display strings are user-facing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please enter Course Code")]
    MissingCourseCode,
    #[error("Please enter Course Name")]
    MissingCourseName,
    #[error("Please enter Course Credits")]
    MissingCredits,
    #[error("Course credits must be a whole number")]
    InvalidCredits,
    #[error("Course credits must be between {} and {}", MIN_CREDITS, MAX_CREDITS)]
    CreditsOutOfRange,
    #[error("Please enter Description")]
    MissingDescription,
    #[error("Please select a course type (core or elective)")]
    InvalidCourseType,
    #[error("Please select a category")]
    MissingCategory,
    #[error("Please enter a new category name.")]
    MissingNewCategory,
}

/// Unvalidated form fields, all plain strings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawCourseInput {
    pub course_code: String,
    pub course_name: String,
    pub credits: String,
    pub description: String,
    #[serde(rename = "type")]
    pub course_type: String,
    pub category: String,
    pub new_category: String,
}

/// The four validated fields shared by add and edit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseFields {
    pub course_code: String,
    pub course_name: String,
    pub credits: u8,
    pub description: String,
}

impl RawCourseInput {
    /// Prefill form fields from an existing course
    pub fn from_course(course: &Course) -> Self {
        Self {
            course_code: course.course_code.clone(),
            course_name: course.course_name.clone(),
            credits: course.credits.to_string(),
            description: course.details.description.clone(),
            course_type: course.course_type.as_str().to_string(),
            category: course.category.clone().unwrap_or_default(),
            new_category: String::new(),
        }
    }

    /// Check code, name, credits and description, in that order.
    ///
    /// The first failing check is the one reported.
    pub fn validate(&self) -> Result<CourseFields, ValidationError> {
        let course_code = self.course_code.trim();
        if course_code.is_empty() {
            return Err(ValidationError::MissingCourseCode);
        }
        let course_name = self.course_name.trim();
        if course_name.is_empty() {
            return Err(ValidationError::MissingCourseName);
        }
        let credits = parse_credits(&self.credits)?;
        let description = self.description.trim();
        if description.is_empty() {
            return Err(ValidationError::MissingDescription);
        }

        Ok(CourseFields {
            course_code: course_code.to_string(),
            course_name: course_name.to_string(),
            credits,
            description: description.to_string(),
        })
    }

    /// Validate every field and resolve type and category into a [`Course`]
    pub fn into_course(self) -> Result<Course, ValidationError> {
        let fields = self.validate()?;
        let course_type =
            CourseType::parse(&self.course_type).ok_or(ValidationError::InvalidCourseType)?;

        let category = match course_type {
            CourseType::Core => None,
            CourseType::Elective => Some(self.resolve_category()?),
        };

        Ok(Course {
            course_code: fields.course_code,
            course_name: fields.course_name,
            credits: fields.credits,
            course_type,
            category,
            details: CourseDetails::new(fields.description),
        })
    }

    fn resolve_category(&self) -> Result<String, ValidationError> {
        let selected = self.category.trim();
        if selected == NEW_CATEGORY_SENTINEL {
            let name = self.new_category.trim();
            if name.is_empty() {
                return Err(ValidationError::MissingNewCategory);
            }
            return Ok(name.to_string());
        }
        if selected.is_empty() {
            return Err(ValidationError::MissingCategory);
        }
        Ok(selected.to_string())
    }
}

/// Parse the raw credits text numerically and bound-check it
pub fn parse_credits(raw: &str) -> Result<u8, ValidationError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(ValidationError::MissingCredits);
    }
    let value: f64 = raw.parse().map_err(|_| ValidationError::InvalidCredits)?;
    if !value.is_finite() {
        return Err(ValidationError::InvalidCredits);
    }
    if value < f64::from(MIN_CREDITS) || value > f64::from(MAX_CREDITS) {
        return Err(ValidationError::CreditsOutOfRange);
    }
    if value.fract() != 0.0 {
        return Err(ValidationError::InvalidCredits);
    }
    Ok(value as u8)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(code: &str, name: &str, credits: &str, description: &str) -> RawCourseInput {
        RawCourseInput {
            course_code: code.to_string(),
            course_name: name.to_string(),
            credits: credits.to_string(),
            description: description.to_string(),
            course_type: "core".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_credits_out_of_range() {
        assert_eq!(
            input("X", "Y", "5", "Z").validate().unwrap_err(),
            ValidationError::CreditsOutOfRange
        );
        assert_eq!(
            input("X", "Y", "0", "Z").validate().unwrap_err(),
            ValidationError::CreditsOutOfRange
        );
    }

    #[test]
    fn test_credits_compared_numerically() {
        // "10" sorts before "4" as text but is out of range as a number
        assert_eq!(
            parse_credits("10").unwrap_err(),
            ValidationError::CreditsOutOfRange
        );
        assert_eq!(parse_credits(" 4 ").unwrap(), 4);
        assert_eq!(parse_credits("1").unwrap(), 1);
        assert_eq!(parse_credits("2.5").unwrap_err(), ValidationError::InvalidCredits);
        assert_eq!(parse_credits("abc").unwrap_err(), ValidationError::InvalidCredits);
        assert_eq!(parse_credits("NaN").unwrap_err(), ValidationError::InvalidCredits);
    }

    #[test]
    fn test_first_failing_check_wins() {
        assert_eq!(
            input("", "", "", "").validate().unwrap_err(),
            ValidationError::MissingCourseCode
        );
        assert_eq!(
            input("X", "", "9", "").validate().unwrap_err(),
            ValidationError::MissingCourseName
        );
        assert_eq!(
            input("X", "Y", "", "").validate().unwrap_err(),
            ValidationError::MissingCredits
        );
        assert_eq!(
            input("X", "Y", "3", "").validate().unwrap_err(),
            ValidationError::MissingDescription
        );
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            ValidationError::CreditsOutOfRange.to_string(),
            "Course credits must be between 1 and 4"
        );
        assert_eq!(
            ValidationError::MissingCourseCode.to_string(),
            "Please enter Course Code"
        );
    }

    #[test]
    fn test_into_course_core_drops_category() {
        let mut raw = input("CS101", "Intro", "3", "Basics");
        raw.category = "AI".to_string();
        let course = raw.into_course().unwrap();
        assert_eq!(course.course_type, CourseType::Core);
        assert_eq!(course.category, None);
        assert_eq!(course.credits, 3);
    }

    #[test]
    fn test_into_course_new_category() {
        let mut raw = input("ART1", "Drawing", "2", "Pencils");
        raw.course_type = "elective".to_string();
        raw.category = NEW_CATEGORY_SENTINEL.to_string();
        raw.new_category = "  Arts ".to_string();
        let course = raw.clone().into_course().unwrap();
        assert_eq!(course.category.as_deref(), Some("Arts"));

        raw.new_category = "   ".to_string();
        assert_eq!(
            raw.into_course().unwrap_err(),
            ValidationError::MissingNewCategory
        );
    }

    #[test]
    fn test_into_course_requires_type_and_category() {
        let mut raw = input("CS9", "Thing", "2", "Stuff");
        raw.course_type = String::new();
        assert_eq!(
            raw.clone().into_course().unwrap_err(),
            ValidationError::InvalidCourseType
        );

        raw.course_type = "elective".to_string();
        assert_eq!(raw.into_course().unwrap_err(), ValidationError::MissingCategory);
    }

    #[test]
    fn test_prefill_round_trip() {
        let course = Course::elective("CS401", "Machine Learning", 4, "AI", "Models");
        let raw = RawCourseInput::from_course(&course);
        assert_eq!(raw.credits, "4");
        assert_eq!(raw.into_course().unwrap(), course);
    }
}
