//! # Category-and-Type Filter
//!
//! Selects a subset of the catalog for display without touching it.

use super::{Catalog, Course, CourseType};
use std::fmt;
use thiserror::Error;

/// A filter selection from the search controls
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CourseFilter {
    /// Core courses followed by every category, in order
    #[default]
    All,
    Core,
    /// Electives of exactly this category; no category selects nothing
    Elective(Option<String>),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown filter type '{0}' (expected all, core or elective)")]
pub struct UnknownFilter(pub String);

impl CourseFilter {
    /// Build a filter from the type selector value and optional category
    pub fn from_selection(kind: &str, category: Option<&str>) -> Result<Self, UnknownFilter> {
        match kind.trim() {
            "all" => Ok(Self::All),
            "core" => Ok(Self::Core),
            "elective" => Ok(Self::Elective(
                category
                    .filter(|c| !c.is_empty())
                    .map(ToString::to_string),
            )),
            other => Err(UnknownFilter(other.to_string())),
        }
    }

    pub fn matches(&self, course: &Course) -> bool {
        match self {
            Self::All => true,
            Self::Core => course.course_type == CourseType::Core,
            Self::Elective(Some(category)) => {
                course.course_type == CourseType::Elective
                    && course.category.as_deref() == Some(category.as_str())
            }
            Self::Elective(None) => false,
        }
    }
}

impl fmt::Display for CourseFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => write!(f, "all"),
            Self::Core => write!(f, "core"),
            Self::Elective(Some(category)) => write!(f, "elective/{}", category),
            Self::Elective(None) => write!(f, "elective"),
        }
    }
}

impl Catalog {
    /// Courses selected by `filter`, each with its real flattened index
    pub fn filter(&self, filter: &CourseFilter) -> Vec<(usize, &Course)> {
        self.entries()
            .filter(|(_, course)| filter.matches(course))
            .collect()
    }
}
