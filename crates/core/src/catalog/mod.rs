//! # Catalog
//!
//! The in-memory catalog: an ordered list of core courses plus an
//! insertion-ordered map of elective categories. Every course is addressed by
//! its flattened index (core courses first, then each category in order).

pub mod course;
pub mod filter;
pub mod resolver;
pub mod validate;

pub use course::{Course, CourseDetails, CourseType, MAX_CREDITS, MIN_CREDITS};
pub use filter::{CourseFilter, UnknownFilter};
pub use resolver::{IndexOutOfRange, Location};
pub use validate::{CourseFields, RawCourseInput, ValidationError, NEW_CATEGORY_SENTINEL};

use crate::error::CatalogError;
use indexmap::IndexMap;
use std::collections::HashSet;

/// Elective courses keyed by category, in category iteration order
pub type Electives = IndexMap<String, Vec<Course>>;

/// The full course catalog
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    courses: Vec<Course>,
    electives: Electives,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog from raw containers.
    ///
    /// Each course takes the type and category of the container it sits in.
    /// Fails if a credit value is out of range or a course code repeats.
    pub fn from_parts(courses: Vec<Course>, electives: Electives) -> Result<Self, CatalogError> {
        let mut catalog = Self {
            courses,
            electives,
        };
        catalog.stamp_containers();
        catalog.check_invariants()?;
        Ok(catalog)
    }

    pub fn courses(&self) -> &[Course] {
        &self.courses
    }

    pub fn electives(&self) -> &Electives {
        &self.electives
    }

    /// Category names in iteration order, including emptied ones
    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.electives.keys().map(String::as_str)
    }

    /// Total number of courses across all containers
    pub fn len(&self) -> usize {
        self.courses.len() + self.electives.values().map(Vec::len).sum::<usize>()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Every course paired with its current flattened index
    pub fn entries(&self) -> impl Iterator<Item = (usize, &Course)> {
        self.courses
            .iter()
            .chain(self.electives.values().flatten())
            .enumerate()
    }

    /// True if any course, core or elective, already uses `code`
    pub fn is_duplicate(&self, code: &str) -> bool {
        self.courses.iter().any(|c| c.course_code == code)
            || self
                .electives
                .values()
                .any(|list| list.iter().any(|c| c.course_code == code))
    }

    /// Append a course to its container, creating the category if needed.
    ///
    /// Returns the flattened index the course landed at.
    pub fn insert(&mut self, mut course: Course) -> Result<usize, CatalogError> {
        check_course(&course)?;
        if self.is_duplicate(&course.course_code) {
            return Err(CatalogError::DuplicateCourseCode(course.course_code));
        }

        match course.course_type {
            CourseType::Core => {
                course.category = None;
                self.courses.push(course);
                Ok(self.courses.len() - 1)
            }
            CourseType::Elective => {
                let category = course.category.clone().unwrap_or_default();
                if category.is_empty() {
                    return Err(ValidationError::MissingCategory.into());
                }
                let preceding = self.courses.len()
                    + self
                        .electives
                        .iter()
                        .take_while(|(name, _)| **name != category)
                        .map(|(_, list)| list.len())
                        .sum::<usize>();
                let list = self.electives.entry(category).or_default();
                list.push(course);
                Ok(preceding + list.len() - 1)
            }
        }
    }

    /// Replace the course at `index` in full.
    ///
    /// The replacement takes the type and category of the slot it is written
    /// to. Its code must not collide with any other course.
    pub fn replace(&mut self, index: usize, mut course: Course) -> Result<Course, CatalogError> {
        let location = self.resolve(index)?;
        check_course(&course)?;
        let current = self.course_at(&location);
        if current.course_code != course.course_code && self.is_duplicate(&course.course_code) {
            return Err(CatalogError::DuplicateCourseCode(course.course_code));
        }

        let slot = self.course_at_mut(&location);
        course.course_type = slot.course_type;
        course.category = slot.category.clone();
        Ok(std::mem::replace(slot, course))
    }

    /// Remove the course at `index`, shifting later courses down by one.
    ///
    /// A category emptied by the removal keeps its key.
    pub fn remove(&mut self, index: usize) -> Result<Course, IndexOutOfRange> {
        let removed = match self.resolve(index)? {
            Location::Core(position) => self.courses.remove(position),
            Location::Elective { category, position } => self
                .electives
                .get_mut(&category)
                .map(|list| list.remove(position))
                .ok_or(IndexOutOfRange {
                    index,
                    len: self.len(),
                })?,
        };
        Ok(removed)
    }

    /// Force container type/category onto every course
    fn stamp_containers(&mut self) {
        for course in &mut self.courses {
            course.course_type = CourseType::Core;
            course.category = None;
        }
        for (category, list) in &mut self.electives {
            for course in list {
                course.course_type = CourseType::Elective;
                course.category = Some(category.clone());
            }
        }
    }

    fn check_invariants(&self) -> Result<(), CatalogError> {
        let mut seen: HashSet<&str> = HashSet::new();
        for (index, course) in self.entries() {
            if course.course_code.trim().is_empty() {
                return Err(CatalogError::InvalidCatalog(format!(
                    "course at index {} has no course code",
                    index
                )));
            }
            if !seen.insert(course.course_code.as_str()) {
                return Err(CatalogError::InvalidCatalog(format!(
                    "duplicate course code {}",
                    course.course_code
                )));
            }
            if !course.credits_in_range() {
                return Err(CatalogError::InvalidCatalog(format!(
                    "course {} has {} credits (expected {}..={})",
                    course.course_code, course.credits, MIN_CREDITS, MAX_CREDITS
                )));
            }
        }
        Ok(())
    }
}

/// Per-course rules every stored course must satisfy
fn check_course(course: &Course) -> Result<(), ValidationError> {
    if course.course_code.trim().is_empty() {
        return Err(ValidationError::MissingCourseCode);
    }
    if !course.credits_in_range() {
        return Err(ValidationError::CreditsOutOfRange);
    }
    Ok(())
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// CS101 core, AI/CS401 elective
    pub(crate) fn sample_catalog() -> Catalog {
        let mut electives = Electives::new();
        electives.insert(
            "AI".to_string(),
            vec![Course::elective("CS401", "Machine Learning", 4, "AI", "Models")],
        );
        Catalog::from_parts(
            vec![Course::core("CS101", "Intro to CS", 3, "Basics")],
            electives,
        )
        .unwrap()
    }

    #[test]
    fn test_len_and_entries_order() {
        let mut catalog = sample_catalog();
        catalog
            .insert(Course::elective("CS450", "Networks", 3, "Systems", "Packets"))
            .unwrap();
        catalog
            .insert(Course::core("CS102", "Data Structures", 4, "Lists"))
            .unwrap();

        let codes: Vec<_> = catalog
            .entries()
            .map(|(i, c)| (i, c.course_code.as_str()))
            .collect();
        assert_eq!(
            codes,
            vec![(0, "CS101"), (1, "CS102"), (2, "CS401"), (3, "CS450")]
        );
        assert_eq!(catalog.len(), 4);
    }

    #[test]
    fn test_insert_returns_flattened_index() {
        let mut catalog = sample_catalog();
        let idx = catalog
            .insert(Course::elective("CS402", "Vision", 3, "AI", "Pixels"))
            .unwrap();
        assert_eq!(idx, 2);
        assert_eq!(catalog.get(idx).unwrap().course_code, "CS402");

        let idx = catalog
            .insert(Course::core("CS102", "Data Structures", 4, "Lists"))
            .unwrap();
        assert_eq!(idx, 1);
        assert_eq!(catalog.get(idx).unwrap().course_code, "CS102");
    }

    #[test]
    fn test_insert_rejects_duplicate_without_change() {
        let mut catalog = sample_catalog();
        let before = catalog.clone();
        let err = catalog
            .insert(Course::elective("CS101", "Again", 2, "AI", "Dup"))
            .unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateCourseCode(code) if code == "CS101"));
        assert_eq!(catalog, before);
    }

    #[test]
    fn test_insert_creates_new_category() {
        let mut catalog = sample_catalog();
        catalog
            .insert(Course::elective("ART1", "Drawing", 2, "Arts", "Pencils"))
            .unwrap();
        assert_eq!(catalog.categories().collect::<Vec<_>>(), vec!["AI", "Arts"]);
    }

    #[test]
    fn test_insert_rejects_out_of_range_credits() {
        let mut catalog = sample_catalog();
        for credits in [0, 5, 9] {
            let err = catalog
                .insert(Course::core("CS150", "Overloaded", credits, "Too much"))
                .unwrap_err();
            assert!(matches!(
                err,
                CatalogError::Validation(ValidationError::CreditsOutOfRange)
            ));
        }
        assert_eq!(catalog, sample_catalog());
    }

    #[test]
    fn test_insert_rejects_blank_code() {
        let mut catalog = sample_catalog();
        for code in ["", "   "] {
            let err = catalog
                .insert(Course::elective(code, "Nameless", 2, "AI", "No code"))
                .unwrap_err();
            assert!(matches!(
                err,
                CatalogError::Validation(ValidationError::MissingCourseCode)
            ));
        }
        assert_eq!(catalog, sample_catalog());
    }

    #[test]
    fn test_replace_rejects_invalid_course() {
        let mut catalog = sample_catalog();
        let err = catalog
            .replace(0, Course::core("CS101", "Intro", 7, "Basics"))
            .unwrap_err();
        assert!(matches!(
            err,
            CatalogError::Validation(ValidationError::CreditsOutOfRange)
        ));

        let err = catalog
            .replace(1, Course::core("", "Machine Learning", 4, "Models"))
            .unwrap_err();
        assert!(matches!(
            err,
            CatalogError::Validation(ValidationError::MissingCourseCode)
        ));
        assert_eq!(catalog, sample_catalog());
    }

    #[test]
    fn test_replace_keeps_slot_type_and_category() {
        let mut catalog = sample_catalog();
        let old = catalog
            .replace(1, Course::core("CS401", "Deep Learning", 4, "Layers"))
            .unwrap();
        assert_eq!(old.course_name, "Machine Learning");

        let updated = catalog.get(1).unwrap();
        assert_eq!(updated.course_name, "Deep Learning");
        assert_eq!(updated.course_type, CourseType::Elective);
        assert_eq!(updated.category.as_deref(), Some("AI"));
    }

    #[test]
    fn test_replace_rejects_code_of_other_course() {
        let mut catalog = sample_catalog();
        let err = catalog
            .replace(1, Course::core("CS101", "Clash", 4, "Clash"))
            .unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateCourseCode(_)));
        assert_eq!(catalog, sample_catalog());
    }

    #[test]
    fn test_remove_keeps_empty_category() {
        let mut catalog = sample_catalog();
        let removed = catalog.remove(1).unwrap();
        assert_eq!(removed.course_code, "CS401");
        assert_eq!(catalog.categories().collect::<Vec<_>>(), vec!["AI"]);
        assert_eq!(catalog.len(), 1);
        assert!(!catalog.is_duplicate("CS401"));
    }

    #[test]
    fn test_from_parts_rejects_bad_credits() {
        let err = Catalog::from_parts(vec![Course::core("X1", "Big", 9, "Too big")], Electives::new())
            .unwrap_err();
        assert!(matches!(err, CatalogError::InvalidCatalog(_)));
    }

    #[test]
    fn test_from_parts_stamps_container_type() {
        let mut stray = Course::core("CS499", "Robotics", 3, "Arms");
        stray.category = Some("Wrong".to_string());
        let mut electives = Electives::new();
        electives.insert("Robotics".to_string(), vec![stray]);

        let catalog = Catalog::from_parts(Vec::new(), electives).unwrap();
        let course = catalog.get(0).unwrap();
        assert_eq!(course.course_type, CourseType::Elective);
        assert_eq!(course.category.as_deref(), Some("Robotics"));
    }
}
