//! # Flattened-Index Resolver
//!
//! Translates the single linear index used by front ends into a location
//! inside the core list or a specific elective category. Indices are derived
//! from current container sizes and shift on every insert or delete.

use super::{Catalog, Course};
use thiserror::Error;

/// Where a flattened index points inside the catalog
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Location {
    /// Position in the core-course list
    Core(usize),
    /// Position inside one elective category
    Elective { category: String, position: usize },
}

/// A flattened index beyond the end of the catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("course index {index} out of range for catalog of {len} courses")]
pub struct IndexOutOfRange {
    pub index: usize,
    pub len: usize,
}

impl Catalog {
    pub fn resolve(&self, index: usize) -> Result<Location, IndexOutOfRange> {
        if index < self.courses.len() {
            return Ok(Location::Core(index));
        }

        let mut remainder = index - self.courses.len();
        for (category, list) in &self.electives {
            if remainder < list.len() {
                return Ok(Location::Elective {
                    category: category.clone(),
                    position: remainder,
                });
            }
            remainder -= list.len();
        }

        Err(IndexOutOfRange {
            index,
            len: self.len(),
        })
    }

    /// Read-only lookup, used to prefill an edit form
    pub fn get(&self, index: usize) -> Result<&Course, IndexOutOfRange> {
        let location = self.resolve(index)?;
        Ok(self.course_at(&location))
    }

    /// Current flattened index of the course with `code`
    pub fn index_of(&self, code: &str) -> Option<usize> {
        self.entries()
            .find(|(_, course)| course.course_code == code)
            .map(|(index, _)| index)
    }

    // Locations only come from `resolve` on the same, unmodified catalog.
    pub(crate) fn course_at(&self, location: &Location) -> &Course {
        match location {
            Location::Core(position) => &self.courses[*position],
            Location::Elective { category, position } => &self.electives[category][*position],
        }
    }

    pub(crate) fn course_at_mut(&mut self, location: &Location) -> &mut Course {
        match location {
            Location::Core(position) => &mut self.courses[*position],
            Location::Elective { category, position } => {
                &mut self.electives[category][*position]
            }
        }
    }
}
