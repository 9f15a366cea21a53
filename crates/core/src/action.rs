//! # Action Dispatch
//!
//! Front ends describe what the user asked for as an [`Action`] and get an
//! [`Outcome`] or a [`CatalogError`] back, independent of how they render.

use crate::catalog::{Course, CourseFilter, RawCourseInput};
use crate::error::CatalogError;
use crate::render::Renderer;
use crate::repository::CourseRepository;
use crate::store::KeyValueStore;

/// A user action against the catalog
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Submit the add-course form
    Add(RawCourseInput),
    /// Submit the edit form for the course at `index`
    Edit { index: usize, input: RawCourseInput },
    Delete(usize),
    /// Fetch a course to prefill the edit form
    Get(usize),
    Filter(CourseFilter),
    List,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Added { index: usize, code: String },
    Updated { index: usize },
    Deleted { course: Course },
    Found { index: usize, course: Course },
    Shown { rows: usize },
}

impl Outcome {
    /// Confirmation shown to the user after a mutation
    pub fn message(&self) -> Option<&'static str> {
        match self {
            Self::Added { .. } => Some("Course added successfully."),
            Self::Updated { .. } => Some("Course updated successfully."),
            Self::Deleted { .. } => Some("Course deleted successfully."),
            Self::Found { .. } | Self::Shown { .. } => None,
        }
    }
}

impl<S: KeyValueStore, R: Renderer> CourseRepository<S, R> {
    pub fn dispatch(&mut self, action: Action) -> Result<Outcome, CatalogError> {
        let result = self.apply(action);
        match &result {
            Err(e @ CatalogError::IndexOutOfRange(_)) => {
                tracing::error!(error = %e, "Action addressed a stale course index");
            }
            Err(e) if e.is_user_facing() => {
                tracing::debug!(error = %e, "Action rejected");
            }
            _ => {}
        }
        result
    }

    fn apply(&mut self, action: Action) -> Result<Outcome, CatalogError> {
        match action {
            Action::Add(input) => {
                let course = input.into_course()?;
                let code = course.course_code.clone();
                let index = self.add(course)?;
                Ok(Outcome::Added { index, code })
            }
            Action::Edit { index, input } => {
                let fields = input.validate()?;
                let current = self.get(index)?;
                // The form only edits these four fields; other details ride along.
                let mut details = current.details.clone();
                details.description = fields.description;
                let course = Course {
                    course_code: fields.course_code,
                    course_name: fields.course_name,
                    credits: fields.credits,
                    course_type: current.course_type,
                    category: current.category.clone(),
                    details,
                };
                self.update(index, course)?;
                Ok(Outcome::Updated { index })
            }
            Action::Delete(index) => {
                let course = self.delete(index)?;
                Ok(Outcome::Deleted { course })
            }
            Action::Get(index) => {
                let course = self.get(index)?.clone();
                Ok(Outcome::Found { index, course })
            }
            Action::Filter(filter) => Ok(Outcome::Shown {
                rows: self.filter(&filter),
            }),
            Action::List => Ok(Outcome::Shown {
                rows: self.render_all(),
            }),
        }
    }
}
