//! # Renderer
//!
//! The repository hands every frame (full catalog or a filtered subset) to a
//! renderer. Each row carries the course's current flattened index so edit
//! and delete actions can address it.

use crate::catalog::{Course, CourseType};
use serde::Serialize;

/// One displayed course
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderRow {
    pub index: usize,
    pub course_code: String,
    pub course_name: String,
    pub credits: u8,
    pub course_type: CourseType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl RenderRow {
    pub fn new(index: usize, course: &Course) -> Self {
        Self {
            index,
            course_code: course.course_code.clone(),
            course_name: course.course_name.clone(),
            credits: course.credits,
            course_type: course.course_type,
            category: course.category.clone(),
        }
    }

    pub fn from_entries<'a>(entries: impl IntoIterator<Item = (usize, &'a Course)>) -> Vec<Self> {
        entries
            .into_iter()
            .map(|(index, course)| Self::new(index, course))
            .collect()
    }
}

pub trait Renderer {
    fn render(&mut self, rows: &[RenderRow]);
}

/// Discards every frame
#[derive(Debug, Default, Clone, Copy)]
pub struct NullRenderer;

impl Renderer for NullRenderer {
    fn render(&mut self, _rows: &[RenderRow]) {}
}

/// Keeps every frame, for tests
#[derive(Debug, Default, Clone)]
pub struct RecordingRenderer {
    pub frames: Vec<Vec<RenderRow>>,
}

impl RecordingRenderer {
    pub fn last_frame(&self) -> Option<&[RenderRow]> {
        self.frames.last().map(Vec::as_slice)
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }
}

impl Renderer for RecordingRenderer {
    fn render(&mut self, rows: &[RenderRow]) {
        self.frames.push(rows.to_vec());
    }
}

impl<R: Renderer + ?Sized> Renderer for &mut R {
    fn render(&mut self, rows: &[RenderRow]) {
        (**self).render(rows);
    }
}

impl<R: Renderer + ?Sized> Renderer for Box<R> {
    fn render(&mut self, rows: &[RenderRow]) {
        (**self).render(rows);
    }
}
