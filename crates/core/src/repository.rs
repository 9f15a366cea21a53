//! # Course Repository
//!
//! Owns the session's catalog together with its store and renderer. Every
//! successful mutation persists the new snapshot and re-renders the full
//! course list; every rejected one leaves all three untouched.

use crate::catalog::{Catalog, Course, CourseFilter, IndexOutOfRange};
use crate::error::CatalogError;
use crate::loader::{load_from_store, LoadOrigin};
use crate::render::{RenderRow, Renderer};
use crate::source::CatalogSource;
use crate::store::{persist, KeyValueStore};

pub struct CourseRepository<S, R> {
    catalog: Catalog,
    store: S,
    renderer: R,
}

impl<S: KeyValueStore, R: Renderer> CourseRepository<S, R> {
    /// Wrap an already-loaded catalog. Nothing is rendered or persisted.
    pub fn new(catalog: Catalog, store: S, renderer: R) -> Self {
        Self {
            catalog,
            store,
            renderer,
        }
    }

    /// Load from the store (or the seed on first run) and render the result.
    ///
    /// A failed seed fetch yields an empty repository and no initial frame.
    pub async fn open(store: S, seed: &dyn CatalogSource, renderer: R) -> Self {
        let loaded = load_from_store(&store, seed).await;
        let mut repo = Self::new(loaded.catalog, store, renderer);
        if loaded.origin != LoadOrigin::Empty {
            repo.render_all();
        }
        repo
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    /// Every course with its flattened index
    pub fn list(&self) -> Vec<(usize, &Course)> {
        self.catalog.entries().collect()
    }

    pub fn get(&self, index: usize) -> Result<&Course, IndexOutOfRange> {
        self.catalog.get(index)
    }

    pub fn is_duplicate(&self, code: &str) -> bool {
        self.catalog.is_duplicate(code)
    }

    /// Add a course; returns the flattened index it landed at
    pub fn add(&mut self, course: Course) -> Result<usize, CatalogError> {
        let code = course.course_code.clone();
        let index = self.catalog.insert(course)?;
        tracing::info!(code = %code, index, "Course added");
        self.commit()?;
        Ok(index)
    }

    /// Replace the course at `index` in full
    pub fn update(&mut self, index: usize, course: Course) -> Result<(), CatalogError> {
        let previous = self.catalog.replace(index, course)?;
        tracing::info!(code = %previous.course_code, index, "Course updated");
        self.commit()
    }

    /// Remove the course at `index`; later indices shift down by one
    pub fn delete(&mut self, index: usize) -> Result<Course, CatalogError> {
        let removed = self.catalog.remove(index)?;
        tracing::info!(code = %removed.course_code, index, "Course deleted");
        self.commit()?;
        Ok(removed)
    }

    /// Render the subset selected by `filter`; returns how many rows were shown
    pub fn filter(&mut self, filter: &CourseFilter) -> usize {
        let rows = RenderRow::from_entries(self.catalog.filter(filter));
        tracing::debug!(filter = %filter, rows = rows.len(), "Filter applied");
        self.renderer.render(&rows);
        rows.len()
    }

    /// Render the full catalog
    pub fn render_all(&mut self) -> usize {
        let rows = RenderRow::from_entries(self.catalog.entries());
        self.renderer.render(&rows);
        rows.len()
    }

    /// Persist then re-render after a mutation.
    ///
    /// A store failure does not undo the in-memory change; it is logged and
    /// returned so the caller can report it.
    fn commit(&mut self) -> Result<(), CatalogError> {
        let persisted = persist(&self.store, &self.catalog);
        self.render_all();
        persisted.map_err(|e| {
            tracing::error!(error = %format!("{:#}", e), "Catalog not persisted");
            CatalogError::Persist(e)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::tests::sample_catalog;
    use crate::render::RecordingRenderer;
    use crate::store::{MemoryStore, Snapshot};

    fn repo() -> CourseRepository<MemoryStore, RecordingRenderer> {
        CourseRepository::new(
            sample_catalog(),
            MemoryStore::new(),
            RecordingRenderer::default(),
        )
    }

    fn stored(repo: &CourseRepository<MemoryStore, RecordingRenderer>) -> Catalog {
        Snapshot::read(repo.store())
            .unwrap()
            .expect("snapshot present")
            .parse()
            .unwrap()
    }

    #[test]
    fn test_add_persists_and_renders() {
        let mut repo = repo();
        let course = Course::elective("CS402", "Vision", 3, "AI", "Pixels");
        let index = repo.add(course.clone()).unwrap();

        assert_eq!(repo.get(index).unwrap(), &course);
        assert_eq!(stored(&repo), *repo.catalog());
        let frame = repo.renderer().last_frame().unwrap();
        assert_eq!(frame.len(), 3);
        assert_eq!(frame[index].course_code, "CS402");
    }

    #[test]
    fn test_duplicate_add_touches_nothing() {
        let mut repo = repo();
        let err = repo
            .add(Course::core("CS101", "Again", 3, "Dup"))
            .unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateCourseCode(_)));
        assert_eq!(*repo.catalog(), sample_catalog());
        assert!(repo.store().is_empty());
        assert_eq!(repo.renderer().frame_count(), 0);
    }

    #[test]
    fn test_update_replaces_in_place() {
        let mut repo = repo();
        repo.update(0, Course::core("CS101", "Intro to Computing", 4, "New"))
            .unwrap();
        let course = repo.get(0).unwrap();
        assert_eq!(course.course_name, "Intro to Computing");
        assert_eq!(course.credits, 4);
        assert_eq!(stored(&repo), *repo.catalog());
    }

    #[test]
    fn test_update_out_of_range() {
        let mut repo = repo();
        let err = repo
            .update(7, Course::core("CS999", "Ghost", 1, "Boo"))
            .unwrap_err();
        assert!(matches!(
            err,
            CatalogError::IndexOutOfRange(IndexOutOfRange { index: 7, len: 2 })
        ));
        assert!(repo.store().is_empty());
    }

    #[test]
    fn test_delete_shifts_indices() {
        let mut repo = repo();
        let removed = repo.delete(0).unwrap();
        assert_eq!(removed.course_code, "CS101");
        assert_eq!(repo.get(0).unwrap().course_code, "CS401");
        assert!(!repo.is_duplicate("CS101"));

        let indices: Vec<usize> = repo.list().into_iter().map(|(i, _)| i).collect();
        assert_eq!(indices, vec![0]);
    }

    #[test]
    fn test_filter_renders_subset_only() {
        let mut repo = repo();
        let shown = repo.filter(&CourseFilter::Elective(Some("AI".to_string())));
        assert_eq!(shown, 1);
        let frame = repo.renderer().last_frame().unwrap();
        assert_eq!(frame[0].index, 1);
        assert!(repo.store().is_empty());
    }

    #[test]
    fn test_persist_failure_is_reported_not_rolled_back() {
        let mut repo = CourseRepository::new(
            sample_catalog(),
            MemoryStore::read_only(),
            RecordingRenderer::default(),
        );
        let err = repo
            .add(Course::core("CS102", "Data Structures", 4, "Lists"))
            .unwrap_err();
        assert!(matches!(err, CatalogError::Persist(_)));
        assert!(repo.is_duplicate("CS102"));
        assert_eq!(repo.renderer().frame_count(), 1);
    }
}
