//! # Coursebook Core
//!
//! Business logic for the course catalog editor: the in-memory catalog,
//! flattened-index addressing, validation, filtering and persistence.
//!
//! ## Architecture
//!
//! - `catalog/` - Courses, the core/elective catalog, index resolution, filters, validation
//! - `store/` - Key-value blob store (SQLite or in-memory) and catalog snapshots
//! - `source` - Seed catalog sources (file, HTTP, static)
//! - `loader` - Snapshot-or-seed startup
//! - `repository` - The course repository: CRUD with persist and re-render
//! - `action` - Explicit action dispatch for UI front ends
//! - `render` - Renderer collaborator
//! - `config` - Store path and seed location resolution
//!
//! ## Usage
//!
//! ```rust,ignore
//! use coursebook_core::{CourseRepository, RecordingRenderer};
//! use coursebook_core::source::FileSource;
//! use coursebook_core::store::SqliteStore;
//!
//! let store = SqliteStore::open()?;
//! let seed = FileSource::new("data/catalog.json");
//! let mut repo = CourseRepository::open(store, &seed, RecordingRenderer::default()).await;
//! repo.delete(0)?;
//! ```

pub mod action;
pub mod catalog;
pub mod config;
pub mod error;
pub mod loader;
pub mod render;
pub mod repository;
pub mod source;
pub mod store;

pub use action::{Action, Outcome};
pub use catalog::{
    Catalog, Course, CourseDetails, CourseFilter, CourseType, IndexOutOfRange, Location,
    RawCourseInput, ValidationError,
};
pub use error::CatalogError;
pub use render::{NullRenderer, RecordingRenderer, RenderRow, Renderer};
pub use repository::CourseRepository;
