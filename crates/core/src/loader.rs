//! # Catalog Loader
//!
//! Builds the session's initial catalog from the persisted snapshot, or from
//! the seed source on first run. Loading never fails: a broken seed leaves
//! the catalog empty and the session carries on. A stored snapshot that no
//! longer loads is copied to the rejected keys before anything overwrites it.

use crate::catalog::Catalog;
use crate::source::CatalogSource;
use crate::store::{persist, KeyValueStore, Snapshot, REJECTED_COURSES_KEY};

/// Where the initial catalog came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOrigin {
    /// A previously persisted snapshot
    Snapshot,
    /// A freshly fetched seed document, persisted unless a rejected
    /// snapshot could not be set aside
    Seed,
    /// Nothing usable; the catalog starts empty
    Empty,
}

#[derive(Debug)]
pub struct Loaded {
    pub catalog: Catalog,
    pub origin: LoadOrigin,
}

impl Loaded {
    fn empty() -> Self {
        Self {
            catalog: Catalog::new(),
            origin: LoadOrigin::Empty,
        }
    }
}

/// Use `snapshot` if it parses, otherwise fetch and persist the seed
pub async fn load<S: KeyValueStore + ?Sized>(
    snapshot: Option<Snapshot>,
    seed: &dyn CatalogSource,
    store: &S,
) -> Loaded {
    let mut may_persist = true;
    if let Some(snapshot) = snapshot {
        match snapshot.parse() {
            Ok(catalog) => {
                tracing::info!(courses = catalog.len(), "Catalog loaded from store");
                return Loaded {
                    catalog,
                    origin: LoadOrigin::Snapshot,
                };
            }
            Err(e) => {
                tracing::warn!(error = %e, "Stored catalog unreadable, falling back to seed");
                match snapshot.set_aside(store) {
                    Ok(()) => tracing::warn!(
                        key = REJECTED_COURSES_KEY,
                        "Unreadable catalog moved aside"
                    ),
                    Err(e) => {
                        tracing::error!(
                            error = %format!("{:#}", e),
                            "Stored catalog left in place; seed will not be persisted"
                        );
                        may_persist = false;
                    }
                }
            }
        }
    }

    let document = match seed.fetch().await {
        Ok(document) => document,
        Err(e) => {
            tracing::error!(source = %seed.describe(), error = %e, "Error fetching courses");
            return Loaded::empty();
        }
    };

    let catalog = match Catalog::from_parts(document.courses, document.electives) {
        Ok(catalog) => catalog,
        Err(e) => {
            tracing::error!(source = %seed.describe(), error = %e, "Seed catalog rejected");
            return Loaded::empty();
        }
    };

    if may_persist {
        if let Err(e) = persist(store, &catalog) {
            tracing::error!(error = %format!("{:#}", e), "Failed to persist seed catalog");
        }
    }

    tracing::info!(
        source = %seed.describe(),
        courses = catalog.len(),
        "Catalog seeded"
    );
    Loaded {
        catalog,
        origin: LoadOrigin::Seed,
    }
}

/// Read the snapshot from `store`, then [`load`]
pub async fn load_from_store<S: KeyValueStore + ?Sized>(
    store: &S,
    seed: &dyn CatalogSource,
) -> Loaded {
    let snapshot = Snapshot::read(store).unwrap_or_else(|e| {
        tracing::warn!(error = %format!("{:#}", e), "Could not read stored catalog");
        None
    });
    load(snapshot, seed, store).await
}
