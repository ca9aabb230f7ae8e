//! The active data backend, fixed for the process lifetime.

use crate::config::ServeMode;
use crate::persistence::Database;
use crate::static_cache::StaticDatasets;

/// Where dataset requests are answered from.
pub enum Backend {
    /// Live PostGIS queries with bounding-box filtering.
    Database(Database),
    /// Pre-loaded files; bounding boxes are accepted and ignored.
    StaticFiles(StaticDatasets),
}

/// Application state shared by all handlers. Read-only after startup.
pub struct AppState {
    backend: Backend,
}

impl AppState {
    pub fn with_database(db: Database) -> Self {
        Self {
            backend: Backend::Database(db),
        }
    }

    pub fn with_static_files(datasets: StaticDatasets) -> Self {
        Self {
            backend: Backend::StaticFiles(datasets),
        }
    }

    pub fn backend(&self) -> &Backend {
        &self.backend
    }

    pub fn mode(&self) -> ServeMode {
        match self.backend {
            Backend::Database(_) => ServeMode::Database,
            Backend::StaticFiles(_) => ServeMode::StaticFiles,
        }
    }
}
