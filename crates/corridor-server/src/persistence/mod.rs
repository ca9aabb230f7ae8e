//! PostGIS access for the database-backed mode.
//!
//! Every dataset request checks a connection out of a lazily-connected pool
//! and returns it on completion, so startup never waits on the database.

pub mod db;
pub mod features;

pub use db::{connect_lazy, Database};
pub use features::{build_query, fetch_features};
