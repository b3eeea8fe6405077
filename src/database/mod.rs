//! Database module
//!
//! SQLite plumbing for the wallboard database, organized into:
//!
//! - **connection**: `DatabaseConn` wrapper (open, pragmas, batch execution)
//! - **tiles**: the `Tile` record type and `TilesRepository` queries
//!
//! The schema itself (the `tiles` table, the `active_tiles` view, seed rows)
//! is owned by the external schema script; this module only assumes the
//! column/view contract and never defines its own DDL.

pub mod connection;
pub mod tiles;

pub use connection::DatabaseConn;
pub use tiles::{NewTile, Tile, TileSummary, TilesRepository};
