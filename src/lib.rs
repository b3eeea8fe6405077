#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

//! Wallboard database bootstrap utility
//!
//! This crate prepares the SQLite database backing the wallboard dashboard.
//! It performs two sequential steps:
//!
//! 1. **[`SchemaInitializer`]** applies an external SQL schema script (tables,
//!    the `active_tiles` view, seed rows) to the target database file as a
//!    single committed batch.
//! 2. **[`SmokeTester`]** inserts one sample tile, reads it back through the
//!    `active_tiles` view, and deletes it again, confirming the schema is
//!    queryable as designed. The cleanup delete runs on every exit path, so a
//!    failed run leaves no test residue behind.
//!
//! The schema script is treated as an opaque input: only the `tiles` table
//! columns and the `active_tiles` view (filtered on `is_active`, ordered by
//! `priority` ascending) are assumed.
//!
//! # Architecture
//!
//! ```text
//! src/
//! ├── config       # WallboardConfig: script + database paths (TOML/env/flags)
//! ├── database/    # SQLite plumbing
//! │   ├── connection   # DatabaseConn wrapper (pragmas, batch execution)
//! │   └── tiles        # Tile record type and TilesRepository queries
//! ├── error        # SetupError taxonomy and RunOutcome exit codes
//! ├── initializer  # SchemaInitializer: apply the schema script atomically
//! └── smoke        # SmokeTester: insert/read/delete round trip
//! ```
//!
//! # Quick start
//!
//! ```rust,ignore
//! use wallboard_db::{SchemaInitializer, SmokeTester, WallboardConfig};
//!
//! let config = WallboardConfig::new(&None)?;
//! let report = SchemaInitializer::new(&config).run()?;
//! println!("{} active tiles", report.active_count);
//!
//! let smoke = SmokeTester::new(&config).run()?;
//! println!("top tile: {} ({})", smoke.top_title, smoke.top_status);
//! ```

pub mod config;
pub mod database;
pub mod error;
pub mod initializer;
pub mod smoke;

pub use config::WallboardConfig;
pub use database::{DatabaseConn, NewTile, Tile, TileSummary, TilesRepository};
pub use error::{RunOutcome, SetupError};
pub use initializer::{InitReport, SchemaInitializer};
pub use smoke::{SmokeReport, SmokeTester, TEST_TILE_TITLE};
