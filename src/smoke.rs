//! Smoke test
//!
//! Exercises the minimal write/read/delete path against the initialized
//! database: insert one sample tile, read it back through the `active_tiles`
//! view, then delete it by title. The cleanup delete runs on every exit
//! path, so a run that fails midway still leaves no test residue.

use crate::config::WallboardConfig;
use crate::database::{DatabaseConn, NewTile, TilesRepository};
use crate::error::SetupError;
use anyhow::{anyhow, Result};
use serde::Serialize;
use tracing::{info, warn};

/// Title of the transient tile the smoke test inserts and removes
pub const TEST_TILE_TITLE: &str = "Test Alert";

/// Rows fetched from `active_tiles` during the smoke test
const FETCH_LIMIT: u32 = 3;

/// Result of a successful smoke test run
#[derive(Debug, Clone, Serialize)]
pub struct SmokeReport {
    /// Number of active tiles retrieved (at most 3)
    pub retrieved: usize,

    /// Title of the first (highest-priority) active tile
    pub top_title: String,

    /// Status of the first active tile
    pub top_status: String,
}

/// Runs the insert/read/delete round trip
pub struct SmokeTester<'a> {
    config: &'a WallboardConfig,
}

impl<'a> SmokeTester<'a> {
    pub fn new(config: &'a WallboardConfig) -> Self {
        Self { config }
    }

    /// Fixed sample tile inserted by the smoke test
    fn test_tile() -> NewTile {
        NewTile {
            title: TEST_TILE_TITLE.to_string(),
            icon: "!".to_string(),
            tile_type: "standard".to_string(),
            value: "5".to_string(),
            sub_value: "New critical issues".to_string(),
            status: "error".to_string(),
            status_text: "Immediate Action".to_string(),
            additional_info: "Server Room: 3 | Network: 2".to_string(),
            priority: 1,
        }
    }

    /// Run the smoke test against the configured database
    ///
    /// Precondition: the database has been initialized by
    /// [`crate::SchemaInitializer`] (or a previous run). On return the
    /// database contains no tile titled [`TEST_TILE_TITLE`], whether the
    /// steps succeeded or not.
    pub fn run(&self) -> Result<SmokeReport, SetupError> {
        let db = DatabaseConn::open_path(&self.config.db_path.to_string_lossy())
            .map_err(SetupError::Unexpected)?;
        let repo = TilesRepository::new(&db.conn);

        let steps = Self::exercise(&repo);

        // Cleanup runs regardless of how the steps above went. If they
        // failed, their error wins and the cleanup result is only logged.
        let cleanup = repo.delete_by_title(TEST_TILE_TITLE);

        match (steps, cleanup) {
            (Ok(report), Ok(removed)) => {
                info!(removed, "test tile cleaned up");
                Ok(report)
            }
            (Ok(_), Err(e)) => Err(SetupError::TestOperation(format!(
                "cleanup delete failed: {e}"
            ))),
            (Err(e), cleanup) => {
                if let Err(ce) = cleanup {
                    warn!("cleanup after failed smoke test also failed: {ce}");
                }
                Err(SetupError::TestOperation(e.to_string()))
            }
        }
    }

    fn exercise(repo: &TilesRepository<'_>) -> Result<SmokeReport> {
        let inserted = repo.insert(&Self::test_tile())?;
        info!(inserted, "test tile added");

        let tiles = repo.active_tiles(FETCH_LIMIT)?;
        let top = tiles
            .first()
            .ok_or_else(|| anyhow!("active_tiles returned no rows"))?;

        Ok(SmokeReport {
            retrieved: tiles.len(),
            top_title: top.title.clone(),
            top_status: top.status.clone(),
        })
    }
}
