//! Tiles repository for the wallboard database
//!
//! This module provides data access operations for dashboard tiles. The
//! `tiles` table and the `active_tiles` view are created by the external
//! schema script; this repository only reads and writes rows against that
//! contract.

use anyhow::{anyhow, Result};
use rusqlite::Connection;
use serde::Serialize;

/// Repository for tile data operations
pub struct TilesRepository<'a> {
    conn: &'a Connection,
}

/// A tile row from the database
///
/// One dashboard indicator record. `id` is assigned by the store on insert
/// and is immutable; `priority` is interpreted ascending-is-more-urgent.
#[derive(Debug, Clone, Serialize)]
pub struct Tile {
    pub id: i64,
    pub title: String,
    pub icon: String,
    pub tile_type: String,
    pub value: String,
    pub sub_value: String,
    pub status: String,
    pub status_text: String,
    pub additional_info: String,
    pub priority: i64,
    pub is_active: bool,
}

/// A tile to be inserted
///
/// `id` and `is_active` are left to the schema's defaults; the schema
/// defaults `is_active` to true so a fresh insert appears in `active_tiles`.
#[derive(Debug, Clone)]
pub struct NewTile {
    pub title: String,
    pub icon: String,
    pub tile_type: String,
    pub value: String,
    pub sub_value: String,
    pub status: String,
    pub status_text: String,
    pub additional_info: String,
    pub priority: i64,
}

/// Concise tile listing used by the post-initialization sanity echo
#[derive(Debug, Clone, Serialize)]
pub struct TileSummary {
    pub title: String,
    pub status: String,
    pub tile_type: String,
}

impl<'a> TilesRepository<'a> {
    /// Create a new tiles repository
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Count tiles currently marked active
    pub fn active_count(&self) -> Result<u64> {
        let count: u64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM tiles WHERE is_active = 1", [], |row| {
                row.get(0)
            })
            .map_err(|e| anyhow!("Failed to count active tiles: {}", e))?;
        Ok(count)
    }

    /// Insert a tile, returning the number of rows inserted
    pub fn insert(&self, tile: &NewTile) -> Result<usize> {
        self.conn
            .execute(
                "INSERT INTO tiles
                 (title, icon, tile_type, value, sub_value, status, status_text, additional_info, priority)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
                rusqlite::params![
                    tile.title,
                    tile.icon,
                    tile.tile_type,
                    tile.value,
                    tile.sub_value,
                    tile.status,
                    tile.status_text,
                    tile.additional_info,
                    tile.priority,
                ],
            )
            .map_err(|e| anyhow!("Failed to insert tile: {}", e))
    }

    /// Fetch up to `limit` rows from the `active_tiles` view
    ///
    /// The view filters on `is_active` and orders by `priority` ascending,
    /// so the first row is the most urgent active tile.
    pub fn active_tiles(&self, limit: u32) -> Result<Vec<Tile>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, title, icon, tile_type, value, sub_value,
                    status, status_text, additional_info, priority, is_active
             FROM active_tiles
             LIMIT ?1",
        )?;

        let rows = stmt
            .query_map([limit], |row| {
                Ok(Tile {
                    id: row.get(0)?,
                    title: row.get(1)?,
                    icon: row.get(2)?,
                    tile_type: row.get(3)?,
                    value: row.get(4)?,
                    sub_value: row.get(5)?,
                    status: row.get(6)?,
                    status_text: row.get(7)?,
                    additional_info: row.get(8)?,
                    priority: row.get(9)?,
                    is_active: row.get(10)?,
                })
            })
            .map_err(|e| anyhow!("Failed to query active tiles: {}", e))?;

        Ok(rows.filter_map(|r| r.ok()).collect())
    }

    /// Fetch up to `limit` concise rows from the `active_tiles` view
    pub fn sample_tiles(&self, limit: u32) -> Result<Vec<TileSummary>> {
        let mut stmt = self.conn.prepare(
            "SELECT title, status, tile_type FROM active_tiles LIMIT ?1",
        )?;

        let rows = stmt
            .query_map([limit], |row| {
                Ok(TileSummary {
                    title: row.get(0)?,
                    status: row.get(1)?,
                    tile_type: row.get(2)?,
                })
            })
            .map_err(|e| anyhow!("Failed to query sample tiles: {}", e))?;

        Ok(rows.filter_map(|r| r.ok()).collect())
    }

    /// Delete tiles by exact title match, returning the number removed
    pub fn delete_by_title(&self, title: &str) -> Result<usize> {
        self.conn
            .execute("DELETE FROM tiles WHERE title = ?1", [title])
            .map_err(|e| anyhow!("Failed to delete tiles titled '{}': {}", title, e))
    }

    /// Count tiles by exact title match
    pub fn count_by_title(&self, title: &str) -> Result<u64> {
        let count: u64 = self
            .conn
            .query_row(
                "SELECT COUNT(*) FROM tiles WHERE title = ?1",
                [title],
                |row| row.get(0),
            )
            .map_err(|e| anyhow!("Failed to count tiles titled '{}': {}", title, e))?;
        Ok(count)
    }
}
