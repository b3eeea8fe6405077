use anyhow::{anyhow, Result};
use config::Config;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Default schema script file name, resolved against the working directory
pub const DEFAULT_SCHEMA_FILE: &str = "setup_database.sql";

/// Default database file name, resolved against the working directory
pub const DEFAULT_DB_FILE: &str = "wallboard.db";

/// Configuration for the bootstrap procedures
///
/// Both paths are explicit inputs. They are never derived from the location
/// of the executable; precedence is CLI flags, then `WALLBOARD_*` environment
/// variables, then the TOML config file, then the working-directory defaults.
#[derive(Debug, Clone)]
pub struct WallboardConfig {
    /// Path to the SQL schema script to apply
    pub schema_path: PathBuf,

    /// Path to the SQLite database file (created if absent)
    pub db_path: PathBuf,
}

const EMPTY_CONFIG: &str = r#"### wallboard-db configuration file

### path to the SQL schema script
# schema_path = "setup_database.sql"

### path to the SQLite database file
# db_path = "wallboard.db"
"#;

impl Default for WallboardConfig {
    fn default() -> Self {
        Self {
            schema_path: PathBuf::from(DEFAULT_SCHEMA_FILE),
            db_path: PathBuf::from(DEFAULT_DB_FILE),
        }
    }
}

impl WallboardConfig {
    /// Create and initialize a new configuration
    ///
    /// When `path` is given, the TOML file at that path is loaded; if it does
    /// not exist yet, a commented template is written there instead. When
    /// `path` is `None`, `wallboard.toml` in the working directory is loaded
    /// if present. Environment variables prefixed with `WALLBOARD` override
    /// file values, e.g. `WALLBOARD_DB_PATH=/tmp/wallboard.db`.
    pub fn new(path: &Option<String>) -> Result<WallboardConfig> {
        let mut builder = Config::builder();

        match path {
            Some(p) => {
                let file = Path::new(p.as_str());
                if file.exists() {
                    builder = builder.add_source(config::File::with_name(p.as_str()));
                } else {
                    std::fs::write(p.as_str(), EMPTY_CONFIG)
                        .map_err(|e| anyhow!("Unable to create config file {}: {}", p, e))?;
                }
            }
            None => {
                if Path::new("wallboard.toml").exists() {
                    builder = builder.add_source(config::File::with_name("wallboard.toml"));
                }
            }
        }

        // E.g., `WALLBOARD_SCHEMA_PATH=./dev/setup_database.sql wallboard-db`
        builder = builder.add_source(config::Environment::with_prefix("WALLBOARD"));

        let settings = builder
            .build()
            .map_err(|e| anyhow!("Failed to build configuration: {}", e))?;

        let values = settings
            .try_deserialize::<HashMap<String, String>>()
            .map_err(|e| anyhow!("Failed to deserialize configuration: {}", e))?;

        let schema_path = values
            .get("schema_path")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SCHEMA_FILE));

        let db_path = values
            .get("db_path")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DB_FILE));

        Ok(WallboardConfig {
            schema_path,
            db_path,
        })
    }

    /// Apply command-line overrides on top of the loaded configuration
    pub fn with_overrides(
        mut self,
        schema_path: Option<PathBuf>,
        db_path: Option<PathBuf>,
    ) -> Self {
        if let Some(p) = schema_path {
            self.schema_path = p;
        }
        if let Some(p) = db_path {
            self.db_path = p;
        }
        self
    }

    /// Display configuration summary
    pub fn summary(&self) -> String {
        let lines = [
            format!("Schema script:   {}", self.schema_path.display()),
            format!("Database file:   {}", self.db_path.display()),
        ];
        lines.join("\n")
    }
}
