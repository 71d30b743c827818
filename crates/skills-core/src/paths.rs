//! Centralized path utilities

use std::path::PathBuf;

const CONFIG_DIR_NAME: &str = ".skills";

/// Get the skills config directory (~/.skills)
pub fn config_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(CONFIG_DIR_NAME)
}

/// Get the default database file (~/.skills/skills.db)
pub fn database_path() -> PathBuf {
    config_dir().join("skills.db")
}
