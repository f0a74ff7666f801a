mod config;
pub mod project;

pub use config::Config;
pub use project::ProjectStore;

use std::path::PathBuf;

/// Directory holding the config file and the default project file,
/// created on first use.
///
/// `~/.config/enaudit` normally; `~/.config/enaudit-dev` when
/// `ENAUDIT_ENV=dev`, so test and development runs never touch real
/// audit data.
///
/// # Errors
/// Returns an error if the directory cannot be created.
pub fn data_dir() -> Result<PathBuf, Box<dyn std::error::Error>> {
    let name = match std::env::var("ENAUDIT_ENV").as_deref() {
        Ok("dev") => "enaudit-dev",
        _ => "enaudit",
    };
    let dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config")
        .join(name);
    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
