//! Profile storage in the platform config directory.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;

use super::Profile;

/// Get the profile file path.
pub fn profile_path() -> Result<PathBuf> {
    let dirs =
        ProjectDirs::from("", "", "hostbridge").context("Could not determine config directory")?;

    Ok(dirs.config_dir().join("profile.json"))
}

/// Save the profile to the default location.
pub fn save_profile(profile: &Profile) -> Result<PathBuf> {
    let path = profile_path()?;
    save_to(&path, profile)?;
    Ok(path)
}

/// Load the profile from the default location, if one was saved.
pub fn load_profile() -> Result<Option<Profile>> {
    load_from(&profile_path()?)
}

/// Remove the saved profile. Returns false when there was none.
pub fn clear_profile() -> Result<bool> {
    clear_at(&profile_path()?)
}

pub fn save_to(path: &Path, profile: &Profile) -> Result<()> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir).context("Failed to create config directory")?;
    }

    let json = serde_json::to_string_pretty(profile)?;
    fs::write(path, json).context("Failed to write profile file")?;

    Ok(())
}

pub fn load_from(path: &Path) -> Result<Option<Profile>> {
    if !path.exists() {
        return Ok(None);
    }

    let json = fs::read_to_string(path).context("Failed to read profile file")?;
    let profile = serde_json::from_str(&json).context("Invalid profile file")?;

    Ok(Some(profile))
}

pub fn clear_at(path: &Path) -> Result<bool> {
    if !path.exists() {
        return Ok(false);
    }

    fs::remove_file(path).context("Failed to remove profile file")?;
    Ok(true)
}
