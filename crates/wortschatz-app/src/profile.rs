use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, bail};
use serde::{Deserialize, Serialize};
use wortschatz_config::Config;

const MAIN_PROFILE: &str = "main";

/// Represents a user profile
#[derive(Serialize, Deserialize)]
pub struct Profile {
    pub name: String,
    pub value: Config,
}

fn wortschatz_root() -> anyhow::Result<PathBuf> {
    dirs::config_dir()
        .map(|dir| dir.join("wortschatz"))
        .context("No config directory on this platform")
}

pub fn profiles_dir() -> anyhow::Result<PathBuf> {
    Ok(wortschatz_root()?.join("profiles"))
}

fn profile_path(dir: &Path, name: &str) -> anyhow::Result<PathBuf> {
    if name.is_empty() || name.contains(['/', '\\']) || name.starts_with('.') {
        bail!("Invalid profile name '{name}'");
    }
    Ok(dir.join(format!("{name}.json")))
}

fn read_profile_file(path: &Path) -> anyhow::Result<Config> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("Failed to read profile {}", path.display()))?;
    let profile: Profile = serde_json::from_str(&data)
        .with_context(|| format!("Profile {} is not valid JSON", path.display()))?;
    Ok(profile.value)
}

/// Creates the profiles folder and a default `main` profile if missing
pub fn init_user_config(dir: &Path) -> anyhow::Result<()> {
    fs::create_dir_all(dir)?;

    let main_profile = profile_path(dir, MAIN_PROFILE)?;
    if !main_profile.exists() {
        let profile = Profile {
            name: MAIN_PROFILE.into(),
            value: Config::default(),
        };
        fs::write(&main_profile, serde_json::to_string_pretty(&profile)?)?;
        tracing::info!("Created main profile at {}", main_profile.display());
    }

    Ok(())
}

/// Load a profile by name, falling back to `main`, then to defaults
pub fn load_user_profile(dir: &Path, name: &str) -> anyhow::Result<Config> {
    let profile_file = profile_path(dir, name)?;
    if profile_file.exists() {
        return read_profile_file(&profile_file);
    }

    tracing::warn!("Profile {name} not found, falling back to main profile");
    let main_file = profile_path(dir, MAIN_PROFILE)?;
    if main_file.exists() {
        read_profile_file(&main_file)
    } else {
        Ok(Config::default())
    }
}

/// Profile from the user config directory with environment overrides on top.
pub fn load_config(name: &str) -> anyhow::Result<Config> {
    let mut config = match profiles_dir() {
        Ok(dir) => {
            if let Err(e) = init_user_config(&dir) {
                tracing::warn!("Could not initialize profiles in {}: {e}", dir.display());
            }
            load_user_profile(&dir, name)?
        }
        Err(e) => {
            tracing::warn!("{e}, using default settings");
            Config::default()
        }
    };

    config.apply_env();
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_run_creates_main_from_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let profiles = dir.path().join("profiles");

        init_user_config(&profiles).unwrap();
        let data = fs::read_to_string(profiles.join("main.json")).unwrap();
        let profile: Profile = serde_json::from_str(&data).unwrap();
        assert_eq!(profile.name, "main");
        assert_eq!(profile.value.storage.key, "words");

        // Existing main is left alone
        fs::write(
            profiles.join("main.json"),
            r#"{ "name": "main", "value": { "ui": { "list_limit": 7 } } }"#,
        )
        .unwrap();
        init_user_config(&profiles).unwrap();
        assert_eq!(load_user_profile(&profiles, "main").unwrap().ui.list_limit, 7);
    }

    #[test]
    fn missing_profile_falls_back_to_main() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("main.json"),
            r#"{ "name": "main", "value": { "genai": { "voice": "Puck" } } }"#,
        )
        .unwrap();
        fs::write(
            dir.path().join("work.json"),
            r#"{ "name": "work", "value": { "genai": { "voice": "Charon" } } }"#,
        )
        .unwrap();

        assert_eq!(load_user_profile(dir.path(), "work").unwrap().genai.voice, "Charon");
        assert_eq!(load_user_profile(dir.path(), "other").unwrap().genai.voice, "Puck");
    }

    #[test]
    fn no_profiles_at_all_means_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_user_profile(dir.path(), "main").unwrap();
        assert_eq!(config.genai.voice, "Kore");
    }

    #[test]
    fn rejects_path_like_names() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_user_profile(dir.path(), "../etc").is_err());
        assert!(load_user_profile(dir.path(), "").is_err());
    }

    #[test]
    fn broken_profile_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("main.json"), "{ not json").unwrap();
        assert!(load_user_profile(dir.path(), "main").is_err());
    }
}
