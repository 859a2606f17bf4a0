//! TOML configuration shared by the server, the web frontend and the shell.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use rfp_format::RecipeStore;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Directory holding the `.rfp` files.
    #[serde(default = "default_recipe_dir")]
    pub recipe_dir: PathBuf,

    /// Directory scraped images are downloaded into.
    #[serde(default = "default_image_dir")]
    pub image_dir: PathBuf,

    /// Port of the HTTP API server.
    #[serde(default = "default_api_port")]
    pub api_port: u16,

    /// Port of the static frontend server.
    #[serde(default = "default_web_port")]
    pub web_port: u16,

    /// Directory of built frontend assets served by `rfp web`.
    #[serde(default = "default_static_dir")]
    pub static_dir: PathBuf,

    /// Number ingredient lines in console output.
    #[serde(default = "default_true")]
    pub numbered_ingredients: bool,

    /// Number step lines in console output.
    #[serde(default = "default_true")]
    pub numbered_steps: bool,
}

fn default_recipe_dir() -> PathBuf {
    PathBuf::from("recipes")
}

fn default_image_dir() -> PathBuf {
    PathBuf::from("images")
}

fn default_api_port() -> u16 {
    26740
}

fn default_web_port() -> u16 {
    8080
}

fn default_static_dir() -> PathBuf {
    PathBuf::from("web/dist")
}

fn default_true() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Config {
            recipe_dir: default_recipe_dir(),
            image_dir: default_image_dir(),
            api_port: default_api_port(),
            web_port: default_web_port(),
            static_dir: default_static_dir(),
            numbered_ingredients: true,
            numbered_steps: true,
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Config> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("cannot read config file {}", path.display()))?;
        toml::from_str(&text)
            .with_context(|| format!("cannot parse config file {}", path.display()))
    }

    /// Load the config, falling back to defaults when the file is absent.
    pub fn load_or_default(path: &Path) -> Result<Config> {
        if path.exists() {
            Config::load(path)
        } else {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            Ok(Config::default())
        }
    }

    /// Write the config and make sure its directories exist.
    pub fn save(&self, path: &Path) -> Result<Config> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::create_dir_all(&self.recipe_dir)
            .with_context(|| format!("cannot create {}", self.recipe_dir.display()))?;
        fs::create_dir_all(&self.image_dir)
            .with_context(|| format!("cannot create {}", self.image_dir.display()))?;

        let text = toml::to_string_pretty(self).context("cannot serialize config")?;
        fs::write(path, text)
            .with_context(|| format!("cannot write config file {}", path.display()))?;
        Ok(self.clone())
    }

    pub fn store(&self) -> RecipeStore {
        RecipeStore::new(&self.recipe_dir)
    }
}
