use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::Deserialize;

const DEFAULT_SETTINGS_FILE: &str = "recipe_kg";

/// Runtime settings: built-in defaults, then an optional settings file, then `RKG_*` env vars.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub base_url: String,
    pub graph_base: String,
    pub user_agent: String,
    pub request_delay_ms: u64,
    pub request_timeout_secs: u64,
    pub min_frequency: usize,
    pub default_scopes: Vec<String>,
    pub blocked_paths: Vec<String>,
    #[serde(default)]
    pub synonyms_path: Option<PathBuf>,
}

impl Settings {
    /// Load settings. An explicit `path` must exist; the default `recipe_kg.toml` is optional.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let file = match path {
            Some(p) => File::from(p.to_path_buf()).required(true),
            None => File::with_name(DEFAULT_SETTINGS_FILE).required(false),
        };

        let cfg = Config::builder()
            .set_default("base_url", "https://www.kokkieblanda.nl")?
            .set_default("graph_base", "https://www.kokkieblanda.nl/kg/")?
            .set_default(
                "user_agent",
                "ResearchBot/1.0 (+http://example.com) - Educational Project",
            )?
            .set_default("request_delay_ms", 1000_i64)?
            .set_default("request_timeout_secs", 10_i64)?
            .set_default("min_frequency", 2_i64)?
            .set_default(
                "default_scopes",
                vec![
                    "/indonesian",
                    "/thailand",
                    "/china",
                    "/filipijnen",
                    "/korea",
                    "/overige-gerechten",
                ],
            )?
            .set_default("blocked_paths", vec!["login", "register", "profile", "search"])?
            .add_source(file)
            .add_source(
                Environment::with_prefix("RKG")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("default_scopes")
                    .with_list_parse_key("blocked_paths"),
            )
            .build()
            .context("Failed to load settings")?;

        cfg.try_deserialize().context("Invalid settings")
    }
}
