use crate::catalog::DisplayCase;
use crate::cli::SessionArgs;
use crate::error::DbpagerError;
use crate::loader::DEFAULT_BATCH_SIZE;
use directories::ProjectDirs;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::PathBuf;

pub const DEFAULT_DATABASE: &str = "./csc.db";
pub const DEFAULT_TITLE: &str = "CYBER SPRAWL CLASSICS DATABASE 3.15.4alpha";

/// Top-level application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database: PathBuf,
    pub batch_size: usize,
    pub display_case: DisplayCase,
    pub count_rows: bool,
    pub verbose: bool,
    pub title: String,
}

// --- TOML config file structs ---

#[derive(Debug, Deserialize, Default)]
struct TomlConfig {
    #[serde(default)]
    defaults: TomlDefaults,
    #[serde(default)]
    profiles: HashMap<String, TomlProfile>,
}

#[derive(Debug, Deserialize, Default)]
struct TomlDefaults {
    batch_size: Option<usize>,
    display_case: Option<DisplayCase>,
    count_rows: Option<bool>,
    verbose: Option<bool>,
    title: Option<String>,
}

#[derive(Debug, Deserialize, Default, Clone)]
struct TomlProfile {
    database: Option<PathBuf>,
    batch_size: Option<usize>,
    display_case: Option<DisplayCase>,
}

/// Config path resolution result: explicit vs auto-resolved paths.
struct ResolvedConfigPath {
    path: PathBuf,
    /// true if user explicitly specified via --config or DBPAGER_CONFIG
    explicit: bool,
}

/// Resolve the config file path: --config flag > env var > platform default.
fn resolve_config_path(cli_config: Option<&PathBuf>) -> Option<ResolvedConfigPath> {
    if let Some(path) = cli_config {
        return Some(ResolvedConfigPath {
            path: path.clone(),
            explicit: true,
        });
    }
    if let Ok(path) = std::env::var("DBPAGER_CONFIG")
        && !path.is_empty()
    {
        return Some(ResolvedConfigPath {
            path: PathBuf::from(path),
            explicit: true,
        });
    }
    ProjectDirs::from("", "", "dbpager").map(|dirs| ResolvedConfigPath {
        path: dirs.config_dir().join("config.toml"),
        explicit: false,
    })
}

/// Load and parse the TOML config file (if it exists).
fn load_toml_config(resolved: Option<&ResolvedConfigPath>) -> Result<TomlConfig, DbpagerError> {
    let resolved = match resolved {
        Some(r) => r,
        None => return Ok(TomlConfig::default()),
    };

    if !resolved.path.exists() {
        if resolved.explicit {
            return Err(DbpagerError::Config {
                message: format!("config file not found: {}", resolved.path.display()),
            });
        }
        return Ok(TomlConfig::default());
    }

    let content = std::fs::read_to_string(&resolved.path).map_err(|e| DbpagerError::Config {
        message: format!("cannot read config file {}: {}", resolved.path.display(), e),
    })?;

    toml::from_str(&content).map_err(|e| DbpagerError::Config {
        message: format!("invalid config file {}: {}", resolved.path.display(), e),
    })
}

/// Build AppConfig from CLI args (which clap has already merged with env vars).
pub fn load(
    args: &SessionArgs,
    verbose: bool,
    config_path: Option<&PathBuf>,
) -> Result<AppConfig, DbpagerError> {
    let resolved_path = resolve_config_path(config_path);
    let toml_config = load_toml_config(resolved_path.as_ref())?;

    let profile = args
        .profile
        .as_ref()
        .map(|name| {
            toml_config
                .profiles
                .get(name)
                .cloned()
                .ok_or_else(|| DbpagerError::Config {
                    message: format!("profile '{}' not found in config file", name),
                })
        })
        .transpose()?
        .unwrap_or_default();

    // database: CLI/ENV > profile > ./csc.db
    let database = args
        .database
        .clone()
        .or(profile.database)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DATABASE));

    // batch_size: CLI/ENV > profile > TOML defaults > 100
    let batch_size = args
        .batch_size
        .or(profile.batch_size)
        .or(toml_config.defaults.batch_size)
        .unwrap_or(DEFAULT_BATCH_SIZE);
    if batch_size == 0 {
        return Err(DbpagerError::Config {
            message: "batch size must be at least 1".to_string(),
        });
    }

    // display_case: CLI/ENV > profile > TOML defaults > upper
    let display_case = match args.display_case.as_deref() {
        Some(s) => s.parse()?,
        None => profile
            .display_case
            .or(toml_config.defaults.display_case)
            .unwrap_or_default(),
    };

    let count_rows = !args.no_count && toml_config.defaults.count_rows.unwrap_or(true);

    // verbose: CLI/ENV OR TOML default
    let verbose = verbose || toml_config.defaults.verbose.unwrap_or(false);

    let title = toml_config
        .defaults
        .title
        .unwrap_or_else(|| DEFAULT_TITLE.to_string());

    Ok(AppConfig {
        database,
        batch_size,
        display_case,
        count_rows,
        verbose,
        title,
    })
}
