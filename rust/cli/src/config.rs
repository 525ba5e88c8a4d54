use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use drawpoker_ai::AI_KINDS;
use drawpoker_engine::engine::MAX_SEATS;
use drawpoker_engine::player::PlayerSpec;

pub const CONFIG_ENV: &str = "DRAWPOKER_CONFIG";
pub const SEED_ENV: &str = "DRAWPOKER_SEED";
pub const DATA_DIR_ENV: &str = "DRAWPOKER_DATA_DIR";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SeatConfig {
    pub name: String,
    #[serde(default)]
    pub is_human: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Config {
    pub small_blind: u32,
    pub big_blind: u32,
    pub starting_stack: u32,
    pub seed: Option<u64>,
    pub data_dir: PathBuf,
    pub ai: String,
    pub players: Vec<SeatConfig>,
}

impl Config {
    /// Seats for a fresh game, everyone starting with `starting_stack`.
    pub fn player_specs(&self) -> Vec<PlayerSpec> {
        self.players
            .iter()
            .map(|s| PlayerSpec {
                name: s.name.clone(),
                stack: self.starting_stack,
                is_human: s.is_human,
            })
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueSource {
    Default,
    File,
    Env,
}

#[derive(Debug, Clone, Copy)]
pub struct ConfigSources {
    pub small_blind: ValueSource,
    pub big_blind: ValueSource,
    pub starting_stack: ValueSource,
    pub seed: ValueSource,
    pub data_dir: ValueSource,
    pub ai: ValueSource,
    pub players: ValueSource,
}

impl Default for ConfigSources {
    fn default() -> Self {
        Self {
            small_blind: ValueSource::Default,
            big_blind: ValueSource::Default,
            starting_stack: ValueSource::Default,
            seed: ValueSource::Default,
            data_dir: ValueSource::Default,
            ai: ValueSource::Default,
            players: ValueSource::Default,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ConfigResolved {
    pub config: Config,
    pub sources: ConfigSources,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            small_blind: 25,
            big_blind: 50,
            starting_stack: 1000,
            seed: None,
            data_dir: PathBuf::from("data"),
            ai: "random-draw".into(),
            players: vec![
                SeatConfig {
                    name: "Player (You)".into(),
                    is_human: true,
                },
                SeatConfig {
                    name: "Bot Adam".into(),
                    is_human: false,
                },
                SeatConfig {
                    name: "Bot Eve".into(),
                    is_human: false,
                },
            ],
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Invalid(String),
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}
impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        ConfigError::Parse(e)
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "cannot read config file: {}", e),
            ConfigError::Parse(e) => write!(f, "malformed config file: {}", e),
            ConfigError::Invalid(msg) => write!(f, "{}", msg),
        }
    }
}

/// Resolves configuration: defaults, then the TOML file (`path`, else
/// `DRAWPOKER_CONFIG`), then environment overrides. The result is validated.
pub fn load_with_sources(path: Option<&Path>) -> Result<ConfigResolved, ConfigError> {
    let mut cfg = Config::default();
    let mut sources = ConfigSources::default();

    let file_path = match path {
        Some(p) => Some(p.to_path_buf()),
        None => std::env::var_os(CONFIG_ENV)
            .filter(|v| !v.is_empty())
            .map(PathBuf::from),
    };
    if let Some(path) = file_path {
        let s = fs::read_to_string(path)?;
        let f: FileConfig = toml::from_str(&s)?;
        if let Some(v) = f.small_blind {
            cfg.small_blind = v;
            sources.small_blind = ValueSource::File;
        }
        if let Some(v) = f.big_blind {
            cfg.big_blind = v;
            sources.big_blind = ValueSource::File;
        }
        if let Some(v) = f.starting_stack {
            cfg.starting_stack = v;
            sources.starting_stack = ValueSource::File;
        }
        if let Some(v) = f.seed {
            cfg.seed = Some(v);
            sources.seed = ValueSource::File;
        }
        if let Some(v) = f.data_dir {
            cfg.data_dir = v;
            sources.data_dir = ValueSource::File;
        }
        if let Some(v) = f.ai {
            cfg.ai = v;
            sources.ai = ValueSource::File;
        }
        if let Some(v) = f.players {
            cfg.players = v;
            sources.players = ValueSource::File;
        }
    }

    if let Ok(seed) = std::env::var(SEED_ENV)
        && !seed.is_empty()
    {
        cfg.seed = Some(
            seed.parse()
                .map_err(|_| ConfigError::Invalid(format!("Invalid seed '{}'", seed)))?,
        );
        sources.seed = ValueSource::Env;
    }
    if let Ok(dir) = std::env::var(DATA_DIR_ENV)
        && !dir.is_empty()
    {
        cfg.data_dir = PathBuf::from(dir);
        sources.data_dir = ValueSource::Env;
    }

    validate(&cfg)?;
    Ok(ConfigResolved {
        config: cfg,
        sources,
    })
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    #[serde(default)]
    small_blind: Option<u32>,
    #[serde(default)]
    big_blind: Option<u32>,
    #[serde(default)]
    starting_stack: Option<u32>,
    #[serde(default)]
    seed: Option<u64>,
    #[serde(default)]
    data_dir: Option<PathBuf>,
    #[serde(default)]
    ai: Option<String>,
    #[serde(default)]
    players: Option<Vec<SeatConfig>>,
}

fn validate(cfg: &Config) -> Result<(), ConfigError> {
    if cfg.big_blind == 0 {
        return Err(ConfigError::Invalid(
            "Invalid configuration: big_blind must be >0".into(),
        ));
    }
    if cfg.small_blind > cfg.big_blind {
        return Err(ConfigError::Invalid(
            "Invalid configuration: small_blind must not exceed big_blind".into(),
        ));
    }
    if cfg.starting_stack == 0 {
        return Err(ConfigError::Invalid(
            "Invalid configuration: starting_stack must be >0".into(),
        ));
    }
    if !(2..=MAX_SEATS).contains(&cfg.players.len()) {
        return Err(ConfigError::Invalid(format!(
            "Invalid configuration: 2 to {} players required, got {}",
            MAX_SEATS,
            cfg.players.len()
        )));
    }
    if cfg.players.iter().any(|p| p.name.trim().is_empty()) {
        return Err(ConfigError::Invalid(
            "Invalid configuration: player names must not be empty".into(),
        ));
    }
    if !AI_KINDS.contains(&cfg.ai.as_str()) {
        return Err(ConfigError::Invalid(format!(
            "Invalid configuration: unknown ai '{}', expected one of: {}",
            cfg.ai,
            AI_KINDS.join(", ")
        )));
    }
    Ok(())
}
