use sequence_engine::board::MatchRules;
use serde::{Deserialize, Serialize};
use std::fs;

pub const MAX_HAND_SIZE: usize = 20;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    pub seed: Option<u64>,
    pub hand_size: usize,
    pub sequences_to_win: u32,
    pub local_name: String,
    pub remote_name: String,
}

impl Config {
    pub fn rules(&self) -> MatchRules {
        MatchRules {
            hand_size: self.hand_size,
            sequences_to_win: self.sequences_to_win,
        }
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
    pub seed: ValueSource,
    pub hand_size: ValueSource,
    pub sequences_to_win: ValueSource,
    pub local_name: ValueSource,
    pub remote_name: ValueSource,
}

impl Default for ConfigSources {
    fn default() -> Self {
        Self {
            seed: ValueSource::Default,
            hand_size: ValueSource::Default,
            sequences_to_win: ValueSource::Default,
            local_name: ValueSource::Default,
            remote_name: ValueSource::Default,
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
        let rules = MatchRules::default();
        Self {
            seed: None,
            hand_size: rules.hand_size,
            sequences_to_win: rules.sequences_to_win,
            local_name: "Red".into(),
            remote_name: "Blue".into(),
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
            ConfigError::Parse(e) => write!(f, "cannot parse config file: {}", e),
            ConfigError::Invalid(msg) => write!(f, "{}", msg),
        }
    }
}

pub fn load() -> Result<Config, ConfigError> {
    load_with_sources().map(|resolved| resolved.config)
}

pub fn load_with_sources() -> Result<ConfigResolved, ConfigError> {
    let mut cfg = Config::default();
    let mut sources = ConfigSources::default();

    if let Ok(path) = std::env::var("SEQUENCE_CONFIG")
        && !path.is_empty()
    {
        let s = fs::read_to_string(path)?;
        let f: FileConfig = toml::from_str(&s)?;
        if let Some(v) = f.seed {
            cfg.seed = Some(v);
            sources.seed = ValueSource::File;
        }
        if let Some(v) = f.hand_size {
            cfg.hand_size = v;
            sources.hand_size = ValueSource::File;
        }
        if let Some(v) = f.sequences_to_win {
            cfg.sequences_to_win = v;
            sources.sequences_to_win = ValueSource::File;
        }
        if let Some(v) = f.local_name {
            cfg.local_name = v;
            sources.local_name = ValueSource::File;
        }
        if let Some(v) = f.remote_name {
            cfg.remote_name = v;
            sources.remote_name = ValueSource::File;
        }
    }

    if let Ok(seed) = std::env::var("SEQUENCE_SEED")
        && !seed.is_empty()
    {
        cfg.seed = Some(
            seed.parse()
                .map_err(|_| ConfigError::Invalid("Invalid seed".into()))?,
        );
        sources.seed = ValueSource::Env;
    }
    if let Ok(size) = std::env::var("SEQUENCE_HAND_SIZE")
        && !size.is_empty()
    {
        cfg.hand_size = size
            .parse()
            .map_err(|_| ConfigError::Invalid("Invalid hand size".into()))?;
        sources.hand_size = ValueSource::Env;
    }
    if let Ok(target) = std::env::var("SEQUENCE_SEQUENCES_TO_WIN")
        && !target.is_empty()
    {
        cfg.sequences_to_win = target
            .parse()
            .map_err(|_| ConfigError::Invalid("Invalid sequences to win".into()))?;
        sources.sequences_to_win = ValueSource::Env;
    }
    if let Ok(name) = std::env::var("SEQUENCE_LOCAL_NAME")
        && !name.is_empty()
    {
        cfg.local_name = name;
        sources.local_name = ValueSource::Env;
    }
    if let Ok(name) = std::env::var("SEQUENCE_REMOTE_NAME")
        && !name.is_empty()
    {
        cfg.remote_name = name;
        sources.remote_name = ValueSource::Env;
    }

    validate(&cfg)?;
    Ok(ConfigResolved {
        config: cfg,
        sources,
    })
}

#[derive(Debug, Deserialize)]
struct FileConfig {
    #[serde(default)]
    seed: Option<u64>,
    #[serde(default)]
    hand_size: Option<usize>,
    #[serde(default)]
    sequences_to_win: Option<u32>,
    #[serde(default)]
    local_name: Option<String>,
    #[serde(default)]
    remote_name: Option<String>,
}

fn validate(cfg: &Config) -> Result<(), ConfigError> {
    if cfg.hand_size == 0 || cfg.hand_size > MAX_HAND_SIZE {
        return Err(ConfigError::Invalid(format!(
            "Invalid configuration: hand_size must be within 1..={}",
            MAX_HAND_SIZE
        )));
    }
    if cfg.sequences_to_win == 0 {
        return Err(ConfigError::Invalid(
            "Invalid configuration: sequences_to_win must be >=1".into(),
        ));
    }
    if cfg.local_name == cfg.remote_name {
        return Err(ConfigError::Invalid(
            "Invalid configuration: player names must differ".into(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_engine_rules() {
        let cfg = Config::default();
        assert_eq!(cfg.rules(), MatchRules::default());
        assert!(validate(&cfg).is_ok());
    }

    #[test]
    fn validation_bounds() {
        let mut cfg = Config {
            hand_size: 0,
            ..Config::default()
        };
        assert!(validate(&cfg).is_err());
        cfg.hand_size = MAX_HAND_SIZE + 1;
        assert!(validate(&cfg).is_err());
        cfg.hand_size = MAX_HAND_SIZE;
        assert!(validate(&cfg).is_ok());
        cfg.sequences_to_win = 0;
        assert!(validate(&cfg).is_err());
    }

    #[test]
    fn file_config_fields_are_optional() {
        let f: FileConfig = toml::from_str("hand_size = 5\n").unwrap();
        assert_eq!(f.hand_size, Some(5));
        assert!(f.seed.is_none());
        assert!(f.local_name.is_none());
    }
}
