use crate::consts;
use crate::game::ExpiryCategory;
use crate::util::{expand_tilde, EnumExt};
use ratatui::style::Color;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use toml::{Table, Value};

/// Program configuration read from a configuration file
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub(crate) struct Config {
    pub(crate) field: FieldConfig,
    pub(crate) snake: SnakeConfig,
    pub(crate) food: FoodConfig,
    pub(crate) files: FileConfig,
}

impl Config {
    /// Return the default configuration file path
    pub(crate) fn default_path() -> Result<PathBuf, ConfigError> {
        dirs::config_local_dir()
            .map(|p| p.join("turtlesnake").join("config.toml"))
            .ok_or(ConfigError::NoPath)
    }

    /// Read configuration from a file on disk.  If the file does not exist and
    /// `allow_missing` is true, a default `Config` value is returned.
    ///
    /// Individual settings that are missing or invalid are replaced with
    /// their defaults.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the file could not be read or is not valid TOML.
    pub(crate) fn load(path: &Path, allow_missing: bool) -> Result<Config, ConfigError> {
        let content = match fs_err::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound && allow_missing => {
                return Ok(Config::default())
            }
            Err(e) => return Err(ConfigError::Read(e)),
        };
        Config::from_toml(&content)
    }

    pub(crate) fn from_toml(s: &str) -> Result<Config, ConfigError> {
        let raw = toml::from_str::<RawConfig>(s)?;
        Ok(Config::from(raw))
    }
}

impl From<RawConfig> for Config {
    fn from(raw: RawConfig) -> Config {
        let field = Section::new("field", &raw.field);
        let snake = Section::new("snake", &raw.snake);
        let food = Section::new("food", &raw.food);
        let files = Section::new("files", &raw.files);
        let defaults = Config::default();
        Config {
            field: FieldConfig {
                width: field.get("width", defaults.field.width, field_length),
                height: field.get("height", defaults.field.height, field_length),
                background: field.get("background", defaults.field.background, color),
            },
            snake: SnakeConfig {
                tick_delay: snake.get("tick-delay", defaults.snake.tick_delay, seconds),
                start_length: snake.get("start-length", defaults.snake.start_length, length),
                color: snake.get("color", defaults.snake.color, color),
            },
            food: FoodConfig {
                color: food.get("color", defaults.food.color, color),
                expiry: food.get("expiry", defaults.food.expiry, expiry),
                refresh_interval: food.get(
                    "refresh-interval",
                    defaults.food.refresh_interval,
                    seconds,
                ),
                batch: food.get("batch", defaults.food.batch, count),
                initial_batch: food.get("initial-batch", defaults.food.initial_batch, count),
            },
            files: FileConfig {
                high_score_file: files.get("high-score-file", None, |v| path(v).map(Some)),
            },
        }
    }
}

/// Size & look of the playing field
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct FieldConfig {
    pub(crate) width: i32,
    pub(crate) height: i32,
    pub(crate) background: Color,
}

impl Default for FieldConfig {
    fn default() -> FieldConfig {
        FieldConfig {
            width: consts::DEFAULT_FIELD_WIDTH,
            height: consts::DEFAULT_FIELD_HEIGHT,
            background: consts::DEFAULT_BACKGROUND_COLOR,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct SnakeConfig {
    /// Time between movements of the snake
    pub(crate) tick_delay: Duration,

    /// Length of the snake at the start of each run
    pub(crate) start_length: usize,

    pub(crate) color: Color,
}

impl Default for SnakeConfig {
    fn default() -> SnakeConfig {
        SnakeConfig {
            tick_delay: consts::DEFAULT_TICK_DELAY,
            start_length: consts::DEFAULT_START_LENGTH,
            color: consts::DEFAULT_SNAKE_COLOR,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct FoodConfig {
    pub(crate) color: Color,

    /// How long food lasts before it starts to rot
    pub(crate) expiry: ExpiryCategory,

    /// Time between periodic food spawns, and also between rot sweeps
    pub(crate) refresh_interval: Duration,

    /// Number of items added by each periodic spawn
    pub(crate) batch: usize,

    /// Number of items placed at the start of each run
    pub(crate) initial_batch: usize,
}

impl Default for FoodConfig {
    fn default() -> FoodConfig {
        FoodConfig {
            color: consts::DEFAULT_FOOD_COLOR,
            expiry: ExpiryCategory::default(),
            refresh_interval: consts::DEFAULT_REFRESH_INTERVAL,
            batch: consts::DEFAULT_FOOD_BATCH,
            initial_batch: consts::DEFAULT_INITIAL_FOOD_BATCH,
        }
    }
}

/// Settings about data files
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub(crate) struct FileConfig {
    /// Path at which the high score should be stored
    pub(crate) high_score_file: Option<PathBuf>,
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(default)]
struct RawConfig {
    field: Table,
    snake: Table,
    food: Table,
    files: Table,
}

/// One table of a raw configuration file
#[derive(Clone, Copy, Debug)]
struct Section<'a> {
    name: &'static str,
    table: &'a Table,
}

impl<'a> Section<'a> {
    fn new(name: &'static str, table: &'a Table) -> Self {
        Section { name, table }
    }

    /// Look up `key` and convert it with `parse`, falling back to `default`
    /// if the key is absent or `parse` rejects it
    fn get<T, F>(&self, key: &str, default: T, parse: F) -> T
    where
        F: FnOnce(&Value) -> Option<T>,
    {
        let Some(value) = self.table.get(key) else {
            return default;
        };
        match parse(value) {
            Some(v) => v,
            None => {
                tracing::warn!(
                    section = self.name,
                    key,
                    %value,
                    "Invalid configuration value; using default"
                );
                default
            }
        }
    }
}

fn field_length(value: &Value) -> Option<i32> {
    value
        .as_integer()
        .and_then(|i| i32::try_from(i).ok())
        .filter(|i| (2 * consts::GRID_STEP..=consts::MAX_FIELD_LENGTH).contains(i))
}

fn seconds(value: &Value) -> Option<Duration> {
    match value {
        Value::Integer(i) => u64::try_from(*i).ok().map(Duration::from_secs),
        Value::Float(f) => Duration::try_from_secs_f64(*f).ok(),
        _ => None,
    }
    .filter(|d| !d.is_zero() && *d <= consts::MAX_INTERVAL)
}

fn length(value: &Value) -> Option<usize> {
    value
        .as_integer()
        .and_then(|i| usize::try_from(i).ok())
        .filter(|n| (1..=consts::MAX_START_LENGTH).contains(n))
}

fn count(value: &Value) -> Option<usize> {
    value
        .as_integer()
        .and_then(|i| usize::try_from(i).ok())
        .filter(|&n| n <= consts::MAX_FOOD_BATCH)
}

fn color(value: &Value) -> Option<Color> {
    value.as_str()?.parse::<Color>().ok()
}

fn expiry(value: &Value) -> Option<ExpiryCategory> {
    let r = value.as_str().map(str::parse::<ExpiryCategory>);
    if let Some(Err(ref e)) = r {
        tracing::debug!(
            "{e}; expected one of: {}",
            ExpiryCategory::iter()
                .map(ExpiryCategory::as_str)
                .collect::<Vec<_>>()
                .join(", ")
        );
    }
    r?.ok()
}

fn path(value: &Value) -> Option<PathBuf> {
    value
        .as_str()
        .filter(|s| !s.is_empty())
        .map(|s| expand_tilde(Path::new(s)))
}

#[derive(Debug, Error)]
pub(crate) enum ConfigError {
    #[error("failed to determine path to local configuration directory")]
    NoPath,
    #[error("failed to read configuration file")]
    Read(#[from] std::io::Error),
    #[error("failed to parse configuration file")]
    Parse(#[from] toml::de::Error),
}
