use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use log::LevelFilter;
use serde::Deserialize;
use stroll_core::{GameConfig, ZoneLayout};
use thiserror::Error;

use crate::presenter::{NullPresenter, Presenter};
use crate::traits::StrollApp;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config file {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config file {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("unknown log level `{0}`")]
    LogLevel(String),
}

/// Window, logging and game settings.
///
/// Every field has a default, so a TOML file only lists what it overrides:
///
/// ```toml
/// title = "Harbour Walk"
/// width = 1024
/// log_level = "debug"
///
/// [game.motion]
/// walk_speed = 200.0
///
/// [world]
/// world_width = 5200.0
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub resizable: bool,
    /// `off`, `error`, `warn`, `info`, `debug` or `trace`.  The `STROLL_LOG`
    /// environment variable takes precedence.
    pub log_level: String,
    /// Starting position of the player along the world.
    pub spawn_x: f32,
    pub game: GameConfig,
    pub world: ZoneLayout,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            title: "Stroll".to_string(),
            width: 1280,
            height: 720,
            resizable: true,
            log_level: "info".to_string(),
            spawn_x: 200.0,
            game: GameConfig::default(),
            world: ZoneLayout::default(),
        }
    }
}

impl AppConfig {
    /// Read and parse a TOML config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Like [`load`](Self::load), but a missing file yields the defaults.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }
        Self::load(path)
    }

    pub fn level_filter(&self) -> Result<LevelFilter, ConfigError> {
        parse_level(&self.log_level)
    }
}

pub(crate) fn parse_level(s: &str) -> Result<LevelFilter, ConfigError> {
    LevelFilter::from_str(s.trim()).map_err(|_| ConfigError::LogLevel(s.to_string()))
}

/// Entry point.  Builder over [`AppConfig`] plus the presenter that turns
/// each frame's draw list into pixels.
pub struct App<A: StrollApp> {
    config:    AppConfig,
    app_state: A,
    presenter: Box<dyn Presenter>,
}

impl<A: StrollApp + 'static> App<A> {
    pub fn new(app_state: A) -> Self {
        Self {
            config: AppConfig::default(),
            app_state,
            presenter: Box::new(NullPresenter::default()),
        }
    }

    pub fn with_config(mut self, config: AppConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_title(mut self, title: &str) -> Self {
        self.config.title = title.to_string();
        self
    }

    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.config.width = width;
        self.config.height = height;
        self
    }

    pub fn with_resizable(mut self, resizable: bool) -> Self {
        self.config.resizable = resizable;
        self
    }

    pub fn with_log_level(mut self, level: &str) -> Self {
        self.config.log_level = level.to_string();
        self
    }

    pub fn with_presenter(mut self, presenter: impl Presenter + 'static) -> Self {
        self.presenter = Box::new(presenter);
        self
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Install the logger and run the event loop until the window closes.
    pub fn run(self) -> anyhow::Result<()> {
        crate::logging::init(&self.config)?;
        crate::runner::run_internal(self.config, self.app_state, self.presenter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config.title, "Stroll");
        assert_eq!(config.width, 1280);
        assert_eq!(config.game, GameConfig::default());
        assert_eq!(config.world, ZoneLayout::default());
    }

    #[test]
    fn partial_tables_keep_other_defaults() {
        let config: AppConfig = toml::from_str(
            r#"
            title = "Harbour"
            log_level = "debug"

            [game.motion]
            walk_speed = 200.0

            [game.camera]
            shake_seed = 9

            [[world.interactives]]
            id = "lighthouse"
            x = 900.0
            width = 80.0
            height = 300.0
            "#,
        )
        .unwrap();

        assert_eq!(config.title, "Harbour");
        assert_eq!(config.height, 720);
        assert_eq!(config.game.motion.walk_speed, 200.0);
        assert_eq!(config.game.motion.gravity, 900.0);
        assert_eq!(config.game.camera.shake_seed, Some(9));
        assert_eq!(config.game.camera.smoothing, 0.08);
        assert_eq!(config.world.interactives[0].id, "lighthouse");
        assert_eq!(config.world.interactives[0].lift, 0.0);
        assert_eq!(config.level_filter().unwrap(), LevelFilter::Debug);
    }

    #[test]
    fn bad_log_level_is_reported() {
        let config = AppConfig {
            log_level: "loud".into(),
            ..AppConfig::default()
        };
        assert!(matches!(config.level_filter(), Err(ConfigError::LogLevel(l)) if l == "loud"));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = AppConfig::load("definitely/not/here.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
        assert!(err.to_string().contains("here.toml"));
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let config = AppConfig::load_or_default("definitely/not/here.toml").unwrap();
        assert_eq!(config.spawn_x, 200.0);
    }

    #[test]
    fn malformed_file_is_a_parse_error() {
        let path = std::env::temp_dir().join("stroll_app_malformed_config.toml");
        fs::write(&path, "width = \"wide\"").unwrap();
        let err = AppConfig::load(&path).unwrap_err();
        let _ = fs::remove_file(&path);
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn builder_overrides_config() {
        struct Nothing;
        impl StrollApp for Nothing {}

        let app = App::new(Nothing)
            .with_title("Test")
            .with_size(640, 480)
            .with_log_level("warn");
        assert_eq!(app.config().title, "Test");
        assert_eq!((app.config().width, app.config().height), (640, 480));
        assert_eq!(app.config().log_level, "warn");
    }
}
