//! Desktop shell for Stroll.
//!
//! Opens a winit window, translates its events into [`InputState`] calls,
//! pumps the [`Scheduler`](stroll_core::Scheduler) with redraw requests and
//! hands every recorded frame to a [`Presenter`].
//!
//! The default presenter is [`NullPresenter`], which only counts frames: the
//! window stays blank until a real rasteriser is plugged in with
//! [`App::with_presenter`].
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use stroll_app::{App, AppConfig, Explorer};
//!
//! fn main() -> anyhow::Result<()> {
//!     let config = AppConfig::load_or_default("stroll.toml")?;
//!     App::new(Explorer::from_config(&config))
//!         .with_config(config)
//!         .run()
//! }
//! ```

pub mod builder;
pub mod context;
pub mod explorer;
pub mod logging;
pub mod presenter;
mod runner;
pub mod traits;

pub use builder::{App, AppConfig, ConfigError};
pub use context::AppContext;
pub use explorer::{CueLog, Explorer};
pub use presenter::{NullPresenter, Presenter};
pub use traits::StrollApp;

// ── Re-export the most-used stroll_core types ─────────────────────────────
pub use stroll_core::{
    DrawList,
    DrawSurface,
    GameConfig,
    InputState,
    KeyCode,
    Rect,
    Session,
    Vec2,
    ZoneLayout,
};
