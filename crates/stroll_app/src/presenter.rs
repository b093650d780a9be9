//! The pixel side of a frame.
//!
//! The shell records each frame into a [`DrawList`]; a [`Presenter`] turns
//! that list into whatever the platform shows.  Rasterising is out of this
//! crate's hands.

use log::trace;
use stroll_core::DrawList;

pub trait Presenter {
    /// Show one finished frame.  An error ends the event loop.
    fn present(&mut self, frame: &DrawList, window_size: (u32, u32)) -> anyhow::Result<()>;
}

/// Presenter that discards frames, counting them.
#[derive(Debug, Default)]
pub struct NullPresenter {
    frames: u64,
}

impl NullPresenter {
    pub fn frames(&self) -> u64 {
        self.frames
    }
}

impl Presenter for NullPresenter {
    fn present(&mut self, frame: &DrawList, window_size: (u32, u32)) -> anyhow::Result<()> {
        self.frames += 1;
        trace!(
            "frame {}: {} commands at {}x{}",
            self.frames,
            frame.len(),
            window_size.0,
            window_size.1
        );
        Ok(())
    }
}
