//! Headless renderer that writes actor views to the log

use scene_engine::scene::{ActorView, Planar, Renderer};

/// Logs every `log_every`-th frame at debug level, one line per actor
#[derive(Debug)]
pub struct LogRenderer {
    log_every: u64,
    frame: u64,
    drawn_this_frame: usize,
}

impl LogRenderer {
    /// Renderer logging one frame out of every `log_every`
    pub fn new(log_every: u64) -> Self {
        Self { log_every: log_every.max(1), frame: 0, drawn_this_frame: 0 }
    }

    /// Frames completed so far
    pub fn frames(&self) -> u64 {
        self.frame
    }

    fn logging_this_frame(&self) -> bool {
        self.frame % self.log_every == 0
    }
}

impl Renderer<Planar> for LogRenderer {
    fn begin_frame(&mut self) {
        self.drawn_this_frame = 0;
        if self.logging_this_frame() {
            log::debug!("--- frame {} ---", self.frame);
        }
    }

    fn draw_actor(&mut self, view: &ActorView<Planar>) {
        self.drawn_this_frame += 1;
        if self.logging_this_frame() {
            log::debug!(
                "{} at ({:6.2}, {:6.2}) facing ({:5.2}, {:5.2}) rgba({}, {}, {}, {})",
                view.icon,
                view.position.x,
                view.position.y,
                view.forward.x,
                view.forward.y,
                view.color.r,
                view.color.g,
                view.color.b,
                view.color.a
            );
        }
    }

    fn end_frame(&mut self) {
        log::trace!("Drew {} actors", self.drawn_this_frame);
        self.frame += 1;
    }
}
