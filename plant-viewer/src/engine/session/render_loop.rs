/// Per-frame redraw flag. Systems gated on it stop being scheduled as soon as
/// the loop is stopped, which is how a closed viewer stops rendering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderLoop {
    running: bool,
    frames: u64,
}

impl RenderLoop {
    pub fn start(&mut self) {
        self.running = true;
        self.frames = 0;
    }

    /// Stop the loop. Returns whether it was running.
    pub fn stop(&mut self) -> bool {
        std::mem::replace(&mut self.running, false)
    }

    /// Advance one frame. Returns `false` once the loop has been stopped.
    pub fn tick(&mut self) -> bool {
        if !self.running {
            return false;
        }
        self.frames += 1;
        true
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ticks_only_while_running() {
        let mut render_loop = RenderLoop::default();
        assert!(!render_loop.tick());

        render_loop.start();
        assert!(render_loop.tick());
        assert!(render_loop.tick());
        assert_eq!(render_loop.frames(), 2);

        assert!(render_loop.stop());
        assert!(!render_loop.tick());
        assert_eq!(render_loop.frames(), 2);
        assert!(!render_loop.stop());
    }

    #[test]
    fn restart_resets_frame_count() {
        let mut render_loop = RenderLoop::default();
        render_loop.start();
        render_loop.tick();
        render_loop.stop();
        render_loop.start();
        assert_eq!(render_loop.frames(), 0);
    }
}
