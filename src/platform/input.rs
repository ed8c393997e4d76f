//! Keyboard state to `TickInput`
//!
//! Jump is level-triggered (held key keeps trying, but only lands while
//! grounded). Restart is edge-triggered: one press, one restart.

use crate::sim::TickInput;

/// Detects the up→down transition of one key
#[derive(Debug, Clone, Copy, Default)]
pub struct KeyLatch {
    down: bool,
}

impl KeyLatch {
    /// Feed the current key state; true only on the frame the key went down
    pub fn update(&mut self, down: bool) -> bool {
        let pressed = down && !self.down;
        self.down = down;
        pressed
    }

    pub fn is_down(&self) -> bool {
        self.down
    }
}

/// Host key state collected each frame
#[derive(Debug, Clone, Default)]
pub struct InputState {
    restart: KeyLatch,
    pub idle_mode: bool,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build this frame's input from raw key state
    pub fn sample(&mut self, jump_down: bool, restart_down: bool) -> TickInput {
        TickInput {
            jump: jump_down,
            restart: self.restart.update(restart_down),
            idle_mode: self.idle_mode,
        }
    }
}
