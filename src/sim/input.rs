//! Controller snapshots
//!
//! Raw device events are translated elsewhere. The simulation only ever sees
//! one immutable [`Controller`] per tick, pulled from a [`ControllerSource`].

use serde::{Deserialize, Serialize};

/// Normalized controller state for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Controller {
    /// -1 = left, 0 = none, 1 = right
    pub move_x: i8,
    /// -1 = up, 0 = none, 1 = down
    pub move_y: i8,
    /// Fire / restart
    pub action_1: bool,
}

impl Controller {
    pub fn new(move_x: i8, move_y: i8, action_1: bool) -> Self {
        Self {
            move_x: move_x.signum(),
            move_y: move_y.signum(),
            action_1,
        }
    }

    pub fn fire() -> Self {
        Self::new(0, 0, true)
    }
}

/// Something that can be polled for the current controller state
pub trait ControllerSource {
    fn poll(&mut self) -> Controller;
}

/// Always reports the same state
impl ControllerSource for Controller {
    fn poll(&mut self) -> Controller {
        *self
    }
}

/// Plays back a fixed sequence, one entry per poll; the last entry repeats
#[derive(Debug, Clone, Default)]
pub struct ScriptedController {
    script: Vec<Controller>,
    cursor: usize,
}

impl ScriptedController {
    pub fn new(script: Vec<Controller>) -> Self {
        Self { script, cursor: 0 }
    }

    /// Hold `state` for `ticks` polls, then continue with the rest
    pub fn hold(mut self, state: Controller, ticks: usize) -> Self {
        self.script.extend(std::iter::repeat_n(state, ticks));
        self
    }

    pub fn polls(&self) -> usize {
        self.cursor
    }
}

impl ControllerSource for ScriptedController {
    fn poll(&mut self) -> Controller {
        let state = self
            .script
            .get(self.cursor)
            .or_else(|| self.script.last())
            .copied()
            .unwrap_or_default();
        self.cursor += 1;
        state
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_normalizes_axes() {
        let c = Controller::new(5, -3, false);
        assert_eq!(c.move_x, 1);
        assert_eq!(c.move_y, -1);
    }

    #[test]
    fn test_script_repeats_last() {
        let mut script = ScriptedController::default()
            .hold(Controller::new(1, 0, false), 2)
            .hold(Controller::fire(), 1);
        assert_eq!(script.poll().move_x, 1);
        assert_eq!(script.poll().move_x, 1);
        assert!(script.poll().action_1);
        assert!(script.poll().action_1);
        assert_eq!(script.polls(), 4);
    }

    #[test]
    fn test_empty_script_is_idle() {
        let mut script = ScriptedController::new(Vec::new());
        assert_eq!(script.poll(), Controller::default());
    }
}
