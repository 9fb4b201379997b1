/// Controls for a single tick, already decoded from whatever device the
/// front end polls.  Every flag means "held during this tick".
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InputState {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    /// Halves movement speed for precise dodging.
    pub slow: bool,
    pub fire: bool,
    /// Shot-mode switch (only the Switch archetype reacts to it).
    pub toggle: bool,
}

impl InputState {
    /// Horizontal and vertical direction, each in {-1, 0, 1}.
    pub fn direction(&self) -> (f32, f32) {
        let dx = self.right as i8 - self.left as i8;
        let dy = self.down as i8 - self.up as i8;
        (dx as f32, dy as f32)
    }
}
