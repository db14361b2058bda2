/// Debug toggle that lets the snake pass through walls and through itself.
///
/// Owned by [`GameState`](super::GameState) and carried over resets.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct CheatMode(bool);

impl CheatMode {
    pub const fn new(active: bool) -> Self {
        CheatMode(active)
    }

    pub fn is_active(&self) -> bool {
        self.0
    }

    /// Flips the flag and returns the new value.
    pub fn toggle(&mut self) -> bool {
        self.0 = !self.0;
        self.0
    }
}
