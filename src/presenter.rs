//! Presentation seam
//!
//! The game engine never draws anything itself. It reports every state
//! change to a [`Presenter`], which may be a terminal UI, a log, or a test
//! recorder.

use crate::game::UpdateMessage;

/// Receives the updates produced by a [`crate::game::Game`]
pub trait Presenter {
    /// Handles one update
    ///
    /// Updates arrive in the order they happen. A presenter that needs the
    /// full picture (e.g. after a resize) can ask the game for
    /// [`crate::game::Game::state_message`] instead.
    ///
    /// # Arguments
    ///
    /// * `message` - The update to show
    fn present(&mut self, message: &UpdateMessage);
}

impl<P: Presenter + ?Sized> Presenter for &mut P {
    fn present(&mut self, message: &UpdateMessage) {
        (**self).present(message);
    }
}

/// Keeps every update, in order
impl Presenter for Vec<UpdateMessage> {
    fn present(&mut self, message: &UpdateMessage) {
        self.push(message.clone());
    }
}
