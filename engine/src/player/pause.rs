//! Pause signal
//!
//! A paused flag plus a parameterless broadcast fired on every transition.
//! The controller does not know who listens; UI and other systems subscribe
//! and unsubscribe through [`ListenerId`]s.
//!
//! Transition order on entry: disable movement, notify, set paused.
//! On exit: enable movement, notify, clear paused.

use tracing::debug;

use super::AgentState;

/// Handle returned by [`PauseSignal::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type Listener = Box<dyn FnMut()>;

#[derive(Default)]
pub struct PauseSignal {
    listeners: Vec<(ListenerId, Listener)>,
    next_id: u64,
}

impl std::fmt::Debug for PauseSignal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PauseSignal")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl PauseSignal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, listener: impl FnMut() + 'static) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Returns `true` if the listener was registered.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(listener, _)| *listener != id);
        before != self.listeners.len()
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    fn notify(&mut self) {
        for (_, listener) in self.listeners.iter_mut() {
            listener();
        }
    }

    /// Flip the pause state and broadcast.
    ///
    /// # Returns
    /// The new paused flag.
    pub fn toggle(&mut self, state: &mut AgentState) -> bool {
        if !state.paused {
            state.movement_enabled = false;
            self.notify();
            state.paused = true;
        } else {
            state.movement_enabled = true;
            self.notify();
            state.paused = false;
        }
        debug!(paused = state.paused, listeners = self.listeners.len(), "pause toggled");
        state.paused
    }
}
