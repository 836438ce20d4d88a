//! Agent state shared across the frame
//!
//! Position and orientation live on the [`CharacterBody`](crate::physics::CharacterBody).
//! Everything else the frame steps read or write lives here, so a step later
//! in the frame sees what an earlier step changed.

use glam::Vec3;

/// Mutable per-agent state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AgentState {
    /// Current velocity. Lateral components come from input, the vertical
    /// component from gravity, jumps and slope assist.
    pub velocity: Vec3,
    /// Ground contact as reported by the body this frame
    pub grounded: bool,
    /// Set when a crouch transition completes, cleared when a stand completes
    pub crouching: bool,
    pub climbing: bool,
    pub paused: bool,
    /// Master gate for input-driven movement
    pub movement_enabled: bool,
}

impl Default for AgentState {
    fn default() -> Self {
        Self {
            velocity: Vec3::ZERO,
            grounded: false,
            crouching: false,
            climbing: false,
            paused: false,
            movement_enabled: true,
        }
    }
}

impl AgentState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Horizontal speed (ignores the vertical component).
    #[inline]
    pub fn lateral_speed(&self) -> f32 {
        Vec3::new(self.velocity.x, 0.0, self.velocity.z).length()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_state() {
        let state = AgentState::new();
        assert!(state.movement_enabled);
        assert!(!state.paused);
        assert!(!state.crouching);
        assert_eq!(state.velocity, Vec3::ZERO);
    }

    #[test]
    fn test_lateral_speed_ignores_vertical() {
        let state = AgentState {
            velocity: Vec3::new(3.0, -10.0, 4.0),
            ..Default::default()
        };
        assert!((state.lateral_speed() - 5.0).abs() < 1e-6);
    }
}
