//! Feature toggles
//!
//! Each toggle gates both the input read and the per-frame update of its
//! feature. A disabled feature never reads its input and never touches agent
//! state.

use serde::{Deserialize, Serialize};

/// Independent capability switches. All on by default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeatureToggles {
    pub pause: bool,
    pub sprint: bool,
    pub jump: bool,
    pub crouch: bool,
    pub head_bob: bool,
    pub slope_slide: bool,
    pub zoom: bool,
    pub interact: bool,
    pub footsteps: bool,
    pub climb: bool,
}

impl Default for FeatureToggles {
    fn default() -> Self {
        Self {
            pause: true,
            sprint: true,
            jump: true,
            crouch: true,
            head_bob: true,
            slope_slide: true,
            zoom: true,
            interact: true,
            footsteps: true,
            climb: true,
        }
    }
}

impl FeatureToggles {
    /// Everything off. Useful as a starting point for narrow tests.
    pub fn none() -> Self {
        Self {
            pause: false,
            sprint: false,
            jump: false,
            crouch: false,
            head_bob: false,
            slope_slide: false,
            zoom: false,
            interact: false,
            footsteps: false,
            climb: false,
        }
    }
}
