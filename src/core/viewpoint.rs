use crate::types::Viewpoint;

/// Turns a held-key level into single press edges.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ToggleLatch {
    held: bool,
}

impl ToggleLatch {
    /// Returns true only on the released -> pressed transition.
    pub fn press(&mut self) -> bool {
        let edge = !self.held;
        self.held = true;
        edge
    }

    pub fn release(&mut self) {
        self.held = false;
    }

    #[cfg(test)]
    pub(crate) fn is_held(&self) -> bool {
        self.held
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ViewpointController {
    active: Viewpoint,
    latch: ToggleLatch,
}

impl ViewpointController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active(&self) -> Viewpoint {
        self.active
    }

    /// Feeds this frame's toggle level; returns true if the viewpoint changed.
    pub fn update(&mut self, toggle_down: bool) -> bool {
        if !toggle_down {
            self.latch.release();
            return false;
        }
        if self.latch.press() {
            self.active = self.active.toggled();
            log::info!("viewpoint switched: {}", self.active.banner());
            true
        } else {
            false
        }
    }
}
