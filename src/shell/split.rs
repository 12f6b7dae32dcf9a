//! Split-screen session - two apps stacked top/bottom
//!
//! A session starts with only the top slot filled while the user picks the
//! second app from the home screen. Once the bottom slot is set both render.

use super::screen::Screen;

/// Split-screen session state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SplitScreen {
    pub active: bool,
    pub top: Screen,
    pub bottom: Option<Screen>,
}

impl Default for SplitScreen {
    fn default() -> Self {
        Self {
            active: false,
            top: Screen::Home,
            bottom: None,
        }
    }
}

impl SplitScreen {
    /// Start a new session with `top` pinned, discarding any previous one
    pub fn start(top: Screen) -> Self {
        Self {
            active: true,
            top,
            bottom: None,
        }
    }

    /// Waiting for the user to choose the bottom app
    pub fn is_picking(&self) -> bool {
        self.active && self.bottom.is_none()
    }

    /// Both slots assigned
    pub fn is_complete(&self) -> bool {
        self.active && self.bottom.is_some()
    }

    /// Fill the bottom slot if a pick is pending and the screen may occupy a slot.
    /// Returns true if the slot was assigned.
    pub fn assign_bottom(&mut self, screen: Screen) -> bool {
        if !self.is_picking() || !screen.can_split() {
            return false;
        }
        self.bottom = Some(screen);
        true
    }

    /// Reset to inactive
    pub fn teardown(&mut self) {
        *self = Self::default();
    }

    /// Screens currently shown, top first
    pub fn slots(&self) -> Option<(Screen, Screen)> {
        match (self.active, self.bottom) {
            (true, Some(bottom)) => Some((self.top, bottom)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pick_then_complete() {
        let mut split = SplitScreen::start(Screen::Browser);
        assert!(split.is_picking());
        assert!(split.assign_bottom(Screen::Notes));
        assert!(split.is_complete());
        assert_eq!(split.slots(), Some((Screen::Browser, Screen::Notes)));

        // No second pending-pick state once both slots are filled
        assert!(!split.assign_bottom(Screen::Gallery));
        assert_eq!(split.bottom, Some(Screen::Notes));
    }

    #[test]
    fn test_transient_cannot_fill_slot() {
        let mut split = SplitScreen::start(Screen::Messages);
        for screen in [Screen::Recents, Screen::Boot, Screen::Lock, Screen::KidsMode] {
            assert!(!split.assign_bottom(screen));
        }
        assert!(split.is_picking());
    }

    #[test]
    fn test_system_screen_cannot_fill_slot() {
        let mut split = SplitScreen::start(Screen::Messages);
        assert!(!split.assign_bottom(Screen::Home));
        assert!(split.is_picking());
        assert!(split.assign_bottom(Screen::Calculator));
        assert_eq!(split.slots(), Some((Screen::Messages, Screen::Calculator)));
    }

    #[test]
    fn test_teardown() {
        let mut split = SplitScreen::start(Screen::Gallery);
        split.assign_bottom(Screen::Camera);
        split.teardown();
        assert_eq!(split, SplitScreen::default());
        assert!(!split.active);
    }
}
