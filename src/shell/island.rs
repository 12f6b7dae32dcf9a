//! Dynamic island - the ambient activity indicator around the camera cutout

/// What the island is currently showing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IslandState {
    #[default]
    Idle,
    /// Media playing (expanded pill with track info)
    Music,
    /// Timer running
    Timer,
}

impl IslandState {
    /// Next island state after the current screen changed to `current`.
    ///
    /// Music stays up after leaving the music app; the timer does not
    /// survive leaving the clock.
    pub fn next(self, current: super::Screen) -> Self {
        use super::Screen;
        match current {
            Screen::Music => IslandState::Music,
            Screen::Clock => IslandState::Timer,
            _ if self == IslandState::Timer => IslandState::Idle,
            _ => self,
        }
    }

    /// One-line rendering of the island
    pub fn render(self) -> &'static str {
        match self {
            IslandState::Idle => "(  ●  )",
            IslandState::Music => "(  ●  ♫ Over The Horizon · Samsung Orchestra  )",
            IslandState::Timer => "(  ●  ⏱ 04:59  )",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shell::Screen;

    #[test]
    fn test_music_is_sticky() {
        let state = IslandState::Idle.next(Screen::Music);
        assert_eq!(state, IslandState::Music);
        let state = state.next(Screen::Notes).next(Screen::Home).next(Screen::Recents);
        assert_eq!(state, IslandState::Music);
    }

    #[test]
    fn test_timer_clears_on_leave() {
        let state = IslandState::Idle.next(Screen::Clock);
        assert_eq!(state, IslandState::Timer);
        assert_eq!(state.next(Screen::Gallery), IslandState::Idle);
        assert_eq!(state.next(Screen::Music), IslandState::Music);
    }

    #[test]
    fn test_clock_replaces_music() {
        let state = IslandState::Music.next(Screen::Clock);
        assert_eq!(state, IslandState::Timer);
        // Music was lost when the timer took over
        assert_eq!(state.next(Screen::Home), IslandState::Idle);
    }
}
