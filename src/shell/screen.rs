//! Screen identifiers - every navigable destination in the shell

use std::fmt;
use std::str::FromStr;
use serde::{Deserialize, Serialize};
use super::ShellError;

/// One navigable destination: a system view or a mock app
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Screen {
    Boot,
    Lock,
    Home,
    Notes,
    Camera,
    Gallery,
    Call,
    Drawing,
    AudioEraser,
    GeminiLive,
    Browser,
    Messages,
    Recents,
    Settings,
    Calculator,
    Clock,
    Music,
    MyFiles,
    DeviceCare,
    ArZone,
    KidsMode,
    ThemeStore,
    ModesRoutines,
    AppLibrary,
    QuickShare,
}

impl Screen {
    /// All screens in declaration order
    pub const ALL: [Screen; 25] = [
        Screen::Boot,
        Screen::Lock,
        Screen::Home,
        Screen::Notes,
        Screen::Camera,
        Screen::Gallery,
        Screen::Call,
        Screen::Drawing,
        Screen::AudioEraser,
        Screen::GeminiLive,
        Screen::Browser,
        Screen::Messages,
        Screen::Recents,
        Screen::Settings,
        Screen::Calculator,
        Screen::Clock,
        Screen::Music,
        Screen::MyFiles,
        Screen::DeviceCare,
        Screen::ArZone,
        Screen::KidsMode,
        Screen::ThemeStore,
        Screen::ModesRoutines,
        Screen::AppLibrary,
        Screen::QuickShare,
    ];

    /// Transient screens never become the "previous stable" screen
    /// and can never occupy a split-screen slot.
    pub fn is_transient(self) -> bool {
        matches!(self, Screen::Boot | Screen::Lock | Screen::Recents | Screen::KidsMode)
    }

    /// System views drawn by the shell itself rather than by a registry view
    pub fn is_system(self) -> bool {
        matches!(self, Screen::Boot | Screen::Lock | Screen::Home | Screen::Recents)
    }

    /// Only app screens may occupy a split-screen slot
    pub fn can_split(self) -> bool {
        !self.is_transient() && !self.is_system()
    }

    /// Canonical upper-case name (matches the serde representation)
    pub fn name(self) -> &'static str {
        match self {
            Screen::Boot => "BOOT",
            Screen::Lock => "LOCK",
            Screen::Home => "HOME",
            Screen::Notes => "NOTES",
            Screen::Camera => "CAMERA",
            Screen::Gallery => "GALLERY",
            Screen::Call => "CALL",
            Screen::Drawing => "DRAWING",
            Screen::AudioEraser => "AUDIO_ERASER",
            Screen::GeminiLive => "GEMINI_LIVE",
            Screen::Browser => "BROWSER",
            Screen::Messages => "MESSAGES",
            Screen::Recents => "RECENTS",
            Screen::Settings => "SETTINGS",
            Screen::Calculator => "CALCULATOR",
            Screen::Clock => "CLOCK",
            Screen::Music => "MUSIC",
            Screen::MyFiles => "MY_FILES",
            Screen::DeviceCare => "DEVICE_CARE",
            Screen::ArZone => "AR_ZONE",
            Screen::KidsMode => "KIDS_MODE",
            Screen::ThemeStore => "THEME_STORE",
            Screen::ModesRoutines => "MODES_ROUTINES",
            Screen::AppLibrary => "APP_LIBRARY",
            Screen::QuickShare => "QUICK_SHARE",
        }
    }

    /// Short names people type at the prompt (home grid labels)
    fn alias(name: &str) -> Option<Screen> {
        let screen = match name {
            "phone" => Screen::Call,
            "internet" => Screen::Browser,
            "calc" => Screen::Calculator,
            "files" => Screen::MyFiles,
            "themes" => Screen::ThemeStore,
            "care" => Screen::DeviceCare,
            "modes" => Screen::ModesRoutines,
            "kids" => Screen::KidsMode,
            "eraser" => Screen::AudioEraser,
            "sketch" => Screen::Drawing,
            "gemini" => Screen::GeminiLive,
            "library" => Screen::AppLibrary,
            "share" => Screen::QuickShare,
            "ar" => Screen::ArZone,
            _ => return None,
        };
        Some(screen)
    }
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Screen {
    type Err = ShellError;

    /// Case-insensitive; accepts `quick_share`, `quick-share`, `Quick Share` and grid aliases
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace(['-', ' '], "_");
        if let Some(screen) = Screen::ALL
            .iter()
            .copied()
            .find(|screen| screen.name().eq_ignore_ascii_case(&normalized))
        {
            return Ok(screen);
        }
        Screen::alias(&normalized).ok_or_else(|| ShellError::UnknownScreen(s.trim().to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transient_set() {
        let transient: Vec<Screen> = Screen::ALL.iter().copied().filter(|s| s.is_transient()).collect();
        assert_eq!(transient, vec![Screen::Boot, Screen::Lock, Screen::Recents, Screen::KidsMode]);
    }

    #[test]
    fn test_can_split() {
        let splittable: Vec<Screen> = Screen::ALL.iter().copied().filter(|s| s.can_split()).collect();
        assert_eq!(splittable.len(), 20);
        assert!(!Screen::Home.can_split());
        assert!(!Screen::KidsMode.can_split());
        assert!(Screen::Notes.can_split());
    }

    #[test]
    fn test_parse_names_and_aliases() {
        assert_eq!("notes".parse::<Screen>().unwrap(), Screen::Notes);
        assert_eq!("Quick Share".parse::<Screen>().unwrap(), Screen::QuickShare);
        assert_eq!("audio-eraser".parse::<Screen>().unwrap(), Screen::AudioEraser);
        assert_eq!("Phone".parse::<Screen>().unwrap(), Screen::Call);
        assert!(matches!("toaster".parse::<Screen>(), Err(ShellError::UnknownScreen(_))));
    }

    #[test]
    fn test_name_roundtrips_through_serde() {
        let json = serde_json::to_string(&Screen::ModesRoutines).unwrap();
        assert_eq!(json, "\"MODES_ROUTINES\"");
    }
}
