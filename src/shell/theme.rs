//! Themes, modes and the wallpaper they select

use std::fmt;
use std::str::FromStr;
use serde::{Deserialize, Serialize};
use super::{Screen, ShellError};

/// Theme store selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Theme {
    #[default]
    Default,
    Neon,
    Pastel,
    DarkMatter,
}

impl Theme {
    pub const ALL: [Theme; 4] = [Theme::Default, Theme::Neon, Theme::Pastel, Theme::DarkMatter];

    /// Name shown in the theme store
    pub fn label(self) -> &'static str {
        match self {
            Theme::Default => "Default Dynamic",
            Theme::Neon => "Cyber Neon",
            Theme::Pastel => "Cotton Candy",
            Theme::DarkMatter => "Dark Matter",
        }
    }
}

impl FromStr for Theme {
    type Err = ShellError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let theme = match s.trim().to_lowercase().replace(['-', ' '], "_").as_str() {
            "default" | "default_dynamic" => Theme::Default,
            "neon" | "cyber_neon" => Theme::Neon,
            "pastel" | "cotton_candy" => Theme::Pastel,
            "dark_matter" | "dark" => Theme::DarkMatter,
            _ => return Err(ShellError::UnknownTheme(s.trim().to_string())),
        };
        Ok(theme)
    }
}

/// Modes & Routines selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Mode {
    #[default]
    None,
    Sleep,
    Work,
    Relax,
}

impl Mode {
    /// Selectable modes (None is reached by deselecting)
    pub const SELECTABLE: [Mode; 3] = [Mode::Sleep, Mode::Work, Mode::Relax];

    pub fn label(self) -> &'static str {
        match self {
            Mode::None => "None",
            Mode::Sleep => "Sleep",
            Mode::Work => "Work",
            Mode::Relax => "Relax",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Mode::None => "",
            Mode::Sleep => "Grayscale screen, DND on",
            Mode::Work => "Focus tools, Silence calls",
            Mode::Relax => "Calm colors, Music auto-play",
        }
    }

    /// Selecting the active mode again turns modes off
    pub fn toggled(self, selected: Mode) -> Mode {
        if self == selected { Mode::None } else { selected }
    }
}

impl FromStr for Mode {
    type Err = ShellError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mode = match s.trim().to_lowercase().as_str() {
            "none" | "off" => Mode::None,
            "sleep" => Mode::Sleep,
            "work" => Mode::Work,
            "relax" => Mode::Relax,
            _ => return Err(ShellError::UnknownMode(s.trim().to_string())),
        };
        Ok(mode)
    }
}

/// Background treatment behind the current screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wallpaper {
    Black,
    Grayscale,
    NeonGradient,
    PastelGradient,
    GalaxyGradient,
}

impl Wallpaper {
    /// Boot is always black, sleep mode wins over the theme
    pub fn select(screen: Screen, theme: Theme, mode: Mode) -> Self {
        if screen == Screen::Boot {
            return Wallpaper::Black;
        }
        if mode == Mode::Sleep {
            return Wallpaper::Grayscale;
        }
        match theme {
            Theme::Neon => Wallpaper::NeonGradient,
            Theme::Pastel => Wallpaper::PastelGradient,
            Theme::DarkMatter => Wallpaper::Black,
            Theme::Default => Wallpaper::GalaxyGradient,
        }
    }
}

impl fmt::Display for Wallpaper {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Wallpaper::Black => "black",
            Wallpaper::Grayscale => "zinc grayscale",
            Wallpaper::NeonGradient => "black → gray → green",
            Wallpaper::PastelGradient => "pink → purple → indigo",
            Wallpaper::GalaxyGradient => "blue → purple → orange",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wallpaper_precedence() {
        assert_eq!(Wallpaper::select(Screen::Boot, Theme::Neon, Mode::Sleep), Wallpaper::Black);
        assert_eq!(Wallpaper::select(Screen::Home, Theme::Neon, Mode::Sleep), Wallpaper::Grayscale);
        assert_eq!(Wallpaper::select(Screen::Home, Theme::Neon, Mode::Work), Wallpaper::NeonGradient);
        assert_eq!(Wallpaper::select(Screen::Lock, Theme::DarkMatter, Mode::None), Wallpaper::Black);
        assert_eq!(Wallpaper::select(Screen::Notes, Theme::Default, Mode::None), Wallpaper::GalaxyGradient);
    }

    #[test]
    fn test_mode_toggle() {
        assert_eq!(Mode::None.toggled(Mode::Work), Mode::Work);
        assert_eq!(Mode::Work.toggled(Mode::Work), Mode::None);
        assert_eq!(Mode::Work.toggled(Mode::Relax), Mode::Relax);
    }

    #[test]
    fn test_parse() {
        assert_eq!("Cyber Neon".parse::<Theme>().unwrap(), Theme::Neon);
        assert_eq!("dark-matter".parse::<Theme>().unwrap(), Theme::DarkMatter);
        assert_eq!("SLEEP".parse::<Mode>().unwrap(), Mode::Sleep);
        assert!("vapor".parse::<Theme>().is_err());
        assert!("party".parse::<Mode>().is_err());
    }
}
