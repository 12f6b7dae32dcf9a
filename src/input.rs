//! Terminal input - `:commands` stand in for touches, anything else is
//! typed into the Galaxy AI side panel
//!
//! Parsing is context free. Resolving what a tap hits depends on the
//! screen showing and happens in [`resolve_tap`].

use thiserror::Error;

use crate::shell::registry::ScreenRegistry;
use crate::shell::{app_switcher, Screen, Shell, ShellAction, ShellError};

pub const HELP: &str = "\
:tap [app|n]       tap (lock: unlock, home: launch or library, recents: resume card)
:open <app>        jump straight to a screen
:home :back :recents
:split <app|n>     start split screen with an app or recents card
:close [app]       close the view on screen, or a recents card
:closeall          close all recents
:unlock :clock     lock screen tap / clock face toggle
:search            circle to search
:panel             toggle quick settings
:toggle <id>       flip a quick setting (wifi, bluetooth, dark, ai, torch, data)
:brightness <pct>  quick panel brightness
:gemini            Gemini Live
:assist <text>     ask Galaxy AI about the screen showing
:view [top|bottom] <input>  send input to the view (split slot)
:help :quit
anything else      Galaxy AI side panel";

#[derive(Debug, Error, PartialEq)]
pub enum InputError {
    #[error("unknown command ':{0}', try :help")]
    UnknownCommand(String),

    #[error(":{0} needs an argument")]
    MissingArgument(&'static str),

    #[error("brightness must be a number between 0 and 100, got '{0}'")]
    InvalidBrightness(String),

    #[error("no recents card '{0}'")]
    NoSuchCard(String),

    #[error("nothing to tap here")]
    NothingToTap,

    #[error("no split screen slot showing")]
    NoSplitSlot,

    #[error("{0} can't be opened directly")]
    NotOpenable(Screen),

    #[error(transparent)]
    Shell(#[from] ShellError),
}

/// Which split-screen slot `:view` is aimed at
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewSlot {
    Top,
    Bottom,
}

/// One parsed line of input
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Blank line
    Empty,
    /// Maps straight onto a shell action
    Action(ShellAction),
    /// Tap whose meaning depends on the current screen
    Tap(Option<String>),
    /// Split screen with an app name or recents card number
    Split(String),
    /// Close a recents card, or the current view if no target
    Close(Option<String>),
    Assist(String),
    View { slot: Option<ViewSlot>, input: String },
    /// Free text for the side panel
    Command(String),
    Help,
    Quit,
}

/// Parse one line of terminal input
pub fn parse(line: &str) -> Result<InputEvent, InputError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(InputEvent::Empty);
    }
    let Some(command) = line.strip_prefix(':') else {
        return Ok(InputEvent::Command(line.to_string()));
    };

    let (name, arg) = match command.split_once(char::is_whitespace) {
        Some((name, arg)) => (name, Some(arg.trim()).filter(|a| !a.is_empty())),
        None => (command, None),
    };
    let required = |name: &'static str| arg.map(str::to_string).ok_or(InputError::MissingArgument(name));

    let event = match name.to_lowercase().as_str() {
        "home" => InputEvent::Action(ShellAction::Home),
        "back" => InputEvent::Action(ShellAction::Back),
        "recents" => InputEvent::Action(ShellAction::Recents),
        "closeall" => InputEvent::Action(ShellAction::CloseAll),
        "unlock" => InputEvent::Action(ShellAction::Unlock),
        "clock" => InputEvent::Action(ShellAction::ToggleLockClock),
        "search" => InputEvent::Action(ShellAction::OpenSearch),
        "panel" => InputEvent::Action(ShellAction::ToggleQuickPanel),
        "gemini" => InputEvent::Action(ShellAction::GeminiLive),
        "open" => {
            let screen: Screen = required("open")?.parse()?;
            // Boot and lock are only reached through the boot timer and the shell itself
            if matches!(screen, Screen::Boot | Screen::Lock) {
                return Err(InputError::NotOpenable(screen));
            }
            InputEvent::Action(ShellAction::Open(screen))
        }
        "toggle" => InputEvent::Action(ShellAction::ToggleQuickSetting(required("toggle")?)),
        "brightness" => {
            let raw = required("brightness")?;
            let percent: f32 = raw
                .trim_end_matches('%')
                .parse()
                .map_err(|_| InputError::InvalidBrightness(raw.clone()))?;
            if !(0.0..=100.0).contains(&percent) {
                return Err(InputError::InvalidBrightness(raw));
            }
            InputEvent::Action(ShellAction::SetBrightness(percent / 100.0))
        }
        "tap" => InputEvent::Tap(arg.map(str::to_string)),
        "split" => InputEvent::Split(required("split")?),
        "close" => InputEvent::Close(arg.map(str::to_string)),
        "assist" => InputEvent::Assist(required("assist")?),
        "view" => {
            let raw = required("view")?;
            let (slot, input) = match raw.split_once(char::is_whitespace) {
                Some(("top", rest)) => (Some(ViewSlot::Top), rest.trim().to_string()),
                Some(("bottom", rest)) => (Some(ViewSlot::Bottom), rest.trim().to_string()),
                _ => (None, raw.clone()),
            };
            InputEvent::View { slot, input }
        }
        "help" | "?" => InputEvent::Help,
        "quit" | "q" | "exit" => InputEvent::Quit,
        other => return Err(InputError::UnknownCommand(other.to_string())),
    };
    Ok(event)
}

/// Work out what a tap on the current screen does
pub fn resolve_tap(shell: &Shell, target: Option<&str>) -> Result<ShellAction, InputError> {
    let registry = shell.registry();
    match (shell.current(), target) {
        (Screen::Lock, Some("clock")) => Ok(ShellAction::ToggleLockClock),
        (Screen::Lock, _) => Ok(ShellAction::Unlock),
        (Screen::Recents, Some(target)) => {
            let card = app_switcher::find_card(registry, target)
                .ok_or_else(|| InputError::NoSuchCard(target.to_string()))?;
            Ok(ShellAction::Open(card.screen))
        }
        (Screen::Home, Some(target)) if target.eq_ignore_ascii_case("gemini") => Ok(ShellAction::GeminiLive),
        (Screen::Home, Some(target)) if target.eq_ignore_ascii_case("search") => Ok(ShellAction::OpenSearch),
        (Screen::Home, Some(target)) if target.eq_ignore_ascii_case("library") => {
            Ok(ShellAction::Open(Screen::AppLibrary))
        }
        (Screen::Home, Some(target)) => Ok(ShellAction::SelectApp(grid_target(registry, target)?)),
        _ => Err(InputError::NothingToTap),
    }
}

/// Split from a recents card number or an app name
pub fn resolve_split(shell: &Shell, target: &str) -> Result<ShellAction, InputError> {
    if shell.current() == Screen::Recents {
        if let Some(card) = app_switcher::find_card(shell.registry(), target) {
            return Ok(ShellAction::StartSplit(card.screen));
        }
    }
    Ok(ShellAction::StartSplit(target.parse()?))
}

/// Screen a `:view` line is meant for
pub fn resolve_view(shell: &Shell, slot: Option<ViewSlot>) -> Result<Screen, InputError> {
    match (slot, shell.split().slots()) {
        (None, None) => Ok(shell.current()),
        (None | Some(ViewSlot::Top), Some((top, _))) => Ok(top),
        (Some(ViewSlot::Bottom), Some((_, bottom))) => Ok(bottom),
        (Some(_), None) => Err(InputError::NoSplitSlot),
    }
}

fn grid_target(registry: &ScreenRegistry, target: &str) -> Result<Screen, InputError> {
    let screen: Screen = target.parse()?;
    if registry.get(screen).map_or(false, |entry| entry.in_grid) {
        Ok(screen)
    } else {
        Err(InputError::Shell(ShellError::UnknownScreen(target.to_string())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(screen: Screen) -> Shell {
        let mut shell = Shell::default();
        shell.apply(ShellAction::BootComplete).unwrap();
        if screen != Screen::Lock {
            shell.apply(ShellAction::Unlock).unwrap();
            shell.open(screen);
        }
        shell
    }

    #[test]
    fn test_parse_free_text() {
        assert_eq!(parse("  open camera  ").unwrap(), InputEvent::Command("open camera".into()));
        assert_eq!(parse("").unwrap(), InputEvent::Empty);
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(parse(":home").unwrap(), InputEvent::Action(ShellAction::Home));
        assert_eq!(parse(":open gallery").unwrap(), InputEvent::Action(ShellAction::Open(Screen::Gallery)));
        assert_eq!(parse(":tap").unwrap(), InputEvent::Tap(None));
        assert_eq!(parse(":close notes").unwrap(), InputEvent::Close(Some("notes".into())));
        assert_eq!(
            parse(":brightness 50%").unwrap(),
            InputEvent::Action(ShellAction::SetBrightness(0.5))
        );
        assert_eq!(
            parse(":view bottom apply neon").unwrap(),
            InputEvent::View { slot: Some(ViewSlot::Bottom), input: "apply neon".into() }
        );
        assert_eq!(
            parse(":view close").unwrap(),
            InputEvent::View { slot: None, input: "close".into() }
        );
        assert_eq!(parse(":q").unwrap(), InputEvent::Quit);
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(parse(":fly").unwrap_err(), InputError::UnknownCommand("fly".into()));
        assert_eq!(parse(":split").unwrap_err(), InputError::MissingArgument("split"));
        assert!(matches!(parse(":brightness lots"), Err(InputError::InvalidBrightness(_))));
        assert!(matches!(parse(":brightness 150"), Err(InputError::InvalidBrightness(_))));
        assert!(matches!(
            parse(":open nowhere"),
            Err(InputError::Shell(ShellError::UnknownScreen(_)))
        ));
        assert_eq!(parse(":open boot").unwrap_err(), InputError::NotOpenable(Screen::Boot));
        assert_eq!(parse(":open lock").unwrap_err(), InputError::NotOpenable(Screen::Lock));
        assert!(parse(":open home").is_ok());
    }

    #[test]
    fn test_tap_depends_on_screen() {
        let lock = at(Screen::Lock);
        assert_eq!(resolve_tap(&lock, None).unwrap(), ShellAction::Unlock);
        assert_eq!(resolve_tap(&lock, Some("clock")).unwrap(), ShellAction::ToggleLockClock);

        let home = at(Screen::Home);
        assert_eq!(resolve_tap(&home, Some("camera")).unwrap(), ShellAction::SelectApp(Screen::Camera));
        assert_eq!(resolve_tap(&home, Some("gemini")).unwrap(), ShellAction::GeminiLive);
        assert_eq!(resolve_tap(&home, Some("library")).unwrap(), ShellAction::Open(Screen::AppLibrary));
        assert!(resolve_tap(&home, Some("ar")).is_err());
        assert_eq!(resolve_tap(&home, None).unwrap_err(), InputError::NothingToTap);

        let recents = at(Screen::Recents);
        assert_eq!(resolve_tap(&recents, Some("2")).unwrap(), ShellAction::Open(Screen::Browser));
        assert!(matches!(resolve_tap(&recents, Some("9")), Err(InputError::NoSuchCard(_))));
    }

    #[test]
    fn test_split_from_recents_card() {
        let recents = at(Screen::Recents);
        assert_eq!(resolve_split(&recents, "1").unwrap(), ShellAction::StartSplit(Screen::Messages));
        assert_eq!(resolve_split(&recents, "camera").unwrap(), ShellAction::StartSplit(Screen::Camera));
    }

    #[test]
    fn test_view_slots() {
        let mut shell = at(Screen::Home);
        assert_eq!(resolve_view(&shell, None).unwrap(), Screen::Home);
        assert_eq!(resolve_view(&shell, Some(ViewSlot::Top)).unwrap_err(), InputError::NoSplitSlot);

        shell.apply(ShellAction::StartSplit(Screen::Browser)).unwrap();
        shell.open(Screen::Notes);
        assert_eq!(resolve_view(&shell, None).unwrap(), Screen::Browser);
        assert_eq!(resolve_view(&shell, Some(ViewSlot::Bottom)).unwrap(), Screen::Notes);
    }
}
