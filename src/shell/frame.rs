//! Text frame - what the phone would show right now
//!
//! Layers, top to bottom: status bar, dynamic island, content, nav bar.
//! The search overlay and quick panel are drawn over the content, the
//! processing indicator under the nav bar.

use std::fmt;

use super::registry::ScreenRegistry;
use super::{app_switcher, lock_screen, Overlay, Screen, Shell};

const WIDTH: usize = 40;
const GRID_COLUMNS: usize = 4;

/// One rendered frame
#[derive(Debug, Clone, Default)]
pub struct Frame {
    pub lines: Vec<String>,
}

impl Frame {
    fn push(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }

    fn rule(&mut self) {
        self.lines.push("─".repeat(WIDTH));
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.lines.iter().any(|line| line.contains(needle))
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in &self.lines {
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

/// Render the whole screen for `shell`
pub fn render(shell: &Shell) -> Frame {
    let mut frame = Frame::default();
    frame.push(format!("╭ {} · wallpaper: {} ╮", shell.current(), shell.wallpaper()));

    if shell.shows_status_bar() {
        let status = shell.status();
        frame.push(format!(
            "{}  📶 5G  🔋 {}%  💓 {}",
            status.time, status.battery, status.energy_score
        ));
        frame.push(format!("{:^w$}", shell.island().render(), w = WIDTH));
    }
    frame.rule();

    if shell.quick_settings().open {
        frame.lines.extend(shell.quick_settings().render());
        frame.rule();
    }

    frame.lines.extend(content(shell));

    if shell.overlay() == Some(Overlay::Search) {
        frame.rule();
        frame.push("◯ Circle to Search");
        frame.push("  Circle, highlight or tap anything to search  [x]");
    }

    frame.rule();
    if shell.shows_nav_bar() {
        frame.push(format!("{:^w$}", "|||      ◯      <", w = WIDTH));
    }
    if !shell.pending().is_empty() {
        frame.push(format!("✨ Galaxy AI is processing... ({})", shell.pending().len()));
    }
    frame
}

fn content(shell: &Shell) -> Vec<String> {
    let registry = shell.registry();

    if let Some((top, bottom)) = shell.split().slots() {
        let mut lines = view(shell, top, true);
        lines.push("━━━━━━━━━━━━━━━━━ ═ ━━━━━━━━━━━━━━━━━━".to_string());
        lines.extend(view(shell, bottom, true));
        return lines;
    }

    match shell.current() {
        Screen::Boot => vec![
            String::new(),
            format!("{:^w$}", "SAMSUNG", w = WIDTH),
            format!("{:^w$}", "Galaxy AI", w = WIDTH),
            String::new(),
        ],
        Screen::Lock => {
            let status = shell.status();
            lock_screen::render(&status.time, shell.lock_clock(), status.battery)
        }
        Screen::Home => {
            let mut lines = Vec::new();
            if shell.split().is_picking() {
                lines.push(format!(
                    "⧉ {} pinned · Select second app",
                    registry.label(shell.split().top)
                ));
                lines.push(String::new());
            }
            lines.push("Now Brief".to_string());
            lines.push(format!("  {}", shell.now_brief().unwrap_or("Loading Now Brief...")));
            lines.push(String::new());
            lines.extend(home_grid(registry));
            lines.push(String::new());
            lines.push("  [ G  Search...            ✧ Gemini ]".to_string());
            lines
        }
        Screen::Recents => app_switcher::render(registry),
        other => view(shell, other, false),
    }
}

fn view(shell: &Shell, screen: Screen, in_split: bool) -> Vec<String> {
    let registry = shell.registry();
    let ctx = registry.context(screen, shell.theme(), shell.mode(), in_split);
    registry.render(screen, &ctx)
}

fn home_grid(registry: &ScreenRegistry) -> Vec<String> {
    let cells: Vec<String> = registry
        .grid()
        .map(|entry| format!("{} {:<8}", entry.icon, entry.label))
        .collect();
    cells.chunks(GRID_COLUMNS).map(|row| row.join(" ")).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shell::ShellAction;

    fn unlocked() -> Shell {
        let mut shell = Shell::default();
        shell.apply(ShellAction::BootComplete).unwrap();
        shell.apply(ShellAction::Unlock).unwrap();
        shell
    }

    #[test]
    fn test_boot_frame_has_no_bars() {
        let frame = render(&Shell::default());
        assert!(frame.contains("SAMSUNG"));
        assert!(frame.contains("wallpaper: black"));
        assert!(!frame.contains("🔋"));
        assert!(!frame.contains("◯      <"));
    }

    #[test]
    fn test_home_frame() {
        let frame = render(&unlocked());
        assert!(frame.contains("🔋 100%"));
        assert!(frame.contains("Loading Now Brief..."));
        assert!(frame.contains("Phone"));
        assert!(frame.contains("◯      <"));
        assert!(!frame.contains("processing"));
    }

    #[test]
    fn test_split_frames() {
        let mut shell = unlocked();
        shell.apply(ShellAction::StartSplit(Screen::Browser)).unwrap();
        assert!(render(&shell).contains("Internet pinned · Select second app"));

        shell.open(Screen::Notes);
        let frame = render(&shell);
        assert!(frame.contains("samsung.com/galaxy-ai"));
        assert!(frame.contains("Samsung Notes"));
    }

    #[test]
    fn test_overlay_and_indicator() {
        let mut shell = unlocked();
        shell.apply(ShellAction::OpenSearch).unwrap();
        shell.track_request(1);
        let frame = render(&shell);
        assert!(frame.contains("Circle to Search"));
        assert!(frame.contains("Galaxy AI is processing... (1)"));
    }

    #[test]
    fn test_lock_frame_hides_nav_bar() {
        let mut shell = Shell::default();
        shell.apply(ShellAction::BootComplete).unwrap();
        let frame = render(&shell);
        assert!(frame.contains("tap to unlock"));
        assert!(!frame.contains("◯      <"));
    }
}
