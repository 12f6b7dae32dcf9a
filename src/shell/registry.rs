//! Screen registry - one entry per mock app
//!
//! Every entry carries a view plus a capability record. A view can always
//! ask to be closed; theme and mode changes are only possible through the
//! capabilities granted to its entry. Views never touch shell state: they
//! queue [`ShellAction`]s on their [`ViewContext`] and the shell applies them.

use std::collections::HashMap;

use super::log::LogSender;
use super::{Mode, Screen, ShellAction, ShellError, Theme};
use crate::ai::AiContext;

/// Extra abilities a view may be handed beyond "request close"
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Capabilities {
    pub set_theme: bool,
    pub set_mode: bool,
}

/// What a view gets to see and do
#[derive(Debug)]
pub struct ViewContext {
    screen: Screen,
    capabilities: Capabilities,
    theme: Theme,
    mode: Mode,
    in_split: bool,
    actions: Vec<ShellAction>,
}

impl ViewContext {
    pub fn new(screen: Screen, capabilities: Capabilities, theme: Theme, mode: Mode, in_split: bool) -> Self {
        Self {
            screen,
            capabilities,
            theme,
            mode,
            in_split,
            actions: Vec::new(),
        }
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    /// Rendered inside a split-screen slot
    pub fn in_split(&self) -> bool {
        self.in_split
    }

    /// Current mode, only visible to views allowed to change it
    pub fn mode(&self) -> Option<Mode> {
        self.capabilities.set_mode.then_some(self.mode)
    }

    /// Current theme, only visible to views allowed to change it
    pub fn theme(&self) -> Option<Theme> {
        self.capabilities.set_theme.then_some(self.theme)
    }

    pub fn request_close(&mut self) {
        self.actions.push(ShellAction::RequestClose);
    }

    pub fn set_theme(&mut self, theme: Theme) -> Result<(), ShellError> {
        if !self.capabilities.set_theme {
            return Err(ShellError::CapabilityDenied {
                screen: self.screen,
                capability: "set theme",
            });
        }
        self.actions.push(ShellAction::SetTheme(theme));
        Ok(())
    }

    pub fn set_mode(&mut self, mode: Mode) -> Result<(), ShellError> {
        if !self.capabilities.set_mode {
            return Err(ShellError::CapabilityDenied {
                screen: self.screen,
                capability: "set mode",
            });
        }
        self.actions.push(ShellAction::SetMode(mode));
        Ok(())
    }

    /// Drain the actions queued by the view
    pub fn take_actions(&mut self) -> Vec<ShellAction> {
        std::mem::take(&mut self.actions)
    }
}

/// A mock app screen
pub trait ScreenView: Send {
    /// Body lines for the content area
    fn render(&self, ctx: &ViewContext) -> Vec<String>;

    /// Handle a line of input aimed at this view. Returns false if ignored.
    fn handle_input(&self, input: &str, ctx: &mut ViewContext) -> Result<bool, ShellError> {
        match input.trim() {
            "close" | "x" => {
                ctx.request_close();
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}

/// Static placeholder view - a title and a few lines of copy
pub struct AppView {
    title: &'static str,
    body: &'static [&'static str],
}

impl AppView {
    pub fn new(title: &'static str, body: &'static [&'static str]) -> Self {
        Self { title, body }
    }
}

impl ScreenView for AppView {
    fn render(&self, _ctx: &ViewContext) -> Vec<String> {
        let mut lines = vec![format!("{}{:>w$}", self.title, "[x]", w = 34 - self.title.chars().count().min(30))];
        lines.push(String::new());
        lines.extend(self.body.iter().map(|line| line.to_string()));
        lines
    }
}

/// Galaxy Themes - needs the set-theme capability
pub struct ThemeStoreView;

impl ScreenView for ThemeStoreView {
    fn render(&self, ctx: &ViewContext) -> Vec<String> {
        let current = ctx.theme();
        let mut lines = vec!["Galaxy Themes".to_string(), "Featured · Top Picks".to_string(), String::new()];
        for theme in Theme::ALL {
            let marker = if current == Some(theme) { "●" } else { "○" };
            lines.push(format!("{} {}", marker, theme.label()));
        }
        lines
    }

    fn handle_input(&self, input: &str, ctx: &mut ViewContext) -> Result<bool, ShellError> {
        let input = input.trim();
        if matches!(input, "close" | "x") {
            ctx.request_close();
            return Ok(true);
        }
        let name = input.strip_prefix("apply ").unwrap_or(input);
        let theme: Theme = name.parse()?;
        ctx.set_theme(theme)?;
        Ok(true)
    }
}

/// Modes & Routines - needs the set-mode capability
pub struct ModesView;

impl ScreenView for ModesView {
    fn render(&self, ctx: &ViewContext) -> Vec<String> {
        let active = ctx.mode().unwrap_or_default();
        let mut lines = vec!["Modes & Routines".to_string(), String::new()];
        for mode in Mode::SELECTABLE {
            let marker = if mode == active { "◉" } else { "○" };
            lines.push(format!("{} {:<6} {}", marker, mode.label(), mode.description()));
        }
        lines
    }

    fn handle_input(&self, input: &str, ctx: &mut ViewContext) -> Result<bool, ShellError> {
        let input = input.trim();
        if matches!(input, "close" | "x") {
            ctx.request_close();
            return Ok(true);
        }
        let selected: Mode = input.parse()?;
        let next = ctx.mode().unwrap_or_default().toggled(selected);
        ctx.set_mode(next)?;
        Ok(true)
    }
}

/// Registry entry for one screen
pub struct ScreenEntry {
    pub screen: Screen,
    pub label: &'static str,
    pub icon: &'static str,
    /// Log line written when launched from the home grid
    pub launch_log: Option<(LogSender, &'static str)>,
    pub in_grid: bool,
    pub in_recents: bool,
    pub ai_context: AiContext,
    pub capabilities: Capabilities,
    view: Box<dyn ScreenView>,
}

impl ScreenEntry {
    pub fn new(screen: Screen, label: &'static str, icon: &'static str, view: Box<dyn ScreenView>) -> Self {
        Self {
            screen,
            label,
            icon,
            launch_log: None,
            in_grid: false,
            in_recents: false,
            ai_context: AiContext::General,
            capabilities: Capabilities::default(),
            view,
        }
    }

    /// Show on the home grid, logging `message` when tapped
    pub fn grid(mut self, sender: LogSender, message: &'static str) -> Self {
        self.in_grid = true;
        self.launch_log = Some((sender, message));
        self
    }

    pub fn recents(mut self) -> Self {
        self.in_recents = true;
        self
    }

    pub fn ai(mut self, context: AiContext) -> Self {
        self.ai_context = context;
        self
    }

    pub fn capabilities(mut self, capabilities: Capabilities) -> Self {
        self.capabilities = capabilities;
        self
    }
}

/// All app screens and how to draw them
pub struct ScreenRegistry {
    entries: HashMap<Screen, ScreenEntry>,
    /// Home grid order
    grid: Vec<Screen>,
    /// Recents card order
    recents: Vec<Screen>,
}

impl ScreenRegistry {
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
            grid: Vec::new(),
            recents: Vec::new(),
        }
    }

    /// Add or replace an entry. System screens are drawn by the shell and rejected.
    pub fn register(&mut self, entry: ScreenEntry) -> bool {
        if entry.screen.is_system() {
            tracing::warn!("Refusing to register view for system screen {}", entry.screen);
            return false;
        }
        let screen = entry.screen;
        self.grid.retain(|s| *s != screen);
        self.recents.retain(|s| *s != screen);
        if entry.in_grid {
            self.grid.push(screen);
        }
        if entry.in_recents {
            self.recents.push(screen);
        }
        self.entries.insert(screen, entry);
        true
    }

    pub fn get(&self, screen: Screen) -> Option<&ScreenEntry> {
        self.entries.get(&screen)
    }

    pub fn grid(&self) -> impl Iterator<Item = &ScreenEntry> {
        self.grid.iter().filter_map(|s| self.entries.get(s))
    }

    pub fn recents(&self) -> impl Iterator<Item = &ScreenEntry> {
        self.recents.iter().filter_map(|s| self.entries.get(s))
    }

    pub fn label(&self, screen: Screen) -> &'static str {
        self.get(screen).map(|e| e.label).unwrap_or("App")
    }

    pub fn ai_context(&self, screen: Screen) -> AiContext {
        self.get(screen).map(|e| e.ai_context).unwrap_or_default()
    }

    /// Context a view of `screen` runs with
    pub fn context(&self, screen: Screen, theme: Theme, mode: Mode, in_split: bool) -> ViewContext {
        let capabilities = self.get(screen).map(|e| e.capabilities).unwrap_or_default();
        ViewContext::new(screen, capabilities, theme, mode, in_split)
    }

    /// Render the content area for `screen`
    pub fn render(&self, screen: Screen, ctx: &ViewContext) -> Vec<String> {
        match self.get(screen) {
            Some(entry) => entry.view.render(ctx),
            None => vec!["App Content".to_string()],
        }
    }

    /// Route a line of input to the view for `screen`
    pub fn handle_input(&self, screen: Screen, input: &str, ctx: &mut ViewContext) -> Result<bool, ShellError> {
        match self.get(screen) {
            Some(entry) => entry.view.handle_input(input, ctx),
            None => Ok(false),
        }
    }
}

impl Default for ScreenRegistry {
    /// The stock set of mock apps
    fn default() -> Self {
        use LogSender::{Ai, System};

        let app = |title: &'static str, body: &'static [&'static str]| -> Box<dyn ScreenView> {
            Box::new(AppView::new(title, body))
        };

        let entries = [
            ScreenEntry::new(Screen::Call, "Phone", "☎", app("Phone", &["Live Translate ready", "Type :assist <line> to translate"]))
                .grid(System, "Opening Phone app...")
                .ai(AiContext::Call),
            ScreenEntry::new(Screen::Messages, "Messages", "✉", app("Messages", &["Mom: Dinner at 8?", "Alex: Sent the files 👍"]))
                .grid(Ai, "Opening Messages...")
                .recents(),
            ScreenEntry::new(Screen::Browser, "Internet", "🌐", app("Internet", &["samsung.com/galaxy-ai", "Browsing Assist: summarize this page"]))
                .grid(Ai, "Browser opening...")
                .recents(),
            ScreenEntry::new(Screen::Notes, "Notes", "✎", app("Samsung Notes", &["Meeting notes · Q3 roadmap", "Note Assist: :assist summarize|format|translate"]))
                .grid(System, "Opening Notes...")
                .recents()
                .ai(AiContext::Notes),
            ScreenEntry::new(Screen::Camera, "Camera", "◉", app("Camera", &["PHOTO  VIDEO  PORTRAIT  PRO", "ProVisual Engine ready"]))
                .grid(Ai, "Opening Camera Simulator... 📸"),
            ScreenEntry::new(Screen::Gallery, "Gallery", "▣", app("Gallery", &["3 photos · Dhaka skyline, Beach, Portrait", "Generative Edit: :assist <edit>"]))
                .grid(System, "Opening Gallery...")
                .recents()
                .ai(AiContext::PhotoEdit),
            ScreenEntry::new(Screen::Calculator, "Calc", "±", app("Calculator", &["0"]))
                .grid(System, "Opening Calculator..."),
            ScreenEntry::new(Screen::Settings, "Settings", "⚙", app("Settings", &["Connections · Display · Galaxy AI · Battery"]))
                .grid(System, "Opening Settings..."),
            ScreenEntry::new(Screen::Clock, "Clock", "◷", app("Clock", &["Timer 05:00 running"]))
                .grid(System, "Opening Clock..."),
            ScreenEntry::new(Screen::Music, "Music", "♫", app("Music", &["Over The Horizon", "Samsung Orchestra  ▶"]))
                .grid(System, "Opening Music..."),
            ScreenEntry::new(Screen::MyFiles, "Files", "▤", app("My Files", &["Internal storage · 128 GB free"]))
                .grid(System, "Opening My Files..."),
            ScreenEntry::new(Screen::ThemeStore, "Themes", "✦", Box::new(ThemeStoreView))
                .grid(System, "Opening Theme Store...")
                .capabilities(Capabilities { set_theme: true, set_mode: false }),
            ScreenEntry::new(Screen::DeviceCare, "Care", "⛨", app("Device Care", &["Optimized · Battery 100% · Storage OK"]))
                .grid(System, "Opening Device Care..."),
            ScreenEntry::new(Screen::QuickShare, "Quick Share", "⇪", app("Quick Share", &["Searching for nearby devices..."]))
                .grid(System, "Searching for devices..."),
            ScreenEntry::new(Screen::ModesRoutines, "Modes", "⚡", Box::new(ModesView))
                .grid(System, "Opening Modes & Routines...")
                .capabilities(Capabilities { set_theme: false, set_mode: true }),
            ScreenEntry::new(Screen::KidsMode, "Kids", "☺", app("Kids Mode", &["Safe space for little explorers"]))
                .grid(System, "Entering Kids Mode..."),
            ScreenEntry::new(Screen::AudioEraser, "Eraser", "≋", app("Audio Eraser", &["Voice · Music · Wind · Noise"]))
                .grid(System, "Opening Audio Eraser...")
                .ai(AiContext::AudioEraser),
            ScreenEntry::new(Screen::Drawing, "Sketch", "✐", app("Sketch to Image", &["Draw something, then :assist <prompt>"]))
                .grid(System, "Opening Sketch to Image...")
                .ai(AiContext::Drawing),
            ScreenEntry::new(Screen::GeminiLive, "Gemini", "✧", app("Gemini Live", &["I'm listening. How can I help you today?"])),
            ScreenEntry::new(Screen::ArZone, "AR Zone", "◈", app("AR Zone", &["AR Emoji · AR Doodle · Deco Pic"])),
            ScreenEntry::new(Screen::AppLibrary, "App Library", "▦", app("App Library", &["Productivity · Social · Creativity · Utilities"])),
        ];

        let mut registry = Self::new();
        for entry in entries {
            registry.register(entry);
        }
        registry
    }
}
