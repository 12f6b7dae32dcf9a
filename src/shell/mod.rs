//! Simulated phone shell - navigation state and everything that mutates it
//!
//! Components:
//! - Boot splash and lock screen
//! - Home screen with app grid and the Now Brief widget
//! - Recents (card list with split-screen trigger)
//! - Split screen (two apps stacked)
//! - Quick settings panel and circle-to-search overlay
//! - Dynamic island
//! - Galaxy AI side panel log and command routing
//!
//! All state lives in [`Shell`]. Presentation code never writes fields; it
//! sends [`ShellAction`]s through [`Shell::apply`].

pub mod app_switcher;
pub mod command;
pub mod frame;
pub mod island;
pub mod lock_screen;
pub mod log;
pub mod quick_settings;
pub mod registry;
pub mod screen;
pub mod split;
pub mod theme;

use thiserror::Error;

use crate::ai::RequestId;
use crate::config::{SimConfig, StatusConfig};
use command::{CommandRoute, Dispatch, PendingRequests, TextRequest};
use island::IslandState;
use lock_screen::LockClockStyle;
use log::{CommandLog, LogSender};
use quick_settings::QuickSettingsPanel;
use split::SplitScreen;

pub use registry::ScreenRegistry;
pub use screen::Screen;
pub use theme::{Mode, Theme, Wallpaper};

/// Lines written to the side panel while booting
const BOOT_BANNER: [&str; 2] = [
    "📱 **Try Galaxy AI Simulator – Powered by One UI 7!** ✨",
    "🌌 *Booting up your virtual Galaxy S25 Ultra... Fluid animation loading...* 🌟",
];

const LOCK_BANNER: &str = "**Current Screen: Lock Screen → Home Screen Unlocked!**\n\
- Wallpaper: Dynamic starry galaxy transitioning to morning glow 🌅\n\
- Status Bar: 🔋 100% | 📶 5G Ultra | 🕐 8:30 AM | 🌤️ 25°C Sunny | 💓 Energy Score: 85/100";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ShellError {
    #[error("unknown screen '{0}'")]
    UnknownScreen(String),

    #[error("unknown theme '{0}'")]
    UnknownTheme(String),

    #[error("unknown mode '{0}'")]
    UnknownMode(String),

    #[error("unknown quick setting '{0}'")]
    UnknownQuickSetting(String),

    #[error("{screen} is not allowed to {capability}")]
    CapabilityDenied {
        screen: Screen,
        capability: &'static str,
    },
}

/// Overlays drawn above the current screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overlay {
    /// Circle to Search
    Search,
}

/// Everything that can happen to the shell
#[derive(Debug, Clone, PartialEq)]
pub enum ShellAction {
    /// Boot splash timer fired
    BootComplete,
    /// Tap on the lock screen
    Unlock,
    /// Tap on the lock screen clock
    ToggleLockClock,
    /// Navigate straight to a screen
    Open(Screen),
    /// Tap on a home grid icon
    SelectApp(Screen),
    /// Nav bar home button
    Home,
    /// Nav bar back button
    Back,
    /// Nav bar recents button
    Recents,
    /// Split-screen button on a recents card
    StartSplit(Screen),
    /// Close button on a recents card
    CloseApp(Screen),
    /// "Close All" in recents
    CloseAll,
    /// A view asked to be closed
    RequestClose,
    OpenSearch,
    CloseOverlay,
    /// Gemini icon on the home grid
    GeminiLive,
    ToggleQuickPanel,
    CloseQuickPanel,
    ToggleQuickSetting(String),
    SetBrightness(f32),
    SetTheme(Theme),
    SetMode(Mode),
    /// A text request settled
    AiReply { id: RequestId, text: String },
}

/// What the back button ended up doing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackOutcome {
    ClosedOverlay,
    ClosedSplit,
    AlreadyHome,
    WentHome,
}

/// Navigation state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Navigation {
    pub current: Screen,
    /// Last non-transient screen
    pub previous_stable: Screen,
}

impl Default for Navigation {
    fn default() -> Self {
        Self {
            current: Screen::Boot,
            previous_stable: Screen::Home,
        }
    }
}

/// Shell state - owns navigation, split screen, island and the side panel log
pub struct Shell {
    registry: ScreenRegistry,
    nav: Navigation,
    split: SplitScreen,
    island: IslandState,
    overlay: Option<Overlay>,
    quick_settings: QuickSettingsPanel,
    lock_clock: LockClockStyle,
    theme: Theme,
    mode: Mode,
    status: StatusConfig,
    log: CommandLog,
    pending: PendingRequests,
    now_brief: Option<String>,
    now_brief_requested: bool,
}

impl Shell {
    pub fn new(config: &SimConfig) -> Self {
        Self::with_registry(config, ScreenRegistry::default())
    }

    pub fn with_registry(config: &SimConfig, registry: ScreenRegistry) -> Self {
        let mut log = CommandLog::new();
        for line in BOOT_BANNER {
            log.push(LogSender::System, line);
        }

        tracing::info!(theme = ?config.shell.theme, mode = ?config.shell.mode, "Shell booting");

        Self {
            registry,
            nav: Navigation::default(),
            split: SplitScreen::default(),
            island: IslandState::default(),
            overlay: None,
            quick_settings: QuickSettingsPanel::new(),
            lock_clock: LockClockStyle::default(),
            theme: config.shell.theme,
            mode: config.shell.mode,
            status: config.status.clone(),
            log,
            pending: PendingRequests::default(),
            now_brief: None,
            now_brief_requested: false,
        }
    }

    // ------------------------------------------------------------------
    // Read access
    // ------------------------------------------------------------------

    pub fn registry(&self) -> &ScreenRegistry {
        &self.registry
    }

    pub fn current(&self) -> Screen {
        self.nav.current
    }

    pub fn navigation(&self) -> Navigation {
        self.nav
    }

    pub fn previous_stable(&self) -> Screen {
        self.nav.previous_stable
    }

    pub fn split(&self) -> &SplitScreen {
        &self.split
    }

    pub fn island(&self) -> IslandState {
        self.island
    }

    pub fn overlay(&self) -> Option<Overlay> {
        self.overlay
    }

    pub fn quick_settings(&self) -> &QuickSettingsPanel {
        &self.quick_settings
    }

    pub fn lock_clock(&self) -> LockClockStyle {
        self.lock_clock
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn status(&self) -> &StatusConfig {
        &self.status
    }

    pub fn log(&self) -> &CommandLog {
        &self.log
    }

    pub fn pending(&self) -> &PendingRequests {
        &self.pending
    }

    pub fn now_brief(&self) -> Option<&str> {
        self.now_brief.as_deref()
    }

    pub fn wallpaper(&self) -> Wallpaper {
        Wallpaper::select(self.nav.current, self.theme, self.mode)
    }

    pub fn shows_status_bar(&self) -> bool {
        !matches!(self.nav.current, Screen::Boot | Screen::KidsMode)
    }

    pub fn shows_nav_bar(&self) -> bool {
        !matches!(self.nav.current, Screen::Boot | Screen::Lock | Screen::KidsMode)
    }

    /// Home is showing and the Now Brief has not been requested yet
    pub fn wants_now_brief(&self) -> bool {
        self.nav.current == Screen::Home && !self.now_brief_requested
    }

    // ------------------------------------------------------------------
    // Transitions
    // ------------------------------------------------------------------

    /// Single place `current` changes; keeps history and island in step
    fn set_screen(&mut self, screen: Screen) {
        let from = self.nav.current;
        self.nav.current = screen;
        if !screen.is_transient() {
            self.nav.previous_stable = screen;
        }
        self.island = self.island.next(screen);
        if from != screen {
            tracing::info!("Screen {} -> {}", from, screen);
        }
    }

    /// Open a screen. While a split-screen pick is pending, an app screen
    /// fills the bottom slot instead and `current` stays put.
    pub fn open(&mut self, screen: Screen) {
        if self.split.assign_bottom(screen) {
            tracing::info!("Split screen: {} / {}", self.split.top, screen);
            return;
        }
        self.set_screen(screen);
    }

    /// Tear down split screen and show home
    pub fn go_home(&mut self) {
        if self.split.active {
            tracing::debug!("Tearing down split screen");
        }
        self.split.teardown();
        self.set_screen(Screen::Home);
    }

    /// Back never returns to the previous screen: it closes the overlay,
    /// tears down split screen, or goes home.
    pub fn go_back(&mut self) -> BackOutcome {
        if self.overlay.take().is_some() {
            return BackOutcome::ClosedOverlay;
        }
        if self.split.active {
            self.go_home();
            return BackOutcome::ClosedSplit;
        }
        if self.nav.current == Screen::Home {
            return BackOutcome::AlreadyHome;
        }
        self.go_home();
        BackOutcome::WentHome
    }

    pub fn open_recents(&mut self) {
        self.set_screen(Screen::Recents);
    }

    /// Pin `top` and go home so the user can pick the second app
    pub fn start_split_screen(&mut self, top: Screen) -> bool {
        if !top.can_split() {
            tracing::debug!("Ignoring split screen request for {}", top);
            return false;
        }
        self.split = SplitScreen::start(top);
        self.set_screen(Screen::Home);
        true
    }

    /// Dismiss a recents card. Apps are not tracked individually, so this
    /// is the same as going home.
    pub fn close_app(&mut self, screen: Screen) {
        tracing::debug!("Closing {}", screen);
        self.go_home();
    }

    pub fn close_all(&mut self) {
        self.go_home();
    }

    // ------------------------------------------------------------------
    // Actions
    // ------------------------------------------------------------------

    /// Apply one action. Actions that are not legal from the current
    /// screen are ignored.
    pub fn apply(&mut self, action: ShellAction) -> Result<(), ShellError> {
        tracing::debug!(?action, current = %self.nav.current, "Applying shell action");

        match action {
            ShellAction::BootComplete => {
                if self.nav.current != Screen::Boot {
                    tracing::debug!("Boot timer fired after boot, ignoring");
                    return Ok(());
                }
                self.set_screen(Screen::Lock);
                self.log.push(LogSender::System, LOCK_BANNER);
            }
            ShellAction::Unlock => {
                if self.nav.current != Screen::Lock {
                    tracing::debug!("Unlock outside lock screen, ignoring");
                    return Ok(());
                }
                self.log.push(LogSender::System, "Unlocked via Tap/Face ID 🔓");
                self.set_screen(Screen::Home);
            }
            ShellAction::ToggleLockClock => {
                if self.nav.current == Screen::Lock {
                    self.lock_clock = self.lock_clock.toggled();
                }
            }
            ShellAction::Open(screen) => self.open(screen),
            ShellAction::SelectApp(screen) => {
                self.open(screen);
                if let Some((sender, text)) = self.registry.get(screen).and_then(|e| e.launch_log) {
                    self.log.push(sender, text);
                }
            }
            ShellAction::Home => {
                self.go_home();
                self.log.push(LogSender::System, "Home Button Pressed");
            }
            ShellAction::Back => {
                if self.go_back() == BackOutcome::WentHome {
                    self.log.push(LogSender::System, "Back Button Pressed");
                }
            }
            ShellAction::Recents => {
                self.open_recents();
                self.log.push(LogSender::System, "Recent Apps Opened");
            }
            ShellAction::StartSplit(top) => {
                if self.start_split_screen(top) {
                    self.log.push(LogSender::System, "Select a second app for Split Screen");
                }
            }
            ShellAction::CloseApp(screen) => self.close_app(screen),
            ShellAction::CloseAll => self.close_all(),
            ShellAction::RequestClose => self.go_home(),
            ShellAction::OpenSearch => self.overlay = Some(Overlay::Search),
            ShellAction::CloseOverlay => self.overlay = None,
            ShellAction::GeminiLive => {
                self.log.push(LogSender::Ai, "Gemini Live: I'm listening. How can I help you today?");
            }
            ShellAction::ToggleQuickPanel => {
                self.quick_settings.open = !self.quick_settings.open;
            }
            ShellAction::CloseQuickPanel => self.quick_settings.open = false,
            ShellAction::ToggleQuickSetting(id) => {
                self.quick_settings.toggle(&id)?;
            }
            ShellAction::SetBrightness(value) => self.quick_settings.set_brightness(value),
            ShellAction::SetTheme(theme) => {
                tracing::info!("Theme -> {:?}", theme);
                self.theme = theme;
            }
            ShellAction::SetMode(mode) => {
                tracing::info!("Mode -> {:?}", mode);
                self.mode = mode;
            }
            ShellAction::AiReply { id, text } => {
                if self.pending.settle(id) {
                    self.now_brief = Some(text);
                } else {
                    self.log.push(LogSender::Ai, text);
                }
            }
        }
        Ok(())
    }

    // ------------------------------------------------------------------
    // Galaxy AI side panel
    // ------------------------------------------------------------------

    /// Submit free text from the side panel.
    ///
    /// The input is logged as a user entry first. Shortcuts navigate and log
    /// their reply immediately; anything else is returned as a
    /// [`TextRequest`] whose reply arrives later as [`ShellAction::AiReply`].
    pub fn submit_command(&mut self, input: &str) -> Dispatch {
        if input.trim().is_empty() {
            return Dispatch::Ignored;
        }
        self.log.push(LogSender::User, input);

        match command::route(input) {
            Some(route) => {
                match route {
                    CommandRoute::Home => self.go_home(),
                    other => self.open(other.target()),
                }
                let (sender, text) = route.reply();
                self.log.push(sender, text);
                Dispatch::Routed(route)
            }
            None => Dispatch::Forward(TextRequest {
                prompt: input.to_string(),
                context: crate::ai::AiContext::General,
            }),
        }
    }

    /// `:assist <text>` - forward to the text service with the AI context
    /// of whatever screen is showing
    pub fn assist(&mut self, input: &str) -> Option<TextRequest> {
        let prompt = input.trim();
        if prompt.is_empty() {
            return None;
        }
        self.log.push(LogSender::User, prompt);
        Some(TextRequest {
            prompt: prompt.to_string(),
            context: self.registry.ai_context(self.nav.current),
        })
    }

    /// Screens whose views are visible right now
    pub fn visible_screens(&self) -> Vec<Screen> {
        match self.split.slots() {
            Some((top, bottom)) => vec![top, bottom],
            None => vec![self.nav.current],
        }
    }

    /// Hand a line of input to the view for `screen` and apply whatever it
    /// queued. Returns false if the screen is not visible or its view
    /// ignored the input.
    pub fn view_input(&mut self, screen: Screen, input: &str) -> Result<bool, ShellError> {
        if !self.visible_screens().contains(&screen) {
            tracing::debug!("{} is not visible, dropping view input", screen);
            return Ok(false);
        }
        let mut ctx = self.registry.context(screen, self.theme, self.mode, self.split.active);
        let handled = self.registry.handle_input(screen, input, &mut ctx)?;
        for action in ctx.take_actions() {
            self.apply(action)?;
        }
        Ok(handled)
    }

    /// Remember a submitted request (drives the "processing" indicator)
    pub fn track_request(&mut self, id: RequestId) {
        self.pending.track(id);
    }

    /// Remember the Now Brief request; its reply fills the widget
    pub fn track_now_brief(&mut self, id: RequestId) {
        self.now_brief_requested = true;
        self.pending.track_now_brief(id);
    }

    /// Forget requests that were cancelled before they settled
    pub fn forget_requests(&mut self, ids: &[RequestId]) {
        for id in ids {
            if self.pending.settle(*id) {
                // Allow the widget to ask again next time home shows
                self.now_brief_requested = false;
            }
        }
    }
}

impl Default for Shell {
    fn default() -> Self {
        Self::new(&SimConfig::default())
    }
}
