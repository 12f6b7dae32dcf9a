//! Galaxy AI command routing
//!
//! Free text from the side panel either maps to a navigation shortcut
//! (first keyword hit wins, case-insensitive) or goes to the text service.

use super::log::LogSender;
use super::Screen;
use crate::ai::{AiContext, RequestId};

/// Navigation shortcuts recognised in free text, in match order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandRoute {
    Camera,
    Notes,
    Home,
    Kids,
}

const ROUTES: [(&str, CommandRoute); 4] = [
    ("camera", CommandRoute::Camera),
    ("notes", CommandRoute::Notes),
    ("home", CommandRoute::Home),
    ("kids", CommandRoute::Kids),
];

impl CommandRoute {
    /// Where the shortcut navigates to
    pub fn target(self) -> Screen {
        match self {
            CommandRoute::Camera => Screen::Camera,
            CommandRoute::Notes => Screen::Notes,
            CommandRoute::Home => Screen::Home,
            CommandRoute::Kids => Screen::KidsMode,
        }
    }

    /// Log line written after navigating
    pub fn reply(self) -> (LogSender, &'static str) {
        match self {
            CommandRoute::Camera => (LogSender::Ai, "Opening Camera... 📸"),
            CommandRoute::Notes => (LogSender::Ai, "Opening Samsung Notes... 📝"),
            CommandRoute::Home => (LogSender::Ai, "Going Home... 🏠"),
            CommandRoute::Kids => (LogSender::System, "Entering Kids Mode..."),
        }
    }
}

/// First shortcut whose keyword appears anywhere in `input`
pub fn route(input: &str) -> Option<CommandRoute> {
    let lower = input.to_lowercase();
    ROUTES
        .iter()
        .find(|(keyword, _)| lower.contains(keyword))
        .map(|(_, route)| *route)
}

/// Request for the text service produced by a command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextRequest {
    pub prompt: String,
    pub context: AiContext,
}

/// Outcome of submitting a line of free text
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatch {
    /// Blank input, nothing logged
    Ignored,
    /// Handled locally by a navigation shortcut
    Routed(CommandRoute),
    /// Needs the text service; the caller submits it and later applies the reply
    Forward(TextRequest),
}

/// Bookkeeping for text requests the shell is waiting on
#[derive(Debug, Default)]
pub struct PendingRequests {
    ids: Vec<RequestId>,
    /// Request filling the Now Brief widget (its reply is not logged)
    now_brief: Option<RequestId>,
}

impl PendingRequests {
    pub fn track(&mut self, id: RequestId) {
        self.ids.push(id);
    }

    pub fn track_now_brief(&mut self, id: RequestId) {
        self.now_brief = Some(id);
        self.ids.push(id);
    }

    /// Stop tracking `id`; returns true if it was the Now Brief request
    pub fn settle(&mut self, id: RequestId) -> bool {
        self.ids.retain(|pending| *pending != id);
        if self.now_brief == Some(id) {
            self.now_brief = None;
            return true;
        }
        false
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn ids(&self) -> &[RequestId] {
        &self.ids
    }
}
