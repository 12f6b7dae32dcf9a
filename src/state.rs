//! Simulator state - the shell plus everything the event loop drives it with

use std::collections::VecDeque;
use std::io::{self, Write};

use calloop::LoopSignal;
use tracing::{debug, info, warn};

use crate::ai::{AiContext, AiReply, AiWorker, NOW_BRIEF_PROMPT};
use crate::config::SimConfig;
use crate::input::{self, InputError, InputEvent};
use crate::shell::command::Dispatch;
use crate::shell::{frame, Screen, Shell, ShellAction};

pub struct FlickSim {
    pub shell: Shell,
    pub worker: AiWorker,
    pub config: SimConfig,
    signal: Option<LoopSignal>,
    /// Boot timer has fired; stays set whatever screen is showing
    booted: bool,
    /// Lines typed while the boot splash was up, replayed once it is gone
    queued_input: VecDeque<String>,
    input_closed: bool,
    quit: bool,
    /// Log entries already written out
    printed: usize,
    /// Something changed since the last frame
    dirty: bool,
    /// Messages for the user that are not part of the side panel log
    notices: Vec<String>,
}

impl FlickSim {
    pub fn new(config: SimConfig, worker: AiWorker) -> Self {
        let shell = Shell::new(&config);
        Self {
            shell,
            worker,
            config,
            signal: None,
            booted: false,
            queued_input: VecDeque::new(),
            input_closed: false,
            quit: false,
            printed: 0,
            dirty: true,
            notices: Vec::new(),
        }
    }

    /// Hook up the loop signal used to stop the event loop
    pub fn set_signal(&mut self, signal: LoopSignal) {
        self.signal = Some(signal);
    }

    /// Boot splash timer fired
    pub fn boot_complete(&mut self) {
        info!("Boot complete");
        self.booted = true;
        self.apply(ShellAction::BootComplete);

        while let Some(line) = self.queued_input.pop_front() {
            self.handle_line(&line);
        }
        self.stop_if_done();
    }

    /// One line from the terminal
    pub fn handle_line(&mut self, line: &str) {
        if !self.booted {
            debug!("Still booting, queueing input: {}", line);
            self.queued_input.push_back(line.to_string());
            return;
        }

        match input::parse(line).and_then(|event| self.handle_event(event)) {
            Ok(()) => {}
            Err(e) => {
                debug!("Input rejected: {}", e);
                self.notices.push(format!("⚠ {}", e));
            }
        }
        self.dirty = true;
    }

    fn handle_event(&mut self, event: InputEvent) -> Result<(), InputError> {
        match event {
            InputEvent::Empty => {}
            InputEvent::Action(action) => self.try_apply(action)?,
            InputEvent::Tap(target) => {
                let action = input::resolve_tap(&self.shell, target.as_deref())?;
                self.try_apply(action)?;
            }
            InputEvent::Split(target) => {
                let action = input::resolve_split(&self.shell, &target)?;
                self.try_apply(action)?;
            }
            InputEvent::Close(Some(target)) => {
                let screen: Screen = target.parse()?;
                self.try_apply(ShellAction::CloseApp(screen))?;
            }
            InputEvent::Close(None) => self.try_apply(ShellAction::RequestClose)?,
            InputEvent::Assist(text) => {
                if let Some(request) = self.shell.assist(&text) {
                    self.submit(request.prompt, request.context);
                }
            }
            InputEvent::View { slot, input: text } => {
                let screen = input::resolve_view(&self.shell, slot)?;
                let before = self.shell.current();
                if !self.shell.view_input(screen, &text)? {
                    self.notices.push(format!("{} ignored '{}'", screen, text));
                }
                self.after_navigation(before);
            }
            InputEvent::Command(text) => {
                let before = self.shell.current();
                if let Dispatch::Forward(request) = self.shell.submit_command(&text) {
                    self.submit(request.prompt, request.context);
                }
                self.after_navigation(before);
            }
            InputEvent::Help => self.notices.push(input::HELP.to_string()),
            InputEvent::Quit => {
                info!("Quit requested");
                self.quit = true;
                self.stop_if_done();
            }
        }
        Ok(())
    }

    /// Input stream ended
    pub fn input_closed(&mut self) {
        info!("Input closed");
        self.input_closed = true;
        self.stop_if_done();
    }

    /// A text request settled
    pub fn handle_reply(&mut self, reply: AiReply) {
        if !self.worker.finish(reply.id) {
            debug!(id = reply.id, "Dropping reply for cancelled request");
            return;
        }
        debug!(id = reply.id, context = %reply.context, timed_out = reply.timed_out, "Galaxy AI reply");
        self.apply(ShellAction::AiReply { id: reply.id, text: reply.text });
        self.stop_if_done();
    }

    /// Apply an action that cannot fail from the loop's point of view
    fn apply(&mut self, action: ShellAction) {
        if let Err(e) = self.try_apply(action) {
            warn!("Shell action failed: {}", e);
        }
    }

    fn try_apply(&mut self, action: ShellAction) -> Result<(), InputError> {
        let before = self.shell.current();
        let result = self.shell.apply(action);
        self.after_navigation(before);
        self.dirty = true;
        Ok(result?)
    }

    /// Follow-up work once `current` may have changed
    fn after_navigation(&mut self, before: Screen) {
        if self.config.ai.cancel_on_navigate && self.shell.current() != before {
            let cancelled = self.worker.cancel_all();
            if !cancelled.is_empty() {
                info!("Navigated away, cancelled {} request(s)", cancelled.len());
                self.shell.forget_requests(&cancelled);
            }
        }

        if self.config.ai.now_brief && self.shell.wants_now_brief() {
            let id = self.worker.submit(NOW_BRIEF_PROMPT, AiContext::Wellness);
            self.shell.track_now_brief(id);
        }
    }

    fn submit(&mut self, prompt: String, context: AiContext) {
        let id = self.worker.submit(prompt, context);
        self.shell.track_request(id);
    }

    /// Nothing left to do once input is gone and every request has settled
    pub fn is_done(&self) -> bool {
        self.quit
            || (self.input_closed
                && self.booted
                && self.queued_input.is_empty()
                && self.worker.is_idle())
    }

    fn stop_if_done(&mut self) {
        if self.is_done() {
            if let Some(signal) = &self.signal {
                signal.stop();
            }
        }
    }

    /// Write new side panel entries and notices, then the frame if anything changed
    pub fn present(&mut self, out: &mut impl Write) -> io::Result<()> {
        let entries = self.shell.log().since(self.printed);
        for entry in entries {
            for line in entry.render() {
                writeln!(out, "{}", line)?;
            }
        }
        self.printed += entries.len();

        for notice in self.notices.drain(..) {
            writeln!(out, "{}", notice)?;
        }

        if self.dirty {
            write!(out, "{}", frame::render(&self.shell))?;
            self.dirty = false;
        }
        out.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::GalaxyAi;
    use calloop::channel::{channel, Channel};
    use std::sync::Arc;
    use std::time::Duration;

    fn sim(config: SimConfig) -> (FlickSim, Channel<AiReply>) {
        let (tx, rx) = channel();
        let worker = AiWorker::new(Arc::new(GalaxyAi::demo()), tx, Duration::from_secs(5)).unwrap();
        (FlickSim::new(config, worker), rx)
    }

    fn no_brief() -> SimConfig {
        let mut config = SimConfig::default();
        config.ai.now_brief = false;
        config
    }

    #[test]
    fn test_input_queued_until_boot() {
        let (mut sim, _rx) = sim(no_brief());
        sim.handle_line(":tap");
        assert_eq!(sim.shell.current(), Screen::Boot);

        sim.boot_complete();
        assert_eq!(sim.shell.current(), Screen::Home);
    }

    #[test]
    fn test_now_brief_requested_on_home() {
        let (mut sim, _rx) = sim(SimConfig::default());
        sim.boot_complete();
        sim.handle_line(":tap");
        assert_eq!(sim.worker.in_flight(), 1);
        assert_eq!(sim.shell.pending().len(), 1);

        // Only once
        sim.handle_line(":open notes");
        sim.handle_line(":home");
        assert_eq!(sim.worker.in_flight(), 1);
    }

    #[test]
    fn test_bad_input_becomes_notice() {
        let (mut sim, _rx) = sim(no_brief());
        sim.boot_complete();
        sim.handle_line(":fly");
        let mut out = Vec::new();
        sim.present(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("unknown command ':fly'"));
    }

    #[test]
    fn test_present_prints_log_once() {
        let (mut sim, _rx) = sim(no_brief());
        let mut out = Vec::new();
        sim.present(&mut out).unwrap();
        let first = String::from_utf8(out).unwrap();
        assert!(first.contains("Booting up"));
        assert!(first.contains("SAMSUNG"));

        let mut out = Vec::new();
        sim.present(&mut out).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn test_cancel_on_navigate() {
        let mut config = no_brief();
        config.ai.cancel_on_navigate = true;
        let (mut sim, _rx) = sim(config);
        sim.boot_complete();
        sim.handle_line(":tap");
        sim.handle_line("what's the weather");
        assert_eq!(sim.worker.in_flight(), 1);

        sim.handle_line(":tap camera");
        assert!(sim.worker.is_idle());
        assert!(sim.shell.pending().is_empty());
    }

    #[test]
    fn test_done_waits_for_requests() {
        let (mut sim, _rx) = sim(no_brief());
        sim.boot_complete();
        sim.handle_line(":tap");
        sim.handle_line("hello there");
        sim.input_closed();
        assert!(!sim.is_done());

        let id = sim.shell.pending().ids()[0];
        sim.handle_reply(AiReply {
            id,
            context: AiContext::General,
            text: "hi".into(),
            timed_out: false,
        });
        assert!(sim.is_done());
        assert_eq!(sim.shell.log().last().unwrap().text, "hi");
    }

    #[test]
    fn test_open_boot_is_rejected() {
        let (mut sim, _rx) = sim(no_brief());
        sim.boot_complete();
        sim.handle_line(":tap");
        sim.handle_line(":open boot");
        assert_eq!(sim.shell.current(), Screen::Home);

        let mut out = Vec::new();
        sim.present(&mut out).unwrap();
        assert!(String::from_utf8(out).unwrap().contains("BOOT can't be opened directly"));

        sim.handle_line(":home");
        sim.handle_line(":quit");
        sim.input_closed();
        assert!(sim.is_done());
        assert!(sim.queued_input.is_empty());
    }

    #[test]
    fn test_done_after_boot_whatever_the_screen() {
        let (mut sim, _rx) = sim(no_brief());
        sim.boot_complete();
        sim.input_closed();
        assert_eq!(sim.shell.current(), Screen::Lock);
        assert!(sim.is_done());
    }

    #[test]
    fn test_quit() {
        let (mut sim, _rx) = sim(no_brief());
        sim.boot_complete();
        sim.handle_line(":quit");
        assert!(sim.is_done());
    }
}
