//! Terminal backend - stdin lines in, text frames out
//!
//! Everything runs on one calloop event loop:
//! - boot splash timer
//! - stdin lines, read on a helper thread and forwarded over a channel
//! - Galaxy AI replies from the worker's tokio runtime

use std::io::{self, BufRead};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{anyhow, Result};
use calloop::{
    channel::{channel, Event},
    timer::{TimeoutAction, Timer},
    EventLoop,
};
use tracing::{error, info, warn};

use crate::ai::{AiReply, AiWorker, GalaxyAi};
use crate::config::SimConfig;
use crate::state::FlickSim;

pub fn run(config: SimConfig) -> Result<()> {
    let mut event_loop: EventLoop<FlickSim> = EventLoop::try_new()?;
    let loop_handle = event_loop.handle();

    // Galaxy AI replies
    let (reply_tx, reply_rx) = channel::<AiReply>();
    let worker = AiWorker::new(
        Arc::new(GalaxyAi::from_config(&config.ai)),
        reply_tx,
        Duration::from_secs(config.ai.timeout_seconds),
    )?;

    loop_handle
        .insert_source(reply_rx, |event, _, state| {
            if let Event::Msg(reply) = event {
                state.handle_reply(reply);
            }
        })
        .map_err(|e| anyhow!("Failed to insert reply channel: {}", e.error))?;

    // Boot splash, then the lock screen
    let boot_delay = Duration::from_millis(config.boot_delay_ms);
    loop_handle
        .insert_source(Timer::from_duration(boot_delay), |_, _, state| {
            state.boot_complete();
            TimeoutAction::Drop
        })
        .map_err(|e| anyhow!("Failed to insert boot timer: {}", e.error))?;

    // Terminal input
    let (line_tx, line_rx) = channel::<String>();
    std::thread::Builder::new()
        .name("flick-stdin".into())
        .spawn(move || {
            for line in io::stdin().lock().lines() {
                match line {
                    Ok(line) => {
                        if line_tx.send(line).is_err() {
                            break;
                        }
                    }
                    Err(e) => {
                        warn!("Failed to read stdin: {}", e);
                        break;
                    }
                }
            }
        })?;

    loop_handle
        .insert_source(line_rx, |event, _, state| match event {
            Event::Msg(line) => state.handle_line(&line),
            Event::Closed => state.input_closed(),
        })
        .map_err(|e| anyhow!("Failed to insert input channel: {}", e.error))?;

    let mut state = FlickSim::new(config, worker);
    state.set_signal(event_loop.get_signal());

    info!("Entering event loop");
    state.present(&mut io::stdout().lock())?;

    event_loop.run(None, &mut state, |state| {
        if let Err(e) = state.present(&mut io::stdout().lock()) {
            error!("Failed to write frame: {}", e);
        }
    })?;

    state.present(&mut io::stdout().lock())?;
    info!("Event loop finished");
    Ok(())
}
