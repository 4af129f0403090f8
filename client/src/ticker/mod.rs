use std::{
    sync::mpsc::{self, RecvTimeoutError, Sender, TryRecvError},
    thread,
    time::Duration,
};

use crate::{write_state, SharedState, State};

pub mod generation;

pub type TickerGenerator = Box<dyn FnOnce() -> Box<dyn Ticker> + Send>;

/// Handle to the background thread driving a [`Ticker`]. Dropping it stops the thread.
pub struct TickerHost {
    stop_sender: Sender<()>,
    rate_sender: Sender<Duration>,
}

impl TickerHost {
    pub fn start(
        state_arc: SharedState,
        mut interval: Duration,
        ticker_generator: TickerGenerator,
    ) -> Self {
        let (stop_sender, stop_receiver) = mpsc::channel();
        let (rate_sender, rate_receiver) = mpsc::channel();

        thread::spawn(move || {
            let mut ticker = ticker_generator();

            loop {
                let mut state = write_state(&state_arc);

                // Stop may have been requested while we waited for the lock.
                if !matches!(stop_receiver.try_recv(), Err(TryRecvError::Empty)) {
                    break;
                }

                ticker.tick(&mut state);
                drop(state);

                if let Some(rate) = rate_receiver.try_iter().last() {
                    interval = rate;
                }

                // A disconnected sender means the host is gone, which stops us too.
                match stop_receiver.recv_timeout(interval) {
                    Err(RecvTimeoutError::Timeout) => {}
                    Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                }
            }

            log::debug!("Ticker thread stopped");
        });

        Self {
            stop_sender,
            rate_sender,
        }
    }

    pub fn stop(self) {
        // The thread may already be gone, in which case there's nothing to stop.
        let _ = self.stop_sender.send(());
    }

    pub fn set_interval(&mut self, interval: Duration) {
        let _ = self.rate_sender.send(interval);
    }
}

pub trait Ticker {
    fn tick(&mut self, state: &mut State);
}

/// Starts driving generations, or retunes the interval if already running.
/// Only one ticker ever runs, so at most one generation is computed at a time.
pub fn start(state_arc: &SharedState, interval: Duration) {
    let mut state = write_state(state_arc);

    if let Some(ticker) = &mut state.ticker {
        log::info!("Changing tick interval to {}ms", interval.as_millis());
        ticker.set_interval(interval);
        return;
    }

    log::info!("Running every {}ms", interval.as_millis());
    state.ticker = Some(TickerHost::start(
        state_arc.clone(),
        interval,
        Box::new(|| -> Box<dyn Ticker> { Box::new(generation::GenerationTicker) }),
    ));
}

pub fn stop(state_arc: &SharedState) {
    let ticker = write_state(state_arc).ticker.take();

    if let Some(ticker) = ticker {
        log::info!("Stopping");
        ticker.stop();
    }
}

pub fn toggle(state_arc: &SharedState) {
    let running = crate::read_state(state_arc).is_running();

    if running {
        stop(state_arc);
    } else {
        let interval = crate::read_state(state_arc).config.tick_interval();
        start(state_arc, interval);
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, RwLock};

    use crate::{config::Config, read_state};

    use super::*;

    fn shared_state() -> SharedState {
        Arc::new(RwLock::new(State::new(Config::default()).unwrap()))
    }

    #[test]
    fn no_tick_after_stop_while_waiting_for_lock() {
        let state_arc = shared_state();

        let guard = write_state(&state_arc);
        let host = TickerHost::start(
            state_arc.clone(),
            Duration::from_millis(1),
            Box::new(|| -> Box<dyn Ticker> { Box::new(generation::GenerationTicker) }),
        );
        host.stop();
        drop(guard);

        thread::sleep(Duration::from_millis(50));
        assert_eq!(read_state(&state_arc).game.generation(), 0);
    }

    #[test]
    fn ticks_until_stopped() {
        let state_arc = shared_state();

        start(&state_arc, Duration::from_millis(1));
        thread::sleep(Duration::from_millis(50));
        stop(&state_arc);

        let stopped_at = read_state(&state_arc).game.generation();
        assert!(stopped_at > 0);

        thread::sleep(Duration::from_millis(20));
        assert_eq!(read_state(&state_arc).game.generation(), stopped_at);
    }
}
