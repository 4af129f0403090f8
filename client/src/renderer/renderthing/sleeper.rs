use std::time::{Duration, Instant};

/// Throttles a loop to a target period.
pub struct Sleeper {
    pub target_delta_time: Duration,
    pub last_instant: Option<Instant>,
}

impl Sleeper {
    pub fn new(target_delta_time: Duration) -> Self {
        Self {
            target_delta_time,
            last_instant: None,
        }
    }

    /// Sleeps out whatever remains of the target period since the last call.
    /// Returns whether any sleeping happened.
    pub fn sleep(&mut self) -> bool {
        let slept = match self.last_instant {
            Some(last_instant) => {
                let delta_time = last_instant.elapsed();

                if self.target_delta_time > delta_time {
                    spin_sleep::sleep(self.target_delta_time - delta_time);
                    true
                } else {
                    false
                }
            }
            // Nothing to pace against on the first frame.
            None => false,
        };

        self.last_instant = Some(Instant::now());
        slept
    }
}
