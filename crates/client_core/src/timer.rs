use std::{future::Future, time::Duration};

use tokio::{
    task::JoinHandle,
    time::{self, Instant, MissedTickBehavior},
};

const MIN_PERIOD: Duration = Duration::from_secs(1);

/// Recurring background task that lives exactly as long as this handle.
/// Dropping the handle aborts the task.
pub struct PollTimer {
    task: JoinHandle<()>,
}

impl PollTimer {
    /// Runs `tick` every `period`, first one `period` after start. The loop
    /// ends early once `tick` resolves to `false`.
    pub fn start<F, Fut>(period: Duration, mut tick: F) -> Self
    where
        F: FnMut() -> Fut + Send + 'static,
        Fut: Future<Output = bool> + Send + 'static,
    {
        let period = period.max(MIN_PERIOD);
        let task = tokio::spawn(async move {
            let mut ticks = time::interval_at(Instant::now() + period, period);
            ticks.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticks.tick().await;
                if !tick().await {
                    break;
                }
            }
        });
        Self { task }
    }

    pub fn is_running(&self) -> bool {
        !self.task.is_finished()
    }
}

impl Drop for PollTimer {
    fn drop(&mut self) {
        self.task.abort();
    }
}
