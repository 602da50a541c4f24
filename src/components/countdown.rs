// T-minus countdown: a pure remaining-time breakdown plus a ticking publisher

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use super::{Clock, NotificationError, NotificationResult};

const SECONDS_PER_MINUTE: i64 = 60;
const SECONDS_PER_HOUR: i64 = 60 * SECONDS_PER_MINUTE;
const SECONDS_PER_DAY: i64 = 24 * SECONDS_PER_HOUR;

/// Longest tick period that still renders a seconds display correctly
pub const MAX_TICK_PERIOD: Duration = Duration::from_secs(1);

/// Whole-unit breakdown of the time left until a target instant
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TMinus {
    pub days: u64,
    pub hours: u8,
    pub minutes: u8,
    pub seconds: u8,
}

impl TMinus {
    pub const ZERO: TMinus = TMinus {
        days: 0,
        hours: 0,
        minutes: 0,
        seconds: 0,
    };

    pub fn total_seconds(&self) -> u64 {
        self.days * SECONDS_PER_DAY as u64
            + u64::from(self.hours) * SECONDS_PER_HOUR as u64
            + u64::from(self.minutes) * SECONDS_PER_MINUTE as u64
            + u64::from(self.seconds)
    }

    pub fn is_zero(&self) -> bool {
        *self == TMinus::ZERO
    }
}

impl std::fmt::Display for TMinus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.days {
            0 => {},
            1 => write!(f, "1 day • ")?,
            days => write!(f, "{} days • ", days)?,
        }
        write!(f, "{:02}:{:02}:{:02}", self.hours, self.minutes, self.seconds)
    }
}

/// Time left from `now` until `target`, truncated to whole seconds.
///
/// Returns [`TMinus::ZERO`] once `now >= target`.
pub fn remaining(target: DateTime<Utc>, now: DateTime<Utc>) -> TMinus {
    // num_seconds truncates toward zero, which is floor for positive spans
    let total = (target - now).num_seconds();
    if total <= 0 {
        return TMinus::ZERO;
    }

    let days = total / SECONDS_PER_DAY;
    let rest = total % SECONDS_PER_DAY;

    TMinus {
        days: days as u64,
        hours: (rest / SECONDS_PER_HOUR) as u8,
        minutes: (rest % SECONDS_PER_HOUR / SECONDS_PER_MINUTE) as u8,
        seconds: (rest % SECONDS_PER_MINUTE) as u8,
    }
}

/// True once the launch instant has been reached (T-plus stage).
pub fn is_t_plus(target: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    now >= target
}

/// Re-evaluates [`remaining`] on a fixed period and publishes changes.
///
/// Must be spawned inside a tokio runtime. Dropping the ticker stops it.
pub struct CountdownTicker {
    target: DateTime<Utc>,
    receiver: watch::Receiver<TMinus>,
    task: JoinHandle<()>,
}

impl CountdownTicker {
    pub fn spawn(
        target: DateTime<Utc>,
        clock: Arc<dyn Clock>,
        period: Duration,
    ) -> NotificationResult<Self> {
        if period.is_zero() || period > MAX_TICK_PERIOD {
            return Err(NotificationError::validation(
                "countdown_tick",
                format!(
                    "Tick period must be non-zero and at most {:?}, got {:?}",
                    MAX_TICK_PERIOD, period
                ),
            ));
        }

        let (sender, receiver) = watch::channel(remaining(target, clock.now()));

        let task = tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

            loop {
                interval.tick().await;
                let next = remaining(target, clock.now());
                sender.send_if_modified(|current| {
                    if *current == next {
                        return false;
                    }
                    *current = next;
                    true
                });
            }
        });

        tracing::debug!(launch_at = %target, ?period, "Countdown ticker started");

        Ok(Self {
            target,
            receiver,
            task,
        })
    }

    pub fn target(&self) -> DateTime<Utc> {
        self.target
    }

    /// Latest published value
    pub fn current(&self) -> TMinus {
        *self.receiver.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<TMinus> {
        self.receiver.clone()
    }

    /// Stop future evaluations; subscribers observe a closed channel.
    pub fn cancel(&self) {
        if !self.task.is_finished() {
            tracing::debug!(launch_at = %self.target, "Countdown ticker cancelled");
        }
        self.task.abort();
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

impl Drop for CountdownTicker {
    fn drop(&mut self) {
        self.task.abort();
    }
}
