//! Wall-clock display, refreshed once per second.
//!
//! Purely cosmetic: nothing in the chat flow reads it.

use chrono::{DateTime, Local, TimeZone};
use std::fmt::Display;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

/// en-US style with two-digit day, 12-hour clock: `Oct 16, 2026, 05:24:09 PM`.
pub const CLOCK_FORMAT: &str = "%b %d, %Y, %I:%M:%S %p";
pub const TICK: Duration = Duration::from_secs(1);

pub fn format_timestamp<Tz>(at: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    at.format(CLOCK_FORMAT).to_string()
}

pub fn now() -> String {
    format_timestamp(&Local::now())
}

/// Background ticker publishing the formatted local time.
///
/// The task stops when the `Clock` is dropped.
pub struct Clock {
    rx: watch::Receiver<String>,
    handle: JoinHandle<()>,
}

impl Clock {
    /// Must be called inside a Tokio runtime.
    pub fn spawn() -> Self {
        let (tx, rx) = watch::channel(now());
        let handle = tokio::spawn(async move {
            let mut tick = tokio::time::interval(TICK);
            tick.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                tick.tick().await;
                if tx.send(now()).is_err() {
                    break;
                }
            }
        });
        Self { rx, handle }
    }

    /// Latest formatted time.
    pub fn current(&self) -> String {
        self.rx.borrow().clone()
    }
}

impl Drop for Clock {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn formats_afternoon() {
        let at = Utc.with_ymd_and_hms(2026, 10, 16, 17, 24, 9).unwrap();
        assert_eq!(format_timestamp(&at), "Oct 16, 2026, 05:24:09 PM");
    }

    #[test]
    fn formats_midnight_as_twelve_am() {
        let at = Utc.with_ymd_and_hms(2025, 1, 3, 0, 5, 0).unwrap();
        assert_eq!(format_timestamp(&at), "Jan 03, 2025, 12:05:00 AM");
    }

    #[tokio::test]
    async fn clock_publishes_ticks() {
        let clock = Clock::spawn();
        assert!(!clock.current().is_empty());

        let mut rx = clock.rx.clone();
        tokio::time::timeout(Duration::from_secs(3), rx.changed())
            .await
            .expect("no tick within 3s")
            .unwrap();
        assert!(rx.borrow().ends_with('M'));
    }
}
