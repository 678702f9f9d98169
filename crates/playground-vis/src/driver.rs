//! Paced async stepping.
//!
//! The driver is the suspension point between steps: it sleeps, then checks
//! the run token, and only then applies the next step. A reset on the guard
//! therefore drops every step that has not been applied yet.

use std::time::Duration;

use crate::generation::{RunGuard, RunToken};
use crate::playback::{Paced, Playback};

/// How a driven run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriveOutcome {
    /// Every step was applied
    Completed { applied: usize },
    /// The token went stale part way through
    Cancelled { applied: usize },
}

impl DriveOutcome {
    pub fn applied(&self) -> usize {
        match self {
            DriveOutcome::Completed { applied } | DriveOutcome::Cancelled { applied } => *applied,
        }
    }
}

/// Plays timelines under a [`RunGuard`].
#[derive(Debug, Clone)]
pub struct Driver {
    guard: RunGuard,
}

impl Driver {
    pub fn new(guard: RunGuard) -> Self {
        Self { guard }
    }

    pub fn guard(&self) -> &RunGuard {
        &self.guard
    }

    /// Play `playback` from its cursor, waiting each event's own delay at
    /// the playback's pace. A cancelled playback is left paused where it
    /// stopped.
    pub async fn play<E, F>(
        &self,
        token: RunToken,
        playback: &mut Playback<E>,
        mut apply: F,
    ) -> DriveOutcome
    where
        E: Paced,
        F: FnMut(&E),
    {
        let mut applied = 0;
        playback.play();

        while let Some(delay) = playback.next_delay() {
            self.pause(delay).await;
            if !self.guard.is_current(&token) {
                playback.pause();
                return self.dropped(&token, applied);
            }
            if let Some(event) = playback.step_forward() {
                apply(event);
                applied += 1;
            }
        }

        playback.seek(playback.total_frames());
        self.guard.finish(&token);
        tracing::debug!(generation = %token.generation(), applied, "run completed");
        DriveOutcome::Completed { applied }
    }

    async fn pause(&self, delay: Duration) {
        if delay.is_zero() {
            tokio::task::yield_now().await;
        } else {
            tokio::time::sleep(delay).await;
        }
    }

    fn dropped(&self, token: &RunToken, applied: usize) -> DriveOutcome {
        tracing::debug!(
            stale = %token.generation(),
            current = %self.guard.generation(),
            applied,
            "stale continuation dropped"
        );
        DriveOutcome::Cancelled { applied }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::playback::{Pace, PlaybackState, Timeline};
    use std::sync::{Arc, Mutex};

    /// Events are their own delay in ms.
    fn playback(events: impl IntoIterator<Item = u64>) -> Playback<u64> {
        Playback::new(events.into_iter().collect::<Timeline<u64>>())
    }

    fn instant(events: impl IntoIterator<Item = u64>) -> Playback<u64> {
        let mut playback = playback(events);
        playback.set_pace(Pace::INSTANT);
        playback
    }

    #[tokio::test]
    async fn plays_timeline_to_end() {
        let guard = RunGuard::new();
        let driver = Driver::new(guard.clone());
        let mut playback = playback(0..4);

        let mut seen = Vec::new();
        let outcome = driver.play(guard.start(), &mut playback, |e| seen.push(*e)).await;

        assert_eq!(outcome, DriveOutcome::Completed { applied: 4 });
        assert_eq!(seen, vec![0, 1, 2, 3]);
        assert_eq!(playback.state(), PlaybackState::Finished);
        assert!(!guard.is_running());
    }

    #[tokio::test]
    async fn empty_timeline_completes() {
        let guard = RunGuard::new();
        let driver = Driver::new(guard.clone());
        let mut playback = playback([]);

        let outcome = driver.play(guard.start(), &mut playback, |_| {}).await;
        assert_eq!(outcome, DriveOutcome::Completed { applied: 0 });
        assert_eq!(playback.state(), PlaybackState::Finished);
    }

    #[tokio::test]
    async fn reset_mid_run_drops_the_rest() {
        let guard = RunGuard::new();
        let driver = Driver::new(guard.clone());
        let mut playback = instant(0..10);

        let mut seen = Vec::new();
        let outcome = driver
            .play(guard.start(), &mut playback, |e| {
                seen.push(*e);
                if *e == 2 {
                    guard.reset();
                }
            })
            .await;

        assert_eq!(outcome, DriveOutcome::Cancelled { applied: 3 });
        assert_eq!(seen, vec![0, 1, 2]);
        assert!(!guard.is_running());
    }

    #[tokio::test]
    async fn reset_before_first_step_applies_nothing() {
        let guard = RunGuard::new();
        let driver = Driver::new(guard.clone());
        let token = guard.start();

        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let task = tokio::spawn(async move {
            let mut playback = playback([50, 0, 0]);
            driver
                .play(token, &mut playback, move |e| sink.lock().unwrap().push(*e))
                .await
        });

        guard.reset();
        let outcome = task.await.unwrap();
        assert_eq!(outcome, DriveOutcome::Cancelled { applied: 0 });
        assert!(seen.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn restart_supersedes_running_driver() {
        let guard = RunGuard::new();
        let driver = Driver::new(guard.clone());
        let stale = guard.start();
        let fresh = guard.start();

        let outcome = driver.play(stale, &mut instant(0..3), |_| {}).await;
        assert_eq!(outcome.applied(), 0);
        assert!(guard.is_running());

        let outcome = driver.play(fresh, &mut instant(0..3), |_| {}).await;
        assert_eq!(outcome, DriveOutcome::Completed { applied: 3 });
    }

    #[tokio::test]
    async fn cancelled_playback_resumes_from_cursor() {
        let guard = RunGuard::new();
        let driver = Driver::new(guard.clone());
        let mut playback = instant(0..5);

        let mut seen = Vec::new();
        let outcome = driver
            .play(guard.start(), &mut playback, |e| {
                seen.push(*e);
                if *e == 1 {
                    guard.reset();
                }
            })
            .await;
        assert_eq!(outcome, DriveOutcome::Cancelled { applied: 2 });
        assert_eq!(playback.state(), PlaybackState::Paused);
        assert_eq!(playback.current_frame(), 2);

        let outcome = driver.play(guard.start(), &mut playback, |e| seen.push(*e)).await;
        assert_eq!(outcome, DriveOutcome::Completed { applied: 3 });
        assert_eq!(seen, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn drives_outside_an_async_context() {
        let guard = RunGuard::new();
        let driver = Driver::new(guard.clone());
        let mut playback = instant([3, 4, 5]);
        let mut total = 0;
        let run = driver.play(guard.start(), &mut playback, |v| total += v);
        let outcome = tokio_test::block_on(run);
        assert_eq!(outcome.applied(), 3);
        assert_eq!(total, 12);
    }
}
