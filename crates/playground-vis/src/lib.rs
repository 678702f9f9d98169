//! Playground Visualizer Shell
//!
//! Plumbing between the algorithm engines and whatever renders them.
//!
//! # Architecture
//!
//! - **Recording**: each engine run is flattened into a [`Timeline`] of
//!   [`VisEvent`]s, one per animation frame
//! - **Playback**: seek through a timeline, or play it with each
//!   visualizer's own step delays
//! - **Run guard**: a generation stamp per component; reset invalidates every
//!   pending step of the previous run
//! - **Driver**: sleeps between steps on tokio and drops steps whose run
//!   token has gone stale
//!
//! # Usage
//!
//! ```
//! use playground_vis::{hanoi_timeline, Playback, VisEvent};
//!
//! let mut playback = Playback::new(hanoi_timeline(3));
//! assert_eq!(playback.total_frames(), 8);
//!
//! playback.seek(7);
//! assert!(matches!(playback.step_forward(), Some(VisEvent::HanoiFinished { moves: 7, .. })));
//! ```

mod driver;
mod error;
mod events;
mod generation;
mod playback;
mod record;

pub use driver::{DriveOutcome, Driver};
pub use error::{Error, Result};
pub use events::VisEvent;
pub use generation::{Generation, RunGuard, RunToken};
pub use playback::{HanoiSpeed, Pace, Paced, Playback, PlaybackState, Timeline};
pub use record::{
    bst_search_timeline, event_loop_timeline, hanoi_timeline, nqueens_timeline, promise_timeline,
    recursion_timeline, search_timeline, sort_timeline,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn playback_rebuilds_state_after_seek() {
        let timeline = sort_timeline(playground_sort::SortAlgorithm::Bubble, vec![3, 1, 2]);
        let total = timeline.len();
        let mut playback = Playback::new(timeline);

        playback.seek(total / 2);
        assert_eq!(playback.events_to_current().len(), total / 2);

        playback.seek(total);
        assert_eq!(playback.state(), PlaybackState::Finished);
        assert!(playback.current_event().is_none());
    }

    #[tokio::test]
    async fn reset_between_runs_discards_old_steps() {
        let guard = RunGuard::new();
        let driver = Driver::new(guard.clone());
        let mut first = Playback::new(hanoi_timeline(2));
        let mut second = Playback::new(hanoi_timeline(3));
        first.set_pace(Pace::INSTANT);
        second.set_pace(Pace::INSTANT);

        let old = guard.start();
        let mut applied = Vec::new();
        let outcome = driver
            .play(old, &mut first, |event| {
                applied.push(event.frame());
                guard.reset();
            })
            .await;
        assert_eq!(outcome, DriveOutcome::Cancelled { applied: 1 });

        let outcome = driver.play(guard.start(), &mut second, |_| {}).await;
        assert_eq!(outcome, DriveOutcome::Completed { applied: 8 });
        assert_eq!(applied, vec![0]);
    }
}
