//! Recorded timelines and paced playback.
//!
//! A [`Timeline`] holds a run's events in frame order. A [`Playback`] walks
//! one with a cursor, and [`Paced`] events say how long the page would
//! linger before showing them, given the user's [`Pace`] settings.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Events recorded in frame order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Timeline<E> {
    events: Vec<E>,
}

impl<E> Timeline<E> {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// Append the event built for the next frame number.
    pub fn push_with(&mut self, make: impl FnOnce(u64) -> E) {
        let frame = self.events.len() as u64;
        self.events.push(make(frame));
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn events(&self) -> &[E] {
        &self.events
    }

    pub fn last(&self) -> Option<&E> {
        self.events.last()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, E> {
        self.events.iter()
    }
}

impl<E> Default for Timeline<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> FromIterator<E> for Timeline<E> {
    fn from_iter<I: IntoIterator<Item = E>>(iter: I) -> Self {
        Self {
            events: iter.into_iter().collect(),
        }
    }
}

impl<'a, E> IntoIterator for &'a Timeline<E> {
    type Item = &'a E;
    type IntoIter = std::slice::Iter<'a, E>;

    fn into_iter(self) -> Self::IntoIter {
        self.events.iter()
    }
}

/// Hanoi animation speed buttons.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HanoiSpeed {
    Slow,
    #[default]
    Normal,
    Fast,
}

impl HanoiSpeed {
    pub fn step_ms(&self) -> u64 {
        match self {
            HanoiSpeed::Slow => 1000,
            HanoiSpeed::Normal => 500,
            HanoiSpeed::Fast => 200,
        }
    }
}

impl fmt::Display for HanoiSpeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            HanoiSpeed::Slow => "slow",
            HanoiSpeed::Normal => "normal",
            HanoiSpeed::Fast => "fast",
        };
        f.write_str(name)
    }
}

impl FromStr for HanoiSpeed {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "slow" => Ok(HanoiSpeed::Slow),
            "normal" => Ok(HanoiSpeed::Normal),
            "fast" => Ok(HanoiSpeed::Fast),
            _ => Err(Error::UnknownSpeed(s.to_string())),
        }
    }
}

/// User-adjustable pacing. Every other delay is fixed per visualizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pace {
    /// Sorting slider position in ms per step, kept within 1..=100
    pub sort_step_ms: u64,
    pub hanoi: HanoiSpeed,
    /// Skip every delay
    pub instant: bool,
}

impl Default for Pace {
    fn default() -> Self {
        Self {
            sort_step_ms: 10,
            hanoi: HanoiSpeed::Normal,
            instant: false,
        }
    }
}

impl Pace {
    pub const INSTANT: Pace = Pace {
        sort_step_ms: 10,
        hanoi: HanoiSpeed::Normal,
        instant: true,
    };

    pub fn sort_step(&self) -> Duration {
        Duration::from_millis(self.sort_step_ms.clamp(1, 100))
    }

    pub fn hanoi_step(&self) -> Duration {
        Duration::from_millis(self.hanoi.step_ms())
    }
}

/// An event that knows how long its visualizer waits before showing it.
pub trait Paced {
    fn delay(&self, pace: &Pace) -> Duration;
}

/// Where a playback stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlaybackState {
    /// At the first frame, never started
    Stopped,
    Playing,
    /// Interrupted mid-timeline; `play` resumes from the cursor
    Paused,
    /// Every frame shown
    Finished,
}

/// Cursor over a timeline.
#[derive(Debug, Clone)]
pub struct Playback<E> {
    events: Vec<E>,
    cursor: usize,
    state: PlaybackState,
    pace: Pace,
}

impl<E> Playback<E> {
    pub fn new(timeline: Timeline<E>) -> Self {
        Self {
            events: timeline.events,
            cursor: 0,
            state: PlaybackState::Stopped,
            pace: Pace::default(),
        }
    }

    pub fn current_frame(&self) -> usize {
        self.cursor
    }

    pub fn total_frames(&self) -> usize {
        self.events.len()
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn pace(&self) -> Pace {
        self.pace
    }

    pub fn set_pace(&mut self, pace: Pace) {
        self.pace = pace;
    }

    /// Jump to `frame`, clamped to the end. Landing on the end finishes.
    pub fn seek(&mut self, frame: usize) {
        self.cursor = frame.min(self.events.len());
        if self.cursor == self.events.len() {
            self.state = PlaybackState::Finished;
        }
    }

    /// Start or resume. A finished playback starts over.
    pub fn play(&mut self) {
        if self.cursor >= self.events.len() {
            self.cursor = 0;
        }
        self.state = PlaybackState::Playing;
    }

    pub fn pause(&mut self) {
        if self.state == PlaybackState::Playing {
            self.state = PlaybackState::Paused;
        }
    }

    /// Return the event at the cursor and move past it.
    pub fn step_forward(&mut self) -> Option<&E> {
        let event = self.events.get(self.cursor)?;
        self.cursor += 1;
        if self.cursor == self.events.len() {
            self.state = PlaybackState::Finished;
        }
        Some(event)
    }

    /// Events already shown, for rebuilding state after a seek.
    pub fn events_to_current(&self) -> &[E] {
        &self.events[..self.cursor]
    }

    pub fn current_event(&self) -> Option<&E> {
        self.events.get(self.cursor)
    }

    /// Fraction shown, 0.0 to 1.0.
    pub fn progress(&self) -> f64 {
        if self.events.is_empty() {
            0.0
        } else {
            self.cursor as f64 / self.events.len() as f64
        }
    }
}

impl<E: Paced> Playback<E> {
    /// Wait before the event at the cursor; `None` once nothing is left.
    pub fn next_delay(&self) -> Option<Duration> {
        let event = self.current_event()?;
        if self.pace.instant {
            return Some(Duration::ZERO);
        }
        Some(event.delay(&self.pace))
    }
}

impl<E> From<Timeline<E>> for Playback<E> {
    fn from(timeline: Timeline<E>) -> Self {
        Self::new(timeline)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Each event waits its own value in milliseconds.
    impl Paced for u64 {
        fn delay(&self, _pace: &Pace) -> Duration {
            Duration::from_millis(*self)
        }
    }

    fn frames(count: usize) -> Playback<u64> {
        let mut timeline = Timeline::new();
        for _ in 0..count {
            timeline.push_with(|frame| frame);
        }
        Playback::new(timeline)
    }

    #[test]
    fn timeline_numbers_frames() {
        let mut timeline = Timeline::new();
        timeline.push_with(|frame| ("a", frame));
        timeline.push_with(|frame| ("b", frame));
        assert_eq!(timeline.events(), &[("a", 0), ("b", 1)]);
        assert_eq!(timeline.last(), Some(&("b", 1)));
    }

    #[test]
    fn seek_clamps_and_finishes() {
        let mut playback = frames(10);
        assert_eq!(playback.state(), PlaybackState::Stopped);

        playback.seek(5);
        assert_eq!(playback.events_to_current(), &[0, 1, 2, 3, 4]);
        assert_eq!(playback.current_event(), Some(&5));
        assert_eq!(playback.progress(), 0.5);

        playback.seek(100);
        assert_eq!(playback.current_frame(), 10);
        assert_eq!(playback.state(), PlaybackState::Finished);
        assert_eq!(playback.progress(), 1.0);
        assert_eq!(frames(0).progress(), 0.0);
    }

    #[test]
    fn stepping_finishes_then_replays() {
        let mut playback = frames(3);
        playback.play();
        assert_eq!(playback.step_forward(), Some(&0));
        assert_eq!(playback.step_forward(), Some(&1));
        assert_eq!(playback.state(), PlaybackState::Playing);
        assert_eq!(playback.step_forward(), Some(&2));
        assert_eq!(playback.state(), PlaybackState::Finished);
        assert!(playback.step_forward().is_none());

        playback.play();
        assert_eq!(playback.current_frame(), 0);
        assert_eq!(playback.state(), PlaybackState::Playing);
    }

    #[test]
    fn pause_only_interrupts_playing() {
        let mut playback = frames(3);
        playback.pause();
        assert_eq!(playback.state(), PlaybackState::Stopped);

        playback.play();
        playback.step_forward();
        playback.pause();
        assert_eq!(playback.state(), PlaybackState::Paused);

        playback.play();
        assert_eq!(playback.current_frame(), 1);
    }

    #[test]
    fn delay_follows_the_next_event() {
        let mut playback = frames(3);
        playback.seek(2);
        assert_eq!(playback.next_delay(), Some(Duration::from_millis(2)));

        playback.set_pace(Pace::INSTANT);
        assert_eq!(playback.next_delay(), Some(Duration::ZERO));

        playback.seek(3);
        assert_eq!(playback.next_delay(), None);
    }

    #[test]
    fn sort_slider_is_clamped() {
        let pace = |sort_step_ms| Pace { sort_step_ms, ..Pace::default() };
        assert_eq!(pace(0).sort_step(), Duration::from_millis(1));
        assert_eq!(pace(40).sort_step(), Duration::from_millis(40));
        assert_eq!(pace(5000).sort_step(), Duration::from_millis(100));
    }

    #[test]
    fn hanoi_speed_names() {
        assert_eq!("Fast".parse::<HanoiSpeed>().unwrap(), HanoiSpeed::Fast);
        assert_eq!(HanoiSpeed::Slow.to_string(), "slow");
        assert_eq!(Pace::default().hanoi_step(), Duration::from_millis(500));
        assert!(matches!("warp".parse::<HanoiSpeed>(), Err(Error::UnknownSpeed(_))));
    }
}
