//! Event-loop phase simulator.
//!
//! A teaching model, not a scheduler. Each task enters on the call stack and
//! on the first tick is routed by its kind:
//!
//! | kind | first phase |
//! |---|---|
//! | `nextTick` | microtask queue |
//! | `setImmediate` | task queue |
//! | `fs`, `crypto` | thread pool |
//! | `setTimeout`, `fetch` | web API |
//!
//! On later ticks a task in the web API or thread pool moves to the task
//! queue, and a queued task completes, each with its configured probability.
//!
//! Ticks are atomic: every transition is computed from the task list as it
//! stood when the tick began. A task-queue task never completes in a tick
//! that began with anything in the microtask queue.

use std::fmt;
use std::str::FromStr;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::{check_probability, Error, Result};

/// Async primitive a task stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum TaskKind {
    SetTimeout,
    Fetch,
    Fs,
    Crypto,
    SetImmediate,
    NextTick,
}

impl TaskKind {
    pub const ALL: [TaskKind; 6] = [
        TaskKind::SetTimeout,
        TaskKind::Fetch,
        TaskKind::Fs,
        TaskKind::Crypto,
        TaskKind::SetImmediate,
        TaskKind::NextTick,
    ];

    /// Identifier used on the command line.
    pub fn name(&self) -> &'static str {
        match self {
            TaskKind::SetTimeout => "setTimeout",
            TaskKind::Fetch => "fetch",
            TaskKind::Fs => "fs",
            TaskKind::Crypto => "crypto",
            TaskKind::SetImmediate => "setImmediate",
            TaskKind::NextTick => "nextTick",
        }
    }

    /// Display label.
    pub fn label(&self) -> &'static str {
        match self {
            TaskKind::SetTimeout => "setTimeout",
            TaskKind::Fetch => "fetch API",
            TaskKind::Fs => "fs.readFile",
            TaskKind::Crypto => "crypto.pbkdf2",
            TaskKind::SetImmediate => "setImmediate",
            TaskKind::NextTick => "nextTick",
        }
    }

    /// Nominal duration shown next to the label. The simulation itself is
    /// driven by probabilities, not by this value.
    pub fn nominal_duration_ms(&self) -> u64 {
        match self {
            TaskKind::SetTimeout => 2000,
            TaskKind::Fetch => 3000,
            TaskKind::Fs => 2500,
            TaskKind::Crypto => 3500,
            TaskKind::SetImmediate => 1000,
            TaskKind::NextTick => 500,
        }
    }

    /// Phase a task of this kind leaves the call stack for.
    pub fn entry_phase(&self) -> Phase {
        match self {
            TaskKind::NextTick => Phase::Microtask,
            TaskKind::SetImmediate => Phase::TaskQueue,
            TaskKind::Fs | TaskKind::Crypto => Phase::ThreadPool,
            TaskKind::SetTimeout | TaskKind::Fetch => Phase::WebApi,
        }
    }
}

impl fmt::Display for TaskKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TaskKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        TaskKind::ALL
            .into_iter()
            .find(|k| k.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| Error::UnknownTaskKind(s.to_string()))
    }
}

/// Where a task currently sits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Phase {
    CallStack,
    WebApi,
    ThreadPool,
    Microtask,
    TaskQueue,
    Completed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum TaskStatus {
    Pending,
    Executing,
    Completed,
}

/// Identifier handed out by [`EventLoop::add_task`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TaskId(pub u64);

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "task-{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimTask {
    pub id: TaskId,
    pub kind: TaskKind,
    pub phase: Phase,
    pub status: TaskStatus,
}

impl SimTask {
    pub fn is_completed(&self) -> bool {
        self.status == TaskStatus::Completed
    }
}

/// What the loop reports it is doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LoopStatus {
    Idle,
    ProcessingMicrotasks,
    ProcessingTasks,
}

impl LoopStatus {
    pub fn label(&self) -> &'static str {
        match self {
            LoopStatus::Idle => "Idle",
            LoopStatus::ProcessingMicrotasks => "Processing Microtask Queue",
            LoopStatus::ProcessingTasks => "Processing Task Queue",
        }
    }
}

impl fmt::Display for LoopStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Simulator parameters.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EventLoopConfig {
    /// Time between ticks when driven by a timer
    pub tick_interval_ms: u64,
    /// Chance per tick that a web API task reaches the task queue
    pub external_advance: f64,
    /// Chance per tick that a thread pool task reaches the task queue
    pub worker_advance: f64,
    /// Chance per tick that a microtask completes
    pub microtask_advance: f64,
    /// Chance per tick that a task-queue task completes
    pub macrotask_advance: f64,
    /// Seed for the advancement RNG
    pub seed: u64,
}

impl Default for EventLoopConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: 800,
            external_advance: 0.3,
            worker_advance: 0.3,
            microtask_advance: 0.5,
            macrotask_advance: 0.4,
            seed: 42,
        }
    }
}

impl EventLoopConfig {
    /// Every eligible transition fires on every tick.
    pub fn deterministic() -> Self {
        Self {
            external_advance: 1.0,
            worker_advance: 1.0,
            microtask_advance: 1.0,
            macrotask_advance: 1.0,
            ..Self::default()
        }
    }

    fn validate(&self) -> Result<()> {
        check_probability("external advance", self.external_advance)?;
        check_probability("worker advance", self.worker_advance)?;
        check_probability("microtask advance", self.microtask_advance)?;
        check_probability("macrotask advance", self.macrotask_advance)
    }
}

/// One task changing phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Transition {
    pub id: TaskId,
    pub from: Phase,
    pub to: Phase,
}

/// Result of one tick.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TickReport {
    pub tick: u64,
    pub transitions: Vec<Transition>,
    pub status: LoopStatus,
    pub active: usize,
}

/// The simulator.
#[derive(Debug, Clone)]
pub struct EventLoop {
    config: EventLoopConfig,
    rng: StdRng,
    tasks: Vec<SimTask>,
    next_id: u64,
    running: bool,
    status: LoopStatus,
    ticks: u64,
}

impl EventLoop {
    pub fn new(config: EventLoopConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            rng: StdRng::seed_from_u64(config.seed),
            config,
            tasks: Vec::new(),
            next_id: 0,
            running: false,
            status: LoopStatus::Idle,
            ticks: 0,
        })
    }

    pub fn config(&self) -> &EventLoopConfig {
        &self.config
    }

    /// Push a task onto the call stack; starts the loop if it was idle.
    pub fn add_task(&mut self, kind: TaskKind) -> TaskId {
        let id = TaskId(self.next_id);
        self.next_id += 1;
        self.tasks.push(SimTask {
            id,
            kind,
            phase: Phase::CallStack,
            status: TaskStatus::Pending,
        });
        if !self.running {
            tracing::debug!(%id, %kind, "event loop started");
            self.running = true;
        }
        id
    }

    pub fn tasks(&self) -> &[SimTask] {
        &self.tasks
    }

    /// Live tasks in `phase`.
    pub fn tasks_in_phase(&self, phase: Phase) -> impl Iterator<Item = &SimTask> + '_ {
        self.tasks
            .iter()
            .filter(move |t| t.phase == phase && !t.is_completed())
    }

    /// Tasks not yet completed.
    pub fn active_count(&self) -> usize {
        self.tasks.iter().filter(|t| !t.is_completed()).count()
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn status(&self) -> LoopStatus {
        self.status
    }

    /// Ticks taken since the last reset.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Advance every live task at most one phase. Returns `None` when the
    /// loop is idle.
    pub fn tick(&mut self) -> Option<TickReport> {
        if !self.running {
            return None;
        }
        self.ticks += 1;

        let microtasks_waiting = self
            .tasks
            .iter()
            .any(|t| t.phase == Phase::Microtask && !t.is_completed());

        let mut transitions = Vec::new();
        let mut drained_microtask = false;
        let mut ran_task = false;

        let config = &self.config;
        let rng = &mut self.rng;

        // Decide every move against the pre-tick list, then apply them.
        for task in self.tasks.iter().filter(|t| !t.is_completed()) {
            let to = match task.phase {
                Phase::CallStack => Some(task.kind.entry_phase()),
                Phase::WebApi => roll(rng, config.external_advance).then_some(Phase::TaskQueue),
                Phase::ThreadPool => roll(rng, config.worker_advance).then_some(Phase::TaskQueue),
                Phase::Microtask => {
                    let done = roll(rng, config.microtask_advance);
                    drained_microtask |= done;
                    done.then_some(Phase::Completed)
                }
                Phase::TaskQueue if microtasks_waiting => None,
                Phase::TaskQueue => {
                    let done = roll(rng, config.macrotask_advance);
                    ran_task |= done;
                    done.then_some(Phase::Completed)
                }
                Phase::Completed => None,
            };
            if let Some(to) = to {
                transitions.push(Transition { id: task.id, from: task.phase, to });
            }
        }

        for transition in &transitions {
            if let Some(task) = self.tasks.iter_mut().find(|t| t.id == transition.id) {
                task.phase = transition.to;
                task.status = match transition.to {
                    Phase::WebApi | Phase::ThreadPool => TaskStatus::Executing,
                    Phase::Completed => TaskStatus::Completed,
                    _ => TaskStatus::Pending,
                };
            }
        }

        if drained_microtask {
            self.status = LoopStatus::ProcessingMicrotasks;
        } else if ran_task {
            self.status = LoopStatus::ProcessingTasks;
        }

        let active = self.active_count();
        if active == 0 {
            self.status = LoopStatus::Idle;
            self.running = false;
            tracing::debug!(ticks = self.ticks, "event loop idle");
        }

        Some(TickReport {
            tick: self.ticks,
            transitions,
            status: self.status,
            active,
        })
    }

    /// Tick until idle or `max_ticks` have run; returns the reports.
    pub fn run_until_idle(&mut self, max_ticks: usize) -> Vec<TickReport> {
        let mut reports = Vec::new();
        while reports.len() < max_ticks {
            match self.tick() {
                Some(report) => reports.push(report),
                None => break,
            }
        }
        reports
    }

    /// Drop finished tasks from the list.
    pub fn clear_completed(&mut self) {
        self.tasks.retain(|t| !t.is_completed());
    }

    /// Empty the loop. The RNG is reseeded so a reset run replays exactly.
    pub fn reset(&mut self) {
        self.tasks.clear();
        self.next_id = 0;
        self.running = false;
        self.status = LoopStatus::Idle;
        self.ticks = 0;
        self.rng = StdRng::seed_from_u64(self.config.seed);
    }
}

fn roll(rng: &mut StdRng, probability: f64) -> bool {
    rng.gen::<f64>() < probability
}

#[cfg(test)]
mod tests {
    use super::*;

    fn deterministic() -> EventLoop {
        EventLoop::new(EventLoopConfig::deterministic()).unwrap()
    }

    fn phase_of(sim: &EventLoop, id: TaskId) -> Phase {
        sim.tasks().iter().find(|t| t.id == id).unwrap().phase
    }

    #[test]
    fn rejects_bad_probability() {
        let config = EventLoopConfig { microtask_advance: 1.5, ..Default::default() };
        assert!(matches!(
            EventLoop::new(config),
            Err(Error::InvalidProbability { name: "microtask advance", .. })
        ));
    }

    #[test]
    fn entry_routing() {
        let mut sim = deterministic();
        let ids: Vec<_> = TaskKind::ALL.iter().map(|&k| sim.add_task(k)).collect();
        sim.tick();

        let phases: Vec<_> = ids.iter().map(|&id| phase_of(&sim, id)).collect();
        assert_eq!(
            phases,
            vec![
                Phase::WebApi,
                Phase::WebApi,
                Phase::ThreadPool,
                Phase::ThreadPool,
                Phase::TaskQueue,
                Phase::Microtask,
            ]
        );
        assert_eq!(sim.tasks_in_phase(Phase::ThreadPool).count(), 2);
        assert!(sim
            .tasks_in_phase(Phase::WebApi)
            .all(|t| t.status == TaskStatus::Executing));
    }

    #[test]
    fn microtasks_drain_before_task_queue() {
        let mut sim = deterministic();
        let immediate = sim.add_task(TaskKind::SetImmediate);
        let tick = sim.add_task(TaskKind::NextTick);

        // Tick 1: both leave the call stack.
        sim.tick();
        assert_eq!(phase_of(&sim, immediate), Phase::TaskQueue);
        assert_eq!(phase_of(&sim, tick), Phase::Microtask);

        // Tick 2: the microtask completes, the queued task must wait.
        let report = sim.tick().unwrap();
        assert_eq!(phase_of(&sim, tick), Phase::Completed);
        assert_eq!(phase_of(&sim, immediate), Phase::TaskQueue);
        assert_eq!(report.status, LoopStatus::ProcessingMicrotasks);

        // Tick 3: now the task queue runs and the loop goes idle.
        let report = sim.tick().unwrap();
        assert_eq!(phase_of(&sim, immediate), Phase::Completed);
        assert_eq!(report.status, LoopStatus::Idle);
        assert!(!sim.is_running());
    }

    #[test]
    fn external_work_goes_through_task_queue() {
        let mut sim = deterministic();
        let id = sim.add_task(TaskKind::Fetch);
        let reports = sim.run_until_idle(10);

        let path: Vec<_> = reports
            .iter()
            .flat_map(|r| r.transitions.iter())
            .filter(|t| t.id == id)
            .map(|t| t.to)
            .collect();
        assert_eq!(path, vec![Phase::WebApi, Phase::TaskQueue, Phase::Completed]);
    }

    #[test]
    fn zero_probability_never_advances() {
        let config = EventLoopConfig { external_advance: 0.0, ..EventLoopConfig::deterministic() };
        let mut sim = EventLoop::new(config).unwrap();
        let id = sim.add_task(TaskKind::SetTimeout);
        sim.run_until_idle(50);
        assert_eq!(phase_of(&sim, id), Phase::WebApi);
        assert!(sim.is_running());
    }

    #[test]
    fn idle_loop_does_not_tick() {
        let mut sim = deterministic();
        assert!(sim.tick().is_none());
        assert_eq!(sim.status(), LoopStatus::Idle);
    }

    #[test]
    fn random_run_terminates() {
        let mut sim = EventLoop::new(EventLoopConfig::default()).unwrap();
        for kind in TaskKind::ALL {
            sim.add_task(kind);
        }
        sim.run_until_idle(500);
        assert_eq!(sim.active_count(), 0);
        assert_eq!(sim.status(), LoopStatus::Idle);
    }

    #[test]
    fn clear_completed_keeps_live_tasks() {
        let mut sim = deterministic();
        sim.add_task(TaskKind::NextTick);
        let slow = sim.add_task(TaskKind::Crypto);
        sim.tick();
        sim.tick();
        sim.clear_completed();
        assert_eq!(sim.tasks().len(), 1);
        assert_eq!(sim.tasks()[0].id, slow);
    }

    #[test]
    fn reset_twice_equals_reset_once() {
        let mut once = EventLoop::new(EventLoopConfig::default()).unwrap();
        once.add_task(TaskKind::Fs);
        once.tick();
        let mut twice = once.clone();
        once.reset();
        twice.reset();
        twice.reset();

        assert_eq!(once.tasks(), twice.tasks());
        assert_eq!(once.status(), twice.status());
        assert_eq!(once.ticks(), 0);

        // Reseeded RNGs replay the same run.
        once.add_task(TaskKind::Fetch);
        twice.add_task(TaskKind::Fetch);
        assert_eq!(once.run_until_idle(100), twice.run_until_idle(100));
    }

    #[test]
    fn parse_kind_names() {
        assert_eq!("nexttick".parse::<TaskKind>().unwrap(), TaskKind::NextTick);
        assert!("promise".parse::<TaskKind>().is_err());
    }
}
