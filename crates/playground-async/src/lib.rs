//! Playground Async
//!
//! Two tick-driven simulators for the "systems concepts" pages:
//!
//! - [`EventLoop`]: tasks flow through call stack, web API / thread pool,
//!   microtask and task queues to completion, advancing with configurable
//!   per-phase probabilities. Microtasks always drain before a queued task
//!   completes.
//! - [`CombinatorRun`]: simulated promises progress against one clock and
//!   `all` / `allSettled` / `race` / `any` decide the aggregate outcome.
//!
//! ```
//! use playground_async::{Combinator, CombinatorConfig, CombinatorRun, PromiseStatus};
//!
//! let mut run = CombinatorRun::new(CombinatorConfig::default(), Combinator::Race).unwrap();
//! let outcome = run.run_to_completion().unwrap();
//! assert_eq!(outcome.status, PromiseStatus::Fulfilled);
//! assert_eq!(outcome.settled_at_ms, 1500);
//! ```

mod error;
mod event_loop;
mod promise;

pub use error::{Error, Result};
pub use event_loop::{
    EventLoop, EventLoopConfig, LoopStatus, Phase, SimTask, TaskId, TaskKind, TaskStatus,
    TickReport, Transition,
};
pub use promise::{
    Combinator, CombinatorConfig, CombinatorRun, Outcome, PromiseStatus, SimPromise,
    DEFAULT_PROMISES,
};
