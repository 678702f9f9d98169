//! Playground Sort
//!
//! Bubble, quick, merge, insertion and selection sort, each instrumented to
//! emit a [`SortStep`] for every comparison, exchange, overwrite and settled
//! position. A [`SortRun`] replays those steps against an array snapshot for
//! the bar-chart page.
//!
//! ```
//! use playground_sort::{SortAlgorithm, SortRun};
//!
//! let mut run = SortRun::new(SortAlgorithm::Quick, vec![3, 1, 2]);
//! run.run_to_end();
//! assert_eq!(run.array(), &[1, 2, 3]);
//! assert_eq!(run.sorted().len(), 3);
//! ```

mod algorithms;
mod error;
mod run;
mod step;

pub use algorithms::{sort_steps, SortAlgorithm};
pub use error::{Error, Result};
pub use run::{random_array, SortConfig, SortRun, SortSnapshot};
pub use step::{SortStats, SortStep};
