//! Stepwise A* search over [`gridstar_core::Grid`].
//!
//! The [`SearchEngine`] finds shortest 4-directional paths on a grid of
//! free and blocked cells, using the Manhattan distance as heuristic and a
//! uniform step cost (10 by default).
//!
//! - [`SearchEngine::find_path`] runs a search to completion.
//! - [`SearchEngine::begin`] + [`SearchEngine::step`] drive it one expansion
//!   at a time, e.g. one step per rendered frame.
//! - A [`StepObserver`] receives the frontier and visited sets after each
//!   expansion.
//! - [`SearchEngine::cancel`] or a [`CancelToken`] abort a running search.
//!
//! Every outcome is a [`PathResult`]; failures are ordinary values
//! ([`SearchError`]), never panics.

mod cancel;
mod config;
mod distance;
mod engine;
mod error;
mod frontier;
mod node;
mod observer;
mod path;

pub use cancel::CancelToken;
pub use config::{DEFAULT_STEP_COST, EngineConfig, MAX_STEP_COST};
pub use distance::manhattan;
pub use engine::{EngineState, SearchEngine, Step};
pub use error::{RequestError, SearchError};
pub use observer::{NoopObserver, StepObserver, StepSnapshot, StepTrace};
pub use path::{Path, PathResult};
