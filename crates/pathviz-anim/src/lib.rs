//! **pathviz-anim**: turns searches into cancellable, timed animations.
//!
//! - [`EventQueue`] orders deferred tasks by due time, FIFO on ties.
//! - [`Scheduler`] steps a [`Search`](pathviz_paths::Search), paints
//!   `CURRENT`, `VISITED` and `PATH` flags on the space with the delays of
//!   an [`AnimConfig`], and reports each change as an [`Event`]. Tasks are
//!   tagged with the generation of their run so superseded runs can never
//!   write again.
//! - [`Session`] owns a space and a scheduler and routes edits through the
//!   cancellation boundary.
//!
//! Time is virtual: callers feed milliseconds to `advance`, which keeps the
//! whole crate deterministic and single-threaded.

mod config;
mod event;
mod queue;
mod scheduler;
mod session;

pub use config::AnimConfig;
pub use event::{Event, FlagChange, Mode, RunSignal, RunStatus};
pub use queue::EventQueue;
pub use scheduler::Scheduler;
pub use session::Session;
