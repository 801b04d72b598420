//! Generation-tagged animation of a [`Search`].
//!
//! The scheduler turns a run into timed flag transitions. Every task it
//! queues carries the generation of the run that queued it; starting or
//! cancelling a run bumps the generation, and tasks from older generations
//! are dropped when they come due instead of touching the space.

use pathviz_core::{NodeId, SpaceError};
use pathviz_paths::{Algorithm, AstarPather, Outcome, Search};

use crate::config::AnimConfig;
use crate::event::{Event, FlagChange, Mode, RunSignal, RunStatus};
use crate::queue::EventQueue;

#[derive(Debug)]
enum Task {
    Step,
    Mark { node: NodeId, change: FlagChange },
    Finish(RunSignal),
}

#[derive(Debug)]
struct Tagged {
    generation: u64,
    task: Task,
}

/// Drives searches and owns the visual flags of a space while a run is in
/// progress.
///
/// Time is virtual: the caller passes the current time in milliseconds to
/// [`advance`](Self::advance), and every task due by then is executed in
/// order.
#[derive(Debug, Default)]
pub struct Scheduler {
    config: AnimConfig,
    queue: EventQueue<Tagged>,
    generation: u64,
    search: Option<Search>,
    status: RunStatus,
    now: u64,
    events: Vec<Event>,
    stale_discards: usize,
}

impl Scheduler {
    pub fn new(config: AnimConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn config(&self) -> &AnimConfig {
        &self.config
    }

    /// Replace the timing. Tasks already queued keep their due times.
    pub fn set_config(&mut self, config: AnimConfig) {
        self.config = config;
    }

    pub fn status(&self) -> RunStatus {
        self.status
    }

    /// Generation of the current (or last) run.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Latest time passed to [`advance`](Self::advance).
    pub fn now(&self) -> u64 {
        self.now
    }

    /// Tasks of superseded runs dropped so far.
    pub fn stale_discards(&self) -> usize {
        self.stale_discards
    }

    /// Queued tasks, stale ones included.
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// When the next queued task comes due.
    pub fn next_due(&self) -> Option<u64> {
        self.queue.next_due()
    }

    /// State of the current or last finished run.
    pub fn search(&self) -> Option<&Search> {
        self.search.as_ref()
    }

    /// Take the events produced since the last call.
    pub fn drain_events(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.events)
    }

    /// Start `algorithm` on `space`, superseding any run in progress.
    ///
    /// The space is validated first; if it has no valid endpoints nothing
    /// changes and the error is returned. Otherwise all flags are cleared
    /// and the new run either gets queued (`Stepped`, first step due now)
    /// or is carried out completely before returning (`Immediate`).
    ///
    /// Returns the generation of the new run.
    pub fn start<S: AstarPather>(
        &mut self,
        space: &mut S,
        algorithm: Algorithm,
        mode: Mode,
    ) -> Result<u64, SpaceError> {
        let search = match Search::new(&*space, algorithm) {
            Ok(search) => search,
            Err(e) => {
                log::warn!("cannot start {algorithm}: {e}");
                return Err(e);
            }
        };
        self.cancel();
        self.generation += 1;
        self.clear(space);
        self.status = RunStatus::Running;
        log::debug!(
            "run {} started: {algorithm}, {mode:?}, {} nodes",
            self.generation,
            space.node_count()
        );

        match mode {
            Mode::Stepped => {
                self.search = Some(search);
                self.schedule(Task::Step, self.now);
            }
            Mode::Immediate => self.run_immediate(space, search),
        }
        Ok(self.generation)
    }

    /// Supersede the running animation. Its queued tasks stay in the queue
    /// and are discarded as they come due. Returns `false` if nothing was
    /// running.
    pub fn cancel(&mut self) -> bool {
        if self.status != RunStatus::Running {
            return false;
        }
        log::debug!(
            "run {} cancelled with {} tasks queued",
            self.generation,
            self.queue.len()
        );
        self.generation += 1;
        self.status = RunStatus::Cancelled;
        self.search = None;
        self.events.push(Event::Cancelled);
        true
    }

    /// Reset every flag of `space` and report it.
    pub fn clear<S: AstarPather>(&mut self, space: &mut S) {
        space.clear_flags();
        self.events.push(Event::Cleared);
    }

    /// Cancel any run, clear the flags and go back to `Idle`.
    pub fn reset<S: AstarPather>(&mut self, space: &mut S) {
        self.cancel();
        self.clear(space);
        self.search = None;
        self.status = RunStatus::Idle;
    }

    /// Move the clock to `now_ms` and execute every task due by then.
    pub fn advance<S: AstarPather>(&mut self, now_ms: u64, space: &mut S) -> RunStatus {
        self.now = self.now.max(now_ms);
        while let Some((tagged, due)) = self.queue.pop_due(self.now) {
            if tagged.generation != self.generation {
                self.stale_discards += 1;
                log::trace!(
                    "discarding {:?} from run {} (current {})",
                    tagged.task,
                    tagged.generation,
                    self.generation
                );
                continue;
            }
            match tagged.task {
                Task::Step => self.run_step(space, due),
                Task::Mark { node, change } => self.mark(space, node, change),
                Task::Finish(signal) => self.finish(signal),
            }
        }
        self.status
    }

    /// Advance until the current run has nothing left queued.
    pub fn finish_now<S: AstarPather>(&mut self, space: &mut S) -> RunStatus {
        while self.status == RunStatus::Running {
            let Some(due) = self.queue.next_due() else {
                break;
            };
            self.advance(due, space);
        }
        self.status
    }

    fn schedule(&mut self, task: Task, due: u64) {
        self.queue.push(
            Tagged {
                generation: self.generation,
                task,
            },
            due,
        );
    }

    fn mark<S: AstarPather>(&mut self, space: &mut S, node: NodeId, change: FlagChange) {
        let flags = change.apply(space.flags(node));
        space.set_flags(node, flags);
        self.events.push(Event::Flag { node, change });
    }

    fn finish(&mut self, signal: RunSignal) {
        self.status = match signal {
            RunSignal::Found(_) => RunStatus::Completed,
            RunSignal::NotFound => RunStatus::NoPathFound,
        };
        log::debug!("run {} finished: {:?}", self.generation, self.status);
        self.events.push(Event::Finished(signal));
    }

    fn run_step<S: AstarPather>(&mut self, space: &mut S, due: u64) {
        let Some(mut search) = self.search.take() else {
            return;
        };
        let mut visited: Vec<NodeId> = Vec::new();
        let outcome = search.step(&*space, &mut visited);
        log::trace!(
            "run {} {} step {}: {} visited",
            self.generation,
            search.algorithm(),
            search.steps(),
            visited.len()
        );

        let settle = due + self.config.visit_delay_ms;
        for &node in &visited {
            self.mark(space, node, FlagChange::Current);
            self.schedule(
                Task::Mark {
                    node,
                    change: FlagChange::Visited,
                },
                settle,
            );
        }

        match outcome {
            Outcome::Running => {
                let delay = match search.algorithm() {
                    Algorithm::Bfs => self.config.layer_delay_ms,
                    _ => self.config.step_delay_ms,
                };
                self.schedule(Task::Step, due + delay);
            }
            Outcome::Found | Outcome::NoPath => match search.path() {
                Some(path) => {
                    let frame = self.config.path_delay_ms;
                    let end = settle + frame * path.nodes.len() as u64;
                    for (i, &node) in path.nodes.iter().enumerate() {
                        self.schedule(
                            Task::Mark {
                                node,
                                change: FlagChange::Path,
                            },
                            settle + frame * (i as u64 + 1),
                        );
                    }
                    self.schedule(Task::Finish(RunSignal::Found(path)), end);
                }
                None => self.schedule(Task::Finish(RunSignal::NotFound), settle),
            },
        }
        self.search = Some(search);
    }

    fn run_immediate<S: AstarPather>(&mut self, space: &mut S, mut search: Search) {
        search.run(&*space, &mut ());
        for &node in search.order() {
            self.mark(space, node, FlagChange::Visited);
        }
        let signal = match search.path() {
            Some(path) => {
                for &node in &path.nodes {
                    self.mark(space, node, FlagChange::Path);
                }
                RunSignal::Found(path)
            }
            None => RunSignal::NotFound,
        };
        self.search = Some(search);
        self.finish(signal);
    }
}
