//! The controller a UI talks to: owns the space and the scheduler, and
//! keeps edits and animation from stepping on each other.

use pathviz_core::SpaceError;
use pathviz_paths::{Algorithm, AstarPather};

use crate::config::AnimConfig;
use crate::event::{Event, Mode, RunStatus};
use crate::scheduler::Scheduler;

/// An editable space together with its animation state.
///
/// Every edit goes through [`edit`](Self::edit), which cancels a running
/// animation before the closure sees the space. When a finished result is
/// on display, the last algorithm is re-run instantly afterwards so the
/// result follows the edit.
#[derive(Debug)]
pub struct Session<S> {
    space: S,
    scheduler: Scheduler,
    last_algorithm: Option<Algorithm>,
}

impl<S: AstarPather> Session<S> {
    pub fn new(space: S, config: AnimConfig) -> Self {
        Self {
            space,
            scheduler: Scheduler::new(config),
            last_algorithm: None,
        }
    }

    pub fn space(&self) -> &S {
        &self.space
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    pub fn status(&self) -> RunStatus {
        self.scheduler.status()
    }

    pub fn last_algorithm(&self) -> Option<Algorithm> {
        self.last_algorithm
    }

    pub fn set_config(&mut self, config: AnimConfig) {
        self.scheduler.set_config(config);
    }

    /// Start a run, superseding the current one.
    pub fn start(&mut self, algorithm: Algorithm, mode: Mode) -> Result<(), SpaceError> {
        self.scheduler.start(&mut self.space, algorithm, mode)?;
        self.last_algorithm = Some(algorithm);
        Ok(())
    }

    /// Execute everything due by `now_ms`.
    pub fn advance(&mut self, now_ms: u64) -> RunStatus {
        self.scheduler.advance(now_ms, &mut self.space)
    }

    /// Run the current animation to its end.
    pub fn finish_now(&mut self) -> RunStatus {
        self.scheduler.finish_now(&mut self.space)
    }

    /// Modify the space.
    ///
    /// A running animation is cancelled and its partial flags are cleared
    /// first. If a finished result was showing and re-routing is enabled,
    /// the last algorithm runs again in [`Mode::Immediate`]; should the
    /// edited space no longer be runnable, the flags are cleared instead.
    pub fn edit<T>(&mut self, f: impl FnOnce(&mut S) -> T) -> T {
        let was_finished = self.scheduler.status().is_finished();
        if self.scheduler.cancel() {
            self.scheduler.clear(&mut self.space);
        }

        let out = f(&mut self.space);

        if was_finished && self.scheduler.config().reroute_on_edit {
            if let Some(algorithm) = self.last_algorithm {
                if let Err(e) = self
                    .scheduler
                    .start(&mut self.space, algorithm, Mode::Immediate)
                {
                    log::warn!("re-route after edit failed: {e}");
                    self.scheduler.reset(&mut self.space);
                }
            }
        }
        out
    }

    /// Cancel any run and remove every visual flag, keeping the space's
    /// contents.
    pub fn clear_path(&mut self) {
        self.scheduler.reset(&mut self.space);
    }

    /// Take the events produced since the last call.
    pub fn drain_events(&mut self) -> Vec<Event> {
        self.scheduler.drain_events()
    }

    /// Give the space back, dropping any animation state.
    pub fn into_space(self) -> S {
        self.space
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::{FlagChange, RunSignal};
    use pathviz_core::{ClearMode, GraphSpace, GridSpace, Point, Pos, Space, VisFlags};

    fn open_grid() -> GridSpace {
        GridSpace::with_endpoints(6, 6, Point::rc(0, 0), Point::rc(5, 5)).unwrap()
    }

    fn found_path(events: &[Event]) -> Option<&pathviz_paths::Path> {
        events.iter().rev().find_map(|e| match e {
            Event::Finished(RunSignal::Found(p)) => Some(p),
            _ => None,
        })
    }

    #[test]
    fn edit_during_run_drops_the_old_animation() {
        let mut s = Session::new(open_grid(), AnimConfig::default());
        s.start(Algorithm::Bfs, Mode::Stepped).unwrap();
        s.advance(90);
        assert_eq!(s.status(), RunStatus::Running);

        let changed = s.edit(|g| g.set_wall(Point::rc(2, 2), true)).unwrap();
        assert!(changed);
        let events = s.drain_events();
        let cut = events.iter().position(|e| *e == Event::Cancelled).unwrap();
        assert_eq!(events[cut + 1..], [Event::Cleared]);
        assert_eq!(s.status(), RunStatus::Cancelled);

        s.advance(60_000);
        assert!(s.drain_events().is_empty());
        assert_eq!(s.space().count_flags(VisFlags::CURRENT), 0);
        assert_eq!(s.space().count_flags(VisFlags::VISITED), 0);
        assert!(s.scheduler().stale_discards() > 0);
        assert!(s.space().is_wall(Point::rc(2, 2)));
    }

    #[test]
    fn moving_an_endpoint_reroutes() {
        let mut s = Session::new(open_grid(), AnimConfig::default());
        s.start(Algorithm::Dijkstra, Mode::Stepped).unwrap();
        assert_eq!(s.finish_now(), RunStatus::Completed);
        s.drain_events();

        s.edit(|g| g.move_target(Point::rc(0, 3))).unwrap();
        let events = s.drain_events();
        assert_eq!(events.first(), Some(&Event::Cleared));
        let path = found_path(&events).unwrap();
        assert_eq!(path.len(), 3);
        assert_eq!(path.last(), s.space().target());
        assert_eq!(s.status(), RunStatus::Completed);
        assert_eq!(s.space().count_flags(VisFlags::PATH), 4);
        // Instant re-routes never show nodes as current.
        assert!(!events.iter().any(|e| matches!(
            e,
            Event::Flag {
                change: FlagChange::Current,
                ..
            }
        )));
    }

    #[test]
    fn reroute_can_be_disabled() {
        let config = AnimConfig {
            reroute_on_edit: false,
            ..AnimConfig::default()
        };
        let mut s = Session::new(open_grid(), config);
        s.start(Algorithm::AStar, Mode::Immediate).unwrap();
        s.drain_events();
        s.edit(|g| g.move_start(Point::rc(3, 3))).unwrap();
        assert!(s.drain_events().is_empty());
        assert_eq!(s.status(), RunStatus::Completed);
    }

    #[test]
    fn failed_reroute_clears() {
        let mut s = Session::new(open_grid(), AnimConfig::default());
        s.start(Algorithm::Bfs, Mode::Immediate).unwrap();
        s.edit(|g| g.clear(ClearMode::All));
        assert_eq!(s.status(), RunStatus::Idle);
        assert_eq!(s.space().count_flags(VisFlags::VISITED), 0);
        assert_eq!(
            s.start(Algorithm::Bfs, Mode::Immediate),
            Err(SpaceError::MissingStart)
        );
    }

    #[test]
    fn walled_off_target_reroutes_to_not_found() {
        let mut s = Session::new(open_grid(), AnimConfig::default());
        s.start(Algorithm::Bfs, Mode::Immediate).unwrap();
        s.edit(|g| {
            g.set_wall(Point::rc(4, 5), true).unwrap();
            g.set_wall(Point::rc(5, 4), true).unwrap();
        });
        assert_eq!(s.status(), RunStatus::NoPathFound);
        assert_eq!(
            s.drain_events().last(),
            Some(&Event::Finished(RunSignal::NotFound))
        );
    }

    #[test]
    fn clear_path_keeps_the_board() {
        let mut g = open_grid();
        g.set_weighted(Point::rc(1, 1), true).unwrap();
        let mut s = Session::new(g, AnimConfig::default());
        s.start(Algorithm::Dfs, Mode::Immediate).unwrap();
        s.clear_path();
        assert_eq!(s.status(), RunStatus::Idle);
        assert_eq!(s.space().count_flags(VisFlags::VISITED), 0);
        assert!(s.space().tile(Point::rc(1, 1)).unwrap().is_weighted());
        // Nothing is showing, so edits no longer re-route.
        s.drain_events();
        s.edit(|g| g.set_wall(Point::rc(3, 3), true)).unwrap();
        assert!(s.drain_events().is_empty());
    }

    #[test]
    fn graph_session() {
        let mut g = GraphSpace::new();
        g.add_vertex("A", Pos::new(100.0, 100.0)).unwrap();
        g.add_vertex("B", Pos::new(200.0, 100.0)).unwrap();
        g.add_vertex("C", Pos::new(300.0, 100.0)).unwrap();
        g.add_edge("A", "B", 2.0).unwrap();
        g.add_edge("B", "C", 2.0).unwrap();
        g.add_edge("A", "C", 10.0).unwrap();
        g.set_start("A").unwrap();
        g.set_target("C").unwrap();

        let mut s = Session::new(g, AnimConfig::instant());
        s.start(Algorithm::Dijkstra, Mode::Stepped).unwrap();
        assert_eq!(s.advance(0), RunStatus::Completed);
        let events = s.drain_events();
        assert_eq!(found_path(&events).unwrap().cost, 4.0);

        s.edit(|g| g.add_edge("A", "C", 1.0)).unwrap();
        let events = s.drain_events();
        let path = found_path(&events).unwrap();
        assert_eq!(path.cost, 1.0);
        assert_eq!(path.len(), 1);
    }
}
