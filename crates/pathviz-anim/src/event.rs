//! What the scheduler reports to a renderer.

use pathviz_core::{NodeId, VisFlags};
use pathviz_paths::Path;

/// A visual state transition of one node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FlagChange {
    /// The node is being expanded.
    Current,
    /// The node has been expanded; replaces `Current`.
    Visited,
    /// The node lies on the final path.
    Path,
}

impl FlagChange {
    /// The flags a node ends up with after this change.
    pub fn apply(self, flags: VisFlags) -> VisFlags {
        match self {
            FlagChange::Current => flags.with(VisFlags::CURRENT),
            FlagChange::Visited => flags.without(VisFlags::CURRENT).with(VisFlags::VISITED),
            FlagChange::Path => flags.with(VisFlags::PATH),
        }
    }
}

/// Terminal signal of a run.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RunSignal {
    Found(Path),
    NotFound,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Event {
    /// Every node's flags were reset.
    Cleared,
    Flag { node: NodeId, change: FlagChange },
    Finished(RunSignal),
    /// The running animation was superseded.
    Cancelled,
}

/// How a run is driven.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Mode {
    /// One unit of work per tick of `advance`, with delays in between.
    #[default]
    Stepped,
    /// Run to completion within the call and paint only the final state.
    Immediate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunStatus {
    #[default]
    Idle,
    Running,
    /// Finished with a path.
    Completed,
    Cancelled,
    NoPathFound,
}

impl RunStatus {
    /// Whether a finished result is on display.
    pub fn is_finished(self) -> bool {
        matches!(self, RunStatus::Completed | RunStatus::NoPathFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn visited_replaces_current() {
        let f = FlagChange::Current.apply(VisFlags::NONE);
        assert_eq!(f, VisFlags::CURRENT);
        let f = FlagChange::Visited.apply(f);
        assert_eq!(f, VisFlags::VISITED);
        let f = FlagChange::Path.apply(f);
        assert!(f.contains(VisFlags::VISITED) && f.contains(VisFlags::PATH));
    }
}

#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn events_serialize() {
        let ev = Event::Finished(RunSignal::Found(Path {
            nodes: vec![NodeId(0), NodeId(1)],
            cost: 1.0,
        }));
        let json = serde_json::to_string(&ev).unwrap();
        let back: Event = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ev);
    }
}
