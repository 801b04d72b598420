//! The [`Space`] trait: what the search and animation layers need from a
//! grid or a graph.

use crate::error::SpaceError;
use crate::flags::{NodeId, VisFlags};

/// A traversable space with designated endpoints and per-node
/// visualization flags.
///
/// Topology is read through `pathviz_paths::Pather`; this trait only covers
/// identity, endpoints and the flag layer.
pub trait Space {
    /// Number of node ids; valid ids are `0..node_count()`.
    fn node_count(&self) -> usize;

    fn start(&self) -> Option<NodeId>;

    fn target(&self) -> Option<NodeId>;

    /// Current visualization flags of `id` (empty for unknown ids).
    fn flags(&self, id: NodeId) -> VisFlags;

    /// Overwrite the flags of `id`. Returns `false` for unknown ids.
    fn set_flags(&mut self, id: NodeId, flags: VisFlags) -> bool;

    /// Reset every node's flags to [`VisFlags::NONE`].
    fn clear_flags(&mut self);

    /// Validate and return `(start, target)`.
    ///
    /// This is the precondition check every run performs before any
    /// traversal state is created.
    fn endpoints(&self) -> Result<(NodeId, NodeId), SpaceError> {
        let start = self.start().ok_or(SpaceError::MissingStart)?;
        let target = self.target().ok_or(SpaceError::MissingTarget)?;
        if start == target {
            return Err(SpaceError::SameEndpoints(start));
        }
        Ok((start, target))
    }
}
