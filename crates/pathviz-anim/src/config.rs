//! Animation timing.

/// Delays used by the [`Scheduler`](crate::Scheduler), in milliseconds.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AnimConfig {
    /// Between DFS, Dijkstra and A* steps.
    pub step_delay_ms: u64,
    /// Between BFS layers.
    pub layer_delay_ms: u64,
    /// From a node turning current to it turning visited.
    pub visit_delay_ms: u64,
    /// Between consecutive path nodes.
    pub path_delay_ms: u64,
    /// Re-run the last algorithm instantly when the space is edited while a
    /// finished result is shown.
    pub reroute_on_edit: bool,
}

impl Default for AnimConfig {
    fn default() -> Self {
        Self {
            step_delay_ms: 10,
            layer_delay_ms: 30,
            visit_delay_ms: 75,
            path_delay_ms: 25,
            reroute_on_edit: true,
        }
    }
}

impl AnimConfig {
    /// Configuration with every delay set to zero; stepped runs then finish
    /// within a single `advance`.
    pub fn instant() -> Self {
        Self {
            step_delay_ms: 0,
            layer_delay_ms: 0,
            visit_delay_ms: 0,
            path_delay_ms: 0,
            ..Self::default()
        }
    }
}
