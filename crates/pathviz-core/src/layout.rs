//! Force-directed layout for [`GraphSpace`] vertices.
//!
//! Each [`ForceLayout::step`] applies edge springs (rest length grows with
//! the edge weight), short-range repulsion between vertices, friction, and
//! finally integrates positions, bouncing off the canvas margins.

use crate::geom::Pos;
use crate::graph::GraphSpace;

/// Tuning for [`ForceLayout`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ForceLayoutConfig {
    pub spring_strength: f64,
    /// Spring rest length for a zero-weight edge.
    pub base_length: f64,
    /// Additional rest length per unit of edge weight.
    pub length_per_weight: f64,
    pub repulsion: f64,
    /// Vertices closer than this push each other apart.
    pub min_distance: f64,
    /// Velocity multiplier applied every step.
    pub friction: f64,
    pub width: f64,
    pub height: f64,
    pub margin: f64,
    /// Velocity multiplier when a vertex hits a margin.
    pub bounce: f64,
}

impl Default for ForceLayoutConfig {
    fn default() -> Self {
        Self {
            spring_strength: 0.005,
            base_length: 65.0,
            length_per_weight: 20.0,
            repulsion: 20.0,
            min_distance: 40.0,
            friction: 0.85,
            width: 800.0,
            height: 800.0,
            margin: 20.0,
            bounce: -0.3,
        }
    }
}

/// Spring/repulsion layout driver.
#[derive(Debug, Clone, Default)]
pub struct ForceLayout {
    pub config: ForceLayoutConfig,
}

impl ForceLayout {
    pub fn new(config: ForceLayoutConfig) -> Self {
        Self { config }
    }

    /// Advance the simulation by one tick.
    pub fn step(&self, graph: &mut GraphSpace) {
        self.apply_springs(graph);
        self.apply_repulsion(graph);
        self.apply_friction(graph);
        self.integrate(graph);
    }

    /// Run `n` ticks.
    pub fn settle(&self, graph: &mut GraphSpace, n: usize) {
        for _ in 0..n {
            self.step(graph);
        }
    }

    fn apply_springs(&self, graph: &mut GraphSpace) {
        let cfg = &self.config;
        let edges = graph.edges().to_vec();
        let vertices = graph.vertices_mut();
        for e in edges {
            let (ia, ib) = (e.a.index(), e.b.index());
            if ia == ib {
                continue;
            }
            let (pa, pb) = (vertices[ia].pos, vertices[ib].pos);
            let (dx, dy) = (pb.x - pa.x, pb.y - pa.y);
            let dist = pa.distance(pb);
            if dist == 0.0 {
                continue;
            }
            let rest = cfg.base_length + cfg.length_per_weight * e.weight;
            let force = cfg.spring_strength * (dist - rest);
            let (fx, fy) = (dx / dist * force, dy / dist * force);
            vertices[ia].vel.x += fx;
            vertices[ia].vel.y += fy;
            vertices[ib].vel.x -= fx;
            vertices[ib].vel.y -= fy;
        }
    }

    fn apply_repulsion(&self, graph: &mut GraphSpace) {
        let cfg = &self.config;
        let vertices = graph.vertices_mut();
        for i in 0..vertices.len() {
            for j in (i + 1)..vertices.len() {
                let (pi, pj) = (vertices[i].pos, vertices[j].pos);
                let (mut dx, dy) = (pj.x - pi.x, pj.y - pi.y);
                let mut dist = pi.distance(pj);
                if dist >= cfg.min_distance {
                    continue;
                }
                if dist == 0.0 {
                    // Coincident vertices: separate them along x.
                    dx = 1.0;
                    dist = 1.0;
                }
                let overlap = cfg.min_distance - dist;
                let force = cfg.repulsion / (dist * dist);
                let (fx, fy) = (dx / dist * force * overlap, dy / dist * force * overlap);
                vertices[i].vel.x -= fx;
                vertices[i].vel.y -= fy;
                vertices[j].vel.x += fx;
                vertices[j].vel.y += fy;
            }
        }
    }

    fn apply_friction(&self, graph: &mut GraphSpace) {
        for v in graph.vertices_mut() {
            v.vel.x *= self.config.friction;
            v.vel.y *= self.config.friction;
        }
    }

    fn integrate(&self, graph: &mut GraphSpace) {
        let cfg = &self.config;
        for v in graph.vertices_mut() {
            v.pos.x += v.vel.x;
            v.pos.y += v.vel.y;
            if v.pos.x - cfg.margin <= 0.0 || v.pos.x + cfg.margin >= cfg.width {
                v.vel.x *= cfg.bounce;
                v.pos.x = clamp_axis(v.pos.x, cfg.margin, cfg.width - cfg.margin);
            }
            if v.pos.y - cfg.margin <= 0.0 || v.pos.y + cfg.margin >= cfg.height {
                v.vel.y *= cfg.bounce;
                v.pos.y = clamp_axis(v.pos.y, cfg.margin, cfg.height - cfg.margin);
            }
        }
    }
}

fn clamp_axis(v: f64, lo: f64, hi: f64) -> f64 {
    v.max(lo).min(hi)
}

/// Place vertices evenly on a circle centred on the canvas, a reasonable
/// seed for the force layout.
pub fn circle_layout(graph: &mut GraphSpace, config: &ForceLayoutConfig) {
    let n = graph.vertices().len().max(1) as f64;
    let center = Pos::new(config.width / 2.0, config.height / 2.0);
    let radius = (config.width.min(config.height) / 2.0 - config.margin * 2.0).max(0.0);
    for (i, v) in graph.vertices_mut().iter_mut().enumerate() {
        let angle = std::f64::consts::TAU * i as f64 / n;
        v.pos = Pos::new(
            center.x + radius * angle.cos(),
            center.y + radius * angle.sin(),
        );
        v.vel = Pos::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair(distance: f64, weight: f64) -> GraphSpace {
        let mut g = GraphSpace::new();
        g.add_vertex("A", Pos::new(400.0, 400.0)).unwrap();
        g.add_vertex("B", Pos::new(400.0 + distance, 400.0)).unwrap();
        g.add_edge("A", "B", weight).unwrap();
        g
    }

    fn gap(g: &GraphSpace) -> f64 {
        g.vertices()[0].pos.distance(g.vertices()[1].pos)
    }

    #[test]
    fn stretched_spring_pulls_together() {
        let mut g = pair(300.0, 1.0);
        let before = gap(&g);
        ForceLayout::default().step(&mut g);
        assert!(gap(&g) < before);
    }

    #[test]
    fn close_vertices_push_apart() {
        let mut g = GraphSpace::new();
        g.add_vertex("A", Pos::new(400.0, 400.0)).unwrap();
        g.add_vertex("B", Pos::new(410.0, 400.0)).unwrap();
        let before = gap(&g);
        ForceLayout::default().step(&mut g);
        assert!(gap(&g) > before);
    }

    #[test]
    fn positions_stay_inside_margins() {
        let mut g = pair(5.0, 10.0);
        g.vertices_mut()[0].pos = Pos::new(-50.0, 900.0);
        let layout = ForceLayout::default();
        layout.settle(&mut g, 50);
        for v in g.vertices() {
            assert!(v.pos.x >= 20.0 && v.pos.x <= 780.0);
            assert!(v.pos.y >= 20.0 && v.pos.y <= 780.0);
            assert!(v.pos.x.is_finite() && v.pos.y.is_finite());
        }
    }

    #[test]
    fn coincident_vertices_do_not_produce_nan() {
        let mut g = pair(0.0, 1.0);
        ForceLayout::default().step(&mut g);
        assert!(g.vertices().iter().all(|v| v.pos.x.is_finite()));
        assert!(gap(&g) > 0.0);
    }

    #[test]
    fn circle_layout_spreads_vertices() {
        let mut g = pair(0.0, 1.0);
        let cfg = ForceLayoutConfig::default();
        circle_layout(&mut g, &cfg);
        assert!(gap(&g) > 100.0);
    }
}
