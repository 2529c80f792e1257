//! Node editing on a parameter set.
//!
//! These are the pure operations behind the curve editor: they keep every
//! curve's x coordinates strictly increasing, so edited parameters always
//! bake.

use colorzones_curve::{ControlPoint, MAX_NODES, MIN_NODES};

use crate::params::{Channel, ColorZonesParams};

/// Outcome of [`ColorZonesParams::move_node`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodeMove {
    Moved,
    /// The node crossed a neighbor and was removed.
    Deleted,
    /// Nothing changed: bad index, or the move would leave a two-node curve
    /// out of order.
    Rejected,
}

fn strictly_increasing(nodes: &[ControlPoint]) -> bool {
    nodes.windows(2).all(|w| w[0].x < w[1].x)
}

impl ColorZonesParams {
    /// Insert a node in x order. Returns its index, or `None` when the curve
    /// is full or already has a node at exactly `x`.
    pub fn add_node(&mut self, channel: Channel, x: f32, y: f32) -> Option<usize> {
        let x = x.clamp(0.0, 1.0);
        let y = y.clamp(0.0, 1.0);
        let nodes = &mut self.curve_mut(channel).nodes;
        if nodes.len() >= MAX_NODES || nodes.iter().any(|n| n.x == x) {
            return None;
        }
        let at = nodes.iter().position(|n| n.x > x).unwrap_or(nodes.len());
        nodes.insert(at, ControlPoint::new(x, y));
        Some(at)
    }

    /// Shift a node by `(dx, dy)`, clamped to the unit square.
    ///
    /// A node pushed past a neighbor is deleted when more than two nodes
    /// remain. With the hue selector the endpoints are one point on the
    /// wheel, so moving one mirrors the other to `1 - x` with the same `y`.
    pub fn move_node(&mut self, channel: Channel, index: usize, dx: f32, dy: f32) -> NodeMove {
        let mirror = self.selector == Channel::Hue;
        let nodes = &mut self.curve_mut(channel).nodes;
        let count = nodes.len();
        if index >= count {
            return NodeMove::Rejected;
        }

        let before = nodes.clone();
        let moved = ControlPoint::new(
            (nodes[index].x + dx).clamp(0.0, 1.0),
            (nodes[index].y + dy).clamp(0.0, 1.0),
        );
        nodes[index] = moved;

        if !strictly_increasing(nodes) {
            if count > MIN_NODES {
                nodes.remove(index);
                return NodeMove::Deleted;
            }
            *nodes = before;
            return NodeMove::Rejected;
        }

        if mirror && (index == 0 || index == count - 1) {
            let opposite = if index == 0 { count - 1 } else { 0 };
            nodes[opposite] = ControlPoint::new(1.0 - moved.x, moved.y);
            if !strictly_increasing(nodes) {
                *nodes = before;
                return NodeMove::Rejected;
            }
        }
        NodeMove::Moved
    }

    /// Remove a node, keeping at least two.
    pub fn delete_node(&mut self, channel: Channel, index: usize) -> bool {
        let nodes = &mut self.curve_mut(channel).nodes;
        if index >= nodes.len() || nodes.len() <= MIN_NODES {
            return false;
        }
        nodes.remove(index);
        true
    }

    /// Edit by area: pull every node toward `y` with Gaussian weight
    /// `exp(-d² / radius²)` of its distance `d` to `x`.
    ///
    /// With the hue selector both endpoints take the weight of whichever is
    /// closer, so the seam moves as one point.
    pub fn area_edit(&mut self, channel: Channel, x: f32, y: f32, radius: f32) {
        if radius <= 0.0 || !radius.is_finite() {
            return;
        }
        let y = y.clamp(0.0, 1.0);
        let wrap = self.selector == Channel::Hue;
        let r2 = radius * radius;
        let weight = |d2: f32| (-d2 / r2).exp();
        let nodes = &mut self.curve_mut(channel).nodes;
        if nodes.is_empty() {
            return;
        }
        let pull = |node: &mut ControlPoint, f: f32| node.y = (1.0 - f) * node.y + f * y;

        if wrap {
            let last = nodes.len() - 1;
            for node in &mut nodes[1..last] {
                let f = weight((x - node.x).powi(2));
                pull(node, f);
            }
            let d2 = (x - nodes[0].x).powi(2).min((x - nodes[last].x).powi(2));
            let f = weight(d2);
            pull(&mut nodes[0], f);
            pull(&mut nodes[last], f);
        } else {
            for node in nodes.iter_mut() {
                let f = weight((x - node.x).powi(2));
                pull(node, f);
            }
        }
    }
}
