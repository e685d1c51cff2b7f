//! Radial tree layout for mind maps.
//!
//! DESIGN
//! ======
//! Leaves are spaced evenly around the full circle in depth-first order, and
//! each parent sits at the mean angle of its children. Depth maps linearly to
//! radius, so the root is always at the center. Angle `0` points up and
//! angles grow clockwise, matching SVG's y-down coordinate space.

#[cfg(test)]
#[path = "radial_layout_test.rs"]
mod radial_layout_test;

use std::f64::consts::{FRAC_PI_2, PI, TAU};

use crate::net::types::MindMapNode;

/// One positioned node, in pre-order.
#[derive(Clone, Debug, PartialEq)]
pub struct PlacedNode {
    pub label: String,
    pub depth: usize,
    /// Radians in `[0, 2π)`.
    pub angle: f64,
    pub radius: f64,
    pub x: f64,
    pub y: f64,
    /// Index of the parent in [`RadialLayout::nodes`].
    pub parent: Option<usize>,
    pub has_children: bool,
}

impl PlacedNode {
    /// Labels on the left half read outward from the node, so they flip.
    #[must_use]
    pub fn label_flipped(&self) -> bool {
        self.angle >= PI
    }

    /// SVG `transform` placing a node group on its spoke.
    #[must_use]
    pub fn svg_transform(&self) -> String {
        format!("rotate({:.3}) translate({:.3},0)", self.angle.to_degrees() - 90.0, self.radius)
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct RadialLayout {
    pub nodes: Vec<PlacedNode>,
    pub max_depth: usize,
}

impl RadialLayout {
    /// `(parent, child)` index pairs.
    pub fn links(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.nodes
            .iter()
            .enumerate()
            .filter_map(|(idx, node)| node.parent.map(|p| (p, idx)))
    }
}

/// Lay out `root` on a disc of `outer_radius`.
#[must_use]
pub fn radial_layout(root: &MindMapNode, outer_radius: f64) -> RadialLayout {
    let leaves = count_leaves(root);
    let max_depth = max_depth(root);
    let mut layout = RadialLayout { nodes: Vec::new(), max_depth };
    let mut next_leaf = 0;
    place(root, 0, None, leaves, outer_radius, &mut next_leaf, &mut layout);
    layout
}

fn count_leaves(node: &MindMapNode) -> usize {
    if node.children.is_empty() {
        1
    } else {
        node.children.iter().map(count_leaves).sum()
    }
}

fn max_depth(node: &MindMapNode) -> usize {
    node.children.iter().map(|c| 1 + max_depth(c)).max().unwrap_or(0)
}

/// Places `node` and its subtree, returning the node's angle.
fn place(
    node: &MindMapNode,
    depth: usize,
    parent: Option<usize>,
    leaves: usize,
    outer_radius: f64,
    next_leaf: &mut usize,
    layout: &mut RadialLayout,
) -> f64 {
    let idx = layout.nodes.len();
    #[allow(clippy::cast_precision_loss)]
    let radius = if layout.max_depth == 0 {
        0.0
    } else {
        depth as f64 / layout.max_depth as f64 * outer_radius
    };
    layout.nodes.push(PlacedNode {
        label: node.label.clone(),
        depth,
        angle: 0.0,
        radius,
        x: 0.0,
        y: 0.0,
        parent,
        has_children: !node.children.is_empty(),
    });

    #[allow(clippy::cast_precision_loss)]
    let angle = if node.children.is_empty() {
        let a = TAU * (*next_leaf as f64) / leaves.max(1) as f64;
        *next_leaf += 1;
        a
    } else {
        let sum: f64 = node
            .children
            .iter()
            .map(|child| place(child, depth + 1, Some(idx), leaves, outer_radius, next_leaf, layout))
            .sum();
        sum / node.children.len() as f64
    };

    let placed = &mut layout.nodes[idx];
    placed.angle = angle;
    placed.x = radius * (angle - FRAC_PI_2).cos();
    placed.y = radius * (angle - FRAC_PI_2).sin();
    angle
}
