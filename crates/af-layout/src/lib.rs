#![forbid(unsafe_code)]

//! Fixed-geometry placement for generated diagrams.
//!
//! Positions are a pure function of a node's role and index. Spacing is
//! wide enough that no collision avoidance is needed.

use af_core::{DiagramNode, FlowSpacing, GridSpacing, Position};
use tracing::trace;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridSlot {
    pub row: usize,
    pub column: usize,
}

/// Row-major slot of the `index`-th child in a grid with `columns` columns.
#[must_use]
pub fn grid_slot(index: usize, columns: usize) -> GridSlot {
    let columns = columns.max(1);
    GridSlot {
        row: index / columns,
        column: index % columns,
    }
}

/// Position of the `index`-th step of a left-to-right flow.
#[must_use]
pub fn flow_position(index: usize, spacing: &FlowSpacing) -> Position {
    Position::new(index as f64 * spacing.step_x, spacing.row_y)
}

/// Position of the `index`-th child under a hierarchy root.
#[must_use]
pub fn grid_position(index: usize, spacing: &GridSpacing) -> Position {
    let slot = grid_slot(index, spacing.columns);
    Position::new(
        slot.column as f64 * spacing.column_width + spacing.origin.x,
        slot.row as f64 * spacing.row_height + spacing.origin.y,
    )
}

#[must_use]
pub const fn root_position(spacing: &GridSpacing) -> Position {
    spacing.root
}

/// Slot for a node appended after an existing diagram: one flow step to the
/// right of the right-most node, on the flow row.
#[must_use]
pub fn append_position(nodes: &[DiagramNode], spacing: &FlowSpacing) -> Position {
    let position = nodes
        .iter()
        .map(|node| node.position.x)
        .reduce(f64::max)
        .map_or(spacing.fallback, |max_x| {
            Position::new(max_x + spacing.step_x, spacing.row_y)
        });
    trace!(x = position.x, y = position.y, existing = nodes.len(), "append slot");
    position
}

/// Axis-aligned box spanning every node position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutBounds {
    pub min: Position,
    pub max: Position,
}

impl LayoutBounds {
    #[must_use]
    pub fn width(self) -> f64 {
        self.max.x - self.min.x
    }

    #[must_use]
    pub fn height(self) -> f64 {
        self.max.y - self.min.y
    }
}

#[must_use]
pub fn bounds(nodes: &[DiagramNode]) -> Option<LayoutBounds> {
    let first = nodes.first()?.position;
    let (min, max) = nodes.iter().skip(1).fold((first, first), |(min, max), node| {
        let p = node.position;
        (
            Position::new(min.x.min(p.x), min.y.min(p.y)),
            Position::new(max.x.max(p.x), max.y.max(p.y)),
        )
    });
    Some(LayoutBounds { min, max })
}
