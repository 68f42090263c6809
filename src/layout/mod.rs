//! The layout engine: a pure, deterministic transform from income and
//! expense line items to a positioned Sankey scene. Holds no state and
//! performs no I/O; it never fails, degrading to a partial or empty
//! scene on degenerate input.

mod geometry;
mod graph;

use serde::Serialize;

use crate::domain::{ExpenseItem, IncomeItem};

pub use graph::{ColumnGroup, Link, Node, NodeKind};

/// Per-column horizontal displacement from the default column positions.
///
/// The engine adds these verbatim; clamping drag input so columns cannot
/// invert or leave the canvas is the caller's policy (see `Editor`).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ColumnOffsets(pub [f64; Self::COLUMNS]);

impl ColumnOffsets {
    pub const COLUMNS: usize = 5;

    pub fn get(&self, column: usize) -> f64 {
        self.0.get(column).copied().unwrap_or(0.0)
    }

    pub fn set(&mut self, column: usize, offset: f64) {
        if let Some(slot) = self.0.get_mut(column) {
            *slot = offset;
        }
    }
}

/// Signed totals for the rendered month. Negative surplus is a deficit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Summary {
    pub total_income: f64,
    pub total_expenses: f64,
    pub surplus: f64,
}

/// A fully positioned flow graph ready for rendering.
#[derive(Debug, Clone)]
pub struct Scene {
    pub nodes: Vec<Node>,
    pub links: Vec<Link>,
    /// Fallback node width for renderers that ignore per-column widths.
    pub node_width: f64,
    pub summary: Summary,
}

impl Scene {
    pub fn node(&self, kind: NodeKind) -> Option<&Node> {
        self.nodes.iter().find(|n| n.kind == kind)
    }
}

/// Builds the positioned scene for one month of data.
///
/// `width` and `height` are the canvas dimensions; non-positive values do
/// not panic but yield degenerate geometry. Item values that are
/// non-finite are treated as zero, and items whose value is not positive
/// appear in neither nodes nor links.
pub fn build_layout(
    income: &[IncomeItem],
    expenses: &[ExpenseItem],
    width: f64,
    height: f64,
    offsets: &ColumnOffsets,
) -> Scene {
    let parts = graph::synthesize(income, expenses);
    let mut nodes = parts.nodes;
    let mut links = parts.links;
    geometry::place(&mut nodes, &mut links, width, height, offsets);
    Scene {
        nodes,
        links,
        node_width: geometry::NODE_WIDTH,
        summary: parts.summary,
    }
}
