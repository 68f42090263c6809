//! Coordinate assignment: column X placement, hourglass height
//! compression, vertical bucket packing, and ribbon endpoint stitching.

use std::collections::HashMap;

use super::graph::{Link, Node, NodeKind};
use super::ColumnOffsets;

pub(crate) const COLUMN_COUNT: usize = ColumnOffsets::COLUMNS;
/// Per-column node widths; outer columns are wider than the center.
pub(crate) const COLUMN_WIDTHS: [f64; COLUMN_COUNT] = [20.0, 14.0, 10.0, 14.0, 20.0];
pub(crate) const NODE_WIDTH: f64 = 14.0;

const NODE_GAP: f64 = 8.0;
const MIN_NODE_HEIGHT: f64 = 4.0;
const HUB_COLUMN: usize = 2;
/// The hub column's stack always uses this share of the canvas height.
const HUB_HEIGHT_SCALE: f64 = 0.80;
const MAX_HEIGHT_SCALE: f64 = 1.00;

pub(crate) fn place(
    nodes: &mut [Node],
    links: &mut [Link],
    width: f64,
    height: f64,
    offsets: &ColumnOffsets,
) {
    let xs = column_positions(width, offsets);
    for node in nodes.iter_mut() {
        node.x = xs[node.column];
        node.width = COLUMN_WIDTHS[node.column];
    }
    let scales = height_scales(&xs);
    pack_columns(nodes, &scales, height);
    stitch_links(nodes, links);
}

/// Base column X positions as fractions of the inner width (canvas minus
/// symmetric label margins), plus the caller's per-column offsets. The
/// source column sits slightly left of its margin so the hub lands near,
/// not exactly at, the horizontal center.
fn column_positions(width: f64, offsets: &ColumnOffsets) -> [f64; COLUMN_COUNT] {
    let label_pad = (width * 0.12).clamp(60.0, 120.0);
    let inner = width - label_pad * 2.0;
    let base = [
        label_pad - 0.03 * inner,
        label_pad + 0.25 * inner,
        label_pad + 0.50 * inner,
        label_pad + 0.75 * inner,
        label_pad + inner,
    ];
    std::array::from_fn(|col| base[col] + offsets.0[col])
}

/// Columns farther from the hub's actual X render taller stacks, scaling
/// linearly from 80% to 100% of canvas height. Each side normalizes
/// against its own farthest column, so dragging a column changes its
/// stack height as well as its position.
fn height_scales(xs: &[f64; COLUMN_COUNT]) -> [f64; COLUMN_COUNT] {
    let center = xs[HUB_COLUMN];
    let side_reach = |cols: [usize; 2]| {
        let reach = cols
            .iter()
            .map(|&c| (xs[c] - center).abs())
            .fold(0.0, f64::max);
        if reach > 0.0 {
            reach
        } else {
            1.0
        }
    };
    let left = side_reach([0, 1]);
    let right = side_reach([3, 4]);
    std::array::from_fn(|col| {
        if col == HUB_COLUMN {
            HUB_HEIGHT_SCALE
        } else {
            let reach = if col < HUB_COLUMN { left } else { right };
            HUB_HEIGHT_SCALE
                + (MAX_HEIGHT_SCALE - HUB_HEIGHT_SCALE) * ((xs[col] - center).abs() / reach)
        }
    })
}

/// Gives every node of a column a height proportional to its share of the
/// column total (with a visibility floor), stacks them with a fixed gap,
/// then centers the stack vertically. Columns with no positive total are
/// left without geometry.
fn pack_columns(nodes: &mut [Node], scales: &[f64; COLUMN_COUNT], height: f64) {
    for col in 0..COLUMN_COUNT {
        let members: Vec<usize> = nodes
            .iter()
            .enumerate()
            .filter(|(_, n)| n.column == col)
            .map(|(idx, _)| idx)
            .collect();
        if members.is_empty() {
            continue;
        }
        let total: f64 = members.iter().map(|&idx| nodes[idx].value).sum();
        if total <= 0.0 || !total.is_finite() {
            continue;
        }
        let avail = height * scales[col] - NODE_GAP * members.len().saturating_sub(1) as f64;
        let mut cursor = 0.0;
        for &idx in &members {
            let node = &mut nodes[idx];
            node.height = ((node.value / total) * avail).max(MIN_NODE_HEIGHT);
            node.y = cursor;
            cursor += node.height + NODE_GAP;
        }
        let centering = (height - (cursor - NODE_GAP)) / 2.0;
        for &idx in &members {
            nodes[idx].y += centering;
        }
    }
}

/// Attaches each link's ribbon to its nodes in insertion order. Thickness
/// on either edge is the link's share of the node's flow, clamped to the
/// node's remaining edge budget so rounding can never overflow a node.
/// Links with non-finite thickness are skipped, not fatal.
fn stitch_links(nodes: &[Node], links: &mut [Link]) {
    let index: HashMap<NodeKind, usize> = nodes
        .iter()
        .enumerate()
        .map(|(idx, node)| (node.kind, idx))
        .collect();
    let mut src_off = vec![0.0_f64; nodes.len()];
    let mut tgt_off = vec![0.0_f64; nodes.len()];
    let mut src_rem: Vec<f64> = nodes.iter().map(|n| n.height).collect();
    let mut tgt_rem = src_rem.clone();

    for link in links.iter_mut() {
        let (Some(&si), Some(&ti)) = (index.get(&link.source), index.get(&link.target)) else {
            continue;
        };
        let source = &nodes[si];
        let target = &nodes[ti];
        let sh = if source.value > 0.0 {
            (link.value / source.value) * source.height
        } else {
            0.0
        };
        let th = if target.value > 0.0 {
            (link.value / target.value) * target.height
        } else {
            0.0
        };
        if !sh.is_finite() || !th.is_finite() {
            continue;
        }
        let sh = sh.min(src_rem[si]);
        let th = th.min(tgt_rem[ti]);
        link.sy0 = source.y + src_off[si];
        link.sy1 = link.sy0 + sh;
        link.ty0 = target.y + tgt_off[ti];
        link.ty1 = link.ty0 + th;
        link.sx = source.x + source.width;
        link.tx = target.x;
        src_off[si] += sh;
        src_rem[si] -= sh;
        tgt_off[ti] += th;
        tgt_rem[ti] -= th;
    }
}
