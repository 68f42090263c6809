//! SVG rendering: nodes as rounded rectangles, links as closed Bezier
//! ribbons with control points at the horizontal midpoint, labels with
//! amount and share-of-income annotations.

use std::fmt::Write;

use crate::config::Theme;
use crate::currency::{format_amount, percent_of};
use crate::layout::{ColumnGroup, Link, NodeKind, Scene};

const DEFICIT_COLOR: &str = "#f87171";
const SURPLUS_COLOR: &str = "#86efac";
const LINK_LEFT: [&str; 2] = ["#60a5fa", "#38bdf8"];
const LINK_RIGHT: [&str; 4] = ["#f59e0b", "#34d399", "#818cf8", "#f472b6"];
const LINK_FALLBACK: &str = "#c4b5fd";
const LINK_OPACITY: f64 = 0.4;

struct Palette {
    background: &'static str,
    text: &'static str,
    text_dim: &'static str,
}

fn palette(theme: Theme) -> Palette {
    match theme {
        Theme::Dark => Palette {
            background: "#0f172a",
            text: "#e2e8f0",
            text_dim: "#64748b",
        },
        Theme::Light => Palette {
            background: "#f8fafc",
            text: "#1e293b",
            text_dim: "#94a3b8",
        },
    }
}

fn group_color(group: ColumnGroup) -> &'static str {
    match group {
        ColumnGroup::Source => "#60a5fa",
        ColumnGroup::Aggregate => "#38bdf8",
        ColumnGroup::Hub => "#a78bfa",
        ColumnGroup::Category => "#fbbf24",
        ColumnGroup::Leaf => "#94a3b8",
    }
}

fn node_color(kind: NodeKind, group: ColumnGroup) -> &'static str {
    match kind {
        NodeKind::DeficitSource | NodeKind::DeficitTotal => DEFICIT_COLOR,
        NodeKind::Surplus | NodeKind::SurplusLeaf => SURPLUS_COLOR,
        _ => group_color(group),
    }
}

fn link_color(link: &Link, source_column: usize) -> &'static str {
    let deficit = matches!(
        link.source,
        NodeKind::DeficitSource | NodeKind::DeficitTotal
    ) || link.target == NodeKind::DeficitTotal;
    if deficit {
        return DEFICIT_COLOR;
    }
    if source_column <= 1 {
        return LINK_LEFT[source_column.min(1)];
    }
    if matches!(link.source, NodeKind::Surplus)
        || matches!(link.target, NodeKind::Surplus | NodeKind::SurplusLeaf)
    {
        return SURPLUS_COLOR;
    }
    match link.source {
        NodeKind::Category(category) => LINK_RIGHT[category.index()],
        _ => LINK_FALLBACK,
    }
}

fn escape_xml(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Closed ribbon path between the source's right edge and the target's
/// left edge, both Bezier curves sharing midpoint control X.
fn ribbon_path(link: &Link) -> String {
    let mx = (link.sx + link.tx) / 2.0;
    format!(
        "M{sx:.2},{sy0:.2} C{mx:.2},{sy0:.2} {mx:.2},{ty0:.2} {tx:.2},{ty0:.2} L{tx:.2},{ty1:.2} C{mx:.2},{ty1:.2} {mx:.2},{sy1:.2} {sx:.2},{sy1:.2} Z",
        sx = link.sx,
        tx = link.tx,
        sy0 = link.sy0,
        sy1 = link.sy1,
        ty0 = link.ty0,
        ty1 = link.ty1,
        mx = mx,
    )
}

/// Renders a scene to a standalone SVG document.
pub fn render_svg(scene: &Scene, width: f64, height: f64, theme: Theme) -> String {
    let palette = palette(theme);
    let grand = scene.summary.total_income;
    let mut out = String::new();
    // write! to a String cannot fail
    let _ = writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{width:.0}" height="{height:.0}" viewBox="0 0 {width:.0} {height:.0}">"#
    );
    let _ = writeln!(
        out,
        r#"<rect width="{width:.0}" height="{height:.0}" fill="{}"/>"#,
        palette.background
    );

    for link in &scene.links {
        let source_column = scene
            .node(link.source)
            .map(|n| n.column)
            .unwrap_or_default();
        let _ = writeln!(
            out,
            r#"<path d="{}" fill="{}" opacity="{LINK_OPACITY}"/>"#,
            ribbon_path(link),
            link_color(link, source_column)
        );
    }

    for node in &scene.nodes {
        if node.height <= 0.0 {
            continue;
        }
        let color = node_color(node.kind, node.group);
        let _ = writeln!(
            out,
            r#"<rect x="{:.2}" y="{:.2}" width="{:.2}" height="{:.2}" rx="3" fill="{color}"/>"#,
            node.x, node.y, node.width, node.height
        );

        // Labels sit left of the left-side columns and right of the rest.
        let right_side = node.column >= 3;
        let lx = if right_side {
            node.x + node.width + 6.0
        } else {
            node.x - 6.0
        };
        let anchor = if right_side { "start" } else { "end" };
        let my = node.y + node.height / 2.0;
        let fs = (node.height * 0.26).clamp(7.0, 11.0);
        let _ = writeln!(
            out,
            r#"<text x="{lx:.2}" y="{:.2}" text-anchor="{anchor}" fill="{}" font-size="{fs:.1}" font-weight="600">{}</text>"#,
            my - 6.0,
            palette.text,
            escape_xml(&node.label)
        );
        let value_color = match node.kind {
            NodeKind::DeficitSource | NodeKind::DeficitTotal => DEFICIT_COLOR,
            NodeKind::Surplus | NodeKind::SurplusLeaf => SURPLUS_COLOR,
            _ => palette.text,
        };
        let _ = writeln!(
            out,
            r#"<text x="{lx:.2}" y="{:.2}" text-anchor="{anchor}" fill="{value_color}" font-size="{:.1}">{}</text>"#,
            my + 5.0,
            (fs - 1.0).max(7.0),
            format_amount(node.value)
        );
        let share = percent_of(node.value, grand);
        if !share.is_empty() {
            let _ = writeln!(
                out,
                r#"<text x="{lx:.2}" y="{:.2}" text-anchor="{anchor}" fill="{}" font-size="{:.1}">{share}</text>"#,
                my + 15.0,
                palette.text_dim,
                (fs - 2.0).max(6.0)
            );
        }
    }

    out.push_str("</svg>\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ExpenseCategory, ExpenseItem, IncomeItem, IncomeKind};
    use crate::layout::{build_layout, ColumnOffsets};

    fn sample_scene() -> Scene {
        let income = vec![
            IncomeItem::new("Wage", 5300.0, IncomeKind::Active),
            IncomeItem::new("Dividends", 262.0, IncomeKind::Passive),
        ];
        let expenses = vec![
            ExpenseItem::new("Tax", 494.0, ExpenseCategory::Payroll),
            ExpenseItem::new("Groceries", 933.0, ExpenseCategory::Living),
        ];
        build_layout(&income, &expenses, 800.0, 500.0, &ColumnOffsets::default())
    }

    #[test]
    fn produces_a_well_formed_document() {
        let svg = render_svg(&sample_scene(), 800.0, 500.0, Theme::Dark);
        assert!(svg.starts_with("<svg"));
        assert!(svg.trim_end().ends_with("</svg>"));
        assert_eq!(svg.matches("<path").count(), sample_scene().links.len());
    }

    #[test]
    fn escapes_labels() {
        let income = vec![IncomeItem::new("A&B <wages>", 100.0, IncomeKind::Active)];
        let scene = build_layout(&income, &[], 800.0, 500.0, &ColumnOffsets::default());
        let svg = render_svg(&scene, 800.0, 500.0, Theme::Light);
        assert!(svg.contains("A&amp;B &lt;wages&gt;"));
        assert!(!svg.contains("A&B"));
    }

    #[test]
    fn themes_change_the_background() {
        let scene = sample_scene();
        let dark = render_svg(&scene, 800.0, 500.0, Theme::Dark);
        let light = render_svg(&scene, 800.0, 500.0, Theme::Light);
        assert!(dark.contains("#0f172a"));
        assert!(light.contains("#f8fafc"));
    }
}
