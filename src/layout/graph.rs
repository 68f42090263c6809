//! Node and link synthesis: partitions the line items, resolves the
//! surplus/deficit balance, and emits the flow graph in a fixed order so
//! rendering and link attachment stay stable across calls.

use uuid::Uuid;

use crate::currency::format_amount;
use crate::domain::{ExpenseCategory, ExpenseItem, IncomeItem, IncomeKind};

use super::Summary;

/// Semantic role of a node, replacing the well-known id strings
/// (`__total`, `__surplus`, ...) used by stringly-typed renderers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// A real income or expense line item.
    Item(Uuid),
    /// Synthetic source feeding unfunded expenses.
    DeficitSource,
    ActiveTotal,
    PassiveTotal,
    DeficitTotal,
    /// The single center node all flow passes through.
    Hub,
    Category(ExpenseCategory),
    Surplus,
    SurplusLeaf,
}

/// Horizontal lane a node belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnGroup {
    Source,
    Aggregate,
    Hub,
    Category,
    Leaf,
}

impl ColumnGroup {
    /// Fixed lane index, left to right.
    pub fn column(&self) -> usize {
        match self {
            ColumnGroup::Source => 0,
            ColumnGroup::Aggregate => 1,
            ColumnGroup::Hub => 2,
            ColumnGroup::Category => 3,
            ColumnGroup::Leaf => 4,
        }
    }
}

/// A positioned vertex of the flow graph.
#[derive(Debug, Clone)]
pub struct Node {
    pub kind: NodeKind,
    pub label: String,
    pub value: f64,
    pub group: ColumnGroup,
    pub column: usize,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Node {
    fn new(kind: NodeKind, label: impl Into<String>, value: f64, group: ColumnGroup) -> Self {
        Self {
            kind,
            label: label.into(),
            value,
            group,
            column: group.column(),
            x: 0.0,
            y: 0.0,
            width: 0.0,
            height: 0.0,
        }
    }
}

/// A directed flow edge with its ribbon endpoint geometry.
#[derive(Debug, Clone)]
pub struct Link {
    pub source: NodeKind,
    pub target: NodeKind,
    pub value: f64,
    /// Source node right edge.
    pub sx: f64,
    /// Target node left edge.
    pub tx: f64,
    pub sy0: f64,
    pub sy1: f64,
    pub ty0: f64,
    pub ty1: f64,
}

impl Link {
    fn new(source: NodeKind, target: NodeKind, value: f64) -> Self {
        Self {
            source,
            target,
            value,
            sx: 0.0,
            tx: 0.0,
            sy0: 0.0,
            sy1: 0.0,
            ty0: 0.0,
            ty1: 0.0,
        }
    }
}

pub(crate) struct GraphParts {
    pub nodes: Vec<Node>,
    pub links: Vec<Link>,
    pub summary: Summary,
}

/// Builds the unpositioned graph. Items with a non-positive amount are
/// dropped entirely; aggregate and category nodes only exist when their
/// sums are positive; the hub always exists, even at zero.
pub(crate) fn synthesize(income: &[IncomeItem], expenses: &[ExpenseItem]) -> GraphParts {
    let active: Vec<&IncomeItem> = income.iter().filter(|i| i.kind == IncomeKind::Active).collect();
    let passive: Vec<&IncomeItem> = income.iter().filter(|i| i.kind == IncomeKind::Passive).collect();
    let active_sum: f64 = active.iter().map(|i| i.amount()).sum();
    let passive_sum: f64 = passive.iter().map(|i| i.amount()).sum();
    let grand = active_sum + passive_sum;

    let mut cat_sums = [0.0_f64; ExpenseCategory::ALL.len()];
    for item in expenses {
        cat_sums[item.category.index()] += item.amount();
    }
    let total_expense: f64 = cat_sums.iter().sum();

    let surplus = grand - total_expense;
    let deficit = if surplus < 0.0 { -surplus } else { 0.0 };
    // With a deficit the hub models expenses being fed by income plus a
    // synthetic deficit source; otherwise it carries all income.
    let hub_value = if deficit > 0.0 { total_expense } else { grand };

    let mut nodes = Vec::new();
    for item in active.iter().chain(passive.iter()) {
        if item.amount() > 0.0 {
            nodes.push(Node::new(
                NodeKind::Item(item.id),
                item.label.clone(),
                item.amount(),
                ColumnGroup::Source,
            ));
        }
    }
    if deficit > 0.0 {
        nodes.push(Node::new(
            NodeKind::DeficitSource,
            "Deficit",
            deficit,
            ColumnGroup::Source,
        ));
    }
    if active_sum > 0.0 {
        nodes.push(Node::new(
            NodeKind::ActiveTotal,
            "Active Income",
            active_sum,
            ColumnGroup::Aggregate,
        ));
    }
    if passive_sum > 0.0 {
        nodes.push(Node::new(
            NodeKind::PassiveTotal,
            "Passive Income",
            passive_sum,
            ColumnGroup::Aggregate,
        ));
    }
    if deficit > 0.0 {
        nodes.push(Node::new(
            NodeKind::DeficitTotal,
            "Deficit",
            deficit,
            ColumnGroup::Aggregate,
        ));
    }
    let hub_label = if deficit > 0.0 {
        format!("Expenses {}", format_amount(total_expense))
    } else {
        format!("Income {}", format_amount(grand))
    };
    nodes.push(Node::new(NodeKind::Hub, hub_label, hub_value, ColumnGroup::Hub));
    for category in ExpenseCategory::ALL {
        if cat_sums[category.index()] > 0.0 {
            nodes.push(Node::new(
                NodeKind::Category(category),
                category.label(),
                cat_sums[category.index()],
                ColumnGroup::Category,
            ));
        }
    }
    if surplus > 0.0 {
        nodes.push(Node::new(
            NodeKind::Surplus,
            "Surplus",
            surplus,
            ColumnGroup::Category,
        ));
    }
    for category in ExpenseCategory::ALL {
        for item in expenses
            .iter()
            .filter(|e| e.category == category && e.amount() > 0.0)
        {
            nodes.push(Node::new(
                NodeKind::Item(item.id),
                item.label.clone(),
                item.amount(),
                ColumnGroup::Leaf,
            ));
        }
    }
    if surplus > 0.0 {
        nodes.push(Node::new(
            NodeKind::SurplusLeaf,
            "Surplus",
            surplus,
            ColumnGroup::Leaf,
        ));
    }

    let mut links = Vec::new();
    let mut add_link = |source: NodeKind, target: NodeKind, value: f64| {
        if value > 0.0 {
            links.push(Link::new(source, target, value));
        }
    };

    for item in &active {
        if active_sum > 0.0 {
            add_link(NodeKind::Item(item.id), NodeKind::ActiveTotal, item.amount());
        }
    }
    for item in &passive {
        if passive_sum > 0.0 {
            add_link(NodeKind::Item(item.id), NodeKind::PassiveTotal, item.amount());
        }
    }
    if active_sum > 0.0 {
        add_link(NodeKind::ActiveTotal, NodeKind::Hub, active_sum);
    }
    if passive_sum > 0.0 {
        add_link(NodeKind::PassiveTotal, NodeKind::Hub, passive_sum);
    }
    if deficit > 0.0 {
        add_link(NodeKind::DeficitSource, NodeKind::DeficitTotal, deficit);
        add_link(NodeKind::DeficitTotal, NodeKind::Hub, deficit);
    }
    for category in ExpenseCategory::ALL {
        if cat_sums[category.index()] > 0.0 {
            add_link(
                NodeKind::Hub,
                NodeKind::Category(category),
                cat_sums[category.index()],
            );
        }
    }
    if surplus > 0.0 {
        add_link(NodeKind::Hub, NodeKind::Surplus, surplus);
    }
    // Leaf links follow raw item order, not category order; attachment
    // order on each category edge is insertion order.
    for item in expenses {
        let value = item.amount();
        if value > 0.0 && cat_sums[item.category.index()] > 0.0 {
            add_link(
                NodeKind::Category(item.category),
                NodeKind::Item(item.id),
                value,
            );
        }
    }
    if surplus > 0.0 {
        add_link(NodeKind::Surplus, NodeKind::SurplusLeaf, surplus);
    }

    GraphParts {
        nodes,
        links,
        summary: Summary {
            total_income: grand,
            total_expenses: total_expense,
            surplus,
        },
    }
}
