//! Table classification and flattening.
//!
//! Every table in the content is labelled data or presentation. Data tables
//! are exempt from conditional cleaning. Nested presentation tables become
//! plain `div` rows and cells, navigation tables keep only their links, and
//! presentation tables with a single row or column collapse into their cells.

use std::collections::HashSet;

use dom_query::{NodeId, NodeRef};

use super::tags::is_phrasing_content;
use crate::dom;
use crate::link_density::link_density;
use crate::patterns::{DATA_TABLE, LAYOUT_TABLE, NAVIGATION_TABLE};
use crate::text::char_len;

/// How a table is used.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableKind {
    /// Tabular data.
    Data,
    /// Layout scaffolding.
    Presentation,
    /// Layout scaffolding made mostly of links.
    Navigation,
}

impl TableKind {
    /// Whether the table is layout rather than data.
    #[must_use]
    pub fn is_presentation(self) -> bool {
        !matches!(self, Self::Data)
    }
}

/// Structural measurements of one table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TableMetrics {
    /// Rows of this table, counting `rowspan`.
    pub rows: usize,
    /// Widest row, counting `colspan`.
    pub columns: usize,
    /// Cells of this table.
    pub cells: usize,
    /// At least two rows, all with the same non-zero width.
    pub regular: bool,
    /// Tables enclosing this one.
    pub depth: usize,
    /// Link density of the whole table.
    pub link_density: f64,
    /// Characters of text outside links.
    pub non_link_text: usize,
    /// `li` descendants.
    pub list_items: usize,
    /// `li` descendants holding a link.
    pub linked_list_items: usize,
}

/// Rows owned by `table` itself, not by nested tables.
fn own_rows<'a>(table: &NodeRef<'a>) -> Vec<NodeRef<'a>> {
    dom::elements_by_tags(table, &["tr"])
        .into_iter()
        .filter(|tr| nearest_table(tr).is_some_and(|t| t.id == table.id))
        .collect()
}

fn nearest_table<'a>(node: &NodeRef<'a>) -> Option<NodeRef<'a>> {
    dom::ancestors(node, 0).into_iter().find(|a| dom::is_tag(a, "table"))
}

fn row_cells<'a>(row: &NodeRef<'a>) -> Vec<NodeRef<'a>> {
    dom::element_children(row)
        .into_iter()
        .filter(|c| dom::is_any_tag(c, &["td", "th"]))
        .collect()
}

fn span(node: &NodeRef, name: &str) -> usize {
    node.attr(name)
        .and_then(|v| v.trim().parse::<usize>().ok())
        .filter(|&v| v > 0)
        .unwrap_or(1)
}

impl TableMetrics {
    /// Measure `table`.
    #[must_use]
    pub fn compute(table: &NodeRef) -> Self {
        let rows = own_rows(table);
        let mut metrics = Self {
            depth: dom::ancestor_tag_depth(table, "table"),
            link_density: link_density(table),
            ..Self::default()
        };

        let mut widths = Vec::with_capacity(rows.len());
        for row in &rows {
            metrics.rows += span(row, "rowspan");
            let cells = row_cells(row);
            metrics.cells += cells.len();
            let columns: usize = cells.iter().map(|c| span(c, "colspan")).sum();
            widths.push(columns);
            metrics.columns = metrics.columns.max(columns);
        }
        metrics.regular = widths.len() >= 2 && widths[0] > 0 && widths.iter().all(|&w| w == widths[0]);

        metrics.non_link_text = non_link_text_len(table);

        let items = dom::elements_by_tags(table, &["li"]);
        metrics.list_items = items.len();
        metrics.linked_list_items = items
            .iter()
            .filter(|li| !dom::elements_by_tags(li, &["a"]).is_empty())
            .count();
        metrics
    }

    fn is_navigation(&self, match_string: &str) -> bool {
        self.link_density > 0.8
            || NAVIGATION_TABLE.is_match(match_string)
            || (self.list_items > 3 && self.linked_list_items as f64 >= self.list_items as f64 * 0.8)
    }
}

fn presentation_markup(table: &NodeRef, match_string: &str) -> bool {
    if table.attr("role").is_some_and(|r| &*r == "presentation") {
        return true;
    }
    if table.attr("datatable").is_some_and(|d| &*d == "0") {
        return true;
    }
    let full_width = table.attr("width").is_some_and(|w| w.trim() == "100%");
    if full_width && !table.has_attr("border") && !table.has_attr("cellspacing") {
        return true;
    }
    LAYOUT_TABLE.is_match(match_string)
}

fn data_markup(table: &NodeRef, match_string: &str, metrics: &TableMetrics) -> bool {
    if table.has_attr("summary") {
        return true;
    }
    let has_caption = dom::elements_by_tags(table, &["caption"])
        .iter()
        .any(|c| !c.text().trim().is_empty());
    if has_caption {
        return true;
    }
    if !dom::elements_by_tags(table, &["col", "colgroup", "tfoot", "thead", "th"]).is_empty() {
        return true;
    }
    DATA_TABLE.is_match(match_string) || metrics.regular
}

/// Classify one table.
#[must_use]
pub fn classify_table(table: &NodeRef) -> TableKind {
    let match_string = dom::match_string(table);
    let metrics = TableMetrics::compute(table);
    let navigation = metrics.is_navigation(&match_string);

    if presentation_markup(table, &match_string) {
        return if navigation { TableKind::Navigation } else { TableKind::Presentation };
    }
    if data_markup(table, &match_string, &metrics) {
        return TableKind::Data;
    }

    if navigation {
        return TableKind::Navigation;
    }
    if metrics.depth >= 2 {
        return TableKind::Presentation;
    }
    if (metrics.rows >= 3 && metrics.columns > 2) || metrics.cells >= 10 {
        return TableKind::Data;
    }
    if metrics.non_link_text > 50 && metrics.link_density < 0.3 {
        TableKind::Data
    } else {
        TableKind::Presentation
    }
}

fn cell_tag(cell: &NodeRef) -> &'static str {
    if cell.children().iter().all(is_phrasing_content) {
        "p"
    } else {
        "div"
    }
}

/// Replace `table` by a `div` holding only its links.
fn flatten_navigation(table: &NodeRef) {
    let container = dom::create_element(table, "div");
    for link in dom::elements_by_tags(table, &["a"]) {
        let row = dom::create_element(table, "div");
        container.append_child(&row);
        dom::move_to_end(&row, &link);
    }
    dom::replace_node(table, &container);
}

/// Retag `table` and its own rows and cells as `div`s.
fn flatten_to_divs(table: &NodeRef) {
    for section in dom::element_children(table) {
        if dom::is_any_tag(&section, &["tbody", "thead", "tfoot"]) {
            for child in section.children() {
                child.remove_from_parent();
                section.insert_before(&child);
            }
            section.remove_from_parent();
        }
    }
    for row in own_rows(table) {
        for cell in row_cells(&row) {
            cell.rename("div");
        }
        row.rename("div");
    }
    for caption in dom::element_children(table) {
        if dom::is_tag(&caption, "caption") {
            caption.rename("div");
        }
    }
    table.rename("div");
}

/// Replace a single-row or single-column `table` by its cells.
fn collapse_to_cells(table: &NodeRef) {
    let cells: Vec<NodeRef> = own_rows(table).iter().flat_map(row_cells).collect();
    if let [cell] = cells.as_slice() {
        cell.rename(cell_tag(cell));
        dom::replace_node(table, cell);
        return;
    }
    let container = dom::create_element(table, "div");
    for cell in &cells {
        cell.rename(cell_tag(cell));
        dom::move_to_end(&container, cell);
    }
    dom::replace_node(table, &container);
}

/// Classify every table under `root`, deepest first, and simplify the
/// presentation ones. Returns the ids of the data tables.
pub fn mark_data_tables(root: &NodeRef) -> HashSet<NodeId> {
    let mut tables = dom::elements_by_tags(root, &["table"]);
    tables.sort_by_key(|t| std::cmp::Reverse(dom::ancestor_tag_depth(t, "table")));

    let mut data_tables = HashSet::new();
    for table in tables {
        let kind = classify_table(&table);
        tracing::trace!(?kind, "classified table");
        if !kind.is_presentation() {
            data_tables.insert(table.id);
            continue;
        }

        let nested = dom::ancestor_tag_depth(&table, "table") > 0;
        let metrics = TableMetrics::compute(&table);
        if kind == TableKind::Navigation && nested {
            flatten_navigation(&table);
        } else if metrics.cells > 0 && (metrics.rows == 1 || metrics.columns == 1) {
            collapse_to_cells(&table);
        } else if nested {
            flatten_to_divs(&table);
        }
    }
    data_tables
}

/// Replace tables consisting of one row with one cell by that cell, as a
/// `p` when it holds only phrasing content and a `div` otherwise.
pub fn collapse_single_cell_tables(root: &NodeRef) {
    for table in dom::elements_by_tags(root, &["table"]) {
        if table.parent().is_none() {
            continue;
        }
        let tbody = if dom::has_single_tag_inside(&table, "tbody") {
            dom::element_children(&table)[0]
        } else {
            table
        };
        if !dom::has_single_tag_inside(&tbody, "tr") {
            continue;
        }
        let row = dom::element_children(&tbody)[0];
        if !dom::has_single_tag_inside(&row, "td") {
            continue;
        }
        let cell = dom::element_children(&row)[0];
        cell.rename(cell_tag(&cell));
        dom::replace_node(&table, &cell);
    }
}

/// Characters of `node`'s text outside links.
#[must_use]
pub fn non_link_text_len(node: &NodeRef) -> usize {
    let links: usize = dom::elements_by_tags(node, &["a"]).iter().map(dom::text_len).sum();
    char_len(&dom::inner_text(node, true)).saturating_sub(links)
}
