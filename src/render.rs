//! Visible-window computation and row/layout descriptor construction.
//!
//! This is the half of the engine that keeps rendering cost bounded: only
//! the rows intersecting the viewport (plus a buffer) are ever turned into
//! descriptors, no matter how large the loaded page is. Descriptors carry
//! escaped text and a markup tooltip payload; what the display surface does
//! with them (terminal cells here, table markup elsewhere) is its own
//! concern.

use crate::models::{quality_accent, realm_name, DisplayType, Item};

/// Placeholder for missing charm stats.
const UNIDENTIFIED: &str = "unid";

/// An index window `[start, end)` into the loaded page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct VisibleRange {
    pub start: usize,
    pub end: usize,
}

impl VisibleRange {
    /// Compute the window covering the viewport plus `buffer_rows`.
    ///
    /// Pure arithmetic; clamping to the item count happens in
    /// [`VisibleRange::clamp_to`] because the range is computed before the
    /// page it applies to is known.
    pub fn compute(
        scroll_offset: u32,
        viewport_height: u32,
        row_height: u32,
        buffer_rows: usize,
    ) -> Self {
        let row_height = row_height.max(1);
        let start = (scroll_offset / row_height) as usize;
        let visible = viewport_height.div_ceil(row_height) as usize;
        Self {
            start,
            end: start + visible + buffer_rows,
        }
    }

    /// Clamp the window to `len` items, keeping `start <= end`.
    pub fn clamp_to(self, len: usize) -> Self {
        let end = self.end.min(len);
        Self {
            start: self.start.min(end),
            end,
        }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Tracks the current visible window and reports only real changes.
///
/// `update` with unchanged inputs yields `None`, so scroll handlers can skip
/// re-rendering entirely when the window did not move.
#[derive(Debug, Clone)]
pub struct VirtualList {
    range: VisibleRange,
    row_height: u32,
    buffer_rows: usize,
}

impl VirtualList {
    pub fn new(row_height: u32, buffer_rows: usize) -> Self {
        Self {
            range: VisibleRange::default(),
            row_height: row_height.max(1),
            buffer_rows,
        }
    }

    /// The window from the last `update`.
    pub fn range(&self) -> VisibleRange {
        self.range
    }

    /// Recompute the window; returns the new range only when it differs
    /// from the previous one.
    pub fn update(
        &mut self,
        scroll_offset: u32,
        viewport_height: u32,
        item_count: usize,
    ) -> Option<VisibleRange> {
        let next = VisibleRange::compute(
            scroll_offset,
            viewport_height,
            self.row_height,
            self.buffer_rows,
        )
        .clamp_to(item_count);
        if next == self.range {
            None
        } else {
            self.range = next;
            Some(next)
        }
    }
}

/// Escape the HTML-special characters `& < > " '`.
///
/// Applied to every user-supplied string before it lands in a descriptor or
/// tooltip payload. Item names come straight out of the database; this is
/// the only thing standing between them and the markup surface.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#039;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Cell text alignment on the display surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
}

/// One rendered cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    pub text: String,
    pub align: Align,
}

impl Cell {
    fn center(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            align: Align::Center,
        }
    }

    fn left(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            align: Align::Left,
        }
    }
}

/// Column width on the display surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnWidth {
    /// Percentage of the table width.
    Pct(u16),
    /// Whatever is left.
    Fill,
}

/// One header/footer column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    pub title: &'static str,
    pub width: ColumnWidth,
    pub align: Align,
}

impl Column {
    const fn new(title: &'static str, width: ColumnWidth, align: Align) -> Self {
        Self {
            title,
            width,
            align,
        }
    }
}

/// Header/footer column layout for a loaded page.
///
/// Chosen once per page load from the first item's display type (an empty
/// page gets the normal layout). Rows still pick their own cell layout, so
/// a mixed page can render rows that disagree with the header; kept that
/// way for compatibility with the existing admin surface. The footer always
/// mirrors the header.
#[derive(Debug, Clone, PartialEq)]
pub struct TableLayout {
    pub display_type: DisplayType,
    pub columns: Vec<Column>,
}

impl Default for TableLayout {
    fn default() -> Self {
        Self::for_page(&[], false)
    }
}

impl TableLayout {
    /// Build the layout for a freshly loaded page.
    ///
    /// The char-name header column appears only for the normal layout while
    /// a search is active, even though searching adds the char cell to every
    /// row.
    pub fn for_page(items: &[Item], searching: bool) -> Self {
        let display_type = items.first().map(Item::display_type).unwrap_or_default();
        let mut columns = Vec::new();

        if searching && display_type == DisplayType::Normal {
            columns.push(Column::new("CHAR", ColumnWidth::Pct(20), Align::Left));
        }

        match display_type {
            DisplayType::Torch => {
                columns.push(Column::new("CLASS", ColumnWidth::Pct(15), Align::Center));
                columns.push(Column::new("STAT", ColumnWidth::Pct(15), Align::Center));
                columns.push(Column::new("RES", ColumnWidth::Pct(15), Align::Center));
            }
            DisplayType::Anniversary => {
                columns.push(Column::new("STAT", ColumnWidth::Pct(15), Align::Center));
                columns.push(Column::new("RES", ColumnWidth::Pct(15), Align::Center));
                columns.push(Column::new("EXP", ColumnWidth::Pct(15), Align::Center));
            }
            DisplayType::Normal => {
                columns.push(Column::new("ED", ColumnWidth::Pct(15), Align::Center));
                columns.push(Column::new("SOCKETS", ColumnWidth::Pct(15), Align::Center));
            }
        }

        columns.push(Column::new("NAME", ColumnWidth::Fill, Align::Left));
        Self {
            display_type,
            columns,
        }
    }

    /// Footer columns — an exact mirror of the header.
    pub fn footer(&self) -> &[Column] {
        &self.columns
    }
}

/// Identity/ownership attributes for downstream selection tooling.
///
/// These are attribute values, not markup; they are carried raw.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionAttrs {
    pub item_id: i64,
    pub image: String,
    pub account: String,
    pub item_type: String,
    pub char_name: String,
    pub md5: String,
    pub realm: &'static str,
    pub name: String,
}

/// Everything the display surface needs for one visible row.
#[derive(Debug, Clone, PartialEq)]
pub struct RowDescriptor {
    /// Index into the loaded page.
    pub index: usize,
    /// Stash location ordinal, exposed for row styling.
    pub location: u8,
    /// The row's own layout, independent of the page header.
    pub display_type: DisplayType,
    pub selection: SelectionAttrs,
    /// Char-name cell, present while a search is active.
    pub char_cell: Option<Cell>,
    /// Stat cells in this row's own layout.
    pub cells: Vec<Cell>,
    /// Escaped item name.
    pub name: String,
    /// Name-column accent class for the item's quality.
    pub name_accent: &'static str,
    /// Tooltip markup payload: image reference plus escaped description.
    pub tooltip: String,
}

/// Build descriptors for the rows inside `range`, clamped to the page.
///
/// Cost is proportional to the window size, never to `items.len()`.
pub fn render_visible(items: &[Item], range: VisibleRange, searching: bool) -> Vec<RowDescriptor> {
    let range = range.clamp_to(items.len());
    (range.start..range.end)
        .map(|index| row_descriptor(&items[index], index, searching))
        .collect()
}

fn stat_or_unid(value: &Option<String>) -> Cell {
    Cell::center(value.clone().unwrap_or_else(|| UNIDENTIFIED.to_string()))
}

fn stat_or_blank(value: &Option<String>) -> Cell {
    Cell::center(value.clone().unwrap_or_default())
}

/// Build one row descriptor.
fn row_descriptor(item: &Item, index: usize, searching: bool) -> RowDescriptor {
    let display_type = item.display_type();

    let cells = match display_type {
        DisplayType::Torch => vec![
            stat_or_unid(&item.stat_class),
            stat_or_unid(&item.stat),
            stat_or_unid(&item.res),
        ],
        DisplayType::Anniversary => vec![
            stat_or_unid(&item.stat),
            stat_or_unid(&item.res),
            stat_or_unid(&item.exp),
        ],
        DisplayType::Normal => vec![stat_or_blank(&item.ed), stat_or_blank(&item.sockets)],
    };

    let char_cell = searching.then(|| Cell::left(escape_html(&item.char_name)));

    RowDescriptor {
        index,
        location: item.item_location,
        display_type,
        selection: SelectionAttrs {
            item_id: item.item_id,
            image: item.item_image.clone(),
            account: item.account_login.clone(),
            item_type: item.item_type.clone(),
            char_name: item.char_name.clone(),
            md5: item.item_md5.clone(),
            realm: realm_name(item.account_realm),
            name: item.item_name.clone(),
        },
        char_cell,
        cells,
        name: escape_html(&item.item_name),
        name_accent: quality_accent(item.item_quality),
        tooltip: tooltip_markup(item),
    }
}

/// Tooltip payload: a pre-escaped image tag plus the escaped description,
/// in the exact shape the admin surface's tooltip script expects.
fn tooltip_markup(item: &Item) -> String {
    format!(
        "<center>&lt;img src=&quot;images/items/{}.png&quot;&gt;<br>{}</center>",
        item.item_image,
        escape_html(&item.item_description)
    )
}
