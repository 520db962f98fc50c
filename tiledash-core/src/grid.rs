// tiledash-core/src/grid.rs
use ratatui::layout::{Position, Rect};

/// Number of columns a dashboard row is divided into
pub const GRID_COLUMNS: u16 = 12;

/// Horizontal extent of a widget, in grid columns (1..=12)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridSpan(u16);

impl GridSpan {
    pub const FULL: GridSpan = GridSpan(GRID_COLUMNS);
    pub const TWO_THIRDS: GridSpan = GridSpan(8);
    pub const HALF: GridSpan = GridSpan(6);
    pub const THIRD: GridSpan = GridSpan(4);
    pub const QUARTER: GridSpan = GridSpan(3);

    /// Create a span, clamped into `1..=GRID_COLUMNS`
    pub fn new(columns: u16) -> Self {
        GridSpan(columns.clamp(1, GRID_COLUMNS))
    }

    pub fn columns(self) -> u16 {
        self.0
    }
}

impl Default for GridSpan {
    fn default() -> Self {
        GridSpan::FULL
    }
}

/// Placement request for one resolvable widget
#[derive(Debug, Clone, Copy)]
pub struct GridItem {
    /// Position of the widget in the layout
    pub index: usize,
    pub span: GridSpan,
    /// Preferred height in rows, if the widget has one
    pub height: Option<u16>,
}

/// A placed widget area
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridCell {
    pub index: usize,
    pub area: Rect,
}

/// Widgets flowed in reading order into rows of [`GRID_COLUMNS`] columns
#[derive(Debug, Clone, Default)]
pub struct GridLayout {
    area: Rect,
    cells: Vec<GridCell>,
}

impl GridLayout {
    /// Flow `items` into rows. A widget that does not fit the current row
    /// starts a new one; each row is as tall as its tallest widget.
    /// Rows past the bottom of `area` are clipped away.
    pub fn place(area: Rect, items: &[GridItem], default_row_height: u16) -> Self {
        let mut rows: Vec<Vec<GridItem>> = Vec::new();
        let mut used = 0u16;

        for item in items {
            let span = item.span.columns();
            match rows.last_mut() {
                Some(row) if used + span <= GRID_COLUMNS => {
                    row.push(*item);
                    used += span;
                }
                _ => {
                    rows.push(vec![*item]);
                    used = span;
                }
            }
        }

        let mut cells = Vec::with_capacity(items.len());
        let bottom = area.bottom();
        let mut y = area.y;

        for row in rows {
            if y >= bottom {
                break;
            }

            let row_height = row
                .iter()
                .map(|item| item.height.unwrap_or(default_row_height))
                .max()
                .unwrap_or(default_row_height)
                .max(1);
            let height = row_height.min(bottom - y);

            let mut column = 0u16;
            for item in row {
                let x0 = column_offset(area, column);
                column += item.span.columns();
                let x1 = column_offset(area, column);

                cells.push(GridCell {
                    index: item.index,
                    area: Rect::new(x0, y, x1 - x0, height),
                });
            }

            y = y.saturating_add(row_height);
        }

        Self { area, cells }
    }

    pub fn area(&self) -> Rect {
        self.area
    }

    pub fn cells(&self) -> &[GridCell] {
        &self.cells
    }

    /// Area of the widget at layout position `index`, if it was placed
    pub fn area_of(&self, index: usize) -> Option<Rect> {
        self.cells.iter().find(|c| c.index == index).map(|c| c.area)
    }

    /// Cell under the given terminal position
    pub fn cell_at(&self, x: u16, y: u16) -> Option<&GridCell> {
        let pos = Position::new(x, y);
        self.cells.iter().find(|c| c.area.contains(pos))
    }

    /// Layout position a drop at (x, y) would land on.
    ///
    /// Over a widget this is that widget's position; anywhere else inside the
    /// grid it is the end of the layout (`layout_len`).
    pub fn drop_index_at(&self, x: u16, y: u16, layout_len: usize) -> Option<usize> {
        if !self.area.contains(Position::new(x, y)) {
            return None;
        }

        Some(self.cell_at(x, y).map_or(layout_len, |c| c.index))
    }
}

fn column_offset(area: Rect, column: u16) -> u16 {
    let offset = u32::from(area.width) * u32::from(column) / u32::from(GRID_COLUMNS);
    area.x + offset as u16
}
