//! Page planning shared by the document layouts
//!
//! Plans are plain data: every placement carries its position in mm from the
//! top-left corner of its page. Renderers walk the plan and draw; tests can
//! check page breaks without producing a PDF.

use std::mem;

/// An item placed on a page
#[derive(Debug, Clone, PartialEq)]
pub struct Placement<T> {
    pub x: f32,
    pub y: f32,
    pub item: T,
}

/// The placements on one page
#[derive(Debug, Clone, PartialEq)]
pub struct PagePlan<T> {
    pub placements: Vec<Placement<T>>,
}

impl<T> PagePlan<T> {
    pub fn new() -> Self {
        Self {
            placements: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.placements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }

    pub fn items(&self) -> impl Iterator<Item = &T> {
        self.placements.iter().map(|p| &p.item)
    }

    fn place(&mut self, x: f32, y: f32, item: T) {
        self.placements.push(Placement { x, y, item });
    }
}

impl<T> Default for PagePlan<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixed-size cells in a grid centred on the page, filled row by row
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Grid {
    pub columns: usize,
    pub rows: usize,
    pub cell_width: f32,
    pub cell_height: f32,
    pub spacing: f32,
}

impl Grid {
    pub fn per_page(&self) -> usize {
        self.columns * self.rows
    }

    /// Top-left corner of `slot` on a page of the given size
    pub fn origin(&self, slot: usize, page_width: f32, page_height: f32) -> (f32, f32) {
        let grid_width =
            self.columns as f32 * self.cell_width + (self.columns - 1) as f32 * self.spacing;
        let grid_height = self.rows as f32 * self.cell_height + (self.rows - 1) as f32 * self.spacing;

        let left = (page_width - grid_width) / 2.0;
        let top = (page_height - grid_height) / 2.0;

        let col = slot % self.columns;
        let row = slot / self.columns;

        (
            left + col as f32 * (self.cell_width + self.spacing),
            top + row as f32 * (self.cell_height + self.spacing),
        )
    }

    /// Lay items out in order. There is always at least one page.
    pub fn paginate<T>(
        &self,
        items: impl IntoIterator<Item = T>,
        page_width: f32,
        page_height: f32,
    ) -> Vec<PagePlan<T>> {
        let per_page = self.per_page().max(1);
        let mut pages = Vec::new();
        let mut current = PagePlan::new();

        for item in items {
            if current.len() == per_page {
                log::debug!("Page {} full, starting a new page", pages.len() + 1);
                pages.push(mem::take(&mut current));
            }
            let (x, y) = self.origin(current.len(), page_width, page_height);
            current.place(x, y, item);
        }
        pages.push(current);

        pages
    }
}

/// Spacing for a column-by-column text flow
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlowMetrics {
    pub start_x: f32,
    pub start_y: f32,
    pub column_width: f32,
    pub line_height: f32,
    pub bottom_margin: f32,
}

/// Places fixed-height lines down a column, moving to the next column when
/// a line would cross the bottom margin and to a new page when the columns
/// run out.
pub struct ColumnFlow<T> {
    metrics: FlowMetrics,
    limit_y: f32,
    max_columns: usize,
    x: f32,
    y: f32,
    column: usize,
    pages: Vec<PagePlan<T>>,
    current: PagePlan<T>,
}

impl<T> ColumnFlow<T> {
    pub fn new(metrics: FlowMetrics, page_width: f32, page_height: f32) -> Self {
        let max_columns = ((page_width - metrics.start_x) / metrics.column_width).floor() as usize;

        Self {
            metrics,
            limit_y: page_height - metrics.bottom_margin,
            max_columns: max_columns.max(1),
            x: metrics.start_x,
            y: metrics.start_y,
            column: 0,
            pages: Vec::new(),
            current: PagePlan::new(),
        }
    }

    pub fn columns_per_page(&self) -> usize {
        self.max_columns
    }

    fn next_column(&mut self) {
        self.y = self.metrics.start_y;
        self.x += self.metrics.column_width;
        self.column += 1;

        if self.column >= self.max_columns {
            log::debug!(
                "Page {} full after {} lines",
                self.pages.len() + 1,
                self.current.len()
            );
            self.pages.push(mem::take(&mut self.current));
            self.x = self.metrics.start_x;
            self.column = 0;
        }
    }

    /// Place one line
    pub fn push(&mut self, item: T) {
        if self.y + self.metrics.line_height > self.limit_y {
            self.next_column();
        }
        self.current.place(self.x, self.y, item);
        self.y += self.metrics.line_height;
    }

    /// Leave vertical space, or start a new column if the space does not fit
    pub fn gap(&mut self, height: f32) {
        if self.y + height > self.limit_y {
            self.next_column();
        } else {
            self.y += height;
        }
    }

    /// Finish the flow. There is always at least one page.
    pub fn finish(mut self) -> Vec<PagePlan<T>> {
        self.pages.push(self.current);
        self.pages
    }
}
