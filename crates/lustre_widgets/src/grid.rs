//! Flat data grid
//!
//! Header row in the accent color, alternating row shading, accent selection
//! and grid lines drawn in the foreground phase so they sit above cell fills.

use lustre_core::{
    OwnerDraw, PaintEventArgs, PaintHooks, PaintPhase, Point, Rect, Size, TextAlign,
};
use lustre_theme::ColorRole;

use crate::base::{impl_surface_base, SurfaceBase};

const HEADER_HEIGHT: f32 = 30.0;
const ROW_HEIGHT: f32 = 24.0;
const CELL_PADDING: f32 = 6.0;
const FONT_SIZE: f32 = 12.0;

#[derive(Clone, Debug, PartialEq)]
pub struct GridColumn {
    pub header: String,
    pub width: f32,
    pub align: TextAlign,
}

impl GridColumn {
    pub fn new(header: impl Into<String>, width: f32) -> Self {
        Self {
            header: header.into(),
            width,
            align: TextAlign::Left,
        }
    }

    pub fn align(mut self, align: TextAlign) -> Self {
        self.align = align;
        self
    }
}

#[derive(Debug)]
pub struct Grid {
    pub base: SurfaceBase,
    columns: Vec<GridColumn>,
    rows: Vec<Vec<String>>,
    selected: Option<usize>,
    hovered: Option<usize>,
}

impl_surface_base!(Grid);

impl Grid {
    pub fn new(columns: Vec<GridColumn>) -> Self {
        let mut grid = Self {
            base: SurfaceBase::new(Size::ZERO),
            columns,
            rows: Vec::new(),
            selected: None,
            hovered: None,
        };
        grid.relayout();
        grid
    }

    pub fn push_row<I, S>(&mut self, cells: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.rows.push(cells.into_iter().map(Into::into).collect());
        self.relayout();
    }

    pub fn columns(&self) -> &[GridColumn] {
        &self.columns
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn cell(&self, row: usize, column: usize) -> Option<&str> {
        self.rows.get(row)?.get(column).map(String::as_str)
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    /// Select a row; out-of-range indices clear the selection
    pub fn select(&mut self, row: Option<usize>) {
        let row = row.filter(|&r| r < self.rows.len());
        if row != self.selected {
            self.selected = row;
            self.base.invalidate();
        }
    }

    /// Data row under a local point (the header is not a row)
    pub fn row_at(&self, point: Point) -> Option<usize> {
        if point.x < 0.0 || point.x > self.base.size.width || point.y < HEADER_HEIGHT {
            return None;
        }
        let row = ((point.y - HEADER_HEIGHT) / ROW_HEIGHT) as usize;
        (row < self.rows.len()).then_some(row)
    }

    pub fn pointer_move(&mut self, point: Point) {
        let hovered = self.row_at(point);
        if hovered != self.hovered {
            self.hovered = hovered;
            self.base.invalidate();
        }
    }

    pub fn click(&mut self, point: Point) -> Option<usize> {
        let row = self.row_at(point)?;
        self.select(Some(row));
        Some(row)
    }

    fn relayout(&mut self) {
        let width = self.columns.iter().map(|c| c.width).sum();
        let height = HEADER_HEIGHT + ROW_HEIGHT * self.rows.len() as f32;
        self.base.size = Size::new(width, height);
        self.base.invalidate();
    }

    fn row_rect(&self, row: usize) -> Rect {
        Rect::new(
            0.0,
            HEADER_HEIGHT + ROW_HEIGHT * row as f32,
            self.base.size.width,
            ROW_HEIGHT,
        )
    }

    /// Left edge of every column, plus the right edge of the last one
    fn column_edges(&self) -> impl Iterator<Item = f32> + '_ {
        std::iter::once(0.0).chain(self.columns.iter().scan(0.0, |x, column| {
            *x += column.width;
            Some(*x)
        }))
    }

    fn paint_background(&self, args: &mut PaintEventArgs<'_>) {
        let region = args.region;
        args.canvas.fill_rect(region, self.base.color(ColorRole::Background));

        let stripe = self.base.color(ColorRole::Surface);
        let hover = self.base.color(ColorRole::SurfaceHover);
        let accent = self.base.color(ColorRole::AccentHover);
        for row in 0..self.rows.len() {
            let fill = if self.selected == Some(row) {
                accent
            } else if self.hovered == Some(row) {
                hover
            } else if row % 2 == 1 {
                stripe
            } else {
                continue;
            };
            args.canvas.fill_rect(self.row_rect(row), fill);
        }
    }

    fn paint_cells(&self, args: &mut PaintEventArgs<'_>) {
        let header = Rect::new(0.0, 0.0, self.base.size.width, HEADER_HEIGHT);
        args.canvas.fill_rect(header, self.base.color(ColorRole::Accent));

        let header_text = self.base.color(ColorRole::AccentText);
        let foreground = self.base.color(ColorRole::Foreground);
        let edges: Vec<f32> = self.column_edges().collect();

        for (index, column) in self.columns.iter().enumerate() {
            let x = edges[index];
            let cell = Rect::new(x, 0.0, column.width, HEADER_HEIGHT).inset(CELL_PADDING, 0.0);
            args.canvas.text(
                column.header.clone(),
                cell,
                header_text,
                FONT_SIZE,
                column.align,
            );

            for (row, cells) in self.rows.iter().enumerate() {
                let Some(value) = cells.get(index) else {
                    continue;
                };
                let color = if self.selected == Some(row) {
                    header_text
                } else {
                    foreground
                };
                let cell = Rect::new(x, self.row_rect(row).y(), column.width, ROW_HEIGHT)
                    .inset(CELL_PADDING, 0.0);
                args.canvas.text(value.clone(), cell, color, FONT_SIZE, column.align);
            }
        }
    }

    fn paint_lines(&self, args: &mut PaintEventArgs<'_>) {
        let border = self.base.color(ColorRole::Border);
        let bottom = self.base.size.height;
        for x in self.column_edges().skip(1) {
            args.canvas.line(Point::new(x, 0.0), Point::new(x, bottom), border, 1.0);
        }
        for row in 0..self.rows.len() {
            let y = self.row_rect(row).bottom();
            args.canvas.line(
                Point::new(0.0, y),
                Point::new(self.base.size.width, y),
                border,
                1.0,
            );
        }
    }
}

impl OwnerDraw for Grid {
    fn self_paints(&self) -> bool {
        self.base.self_paints
    }

    fn paint_hooks(&mut self) -> &mut PaintHooks {
        &mut self.base.hooks
    }

    fn paint_phase(&mut self, args: &mut PaintEventArgs<'_>) {
        match args.phase {
            PaintPhase::Background => self.paint_background(args),
            PaintPhase::Main => self.paint_cells(args),
            PaintPhase::Foreground => self.paint_lines(args),
        }
    }
}
