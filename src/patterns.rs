//! Named shape catalog and stamping onto the grid.

use crate::grid::Grid;

/// An immutable named bitmap, stamped onto the grid as an initial condition.
#[derive(Debug, Clone, Copy)]
pub struct Shape {
    pub name: &'static str,
    pub width: usize,
    pub height: usize,
    /// Row-major 0/1 cells, `width * height` entries.
    cells: &'static [u8],
}

impl Shape {
    #[inline]
    pub fn cell(&self, x: usize, y: usize) -> bool {
        self.cells[y * self.width + x] != 0
    }

    /// Whether the shape placed at (x_offset, y_offset) lies entirely
    /// inside a grid of the given dimensions. Stamping never wraps, so
    /// negative offsets are out of bounds too. The end coordinates are
    /// computed with checked arithmetic: an offset near `i64::MAX` is
    /// rejected, not wrapped into range.
    pub fn fits(&self, grid_width: usize, grid_height: usize, x_offset: i64, y_offset: i64) -> bool {
        let x_end = x_offset.checked_add(self.width as i64);
        let y_end = y_offset.checked_add(self.height as i64);
        x_offset >= 0
            && y_offset >= 0
            && x_end.is_some_and(|end| end <= grid_width as i64)
            && y_end.is_some_and(|end| end <= grid_height as i64)
    }
}

/// Find a shape by its catalog name.
pub fn lookup(name: &str) -> Option<&'static Shape> {
    SHAPES.iter().find(|s| s.name == name)
}

/// All catalog names, in catalog order.
pub fn names() -> Vec<&'static str> {
    SHAPES.iter().map(|s| s.name).collect()
}

/// Copy a shape's live cells into the grid at the given offset.
///
/// Dead shape cells overwrite too (the stamp is the bitmap, not a union).
/// Cells that would land outside the grid are skipped; callers that need a
/// hard failure check [`Shape::fits`] first. Returns the number of live
/// cells written.
pub fn stamp(grid: &mut Grid, shape: &Shape, x_offset: i64, y_offset: i64) -> usize {
    let mut live = 0;
    for y in 0..shape.height {
        for x in 0..shape.width {
            // A coordinate whose sum overflows is outside the grid too.
            let (Some(gx), Some(gy)) = (
                x_offset.checked_add(x as i64),
                y_offset.checked_add(y as i64),
            ) else {
                continue;
            };
            if gx < 0 || gy < 0 || gx >= grid.width() as i64 || gy >= grid.height() as i64 {
                continue;
            }
            let alive = shape.cell(x, y);
            grid.set(gx, gy, alive);
            live += alive as usize;
        }
    }
    live
}

pub const SHAPES: &[Shape] = &[
    Shape {
        name: "block",
        width: 2,
        height: 2,
        cells: &[
            1, 1, //
            1, 1, //
        ],
    },
    Shape {
        name: "blinker",
        width: 3,
        height: 1,
        cells: &[1, 1, 1],
    },
    Shape {
        name: "toad",
        width: 4,
        height: 2,
        cells: &[
            0, 1, 1, 1, //
            1, 1, 1, 0, //
        ],
    },
    Shape {
        name: "beacon",
        width: 4,
        height: 4,
        cells: &[
            1, 1, 0, 0, //
            1, 1, 0, 0, //
            0, 0, 1, 1, //
            0, 0, 1, 1, //
        ],
    },
    Shape {
        name: "glider",
        width: 3,
        height: 3,
        cells: &[
            0, 1, 0, //
            0, 0, 1, //
            1, 1, 1, //
        ],
    },
    Shape {
        name: "r_pentomino",
        width: 3,
        height: 3,
        cells: &[
            0, 1, 1, //
            1, 1, 0, //
            0, 1, 0, //
        ],
    },
    Shape {
        name: "lwss",
        width: 5,
        height: 4,
        cells: &[
            1, 0, 0, 1, 0, //
            0, 0, 0, 0, 1, //
            1, 0, 0, 0, 1, //
            0, 1, 1, 1, 1, //
        ],
    },
    Shape {
        name: "glider_gun",
        width: 36,
        height: 9,
        cells: &[
            0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, //
            0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1, 0, 1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, //
            0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1, 1, 0, 0, 0, 0, 0, 0, 1, 1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1, 1, //
            0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1, 0, 0, 0, 1, 0, 0, 0, 0, 1, 1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1, 1, //
            1, 1, 0, 0, 0, 0, 0, 0, 0, 0, 1, 0, 0, 0, 0, 0, 1, 0, 0, 0, 1, 1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, //
            1, 1, 0, 0, 0, 0, 0, 0, 0, 0, 1, 0, 0, 0, 1, 0, 1, 1, 0, 0, 0, 0, 1, 0, 1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, //
            0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1, 0, 0, 0, 0, 0, 1, 0, 0, 0, 0, 0, 0, 0, 1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, //
            0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1, 0, 0, 0, 1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, //
            0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1, 1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, //
        ],
    },
];
