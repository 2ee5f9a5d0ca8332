//! Destructible city raster
//!
//! Collision works against a per-pixel occupancy grid rasterized from the
//! skyline once per round. Cells only ever lose occupancy: `carve` punches
//! holes, nothing refills them until the next round rebuilds the raster
//! from scratch. Each solid cell keeps its palette id so the renderer can
//! draw the damaged city directly from this grid.

use glam::IVec2;

use super::skyline::{Skyline, baseline};
use crate::consts::{WINDOW_HEIGHT, WINDOW_WIDTH};
use crate::palette;

/// Mutable occupancy raster covering the playfield
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CityRaster {
    width: i32,
    height: i32,
    cells: Vec<u8>,
}

impl CityRaster {
    /// Rasterize the skyline silhouette.
    ///
    /// Structure bodies are filled with their own color, then window cells
    /// are recolored - except each structure's lowest window row, which
    /// stays at body color so the base band reads fully opaque.
    pub fn build(skyline: &Skyline) -> Self {
        let mut raster = Self {
            width: skyline.field_width,
            height: skyline.field_height,
            cells: vec![palette::EMPTY; (skyline.field_width * skyline.field_height) as usize],
        };
        let bottom = baseline(skyline.field_height);

        for s in &skyline.structures {
            raster.fill_rect(s.x, bottom - s.height, s.width, s.height, s.color);

            let lowest_row = s.windows.iter().map(|w| w.pos.y).max();
            for w in &s.windows {
                if Some(w.pos.y) == lowest_row {
                    continue;
                }
                raster.fill_rect(w.pos.x, w.pos.y, WINDOW_WIDTH, WINDOW_HEIGHT, w.color());
            }
        }
        raster
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    /// Whether the cell at `point` blocks a projectile. Out-of-bounds
    /// coordinates are open air.
    pub fn is_solid(&self, point: IVec2) -> bool {
        self.index(point)
            .is_some_and(|i| self.cells[i] != palette::EMPTY)
    }

    /// Palette id at `point` for the renderer; `palette::EMPTY` when the
    /// cell is clear or out of bounds
    pub fn color_at(&self, point: IVec2) -> u8 {
        self.index(point).map_or(palette::EMPTY, |i| self.cells[i])
    }

    /// Clear every cell within `radius` of `center`.
    ///
    /// Idempotent and irreversible; centers beyond the raster edge are
    /// clipped, never an error.
    pub fn carve(&mut self, center: IVec2, radius: i32) {
        let r_sq = radius * radius;
        let x_min = (center.x - radius).max(0);
        let x_max = (center.x + radius).min(self.width - 1);
        let y_min = (center.y - radius).max(0);
        let y_max = (center.y + radius).min(self.height - 1);

        for y in y_min..=y_max {
            for x in x_min..=x_max {
                let dx = x - center.x;
                let dy = y - center.y;
                if dx * dx + dy * dy <= r_sq {
                    self.cells[(y * self.width + x) as usize] = palette::EMPTY;
                }
            }
        }
    }

    /// Number of solid cells left (diagnostics and tests)
    pub fn solid_cells(&self) -> usize {
        self.cells.iter().filter(|&&c| c != palette::EMPTY).count()
    }

    fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32, color: u8) {
        let x_min = x.max(0);
        let x_max = (x + w).min(self.width);
        let y_min = y.max(0);
        let y_max = (y + h).min(self.height);
        for row in y_min..y_max {
            for col in x_min..x_max {
                self.cells[(row * self.width + col) as usize] = color;
            }
        }
    }

    fn index(&self, point: IVec2) -> Option<usize> {
        if point.x < 0 || point.x >= self.width || point.y < 0 || point.y >= self.height {
            None
        } else {
            Some((point.y * self.width + point.x) as usize)
        }
    }
}
