//! Saturation/value plane for picking the initial color.
//!
//! The picker fixes a hue and spans saturation along x and value along y
//! (top row brightest), the layout the session's color box uses. The core
//! only ever consumes the [`Rgb`] a pointer coordinate maps to; rendering
//! the plane to pixels is provided for UIs that need a backing image.

use std::io;
use std::path::Path;

use ndarray::Array3;
use plotters::prelude::*;
use rayon::prelude::*;

use crate::color::{hsv_to_rgb, Rgb};

/// Edge length of the picker plane as presented by the stock UI.
pub const DEFAULT_PLANE_SIZE: usize = 300;

/// A square saturation/value plane at a fixed hue.
#[derive(Debug, Clone)]
pub struct SvPlane {
    hue: f32,
    size: usize,
}

impl SvPlane {
    /// Plane at `hue` degrees (wrapped into [0, 360)) with `size` pixels per
    /// edge (at least 1).
    pub fn new(hue: f32, size: usize) -> Self {
        Self {
            hue: hue.rem_euclid(360.0),
            size: size.max(1),
        }
    }

    pub fn hue(&self) -> f32 {
        self.hue
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Color under the pointer at `(x, y)`, measured from the top-left
    /// corner. Coordinates past the edge clamp to the border pixel.
    pub fn color_at(&self, x: usize, y: usize) -> Rgb {
        let x = x.min(self.size - 1);
        let y = y.min(self.size - 1);
        let s = x as f32 / self.size as f32;
        let v = 1.0 - y as f32 / self.size as f32;
        hsv_to_rgb(self.hue, s, v)
    }

    /// Render the plane into a `[size, size, 3]` pixel grid.
    pub fn rasterize(&self) -> Array3<u8> {
        let mut pixels = Array3::zeros((self.size, self.size, 3));

        pixels
            .indexed_iter_mut()
            .par_bridge()
            .for_each(|((row, col, channel), value)| {
                let color = self.color_at(col, row);
                *value = match channel {
                    0 => color.r,
                    1 => color.g,
                    _ => color.b,
                };
            });

        pixels
    }

    /// Write the rasterized plane as a PNG.
    pub fn to_png<P: AsRef<Path>>(&self, path: P) -> io::Result<()> {
        let pixels = self.rasterize();
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let backend = BitMapBackend::new(path, (self.size as u32, self.size as u32));
        let drawing_area = backend.into_drawing_area();
        drawing_area
            .fill(&RGBColor(0, 0, 0))
            .map_err(|err| io::Error::new(io::ErrorKind::Other, err))?;

        for row in 0..self.size {
            for col in 0..self.size {
                let color = RGBColor(
                    pixels[[row, col, 0]],
                    pixels[[row, col, 1]],
                    pixels[[row, col, 2]],
                );
                drawing_area
                    .draw_pixel((col as i32, row as i32), &color)
                    .map_err(|err| io::Error::new(io::ErrorKind::Other, err))?;
            }
        }

        drawing_area
            .present()
            .map_err(|err| io::Error::new(io::ErrorKind::Other, err))
    }
}
