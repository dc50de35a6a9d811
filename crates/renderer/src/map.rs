//! Point map rasterisation.
//!
//! Draws a [`MapProduct`] in an equirectangular frame fitted to the
//! boundary, with longitude scaled by the cosine of the mid latitude so the
//! region keeps its shape. Layout, left to right:
//!
//! ```text
//! ┌──────────────────────────────┬────────┐
//! │ points (one disc per value)  │  ▇ 10  │
//! │ boundary outline             │  ▇ 8.0 │
//! │                              │  ▇ ... │
//! └──────────────────────────────┴────────┘
//! ```

use precip_common::{BoundingBox, Color};
use precip_map::{ClassificationSpec, MapProduct};
use tiny_skia::{FillRule, Paint, PathBuilder, Pixmap, Rect, Stroke, Transform};
use tracing::{debug, info};

use crate::error::{RenderError, Result};
use crate::glyphs::{draw_text, text_width};
use crate::png::encode_png;

/// Extent used when neither boundary nor points give one.
const FALLBACK_EXTENT: BoundingBox = BoundingBox {
    min_x: -125.0,
    min_y: 24.0,
    max_x: -66.0,
    max_y: 50.0,
};

/// Smallest extent side in degrees, so a single point still gets a frame.
const MIN_EXTENT_DEG: f64 = 0.1;

#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Total image width in pixels, legend included
    pub width: u32,
    pub marker_radius: f32,
    /// Fraction of the extent added on every side
    pub padding: f64,
    pub legend_width: u32,
    /// Colour bar height as a fraction of image height
    pub legend_shrink: f32,
    pub boundary_width: f32,
    pub anti_alias: bool,
    pub max_height: u32,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            width: 2000,
            marker_radius: 3.0,
            padding: 0.02,
            legend_width: 160,
            legend_shrink: 0.35,
            boundary_width: 1.5,
            anti_alias: true,
            max_height: 8000,
        }
    }
}

/// An RGBA image of a rendered map.
#[derive(Debug, Clone)]
pub struct RenderedMap {
    pub width: u32,
    pub height: u32,
    /// Row-major RGBA, fully opaque
    pub pixels: Vec<u8>,
}

impl RenderedMap {
    pub fn to_png(&self) -> Result<Vec<u8>> {
        encode_png(&self.pixels, self.width as usize, self.height as usize)
    }
}

/// Maps lon/lat to pixel coordinates inside the map area.
#[derive(Debug, Clone, Copy)]
struct Viewport {
    extent: BoundingBox,
    px_per_lon: f64,
    px_per_lat: f64,
}

impl Viewport {
    fn fit(extent: BoundingBox, map_width: u32) -> Self {
        let (_, mid_lat) = extent.center();
        let cos_lat = mid_lat.to_radians().cos().max(0.05);
        let px_per_lat = map_width as f64 / (extent.width() * cos_lat);
        Self {
            extent,
            px_per_lon: px_per_lat * cos_lat,
            px_per_lat,
        }
    }

    fn height(&self) -> u32 {
        (self.extent.height() * self.px_per_lat).ceil() as u32
    }

    fn to_pixel(&self, lon: f64, lat: f64) -> (f32, f32) {
        (
            ((lon - self.extent.min_x) * self.px_per_lon) as f32,
            ((self.extent.max_y - lat) * self.px_per_lat) as f32,
        )
    }
}

fn map_extent(product: &MapProduct, padding: f64) -> BoundingBox {
    let raw = product
        .points
        .boundary
        .bbox()
        .or_else(|| BoundingBox::from_points(product.points.points.iter().map(|p| (p.lon, p.lat))))
        .unwrap_or(FALLBACK_EXTENT);

    let (cx, cy) = raw.center();
    let half_w = raw.width().max(MIN_EXTENT_DEG) / 2.0;
    let half_h = raw.height().max(MIN_EXTENT_DEG) / 2.0;
    BoundingBox::new(cx - half_w, cy - half_h, cx + half_w, cy + half_h).padded(padding)
}

fn paint_for(color: Color, anti_alias: bool) -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color_rgba8(color.r, color.g, color.b, color.a);
    paint.anti_alias = anti_alias;
    paint
}

/// Render a map product to RGBA pixels.
pub fn render_map(product: &MapProduct, options: &RenderOptions) -> Result<RenderedMap> {
    let map_width = options.width.saturating_sub(options.legend_width).max(1);
    let viewport = Viewport::fit(map_extent(product, options.padding), map_width);
    let height = viewport.height().clamp(1, options.max_height.max(1));
    let width = map_width + options.legend_width;

    let mut pixmap = Pixmap::new(width, height).ok_or(RenderError::Canvas { width, height })?;
    pixmap.fill(tiny_skia::Color::WHITE);

    let drawn = draw_points(&mut pixmap, product, &viewport, options);
    draw_boundary(&mut pixmap, product, &viewport, options);
    if options.legend_width > 0 {
        draw_colorbar(&mut pixmap, &product.classification, map_width, options);
    }

    info!(
        width,
        height,
        points = product.points.len(),
        drawn,
        "Rendered map"
    );

    Ok(RenderedMap {
        width,
        height,
        pixels: pixmap.take(),
    })
}

/// Render straight to PNG bytes.
pub fn render_map_png(product: &MapProduct, options: &RenderOptions) -> Result<Vec<u8>> {
    render_map(product, options)?.to_png()
}

/// Fill one disc per visible point, batched into one path per bin.
fn draw_points(
    pixmap: &mut Pixmap,
    product: &MapProduct,
    viewport: &Viewport,
    options: &RenderOptions,
) -> usize {
    let spec = &product.classification;
    let mut builders: Vec<PathBuilder> = (0..spec.bin_count()).map(|_| PathBuilder::new()).collect();
    let mut drawn = 0usize;

    for point in &product.points.points {
        let Some(bin) = spec.bin_index(point.value) else {
            continue;
        };
        let (x, y) = viewport.to_pixel(point.lon, point.lat);
        builders[bin].push_circle(x, y, options.marker_radius);
        drawn += 1;
    }

    for (bin, builder) in builders.into_iter().enumerate() {
        let (Some(path), Some(&color)) = (builder.finish(), spec.colors.get(bin)) else {
            continue;
        };
        let paint = paint_for(color, options.anti_alias);
        pixmap.fill_path(&path, &paint, FillRule::Winding, Transform::identity(), None);
    }

    debug!(drawn, bins = spec.bin_count(), "Drew points");
    drawn
}

fn draw_boundary(pixmap: &mut Pixmap, product: &MapProduct, viewport: &Viewport, options: &RenderOptions) {
    let mut pb = PathBuilder::new();
    for polygon in &product.points.boundary.polygons.0 {
        for ring in std::iter::once(polygon.exterior()).chain(polygon.interiors()) {
            let mut coords = ring.0.iter();
            let Some(first) = coords.next() else {
                continue;
            };
            let (x, y) = viewport.to_pixel(first.x, first.y);
            pb.move_to(x, y);
            for c in coords {
                let (x, y) = viewport.to_pixel(c.x, c.y);
                pb.line_to(x, y);
            }
            pb.close();
        }
    }

    let Some(path) = pb.finish() else {
        return;
    };
    let paint = paint_for(Color::BLACK, true);
    let stroke = Stroke {
        width: options.boundary_width,
        ..Stroke::default()
    };
    pixmap.stroke_path(&path, &paint, &stroke, Transform::identity(), None);
}

/// Vertical colour bar with one swatch per bin, lowest bin at the bottom,
/// and a tick label at each inner edge.
fn draw_colorbar(
    pixmap: &mut Pixmap,
    spec: &ClassificationSpec,
    map_width: u32,
    options: &RenderOptions,
) {
    let bins = spec.colors.len();
    if bins == 0 {
        return;
    }

    let height = pixmap.height() as f32;
    let bar_height = (height * options.legend_shrink).max(bins as f32 * 4.0).min(height);
    let swatch = bar_height / bins as f32;
    let bar_width = (options.legend_width as f32 * 0.15).max(6.0);
    let left = map_width as f32 + options.legend_width as f32 * 0.1;
    let bottom = (height + bar_height) / 2.0;

    for (k, &color) in spec.colors.iter().enumerate() {
        let top = bottom - (k + 1) as f32 * swatch;
        if let Some(rect) = Rect::from_xywh(left, top, bar_width, swatch) {
            pixmap.fill_rect(rect, &paint_for(color, false), Transform::identity(), None);
        }
    }

    let outline_paint = paint_for(Color::BLACK, true);
    let mut pb = PathBuilder::new();
    if let Some(rect) = Rect::from_xywh(left, bottom - bar_height, bar_width, bar_height) {
        pb.push_rect(rect);
    }

    let text_size = (swatch * 0.6).clamp(6.0, 24.0);
    let text_left = left + bar_width + text_size * 0.8;
    let max_text = options.legend_width as f32 - (text_left - map_width as f32);
    for (k, label) in spec.labels.iter().enumerate() {
        if label.is_empty() || k > bins {
            continue;
        }
        let y = bottom - k as f32 * swatch;
        pb.move_to(left + bar_width, y);
        pb.line_to(left + bar_width + text_size * 0.4, y);
        let size = if text_width(label, text_size) > max_text {
            text_size * max_text / text_width(label, text_size)
        } else {
            text_size
        };
        draw_text(pixmap, label, text_left, y, size, [0, 0, 0, 255]);
    }

    if let Some(path) = pb.finish() {
        let stroke = Stroke {
            width: 1.0,
            ..Stroke::default()
        };
        pixmap.stroke_path(&path, &outline_paint, &stroke, Transform::identity(), None);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_viewport_corners() {
        let extent = BoundingBox::new(-90.0, 36.0, -80.0, 40.0);
        let viewport = Viewport::fit(extent, 1000);
        let (x0, y0) = viewport.to_pixel(-90.0, 40.0);
        assert!(x0.abs() < 1e-3 && y0.abs() < 1e-3);
        let (x1, _) = viewport.to_pixel(-80.0, 36.0);
        assert!((x1 - 1000.0).abs() < 1e-2);
        // 4 degrees of latitude over 10 of longitude at 38N
        let expected = 4.0 * 1000.0 / (10.0 * 38f64.to_radians().cos());
        assert!((viewport.height() as f64 - expected).abs() <= 1.0);
    }

    #[test]
    fn test_default_options() {
        let options = RenderOptions::default();
        assert_eq!(options.width, 2000);
        assert!(options.padding > 0.0);
    }
}
