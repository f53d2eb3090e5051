//! Pixel compositing and segment rasterization on RGBA buffers.
//!
//! Buffers hold straight (non-premultiplied) RGBA8. Two composite modes are
//! supported: source-over paints a color on top, destination-out removes
//! existing alpha and leaves the pixel transparent.

use crate::tools::StrokeStyle;
use image::{Rgba, RgbaImage};
use kurbo::{Point, Vec2};

/// How a stroke combines with existing pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompositeMode {
    /// Paint over existing content.
    SourceOver,
    /// Remove existing content, leaving transparency.
    DestinationOut,
}

impl CompositeMode {
    pub fn for_style(style: &StrokeStyle) -> Self {
        if style.is_eraser() {
            CompositeMode::DestinationOut
        } else {
            CompositeMode::SourceOver
        }
    }
}

/// Paint `src` over `dst` with the given coverage (0..=1).
pub fn blend_source_over(dst: &mut Rgba<u8>, src: [u8; 4], coverage: f64) {
    let sa = f64::from(src[3]) / 255.0 * coverage;
    if sa <= 0.0 {
        return;
    }
    let da = f64::from(dst.0[3]) / 255.0;
    let out_a = sa + da * (1.0 - sa);
    if out_a <= 0.0 {
        dst.0 = [0, 0, 0, 0];
        return;
    }
    for channel in 0..3 {
        let sc = f64::from(src[channel]);
        let dc = f64::from(dst.0[channel]);
        let value = (sc * sa + dc * da * (1.0 - sa)) / out_a;
        dst.0[channel] = to_u8(value);
    }
    dst.0[3] = to_u8(out_a * 255.0);
}

/// Remove `coverage` of the existing alpha from `dst`.
pub fn erase_destination_out(dst: &mut Rgba<u8>, coverage: f64) {
    if coverage <= 0.0 {
        return;
    }
    let remaining = f64::from(dst.0[3]) * (1.0 - coverage.min(1.0));
    let alpha = to_u8(remaining);
    if alpha == 0 {
        dst.0 = [0, 0, 0, 0];
    } else {
        dst.0[3] = alpha;
    }
}

/// Rasterize a round-capped segment of diameter `style.width` into `buffer`.
///
/// Pixels are sampled at their centers; coverage falls off linearly over
/// one pixel at the edge.
pub fn rasterize_segment(buffer: &mut RgbaImage, from: Point, to: Point, style: &StrokeStyle) {
    let (width, height) = buffer.dimensions();
    if width == 0 || height == 0 {
        return;
    }
    let radius = (style.width / 2.0).max(0.5);
    let reach = radius + 1.0;

    let min_x = (from.x.min(to.x) - reach).floor().max(0.0);
    let min_y = (from.y.min(to.y) - reach).floor().max(0.0);
    let max_x = (from.x.max(to.x) + reach).ceil().min(f64::from(width) - 1.0);
    let max_y = (from.y.max(to.y) + reach).ceil().min(f64::from(height) - 1.0);
    if min_x > max_x || min_y > max_y {
        return;
    }

    let mode = CompositeMode::for_style(style);
    let src = style.color.to_array();

    // Bounds were clamped to the buffer above, so these casts are in range.
    for y in (min_y as u32)..=(max_y as u32) {
        for x in (min_x as u32)..=(max_x as u32) {
            let center = Point::new(f64::from(x) + 0.5, f64::from(y) + 0.5);
            let distance = distance_to_segment(center, from, to);
            let coverage = (radius + 0.5 - distance).clamp(0.0, 1.0);
            if coverage <= 0.0 {
                continue;
            }
            let pixel = buffer.get_pixel_mut(x, y);
            match mode {
                CompositeMode::SourceOver => blend_source_over(pixel, src, coverage),
                CompositeMode::DestinationOut => erase_destination_out(pixel, coverage),
            }
        }
    }
}

/// Distance from `point` to the segment `start`→`end`.
pub fn distance_to_segment(point: Point, start: Point, end: Point) -> f64 {
    let line_vec = end - start;
    let point_vec = point - start;
    let line_len_sq = line_vec.hypot2();
    if line_len_sq < f64::EPSILON {
        return point_vec.hypot();
    }
    let t = (point_vec.dot(line_vec) / line_len_sq).clamp(0.0, 1.0);
    let projection = start + line_vec * t;
    Vec2::new(point.x - projection.x, point.y - projection.y).hypot()
}

fn to_u8(value: f64) -> u8 {
    // Clamped to the u8 range first.
    value.round().clamp(0.0, 255.0) as u8
}
