use crate::buffer::PixelBuffer;
use crate::color::Color;
use crate::error::{PaintError, PaintResult};
use crate::geometry::{Point, Rect};

fn div_round(numerator: u32, denominator: u32) -> u32 {
    (numerator + denominator / 2) / denominator
}

/// Source-over compositing of non-premultiplied colours.
///
/// A fully transparent `src` leaves `dst` untouched and a fully opaque one
/// replaces it, both bit-exactly.
pub fn blend_over(dst: Color, src: Color) -> Color {
    let sa = src.a as u32;
    let da = dst.a as u32;
    if sa == 0 {
        return dst;
    }
    if sa == 255 {
        return src;
    }

    let dst_weight = da * (255 - sa);
    let out_a = sa * 255 + dst_weight;
    if out_a == 0 {
        return Color::TRANSPARENT;
    }
    let channel = |s: u8, d: u8| -> u8 {
        div_round(s as u32 * sa * 255 + d as u32 * dst_weight, out_a).min(255) as u8
    };
    Color::rgba(
        channel(src.r, dst.r),
        channel(src.g, dst.g),
        channel(src.b, dst.b),
        div_round(out_a, 255).min(255) as u8,
    )
}

/// Multiplies the colour by a flat `(255, 255, 255, opacity)` mask.
pub fn apply_opacity(color: Color, opacity: u8) -> Color {
    color.with_alpha(div_round(color.a as u32 * opacity as u32, 255) as u8)
}

/// Composites `overlay`, masked by `opacity`, over `base`. Both must share a size.
pub fn composite(base: &PixelBuffer, overlay: &PixelBuffer, opacity: u8) -> PaintResult<PixelBuffer> {
    if base.width() != overlay.width() || base.height() != overlay.height() {
        return Err(PaintError::RegionMismatch {
            rect: base.bounds(),
            source_width: overlay.width(),
            source_height: overlay.height(),
        });
    }
    let mut out = base.clone();
    for (point, paint) in overlay.pixels() {
        if paint.a == 0 {
            continue;
        }
        let under = base.get(point)?;
        out.set(point, blend_over(under, apply_opacity(paint, opacity)))?;
    }
    Ok(out)
}

/// Blends `stamp` over `target` with the stamp's top-left at `origin`.
///
/// Stamp pixels that would land outside `target` are skipped; the caller is
/// expected to clip `origin`'s footprint beforehand when it matters.
pub fn stamp_onto(target: &mut PixelBuffer, stamp: &PixelBuffer, origin: Point) -> PaintResult<()> {
    let footprint = Rect::new(origin.x, origin.y, stamp.width(), stamp.height());
    let Some(visible) = footprint.intersect(&target.bounds()) else {
        return Ok(());
    };
    for point in visible.points() {
        let paint = stamp.get(Point::new(point.x - origin.x, point.y - origin.y))?;
        if paint.a == 0 {
            continue;
        }
        let under = target.get(point)?;
        target.set(point, blend_over(under, paint))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_over_extremes_are_exact() {
        let dst = Color::rgba(12, 34, 56, 200);
        assert_eq!(blend_over(dst, Color::RED.with_alpha(0)), dst);
        assert_eq!(blend_over(dst, Color::BLUE), Color::BLUE);
    }

    #[test]
    fn test_over_half_alpha_on_opaque() {
        let out = blend_over(Color::WHITE, Color::BLACK.with_alpha(128));
        assert_eq!(out.a, 255);
        assert!(out.r > 120 && out.r < 135, "got {out:?}");
    }

    #[test]
    fn test_opacity_caps_alpha() {
        assert_eq!(apply_opacity(Color::RED, 128).a, 128);
        assert_eq!(apply_opacity(Color::RED.with_alpha(128), 255).a, 128);
        assert_eq!(apply_opacity(Color::RED, 0).a, 0);
    }
}
