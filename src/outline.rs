//! Outline generation for variable-width brush strokes.
//!
//! An [`OutlineGenerator`] turns the accumulated stroke samples into a
//! closed polygon that the renderer fills. The generator is pure: the same
//! points and style always produce the same polygon, and empty input
//! produces an empty polygon.

use crate::config::PadConfig;
use crate::point::Point;
use egui::{Pos2, Vec2};
use std::f32::consts::PI;

/// Number of segments used for each round cap
const CAP_SEGMENTS: usize = 8;
/// Number of segments used for a single-point dot
const DOT_SEGMENTS: usize = 16;
/// Radius never drops below this fraction of the brush size, except under the taper
const MIN_RADIUS_FRACTION: f32 = 0.01;

/// Brush style shared by every stroke of a mounted pad
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StyleConfig {
    /// Nominal brush diameter in device pixels
    pub size: f32,
    /// How much pressure affects the width (0 = constant width)
    pub thinning: f32,
    /// How strongly samples are pulled toward the previous sample
    pub streamline: f32,
    /// Minimum spacing between outline samples, as a fraction of `size`
    pub smoothing: f32,
    /// Length over which the stroke end narrows to nothing
    pub taper_end: f32,
}

impl StyleConfig {
    /// Derive the style for a surface of the given backing size
    pub fn for_surface(width: u32, height: u32, config: &PadConfig) -> Self {
        let smaller = width.min(height) as f32;
        Self {
            size: (smaller * config.brush_fraction).max(1.0),
            thinning: config.thinning,
            streamline: config.streamline,
            smoothing: config.smoothing,
            taper_end: config.taper_end,
        }
    }

    /// Radius of the brush at the given pressure, before tapering
    pub fn radius_for(&self, pressure: f32) -> f32 {
        let pressure = pressure.clamp(0.0, 1.0);
        let radius = self.size * (0.5 - self.thinning * (0.5 - pressure));
        radius.max(self.size * MIN_RADIUS_FRACTION)
    }
}

/// Produces the closed boundary of a brush stroke
pub trait OutlineGenerator {
    fn outline(&self, points: &[Point], style: &StyleConfig) -> Vec<Pos2>;
}

/// Pressure-aware outline with streamlining and a tapered end
#[derive(Debug, Default, Clone, Copy)]
pub struct FreehandOutline;

#[derive(Debug, Clone, Copy)]
struct Sample {
    pos: Pos2,
    pressure: f32,
}

impl FreehandOutline {
    pub fn new() -> Self {
        Self
    }

    /// Pull each sample toward its predecessor and drop samples that are
    /// closer together than the smoothing spacing. The last input point is
    /// always kept so the outline reaches the pointer.
    fn filter_samples(points: &[Point], style: &StyleConfig) -> Vec<Sample> {
        let Some(first) = points.first() else {
            return Vec::new();
        };

        let t = 0.15 + (1.0 - style.streamline.clamp(0.0, 1.0)) * 0.85;
        let min_spacing = (style.size * style.smoothing).max(0.0);

        let mut samples = vec![Sample {
            pos: first.pos(),
            pressure: first.pressure,
        }];
        let mut prev = first.pos();

        for point in &points[1..] {
            let pos = prev.lerp(point.pos(), t);
            prev = pos;
            if let Some(last) = samples.last() {
                if last.pos.distance(pos) < min_spacing {
                    continue;
                }
            }
            samples.push(Sample {
                pos,
                pressure: point.pressure,
            });
        }

        if let [_, .., last_point] = points {
            let end = Sample {
                pos: last_point.pos(),
                pressure: last_point.pressure,
            };
            let len = samples.len();
            let gap = samples[len - 1].pos.distance(end.pos);
            if len > 1 && gap < min_spacing * 0.5 {
                // Near-duplicate tail: snap it to the real end point
                samples[len - 1] = end;
            } else if gap > f32::EPSILON {
                samples.push(end);
            }
        }

        samples
    }

    fn dot(center: Pos2, radius: f32) -> Vec<Pos2> {
        (0..DOT_SEGMENTS)
            .map(|i| {
                let angle = i as f32 / DOT_SEGMENTS as f32 * 2.0 * PI;
                center + Vec2::angled(angle) * radius
            })
            .collect()
    }

    /// Half-circle from `center + normal * radius` around `forward` to
    /// `center - normal * radius`
    fn cap(out: &mut Vec<Pos2>, center: Pos2, normal: Vec2, forward: Vec2, radius: f32) {
        for i in 1..CAP_SEGMENTS {
            let theta = i as f32 / CAP_SEGMENTS as f32 * PI;
            out.push(center + (normal * theta.cos() + forward * theta.sin()) * radius);
        }
    }
}

impl OutlineGenerator for FreehandOutline {
    fn outline(&self, points: &[Point], style: &StyleConfig) -> Vec<Pos2> {
        let samples = Self::filter_samples(points, style);

        let Some(first) = samples.first() else {
            return Vec::new();
        };
        if samples.len() == 1 {
            return Self::dot(first.pos, style.radius_for(first.pressure));
        }

        let n = samples.len();

        // Running distance to the end of the stroke, for the taper
        let mut to_end = vec![0.0; n];
        for i in (0..n - 1).rev() {
            to_end[i] = to_end[i + 1] + samples[i].pos.distance(samples[i + 1].pos);
        }

        let mut radii = Vec::with_capacity(n);
        let mut directions = Vec::with_capacity(n);
        for i in 0..n {
            let mut radius = style.radius_for(samples[i].pressure);
            if style.taper_end > 0.0 && to_end[i] < style.taper_end {
                radius *= to_end[i] / style.taper_end;
            }
            radii.push(radius);

            let before = samples[i.saturating_sub(1)].pos;
            let after = samples[(i + 1).min(n - 1)].pos;
            let dir = (after - before).normalized();
            directions.push(if dir.is_finite() { dir } else { Vec2::X });
        }

        let mut polygon = Vec::with_capacity(2 * n + 2 * CAP_SEGMENTS);

        // Left rail, start to end
        for i in 0..n {
            polygon.push(samples[i].pos + directions[i].rot90() * radii[i]);
        }
        let last = n - 1;
        Self::cap(
            &mut polygon,
            samples[last].pos,
            directions[last].rot90(),
            directions[last],
            radii[last],
        );

        // Right rail, end to start
        for i in (0..n).rev() {
            polygon.push(samples[i].pos - directions[i].rot90() * radii[i]);
        }
        Self::cap(
            &mut polygon,
            samples[0].pos,
            -directions[0].rot90(),
            -directions[0],
            radii[0],
        );

        polygon
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn style() -> StyleConfig {
        StyleConfig {
            size: 10.0,
            thinning: 0.6,
            streamline: 0.5,
            smoothing: 0.5,
            taper_end: 0.0,
        }
    }

    fn bounds(polygon: &[Pos2]) -> egui::Rect {
        egui::Rect::from_points(polygon)
    }

    #[test]
    fn test_empty_input_yields_empty_polygon() {
        assert!(FreehandOutline.outline(&[], &style()).is_empty());
    }

    #[test]
    fn test_single_point_is_a_dot() {
        let polygon = FreehandOutline.outline(&[Point::new(50.0, 50.0, 0.5)], &style());
        assert_eq!(polygon.len(), DOT_SEGMENTS);
        let radius = style().radius_for(0.5);
        for p in &polygon {
            assert!((p.distance(Pos2::new(50.0, 50.0)) - radius).abs() < 1e-3);
        }
    }

    #[test]
    fn test_line_outline_covers_endpoints() {
        let points = [
            Point::new(10.0, 10.0, 0.5),
            Point::new(40.0, 10.0, 0.5),
            Point::new(80.0, 10.0, 0.5),
        ];
        let polygon = FreehandOutline.outline(&points, &style());
        let rect = bounds(&polygon);
        assert!(rect.contains(Pos2::new(10.0, 10.0)));
        assert!(rect.contains(Pos2::new(80.0, 10.0)));
        // Width is bounded by the brush size
        assert!(rect.height() <= style().size + 1e-3);
    }

    #[test]
    fn test_pressure_changes_width() {
        let thin = style().radius_for(0.0);
        let thick = style().radius_for(1.0);
        assert!(thin < thick);

        let constant = StyleConfig {
            thinning: 0.0,
            ..style()
        };
        assert_eq!(constant.radius_for(0.0), constant.radius_for(1.0));
    }

    #[test]
    fn test_end_taper_narrows_the_tail() {
        let points: Vec<Point> = (0..20)
            .map(|i| Point::new(i as f32 * 10.0, 0.0, 0.5))
            .collect();
        let tapered = StyleConfig {
            taper_end: 60.0,
            ..style()
        };
        let polygon = FreehandOutline.outline(&points, &tapered);
        let tail = polygon
            .iter()
            .filter(|p| p.x > 185.0)
            .map(|p| p.y.abs())
            .fold(0.0_f32, f32::max);
        assert!(tail < tapered.radius_for(0.5));
    }

    #[test]
    fn test_style_from_surface_size() {
        let config = PadConfig::default();
        let style = StyleConfig::for_surface(800, 400, &config);
        assert_eq!(style.size, 400.0 * config.brush_fraction);
        assert_eq!(style.taper_end, config.taper_end);
    }
}
