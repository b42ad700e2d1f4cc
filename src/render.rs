//! Rasterization of trajectories to labeled training images.
//!
//! Trajectories are drawn at native canvas resolution (one canvas unit per
//! pixel) as a thick polyline on a white background, with attractor bodies
//! as filled circles, then downsampled to the small square size the dataset
//! uses. Canvas y points up while image rows grow downward, so y is flipped
//! at rasterization time.

use crate::config::{CanvasBounds, RenderConfig};
use crate::forces::Body;
use image::imageops::{self, FilterType};
use image::{Rgb, RgbImage};
use nalgebra::Vector2;

const BACKGROUND: Rgb<u8> = Rgb([255, 255, 255]);
const STROKE: Rgb<u8> = Rgb([0, 0, 0]);
const BODY_FILL: Rgb<u8> = Rgb([230, 195, 40]);

/// Spacing between stamped discs along a segment, in pixels
const STAMP_SPACING: f64 = 0.5;

/// Render one trajectory (and the attractor bodies) at canvas resolution
///
/// Bodies are drawn first so the trajectory passes over them. Points outside
/// the canvas simply clip at the image edges. An empty trajectory yields a
/// blank canvas (plus bodies, if enabled).
pub fn render_trajectory(
    points: &[Vector2<f64>],
    bodies: &[Body],
    bounds: &CanvasBounds,
    config: &RenderConfig,
) -> RgbImage {
    let width = bounds.width.round().max(1.0) as u32;
    let height = bounds.height.round().max(1.0) as u32;
    let mut img = RgbImage::from_pixel(width, height, BACKGROUND);

    if config.draw_bodies {
        for body in bodies {
            let (cx, cy) = to_pixel(&body.position, bounds);
            // Reference rendering: circle radius is a tenth of the mass.
            stamp_disc(&mut img, cx, cy, 0.1 * body.mass, BODY_FILL);
        }
    }

    let radius = config.stroke_width / 2.0;
    match points {
        [] => {}
        [only] => {
            let (cx, cy) = to_pixel(only, bounds);
            stamp_disc(&mut img, cx, cy, radius, STROKE);
        }
        _ => {
            for pair in points.windows(2) {
                stamp_segment(&mut img, &pair[0], &pair[1], bounds, radius);
            }
        }
    }

    img
}

/// Downsample to a square image with a high-quality resampling filter
pub fn downsample(img: &RgbImage, size: u32) -> RgbImage {
    imageops::resize(img, size, size, FilterType::Lanczos3)
}

fn to_pixel(p: &Vector2<f64>, bounds: &CanvasBounds) -> (f64, f64) {
    (p.x, bounds.height - p.y)
}

/// Draw a thick line by stamping overlapping discs along the segment
fn stamp_segment(
    img: &mut RgbImage,
    a: &Vector2<f64>,
    b: &Vector2<f64>,
    bounds: &CanvasBounds,
    radius: f64,
) {
    let (ax, ay) = to_pixel(a, bounds);
    let (bx, by) = to_pixel(b, bounds);
    let len = ((bx - ax).powi(2) + (by - ay).powi(2)).sqrt();
    let steps = (len / STAMP_SPACING).ceil().max(1.0) as usize;
    for k in 0..=steps {
        let t = k as f64 / steps as f64;
        stamp_disc(
            img,
            ax + t * (bx - ax),
            ay + t * (by - ay),
            radius,
            STROKE,
        );
    }
}

/// Fill every pixel whose center lies within `radius` of (cx, cy)
fn stamp_disc(img: &mut RgbImage, cx: f64, cy: f64, radius: f64, color: Rgb<u8>) {
    let (w, h) = img.dimensions();
    let x_min = ((cx - radius).floor() as i64).max(0);
    let x_max = ((cx + radius).ceil() as i64).min(w as i64 - 1);
    let y_min = ((cy - radius).floor() as i64).max(0);
    let y_max = ((cy + radius).ceil() as i64).min(h as i64 - 1);
    let r2 = radius * radius;

    for py in y_min..=y_max {
        for px in x_min..=x_max {
            let dx = px as f64 + 0.5 - cx;
            let dy = py as f64 + 0.5 - cy;
            if dx * dx + dy * dy <= r2 {
                img.put_pixel(px as u32, py as u32, color);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn count_pixels(img: &RgbImage, color: Rgb<u8>) -> usize {
        img.pixels().filter(|p| **p == color).count()
    }

    #[test]
    fn test_canvas_dimensions_match_bounds() {
        let bounds = CanvasBounds::new(500.0, 400.0);
        let img = render_trajectory(&[], &[], &bounds, &RenderConfig::default());
        assert_eq!(img.dimensions(), (500, 400));
    }

    #[test]
    fn test_empty_trajectory_is_blank() {
        let bounds = CanvasBounds::new(100.0, 100.0);
        let img = render_trajectory(&[], &[], &bounds, &RenderConfig::default());
        assert_eq!(count_pixels(&img, BACKGROUND), 100 * 100);
    }

    #[test]
    fn test_trajectory_darkens_pixels() {
        let bounds = CanvasBounds::new(100.0, 100.0);
        let points = vec![Vector2::new(10.0, 50.0), Vector2::new(90.0, 50.0)];
        let img = render_trajectory(&points, &[], &bounds, &RenderConfig::default());
        assert!(count_pixels(&img, STROKE) > 0);
    }

    #[test]
    fn test_y_axis_is_flipped() {
        // A point near the canvas top must land near the image's first rows.
        let bounds = CanvasBounds::new(100.0, 100.0);
        let mut config = RenderConfig::default();
        config.stroke_width = 4.0;
        let points = vec![Vector2::new(50.0, 95.0)];
        let img = render_trajectory(&points, &[], &bounds, &config);

        assert_eq!(*img.get_pixel(50, 5), STROKE);
        assert_eq!(*img.get_pixel(50, 95), BACKGROUND);
    }

    #[test]
    fn test_bodies_drawn_as_filled_circles() {
        let bounds = CanvasBounds::new(100.0, 100.0);
        let bodies = [Body::new(Vector2::new(50.0, 50.0), 100.0)];
        let img = render_trajectory(&[], &bodies, &bounds, &RenderConfig::default());
        // Radius 10 disc centered mid-canvas
        assert_eq!(*img.get_pixel(50, 50), BODY_FILL);
        assert_eq!(*img.get_pixel(50, 42), BODY_FILL);
        assert_eq!(*img.get_pixel(50, 30), BACKGROUND);
    }

    #[test]
    fn test_bodies_can_be_hidden() {
        let bounds = CanvasBounds::new(100.0, 100.0);
        let bodies = [Body::new(Vector2::new(50.0, 50.0), 100.0)];
        let mut config = RenderConfig::default();
        config.draw_bodies = false;
        let img = render_trajectory(&[], &bodies, &bounds, &config);
        assert_eq!(count_pixels(&img, BACKGROUND), 100 * 100);
    }

    #[test]
    fn test_out_of_bounds_points_clip() {
        let bounds = CanvasBounds::new(100.0, 100.0);
        let points = vec![Vector2::new(90.0, 50.0), Vector2::new(140.0, 50.0)];
        let img = render_trajectory(&points, &[], &bounds, &RenderConfig::default());
        assert!(count_pixels(&img, STROKE) > 0);
    }

    #[test]
    fn test_downsample_size() {
        let bounds = CanvasBounds::new(500.0, 500.0);
        let points = vec![Vector2::new(0.0, 250.0), Vector2::new(500.0, 250.0)];
        let img = render_trajectory(&points, &[], &bounds, &RenderConfig::default());
        let small = downsample(&img, 28);
        assert_eq!(small.dimensions(), (28, 28));
        // The stroke must survive resampling as non-white pixels
        assert!(small.pixels().any(|p| *p != BACKGROUND));
    }
}
