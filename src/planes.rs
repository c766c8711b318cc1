// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Contains the ViewportMapper struct, which describes a relationship
//! between a rectangle on the integral plane with an origin at 0,0,
//! and a window onto the complex plane described by a centre and a
//! zoom.  The centre of the image always lands on the centre of the
//! viewport; zooming in shrinks the window around it.
use num::Complex;

/// A point on the complex plane.  `num::Complex` already gives us
/// addition, subtraction, squaring (`z * z`) and magnitude (`norm`),
/// and all of it by value.
pub type ComplexPoint = Complex<f64>;

/// Describes the x, y of a pixel in an image.  x runs left to right,
/// y runs top to bottom.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Pixel(pub usize, pub usize);

/// Which part of the plane is on screen.  This is the only long-lived
/// mutable state in the explorer, and only the redraw controller ever
/// changes it.  A render pass gets a copy.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ViewportState {
    /// Magnification; larger is closer.  Always positive, since it is
    /// only ever multiplied or divided by a positive factor.
    pub zoom: f64,
    /// The point on the plane shown at the centre of the image.
    pub center: ComplexPoint,
}

impl Default for ViewportState {
    fn default() -> Self {
        ViewportState {
            zoom: 1.0,
            center: Complex::new(0.0, 0.0),
        }
    }
}

impl ViewportState {
    /// A viewport looking at `center` with magnification `zoom`.
    pub fn new(zoom: f64, center: ComplexPoint) -> Self {
        ViewportState { zoom, center }
    }

    /// Move the centre by `(dre, dim)` plane units as seen at zoom 1;
    /// the further in we are, the smaller the actual step.
    pub fn pan(&mut self, dre: f64, dim: f64) {
        self.center += Complex::new(dre / self.zoom, dim / self.zoom);
    }

    /// Magnify by `factor`.
    pub fn zoom_in(&mut self, factor: f64) {
        self.zoom *= factor;
    }

    /// Pull back by `factor`.
    pub fn zoom_out(&mut self, factor: f64) {
        self.zoom /= factor;
    }
}

/// Maps pixels of a `width` by `height` image onto the complex plane
/// for a fixed viewport.  `half_extent` is how far from the centre
/// the left and right edges of the image lie when the zoom is one.
#[derive(Copy, Clone, Debug)]
pub struct ViewportMapper {
    width: usize,
    height: usize,
    half_extent: f64,
    viewport: ViewportState,
}

impl ViewportMapper {
    /// Constructor.  The viewport is copied in, so later changes to the
    /// caller's viewport do not leak into this mapping.
    pub fn new(width: usize, height: usize, half_extent: f64, viewport: ViewportState) -> Self {
        ViewportMapper {
            width,
            height,
            half_extent,
            viewport,
        }
    }

    /// The viewport this mapper was built for.
    pub fn viewport(&self) -> ViewportState {
        self.viewport
    }

    /// The total number of pixels in the image.
    pub fn len(&self) -> usize {
        self.width * self.height
    }

    /// Describes that the image is of a size.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    // Pixels spanned by one half-extent along each axis.
    fn span(&self) -> (f64, f64) {
        (
            0.5 * self.viewport.zoom * (self.width as f64),
            0.5 * self.viewport.zoom * (self.height as f64),
        )
    }

    /// Given a pixel on the image, return the point on the complex
    /// plane it shows.
    pub fn pixel_to_point(&self, pixel: &Pixel) -> ComplexPoint {
        let (sx, sy) = self.span();
        Complex::new(
            ((pixel.0 as f64) - (self.width as f64) / 2.0) / sx * self.half_extent
                + self.viewport.center.re,
            ((pixel.1 as f64) - (self.height as f64) / 2.0) / sy * self.half_extent
                + self.viewport.center.im,
        )
    }

    /// Given a point on the complex plane, return the pixel that shows
    /// it, or nothing if it is off the edge of the image.
    pub fn point_to_pixel(&self, point: &ComplexPoint) -> Option<Pixel> {
        let (sx, sy) = self.span();
        let left = (point.re - self.viewport.center.re) / self.half_extent * sx
            + (self.width as f64) / 2.0;
        let top = (point.im - self.viewport.center.im) / self.half_extent * sy
            + (self.height as f64) / 2.0;
        let (left, top) = (left.round(), top.round());
        if left < 0.0 || left >= (self.width as f64) || top < 0.0 || top >= (self.height as f64) {
            return None;
        }
        Some(Pixel(left as usize, top as usize))
    }

    /// The distance on the plane between two neighbouring pixels,
    /// horizontally and vertically.
    pub fn pixel_pitch(&self) -> (f64, f64) {
        let (sx, sy) = self.span();
        (self.half_extent / sx, self.half_extent / sy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn still(viewport: ViewportState) -> ViewportMapper {
        ViewportMapper::new(800, 600, 2.0, viewport)
    }

    #[test]
    fn default_viewport_is_unit_zoom_at_origin() {
        let vp = ViewportState::default();
        assert_eq!(vp.zoom, 1.0);
        assert_eq!(vp.center, Complex::new(0.0, 0.0));
    }

    #[test]
    fn image_centre_maps_to_viewport_centre() {
        let pm = still(ViewportState::default());
        assert_eq!(pm.pixel_to_point(&Pixel(400, 300)), Complex::new(0.0, 0.0));

        let pm = ViewportMapper::new(1280, 800, 1.0, ViewportState::default());
        assert_eq!(pm.pixel_to_point(&Pixel(640, 400)), Complex::new(0.0, 0.0));

        let moved = ViewportState::new(3.0, Complex::new(-0.75, 0.1));
        let pm = still(moved);
        assert_eq!(pm.pixel_to_point(&Pixel(400, 300)), Complex::new(-0.75, 0.1));
    }

    #[test]
    fn top_left_of_still_image_is_minus_two() {
        let pm = still(ViewportState::default());
        let p = pm.pixel_to_point(&Pixel(0, 0));
        assert!((p.re + 2.0).abs() < 1e-12);
        assert!((p.im + 2.0).abs() < 1e-12);
    }

    #[test]
    fn unit_half_extent_matches_plain_formula() {
        let pm = ViewportMapper::new(1280, 800, 1.0, ViewportState::default());
        let p = pm.pixel_to_point(&Pixel(0, 0));
        assert_eq!(p, Complex::new(-1.0, -1.0));
        let p = pm.pixel_to_point(&Pixel(960, 600));
        assert_eq!(p, Complex::new(0.5, 0.5));
    }

    #[test]
    fn doubling_zoom_halves_pixel_pitch() {
        let near = still(ViewportState::new(2.0, Complex::new(0.0, 0.0)));
        let far = still(ViewportState::default());
        let (fx, fy) = far.pixel_pitch();
        let (nx, ny) = near.pixel_pitch();
        assert!((nx - fx / 2.0).abs() < 1e-15);
        assert!((ny - fy / 2.0).abs() < 1e-15);

        let a = near.pixel_to_point(&Pixel(10, 10));
        let b = near.pixel_to_point(&Pixel(11, 11));
        assert!(((b.re - a.re) - nx).abs() < 1e-12);
        assert!(((b.im - a.im) - ny).abs() < 1e-12);
    }

    #[test]
    fn point_to_pixel_inverts_pixel_to_point() {
        let pm = still(ViewportState::new(1.5, Complex::new(-0.5, 0.25)));
        for &pixel in &[Pixel(0, 0), Pixel(400, 300), Pixel(799, 599), Pixel(123, 456)] {
            let point = pm.pixel_to_point(&pixel);
            assert_eq!(pm.point_to_pixel(&point), Some(pixel));
        }
    }

    #[test]
    fn point_to_pixel_rejects_points_off_the_image() {
        let pm = still(ViewportState::default());
        assert_eq!(pm.point_to_pixel(&Complex::new(3.0, 0.0)), None);
        assert_eq!(pm.point_to_pixel(&Complex::new(0.0, -2.5)), None);
    }

    #[test]
    fn pan_step_shrinks_with_zoom() {
        let mut vp = ViewportState::default();
        vp.pan(0.1, 0.0);
        assert!((vp.center.re - 0.1).abs() < 1e-15);
        vp.zoom_in(2.0);
        vp.pan(0.0, -0.1);
        assert!((vp.center.im + 0.05).abs() < 1e-15);
        vp.zoom_out(2.0);
        assert_eq!(vp.zoom, 1.0);
    }
}
