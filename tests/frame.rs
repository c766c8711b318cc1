// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

extern crate mandelbrot;
extern crate num;

use mandelbrot::escape::{escape_time, escapes};
use mandelbrot::palette::BLACK;
use mandelbrot::{Pixel, RenderConfig, RenderScheduler, ViewportMapper, ViewportState};
use num::Complex;

fn still(threads: usize) -> RenderScheduler {
    RenderScheduler::new(RenderConfig::still().with_threads(threads)).unwrap()
}

#[test]
fn centre_of_default_still_is_inside_the_set() {
    let mapper = ViewportMapper::new(800, 600, 2.0, ViewportState::default());
    let c = mapper.pixel_to_point(&Pixel(400, 300));
    assert_eq!(c, Complex::new(0.0, 0.0));
    assert_eq!(escape_time(&c, 1000), 1000);
}

#[test]
fn corner_of_default_still_escapes() {
    let mapper = ViewportMapper::new(800, 600, 2.0, ViewportState::default());
    let c = mapper.pixel_to_point(&Pixel(0, 0));
    assert!((c.re + 2.0).abs() < 1e-9);
    assert!((c.im + 2.0).abs() < 1e-9);
    assert!(escapes(&c, 1000));
}

#[test]
fn rendered_still_has_black_heart_and_coloured_edge() {
    let frame = still(4).render_frame(ViewportState::default()).unwrap();
    assert_eq!((frame.width(), frame.height()), (800, 600));
    // Inside the set, and a fast escaper far outside it.
    assert_eq!(frame.get(Pixel(400, 300)), BLACK);
    assert_ne!(frame.get(Pixel(0, 0)), BLACK);
}

#[test]
fn partitioning_does_not_change_the_picture() {
    let config = RenderConfig::still()
        .with_size(203, 157)
        .with_max_iterations(300);
    let viewport = ViewportState::new(2.5, Complex::new(-0.745, 0.113));
    let one = RenderScheduler::new(config.with_threads(1))
        .unwrap()
        .render_frame(viewport)
        .unwrap();
    for &n in &[2, 3, 7, 16, 157, 400] {
        let many = RenderScheduler::new(config.with_threads(n))
            .unwrap()
            .render_frame(viewport)
            .unwrap();
        assert!(one == many, "{} bands differ from one", n);
    }
}

#[test]
fn each_pass_uses_only_its_own_viewport() {
    let scheduler = RenderScheduler::new(
        RenderConfig::window()
            .with_size(64, 40)
            .with_max_iterations(200),
    )
    .unwrap();
    let a = ViewportState::default();
    let b = ViewportState::new(8.0, Complex::new(-1.25, 0.0));

    let mut reused = scheduler.blank();
    scheduler.render(a, &mut reused).unwrap();
    scheduler.render(b, &mut reused).unwrap();

    assert_eq!(reused, scheduler.render_frame(b).unwrap());
    assert_ne!(reused, scheduler.render_frame(a).unwrap());
}
