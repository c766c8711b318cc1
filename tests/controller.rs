// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

extern crate crossbeam;
extern crate mandelbrot;

use std::time::Duration;

use crossbeam::channel::{unbounded, Sender};
use mandelbrot::{
    FrontBuffer, InputEvent, PixelBuffer, RedrawController, RedrawSettings, RenderConfig,
    RenderScheduler, ViewportState,
};

const DEBOUNCE: Duration = Duration::from_millis(150);

fn scheduler() -> RenderScheduler {
    RenderScheduler::new(
        RenderConfig::window()
            .with_size(32, 20)
            .with_max_iterations(50)
            .with_threads(2),
    )
    .unwrap()
}

fn settings() -> RedrawSettings {
    RedrawSettings::default().with_debounce(DEBOUNCE)
}

fn recorder(sink: Sender<ViewportState>) -> impl FnMut(&PixelBuffer, &ViewportState) + Send {
    move |_: &PixelBuffer, viewport: &ViewportState| {
        sink.send(*viewport).unwrap();
    }
}

#[test]
fn burst_of_pans_renders_once_with_the_last_viewport() {
    let (sink, frames) = unbounded();
    let handle = RedrawController::new(scheduler(), recorder(sink))
        .with_settings(settings())
        .spawn()
        .unwrap();

    for _ in 0..10 {
        assert!(handle.send(InputEvent::PanRight));
    }

    let shown = frames.recv_timeout(Duration::from_secs(10)).unwrap();
    assert!((shown.center.re - 1.0).abs() < 1e-9);
    assert_eq!(shown.zoom, 1.0);

    // Nothing else was pending, so nothing else gets drawn.
    assert!(frames.recv_timeout(DEBOUNCE * 4).is_err());

    let last = handle.quit().unwrap();
    assert_eq!(last, shown);
}

#[test]
fn nothing_renders_without_input() {
    let (sink, frames) = unbounded();
    let handle = RedrawController::new(scheduler(), recorder(sink))
        .with_settings(settings())
        .spawn()
        .unwrap();
    assert!(frames.recv_timeout(DEBOUNCE * 3).is_err());
    assert_eq!(handle.quit().unwrap(), ViewportState::default());
}

#[test]
fn first_frame_can_be_drawn_on_start() {
    let (sink, frames) = unbounded();
    let start = ViewportState::new(3.0, num::Complex::new(-0.5, 0.0));
    let handle = RedrawController::new(scheduler(), recorder(sink))
        .with_settings(RedrawSettings::default())
        .with_viewport(start)
        .render_on_start()
        .spawn()
        .unwrap();
    // The default debounce is a full second; the first frame must not wait for it.
    assert_eq!(frames.recv_timeout(Duration::from_millis(900)).unwrap(), start);
    handle.quit().unwrap();
}

#[test]
fn separate_bursts_render_separately() {
    let (sink, frames) = unbounded();
    let handle = RedrawController::new(scheduler(), recorder(sink))
        .with_settings(settings())
        .spawn()
        .unwrap();

    handle.send(InputEvent::ZoomIn);
    let first = frames.recv_timeout(Duration::from_secs(10)).unwrap();
    assert!((first.zoom - 1.1).abs() < 1e-12);

    handle.send(InputEvent::ZoomOut);
    handle.send(InputEvent::ZoomOut);
    let second = frames.recv_timeout(Duration::from_secs(10)).unwrap();
    assert!((second.zoom - 1.0 / 1.1).abs() < 1e-12);

    handle.quit().unwrap();
}

#[test]
fn front_buffer_holds_only_completed_frames() {
    let front = FrontBuffer::new();
    let handle = RedrawController::new(scheduler(), front.clone())
        .with_settings(settings())
        .spawn()
        .unwrap();
    assert!(front.latest().is_none());

    handle.send(InputEvent::PanDown);
    let deadline = std::time::Instant::now() + Duration::from_secs(10);
    while front.latest().is_none() && std::time::Instant::now() < deadline {
        std::thread::sleep(Duration::from_millis(10));
    }
    let frame = front.latest().expect("a frame was published");
    assert_eq!(frame.pixels, scheduler().render_frame(frame.viewport).unwrap());
    handle.quit().unwrap();
}

#[test]
fn quit_stops_the_controller() {
    let (sink, _frames) = unbounded();
    let handle = RedrawController::new(scheduler(), recorder(sink))
        .with_settings(settings())
        .spawn()
        .unwrap();
    handle.send(InputEvent::PanUp);
    let last = handle.quit().unwrap();
    assert!((last.center.im + 0.1).abs() < 1e-12);
}
