// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! An interactive Mandelbrot explorer.  Arrow keys pan, the wheel and
//! +/- zoom, Escape quits.  The window only owns input and the screen;
//! all rendering happens on the redraw controller's thread, which tells
//! the window to repaint once a frame is complete.

extern crate clap;
extern crate mandelbrot;
extern crate num_cpus;

use std::fmt::Display;
use std::str::FromStr;
use std::time::Duration;

use clap::{App, Arg, ArgMatches};
use log::{debug, error, info};
use mandelbrot::export::write_image;
use mandelbrot::parse::{
    parse_complex, parse_pair, validate_pair, validate_positive, validate_range,
};
use mandelbrot::{
    FrontBuffer, InputEvent, PixelBuffer, Presenter, RedrawController, RedrawSettings,
    RenderConfig, RenderScheduler, ViewportState,
};
use pixels::{Pixels, SurfaceTexture};
use winit::dpi::PhysicalSize;
use winit::event::{
    ElementState, Event, KeyboardInput, MouseScrollDelta, StartCause, VirtualKeyCode, WindowEvent,
};
use winit::event_loop::{ControlFlow, EventLoopBuilder, EventLoopProxy};
use winit::window::WindowBuilder;

const SIZE: &str = "size";
const CENTER: &str = "center";
const ZOOM: &str = "zoom";
const THREADS: &str = "threads";
const ITERATIONS: &str = "iterations";
const DEBOUNCE: &str = "debounce-ms";
const SAVE: &str = "save-on-exit";

fn args<'a>() -> ArgMatches<'a> {
    let max_threads = num_cpus::get();

    App::new("explore")
        .version("0.1.0")
        .author("Elf M. Sternberg <elf.sternberg@gmail.com>")
        .about("Interactive Mandelbrot set explorer")
        .arg(
            Arg::with_name(SIZE)
                .long(SIZE)
                .short("s")
                .takes_value(true)
                .default_value("1280x800")
                .validator(|s| validate_pair::<u16>(&s, 'x', "Could not parse window size"))
                .help("Size of the window"),
        )
        .arg(
            Arg::with_name(CENTER)
                .long(CENTER)
                .short("c")
                .takes_value(true)
                .default_value("0,0")
                .allow_hyphen_values(true)
                .validator(|s| validate_pair::<f64>(&s, ',', "Could not parse centre point"))
                .help("Starting centre of the view"),
        )
        .arg(
            Arg::with_name(ZOOM)
                .long(ZOOM)
                .short("z")
                .takes_value(true)
                .default_value("1")
                .validator(|s| validate_positive(&s, "Zoom must be a positive number"))
                .help("Starting magnification"),
        )
        .arg(
            Arg::with_name(THREADS)
                .long(THREADS)
                .short("t")
                .takes_value(true)
                .validator(move |s| {
                    validate_range(
                        &s,
                        1,
                        max_threads,
                        "Could not parse thread count",
                        &format!("Thread count must be between 1 and {}", max_threads),
                    )
                })
                .help("Number of threads to use in solver [default: all of them]"),
        )
        .arg(
            Arg::with_name(ITERATIONS)
                .long(ITERATIONS)
                .short("i")
                .takes_value(true)
                .default_value("1000")
                .validator(|s| {
                    validate_range(
                        &s,
                        1,
                        200_000,
                        "Could not parse iteration count",
                        "Iteration count must be between 1 and 200000",
                    )
                })
                .help("Iterations before a point is counted as inside the set"),
        )
        .arg(
            Arg::with_name(DEBOUNCE)
                .long(DEBOUNCE)
                .short("d")
                .takes_value(true)
                .default_value("1000")
                .validator(|s| {
                    validate_range(
                        &s,
                        0,
                        60_000,
                        "Could not parse debounce interval",
                        "Debounce must be between 0 and 60000 milliseconds",
                    )
                })
                .help("Quiet time after the last input before redrawing"),
        )
        .arg(
            Arg::with_name(SAVE)
                .long(SAVE)
                .takes_value(true)
                .help("Write the last frame shown to this file on exit"),
        )
        .get_matches()
}

fn fatal(context: &str, e: impl Display) -> ! {
    error!("{}: {}", context, e);
    eprintln!("{}: {}", context, e);
    std::process::exit(1)
}

/// Sent to the event loop when a new frame is in the front buffer.
#[derive(Copy, Clone, Debug)]
struct Repaint;

struct WindowPresenter {
    front: FrontBuffer,
    proxy: EventLoopProxy<Repaint>,
}

impl Presenter for WindowPresenter {
    fn present(&mut self, frame: &PixelBuffer, viewport: &ViewportState) {
        self.front.publish(frame, viewport);
        if self.proxy.send_event(Repaint).is_err() {
            debug!("event loop gone; frame not shown");
        }
    }
}

fn key_input(key: VirtualKeyCode) -> Option<InputEvent> {
    match key {
        VirtualKeyCode::Left => Some(InputEvent::PanLeft),
        VirtualKeyCode::Right => Some(InputEvent::PanRight),
        VirtualKeyCode::Up => Some(InputEvent::PanUp),
        VirtualKeyCode::Down => Some(InputEvent::PanDown),
        VirtualKeyCode::Equals
        | VirtualKeyCode::Plus
        | VirtualKeyCode::NumpadAdd
        | VirtualKeyCode::PageUp => Some(InputEvent::ZoomIn),
        VirtualKeyCode::Minus | VirtualKeyCode::NumpadSubtract | VirtualKeyCode::PageDown => {
            Some(InputEvent::ZoomOut)
        }
        VirtualKeyCode::Escape => Some(InputEvent::Quit),
        _ => None,
    }
}

fn wheel_input(delta: MouseScrollDelta) -> Option<InputEvent> {
    let dy = match delta {
        MouseScrollDelta::LineDelta(_, y) => f64::from(y),
        MouseScrollDelta::PixelDelta(p) => p.y,
    };
    if dy > 0.0 {
        Some(InputEvent::ZoomIn)
    } else if dy < 0.0 {
        Some(InputEvent::ZoomOut)
    } else {
        None
    }
}

fn save_last_frame(front: &FrontBuffer, path: &str) {
    match front.latest() {
        Some(frame) => match write_image(path, &frame.pixels) {
            Ok(()) => println!("Mandelbrot set image saved as {}", path),
            Err(e) => error!("{}", e),
        },
        None => info!("no frame finished; nothing saved to {}", path),
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let matches = args();
    let (width, height) = parse_pair::<usize>(matches.value_of(SIZE).unwrap(), 'x')
        .expect("Error parsing window size");
    let center =
        parse_complex(matches.value_of(CENTER).unwrap()).expect("Error parsing centre point");
    let zoom = f64::from_str(matches.value_of(ZOOM).unwrap()).expect("Error parsing zoom");
    let iterations = usize::from_str(matches.value_of(ITERATIONS).unwrap())
        .expect("Could not parse iteration count.");
    let debounce = u64::from_str(matches.value_of(DEBOUNCE).unwrap())
        .expect("Could not parse debounce interval.");
    let threads = matches
        .value_of(THREADS)
        .map(|t| usize::from_str(t).expect("Could not parse thread count."))
        .unwrap_or_else(num_cpus::get);
    let save_on_exit = matches.value_of(SAVE).map(str::to_string);

    let config = RenderConfig::window()
        .with_size(width, height)
        .with_max_iterations(iterations)
        .with_threads(threads);
    let scheduler =
        RenderScheduler::new(config).unwrap_or_else(|e| fatal("Render failure", e));
    let settings = RedrawSettings::default().with_debounce(Duration::from_millis(debounce));

    let event_loop = EventLoopBuilder::<Repaint>::with_user_event().build();
    let window = WindowBuilder::new()
        .with_title("Mandelbrot Set")
        .with_inner_size(PhysicalSize::new(width as u32, height as u32))
        .with_resizable(false)
        .build(&event_loop)
        .unwrap_or_else(|e| fatal("Could not open window", e));
    let surface = window.inner_size();
    let mut pixels = Pixels::new(
        width as u32,
        height as u32,
        SurfaceTexture::new(surface.width, surface.height, &window),
    )
    .unwrap_or_else(|e| fatal("Could not create framebuffer", e));

    let front = FrontBuffer::new();
    let presenter = WindowPresenter {
        front: front.clone(),
        proxy: event_loop.create_proxy(),
    };
    let controller = RedrawController::new(scheduler, presenter)
        .with_viewport(ViewportState::new(zoom, center))
        .with_settings(settings)
        .render_on_start()
        .spawn()
        .unwrap_or_else(|e| fatal("Could not start renderer", e));

    info!(
        "exploring {}x{}, {} iterations, {} threads",
        width, height, iterations, config.threads
    );

    event_loop.run(move |event, _, control_flow| match event {
        Event::NewEvents(StartCause::Init) => *control_flow = ControlFlow::Wait,

        Event::WindowEvent { window_id, event } if window_id == window.id() => {
            let input = match event {
                WindowEvent::CloseRequested => Some(InputEvent::Quit),
                WindowEvent::KeyboardInput {
                    input:
                        KeyboardInput {
                            state: ElementState::Pressed,
                            virtual_keycode: Some(key),
                            ..
                        },
                    ..
                } => key_input(key),
                WindowEvent::MouseWheel { delta, .. } => wheel_input(delta),
                WindowEvent::Resized(size) => {
                    if let Err(e) = pixels.resize_surface(size.width, size.height) {
                        error!("could not resize surface: {}", e);
                    }
                    window.request_redraw();
                    None
                }
                _ => None,
            };
            match input {
                Some(InputEvent::Quit) => {
                    controller.send(InputEvent::Quit);
                    if let Some(ref path) = save_on_exit {
                        save_last_frame(&front, path);
                    }
                    *control_flow = ControlFlow::Exit;
                }
                Some(input) => {
                    controller.send(input);
                }
                None => {}
            }
        }

        Event::UserEvent(Repaint) => window.request_redraw(),

        Event::RedrawRequested(window_id) if window_id == window.id() => {
            front.with_latest(|frame| frame.pixels.write_rgba(pixels.get_frame_mut()));
            if let Err(e) = pixels.render() {
                error!("could not present frame: {}", e);
                *control_flow = ControlFlow::Exit;
            }
        }

        _ => {}
    });
}
