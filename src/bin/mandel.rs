// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Renders a single frame of the Mandelbrot set and writes it out.

extern crate clap;
extern crate mandelbrot;
extern crate num_cpus;

use clap::{App, Arg, ArgMatches};
use log::{error, info};
use mandelbrot::export::write_image;
use mandelbrot::parse::{
    parse_complex, parse_pair, validate_pair, validate_positive, validate_range,
};
use mandelbrot::{RenderConfig, RenderScheduler, ViewportState};
use std::str::FromStr;

const OUTPUT: &str = "output";
const SIZE: &str = "size";
const CENTER: &str = "center";
const ZOOM: &str = "zoom";
const THREADS: &str = "threads";
const ITERATIONS: &str = "iterations";

const DEFAULT_OUTPUTS: [&str; 2] = ["mandelbrot.png", "mandelbrot.bmp"];

fn args<'a>() -> ArgMatches<'a> {
    let max_threads = num_cpus::get();

    App::new("mandel")
        .version("0.1.0")
        .author("Elf M. Sternberg <elf.sternberg@gmail.com>")
        .about("Mandelbrot set renderer")
        .arg(
            Arg::with_name(OUTPUT)
                .required(false)
                .long(OUTPUT)
                .short("o")
                .takes_value(true)
                .multiple(true)
                .number_of_values(1)
                .help("Output file; .png, .bmp or .ppm. May be repeated [default: mandelbrot.png and mandelbrot.bmp]"),
        )
        .arg(
            Arg::with_name(SIZE)
                .required(false)
                .long(SIZE)
                .short("s")
                .takes_value(true)
                .default_value("800x600")
                .validator(|s| validate_pair::<u16>(&s, 'x', "Could not parse output image size"))
                .help("Size of output image"),
        )
        .arg(
            Arg::with_name(CENTER)
                .required(false)
                .long(CENTER)
                .short("c")
                .takes_value(true)
                .default_value("0,0")
                .allow_hyphen_values(true)
                .validator(|s| validate_pair::<f64>(&s, ',', "Could not parse centre point"))
                .help("Point of the complex plane at the centre of the image"),
        )
        .arg(
            Arg::with_name(ZOOM)
                .required(false)
                .long(ZOOM)
                .short("z")
                .takes_value(true)
                .default_value("1")
                .validator(|s| validate_positive(&s, "Zoom must be a positive number"))
                .help("Magnification; 1 shows -2..2 across the image"),
        )
        .arg(
            Arg::with_name(THREADS)
                .required(false)
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
                .required(false)
                .long(ITERATIONS)
                .short("i")
                .takes_value(true)
                .default_value("1000")
                .validator(move |s| {
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
        .get_matches()
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let matches = args();
    let (width, height) = parse_pair::<usize>(matches.value_of(SIZE).unwrap(), 'x')
        .expect("Error parsing image dimensions");
    let center =
        parse_complex(matches.value_of(CENTER).unwrap()).expect("Error parsing centre point");
    let zoom = f64::from_str(matches.value_of(ZOOM).unwrap()).expect("Error parsing zoom");
    let iterations = usize::from_str(matches.value_of(ITERATIONS).unwrap())
        .expect("Could not parse iteration count.");
    let threads = matches
        .value_of(THREADS)
        .map(|t| usize::from_str(t).expect("Could not parse thread count."))
        .unwrap_or_else(num_cpus::get);
    let outputs: Vec<&str> = match matches.values_of(OUTPUT) {
        Some(values) => values.collect(),
        None => DEFAULT_OUTPUTS.to_vec(),
    };

    let config = RenderConfig::still()
        .with_size(width, height)
        .with_max_iterations(iterations)
        .with_threads(threads);
    let scheduler = match RenderScheduler::new(config) {
        Ok(scheduler) => scheduler,
        Err(e) => {
            eprintln!("Render failure: {}", e);
            std::process::exit(1);
        }
    };

    info!(
        "rendering {}x{}, {} iterations, {} threads",
        width, height, iterations, config.threads
    );
    match scheduler.render_frame(ViewportState::new(zoom, center)) {
        Err(e) => {
            eprintln!("Render failure: {}", e);
            std::process::exit(1);
        }
        Ok(frame) => {
            for output in outputs {
                if let Err(e) = write_image(output, &frame) {
                    error!("{}", e);
                    eprintln!("Write failure: {}", e);
                    std::process::exit(1);
                }
                println!("Mandelbrot set image saved as {}", output);
            }
        }
    }
}
