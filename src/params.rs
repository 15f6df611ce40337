//! Command-line parameters for the `zenpgm` binary.
//!
//! Besides the file options, the command line accepts a set of erosion
//! simulation parameters. The codec never reads them; they are parsed,
//! logged and handed to whatever consumes the pixel buffer.

use std::path::PathBuf;

use clap::{Arg, ArgAction, ArgMatches, Command, value_parser};
use log::Level;

use crate::pgm::{EncodingMode, Precision};

/// Particle erosion settings carried alongside the image.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SimParams {
    /// Number of particles.
    pub n: u32,
    /// Steps each particle lives.
    pub ttl: u32,
    pub radius: u32,
    pub inertia: f64,
    pub capacity: f64,
    pub gravity: f64,
    pub evaporation: f64,
    pub erosion: f64,
    pub deposition: f64,
    pub min_slope: f64,
}

impl Default for SimParams {
    fn default() -> Self {
        SimParams {
            n: 70000,
            ttl: 30,
            radius: 2,
            inertia: 0.1,
            capacity: 10.0,
            gravity: 4.0,
            evaporation: 0.1,
            erosion: 0.1,
            deposition: 1.0,
            min_slope: 0.0001,
        }
    }
}

/// Everything the binary needs after argument parsing.
#[derive(Clone, Debug, PartialEq)]
pub struct Options {
    pub input: PathBuf,
    pub output: PathBuf,
    pub mode: EncodingMode,
    /// Output precision; `None` keeps the input's.
    pub precision: Option<Precision>,
    pub sim: SimParams,
    pub log_level: Level,
}

#[rustfmt::skip]
pub fn create_cmd_args() -> Command {
    Command::new("zenpgm")
        .about("Read a PGM heightmap and write it back as P2 or P5")
        .arg(Arg::new("file")
            .short('f')
            .long("file")
            .help("Input PGM file")
            .value_parser(value_parser!(PathBuf))
            .required(true))
        .arg(Arg::new("output")
            .short('o')
            .long("output")
            .help("Output PGM file")
            .value_parser(value_parser!(PathBuf))
            .default_value("out.pgm"))
        .arg(Arg::new("ascii")
            .short('a')
            .long("ascii")
            .action(ArgAction::SetTrue)
            .help("Write ASCII (P2) instead of binary (P5)"))
        .arg(Arg::new("precision")
            .short('p')
            .long("precision")
            .help("Output maximum sample value, 1-65535 [default: input's]")
            .value_parser(value_parser!(u32).range(1..=65535)))
        .arg(sim_arg("n", 'n', "Number of particles").value_parser(value_parser!(u32)))
        .arg(sim_arg("ttl", 't', "Particle lifetime in steps").value_parser(value_parser!(u32)))
        .arg(sim_arg("radius", 'r', "Erosion radius").value_parser(value_parser!(u32)))
        .arg(sim_arg("inertia", 'e', "Particle inertia").value_parser(value_parser!(f64)))
        .arg(sim_arg("capacity", 'c', "Sediment capacity").value_parser(value_parser!(f64)))
        .arg(sim_arg("gravity", 'g', "Gravity").value_parser(value_parser!(f64)))
        .arg(sim_arg("evaporation", 'v', "Evaporation rate").value_parser(value_parser!(f64)))
        .arg(sim_arg("erosion", 's', "Erosion rate").value_parser(value_parser!(f64)))
        .arg(sim_arg("deposition", 'd', "Deposition rate").value_parser(value_parser!(f64)))
        .arg(sim_arg("min-slope", 'm', "Minimum slope").value_parser(value_parser!(f64)))
        .arg(Arg::new("debug")
            .long("debug")
            .action(ArgAction::SetTrue)
            .help_heading("LOGGING")
            .help("Display debug information and higher"))
        .arg(Arg::new("trace")
            .long("trace")
            .action(ArgAction::SetTrue)
            .help_heading("LOGGING")
            .help("Display very verbose information"))
        .arg(Arg::new("warn")
            .long("warn")
            .action(ArgAction::SetTrue)
            .help_heading("LOGGING")
            .help("Display warnings and errors only"))
}

fn sim_arg(id: &'static str, short: char, help: &'static str) -> Arg {
    Arg::new(id)
        .short(short)
        .help(help)
        .help_heading("SIMULATION")
}

/// Turn parsed matches into [`Options`]. Absent simulation values keep
/// their [`SimParams::default`].
pub fn parse_options(matches: &ArgMatches) -> Options {
    let defaults = SimParams::default();
    let sim = SimParams {
        n: get_or(matches, "n", defaults.n),
        ttl: get_or(matches, "ttl", defaults.ttl),
        radius: get_or(matches, "radius", defaults.radius),
        inertia: get_or(matches, "inertia", defaults.inertia),
        capacity: get_or(matches, "capacity", defaults.capacity),
        gravity: get_or(matches, "gravity", defaults.gravity),
        evaporation: get_or(matches, "evaporation", defaults.evaporation),
        erosion: get_or(matches, "erosion", defaults.erosion),
        deposition: get_or(matches, "deposition", defaults.deposition),
        min_slope: get_or(matches, "min-slope", defaults.min_slope),
    };

    let mode = if matches.get_flag("ascii") {
        EncodingMode::Ascii
    } else {
        EncodingMode::Binary
    };

    let log_level = if matches.get_flag("trace") {
        Level::Trace
    } else if matches.get_flag("debug") {
        Level::Debug
    } else if matches.get_flag("warn") {
        Level::Warn
    } else {
        Level::Info
    };

    Options {
        // required, clap has already rejected the command line without it
        input: matches.get_one::<PathBuf>("file").cloned().unwrap_or_default(),
        output: matches
            .get_one::<PathBuf>("output")
            .cloned()
            .unwrap_or_else(|| PathBuf::from("out.pgm")),
        mode,
        precision: matches
            .get_one::<u32>("precision")
            .and_then(|&p| Precision::new(p)),
        sim,
        log_level,
    }
}

fn get_or<T: Clone + Send + Sync + 'static>(matches: &ArgMatches, id: &str, default: T) -> T {
    matches.get_one::<T>(id).cloned().unwrap_or(default)
}
