#![warn(clippy::pedantic)]
#![warn(
    clippy::allow_attributes,
    clippy::allow_attributes_without_reason,
    clippy::branches_sharing_code,
    clippy::collection_is_never_read,
    clippy::equatable_if_let,
    clippy::needless_collect,
    clippy::needless_pass_by_ref_mut,
    clippy::option_if_let_else,
    clippy::suboptimal_flops,
    clippy::trait_duplication_in_bounds,
    clippy::type_repetition_in_bounds,
    clippy::use_self,
    clippy::useless_let_if_seq
)]
#![deny(clippy::unwrap_used)]

use std::fmt::Display;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Error, Result};
use aoc_framework::PartKind;
use aoc_framework::runner::OutputHandler;
use clap::Parser;
use tracing::level_filters::LevelFilter;

mod solutions;

/// Advent of Code 2023 solver for the seed almanac (day 5) and camel cards (day 7).
///
/// Prints the answers of part 1 and part 2, one per line.
#[derive(Parser, Debug)]
struct Cli {
    /// The day's solution to run (5 or 7).
    day: u8,

    /// The input file to read, instead of `inputs/dayNN.txt`.
    input: Option<PathBuf>,
}

/// Read the default input file for a day to a string.
fn get_default_input(day: u8) -> Result<String> {
    let filename = format!("day{day:02}.txt");
    let path = PathBuf::from("inputs").join(filename);

    fs::read_to_string(&path).with_context(|| {
        format!(
            "default input file missing: {}\n\n\
            please create the file or provide the input file argument",
            path.display()
        )
    })
}

/// Read the given input file to a string.
fn get_input(input_file: &Path) -> Result<String> {
    fs::read_to_string(input_file)
        .with_context(|| format!("could not read input file at: {}", input_file.display()))
}

/// Prints part answers to stdout; everything else goes to the log.
struct CliOutputHandler;

impl OutputHandler for CliOutputHandler {
    fn solution_name(&mut self, name: &str) {
        tracing::info!(name, "running solution");
    }

    fn parse_end(&mut self, duration: Duration) {
        tracing::debug!(?duration, "input parsed");
    }

    fn part_output(&mut self, part: PartKind, output: &dyn Display, duration: Duration) {
        tracing::debug!(%part, ?duration, "part solved");
        println!("{output}");
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(LevelFilter::WARN)
        .init();

    let args = Cli::parse();
    let input_str = args.input.map_or_else(
        || get_default_input(args.day),
        |input_file| get_input(&input_file),
    )?;
    solutions::run_day(args.day, &input_str, &mut CliOutputHandler).map_err(|dyn_error| {
        let anyhow_error = Error::from_boxed(dyn_error);
        anyhow_error.context(format!("failed to run solution for day {}", args.day))
    })
}
