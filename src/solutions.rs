//! Solutions implemented for Advent of Code 2023.
//!
//! This module provides [`run_day`] to run a solution by its day. Each submodule implements
//! [`SolutionRunner`] for [`AdventOfCode2023<DAY>`] with its day.

#![warn(clippy::dbg_macro, clippy::print_stderr, clippy::print_stdout)]

use aoc_framework::DynamicResult;
use aoc_framework::runner::{OutputHandler, SolutionRunner};
use thiserror::Error;

mod day05;
mod day07;

/// A structure collecting solutions by day.
struct AdventOfCode2023<const DAY: u8>;

/// A solution for a day is not available.
#[derive(Error, Debug)]
#[error("no solution available for day {0}")]
pub struct DayNotAvailable(u8);

/// Run a solution based on the day.
///
/// # Errors
///
/// If the solution for the given day is not available, a [`DayNotAvailable`] error is returned.
///
/// Any dynamically dispatched error from running the solution is propagated.
pub fn run_day(day: u8, input: &str, handler: &mut dyn OutputHandler) -> DynamicResult<()> {
    match day {
        5 => AdventOfCode2023::<5>::run(input, handler),
        7 => AdventOfCode2023::<7>::run(input, handler),
        _ => Err(DayNotAvailable(day).into()),
    }
}
