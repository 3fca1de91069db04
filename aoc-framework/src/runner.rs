//! Functions and traits for running solutions.
//!
//! A day is made runnable by implementing [`SolutionRunner`], declared with
//! [`solution_runner!`][crate::solution_runner] with its name, parsed data and part solutions:
//!
//! ```
//! # use aoc_framework::{DynamicResult, ParseData, PartOne, PartTwo, Solution};
//! use aoc_framework::runner::solution_runner;
//!
//! struct Count(usize);
//! # impl ParseData for Count {
//! #     fn parse(input: &str) -> DynamicResult<Self> {
//! #         Ok(Self(input.lines().count()))
//! #     }
//! # }
//! struct Day;
//! # impl Solution<PartOne> for Day {
//! #     type Input = Count;
//! #     type Output = usize;
//! #     fn solve(input: &Count) -> DynamicResult<usize> { Ok(input.0) }
//! # }
//! # impl Solution<PartTwo> for Day {
//! #     type Input = Count;
//! #     type Output = usize;
//! #     fn solve(input: &Count) -> DynamicResult<usize> { Ok(input.0 * 2) }
//! # }
//!
//! solution_runner! {
//!     name = "Counting",
//!     parsed = Count,
//!     part_one = Day,
//!     part_two = Day,
//!     impl Day
//! }
//! ```

use std::fmt::Display;
use std::time::Duration;

use crate::{DynamicResult, ParseData, Part, PartKind, PartOne, PartTwo, Solution};

/// A trait for an output events handler.
///
/// Running a solution emits events through a handler, so the caller decides what is printed and
/// what is only logged.
pub trait OutputHandler {
    /// Called with the name of the solution, before anything else runs.
    fn solution_name(&mut self, name: &str);

    /// Called when parsing input is finished, with the time parsing took.
    fn parse_end(&mut self, duration: Duration);

    /// Called when a part finishes, with its answer and the time solving took.
    fn part_output(&mut self, part: PartKind, output: &dyn Display, duration: Duration);
}

/// Evaluate an expression once, returning its result with the elapsed [`Duration`].
macro_rules! measure_duration {
    ($expr:expr) => {{
        let start = ::std::time::Instant::now();
        let result = $expr;
        let elapsed = start.elapsed();
        (result, elapsed)
    }};
}

/// Run a solution part, outputting its answer through the handler.
///
/// # Errors
///
/// Any dynamically dispatched error from the solution is propagated.
fn run_part<S, P>(input: &S::Input, handler: &mut dyn OutputHandler) -> DynamicResult<()>
where
    P: Part,
    S: Solution<P>,
{
    let (result, duration) = measure_duration!(S::solve(input));
    let output = result?;
    handler.part_output(P::kind(), &output, duration);
    Ok(())
}

/// Run a solution's parse step, reporting the duration through the handler.
///
/// # Errors
///
/// Any dynamically dispatched error from parsing is propagated.
fn run_parse<D: ParseData>(input: &str, handler: &mut dyn OutputHandler) -> DynamicResult<D> {
    let (result, duration) = measure_duration!(D::parse(input));
    let parsed = result?;
    handler.parse_end(duration);
    Ok(parsed)
}

/// Parse input once into `D`, then solve part one with `S1` and part two with `S2`.
///
/// Part two does not run if part one fails.
///
/// # Errors
///
/// Any dynamically dispatched error from parsing or the solution parts is propagated.
pub fn solve_parsed_full_solution<D, S1, S2>(
    name: &str,
    input: &str,
    handler: &mut dyn OutputHandler,
) -> DynamicResult<()>
where
    D: ParseData,
    S1: Solution<PartOne, Input = D>,
    S2: Solution<PartTwo, Input = D>,
{
    handler.solution_name(name);
    let parsed = run_parse::<D>(input, handler)?;
    run_part::<S1, PartOne>(&parsed, handler)?;
    run_part::<S2, PartTwo>(&parsed, handler)
}

/// Implement [`SolutionRunner`] for a type, running [`solve_parsed_full_solution`].
///
/// - `name`: an expression evaluating to `&str`, the solution's display name.
/// - `parsed`: the [`ParseData`] type input is parsed into.
/// - `part_one` / `part_two`: the types implementing [`Solution<PartOne>`] and
///   [`Solution<PartTwo>`] for the parsed data.
/// - `impl`: the type to implement [`SolutionRunner`] for.
#[macro_export]
macro_rules! solution_runner {
    (
        name = $name:expr,
        parsed = $parsed:ty,
        part_one = $part_one:ty,
        part_two = $part_two:ty,
        impl $runner:ty $(,)?
    ) => {
        impl $crate::runner::SolutionRunner for $runner {
            fn run(
                input: &str,
                handler: &mut dyn $crate::runner::OutputHandler,
            ) -> $crate::DynamicResult<()> {
                $crate::runner::solve_parsed_full_solution::<$parsed, $part_one, $part_two>(
                    $name, input, handler,
                )
            }
        }
    };
}

pub use crate::solution_runner;

/// A solution that can be run from raw input.
pub trait SolutionRunner {
    /// Run the solution.
    ///
    /// # Errors
    ///
    /// Any dynamically dispatched error from running the solution is propagated.
    fn run(input: &str, handler: &mut dyn OutputHandler) -> DynamicResult<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Words(Vec<String>);

    impl ParseData for Words {
        fn parse(input: &str) -> DynamicResult<Self> {
            if input.trim().is_empty() {
                return Err("no words".into());
            }
            Ok(Self(input.split_whitespace().map(String::from).collect()))
        }
    }

    struct WordCount;

    impl Solution<PartOne> for WordCount {
        type Input = Words;
        type Output = usize;

        fn solve(input: &Words) -> DynamicResult<usize> {
            Ok(input.0.len())
        }
    }

    impl Solution<PartTwo> for WordCount {
        type Input = Words;
        type Output = usize;

        fn solve(input: &Words) -> DynamicResult<usize> {
            Ok(input.0.iter().map(String::len).sum())
        }
    }

    solution_runner! {
        name = "Words",
        parsed = Words,
        part_one = WordCount,
        part_two = WordCount,
        impl WordCount
    }

    #[derive(Default)]
    struct Recorder {
        events: Vec<String>,
    }

    impl OutputHandler for Recorder {
        fn solution_name(&mut self, name: &str) {
            self.events.push(format!("name {name}"));
        }

        fn parse_end(&mut self, _duration: Duration) {
            self.events.push("parsed".to_owned());
        }

        fn part_output(&mut self, part: PartKind, output: &dyn Display, _duration: Duration) {
            self.events.push(format!("{part}: {output}"));
        }
    }

    #[test]
    fn runs_parse_then_both_parts() -> DynamicResult<()> {
        let mut recorder = Recorder::default();
        solve_parsed_full_solution::<Words, WordCount, WordCount>(
            "Words",
            "five of a kind",
            &mut recorder,
        )?;
        assert_eq!(
            recorder.events,
            ["name Words", "parsed", "Part 1: 4", "Part 2: 11"]
        );
        Ok(())
    }

    #[test]
    fn declared_runner_solves_both_parts() -> DynamicResult<()> {
        let mut recorder = Recorder::default();
        WordCount::run("jokers wild", &mut recorder)?;
        assert_eq!(
            recorder.events,
            ["name Words", "parsed", "Part 1: 2", "Part 2: 10"]
        );
        Ok(())
    }

    #[test]
    fn parse_error_stops_run() {
        let mut recorder = Recorder::default();
        let result =
            solve_parsed_full_solution::<Words, WordCount, WordCount>("Words", " ", &mut recorder);
        assert!(result.is_err());
        assert_eq!(recorder.events, ["name Words"]);
    }
}
