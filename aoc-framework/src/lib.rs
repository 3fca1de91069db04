//! Traits and utilities shared by the daily puzzle solutions.
//!
//! A day is solved in two steps: its input string is parsed once into a data type implementing
//! [`ParseData`], then each part implementing [`Solution`] solves from a reference to that data.
//!
//! ```
//! use aoc_framework::{DynamicResult, ParseData, PartOne, PartTwo, Solution};
//!
//! struct Bids(Vec<u32>);
//!
//! impl ParseData for Bids {
//!     fn parse(input: &str) -> DynamicResult<Self> {
//!         let bids = input
//!             .lines()
//!             .map(str::parse)
//!             .collect::<Result<_, _>>()?;
//!         Ok(Self(bids))
//!     }
//! }
//!
//! struct Winnings;
//!
//! impl Solution<PartOne> for Winnings {
//!     type Input = Bids;
//!     type Output = u32;
//!
//!     fn solve(input: &Bids) -> DynamicResult<u32> {
//!         Ok(input.0.iter().sum())
//!     }
//! }
//!
//! impl Solution<PartTwo> for Winnings {
//!     type Input = Bids;
//!     type Output = u32;
//!
//!     fn solve(input: &Bids) -> DynamicResult<u32> {
//!         Ok(input.0.iter().copied().max().unwrap_or(0))
//!     }
//! }
//!
//! let bids = Bids::parse("765\n684\n28").unwrap();
//! assert_eq!(<Winnings as Solution<PartOne>>::solve(&bids).unwrap(), 1477);
//! assert_eq!(<Winnings as Solution<PartTwo>>::solve(&bids).unwrap(), 765);
//! ```
//!
//! The [`runner`] module drives both steps and reports through an
//! [`OutputHandler`][runner::OutputHandler].

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
#![deny(
    clippy::expect_used,
    clippy::print_stderr,
    clippy::print_stdout,
    clippy::unwrap_used
)]

use std::error::Error;
use std::fmt::Display;

pub mod parsing;
pub mod runner;

mod private {
    /// Sealing trait, so only this crate defines [`Part`][super::Part] markers.
    pub trait Sealed {}
}

/// A dynamically dispatched error, wrapped in a [`Box`].
pub type DynamicError = Box<dyn Error + Send + Sync + 'static>;
/// A result that can return a [`DynamicError`] as an error.
pub type DynamicResult<T> = Result<T, DynamicError>;

/// Identifies which of the two answers of a day is being produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PartKind {
    One,
    Two,
}

impl Display for PartKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::One => write!(f, "Part 1"),
            Self::Two => write!(f, "Part 2"),
        }
    }
}

/// A marker for the part a [`Solution`] solves.
pub trait Part: private::Sealed {
    /// Get the related [`PartKind`] for this part.
    fn kind() -> PartKind;
}

/// Marks a [`Solution`] for the first answer.
pub struct PartOne;
impl private::Sealed for PartOne {}
impl Part for PartOne {
    fn kind() -> PartKind {
        PartKind::One
    }
}

/// Marks a [`Solution`] for the second answer.
pub struct PartTwo;
impl private::Sealed for PartTwo {}
impl Part for PartTwo {
    fn kind() -> PartKind {
        PartKind::Two
    }
}

/// A solver for one [`Part`] of a day.
pub trait Solution<P: Part> {
    /// The parsed data the solution reads from.
    type Input: ?Sized;

    /// The answer type, printed once solved.
    type Output: Display;

    /// Solve with the given input.
    ///
    /// # Errors
    ///
    /// Invalid input detected while solving (or arithmetic overflow) is returned as a dynamically
    /// dispatched error.
    fn solve(input: &Self::Input) -> DynamicResult<Self::Output>;
}

/// A data structure created by parsing a day's input string.
pub trait ParseData {
    /// Parse an input string into an instance of self.
    ///
    /// # Errors
    ///
    /// If parsing fails, the resulting error is returned as a dynamically dispatched error.
    fn parse(input: &str) -> DynamicResult<Self>
    where
        Self: Sized;
}
