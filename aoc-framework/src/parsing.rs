//! Utility functions and errors for parsing input.

use std::iter::{Enumerate, Peekable};
use std::str::{FromStr, Lines};

use thiserror::Error;

use crate::DynamicError;

/// A string parsing error with context of the string that was being parsed.
#[derive(Error, Debug)]
#[error("failed to parse string: {string:?}")]
pub struct ParseContextError<E>
where
    E: std::error::Error,
{
    /// The string that was being parsed.
    string: String,
    source: E,
}

/// Parse a string slice into another type.
///
/// This wraps [`str::parse`] and maps errors to [`ParseContextError`].
///
/// # Errors
///
/// Will return a [`ParseContextError`] with the given string as context and
/// [`F::Err`][FromStr::Err] as the source if it's not possible to parse the string into the desired
/// type.
pub fn parse_with_context<F>(string: &str) -> Result<F, ParseContextError<F::Err>>
where
    F: FromStr,
    F::Err: std::error::Error,
{
    string.parse::<F>().map_err(|source| ParseContextError {
        string: string.to_string(),
        source,
    })
}

/// A line in an input string caused a parsing error.
#[derive(Error, Debug)]
#[error("failure parsing line {}", .line_index.saturating_add(1))]
pub struct InvalidLine {
    /// The line index, zero based.
    /// This will be formatted to a one-based number for display.
    line_index: usize,
    source: DynamicError,
}

impl InvalidLine {
    fn new<E: Into<DynamicError>>(line_index: usize, source: E) -> Self {
        Self {
            line_index,
            source: source.into(),
        }
    }

    /// The zero based index of the line that failed.
    #[must_use]
    pub fn line_index(&self) -> usize {
        self.line_index
    }
}

/// Parse every line of input with a closure, mapping any line's error into an [`InvalidLine`].
///
/// The closure is passed the zero based line index and the line.
///
/// ```
/// use aoc_framework::parsing::{parse_input_lines, parse_with_context};
///
/// let bids: Vec<u32> = parse_input_lines("765\n28\n", |_, line| parse_with_context(line))
///     .collect::<Result<_, _>>()
///     .unwrap();
/// assert_eq!(bids, [765, 28]);
/// ```
pub fn parse_input_lines<T, E, F>(
    input: &str,
    mut parser: F,
) -> impl Iterator<Item = Result<T, InvalidLine>>
where
    E: Into<DynamicError>,
    F: FnMut(usize, &str) -> Result<T, E>,
{
    input
        .lines()
        .enumerate()
        .map(move |(index, line)| parser(index, line).map_err(|e| InvalidLine::new(index, e)))
}

/// A cursor over input lines, for input made of blocks separated by blank lines.
///
/// A "sequence" is a run of consecutive non-blank lines; a blank line (or the end of input) ends
/// it.
///
/// ```
/// use aoc_framework::parsing::{InputScanner, parse_with_context};
///
/// let mut scanner = InputScanner::new("header\n1\n2\n\nnext\n");
/// let header = scanner.next_item(|_, line| -> Result<_, std::fmt::Error> { Ok(line.len()) });
/// assert_eq!(header.unwrap(), Some(6));
///
/// let numbers: Vec<u8> = scanner.collect_sequence(|_, line| parse_with_context(line)).unwrap();
/// assert_eq!(numbers, [1, 2]);
///
/// let next = scanner.next_item(|_, line| -> Result<_, std::fmt::Error> { Ok(line.to_owned()) });
/// assert_eq!(next.unwrap().as_deref(), Some("next"));
/// ```
pub struct InputScanner<'a> {
    lines: Peekable<Enumerate<Lines<'a>>>,
}

impl<'a> InputScanner<'a> {
    /// Create a scanner positioned at the first line of input.
    #[must_use]
    pub fn new(input: &'a str) -> Self {
        Self {
            lines: input.lines().enumerate().peekable(),
        }
    }

    fn is_blank(line: &str) -> bool {
        line.trim().is_empty()
    }

    /// Parse the next line of the current sequence.
    ///
    /// Returns `None` when the next line is blank or input is exhausted; the blank line is left
    /// in place.
    ///
    /// # Errors
    ///
    /// An error from the parser is returned as an [`InvalidLine`].
    pub fn next_in_sequence<T, E, F>(&mut self, parser: F) -> Result<Option<T>, InvalidLine>
    where
        E: Into<DynamicError>,
        F: FnOnce(usize, &str) -> Result<T, E>,
    {
        let Some((index, line)) = self.lines.next_if(|(_, line)| !Self::is_blank(line)) else {
            return Ok(None);
        };
        parser(index, line)
            .map(Some)
            .map_err(|e| InvalidLine::new(index, e))
    }

    /// Skip any blank lines, then parse the next line.
    ///
    /// Returns `None` if input is exhausted before a non-blank line.
    ///
    /// # Errors
    ///
    /// An error from the parser is returned as an [`InvalidLine`].
    pub fn next_item<T, E, F>(&mut self, parser: F) -> Result<Option<T>, InvalidLine>
    where
        E: Into<DynamicError>,
        F: FnOnce(usize, &str) -> Result<T, E>,
    {
        while self.lines.next_if(|(_, line)| Self::is_blank(line)).is_some() {}
        self.next_in_sequence(parser)
    }

    /// Parse the remaining lines of the current sequence.
    ///
    /// # Errors
    ///
    /// The first error from the parser is returned as an [`InvalidLine`].
    pub fn collect_sequence<T, E, F>(&mut self, mut parser: F) -> Result<Vec<T>, InvalidLine>
    where
        E: Into<DynamicError>,
        F: FnMut(usize, &str) -> Result<T, E>,
    {
        let mut items = Vec::new();
        while let Some(item) = self.next_in_sequence(&mut parser)? {
            items.push(item);
        }
        Ok(items)
    }

    /// Whether any non-blank line remains.
    pub fn has_remaining(&mut self) -> bool {
        while self.lines.next_if(|(_, line)| Self::is_blank(line)).is_some() {}
        self.lines.peek().is_some()
    }
}
