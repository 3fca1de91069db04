use std::ops::Range;

use aoc_framework::parsing::{InputScanner, parse_with_context};
use aoc_framework::runner::solution_runner;
use aoc_framework::{DynamicResult, ParseData, PartOne, PartTwo, Solution};

solution_runner! {
    name = "Day 5: If You Give A Seed A Fertilizer",
    parsed = Almanac,
    part_one = Day05,
    part_two = Day05,
    impl super::AdventOfCode2023<5>
}

/*
Input is an almanac. It is formatted as multiple blocks separated by empty lines.

The first block is a `seeds: ` line with a space-separated list of numbers.

Following are seven map blocks, each a `<source>-to-<destination> map:` header then lines of three
numbers: the destination range start, the source range start, and the range length. The maps are
chained, one's destination feeding the next's source:

seed -> soil -> fertilizer -> water -> light -> temperature -> humidity -> location

Any source numbers outside a map's ranges map one-to-one as the destination number.
*/

/// The integer type for numbers in the almanac.
type AlmanacNumber = i64;

/// A half-open range of almanac numbers, `start..end`.
type NumberRange = Range<AlmanacNumber>;

/// Names of the map blocks, in the order they are chained.
const STAGES: [&str; 7] = [
    "seed-to-soil",
    "soil-to-fertilizer",
    "fertilizer-to-water",
    "water-to-light",
    "light-to-temperature",
    "temperature-to-humidity",
    "humidity-to-location",
];

/// One line of a map block: the source range `source_start..source_start + length` is shifted to
/// start at `destination_start`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct IntervalRule {
    destination_start: AlmanacNumber,
    source_start: AlmanacNumber,
    length: AlmanacNumber,
}

/// An error constructing an [`IntervalRule`].
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
enum IntervalRuleError {
    #[error(
        "range length must be > 0 (destination_start = {destination_start}, source_start = {source_start}, length = {length})"
    )]
    NonPositiveLength {
        destination_start: AlmanacNumber,
        source_start: AlmanacNumber,
        length: AlmanacNumber,
    },

    /// The end of the source or destination range does not fit an [`AlmanacNumber`].
    #[error("range end overflow when calculating {start} + {length}")]
    EndOverflow {
        start: AlmanacNumber,
        length: AlmanacNumber,
    },
}

impl IntervalRule {
    fn new(
        destination_start: AlmanacNumber,
        source_start: AlmanacNumber,
        length: AlmanacNumber,
    ) -> Result<Self, IntervalRuleError> {
        if length <= 0 {
            return Err(IntervalRuleError::NonPositiveLength {
                destination_start,
                source_start,
                length,
            });
        }

        // both ends are computed unchecked afterwards
        for start in [source_start, destination_start] {
            if start.checked_add(length).is_none() {
                return Err(IntervalRuleError::EndOverflow { start, length });
            }
        }

        Ok(Self {
            destination_start,
            source_start,
            length,
        })
    }

    /// The end of the source range, exclusive.
    fn source_end(&self) -> AlmanacNumber {
        self.source_start + self.length
    }

    fn contains(&self, number: AlmanacNumber) -> bool {
        (self.source_start..self.source_end()).contains(&number)
    }

    /// Shift a number known to be inside the source range.
    fn translate(&self, number: AlmanacNumber) -> AlmanacNumber {
        self.destination_start + (number - self.source_start)
    }

    /// Map a number with this rule, or `None` if it is outside the source range.
    fn try_map_number(&self, number: AlmanacNumber) -> Option<AlmanacNumber> {
        self.contains(number).then(|| self.translate(number))
    }
}

/// The rules of one map block.
#[derive(Debug, Clone)]
struct Section {
    /// Rules in input order; lookups take the first match.
    rules: Vec<IntervalRule>,
    /// The same rules sorted by source start, for mapping whole ranges.
    by_source: Vec<IntervalRule>,
}

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
enum SectionError {
    #[error(
        "source ranges overlap: {first_start}..{first_end} and {second_start}..{second_end}"
    )]
    OverlappingRules {
        first_start: AlmanacNumber,
        first_end: AlmanacNumber,
        second_start: AlmanacNumber,
        second_end: AlmanacNumber,
    },
}

impl Section {
    /// Create a section, rejecting rules whose source ranges overlap.
    fn new(rules: Vec<IntervalRule>) -> Result<Self, SectionError> {
        let mut by_source = rules.clone();
        by_source.sort_by_key(|rule| rule.source_start);

        if let Some(pair) = by_source
            .windows(2)
            .find(|pair| pair[0].source_end() > pair[1].source_start)
        {
            let (first, second) = (pair[0], pair[1]);
            return Err(SectionError::OverlappingRules {
                first_start: first.source_start,
                first_end: first.source_end(),
                second_start: second.source_start,
                second_end: second.source_end(),
            });
        }

        Ok(Self { rules, by_source })
    }

    /// Map a source number to a destination number.
    fn map_number(&self, number: AlmanacNumber) -> AlmanacNumber {
        self.rules
            .iter()
            .find_map(|rule| rule.try_map_number(number))
            .unwrap_or(number)
    }

    /// Map a source range into destination ranges.
    ///
    /// The source range is split wherever it crosses a rule boundary; pieces inside a rule are
    /// shifted, gaps between rules are kept as-is. Pieces are never empty.
    fn map_range(&self, source: &NumberRange) -> Vec<NumberRange> {
        let mut mapped = Vec::new();
        let mut cursor = source.start;

        for rule in &self.by_source {
            if cursor >= source.end || rule.source_start >= source.end {
                break;
            }
            let rule_end = rule.source_end();
            if rule_end <= cursor {
                continue;
            }

            if cursor < rule.source_start {
                mapped.push(cursor..rule.source_start);
                cursor = rule.source_start;
            }

            let overlap_end = source.end.min(rule_end);
            let destination_start = rule.translate(cursor);
            mapped.push(destination_start..destination_start + (overlap_end - cursor));
            cursor = overlap_end;
        }

        if cursor < source.end {
            mapped.push(cursor..source.end);
        }
        mapped
    }
}

/// How the numbers of the `seeds:` line are read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SeedLayout {
    /// Every number is one seed.
    Values,
    /// Numbers pair up as `start length` ranges of seeds.
    Ranges,
}

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
enum SeedLayoutError {
    #[error("seed ranges need an even count of numbers, found {count}")]
    UnpairedSeedNumber { count: usize },

    #[error("seed range length must not be negative (start = {start}, length = {length})")]
    NegativeLength {
        start: AlmanacNumber,
        length: AlmanacNumber,
    },

    #[error("seed range end overflow when calculating {start} + {length}")]
    EndOverflow {
        start: AlmanacNumber,
        length: AlmanacNumber,
    },
}

/// Interpret seed numbers as pairs of range start & length.
fn pair_seed_ranges(seed_numbers: &[AlmanacNumber]) -> Result<Vec<NumberRange>, SeedLayoutError> {
    if seed_numbers.len() % 2 != 0 {
        return Err(SeedLayoutError::UnpairedSeedNumber {
            count: seed_numbers.len(),
        });
    }

    seed_numbers
        .chunks_exact(2)
        .map(|pair| {
            let (start, length) = (pair[0], pair[1]);
            if length < 0 {
                return Err(SeedLayoutError::NegativeLength { start, length });
            }
            let end = start
                .checked_add(length)
                .ok_or(SeedLayoutError::EndOverflow { start, length })?;
            Ok(start..end)
        })
        .collect()
}

struct Almanac {
    /// Seed numbers parsed from input, each one seed ([`SeedLayout::Values`]).
    seed_numbers: Vec<AlmanacNumber>,
    /// The same numbers paired as ranges ([`SeedLayout::Ranges`]).
    seed_ranges: Vec<NumberRange>,
    /// The sections for number conversions, in the order of [`STAGES`].
    sections: [Section; 7],
}

#[derive(thiserror::Error, Debug)]
enum AlmanacParseError {
    #[error("expected block for seeds")]
    MissingSeedsBlock,

    #[error("expected seeds line to start with \"seeds:\"")]
    MissingSeedsPrefix,

    /// A map block is missing, with the name for the block.
    #[error("expected block for {name} map")]
    MissingMapBlock { name: &'static str },

    #[error("expected header line {expected:?} for map block, found: {found:?}")]
    ExpectedMapHeader { expected: String, found: String },

    /// Expected a line formatted with three numbers for a range, with the found line.
    #[error("expected three space-separated numbers as a map range, found: {0:?}")]
    ExpectedRangeFormat(String),

    #[error("unexpected input after the {} map", STAGES[STAGES.len() - 1])]
    UnexpectedTrailingInput,
}

impl ParseData for Almanac {
    fn parse(input: &str) -> DynamicResult<Self>
    where
        Self: Sized,
    {
        fn parse_section(scanner: &mut InputScanner, name: &'static str) -> DynamicResult<Section> {
            let header = format!("{name} map:");
            scanner
                .next_item(|_, line| {
                    if line.trim() == header {
                        Ok(())
                    } else {
                        Err(AlmanacParseError::ExpectedMapHeader {
                            expected: header.clone(),
                            found: line.to_owned(),
                        })
                    }
                })?
                .ok_or(AlmanacParseError::MissingMapBlock { name })?;

            let rules = scanner.collect_sequence(|_, line| -> DynamicResult<_> {
                let values: Vec<_> = line.split_whitespace().collect();
                let [destination_start, source_start, length] = values[..] else {
                    return Err(AlmanacParseError::ExpectedRangeFormat(line.to_owned()).into());
                };

                Ok(IntervalRule::new(
                    parse_with_context(destination_start)?,
                    parse_with_context(source_start)?,
                    parse_with_context(length)?,
                )?)
            })?;

            Ok(Section::new(rules)?)
        }

        let mut scanner = InputScanner::new(input);

        // both layouts are checked up front, so a bad layout fails before any part is solved
        let (seed_numbers, seed_ranges) = scanner
            .next_item(|_, line| -> DynamicResult<_> {
                let seeds_list = line
                    .strip_prefix("seeds:")
                    .ok_or(AlmanacParseError::MissingSeedsPrefix)?;
                let seed_numbers = seeds_list
                    .split_whitespace()
                    .map(parse_with_context)
                    .collect::<Result<Vec<AlmanacNumber>, _>>()?;
                let seed_ranges = pair_seed_ranges(&seed_numbers)?;
                Ok((seed_numbers, seed_ranges))
            })?
            .ok_or(AlmanacParseError::MissingSeedsBlock)?;

        let [seed, soil, fertilizer, water, light, temperature, humidity] = STAGES;
        let sections = [
            parse_section(&mut scanner, seed)?,
            parse_section(&mut scanner, soil)?,
            parse_section(&mut scanner, fertilizer)?,
            parse_section(&mut scanner, water)?,
            parse_section(&mut scanner, light)?,
            parse_section(&mut scanner, temperature)?,
            parse_section(&mut scanner, humidity)?,
        ];

        if scanner.has_remaining() {
            return Err(AlmanacParseError::UnexpectedTrailingInput.into());
        }

        Ok(Self {
            seed_numbers,
            seed_ranges,
            sections,
        })
    }
}

/*
For part 1, find the location numbers for each seed number and return the smallest number.
*/

impl Almanac {
    /// Process the full sequence of sections to find the location number of a seed number.
    fn location_for(&self, seed: AlmanacNumber) -> AlmanacNumber {
        self.sections
            .iter()
            .fold(seed, |number, section| section.map_number(number))
    }

    /// The smallest location of any seed, or [`AlmanacNumber::MAX`] without seeds.
    #[tracing::instrument(level = "debug", skip(self))]
    fn minimal_location(&self, layout: SeedLayout) -> AlmanacNumber {
        let minimum = match layout {
            SeedLayout::Values => self
                .seed_numbers
                .iter()
                .map(|&seed| self.location_for(seed))
                .min(),
            SeedLayout::Ranges => self
                .seed_ranges
                .iter()
                .flat_map(|seeds| self.location_ranges(seeds.clone()))
                .map(|locations| locations.start)
                .min(),
        };
        minimum.unwrap_or(AlmanacNumber::MAX)
    }
}

struct Day05;

impl Solution<PartOne> for Day05 {
    type Input = Almanac;
    type Output = AlmanacNumber;

    fn solve(input: &Self::Input) -> DynamicResult<Self::Output> {
        Ok(input.minimal_location(SeedLayout::Values))
    }
}

/*
For part 2, the seed numbers are ranges of seeds, pairing every two numbers as the start of the
range and its length.

The ranges are far too large to map seed by seed, so whole ranges are pushed through each section,
splitting into more ranges where they cross rule boundaries. The smallest location is then the
smallest start of the resulting ranges.
*/

impl Almanac {
    /// Process the full sequence of sections to convert a seed range to location ranges.
    fn location_ranges(&self, seeds: NumberRange) -> Vec<NumberRange> {
        let locations: Vec<_> = self
            .sections
            .iter()
            .fold(vec![seeds], |ranges, section| {
                ranges
                    .iter()
                    .flat_map(|range| section.map_range(range))
                    .collect()
            });
        tracing::trace!(count = locations.len(), "mapped seed range");
        locations
    }
}

impl Solution<PartTwo> for Day05 {
    type Input = Almanac;
    type Output = AlmanacNumber;

    fn solve(input: &Self::Input) -> DynamicResult<Self::Output> {
        Ok(input.minimal_location(SeedLayout::Ranges))
    }
}

#[cfg(test)]
mod tests {
    use std::fmt::Display;
    use std::time::Duration;

    use aoc_framework::PartKind;
    use aoc_framework::runner::{OutputHandler, SolutionRunner};
    use proptest::prelude::*;

    use super::*;
    use crate::solutions::AdventOfCode2023;

    const EXAMPLE_INPUT: &str = r"seeds: 79 14 55 13

seed-to-soil map:
50 98 2
52 50 48

soil-to-fertilizer map:
0 15 37
37 52 2
39 0 15

fertilizer-to-water map:
49 53 8
0 11 42
42 0 7
57 7 4

water-to-light map:
88 18 7
18 25 70

light-to-temperature map:
45 77 23
81 45 19
68 64 13

temperature-to-humidity map:
0 69 1
1 0 69

humidity-to-location map:
60 56 37
56 93 4
";

    fn rule(destination_start: i64, source_start: i64, length: i64) -> IntervalRule {
        IntervalRule::new(destination_start, source_start, length).unwrap()
    }

    #[test]
    fn part_one_solves_example() -> DynamicResult<()> {
        let parsed = Almanac::parse(EXAMPLE_INPUT)?;
        let result = <Day05 as Solution<PartOne>>::solve(&parsed)?;
        assert_eq!(result, 35);
        Ok(())
    }

    #[test]
    fn part_two_solves_example() -> DynamicResult<()> {
        let parsed = Almanac::parse(EXAMPLE_INPUT)?;
        let result = <Day05 as Solution<PartTwo>>::solve(&parsed)?;
        assert_eq!(result, 46);
        Ok(())
    }

    #[test]
    fn locations_of_example_seeds() -> DynamicResult<()> {
        let almanac = Almanac::parse(EXAMPLE_INPUT)?;
        let locations: Vec<_> = [79, 14, 55, 13]
            .into_iter()
            .map(|seed| almanac.location_for(seed))
            .collect();
        assert_eq!(locations, [82, 43, 86, 35]);
        Ok(())
    }

    #[test]
    fn first_matching_rule_wins_in_input_order() {
        let section = Section::new(vec![rule(100, 10, 5), rule(0, 0, 5)]).unwrap();
        assert_eq!(section.map_number(12), 102);
        assert_eq!(section.map_number(3), 3);
        assert_eq!(section.map_number(7), 7);
        assert_eq!(section.by_source[0].source_start, 0);
    }

    #[test]
    fn overlapping_rules_are_rejected() {
        let result = Section::new(vec![rule(0, 10, 5), rule(50, 0, 11)]);
        assert_eq!(
            result.unwrap_err(),
            SectionError::OverlappingRules {
                first_start: 0,
                first_end: 11,
                second_start: 10,
                second_end: 15,
            }
        );
    }

    #[test]
    fn adjacent_rules_are_accepted() {
        assert!(Section::new(vec![rule(0, 10, 5), rule(50, 5, 5)]).is_ok());
    }

    #[test]
    fn invalid_rules_are_rejected() {
        assert!(matches!(
            IntervalRule::new(1, 2, 0),
            Err(IntervalRuleError::NonPositiveLength { .. })
        ));
        assert_eq!(
            IntervalRule::new(i64::MAX - 1, 0, 2),
            Err(IntervalRuleError::EndOverflow {
                start: i64::MAX - 1,
                length: 2
            })
        );
    }

    #[test]
    fn map_range_splits_at_rule_boundaries() {
        let section = Section::new(vec![rule(100, 10, 5), rule(200, 20, 5)]).unwrap();
        assert_eq!(
            section.map_range(&(8..22)),
            [8..10, 100..105, 15..20, 200..202]
        );
        assert_eq!(section.map_range(&(11..13)), [101..103]);
        assert_eq!(section.map_range(&(30..40)), [30..40]);
        assert!(section.map_range(&(5..5)).is_empty());
    }

    #[test]
    fn no_seeds_gives_max_location() -> DynamicResult<()> {
        let input = EXAMPLE_INPUT.replacen("seeds: 79 14 55 13", "seeds:", 1);
        let almanac = Almanac::parse(&input)?;
        assert_eq!(almanac.minimal_location(SeedLayout::Values), i64::MAX);
        assert_eq!(almanac.minimal_location(SeedLayout::Ranges), i64::MAX);
        Ok(())
    }

    #[test]
    fn invalid_seed_ranges_are_rejected() {
        assert_eq!(
            pair_seed_ranges(&[79, 14, 55]),
            Err(SeedLayoutError::UnpairedSeedNumber { count: 3 })
        );
        assert_eq!(
            pair_seed_ranges(&[79, -1]),
            Err(SeedLayoutError::NegativeLength {
                start: 79,
                length: -1
            })
        );
        assert_eq!(
            pair_seed_ranges(&[i64::MAX, 1]),
            Err(SeedLayoutError::EndOverflow {
                start: i64::MAX,
                length: 1
            })
        );
        assert_eq!(pair_seed_ranges(&[79, 14, 55, 0]), Ok(vec![79..93, 55..55]));
    }

    #[test]
    fn invalid_seed_ranges_fail_parsing() {
        for seeds in [
            "seeds: 79 14 55",
            "seeds: 79 -1",
            "seeds: 9223372036854775807 1",
        ] {
            let input = EXAMPLE_INPUT.replacen("seeds: 79 14 55 13", seeds, 1);
            assert!(Almanac::parse(&input).is_err(), "parsed: {seeds:?}");
        }
    }

    /// Records the answers a run outputs.
    #[derive(Default)]
    struct Answers(Vec<String>);

    impl OutputHandler for Answers {
        fn solution_name(&mut self, _name: &str) {}

        fn parse_end(&mut self, _duration: Duration) {}

        fn part_output(&mut self, part: PartKind, output: &dyn Display, _duration: Duration) {
            self.0.push(format!("{part}: {output}"));
        }
    }

    #[test]
    fn run_outputs_both_parts() -> DynamicResult<()> {
        let mut answers = Answers::default();
        AdventOfCode2023::<5>::run(EXAMPLE_INPUT, &mut answers)?;
        assert_eq!(answers.0, ["Part 1: 35", "Part 2: 46"]);
        Ok(())
    }

    #[test]
    fn unpaired_seeds_output_no_part() {
        let input = EXAMPLE_INPUT.replacen("seeds: 79 14 55 13", "seeds: 79 14 55", 1);
        let mut answers = Answers::default();
        let result = AdventOfCode2023::<5>::run(&input, &mut answers);
        assert!(result.is_err());
        assert!(answers.0.is_empty(), "answers: {:?}", answers.0);
    }

    #[test]
    fn rejects_malformed_almanacs() {
        let missing_block = EXAMPLE_INPUT
            .split("\n\nhumidity-to-location")
            .next()
            .unwrap();
        let wrong_header = EXAMPLE_INPUT.replacen("water-to-light", "water-to-lamp", 1);
        let short_triple = EXAMPLE_INPUT.replacen("52 50 48", "52 50", 1);
        let not_a_number = EXAMPLE_INPUT.replacen("52 50 48", "52 fifty 48", 1);
        let overlapping = EXAMPLE_INPUT.replacen("52 50 48", "52 50 49", 1);
        let trailing = format!("{EXAMPLE_INPUT}\nextra map:\n1 2 3\n");

        for input in [
            "",
            "seed: 1 2",
            missing_block,
            wrong_header.as_str(),
            short_triple.as_str(),
            not_a_number.as_str(),
            overlapping.as_str(),
            trailing.as_str(),
        ] {
            assert!(Almanac::parse(input).is_err(), "parsed: {input:?}");
        }
    }

    fn section_strategy() -> impl Strategy<Value = Section> {
        prop::collection::vec((0i64..10, 1i64..15, 0i64..120), 0..5).prop_map(|specs| {
            let mut source_start = 0;
            let mut rules: Vec<_> = specs
                .into_iter()
                .map(|(gap, length, destination_start)| {
                    source_start += gap;
                    let next = rule(destination_start, source_start, length);
                    source_start += length;
                    next
                })
                .collect();
            // input order should not matter for disjoint rules
            rules.reverse();
            Section::new(rules).unwrap()
        })
    }

    proptest! {
        #[test]
        fn rule_maps_by_constant_offset(
            destination_start in -1_000i64..1_000,
            source_start in -1_000i64..1_000,
            length in 1i64..500,
            number in -2_000i64..2_000,
        ) {
            let section = Section::new(vec![rule(destination_start, source_start, length)]).unwrap();
            let expected = if (source_start..source_start + length).contains(&number) {
                number - source_start + destination_start
            } else {
                number
            };
            prop_assert_eq!(section.map_number(number), expected);
        }

        #[test]
        fn single_seed_range_matches_location(seed in 0i64..120) {
            let example = Almanac::parse(EXAMPLE_INPUT).unwrap();
            let almanac = Almanac {
                seed_numbers: vec![seed, 1],
                seed_ranges: pair_seed_ranges(&[seed, 1]).unwrap(),
                sections: example.sections.clone(),
            };
            prop_assert_eq!(
                almanac.minimal_location(SeedLayout::Ranges),
                example.location_for(seed)
            );
        }

        #[test]
        fn range_mapping_matches_seed_by_seed(
            sections in prop::array::uniform7(section_strategy()),
            start in 0i64..100,
            length in 0i64..60,
        ) {
            let almanac = Almanac {
                seed_numbers: vec![start, length],
                seed_ranges: vec![start..start + length],
                sections,
            };

            let brute_force = (start..start + length)
                .map(|seed| almanac.location_for(seed))
                .min()
                .unwrap_or(i64::MAX);
            prop_assert_eq!(almanac.minimal_location(SeedLayout::Ranges), brute_force);

            let mapped_len: i64 = almanac
                .location_ranges(start..start + length)
                .iter()
                .map(|range| range.end - range.start)
                .sum();
            prop_assert_eq!(mapped_len, length);
        }
    }
}
