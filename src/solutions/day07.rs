use std::fmt::{self, Display};
use std::num::ParseIntError;

use aoc_framework::parsing::{ParseContextError, parse_input_lines, parse_with_context};
use aoc_framework::runner::solution_runner;
use aoc_framework::{DynamicResult, ParseData, PartOne, PartTwo, Solution};
use checked_sum::CheckedSum;

solution_runner! {
    name = "Day 7: Camel Cards",
    parsed = CamelCardGames,
    part_one = Day07,
    part_two = Day07,
    impl super::AdventOfCode2023<7>
}

/*
Input is a line-separated list of hands of cards, whitespace, and corresponding bids.

Cards use single characters to label their value: `A`, `K`, `Q`, `J`, `T`, and digits `9` to `2`.
Hands are five cards in sequence.
*/

/// An enumeration of card values.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
enum Card {
    // deriving Ord, variants are from smallest to largest
    Joker,
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King,
    Ace,
}

/// The count of [`Card`] variants, jokers included.
const CARD_KINDS: usize = Card::Ace as usize + 1;

/// How the `J` symbol is read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CardRules {
    /// `J` is a [`Card::Jack`].
    Standard,
    /// `J` is a [`Card::Joker`]: weakest card, but a wildcard for the hand type.
    JokersWild,
}

/// An error when reading a [`Card`] from a symbol.
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
enum CardFromSymbolError {
    #[error("unrecognized card symbol: {0:?}")]
    UnrecognizedSymbol(char),
}

impl Card {
    fn from_symbol(symbol: char, rules: CardRules) -> Result<Self, CardFromSymbolError> {
        match symbol {
            '2' => Ok(Self::Two),
            '3' => Ok(Self::Three),
            '4' => Ok(Self::Four),
            '5' => Ok(Self::Five),
            '6' => Ok(Self::Six),
            '7' => Ok(Self::Seven),
            '8' => Ok(Self::Eight),
            '9' => Ok(Self::Nine),
            'T' => Ok(Self::Ten),
            'J' => match rules {
                CardRules::Standard => Ok(Self::Jack),
                CardRules::JokersWild => Ok(Self::Joker),
            },
            'Q' => Ok(Self::Queen),
            'K' => Ok(Self::King),
            'A' => Ok(Self::Ace),
            _ => Err(CardFromSymbolError::UnrecognizedSymbol(symbol)),
        }
    }

    fn symbol(self) -> char {
        match self {
            Self::Two => '2',
            Self::Three => '3',
            Self::Four => '4',
            Self::Five => '5',
            Self::Six => '6',
            Self::Seven => '7',
            Self::Eight => '8',
            Self::Nine => '9',
            Self::Ten => 'T',
            Self::Joker | Self::Jack => 'J',
            Self::Queen => 'Q',
            Self::King => 'K',
            Self::Ace => 'A',
        }
    }
}

/// The integer type for a bid.
type Bid = u32;

/// A hand of five [`Card`]s in sequence, with its bid.
#[derive(Debug, Clone)]
struct Hand {
    cards: [Card; 5],
    bid: Bid,
}

/// An error when parsing a line into a [`Hand`].
#[derive(thiserror::Error, Debug)]
enum ParseHandError {
    #[error("expected cards and a bid separated by whitespace, found {found} fields")]
    FieldCount { found: usize },

    #[error("expected exactly 5 cards, found {found}")]
    InvalidLength { found: usize },

    #[error("invalid card at position {}", .position + 1)]
    InvalidCard {
        position: usize,
        source: CardFromSymbolError,
    },

    #[error("expected the bid to be only digits, found: {0:?}")]
    NonDigitBid(String),

    #[error("invalid bid")]
    InvalidBid(#[from] ParseContextError<ParseIntError>),
}

impl Hand {
    fn parse(line: &str, rules: CardRules) -> Result<Self, ParseHandError> {
        let fields: Vec<_> = line.split_whitespace().collect();
        let [cards_str, bid_str] = fields[..] else {
            return Err(ParseHandError::FieldCount {
                found: fields.len(),
            });
        };

        let found = cards_str.chars().count();
        if found != 5 {
            return Err(ParseHandError::InvalidLength { found });
        }

        let mut cards = [Card::Joker; 5];
        for (position, (card, symbol)) in cards.iter_mut().zip(cards_str.chars()).enumerate() {
            *card = Card::from_symbol(symbol, rules)
                .map_err(|source| ParseHandError::InvalidCard { position, source })?;
        }

        // a sign would not survive displaying the hand again
        if !bid_str.bytes().all(|byte| byte.is_ascii_digit()) {
            return Err(ParseHandError::NonDigitBid(bid_str.to_owned()));
        }
        let bid = parse_with_context(bid_str)?;
        Ok(Self { cards, bid })
    }
}

impl Display for Hand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for card in self.cards {
            write!(f, "{}", card.symbol())?;
        }
        write!(f, " {}", self.bid)
    }
}

/// The integer type for total winnings.
type Winnings = u64;

/// The hands of the input, read with some [`CardRules`].
#[derive(Debug)]
struct Game(Vec<Hand>);

#[derive(thiserror::Error, Debug)]
enum ParseGameError {
    #[error("expected at least one hand")]
    NoHands,
}

impl Game {
    /// Parse a hand from each non-blank line.
    fn parse(input: &str, rules: CardRules) -> DynamicResult<Self> {
        let hands: Vec<_> = parse_input_lines(input, |_, line| {
            if line.trim().is_empty() {
                Ok(None)
            } else {
                Hand::parse(line, rules).map(Some)
            }
        })
        .filter_map(Result::transpose)
        .collect::<Result<_, _>>()?;

        if hands.is_empty() {
            return Err(ParseGameError::NoHands.into());
        }
        Ok(Self(hands))
    }
}

/// The input, read once per rule set.
#[derive(Debug)]
struct CamelCardGames {
    standard: Game,
    jokers_wild: Game,
}

impl ParseData for CamelCardGames {
    fn parse(input: &str) -> DynamicResult<Self>
    where
        Self: Sized,
    {
        Ok(Self {
            standard: Game::parse(input, CardRules::Standard)?,
            jokers_wild: Game::parse(input, CardRules::JokersWild)?,
        })
    }
}

/*
For part 1, find the total winnings of the hands.

Each hand wins its bid multiplied by its rank among the hands, with the weakest hand at rank 1,
incrementing to the strongest.

Hands compare by their type first, then by the first card in the hand, then the second, etc.
*/

/// The type of a [`Hand`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum HandType {
    // deriving Ord, variants are from smallest to largest
    HighCard,
    OnePair,
    TwoPair,
    ThreeKind,
    FullHouse,
    FourKind,
    FiveKind,
}

impl HandType {
    /// Classify five cards, counting any [`Card::Joker`] toward the most frequent other card.
    ///
    /// Which card gets the jokers when several share the top count does not matter: the two
    /// largest counts alone decide the type.
    fn classify(cards: &[Card; 5]) -> Self {
        let mut counts = [0u8; CARD_KINDS];
        for &card in cards {
            counts[card as usize] += 1;
        }
        let jokers = std::mem::take(&mut counts[Card::Joker as usize]);

        counts.sort_unstable_by(|a, b| b.cmp(a));
        // five jokers leave every count at 0, boosting the top one to 5
        match (counts[0] + jokers, counts[1]) {
            (5, _) => Self::FiveKind,
            (4, _) => Self::FourKind,
            (3, 2) => Self::FullHouse,
            (3, _) => Self::ThreeKind,
            (2, 2) => Self::TwoPair,
            (2, _) => Self::OnePair,
            _ => Self::HighCard,
        }
    }
}

impl Hand {
    fn hand_type(&self) -> HandType {
        HandType::classify(&self.cards)
    }
}

impl PartialEq for Hand {
    fn eq(&self, other: &Self) -> bool {
        self.cards.eq(&other.cards)
    }
}

impl Eq for Hand {}

impl PartialOrd for Hand {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Hand {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // compare by hand type first, then compare by card value from first index onward (default
        // of array comparison)
        self.hand_type()
            .cmp(&other.hand_type())
            .then(self.cards.cmp(&other.cards))
    }
}

#[derive(thiserror::Error, Debug)]
#[error("total winnings overflowed")]
struct ScoreOverflow;

impl Game {
    /// Sum each hand's bid multiplied by its rank, weakest hand first.
    ///
    /// Equal hands keep their input order.
    #[tracing::instrument(level = "debug", skip(self), fields(hands = self.0.len()))]
    fn score(&self) -> Result<Winnings, ScoreOverflow> {
        let mut ranked: Vec<&Hand> = self.0.iter().collect();
        ranked.sort();

        let winnings: Vec<Winnings> = ranked
            .iter()
            .zip(1..)
            .map(|(hand, rank): (&&Hand, Winnings)| rank.checked_mul(hand.bid.into()))
            .collect::<Option<_>>()
            .ok_or(ScoreOverflow)?;
        winnings.into_iter().checked_sum().ok_or(ScoreOverflow)
    }
}

struct Day07;

impl Solution<PartOne> for Day07 {
    type Input = CamelCardGames;
    type Output = Winnings;

    fn solve(input: &Self::Input) -> DynamicResult<Self::Output> {
        Ok(input.standard.score()?)
    }
}

/*
For part 2, `J` is now a joker card.

When comparing card values, jokers are smaller than `2`. When determining hand types, jokers are a
wildcard to enable the strongest hand type possible.

Find the total winnings with the joker cards.
*/

impl Solution<PartTwo> for Day07 {
    type Input = CamelCardGames;
    type Output = Winnings;

    fn solve(input: &Self::Input) -> DynamicResult<Self::Output> {
        Ok(input.jokers_wild.score()?)
    }
}
