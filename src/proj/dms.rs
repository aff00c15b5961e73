//! Degrees-minutes-seconds formatting and parsing.
//!
//! Output form: `15°30'0.0000" S`. Parsing looks for the first
//! `D° M' S" H` run anywhere in the input and accepts typographic quote
//! marks; anything else yields `None`.

use std::fmt;

use nom::bytes::complete::take_while1;
use nom::character::complete::{digit1, multispace0, one_of};
use nom::combinator::map_res;
use nom::sequence::preceded;
use nom::{IResult, Parser};

/// A coordinate split into whole degrees, whole minutes, decimal seconds and
/// a hemisphere letter (N, S, E or W).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Dms {
    pub degrees: u32,
    pub minutes: u32,
    pub seconds: f64,
    pub direction: char,
}

impl Dms {
    /// Seconds are kept to this many decimals when formatting.
    pub const SECONDS_PRECISION: usize = 4;

    pub fn from_decimal(decimal: f64, is_latitude: bool) -> Self {
        let direction = match (is_latitude, decimal >= 0.0) {
            (true, true) => 'N',
            (true, false) => 'S',
            (false, true) => 'E',
            (false, false) => 'W',
        };

        let abs = decimal.abs();
        let mut degrees = abs.floor() as u32;
        let minutes_float = (abs - degrees as f64) * 60.0;
        let mut minutes = minutes_float.floor() as u32;
        let mut seconds = (minutes_float - minutes as f64) * 60.0;

        // Carry when the formatted seconds would read 60.0000
        let scale = 10f64.powi(Self::SECONDS_PRECISION as i32);
        if (seconds * scale).round() / scale >= 60.0 {
            seconds = 0.0;
            minutes += 1;
            if minutes == 60 {
                minutes = 0;
                degrees += 1;
            }
        }

        Self {
            degrees,
            minutes,
            seconds,
            direction,
        }
    }

    pub fn to_decimal(&self) -> f64 {
        let value = self.degrees as f64 + self.minutes as f64 / 60.0 + self.seconds / 3600.0;
        match self.direction {
            'S' | 'W' => -value,
            _ => value,
        }
    }
}

impl fmt::Display for Dms {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}°{}'{:.prec$}\" {}",
            self.degrees,
            self.minutes,
            self.seconds,
            self.direction,
            prec = Self::SECONDS_PRECISION
        )
    }
}

pub fn to_dms(decimal: f64, is_latitude: bool) -> String {
    Dms::from_decimal(decimal, is_latitude).to_string()
}

/// Parse a DMS string into signed decimal degrees. Returns `None` when no
/// DMS pattern is found.
pub fn from_dms(input: &str) -> Option<f64> {
    parse_dms(input).map(|dms| dms.to_decimal())
}

/// Parse the first DMS run found in `input`.
pub fn parse_dms(input: &str) -> Option<Dms> {
    input
        .char_indices()
        .filter(|(_, c)| c.is_ascii_digit())
        .find_map(|(i, _)| dms(&input[i..]).ok().map(|(_, parsed)| parsed))
}

fn integer(input: &str) -> IResult<&str, u32> {
    map_res(digit1, |s: &str| s.parse::<u32>()).parse(input)
}

fn decimal(input: &str) -> IResult<&str, f64> {
    map_res(
        take_while1(|c: char| c.is_ascii_digit() || c == '.'),
        |s: &str| s.parse::<f64>(),
    )
    .parse(input)
}

fn dms(input: &str) -> IResult<&str, Dms> {
    let (rest, (degrees, _, minutes, _, seconds, _, direction)) = (
        integer,
        preceded(multispace0, one_of("°º")),
        preceded(multispace0, integer),
        preceded(multispace0, one_of("'’′")),
        preceded(multispace0, decimal),
        preceded(multispace0, one_of("\"”″")),
        preceded(multispace0, one_of("NSEWnsew")),
    )
        .parse(input)?;

    Ok((
        rest,
        Dms {
            degrees,
            minutes,
            seconds,
            direction: direction.to_ascii_uppercase(),
        },
    ))
}
