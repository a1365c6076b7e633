use nom::{
    IResult, Parser,
    branch::alt,
    bytes::complete::{take_till, take_while_m_n},
    character::complete::char,
    combinator::{all_consuming, map, map_res, opt, rest},
    sequence::preceded,
};

use crate::{error::Error, rules::color::Color};

pub fn parse_color(input: &str) -> crate::Result<Color> {
    match all_consuming(color).parse(input.trim()) {
        Ok((_, color)) => Ok(color),
        Err(_) => Err(Error::InvalidColor(input.to_string())),
    }
}

/// Parses `NAME` or `NAME=#rrggbb`. The name is returned untrimmed and may be empty.
pub fn parse_choice_spec(input: &str) -> crate::Result<(String, Option<Color>)> {
    match all_consuming(choice_spec).parse(input) {
        Ok((_, (name, color))) => Ok((name.to_string(), color)),
        Err(_) => Err(Error::InvalidChoiceSpec(input.to_string())),
    }
}

fn choice_spec(input: &str) -> IResult<&str, (&str, Option<Color>)> {
    (
        take_till(|c: char| c == '='),
        opt(preceded(char('='), map_res(rest, |s: &str| parse_color(s)))),
    )
        .parse(input)
}

fn color(input: &str) -> IResult<&str, Color> {
    preceded(
        char('#'),
        alt((
            map((hex_pair, hex_pair, hex_pair), |(r, g, b)| Color::rgb(r, g, b)),
            map((hex_single, hex_single, hex_single), |(r, g, b)| {
                Color::rgb(r, g, b)
            }),
        )),
    )
    .parse(input)
}

fn hex_pair(input: &str) -> IResult<&str, u8> {
    map_res(
        take_while_m_n(2, 2, |c: char| c.is_ascii_hexdigit()),
        |s: &str| u8::from_str_radix(s, 16),
    )
    .parse(input)
}

// `#abc` is shorthand for `#aabbcc`
fn hex_single(input: &str) -> IResult<&str, u8> {
    map_res(
        take_while_m_n(1, 1, |c: char| c.is_ascii_hexdigit()),
        |s: &str| u8::from_str_radix(s, 16).map(|v| v * 17),
    )
    .parse(input)
}
