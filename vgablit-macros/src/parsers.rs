use nom::IResult;

/// A color literal as written in source, with 8 bits per channel.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub(crate) struct Rgb8 {
    pub(crate) r: u8,
    pub(crate) g: u8,
    pub(crate) b: u8,
}

/// Parses a whole color literal, returning `None` if there's anything
/// left over after the color.
pub(crate) fn parse_color(input: &str) -> Option<Rgb8> {
    match nom::combinator::all_consuming(color_literal)(input) {
        Ok((_, color)) => Some(color),
        Err(_) => None,
    }
}

fn color_literal(i: &str) -> IResult<&str, Rgb8> {
    nom::sequence::preceded(
        nom::bytes::complete::tag("#"),
        nom::branch::alt((long_form, short_form)),
    )(i)
}

fn long_form(i: &str) -> IResult<&str, Rgb8> {
    nom::combinator::map(
        nom::sequence::tuple((hex_byte, hex_byte, hex_byte)),
        |(r, g, b)| Rgb8 { r: r, g: g, b: b },
    )(i)
}

// "#f0a" is shorthand for "#ff00aa", as in CSS.
fn short_form(i: &str) -> IResult<&str, Rgb8> {
    nom::combinator::map(
        nom::sequence::tuple((hex_nibble, hex_nibble, hex_nibble)),
        |(r, g, b)| Rgb8 {
            r: r * 17,
            g: g * 17,
            b: b * 17,
        },
    )(i)
}

fn hex_byte(i: &str) -> IResult<&str, u8> {
    nom::combinator::map_opt(
        nom::bytes::complete::take_while_m_n(2, 2, is_hex_digit),
        |digits: &str| u8::from_str_radix(digits, 16).ok(),
    )(i)
}

fn hex_nibble(i: &str) -> IResult<&str, u8> {
    nom::combinator::map_opt(
        nom::bytes::complete::take_while_m_n(1, 1, is_hex_digit),
        |digit: &str| u8::from_str_radix(digit, 16).ok(),
    )(i)
}

fn is_hex_digit(c: char) -> bool {
    c.is_ascii_hexdigit()
}
