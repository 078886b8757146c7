use nom::{
    character::complete::{digit1, satisfy, space0},
    combinator::{all_consuming, map_res},
    sequence::delimited,
    IResult, Parser,
};
use std::fmt;

use crate::error::LedgerError;

/// A room identifier such as `A12`: one block letter and a room number
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RoomName {
    pub block: String,
    pub number: u32,
}

impl fmt::Display for RoomName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.block, self.number)
    }
}

fn block_letter(input: &str) -> IResult<&str, char> {
    satisfy(|c: char| c.is_ascii_alphabetic()).parse(input)
}

fn room_number(input: &str) -> IResult<&str, u32> {
    map_res(digit1, |digits: &str| digits.parse::<u32>()).parse(input)
}

/// Parse a room name, ignoring surrounding whitespace. The block letter is
/// upper-cased, so `a7` and `A7` name the same room.
pub fn parse_room_name(input: &str) -> Result<RoomName, LedgerError> {
    let (_, (letter, number)) = all_consuming(delimited(space0, (block_letter, room_number), space0))
        .parse(input)
        .map_err(|_| LedgerError::InvalidRoomName(input.to_string()))?;

    Ok(RoomName {
        block: letter.to_ascii_uppercase().to_string(),
        number,
    })
}

/// Parse a bare block letter such as `B`
pub fn parse_block(input: &str) -> Option<String> {
    let (_, letter) = all_consuming(delimited(space0, block_letter, space0))
        .parse(input)
        .ok()?;
    Some(letter.to_ascii_uppercase().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_room_name() {
        let name = parse_room_name("A12").unwrap();
        assert_eq!(name.block, "A");
        assert_eq!(name.number, 12);
        assert_eq!(name.to_string(), "A12");
    }

    #[test]
    fn test_parse_room_name_normalizes() {
        let name = parse_room_name("  b7 ").unwrap();
        assert_eq!(name, RoomName { block: "B".to_string(), number: 7 });
    }

    #[test]
    fn test_parse_room_name_rejects_garbage() {
        for bad in ["", "12", "AB1", "A", "A1x", "A-1", "Á1"] {
            assert!(
                matches!(parse_room_name(bad), Err(LedgerError::InvalidRoomName(_))),
                "{:?} should be rejected",
                bad
            );
        }
    }

    #[test]
    fn test_parse_block() {
        assert_eq!(parse_block("c"), Some("C".to_string()));
        assert_eq!(parse_block("C1"), None);
        assert_eq!(parse_block(""), None);
    }
}
