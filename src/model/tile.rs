use std::str::FromStr;

use serde::{de, ser};

use super::*;
use crate::error::ParseError;

// 牌は(種別, 数字)の組で表現する
// 同じsort keyを持つ牌はゲーム上区別しない
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tile(pub Type, pub Tnum); // (type index, number index)

impl Tile {
    pub fn new(ti: Type, ni: Tnum) -> Result<Self, ParseError> {
        if ti >= TYPE || ni == 0 || ni > MAX_TNUM[ti] {
            return Err(ParseError::InvalidTile(format!("({}, {})", ti, ni)));
        }
        Ok(Self(ti, ni))
    }

    pub fn from_symbol(s: &str) -> Result<Self, ParseError> {
        let mut chars = s.chars();
        let (c0, c1) = match (chars.next(), chars.next(), chars.next()) {
            (Some(c0), Some(c1), None) => (c0, c1),
            _ => return Err(ParseError::InvalidTile(s.to_string())),
        };
        let ti = type_from_char(c0)?;
        let ni = c1
            .to_digit(10)
            .ok_or_else(|| ParseError::InvalidTile(s.to_string()))? as Tnum;
        Self::new(ti, ni).map_err(|_| ParseError::InvalidTile(s.to_string()))
    }

    #[inline]
    pub fn sort_key(&self) -> usize {
        (self.0 + 1) * 100 + self.1
    }

    // 数牌
    #[inline]
    pub fn is_suit(&self) -> bool {
        self.sort_key() < HONOR_THRESHOLD
    }

    // 花牌
    #[inline]
    pub fn is_flower(&self) -> bool {
        self.0 == TB || self.0 == TR
    }

    // 風牌
    #[inline]
    pub fn is_wind(&self) -> bool {
        self.0 == TW
    }
}

pub fn type_from_char(c: char) -> Result<Type, ParseError> {
    TYPE_SYMBOLS
        .iter()
        .position(|&s| s == c)
        .ok_or(ParseError::InvalidChar(c))
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", TYPE_SYMBOLS[self.0], self.1)
    }
}

impl fmt::Debug for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}

impl FromStr for Tile {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_symbol(s)
    }
}

impl PartialOrd for Tile {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Tile {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.sort_key().cmp(&other.sort_key())
    }
}

impl ser::Serialize for Tile {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: ser::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

struct TileVisitor;

impl de::Visitor<'_> for TileVisitor {
    type Value = Tile;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("tile symbol")
    }

    fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Tile::from_symbol(v).map_err(E::custom)
    }
}

impl<'de> de::Deserialize<'de> for Tile {
    fn deserialize<D>(deserializer: D) -> Result<Self, <D as de::Deserializer<'de>>::Error>
    where
        D: de::Deserializer<'de>,
    {
        deserializer.deserialize_str(TileVisitor)
    }
}

// [TileTable]
// 牌種ごとの枚数テーブル table[type][number]
pub type TileRow = [usize; TNUM];
pub type TileTable = [TileRow; TYPE];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_key() {
        assert_eq!(Tile(TM, 1).sort_key(), 101);
        assert_eq!(Tile(TS, 9).sort_key(), 309);
        assert_eq!(Tile(TW, WN).sort_key(), 404);
        assert_eq!(Tile(TR, 2).sort_key(), 702);
        assert!(Tile(TS, 9).is_suit());
        assert!(!Tile(TW, WE).is_suit());
        assert!(Tile(TB, 1).is_flower());
        assert!(Tile(TM, 9) < Tile(TP, 1));
    }

    #[test]
    fn test_symbol() {
        let t: Tile = "d3".parse().unwrap();
        assert_eq!(t, Tile(TD, DR));
        assert_eq!(t.to_string(), "d3");
        assert!(Tile::from_symbol("d4").is_err());
        assert!(Tile::from_symbol("w0").is_err());
        assert!(Tile::from_symbol("x1").is_err());

        let json = serde_json::to_string(&Tile(TB, 4)).unwrap();
        assert_eq!(json, "\"b4\"");
        let t: Tile = serde_json::from_str("\"p7\"").unwrap();
        assert_eq!(t, Tile(TP, 7));
    }
}
