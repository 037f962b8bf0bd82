use crate::color::Color;
use crate::position::Position;
use crate::r#move::Move;
use crate::tile::Rotation;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

// Moves travel between peers as compact strings: "row,col,rotation,flip"
// with flip as 0 or 1. The tile index and color ride alongside in whatever
// envelope the host protocol uses.

impl Serialize for Move {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&format!(
            "{},{},{},{}",
            self.anchor.row,
            self.anchor.col,
            self.rotation.index(),
            self.flip as u8
        ))
    }
}

impl<'de> Deserialize<'de> for Move {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;

        let parts: Vec<&str> = s.split(',').collect();
        if parts.len() != 4 {
            return Err(serde::de::Error::custom(format!(
                "Invalid move format: {}",
                s
            )));
        }

        let row: u8 = parts[0]
            .trim()
            .parse()
            .map_err(|e| serde::de::Error::custom(format!("Invalid row: {}", e)))?;
        let col: u8 = parts[1]
            .trim()
            .parse()
            .map_err(|e| serde::de::Error::custom(format!("Invalid column: {}", e)))?;
        let rotation_index: usize = parts[2]
            .trim()
            .parse()
            .map_err(|e| serde::de::Error::custom(format!("Invalid rotation: {}", e)))?;
        let rotation = Rotation::from_index(rotation_index).ok_or_else(|| {
            serde::de::Error::custom(format!("Rotation out of range: {}", rotation_index))
        })?;
        let flip = match parts[3].trim() {
            "0" => false,
            "1" => true,
            other => {
                return Err(serde::de::Error::custom(format!(
                    "Invalid flip flag: {}",
                    other
                )))
            }
        };

        Ok(Move::new(Position::new(row, col), rotation, flip))
    }
}

impl Serialize for Color {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_char(self.to_char())
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let c = char::deserialize(deserializer)?;
        Color::from_char(c)
            .ok_or_else(|| serde::de::Error::custom(format!("Unknown color: {}", c)))
    }
}
