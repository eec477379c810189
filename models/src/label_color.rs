use crate::ModelError;

use common::ErrorLocation;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The fixed label palette Trello offers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LabelColor {
    #[default]
    None,
    Black,
    Red,
    Orange,
    Yellow,
    LimeGreen,
    Green,
    SkyBlue,
    Blue,
    Purple,
    Pink,
}

impl LabelColor {
    pub const ALL: [LabelColor; 11] = [
        LabelColor::None,
        LabelColor::Black,
        LabelColor::Red,
        LabelColor::Orange,
        LabelColor::Yellow,
        LabelColor::LimeGreen,
        LabelColor::Green,
        LabelColor::SkyBlue,
        LabelColor::Blue,
        LabelColor::Purple,
        LabelColor::Pink,
    ];

    /// Value Trello expects in the `color` query parameter.
    pub fn as_wire(&self) -> &'static str {
        match self {
            LabelColor::None => "null",
            LabelColor::Black => "black",
            LabelColor::Red => "red",
            LabelColor::Orange => "orange",
            LabelColor::Yellow => "yellow",
            LabelColor::LimeGreen => "lime",
            LabelColor::Green => "green",
            LabelColor::SkyBlue => "sky",
            LabelColor::Blue => "blue",
            LabelColor::Purple => "purple",
            LabelColor::Pink => "pink",
        }
    }

    /// Map a wire color onto the palette.
    ///
    /// Trello also returns shade variants such as `green_dark`; those collapse
    /// onto their base color. Anything unrecognised is treated as colorless.
    pub fn from_wire(value: Option<&str>) -> Self {
        let Some(value) = value else {
            return LabelColor::None;
        };
        let base = value.split('_').next().unwrap_or(value);

        match base {
            "black" => LabelColor::Black,
            "red" => LabelColor::Red,
            "orange" => LabelColor::Orange,
            "yellow" => LabelColor::Yellow,
            "lime" => LabelColor::LimeGreen,
            "green" => LabelColor::Green,
            "sky" => LabelColor::SkyBlue,
            "blue" => LabelColor::Blue,
            "purple" => LabelColor::Purple,
            "pink" => LabelColor::Pink,
            _ => LabelColor::None,
        }
    }
}

impl fmt::Display for LabelColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LabelColor::None => "none",
            LabelColor::LimeGreen => "limegreen",
            LabelColor::SkyBlue => "skyblue",
            other => other.as_wire(),
        };
        write!(f, "{name}")
    }
}

impl FromStr for LabelColor {
    type Err = ModelError;

    #[track_caller]
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase().replace(['-', '_', ' '], "");

        match normalized.as_str() {
            "none" | "null" | "" => Ok(LabelColor::None),
            "limegreen" | "lime" => Ok(LabelColor::LimeGreen),
            "skyblue" | "sky" => Ok(LabelColor::SkyBlue),
            other => LabelColor::ALL
                .into_iter()
                .find(|color| color.as_wire() == other)
                .ok_or_else(|| ModelError::UnknownLabelColor {
                    value: value.to_string(),
                    location: ErrorLocation::caller(),
                }),
        }
    }
}
