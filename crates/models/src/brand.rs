use std::{fmt, str::FromStr};

use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;
use ts_rs::TS;

/// Swatches offered by the brand form before any custom colour is added.
pub const PREDEFINED_COLORS: [&str; 15] = [
    "#3B82F6", "#EF4444", "#10B981", "#F59E0B", "#8B5CF6", "#EC4899", "#06B6D4", "#84CC16",
    "#F97316", "#6366F1", "#14B8A6", "#F43F5E", "#8B5A2B", "#1F2937", "#6B7280",
];

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Unknown brand tone: {0}")]
pub struct ParseToneError(pub String);

/// Visual tone of the brand. `Unset` travels as an empty string.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum Tone {
    Modern,
    Classic,
    Playful,
    Professional,
    Bold,
    #[default]
    #[serde(rename = "")]
    Unset,
}

impl Tone {
    pub const ALL: [Tone; 5] = [
        Tone::Modern,
        Tone::Classic,
        Tone::Playful,
        Tone::Professional,
        Tone::Bold,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Tone::Modern => "modern",
            Tone::Classic => "classic",
            Tone::Playful => "playful",
            Tone::Professional => "professional",
            Tone::Bold => "bold",
            Tone::Unset => "",
        }
    }

    pub fn is_set(&self) -> bool {
        !matches!(self, Tone::Unset)
    }

    /// Capitalized label, e.g. "Professional".
    pub fn label(&self) -> &'static str {
        match self {
            Tone::Modern => "Modern",
            Tone::Classic => "Classic",
            Tone::Playful => "Playful",
            Tone::Professional => "Professional",
            Tone::Bold => "Bold",
            Tone::Unset => "",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Tone::Modern => "Clean, minimalist, contemporary",
            Tone::Classic => "Timeless, elegant, traditional",
            Tone::Playful => "Fun, creative, energetic",
            Tone::Professional => "Corporate, trustworthy, reliable",
            Tone::Bold => "Strong, impactful, confident",
            Tone::Unset => "",
        }
    }
}

impl fmt::Display for Tone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Tone {
    type Err = ParseToneError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "modern" => Ok(Tone::Modern),
            "classic" => Ok(Tone::Classic),
            "playful" => Ok(Tone::Playful),
            "professional" => Ok(Tone::Professional),
            "bold" => Ok(Tone::Bold),
            "" | "none" | "unset" => Ok(Tone::Unset),
            other => Err(ParseToneError(other.to_string())),
        }
    }
}

/// Everything the user has told us about their brand.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase", default)]
#[ts(export)]
pub struct BrandData {
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub description: String,
    /// Hex colour strings in selection order, no duplicates.
    #[serde(deserialize_with = "null_as_default")]
    pub colors: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub tone: Tone,
    #[serde(deserialize_with = "null_as_default")]
    pub industry: String,
    #[serde(deserialize_with = "null_as_default")]
    pub target_audience: String,
}

/// Explicit `null` reads the same as a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl BrandData {
    /// Name and description are the minimum needed to ask for concepts.
    pub fn has_basic_info(&self) -> bool {
        !self.name.is_empty() && !self.description.is_empty()
    }

    /// Basic info plus at least one colour and a tone.
    pub fn is_complete(&self) -> bool {
        self.has_basic_info() && !self.colors.is_empty() && self.tone.is_set()
    }

    pub fn has_color(&self, color: &str) -> bool {
        self.colors.iter().any(|c| c == color)
    }
}
