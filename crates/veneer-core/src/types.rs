//! Core types for Veneer

use crate::color::Color;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Participant identifier assigned by the host registry - cheaply cloneable.
///
/// Hosts key players by number or by string depending on the page, so both
/// JSON forms deserialize to the same id.
#[derive(Clone, Debug, Hash, Eq, PartialEq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "RawParticipantId", into = "String")]
pub struct ParticipantId(Arc<str>);

impl ParticipantId {
    pub fn new(s: impl Into<String>) -> Self {
        Self(Arc::from(s.into()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for ParticipantId {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for ParticipantId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<ParticipantId> for String {
    fn from(id: ParticipantId) -> Self {
        id.0.to_string()
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawParticipantId {
    Text(String),
    Number(u64),
}

impl TryFrom<RawParticipantId> for ParticipantId {
    type Error = Error;

    fn try_from(raw: RawParticipantId) -> Result<Self> {
        match raw {
            RawParticipantId::Text(s) if s.is_empty() => Err(Error::parse("empty participant id")),
            RawParticipantId::Text(s) => Ok(Self::new(s)),
            RawParticipantId::Number(n) => Ok(Self::new(n.to_string())),
        }
    }
}

/// Registry-true identity of a participant.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    #[serde(rename = "userName", alias = "user_name")]
    pub user_name: String,
    #[serde(default)]
    pub level: u32,
}

impl Participant {
    pub fn new(user_name: impl Into<String>, level: u32) -> Self {
        Self {
            user_name: user_name.into(),
            level,
        }
    }

    /// The rank text the host renders for this participant.
    pub fn rank_label(&self) -> String {
        rank_label(self.level)
    }
}

pub fn rank_label(level: u32) -> String {
    format!("Level {}", level)
}

/// Kind of identity an element carries.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    Name,
    #[serde(alias = "level")]
    Rank,
}

/// An animated colour treatment: 2-6 colours swept on a fixed cadence.
///
/// Bounds are checked on every construction path, including deserialization,
/// so a stored spec is always valid.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawGradient", into = "RawGradient")]
pub struct GradientSpec {
    colors: Vec<Color>,
    period_ms: u32,
}

impl GradientSpec {
    pub const MIN_COLORS: usize = 2;
    pub const MAX_COLORS: usize = 6;
    pub const MIN_PERIOD_MS: u32 = 10;
    pub const MAX_PERIOD_MS: u32 = 1000;
    pub const DEFAULT_PERIOD_MS: u32 = 100;

    pub fn new(colors: Vec<Color>, period_ms: u32) -> Result<Self> {
        if !(Self::MIN_COLORS..=Self::MAX_COLORS).contains(&colors.len())
            || !(Self::MIN_PERIOD_MS..=Self::MAX_PERIOD_MS).contains(&period_ms)
        {
            return Err(Error::validation("Invalid: 2-6 colors, speed 10-1000."));
        }
        Ok(Self { colors, period_ms })
    }

    /// Parse raw colour strings and build a spec.
    pub fn parse<S: AsRef<str>>(colors: &[S], period_ms: u32) -> Result<Self> {
        let colors = colors
            .iter()
            .map(|c| Color::parse(c.as_ref()))
            .collect::<Result<Vec<_>>>()?;
        Self::new(colors, period_ms)
    }

    /// Built-in named treatments.
    pub fn preset(name: &str) -> Option<Self> {
        let (colors, period_ms): (&[&str], u32) = match name.trim().to_lowercase().as_str() {
            "fire" => (&["#ff4500", "#ff8c00", "#ffd700"], 80),
            "ocean" => (&["#00bfff", "#1e90ff", "#4682b4"], 100),
            "sunset" => (&["#ff4500", "#ffa500", "#ffd700", "#daa520"], 120),
            "neon" => (&["#ff00ff", "#00ffff", "#ffff00"], 60),
            "rainbow" => (&["red", "orange", "yellow", "green", "blue", "violet"], 90),
            _ => return None,
        };
        Self::parse(colors, period_ms).ok()
    }

    pub fn preset_names() -> &'static [&'static str] {
        &["fire", "ocean", "sunset", "neon", "rainbow"]
    }

    pub fn colors(&self) -> &[Color] {
        &self.colors
    }

    pub fn period_ms(&self) -> u32 {
        self.period_ms
    }

    /// CSS `linear-gradient` at `angle` degrees with stops spread evenly over 0-100%.
    pub fn css_image(&self, angle: u16) -> String {
        let last = (self.colors.len() - 1) as f64;
        let stops = self
            .colors
            .iter()
            .enumerate()
            .map(|(i, color)| format!("{} {}%", color, (i as f64 / last) * 100.0))
            .collect::<Vec<_>>()
            .join(", ");
        format!("linear-gradient({}deg, {})", angle, stops)
    }
}

/// Wire shape of a gradient. `speed` is the legacy field name.
#[derive(Serialize, Deserialize)]
struct RawGradient {
    colors: Vec<String>,
    #[serde(rename = "periodMs", alias = "speed")]
    period_ms: u32,
}

impl TryFrom<RawGradient> for GradientSpec {
    type Error = Error;

    fn try_from(raw: RawGradient) -> Result<Self> {
        Self::parse(&raw.colors, raw.period_ms)
    }
}

impl From<GradientSpec> for RawGradient {
    fn from(spec: GradientSpec) -> Self {
        Self {
            colors: spec.colors.into_iter().map(String::from).collect(),
            period_ms: spec.period_ms,
        }
    }
}

/// Opaque handle to a node in the host document.
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, PartialOrd, Ord)]
pub struct NodeId(pub u64);

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "node#{}", self.0)
    }
}

/// Style carried by a retained-mode text object.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TextStyle {
    pub fill: u32,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self { fill: 0xFFFFFF }
    }
}

/// A retained-mode text object as handed to the host render primitive.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TextObject {
    pub text: String,
    pub style: TextStyle,
}

impl TextObject {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: TextStyle::default(),
        }
    }
}
