//! Closed participant colour categories and per-event styling.
//!
//! Every participant carries a [`PaletteKey`]. Display attributes come from a
//! fixed lookup table; unknown keys in input data fall back to
//! [`PaletteKey::DEFAULT`] instead of failing.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::model::{Event, Participant};

/// Colour category of a participant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "String")]
pub enum PaletteKey {
    Mint,
    CalBlue,
    Pink,
    Yellow,
}

/// Display attributes for one palette key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PaletteEntry {
    /// Background class, e.g. `bg-mint`.
    pub background: &'static str,
    /// Text class, e.g. `text-mintDark`.
    pub text: &'static str,
    /// Border class, e.g. `border-mintDark`.
    pub border: &'static str,
    /// Raw light hex used in gradients.
    pub hex: &'static str,
    /// Raw dark hex used for text/borders.
    pub dark_hex: &'static str,
}

const MINT: PaletteEntry = PaletteEntry {
    background: "bg-mint",
    text: "text-mintDark",
    border: "border-mintDark",
    hex: "#B2DFDB",
    dark_hex: "#00695C",
};

const CAL_BLUE: PaletteEntry = PaletteEntry {
    background: "bg-calBlue",
    text: "text-calBlueDark",
    border: "border-calBlueDark",
    hex: "#B3CDE0",
    dark_hex: "#01579B",
};

const PINK: PaletteEntry = PaletteEntry {
    background: "bg-pink",
    text: "text-pinkDark",
    border: "border-pinkDark",
    hex: "#F4B6C2",
    dark_hex: "#880E4F",
};

const YELLOW: PaletteEntry = PaletteEntry {
    background: "bg-yellow",
    text: "text-yellowDark",
    border: "border-yellowDark",
    hex: "#F3E5AB",
    dark_hex: "#F57F17",
};

impl PaletteKey {
    /// Used when a participant or colour key cannot be resolved.
    pub const DEFAULT: PaletteKey = PaletteKey::CalBlue;

    pub const ALL: [PaletteKey; 4] = [
        PaletteKey::Mint,
        PaletteKey::CalBlue,
        PaletteKey::Pink,
        PaletteKey::Yellow,
    ];

    pub fn entry(self) -> &'static PaletteEntry {
        match self {
            PaletteKey::Mint => &MINT,
            PaletteKey::CalBlue => &CAL_BLUE,
            PaletteKey::Pink => &PINK,
            PaletteKey::Yellow => &YELLOW,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PaletteKey::Mint => "mint",
            PaletteKey::CalBlue => "calBlue",
            PaletteKey::Pink => "pink",
            PaletteKey::Yellow => "yellow",
        }
    }

    /// Lenient lookup: unknown keys resolve to [`PaletteKey::DEFAULT`].
    pub fn resolve(key: &str) -> PaletteKey {
        key.parse().unwrap_or_else(|_| {
            log::debug!("unknown palette key {:?}, using {}", key, PaletteKey::DEFAULT);
            PaletteKey::DEFAULT
        })
    }
}

impl Default for PaletteKey {
    fn default() -> Self {
        PaletteKey::DEFAULT
    }
}

impl fmt::Display for PaletteKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaletteKey {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PaletteKey::ALL
            .into_iter()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| EngineError::InvalidPaletteKey(s.to_string()))
    }
}

impl From<String> for PaletteKey {
    fn from(s: String) -> Self {
        PaletteKey::resolve(&s)
    }
}

/// One band of a striped multi-participant background.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ColorStop {
    pub hex: &'static str,
    pub start_percent: f64,
    pub end_percent: f64,
}

/// How an event block is painted.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum EventStyle {
    /// A single participant colour.
    Solid { key: PaletteKey },
    /// Equal-width diagonal bands, one per listed participant, in list order.
    Striped { stops: Vec<ColorStop> },
}

impl EventStyle {
    /// CSS `background` value for this style.
    pub fn css_background(&self) -> String {
        match self {
            EventStyle::Solid { key } => key.entry().hex.to_string(),
            EventStyle::Striped { stops } => {
                let bands: Vec<String> = stops
                    .iter()
                    .map(|s| {
                        format!(
                            "{hex} {start}%, {hex} {end}%",
                            hex = s.hex,
                            start = s.start_percent,
                            end = s.end_percent
                        )
                    })
                    .collect();
                format!("linear-gradient(135deg, {})", bands.join(", "))
            }
        }
    }
}

fn palette_of(participant_id: &str, participants: &[Participant]) -> PaletteKey {
    participants
        .iter()
        .find(|p| p.id == participant_id)
        .map(|p| p.color)
        .unwrap_or(PaletteKey::DEFAULT)
}

/// Pick the style for an event.
///
/// Events listing more than one participant are striped; everything else is
/// solid in the colour of the first listed (or the single) participant.
/// Participants missing from the roster use the default palette entry.
pub fn event_style(event: &Event, participants: &[Participant]) -> EventStyle {
    if event.is_joint() {
        let step = 100.0 / event.participant_ids.len() as f64;
        let stops = event
            .participant_ids
            .iter()
            .enumerate()
            .map(|(i, id)| ColorStop {
                hex: palette_of(id, participants).entry().hex,
                start_percent: i as f64 * step,
                end_percent: (i + 1) as f64 * step,
            })
            .collect();
        return EventStyle::Striped { stops };
    }

    let key = event
        .participant_ids
        .first()
        .or(event.participant_id.as_ref())
        .map(|id| palette_of(id, participants))
        .unwrap_or(PaletteKey::DEFAULT);
    EventStyle::Solid { key }
}
