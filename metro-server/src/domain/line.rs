//! Line definitions.
//!
//! A line is a user-declared sequence of stations plus display metadata.
//! Only the station sequence reaches the graph; colour and style stay here.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// Error returned when parsing an invalid line id.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid line id: {reason}")]
pub struct InvalidLineId {
    reason: &'static str,
}

/// Identifier of a line, e.g. `NSK-MSK-A`.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LineId(Arc<str>);

impl LineId {
    /// Parse a line id. Must be non-empty and contain no whitespace.
    pub fn parse(s: &str) -> Result<Self, InvalidLineId> {
        if s.is_empty() {
            return Err(InvalidLineId {
                reason: "must not be empty",
            });
        }
        if s.chars().any(char::is_whitespace) {
            return Err(InvalidLineId {
                reason: "must not contain whitespace",
            });
        }
        Ok(LineId(Arc::from(s)))
    }

    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for LineId {
    type Error = InvalidLineId;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        LineId::parse(&value)
    }
}

impl From<LineId> for String {
    fn from(id: LineId) -> Self {
        id.0.to_string()
    }
}

impl fmt::Debug for LineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LineId({})", self.as_str())
    }
}

impl fmt::Display for LineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Stroke style used when drawing a line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineStyle {
    #[default]
    Solid,
    Dashed,
    Dotted,
}

/// Presentation attributes of a line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineDisplay {
    /// Any CSS colour string.
    pub color: String,
    pub style: LineStyle,
}

impl LineDisplay {
    pub fn new(color: impl Into<String>, style: LineStyle) -> Self {
        Self {
            color: color.into(),
            style,
        }
    }
}

/// A declared line.
///
/// `stations` is kept exactly as declared, including names that may turn
/// out to be unknown or excluded when the line is compiled.
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    pub id: LineId,
    pub name: String,
    pub display: LineDisplay,
    pub stations: Vec<String>,
}

impl Line {
    pub fn new(
        id: LineId,
        name: impl Into<String>,
        display: LineDisplay,
        stations: Vec<String>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            display,
            stations,
        }
    }
}

/// Default colour for the line at `index`.
///
/// Rotates the hue by the golden angle so neighbouring indices get
/// well-separated colours.
pub fn distinct_color(index: usize) -> String {
    let hue = (index as f64 * 137.508) % 360.0;
    let hue = (hue * 1000.0).round() / 1000.0;
    format!("hsl({hue}, 72%, 45%)")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_line_ids() {
        assert!(LineId::parse("NSK-MSK-A").is_ok());
        assert!(LineId::parse("").is_err());
        assert!(LineId::parse("NSK MSK").is_err());
    }

    #[test]
    fn style_serde_lowercase() {
        assert_eq!(
            serde_json::to_string(&LineStyle::Dashed).unwrap(),
            "\"dashed\""
        );
        let style: LineStyle = serde_json::from_str("\"dotted\"").unwrap();
        assert_eq!(style, LineStyle::Dotted);
        assert_eq!(LineStyle::default(), LineStyle::Solid);
    }

    #[test]
    fn distinct_colors() {
        assert_eq!(distinct_color(0), "hsl(0, 72%, 45%)");
        assert_eq!(distinct_color(1), "hsl(137.508, 72%, 45%)");
        assert_eq!(distinct_color(2), "hsl(275.016, 72%, 45%)");
        assert_ne!(distinct_color(3), distinct_color(4));
    }
}
