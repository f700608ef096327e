use std::fmt;

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

/// Placeholder written for values that do not exist on one side of a change.
pub const NOT_APPLICABLE: &str = "N/A";

/// Line a change record is anchored to.
///
/// Serialized as a JSON number, or as the string `"N/A"` when no line applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LineAnchor {
    /// 1-based line number.
    Line(u32),
    /// No meaningful line exists for the record.
    NotApplicable,
}

impl From<u32> for LineAnchor {
    fn from(line: u32) -> Self {
        Self::Line(line)
    }
}

impl fmt::Display for LineAnchor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Line(line) => write!(f, "{line}"),
            Self::NotApplicable => f.write_str(NOT_APPLICABLE),
        }
    }
}

impl Serialize for LineAnchor {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Self::Line(line) => serializer.serialize_u32(*line),
            Self::NotApplicable => serializer.serialize_str(NOT_APPLICABLE),
        }
    }
}

impl<'de> Deserialize<'de> for LineAnchor {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Line(u32),
            Text(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Line(line) => Ok(Self::Line(line)),
            Raw::Text(text) if text == NOT_APPLICABLE => Ok(Self::NotApplicable),
            Raw::Text(text) => Err(de::Error::custom(format!(
                "expected a line number or \"{NOT_APPLICABLE}\", found \"{text}\""
            ))),
        }
    }
}

/// One reported difference between an old and a new documentation block.
///
/// Field order matches the key order of the written report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeRecord {
    /// Repository-relative path of the file.
    pub file: String,
    /// Line the change is anchored to.
    pub line: LineAnchor,
    /// Previous text, or `"N/A"` when nothing was removed.
    pub old: String,
    /// Current text, or `"N/A"` when nothing was added.
    pub new: String,
}

impl ChangeRecord {
    /// Record for text that changed in place.
    pub fn modified(
        file: impl Into<String>,
        line: impl Into<LineAnchor>,
        old: impl Into<String>,
        new: impl Into<String>,
    ) -> Self {
        Self {
            file: file.into(),
            line: line.into(),
            old: old.into(),
            new: new.into(),
        }
    }

    /// Record for text that only exists on the old side.
    pub fn removed(
        file: impl Into<String>,
        line: impl Into<LineAnchor>,
        old: impl Into<String>,
    ) -> Self {
        Self::modified(file, line, old, NOT_APPLICABLE)
    }

    /// Record for text that only exists on the new side.
    pub fn added(
        file: impl Into<String>,
        line: impl Into<LineAnchor>,
        new: impl Into<String>,
    ) -> Self {
        Self::modified(file, line, NOT_APPLICABLE, new)
    }

    /// Returns `true` when the record has no old-side text.
    pub fn is_addition(&self) -> bool {
        self.old == NOT_APPLICABLE
    }
}
