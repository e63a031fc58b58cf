//! Curriculum levels and their rubric descriptions

use std::fmt;

/// Curriculum difficulty tier, in ascending order of difficulty
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Level {
    EarlyBeginner,
    Beginner,
    LateBeginner,
    EarlyIntermediate,
    Intermediate,
    LateIntermediate,
    EarlyAdvanced,
    Advanced,
    Professional,
    Various,
}

impl Level {
    /// Fixed curriculum ordering used by the level comparator
    pub const ORDER: [Level; 10] = [
        Level::EarlyBeginner,
        Level::Beginner,
        Level::LateBeginner,
        Level::EarlyIntermediate,
        Level::Intermediate,
        Level::LateIntermediate,
        Level::EarlyAdvanced,
        Level::Advanced,
        Level::Professional,
        Level::Various,
    ];

    /// Catalog label, exactly as stored on items
    pub fn label(self) -> &'static str {
        match self {
            Level::EarlyBeginner => "Early Beginner",
            Level::Beginner => "Beginner",
            Level::LateBeginner => "Late Beginner",
            Level::EarlyIntermediate => "Early Intermediate",
            Level::Intermediate => "Intermediate",
            Level::LateIntermediate => "Late Intermediate",
            Level::EarlyAdvanced => "Early Advanced",
            Level::Advanced => "Advanced",
            Level::Professional => "Professional",
            Level::Various => "Various",
        }
    }

    /// Exact label lookup, as used for sorting
    pub fn from_label(s: &str) -> Option<Level> {
        Level::ORDER.into_iter().find(|l| l.label() == s)
    }

    /// Lenient lookup: ignores case, whitespace, hyphens and underscores
    pub fn parse_loose(s: &str) -> Option<Level> {
        let key = loose_key(s);
        Level::ORDER
            .into_iter()
            .find(|l| loose_key(l.label()) == key)
    }

    /// Position in the curriculum ordering
    pub fn rank(self) -> usize {
        self as usize
    }

    pub fn description(self) -> &'static str {
        match self {
            Level::EarlyBeginner => {
                "First-position playing, open strings and simple rhythms; pieces of one or two pages."
            }
            Level::Beginner => {
                "Basic first-position fluency with simple bowings and clear, repetitive phrasing."
            }
            Level::LateBeginner => {
                "Introduces extensions, basic shifting and slurs across several notes."
            }
            Level::EarlyIntermediate => {
                "Regular shifting through the lower positions with varied bow strokes and dynamics."
            }
            Level::Intermediate => {
                "Neck positions throughout, vibrato expected, moderate tempos and longer forms."
            }
            Level::LateIntermediate => {
                "Early thumb position, double stops and faster passagework."
            }
            Level::EarlyAdvanced => {
                "Thumb position used freely, sustained technical passages and concerto movements."
            }
            Level::Advanced => {
                "Full range of the instrument, virtuosic demands and standard recital repertoire."
            }
            Level::Professional => {
                "Concert repertoire demanding complete technical and interpretive command."
            }
            Level::Various => "Collections or sets spanning several difficulty levels.",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Description shown when a level key is not recognized
pub const DEFAULT_LEVEL_DESCRIPTION: &str =
    "Difficulty has not been assessed for this piece.";

/// Rubric text for a level key; total over all strings
pub fn level_description(key: &str) -> &'static str {
    Level::parse_loose(key)
        .map(Level::description)
        .unwrap_or(DEFAULT_LEVEL_DESCRIPTION)
}

fn loose_key(s: &str) -> String {
    s.chars()
        .filter(|c| !c.is_whitespace() && *c != '-' && *c != '_')
        .flat_map(char::to_lowercase)
        .collect()
}
