use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name(pub i64);
    };
}

id_newtype!(PairId);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaggedType {
    Correct,
    Incorrect,
    Ambiguous,
}

impl TaggedType {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "correct" => Some(TaggedType::Correct),
            "incorrect" => Some(TaggedType::Incorrect),
            "ambiguous" => Some(TaggedType::Ambiguous),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TaggedType::Correct => "correct",
            TaggedType::Incorrect => "incorrect",
            TaggedType::Ambiguous => "ambiguous",
        }
    }
}

impl fmt::Display for TaggedType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
