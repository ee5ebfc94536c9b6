use serde::{Deserialize, Serialize};
use std::fmt;

/// A ring name: the native-script form and its romanized reading.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GeneratedName {
    pub native: String,
    pub romanized: String,
}

impl fmt::Display for GeneratedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.romanized, self.native)
    }
}

/// A ring name together with its interpreted meaning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnotatedName {
    pub name: GeneratedName,
    pub meaning: String,
}
