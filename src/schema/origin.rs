use serde::{Deserialize, Serialize};

/// ISO 3166-1 alpha-2 code for Japan.
pub const JAPAN: &str = "JP";

/// A wrestler's place of origin.
///
/// `subdivision_code` (an ISO 3166-2 prefecture code) is present if and
/// only if `nation_code` is Japan. Use the constructors to keep it so.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Origin {
    pub nation_code: String,
    pub subdivision_code: Option<String>,
}

impl Origin {
    /// An origin in the given Japanese prefecture.
    pub fn japan(prefecture_code: &str) -> Self {
        Self {
            nation_code: JAPAN.to_string(),
            subdivision_code: Some(prefecture_code.to_string()),
        }
    }

    /// An origin outside Japan. Returns `None` for Japan itself.
    pub fn foreign(nation_code: &str) -> Option<Self> {
        if nation_code == JAPAN {
            return None;
        }
        Some(Self {
            nation_code: nation_code.to_string(),
            subdivision_code: None,
        })
    }

    pub fn is_japanese(&self) -> bool {
        self.nation_code == JAPAN
    }
}
