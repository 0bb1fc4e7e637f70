use serde::{Deserialize, Serialize};

use crate::app::infrastructure::error::Result;
use crate::app::infrastructure::storage::{Storage, THEME_KEY};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
        }
    }

    pub fn parse(value: &str) -> Option<Theme> {
        match value.trim() {
            "dark" => Some(Theme::Dark),
            "light" => Some(Theme::Light),
            _ => None,
        }
    }

    pub fn toggled(self) -> Theme {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }

    /// Stored preference, dark when absent or unrecognised.
    pub fn load(storage: &impl Storage) -> Theme {
        storage
            .get(THEME_KEY)
            .and_then(|v| Theme::parse(&v))
            .unwrap_or_default()
    }

    pub fn save(self, storage: &mut impl Storage) -> Result<()> {
        storage.set(THEME_KEY, self.as_str())
    }
}
