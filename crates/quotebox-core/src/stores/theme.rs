use std::sync::Arc;

use quotebox_cache::KeyValueStore;
use tracing::{debug, warn};

use super::THEME_KEY;
use crate::{models::Theme, Result};

/// Light/dark preference, stored as the bare word
pub struct ThemeStore {
    backend: Arc<dyn KeyValueStore>,
    theme: Theme,
}

impl ThemeStore {
    pub fn open(backend: Arc<dyn KeyValueStore>) -> Self {
        let theme = match backend.get(THEME_KEY) {
            Ok(Some(raw)) => Theme::parse(&raw).unwrap_or_else(|| {
                warn!("Unknown theme '{}', using light", raw);
                Theme::default()
            }),
            Ok(None) => Theme::default(),
            Err(e) => {
                warn!("Failed to read theme, using light: {}", e);
                Theme::default()
            }
        };

        Self { backend, theme }
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn set(&mut self, theme: Theme) -> Result<Theme> {
        self.backend.set(THEME_KEY, theme.as_str())?;
        self.theme = theme;
        debug!("Theme set to {}", theme);
        Ok(theme)
    }

    /// Flip light <-> dark and persist right away
    pub fn toggle(&mut self) -> Result<Theme> {
        self.set(self.theme.toggled())
    }
}
