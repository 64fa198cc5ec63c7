//! Singleton user settings.

use crate::model::clock::{ClockTime, DEFAULT_REMINDER_TIME};
use serde::{Deserialize, Serialize};

/// Color theme preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Theme {
    #[default]
    Light,
    Dark,
    /// Follow the host color-scheme preference.
    Auto,
}

impl Theme {
    /// Theme selected by the quick light/dark toggle. `Auto` counts as light.
    pub fn toggled(self) -> Self {
        match self {
            Self::Dark => Self::Light,
            Self::Light | Self::Auto => Self::Dark,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    pub theme: Theme,
    pub reminders_enabled: bool,
    pub reminder_time: ClockTime,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            theme: Theme::Light,
            reminders_enabled: true,
            reminder_time: DEFAULT_REMINDER_TIME,
        }
    }
}

/// Shallow-merge patch for [`Settings`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SettingsPatch {
    pub theme: Option<Theme>,
    pub reminders_enabled: Option<bool>,
    pub reminder_time: Option<ClockTime>,
}

impl SettingsPatch {
    pub fn apply_to(&self, target: &mut Settings) {
        if let Some(theme) = self.theme {
            target.theme = theme;
        }
        if let Some(enabled) = self.reminders_enabled {
            target.reminders_enabled = enabled;
        }
        if let Some(time) = self.reminder_time {
            target.reminder_time = time;
        }
    }
}
