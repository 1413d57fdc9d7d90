//! Audio cue preferences attached to a rule.

use serde::{Deserialize, Serialize};

/// Kind of sound the audio capability is asked to play.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum SoundKind {
    Notification,
    Urgent,
    Reminder,
    Custom,
}

impl SoundKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SoundKind::Notification => "notification",
            SoundKind::Urgent => "urgent",
            SoundKind::Reminder => "reminder",
            SoundKind::Custom => "custom",
        }
    }
}

impl std::fmt::Display for SoundKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SoundSettings {
    #[serde(default)]
    pub enabled: bool,
    #[serde(rename = "type", default = "default_sound_kind")]
    pub kind: SoundKind,
    #[serde(default = "default_volume")]
    pub volume: f64,
    /// Source for `custom` sounds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_url: Option<String>,
}

impl Default for SoundSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            kind: SoundKind::Notification,
            volume: default_volume(),
            custom_url: None,
        }
    }
}

fn default_sound_kind() -> SoundKind {
    SoundKind::Notification
}

fn default_volume() -> f64 {
    0.7
}
