//! Picks the audio cue for an alert.
//!
//! Urgency overrides the rule's configured sound: urgent and high priority
//! alerts always use the `urgent` cue, medium ones the `reminder` cue. Low
//! priority alerts keep whatever the rule asked for.

use ledger_rules::schema::{SoundKind, SoundSettings};
use ledger_rules::Priority;

use crate::traits::SoundCue;

/// Cue kind for an alert of `priority` under a rule configured with `configured`.
pub fn sound_kind_for(priority: Priority, configured: SoundKind) -> SoundKind {
    match priority {
        Priority::Urgent | Priority::High => SoundKind::Urgent,
        Priority::Medium => SoundKind::Reminder,
        Priority::Low => configured,
    }
}

/// `None` when the rule has sound disabled.
pub fn select_cue(settings: &SoundSettings, priority: Priority) -> Option<SoundCue> {
    if !settings.enabled {
        return None;
    }
    let kind = sound_kind_for(priority, settings.kind);
    let custom_url = match kind {
        SoundKind::Custom => settings.custom_url.clone(),
        _ => None,
    };
    Some(SoundCue {
        kind,
        volume: clamp_volume(settings.volume),
        custom_url,
    })
}

fn clamp_volume(volume: f64) -> f64 {
    if volume.is_nan() {
        return 0.0;
    }
    volume.clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(kind: SoundKind, volume: f64) -> SoundSettings {
        SoundSettings {
            enabled: true,
            kind,
            volume,
            custom_url: Some("sounds/bell.mp3".to_string()),
        }
    }

    #[test]
    fn disabled_sound_gives_no_cue() {
        let s = SoundSettings {
            enabled: false,
            ..settings(SoundKind::Urgent, 0.5)
        };
        assert!(select_cue(&s, Priority::Urgent).is_none());
    }

    #[test]
    fn priority_overrides_configured_kind() {
        let s = settings(SoundKind::Notification, 0.5);
        assert_eq!(select_cue(&s, Priority::Urgent).unwrap().kind, SoundKind::Urgent);
        assert_eq!(select_cue(&s, Priority::High).unwrap().kind, SoundKind::Urgent);
        assert_eq!(select_cue(&s, Priority::Medium).unwrap().kind, SoundKind::Reminder);
        assert_eq!(select_cue(&s, Priority::Low).unwrap().kind, SoundKind::Notification);
    }

    #[test]
    fn custom_url_only_for_custom_cues() {
        let s = settings(SoundKind::Custom, 0.5);
        let low = select_cue(&s, Priority::Low).unwrap();
        assert_eq!(low.kind, SoundKind::Custom);
        assert_eq!(low.custom_url.as_deref(), Some("sounds/bell.mp3"));

        let urgent = select_cue(&s, Priority::Urgent).unwrap();
        assert!(urgent.custom_url.is_none());
    }

    #[test]
    fn volume_is_clamped() {
        assert_eq!(select_cue(&settings(SoundKind::Urgent, 1.7), Priority::Low).unwrap().volume, 1.0);
        assert_eq!(select_cue(&settings(SoundKind::Urgent, -0.2), Priority::Low).unwrap().volume, 0.0);
        assert_eq!(select_cue(&settings(SoundKind::Urgent, 0.4), Priority::Low).unwrap().volume, 0.4);
    }
}
