//! Name, message template and sound checks.

use super::ValidationResult;
use crate::schema::{NotificationRule, SoundKind};

/// Placeholders substituted when a message is rendered.
pub const PLACEHOLDERS: &[&str] = &[
    "customerName",
    "amount",
    "dueDate",
    "daysOverdue",
    "daysUntilDue",
];

const NAME_MIN: usize = 2;
const NAME_MAX: usize = 100;

pub(super) fn validate_identity(rule: &NotificationRule, result: &mut ValidationResult) {
    let len = rule.name.trim().chars().count();
    if !(NAME_MIN..=NAME_MAX).contains(&len) {
        result.error(
            "name",
            format!("name must be {NAME_MIN}-{NAME_MAX} characters, got {len}"),
        );
    }
}

pub(super) fn validate_message(rule: &NotificationRule, result: &mut ValidationResult) {
    if rule.message.title.trim().is_empty() {
        result.error("message.title", "title must not be empty");
    }

    for (path, template) in [
        ("message.title", &rule.message.title),
        ("message.body", &rule.message.body),
    ] {
        for name in placeholder_names(template) {
            if !PLACEHOLDERS.contains(&name) {
                result.warn(path, format!("unknown placeholder {{{name}}} is left as-is"));
            }
        }
    }
}

pub(super) fn validate_sound(rule: &NotificationRule, result: &mut ValidationResult) {
    let sound = &rule.sound;
    if !(0.0..=1.0).contains(&sound.volume) {
        result.warn(
            "sound.volume",
            format!("volume {} outside 0-1, it will be clamped", sound.volume),
        );
    }
    if sound.enabled && sound.kind == SoundKind::Custom && sound.custom_url.is_none() {
        result.warn("sound.customUrl", "custom sound without a source plays nothing");
    }
}

/// Names inside `{...}` that look like identifiers.
fn placeholder_names(template: &str) -> impl Iterator<Item = &str> {
    template.split('{').skip(1).filter_map(|chunk| {
        let (name, _) = chunk.split_once('}')?;
        (!name.is_empty() && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_'))
            .then_some(name)
    })
}
