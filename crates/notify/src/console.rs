//! Sink that writes notifications to the log, for headless workers.

use std::sync::Arc;

use tracing::{info, warn};

use ledger_rules::{DueDateAlert, NotificationRule};

use crate::traits::{DispatchSink, Notification, NotifyError, SoundCue, SoundPlayer};

/// Logs each notification and hands its sound cue to a [`SoundPlayer`].
pub struct LogSink {
    player: Arc<dyn SoundPlayer>,
}

impl LogSink {
    pub fn new() -> Self {
        Self::with_player(Arc::new(LogSoundPlayer))
    }

    pub fn with_player(player: Arc<dyn SoundPlayer>) -> Self {
        Self { player }
    }
}

impl Default for LogSink {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl DispatchSink for LogSink {
    async fn deliver(
        &self,
        _rule: &NotificationRule,
        alert: &DueDateAlert,
        notification: &Notification,
    ) -> Result<(), NotifyError> {
        if notification.intent.notification {
            info!(
                rule_id = %notification.rule_id,
                transaction_id = %alert.transaction_id,
                priority = %notification.priority,
                sticky = notification.sticky,
                "{} - {}",
                notification.title,
                notification.body
            );
        }

        // Audio is best effort: a failed cue never fails the delivery.
        if let Some(cue) = &notification.sound {
            if let Err(e) = self.player.play(cue) {
                warn!(rule_id = %notification.rule_id, error = %e, "sound cue failed");
            }
        }
        Ok(())
    }

    fn sink_name(&self) -> &str {
        "log"
    }
}

/// Stand-in audio capability that records the cue in the log.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSoundPlayer;

impl SoundPlayer for LogSoundPlayer {
    fn play(&self, cue: &SoundCue) -> Result<(), NotifyError> {
        tracing::debug!(kind = %cue.kind, volume = cue.volume, "play sound");
        Ok(())
    }
}
