use super::{HandlerAction, SubscriptionEvent, SyncStatus, SyncingConfig};
use serde_json::Value;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SyncingState {
    #[default]
    NotSyncing,
    Syncing,
}

/// Smooths the raw syncing stream into stable `Changed(true)` / `Changed(false)`
/// transitions.
///
/// The machine owns no timer. Arming the stop debounce yields
/// [`HandlerAction::ArmTimer`] with a fresh generation; the runtime must call
/// [`SyncingStateMachine::on_stop_timer_elapsed`] with that generation once the delay
/// has passed. Expiries carrying an older generation are ignored, so a late timer can
/// never undo a newer notification.
///
/// Transitions:
/// - not syncing + syncing status: `Changed(true)`, then `Data(status)`, arm the timer.
/// - syncing + syncing status: `Data(status)`, re-arm the timer.
/// - syncing + not-syncing status: re-arm the timer, no data.
/// - timer expiry: `Changed(false)` if the latest status is not-syncing or within
///   `tip_threshold` blocks of the highest block, otherwise nothing.
#[derive(Clone, Debug)]
pub struct SyncingStateMachine {
    config: SyncingConfig,
    state: SyncingState,
    latest: SyncStatus,
    generation: u64,
    pending_timer: Option<u64>,
}

impl SyncingStateMachine {
    pub fn new(config: SyncingConfig) -> Self {
        Self {
            config,
            state: SyncingState::NotSyncing,
            latest: SyncStatus::NotSyncing,
            generation: 0,
            pending_timer: None,
        }
    }

    pub fn state(&self) -> SyncingState {
        self.state
    }

    pub fn is_syncing(&self) -> bool {
        self.state == SyncingState::Syncing
    }

    /// Generation of the armed stop timer, if any.
    pub fn pending_timer(&self) -> Option<u64> {
        self.pending_timer
    }

    /// Feeds one decoded notification. `output` is the formatted notification that is
    /// forwarded as `Data`.
    pub fn on_status(&mut self, status: SyncStatus, output: Value) -> Vec<HandlerAction> {
        let syncing = status.is_syncing();
        self.latest = status;

        match (self.state, syncing) {
            (SyncingState::NotSyncing, true) => {
                self.state = SyncingState::Syncing;
                vec![
                    HandlerAction::Emit(SubscriptionEvent::Changed(Value::Bool(true))),
                    HandlerAction::Emit(SubscriptionEvent::Data(output)),
                    self.arm_stop_timer(),
                ]
            }
            (SyncingState::Syncing, true) => vec![
                HandlerAction::Emit(SubscriptionEvent::Data(output)),
                self.arm_stop_timer(),
            ],
            (SyncingState::Syncing, false) => vec![self.arm_stop_timer()],
            (SyncingState::NotSyncing, false) => Vec::new(),
        }
    }

    pub fn on_stop_timer_elapsed(&mut self, generation: u64) -> Option<SubscriptionEvent> {
        if self.pending_timer != Some(generation) {
            return None;
        }
        self.pending_timer = None;

        if self.state != SyncingState::Syncing || !self.stop_condition_holds() {
            return None;
        }

        self.state = SyncingState::NotSyncing;
        Some(SubscriptionEvent::Changed(Value::Bool(false)))
    }

    /// Drops the armed stop timer. Safe to call when none is pending.
    pub fn cancel_stop_timer(&mut self) -> Option<u64> {
        self.pending_timer.take()
    }

    fn arm_stop_timer(&mut self) -> HandlerAction {
        self.generation += 1;
        self.pending_timer = Some(self.generation);
        HandlerAction::ArmTimer {
            generation: self.generation,
            delay: self.config.debounce(),
        }
    }

    fn stop_condition_holds(&self) -> bool {
        match &self.latest {
            SyncStatus::NotSyncing => true,
            SyncStatus::Syncing(progress) => progress.is_near_tip(self.config.tip_threshold),
        }
    }
}
