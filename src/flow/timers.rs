use super::state::TimerKind;
use log::debug;
use std::collections::HashMap;
use tokio_util::sync::CancellationToken;

/// Owns the cancellation handle of every armed timer and of the polling loop.
///
/// All handles are children of one root token, so cancelling the root tears
/// down everything the flow has scheduled.
#[derive(Debug)]
pub struct TimerRegistry {
    root: CancellationToken,
    timers: HashMap<TimerKind, CancellationToken>,
    polling: Option<CancellationToken>,
}

impl TimerRegistry {
    pub fn new(root: CancellationToken) -> Self {
        Self {
            root,
            timers: HashMap::new(),
            polling: None,
        }
    }

    /// Arms `kind`, replacing (and cancelling) an earlier timer of the same kind.
    pub fn arm(&mut self, kind: TimerKind) -> CancellationToken {
        let token = self.root.child_token();
        if let Some(previous) = self.timers.insert(kind, token.clone()) {
            debug!("Re-arming {:?}, cancelling the previous one", kind);
            previous.cancel();
        }
        token
    }

    /// Returns true if a timer was armed.
    pub fn cancel(&mut self, kind: TimerKind) -> bool {
        match self.timers.remove(&kind) {
            Some(token) => {
                token.cancel();
                debug!("Cancelled {:?}", kind);
                true
            }
            None => false,
        }
    }

    /// Forgets a timer that already fired.
    pub fn settle(&mut self, kind: TimerKind) {
        self.timers.remove(&kind);
    }

    pub fn start_polling(&mut self) -> CancellationToken {
        self.stop_polling();
        let token = self.root.child_token();
        self.polling = Some(token.clone());
        token
    }

    pub fn stop_polling(&mut self) -> bool {
        match self.polling.take() {
            Some(token) => {
                token.cancel();
                true
            }
            None => false,
        }
    }

    pub fn is_armed(&self, kind: TimerKind) -> bool {
        self.timers.contains_key(&kind)
    }

    pub fn is_polling(&self) -> bool {
        self.polling.is_some()
    }

    /// Armed timers plus the polling loop, if running.
    pub fn active_count(&self) -> usize {
        self.timers.len() + usize::from(self.polling.is_some())
    }

    pub fn cancel_all(&mut self) {
        for (_, token) in self.timers.drain() {
            token.cancel();
        }
        self.stop_polling();
    }
}

impl Drop for TimerRegistry {
    fn drop(&mut self) {
        self.cancel_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arm_and_cancel() {
        let mut timers = TimerRegistry::new(CancellationToken::new());
        let token = timers.arm(TimerKind::TitleDisplay);
        assert!(timers.is_armed(TimerKind::TitleDisplay));
        assert_eq!(timers.active_count(), 1);

        assert!(timers.cancel(TimerKind::TitleDisplay));
        assert!(token.is_cancelled());
        assert!(!timers.cancel(TimerKind::TitleDisplay));
        assert_eq!(timers.active_count(), 0);
    }

    #[test]
    fn test_rearming_cancels_previous() {
        let mut timers = TimerRegistry::new(CancellationToken::new());
        let first = timers.arm(TimerKind::IntroFailsafe);
        let second = timers.arm(TimerKind::IntroFailsafe);
        assert!(first.is_cancelled());
        assert!(!second.is_cancelled());
        assert_eq!(timers.active_count(), 1);
    }

    #[test]
    fn test_settle_does_not_cancel() {
        let mut timers = TimerRegistry::new(CancellationToken::new());
        let token = timers.arm(TimerKind::CelebrationDisplay);
        timers.settle(TimerKind::CelebrationDisplay);
        assert!(!token.is_cancelled());
        assert_eq!(timers.active_count(), 0);
    }

    #[test]
    fn test_polling_counts_as_active() {
        let mut timers = TimerRegistry::new(CancellationToken::new());
        let poll = timers.start_polling();
        assert!(timers.is_polling());
        assert_eq!(timers.active_count(), 1);

        assert!(timers.stop_polling());
        assert!(poll.is_cancelled());
        assert!(!timers.stop_polling());
    }

    #[test]
    fn test_root_cancellation_reaches_children() {
        let root = CancellationToken::new();
        let mut timers = TimerRegistry::new(root.clone());
        let timer = timers.arm(TimerKind::TitleDisplay);
        let poll = timers.start_polling();

        root.cancel();
        assert!(timer.is_cancelled());
        assert!(poll.is_cancelled());
    }

    #[test]
    fn test_cancel_all() {
        let mut timers = TimerRegistry::new(CancellationToken::new());
        let a = timers.arm(TimerKind::TitleDisplay);
        let b = timers.arm(TimerKind::CelebrationDisplay);
        let p = timers.start_polling();

        timers.cancel_all();
        assert!(a.is_cancelled() && b.is_cancelled() && p.is_cancelled());
        assert_eq!(timers.active_count(), 0);
    }
}
