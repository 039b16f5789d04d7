//! Stale-result guard shared by the page controllers.

/// Marker handed out with every issued request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SequenceToken(u64);

impl SequenceToken {
    pub fn value(&self) -> u64 {
        self.0
    }
}

/// Monotonic token source deciding which in-flight response may still apply.
///
/// Only the most recently issued token is accepted, and only while mounted.
/// Unmounting burns the current token, so nothing issued before a teardown
/// can apply after a later remount.
#[derive(Debug, Clone, Default)]
pub struct SequenceGuard {
    latest: u64,
    mounted: bool,
}

impl SequenceGuard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mount(&mut self) {
        self.mounted = true;
    }

    pub fn unmount(&mut self) {
        self.latest += 1;
        self.mounted = false;
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub fn issue(&mut self) -> SequenceToken {
        self.latest += 1;
        SequenceToken(self.latest)
    }

    pub fn accepts(&self, token: SequenceToken) -> bool {
        self.mounted && token.0 == self.latest
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_latest_token_accepted() {
        let mut guard = SequenceGuard::new();
        guard.mount();
        let first = guard.issue();
        let second = guard.issue();
        assert!(!guard.accepts(first));
        assert!(guard.accepts(second));
    }

    #[test]
    fn test_unmount_burns_outstanding_tokens() {
        let mut guard = SequenceGuard::new();
        guard.mount();
        let token = guard.issue();
        guard.unmount();
        assert!(!guard.accepts(token));
        guard.mount();
        assert!(!guard.accepts(token));
    }
}
