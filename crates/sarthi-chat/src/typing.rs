use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};

/// Shared "Typing..." flag.
///
/// Counts in-flight submissions rather than holding a bool, so overlapping
/// sends keep it raised until the last one settles. Clones observe the
/// same counter.
#[derive(Debug, Clone, Default)]
pub struct TypingIndicator(Arc<AtomicUsize>);

impl TypingIndicator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.0.load(Ordering::Acquire) > 0
    }

    /// Raise the flag until the returned guard drops.
    pub fn begin(&self) -> TypingGuard {
        self.0.fetch_add(1, Ordering::AcqRel);
        TypingGuard(self.0.clone())
    }
}

/// Lowers the indicator on drop, whatever path the submission took.
#[derive(Debug)]
pub struct TypingGuard(Arc<AtomicUsize>);

impl Drop for TypingGuard {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::AcqRel);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nested_guards() {
        let typing = TypingIndicator::new();
        assert!(!typing.is_active());

        let a = typing.begin();
        let b = typing.clone().begin();
        drop(a);
        assert!(typing.is_active());
        drop(b);
        assert!(!typing.is_active());
    }
}
