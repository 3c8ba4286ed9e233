//! Deferred actions tied to a scope.

use std::fmt;

/// Runs a closure when dropped, unless released first.
///
/// # Example
///
/// ```
/// use rangebuf::guard::ScopeGuard;
///
/// let mut log = Vec::new();
/// {
///     let _guard = ScopeGuard::new(|| log.push("cleanup"));
/// }
/// assert_eq!(log, vec!["cleanup"]);
/// ```
#[must_use = "the action runs immediately if the guard is not bound to a variable"]
pub struct ScopeGuard<F: FnOnce()> {
    action: Option<F>,
}

impl<F: FnOnce()> ScopeGuard<F> {
    pub fn new(action: F) -> Self {
        Self {
            action: Some(action),
        }
    }

    /// Disarm the guard. The action will not run.
    pub fn release(&mut self) {
        self.action = None;
    }

    /// Check if the action is still pending.
    pub fn is_armed(&self) -> bool {
        self.action.is_some()
    }

    /// Run the action now instead of at scope exit.
    pub fn run(mut self) {
        if let Some(action) = self.action.take() {
            action();
        }
    }
}

impl<F: FnOnce()> Drop for ScopeGuard<F> {
    fn drop(&mut self) {
        if let Some(action) = self.action.take() {
            action();
        }
    }
}

impl<F: FnOnce()> fmt::Debug for ScopeGuard<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScopeGuard")
            .field("armed", &self.is_armed())
            .finish()
    }
}

/// Shorthand for [`ScopeGuard::new`].
pub fn guard<F: FnOnce()>(action: F) -> ScopeGuard<F> {
    ScopeGuard::new(action)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_runs_at_end_of_scope_not_before() {
        let i = Cell::new(0);
        {
            let _guard = guard(|| i.set(2));
            i.set(1);
            assert_eq!(i.get(), 1);
        }
        assert_eq!(i.get(), 2);
    }

    #[test]
    fn test_released_guard_does_not_run() {
        let ran = Cell::new(false);
        {
            let mut g = guard(|| ran.set(true));
            g.release();
            assert!(!g.is_armed());
        }
        assert!(!ran.get());
    }

    #[test]
    fn test_moved_guard_runs_once() {
        let runs = Cell::new(0);
        let outer;
        {
            let inner = guard(|| runs.set(runs.get() + 1));
            outer = inner;
        }
        assert_eq!(runs.get(), 0);
        drop(outer);
        assert_eq!(runs.get(), 1);
    }

    #[test]
    fn test_run_early() {
        let runs = Cell::new(0);
        let g = guard(|| runs.set(runs.get() + 1));
        g.run();
        assert_eq!(runs.get(), 1);
    }
}
