//! Run cleanup code when a scope ends.

use std::fmt;

/// Runs a closure when dropped, unless dismissed first.
///
/// # Example
///
/// ```rust
/// use seqkit_core::ScopeGuard;
/// use std::cell::Cell;
///
/// let released = Cell::new(false);
/// {
///     let _guard = ScopeGuard::new(|| released.set(true));
/// }
/// assert!(released.get());
/// ```
#[must_use = "the closure runs as soon as the guard is dropped"]
pub struct ScopeGuard<F: FnOnce()> {
    on_exit: Option<F>,
}

impl<F: FnOnce()> ScopeGuard<F> {
    /// Creates a guard that calls `on_exit` on drop
    pub fn new(on_exit: F) -> Self {
        Self {
            on_exit: Some(on_exit),
        }
    }

    /// Disarms the guard so that the closure never runs.
    pub fn dismiss(mut self) {
        self.on_exit = None;
    }
}

impl<F: FnOnce()> Drop for ScopeGuard<F> {
    fn drop(&mut self) {
        if let Some(on_exit) = self.on_exit.take() {
            on_exit();
        }
    }
}

impl<F: FnOnce()> fmt::Debug for ScopeGuard<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScopeGuard")
            .field("armed", &self.on_exit.is_some())
            .finish()
    }
}

/// Collects cleanup actions and runs them in reverse registration order.
///
/// Actions run once, either on [`dispose`](DisposeScope::dispose) or when
/// the scope is dropped.
#[derive(Default)]
pub struct DisposeScope<'a> {
    actions: Vec<Box<dyn FnOnce() + 'a>>,
}

impl<'a> DisposeScope<'a> {
    /// Creates an empty scope
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an action to run when the scope ends.
    pub fn defer(&mut self, action: impl FnOnce() + 'a) {
        self.actions.push(Box::new(action));
    }

    /// Takes ownership of `value` and drops it when the scope ends, after
    /// anything registered later.
    pub fn adopt<T: 'a>(&mut self, value: T) {
        self.defer(move || drop(value));
    }

    /// Number of pending actions
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    /// Returns `true` if nothing is pending
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Runs all pending actions now, newest first.
    pub fn dispose(&mut self) {
        while let Some(action) = self.actions.pop() {
            action();
        }
    }
}

impl Drop for DisposeScope<'_> {
    fn drop(&mut self) {
        self.dispose();
    }
}

impl fmt::Debug for DisposeScope<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DisposeScope")
            .field("pending", &self.actions.len())
            .finish()
    }
}
