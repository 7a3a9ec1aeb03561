use tokio_util::sync::CancellationToken;

/// Bounds the lifetime of every request issued over one logical connection.
///
/// Pairs a root cancellable scope with its trigger. Each dispatch derives a
/// child scope from the root; firing [`cancel`](Self::cancel) releases the
/// root and every child derived from it, including children derived after
/// the trigger fired. The manager never fires the trigger itself: tearing
/// down the connection is the owner's call, and letting the manager drop
/// without firing is equally valid.
#[derive(Debug, Clone, Default)]
pub struct ScopeManager {
    root: CancellationToken,
}

impl ScopeManager {
    pub fn new() -> Self {
        Self {
            root: CancellationToken::new(),
        }
    }

    /// Derive a child scope bounding a single call.
    pub fn child_scope(&self) -> CancellationToken {
        self.root.child_token()
    }

    /// Fire the trigger. Idempotent; safe to call from any task.
    pub fn cancel(&self) {
        self.root.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.root.is_cancelled()
    }
}
