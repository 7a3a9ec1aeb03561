use std::time::Duration;

use subledger_rpc::ScopeManager;

#[test]
fn trigger_is_idempotent() {
    let manager = ScopeManager::new();

    manager.cancel();
    manager.cancel();

    assert!(manager.is_cancelled());
}

#[test]
fn trigger_may_never_fire() {
    let manager = ScopeManager::new();
    let child = manager.child_scope();

    drop(manager);

    // Dropping the manager without firing leaves children un-cancelled.
    assert!(!child.is_cancelled());
}

#[test]
fn child_of_cancelled_manager_starts_cancelled() {
    let manager = ScopeManager::new();
    manager.cancel();

    assert!(manager.child_scope().is_cancelled());
}

#[tokio::test]
async fn cancel_releases_existing_children() {
    let manager = ScopeManager::new();
    let child = manager.child_scope();

    manager.cancel();

    tokio::time::timeout(Duration::from_millis(100), child.cancelled())
        .await
        .expect("child scope should observe cancellation");
}

#[tokio::test]
async fn cancel_broadcasts_to_many_children() {
    let manager = ScopeManager::new();
    let children: Vec<_> = (0..8).map(|_| manager.child_scope()).collect();

    manager.cancel();

    for child in children {
        tokio::time::timeout(Duration::from_millis(100), child.cancelled())
            .await
            .expect("every child scope should observe cancellation");
    }
}
