//! Many readers over one frozen policy.

use dashgate_rbac::{Action, PermissionEvaluator, Resource, Role};
use std::thread;

#[test]
fn concurrent_readers_agree() {
    let eval = PermissionEvaluator::builtin();
    let expected = eval.matrix();

    thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let eval = eval.clone();
                scope.spawn(move || {
                    for _ in 0..100 {
                        assert!(eval.has_permission(
                            Role::Manager,
                            Resource::Finance,
                            Action::Export,
                            None
                        ));
                        assert!(!eval.is_route_allowed(Role::Viewer, "/employees", None));
                    }
                    eval.matrix()
                })
            })
            .collect();

        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
    });
}

#[test]
fn evaluator_is_send_and_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<PermissionEvaluator>();
    assert_send_sync::<dashgate_rbac::Policy>();
}
