//! Property-based tests for dispatch order and pass counts.

use change_notifier::prelude::*;
use proptest::prelude::*;
use std::sync::{Arc, Mutex};

proptest! {
    #[test]
    fn prop_every_listener_runs_once_in_order(listeners in 0usize..32, passes in 1usize..5) {
        let notifier = ChangeNotifier::new();
        let log = Arc::new(Mutex::new(Vec::new()));

        for id in 0..listeners {
            let log = Arc::clone(&log);
            notifier.register_fn(move |_| log.lock().unwrap().push(id));
        }

        let target = ();
        for _ in 0..passes {
            notifier.notify(&target, "tick", None, None);
        }

        let expected: Vec<usize> = (0..passes).flat_map(|_| 0..listeners).collect();
        prop_assert_eq!(&*log.lock().unwrap(), &expected);
    }

    #[test]
    fn prop_failures_never_skip_healthy_listeners(failing in prop::collection::vec(any::<bool>(), 0..24)) {
        let failures = Arc::new(Mutex::new(Vec::new()));
        let delivered = Arc::new(Mutex::new(Vec::new()));

        let failures_clone = Arc::clone(&failures);
        let notifier = ChangeNotifier::builder()
            .log_failures(false)
            .on_listener_failure(move |failure| failures_clone.lock().unwrap().push(failure.index))
            .build()
            .unwrap();

        for (id, fails) in failing.iter().copied().enumerate() {
            let delivered = Arc::clone(&delivered);
            notifier.register_fn(move |_| {
                delivered.lock().unwrap().push(id);
                if fails {
                    panic!("listener {} failed", id);
                }
            });
        }

        let target = 0i8;
        notifier.notify(&target, "value", Some(&1i8), Some(&0i8));

        let all: Vec<usize> = (0..failing.len()).collect();
        let failed: Vec<usize> = failing
            .iter()
            .enumerate()
            .filter_map(|(id, fails)| fails.then_some(id))
            .collect();
        prop_assert_eq!(&*delivered.lock().unwrap(), &all);
        prop_assert_eq!(&*failures.lock().unwrap(), &failed);
    }
}
