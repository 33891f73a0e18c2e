use std::error::Error as _;
use std::io;
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

use anyhow::anyhow;
use safe_path_ops::retry::{
    AttemptError, PassThroughExt, RetryError, RetryPolicy, protect, protect_with,
    protect_with_cancel,
};

fn fast() -> RetryPolicy {
    RetryPolicy::new().with_delay(Duration::ZERO)
}

#[test]
fn always_failing_operation_runs_retries_plus_one_times() {
    let mut calls = 0;
    let err = protect(&fast().with_max_retries(3).with_label("flaky share"), || {
        calls += 1;
        Err(io::Error::other("disk hiccup").into())
    })
    .unwrap_err();

    assert_eq!(calls, 4);
    assert!(err.is_tried_too_often());
    assert_eq!(err.label(), Some("flaky share"));
    assert_eq!(err.to_string(), "flaky share: tried too often (3 times)");
    let cause = err.source().expect("inner cause");
    assert_eq!(cause.to_string(), "disk hiccup");
}

#[test]
fn pass_through_error_is_returned_unwrapped_after_one_call() {
    let mut calls = 0;
    let err = protect(&fast(), || {
        calls += 1;
        Err(io::Error::new(io::ErrorKind::AlreadyExists, "target exists")).pass_through()
    })
    .unwrap_err();

    assert_eq!(calls, 1);
    let RetryError::PassThrough(inner) = &err else {
        panic!("expected pass-through, got {err:?}");
    };
    let io_err = inner.downcast_ref::<io::Error>().expect("original io::Error");
    assert_eq!(io_err.kind(), io::ErrorKind::AlreadyExists);
}

#[test]
fn success_on_second_attempt_returns_value() {
    let mut calls = 0;
    let value = protect_with(&fast(), || {
        calls += 1;
        if calls == 1 {
            Err(AttemptError::retryable(anyhow!("locked")))
        } else {
            Ok("content")
        }
    })
    .unwrap();
    assert_eq!(value, "content");
    assert_eq!(calls, 2);
}

#[test]
fn handler_sees_every_failure_and_can_replace_the_error() {
    let seen = Arc::new(AtomicU32::new(0));
    let s = seen.clone();
    let policy = fast().with_max_retries(2).with_exception_handler(move |ctx| {
        s.fetch_add(1, Ordering::SeqCst);
        let attempt = ctx.attempt();
        ctx.replace_error(anyhow!("rewritten at attempt {attempt}"));
    });

    let err = protect(&policy, || Err(anyhow!("raw").into())).unwrap_err();
    assert_eq!(seen.load(Ordering::SeqCst), 3);
    assert_eq!(err.inner().unwrap().to_string(), "rewritten at attempt 3");
}

#[test]
fn handler_abort_stops_early() {
    let mut calls = 0;
    let policy = fast().with_max_retries(10).with_exception_handler(|ctx| {
        if ctx.attempt() == 2 {
            ctx.abort();
        }
    });
    let err = protect(&policy, || {
        calls += 1;
        Err(anyhow!("nope").into())
    })
    .unwrap_err();

    assert_eq!(calls, 2);
    match err {
        RetryError::TriedTooOften { attempts, .. } => assert_eq!(attempts, 2),
        other => panic!("unexpected: {other:?}"),
    }
}

#[test]
fn disabled_policy_runs_once_without_handler() {
    let seen = Arc::new(AtomicU32::new(0));
    let s = seen.clone();
    let policy = RetryPolicy::disabled().with_exception_handler(move |_| {
        s.fetch_add(1, Ordering::SeqCst);
    });

    let mut calls = 0;
    let err = protect(&policy, || {
        calls += 1;
        Err(anyhow!("plain failure").into())
    })
    .unwrap_err();

    assert_eq!(calls, 1);
    assert_eq!(seen.load(Ordering::SeqCst), 0);
    assert!(matches!(err, RetryError::PassThrough(_)));
    assert_eq!(err.to_string(), "plain failure");
}

#[test]
fn panicking_memory_hook_does_not_change_the_outcome() {
    let policy = fast()
        .with_max_retries(2)
        .with_memory_release(|| panic!("hook exploded"));

    let mut calls = 0;
    let value = protect_with(&policy, || {
        calls += 1;
        if calls < 3 {
            return Err(anyhow!("busy").into());
        }
        Ok(calls)
    })
    .unwrap();
    assert_eq!(value, 3);
}

#[test]
fn memory_hook_is_skipped_when_flag_is_off() {
    let hooks = Arc::new(AtomicU32::new(0));
    let h = hooks.clone();
    let policy = fast()
        .with_max_retries(2)
        .with_release_memory_before_sleep(false)
        .with_memory_release(move || {
            h.fetch_add(1, Ordering::SeqCst);
        });
    let _ = protect(&policy, || Err(anyhow!("x").into()));
    assert_eq!(hooks.load(Ordering::SeqCst), 0);
}

#[test]
fn resources_are_released_between_attempts() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("data.bin");
    std::fs::write(&path, b"abc").unwrap();

    let mut calls = 0;
    let len = protect_with(&fast(), || {
        calls += 1;
        let file = std::fs::File::open(&path)?;
        if calls == 1 {
            // handle is dropped with the closure frame before the next attempt
            return Err(anyhow!("simulated read failure").into());
        }
        Ok(file.metadata()?.len())
    })
    .unwrap();
    assert_eq!(len, 3);
}

#[test]
fn huge_delay_waits_until_cancelled() {
    let policy = RetryPolicy::new().with_delay_seconds(u64::MAX);
    let token = tokio_util::sync::CancellationToken::new();
    let canceller = {
        let token = token.clone();
        std::thread::spawn(move || {
            std::thread::sleep(Duration::from_millis(100));
            token.cancel();
        })
    };

    let mut calls = 0;
    let err = protect_with_cancel(&policy, &token, || {
        calls += 1;
        Err::<(), _>(AttemptError::retryable(anyhow!("share offline")))
    })
    .unwrap_err();
    canceller.join().unwrap();

    assert!(err.is_cancelled());
    assert_eq!(calls, 1);
}
