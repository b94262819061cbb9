/// Unit tests for DisposeError and AggregateError

use ferrous_dispose::{disposable, CompositeDisposable, Dispose, DisposeError, DisposeResult};
use std::error::Error;

fn aggregate_of(messages: &[&'static str]) -> DisposeError {
    let composite = CompositeDisposable::new();
    for &message in messages {
        composite.add(disposable::try_create(move || Err(message.into()))).unwrap();
    }
    composite.dispose().unwrap_err()
}

#[test]
fn test_error_display_disposed() {
    let error = DisposeError::Disposed;
    assert_eq!(error.to_string(), "cannot access a disposed composite");
    assert!(error.is_disposed());
}

#[test]
fn test_error_display_action_is_transparent() {
    let error = DisposeError::action("connection reset");
    assert_eq!(error.to_string(), "connection reset");
    assert!(!error.is_disposed());
}

#[test]
fn test_error_display_buffer_too_small() {
    let error = DisposeError::BufferTooSmall { offset: 2, required: 3, available: 1 };
    assert_eq!(
        error.to_string(),
        "destination too small: 3 members from offset 2, 1 slots available"
    );
}

#[test]
fn test_aggregate_display_lists_errors() {
    let error = aggregate_of(&["first", "second"]);
    assert_eq!(
        error.to_string(),
        "2 error(s) raised while disposing composite\n  [0] first\n  [1] second"
    );
}

#[test]
fn test_aggregate_source_is_first_error() {
    let DisposeError::Aggregate(aggregate) = aggregate_of(&["first", "second"]) else {
        panic!("expected aggregate");
    };
    let source = aggregate.source().expect("aggregate has a source");
    assert_eq!(source.to_string(), "first");
}

#[test]
fn test_aggregate_into_errors() {
    let DisposeError::Aggregate(aggregate) = aggregate_of(&["a", "b", "c"]) else {
        panic!("expected aggregate");
    };
    assert!(!aggregate.is_empty());

    let errors = aggregate.into_errors();
    let messages: Vec<_> = errors.iter().map(|e| e.to_string()).collect();
    assert_eq!(messages, ["a", "b", "c"]);
}

#[test]
fn test_result_alias() {
    fn close() -> DisposeResult<()> {
        Err(DisposeError::Disposed)
    }
    assert!(close().unwrap_err().is_disposed());
}
