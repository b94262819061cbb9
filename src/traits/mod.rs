//! Core traits for disposable resources.

mod dispose;

pub use dispose::{Dispose, SharedDisposable, same_disposable};
