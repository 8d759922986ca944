//! Testing utilities for the quiz workspace
//!
//! Shared fakes, fixtures and setup helpers:
//! - [`FakeFiles`]: recording files service with scripted delays and failures
//! - [`MemoryRepository`]: in-memory question and category storage
//! - [`fixtures`]: option payloads for every question type

mod files;
pub mod fixtures;
mod repository;

pub use files::{FakeFiles, UploadCall};
pub use repository::MemoryRepository;

/// Install a test subscriber honouring `RUST_LOG`; repeated calls are no-ops
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

