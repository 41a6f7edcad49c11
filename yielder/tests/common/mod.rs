#![allow(dead_code)]

use tracing_subscriber::EnvFilter;

/// Installs a test subscriber honouring `RUST_LOG`, once per test binary.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Drains every remaining item of `cursor`.
pub fn drain<T: Send + 'static>(cursor: &mut yielder::Cursor<T>) -> Vec<T> {
    let mut items = Vec::new();
    while cursor.has_more().unwrap() {
        items.push(cursor.take_next().unwrap());
    }
    items
}

/// Takes items until the cursor reports an error or runs out.
pub fn drain_until_error<T: Send + 'static>(cursor: &mut yielder::Cursor<T>) -> Vec<T> {
    let mut items = Vec::new();
    while let Ok(true) = cursor.has_more() {
        items.push(cursor.take_next().unwrap());
    }
    items
}
