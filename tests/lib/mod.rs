#![allow(dead_code)]

pub fn tracing_init() {
    // Test functions share one binary, so a second init is fine to ignore.
    let _ = tracing_subscriber::fmt()
        // From env var: `RUST_LOG`
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}
