pub mod fixtures;

#[cfg(test)]
mod laws;
#[cfg(test)]
mod scenarios;

/// Route engine trace events to the test harness's captured output. Safe to call from
/// every test; only the first call installs the subscriber.
#[cfg(test)]
pub(crate) fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
