/// Runs given function, logging how long it took when the `metrics` feature
/// is enabled.
#[cfg(feature = "metrics")]
pub fn measure<T>(label: &str, f: impl FnOnce() -> T) -> T {
    let tt = std::time::Instant::now();
    let result = f();

    log::trace!(
        "{label} took {}",
        humantime::format_duration(tt.elapsed())
    );

    result
}

#[cfg(not(feature = "metrics"))]
pub fn measure<T>(_: &str, f: impl FnOnce() -> T) -> T {
    f()
}
