use std::fmt::Display;
use std::time::Instant;

/// Write a `--verbose` diagnostic to stderr.
///
/// Must not be called while the browser owns the terminal in raw mode.
pub fn emit(verbose: bool, msg: impl Display) {
    if verbose {
        eprintln!("[dbpager] {}", msg);
    }
}

/// Times one step of a session (catalog load, a dump) for verbose output.
pub struct Timer {
    step: &'static str,
    start: Instant,
}

impl Timer {
    pub fn start(step: &'static str) -> Self {
        Self {
            step,
            start: Instant::now(),
        }
    }

    pub fn elapsed_ms(&self) -> u128 {
        self.start.elapsed().as_millis()
    }

    /// Log the step as `<step> (<ms>ms, <detail>)`.
    pub fn finish(self, verbose: bool, detail: impl Display) {
        emit(
            verbose,
            format_args!("{} ({}ms, {})", self.step, self.elapsed_ms(), detail),
        );
    }
}
