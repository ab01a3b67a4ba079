use indicatif::{ProgressBar, ProgressStyle};
use once_cell::sync::Lazy;
use std::io::Write;
use std::sync::Mutex;

/// Filter used when neither `--log-filter` nor `RUST_LOG` is given.
pub const DEFAULT_LOG_FILTER: &str = "info";

pub static PROGRESS_BAR: Lazy<Mutex<Option<ProgressBar>>> = Lazy::new(|| Mutex::new(None));

/// Run `f` on the progress bar, if one is shown.
fn with_progress_bar<T, F: FnOnce(&ProgressBar) -> T>(f: F) -> Option<T> {
    let pb = PROGRESS_BAR.lock().unwrap_or_else(|e| e.into_inner());
    pb.as_ref().map(f)
}

pub fn increment_progress(amount: u64) {
    with_progress_bar(|pb| pb.inc(amount));
}

/// Show a progress bar counting samples drawn.
pub fn create_progress_bar(total_samples: u64) {
    finish_progress_bar();
    let pb = ProgressBar::new(total_samples);
    pb.enable_steady_tick(100);
    pb.set_style(ProgressStyle::default_bar()
        .template("{spinner:.green} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {pos}/{len} samples {msg} ({eta_precise} remaining)")
        .progress_chars("=>-"));
    *PROGRESS_BAR.lock().unwrap_or_else(|e| e.into_inner()) = Some(pb);
}

pub fn finish_progress_bar() {
    let mut pb = PROGRESS_BAR.lock().unwrap_or_else(|e| e.into_inner());
    if let Some(pb) = pb.take() {
        pb.finish();
    }
}

/// Log sink that collects output into whole lines.
///
/// Each complete line is printed above the progress bar while one is shown, and written to
/// stderr otherwise. A trailing partial line is emitted on flush or drop.
#[derive(Debug, Default)]
pub struct LogWriter {
    pending: Vec<u8>,
}

impl LogWriter {
    fn emit(&mut self, len: usize) -> std::io::Result<()> {
        let line: Vec<u8> = self.pending.drain(..len).collect();
        let shown = with_progress_bar(|pb| {
            pb.println(String::from_utf8_lossy(&line).trim_end_matches('\n'))
        });
        if shown.is_none() {
            std::io::stderr().write_all(&line)?;
        }
        Ok(())
    }
}

impl Write for LogWriter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.pending.extend_from_slice(buf);
        while let Some(pos) = self.pending.iter().position(|b| *b == b'\n') {
            self.emit(pos + 1)?;
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        if !self.pending.is_empty() {
            self.emit(self.pending.len())?;
        }
        std::io::stderr().flush()
    }
}

impl Drop for LogWriter {
    fn drop(&mut self) {
        let _ = self.flush();
    }
}

/// The filter to log with: `explicit`, then `RUST_LOG`, then [`DEFAULT_LOG_FILTER`].
pub fn log_filter(explicit: Option<String>) -> String {
    explicit
        .or_else(|| std::env::var("RUST_LOG").ok())
        .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string())
}

/// Install the global tracing subscriber, writing through [`LogWriter`].
pub fn setup_logging(explicit_filter: Option<String>) {
    tracing_subscriber::fmt::fmt()
        .with_writer(LogWriter::default)
        .with_env_filter(log_filter(explicit_filter))
        .init();
}
