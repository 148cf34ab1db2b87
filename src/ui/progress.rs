use colored::Colorize;
use std::io::{self, Write};
use std::time::{Duration, Instant};

const DEFAULT_WIDTH: usize = 30;
const REDRAW_INTERVAL: Duration = Duration::from_millis(100);

/// Byte progress indicator for downloads
pub struct ProgressBar {
    total: Option<u64>,
    current: u64,
    message: String,
    start_time: Instant,
    last_draw: Option<Instant>,
    width: usize,
    finished: bool,
}

impl ProgressBar {
    /// Create a new progress bar. `total` is `None` when the server did not
    /// announce a content length.
    pub fn new(total: Option<u64>, message: &str) -> Self {
        Self {
            total,
            current: 0,
            message: message.to_string(),
            start_time: Instant::now(),
            last_draw: None,
            width: bar_width(),
            finished: false,
        }
    }

    /// Advance by `bytes`
    pub fn inc(&mut self, bytes: u64) {
        self.current = match self.total {
            Some(total) => self.current.saturating_add(bytes).min(total),
            None => self.current.saturating_add(bytes),
        };

        let due = self
            .last_draw
            .is_none_or(|t| t.elapsed() >= REDRAW_INTERVAL);
        if due {
            self.draw();
        }
    }

    /// Finish the progress bar
    pub fn finish(mut self) {
        self.draw();
        self.finished = true;
        println!();
    }

    fn percent(&self) -> Option<u64> {
        match self.total {
            Some(0) => Some(100),
            Some(total) => Some(self.current * 100 / total),
            None => None,
        }
    }

    fn draw(&mut self) {
        self.last_draw = Some(Instant::now());

        let elapsed_secs = self.start_time.elapsed().as_secs_f64();
        let rate = if elapsed_secs > 0.0 {
            self.current as f64 / elapsed_secs
        } else {
            0.0
        };

        match (self.total, self.percent()) {
            (Some(total), Some(percent)) => {
                let filled = (percent as usize * self.width) / 100;
                let bar = "█".repeat(filled);
                let empty = "░".repeat(self.width.saturating_sub(filled));

                let eta = if rate > 0.0 {
                    let remaining = total.saturating_sub(self.current);
                    Duration::from_secs_f64(remaining as f64 / rate)
                } else {
                    Duration::ZERO
                };
                let eta_str = if eta.as_secs() > 0 {
                    format!("{}s", eta.as_secs())
                } else {
                    "--".to_string()
                };

                print!(
                    "\r{} {} {} {}/{} {}% ETA: {}",
                    "▸".dimmed(),
                    self.message.cyan(),
                    format!("[{}{}]", bar.green(), empty.dimmed()),
                    format_bytes(self.current).bold(),
                    format_bytes(total).dimmed(),
                    percent.to_string().bold(),
                    eta_str.dimmed()
                );
            }
            _ => {
                print!(
                    "\r{} {} {} ({}/s)",
                    "▸".dimmed(),
                    self.message.cyan(),
                    format_bytes(self.current).bold(),
                    format_bytes(rate as u64).dimmed()
                );
            }
        }

        io::stdout().flush().unwrap_or(());
    }
}

impl Drop for ProgressBar {
    fn drop(&mut self) {
        if !self.finished {
            println!();
        }
    }
}

/// Writer adapter that reports every chunk to a progress bar.
pub struct ProgressWriter<W: Write> {
    inner: W,
    bar: ProgressBar,
}

impl<W: Write> ProgressWriter<W> {
    pub fn new(inner: W, bar: ProgressBar) -> Self {
        Self { inner, bar }
    }

    /// Complete the bar and hand back the wrapped writer.
    pub fn finish(self) -> W {
        self.bar.finish();
        self.inner
    }
}

impl<W: Write> Write for ProgressWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let n = self.inner.write(buf)?;
        self.bar.inc(n as u64);
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

/// Human readable byte count (binary units).
pub fn format_bytes(bytes: u64) -> String {
    const UNITS: [&str; 5] = ["B", "KiB", "MiB", "GiB", "TiB"];

    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }

    if unit == 0 {
        format!("{} {}", bytes, UNITS[0])
    } else {
        format!("{:.1} {}", value, UNITS[unit])
    }
}

fn bar_width() -> usize {
    match terminal_size::terminal_size() {
        Some((terminal_size::Width(w), _)) if (w as usize) < 100 => {
            (w as usize).saturating_sub(70).max(10)
        }
        _ => DEFAULT_WIDTH,
    }
}
