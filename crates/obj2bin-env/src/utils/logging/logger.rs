use crossterm::style::Stylize;
use parking_lot::Mutex;
use std::io::Stderr;
use std::io::Stdout;
use std::io::Write;
use std::io::stderr;
use std::io::stdout;
use std::sync::Arc;

#[derive(Clone, Default)]
pub struct LoggerOptions {
  pub is_verbose: bool,
}

/// Serializes writes to stdout and stderr so lines from
/// the main output and warnings don't interleave.
#[derive(Clone)]
pub struct Logger {
  output_lock: Arc<Mutex<LoggerState>>,
  is_verbose: bool,
}

struct LoggerState {
  std_out: Stdout,
  std_err: Stderr,
}

impl Logger {
  pub fn new(options: &LoggerOptions) -> Self {
    Logger {
      output_lock: Arc::new(Mutex::new(LoggerState {
        std_out: stdout(),
        std_err: stderr(),
      })),
      is_verbose: options.is_verbose,
    }
  }

  #[inline]
  pub fn is_verbose(&self) -> bool {
    self.is_verbose
  }

  pub fn log(&self, text: &str) {
    let mut state = self.output_lock.lock();
    write_line(&mut state.std_out, text);
  }

  pub fn log_stderr(&self, text: &str) {
    let mut state = self.output_lock.lock();
    write_line(&mut state.std_err, text);
  }

  pub fn log_warn(&self, text: &str) {
    self.log_stderr(&format!("{} {}", "Warning:".yellow().bold(), text));
  }
}

fn write_line(writer: &mut impl Write, text: &str) {
  let mut output_text = String::from(text);
  // only add a newline if the logged text does not end with one
  if !output_text.ends_with('\n') {
    output_text.push('\n');
  }
  // a closed pipe shouldn't take the process down with it
  let _ = writer.write_all(output_text.as_bytes());
  let _ = writer.flush();
}
