//! ui::prompts
//!
//! Interactive prompts with a bounded wait.
//!
//! # Design
//!
//! The ring selection prompt must never hang a shell: if the user does not
//! answer within the timeout, the prompt gives up and the command finishes as
//! a no-op. Input is read on a helper thread and handed over through a
//! channel, so the wait is bounded by `recv_timeout` rather than by the
//! terminal.

use std::io::{self, BufRead, Write};
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use thiserror::Error;

/// Errors from prompts.
#[derive(Debug, Error)]
pub enum PromptError {
    #[error("not in interactive mode")]
    NotInteractive,

    #[error("IO error: {0}")]
    IoError(String),
}

/// Print `message` and wait up to `timeout` for one line on stdin.
///
/// Returns `Ok(None)` on timeout or end of input. The returned line has its
/// trailing newline removed.
pub fn read_line_with_timeout(
    message: &str,
    timeout: Duration,
    interactive: bool,
) -> Result<Option<String>, PromptError> {
    if !interactive {
        return Err(PromptError::NotInteractive);
    }

    println!("{}", message);
    io::stdout()
        .flush()
        .map_err(|e| PromptError::IoError(e.to_string()))?;

    read_line_from(io::BufReader::new(io::stdin()), timeout)
}

/// Wait up to `timeout` for one line from `reader`.
///
/// The reader thread is detached; if it is still blocked when the timeout
/// expires, it dies with the process.
pub fn read_line_from<R>(reader: R, timeout: Duration) -> Result<Option<String>, PromptError>
where
    R: BufRead + Send + 'static,
{
    let (tx, rx) = mpsc::channel();

    thread::spawn(move || {
        let mut reader = reader;
        let mut line = String::new();
        let result = reader.read_line(&mut line).map(|n| (n, line));
        // The receiver is gone once the prompt timed out.
        let _ = tx.send(result);
    });

    match rx.recv_timeout(timeout) {
        Ok(Ok((0, _))) => Ok(None),
        Ok(Ok((_, line))) => Ok(Some(line.trim_end_matches(&['\r', '\n'][..]).to_string())),
        Ok(Err(e)) => Err(PromptError::IoError(e.to_string())),
        Err(mpsc::RecvTimeoutError::Timeout) => Ok(None),
        Err(mpsc::RecvTimeoutError::Disconnected) => {
            Err(PromptError::IoError("input reader stopped".to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn reads_one_line() {
        let input = Cursor::new(b"d 2 3\nignored\n".to_vec());
        let line = read_line_from(input, Duration::from_secs(5)).unwrap();
        assert_eq!(line.as_deref(), Some("d 2 3"));
    }

    #[test]
    fn end_of_input_is_none() {
        let input = Cursor::new(Vec::new());
        assert_eq!(read_line_from(input, Duration::from_secs(5)).unwrap(), None);
    }

    #[test]
    fn silence_times_out() {
        struct Never;

        impl io::Read for Never {
            fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
                thread::sleep(Duration::from_secs(60));
                Ok(0)
            }
        }

        let reader = io::BufReader::new(Never);
        let line = read_line_from(reader, Duration::from_millis(50)).unwrap();
        assert_eq!(line, None);
    }

    #[test]
    fn non_interactive_refuses() {
        let result = read_line_with_timeout("pick", Duration::from_secs(1), false);
        assert!(matches!(result, Err(PromptError::NotInteractive)));
    }
}
