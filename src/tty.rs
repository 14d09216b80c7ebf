//! Terminal I/O utilities.
//!
//! Provides user prompting with a default-deny interpretation.

use std::io::{self, BufRead, Write};

use crate::error::{Error, Result};

/// Print a message to stderr and read one trimmed line from stdin.
pub fn prompt(message: &str) -> Result<String> {
    eprint!("{}", message);
    io::stderr().flush().ok();

    let stdin = io::stdin();
    let mut line = String::new();
    stdin
        .lock()
        .read_line(&mut line)
        .map_err(|e| Error::internal_io(format!("Failed to read input: {}", e), None))?;

    Ok(line.trim().to_string())
}

/// Ask a yes/no question. Anything but an affirmative answer means no.
pub fn confirm(message: &str) -> Result<bool> {
    Ok(is_affirmative(&prompt(message)?))
}

/// A single `y` (either case, after trimming) is the only affirmative.
pub fn is_affirmative(answer: &str) -> bool {
    answer.trim().eq_ignore_ascii_case("y")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_y_is_affirmative() {
        assert!(is_affirmative("y"));
        assert!(is_affirmative("Y"));
        assert!(is_affirmative("  y  "));
    }

    #[test]
    fn everything_else_is_a_no() {
        assert!(!is_affirmative(""));
        assert!(!is_affirmative("n"));
        assert!(!is_affirmative("yes"));
        assert!(!is_affirmative("yy"));
        assert!(!is_affirmative("ok"));
    }
}
