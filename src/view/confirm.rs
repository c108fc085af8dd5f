use std::io::{self, BufRead, Write};

/// Asks the user to accept or decline a destructive action.
pub trait Confirm {
    fn confirm(&self, title: &str, message: &str) -> bool;
}

impl<F> Confirm for F
where
    F: Fn(&str, &str) -> bool,
{
    fn confirm(&self, title: &str, message: &str) -> bool {
        self(title, message)
    }
}

/// Accepts without asking (`--force`).
#[derive(Debug, Clone, Copy, Default)]
pub struct AssumeYes;

impl Confirm for AssumeYes {
    fn confirm(&self, _title: &str, _message: &str) -> bool {
        true
    }
}

/// `[y/N]` prompt on stdout, answer read from stdin. Anything but `y`
/// declines, including read errors.
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalConfirm;

impl TerminalConfirm {
    fn ask<R: BufRead, W: Write>(mut input: R, mut output: W, message: &str) -> bool {
        if write!(output, "{} [y/N] ", message)
            .and_then(|_| output.flush())
            .is_err()
        {
            return false;
        }

        let mut answer = String::new();
        match input.read_line(&mut answer) {
            Ok(_) => answer.trim().eq_ignore_ascii_case("y"),
            Err(_) => false,
        }
    }
}

impl Confirm for TerminalConfirm {
    fn confirm(&self, _title: &str, message: &str) -> bool {
        Self::ask(io::stdin().lock(), io::stdout(), message)
    }
}
