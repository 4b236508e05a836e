//! Terminal prompt.

use std::io::{self, BufRead, IsTerminal, Write};

use oktakey_creds::{Prompt, PromptError};

/// Reads operator input from the controlling terminal.
///
/// Secret input is read without echo. When stdin is not a terminal the
/// prompt refuses with [`PromptError::NotInteractive`] instead of blocking.
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalPrompt;

impl Prompt for TerminalPrompt {
    fn prompt(&self, label: &str, secret: bool) -> Result<String, PromptError> {
        if !io::stdin().is_terminal() {
            return Err(PromptError::NotInteractive);
        }

        let text = format!("{label}: ");
        if secret {
            return rpassword::prompt_password(text).map_err(read_error);
        }

        let mut stderr = io::stderr();
        stderr.write_all(text.as_bytes())?;
        stderr.flush()?;

        let mut line = String::new();
        if io::stdin().lock().read_line(&mut line).map_err(read_error)? == 0 {
            return Err(PromptError::Aborted);
        }
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }
}

fn read_error(e: io::Error) -> PromptError {
    match e.kind() {
        io::ErrorKind::UnexpectedEof | io::ErrorKind::Interrupted => PromptError::Aborted,
        _ => PromptError::Io(e),
    }
}
