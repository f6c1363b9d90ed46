//! Line prompts that work both interactively and with piped input.
//!
//! dialoguer needs a terminal on both stdin and stderr. When either is
//! redirected the prompt is printed to stdout and one line is read from
//! stdin instead, so scripted runs (`echo 2 | magicguard`) behave the same
//! as typed ones.

use std::io::{self, BufRead, IsTerminal, Write};

use dialoguer::{Input, theme::ColorfulTheme};

use crate::error::{Error, Result};

/// True when dialoguer can drive the terminal.
pub fn is_interactive() -> bool {
    io::stdin().is_terminal() && console::Term::stderr().is_term()
}

/// Asks `prompt` and returns the answer. An empty answer (or end of input)
/// yields an empty string.
pub fn read_line(prompt: &str) -> Result<String> {
    if is_interactive() {
        return Input::with_theme(&ColorfulTheme::default())
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text()
            .map_err(|e| Error::Io(io::Error::other(e)));
    }

    let stdin = io::stdin();
    read_line_from(prompt, &mut stdin.lock(), &mut io::stdout())
}

/// Non-interactive prompt: writes `prompt` to `out` and reads one line.
pub fn read_line_from<R, W>(prompt: &str, input: &mut R, out: &mut W) -> Result<String>
where
    R: BufRead,
    W: Write,
{
    write!(out, "{prompt}: ")?;
    out.flush()?;

    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_read_line_from_strips_line_ending() {
        let mut out = Vec::new();
        let answer = read_line_from("Choice", &mut Cursor::new("2\r\nrest\n"), &mut out).unwrap();
        assert_eq!(answer, "2");
        assert_eq!(String::from_utf8(out).unwrap(), "Choice: ");
    }

    #[test]
    fn test_read_line_from_end_of_input_is_empty() {
        let answer = read_line_from("Choice", &mut Cursor::new(""), &mut Vec::new()).unwrap();
        assert_eq!(answer, "");
    }
}
