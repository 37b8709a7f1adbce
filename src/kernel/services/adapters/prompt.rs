//! Line prompts on the controlling terminal.

use std::io::{self, BufRead, Write};

/// Prints `prompt` and reads one line on a blocking thread. Resolves with
/// `None` at end of input.
pub async fn prompt_line(prompt: String) -> io::Result<Option<String>> {
    tokio::task::spawn_blocking(move || read_line_blocking(&prompt))
        .await
        .map_err(io::Error::other)?
}

fn read_line_blocking(prompt: &str) -> io::Result<Option<String>> {
    let mut stdout = io::stdout().lock();
    write!(stdout, "{}", prompt)?;
    stdout.flush()?;

    let mut line = String::new();
    if io::stdin().lock().read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
}
