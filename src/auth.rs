use anyhow::{Result, bail};
use std::io::{self, IsTerminal};
use zeroize::Zeroizing;

pub const PASSWORD_ENV: &str = "CREDCHECK_PASSWORD";

/// Takes the candidate password from `CREDCHECK_PASSWORD`, else from stdin (prompting on a TTY).
///
/// Surrounding spaces are part of the password; only the line terminator is dropped.
pub fn read_password() -> Result<Zeroizing<String>> {
    // CI jobs and scripts
    if let Some(pw) = std::env::var(PASSWORD_ENV).ok().and_then(non_empty) {
        return Ok(pw);
    }

    let stdin = io::stdin();
    let pw = if stdin.is_terminal() {
        Zeroizing::new(rpassword::prompt_password("Candidate password: ")?)
    } else {
        // first line only
        let mut line = Zeroizing::new(String::new());
        stdin.read_line(&mut line)?;
        trim_newline(&mut line);
        line
    };

    match non_empty(pw) {
        Some(pw) => Ok(pw),
        None => bail!("no candidate password given (stdin or {PASSWORD_ENV})"),
    }
}

fn non_empty(pw: impl Into<Zeroizing<String>>) -> Option<Zeroizing<String>> {
    Some(pw.into()).filter(|pw| !pw.is_empty())
}

fn trim_newline(s: &mut String) {
    while s.ends_with('\n') || s.ends_with('\r') {
        s.pop();
    }
}
