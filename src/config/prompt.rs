use super::schema::{Config, DEFAULT_HOST, HOST_ENV, TOKEN_ENV};
use crate::error::{NtientError, Result};
use std::io::{self, BufRead, Write};

const TOKEN_PROMPT: &str =
    "Please input your NTIENT token. It can be found on the application home page. ";

/// How the token answer is read
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenInput {
    /// From the terminal with echo disabled
    Hidden,
    /// From the supplied reader, like the host answer
    Echoed,
}

/// Prompt on the terminal for missing settings, then build the config
///
/// The token is read without echo. See [`init_with`].
pub fn init_interactive() -> Result<Config> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    init_with(&mut stdin.lock(), &mut stdout, TokenInput::Hidden)
}

/// Same as [`init_with`] with every answer taken from `input`
pub fn init<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> Result<Config> {
    init_with(input, output, TokenInput::Echoed)
}

/// Fill in `NTIENT_TOKEN` and `NTIENT_HOST` for this process
///
/// Each variable missing from the environment is prompted for and written back
/// into the process environment, so later [`Config::from_env`] calls see it.
/// A blank host answer selects [`DEFAULT_HOST`]; answers that are not an
/// `http(s)://.../api` URL are asked again.
pub fn init_with<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    token_input: TokenInput,
) -> Result<Config> {
    if is_unset(TOKEN_ENV) {
        writeln!(output, "Environment variable {TOKEN_ENV} not found.")?;

        let token = match token_input {
            TokenInput::Hidden => {
                output.flush()?;
                rpassword::prompt_password(TOKEN_PROMPT)?.trim().to_string()
            }
            TokenInput::Echoed => {
                write!(output, "{TOKEN_PROMPT}")?;
                output.flush()?;
                read_answer(input)?
            }
        };
        std::env::set_var(TOKEN_ENV, token);
    }

    if is_unset(HOST_ENV) {
        writeln!(output, "Environment variable {HOST_ENV} not found.")?;
        let host = loop {
            write!(
                output,
                "Please input your NTIENT host from application home page. Leave blank to use default {DEFAULT_HOST}. "
            )?;
            output.flush()?;

            let answer = read_answer(input)?;
            if answer.is_empty() {
                break DEFAULT_HOST.to_string();
            }
            if is_valid_host(&answer) {
                break answer;
            }
            tracing::debug!("Rejected host answer: {answer}");
        };
        std::env::set_var(HOST_ENV, host);
    }

    Config::from_env()
}

fn is_unset(key: &str) -> bool {
    std::env::var(key).map_or(true, |v| v.is_empty())
}

fn is_valid_host(host: &str) -> bool {
    (host.contains("http://") || host.contains("https://")) && host.contains("/api")
}

fn read_answer<R: BufRead>(input: &mut R) -> Result<String> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Err(NtientError::Config(
            "Input closed before configuration was complete".to_string(),
        ));
    }
    Ok(line.trim().to_string())
}
