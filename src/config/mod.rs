//! Configuration module for ntient
//!
//! Settings are an explicit [`Config`] value handed to [`crate::Api`]. It can be
//! built directly, from `NTIENT_TOKEN` / `NTIENT_HOST`, or from
//! `$XDG_CONFIG_HOME/ntient/config.toml` with the environment taking precedence.
//! Interactive prompting lives in [`prompt`] and only runs when called.
//!
//! # Example
//!
//! ```no_run
//! use ntient::config::Config;
//!
//! let config = Config::load().expect("Failed to load config");
//! println!("Host: {}", config.host);
//! ```

pub mod prompt;
pub mod schema;

pub use prompt::{init, init_interactive, init_with, TokenInput};
pub use schema::{Config, DEFAULT_HOST, HOST_ENV, TOKEN_ENV};
