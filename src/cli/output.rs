//! Terminal output formatting with colors
//!
//! Respects NO_COLOR, CLICOLOR, CLICOLOR_FORCE automatically.

use colored::Colorize;
use serde::Serialize;

use crate::application::ApplicationError;

/// Print error (red bold "error:" prefix) to stderr
pub fn error(msg: &(impl std::fmt::Display + ?Sized)) {
    eprintln!("{}: {}", "error".red().bold(), msg);
}

/// Print warning (yellow "Warning:" prefix) to stderr
pub fn warning(msg: &(impl std::fmt::Display + ?Sized)) {
    eprintln!("{}: {}", "Warning".yellow(), msg);
}

/// Print section banner (cyan bold)
pub fn header(msg: &(impl std::fmt::Display + ?Sized)) {
    println!("{}", msg.to_string().cyan().bold());
}

/// Print plain output (no color, for data)
pub fn info(msg: &(impl std::fmt::Display + ?Sized)) {
    println!("{}", msg);
}

/// Serialize to JSON text, compact or indented.
pub fn to_json<T: Serialize + ?Sized>(value: &T, pretty: bool) -> Result<String, ApplicationError> {
    let rendered = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    };
    rendered.map_err(|e| ApplicationError::OperationFailed {
        context: "serialize output".to_string(),
        source: Box::new(e),
    })
}

/// Print a value as JSON on stdout.
pub fn json<T: Serialize + ?Sized>(value: &T, pretty: bool) -> Result<(), ApplicationError> {
    info(&to_json(value, pretty)?);
    Ok(())
}
