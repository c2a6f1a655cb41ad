//! Colored terminal output for navtree commands.
//!
//! Tree renderings and URI listings go to stdout uncolored so they can be piped;
//! diagnostics go to stderr. `colored` honours NO_COLOR and CLICOLOR_FORCE.

use std::fmt::Display;

use colored::Colorize;

/// Failure message on stderr, prefixed with a red `error:`.
pub fn error(msg: &(impl Display + ?Sized)) {
    eprintln!("{}: {}", "error".red().bold(), msg);
}

/// Non-fatal notice on stderr, e.g. a site without a base URI.
pub fn warning(msg: &(impl Display + ?Sized)) {
    eprintln!("{}: {}", "warning".yellow(), msg);
}

/// One `label: value` line of a node or settings report.
pub fn field(label: &str, msg: &(impl Display + ?Sized)) {
    println!("{}: {}", label.green(), msg);
}

/// Title line above a report, typically the site id.
pub fn header(msg: &(impl Display + ?Sized)) {
    println!("{}", msg.to_string().cyan().bold());
}

/// Indented entry below a field, e.g. one child name.
pub fn detail(msg: &(impl Display + ?Sized)) {
    println!("  {msg}");
}

/// Raw data line: a rendered tree or a URI.
pub fn info(msg: &(impl Display + ?Sized)) {
    println!("{msg}");
}
