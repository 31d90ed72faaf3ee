use std::path::PathBuf;
use std::str::FromStr;

use clap::{CommandFactory, Parser};
use clap_complete::Shell;
use owo_colors::OwoColorize;
use thiserror::Error;

pub const BANNER: &str = r#"
      __ ____       __
     / //( _ )_____/ /
    / __/ _  / __  /
   / /_/ (_) / /_/ /
   \__/ \___/\__,_/

   @trailhound
"#;

pub const WARNINGS: &str = r#"
WARNING:
[!] Use with caution. You are responsible for your actions.
[!] Developers assume no liability and are not responsible for any misuse or damage.
[!] By using this tool, you agree to the terms of the service it queries.
"#;

pub fn header() -> String {
    format!("{}\n{}", BANNER.green(), WARNINGS.yellow())
}

/// Finds related domains by abusing the SecurityTrails autocomplete API.
///
/// Open https://securitytrails.com/dns-trails in a browser, clear any
/// CAPTCHA you run into, then copy the raw values of your Cookie and
/// User-Agent headers into -c and -a. The cookie expires after a while;
/// when it does, grab a fresh one the same way.
#[derive(Parser, Debug)]
#[command(name = "t8d")]
#[command(author, version, about, long_about)]
#[command(before_help = header(), before_long_help = header())]
#[command(arg_required_else_help = true)]
#[command(verbatim_doc_comment, propagate_version = true)]
pub struct Cli {
    /// Keyword the brute-force suffixes are appended to
    #[arg(required_unless_present = "completions")]
    pub keyword: Option<String>,

    /// Number of characters to brute force
    #[arg(
        short,
        long,
        value_name = "N",
        default_value_t = 2,
        value_parser = clap::value_parser!(u8).range(1..=4)
    )]
    pub num: u8,

    /// Raw Cookie header of a logged-in browser session
    #[arg(
        short,
        long,
        value_name = "COOKIE",
        required_unless_present = "completions"
    )]
    pub cookie: Option<Cookie>,

    /// User-Agent of the browser the cookie came from
    #[arg(
        short = 'a',
        long,
        value_name = "USER_AGENT",
        required_unless_present = "completions"
    )]
    pub useragent: Option<String>,

    /// Number of concurrent request workers
    #[arg(
        short,
        long,
        value_name = "NUM",
        default_value_t = 5,
        value_parser = clap::value_parser!(u8).range(1..=64)
    )]
    pub workers: u8,

    /// Append newly discovered domains to this file
    #[arg(short, long, value_name = "OUTFILE")]
    pub output: Option<PathBuf>,

    /// Enable verbosity
    #[arg(short, long)]
    pub verbose: bool,

    /// Print shell completions to stdout and exit
    #[arg(long, value_name = "SHELL")]
    pub completions: Option<Shell>,
}

impl Cli {
    pub fn print_completions(shell: Shell) {
        let mut cmd = Cli::command();
        let name = cmd.get_name().to_owned();
        clap_complete::generate(shell, &mut cmd, name, &mut std::io::stdout());
    }
}

/// Operator-supplied session cookie, parsed from the raw Cookie header
/// into name/value pairs. Immutable for the lifetime of the run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cookie {
    pairs: Vec<(String, String)>,
}

impl Cookie {
    /// Canonical `name=value; name2=value2` rendering.
    pub fn header_value(&self) -> String {
        self.pairs
            .iter()
            .map(|(name, value)| format!("{name}={value}"))
            .collect::<Vec<_>>()
            .join("; ")
    }
}

impl FromStr for Cookie {
    type Err = CookieError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.chars().any(|c| c.is_ascii_control()) {
            return Err(CookieError::ControlChar);
        }

        let mut pairs = Vec::new();
        for part in s.split(';') {
            let part = part.trim();
            if part.is_empty() {
                continue;
            }
            let (name, value) = part
                .split_once('=')
                .ok_or_else(|| CookieError::MissingValue(part.to_owned()))?;
            let name = name.trim();
            if name.is_empty() {
                return Err(CookieError::EmptyName);
            }
            pairs.push((name.to_owned(), value.trim().to_owned()));
        }

        if pairs.is_empty() {
            return Err(CookieError::Empty);
        }

        Ok(Self { pairs })
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CookieError {
    #[error("cookie string holds no name=value pairs")]
    Empty,
    #[error("cookie pair {0:?} is missing a '='")]
    MissingValue(String),
    #[error("cookie pair with an empty name")]
    EmptyName,
    #[error("cookie string contains a control character")]
    ControlChar,
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case::single("sid=abc123", "sid=abc123")]
    #[case::multiple("sid=abc; theme=dark", "sid=abc; theme=dark")]
    #[case::padded("  sid=abc ;theme=dark  ", "sid=abc; theme=dark")]
    #[case::value_with_eq("jwt=a.b=c", "jwt=a.b=c")]
    #[case::trailing_semicolon("sid=abc;", "sid=abc")]
    #[case::empty_value("opt=", "opt=")]
    fn test_cookie_roundtrip(#[case] raw: &str, #[case] expected: &str) {
        let cookie: Cookie = raw.parse().unwrap();
        assert_eq!(cookie.header_value(), expected);
    }

    #[rstest]
    #[case::empty("", CookieError::Empty)]
    #[case::semicolons_only(" ; ; ", CookieError::Empty)]
    #[case::bare_token("sid=abc; bare", CookieError::MissingValue("bare".to_owned()))]
    #[case::empty_name("=abc", CookieError::EmptyName)]
    #[case::newline("sid=abc\nhax=1", CookieError::ControlChar)]
    fn test_cookie_rejects(#[case] raw: &str, #[case] expected: CookieError) {
        assert_eq!(raw.parse::<Cookie>().unwrap_err(), expected);
    }

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }
}
