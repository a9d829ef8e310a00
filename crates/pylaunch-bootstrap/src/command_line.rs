//! Child command line construction.
//!
//! `"<interpreter>" "<entry script>" "<arg>"...`, every element quoted on its
//! own. Splitting the result with [`split_command_line`](crate::args::split_command_line)
//! gives back the interpreter, the entry script and then the forwarded
//! arguments in order.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use crate::args::ArgumentVector;

/// How arguments are quoted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QuotingStyle {
    /// MSVC runtime escaping: embedded quotes and the backslashes that
    /// precede them (or the closing quote) are escaped, so every argument
    /// round-trips.
    #[default]
    Escaped,
    /// Wrap in quotes, no escaping. Arguments containing `"` do not survive
    /// re-splitting; kept for callers that depend on the historical output.
    Legacy,
}

impl FromStr for QuotingStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "escaped" => Ok(Self::Escaped),
            "legacy" => Ok(Self::Legacy),
            other => Err(format!("unknown quoting style '{}' (expected escaped or legacy)", other)),
        }
    }
}

impl QuotingStyle {
    /// Append one quoted argument to `out`.
    pub fn quote_into(self, arg: &str, out: &mut String) {
        match self {
            Self::Legacy => {
                out.push('"');
                out.push_str(arg);
                out.push('"');
            }
            Self::Escaped => {
                out.push('"');
                let mut backslashes = 0usize;
                for c in arg.chars() {
                    match c {
                        '\\' => backslashes += 1,
                        '"' => {
                            out.extend(std::iter::repeat('\\').take(backslashes * 2 + 1));
                            out.push('"');
                            backslashes = 0;
                        }
                        _ => {
                            out.extend(std::iter::repeat('\\').take(backslashes));
                            out.push(c);
                            backslashes = 0;
                        }
                    }
                }
                // Backslashes before the closing quote must not escape it.
                out.extend(std::iter::repeat('\\').take(backslashes * 2));
                out.push('"');
            }
        }
    }

    pub fn quote(self, arg: &str) -> String {
        let mut out = String::with_capacity(arg.len() + 2);
        self.quote_into(arg, &mut out);
        out
    }
}

/// Fully assembled child command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine(String);

impl CommandLine {
    pub fn build(
        interpreter: &Path,
        entry_script: &Path,
        args: &ArgumentVector,
        style: QuotingStyle,
    ) -> Self {
        let interpreter = interpreter.to_string_lossy();
        let entry_script = entry_script.to_string_lossy();

        let mut line = String::new();
        // The program-name token has no escape rules, only plain quotes.
        line.push('"');
        line.push_str(&interpreter);
        line.push('"');
        line.push(' ');
        style.quote_into(&entry_script, &mut line);
        for arg in args {
            line.push(' ');
            style.quote_into(arg, &mut line);
        }
        Self(line)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CommandLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::args::split_command_line;

    fn build(args: &[&str], style: QuotingStyle) -> CommandLine {
        CommandLine::build(
            Path::new(r"runtime\python.exe"),
            Path::new("main.py"),
            &ArgumentVector::new(args.iter().copied()),
            style,
        )
    }

    #[test]
    fn test_quoting_style_from_str() {
        assert_eq!("escaped".parse::<QuotingStyle>(), Ok(QuotingStyle::Escaped));
        assert_eq!(" Legacy ".parse::<QuotingStyle>(), Ok(QuotingStyle::Legacy));
        assert!("shell".parse::<QuotingStyle>().is_err());
        assert_eq!(QuotingStyle::default(), QuotingStyle::Escaped);
    }

    #[test]
    fn test_flag_and_spaced_value() {
        let line = build(&["--flag", "value with spaces"], QuotingStyle::Escaped);
        assert_eq!(
            line.as_str(),
            r#""runtime\python.exe" "main.py" "--flag" "value with spaces""#
        );
    }

    #[test]
    fn test_no_arguments() {
        let line = build(&[], QuotingStyle::Legacy);
        assert_eq!(line.as_str(), r#""runtime\python.exe" "main.py""#);
        assert_eq!(line.to_string(), line.as_str());
    }

    #[test]
    fn test_escaped_round_trip() {
        let cases: &[&[&str]] = &[
            &[],
            &[""],
            &["plain"],
            &["two words", "\ttabbed\t"],
            &[r#"say "hi""#, r#"""#, r#""""#],
            &[r"C:\dir\", r"trailing\\", r"\\server\share"],
            &[r#"mixed\"quote"#, r#"a\\"b"#, r#"end with quote""#],
            &["ünïcödé", "emoji 🚀", "--opt=x y"],
        ];
        for &args in cases {
            let line = build(args, QuotingStyle::Escaped);
            let parts = split_command_line(line.as_str());
            assert_eq!(parts[0], r"runtime\python.exe", "line: {}", line);
            assert_eq!(parts[1], "main.py", "line: {}", line);
            assert_eq!(&parts[2..], args, "line: {}", line);
        }
    }

    #[test]
    fn test_legacy_round_trip_without_quotes() {
        let args = ["--flag", "value with spaces", "", r"C:\dir\sub"];
        let line = build(&args, QuotingStyle::Legacy);
        let parts = split_command_line(line.as_str());
        assert_eq!(&parts[2..], &args);
    }

    #[test]
    fn test_legacy_embedded_quote_is_not_preserved() {
        let line = build(&[r#"say "hi" now"#], QuotingStyle::Legacy);
        assert_eq!(line.as_str(), r#""runtime\python.exe" "main.py" "say "hi" now""#);
        let parts = split_command_line(line.as_str());
        assert_ne!(&parts[2..], &[r#"say "hi" now"#]);
    }

    #[test]
    fn test_legacy_trailing_backslash_swallows_quote() {
        let line = build(&[r"C:\dir\", "next"], QuotingStyle::Legacy);
        let parts = split_command_line(line.as_str());
        assert_ne!(&parts[2..], &[r"C:\dir\", "next"]);
    }

    #[test]
    fn test_build_is_deterministic() {
        let args = ["a b", r#"c"d"#];
        assert_eq!(
            build(&args, QuotingStyle::Escaped),
            build(&args, QuotingStyle::Escaped)
        );
    }
}
