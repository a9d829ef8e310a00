//! Argument forwarding: the launcher's own invocation arguments, program
//! name removed, kept as opaque strings.

use std::ffi::OsString;

use crate::error::LaunchError;

/// Invocation arguments without the program name. Never interpreted,
/// trimmed or reordered.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArgumentVector(Vec<String>);

impl ArgumentVector {
    pub fn new<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(args.into_iter().map(Into::into).collect())
    }

    /// Arguments of the current process.
    ///
    /// On Windows the raw command line is split with `CommandLineToArgvW`,
    /// elsewhere the OS-provided argv is used.
    pub fn capture() -> Result<Self, LaunchError> {
        #[cfg(target_os = "windows")]
        let raw = crate::windows::command_line_args()?;
        #[cfg(not(target_os = "windows"))]
        let raw = decode_os_args(std::env::args_os())?;
        Self::from_invocation(raw)
    }

    /// Split a full command line (program name first) with the standard
    /// Windows rules and drop the program name.
    pub fn from_command_line(line: &str) -> Result<Self, LaunchError> {
        Self::from_invocation(split_command_line(line))
    }

    /// Drop the program name from an already split invocation.
    pub fn from_invocation(mut raw: Vec<String>) -> Result<Self, LaunchError> {
        if raw.is_empty() {
            return Err(LaunchError::ArgumentParse(
                "invocation has no program name".to_string(),
            ));
        }
        raw.remove(0);
        Ok(Self(raw))
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'a> IntoIterator for &'a ArgumentVector {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Arguments that are not valid Unicode cannot be re-quoted without
/// alteration, so they are rejected.
pub(crate) fn decode_os_args<I>(args: I) -> Result<Vec<String>, LaunchError>
where
    I: IntoIterator<Item = OsString>,
{
    args.into_iter()
        .enumerate()
        .map(|(i, arg)| {
            arg.into_string().map_err(|raw| {
                LaunchError::ArgumentParse(format!(
                    "argument {} is not valid Unicode: {:?}",
                    i, raw
                ))
            })
        })
        .collect()
}

fn is_blank(c: char) -> bool {
    c == ' ' || c == '\t'
}

/// Split a command line the way `CommandLineToArgvW` / the MSVC runtime do.
///
/// The first token is the program name: taken verbatim up to the closing
/// quote if it starts with `"`, otherwise up to the first blank, with no
/// backslash processing. Remaining tokens follow the argument rules:
/// `2n` backslashes before `"` give `n` backslashes and a quote toggle,
/// `2n+1` give `n` backslashes and a literal `"`, backslashes not followed by
/// `"` are literal, and `""` inside a quoted run is a literal `"`.
///
/// An empty line yields no tokens.
pub fn split_command_line(line: &str) -> Vec<String> {
    let mut chars = line.chars().peekable();
    let mut out = Vec::new();
    if chars.peek().is_none() {
        return out;
    }

    let mut program = String::new();
    if chars.peek() == Some(&'"') {
        chars.next();
        for c in chars.by_ref() {
            if c == '"' {
                break;
            }
            program.push(c);
        }
    } else {
        while let Some(&c) = chars.peek() {
            if is_blank(c) {
                break;
            }
            program.push(c);
            chars.next();
        }
    }
    out.push(program);

    loop {
        while chars.peek().copied().is_some_and(is_blank) {
            chars.next();
        }
        if chars.peek().is_none() {
            break;
        }

        let mut cur = String::new();
        let mut in_quotes = false;
        while let Some(&c) = chars.peek() {
            match c {
                c if is_blank(c) && !in_quotes => break,
                '\\' => {
                    let mut backslashes = 0usize;
                    while chars.peek() == Some(&'\\') {
                        chars.next();
                        backslashes += 1;
                    }
                    if chars.peek() == Some(&'"') {
                        cur.extend(std::iter::repeat('\\').take(backslashes / 2));
                        if backslashes % 2 == 1 {
                            cur.push('"');
                            chars.next();
                        }
                    } else {
                        cur.extend(std::iter::repeat('\\').take(backslashes));
                    }
                }
                '"' => {
                    chars.next();
                    if in_quotes && chars.peek() == Some(&'"') {
                        cur.push('"');
                        chars.next();
                    } else {
                        in_quotes = !in_quotes;
                    }
                }
                _ => {
                    cur.push(c);
                    chars.next();
                }
            }
        }
        out.push(cur);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_program_name_removed() {
        let args = ArgumentVector::from_command_line(r#""C:\Apps\My App\Launcher.exe" --flag "value with spaces""#)
            .unwrap();
        assert_eq!(args.as_slice(), ["--flag", "value with spaces"]);
    }

    #[test]
    fn test_program_name_only() {
        let args = ArgumentVector::from_command_line("launcher.exe").unwrap();
        assert!(args.is_empty());
        assert_eq!(args.len(), 0);
    }

    #[test]
    fn test_empty_invocation_is_error() {
        let err = ArgumentVector::from_command_line("").unwrap_err();
        assert!(matches!(err, LaunchError::ArgumentParse(_)));
        assert!(ArgumentVector::from_invocation(Vec::new()).is_err());
    }

    #[test]
    fn test_program_name_keeps_backslashes() {
        let parts = split_command_line(r#"C:\tools\launcher.exe a"#);
        assert_eq!(parts, [r"C:\tools\launcher.exe", "a"]);
        let parts = split_command_line(r#""C:\with space\x.exe"b c"#);
        assert_eq!(parts, [r"C:\with space\x.exe", "b", "c"]);
    }

    #[test]
    fn test_backslash_rules() {
        let parts = split_command_line(r#"p a\\\"b c\\"d e" f\\g "h\\""#);
        assert_eq!(parts, ["p", r#"a\"b"#, r"c\d e", r"f\\g", r"h\"]);
    }

    #[test]
    fn test_empty_quoted_argument_is_kept() {
        let parts = split_command_line(r#"p "" x"#);
        assert_eq!(parts, ["p", "", "x"]);
    }

    #[test]
    fn test_doubled_quote_inside_quotes() {
        let parts = split_command_line(r#"p "a""b" c"#);
        assert_eq!(parts, ["p", r#"a"b"#, "c"]);
    }

    #[test]
    fn test_tabs_and_runs_of_blanks() {
        let parts = split_command_line("p\t a  \t b ");
        assert_eq!(parts, ["p", "a", "b"]);
    }

    #[test]
    fn test_decode_os_args() {
        let raw = decode_os_args(vec![OsString::from("launcher"), OsString::from("x y")]).unwrap();
        assert_eq!(raw, ["launcher", "x y"]);
    }

    #[cfg(unix)]
    #[test]
    fn test_decode_rejects_non_unicode() {
        use std::os::unix::ffi::OsStringExt;
        let bad = OsString::from_vec(vec![0x66, 0x80, 0x6f]);
        let err = decode_os_args(vec![OsString::from("launcher"), bad]).unwrap_err();
        assert!(err.to_string().contains("argument 1"));
    }
}
