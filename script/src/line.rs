//! Script line parsing

/// One parsed script line
///
/// The token is the first whitespace-delimited word, uppercased so scripts
/// are case-insensitive about command names. The argument is everything after
/// the first whitespace character, verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptLine {
    token: String,
    arg: String,
}

impl ScriptLine {
    /// Parses a raw line, or `None` for blank lines and `#` comments
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            return None;
        }

        let (token, arg) = match trimmed.split_once(char::is_whitespace) {
            Some((token, arg)) => (token, arg),
            None => (trimmed, ""),
        };

        Some(Self {
            token: token.to_uppercase(),
            arg: arg.to_string(),
        })
    }

    /// Returns the uppercased command token
    pub fn token(&self) -> &str {
        &self.token
    }

    /// Returns the argument text
    pub fn arg(&self) -> &str {
        &self.arg
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_and_arg_split_on_first_whitespace() {
        let line = ScriptLine::parse("  PRINT hello world  ").unwrap();
        assert_eq!(line.token(), "PRINT");
        assert_eq!(line.arg(), "hello world");
    }

    #[test]
    fn test_token_is_uppercased_arg_is_verbatim() {
        let line = ScriptLine::parse("print Mixed Case Arg").unwrap();
        assert_eq!(line.token(), "PRINT");
        assert_eq!(line.arg(), "Mixed Case Arg");
    }

    #[test]
    fn test_bare_token_has_empty_arg() {
        let line = ScriptLine::parse("WAIT").unwrap();
        assert_eq!(line.token(), "WAIT");
        assert_eq!(line.arg(), "");
    }

    #[test]
    fn test_blank_and_comment_lines_parse_to_none() {
        assert_eq!(ScriptLine::parse(""), None);
        assert_eq!(ScriptLine::parse("   \t  "), None);
        assert_eq!(ScriptLine::parse("# a comment"), None);
        assert_eq!(ScriptLine::parse("   # indented comment"), None);
    }

    #[test]
    fn test_tab_separates_token_from_arg() {
        let line = ScriptLine::parse("DELAY\t500").unwrap();
        assert_eq!(line.token(), "DELAY");
        assert_eq!(line.arg(), "500");
    }

    #[test]
    fn test_arg_keeps_whitespace_past_the_separator() {
        // Only the single separating character is consumed; any further
        // whitespace belongs to the argument.
        let line = ScriptLine::parse("PRINT  indented").unwrap();
        assert_eq!(line.arg(), " indented");

        let line = ScriptLine::parse("PRINT \t a").unwrap();
        assert_eq!(line.arg(), "\t a");
    }
}
