//! Gapped pattern parsing.
//!
//! A gapped pattern is a sequence of literal base runs and fixed-length gaps.
//! Supports:
//! - `ACGT...` literal runs of unambiguous bases
//! - `.` one gap symbol; a run of dots is one gap of the run's length
//! - `{n}` a gap of exactly `n` symbols
//! - `N` a gap of one symbol
//!
//! Input is uppercased first. Characters outside this syntax (whitespace,
//! stray punctuation) are skipped.

use thiserror::Error;

use crate::alphabet::{self, WILDCARD};

/// One element of a parsed pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// A literal run compared symbol by symbol.
    Literal(Box<[u8]>),
    /// Skip this many text symbols without comparing them.
    Gap(usize),
}

impl Token {
    /// Number of text symbols this token covers.
    #[inline]
    pub fn span(&self) -> usize {
        match self {
            Token::Literal(run) => run.len(),
            Token::Gap(len) => *len,
        }
    }
}

/// A parsed gapped pattern: its tokens and the total span they cover.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GappedPattern {
    tokens: Vec<Token>,
    span: usize,
}

impl GappedPattern {
    /// Build a pattern from tokens, or `None` if their total span does not
    /// fit in `usize`.
    pub fn new(tokens: Vec<Token>) -> Option<Self> {
        let span = tokens
            .iter()
            .try_fold(0usize, |acc, t| acc.checked_add(t.span()))?;
        Some(Self { tokens, span })
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Length of text one occurrence covers.
    pub fn span(&self) -> usize {
        self.span
    }

    pub fn has_gaps(&self) -> bool {
        self.tokens.iter().any(|t| matches!(t, Token::Gap(_)))
    }

    /// Whether any literal symbol exists; without one the pattern is never indexed.
    pub fn has_literal(&self) -> bool {
        self.tokens
            .iter()
            .any(|t| matches!(t, Token::Literal(run) if !run.is_empty()))
    }

    /// Replay the tokens against `text` starting at `start`.
    ///
    /// Literal runs must equal the text slice they cover; gaps are skipped.
    /// Returns false if the pattern would run past the end of the text.
    pub fn matches_at(&self, text: &[u8], start: usize) -> bool {
        match start.checked_add(self.span) {
            Some(end) if end <= text.len() => {}
            _ => return false,
        }

        let mut pos = start;
        for token in &self.tokens {
            match token {
                Token::Literal(run) => {
                    if text.get(pos..pos + run.len()) != Some(&run[..]) {
                        return false;
                    }
                    pos += run.len();
                }
                Token::Gap(len) => pos += len,
            }
        }
        true
    }
}

/// Error type for gapped pattern parsing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GapParseError {
    /// `{` with no closing `}` before the end of the pattern.
    #[error("unterminated gap brace at position {position}")]
    UnterminatedBrace { position: usize },
    /// Brace body that is not a decimal gap length.
    #[error("invalid gap length {body:?} at position {position}")]
    InvalidGapLength { position: usize, body: String },
    /// The pattern's total span no longer fits in `usize` once the token
    /// starting here is added.
    #[error("pattern too long at position {position}")]
    PatternTooLong { position: usize },
}

impl GapParseError {
    /// Byte offset of the offending `{` in the input.
    pub fn position(&self) -> usize {
        match self {
            GapParseError::UnterminatedBrace { position }
            | GapParseError::InvalidGapLength { position, .. }
            | GapParseError::PatternTooLong { position } => *position,
        }
    }
}

/// Parse a gapped pattern string into tokens.
pub fn parse_gapped_pattern(pattern: &str) -> Result<GappedPattern, GapParseError> {
    let upper = pattern.to_ascii_uppercase();
    let bytes = upper.as_bytes();
    let mut tokens = Vec::new();
    let mut span = 0usize;
    let mut i = 0;

    while i < bytes.len() {
        let c = bytes[i];
        let start = i;
        let token = if alphabet::is_base(c) {
            let end = scan_while(bytes, i, alphabet::is_base);
            i = end;
            Token::Literal(bytes[start..end].into())
        } else if c == b'.' {
            let end = scan_while(bytes, i, |b| b == b'.');
            i = end;
            Token::Gap(end - start)
        } else if c == b'{' {
            let close = bytes[i + 1..]
                .iter()
                .position(|&b| b == b'}')
                .map(|p| i + 1 + p)
                .ok_or(GapParseError::UnterminatedBrace { position: i })?;
            // Braces are ASCII, so both ends are char boundaries.
            let body = &upper[i + 1..close];
            let len = parse_gap_length(body).ok_or_else(|| GapParseError::InvalidGapLength {
                position: i,
                body: body.to_string(),
            })?;
            i = close + 1;
            Token::Gap(len)
        } else if c == WILDCARD {
            i += 1;
            Token::Gap(1)
        } else {
            i += 1;
            continue;
        };

        span = span
            .checked_add(token.span())
            .ok_or(GapParseError::PatternTooLong { position: start })?;
        tokens.push(token);
    }

    Ok(GappedPattern { tokens, span })
}

fn scan_while(bytes: &[u8], from: usize, pred: impl Fn(u8) -> bool) -> usize {
    bytes[from..]
        .iter()
        .position(|&b| !pred(b))
        .map_or(bytes.len(), |p| from + p)
}

fn parse_gap_length(body: &str) -> Option<usize> {
    let body = body.trim();
    if body.is_empty() || !body.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    body.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lit(s: &str) -> Token {
        Token::Literal(s.as_bytes().into())
    }

    #[test]
    fn test_parse_literal_only() {
        let p = parse_gapped_pattern("ACGT").unwrap();
        assert_eq!(p.tokens(), &[lit("ACGT")]);
        assert_eq!(p.span(), 4);
        assert!(!p.has_gaps());
    }

    #[test]
    fn test_parse_dot_runs() {
        let p = parse_gapped_pattern("AC...GT.A").unwrap();
        assert_eq!(
            p.tokens(),
            &[lit("AC"), Token::Gap(3), lit("GT"), Token::Gap(1), lit("A")]
        );
        assert_eq!(p.span(), 9);
        assert!(p.has_gaps());
    }

    #[test]
    fn test_parse_brace_gap() {
        let p = parse_gapped_pattern("AC{12}GT").unwrap();
        assert_eq!(p.tokens(), &[lit("AC"), Token::Gap(12), lit("GT")]);
        assert_eq!(p.span(), 16);
    }

    #[test]
    fn test_parse_n_is_single_gap() {
        let p = parse_gapped_pattern("ANNC").unwrap();
        assert_eq!(
            p.tokens(),
            &[lit("A"), Token::Gap(1), Token::Gap(1), lit("C")]
        );
        assert_eq!(p.span(), 4);
    }

    #[test]
    fn test_parse_lowercase_normalized() {
        let p = parse_gapped_pattern("ac.gt").unwrap();
        assert_eq!(p.tokens(), &[lit("AC"), Token::Gap(1), lit("GT")]);
    }

    #[test]
    fn test_parse_skips_other_characters() {
        let p = parse_gapped_pattern(" AC-GT\n").unwrap();
        assert_eq!(p.tokens(), &[lit("AC"), lit("GT")]);
        assert_eq!(p.span(), 4);
    }

    #[test]
    fn test_parse_unterminated_brace() {
        let err = parse_gapped_pattern("AC{3").unwrap_err();
        assert_eq!(err, GapParseError::UnterminatedBrace { position: 2 });
        assert_eq!(err.position(), 2);
    }

    #[test]
    fn test_parse_invalid_gap_length() {
        for bad in ["A{}C", "A{x}C", "A{-1}C", "A{1,2}C"] {
            let err = parse_gapped_pattern(bad).unwrap_err();
            assert!(
                matches!(err, GapParseError::InvalidGapLength { position: 1, .. }),
                "{bad}: {err:?}"
            );
        }
    }

    #[test]
    fn test_parse_empty() {
        let p = parse_gapped_pattern("").unwrap();
        assert!(p.tokens().is_empty());
        assert_eq!(p.span(), 0);
        assert!(!p.has_literal());
    }

    #[test]
    fn test_gap_only_has_no_literal() {
        let p = parse_gapped_pattern("..{4}N").unwrap();
        assert!(!p.has_literal());
        assert_eq!(p.span(), 7);
    }

    #[test]
    fn test_matches_at() {
        let p = parse_gapped_pattern("AC.GT").unwrap();
        assert!(p.matches_at(b"ACXGT", 0));
        assert!(p.matches_at(b"TTACAGT", 2));
        assert!(!p.matches_at(b"ACXGA", 0));
        // Runs past the end
        assert!(!p.matches_at(b"ACXG", 0));
        assert!(!p.matches_at(b"ACXGT", 1));
    }

    #[test]
    fn test_span_overflow_rejected() {
        let pattern = format!("A{{{}}}C{{5}}", usize::MAX);
        let err = parse_gapped_pattern(&pattern).unwrap_err();
        assert_eq!(err, GapParseError::PatternTooLong { position: 1 });

        let pattern = format!("ACG{{{}}}", usize::MAX - 2);
        let err = parse_gapped_pattern(&pattern).unwrap_err();
        assert_eq!(err.position(), 3);
    }

    #[test]
    fn test_largest_span_accepted() {
        let p = parse_gapped_pattern(&format!("ACG{{{}}}", usize::MAX - 3)).unwrap();
        assert_eq!(p.span(), usize::MAX);
        assert!(!p.matches_at(b"ACGTTT", 0));
        assert!(!p.matches_at(b"ACGTTT", 5));
    }

    #[test]
    fn test_new_checks_span() {
        let p = GappedPattern::new(vec![lit("AC"), Token::Gap(2)]).unwrap();
        assert_eq!(p.span(), 4);
        assert!(GappedPattern::new(vec![Token::Gap(usize::MAX), lit("A")]).is_none());
    }

    #[test]
    fn test_error_display() {
        let err = parse_gapped_pattern("A{7").unwrap_err();
        assert_eq!(err.to_string(), "unterminated gap brace at position 1");
    }
}
