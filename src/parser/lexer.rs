//! Scanner (tokenizer) for C-simple source code
//!
//! Converts raw source text into [`Lexeme`]s, one per call, pulled on demand
//! by the parser. The scanner never materializes a full token list: a single
//! lexeme is alive at a time as the parser's lookahead.
//!
//! Tokenization is driven by a fixed, ordered table of [`LexRule`]s. Every
//! rule is tried against the start of the remaining input and the rule with
//! the longest match wins, ties going to the rule listed first. Longest-match
//! is what keeps `==` from scanning as two `=` lexemes and `//` from scanning
//! as two divisions. Identifier-shaped matches are reclassified against the
//! [`Keyword`] table afterwards, so keyword recognition never depends on rule
//! ordering.

use std::fmt;

use log::trace;
use strum::IntoEnumIterator;

use super::errors::LexicalError;

/// Reserved words of the language.
///
/// Keywords are lexically indistinguishable from identifiers; the scanner
/// matches an identifier first and then consults [`Keyword::parse`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[derive(strum::AsRefStr, strum::EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum Keyword {
    If,
    Else,
    For,
    Int,
    Float,
}

impl Keyword {
    /// Looks up `input` in the keyword table.
    pub fn parse(input: &str) -> Option<Self> {
        Self::iter().find(|keyword| keyword.as_ref() == input)
    }
}

/// The closed set of terminal categories.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TokenKind {
    Keyword(Keyword),

    /// Identifier: `[a-zA-Z_][a-zA-Z0-9_]*`, excluding keywords.
    Ident,
    /// Integer literal.
    Num,
    /// Floating-point literal, digits on both sides of the point.
    Float,

    Assign, // =
    Eq,     // ==
    Lt,     // <
    Gt,     // >
    Plus,   // +
    Minus,  // -
    Star,   // *
    Slash,  // /

    LPar,   // (
    RPar,   // )
    LBrace, // {
    RBrace, // }
    Semi,   // ;

    /// Pseudo-category for whitespace and comments. Never surfaces from the
    /// scanner; a rule classified as `Ignore` restarts the scan instead.
    Ignore,
}

impl TokenKind {
    /// Short uppercase tag used in the `(KIND, "text")` lexeme rendering.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Keyword(Keyword::If) => "IF",
            Self::Keyword(Keyword::Else) => "ELSE",
            Self::Keyword(Keyword::For) => "FOR",
            Self::Keyword(Keyword::Int) => "INT",
            Self::Keyword(Keyword::Float) => "FLOAT",
            Self::Ident => "ID",
            Self::Num => "NUM",
            Self::Float => "FLOATNUM",
            Self::Assign => "ASSIGN",
            Self::Eq => "EQ",
            Self::Lt => "LT",
            Self::Gt => "GT",
            Self::Plus => "PLUS",
            Self::Minus => "MINUS",
            Self::Star => "MUL",
            Self::Slash => "DIV",
            Self::LPar => "LPAR",
            Self::RPar => "RPAR",
            Self::LBrace => "LBRACE",
            Self::RBrace => "RBRACE",
            Self::Semi => "SEMI",
            Self::Ignore => "IGNORE",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Keyword(keyword) => write!(f, "'{}'", keyword.as_ref()),
            Self::Ident => write!(f, "identifier"),
            Self::Num => write!(f, "number"),
            Self::Float => write!(f, "float number"),
            Self::Assign => write!(f, "'='"),
            Self::Eq => write!(f, "'=='"),
            Self::Lt => write!(f, "'<'"),
            Self::Gt => write!(f, "'>'"),
            Self::Plus => write!(f, "'+'"),
            Self::Minus => write!(f, "'-'"),
            Self::Star => write!(f, "'*'"),
            Self::Slash => write!(f, "'/'"),
            Self::LPar => write!(f, "'('"),
            Self::RPar => write!(f, "')'"),
            Self::LBrace => write!(f, "'{{'"),
            Self::RBrace => write!(f, "'}}'"),
            Self::Semi => write!(f, "';'"),
            Self::Ignore => write!(f, "ignored text"),
        }
    }
}

/// One classified unit of source text: category plus the exact matched text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lexeme {
    pub kind: TokenKind,
    pub text: String,
}

impl Lexeme {
    pub fn new(kind: TokenKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }
}

impl fmt::Display for Lexeme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, \"{}\")", self.kind.name(), self.text)
    }
}

/// A prefix matcher for one lexical rule.
#[derive(Debug, Clone, Copy)]
pub enum Pattern {
    /// Matches this exact text.
    Lit(&'static str),
    /// Matches the prefix length reported by the function (0 = no match).
    Chars(fn(&str) -> usize),
}

impl Pattern {
    /// Length in bytes of the prefix of `input` this pattern matches.
    fn match_len(&self, input: &str) -> usize {
        match self {
            Self::Lit(text) => {
                if input.starts_with(text) {
                    text.len()
                } else {
                    0
                }
            }
            Self::Chars(matcher) => matcher(input),
        }
    }
}

/// One entry of the scanner's rule table: category, pattern, and a transform
/// applied to the lexeme before it is surfaced (ordinarily [`identity`]).
pub struct LexRule {
    pub kind: TokenKind,
    pub pattern: Pattern,
    pub transform: fn(Lexeme) -> Lexeme,
}

/// Default transform: surface the lexeme unchanged.
pub fn identity(lexeme: Lexeme) -> Lexeme {
    lexeme
}

fn match_whitespace(input: &str) -> usize {
    input
        .bytes()
        .take_while(|&b| matches!(b, b' ' | b'\t' | b'\r' | b'\n'))
        .count()
}

fn match_line_comment(input: &str) -> usize {
    if !input.starts_with("//") {
        return 0;
    }
    // Up to but not including the newline, so line counting stays with the
    // whitespace skipper.
    input.find('\n').unwrap_or(input.len())
}

fn match_num(input: &str) -> usize {
    input.bytes().take_while(u8::is_ascii_digit).count()
}

fn match_float(input: &str) -> usize {
    let whole = match_num(input);
    if whole == 0 || !input[whole..].starts_with('.') {
        return 0;
    }
    let frac = match_num(&input[whole + 1..]);
    if frac == 0 {
        return 0;
    }
    whole + 1 + frac
}

fn match_ident(input: &str) -> usize {
    let mut bytes = input.bytes();
    match bytes.next() {
        Some(b) if b.is_ascii_alphabetic() || b == b'_' => {}
        _ => return 0,
    }
    1 + bytes
        .take_while(|b| b.is_ascii_alphanumeric() || *b == b'_')
        .count()
}

/// The rule table for the C-simple language.
///
/// Order only matters for ties; longest match decides everything else.
pub const RULES: &[LexRule] = &[
    LexRule {
        kind: TokenKind::Ignore,
        pattern: Pattern::Chars(match_whitespace),
        transform: identity,
    },
    LexRule {
        kind: TokenKind::Ignore,
        pattern: Pattern::Chars(match_line_comment),
        transform: identity,
    },
    LexRule {
        kind: TokenKind::Eq,
        pattern: Pattern::Lit("=="),
        transform: identity,
    },
    LexRule {
        kind: TokenKind::Assign,
        pattern: Pattern::Lit("="),
        transform: identity,
    },
    LexRule {
        kind: TokenKind::Lt,
        pattern: Pattern::Lit("<"),
        transform: identity,
    },
    LexRule {
        kind: TokenKind::Gt,
        pattern: Pattern::Lit(">"),
        transform: identity,
    },
    LexRule {
        kind: TokenKind::LPar,
        pattern: Pattern::Lit("("),
        transform: identity,
    },
    LexRule {
        kind: TokenKind::RPar,
        pattern: Pattern::Lit(")"),
        transform: identity,
    },
    LexRule {
        kind: TokenKind::LBrace,
        pattern: Pattern::Lit("{"),
        transform: identity,
    },
    LexRule {
        kind: TokenKind::RBrace,
        pattern: Pattern::Lit("}"),
        transform: identity,
    },
    LexRule {
        kind: TokenKind::Semi,
        pattern: Pattern::Lit(";"),
        transform: identity,
    },
    LexRule {
        kind: TokenKind::Plus,
        pattern: Pattern::Lit("+"),
        transform: identity,
    },
    LexRule {
        kind: TokenKind::Minus,
        pattern: Pattern::Lit("-"),
        transform: identity,
    },
    LexRule {
        kind: TokenKind::Star,
        pattern: Pattern::Lit("*"),
        transform: identity,
    },
    LexRule {
        kind: TokenKind::Slash,
        pattern: Pattern::Lit("/"),
        transform: identity,
    },
    LexRule {
        kind: TokenKind::Float,
        pattern: Pattern::Chars(match_float),
        transform: identity,
    },
    LexRule {
        kind: TokenKind::Num,
        pattern: Pattern::Chars(match_num),
        transform: identity,
    },
    LexRule {
        kind: TokenKind::Ident,
        pattern: Pattern::Chars(match_ident),
        transform: identity,
    },
];

/// Pull-based scanner over an in-memory source string.
pub struct Scanner<'src> {
    rules: &'static [LexRule],
    source: &'src str,
    position: usize,
    line: usize,
}

impl<'src> Scanner<'src> {
    /// Create a scanner over `source` using the default C-simple rule table.
    pub fn new(source: &'src str) -> Self {
        Self::with_rules(RULES, source)
    }

    /// Create a scanner with a caller-supplied rule table.
    pub fn with_rules(rules: &'static [LexRule], source: &'src str) -> Self {
        Self {
            rules,
            source,
            position: 0,
            line: 1,
        }
    }

    /// Reset the cursor to the start of a new input string.
    pub fn set_input(&mut self, source: &'src str) {
        self.source = source;
        self.position = 0;
        self.line = 1;
    }

    /// 1-based line of the most recently consumed character.
    pub fn line(&self) -> usize {
        self.line
    }

    /// Advance past exactly one token and return it, or `Ok(None)` once the
    /// input is exhausted. Fails only when no rule matches a non-empty prefix
    /// of the remaining input.
    pub fn next_lexeme(&mut self) -> Result<Option<Lexeme>, LexicalError> {
        loop {
            self.skip_whitespace();

            let rest = self.rest();
            if rest.is_empty() {
                return Ok(None);
            }

            // Longest match wins; earlier rules win ties.
            let mut best: Option<(&LexRule, usize)> = None;
            for rule in self.rules {
                let len = rule.pattern.match_len(rest);
                if len > 0 && best.map_or(true, |(_, best_len)| len > best_len) {
                    best = Some((rule, len));
                }
            }

            let Some((rule, len)) = best else {
                return Err(LexicalError { line: self.line });
            };

            let text = rest[..len].to_string();
            self.advance(len);

            if rule.kind == TokenKind::Ignore {
                continue;
            }

            // An identifier-shaped match that spells a reserved word becomes
            // that keyword; the matched text is unchanged.
            let kind = match rule.kind {
                TokenKind::Ident => match Keyword::parse(&text) {
                    Some(keyword) => TokenKind::Keyword(keyword),
                    None => TokenKind::Ident,
                },
                kind => kind,
            };

            let lexeme = (rule.transform)(Lexeme { kind, text });
            trace!("line {}: {}", self.line, lexeme);
            return Ok(Some(lexeme));
        }
    }

    fn rest(&self) -> &'src str {
        &self.source[self.position..]
    }

    /// Skip leading whitespace one character at a time, counting newlines.
    fn skip_whitespace(&mut self) {
        while let Some(b) = self.rest().bytes().next() {
            match b {
                b'\n' => {
                    self.line += 1;
                    self.position += 1;
                }
                b' ' | b'\t' | b'\r' => self.position += 1,
                _ => break,
            }
        }
    }

    /// Move the cursor past `len` bytes, counting embedded newlines.
    fn advance(&mut self, len: usize) {
        self.line += self.rest()[..len].bytes().filter(|b| *b == b'\n').count();
        self.position += len;
    }
}
