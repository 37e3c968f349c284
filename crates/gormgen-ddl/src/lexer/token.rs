//! Token types for the DDL lexer.

use super::Span;

/// Keywords the DDL parser dispatches on.
///
/// Type names (`INT`, `VARCHAR`, ...) and table option names (`ENGINE`,
/// `ROW_FORMAT`, ...) are deliberately not keywords: MySQL lets most of them
/// appear as bare column names, so the parser matches them as words instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Keyword {
    // Statement heads
    Create,
    Table,
    Temporary,
    If,
    Not,
    Exists,
    Like,

    // Column options
    Null,
    Default,
    AutoIncrement,
    Comment,
    On,
    Update,
    Delete,
    Collate,
    Character,
    Charset,
    Set,
    Unsigned,
    Zerofill,
    Generated,
    Always,
    As,
    Virtual,
    Stored,

    // Keys and constraints
    Primary,
    Key,
    Unique,
    Index,
    Fulltext,
    Spatial,
    Constraint,
    Foreign,
    References,
    Check,

    // Literals
    True,
    False,
}

impl Keyword {
    /// Attempts to parse a keyword from a string (case-insensitive).
    #[must_use]
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_ascii_uppercase().as_str() {
            "CREATE" => Some(Self::Create),
            "TABLE" => Some(Self::Table),
            "TEMPORARY" => Some(Self::Temporary),
            "IF" => Some(Self::If),
            "NOT" => Some(Self::Not),
            "EXISTS" => Some(Self::Exists),
            "LIKE" => Some(Self::Like),
            "NULL" => Some(Self::Null),
            "DEFAULT" => Some(Self::Default),
            "AUTO_INCREMENT" => Some(Self::AutoIncrement),
            "COMMENT" => Some(Self::Comment),
            "ON" => Some(Self::On),
            "UPDATE" => Some(Self::Update),
            "DELETE" => Some(Self::Delete),
            "COLLATE" => Some(Self::Collate),
            "CHARACTER" => Some(Self::Character),
            "CHARSET" => Some(Self::Charset),
            "SET" => Some(Self::Set),
            "UNSIGNED" => Some(Self::Unsigned),
            "ZEROFILL" => Some(Self::Zerofill),
            "GENERATED" => Some(Self::Generated),
            "ALWAYS" => Some(Self::Always),
            "AS" => Some(Self::As),
            "VIRTUAL" => Some(Self::Virtual),
            "STORED" => Some(Self::Stored),
            "PRIMARY" => Some(Self::Primary),
            "KEY" => Some(Self::Key),
            "UNIQUE" => Some(Self::Unique),
            "INDEX" => Some(Self::Index),
            "FULLTEXT" => Some(Self::Fulltext),
            "SPATIAL" => Some(Self::Spatial),
            "CONSTRAINT" => Some(Self::Constraint),
            "FOREIGN" => Some(Self::Foreign),
            "REFERENCES" => Some(Self::References),
            "CHECK" => Some(Self::Check),
            "TRUE" => Some(Self::True),
            "FALSE" => Some(Self::False),
            _ => None,
        }
    }

    /// Returns the keyword as a string.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Create => "CREATE",
            Self::Table => "TABLE",
            Self::Temporary => "TEMPORARY",
            Self::If => "IF",
            Self::Not => "NOT",
            Self::Exists => "EXISTS",
            Self::Like => "LIKE",
            Self::Null => "NULL",
            Self::Default => "DEFAULT",
            Self::AutoIncrement => "AUTO_INCREMENT",
            Self::Comment => "COMMENT",
            Self::On => "ON",
            Self::Update => "UPDATE",
            Self::Delete => "DELETE",
            Self::Collate => "COLLATE",
            Self::Character => "CHARACTER",
            Self::Charset => "CHARSET",
            Self::Set => "SET",
            Self::Unsigned => "UNSIGNED",
            Self::Zerofill => "ZEROFILL",
            Self::Generated => "GENERATED",
            Self::Always => "ALWAYS",
            Self::As => "AS",
            Self::Virtual => "VIRTUAL",
            Self::Stored => "STORED",
            Self::Primary => "PRIMARY",
            Self::Key => "KEY",
            Self::Unique => "UNIQUE",
            Self::Index => "INDEX",
            Self::Fulltext => "FULLTEXT",
            Self::Spatial => "SPATIAL",
            Self::Constraint => "CONSTRAINT",
            Self::Foreign => "FOREIGN",
            Self::References => "REFERENCES",
            Self::Check => "CHECK",
            Self::True => "TRUE",
            Self::False => "FALSE",
        }
    }

    /// Returns true if the keyword can start a table-level constraint or
    /// index definition inside `CREATE TABLE (...)`.
    #[must_use]
    pub const fn starts_table_constraint(&self) -> bool {
        matches!(
            self,
            Self::Primary
                | Self::Unique
                | Self::Key
                | Self::Index
                | Self::Fulltext
                | Self::Spatial
                | Self::Constraint
                | Self::Foreign
                | Self::Check
        )
    }
}

/// The kind of token.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    // Literals
    /// Integer literal (e.g., 42)
    Integer(i64),
    /// Float literal (e.g., 3.14)
    Float(f64),
    /// String literal, single or double quoted (e.g., 'hello')
    String(String),
    /// Hex blob literal (e.g., X'1234')
    Blob(Vec<u8>),

    // Identifiers and keywords
    /// Identifier, bare or backquoted (e.g., user_id, `order`)
    Identifier(String),
    /// DDL keyword
    Keyword(Keyword),

    // Operators
    /// +
    Plus,
    /// -
    Minus,
    /// *
    Star,
    /// /
    Slash,
    /// %
    Percent,
    /// =
    Eq,
    /// != or <>
    NotEq,
    /// <
    Lt,
    /// <=
    LtEq,
    /// >
    Gt,
    /// >=
    GtEq,
    /// ||
    Concat,
    /// &
    BitAnd,
    /// |
    BitOr,
    /// ~
    BitNot,

    // Delimiters
    /// (
    LeftParen,
    /// )
    RightParen,
    /// ,
    Comma,
    /// ;
    Semicolon,
    /// .
    Dot,
    /// :
    Colon,
    /// ?
    Question,
    /// @
    At,

    // Special
    /// End of input
    Eof,
    /// Invalid/unknown token
    Error(String),
}

/// A token with its span in the source code.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    /// The kind of token.
    pub kind: TokenKind,
    /// The location in the source code.
    pub span: Span,
}

impl Token {
    /// Creates a new token.
    #[must_use]
    pub const fn new(kind: TokenKind, span: Span) -> Self {
        Self { kind, span }
    }

    /// Returns true if this is an EOF token.
    #[must_use]
    pub const fn is_eof(&self) -> bool {
        matches!(self.kind, TokenKind::Eof)
    }

    /// Returns the keyword if this is a keyword token.
    #[must_use]
    pub const fn as_keyword(&self) -> Option<Keyword> {
        match &self.kind {
            TokenKind::Keyword(kw) => Some(*kw),
            _ => None,
        }
    }
}
