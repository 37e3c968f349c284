//! DDL Parser implementation.

use super::error::ParseError;
use crate::ast::{
    ColumnDef, ColumnOption, Constraint, ConstraintKind, CreateTableStatement, DataType, Expr,
    FieldType, FunctionCall, Literal, Statement, TableOption,
};
use crate::lexer::{Keyword, Lexer, Span, Token, TokenKind};

/// Defaults applied to tables that do not declare their own charset or
/// collation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseOptions {
    /// Default character set.
    pub charset: Option<String>,
    /// Default collation.
    pub collation: Option<String>,
}

impl ParseOptions {
    /// Creates options with no defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the default character set.
    #[must_use]
    pub fn with_charset(mut self, charset: impl Into<String>) -> Self {
        self.charset = Some(charset.into());
        self
    }

    /// Sets the default collation.
    #[must_use]
    pub fn with_collation(mut self, collation: impl Into<String>) -> Self {
        self.collation = Some(collation.into());
        self
    }
}

/// MySQL DDL parser.
pub struct Parser<'a> {
    input: &'a str,
    lexer: Lexer<'a>,
    current: Token,
    previous: Token,
    options: ParseOptions,
}

impl<'a> Parser<'a> {
    /// Creates a new parser for the given input.
    #[must_use]
    pub fn new(input: &'a str) -> Self {
        Self::with_options(input, ParseOptions::default())
    }

    /// Creates a new parser with charset/collation defaults.
    #[must_use]
    pub fn with_options(input: &'a str, options: ParseOptions) -> Self {
        let mut lexer = Lexer::new(input);
        let current = lexer.next_token();
        Self {
            input,
            lexer,
            current,
            previous: Token::new(TokenKind::Eof, Span::new(0, 0)),
            options,
        }
    }

    /// Parses every statement in the input, in order.
    ///
    /// # Errors
    ///
    /// Returns a `ParseError` for the first malformed `CREATE TABLE`.
    pub fn parse_statements(&mut self) -> Result<Vec<Statement>, ParseError> {
        let mut statements = vec![];
        loop {
            while self.consume(&TokenKind::Semicolon) {}
            if self.current.is_eof() {
                break;
            }
            statements.push(self.parse_statement()?);
        }
        Ok(statements)
    }

    /// Parses a single statement.
    ///
    /// Anything other than `CREATE [TEMPORARY] TABLE` is skipped up to its
    /// terminating `;` and reported as [`Statement::Other`].
    ///
    /// # Errors
    ///
    /// Returns a `ParseError` if a `CREATE TABLE` statement is malformed.
    pub fn parse_statement(&mut self) -> Result<Statement, ParseError> {
        if self.consume_keyword(Keyword::Create)
            && (self.check_keyword(Keyword::Table) || self.check_keyword(Keyword::Temporary))
        {
            let create = self.parse_create_table()?;
            self.expect_statement_end()?;
            return Ok(Statement::CreateTable(create));
        }
        self.skip_to_statement_end()?;
        self.consume(&TokenKind::Semicolon);
        Ok(Statement::Other)
    }

    /// Parses a CREATE TABLE statement, after the CREATE keyword.
    fn parse_create_table(&mut self) -> Result<CreateTableStatement, ParseError> {
        let temporary = self.consume_keyword(Keyword::Temporary);
        self.expect_keyword(Keyword::Table)?;

        let if_not_exists = if self.consume_keyword(Keyword::If) {
            self.expect_keyword(Keyword::Not)?;
            self.expect_keyword(Keyword::Exists)?;
            true
        } else {
            false
        };

        let mut name = self.expect_name("table name")?;
        let schema = if self.consume(&TokenKind::Dot) {
            let table = self.expect_name("table name")?;
            Some(core::mem::replace(&mut name, table))
        } else {
            None
        };

        if self.check_keyword(Keyword::Like) {
            return Err(ParseError::new(
                "CREATE TABLE ... LIKE is not supported",
                self.current.span,
            ));
        }

        self.expect(&TokenKind::LeftParen)?;
        let mut columns = vec![];
        let mut constraints = vec![];
        loop {
            if self
                .current
                .as_keyword()
                .is_some_and(|kw| kw.starts_table_constraint())
            {
                constraints.push(self.parse_table_constraint()?);
            } else {
                columns.push(self.parse_column_def()?);
            }
            if !self.consume(&TokenKind::Comma) {
                break;
            }
        }
        self.expect(&TokenKind::RightParen)?;

        let options = self.parse_table_options()?;
        let charset = options
            .iter()
            .rev()
            .find_map(|opt| match opt {
                TableOption::Charset(c) => Some(c.clone()),
                _ => None,
            })
            .or_else(|| self.options.charset.clone());
        let collation = options
            .iter()
            .rev()
            .find_map(|opt| match opt {
                TableOption::Collate(c) => Some(c.clone()),
                _ => None,
            })
            .or_else(|| self.options.collation.clone());

        Ok(CreateTableStatement {
            name,
            schema,
            if_not_exists,
            temporary,
            columns,
            constraints,
            options,
            charset,
            collation,
        })
    }

    /// Parses a column definition.
    fn parse_column_def(&mut self) -> Result<ColumnDef, ParseError> {
        let name = self.expect_name("column name")?;
        let mut field_type = self.parse_field_type()?;
        let options = self.parse_column_options(&mut field_type)?;
        Ok(ColumnDef {
            name,
            field_type,
            options,
        })
    }

    /// Parses a data type and its modifiers.
    fn parse_field_type(&mut self) -> Result<FieldType, ParseError> {
        let Some(word) = self.current_word() else {
            return Err(ParseError::unexpected(
                "data type",
                self.current.kind.clone(),
                self.current.span,
            ));
        };
        self.advance();

        let data_type = match word.to_ascii_uppercase().as_str() {
            "TINYINT" | "INT1" => DataType::Tinyint(self.parse_optional_length()?),
            "SMALLINT" | "INT2" => DataType::Smallint(self.parse_optional_length()?),
            "MEDIUMINT" | "MIDDLEINT" | "INT3" => DataType::Mediumint(self.parse_optional_length()?),
            "INT" | "INTEGER" | "INT4" => DataType::Int(self.parse_optional_length()?),
            "BIGINT" | "INT8" => DataType::Bigint(self.parse_optional_length()?),
            "FLOAT" => {
                let (precision, scale) = self.parse_optional_precision_scale()?;
                DataType::Float { precision, scale }
            }
            "DOUBLE" => {
                self.consume_word("PRECISION");
                let (precision, scale) = self.parse_optional_precision_scale()?;
                DataType::Double { precision, scale }
            }
            "REAL" => {
                let (precision, scale) = self.parse_optional_precision_scale()?;
                DataType::Real { precision, scale }
            }
            "DECIMAL" | "DEC" | "FIXED" => {
                let (precision, scale) = self.parse_optional_precision_scale()?;
                DataType::Decimal { precision, scale }
            }
            "NUMERIC" => {
                let (precision, scale) = self.parse_optional_precision_scale()?;
                DataType::Numeric { precision, scale }
            }
            "CHAR" | "CHARACTER" | "NCHAR" => {
                if self.consume_word("VARYING") {
                    DataType::Varchar(self.parse_optional_length()?)
                } else {
                    DataType::Char(self.parse_optional_length()?)
                }
            }
            "VARCHAR" | "NVARCHAR" | "VARCHARACTER" => {
                DataType::Varchar(self.parse_optional_length()?)
            }
            "TINYTEXT" => DataType::Tinytext,
            "TEXT" => DataType::Text(self.parse_optional_length()?),
            "MEDIUMTEXT" => DataType::Mediumtext,
            "LONGTEXT" => DataType::Longtext,
            "BINARY" => DataType::Binary(self.parse_optional_length()?),
            "VARBINARY" => DataType::Varbinary(self.parse_optional_length()?),
            "TINYBLOB" => DataType::Tinyblob,
            "BLOB" => DataType::Blob(self.parse_optional_length()?),
            "MEDIUMBLOB" => DataType::Mediumblob,
            "LONGBLOB" => DataType::Longblob,
            "DATE" => DataType::Date,
            "TIME" => DataType::Time(self.parse_optional_length()?),
            "DATETIME" => DataType::Datetime(self.parse_optional_length()?),
            "TIMESTAMP" => DataType::Timestamp(self.parse_optional_length()?),
            "YEAR" => DataType::Year(self.parse_optional_length()?),
            "BIT" => DataType::Bit(self.parse_optional_length()?),
            "BOOL" | "BOOLEAN" => DataType::Boolean,
            "JSON" => DataType::Json,
            "ENUM" => DataType::Enum(self.parse_string_list()?),
            "SET" => DataType::Set(self.parse_string_list()?),
            _ => {
                if self.check(&TokenKind::LeftParen) {
                    let args = self.parse_raw_parens()?;
                    DataType::Custom(format!("{word}{args}"))
                } else {
                    DataType::Custom(word)
                }
            }
        };

        let mut field_type = FieldType::new(data_type);
        loop {
            match &self.current.kind {
                TokenKind::Keyword(Keyword::Unsigned) => {
                    self.advance();
                    field_type.unsigned = true;
                }
                TokenKind::Keyword(Keyword::Zerofill) => {
                    self.advance();
                    field_type.zerofill = true;
                }
                TokenKind::Keyword(Keyword::Character) => {
                    self.advance();
                    self.expect_keyword(Keyword::Set)?;
                    field_type.charset = Some(self.expect_name("charset name")?);
                }
                TokenKind::Keyword(Keyword::Charset) => {
                    self.advance();
                    field_type.charset = Some(self.expect_name("charset name")?);
                }
                // `SIGNED` is the default; `BINARY` selects the binary collation.
                TokenKind::Identifier(w)
                    if w.eq_ignore_ascii_case("SIGNED") || w.eq_ignore_ascii_case("BINARY") =>
                {
                    self.advance();
                }
                _ => break,
            }
        }
        Ok(field_type)
    }

    /// Parses column options until something that cannot continue the
    /// column definition.
    fn parse_column_options(
        &mut self,
        field_type: &mut FieldType,
    ) -> Result<Vec<ColumnOption>, ParseError> {
        let mut options = vec![];
        loop {
            let option = match &self.current.kind {
                TokenKind::Keyword(Keyword::Not) => {
                    self.advance();
                    self.expect_keyword(Keyword::Null)?;
                    ColumnOption::NotNull
                }
                TokenKind::Keyword(Keyword::Null) => {
                    self.advance();
                    ColumnOption::Null
                }
                TokenKind::Keyword(Keyword::Default) => {
                    self.advance();
                    ColumnOption::Default(self.parse_default_expr()?)
                }
                TokenKind::Keyword(Keyword::AutoIncrement) => {
                    self.advance();
                    ColumnOption::AutoIncrement
                }
                TokenKind::Keyword(Keyword::Primary) => {
                    self.advance();
                    self.expect_keyword(Keyword::Key)?;
                    ColumnOption::PrimaryKey
                }
                TokenKind::Keyword(Keyword::Key) => {
                    self.advance();
                    ColumnOption::PrimaryKey
                }
                TokenKind::Keyword(Keyword::Unique) => {
                    self.advance();
                    self.consume_keyword(Keyword::Key);
                    ColumnOption::UniqueKey
                }
                TokenKind::Keyword(Keyword::Comment) => {
                    self.advance();
                    ColumnOption::Comment(self.expect_string()?)
                }
                TokenKind::Keyword(Keyword::On) => {
                    self.advance();
                    self.expect_keyword(Keyword::Update)?;
                    ColumnOption::OnUpdate(self.parse_default_expr()?)
                }
                TokenKind::Keyword(Keyword::Collate) => {
                    self.advance();
                    let collation = self.expect_name("collation name")?;
                    field_type.collation = Some(collation.clone());
                    ColumnOption::Collate(collation)
                }
                TokenKind::Keyword(Keyword::Generated) => {
                    self.advance();
                    self.expect_keyword(Keyword::Always)?;
                    self.parse_generated()?
                }
                TokenKind::Keyword(Keyword::As) => self.parse_generated()?,
                TokenKind::Keyword(Keyword::Constraint) => {
                    self.advance();
                    if !self.check_keyword(Keyword::Check) {
                        self.expect_name("constraint name")?;
                    }
                    ColumnOption::Check(self.parse_check()?)
                }
                TokenKind::Keyword(Keyword::Check) => ColumnOption::Check(self.parse_check()?),
                TokenKind::Keyword(Keyword::References) => {
                    ColumnOption::References(self.parse_references()?)
                }
                TokenKind::Identifier(w)
                    if w.eq_ignore_ascii_case("VISIBLE") || w.eq_ignore_ascii_case("INVISIBLE") =>
                {
                    self.advance();
                    continue;
                }
                TokenKind::Identifier(w)
                    if ["COLUMN_FORMAT", "STORAGE", "SRID"]
                        .iter()
                        .any(|attr| w.eq_ignore_ascii_case(attr)) =>
                {
                    self.advance();
                    self.advance();
                    continue;
                }
                _ => break,
            };
            options.push(option);
        }
        Ok(options)
    }

    /// Parses `AS (expr) [VIRTUAL | STORED]`.
    fn parse_generated(&mut self) -> Result<ColumnOption, ParseError> {
        self.expect_keyword(Keyword::As)?;
        let raw = self.parse_raw_parens()?;
        let stored = if self.consume_keyword(Keyword::Stored) {
            true
        } else {
            self.consume_keyword(Keyword::Virtual);
            false
        };
        Ok(ColumnOption::Generated {
            expr: strip_parens(&raw),
            stored,
        })
    }

    /// Parses `CHECK (expr) [[NOT] ENFORCED]` and returns the inner text.
    fn parse_check(&mut self) -> Result<String, ParseError> {
        self.expect_keyword(Keyword::Check)?;
        let raw = self.parse_raw_parens()?;
        if self.check_keyword(Keyword::Not) {
            let next = self.peek_token();
            if matches!(&next.kind, TokenKind::Identifier(w) if w.eq_ignore_ascii_case("ENFORCED"))
            {
                self.advance();
                self.advance();
            }
        } else {
            self.consume_word("ENFORCED");
        }
        Ok(strip_parens(&raw))
    }

    /// Parses `REFERENCES tbl (cols) [MATCH ...] [ON DELETE ...] [ON UPDATE ...]`
    /// and returns its source text.
    fn parse_references(&mut self) -> Result<String, ParseError> {
        let start = self.current.span.start;
        self.expect_keyword(Keyword::References)?;
        self.expect_name("table name")?;
        if self.consume(&TokenKind::Dot) {
            self.expect_name("table name")?;
        }
        if self.check(&TokenKind::LeftParen) {
            self.parse_raw_parens()?;
        }

        loop {
            if self.consume_word("MATCH") {
                self.advance();
            } else if self.consume_keyword(Keyword::On) {
                if !self.consume_keyword(Keyword::Delete) {
                    self.expect_keyword(Keyword::Update)?;
                }
                if self.consume_keyword(Keyword::Set) || self.consume_word("NO") {
                    // SET NULL, SET DEFAULT, NO ACTION
                    self.advance();
                } else if self.current_word().is_some() {
                    // RESTRICT, CASCADE
                    self.advance();
                } else {
                    return Err(ParseError::unexpected(
                        "reference action",
                        self.current.kind.clone(),
                        self.current.span,
                    ));
                }
            } else {
                break;
            }
        }

        Ok(String::from(
            Span::new(start, self.previous.span.end).slice(self.input),
        ))
    }

    /// Parses a table-level key, index or constraint.
    fn parse_table_constraint(&mut self) -> Result<Constraint, ParseError> {
        let mut name = None;
        if self.consume_keyword(Keyword::Constraint)
            && !self
                .current
                .as_keyword()
                .is_some_and(|kw| kw.starts_table_constraint())
        {
            name = Some(self.expect_name("constraint name")?);
        }

        let kind = match &self.current.kind {
            TokenKind::Keyword(Keyword::Primary) => {
                self.advance();
                self.expect_keyword(Keyword::Key)?;
                ConstraintKind::PrimaryKey
            }
            TokenKind::Keyword(Keyword::Unique) => {
                self.advance();
                if !self.consume_keyword(Keyword::Key) {
                    self.consume_keyword(Keyword::Index);
                }
                ConstraintKind::Unique
            }
            TokenKind::Keyword(Keyword::Key | Keyword::Index) => {
                self.advance();
                ConstraintKind::Index
            }
            TokenKind::Keyword(Keyword::Fulltext | Keyword::Spatial) => {
                self.advance();
                if !self.consume_keyword(Keyword::Key) {
                    self.consume_keyword(Keyword::Index);
                }
                ConstraintKind::Fulltext
            }
            TokenKind::Keyword(Keyword::Foreign) => {
                self.advance();
                self.expect_keyword(Keyword::Key)?;
                ConstraintKind::ForeignKey
            }
            TokenKind::Keyword(Keyword::Check) => {
                self.parse_check()?;
                return Ok(Constraint {
                    kind: ConstraintKind::Check,
                    name,
                    columns: vec![],
                });
            }
            _ => {
                return Err(ParseError::unexpected(
                    "constraint",
                    self.current.kind.clone(),
                    self.current.span,
                ));
            }
        };

        if kind != ConstraintKind::PrimaryKey
            && !self.check(&TokenKind::LeftParen)
            && !self.check_word("USING")
        {
            let index_name = self.expect_name("index name")?;
            name.get_or_insert(index_name);
        }

        self.skip_index_options();
        let columns = self.parse_key_parts()?;
        if kind == ConstraintKind::ForeignKey {
            self.parse_references()?;
        }
        self.skip_index_options();

        Ok(Constraint {
            kind,
            name,
            columns,
        })
    }

    /// Parses `(col [(len)] [ASC|DESC], ...)`.
    fn parse_key_parts(&mut self) -> Result<Vec<String>, ParseError> {
        self.expect(&TokenKind::LeftParen)?;
        let mut columns = vec![];
        loop {
            if self.check(&TokenKind::LeftParen) {
                // Functional key part.
                columns.push(self.parse_raw_parens()?);
            } else {
                columns.push(self.expect_name("key column")?);
                if self.check(&TokenKind::LeftParen) {
                    self.parse_raw_parens()?;
                }
            }
            if !self.consume_word("ASC") {
                self.consume_word("DESC");
            }
            if !self.consume(&TokenKind::Comma) {
                break;
            }
        }
        self.expect(&TokenKind::RightParen)?;
        Ok(columns)
    }

    /// Skips `USING BTREE`, `COMMENT '...'`, `KEY_BLOCK_SIZE=n` and friends.
    fn skip_index_options(&mut self) {
        loop {
            if self.consume_word("USING") {
                self.advance();
            } else if self.consume_keyword(Keyword::Comment) {
                self.advance();
            } else if self.consume_word("KEY_BLOCK_SIZE") {
                self.consume(&TokenKind::Eq);
                self.advance();
            } else if self.consume_word("WITH") {
                // WITH PARSER name
                self.advance();
                self.advance();
            } else if !(self.consume_word("VISIBLE") || self.consume_word("INVISIBLE")) {
                break;
            }
        }
    }

    /// Parses a DEFAULT / ON UPDATE value.
    fn parse_default_expr(&mut self) -> Result<Expr, ParseError> {
        let token = self.current.clone();
        let expr = match token.kind {
            TokenKind::Integer(n) => {
                self.advance();
                Expr::Literal(Literal::Integer(n))
            }
            TokenKind::Float(f) => {
                self.advance();
                Expr::Literal(Literal::Float(f))
            }
            TokenKind::String(s) => {
                self.advance();
                Expr::Literal(Literal::String(s))
            }
            TokenKind::Blob(b) => {
                self.advance();
                Expr::Literal(Literal::Blob(b))
            }
            TokenKind::Keyword(Keyword::True) => {
                self.advance();
                Expr::Literal(Literal::Boolean(true))
            }
            TokenKind::Keyword(Keyword::False) => {
                self.advance();
                Expr::Literal(Literal::Boolean(false))
            }
            TokenKind::Keyword(Keyword::Null) => {
                self.advance();
                Expr::Literal(Literal::Null)
            }
            sign @ (TokenKind::Minus | TokenKind::Plus) => {
                self.advance();
                let negate = sign == TokenKind::Minus;
                let literal = match self.current.kind {
                    TokenKind::Integer(n) => Literal::Integer(if negate { -n } else { n }),
                    TokenKind::Float(f) => Literal::Float(if negate { -f } else { f }),
                    _ => {
                        return Err(ParseError::unexpected(
                            "number",
                            self.current.kind.clone(),
                            self.current.span,
                        ));
                    }
                };
                self.advance();
                Expr::Literal(literal)
            }
            TokenKind::LeftParen => Expr::Raw(self.parse_raw_parens()?),
            TokenKind::Identifier(word) => {
                self.advance();
                if let TokenKind::String(s) = &self.current.kind {
                    // Charset introducer (_utf8mb4'x', N'x') or bit value (b'01').
                    let value = s.clone();
                    self.advance();
                    if word.eq_ignore_ascii_case("b") {
                        Expr::Raw(String::from(
                            Span::new(token.span.start, self.previous.span.end).slice(self.input),
                        ))
                    } else {
                        Expr::Literal(Literal::String(value))
                    }
                } else if self.check(&TokenKind::LeftParen) {
                    Expr::Function(self.parse_function_args(word)?)
                } else {
                    // Niladic function such as CURRENT_TIMESTAMP.
                    Expr::Function(FunctionCall {
                        name: word,
                        args: vec![],
                    })
                }
            }
            kind => {
                return Err(ParseError::unexpected("default value", kind, token.span));
            }
        };
        Ok(expr)
    }

    /// Parses the argument list of a function call.
    fn parse_function_args(&mut self, name: String) -> Result<FunctionCall, ParseError> {
        self.expect(&TokenKind::LeftParen)?;
        let mut args = vec![];
        if !self.check(&TokenKind::RightParen) {
            loop {
                args.push(self.parse_default_expr()?);
                if !self.consume(&TokenKind::Comma) {
                    break;
                }
            }
        }
        self.expect(&TokenKind::RightParen)?;
        Ok(FunctionCall { name, args })
    }

    /// Parses the table options after the column list.
    fn parse_table_options(&mut self) -> Result<Vec<TableOption>, ParseError> {
        let mut options = vec![];
        loop {
            self.consume(&TokenKind::Comma);
            let option = match &self.current.kind {
                TokenKind::Semicolon | TokenKind::Eof => break,
                TokenKind::Keyword(Keyword::Default) => {
                    self.advance();
                    continue;
                }
                TokenKind::Keyword(Keyword::Character) => {
                    self.advance();
                    self.expect_keyword(Keyword::Set)?;
                    self.consume(&TokenKind::Eq);
                    TableOption::Charset(self.expect_name("charset name")?)
                }
                TokenKind::Keyword(Keyword::Charset) => {
                    self.advance();
                    self.consume(&TokenKind::Eq);
                    TableOption::Charset(self.expect_name("charset name")?)
                }
                TokenKind::Keyword(Keyword::Collate) => {
                    self.advance();
                    self.consume(&TokenKind::Eq);
                    TableOption::Collate(self.expect_name("collation name")?)
                }
                TokenKind::Keyword(Keyword::Comment) => {
                    self.advance();
                    self.consume(&TokenKind::Eq);
                    TableOption::Comment(self.expect_string()?)
                }
                TokenKind::Keyword(Keyword::AutoIncrement) => {
                    self.advance();
                    self.consume(&TokenKind::Eq);
                    TableOption::AutoIncrement(self.expect_unsigned()?)
                }
                TokenKind::Identifier(word) => {
                    let name = word.to_ascii_uppercase();
                    self.advance();
                    if name == "PARTITION" {
                        TableOption::Other {
                            name,
                            value: self.parse_partition_tail()?,
                        }
                    } else {
                        self.consume(&TokenKind::Eq);
                        let value = self.parse_option_value()?;
                        if name == "ENGINE" || name == "TYPE" {
                            TableOption::Engine(value)
                        } else {
                            TableOption::Other { name, value }
                        }
                    }
                }
                _ => {
                    return Err(ParseError::unexpected(
                        "table option",
                        self.current.kind.clone(),
                        self.current.span,
                    ));
                }
            };
            options.push(option);
        }
        Ok(options)
    }

    /// Parses a table option value.
    fn parse_option_value(&mut self) -> Result<String, ParseError> {
        let value = match &self.current.kind {
            TokenKind::String(s) => s.clone(),
            TokenKind::Integer(n) => n.to_string(),
            TokenKind::Float(f) => f.to_string(),
            TokenKind::LeftParen => return self.parse_raw_parens(),
            _ => match self.current_word() {
                Some(word) => word,
                None => {
                    return Err(ParseError::unexpected(
                        "option value",
                        self.current.kind.clone(),
                        self.current.span,
                    ));
                }
            },
        };
        self.advance();
        Ok(value)
    }

    /// Parses optional precision and scale (for DECIMAL/FLOAT/DOUBLE).
    fn parse_optional_precision_scale(&mut self) -> Result<(Option<u16>, Option<u16>), ParseError> {
        if !self.check(&TokenKind::LeftParen) {
            return Ok((None, None));
        }
        self.advance();

        let precision = match &self.current.kind {
            TokenKind::Integer(n) => {
                let p = u16::try_from(*n)
                    .map_err(|_| ParseError::new("Precision too large", self.current.span))?;
                self.advance();
                Some(p)
            }
            _ => {
                return Err(ParseError::unexpected(
                    "integer",
                    self.current.kind.clone(),
                    self.current.span,
                ));
            }
        };

        let scale = if self.consume(&TokenKind::Comma) {
            match &self.current.kind {
                TokenKind::Integer(n) => {
                    let s = u16::try_from(*n)
                        .map_err(|_| ParseError::new("Scale too large", self.current.span))?;
                    self.advance();
                    Some(s)
                }
                _ => {
                    return Err(ParseError::unexpected(
                        "integer",
                        self.current.kind.clone(),
                        self.current.span,
                    ));
                }
            }
        } else {
            None
        };

        self.expect(&TokenKind::RightParen)?;
        Ok((precision, scale))
    }

    /// Parses optional length, display width or fsp.
    fn parse_optional_length(&mut self) -> Result<Option<u32>, ParseError> {
        if !self.check(&TokenKind::LeftParen) {
            return Ok(None);
        }
        self.advance();

        let length = match &self.current.kind {
            TokenKind::Integer(n) => {
                let len = u32::try_from(*n)
                    .map_err(|_| ParseError::new("Length too large", self.current.span))?;
                self.advance();
                len
            }
            _ => {
                return Err(ParseError::unexpected(
                    "integer",
                    self.current.kind.clone(),
                    self.current.span,
                ));
            }
        };

        self.expect(&TokenKind::RightParen)?;
        Ok(Some(length))
    }

    /// Parses `('a', 'b', ...)` for ENUM and SET.
    fn parse_string_list(&mut self) -> Result<Vec<String>, ParseError> {
        self.expect(&TokenKind::LeftParen)?;
        let mut members = vec![];
        loop {
            members.push(self.expect_string()?);
            if !self.consume(&TokenKind::Comma) {
                break;
            }
        }
        self.expect(&TokenKind::RightParen)?;
        Ok(members)
    }

    /// Consumes a balanced parenthesised group and returns its source text,
    /// parentheses included.
    fn parse_raw_parens(&mut self) -> Result<String, ParseError> {
        let start = self.current.span.start;
        self.expect(&TokenKind::LeftParen)?;
        let mut depth = 1usize;
        while depth > 0 {
            match self.current.kind {
                TokenKind::LeftParen => depth += 1,
                TokenKind::RightParen => depth -= 1,
                TokenKind::Eof => return Err(ParseError::unexpected_eof(")", self.current.span)),
                _ => {}
            }
            self.advance();
        }
        Ok(String::from(
            Span::new(start, self.previous.span.end).slice(self.input),
        ))
    }

    /// Skips tokens up to (not including) the next `;` and returns the
    /// skipped source text. Lexer errors in the skipped text are reported.
    fn skip_to_statement_end(&mut self) -> Result<String, ParseError> {
        let start = self.current.span.start;
        while !self.check(&TokenKind::Semicolon) && !self.current.is_eof() {
            if let TokenKind::Error(_) = self.current.kind {
                return Err(ParseError::unexpected(
                    "';'",
                    self.current.kind.clone(),
                    self.current.span,
                ));
            }
            self.advance();
        }
        let end = self.previous.span.end.max(start);
        Ok(String::from(Span::new(start, end).slice(self.input).trim()))
    }

    /// Captures a `PARTITION BY ...` clause up to the end of the statement,
    /// requiring its parentheses to balance.
    fn parse_partition_tail(&mut self) -> Result<String, ParseError> {
        let start = self.current.span.start;
        let mut depth = 0usize;
        loop {
            match self.current.kind {
                TokenKind::LeftParen => depth += 1,
                TokenKind::RightParen if depth == 0 => {
                    return Err(ParseError::unexpected(
                        "';'",
                        self.current.kind.clone(),
                        self.current.span,
                    ));
                }
                TokenKind::RightParen => depth -= 1,
                TokenKind::Semicolon | TokenKind::Eof if depth > 0 => {
                    return Err(ParseError::unexpected(
                        "')'",
                        self.current.kind.clone(),
                        self.current.span,
                    ));
                }
                TokenKind::Semicolon | TokenKind::Eof => break,
                TokenKind::Error(_) => {
                    return Err(ParseError::unexpected(
                        "partition definition",
                        self.current.kind.clone(),
                        self.current.span,
                    ));
                }
                _ => {}
            }
            self.advance();
        }
        let end = self.previous.span.end.max(start);
        Ok(String::from(Span::new(start, end).slice(self.input).trim()))
    }

    // --- Helper methods ---

    /// Advances to the next token.
    fn advance(&mut self) {
        self.previous = core::mem::replace(&mut self.current, self.lexer.next_token());
    }

    /// Returns the token after the current one without consuming anything.
    fn peek_token(&self) -> Token {
        self.lexer.clone().next_token()
    }

    /// Checks if the current token matches the given kind.
    fn check(&self, kind: &TokenKind) -> bool {
        core::mem::discriminant(&self.current.kind) == core::mem::discriminant(kind)
    }

    /// Checks if the current token is the given keyword.
    fn check_keyword(&self, keyword: Keyword) -> bool {
        matches!(&self.current.kind, TokenKind::Keyword(kw) if *kw == keyword)
    }

    /// Checks if the current token is the given bare word (case-insensitive).
    fn check_word(&self, word: &str) -> bool {
        matches!(&self.current.kind, TokenKind::Identifier(w) if w.eq_ignore_ascii_case(word))
    }

    /// Consumes the current token if it matches the given kind.
    fn consume(&mut self, kind: &TokenKind) -> bool {
        let matched = self.check(kind);
        if matched {
            self.advance();
        }
        matched
    }

    /// Consumes the current token if it is the given keyword.
    fn consume_keyword(&mut self, keyword: Keyword) -> bool {
        let matched = self.check_keyword(keyword);
        if matched {
            self.advance();
        }
        matched
    }

    /// Consumes the current token if it is the given bare word.
    fn consume_word(&mut self, word: &str) -> bool {
        let matched = self.check_word(word);
        if matched {
            self.advance();
        }
        matched
    }

    /// Expects the current token to be the given kind.
    fn expect(&mut self, kind: &TokenKind) -> Result<(), ParseError> {
        if self.consume(kind) {
            Ok(())
        } else {
            Err(ParseError::unexpected(
                format!("{kind:?}"),
                self.current.kind.clone(),
                self.current.span,
            ))
        }
    }

    /// Expects the current token to be the given keyword.
    fn expect_keyword(&mut self, keyword: Keyword) -> Result<(), ParseError> {
        if self.consume_keyword(keyword) {
            Ok(())
        } else {
            Err(ParseError::unexpected(
                keyword.as_str(),
                self.current.kind.clone(),
                self.current.span,
            ))
        }
    }

    /// Expects the end of a statement: `;` or end of input.
    fn expect_statement_end(&mut self) -> Result<(), ParseError> {
        if self.consume(&TokenKind::Semicolon) || self.current.is_eof() {
            Ok(())
        } else {
            Err(ParseError::unexpected(
                "; or end of input",
                self.current.kind.clone(),
                self.current.span,
            ))
        }
    }

    /// Returns the current token's text if it is an identifier or keyword.
    fn current_word(&self) -> Option<String> {
        match &self.current.kind {
            TokenKind::Identifier(name) => Some(name.clone()),
            TokenKind::Keyword(_) => Some(String::from(self.current.span.slice(self.input))),
            _ => None,
        }
    }

    /// Expects and returns a name: an identifier or a keyword used as one.
    fn expect_name(&mut self, what: &str) -> Result<String, ParseError> {
        match self.current_word() {
            Some(name) => {
                self.advance();
                Ok(name)
            }
            None => Err(ParseError::unexpected(
                what,
                self.current.kind.clone(),
                self.current.span,
            )),
        }
    }

    /// Expects and returns a string literal.
    fn expect_string(&mut self) -> Result<String, ParseError> {
        match &self.current.kind {
            TokenKind::String(s) => {
                let value = s.clone();
                self.advance();
                Ok(value)
            }
            _ => Err(ParseError::unexpected(
                "string literal",
                self.current.kind.clone(),
                self.current.span,
            )),
        }
    }

    /// Expects and returns a non-negative integer.
    fn expect_unsigned(&mut self) -> Result<u64, ParseError> {
        match &self.current.kind {
            TokenKind::Integer(n) => {
                let value = u64::try_from(*n)
                    .map_err(|_| ParseError::new("Expected a non-negative integer", self.current.span))?;
                self.advance();
                Ok(value)
            }
            _ => Err(ParseError::unexpected(
                "integer",
                self.current.kind.clone(),
                self.current.span,
            )),
        }
    }
}

/// Returns the text between a group's outer parentheses, trimmed.
fn strip_parens(raw: &str) -> String {
    let inner = raw
        .strip_prefix('(')
        .and_then(|s| s.strip_suffix(')'))
        .unwrap_or(raw);
    String::from(inner.trim())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_one(sql: &str) -> CreateTableStatement {
        let statements = Parser::new(sql).parse_statements().unwrap();
        match statements.into_iter().next() {
            Some(Statement::CreateTable(create)) => create,
            other => panic!("Expected CREATE TABLE, got {other:?}"),
        }
    }

    #[test]
    fn test_simple_create_table() {
        let create = parse_one("CREATE TABLE users (id INT NOT NULL, name VARCHAR(255))");
        assert_eq!(create.name, "users");
        assert_eq!(create.columns.len(), 2);
        assert_eq!(create.columns[0].name, "id");
        assert_eq!(create.columns[0].field_type.data_type, DataType::Int(None));
        assert_eq!(create.columns[0].options, vec![ColumnOption::NotNull]);
        assert_eq!(
            create.columns[1].field_type.data_type,
            DataType::Varchar(Some(255))
        );
    }

    #[test]
    fn test_qualified_name_and_flags() {
        let create = parse_one("CREATE TEMPORARY TABLE IF NOT EXISTS `shop`.`orders` (id INT)");
        assert!(create.temporary);
        assert!(create.if_not_exists);
        assert_eq!(create.schema.as_deref(), Some("shop"));
        assert_eq!(create.name, "orders");
    }

    #[test]
    fn test_column_options_order() {
        let create = parse_one(
            "CREATE TABLE t (id BIGINT(20) UNSIGNED NOT NULL AUTO_INCREMENT PRIMARY KEY COMMENT 'pk')",
        );
        let col = &create.columns[0];
        assert!(col.field_type.unsigned);
        assert_eq!(
            col.options,
            vec![
                ColumnOption::NotNull,
                ColumnOption::AutoIncrement,
                ColumnOption::PrimaryKey,
                ColumnOption::Comment(String::from("pk")),
            ]
        );
    }

    #[test]
    fn test_default_values() {
        let create = parse_one(
            "CREATE TABLE t (
                a INT DEFAULT -1,
                b VARCHAR(8) DEFAULT 'x',
                c DATETIME DEFAULT CURRENT_TIMESTAMP ON UPDATE CURRENT_TIMESTAMP,
                d BINARY(16) DEFAULT (uuid_to_bin(uuid())),
                e BIT(1) DEFAULT b'0',
                f VARCHAR(8) DEFAULT NULL
            )",
        );
        fn default_of(column: &ColumnDef) -> &Expr {
            column
                .options
                .iter()
                .find_map(|o| match o {
                    ColumnOption::Default(e) => Some(e),
                    _ => None,
                })
                .unwrap()
        }
        assert_eq!(default_of(&create.columns[0]), &Expr::Literal(Literal::Integer(-1)));
        assert_eq!(
            default_of(&create.columns[1]),
            &Expr::Literal(Literal::String(String::from("x")))
        );
        assert_eq!(default_of(&create.columns[2]).function_name(), Some("CURRENT_TIMESTAMP"));
        assert_eq!(
            default_of(&create.columns[3]),
            &Expr::Raw(String::from("(uuid_to_bin(uuid()))"))
        );
        assert_eq!(default_of(&create.columns[4]), &Expr::Raw(String::from("b'0'")));
        assert_eq!(default_of(&create.columns[5]), &Expr::Literal(Literal::Null));
        assert!(matches!(
            create.columns[2].options.last(),
            Some(ColumnOption::OnUpdate(_))
        ));
    }

    #[test]
    fn test_table_constraints() {
        let create = parse_one(
            "CREATE TABLE t (
                a INT, b INT, c INT,
                PRIMARY KEY (a, b),
                UNIQUE KEY uk_c (c),
                KEY idx_b (b) USING BTREE,
                CONSTRAINT fk_c FOREIGN KEY (c) REFERENCES other (id) ON DELETE CASCADE
            )",
        );
        assert_eq!(create.columns.len(), 3);
        assert_eq!(create.constraints.len(), 4);
        assert_eq!(create.constraints[0].kind, ConstraintKind::PrimaryKey);
        assert_eq!(create.constraints[0].columns, vec!["a", "b"]);
        assert_eq!(create.constraints[1].name.as_deref(), Some("uk_c"));
        assert_eq!(create.constraints[2].kind, ConstraintKind::Index);
        assert_eq!(create.constraints[3].kind, ConstraintKind::ForeignKey);
        assert_eq!(create.constraints[3].name.as_deref(), Some("fk_c"));
    }

    #[test]
    fn test_table_options() {
        let create = parse_one(
            "CREATE TABLE t (id INT) ENGINE=InnoDB AUTO_INCREMENT=7 DEFAULT CHARSET=utf8mb4 \
             COLLATE=utf8mb4_bin ROW_FORMAT=DYNAMIC COMMENT='orders';",
        );
        assert_eq!(create.comment(), Some("orders"));
        assert_eq!(create.charset.as_deref(), Some("utf8mb4"));
        assert_eq!(create.collation.as_deref(), Some("utf8mb4_bin"));
        assert!(create
            .options
            .contains(&TableOption::Engine(String::from("InnoDB"))));
        assert!(create.options.contains(&TableOption::AutoIncrement(7)));
        assert!(create.options.contains(&TableOption::Other {
            name: String::from("ROW_FORMAT"),
            value: String::from("DYNAMIC"),
        }));
    }

    #[test]
    fn test_parse_options_defaults() {
        let options = ParseOptions::new()
            .with_charset("latin1")
            .with_collation("latin1_swedish_ci");
        let statements = Parser::with_options("CREATE TABLE t (id INT)", options)
            .parse_statements()
            .unwrap();
        let create = statements[0].as_create_table().unwrap();
        assert_eq!(create.charset.as_deref(), Some("latin1"));
        assert_eq!(create.collation.as_deref(), Some("latin1_swedish_ci"));
    }

    #[test]
    fn test_other_statements_skipped() {
        let statements = Parser::new(
            "SET NAMES utf8mb4; DROP TABLE IF EXISTS t; CREATE TABLE t (id INT); \
             INSERT INTO t VALUES (1);",
        )
        .parse_statements()
        .unwrap();
        assert_eq!(statements.len(), 4);
        assert_eq!(statements[0], Statement::Other);
        assert!(statements[2].as_create_table().is_some());
    }

    #[test]
    fn test_generated_and_check() {
        let create = parse_one(
            "CREATE TABLE t (
                a INT,
                b INT GENERATED ALWAYS AS (a * 2) STORED,
                c INT CHECK (c > 0),
                CHECK (a < 100)
            )",
        );
        assert_eq!(
            create.columns[1].options,
            vec![ColumnOption::Generated {
                expr: String::from("a * 2"),
                stored: true,
            }]
        );
        assert_eq!(
            create.columns[2].options,
            vec![ColumnOption::Check(String::from("c > 0"))]
        );
        assert_eq!(create.constraints[0].kind, ConstraintKind::Check);
    }

    #[test]
    fn test_create_table_like_rejected() {
        let err = Parser::new("CREATE TABLE t LIKE s").parse_statements().unwrap_err();
        assert!(err.message.contains("LIKE"));
    }

    #[test]
    fn test_missing_paren_error() {
        let err = Parser::new("CREATE TABLE t (id INT").parse_statements().unwrap_err();
        assert_eq!(err.found, Some(TokenKind::Eof));
    }
}
