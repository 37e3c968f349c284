//! Canonical formatting of generated Go source.
//!
//! A small subset of `gofmt`: it checks that the text is lexically sound
//! (balanced brackets, terminated literals, well-formed struct fields),
//! re-indents with tabs, collapses blank lines and aligns struct fields into
//! columns the way `gofmt` does.

/// A formatting failure, with the 1-based line it was detected on.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{line}: {message}")]
pub struct FormatError {
    /// 1-based line number.
    pub line: usize,
    /// Diagnostic.
    pub message: String,
}

impl FormatError {
    fn new(line: usize, message: impl Into<String>) -> Self {
        Self {
            line,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Code,
    String,
    Rune,
    RawString,
    LineComment,
    BlockComment,
}

#[derive(Debug, Clone, Copy)]
struct Open {
    bracket: char,
    is_struct: bool,
}

/// One source line after the lexical scan.
#[derive(Debug)]
struct Line {
    number: usize,
    text: String,
    depth: usize,
    /// Starts inside a raw string or block comment; emitted untouched.
    verbatim: bool,
    /// Directly inside a `struct { ... }` body.
    in_struct: bool,
}

const fn closer_for(open: char) -> char {
    match open {
        '(' => ')',
        '[' => ']',
        _ => '}',
    }
}

/// Scans the source, validating literals and brackets, and splits it into
/// lines annotated with their nesting depth.
fn scan(src: &str) -> Result<Vec<Line>, FormatError> {
    let mut lines = Vec::new();
    let mut stack: Vec<Open> = Vec::new();
    let mut state = State::Code;

    for (index, text) in src.split('\n').enumerate() {
        let number = index + 1;
        let verbatim = matches!(state, State::RawString | State::BlockComment);
        let depth = stack.len();
        let in_struct = stack.last().is_some_and(|open| open.is_struct);

        let mut chars = text.char_indices().peekable();
        while let Some((pos, c)) = chars.next() {
            match state {
                State::Code => match c {
                    '"' => state = State::String,
                    '\'' => state = State::Rune,
                    '`' => state = State::RawString,
                    '/' if chars.peek().is_some_and(|&(_, n)| n == '/') => {
                        state = State::LineComment;
                    }
                    '/' if chars.peek().is_some_and(|&(_, n)| n == '*') => {
                        chars.next();
                        state = State::BlockComment;
                    }
                    '(' | '[' | '{' => stack.push(Open {
                        bracket: c,
                        is_struct: c == '{' && text[..pos].trim_end().ends_with("struct"),
                    }),
                    ')' | ']' | '}' => match stack.pop() {
                        Some(open) if closer_for(open.bracket) == c => {}
                        Some(open) => {
                            return Err(FormatError::new(
                                number,
                                format!("expected '{}', found '{c}'", closer_for(open.bracket)),
                            ));
                        }
                        None => {
                            return Err(FormatError::new(number, format!("unexpected '{c}'")));
                        }
                    },
                    _ => {}
                },
                State::String | State::Rune => {
                    let quote = if state == State::String { '"' } else { '\'' };
                    if c == '\\' {
                        chars.next();
                    } else if c == quote {
                        state = State::Code;
                    }
                }
                State::RawString => {
                    if c == '`' {
                        state = State::Code;
                    }
                }
                State::LineComment => {}
                State::BlockComment => {
                    if c == '*' && chars.peek().is_some_and(|&(_, n)| n == '/') {
                        chars.next();
                        state = State::Code;
                    }
                }
            }
        }

        match state {
            State::String => {
                return Err(FormatError::new(number, "string literal not terminated"));
            }
            State::Rune => {
                return Err(FormatError::new(number, "rune literal not terminated"));
            }
            State::LineComment => state = State::Code,
            _ => {}
        }

        lines.push(Line {
            number,
            text: text.to_string(),
            depth,
            verbatim,
            in_struct,
        });
    }

    let last = lines.len().max(1);
    match state {
        State::RawString => Err(FormatError::new(last, "raw string literal not terminated")),
        State::BlockComment => Err(FormatError::new(last, "comment not terminated")),
        _ => match stack.last() {
            Some(open) => Err(FormatError::new(
                last,
                format!("expected '{}', found 'EOF'", closer_for(open.bracket)),
            )),
            None => Ok(lines),
        },
    }
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|c| c.is_alphabetic() || c == '_')
        && chars.all(|c| c.is_alphanumeric() || c == '_')
}

/// Splits a struct field line into cells: name, type, then an optional tag
/// and an optional trailing comment.
fn field_cells(line: &str, number: usize) -> Result<Vec<String>, FormatError> {
    let (name, rest) = line
        .split_once(char::is_whitespace)
        .unwrap_or((line, ""));
    if !is_identifier(name) {
        return Err(FormatError::new(
            number,
            format!("expected field name, found '{name}'"),
        ));
    }

    let rest = rest.trim_start();
    let (go_type, mut rest) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
    if go_type.is_empty() || go_type.starts_with('`') || go_type.starts_with("//") {
        return Err(FormatError::new(
            number,
            format!("expected type for field '{name}'"),
        ));
    }

    let mut cells = vec![name.to_string(), go_type.to_string()];
    rest = rest.trim_start();

    if let Some(tagged) = rest.strip_prefix('`') {
        let end = tagged
            .find('`')
            .ok_or_else(|| FormatError::new(number, "raw string literal not terminated"))?;
        cells.push(format!("`{}`", &tagged[..end]));
        rest = tagged[end + 1..].trim_start();
    }

    if rest.starts_with("//") {
        cells.push(rest.trim_end().to_string());
    } else if !rest.is_empty() {
        return Err(FormatError::new(
            number,
            format!("unexpected '{rest}' after field '{name}'"),
        ));
    }

    Ok(cells)
}

/// Pads the cells of a run of consecutive field lines into aligned columns.
///
/// As with `gofmt`'s tabwriter, the last cell of a line never contributes to
/// a column width, and a column is only aligned across contiguous lines that
/// have a cell after it.
fn align(rows: &[Vec<String>]) -> Vec<String> {
    let columns = rows.iter().map(Vec::len).max().unwrap_or(0);
    let mut widths = vec![vec![0usize; columns]; rows.len()];

    for column in 0..columns {
        let mut start = 0;
        while start < rows.len() {
            if rows[start].len() <= column + 1 {
                start += 1;
                continue;
            }
            let mut end = start;
            while end < rows.len() && rows[end].len() > column + 1 {
                end += 1;
            }
            let width = rows[start..end]
                .iter()
                .map(|row| row[column].chars().count())
                .max()
                .unwrap_or(0);
            for row_widths in &mut widths[start..end] {
                row_widths[column] = width;
            }
            start = end;
        }
    }

    rows.iter()
        .zip(&widths)
        .map(|(row, row_widths)| {
            let mut out = String::new();
            for (i, cell) in row.iter().enumerate() {
                out.push_str(cell);
                if i + 1 < row.len() {
                    let pad = row_widths[i].saturating_sub(cell.chars().count()) + 1;
                    out.push_str(&" ".repeat(pad));
                }
            }
            out
        })
        .collect()
}

/// Formats Go source text.
///
/// # Errors
///
/// Returns a [`FormatError`] when the text is not lexically valid Go or a
/// struct field is malformed.
pub fn format_source(src: &str) -> Result<String, FormatError> {
    let lines = scan(src)?;
    let mut rendered: Vec<Option<String>> = Vec::with_capacity(lines.len());

    let mut i = 0;
    while i < lines.len() {
        let line = &lines[i];
        let trimmed = line.text.trim();

        if line.verbatim {
            rendered.push(Some(line.text.clone()));
            i += 1;
            continue;
        }
        if trimmed.is_empty() {
            rendered.push(None);
            i += 1;
            continue;
        }

        let is_field = |l: &Line| {
            let t = l.text.trim();
            !l.verbatim
                && l.in_struct
                && !t.is_empty()
                && !t.starts_with("//")
                && !t.starts_with('}')
        };

        if is_field(line) {
            let mut rows = Vec::new();
            let mut depths = Vec::new();
            while i < lines.len() && is_field(&lines[i]) {
                rows.push(field_cells(lines[i].text.trim(), lines[i].number)?);
                depths.push(lines[i].depth);
                i += 1;
            }
            for (text, depth) in align(&rows).into_iter().zip(depths) {
                rendered.push(Some(format!("{}{text}", "\t".repeat(depth))));
            }
            continue;
        }

        let closes = trimmed.starts_with([')', ']', '}']);
        let depth = line.depth.saturating_sub(usize::from(closes));
        rendered.push(Some(format!("{}{trimmed}", "\t".repeat(depth))));
        i += 1;
    }

    let mut out = String::with_capacity(src.len());
    let mut pending_blank = false;
    for line in rendered {
        match line {
            None => pending_blank = !out.is_empty(),
            Some(text) => {
                if pending_blank {
                    out.push('\n');
                    pending_blank = false;
                }
                out.push_str(&text);
                out.push('\n');
            }
        }
    }
    Ok(out)
}
