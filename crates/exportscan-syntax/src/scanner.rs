//! Declaration scanner — character-level state machine.
//!
//! Starting just after an export marker, walks the return type and function
//! name up to the first unnested `(`, then the argument list up to the
//! matching `)`. Anything after that (usually the function body) is never
//! read.
//!
//! Both phases share one [`Accumulator`] and one scanning loop; they only
//! differ in which characters act as top-level delimiters.

use crate::classify::{classify, PointerSyntaxError};
use crate::comment::skip_comment;
use crate::cursor::Cursor;
use crate::error::ScanError;
use crate::model::{Argument, Declaration, TypeSpec};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    /// Return type and function name.
    Head,
    /// Parenthesized argument list.
    Arguments,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Delimiter {
    Open,
    Comma,
    Close,
}

/// Token state for the type/name currently being read.
#[derive(Debug, Default)]
struct Accumulator {
    buffer: String,
    tokens: Vec<String>,
    tags: Vec<String>,
    angle: usize,
    paren: usize,
    /// Set after a `*`, `&` or a closing bracket at the top level; an
    /// identifier character seen next starts a new token.
    split_pending: bool,
}

impl Accumulator {
    fn nesting(&self) -> usize {
        self.angle + self.paren
    }

    fn is_nested(&self) -> bool {
        self.nesting() > 0
    }

    fn is_empty(&self) -> bool {
        self.buffer.is_empty() && self.tokens.is_empty()
    }

    fn push(&mut self, c: char) {
        self.buffer.push(c);
        self.split_pending = false;
    }

    fn flush(&mut self) {
        if !self.buffer.is_empty() {
            self.tokens.push(std::mem::take(&mut self.buffer));
        }
        self.split_pending = false;
    }

    /// Top-level `*`/`&`: glue to the previous token so `char *p` and
    /// `char* p` tokenize alike.
    fn push_marker(&mut self, c: char) {
        if self.buffer.is_empty() {
            if let Some(last) = self.tokens.pop() {
                self.buffer = last;
            }
        }
        self.buffer.push(c);
        self.split_pending = true;
    }

    /// The trailing token: the buffer if non-empty, else the last token.
    fn take_name(&mut self) -> Option<String> {
        self.flush();
        self.tokens.pop()
    }

    fn into_type(self, at: &Cursor<'_>) -> Result<TypeSpec, ScanError> {
        classify(&self.tokens, self.tags).map_err(|PointerSyntaxError { ty }| {
            ScanError::PointerSyntax {
                ty,
                at: at.location(),
            }
        })
    }
}

fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Read characters into `acc` until a top-level delimiter of `phase`.
fn scan_segment(
    cursor: &mut Cursor<'_>,
    acc: &mut Accumulator,
    phase: Phase,
) -> Result<Delimiter, ScanError> {
    loop {
        let c = cursor.next()?;
        match c {
            c if c.is_whitespace() => {
                if acc.is_nested() {
                    acc.push(c);
                } else {
                    acc.flush();
                }
            }
            '/' => {
                // Comments are token boundaries at the top level.
                if !acc.is_nested() {
                    acc.flush();
                }
                skip_comment(cursor, acc.nesting(), &mut acc.tags)?;
            }
            '<' => {
                acc.angle += 1;
                acc.push(c);
            }
            '>' => {
                acc.angle = acc
                    .angle
                    .checked_sub(1)
                    .ok_or_else(|| ScanError::ImbalancedAngleBrackets(cursor.location()))?;
                acc.push(c);
                acc.split_pending = !acc.is_nested();
            }
            '(' if phase == Phase::Head && !acc.is_nested() => return Ok(Delimiter::Open),
            '(' => {
                acc.paren += 1;
                acc.push(c);
            }
            ')' if acc.paren == 0 => {
                if phase == Phase::Head {
                    return Err(ScanError::ImbalancedParens(cursor.location()));
                }
                if acc.angle != 0 {
                    return Err(ScanError::ImbalancedAngleBrackets(cursor.location()));
                }
                return Ok(Delimiter::Close);
            }
            ')' => {
                acc.paren -= 1;
                acc.push(c);
                acc.split_pending = !acc.is_nested();
            }
            ',' if phase == Phase::Arguments && !acc.is_nested() => {
                return Ok(Delimiter::Comma)
            }
            '*' | '&' if !acc.is_nested() => acc.push_marker(c),
            c => {
                if acc.split_pending && is_ident_char(c) {
                    acc.flush();
                }
                acc.push(c);
            }
        }
    }
}

/// Parse one declaration starting at `start` in `chars`.
///
/// `line` is the 1-based line number of `start`. Returns the declaration and
/// the index just past its closing parenthesis.
pub fn scan_declaration(
    chars: &[char],
    start: usize,
    line: usize,
) -> Result<(Declaration, usize), ScanError> {
    let mut cursor = Cursor::new(chars, start);

    let mut head = Accumulator::default();
    scan_segment(&mut cursor, &mut head, Phase::Head)?;
    let name = head
        .take_name()
        .ok_or_else(|| ScanError::MissingName(cursor.location()))?;
    let return_type = head.into_type(&cursor)?;

    let mut arguments = Vec::new();
    loop {
        let mut acc = Accumulator::default();
        let delimiter = scan_segment(&mut cursor, &mut acc, Phase::Arguments)?;

        if delimiter == Delimiter::Close && arguments.is_empty() && acc.is_empty() {
            break;
        }

        let arg_name = acc
            .take_name()
            .ok_or_else(|| ScanError::MalformedArgument(cursor.location()))?;
        let ty = acc.into_type(&cursor)?;
        arguments.push(Argument { name: arg_name, ty });

        if delimiter == Delimiter::Close {
            break;
        }
    }

    if is_void_list(&arguments) {
        arguments.clear();
    }

    Ok((
        Declaration {
            name,
            line,
            return_type,
            arguments,
        },
        cursor.position(),
    ))
}

/// `f(void)` declares no arguments.
fn is_void_list(arguments: &[Argument]) -> bool {
    matches!(arguments, [only] if only.name == "void" && only.ty.full_text().is_empty())
}
