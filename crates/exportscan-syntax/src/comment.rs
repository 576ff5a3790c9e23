//! Comment and tag scanning inside a declaration.
//!
//! Called right after a `/` has been consumed. Line and block comments are
//! skipped; a `/** ... */` block at nesting depth zero is a tag comment whose
//! words are appended to the caller's tag list.

use crate::cursor::Cursor;
use crate::error::ScanError;

/// Consume the comment that starts with the already-read `/`.
///
/// `nesting` is the caller's combined angle + parenthesis depth; tag
/// comments are only recognized at depth zero.
pub fn skip_comment(
    cursor: &mut Cursor<'_>,
    nesting: usize,
    tags: &mut Vec<String>,
) -> Result<(), ScanError> {
    match cursor.next()? {
        '/' => skip_line(cursor),
        '*' => {
            let c = cursor.next()?;
            if c == '*' && nesting == 0 {
                read_tags(cursor, tags)
            } else {
                cursor.push_back();
                skip_block(cursor)
            }
        }
        _ => Err(ScanError::MalformedComment(cursor.location())),
    }
}

fn skip_line(cursor: &mut Cursor<'_>) -> Result<(), ScanError> {
    while cursor.next()? != '\n' {}
    Ok(())
}

/// Consume through the first `*/`.
fn skip_block(cursor: &mut Cursor<'_>) -> Result<(), ScanError> {
    loop {
        if cursor.next()? == '*' {
            if cursor.next()? == '/' {
                return Ok(());
            }
            // might be another '*'
            cursor.push_back();
        }
    }
}

/// Read whitespace-delimited tags up to the closing `*/`.
fn read_tags(cursor: &mut Cursor<'_>, tags: &mut Vec<String>) -> Result<(), ScanError> {
    // `/**/` is an empty comment, not the start of a tag block.
    if cursor.next()? == '/' {
        return Ok(());
    }
    cursor.push_back();

    let mut word = String::new();
    loop {
        let c = cursor.next()?;
        if c.is_whitespace() {
            push_tag(tags, &mut word);
        } else if c == '*' {
            if cursor.next()? == '/' {
                push_tag(tags, &mut word);
                return Ok(());
            }
            word.push(c);
            cursor.push_back();
        } else {
            word.push(c);
        }
    }
}

fn push_tag(tags: &mut Vec<String>, word: &mut String) {
    // Lone stars are the gutter of a multi-line block.
    if !word.is_empty() && !word.chars().all(|c| c == '*') {
        tags.push(word.clone());
    }
    word.clear();
}
