//! Type classification: raw fragments → [`TypeSpec`].
//!
//! Counts pointer stars, drops `const`, strips trailing reference markers,
//! and rejects identifiers that follow a trailing-pointer fragment once a
//! base type has started (`char* foo`-style leftovers in a type).

use crate::model::{Reference, TypeSpec};

/// A type whose stars cannot be attributed to a single base type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PointerSyntaxError {
    pub ty: String,
}

/// Build a [`TypeSpec`] from whitespace-delimited fragments and tags.
pub fn classify(fragments: &[String], tags: Vec<String>) -> Result<TypeSpec, PointerSyntaxError> {
    let full_text = fragments.join(" ");
    let mut base: Vec<&str> = Vec::new();
    let mut pointer_depth = 0;
    let mut reference = Reference::None;
    let mut trailing_pointer = false;

    for fragment in fragments {
        let mut x = fragment.as_str();
        // Only a trailing pointer on an earlier fragment counts.
        let pointer_seen_before = trailing_pointer;

        while let Some(rest) = x.strip_prefix('*') {
            pointer_depth += 1;
            x = rest.trim_start();
        }

        loop {
            if let Some(rest) = x.strip_suffix('*') {
                trailing_pointer = true;
                pointer_depth += 1;
                x = rest.trim_end();
            } else if let Some(rest) = x.strip_suffix("&&") {
                reference = Reference::Rvalue;
                x = rest.trim_end();
            } else if let Some(rest) = x.strip_suffix('&') {
                reference = Reference::Lvalue;
                x = rest.trim_end();
            } else {
                break;
            }
        }

        if x.is_empty() || x == "const" {
            continue;
        }

        if pointer_seen_before && !base.is_empty() {
            return Err(PointerSyntaxError { ty: full_text });
        }

        base.push(x);
    }

    Ok(TypeSpec {
        base_type: base.join(" "),
        full_text,
        pointer_depth,
        reference,
        tags: tags.into_iter().collect(),
    })
}
