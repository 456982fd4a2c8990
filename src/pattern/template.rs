use super::notation::is_identifier;
use super::Piece;
use crate::error::PatternError;
use crate::params::Params;

const OPEN: char = '{';
const CLOSE: char = '}';

const REQUIRED: &str = "[^/?#]+";
const OPTIONAL: &str = "[^/?#]*";

/// Compiles a `{name}` template into a regex body and its generation skeleton.
///
/// A placeholder with a default may match the empty string. Every placeholder
/// after the first optional one must be optional too.
pub(super) fn compile(
    template: &str,
    defaults: &Params,
) -> Result<(String, Vec<Piece>), PatternError> {
    let mut body = String::with_capacity(template.len() * 2);
    let mut pieces: Vec<Piece> = Vec::new();
    let mut names: Vec<&str> = Vec::new();
    let mut optional = false;

    let mut literal = String::new();
    let mut rest = template;

    while !rest.is_empty() {
        let placeholder = rest.strip_prefix(OPEN).and_then(|tail| {
            let end = tail.find(CLOSE)?;
            let name = &tail[..end];
            if is_identifier(name) {
                Some((name, end + 2))
            } else {
                None
            }
        });

        let (name, len) = match placeholder {
            Some(p) => p,
            None => {
                let c = rest.chars().next().unwrap_or(OPEN);
                literal.push(c);
                rest = &rest[c.len_utf8()..];
                continue;
            }
        };
        rest = &rest[len..];

        if names.contains(&name) {
            return Err(PatternError::DuplicateParameter { name: name.to_owned() });
        }
        names.push(name);

        let class = if defaults.contains(name) {
            optional = true;
            OPTIONAL
        } else if optional {
            return Err(PatternError::RequiredAfterOptional { name: name.to_owned() });
        } else {
            REQUIRED
        };

        flush(&mut literal, &mut body, &mut pieces);
        body.push_str("(?P<");
        body.push_str(name);
        body.push('>');
        body.push_str(class);
        body.push(')');
        pieces.push(Piece::Capture(name.to_owned()));
    }
    flush(&mut literal, &mut body, &mut pieces);

    Ok((body, pieces))
}

fn flush(literal: &mut String, body: &mut String, pieces: &mut Vec<Piece>) {
    if literal.is_empty() {
        return;
    }
    body.push_str(&regex::escape(literal));
    pieces.push(Piece::Literal(std::mem::take(literal)));
}
