// Copyright 2025 the Adwaita-web Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Compound selectors: `tag#id.class[attr=value]`.
//!
//! Only single compound selectors are supported. Combinators, pseudo-classes
//! and selector lists are rejected.

use smallvec::SmallVec;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct Selector<'a> {
    pub(crate) tag: Option<&'a str>,
    pub(crate) id: Option<&'a str>,
    pub(crate) classes: SmallVec<[&'a str; 4]>,
    pub(crate) attributes: SmallVec<[(&'a str, Option<&'a str>); 2]>,
}

fn is_ident(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_'
}

/// Split `s` at the end of its leading identifier.
fn ident(s: &str) -> (&str, &str) {
    let end = s.find(|c: char| !is_ident(c)).unwrap_or(s.len());
    s.split_at(end)
}

pub(crate) fn parse(input: &str) -> Option<Selector<'_>> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }
    let mut sel = Selector::default();
    let (tag, mut rest) = ident(input);
    if !tag.is_empty() {
        sel.tag = Some(tag);
    }
    while let Some(c) = rest.chars().next() {
        match c {
            '#' | '.' => {
                let (name, tail) = ident(&rest[1..]);
                if name.is_empty() {
                    return None;
                }
                if c == '#' {
                    sel.id = Some(name);
                } else {
                    sel.classes.push(name);
                }
                rest = tail;
            }
            '[' => {
                let close = rest.find(']')?;
                let body = &rest[1..close];
                let (name, value) = match body.split_once('=') {
                    Some((name, value)) => (name.trim(), Some(value.trim().trim_matches('"'))),
                    None => (body.trim(), None),
                };
                if name.is_empty() || !name.chars().all(is_ident) {
                    return None;
                }
                sel.attributes.push((name, value));
                rest = &rest[close + 1..];
            }
            _ => return None,
        }
    }
    Some(sel)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_compound_selectors() {
        let sel = parse("button#go.flat.pill[data-kind=primary]").unwrap();
        assert_eq!(sel.tag, Some("button"));
        assert_eq!(sel.id, Some("go"));
        assert_eq!(sel.classes.as_slice(), &["flat", "pill"]);
        assert_eq!(sel.attributes.as_slice(), &[("data-kind", Some("primary"))]);

        let sel = parse("#anchor").unwrap();
        assert_eq!(sel.tag, None);
        assert_eq!(sel.id, Some("anchor"));

        let sel = parse("[hidden]").unwrap();
        assert_eq!(sel.attributes.as_slice(), &[("hidden", None)]);
    }

    #[test]
    fn rejects_unsupported_syntax() {
        assert_eq!(parse(""), None);
        assert_eq!(parse("div > span"), None);
        assert_eq!(parse("a:hover"), None);
        assert_eq!(parse("#"), None);
        assert_eq!(parse("[unterminated"), None);
    }
}
