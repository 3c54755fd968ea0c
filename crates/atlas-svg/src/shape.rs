// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Lazy shape stream over SVG markup.
use std::borrow::Cow;

use xmlparser::{ElementEnd, StrSpan, Token, Tokenizer};

use crate::error::ShapeError;

/// One start tag with its attributes, borrowed from the source text.
///
/// Attribute names keep their namespace prefix (`xlink:href`), so a
/// prefixed `serif:id` never shadows a plain `id`. Values have XML entity
/// and character references decoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shape<'a> {
    kind: &'a str,
    attributes: Vec<(&'a str, Cow<'a, str>)>,
}

impl<'a> Shape<'a> {
    /// Builds a shape directly, without markup.
    #[must_use]
    pub fn new(kind: &'a str, attributes: Vec<(&'a str, Cow<'a, str>)>) -> Self {
        Self { kind, attributes }
    }

    /// Local tag name (`circle`, `path`, ...).
    #[must_use]
    pub fn kind(&self) -> &'a str {
        self.kind
    }

    /// Value of the first attribute called `name`.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value.as_ref())
    }

    /// All attributes in document order.
    pub fn attributes(&self) -> impl Iterator<Item = (&'a str, &str)> + '_ {
        self.attributes.iter().map(|(k, v)| (*k, v.as_ref()))
    }
}

/// Iterator yielding a [`Shape`] for every element in the markup.
///
/// Shapes are produced in document order as soon as their start tag closes.
/// The first markup error is yielded once, after which the stream ends.
/// Input that stops inside a tag or before every element is closed ends
/// with [`ShapeError::UnexpectedEof`].
pub struct ShapeReader<'a> {
    src: &'a str,
    tokens: Tokenizer<'a>,
    pending: Option<Shape<'a>>,
    open: Vec<&'a str>,
    done: bool,
}

impl<'a> ShapeReader<'a> {
    /// Starts reading `src`.
    #[must_use]
    pub fn new(src: &'a str) -> Self {
        Self {
            src,
            tokens: Tokenizer::from(src),
            pending: None,
            open: Vec::new(),
            done: false,
        }
    }
}

impl std::fmt::Debug for ShapeReader<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShapeReader")
            .field("pending", &self.pending)
            .field("open", &self.open)
            .field("done", &self.done)
            .finish_non_exhaustive()
    }
}

impl<'a> Iterator for ShapeReader<'a> {
    type Item = Result<Shape<'a>, ShapeError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        for token in self.tokens.by_ref() {
            let token = match token {
                Ok(token) => token,
                Err(err) => {
                    self.done = true;
                    self.pending = None;
                    return Some(Err(ShapeError::MalformedMarkup(err)));
                }
            };
            match token {
                Token::ElementStart { local, .. } => {
                    self.pending = Some(Shape::new(local.as_str(), Vec::new()));
                }
                Token::Attribute {
                    prefix,
                    local,
                    value,
                    ..
                } => {
                    if let Some(shape) = self.pending.as_mut() {
                        let name = qualified_name(self.src, prefix, local);
                        shape.attributes.push((name, unescape(value.as_str())));
                    }
                }
                Token::ElementEnd {
                    end: ElementEnd::Open,
                    ..
                } => {
                    if let Some(shape) = self.pending.take() {
                        self.open.push(shape.kind);
                        return Some(Ok(shape));
                    }
                }
                Token::ElementEnd {
                    end: ElementEnd::Empty,
                    ..
                } => {
                    if let Some(shape) = self.pending.take() {
                        return Some(Ok(shape));
                    }
                }
                Token::ElementEnd {
                    end: ElementEnd::Close(..),
                    ..
                } => {
                    self.open.pop();
                }
                _ => {}
            }
        }
        self.done = true;
        let unfinished = self
            .pending
            .take()
            .map(|shape| shape.kind)
            .or_else(|| self.open.pop());
        unfinished.map(|element| {
            Err(ShapeError::UnexpectedEof {
                element: element.to_owned(),
            })
        })
    }
}

fn qualified_name<'a>(src: &'a str, prefix: StrSpan<'a>, local: StrSpan<'a>) -> &'a str {
    if prefix.as_str().is_empty() {
        local.as_str()
    } else {
        src.get(prefix.start()..local.end())
            .unwrap_or(local.as_str())
    }
}

/// Decodes the five predefined entities and numeric character references.
/// Unknown references are kept verbatim.
pub(crate) fn unescape(raw: &str) -> Cow<'_, str> {
    if !raw.contains('&') {
        return Cow::Borrowed(raw);
    }
    let mut out = String::with_capacity(raw.len());
    let mut rest = raw;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let tail = &rest[amp..];
        let decoded = tail
            .find(';')
            .and_then(|semi| decode_reference(&tail[1..semi]).map(|ch| (ch, semi)));
        if let Some((ch, semi)) = decoded {
            out.push(ch);
            rest = &tail[semi + 1..];
        } else {
            out.push('&');
            rest = &tail[1..];
        }
    }
    out.push_str(rest);
    Cow::Owned(out)
}

fn decode_reference(name: &str) -> Option<char> {
    match name {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        _ => {
            let code = if let Some(hex) = name
                .strip_prefix("#x")
                .or_else(|| name.strip_prefix("#X"))
            {
                u32::from_str_radix(hex, 16).ok()?
            } else {
                name.strip_prefix('#')?.parse::<u32>().ok()?
            };
            char::from_u32(code)
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;

    fn kinds(src: &str) -> Vec<String> {
        ShapeReader::new(src)
            .map(|shape| shape.unwrap().kind().to_owned())
            .collect()
    }

    #[test]
    fn yields_every_element_in_document_order() {
        let src = r#"<?xml version="1.0"?>
            <svg xmlns="http://www.w3.org/2000/svg">
              <!-- regions -->
              <g><path d="M0 0"/></g>
              <circle id="_a" cx="1" cy="2" r="3"></circle>
            </svg>"#;
        assert_eq!(kinds(src), vec!["svg", "g", "path", "circle"]);
    }

    #[test]
    fn keeps_namespace_prefix_on_attribute_names() {
        let src = r#"<circle serif:id="label" id="_x"/>"#;
        let shape = ShapeReader::new(src).next().unwrap().unwrap();
        assert_eq!(shape.attribute("id"), Some("_x"));
        assert_eq!(shape.attribute("serif:id"), Some("label"));
    }

    #[test]
    fn decodes_entities_in_attribute_values() {
        let src = r#"<circle id="_a&amp;b&#33;&#x3F;&bogus;"/>"#;
        let shape = ShapeReader::new(src).next().unwrap().unwrap();
        assert_eq!(shape.attribute("id"), Some("_a&b!?&bogus;"));
    }

    #[test]
    fn stops_after_first_markup_error() {
        let mut reader = ShapeReader::new(r#"<svg><circle id="a" <path/></svg>"#);
        assert_eq!(reader.next().unwrap().unwrap().kind(), "svg");
        assert!(matches!(
            reader.next(),
            Some(Err(ShapeError::MalformedMarkup(_)))
        ));
        assert!(reader.next().is_none());
    }

    #[test]
    fn unclosed_element_at_end_is_an_error() {
        let mut reader = ShapeReader::new(r#"<svg><g><circle id="_a" cx="1" cy="1" r="1"/></g>"#);
        assert_eq!(reader.next().unwrap().unwrap().kind(), "svg");
        assert_eq!(reader.next().unwrap().unwrap().kind(), "g");
        assert_eq!(reader.next().unwrap().unwrap().kind(), "circle");
        match reader.next() {
            Some(Err(ShapeError::UnexpectedEof { element })) => assert_eq!(element, "svg"),
            other => panic!("expected end-of-input error, got {other:?}"),
        }
        assert!(reader.next().is_none());
    }

    #[test]
    fn unfinished_start_tag_is_an_error() {
        let reader = ShapeReader::new(r#"<svg><circle id="_a" cx="1" cy="1" r="1"/><circ"#);
        let last = reader.last().unwrap();
        assert!(matches!(last, Err(ShapeError::UnexpectedEof { .. })));
    }

    #[test]
    fn unescape_borrows_when_nothing_to_decode() {
        assert!(matches!(unescape("plain"), Cow::Borrowed("plain")));
    }
}
