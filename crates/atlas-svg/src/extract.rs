// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Node-marker extraction.
use atlas_graph::VectorNodeSet;
use tracing::{debug, trace};

use crate::border::validate_border;
use crate::error::ShapeError;
use crate::shape::{Shape, ShapeReader};

/// Tag of node markers.
pub const NODE_SHAPE: &str = "circle";
/// Tag of region borders.
pub const BORDER_SHAPE: &str = "path";
/// Prefix added to ids that would otherwise not be valid XML ids.
pub const ID_ESCAPE: char = '_';

/// A validated node marker borrowed from its shape.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodeMarker<'s> {
    /// Node id with the escape prefix removed.
    pub id: &'s str,
    /// Center x.
    pub cx: f64,
    /// Center y.
    pub cy: f64,
    /// Radius.
    pub r: f64,
}

/// Strips exactly one leading [`ID_ESCAPE`].
#[must_use]
pub fn unescape_id(raw: &str) -> &str {
    raw.strip_prefix(ID_ESCAPE).unwrap_or(raw)
}

/// Reads the longest numeric prefix of `text`, ignoring leading whitespace.
///
/// `"12px"` reads as `12`, `".5e1x"` as `5`. Returns `None` when no digits
/// lead the text.
#[must_use]
pub fn parse_leading_number(text: &str) -> Option<f64> {
    let s = text.trim_start();
    let bytes = s.as_bytes();
    let digit_at = |i: usize| bytes.get(i).is_some_and(u8::is_ascii_digit);

    let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    let int_start = end;
    while digit_at(end) {
        end += 1;
    }
    let mut digits = end - int_start;
    if bytes.get(end) == Some(&b'.') {
        let mut frac_end = end + 1;
        while digit_at(frac_end) {
            frac_end += 1;
        }
        let frac = frac_end - end - 1;
        if digits + frac > 0 {
            digits += frac;
            end = frac_end;
        }
    }
    if digits == 0 {
        return None;
    }
    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits = exp_end;
        while digit_at(exp_end) {
            exp_end += 1;
        }
        if exp_end > exp_digits {
            end = exp_end;
        }
    }
    s[..end].parse().ok()
}

fn finite_attribute(shape: &Shape<'_>, name: &'static str) -> Result<f64, ShapeError> {
    let raw = shape.attribute(name);
    raw.and_then(parse_leading_number)
        .filter(|v| v.is_finite())
        .ok_or_else(|| {
            let reason = raw.map_or_else(
                || "attribute is missing".to_owned(),
                |raw| format!("expected a finite number, found {raw:?}"),
            );
            ShapeError::geometry(shape.kind(), name, reason)
        })
}

/// Validates a node marker and reads its id.
///
/// A missing `id` reads as the empty id.
///
/// # Errors
/// [`ShapeError::MalformedGeometry`] when `cx`, `cy` or `r` is missing or not
/// a finite number.
pub fn node_marker<'s>(shape: &'s Shape<'_>) -> Result<NodeMarker<'s>, ShapeError> {
    let cx = finite_attribute(shape, "cx")?;
    let cy = finite_attribute(shape, "cy")?;
    let r = finite_attribute(shape, "r")?;
    let id = unescape_id(shape.attribute("id").unwrap_or_default());
    Ok(NodeMarker { id, cx, cy, r })
}

/// Everything the extractor learned from one document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Extraction {
    /// Marker ids in first-seen order.
    pub nodes: VectorNodeSet,
    /// Node markers seen, duplicates included.
    pub markers: usize,
    /// Borders validated.
    pub borders: usize,
}

/// Incremental consumer of [`Shape`]s.
#[derive(Debug, Default)]
pub struct NodeExtractor {
    state: Extraction,
}

impl NodeExtractor {
    /// Empty extractor.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Feeds one shape. Tags other than markers and borders are ignored.
    ///
    /// # Errors
    /// Propagates marker and border validation failures.
    pub fn consume(&mut self, shape: &Shape<'_>) -> Result<(), ShapeError> {
        match shape.kind() {
            NODE_SHAPE => {
                let marker = node_marker(shape)?;
                if !self.state.nodes.insert(marker.id) {
                    trace!(id = marker.id, "duplicate node marker");
                }
                self.state.markers += 1;
            }
            BORDER_SHAPE => {
                validate_border(shape)?;
                self.state.borders += 1;
            }
            _ => {}
        }
        Ok(())
    }

    /// Consumes the extractor.
    #[must_use]
    pub fn finish(self) -> Extraction {
        debug!(
            nodes = self.state.nodes.len(),
            markers = self.state.markers,
            borders = self.state.borders,
            "shape extraction finished"
        );
        self.state
    }
}

/// Drains a shape stream into an [`Extraction`], stopping at the first error.
///
/// # Errors
/// The first markup or geometry error in the stream.
pub fn extract_nodes<'a, I>(shapes: I) -> Result<Extraction, ShapeError>
where
    I: IntoIterator<Item = Result<Shape<'a>, ShapeError>>,
{
    let mut extractor = NodeExtractor::new();
    for shape in shapes {
        extractor.consume(&shape?)?;
    }
    Ok(extractor.finish())
}

/// Convenience for [`extract_nodes`] over [`ShapeReader::new`].
///
/// # Errors
/// See [`extract_nodes`].
pub fn extract_from_svg(svg: &str) -> Result<Extraction, ShapeError> {
    extract_nodes(ShapeReader::new(svg))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn unescape_strips_one_prefix() {
        assert_eq!(unescape_id("_3abc"), "3abc");
        assert_eq!(unescape_id("abc"), "abc");
        assert_eq!(unescape_id("__3abc"), "_3abc");
        assert_eq!(unescape_id(""), "");
    }

    #[test]
    fn leading_number_is_lenient_about_suffixes() {
        assert_eq!(parse_leading_number("12px"), Some(12.0));
        assert_eq!(parse_leading_number("  -3.5e2 "), Some(-350.0));
        assert_eq!(parse_leading_number(".5e1x"), Some(5.0));
        assert_eq!(parse_leading_number("7e"), Some(7.0));
        assert_eq!(parse_leading_number("4."), Some(4.0));
        assert_eq!(parse_leading_number("+2"), Some(2.0));
    }

    #[test]
    fn leading_number_rejects_non_numeric_text() {
        for text in ["", "abc", "-", ".", "e5", "Infinity", "NaN"] {
            assert_eq!(parse_leading_number(text), None, "{text:?}");
        }
    }

    #[test]
    fn overflowing_numbers_are_not_finite_markers() {
        let err = extract_from_svg(r#"<circle id="_a" cx="1e400" cy="0" r="1"/>"#).unwrap_err();
        assert!(matches!(
            err,
            ShapeError::MalformedGeometry { attribute: "cx", .. }
        ));
    }

    #[test]
    fn missing_id_reads_as_empty() {
        let extraction = extract_from_svg(r#"<circle cx="0" cy="0" r="1"/>"#).unwrap();
        assert_eq!(extraction.nodes.iter().collect::<Vec<_>>(), vec![""]);
    }

    #[test]
    fn duplicate_markers_count_once_in_node_set() {
        let svg = r#"<svg>
            <circle id="_a" cx="0" cy="0" r="1"/>
            <circle id="_b" cx="0" cy="0" r="1"/>
            <circle id="_a" cx="5" cy="5" r="1"/>
        </svg>"#;
        let extraction = extract_from_svg(svg).unwrap();
        assert_eq!(extraction.nodes.iter().collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(extraction.markers, 3);
    }
}
