// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Region-border validation for `path` shapes.
use svgtypes::{Color, Paint, PathParser, PathSegment};

use crate::error::ShapeError;
use crate::shape::Shape;

/// Resolved fill of a border.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Fill {
    /// `fill="none"`.
    None,
    /// A concrete color.
    Color(Color),
    /// `currentColor`.
    CurrentColor,
    /// Paint servers, `inherit` and context paints.
    Other,
}

/// Geometry and fill of a validated border.
#[derive(Debug, Clone, PartialEq)]
pub struct Border {
    /// Absolute end point of every drawing segment.
    pub points: Vec<(f64, f64)>,
    /// Resolved fill.
    pub fill: Fill,
}

/// Checks that `shape` carries parseable path data and a parseable fill.
///
/// The fill is read from the `fill` attribute, then from a `fill:`
/// declaration in `style`, and defaults to black.
///
/// # Errors
/// [`ShapeError::MalformedGeometry`] naming `d` or `fill`.
pub fn validate_border(shape: &Shape<'_>) -> Result<Border, ShapeError> {
    let kind = shape.kind();
    let d = shape
        .attribute("d")
        .ok_or_else(|| ShapeError::geometry(kind, "d", "attribute is missing"))?;
    let points = path_points(d).map_err(|err| ShapeError::geometry(kind, "d", err.to_string()))?;

    let fill_text = fill_text(shape);
    let fill = match Paint::from_str(fill_text) {
        Ok(Paint::None) => Fill::None,
        Ok(Paint::Color(color)) => Fill::Color(color),
        Ok(Paint::CurrentColor) => Fill::CurrentColor,
        Ok(_) => Fill::Other,
        Err(err) => return Err(ShapeError::geometry(kind, "fill", err.to_string())),
    };
    Ok(Border { points, fill })
}

fn fill_text<'s>(shape: &'s Shape<'_>) -> &'s str {
    if let Some(fill) = shape.attribute("fill") {
        return fill.trim();
    }
    shape
        .attribute("style")
        .and_then(|style| {
            style.split(';').find_map(|decl| {
                let (name, value) = decl.split_once(':')?;
                (name.trim() == "fill").then(|| value.trim())
            })
        })
        .unwrap_or("black")
}

fn path_points(d: &str) -> Result<Vec<(f64, f64)>, svgtypes::Error> {
    let mut points = Vec::new();
    let mut current = (0.0, 0.0);
    let mut start = (0.0, 0.0);
    for segment in PathParser::from(d) {
        let point = match segment? {
            PathSegment::MoveTo { abs, x, y } => {
                start = resolve(abs, current, x, y);
                start
            }
            PathSegment::LineTo { abs, x, y }
            | PathSegment::CurveTo { abs, x, y, .. }
            | PathSegment::SmoothCurveTo { abs, x, y, .. }
            | PathSegment::Quadratic { abs, x, y, .. }
            | PathSegment::SmoothQuadratic { abs, x, y }
            | PathSegment::EllipticalArc { abs, x, y, .. } => resolve(abs, current, x, y),
            PathSegment::HorizontalLineTo { abs, x } => {
                (if abs { x } else { current.0 + x }, current.1)
            }
            PathSegment::VerticalLineTo { abs, y } => {
                (current.0, if abs { y } else { current.1 + y })
            }
            PathSegment::ClosePath { .. } => {
                current = start;
                continue;
            }
        };
        current = point;
        points.push(point);
    }
    Ok(points)
}

fn resolve(abs: bool, current: (f64, f64), x: f64, y: f64) -> (f64, f64) {
    if abs {
        (x, y)
    } else {
        (current.0 + x, current.1 + y)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::borrow::Cow;

    use super::*;

    fn path<'a>(attrs: &[(&'a str, &'a str)]) -> Shape<'a> {
        Shape::new(
            "path",
            attrs.iter().map(|(k, v)| (*k, Cow::Borrowed(*v))).collect(),
        )
    }

    #[test]
    fn collects_absolute_points_from_relative_commands() {
        let border = validate_border(&path(&[("d", "m10 10 l5 0 h5 v-10 z L0 0")])).unwrap();
        assert_eq!(
            border.points,
            vec![(10.0, 10.0), (15.0, 10.0), (20.0, 10.0), (20.0, 0.0), (0.0, 0.0)]
        );
        assert_eq!(border.fill, Fill::Color(Color::black()));
    }

    #[test]
    fn fill_attribute_wins_over_style() {
        let border = validate_border(&path(&[
            ("d", "M0 0"),
            ("style", "stroke:red; fill: none"),
            ("fill", "#00ff00"),
        ]))
        .unwrap();
        assert_eq!(border.fill, Fill::Color(Color::new_rgb(0, 255, 0)));
    }

    #[test]
    fn fill_is_read_from_style() {
        let border =
            validate_border(&path(&[("d", "M0 0"), ("style", "stroke:red; fill: none")])).unwrap();
        assert_eq!(border.fill, Fill::None);
    }

    #[test]
    fn rejects_missing_or_broken_path_data() {
        let err = validate_border(&path(&[])).unwrap_err();
        assert!(matches!(
            err,
            ShapeError::MalformedGeometry { attribute: "d", .. }
        ));
        let err = validate_border(&path(&[("d", "M 10 Q")])).unwrap_err();
        assert!(matches!(
            err,
            ShapeError::MalformedGeometry { attribute: "d", .. }
        ));
    }

    #[test]
    fn rejects_unparseable_fill() {
        let err = validate_border(&path(&[("d", "M0 0"), ("fill", "not-a-color")])).unwrap_err();
        assert!(matches!(
            err,
            ShapeError::MalformedGeometry {
                attribute: "fill",
                ..
            }
        ));
    }
}
