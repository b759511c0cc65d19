use crate::geometry::{Point, Rect, Size};
use serde::{Deserialize, Serialize};

/// Open arrow annotation: a line segment plus the size of the head drawn at
/// its second endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Arrow {
    pub p1: Point,
    pub p2: Point,
    pub head_size: Size,
}

/// Ellipse inscribed in a rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ellipse {
    pub rect: Rect,
    pub filled: bool,
}

/// Elliptic arc: the section of the inscribed ellipse from `start_angle`
/// spanning `span_angle`, both in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EllipseArc {
    pub rect: Rect,
    pub start_angle: f64,
    pub span_angle: f64,
}

/// Plain line segment annotation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Line {
    pub p1: Point,
    pub p2: Point,
}

/// Rectangle annotation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rectangle {
    pub rect: Rect,
    pub filled: bool,
}

/// Free text placed on the schematic, rotated by `angle` degrees.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphicText {
    pub pos: Point,
    pub angle: f64,
    pub text: String,
}

/// A free-form annotation item.
///
/// Paintings are opaque to everything but the serializer, which dispatches
/// on [`Painting::type_name`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Painting {
    Arrow(Arrow),
    Ellipse(Ellipse),
    EllipseArc(EllipseArc),
    Line(Line),
    Rectangle(Rectangle),
    Text(GraphicText),
}

impl Painting {
    /// The type token used as discriminator in the persisted form.
    pub fn type_name(&self) -> &'static str {
        match self {
            Painting::Arrow(_) => "arrow",
            Painting::Ellipse(_) => "ellipse",
            Painting::EllipseArc(_) => "ellipsearc",
            Painting::Line(_) => "line",
            Painting::Rectangle(_) => "rectangle",
            Painting::Text(_) => "text",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn type_names_are_distinct() {
        let paintings = [
            Painting::Arrow(Arrow {
                p1: Point::default(),
                p2: Point::default(),
                head_size: Size::new(4.0, 8.0),
            }),
            Painting::Ellipse(Ellipse {
                rect: Rect::default(),
                filled: false,
            }),
            Painting::EllipseArc(EllipseArc {
                rect: Rect::default(),
                start_angle: 0.0,
                span_angle: 180.0,
            }),
            Painting::Line(Line {
                p1: Point::default(),
                p2: Point::default(),
            }),
            Painting::Rectangle(Rectangle {
                rect: Rect::default(),
                filled: true,
            }),
            Painting::Text(GraphicText {
                pos: Point::default(),
                angle: 0.0,
                text: "hello".into(),
            }),
        ];

        let mut names: Vec<_> = paintings.iter().map(|p| p.type_name()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), paintings.len());
    }
}
