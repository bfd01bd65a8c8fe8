use serde::Serialize;

/// A position in normalized canvas space: both axes run 0..1, y grows upward.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn midpoint(self, other: Point) -> Point {
        Point::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FontWeight {
    Normal,
    Bold,
}

impl FontWeight {
    pub fn from_bold(bold: bool) -> Self {
        if bold { Self::Bold } else { Self::Normal }
    }

    pub fn is_bold(self) -> bool {
        matches!(self, Self::Bold)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum HAlign {
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum VAlign {
    Top,
    Center,
    Bottom,
    Baseline,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextStyle {
    /// Font size in points.
    pub font_size: f32,
    pub weight: FontWeight,
    pub color: String,
    pub h_align: HAlign,
    pub v_align: VAlign,
}

impl TextStyle {
    pub fn centered(font_size: f32, weight: FontWeight, color: &str) -> Self {
        Self {
            font_size,
            weight,
            color: color.to_string(),
            h_align: HAlign::Center,
            v_align: VAlign::Center,
        }
    }

    pub fn left(font_size: f32, weight: FontWeight, color: &str) -> Self {
        Self {
            h_align: HAlign::Left,
            ..Self::centered(font_size, weight, color)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Stroke {
    pub color: String,
    /// Width in points.
    pub width: f32,
    pub opacity: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BoxRole {
    Plain,
    Start,
    Question,
    Result,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoxLabel {
    pub text: String,
    pub style: TextStyle,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoxPrimitive {
    pub role: BoxRole,
    pub center: Point,
    pub size: Size,
    /// Extra margin drawn around `size` on every side, in canvas units.
    pub pad: f32,
    /// Corner rounding radius in canvas units.
    pub rounding: f32,
    pub fill: Option<String>,
    pub fill_opacity: f32,
    pub stroke: Option<Stroke>,
    pub label: Option<BoxLabel>,
}

impl BoxPrimitive {
    /// Outer extent including padding as `(left, bottom, width, height)`.
    pub fn outer_bounds(&self) -> (f32, f32, f32, f32) {
        (
            self.center.x - self.size.width / 2.0 - self.pad,
            self.center.y - self.size.height / 2.0 - self.pad,
            self.size.width + 2.0 * self.pad,
            self.size.height + 2.0 * self.pad,
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LinePrimitive {
    pub from: Point,
    pub to: Point,
    pub color: String,
    /// Width in points.
    pub width: f32,
    /// Arrowhead scale in points, drawn at `to` when present.
    pub arrow_head: Option<f32>,
}

impl LinePrimitive {
    pub fn is_arrow(&self) -> bool {
        self.arrow_head.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextPrimitive {
    pub position: Point,
    pub text: String,
    pub style: TextStyle,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Primitive {
    Box(BoxPrimitive),
    Line(LinePrimitive),
    Text(TextPrimitive),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PrimitiveCounts {
    pub plain_boxes: usize,
    pub start_boxes: usize,
    pub question_boxes: usize,
    pub result_boxes: usize,
    pub lines: usize,
    pub arrows: usize,
    pub texts: usize,
}

/// Write-once drawing surface. Primitives are kept in paint order and can
/// only be appended through [`crate::draw::Painter`].
#[derive(Debug, Clone, Serialize)]
pub struct Canvas {
    background: String,
    primitives: Vec<Primitive>,
}

impl Canvas {
    pub(crate) fn new(background: &str) -> Self {
        Self {
            background: background.to_string(),
            primitives: Vec::new(),
        }
    }

    pub(crate) fn push(&mut self, primitive: Primitive) {
        self.primitives.push(primitive);
    }

    pub fn background(&self) -> &str {
        &self.background
    }

    pub fn primitives(&self) -> &[Primitive] {
        &self.primitives
    }

    pub fn len(&self) -> usize {
        self.primitives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }

    pub fn counts(&self) -> PrimitiveCounts {
        let mut counts = PrimitiveCounts::default();
        for primitive in &self.primitives {
            match primitive {
                Primitive::Box(b) => match b.role {
                    BoxRole::Plain => counts.plain_boxes += 1,
                    BoxRole::Start => counts.start_boxes += 1,
                    BoxRole::Question => counts.question_boxes += 1,
                    BoxRole::Result => counts.result_boxes += 1,
                },
                Primitive::Line(line) if line.is_arrow() => counts.arrows += 1,
                Primitive::Line(_) => counts.lines += 1,
                Primitive::Text(_) => counts.texts += 1,
            }
        }
        counts
    }

    /// Every string painted on the canvas, box labels included, in paint order.
    pub fn texts(&self) -> Vec<&str> {
        self.primitives
            .iter()
            .filter_map(|primitive| match primitive {
                Primitive::Box(b) => b.label.as_ref().map(|label| label.text.as_str()),
                Primitive::Text(t) => Some(t.text.as_str()),
                Primitive::Line(_) => None,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn midpoint_averages_coordinates() {
        let mid = Point::new(0.55, 0.77).midpoint(Point::new(0.55, 0.61));
        assert!((mid.y - 0.69).abs() < 1e-6);
        assert!((mid.x - 0.55).abs() < 1e-6);
    }

    #[test]
    fn outer_bounds_include_padding() {
        let primitive = BoxPrimitive {
            role: BoxRole::Plain,
            center: Point::new(0.5, 0.5),
            size: Size::new(0.2, 0.1),
            pad: 0.01,
            rounding: 0.015,
            fill: None,
            fill_opacity: 1.0,
            stroke: None,
            label: None,
        };
        let (left, bottom, width, height) = primitive.outer_bounds();
        assert!((left - 0.39).abs() < 1e-6);
        assert!((bottom - 0.44).abs() < 1e-6);
        assert!((width - 0.22).abs() < 1e-6);
        assert!((height - 0.12).abs() < 1e-6);
    }

    #[test]
    fn counts_separate_arrows_from_lines() {
        let mut canvas = Canvas::new("#000000");
        let line = LinePrimitive {
            from: Point::new(0.0, 0.0),
            to: Point::new(1.0, 1.0),
            color: "#ffffff".to_string(),
            width: 2.0,
            arrow_head: None,
        };
        canvas.push(Primitive::Line(line.clone()));
        canvas.push(Primitive::Line(LinePrimitive {
            arrow_head: Some(15.0),
            ..line
        }));
        let counts = canvas.counts();
        assert_eq!(counts.lines, 1);
        assert_eq!(counts.arrows, 1);
        assert_eq!(canvas.len(), 2);
    }
}
