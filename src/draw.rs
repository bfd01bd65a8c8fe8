//! Drawing operations that append primitives to a [`Canvas`].

use crate::ir::{
    BoxLabel, BoxPrimitive, BoxRole, Canvas, FontWeight, LinePrimitive, Point, Primitive, Size,
    Stroke, TextPrimitive, TextStyle,
};
use crate::theme::Theme;

const BOX_PAD: f32 = 0.01;
const BOX_ROUNDING: f32 = 0.015;
const STROKE_WIDTH: f32 = 2.0;
const BOX_OPACITY: f32 = 0.9;
const ARROW_HEAD_SCALE: f32 = 15.0;

pub const DEFAULT_BOX_SIZE: Size = Size::new(0.22, 0.05);
pub const DEFAULT_BOX_FONT_SIZE: f32 = 10.0;

const START_SIZE: Size = Size::new(0.12, 0.04);

const QUESTION_SIZE: Size = Size::new(0.26, 0.055);
const QUESTION_FONT_SIZE: f32 = 11.0;

const RESULT_SIZE: Size = Size::new(0.18, 0.045);
const RESULT_CAPTION_OFFSET: f32 = 0.015;
const RESULT_BOX_OFFSET: f32 = 0.025;
const RESULT_CAPTION_FONT_SIZE: f32 = 9.0;
const RESULT_VALUE_FONT_SIZE: f32 = 10.0;
const RESULT_FILL_OPACITY: f32 = 0.2;

/// Owns the canvas while it is being drawn; [`Painter::finish`] hands it over
/// for rendering and nothing can be appended afterwards.
pub struct Painter {
    canvas: Canvas,
    theme: Theme,
}

impl Painter {
    pub fn new(theme: &Theme) -> Self {
        Self {
            canvas: Canvas::new(&theme.background),
            theme: theme.clone(),
        }
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    /// Filled rounded box with centered light text.
    pub fn draw_box(
        &mut self,
        at: Point,
        text: &str,
        color: &str,
        size: Size,
        font_size: f32,
        bold: bool,
    ) {
        let label = self.light_label(text, font_size, bold);
        self.push_filled_box(BoxRole::Plain, at, size, color, label);
    }

    /// Entry node: a `draw_box` preset in the start color.
    pub fn draw_start_box(&mut self, at: Point, text: &str) {
        let label = self.light_label(text, DEFAULT_BOX_FONT_SIZE, true);
        let color = self.theme.start_color.clone();
        self.push_filled_box(BoxRole::Start, at, START_SIZE, &color, label);
    }

    /// Decision node: fixed size, dark fill, line-colored border.
    pub fn draw_question_box(&mut self, at: Point, text: &str) {
        let label = BoxLabel {
            text: text.to_string(),
            style: TextStyle::centered(QUESTION_FONT_SIZE, FontWeight::Bold, &self.theme.text_light),
        };
        self.canvas.push(Primitive::Box(BoxPrimitive {
            role: BoxRole::Question,
            center: at,
            size: QUESTION_SIZE,
            pad: BOX_PAD,
            rounding: BOX_ROUNDING,
            fill: Some(self.theme.question_color.clone()),
            fill_opacity: 1.0,
            stroke: Some(Stroke {
                color: self.theme.line_color.clone(),
                width: STROKE_WIDTH,
                opacity: 1.0,
            }),
            label: Some(label),
        }));
    }

    /// Outcome node: muted caption above a tinted, bordered box holding `value`.
    pub fn draw_result_box(&mut self, at: Point, label: &str, value: &str, color: &str) {
        let caption = TextStyle::centered(
            RESULT_CAPTION_FONT_SIZE,
            FontWeight::Normal,
            &self.theme.text_muted,
        );
        self.draw_text(Point::new(at.x, at.y + RESULT_CAPTION_OFFSET), label, caption);

        self.canvas.push(Primitive::Box(BoxPrimitive {
            role: BoxRole::Result,
            center: Point::new(at.x, at.y - RESULT_BOX_OFFSET),
            size: RESULT_SIZE,
            pad: BOX_PAD,
            rounding: BOX_ROUNDING,
            fill: Some(color.to_string()),
            fill_opacity: RESULT_FILL_OPACITY,
            stroke: Some(Stroke {
                color: color.to_string(),
                width: STROKE_WIDTH,
                opacity: 1.0,
            }),
            label: Some(BoxLabel {
                text: value.to_string(),
                style: TextStyle::centered(RESULT_VALUE_FONT_SIZE, FontWeight::Bold, color),
            }),
        }));
    }

    pub fn draw_line(&mut self, from: Point, to: Point) {
        self.push_line(from, to, None);
    }

    /// Segment ending in a filled arrowhead at `to`.
    pub fn draw_arrow(&mut self, from: Point, to: Point) {
        self.push_line(from, to, Some(ARROW_HEAD_SCALE));
    }

    pub fn draw_text(&mut self, at: Point, text: &str, style: TextStyle) {
        self.canvas.push(Primitive::Text(TextPrimitive {
            position: at,
            text: text.to_string(),
            style,
        }));
    }

    pub fn finish(self) -> Canvas {
        self.canvas
    }

    fn light_label(&self, text: &str, font_size: f32, bold: bool) -> BoxLabel {
        BoxLabel {
            text: text.to_string(),
            style: TextStyle::centered(
                font_size,
                FontWeight::from_bold(bold),
                &self.theme.text_light,
            ),
        }
    }

    fn push_filled_box(&mut self, role: BoxRole, at: Point, size: Size, color: &str, label: BoxLabel) {
        self.canvas.push(Primitive::Box(BoxPrimitive {
            role,
            center: at,
            size,
            pad: BOX_PAD,
            rounding: BOX_ROUNDING,
            fill: Some(color.to_string()),
            fill_opacity: BOX_OPACITY,
            stroke: Some(Stroke {
                color: color.to_string(),
                width: STROKE_WIDTH,
                opacity: BOX_OPACITY,
            }),
            label: Some(label),
        }));
    }

    fn push_line(&mut self, from: Point, to: Point, arrow_head: Option<f32>) {
        self.canvas.push(Primitive::Line(LinePrimitive {
            from,
            to,
            color: self.theme.line_color.clone(),
            width: STROKE_WIDTH,
            arrow_head,
        }));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn result_box_places_caption_above_box() {
        let mut painter = Painter::new(&Theme::dark());
        painter.draw_result_box(Point::new(0.25, 0.68), "Caption", "Value", "#3b82f6");
        let canvas = painter.finish();
        assert_eq!(canvas.len(), 2);

        let Primitive::Text(caption) = &canvas.primitives()[0] else {
            panic!("expected caption text first");
        };
        assert!((caption.position.y - 0.695).abs() < 1e-6);

        let Primitive::Box(value_box) = &canvas.primitives()[1] else {
            panic!("expected result box second");
        };
        assert_eq!(value_box.role, BoxRole::Result);
        assert!((value_box.center.y - 0.655).abs() < 1e-6);
        assert!((value_box.fill_opacity - 0.2).abs() < 1e-6);
        let label = value_box.label.as_ref().expect("result box has a value");
        assert_eq!(label.style.color, "#3b82f6");
        assert!(label.style.weight.is_bold());
    }

    #[test]
    fn question_box_uses_theme_preset() {
        let theme = Theme::dark();
        let mut painter = Painter::new(&theme);
        painter.draw_question_box(Point::new(0.55, 0.82), "What do you need?");
        let canvas = painter.finish();
        let Primitive::Box(question) = &canvas.primitives()[0] else {
            panic!("expected a box");
        };
        assert_eq!(question.role, BoxRole::Question);
        assert_eq!(question.size, QUESTION_SIZE);
        assert_eq!(question.fill.as_deref(), Some(theme.question_color.as_str()));
        assert_eq!(
            question.stroke.as_ref().map(|s| s.color.as_str()),
            Some(theme.line_color.as_str())
        );
    }

    #[test]
    fn arrows_and_lines_share_line_color() {
        let theme = Theme::dark();
        let mut painter = Painter::new(&theme);
        painter.draw_line(Point::new(0.1, 0.1), Point::new(0.2, 0.1));
        painter.draw_arrow(Point::new(0.2, 0.1), Point::new(0.2, 0.0));
        let canvas = painter.finish();
        for primitive in canvas.primitives() {
            let Primitive::Line(line) = primitive else {
                panic!("expected only lines");
            };
            assert_eq!(line.color, theme.line_color);
        }
        let counts = canvas.counts();
        assert_eq!((counts.lines, counts.arrows), (1, 1));
    }

    #[test]
    fn draw_box_honours_bold_flag() {
        let mut painter = Painter::new(&Theme::dark());
        painter.draw_box(Point::new(0.5, 0.5), "plain", "#334155", DEFAULT_BOX_SIZE, 12.0, false);
        let canvas = painter.finish();
        let Primitive::Box(b) = &canvas.primitives()[0] else {
            panic!("expected a box");
        };
        let label = b.label.as_ref().expect("box label");
        assert_eq!(label.style.weight, FontWeight::Normal);
        assert_eq!(label.style.font_size, 12.0);
        assert_eq!(b.role, BoxRole::Plain);
    }

    #[test]
    fn start_box_is_counted_separately() {
        let theme = Theme::dark();
        let mut painter = Painter::new(&theme);
        painter.draw_start_box(Point::new(0.55, 0.92), "START");
        let canvas = painter.finish();
        let Primitive::Box(start) = &canvas.primitives()[0] else {
            panic!("expected a box");
        };
        assert_eq!(start.role, BoxRole::Start);
        assert_eq!(start.size, START_SIZE);
        assert_eq!(start.fill.as_deref(), Some(theme.start_color.as_str()));
        assert_eq!(canvas.counts().start_boxes, 1);
        assert_eq!(canvas.counts().plain_boxes, 0);
    }
}
