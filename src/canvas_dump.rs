use crate::config::RenderConfig;
use crate::ir::{Canvas, Primitive, PrimitiveCounts};
use serde::Serialize;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

#[derive(Debug, Serialize)]
pub struct CanvasDump<'a> {
    pub width: u32,
    pub height: u32,
    pub dpi: f32,
    pub background: &'a str,
    pub counts: PrimitiveCounts,
    pub primitives: Vec<PrimitiveDump<'a>>,
}

#[derive(Debug, Serialize)]
pub struct PrimitiveDump<'a> {
    pub index: usize,
    pub kind: &'static str,
    #[serde(flatten)]
    pub primitive: &'a Primitive,
}

impl<'a> CanvasDump<'a> {
    pub fn from_canvas(canvas: &'a Canvas, render: &RenderConfig) -> Self {
        let primitives = canvas
            .primitives()
            .iter()
            .enumerate()
            .map(|(index, primitive)| PrimitiveDump {
                index,
                kind: match primitive {
                    Primitive::Box(_) => "box",
                    Primitive::Line(line) if line.is_arrow() => "arrow",
                    Primitive::Line(_) => "line",
                    Primitive::Text(_) => "text",
                },
                primitive,
            })
            .collect();

        CanvasDump {
            width: render.pixel_width(),
            height: render.pixel_height(),
            dpi: render.dpi,
            background: canvas.background(),
            counts: canvas.counts(),
            primitives,
        }
    }
}

pub fn write_canvas_dump(path: &Path, canvas: &Canvas, render: &RenderConfig) -> anyhow::Result<()> {
    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    let dump = CanvasDump::from_canvas(canvas, render);
    serde_json::to_writer_pretty(writer, &dump)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagram::build_decision_tree;
    use crate::theme::Theme;

    #[test]
    fn dump_lists_primitives_in_paint_order() {
        let canvas = build_decision_tree(&Theme::dark());
        let render = RenderConfig::default();
        let value = serde_json::to_value(CanvasDump::from_canvas(&canvas, &render))
            .expect("dump serializes");

        let primitives = value["primitives"].as_array().expect("primitive list");
        assert_eq!(primitives.len(), canvas.len());
        assert_eq!(primitives[0]["kind"], "text");
        assert_eq!(primitives[0]["Text"]["text"], crate::diagram::TITLE);
        assert_eq!(primitives[1]["kind"], "box");
        assert_eq!(value["counts"]["question_boxes"], 3);
        assert_eq!(value["width"], 3000);
    }
}
