use crate::config::RenderConfig;
use crate::error::RenderError;
use crate::fonts;
use crate::ir::{BoxPrimitive, Canvas, HAlign, LinePrimitive, Point, Primitive, TextStyle, VAlign};
use crate::theme::Theme;
use log::{debug, warn};
use std::io::Write;
use std::path::Path;

/// Arrowhead proportions relative to its scale, matching a `-|>` head.
const HEAD_LENGTH_RATIO: f32 = 0.4;
const HEAD_HALF_WIDTH_RATIO: f32 = 0.2;
/// The arrow tip stops this many points short of its target.
const ARROW_TIP_SHRINK: f32 = 2.0;

/// Maps normalized canvas coordinates onto the output pixel grid.
struct Viewport<'a> {
    width: f32,
    height: f32,
    render: &'a RenderConfig,
}

impl<'a> Viewport<'a> {
    fn new(render: &'a RenderConfig) -> Self {
        Self {
            width: render.pixel_width() as f32,
            height: render.pixel_height() as f32,
            render,
        }
    }

    fn point(&self, p: Point) -> (f32, f32) {
        (p.x * self.width, (1.0 - p.y) * self.height)
    }

    fn pt(&self, points: f32) -> f32 {
        self.render.points_to_px(points)
    }
}

pub fn render_svg(canvas: &Canvas, theme: &Theme, render: &RenderConfig) -> String {
    let viewport = Viewport::new(render);
    let width = viewport.width;
    let height = viewport.height;
    let mut svg = String::new();

    svg.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width}\" height=\"{height}\" viewBox=\"0 0 {width} {height}\">",
    ));
    svg.push_str(&format!(
        "<rect width=\"100%\" height=\"100%\" fill=\"{}\"/>",
        escape_xml(canvas.background())
    ));

    for primitive in canvas.primitives() {
        match primitive {
            Primitive::Box(b) => push_box(&mut svg, b, &viewport, theme),
            Primitive::Line(line) => push_line(&mut svg, line, &viewport),
            Primitive::Text(text) => svg.push_str(&text_svg(
                viewport.point(text.position),
                &text.text,
                &text.style,
                &viewport,
                theme,
            )),
        }
    }

    svg.push_str("</svg>");
    debug!(primitives = canvas.len(), bytes = svg.len(); "Rendered SVG");
    svg
}

fn push_box(svg: &mut String, b: &BoxPrimitive, viewport: &Viewport<'_>, theme: &Theme) {
    let (left, bottom, w, h) = b.outer_bounds();
    let (x, y) = viewport.point(Point::new(left, bottom + h));
    let width = w * viewport.width;
    let height = h * viewport.height;
    let rx = b.rounding * viewport.width;
    let ry = b.rounding * viewport.height;
    let fill = b.fill.as_deref().unwrap_or("none");
    let stroke = match &b.stroke {
        Some(stroke) if stroke.width > 0.0 => format!(
            "stroke=\"{}\" stroke-width=\"{:.2}\" stroke-opacity=\"{}\"",
            escape_xml(&stroke.color),
            viewport.pt(stroke.width),
            stroke.opacity
        ),
        _ => "stroke=\"none\"".to_string(),
    };
    svg.push_str(&format!(
        "<rect x=\"{x:.2}\" y=\"{y:.2}\" width=\"{width:.2}\" height=\"{height:.2}\" rx=\"{rx:.2}\" ry=\"{ry:.2}\" fill=\"{}\" fill-opacity=\"{}\" {stroke}/>",
        escape_xml(fill),
        b.fill_opacity
    ));

    if let Some(label) = &b.label {
        svg.push_str(&text_svg(
            viewport.point(b.center),
            &label.text,
            &label.style,
            viewport,
            theme,
        ));
    }
}

fn push_line(svg: &mut String, line: &LinePrimitive, viewport: &Viewport<'_>) {
    let (x1, y1) = viewport.point(line.from);
    let (mut x2, mut y2) = viewport.point(line.to);
    let stroke_width = viewport.pt(line.width);
    let color = escape_xml(&line.color);

    let Some(scale) = line.arrow_head else {
        svg.push_str(&format!(
            "<path d=\"M {x1:.2} {y1:.2} L {x2:.2} {y2:.2}\" fill=\"none\" stroke=\"{color}\" stroke-width=\"{stroke_width:.2}\" stroke-linecap=\"round\"/>"
        ));
        return;
    };

    let (dx, dy) = (x2 - x1, y2 - y1);
    let len = (dx * dx + dy * dy).sqrt();
    if len <= f32::EPSILON {
        return;
    }
    let (ux, uy) = (dx / len, dy / len);
    let shrink = viewport.pt(ARROW_TIP_SHRINK).min(len);
    x2 -= ux * shrink;
    y2 -= uy * shrink;
    let len = len - shrink;
    let head_length = viewport.pt(scale * HEAD_LENGTH_RATIO).min(len);
    let half_width = viewport.pt(scale * HEAD_HALF_WIDTH_RATIO);
    let (bx, by) = (x2 - ux * head_length, y2 - uy * head_length);
    let (nx, ny) = (-uy * half_width, ux * half_width);

    svg.push_str(&format!(
        "<path d=\"M {x1:.2} {y1:.2} L {bx:.2} {by:.2}\" fill=\"none\" stroke=\"{color}\" stroke-width=\"{stroke_width:.2}\" stroke-linecap=\"round\"/>"
    ));
    svg.push_str(&format!(
        "<path d=\"M {x2:.2} {y2:.2} L {:.2} {:.2} L {:.2} {:.2} Z\" fill=\"{color}\" stroke=\"{color}\" stroke-width=\"{stroke_width:.2}\" stroke-linejoin=\"miter\"/>",
        bx + nx,
        by + ny,
        bx - nx,
        by - ny,
    ));
}

fn text_svg(
    (x, y): (f32, f32),
    text: &str,
    style: &TextStyle,
    viewport: &Viewport<'_>,
    theme: &Theme,
) -> String {
    let font_size = viewport.pt(style.font_size);
    let anchor = match style.h_align {
        HAlign::Left => "start",
        HAlign::Center => "middle",
        HAlign::Right => "end",
    };
    let baseline_y = match style.v_align {
        VAlign::Top => y + font_size * 0.8,
        VAlign::Center => y + font_size * 0.35,
        VAlign::Bottom => y - font_size * 0.2,
        VAlign::Baseline => y,
    };
    let weight = if style.weight.is_bold() { "bold" } else { "normal" };

    format!(
        "<text x=\"{x:.2}\" y=\"{baseline_y:.2}\" text-anchor=\"{anchor}\" font-family=\"{}\" font-size=\"{font_size:.2}\" font-weight=\"{weight}\" fill=\"{}\">{}</text>",
        escape_xml(&theme.font_family),
        escape_xml(&style.color),
        escape_xml(text)
    )
}

/// Logs a warning for every box whose label is measured wider than the box itself.
/// Returns the number of overflowing labels.
pub fn warn_on_overflowing_labels(canvas: &Canvas, theme: &Theme, render: &RenderConfig) -> usize {
    let viewport = Viewport::new(render);
    let mut overflowing = 0;
    for primitive in canvas.primitives() {
        let Primitive::Box(b) = primitive else {
            continue;
        };
        let Some(label) = &b.label else {
            continue;
        };
        let font_size = viewport.pt(label.style.font_size);
        let Some(text_width) = fonts::measure_text_width(
            &label.text,
            font_size,
            &theme.font_family,
            label.style.weight.is_bold(),
        ) else {
            continue;
        };
        let (_, _, outer_width, _) = b.outer_bounds();
        let box_width = outer_width * viewport.width;
        if text_width > box_width {
            warn!(label = label.text.as_str(), text_width = text_width, box_width = box_width; "Label overflows its box");
            overflowing += 1;
        }
    }
    overflowing
}

pub fn write_output_svg(svg: &str, output: &Path) -> Result<(), RenderError> {
    write_atomically(output, svg.as_bytes())
}

#[cfg(feature = "png")]
pub fn write_output_png(
    svg: &str,
    output: &Path,
    render_cfg: &RenderConfig,
    theme: &Theme,
) -> Result<(), RenderError> {
    let png = rasterize_png(svg, render_cfg, theme)?;
    write_atomically(output, &png)
}

/// Rasterizes an SVG document to PNG bytes at its own pixel size.
#[cfg(feature = "png")]
pub fn rasterize_png(svg: &str, render_cfg: &RenderConfig, theme: &Theme) -> Result<Vec<u8>, RenderError> {
    let db = fonts::system_database();
    check_fonts(&db, render_cfg, theme)?;

    let mut opt = usvg::Options::default();
    opt.font_family = fonts::primary_family(&theme.font_family);
    opt.fontdb = db;

    let tree = usvg::Tree::from_str(svg, &opt).map_err(|err| RenderError::Svg(err.to_string()))?;
    let size = tree.size().to_int_size();
    let mut pixmap = resvg::tiny_skia::Pixmap::new(size.width(), size.height()).ok_or(
        RenderError::Pixmap {
            width: size.width(),
            height: size.height(),
        },
    )?;

    let mut pixmap_mut = pixmap.as_mut();
    resvg::render(&tree, resvg::tiny_skia::Transform::default(), &mut pixmap_mut);
    pixmap
        .encode_png()
        .map_err(|err| RenderError::Encode(err.to_string()))
}

/// Errors under `strict_fonts` when no face is usable; otherwise warns that
/// text will be dropped and returns whether labels can be drawn.
pub fn check_fonts(
    db: &fontdb::Database,
    render_cfg: &RenderConfig,
    theme: &Theme,
) -> Result<bool, RenderError> {
    match fonts::ensure_font_available(db, &theme.font_family) {
        Ok(()) => Ok(true),
        Err(err) if render_cfg.strict_fonts => Err(err),
        Err(_) => {
            warn!(family = theme.font_family.as_str(); "No font face available, rendering without text");
            Ok(false)
        }
    }
}

/// Writes through a temporary file in the destination directory so a failed
/// write never leaves a partial file at `output`.
fn write_atomically(output: &Path, bytes: &[u8]) -> Result<(), RenderError> {
    let dir = match output.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut builder = tempfile::Builder::new();
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        // Same mode `File::create` would use; the umask still applies.
        builder.permissions(std::fs::Permissions::from_mode(0o666));
    }
    let mut file = builder
        .tempfile_in(dir)
        .map_err(|err| RenderError::io(output, err))?;
    file.write_all(bytes)
        .and_then(|()| file.flush())
        .map_err(|err| RenderError::io(output, err))?;
    file.persist(output)
        .map_err(|err| RenderError::io(output, err.error))?;
    debug!(path:? = output, bytes = bytes.len(); "Wrote output");
    Ok(())
}

fn escape_xml(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
