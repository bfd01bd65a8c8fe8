use fontdb::{Database, Family, ID, Query, Stretch, Style, Weight};
use log::{debug, warn};
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use ttf_parser::Face;

use crate::error::RenderError;

static SYSTEM_FONTS: Lazy<Arc<Database>> = Lazy::new(|| {
    let mut db = Database::new();
    db.load_system_fonts();
    debug!(faces = db.len(); "Loaded system fonts");
    Arc::new(db)
});

static TEXT_MEASURER: Lazy<Mutex<TextMeasurer>> = Lazy::new(|| Mutex::new(TextMeasurer::new()));

/// Shared system font database, loaded on first use.
pub fn system_database() -> Arc<Database> {
    Arc::clone(&SYSTEM_FONTS)
}

/// Fails when neither the requested family nor any generic fallback resolves to a face.
pub fn ensure_font_available(db: &Database, font_family: &str) -> Result<(), RenderError> {
    if resolve_face(db, font_family, false).is_some() {
        return Ok(());
    }
    Err(RenderError::MissingFont {
        family: font_family.to_string(),
    })
}

/// Advance width of `text` in pixels, or `None` when no face could be resolved.
pub fn measure_text_width(text: &str, font_size: f32, font_family: &str, bold: bool) -> Option<f32> {
    if text.is_empty() || font_size <= 0.0 {
        return Some(0.0);
    }
    let mut guard = TEXT_MEASURER.lock().ok()?;
    guard.measure(text, font_size, font_family, bold)
}

/// First named family in a CSS-style family list.
pub fn primary_family(font_family: &str) -> String {
    family_names(font_family)
        .first()
        .map_or_else(|| "sans-serif".to_string(), |name| name.to_string())
}

fn resolve_face(db: &Database, font_family: &str, bold: bool) -> Option<ID> {
    let names = family_names(font_family);
    let mut families: Vec<Family<'_>> = names.iter().map(|name| to_family(name)).collect();
    families.push(Family::SansSerif);

    let query = Query {
        families: &families,
        weight: if bold { Weight::BOLD } else { Weight::NORMAL },
        stretch: Stretch::Normal,
        style: Style::Normal,
    };
    if let Some(id) = db.query(&query) {
        return Some(id);
    }
    let fallback = db.faces().next()?;
    warn!(
        family = font_family,
        fallback = fallback.post_script_name.as_str();
        "Font family not found, falling back"
    );
    Some(fallback.id)
}

fn family_names(font_family: &str) -> Vec<&str> {
    font_family
        .split(',')
        .map(|part| part.trim().trim_matches('"').trim_matches('\''))
        .filter(|name| !name.is_empty())
        .collect()
}

fn to_family(name: &str) -> Family<'_> {
    match name.to_ascii_lowercase().as_str() {
        "serif" => Family::Serif,
        "sans-serif" | "system-ui" | "-apple-system" | "ui-sans-serif" => Family::SansSerif,
        "monospace" | "ui-monospace" => Family::Monospace,
        "cursive" => Family::Cursive,
        "fantasy" => Family::Fantasy,
        _ => Family::Name(name),
    }
}

struct TextMeasurer {
    db: Arc<Database>,
    cache: HashMap<(String, bool), Option<FontFace>>,
}

impl TextMeasurer {
    fn new() -> Self {
        Self {
            db: system_database(),
            cache: HashMap::new(),
        }
    }

    fn measure(&mut self, text: &str, font_size: f32, font_family: &str, bold: bool) -> Option<f32> {
        let key = (font_family.trim().to_string(), bold);
        if !self.cache.contains_key(&key) {
            let face = self.load_face(font_family, bold);
            self.cache.insert(key.clone(), face);
        }
        self.cache
            .get(&key)
            .and_then(|face| face.as_ref())?
            .measure_width(text, font_size)
    }

    fn load_face(&self, font_family: &str, bold: bool) -> Option<FontFace> {
        let id = resolve_face(&self.db, font_family, bold)?;
        self.db
            .with_face_data(id, |data, index| FontFace::new(data.to_vec(), index))
            .flatten()
    }
}

struct FontFace {
    data: Vec<u8>,
    index: u32,
    units_per_em: u16,
    ascii_advances: [u16; 128],
}

impl FontFace {
    fn new(data: Vec<u8>, index: u32) -> Option<Self> {
        let face = Face::parse(&data, index).ok()?;
        let units_per_em = face.units_per_em().max(1);
        let mut ascii_advances = [0u16; 128];
        for byte in 0u8..=127 {
            if let Some(glyph_id) = face.glyph_index(byte as char) {
                ascii_advances[byte as usize] = face.glyph_hor_advance(glyph_id).unwrap_or(0);
            }
        }
        Some(Self {
            data,
            index,
            units_per_em,
            ascii_advances,
        })
    }

    fn measure_width(&self, text: &str, font_size: f32) -> Option<f32> {
        let scale = font_size / self.units_per_em as f32;
        let fallback = font_size * 0.56;

        if text.is_ascii() {
            let width: f32 = text
                .bytes()
                .filter(|byte| *byte != b'\n')
                .map(|byte| match self.ascii_advances[byte as usize] {
                    0 => fallback,
                    advance => advance as f32 * scale,
                })
                .sum();
            return Some(width.max(0.0));
        }

        let face = Face::parse(&self.data, self.index).ok()?;
        let width: f32 = text
            .chars()
            .filter(|ch| *ch != '\n')
            .map(|ch| {
                face.glyph_index(ch)
                    .and_then(|glyph| face.glyph_hor_advance(glyph))
                    .map_or(fallback, |advance| advance as f32 * scale)
            })
            .sum();
        Some(width.max(0.0))
    }
}
