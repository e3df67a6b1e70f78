//! Font stack resolution and text measurement for the card snapshot.
//!
//! The on-screen card is laid out by the webview; the export snapshot has to
//! lay its own text out. We do not shape glyphs here. [`TextMeasure`] sums
//! per-character advances: natively they are read from the faces fontdb
//! resolves for the card's font stack, the same faces resvg draws with.
//! Web builds, and characters the resolved face has no glyph for, fall back
//! to an approximate advance table that is close enough for Latin and CJK
//! text. Vertical metrics follow the usual `1.28 × size` line height with a
//! `0.92 × size` ascender.
//!
//! Native builds also own the shared system font database, used both to
//! offer family names in the editor and to rasterize snapshots.

use std::fmt;
#[cfg(not(target_arch = "wasm32"))]
use std::sync::Arc;

/// Stack used when no font name is entered.
pub const FALLBACK_STACK: &str = "system-ui, Arial, sans-serif";

/// Families offered in the web font picker, where no font database exists.
#[cfg(target_arch = "wasm32")]
const WEB_FAMILIES: &[&str] = &[
    "Arial",
    "Georgia",
    "Helvetica",
    "Microsoft YaHei",
    "Noto Sans SC",
    "PingFang SC",
    "Segoe UI",
    "Times New Roman",
    "Trebuchet MS",
    "Verdana",
];

/// CSS `font-family` value for a user-entered name. Unknown names still
/// render because the fallback stack follows them.
pub fn font_stack(font_name: &str) -> String {
    let name = font_name.trim();
    if name.is_empty() {
        return FALLBACK_STACK.to_string();
    }
    let cleaned: String = name
        .chars()
        .filter(|c| !matches!(c, '"' | '\'' | ';' | '{' | '}' | '<' | '>'))
        .collect();
    if cleaned.trim().is_empty() {
        return FALLBACK_STACK.to_string();
    }
    format!("\"{}\", {FALLBACK_STACK}", cleaned.trim())
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FontWeight {
    Regular,
    Bold,
    ExtraBold,
}

impl FontWeight {
    pub const ALL: [FontWeight; 3] = [FontWeight::Regular, FontWeight::Bold, FontWeight::ExtraBold];

    #[cfg(not(target_arch = "wasm32"))]
    fn slot(self) -> usize {
        self as usize
    }

    pub fn css_value(self) -> u16 {
        match self {
            FontWeight::Regular => 400,
            FontWeight::Bold => 700,
            FontWeight::ExtraBold => 800,
        }
    }

    fn width_factor(self) -> f64 {
        match self {
            FontWeight::Regular => 1.0,
            FontWeight::Bold => 1.05,
            FontWeight::ExtraBold => 1.08,
        }
    }
}

impl fmt::Display for FontWeight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.css_value())
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextMetrics {
    /// Vertical distance between consecutive baselines.
    pub line_h: f64,
    /// Distance from the top of a line box to its baseline.
    pub asc: f64,
    pub desc: f64,
}

pub fn metrics(size_px: f64, line_height: Option<f64>) -> TextMetrics {
    let line_h = line_height.map_or((size_px * 1.28).round(), |ratio| size_px * ratio);
    let asc = (size_px * 0.92).round() + ((line_h - (size_px * 1.28).round()) / 2.0);
    let desc = (line_h - asc).max(size_px * 0.08);
    TextMetrics { line_h, asc, desc }
}

/// Approximate advance of one character in em units.
fn advance_em(c: char) -> f64 {
    match c {
        ' ' => 0.28,
        'i' | 'l' | 'j' | '.' | ',' | ':' | ';' | '\'' | '!' | '|' => 0.28,
        'f' | 't' | 'r' | 'I' => 0.36,
        'm' | 'w' => 0.82,
        'M' | 'W' => 0.88,
        '0'..='9' => 0.56,
        'a'..='z' => 0.52,
        'A'..='Z' => 0.64,
        c if is_wide(c) => 1.0,
        _ => 0.6,
    }
}

/// East Asian wide / fullwidth ranges, plus emoji.
fn is_wide(c: char) -> bool {
    matches!(c as u32,
        0x1100..=0x115F
        | 0x2E80..=0x303E
        | 0x3041..=0x33FF
        | 0x3400..=0x4DBF
        | 0x4E00..=0x9FFF
        | 0xA000..=0xA4CF
        | 0xAC00..=0xD7A3
        | 0xF900..=0xFAFF
        | 0xFE30..=0xFE4F
        | 0xFF00..=0xFF60
        | 0xFFE0..=0xFFE6
        | 0x1F300..=0x1F64F
        | 0x1F900..=0x1F9FF
        | 0x20000..=0x3FFFD)
}

fn approximate_advance(c: char, size_px: f64, weight: FontWeight) -> f64 {
    advance_em(c) * size_px * weight.width_factor()
}

/// A resolved face, copied out of the database so it can be parsed on demand.
#[cfg(not(target_arch = "wasm32"))]
struct LoadedFace {
    data: Vec<u8>,
    index: u32,
}

#[cfg(not(target_arch = "wasm32"))]
impl fmt::Debug for LoadedFace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoadedFace")
            .field("bytes", &self.data.len())
            .field("index", &self.index)
            .finish()
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl LoadedFace {
    fn read(db: &usvg::fontdb::Database, id: usvg::fontdb::ID) -> Option<Self> {
        let face = db.with_face_data(id, |data, index| {
            ttf_parser::Face::parse(data, index)
                .map(|_| LoadedFace {
                    data: data.to_vec(),
                    index,
                })
                .map_err(|err| tracing::debug!(%err, "font face unreadable; approximating widths"))
                .ok()
        });
        face.flatten()
    }

    fn parse(&self) -> Option<ttf_parser::Face<'_>> {
        ttf_parser::Face::parse(&self.data, self.index).ok()
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn glyph_advance(face: &ttf_parser::Face<'_>, c: char, size_px: f64) -> Option<f64> {
    let units = f64::from(face.units_per_em());
    if units <= 0.0 {
        return None;
    }
    let glyph = face.glyph_index(c)?;
    let advance = face.glyph_hor_advance(glyph)?;
    Some(f64::from(advance) / units * size_px)
}

/// Families of a CSS `font-family` value, in priority order.
#[cfg(not(target_arch = "wasm32"))]
fn stack_families(stack: &str) -> Vec<usvg::fontdb::Family<'_>> {
    use usvg::fontdb::Family;

    stack
        .split(',')
        .map(|name| name.trim().trim_matches('"').trim())
        .filter(|name| !name.is_empty())
        .map(|name| match name {
            "serif" => Family::Serif,
            "sans-serif" | "system-ui" => Family::SansSerif,
            "monospace" => Family::Monospace,
            "cursive" => Family::Cursive,
            "fantasy" => Family::Fantasy,
            name => Family::Name(name),
        })
        .collect()
}

/// Width measurement for snapshot text, one face per [`FontWeight`].
#[derive(Clone, Debug, Default)]
pub struct TextMeasure {
    #[cfg(not(target_arch = "wasm32"))]
    faces: [Option<Arc<LoadedFace>>; 3],
}

impl TextMeasure {
    /// Advance table only.
    pub fn approximate() -> Self {
        Self::default()
    }

    /// Measurement for `stack` against the system fonts, cached per stack.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn for_stack(stack: &str) -> Self {
        use once_cell::sync::Lazy;
        use std::collections::HashMap;
        use std::sync::{Mutex, PoisonError};

        static MEASURES: Lazy<Mutex<HashMap<String, TextMeasure>>> = Lazy::new(Default::default);

        let mut cache = MEASURES.lock().unwrap_or_else(PoisonError::into_inner);
        cache
            .entry(stack.to_string())
            .or_insert_with(|| TextMeasure::from_database(&system_fonts(), stack))
            .clone()
    }

    #[cfg(target_arch = "wasm32")]
    pub fn for_stack(_stack: &str) -> Self {
        Self::approximate()
    }

    /// Resolve the faces `db` would render `stack` with.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn from_database(db: &usvg::fontdb::Database, stack: &str) -> Self {
        use usvg::fontdb::{Query, Stretch, Style, Weight};

        let families = stack_families(stack);
        let mut loaded: Vec<(usvg::fontdb::ID, Arc<LoadedFace>)> = Vec::new();
        let mut faces: [Option<Arc<LoadedFace>>; 3] = Default::default();

        for weight in FontWeight::ALL {
            let query = Query {
                families: &families,
                weight: Weight(weight.css_value()),
                stretch: Stretch::Normal,
                style: Style::Normal,
            };
            let Some(id) = db.query(&query) else {
                continue;
            };
            faces[weight.slot()] = match loaded.iter().find(|(known, _)| *known == id) {
                Some((_, face)) => Some(face.clone()),
                None => LoadedFace::read(db, id).map(|face| {
                    let face = Arc::new(face);
                    loaded.push((id, face.clone()));
                    face
                }),
            };
        }

        tracing::debug!(stack, resolved = loaded.len(), "text measurement faces resolved");
        Self { faces }
    }

    /// Whether widths at `weight` come from a real face.
    pub fn has_face(&self, weight: FontWeight) -> bool {
        #[cfg(not(target_arch = "wasm32"))]
        {
            self.faces[weight.slot()].is_some()
        }
        #[cfg(target_arch = "wasm32")]
        {
            let _ = weight;
            false
        }
    }

    pub fn text_width(&self, text: &str, size_px: f64, weight: FontWeight) -> f64 {
        #[cfg(not(target_arch = "wasm32"))]
        if let Some(face) = self.faces[weight.slot()].as_deref().and_then(LoadedFace::parse) {
            return text
                .chars()
                .map(|c| {
                    glyph_advance(&face, c, size_px)
                        .unwrap_or_else(|| approximate_advance(c, size_px, weight))
                })
                .sum();
        }
        text.chars()
            .map(|c| approximate_advance(c, size_px, weight))
            .sum()
    }

    /// Greedy wrap of a single logical line (no `\n`) into `max_width`.
    /// Breaks at spaces, between wide characters, and inside words that are
    /// longer than a whole line.
    pub fn wrap_line(&self, line: &str, size_px: f64, weight: FontWeight, max_width: f64) -> Vec<String> {
        if line.is_empty() {
            return vec![String::new()];
        }

        let mut lines = Vec::new();
        let mut current = String::new();
        let mut current_w = 0.0;

        for token in tokens(line) {
            let token_w = self.text_width(token, size_px, weight);
            if current_w + token_w <= max_width {
                current.push_str(token);
                current_w += token_w;
                continue;
            }

            if !current.is_empty() {
                lines.push(current.trim_end().to_string());
                current = String::new();
                current_w = 0.0;
            }

            let token = token.trim_start_matches(' ');
            if token.is_empty() {
                continue;
            }
            let token_w = self.text_width(token, size_px, weight);
            if token_w <= max_width {
                current.push_str(token);
                current_w = token_w;
                continue;
            }

            // A single word wider than the line: hard break by character.
            let mut buf = [0; 4];
            for c in token.chars() {
                let w = self.text_width(c.encode_utf8(&mut buf), size_px, weight);
                if current_w + w > max_width && !current.is_empty() {
                    lines.push(std::mem::take(&mut current));
                    current_w = 0.0;
                }
                current.push(c);
                current_w += w;
            }
        }

        if !current.is_empty() || lines.is_empty() {
            lines.push(current.trim_end().to_string());
        }
        lines
    }
}

/// Split into break opportunities: each wide char stands alone, runs of
/// other characters keep their leading spaces.
fn tokens(line: &str) -> Vec<&str> {
    let mut out = Vec::new();
    let mut start = 0;
    let mut in_word = false;
    for (idx, c) in line.char_indices() {
        if is_wide(c) {
            if start < idx {
                out.push(&line[start..idx]);
            }
            out.push(&line[idx..idx + c.len_utf8()]);
            start = idx + c.len_utf8();
            in_word = false;
        } else if c == ' ' {
            if in_word {
                out.push(&line[start..idx]);
                start = idx;
                in_word = false;
            }
        } else {
            in_word = true;
        }
    }
    if start < line.len() {
        out.push(&line[start..]);
    }
    out
}

/// Family names the editor can offer.
#[cfg(not(target_arch = "wasm32"))]
pub fn available_families() -> Vec<String> {
    let mut names: Vec<String> = system_fonts()
        .faces()
        .flat_map(|face| face.families.iter().map(|(name, _)| name.clone()))
        .collect();
    names.sort_by_key(|name| name.to_lowercase());
    names.dedup();
    names
}

#[cfg(target_arch = "wasm32")]
pub fn available_families() -> Vec<String> {
    WEB_FAMILIES.iter().map(|name| name.to_string()).collect()
}

/// Lazily loaded system font database shared by the picker and the rasterizer.
#[cfg(not(target_arch = "wasm32"))]
pub(crate) fn system_fonts() -> std::sync::Arc<usvg::fontdb::Database> {
    use once_cell::sync::Lazy;
    use std::sync::Arc;

    static FONTS: Lazy<Arc<usvg::fontdb::Database>> = Lazy::new(|| {
        let mut db = usvg::fontdb::Database::new();
        db.load_system_fonts();
        db.set_sans_serif_family("Arial");
        tracing::debug!(faces = db.len(), "system font database loaded");
        Arc::new(db)
    });

    FONTS.clone()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_font_name_uses_fallback_stack() {
        assert_eq!(font_stack(""), FALLBACK_STACK);
        assert_eq!(font_stack("   "), FALLBACK_STACK);
        assert_eq!(font_stack("\"\""), FALLBACK_STACK);
    }

    #[test]
    fn named_font_is_quoted_ahead_of_fallback() {
        assert_eq!(
            font_stack(" Noto Sans SC "),
            "\"Noto Sans SC\", system-ui, Arial, sans-serif"
        );
        assert_eq!(
            font_stack("Evil\"; } body {"),
            "\"Evil  body\", system-ui, Arial, sans-serif"
        );
    }

    #[test]
    fn metrics_increase_with_size() {
        let small = metrics(12.0, None);
        let large = metrics(48.0, None);
        assert!(large.line_h > small.line_h);
        assert!(large.asc > small.asc);
    }

    #[test]
    fn explicit_line_height_is_respected() {
        let m = metrics(17.0, Some(1.7));
        assert!((m.line_h - 28.9).abs() < 1e-9);
        assert!(m.asc > 0.0 && m.asc < m.line_h);
    }

    #[test]
    fn wide_text_is_wider_than_latin() {
        let measure = TextMeasure::approximate();
        assert!(
            measure.text_width("战力", 16.0, FontWeight::Regular)
                > measure.text_width("ab", 16.0, FontWeight::Regular)
        );
    }

    #[test]
    fn wrap_keeps_short_lines_intact() {
        let measure = TextMeasure::approximate();
        assert_eq!(measure.wrap_line("Short line", 16.0, FontWeight::Regular, 500.0), vec!["Short line"]);
        assert_eq!(measure.wrap_line("", 16.0, FontWeight::Regular, 500.0), vec![""]);
    }

    #[test]
    fn wrap_breaks_at_spaces() {
        let lines = TextMeasure::approximate().wrap_line("alpha beta gamma delta", 10.0, FontWeight::Regular, 60.0);
        assert!(lines.len() > 1);
        assert_eq!(lines.join(" "), "alpha beta gamma delta");
        for line in &lines {
            assert!(!line.starts_with(' '));
        }
    }

    #[test]
    fn wrap_breaks_between_cjk_characters() {
        let lines = TextMeasure::approximate().wrap_line("一二三四五六七八九十", 10.0, FontWeight::Regular, 35.0);
        assert_eq!(lines.concat(), "一二三四五六七八九十");
        assert!(lines.iter().all(|l| l.chars().count() <= 3));
    }

    #[test]
    fn wrap_hard_breaks_overlong_words() {
        let lines = TextMeasure::approximate().wrap_line("aaaaaaaaaaaaaaaaaaaa", 10.0, FontWeight::Regular, 30.0);
        assert!(lines.len() > 1);
        assert_eq!(lines.concat(), "aaaaaaaaaaaaaaaaaaaa");
    }

    #[cfg(not(target_arch = "wasm32"))]
    mod with_faces {
        use super::*;

        const TUFFY: &[u8] = include_bytes!("../../tests/fonts/Tuffy.ttf");

        fn tuffy_db() -> usvg::fontdb::Database {
            let mut db = usvg::fontdb::Database::new();
            db.load_font_data(TUFFY.to_vec());
            db
        }

        fn face_width(text: &str, size_px: f64) -> f64 {
            let face = ttf_parser::Face::parse(TUFFY, 0).expect("fixture parses");
            text.chars()
                .map(|c| glyph_advance(&face, c, size_px).expect("glyph present"))
                .sum()
        }

        #[test]
        fn widths_come_from_the_resolved_face() {
            let measure = TextMeasure::from_database(&tuffy_db(), &font_stack("Tuffy"));
            assert!(measure.has_face(FontWeight::Regular));
            assert!(measure.has_face(FontWeight::ExtraBold));

            let measured = measure.text_width("Wild mountain", 16.0, FontWeight::Regular);
            assert!((measured - face_width("Wild mountain", 16.0)).abs() < 1e-9);
            let approx = TextMeasure::approximate().text_width("Wild mountain", 16.0, FontWeight::Regular);
            assert!((measured - approx).abs() > 1e-6);
        }

        #[test]
        fn wrap_uses_face_advances() {
            let measure = TextMeasure::from_database(&tuffy_db(), &font_stack("Tuffy"));
            let fits = face_width("alpha beta", 16.0) + 0.01;
            let lines = measure.wrap_line("alpha beta gamma", 16.0, FontWeight::Regular, fits);
            assert_eq!(lines, vec!["alpha beta", "gamma"]);
        }

        #[test]
        fn missing_glyphs_fall_back_to_the_table() {
            let measure = TextMeasure::from_database(&tuffy_db(), &font_stack("Tuffy"));
            assert_eq!(measure.text_width("战", 16.0, FontWeight::Regular), 16.0);
        }

        #[test]
        fn unknown_family_without_fallback_face_approximates() {
            let measure = TextMeasure::from_database(&usvg::fontdb::Database::new(), &font_stack("Nope"));
            assert!(!measure.has_face(FontWeight::Regular));
            assert_eq!(
                measure.text_width("abc", 10.0, FontWeight::Regular),
                TextMeasure::approximate().text_width("abc", 10.0, FontWeight::Regular)
            );
        }

        #[test]
        fn generic_families_map_to_fontdb() {
            use usvg::fontdb::Family;
            assert_eq!(
                stack_families(FALLBACK_STACK),
                vec![Family::SansSerif, Family::Name("Arial"), Family::SansSerif]
            );
            assert_eq!(stack_families("\"Noto Sans SC\", serif")[0], Family::Name("Noto Sans SC"));
        }
    }
}
