//! Standalone SVG rendering of a [`ProfileSurface`].
//!
//! The export pipeline cannot hand the live DOM to a rasterizer, so the card
//! is laid out a second time here with the same box model the stylesheet
//! uses. [`CardSnapshot::layout`] computes the natural size; [`CardSnapshot::to_svg`]
//! wraps it into a document sized to whatever box was measured on screen.

use std::fmt::Write as _;

use crate::chart::svg::radar_group;
use crate::core::format::{escape_xml, format_coord, pre_line, pre_wrap};
use crate::core::geometry::LayoutBox;
use crate::profile::fonts::{metrics, FontWeight, TextMeasure};
use crate::profile::surface::{AvatarRegion, ProfileSurface, SkillsRegion};

pub const CARD_WIDTH: f64 = 940.0;
const PADDING: f64 = 20.0;
const CONTENT_WIDTH: f64 = CARD_WIDTH - 2.0 * PADDING;
const CARD_RADIUS: f64 = 16.0;

const IDENTITY_WIDTH: f64 = 220.0;
const AVATAR_SIZE: f64 = 180.0;
const COLUMN_GAP: f64 = 20.0;

const PANEL_PADDING: f64 = 14.0;
const PANEL_RADIUS: f64 = 12.0;
const PANEL_INNER: f64 = CONTENT_WIDTH - 2.0 * PANEL_PADDING;

const ACCENT: &str = "#FFB86B";
const MUTED: &str = "#d0d7e8";
const WHITE: &str = "#fff";
const SPECIAL: &str = "#FF4C4C";

#[derive(Debug, Clone, PartialEq)]
pub struct CardSnapshot {
    pub width: f64,
    pub height: f64,
    font_family: String,
    body: String,
}

impl CardSnapshot {
    /// Lay the card out with the fonts its stack resolves to on this platform.
    pub fn layout(surface: &ProfileSurface) -> Self {
        Self::layout_with(surface, &TextMeasure::for_stack(&surface.font_family))
    }

    pub fn layout_with(surface: &ProfileSurface, measure: &TextMeasure) -> Self {
        let mut body = String::new();
        let mut y = PADDING;

        y = write_top_row(&mut body, surface, measure, y);
        y += 20.0;
        y = write_skills(&mut body, &surface.skills, measure, y);
        y += 16.0;
        y = write_bio(&mut body, surface, measure, y);
        y += 18.0;
        y = write_footer(&mut body, &surface.footer.caption, measure, y);

        Self {
            width: CARD_WIDTH,
            height: y + PADDING,
            font_family: surface.font_family.clone(),
            body,
        }
    }

    pub fn natural_box(&self) -> LayoutBox {
        LayoutBox::new(self.width, self.height)
    }

    /// Complete SVG document rendered into `frame`. The card keeps its
    /// proportions and is anchored to the top of the frame.
    pub fn to_svg(&self, frame: LayoutBox, background: Option<&str>) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            r#"<svg xmlns="http://www.w3.org/2000/svg" xmlns:xlink="http://www.w3.org/1999/xlink" width="{}" height="{}" viewBox="0 0 {} {}" preserveAspectRatio="xMidYMin meet">"#,
            format_coord(frame.width),
            format_coord(frame.height),
            format_coord(self.width),
            format_coord(self.height)
        );
        let _ = writeln!(
            out,
            r##"<defs><linearGradient id="card-bg" x1="0" y1="0" x2="0" y2="1"><stop offset="0%" stop-color="#070617"/><stop offset="100%" stop-color="#0b1120"/></linearGradient><clipPath id="avatar-clip"><rect x="{}" y="{}" width="{AVATAR_SIZE}" height="{AVATAR_SIZE}" rx="16"/></clipPath></defs>"##,
            format_coord(avatar_x()),
            format_coord(PADDING)
        );
        if let Some(fill) = background {
            let _ = writeln!(
                out,
                r#"<rect width="{}" height="{}" fill="{}"/>"#,
                format_coord(self.width),
                format_coord(self.height),
                escape_xml(fill)
            );
        }
        let _ = writeln!(
            out,
            r#"<rect width="{}" height="{}" rx="{CARD_RADIUS}" fill="url(#card-bg)"/>"#,
            format_coord(self.width),
            format_coord(self.height)
        );
        let _ = writeln!(
            out,
            r#"<g font-family="{}">"#,
            escape_xml(&self.font_family)
        );
        out.push_str(&self.body);
        out.push_str("</g>\n</svg>\n");
        out
    }
}

fn avatar_x() -> f64 {
    PADDING + (IDENTITY_WIDTH - AVATAR_SIZE) / 2.0
}

struct TextStyle<'a> {
    size: f64,
    weight: FontWeight,
    fill: &'a str,
    anchor: &'a str,
    line_height: Option<f64>,
    preserve: bool,
}

impl<'a> TextStyle<'a> {
    fn new(size: f64, fill: &'a str) -> Self {
        Self {
            size,
            weight: FontWeight::Regular,
            fill,
            anchor: "start",
            line_height: None,
            preserve: false,
        }
    }

    fn weight(mut self, weight: FontWeight) -> Self {
        self.weight = weight;
        self
    }

    fn anchor(mut self, anchor: &'a str) -> Self {
        self.anchor = anchor;
        self
    }

    fn line_height(mut self, ratio: f64) -> Self {
        self.line_height = Some(ratio);
        self
    }

    fn preserve(mut self) -> Self {
        self.preserve = true;
        self
    }
}

/// Emit already-wrapped lines starting at line box top `y`; returns the
/// bottom of the last line box.
fn write_lines(out: &mut String, lines: &[String], x: f64, y: f64, style: &TextStyle<'_>) -> f64 {
    let m = metrics(style.size, style.line_height);
    let space = if style.preserve {
        r#" xml:space="preserve""#
    } else {
        ""
    };
    for (i, line) in lines.iter().enumerate() {
        if line.is_empty() {
            continue;
        }
        let baseline = y + i as f64 * m.line_h + m.asc;
        let _ = writeln!(
            out,
            r#"<text x="{}" y="{}" font-size="{}" font-weight="{}" fill="{}" text-anchor="{}"{space}>{}</text>"#,
            format_coord(x),
            format_coord(baseline),
            format_coord(style.size),
            style.weight,
            style.fill,
            style.anchor,
            escape_xml(line)
        );
    }
    y + lines.len() as f64 * m.line_h
}

fn wrap_all(
    logical: &[String],
    style: &TextStyle<'_>,
    measure: &TextMeasure,
    max_width: f64,
) -> Vec<String> {
    logical
        .iter()
        .flat_map(|line| measure.wrap_line(line, style.size, style.weight, max_width))
        .collect()
}

fn write_top_row(out: &mut String, surface: &ProfileSurface, measure: &TextMeasure, top: f64) -> f64 {
    let ax = avatar_x();
    let _ = writeln!(
        out,
        r##"<rect x="{}" y="{}" width="{AVATAR_SIZE}" height="{AVATAR_SIZE}" rx="16" fill="#0a0a0f" stroke="rgba(255,165,0,0.08)" stroke-width="2"/>"##,
        format_coord(ax),
        format_coord(top)
    );
    match &surface.avatar {
        AvatarRegion::Image { data_url } => {
            let _ = writeln!(
                out,
                r#"<image x="{}" y="{}" width="{AVATAR_SIZE}" height="{AVATAR_SIZE}" preserveAspectRatio="xMidYMid slice" clip-path="url(#avatar-clip)" xlink:href="{}"/>"#,
                format_coord(ax),
                format_coord(top),
                escape_xml(data_url)
            );
        }
        AvatarRegion::Placeholder { message } => {
            let style = TextStyle::new(16.0, "#9aa7ff").anchor("middle");
            let lines = wrap_all(&[message.to_string()], &style, measure, AVATAR_SIZE - 24.0);
            let block_h = lines.len() as f64 * metrics(style.size, None).line_h;
            let y = top + (AVATAR_SIZE - block_h) / 2.0;
            write_lines(out, &lines, ax + AVATAR_SIZE / 2.0, y, &style);
        }
    }

    let center_x = PADDING + IDENTITY_WIDTH / 2.0;
    let mut y = top + AVATAR_SIZE + 12.0;

    let name_style = TextStyle::new(24.0, ACCENT)
        .weight(FontWeight::ExtraBold)
        .anchor("middle");
    let name_lines = wrap_all(
        &pre_line(&surface.identity.nickname.text),
        &name_style,
        measure,
        IDENTITY_WIDTH,
    );
    y = write_lines(out, &name_lines, center_x, y, &name_style);

    y += 6.0;
    let detail_style = TextStyle::new(14.0, MUTED).anchor("middle");
    for (label, value) in [
        ("Likes", &surface.identity.likes.text),
        ("Dislikes", &surface.identity.dislikes.text),
    ] {
        let lines = wrap_all(
            &pre_line(&format!("{label}: {value}")),
            &detail_style,
            measure,
            IDENTITY_WIDTH,
        );
        y = write_lines(out, &lines, center_x, y, &detail_style);
    }

    let chart_x = PADDING + IDENTITY_WIDTH + COLUMN_GAP;
    out.push_str(&radar_group(
        &surface.chart,
        chart_x,
        top,
        &surface.font_family,
    ));

    y.max(top + surface.chart.height)
}

fn write_panel_frame(out: &mut String, top: f64, height: f64, fill: &str) {
    let _ = writeln!(
        out,
        r#"<rect x="{}" y="{}" width="{}" height="{}" rx="{PANEL_RADIUS}" fill="{fill}" stroke="rgba(255,165,0,0.06)" stroke-width="1"/>"#,
        format_coord(PADDING),
        format_coord(top),
        format_coord(CONTENT_WIDTH),
        format_coord(height)
    );
}

/// Writes panel content into a scratch buffer first so the frame can be
/// sized to it and painted underneath.
fn write_panel(
    out: &mut String,
    top: f64,
    fill: &str,
    title: &str,
    title_weight: FontWeight,
    content: impl FnOnce(&mut String, f64) -> f64,
) -> f64 {
    let mut inner = String::new();
    let x = PADDING + PANEL_PADDING;
    let title_style = TextStyle::new(20.0, ACCENT).weight(title_weight);
    let mut y = write_lines(&mut inner, &[title.to_string()], x, top + PANEL_PADDING, &title_style);
    y += 8.0;
    y = content(&mut inner, y);
    let bottom = y + PANEL_PADDING;

    write_panel_frame(out, top, bottom - top, fill);
    out.push_str(&inner);
    bottom
}

fn write_skills(out: &mut String, skills: &SkillsRegion, measure: &TextMeasure, top: f64) -> f64 {
    write_panel(out, top, "rgba(0,0,0,0.25)", "Skills", FontWeight::ExtraBold, |buf, mut y| {
        let x = PADDING + PANEL_PADDING;
        match skills {
            SkillsRegion::Placeholder { message } => {
                let style = TextStyle::new(17.0, "#b7c0d9").line_height(1.7);
                write_lines(buf, &[message.to_string()], x, y, &style)
            }
            SkillsRegion::Lines(lines) => {
                let style = TextStyle::new(17.0, WHITE)
                    .weight(FontWeight::Bold)
                    .line_height(1.7);
                let m = metrics(style.size, style.line_height);
                for (idx, skill) in lines.iter().enumerate() {
                    if idx > 0 {
                        y += 6.0;
                    }
                    let mut logical = pre_line(&skill.text);
                    if let Some(first) = logical.first_mut() {
                        *first = format!("{} {}", skill.label, first);
                    }
                    let wrapped = wrap_all(&logical, &style, measure, PANEL_INNER);

                    // First row: coloured label, then the rest of the row.
                    let label_fill = if skill.emphasized { SPECIAL } else { WHITE };
                    let first_row = wrapped.first().cloned().unwrap_or_default();
                    let rest = first_row
                        .strip_prefix(skill.label)
                        .unwrap_or(first_row.as_str())
                        .to_string();
                    let label_w = measure.text_width(skill.label, style.size, FontWeight::ExtraBold);
                    let baseline = y + m.asc;
                    let _ = writeln!(
                        buf,
                        r#"<text x="{}" y="{}" font-size="17" font-weight="800" fill="{label_fill}">{}</text>"#,
                        format_coord(x),
                        format_coord(baseline),
                        escape_xml(skill.label)
                    );
                    if !rest.trim().is_empty() {
                        let _ = writeln!(
                            buf,
                            r#"<text x="{}" y="{}" font-size="17" font-weight="700" fill="{WHITE}" xml:space="preserve">{}</text>"#,
                            format_coord(x + label_w),
                            format_coord(baseline),
                            escape_xml(&rest)
                        );
                    }
                    y += m.line_h;
                    if wrapped.len() > 1 {
                        y = write_lines(buf, &wrapped[1..], x, y, &style);
                    }
                }
                y
            }
        }
    })
}

fn write_bio(out: &mut String, surface: &ProfileSurface, measure: &TextMeasure, top: f64) -> f64 {
    write_panel(out, top, "rgba(255,165,0,0.04)", "Bio", FontWeight::Bold, |buf, y| {
        let x = PADDING + PANEL_PADDING;
        let style = TextStyle::new(16.0, WHITE).preserve();
        let lines = wrap_all(&pre_wrap(&surface.bio.body.text), &style, measure, PANEL_INNER);
        write_lines(buf, &lines, x, y, &style)
    })
}

fn write_footer(out: &mut String, caption: &str, measure: &TextMeasure, top: f64) -> f64 {
    let style = TextStyle::new(13.0, "#c9d2ff").anchor("end");
    let lines = wrap_all(&pre_line(caption), &style, measure, CONTENT_WIDTH);
    let mut inner = String::new();
    let bottom = write_lines(&mut inner, &lines, PADDING + CONTENT_WIDTH, top, &style);
    let _ = write!(out, r#"<g opacity="0.9">{inner}</g>"#);
    out.push('\n');
    bottom
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::attributes::{AttributeRecord, AvatarImage, SkillSlot};

    fn snapshot(record: &AttributeRecord) -> CardSnapshot {
        CardSnapshot::layout_with(&ProfileSurface::from_record(record), &TextMeasure::approximate())
    }

    #[test]
    fn empty_record_has_natural_card_size() {
        let snap = snapshot(&AttributeRecord::new());
        assert_eq!(snap.width, CARD_WIDTH);
        assert!(snap.height > 320.0 + 2.0 * PADDING);
    }

    #[test]
    fn document_is_sized_to_the_frame() {
        let snap = snapshot(&AttributeRecord::new());
        let svg = snap.to_svg(LayoutBox::new(470.0, snap.height / 2.0), None);
        assert!(svg.starts_with("<svg "));
        assert!(svg.contains(r#"width="470""#));
        assert!(svg.contains(&format!(r#"viewBox="0 0 940 {}""#, format_coord(snap.height))));
        assert!(svg.trim_end().ends_with("</svg>"));
    }

    #[test]
    fn transparent_unless_background_given() {
        let snap = snapshot(&AttributeRecord::new());
        let frame = snap.natural_box();
        assert!(!snap.to_svg(frame, None).contains("fill=\"#123456\""));
        assert!(snap.to_svg(frame, Some("#123456")).contains("fill=\"#123456\""));
    }

    #[test]
    fn placeholders_appear_in_markup() {
        let svg = snapshot(&AttributeRecord::new()).to_svg(LayoutBox::new(940.0, 900.0), None);
        assert!(svg.contains(">Hero name</text>"));
        assert!(svg.contains(">No avatar uploaded</text>"));
        assert!(svg.contains(">No skills yet</text>"));
        assert!(svg.contains(">No bio yet</text>"));
        assert!(svg.contains("auto-generated</text>"));
    }

    #[test]
    fn multi_line_skills_keep_their_breaks() {
        let mut record = AttributeRecord::new();
        record.skills.set(SkillSlot::First, "Flame\nBurns everything");
        record.skills.set(SkillSlot::Special, "Phoenix");
        let svg = snapshot(&record).to_svg(LayoutBox::new(940.0, 900.0), None);
        assert!(svg.contains(">Skill 1:</text>"));
        assert!(svg.contains("> Flame</text>"));
        assert!(svg.contains(">Burns everything</text>"));
        assert!(svg.contains(&format!("fill=\"{SPECIAL}\">Special:</text>")));
        assert!(!svg.contains("No skills yet"));
    }

    #[test]
    fn longer_bio_makes_taller_card() {
        let short = snapshot(&AttributeRecord::new());
        let mut record = AttributeRecord::new();
        record.bio = "line\n".repeat(10);
        let tall = snapshot(&record);
        assert!(tall.height > short.height);
    }

    #[test]
    fn avatar_is_embedded_and_clipped() {
        let mut record = AttributeRecord::new();
        record.avatar = AvatarImage::from_file_bytes(b"\x89PNG\r\n\x1a\nrest");
        let svg = snapshot(&record).to_svg(LayoutBox::new(940.0, 900.0), None);
        assert!(svg.contains("xlink:href=\"data:image/png;base64,"));
        assert!(svg.contains("clip-path=\"url(#avatar-clip)\""));
        assert!(!svg.contains("No avatar uploaded"));
    }

    #[test]
    fn user_text_is_escaped() {
        let mut record = AttributeRecord::new();
        record.nickname = "<Zed & Co>".into();
        let svg = snapshot(&record).to_svg(LayoutBox::new(940.0, 900.0), None);
        assert!(svg.contains("&lt;Zed &amp; Co&gt;"));
        assert!(!svg.contains("<Zed"));
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn bio_wraps_by_the_measured_face() {
        const TUFFY: &[u8] = include_bytes!("../../tests/fonts/Tuffy.ttf");
        let mut db = usvg::fontdb::Database::new();
        db.load_font_data(TUFFY.to_vec());

        let mut record = AttributeRecord::new();
        record.font_name = "Tuffy".into();
        // Narrow glyphs: 22 words a line in Tuffy, 17 by the table.
        record.bio = "iiiiiiiiii ".repeat(40);
        let surface = ProfileSurface::from_record(&record);

        let measured = CardSnapshot::layout_with(&surface, &TextMeasure::from_database(&db, &surface.font_family));
        let approximated = CardSnapshot::layout_with(&surface, &TextMeasure::approximate());
        let line_h = metrics(16.0, None).line_h;
        assert!((approximated.height - measured.height - line_h).abs() < 1e-9);
    }
}
