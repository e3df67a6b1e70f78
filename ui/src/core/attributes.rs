//! The attribute record: everything a user types or picks for one profile.
//!
//! Values are coerced at the moment of mutation so that every reader (the
//! preview, the radar builder, the export snapshot) can trust what it sees.

use base64::Engine as _;

/// Number of stats / radar axes.
pub const STAT_COUNT: usize = 6;

/// Value a stat takes in a fresh record.
pub const DEFAULT_STAT: u8 = 60;

/// Fixed semantic labels, positionally paired with [`Stats`].
pub const STAT_LABELS: [&str; STAT_COUNT] = [
    "Intellect",
    "Network",
    "Physique",
    "Technique",
    "Attack",
    "Defense",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatKind {
    Intellect,
    Network,
    Physique,
    Technique,
    Attack,
    Defense,
}

impl StatKind {
    /// Axis order; index 0 is the vertical axis of the radar.
    pub const ALL: [StatKind; STAT_COUNT] = [
        StatKind::Intellect,
        StatKind::Network,
        StatKind::Physique,
        StatKind::Technique,
        StatKind::Attack,
        StatKind::Defense,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn label(self) -> &'static str {
        STAT_LABELS[self.index()]
    }
}

/// Six stats, each stored as an integer in `0..=100`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stats([u8; STAT_COUNT]);

impl Default for Stats {
    fn default() -> Self {
        Self([DEFAULT_STAT; STAT_COUNT])
    }
}

impl Stats {
    /// Build from raw numbers, coercing each one.
    pub fn new(values: [f64; STAT_COUNT]) -> Self {
        Self(values.map(coerce_stat))
    }

    pub fn get(&self, kind: StatKind) -> u8 {
        self.0[kind.index()]
    }

    pub fn values(&self) -> [u8; STAT_COUNT] {
        self.0
    }

    pub fn as_f64(&self) -> [f64; STAT_COUNT] {
        self.0.map(f64::from)
    }

    /// Store `value` clamped to `[0, 100]` and rounded; returns the stored value.
    pub fn set(&mut self, kind: StatKind, value: f64) -> u8 {
        let stored = coerce_stat(value);
        self.0[kind.index()] = stored;
        stored
    }

    /// Same as [`Stats::set`] for raw text from a number input.
    /// Empty or non-numeric text stores 0.
    pub fn set_from_input(&mut self, kind: StatKind, raw: &str) -> u8 {
        self.set(kind, parse_stat_input(raw))
    }
}

fn parse_stat_input(raw: &str) -> f64 {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return 0.0;
    }
    trimmed.parse::<f64>().unwrap_or(0.0)
}

/// NaN → 0, otherwise clamp to `[0, 100]` and round half away from zero.
pub fn coerce_stat(value: f64) -> u8 {
    if value.is_nan() {
        return 0;
    }
    value.clamp(0.0, 100.0).round() as u8
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SkillSlot {
    First,
    Second,
    Ultimate,
    Special,
}

impl SkillSlot {
    pub const ALL: [SkillSlot; 4] = [
        SkillSlot::First,
        SkillSlot::Second,
        SkillSlot::Ultimate,
        SkillSlot::Special,
    ];

    pub fn label(self) -> &'static str {
        match self {
            SkillSlot::First => "Skill 1:",
            SkillSlot::Second => "Skill 2:",
            SkillSlot::Ultimate => "Ultimate:",
            SkillSlot::Special => "Special:",
        }
    }

    pub fn input_placeholder(self) -> &'static str {
        match self {
            SkillSlot::First => "First skill (title + description)",
            SkillSlot::Second => "Second skill (title + description)",
            SkillSlot::Ultimate => "Ultimate (title + description)",
            SkillSlot::Special => "Special skill (hidden when empty)",
        }
    }

    /// Only the special slot carries the highlight colour.
    pub fn is_emphasized(self) -> bool {
        matches!(self, SkillSlot::Special)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Skills {
    pub first: String,
    pub second: String,
    pub ultimate: String,
    pub special: String,
}

impl Skills {
    pub fn get(&self, slot: SkillSlot) -> &str {
        match slot {
            SkillSlot::First => &self.first,
            SkillSlot::Second => &self.second,
            SkillSlot::Ultimate => &self.ultimate,
            SkillSlot::Special => &self.special,
        }
    }

    pub fn set(&mut self, slot: SkillSlot, text: impl Into<String>) {
        let text = text.into();
        match slot {
            SkillSlot::First => self.first = text,
            SkillSlot::Second => self.second = text,
            SkillSlot::Ultimate => self.ultimate = text,
            SkillSlot::Special => self.special = text,
        }
    }

    /// Non-empty slots in display order.
    pub fn filled(&self) -> impl Iterator<Item = (SkillSlot, &str)> + '_ {
        SkillSlot::ALL
            .into_iter()
            .map(|slot| (slot, self.get(slot)))
            .filter(|(_, text)| !text.is_empty())
    }

    pub fn is_empty(&self) -> bool {
        self.filled().next().is_none()
    }
}

/// A decoded, embeddable avatar image (a `data:` URL).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvatarImage {
    mime: &'static str,
    data_url: String,
}

impl AvatarImage {
    /// Accepts the raw bytes of a user-selected file. Returns `None` when the
    /// bytes are not a recognisable image; callers keep the previous avatar.
    pub fn from_file_bytes(bytes: &[u8]) -> Option<Self> {
        let mime = sniff_image_mime(bytes)?;
        let encoded = base64::engine::general_purpose::STANDARD.encode(bytes);
        Some(Self {
            mime,
            data_url: format!("data:{mime};base64,{encoded}"),
        })
    }

    pub fn mime(&self) -> &'static str {
        self.mime
    }

    pub fn data_url(&self) -> &str {
        &self.data_url
    }
}

fn sniff_image_mime(bytes: &[u8]) -> Option<&'static str> {
    const PNG: &[u8] = b"\x89PNG\r\n\x1a\n";
    match bytes {
        b if b.starts_with(PNG) => Some("image/png"),
        [0xFF, 0xD8, 0xFF, ..] => Some("image/jpeg"),
        b if b.starts_with(b"GIF87a") || b.starts_with(b"GIF89a") => Some("image/gif"),
        b if b.len() >= 12 && &b[0..4] == b"RIFF" && &b[8..12] == b"WEBP" => Some("image/webp"),
        b if b.starts_with(b"BM") && b.len() > 14 => Some("image/bmp"),
        b if looks_like_svg(b) => Some("image/svg+xml"),
        _ => None,
    }
}

fn looks_like_svg(bytes: &[u8]) -> bool {
    let head = &bytes[..bytes.len().min(1024)];
    // The cut may split a multi-byte character; only the valid prefix matters.
    let text = match std::str::from_utf8(head) {
        Ok(text) => text,
        Err(err) if err.error_len().is_none() => {
            std::str::from_utf8(&head[..err.valid_up_to()]).unwrap_or_default()
        }
        Err(_) => return false,
    };
    let text = text.trim_start_matches('\u{feff}').trim_start();
    (text.starts_with("<svg") || text.starts_with("<?xml")) && text.contains("<svg")
}

/// Everything the user entered for one profile. Lives only in memory.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AttributeRecord {
    pub nickname: String,
    pub avatar: Option<AvatarImage>,
    pub likes: String,
    pub dislikes: String,
    pub bio: String,
    pub skills: Skills,
    pub stats: Stats,
    pub footer_text: String,
    pub font_name: String,
}

impl AttributeRecord {
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_record_has_default_stats() {
        let record = AttributeRecord::new();
        assert_eq!(record.stats.values(), [DEFAULT_STAT; STAT_COUNT]);
        assert!(record.skills.is_empty());
        assert!(record.avatar.is_none());
    }

    #[test]
    fn stats_clamp_below_and_above_range() {
        let mut stats = Stats::default();
        assert_eq!(stats.set(StatKind::Attack, -5.0), 0);
        assert_eq!(stats.set(StatKind::Defense, 250.0), 100);
        assert_eq!(stats.set(StatKind::Network, 42.0), 42);
        assert_eq!(stats.get(StatKind::Attack), 0);
        assert_eq!(stats.get(StatKind::Defense), 100);
        assert_eq!(stats.get(StatKind::Network), 42);
    }

    #[test]
    fn clamping_is_idempotent() {
        let mut stats = Stats::default();
        let once = stats.set(StatKind::Physique, 180.0);
        let twice = stats.set(StatKind::Physique, f64::from(once));
        assert_eq!(once, twice);
    }

    #[test]
    fn fractional_input_rounds_to_nearest() {
        let mut stats = Stats::default();
        assert_eq!(stats.set(StatKind::Intellect, 49.4), 49);
        assert_eq!(stats.set(StatKind::Intellect, 49.5), 50);
        assert_eq!(stats.set(StatKind::Intellect, 99.6), 100);
    }

    #[test]
    fn non_numeric_input_becomes_zero() {
        let mut stats = Stats::default();
        assert_eq!(stats.set_from_input(StatKind::Technique, "abc"), 0);
        assert_eq!(stats.set_from_input(StatKind::Technique, ""), 0);
        assert_eq!(stats.set_from_input(StatKind::Technique, " 73 "), 73);
        assert_eq!(stats.set(StatKind::Technique, f64::NAN), 0);
        assert_eq!(stats.set(StatKind::Technique, f64::INFINITY), 100);
    }

    #[test]
    fn labels_follow_axis_order() {
        let labels: Vec<_> = StatKind::ALL.iter().map(|k| k.label()).collect();
        assert_eq!(labels, STAT_LABELS);
        assert_eq!(StatKind::Intellect.index(), 0);
        assert_eq!(StatKind::Defense.index(), 5);
    }

    #[test]
    fn filled_skills_skip_empty_slots() {
        let mut skills = Skills::default();
        skills.set(SkillSlot::Special, "Overdrive");
        let filled: Vec<_> = skills.filled().collect();
        assert_eq!(filled, vec![(SkillSlot::Special, "Overdrive")]);
        assert!(!skills.is_empty());
    }

    #[test]
    fn avatar_accepts_png_and_rejects_garbage() {
        let png = b"\x89PNG\r\n\x1a\n\0\0\0\rIHDR";
        let avatar = AvatarImage::from_file_bytes(png).expect("png accepted");
        assert_eq!(avatar.mime(), "image/png");
        assert!(avatar.data_url().starts_with("data:image/png;base64,"));

        assert!(AvatarImage::from_file_bytes(b"not an image").is_none());
        assert!(AvatarImage::from_file_bytes(&[]).is_none());
    }

    #[test]
    fn avatar_recognises_jpeg_and_svg() {
        let jpeg = [0xFF, 0xD8, 0xFF, 0xE0, 0x00];
        assert_eq!(
            AvatarImage::from_file_bytes(&jpeg).map(|a| a.mime()),
            Some("image/jpeg")
        );
        let svg = br#"<?xml version="1.0"?><svg xmlns="http://www.w3.org/2000/svg"/>"#;
        assert_eq!(
            AvatarImage::from_file_bytes(svg).map(|a| a.mime()),
            Some("image/svg+xml")
        );
    }

    #[test]
    fn svg_with_accent_across_the_sniff_window_is_accepted() {
        let mut svg = String::from(r#"<svg xmlns="http://www.w3.org/2000/svg"><desc>"#);
        while svg.len() < 1023 {
            svg.push('a');
        }
        svg.push_str("é</desc></svg>");
        assert!(!svg.is_char_boundary(1024));
        assert_eq!(
            AvatarImage::from_file_bytes(svg.as_bytes()).map(|a| a.mime()),
            Some("image/svg+xml")
        );
    }

    #[test]
    fn svg_sniff_rejects_invalid_utf8() {
        assert!(AvatarImage::from_file_bytes(b"<svg \xff\xfe>").is_none());
    }
}
