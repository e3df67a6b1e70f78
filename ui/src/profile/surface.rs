//! The profile card as a pure layout tree.
//!
//! Each region is derived from its own slice of the [`AttributeRecord`], so
//! a change to one field only changes the region that reads it. The font
//! family is the one value every region shares.

use crate::chart::{build_stats_chart, RadarDescription, RadarLayout};
use crate::core::attributes::{AttributeRecord, SkillSlot, Skills};
use crate::profile::fonts::font_stack;

pub const NICKNAME_PLACEHOLDER: &str = "Hero name";
pub const AVATAR_PLACEHOLDER: &str = "No avatar uploaded";
pub const EMPTY_FIELD: &str = "—";
pub const NO_SKILLS: &str = "No skills yet";
pub const NO_BIO: &str = "No bio yet";
pub const DEFAULT_FOOTER: &str = "Power Profile • auto-generated";

/// Text that may have been replaced by a placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayText {
    pub text: String,
    pub is_placeholder: bool,
}

impl DisplayText {
    fn or_placeholder(value: &str, placeholder: &str) -> Self {
        if value.is_empty() {
            Self {
                text: placeholder.to_string(),
                is_placeholder: true,
            }
        } else {
            Self {
                text: value.to_string(),
                is_placeholder: false,
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AvatarRegion {
    Image { data_url: String },
    Placeholder { message: &'static str },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityRegion {
    pub nickname: DisplayText,
    pub likes: DisplayText,
    pub dislikes: DisplayText,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkillLine {
    pub slot: SkillSlot,
    pub label: &'static str,
    /// Raw user text; renderers apply `pre-line` whitespace rules.
    pub text: String,
    pub emphasized: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkillsRegion {
    Lines(Vec<SkillLine>),
    Placeholder { message: &'static str },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BioRegion {
    /// Raw user text; renderers apply `pre-wrap` whitespace rules.
    pub body: DisplayText,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FooterRegion {
    pub caption: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProfileSurface {
    pub font_family: String,
    pub avatar: AvatarRegion,
    pub identity: IdentityRegion,
    pub chart: RadarDescription,
    pub skills: SkillsRegion,
    pub bio: BioRegion,
    pub footer: FooterRegion,
}

impl ProfileSurface {
    pub fn from_record(record: &AttributeRecord) -> Self {
        Self {
            font_family: font_stack(&record.font_name),
            avatar: avatar_region(record),
            identity: identity_region(record),
            chart: build_stats_chart(&record.stats, &RadarLayout::profile()),
            skills: skills_region(&record.skills),
            bio: bio_region(&record.bio),
            footer: footer_region(&record.footer_text),
        }
    }
}

pub fn avatar_region(record: &AttributeRecord) -> AvatarRegion {
    match &record.avatar {
        Some(avatar) => AvatarRegion::Image {
            data_url: avatar.data_url().to_string(),
        },
        None => AvatarRegion::Placeholder {
            message: AVATAR_PLACEHOLDER,
        },
    }
}

pub fn identity_region(record: &AttributeRecord) -> IdentityRegion {
    IdentityRegion {
        nickname: DisplayText::or_placeholder(&record.nickname, NICKNAME_PLACEHOLDER),
        likes: DisplayText::or_placeholder(&record.likes, EMPTY_FIELD),
        dislikes: DisplayText::or_placeholder(&record.dislikes, EMPTY_FIELD),
    }
}

pub fn skills_region(skills: &Skills) -> SkillsRegion {
    let lines: Vec<SkillLine> = skills
        .filled()
        .map(|(slot, text)| SkillLine {
            slot,
            label: slot.label(),
            text: text.to_string(),
            emphasized: slot.is_emphasized(),
        })
        .collect();

    if lines.is_empty() {
        SkillsRegion::Placeholder { message: NO_SKILLS }
    } else {
        SkillsRegion::Lines(lines)
    }
}

pub fn bio_region(bio: &str) -> BioRegion {
    BioRegion {
        body: DisplayText::or_placeholder(bio, NO_BIO),
    }
}

pub fn footer_region(footer_text: &str) -> FooterRegion {
    FooterRegion {
        caption: if footer_text.is_empty() {
            DEFAULT_FOOTER.to_string()
        } else {
            footer_text.to_string()
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::attributes::AvatarImage;

    #[test]
    fn empty_record_renders_all_placeholders() {
        let surface = ProfileSurface::from_record(&AttributeRecord::new());
        assert_eq!(
            surface.avatar,
            AvatarRegion::Placeholder {
                message: AVATAR_PLACEHOLDER
            }
        );
        assert_eq!(surface.identity.nickname.text, NICKNAME_PLACEHOLDER);
        assert!(surface.identity.nickname.is_placeholder);
        assert_eq!(surface.identity.likes.text, EMPTY_FIELD);
        assert_eq!(surface.identity.dislikes.text, EMPTY_FIELD);
        assert_eq!(surface.skills, SkillsRegion::Placeholder { message: NO_SKILLS });
        assert_eq!(surface.bio.body.text, NO_BIO);
        assert_eq!(surface.footer.caption, DEFAULT_FOOTER);
        assert_eq!(surface.font_family, "system-ui, Arial, sans-serif");
    }

    #[test]
    fn any_filled_slot_replaces_the_placeholder() {
        for slot in SkillSlot::ALL {
            let mut skills = Skills::default();
            skills.set(slot, "Line one\nLine two");
            match skills_region(&skills) {
                SkillsRegion::Lines(lines) => {
                    assert_eq!(lines.len(), 1);
                    assert_eq!(lines[0].slot, slot);
                    assert_eq!(lines[0].label, slot.label());
                    assert_eq!(lines[0].text, "Line one\nLine two");
                    assert_eq!(lines[0].emphasized, slot == SkillSlot::Special);
                }
                other => panic!("expected lines for {slot:?}, got {other:?}"),
            }
        }
    }

    #[test]
    fn skill_lines_follow_slot_order() {
        let mut skills = Skills::default();
        skills.set(SkillSlot::Special, "d");
        skills.set(SkillSlot::First, "a");
        skills.set(SkillSlot::Ultimate, "c");
        let SkillsRegion::Lines(lines) = skills_region(&skills) else {
            panic!("expected lines");
        };
        let slots: Vec<_> = lines.iter().map(|l| l.slot).collect();
        assert_eq!(slots, vec![SkillSlot::First, SkillSlot::Ultimate, SkillSlot::Special]);
    }

    #[test]
    fn filled_fields_pass_through() {
        let mut record = AttributeRecord::new();
        record.nickname = "Aria".into();
        record.likes = "Tea".into();
        record.bio = "Line 1\n\nLine 3".into();
        record.footer_text = "Guild archive".into();
        record.font_name = "Fira Sans".into();
        record.avatar = AvatarImage::from_file_bytes(b"GIF89a\x01\x00");

        let surface = ProfileSurface::from_record(&record);
        assert_eq!(surface.identity.nickname.text, "Aria");
        assert!(!surface.identity.nickname.is_placeholder);
        assert_eq!(surface.identity.likes.text, "Tea");
        assert_eq!(surface.bio.body.text, "Line 1\n\nLine 3");
        assert_eq!(surface.footer.caption, "Guild archive");
        assert!(surface.font_family.starts_with("\"Fira Sans\""));
        assert!(matches!(surface.avatar, AvatarRegion::Image { ref data_url } if data_url.starts_with("data:image/gif")));
    }
}
