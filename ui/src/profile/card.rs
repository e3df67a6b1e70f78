use std::rc::Rc;

use dioxus::prelude::*;

use crate::chart::{RadarChart, RadarDescription};
use crate::profile::surface::{
    AvatarRegion, BioRegion, FooterRegion, IdentityRegion, ProfileSurface, SkillsRegion,
};

/// Live rendering of the card. Each region is its own component so that
/// editing one field only re-renders the region that reads it.
#[component]
pub fn ProfileCard(surface: ProfileSurface, on_mounted: EventHandler<Rc<MountedData>>) -> Element {
    let ProfileSurface {
        font_family,
        avatar,
        identity,
        chart,
        skills,
        bio,
        footer,
    } = surface;

    rsx! {
        article {
            class: "profile-card",
            id: "profile-card",
            style: "font-family: {font_family}",
            onmounted: move |evt| on_mounted.call(evt.data()),

            div { class: "profile-card__top",
                div { class: "profile-card__identity",
                    AvatarView { avatar }
                    IdentityView { identity }
                }
                ChartView { chart, font_family: font_family.clone() }
            }

            SkillsView { skills }
            BioView { bio }
            FooterView { footer }
        }
    }
}

#[component]
fn AvatarView(avatar: AvatarRegion) -> Element {
    rsx! {
        div { class: "profile-card__avatar",
            match avatar {
                AvatarRegion::Image { data_url } => rsx! {
                    img { src: "{data_url}", alt: "avatar" }
                },
                AvatarRegion::Placeholder { message } => rsx! {
                    span { class: "profile-card__placeholder", "{message}" }
                },
            }
        }
    }
}

#[component]
fn IdentityView(identity: IdentityRegion) -> Element {
    let name_class = if identity.nickname.is_placeholder {
        "profile-card__name profile-card__name--placeholder"
    } else {
        "profile-card__name"
    };

    rsx! {
        h2 { class: "{name_class}", "{identity.nickname.text}" }
        p { class: "profile-card__detail", "Likes: {identity.likes.text}" }
        p { class: "profile-card__detail", "Dislikes: {identity.dislikes.text}" }
    }
}

#[component]
fn ChartView(chart: RadarDescription, font_family: String) -> Element {
    rsx! {
        div { class: "profile-card__chart",
            RadarChart { description: chart, font_family }
        }
    }
}

#[component]
fn SkillsView(skills: SkillsRegion) -> Element {
    rsx! {
        section { class: "profile-card__panel profile-card__skills",
            h3 { "Skills" }
            match skills {
                SkillsRegion::Lines(lines) => rsx! {
                    for line in lines {
                        p {
                            key: "{line.label}",
                            class: "profile-card__skill",
                            span {
                                class: if line.emphasized { "profile-card__skill-label profile-card__skill-label--special" } else { "profile-card__skill-label" },
                                "{line.label}"
                            }
                            " {line.text}"
                        }
                    }
                },
                SkillsRegion::Placeholder { message } => rsx! {
                    p { class: "profile-card__placeholder", "{message}" }
                },
            }
        }
    }
}

#[component]
fn BioView(bio: BioRegion) -> Element {
    rsx! {
        section { class: "profile-card__panel profile-card__bio",
            h3 { "Bio" }
            p {
                class: if bio.body.is_placeholder { "profile-card__placeholder" } else { "profile-card__bio-text" },
                "{bio.body.text}"
            }
        }
    }
}

#[component]
fn FooterView(footer: FooterRegion) -> Element {
    rsx! {
        footer { class: "profile-card__footer", "{footer.caption}" }
    }
}
