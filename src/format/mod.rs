use serde::Serialize;

pub const UNKNOWN_CREATOR: &str = "Unknown";
pub const CREATOR_PAGE: &str = "creator-detail.html";
pub const PACK_PAGE: &str = "pack-detail.html";

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CreatorLink {
    pub name: String,
    pub href: String,
}

impl CreatorLink {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            href: creator_href(name),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "creators", rename_all = "snake_case")]
pub enum CreatorLine {
    Unknown,
    Linked(Vec<CreatorLink>),
}

impl CreatorLine {
    pub fn links(&self) -> &[CreatorLink] {
        match self {
            CreatorLine::Unknown => &[],
            CreatorLine::Linked(links) => links,
        }
    }

    pub fn to_text(&self) -> String {
        match self {
            CreatorLine::Unknown => UNKNOWN_CREATOR.to_string(),
            CreatorLine::Linked(links) => {
                join_with_ampersand(links.iter().map(|l| l.name.clone()).collect())
            }
        }
    }

    pub fn to_html(&self) -> String {
        match self {
            CreatorLine::Unknown => UNKNOWN_CREATOR.to_string(),
            CreatorLine::Linked(links) => join_with_ampersand(
                links
                    .iter()
                    .map(|l| {
                        format!(
                            r#"<a href="{}" target="_blank">{}</a>"#,
                            escape_html(&l.href),
                            escape_html(&l.name)
                        )
                    })
                    .collect(),
            ),
        }
    }
}

fn join_with_ampersand(mut parts: Vec<String>) -> String {
    match parts.pop() {
        None => String::new(),
        Some(last) if parts.is_empty() => last,
        Some(last) => format!("{} & {}", parts.join(", "), last),
    }
}

pub fn format_display(creators: Option<&[String]>) -> CreatorLine {
    match creators {
        Some(names) if !names.is_empty() => {
            CreatorLine::Linked(names.iter().map(|n| CreatorLink::new(n)).collect())
        }
        _ => CreatorLine::Unknown,
    }
}

pub fn format_searchable(creators: Option<&[String]>) -> String {
    match creators {
        Some(names) => names.join(", ").to_lowercase(),
        None => String::new(),
    }
}

pub fn creator_href(name: &str) -> String {
    format!("{CREATOR_PAGE}?creator={}", urlencoding::encode(name))
}

pub fn pack_href(id: &str) -> String {
    format!("{PACK_PAGE}?id={id}")
}

pub fn escape_html(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
