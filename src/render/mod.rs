pub mod html;

use colored::Colorize;
use serde::Serialize;

use crate::browser::PackPage;
use crate::format::{self, CreatorLine};
use crate::model::Pack;
use crate::pager::PagerControls;

pub const NO_RESULTS: &str = "No packs found matching the selected filters.";
pub const NO_DESCRIPTION: &str = "Description not provided.";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
    Html,
}

impl OutputFormat {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "text" | "txt" => Some(Self::Text),
            "json" => Some(Self::Json),
            "html" | "htm" => Some(Self::Html),
            _ => None,
        }
    }
}

pub fn infer_format_from_path(path: &str) -> Option<OutputFormat> {
    let lower = path.trim().to_lowercase();
    if lower.ends_with(".json") {
        return Some(OutputFormat::Json);
    }
    if lower.ends_with(".html") || lower.ends_with(".htm") {
        return Some(OutputFormat::Html);
    }
    if lower.ends_with(".txt") {
        return Some(OutputFormat::Text);
    }
    None
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CardView {
    pub id: String,
    pub name: String,
    pub href: String,
    pub featured: bool,
    pub creators: CreatorLine,
    pub version: String,
    pub description: String,
    pub icon: String,
    pub screenshot: String,
    pub download: String,
}

impl CardView {
    pub fn from_pack(pack: &Pack) -> Self {
        Self {
            id: pack.id_or_empty().to_string(),
            name: pack.name_or_empty().to_string(),
            href: format::pack_href(pack.id_or_empty()),
            featured: pack.featured,
            creators: format::format_display(pack.creators.as_deref()),
            version: pack.version_or_empty().to_string(),
            description: pack.description.clone().unwrap_or_default(),
            icon: pack.icon.clone().unwrap_or_default(),
            screenshot: pack.screenshot.clone().unwrap_or_default(),
            download: pack.download.clone().unwrap_or_default(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DetailView {
    #[serde(flatten)]
    pub card: CardView,
    pub resolution: String,
}

impl DetailView {
    pub fn from_pack(pack: &Pack) -> Self {
        let mut card = CardView::from_pack(pack);
        if card.description.is_empty() {
            card.description = NO_DESCRIPTION.to_string();
        }
        Self {
            card,
            resolution: pack.resolution_display(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PageRender {
    pub cards: Vec<CardView>,
    pub page: usize,
    pub total_pages: usize,
    pub total_items: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pager: Option<PagerControls>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    // Same packs as `cards`, for views that open the detail in place.
    #[serde(skip)]
    pub details: Vec<DetailView>,
}

impl PageRender {
    pub fn from_page(page: &PackPage<'_>) -> Self {
        let message = (page.total_items == 0).then(|| NO_RESULTS.to_string());
        Self {
            cards: page.packs.iter().map(|p| CardView::from_pack(p)).collect(),
            page: page.page,
            total_pages: page.total_pages,
            total_items: page.total_items,
            pager: page.controls.clone(),
            message,
            details: page.packs.iter().map(|p| DetailView::from_pack(p)).collect(),
        }
    }

    pub fn message_only(message: &str) -> Self {
        Self {
            cards: Vec::new(),
            page: 1,
            total_pages: 0,
            total_items: 0,
            pager: None,
            message: Some(message.to_string()),
            details: Vec::new(),
        }
    }
}

fn card_text(card: &CardView, out: &mut String) {
    let title = if card.featured {
        format!("★ {}", card.name).bold().yellow().to_string()
    } else {
        card.name.bold().white().to_string()
    };
    out.push_str(&format!(
        "{} by {} - {}\n",
        title,
        card.creators.to_text().cyan(),
        card.version
    ));
    if !card.description.is_empty() {
        out.push_str(&format!("    {}\n", card.description));
    }
    if !card.download.is_empty() {
        out.push_str(&format!(
            "    {} {}\n",
            format!("Download ({}):", card.version).green(),
            card.download
        ));
    }
    out.push_str(&format!("    {} {}\n", "info:".dimmed(), card.id));
}

fn pager_text(pager: &PagerControls) -> String {
    let mut parts: Vec<String> = Vec::with_capacity(pager.buttons.len() + 2);
    let prev = if pager.prev_enabled {
        "Prev".normal()
    } else {
        "Prev".dimmed()
    };
    parts.push(prev.to_string());
    for b in &pager.buttons {
        if b.current {
            parts.push(format!("[{}]", b.number).bold().to_string());
        } else {
            parts.push(b.number.to_string());
        }
    }
    let next = if pager.next_enabled {
        "Next".normal()
    } else {
        "Next".dimmed()
    };
    parts.push(next.to_string());
    parts.join(" ")
}

pub fn render_text(page: &PageRender) -> Vec<u8> {
    let mut out = String::new();
    if let Some(message) = page.message.as_deref() {
        out.push_str(message);
        out.push('\n');
    }
    for card in &page.cards {
        card_text(card, &mut out);
        out.push('\n');
    }
    if let Some(pager) = page.pager.as_ref() {
        out.push_str(&pager_text(pager));
        out.push('\n');
    }
    out.into_bytes()
}

pub fn render_detail_text(detail: &DetailView) -> Vec<u8> {
    let card = &detail.card;
    let mut out = String::new();
    out.push_str(&format!(
        "{}\n",
        format!("{} - {}", card.name, card.version).bold().white()
    ));
    out.push_str(&format!("{} {}\n", "Creator(s):".bold(), card.creators.to_text()));
    out.push_str(&format!("{} {}\n", "Version:".bold(), card.version));
    out.push_str(&format!("{} {}\n", "Resolution:".bold(), detail.resolution));
    out.push_str(&format!("{}\n", format!("ID: {}", card.id).dimmed()));
    out.push('\n');
    out.push_str(&card.description);
    out.push('\n');
    if !card.download.is_empty() {
        out.push_str(&format!(
            "\n{} {}\n",
            format!("Download ({}):", card.version).green(),
            card.download
        ));
    }
    out.push_str(&format!("View the post of {}: {}\n", card.name, card.href));
    out.into_bytes()
}

pub fn render_json<T: Serialize>(view: &T) -> Vec<u8> {
    let mut out = serde_json::to_vec_pretty(view).unwrap_or_else(|_| b"{}".to_vec());
    out.push(b'\n');
    out
}

pub fn render_page(page: &PageRender, format: OutputFormat) -> Vec<u8> {
    match format {
        OutputFormat::Text => render_text(page),
        OutputFormat::Json => render_json(page),
        OutputFormat::Html => html::render_page(page),
    }
}

pub fn render_detail(detail: &DetailView, format: OutputFormat) -> Vec<u8> {
    match format {
        OutputFormat::Text => render_detail_text(detail),
        OutputFormat::Json => render_json(detail),
        OutputFormat::Html => html::render_detail(detail),
    }
}
