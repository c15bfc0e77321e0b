use crate::format::escape_html;
use crate::pager::PagerControls;

use super::{CardView, DetailView, PageRender};

const STYLE: &str = r#"
    body { font-family: Inter, sans-serif; background: #0f172a; color: #e2e8f0; margin: 0; padding: 2rem; }
    a { color: #60a5fa; }
    #cards-container { display: grid; grid-template-columns: repeat(2, minmax(0, 1fr)); gap: 1.25rem; }
    .card { background: #1e293b; border-radius: 0.75rem; padding: 1rem; }
    .card-top { display: flex; gap: 1rem; }
    .card-icon { width: 64px; height: 64px; border-radius: 0.5rem; }
    .featured-icon-glow { box-shadow: 0 0 12px #facc15; }
    .featured-title a { color: #facc15; }
    .featured-star { color: #facc15; }
    .card-screenshot, .popup-image { width: 100%; border-radius: 0.5rem; margin-top: 0.75rem; }
    .download-btn { display: inline-block; background: #4caf50; color: #fff; padding: 0.4rem 0.8rem; border-radius: 0.4rem; text-decoration: none; }
    .more-info { margin-top: 0.5rem; }
    .more-info summary { cursor: pointer; }
    #pagination { display: flex; gap: 0.4rem; margin-top: 1.5rem; }
    #pagination .active-page { font-weight: 700; text-decoration: underline; }
    #pagination .disabled { opacity: 0.4; pointer-events: none; }
    .no-results-message { font-style: italic; }
"#;

fn page_shell(title: &str, body: &str) -> Vec<u8> {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8"/>
  <meta content="width=device-width, initial-scale=1.0" name="viewport"/>
  <title>{title}</title>
  <style>{STYLE}</style>
</head>
<body>
{body}
</body>
</html>
"#,
        title = escape_html(title),
    )
    .into_bytes()
}

fn card_html(card: &CardView, detail: Option<&DetailView>) -> String {
    let (title_class, star, icon_class) = if card.featured {
        (
            "featured-title",
            r#"<span class="featured-star">★ </span>"#,
            "featured-icon-glow",
        )
    } else {
        ("", "", "")
    };
    let name = escape_html(&card.name);
    let version = escape_html(&card.version);
    format!(
        r#"  <div class="card" data-id="{id}">
    <div class="card-top">
      <img src="{icon}" alt="Pack Icon" class="card-icon {icon_class}">
      <div class="card-content">
        <h3 class="{title_class}">
          {star}<a href="{href}" target="_self">{name}</a>
          by {creators} - {version}
        </h3>
        <p class="pack-description-text">{description}</p>
        <a class="download-btn" href="{download}" download>Download ({version})</a>
        <p class="download-count"><small>Available for Download</small></p>
        {info}
      </div>
    </div>
    <img src="{screenshot}" alt="Pack Screenshot" class="card-screenshot">
  </div>
"#,
        id = escape_html(&card.id),
        icon = escape_html(&card.icon),
        href = escape_html(&card.href),
        creators = card.creators.to_html(),
        description = escape_html(&card.description),
        download = escape_html(&card.download),
        screenshot = escape_html(&card.screenshot),
        info = info_html(card, detail),
    )
}

fn info_html(card: &CardView, detail: Option<&DetailView>) -> String {
    match detail {
        Some(detail) => format!(
            "<details class=\"more-info\"><summary aria-label=\"More information about {}\">i</summary>\n{}</details>",
            escape_html(&card.name),
            popup_html(detail)
        ),
        None => format!(
            r#"<a class="more-info" href="{}">i</a>"#,
            escape_html(&card.href)
        ),
    }
}

fn pager_html(pager: &PagerControls) -> String {
    let mut out = String::from("  <nav id=\"pagination\">\n");
    let nav_button = |label: &str, enabled: bool| {
        if enabled {
            format!("    <button>{label}</button>\n")
        } else {
            format!("    <button class=\"disabled\" disabled>{label}</button>\n")
        }
    };
    out.push_str(&nav_button("Prev", pager.prev_enabled));
    for b in &pager.buttons {
        if b.current {
            out.push_str(&format!(
                "    <button class=\"active-page\">{}</button>\n",
                b.number
            ));
        } else {
            out.push_str(&format!("    <button>{}</button>\n", b.number));
        }
    }
    out.push_str(&nav_button("Next", pager.next_enabled));
    out.push_str("  </nav>\n");
    out
}

pub fn render_page(page: &PageRender) -> Vec<u8> {
    let mut body = String::from("<div id=\"cards-container\">\n");
    if let Some(message) = page.message.as_deref() {
        body.push_str(&format!(
            "  <p class=\"no-results-message\">{}</p>\n",
            escape_html(message)
        ));
    }
    for (idx, card) in page.cards.iter().enumerate() {
        body.push_str(&card_html(card, page.details.get(idx)));
    }
    body.push_str("</div>\n");
    if let Some(pager) = page.pager.as_ref() {
        body.push_str(&pager_html(pager));
    }
    page_shell("Texture Packs", &body)
}

fn popup_html(detail: &DetailView) -> String {
    let card = &detail.card;
    let name = escape_html(&card.name);
    let version = escape_html(&card.version);
    format!(
        r#"<div class="popup-box" data-id="{id}">
  <div class="popup-top">
    <img src="{icon}" alt="Pack Icon" class="pack-icon">
    <div class="popup-info">
      <h2 class="title-popp">{name} - {version}</h2>
      <div class="info-details-list">
        <p><strong>Creator(s):</strong> {creators}</p>
        <p><strong>Version:</strong> {version}</p>
        <p><strong>Resolution:</strong> {resolution}</p>
        <p style="font-size: 12px; color: #777;">ID: {id}</p>
      </div>
      <a class="download-btn" href="{download}" download>Download ({version})</a>
    </div>
  </div>
  <hr>
  <div class="popup-bottom-content">
    <p class="description-block">{description}</p>
    <div class="action-links">
      <a class="details-btn" href="{href}" target="_self">View The Post of {name} &rarr;</a>
    </div>
  </div>
  <img src="{screenshot}" alt="Screenshot" class="popup-image">
</div>
"#,
        id = escape_html(&card.id),
        icon = escape_html(&card.icon),
        creators = card.creators.to_html(),
        resolution = escape_html(&detail.resolution),
        download = escape_html(&card.download),
        description = escape_html(&card.description),
        href = escape_html(&card.href),
        screenshot = escape_html(&card.screenshot),
    )
}

pub fn render_detail(detail: &DetailView) -> Vec<u8> {
    page_shell(&detail.card.name, &popup_html(detail))
}
