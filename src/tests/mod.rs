use std::time::Duration;

use crate::browser::{Browser, Event};
use crate::filter::{self, Facet, FacetOptions, QueryState};
use crate::model::{Pack, PackId, PackType, Resolution};
use crate::render::{self, DetailView, OutputFormat, PageRender};
use crate::store::{self, CatalogSource, LoadError, PackStore};

fn pack(id: &str, name: &str, creators: &[&str]) -> Pack {
    Pack {
        id: Some(PackId::new(id)),
        name: Some(name.to_string()),
        creators: Some(creators.iter().map(|c| c.to_string()).collect()),
        ..Default::default()
    }
}

fn catalog() -> Vec<Pack> {
    let mut dragon = pack("dragon", "Dragon Craft", &["Alice", "Bob"]);
    dragon.resolution = Some(Resolution::Tiers(vec!["16x".to_string(), "32x".to_string()]));
    dragon.pack_type = Some(PackType::One("Java".to_string()));
    dragon.featured = true;

    let mut stone = pack("stone", "Stone Age", &["carol"]);
    stone.resolution = Some(Resolution::Tiers(vec!["32x".to_string()]));
    stone.pack_type = Some(PackType::One("bedrock".to_string()));

    let mut dragon_lite = pack("dragon-lite", "Dragon Lite", &["alice_x"]);
    dragon_lite.resolution = Some(Resolution::Raw("16x".to_string()));
    dragon_lite.pack_type = Some(PackType::Many(vec!["Java".to_string(), "Bedrock".to_string()]));

    let no_creators = Pack {
        id: Some(PackId::new("orphan")),
        name: Some("Dragon Orphan".to_string()),
        featured: true,
        ..Default::default()
    };
    let no_name = Pack {
        id: Some(PackId::new("nameless")),
        creators: Some(vec!["alice".to_string()]),
        ..Default::default()
    };

    vec![dragon, stone, no_creators, dragon_lite, no_name]
}

fn query(text: &str) -> QueryState {
    QueryState {
        free_text: text.to_string(),
        ..Default::default()
    }
}

fn ids(items: &[Pack], matched: &[usize]) -> Vec<String> {
    matched
        .iter()
        .map(|&i| items[i].id_or_empty().to_string())
        .collect()
}

#[test]
fn empty_query_returns_all_listable_packs_in_order() {
    let items = catalog();
    let matched = filter::apply(&items, &QueryState::default());
    assert_eq!(ids(&items, &matched), vec!["dragon", "stone", "dragon-lite"]);
}

#[test]
fn results_are_an_ordered_subsequence_for_every_query() {
    let items = catalog();
    let queries = [
        query(""),
        query("dragon"),
        query("by:alice"),
        query("zzz"),
        QueryState {
            featured: Facet::Only("yes".to_string()),
            ..Default::default()
        },
        QueryState {
            resolution: Facet::Only("32x".to_string()),
            ..query("a")
        },
    ];
    for q in queries.iter() {
        let matched = filter::apply(&items, q);
        assert!(matched.windows(2).all(|w| w[0] < w[1]), "order for {q:?}");
        assert!(matched.iter().all(|&i| i < items.len()));
    }
}

#[test]
fn name_and_creator_filters_combine() {
    let items = catalog();
    let matched = filter::apply(&items, &query("dragon by:alice"));
    assert_eq!(ids(&items, &matched), vec!["dragon", "dragon-lite"]);

    let matched = filter::apply(&items, &query("DRAGON by:bob"));
    assert_eq!(ids(&items, &matched), vec!["dragon"]);

    let matched = filter::apply(&items, &query("by:carol"));
    assert_eq!(ids(&items, &matched), vec!["stone"]);
}

#[test]
fn creator_filter_is_a_substring_match() {
    let items = catalog();
    let matched = filter::apply(&items, &query("by:ce"));
    assert_eq!(ids(&items, &matched), vec!["dragon", "dragon-lite"]);
}

#[test]
fn items_missing_creators_never_match() {
    let items = catalog();
    let queries = [
        query(""),
        query("orphan"),
        QueryState {
            featured: Facet::Only("true".to_string()),
            ..Default::default()
        },
    ];
    for q in queries.iter() {
        let matched = filter::apply(&items, q);
        assert!(!ids(&items, &matched).contains(&"orphan".to_string()));
        assert!(!ids(&items, &matched).contains(&"nameless".to_string()));
    }
}

#[test]
fn featured_facet_any_value_means_featured_only() {
    let items = catalog();
    for value in ["yes", "no", "false", "featured"] {
        let q = QueryState {
            featured: Facet::parse(value),
            ..Default::default()
        };
        assert_eq!(ids(&items, &filter::apply(&items, &q)), vec!["dragon"]);
    }
}

#[test]
fn resolution_facet_only_matches_tier_lists() {
    let items = catalog();
    let q = QueryState {
        resolution: Facet::Only("16x".to_string()),
        ..Default::default()
    };
    assert_eq!(ids(&items, &filter::apply(&items, &q)), vec!["dragon"]);
}

#[test]
fn type_facet_compares_lowercased_key_exactly() {
    let items = catalog();
    let q = QueryState {
        pack_type: Facet::Only("java".to_string()),
        ..Default::default()
    };
    assert_eq!(ids(&items, &filter::apply(&items, &q)), vec!["dragon"]);

    let q = QueryState {
        pack_type: Facet::Only("java,bedrock".to_string()),
        ..Default::default()
    };
    assert_eq!(ids(&items, &filter::apply(&items, &q)), vec!["dragon-lite"]);

    let q = QueryState {
        pack_type: Facet::Only("Java".to_string()),
        ..Default::default()
    };
    assert!(filter::apply(&items, &q).is_empty());
}

#[test]
fn apply_packs_returns_references() {
    let items = catalog();
    let packs = filter::apply_packs(&items, &query("stone"));
    assert_eq!(packs.len(), 1);
    assert_eq!(packs[0].name_or_empty(), "Stone Age");
}

#[test]
fn facet_options_skip_unlisted_packs() {
    let items = catalog();
    let options = FacetOptions::collect(&items);
    assert_eq!(options.resolutions, vec!["16x", "32x"]);
    assert_eq!(options.types, vec!["java", "bedrock", "java,bedrock"]);
}

fn numbered(n: usize) -> PackStore {
    PackStore::new(
        (1..=n)
            .map(|i| pack(&i.to_string(), &format!("Pack {i}"), &["maker"]))
            .collect(),
    )
}

#[test]
fn browser_pages_through_twenty_five_packs() {
    let mut browser = Browser::new(numbered(25), 10);
    let page = browser.current_page();
    assert_eq!(page.total_pages, 3);
    assert_eq!(page.packs.len(), 10);
    let controls = page.controls.unwrap();
    assert!(!controls.prev_enabled);

    browser.handle(Event::GoToPage(3));
    let page = browser.current_page();
    assert_eq!(page.page, 3);
    assert_eq!(page.packs.len(), 5);
    assert_eq!(page.packs[0].id_or_empty(), "21");
    assert!(!page.controls.unwrap().next_enabled);

    browser.handle(Event::PrevPage);
    assert_eq!(browser.current_page().page, 2);
}

#[test]
fn filter_events_reset_to_first_page() {
    let mut browser = Browser::new(numbered(25), 10);
    browser.handle(Event::GoToPage(3));
    browser.handle(Event::Search("pack 1".to_string()));
    let page = browser.current_page();
    assert_eq!(page.page, 1);
    assert_eq!(browser.page_state().current(), 1);
    // "pack 1" and "pack 10".."pack 19"
    assert_eq!(page.total_items, 11);
}

#[test]
fn stale_page_falls_back_to_first() {
    let mut browser = Browser::new(numbered(12), 10);
    browser.handle(Event::GoToPage(7));
    assert_eq!(browser.page_state().current(), 1);
    assert_eq!(browser.current_page().packs.len(), 10);

    browser.handle(Event::GoToPage(2));
    assert_eq!(browser.current_page().packs.len(), 2);
    browser.handle(Event::Search("pack 1".to_string()));
    assert_eq!(browser.page_state().current(), 1);
}

#[test]
fn disabled_pager_buttons_do_nothing() {
    let mut browser = Browser::new(numbered(25), 10);
    browser.handle(Event::PrevPage);
    assert_eq!(browser.page_state().current(), 1);
    browser.handle(Event::GoToPage(3));
    browser.handle(Event::NextPage);
    assert_eq!(browser.page_state().current(), 3);
    assert_eq!(browser.current_page().packs.len(), 5);

    let mut single = Browser::new(numbered(4), 10);
    single.handle(Event::NextPage);
    assert_eq!(single.page_state().current(), 1);

    let mut empty = Browser::new(PackStore::default(), 10);
    empty.handle(Event::NextPage);
    empty.handle(Event::NextPage);
    let page = empty.current_page();
    assert_eq!((page.page, page.total_pages), (1, 0));
}

#[test]
fn pager_events_do_not_change_the_result() {
    let mut browser = Browser::with_query(numbered(25), query("pack 2"), 5);
    let before = browser.matched();
    browser.handle(Event::NextPage);
    assert_eq!(browser.matched(), before);
    assert_eq!(browser.query().free_text, "pack 2");
}

#[test]
fn detail_comes_from_the_whole_store() {
    let mut browser = Browser::new(PackStore::new(catalog()), 10);
    browser.handle(Event::Search("stone".to_string()));
    let detail = browser.detail("dragon").map(DetailView::from_pack).unwrap();
    assert_eq!(detail.resolution, "16x, 32x");
    assert_eq!(detail.card.description, render::NO_DESCRIPTION);
    assert_eq!(detail.card.creators.to_text(), "Alice & Bob");
    assert!(browser.detail("missing").is_none());
    assert!(browser.detail("orphan").is_none());
}

#[test]
fn empty_result_renders_no_results_message() {
    let mut browser = Browser::new(PackStore::new(catalog()), 10);
    browser.handle(Event::Search("nothing matches this".to_string()));
    let view = PageRender::from_page(&browser.current_page());
    assert!(view.cards.is_empty());
    assert!(view.pager.is_none());
    assert_eq!(view.message.as_deref(), Some(render::NO_RESULTS));

    colored::control::set_override(false);
    let text = String::from_utf8(render::render_text(&view)).unwrap();
    assert!(text.starts_with(render::NO_RESULTS));
    let html = String::from_utf8(render::render_page(&view, OutputFormat::Html)).unwrap();
    assert!(html.contains("no-results-message"));
}

#[test]
fn html_cards_link_creators_and_mark_featured() {
    let browser = Browser::new(PackStore::new(catalog()), 10);
    let view = PageRender::from_page(&browser.current_page());
    let html = String::from_utf8(render::html::render_page(&view)).unwrap();
    assert_eq!(html.matches("class=\"card\"").count(), 3);
    assert_eq!(html.matches("featured-star").count(), 2); // style rule + one card
    assert!(html.contains(r#"<a href="creator-detail.html?creator=Alice" target="_blank">Alice</a>"#));
    assert!(html.contains(r#"href="pack-detail.html?id=dragon""#));
}

#[test]
fn html_cards_open_their_own_detail() {
    let browser = Browser::new(PackStore::new(catalog()), 10);
    let view = PageRender::from_page(&browser.current_page());
    assert_eq!(view.details.len(), view.cards.len());
    let html = String::from_utf8(render::html::render_page(&view)).unwrap();
    assert_eq!(html.matches("<details class=\"more-info\">").count(), 3);
    assert_eq!(html.matches("class=\"popup-box\"").count(), 3);
    assert!(html.contains("<p><strong>Resolution:</strong> 16x, 32x</p>"));
    assert!(html.contains(render::NO_DESCRIPTION));
}

#[test]
fn html_escapes_pack_fields() {
    let mut p = pack("x", "<b>Bold</b>", &["a&b"]);
    p.description = Some("\"quoted\"".to_string());
    let browser = Browser::new(PackStore::new(vec![p]), 10);
    let view = PageRender::from_page(&browser.current_page());
    let html = String::from_utf8(render::html::render_page(&view)).unwrap();
    assert!(html.contains("&lt;b&gt;Bold&lt;/b&gt;"));
    assert!(html.contains("a&amp;b</a>"));
    assert!(html.contains("creator=a%26b"));
    assert!(!html.contains("<b>Bold</b>"));
}

#[test]
fn json_page_carries_pager_state() {
    let browser = Browser::new(numbered(25), 10);
    let view = PageRender::from_page(&browser.current_page());
    let json: serde_json::Value =
        serde_json::from_slice(&render::render_page(&view, OutputFormat::Json)).unwrap();
    assert_eq!(json["total_pages"], 3);
    assert_eq!(json["cards"].as_array().map(Vec::len), Some(10));
    assert_eq!(json["pager"]["prev_enabled"], false);
    assert_eq!(json["pager"]["buttons"][0]["current"], true);
    assert!(json.get("message").is_none());
}

#[test]
fn output_format_parse_and_inference() {
    assert_eq!(OutputFormat::parse(" HTML "), Some(OutputFormat::Html));
    assert_eq!(OutputFormat::parse("xml"), None);
    assert_eq!(
        render::infer_format_from_path("out/packs.JSON"),
        Some(OutputFormat::Json)
    );
    assert_eq!(render::infer_format_from_path("packs"), None);
}

const SAMPLE: &str = r#"[
  {"id": "dragon", "name": "Dragon Craft", "creators": ["Alice"], "resolution": ["16x"], "type": "java", "featured": true, "version": "1.2"},
  {"id": 2, "name": "No Creators"},
  {"id": "stone", "name": "Stone Age", "creators": ["carol"], "resolution": "32x"}
]"#;

#[tokio::test]
async fn load_reads_catalog_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("data.json");
    std::fs::write(&path, SAMPLE).unwrap();
    let source = CatalogSource::FilePath(path.to_string_lossy().to_string());
    let store = store::load(&source, Duration::from_secs(1)).await.unwrap();
    assert_eq!(store.len(), 3);
    let browser = Browser::new(store, 10);
    let names: Vec<_> = browser.filtered().map(|p| p.name_or_empty()).collect();
    assert_eq!(names, vec!["Dragon Craft", "Stone Age"]);
    assert!(browser.detail("dragon").is_some());
    assert!(browser.detail("2").is_none());
}

#[tokio::test]
async fn load_failure_reports_user_message() {
    let dir = tempfile::tempdir().unwrap();
    let missing = CatalogSource::FilePath(dir.path().join("none.json").to_string_lossy().to_string());
    let err = store::load(&missing, Duration::from_secs(1)).await.unwrap_err();
    assert!(matches!(err, LoadError::Read { .. }));
    assert_eq!(
        err.user_message(),
        "Failed to load data. Please check the console."
    );

    let broken = dir.path().join("broken.json");
    std::fs::write(&broken, "[{").unwrap();
    let err = store::load(
        &CatalogSource::FilePath(broken.to_string_lossy().to_string()),
        Duration::from_secs(1),
    )
    .await
    .unwrap_err();
    assert!(matches!(err, LoadError::Parse { .. }));

    let status = LoadError::Status {
        url: "http://x/data.json".to_string(),
        status: 404,
    };
    assert_eq!(
        status.user_message(),
        "Error loading packs. Please check the console."
    );
}

#[tokio::test]
async fn interactive_session_follows_commands() {
    colored::control::set_override(false);
    let mut browser = Browser::new(numbered(25), 10);
    let input: &[u8] = b"next\nsearch pack 2\nbogus\ninfo 3\nfacets\nquit\nnext\n";
    let mut out: Vec<u8> = Vec::new();
    crate::app::run_interactive(&mut browser, input, &mut out, OutputFormat::Text)
        .await
        .unwrap();
    let text = String::from_utf8(out).unwrap();
    assert!(text.contains("Pack 11 by maker"));
    assert!(text.contains("unknown command 'bogus'"));
    assert!(text.contains("Resolution:"));
    assert!(text.contains("resolutions:"));
    // quit stops before the trailing next
    assert_eq!(browser.current_page().page, 1);
    assert_eq!(browser.query().free_text, "pack 2");
    // "pack 2", "pack 20".."pack 25"
    assert_eq!(browser.matched(), 7);
}
