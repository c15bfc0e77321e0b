mod predicates;

use std::fmt;
use std::sync::OnceLock;

use itertools::Itertools;
use regex::Regex;
use serde::Serialize;

use crate::format;
use crate::model::Pack;

pub const ALL: &str = "all";

static CREATOR_TOKEN: OnceLock<Regex> = OnceLock::new();

fn creator_token_regex() -> &'static Regex {
    CREATOR_TOKEN.get_or_init(|| {
        Regex::new(r"by:\s*([a-z0-9_.-]+)").expect("valid creator pattern")
    })
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(into = "String")]
pub enum Facet {
    #[default]
    All,
    Only(String),
}

impl Facet {
    pub fn parse(value: &str) -> Self {
        let value = value.trim();
        if value.is_empty() || value == ALL {
            Facet::All
        } else {
            Facet::Only(value.to_string())
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, Facet::All)
    }

    pub fn value(&self) -> Option<&str> {
        match self {
            Facet::All => None,
            Facet::Only(v) => Some(v),
        }
    }
}

impl fmt::Display for Facet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.value().unwrap_or(ALL))
    }
}

impl From<Facet> for String {
    fn from(facet: Facet) -> Self {
        facet.to_string()
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct QueryState {
    pub free_text: String,
    pub resolution: Facet,
    #[serde(rename = "type")]
    pub pack_type: Facet,
    // Any value other than `all` means featured only.
    pub featured: Facet,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct SearchTerms {
    pub text: String,
    pub creator: String,
}

impl SearchTerms {
    pub fn parse(raw: &str) -> Self {
        let full = raw.to_lowercase();
        let Some(caps) = creator_token_regex().captures(&full) else {
            return Self {
                text: full,
                creator: String::new(),
            };
        };
        let (Some(whole), Some(token)) = (caps.get(0), caps.get(1)) else {
            return Self {
                text: full,
                creator: String::new(),
            };
        };
        let mut text = String::with_capacity(full.len());
        text.push_str(&full[..whole.start()]);
        text.push_str(&full[whole.end()..]);
        Self {
            text: text.trim().to_string(),
            creator: token.as_str().trim().to_string(),
        }
    }
}

pub fn apply(items: &[Pack], query: &QueryState) -> Vec<usize> {
    let terms = SearchTerms::parse(&query.free_text);
    tracing::debug!(
        text = %terms.text,
        creator = %terms.creator,
        resolution = %query.resolution,
        pack_type = %query.pack_type,
        featured = %query.featured,
        "filtering packs"
    );
    let matched: Vec<usize> = items
        .iter()
        .enumerate()
        .filter(|(_, pack)| predicates::matches(pack, &terms, query))
        .map(|(idx, _)| idx)
        .collect();
    tracing::debug!(matched = matched.len(), total = items.len(), "filter pass done");
    matched
}

pub fn apply_packs<'a>(items: &'a [Pack], query: &QueryState) -> Vec<&'a Pack> {
    apply(items, query).into_iter().map(|i| &items[i]).collect()
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct FacetOptions {
    pub resolutions: Vec<String>,
    pub types: Vec<String>,
}

impl FacetOptions {
    pub fn collect(items: &[Pack]) -> Self {
        let listable = || items.iter().filter(|p| p.is_listable());
        let resolutions = listable()
            .filter_map(|p| p.resolution.as_ref())
            .flat_map(|r| r.tiers().iter().cloned())
            .unique()
            .collect();
        let types = listable()
            .map(Pack::type_key)
            .filter(|t| !t.is_empty())
            .unique()
            .collect();
        Self { resolutions, types }
    }
}

pub(crate) fn searchable_creators(pack: &Pack) -> String {
    format::format_searchable(pack.creators.as_deref())
}
