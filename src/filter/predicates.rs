use crate::model::Pack;

use super::{searchable_creators, Facet, QueryState, SearchTerms};

pub(in crate::filter) fn matches(pack: &Pack, terms: &SearchTerms, query: &QueryState) -> bool {
    if !pack.is_listable() {
        return false;
    }
    matches_text(pack, &terms.text)
        && matches_creator(pack, &terms.creator)
        && matches_resolution(pack, &query.resolution)
        && matches_type(pack, &query.pack_type)
        && matches_featured(pack, &query.featured)
}

fn matches_text(pack: &Pack, text: &str) -> bool {
    text.is_empty() || pack.name_or_empty().to_lowercase().contains(text)
}

fn matches_creator(pack: &Pack, creator: &str) -> bool {
    creator.is_empty() || searchable_creators(pack).contains(creator)
}

fn matches_resolution(pack: &Pack, facet: &Facet) -> bool {
    match facet.value() {
        None => true,
        Some(tier) => pack.resolution.as_ref().is_some_and(|r| r.contains(tier)),
    }
}

fn matches_type(pack: &Pack, facet: &Facet) -> bool {
    match facet.value() {
        None => true,
        Some(wanted) => pack.type_key() == wanted,
    }
}

// Any selected value narrows to featured packs; "not featured" is not selectable.
fn matches_featured(pack: &Pack, facet: &Facet) -> bool {
    facet.is_all() || pack.featured
}
