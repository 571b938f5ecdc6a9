use super::ScoredItem;

pub const MAX_ALTERNATIVES: usize = 3;
/// How many alternatives must come from outside the top pick's category
/// before same-category items are admitted.
pub const DIVERSE_ALTERNATIVES: usize = 2;

/// Pick alternatives from `rest`, the ranked items after the top pick.
///
/// The first pass prefers other categories until enough diverse picks exist.
/// When the catalog cannot supply them, a second pass fills the remaining
/// slots in rank order with whatever is left.
pub(crate) fn select_alternatives<'a>(
    top: &ScoredItem,
    rest: &'a [ScoredItem],
) -> Vec<&'a ScoredItem> {
    let mut chosen: Vec<&ScoredItem> = Vec::with_capacity(MAX_ALTERNATIVES);

    for item in rest {
        if chosen.len() >= MAX_ALTERNATIVES {
            break;
        }
        if chosen.len() < DIVERSE_ALTERNATIVES && item.category == top.category {
            continue;
        }
        chosen.push(item);
    }

    if chosen.len() < DIVERSE_ALTERNATIVES {
        for item in rest {
            if chosen.len() >= MAX_ALTERNATIVES {
                break;
            }
            if !chosen.iter().any(|picked| picked.slug == item.slug) {
                chosen.push(item);
            }
        }
    }

    chosen
}
