//! Criteria aggregation.
//!
//! Enabled filter rules are folded, in ascending `order`, into one criteria map.
//! When two enabled rules constrain the same field the one with the greater
//! order wins. No enabled rule means an empty map, which filters nothing.

use crate::model::{Criteria, FilterRule};

/// Merges the criteria of every enabled rule in `rules`.
///
/// `rules` may come in any order; equal orders fall back to id order so the
/// result depends only on the rule set itself.
pub fn aggregate(rules: &[FilterRule]) -> Criteria {
    let mut enabled: Vec<&FilterRule> = rules.iter().filter(|rule| rule.enabled).collect();
    enabled.sort_by(|a, b| a.order.cmp(&b.order).then_with(|| a.id.cmp(&b.id)));

    enabled.into_iter().fold(Criteria::new(), |mut acc, rule| {
        acc.extend(
            rule.criteria
                .iter()
                .map(|(field, expected)| (field.clone(), expected.clone())),
        );
        acc
    })
}
