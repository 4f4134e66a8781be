//! Deferred-group and merge-key indexes derived from the prop list.

use std::collections::BTreeMap;

use super::Prop;

/// Group → keys for every deferred prop.
///
/// Only advertised on full renders; a partial request already learned its
/// deferred groups from the initial render.
pub(crate) fn deferred_index(props: &[Prop]) -> BTreeMap<String, Vec<String>> {
    let mut index: BTreeMap<String, Vec<String>> = BTreeMap::new();

    for prop in props {
        if !prop.is_deferred() {
            continue;
        }

        index
            .entry(prop.group_name().to_string())
            .or_default()
            .push(prop.key().to_string());
    }

    index
}

/// Ordered keys of props the client should merge rather than replace.
///
/// Keys listed in the request's reset list are excluded for this response
/// only; the reset list never removes the prop's value.
pub(crate) fn merge_keys(props: &[Prop], reset: Option<&[String]>) -> Vec<String> {
    let reset = reset.unwrap_or(&[]);
    let mut keys = Vec::new();

    for prop in props {
        if !prop.is_mergeable() || reset.iter().any(|key| key == prop.key()) {
            continue;
        }

        keys.push(prop.key().to_string());
    }

    keys
}
