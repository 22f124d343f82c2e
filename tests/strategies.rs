#![allow(dead_code)]

use proptest::prelude::*;
use refont::Replacements;

/// A bare font name: letters, digits and hyphens, optionally a few words.
pub fn arb_font_name() -> impl Strategy<Value = String> {
    "[A-Za-z][A-Za-z0-9-]{0,8}( [A-Za-z0-9]{1,6}){0,2}"
}

/// One entry as it may appear in a declaration, paired with its bare name.
///
/// The raw text is the name, optionally quoted, with surrounding whitespace.
pub fn arb_entry() -> impl Strategy<Value = (String, String)> {
    (arb_font_name(), 0_u8..3, " {0,2}", " {0,2}").prop_map(|(name, quote, lead, trail)| {
        let quoted = match quote {
            0 => name.clone(),
            1 => format!("\"{name}\""),
            _ => format!("'{name}'"),
        };
        (format!("{lead}{quoted}{trail}"), name)
    })
}

/// A comma-separated declaration value, paired with the bare names in order.
pub fn arb_font_list() -> impl Strategy<Value = (String, Vec<String>)> {
    prop::collection::vec(arb_entry(), 1..6).prop_map(|entries| {
        let raw = entries
            .iter()
            .map(|(raw, _)| raw.as_str())
            .collect::<Vec<_>>()
            .join(",");
        let names = entries.into_iter().map(|(_, name)| name).collect();
        (raw, names)
    })
}

/// A list together with a replacement table keyed on a subset of its names.
pub fn arb_list_with_replacements() -> impl Strategy<Value = (String, Vec<String>, Replacements)>
{
    arb_font_list().prop_flat_map(|(raw, names)| {
        let n = names.len();
        prop::collection::vec(any::<bool>(), n).prop_map(move |pick| {
            let replacements = names
                .iter()
                .zip(&pick)
                .enumerate()
                .filter(|(_, (_, keep))| **keep)
                .map(|(i, (name, _))| (name.clone(), format!("Replaced{i}")))
                .collect();
            (raw.clone(), names.clone(), replacements)
        })
    })
}
