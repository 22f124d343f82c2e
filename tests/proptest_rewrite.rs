mod strategies;

use proptest::prelude::*;
use refont::{rewrite, Replacements};
use strategies::{arb_font_list, arb_font_name, arb_list_with_replacements};

proptest! {
    /// Without a match, the output is the trimmed, unquoted names joined by ", ".
    #[test]
    fn no_match_restates_names((raw, names) in arb_font_list()) {
        prop_assert_eq!(rewrite(&raw, &Replacements::new()), names.join(", "));
    }

    /// Rewriting a value with no matching names twice gives the same text.
    #[test]
    fn no_match_is_idempotent((raw, _names) in arb_font_list()) {
        let empty = Replacements::new();
        let once = rewrite(&raw, &empty);
        prop_assert_eq!(rewrite(&once, &empty), once);
    }

    /// Each entry is replaced exactly when its name is a key, ignoring case.
    #[test]
    fn replaces_matching_entries((raw, names, table) in arb_list_with_replacements()) {
        let expected: Vec<&str> = names
            .iter()
            .map(|name| table.get(name).unwrap_or(name))
            .collect();
        prop_assert_eq!(rewrite(&raw, &table), expected.join(", "));
    }

    #[test]
    fn lookup_ignores_case(name in arb_font_name()) {
        let table: Replacements = [(name.as_str(), "Target")].into_iter().collect();
        prop_assert_eq!(rewrite(&name.to_uppercase(), &table), "Target");
        prop_assert_eq!(rewrite(&format!("'{}'", name.to_lowercase()), &table), "Target");
    }

    /// A `var()` wrapper is kept and only its contents are rewritten.
    #[test]
    fn var_wrapper_preserved((raw, names) in arb_font_list()) {
        let value = format!("var(--font,{})", raw.trim_end());
        prop_assert_eq!(
            rewrite(&value, &Replacements::new()),
            format!("var(--font, {})", names.join(", "))
        );
    }

    /// Arbitrary input never panics, and empty input stays empty.
    #[test]
    fn arbitrary_input_does_not_panic(value in any::<String>()) {
        let table: Replacements = [("Arial", "Verdana")].into_iter().collect();
        let out = rewrite(&value, &table);
        if value.is_empty() {
            prop_assert!(out.is_empty());
        }
    }

    /// Deeply nested `var()` fallbacks are bounded and do not overflow.
    #[test]
    fn nested_var_does_not_overflow(depth in 1_usize..200) {
        let value = format!("{}Arial{}", "var(--x,".repeat(depth), ")".repeat(depth));
        let _ = rewrite(&value, &Replacements::new());
    }
}
