use std::time::Instant;

use log::{debug, trace, warn};

use crate::host::{ElementTree, StyleSheet, FONT_FAMILY};
use crate::parse::{rewrite_with, RewriteOptions};
use crate::{ElementOutcome, Replacements, SheetOutcome, TraversalSummary};

/// Reads font values from the host, rewrites them and writes back only the
/// ones that actually changed.
///
/// A value counts as changed when the rewrite differs from the original
/// ignoring letter case; anything else is left alone so the host does not
/// invalidate styles for nothing.
#[derive(Debug, Clone, Copy)]
pub struct Applier<'r> {
    replacements: &'r Replacements,
    options: RewriteOptions,
    debug: bool,
}

impl<'r> Applier<'r> {
    #[must_use]
    pub fn new(replacements: &'r Replacements) -> Self {
        Self {
            replacements,
            options: RewriteOptions::default(),
            debug: false,
        }
    }

    #[must_use]
    pub fn with_options(mut self, options: RewriteOptions) -> Self {
        self.options = options;
        self
    }

    /// Log every write at `debug` instead of `trace`.
    #[must_use]
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// The rewritten value, or `None` when it equals `original` ignoring case.
    fn changed(&self, original: &str) -> Option<String> {
        let rewritten = rewrite_with(original, self.replacements, self.options);
        if rewritten.to_lowercase() == original.to_lowercase() {
            None
        } else {
            Some(rewritten)
        }
    }

    fn log_write(&self, target: &str, from: &str, to: &str) {
        if self.debug {
            debug!("{target}: '{from}' -> '{to}'");
        } else {
            trace!("{target}: '{from}' -> '{to}'");
        }
    }

    /// Rewrite the computed `font-family` of a single element.
    pub fn apply_to_element<T: ElementTree + ?Sized>(
        &self,
        tree: &mut T,
        element: &T::Element,
    ) -> ElementOutcome {
        let original = match tree.computed_font_family(element) {
            Some(value) if !value.is_empty() => value,
            _ => return ElementOutcome::NoValue,
        };
        match self.changed(&original) {
            Some(rewritten) => {
                tree.set_inline_font_family(element, &rewritten);
                self.log_write("element", &original, &rewritten);
                ElementOutcome::Rewritten {
                    from: original,
                    to: rewritten,
                }
            }
            None => ElementOutcome::Unchanged,
        }
    }

    /// Depth-first, pre-order walk of `root` and all its descendants.
    ///
    /// Uses an explicit stack, so deep trees cannot exhaust the call stack.
    /// Non-element children are not visited.
    pub fn apply_to_tree<T: ElementTree + ?Sized>(
        &self,
        tree: &mut T,
        root: &T::Element,
    ) -> TraversalSummary {
        let start = Instant::now();
        let mut summary = TraversalSummary::default();
        let mut stack = vec![root.clone()];

        while let Some(element) = stack.pop() {
            let outcome = self.apply_to_element(tree, &element);
            summary.record_element(&outcome);
            let children = tree.children(&element);
            stack.extend(children.into_iter().rev().filter(|c| tree.is_element(c)));
        }

        summary.set_duration(start.elapsed());
        summary
    }

    fn apply_to_declaration<S: StyleSheet + ?Sized>(
        &self,
        sheet: &mut S,
        rule: usize,
        name: &str,
    ) -> bool {
        let Some(declaration) = sheet.property(rule, name) else {
            return false;
        };
        if declaration.value.is_empty() {
            return false;
        }
        match self.changed(&declaration.value) {
            Some(rewritten) => {
                sheet.set_property(rule, name, &rewritten, declaration.important);
                self.log_write(name, &declaration.value, &rewritten);
                true
            }
            None => false,
        }
    }

    /// Rewrite `font-family` and every `--*` custom property of every rule in
    /// `sheet`. Priority flags are kept.
    pub fn apply_to_style_sheet<S: StyleSheet + ?Sized>(&self, sheet: &mut S) -> SheetOutcome {
        let rules = match sheet.rule_count() {
            Ok(count) => count,
            Err(err) => {
                warn!("{err}");
                return SheetOutcome::Inaccessible(err);
            }
        };

        let mut rewritten = 0;
        for rule in 0..rules {
            if self.apply_to_declaration(sheet, rule, FONT_FAMILY) {
                rewritten += 1;
            }
            let custom: Vec<String> = sheet
                .property_names(rule)
                .into_iter()
                .filter(|name| name.starts_with("--"))
                .collect();
            for name in &custom {
                if self.apply_to_declaration(sheet, rule, name) {
                    rewritten += 1;
                }
            }
        }

        SheetOutcome::Processed { rules, rewritten }
    }

    /// Apply [`apply_to_style_sheet`](Self::apply_to_style_sheet) to every
    /// sheet. Unreadable sheets are recorded and skipped.
    pub fn apply_to_style_sheets<'s, S, I>(&self, sheets: I) -> TraversalSummary
    where
        S: StyleSheet + ?Sized + 's,
        I: IntoIterator<Item = &'s mut S>,
    {
        let start = Instant::now();
        let mut summary = TraversalSummary::default();
        for sheet in sheets {
            summary.record_sheet(self.apply_to_style_sheet(sheet));
        }
        summary.set_duration(start.elapsed());
        summary
    }
}
