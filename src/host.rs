//! Traits the host environment implements so the crate can read and write
//! font values without owning a DOM.
//!
//! A browser binding would back these with `getComputedStyle`,
//! `element.style` and `CSSStyleSheet.cssRules`; tests back them with plain
//! in-memory trees.

use crate::SheetAccessError;

/// Name of the standard property the crate rewrites.
pub const FONT_FAMILY: &str = "font-family";

/// An element tree such as a document body.
pub trait ElementTree {
    /// Handle to one node in the tree.
    type Element: Clone;

    /// Child elements in document order.
    fn children(&self, element: &Self::Element) -> Vec<Self::Element>;

    /// Effective (computed) `font-family` of the element, if it has one.
    fn computed_font_family(&self, element: &Self::Element) -> Option<String>;

    /// Write an inline `font-family` override.
    fn set_inline_font_family(&mut self, element: &Self::Element, value: &str);

    /// Whether the node is an element. Mutation deliveries can also carry
    /// text and comment nodes, which are ignored.
    fn is_element(&self, _node: &Self::Element) -> bool {
        true
    }
}

/// A declared property value on a style rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    pub value: String,
    /// The `!important` flag.
    pub important: bool,
}

impl Declaration {
    pub fn new(value: impl Into<String>, important: bool) -> Self {
        Self {
            value: value.into(),
            important,
        }
    }
}

/// A stylesheet whose style rules are addressed by index.
///
/// Rules without a style block (for example `@import`) simply report no
/// properties.
pub trait StyleSheet {
    /// URL of the sheet, `None` for inline `<style>` sheets.
    fn href(&self) -> Option<&str>;

    /// Number of rules.
    ///
    /// # Errors
    ///
    /// Returns [`SheetAccessError`] when the rules cannot be read, for
    /// example for a cross-origin sheet.
    fn rule_count(&self) -> Result<usize, SheetAccessError>;

    /// Names of the properties declared on rule `rule`.
    fn property_names(&self, rule: usize) -> Vec<String>;

    /// Declared value of `name` on rule `rule`.
    fn property(&self, rule: usize, name: &str) -> Option<Declaration>;

    /// Replace the value of `name` on rule `rule`, with the given priority.
    fn set_property(&mut self, rule: usize, name: &str, value: &str, important: bool);
}
