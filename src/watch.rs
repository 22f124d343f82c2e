//! Callbacks the host invokes when the page changes.
//!
//! The host owns the change-notification machinery (a `MutationObserver` in
//! a browser) and forwards what it sees:
//!
//! ```text
//! body childList/subtree  ──▶ on_nodes_added / on_subtree_inserted ──▶ element walk of the new subtree
//! head childList/subtree  ──▶ on_head_node_added
//!                                ├─ <style>            ──▶ sheet pass now
//!                                ├─ <link stylesheet>  ──▶ AwaitLoad ── load event ──▶ on_style_sheet_available
//!                                └─ anything else      ──▶ Ignored
//! ```
//!
//! Each scope is inert when the active rule disables it.

use log::debug;

use crate::host::{ElementTree, StyleSheet};
use crate::session::Session;
use crate::{SheetOutcome, TraversalSummary};

/// Which observation scopes the host should subscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WatchPlan {
    /// Watch the body for inserted elements.
    pub body: bool,
    /// Watch the head for inserted `<style>` and stylesheet `<link>` nodes.
    pub styles: bool,
}

/// A node inserted under the document head.
#[derive(Debug)]
pub enum HeadNode<'a, S: ?Sized> {
    /// A `<style>` element with its (already parsed) sheet.
    Style(&'a mut S),
    /// A `<link rel="stylesheet">`; its sheet exists only after it loads.
    StylesheetLink,
    Other,
}

/// What the host should do after reporting a head insertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeadOutcome {
    Applied(SheetOutcome),
    /// Call [`MutationWatcher::on_style_sheet_available`] once the link fires
    /// its load event.
    AwaitLoad,
    Ignored,
}

/// Re-applies the active rule to content inserted after the initial pass.
#[derive(Debug, Clone, Copy)]
pub struct MutationWatcher<'s> {
    session: &'s Session,
    plan: WatchPlan,
}

impl<'s> MutationWatcher<'s> {
    #[must_use]
    pub fn new(session: &'s Session) -> Self {
        Self {
            session,
            plan: session.watch_plan(),
        }
    }

    #[must_use]
    pub fn plan(&self) -> WatchPlan {
        self.plan
    }

    /// Walk a single inserted subtree. Cost is proportional to the subtree,
    /// not the page.
    pub fn on_subtree_inserted<T: ElementTree + ?Sized>(
        &self,
        tree: &mut T,
        node: &T::Element,
    ) -> TraversalSummary {
        if !self.plan.body || !tree.is_element(node) {
            return TraversalSummary::default();
        }
        self.session.applier().apply_to_tree(tree, node)
    }

    /// Process every node of one mutation delivery before returning.
    pub fn on_nodes_added<T: ElementTree + ?Sized>(
        &self,
        tree: &mut T,
        nodes: &[T::Element],
    ) -> TraversalSummary {
        let mut summary = TraversalSummary::default();
        for node in nodes {
            summary.merge(self.on_subtree_inserted(tree, node));
        }
        if summary.elements_rewritten() > 0 {
            debug!("inserted nodes: {summary}");
        }
        summary
    }

    /// React to a node inserted under the document head.
    pub fn on_head_node_added<S: StyleSheet + ?Sized>(&self, node: HeadNode<'_, S>) -> HeadOutcome {
        if !self.plan.styles {
            return HeadOutcome::Ignored;
        }
        match node {
            HeadNode::Style(sheet) => {
                HeadOutcome::Applied(self.session.applier().apply_to_style_sheet(sheet))
            }
            HeadNode::StylesheetLink => HeadOutcome::AwaitLoad,
            HeadNode::Other => HeadOutcome::Ignored,
        }
    }

    /// A linked sheet finished loading. Unreadable sheets come back as
    /// [`SheetOutcome::Inaccessible`]. Nothing is touched when the style scope
    /// is disabled.
    pub fn on_style_sheet_available<S: StyleSheet + ?Sized>(&self, sheet: &mut S) -> SheetOutcome {
        if !self.plan.styles {
            return SheetOutcome::Processed {
                rules: 0,
                rewritten: 0,
            };
        }
        self.session.applier().apply_to_style_sheet(sheet)
    }
}
