use std::time::{Duration, Instant};

use log::info;

use crate::apply::Applier;
use crate::config::Config;
use crate::host::{ElementTree, StyleSheet};
use crate::parse::RewriteOptions;
use crate::watch::{MutationWatcher, WatchPlan};
use crate::{Replacements, Rule, RuleStore, TraversalSummary};

/// Everything decided once per page: the active rule and how to rewrite.
///
/// A session is built after the configuration and the page URL are known and
/// stays immutable for the page's lifetime. It is `Send + Sync` and can be
/// shared behind an `Arc` if the host needs to.
#[derive(Debug, Clone)]
pub struct Session {
    rule: Rule,
    options: RewriteOptions,
}

impl Session {
    /// Start a session from a configuration blob.
    ///
    /// Returns `None` when the configuration is disabled, no rule matches
    /// `url`, or the matching rule has no replacements.
    #[must_use]
    pub fn start(config: &Config, url: &str) -> Option<Self> {
        if !config.enabled {
            info!("disabled globally");
            return None;
        }
        Self::for_url(&config.rule_store(), url)
    }

    /// Start a session from an already built store.
    #[must_use]
    pub fn for_url(store: &RuleStore, url: &str) -> Option<Self> {
        match store.select(url) {
            Some(rule) if !rule.replacements().is_empty() => Some(Self {
                rule: rule.clone(),
                options: RewriteOptions::default(),
            }),
            _ => {
                info!("disabled for {url}");
                None
            }
        }
    }

    #[must_use]
    pub fn with_options(mut self, options: RewriteOptions) -> Self {
        self.options = options;
        self
    }

    /// The active rule.
    #[must_use]
    pub fn rule(&self) -> &Rule {
        &self.rule
    }

    #[must_use]
    pub fn replacements(&self) -> &Replacements {
        self.rule.replacements()
    }

    #[must_use]
    pub fn applier(&self) -> Applier<'_> {
        Applier::new(self.rule.replacements())
            .with_options(self.options)
            .with_debug(self.rule.flags().debug)
    }

    /// How long the host should wait before [`initial_pass`](Self::initial_pass)
    /// and before subscribing the watchers.
    #[must_use]
    pub fn startup_delay(&self) -> Duration {
        self.rule.flags().delay()
    }

    /// Which change notifications the host should subscribe to.
    #[must_use]
    pub fn watch_plan(&self) -> WatchPlan {
        let flags = self.rule.flags();
        WatchPlan {
            body: !flags.skip_observer,
            styles: !flags.skip_observer_css,
        }
    }

    #[must_use]
    pub fn watcher(&self) -> MutationWatcher<'_> {
        MutationWatcher::new(self)
    }

    /// The first full pass: every accessible stylesheet, then the whole body,
    /// each unless the active rule skips it.
    pub fn initial_pass<'s, T, S, I>(
        &self,
        tree: &mut T,
        body: &T::Element,
        sheets: I,
    ) -> TraversalSummary
    where
        T: ElementTree + ?Sized,
        S: StyleSheet + ?Sized + 's,
        I: IntoIterator<Item = &'s mut S>,
    {
        let start = Instant::now();
        let flags = self.rule.flags();
        let applier = self.applier();
        let mut summary = TraversalSummary::default();

        if !flags.skip_styles {
            summary.merge(applier.apply_to_style_sheets(sheets));
        }
        if !flags.skip_body {
            summary.merge(applier.apply_to_tree(tree, body));
        }

        summary.set_duration(start.elapsed());
        if flags.debug {
            info!("initial pass for {}: {summary}", self.rule.pattern().source());
        }
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RuleConfig;
    use crate::RuleStoreBuilder;

    #[test]
    fn disabled_config_has_no_session() {
        let config = Config {
            enabled: false,
            ..Config::default()
        };
        assert!(Session::start(&config, "https://example.com/").is_none());
    }

    #[test]
    fn default_config_matches_everything() {
        let session = Session::start(&Config::default(), "https://example.com/").unwrap();
        assert_eq!(session.rule().pattern().source(), ".*");
        assert_eq!(session.replacements().get("roboto"), Some("Verdana"));
    }

    #[test]
    fn gitlab_rule_wins_on_gitlab() {
        let session = Session::start(&Config::default(), "https://gitlab.com/a/b").unwrap();
        assert_eq!(session.replacements().len(), 3);
    }

    #[test]
    fn empty_replacements_are_inert() {
        let config = Config {
            enabled: true,
            font_config: vec![
                RuleConfig::new("example", Replacements::new()),
                RuleConfig::new(".*", Replacements::new().with("A", "B")),
            ],
        };
        assert!(Session::start(&config, "https://example.com/").is_none());
        assert!(Session::start(&config, "https://other.org/").is_some());
    }

    #[test]
    fn plan_and_delay_follow_flags() {
        let store = RuleStoreBuilder::new()
            .rule(".*", |r| {
                r.replace("A", "B")
                    .skip_observer_css(true)
                    .delay_ms(1500)
            })
            .build();
        let session = Session::for_url(&store, "https://x.dev/").unwrap();
        assert_eq!(session.startup_delay(), Duration::from_millis(1500));
        assert_eq!(
            session.watch_plan(),
            WatchPlan {
                body: true,
                styles: false
            }
        );
    }

    #[test]
    fn session_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Session>();
    }
}
