//! Property-based invariant tests for TabGroup.
//!
//! 1. Any non-empty set of unique values constructs, and the selection is one
//!    of the configured values.
//! 2. After any sequence of selections exactly one pane is visible, and it is
//!    the selected one.
//! 3. KeepMounted keeps every mount id stable; ActiveOnly mounts one pane.
//! 4. Arrow navigation is modular arithmetic over the tab count.
//! 5. Groups sharing an id always agree after every select.

use proptest::prelude::*;
use tabsync_core::event::{KeyCode, KeyEvent};
use tabsync_runtime::PageSession;
use tabsync_widgets::{MountStrategy, PaneVisibility, Tab, TabGroup, TabGroupConfig};

// ── Strategies ────────────────────────────────────────────────────────────

fn values_strategy() -> impl Strategy<Value = Vec<String>> {
    prop::collection::hash_set("[a-z]{1,6}", 1..8).prop_map(|set| set.into_iter().collect())
}

fn mount_strategy() -> impl Strategy<Value = MountStrategy> {
    prop_oneof![
        Just(MountStrategy::KeepMounted),
        Just(MountStrategy::ActiveOnly)
    ]
}

fn build(values: &[String], default_flag: Option<usize>, mount: MountStrategy) -> TabGroup<usize> {
    let tabs = values
        .iter()
        .enumerate()
        .map(|(idx, v)| Tab::new(v.clone(), idx).default(default_flag == Some(idx)));
    TabGroup::new(tabs, TabGroupConfig::new(mount)).expect("unique non-empty values")
}

proptest! {
    #[test]
    fn construction_selects_a_configured_value(
        values in values_strategy(),
        flag in any::<prop::sample::Index>(),
        use_flag in any::<bool>(),
        mount in mount_strategy(),
    ) {
        let flag_idx = use_flag.then(|| flag.index(values.len()));
        let group = build(&values, flag_idx, mount);
        prop_assert!(values.iter().any(|v| v == group.selected_value()));
        let expected = flag_idx.unwrap_or(0);
        prop_assert_eq!(group.selected_value(), values[expected].as_str());
    }

    #[test]
    fn exactly_one_visible_pane_after_selections(
        values in values_strategy(),
        picks in prop::collection::vec(any::<prop::sample::Index>(), 0..20),
        mount in mount_strategy(),
    ) {
        let mut group = build(&values, None, mount);
        let initial_ids: Vec<_> = values.iter().map(|v| group.mount_id(v)).collect();

        for pick in picks {
            let value = values[pick.index(values.len())].clone();
            group.select(&value).expect("configured value");
            prop_assert_eq!(group.selected_value(), value.as_str());

            let panes = group.panes();
            let visible: Vec<_> = panes
                .iter()
                .filter(|p| p.visibility == PaneVisibility::Visible)
                .collect();
            prop_assert_eq!(visible.len(), 1);
            prop_assert_eq!(visible[0].value, value.as_str());
            prop_assert_eq!(*visible[0].content, group.selected_index());

            match mount {
                MountStrategy::KeepMounted => {
                    prop_assert_eq!(panes.len(), values.len());
                    let ids: Vec<_> = values.iter().map(|v| group.mount_id(v)).collect();
                    prop_assert_eq!(&ids, &initial_ids);
                }
                MountStrategy::ActiveOnly => prop_assert_eq!(panes.len(), 1),
            }
        }
    }

    #[test]
    fn arrow_navigation_wraps_modulo_len(
        values in values_strategy(),
        start in any::<prop::sample::Index>(),
        rights in 0usize..20,
        lefts in 0usize..20,
    ) {
        let n = values.len();
        let start = start.index(n);
        let mut group = build(&values, None, MountStrategy::KeepMounted);
        group.focus(&values[start]).expect("configured value");
        for _ in 0..rights {
            prop_assert!(group.handle_key(&KeyEvent::new(KeyCode::Right)));
        }
        for _ in 0..lefts {
            prop_assert!(group.handle_key(&KeyEvent::new(KeyCode::Left)));
        }
        let expected = (start + rights + n * lefts - lefts) % n;
        prop_assert_eq!(group.focused_value(), Some(values[expected].as_str()));
    }

    #[test]
    fn grouped_instances_agree(
        values in values_strategy(),
        picks in prop::collection::vec((0usize..3, any::<prop::sample::Index>()), 1..20),
    ) {
        let session = PageSession::new();
        let config = TabGroupConfig::new(MountStrategy::KeepMounted).group_id("g");
        let mut groups: Vec<TabGroup<()>> = (0..3)
            .map(|_| {
                let tabs = values.iter().map(|v| Tab::new(v.clone(), ()));
                TabGroup::in_session(tabs, config.clone(), &session).expect("valid group")
            })
            .collect();

        for (who, pick) in picks {
            let value = values[pick.index(values.len())].clone();
            groups[who].select(&value).expect("configured value");
            for group in &groups {
                prop_assert_eq!(group.selected_value(), value.as_str());
            }
        }
    }
}
