#![forbid(unsafe_code)]

//! Tab group widget.
//!
//! A horizontal row of labels with exactly one visible pane. Groups can share
//! their selection through a [`SelectionStore`] keyed by group id, and can
//! mirror it into a query-string parameter of the page [`Location`].
//!
//! # Initial selection
//!
//! The first rule that yields a value matching one of the tabs wins:
//!
//! 1. the configured query-string parameter,
//! 2. the value stored for the group id,
//! 3. the explicit default value,
//! 4. the tab marked default,
//! 5. the first tab.
//!
//! Query and registry values that match no tab are skipped. An explicit
//! default that matches no tab is a configuration error.
//!
//! # Synchronization
//!
//! [`TabGroup::select`] writes to the registry and location before returning,
//! and every other group bound to them follows synchronously. A group that
//! takes its value from the query string, at construction or on navigation,
//! also writes that value to the registry so its peers agree. Following never
//! touches the location and never fires the `on_select` callback.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use ahash::AHashSet;
use tabsync_core::event::{KeyCode, KeyEvent, Modifiers};
use tabsync_runtime::{Location, PageSession, SelectionStore, Subscription};
use unicode_width::UnicodeWidthStr;

use crate::config::{MountStrategy, TabGroupConfig};
use crate::error::{Result, TabError};
use crate::focus::RovingFocus;
#[cfg(feature = "tracing")]
use std::time::Instant;

/// A single tab: a label paired with its pane content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tab<C> {
    value: String,
    label: String,
    content: C,
    default: bool,
}

impl<C> Tab<C> {
    /// Create a tab. The label defaults to the value.
    #[must_use]
    pub fn new(value: impl Into<String>, content: C) -> Self {
        let value = value.into();
        Self {
            label: value.clone(),
            value,
            content,
            default: false,
        }
    }

    /// Build a tab from a declarative spec.
    #[must_use]
    pub fn from_spec(spec: TabSpec, content: C) -> Self {
        let label = spec.label.unwrap_or_else(|| spec.value.clone());
        Self {
            value: spec.value,
            label,
            content,
            default: spec.default,
        }
    }

    /// Set display text.
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Mark this tab as the group default.
    #[must_use]
    pub fn default(mut self, is_default: bool) -> Self {
        self.default = is_default;
        self
    }

    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    #[must_use]
    pub fn content(&self) -> &C {
        &self.content
    }

    #[must_use]
    pub const fn is_default(&self) -> bool {
        self.default
    }
}

/// Content-free description of a tab, for declaring groups as data.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TabSpec {
    pub value: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub label: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub default: bool,
}

impl TabSpec {
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: None,
            default: false,
        }
    }
}

/// Identity of one mounting of a pane. A new id means fresh pane state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MountId(u64);

impl MountId {
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

/// Whether a mounted pane is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PaneVisibility {
    Visible,
    /// Mounted but hidden and inert.
    Hidden,
}

/// A mounted pane as the host should render it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaneView<'a, C> {
    pub value: &'a str,
    pub content: &'a C,
    pub visibility: PaneVisibility,
    pub mount_id: MountId,
}

/// A label as the host should render it (roving tab-index pattern).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TabLabel<'a> {
    pub value: &'a str,
    pub label: &'a str,
    pub selected: bool,
    pub focused: bool,
    /// `0` for the selected label, `-1` otherwise.
    pub tab_index: i8,
}

/// Full render output: every label plus every mounted pane.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedGroup<'a, C> {
    pub labels: Vec<TabLabel<'a>>,
    pub panes: Vec<PaneView<'a, C>>,
}

/// Shared state a group may bind to.
#[derive(Clone, Default)]
pub struct Bindings {
    pub store: Option<Rc<dyn SelectionStore>>,
    pub location: Option<Location>,
}

impl fmt::Debug for Bindings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Bindings")
            .field("store", &self.store.is_some())
            .field("location", &self.location)
            .finish()
    }
}

impl Bindings {
    /// Registry and location of a page session.
    #[must_use]
    pub fn from_session(session: &PageSession) -> Self {
        Self {
            store: Some(session.selections()),
            location: Some(session.location().clone()),
        }
    }

    #[must_use]
    pub fn with_store(mut self, store: Rc<dyn SelectionStore>) -> Self {
        self.store = Some(store);
        self
    }

    #[must_use]
    pub fn with_location(mut self, location: Location) -> Self {
        self.location = Some(location);
        self
    }
}

/// `mounts[selected]` is always `Some`.
#[derive(Debug)]
struct GroupState {
    selected: usize,
    focus: RovingFocus,
    mounts: Vec<Option<MountId>>,
    next_mount: u64,
    strategy: MountStrategy,
}

impl GroupState {
    fn new(selected: usize, len: usize, strategy: MountStrategy) -> Self {
        let mut state = Self {
            selected,
            focus: RovingFocus::new(len),
            mounts: vec![None; len],
            next_mount: 0,
            strategy,
        };
        if strategy.keeps_inactive() {
            (0..len).for_each(|idx| state.mount(idx));
        } else {
            state.mount(selected);
        }
        state
    }

    fn mount(&mut self, idx: usize) {
        self.next_mount += 1;
        self.mounts[idx] = Some(MountId(self.next_mount));
    }

    fn activate(&mut self, idx: usize) -> bool {
        if idx == self.selected {
            return false;
        }
        let previous = self.selected;
        self.selected = idx;
        if !self.strategy.keeps_inactive() {
            self.mounts[previous] = None;
            self.mount(idx);
        }
        true
    }
}

/// Callback that moves `state` to `value` when it names one of `values`.
#[cfg_attr(not(feature = "tracing"), allow(unused_variables))]
fn follower(
    state: &Rc<RefCell<GroupState>>,
    values: &Rc<[String]>,
    source: &'static str,
) -> impl Fn(&str) + 'static {
    let weak = Rc::downgrade(state);
    let values = Rc::clone(values);
    move |value: &str| {
        let Some(state) = weak.upgrade() else {
            return;
        };
        let Some(idx) = values.iter().position(|v| v == value) else {
            return;
        };
        if state.borrow_mut().activate(idx) {
            #[cfg(feature = "tracing")]
            tracing::debug!(message = "tab_group.sync", source, value);
        }
    }
}

fn validate<C>(tabs: &[Tab<C>], config: &TabGroupConfig) -> Result<Rc<[String]>> {
    if tabs.is_empty() {
        return Err(TabError::EmptyTabs);
    }

    let mut seen = AHashSet::with_capacity(tabs.len());
    let mut duplicates: Vec<&str> = Vec::new();
    for tab in tabs {
        if !seen.insert(tab.value()) && !duplicates.contains(&tab.value()) {
            duplicates.push(tab.value());
        }
    }
    if !duplicates.is_empty() {
        return Err(TabError::DuplicateValues {
            values: duplicates.join(", "),
        });
    }

    let defaults: Vec<&str> = tabs
        .iter()
        .filter(|tab| tab.is_default())
        .map(Tab::value)
        .collect();
    if defaults.len() > 1 {
        return Err(TabError::MultipleDefaults {
            values: defaults.join(", "),
        });
    }

    let values: Rc<[String]> = tabs.iter().map(|tab| tab.value.clone()).collect();
    if let Some(default) = &config.default_value
        && !values.contains(default)
    {
        return Err(TabError::InvalidDefault {
            value: default.clone(),
            expected: values.join(", "),
        });
    }
    Ok(values)
}

/// Tab group widget.
pub struct TabGroup<C> {
    tabs: Vec<Tab<C>>,
    values: Rc<[String]>,
    state: Rc<RefCell<GroupState>>,
    group_id: Option<String>,
    query_key: Option<String>,
    bindings: Bindings,
    on_select: Option<Box<dyn FnMut(&str)>>,
    _subscriptions: Vec<Subscription>,
}

impl<C: fmt::Debug> fmt::Debug for TabGroup<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TabGroup")
            .field("tabs", &self.tabs)
            .field("selected", &self.selected_value())
            .field("group_id", &self.group_id)
            .field("query_key", &self.query_key)
            .field("bindings", &self.bindings)
            .finish_non_exhaustive()
    }
}

impl<C> TabGroup<C> {
    /// Standalone group: no registry, no location.
    pub fn new(tabs: impl IntoIterator<Item = Tab<C>>, config: TabGroupConfig) -> Result<Self> {
        Self::build(tabs, config, Bindings::default())
    }

    /// Group bound to a page session's registry and location.
    pub fn in_session(
        tabs: impl IntoIterator<Item = Tab<C>>,
        config: TabGroupConfig,
        session: &PageSession,
    ) -> Result<Self> {
        Self::build(tabs, config, Bindings::from_session(session))
    }

    /// Group bound to explicit shared state.
    pub fn build(
        tabs: impl IntoIterator<Item = Tab<C>>,
        config: TabGroupConfig,
        bindings: Bindings,
    ) -> Result<Self> {
        let tabs: Vec<Tab<C>> = tabs.into_iter().collect();
        let values = validate(&tabs, &config)?;
        let query_key = config.resolved_query_key()?;
        let (selected, from_query) =
            Self::initial_index(&tabs, &values, &config, query_key.as_deref(), &bindings);
        let state = Rc::new(RefCell::new(GroupState::new(
            selected,
            tabs.len(),
            config.mount,
        )));

        let mut subscriptions = Vec::new();
        if let (Some(group), Some(store)) = (&config.group_id, &bindings.store) {
            let follow = follower(&state, &values, "registry");
            subscriptions.push(store.subscribe(group, Box::new(follow)));
        }
        // The registry must agree with whatever the location makes us show.
        let publisher = config.group_id.clone().zip(bindings.store.clone());
        if let (Some(key), Some(location)) = (&query_key, &bindings.location) {
            let follow = follower(&state, &values, "location");
            let known = Rc::clone(&values);
            let publisher = publisher.clone();
            let key = key.clone();
            subscriptions.push(location.subscribe(move |query| {
                let Some(value) = query.get(&key) else {
                    return;
                };
                follow(value);
                if let Some((group, store)) = &publisher
                    && known.iter().any(|v| v == value)
                {
                    store.set(group, value);
                }
            }));
        }
        if from_query && let Some((group, store)) = &publisher {
            store.set(group, &values[selected]);
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(
            message = "tab_group.init",
            group = config.group_id.as_deref(),
            selected = values[selected].as_str(),
            tab_count = tabs.len()
        );

        Ok(Self {
            tabs,
            values,
            state,
            group_id: config.group_id,
            query_key,
            bindings,
            on_select: None,
            _subscriptions: subscriptions,
        })
    }

    /// Starting index, and whether the query string supplied it.
    fn initial_index(
        tabs: &[Tab<C>],
        values: &[String],
        config: &TabGroupConfig,
        query_key: Option<&str>,
        bindings: &Bindings,
    ) -> (usize, bool) {
        let position = |value: &str| values.iter().position(|v| v == value);

        let from_query = query_key
            .zip(bindings.location.as_ref())
            .and_then(|(key, location)| location.param(key))
            .and_then(|value| position(&value));
        let from_registry = || {
            config
                .group_id
                .as_deref()
                .zip(bindings.store.as_ref())
                .and_then(|(group, store)| store.get(group))
                .and_then(|value| position(&value))
        };
        let from_default = || config.default_value.as_deref().and_then(position);
        let from_flag = || tabs.iter().position(Tab::is_default);

        if let Some(idx) = from_query {
            return (idx, true);
        }
        let idx = from_registry()
            .or_else(from_default)
            .or_else(from_flag)
            .unwrap_or(0);
        (idx, false)
    }

    /// Register the host callback fired after every successful selection.
    #[must_use]
    pub fn on_select(mut self, callback: impl FnMut(&str) + 'static) -> Self {
        self.on_select = Some(Box::new(callback));
        self
    }

    pub fn set_on_select(&mut self, callback: impl FnMut(&str) + 'static) {
        self.on_select = Some(Box::new(callback));
    }

    #[must_use]
    pub fn tabs(&self) -> &[Tab<C>] {
        &self.tabs
    }

    #[must_use]
    pub fn group_id(&self) -> Option<&str> {
        self.group_id.as_deref()
    }

    #[must_use]
    pub fn query_key(&self) -> Option<&str> {
        self.query_key.as_deref()
    }

    #[must_use]
    pub fn mount_strategy(&self) -> MountStrategy {
        self.state.borrow().strategy
    }

    #[must_use]
    pub fn selected_index(&self) -> usize {
        self.state.borrow().selected
    }

    /// Value of the active tab. Reflects registry updates made by other groups.
    #[must_use]
    pub fn selected_value(&self) -> &str {
        &self.values[self.selected_index()]
    }

    fn index_of(&self, value: &str) -> Result<usize> {
        self.values
            .iter()
            .position(|v| v == value)
            .ok_or_else(|| TabError::invalid_selection(value))
    }

    /// Make `value` the active tab and publish it.
    ///
    /// Selecting the active tab again succeeds and still notifies the host.
    pub fn select(&mut self, value: &str) -> Result<()> {
        let idx = self.index_of(value)?;
        self.commit(idx);
        Ok(())
    }

    fn commit(&mut self, idx: usize) {
        #[cfg(feature = "tracing")]
        let from = self.selected_index();
        self.state.borrow_mut().activate(idx);
        #[cfg(feature = "tracing")]
        Self::log_select(self.group_id.as_deref(), from, idx);

        let values = Rc::clone(&self.values);
        let value = values[idx].as_str();
        if let (Some(group), Some(store)) = (&self.group_id, &self.bindings.store) {
            store.set(group, value);
        }
        if let (Some(key), Some(location)) = (&self.query_key, &self.bindings.location) {
            location.replace_param(key, value);
        }
        if let Some(callback) = self.on_select.as_mut() {
            callback(value);
        }
    }

    #[cfg(feature = "tracing")]
    fn log_select(group: Option<&str>, from: usize, to: usize) {
        tracing::debug!(message = "tab_group.select", group, from, to);
    }

    /// Give keyboard focus to the label of `value`.
    pub fn focus(&mut self, value: &str) -> Result<()> {
        let idx = self.index_of(value)?;
        self.state.borrow_mut().focus.focus(idx);
        Ok(())
    }

    pub fn blur(&mut self) {
        self.state.borrow_mut().focus.blur();
    }

    #[must_use]
    pub fn focused_value(&self) -> Option<&str> {
        let idx = self.state.borrow().focus.index()?;
        Some(&self.values[idx])
    }

    /// Handle a key press on the focused label.
    ///
    /// Supported:
    /// - `Left` / `Right`: move focus, wrapping at the ends
    /// - `Enter`: select the focused tab
    ///
    /// Returns `true` when the key was consumed. Without a focused label, or
    /// with Ctrl/Alt/Meta held, every key is ignored.
    pub fn handle_key(&mut self, key: &KeyEvent) -> bool {
        if key
            .modifiers
            .intersects(Modifiers::CTRL | Modifiers::ALT | Modifiers::META)
        {
            return false;
        }
        let target = {
            let mut state = self.state.borrow_mut();
            match key.code {
                KeyCode::Right => return state.focus.next().is_some(),
                KeyCode::Left => return state.focus.previous().is_some(),
                KeyCode::Enter => state.focus.index(),
                _ => return false,
            }
        };
        let Some(idx) = target else {
            return false;
        };
        self.commit(idx);
        true
    }

    /// Mount identity of the pane for `value`, `None` while unmounted.
    #[must_use]
    pub fn mount_id(&self, value: &str) -> Option<MountId> {
        let idx = self.values.iter().position(|v| v == value)?;
        self.state.borrow().mounts[idx]
    }

    #[must_use]
    pub fn labels(&self) -> Vec<TabLabel<'_>> {
        let state = self.state.borrow();
        let focused = state.focus.index();
        self.tabs
            .iter()
            .enumerate()
            .map(|(idx, tab)| {
                let selected = idx == state.selected;
                TabLabel {
                    value: &tab.value,
                    label: &tab.label,
                    selected,
                    focused: focused == Some(idx),
                    tab_index: if selected { 0 } else { -1 },
                }
            })
            .collect()
    }

    /// Mounted panes in tab order. Exactly one is [`PaneVisibility::Visible`].
    #[must_use]
    pub fn panes(&self) -> Vec<PaneView<'_, C>> {
        let state = self.state.borrow();
        self.tabs
            .iter()
            .zip(&state.mounts)
            .enumerate()
            .filter_map(|(idx, (tab, mount))| {
                mount.map(|mount_id| PaneView {
                    value: &tab.value,
                    content: &tab.content,
                    visibility: if idx == state.selected {
                        PaneVisibility::Visible
                    } else {
                        PaneVisibility::Hidden
                    },
                    mount_id,
                })
            })
            .collect()
    }

    /// The visible pane.
    #[must_use]
    pub fn active_pane(&self) -> PaneView<'_, C> {
        let state = self.state.borrow();
        let idx = state.selected;
        let tab = &self.tabs[idx];
        PaneView {
            value: &tab.value,
            content: &tab.content,
            visibility: PaneVisibility::Visible,
            mount_id: state.mounts[idx].expect("active pane is always mounted"),
        }
    }

    /// Labels and mounted panes for one frame.
    #[must_use]
    pub fn render(&self) -> RenderedGroup<'_, C> {
        #[cfg(feature = "tracing")]
        let render_start = Instant::now();
        #[cfg(feature = "tracing")]
        let render_span = tracing::debug_span!(
            "tab_group.render",
            tab_count = self.tabs.len(),
            selected = self.selected_index(),
            render_duration_us = tracing::field::Empty
        );
        #[cfg(feature = "tracing")]
        let _render_guard = render_span.enter();

        let rendered = RenderedGroup {
            labels: self.labels(),
            panes: self.panes(),
        };

        #[cfg(feature = "tracing")]
        {
            let elapsed_us = render_start.elapsed().as_micros() as u64;
            render_span.record("render_duration_us", elapsed_us);
        }
        rendered
    }

    /// Single-line text rendering: `[Active]` brackets, inactive labels padded.
    #[must_use]
    pub fn render_bar(&self) -> String {
        let selected = self.selected_index();
        let mut out = String::new();
        for (idx, tab) in self.tabs.iter().enumerate() {
            if idx > 0 {
                out.push(' ');
            }
            let (open, close) = if idx == selected { ('[', ']') } else { (' ', ' ') };
            out.push(open);
            out.push_str(&tab.label);
            out.push(close);
        }
        out
    }

    /// Display width of [`render_bar`](Self::render_bar) in terminal cells.
    #[must_use]
    pub fn bar_width(&self) -> usize {
        self.render_bar().as_str().width()
    }
}
