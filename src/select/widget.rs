use std::time::Duration;

use crate::debounce::Debouncer;
use crate::platform::{ListenerId, Platform, TimerId};

use super::filter::filter_options;
use super::option::SelectOption;

/// Default quiet period before a typed term is reported to the caller
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

/// Caller-supplied inputs
#[derive(Debug, Clone)]
pub struct Props {
    /// Authoritative selected id
    pub value: Option<String>,
    pub options: Vec<SelectOption>,
    pub is_loading: bool,
    pub error: Option<String>,
    pub placeholder: String,
    pub label: Option<String>,
    pub disabled: bool,
    /// Shown when an open dropdown has nothing to list
    pub empty_message: String,
    /// The caller filters server-side and wants [`Event::SearchChanged`]
    pub server_search: bool,
    pub debounce: Duration,
}

impl Default for Props {
    fn default() -> Self {
        Self {
            value: None,
            options: Vec::new(),
            is_loading: false,
            error: None,
            placeholder: "Search...".to_string(),
            label: None,
            disabled: false,
            empty_message: "No results".to_string(),
            server_search: false,
            debounce: DEFAULT_DEBOUNCE,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    ArrowDown,
    ArrowUp,
    Enter,
    Escape,
}

/// User and host inputs
#[derive(Debug, Clone, PartialEq)]
pub enum Input {
    Focus,
    TextChanged(String),
    Key(Key),
    PointerDownOutside,
    /// Pointer press on the n-th visible option
    OptionPressed(usize),
    /// Explicit clear control
    Clear,
    TimerFired(TimerId),
}

/// Notifications for the caller
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    SelectionChanged(Option<String>),
    SearchChanged(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Closed,
    OpenEmpty,
    OpenLoading,
    OpenResults,
    OpenNoResults,
}

/// Where the current display text came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TextOrigin {
    Selection,
    Typed,
}

pub struct SearchSelect {
    props: Props,
    text: String,
    origin: TextOrigin,
    open: bool,
    focused: bool,
    highlighted: Option<usize>,

    /// Mirror of the caller's selection
    selected_id: Option<String>,
    /// Option the mirrored id last resolved to; survives result lists that no longer contain it
    selected: Option<SelectOption>,
    /// Last value the caller passed in, so a re-render with an unchanged value is not re-applied
    last_external: Option<String>,

    search: Debouncer<String>,
    /// A debounced search was dropped by disabling and is re-sent on enable
    search_held: bool,
    listener: Option<ListenerId>,
}

impl SearchSelect {
    pub fn new(props: Props) -> Self {
        let selected_id = props.value.clone();
        let selected = resolve(&props.options, selected_id.as_deref());
        let text = selected
            .as_ref()
            .map(|o| o.label.clone())
            .unwrap_or_default();
        let search = Debouncer::new(props.debounce);

        Self {
            last_external: selected_id.clone(),
            props,
            text,
            origin: TextOrigin::Selection,
            open: false,
            focused: false,
            highlighted: None,
            selected_id,
            selected,
            search,
            search_held: false,
            listener: None,
        }
    }

    pub fn mount(&mut self, platform: &mut dyn Platform) {
        if self.listener.is_none() {
            self.listener = Some(platform.add_outside_click_listener());
        }
    }

    /// Tear down: cancel the pending search and detach the outside-click listener.
    pub fn unmount(&mut self, platform: &mut dyn Platform) {
        self.search.cancel(platform);
        self.search_held = false;
        if let Some(id) = self.listener.take() {
            platform.remove_outside_click_listener(id);
        }
        self.open = false;
        self.focused = false;
        self.highlighted = None;
    }

    // ---- Inputs ----

    pub fn handle(&mut self, input: Input, platform: &mut dyn Platform) -> Option<Event> {
        if self.props.disabled {
            if let Input::TimerFired(id) = input {
                let _ = self.search.fire(id);
            }
            return None;
        }

        match input {
            Input::Focus => {
                self.focused = true;
                self.open = true;
                None
            }
            Input::TextChanged(text) => self.text_changed(text, platform),
            Input::Key(key) => self.key(key, platform),
            Input::PointerDownOutside => {
                if self.open || self.focused {
                    tracing::debug!("search-select: outside press, closing");
                }
                self.close();
                self.focused = false;
                None
            }
            Input::OptionPressed(index) => self.commit(index, platform),
            Input::Clear => self.clear(platform),
            Input::TimerFired(id) => {
                let term = self.search.fire(id)?;
                if self.selected.as_ref().is_some_and(|o| o.label == term) {
                    tracing::debug!("search-select: '{}' is the committed label, not searching", term);
                    return None;
                }
                Some(Event::SearchChanged(term))
            }
        }
    }

    fn text_changed(&mut self, text: String, platform: &mut dyn Platform) -> Option<Event> {
        self.text = text;
        self.origin = TextOrigin::Typed;
        self.open = true;
        self.focused = true;
        self.highlighted = None;

        if self.props.server_search {
            self.search.push(self.text.clone(), platform);
        }

        if self.text.is_empty() {
            self.drop_selection()
        } else {
            None
        }
    }

    fn key(&mut self, key: Key, platform: &mut dyn Platform) -> Option<Event> {
        match key {
            Key::ArrowDown => {
                self.open = true;
                let len = self.visible_options().len();
                self.highlighted = match (len, self.highlighted) {
                    (0, _) => None,
                    (_, None) => Some(0),
                    (len, Some(i)) => Some((i + 1).min(len - 1)),
                };
                None
            }
            Key::ArrowUp => {
                self.open = true;
                self.highlighted = match self.highlighted {
                    None | Some(0) => None,
                    Some(i) => Some(i - 1),
                };
                None
            }
            Key::Enter => match self.highlighted {
                Some(index) if self.open => self.commit(index, platform),
                _ => None,
            },
            Key::Escape => {
                self.close();
                self.focused = false;
                None
            }
        }
    }

    fn commit(&mut self, index: usize, platform: &mut dyn Platform) -> Option<Event> {
        let option = self.visible_options().get(index).map(|o| (*o).clone())?;
        tracing::debug!("search-select: committing '{}' ({})", option.label, option.id);

        self.search.cancel(platform);
        self.text = option.label.clone();
        self.origin = TextOrigin::Selection;
        self.selected_id = Some(option.id.clone());
        self.selected = Some(option);
        self.close();

        Some(Event::SelectionChanged(self.selected_id.clone()))
    }

    fn clear(&mut self, platform: &mut dyn Platform) -> Option<Event> {
        self.text.clear();
        self.origin = TextOrigin::Typed;
        self.open = true;
        self.focused = true;
        self.highlighted = None;

        if self.props.server_search {
            self.search.push(String::new(), platform);
        }
        self.drop_selection()
    }

    /// Forget the mirrored selection, reporting it only if there was one.
    fn drop_selection(&mut self) -> Option<Event> {
        self.selected = None;
        self.selected_id.take()?;
        Some(Event::SelectionChanged(None))
    }

    fn close(&mut self) {
        self.open = false;
        self.highlighted = None;
    }

    // ---- Caller updates ----

    /// Reconcile with the caller's authoritative selection.
    ///
    /// Adopts the matching label as display text without scheduling a search.
    /// A value equal to the last one the caller passed is a re-render, not a
    /// change, and leaves newer typing untouched.
    pub fn set_value(&mut self, value: Option<String>, platform: &mut dyn Platform) {
        if value == self.last_external {
            return;
        }
        self.last_external = value.clone();
        if value == self.selected_id {
            return;
        }

        self.search.cancel(platform);
        self.search_held = false;
        self.selected = resolve(&self.props.options, value.as_deref());
        if value.is_some() && self.selected.is_none() {
            tracing::debug!("search-select: value {:?} matches no option", value);
        }
        self.selected_id = value;
        self.text = self
            .selected
            .as_ref()
            .map(|o| o.label.clone())
            .unwrap_or_default();
        self.origin = TextOrigin::Selection;
        self.highlighted = None;
    }

    /// Swap in a new option list.
    ///
    /// While the display text still comes from the selection, the label is
    /// refreshed from the new list so a list that arrives after the value
    /// does not leave the text stale.
    pub fn set_options(&mut self, options: Vec<SelectOption>) {
        self.props.options = options;
        self.highlighted = None;

        if self.origin != TextOrigin::Selection {
            return;
        }
        if let Some(found) = resolve(&self.props.options, self.selected_id.as_deref()) {
            self.text = found.label.clone();
            self.selected = Some(found);
        }
    }

    pub fn set_loading(&mut self, is_loading: bool) {
        self.props.is_loading = is_loading;
    }

    pub fn set_error(&mut self, error: Option<String>) {
        self.props.error = error;
    }

    /// Disabling holds back a pending search; enabling schedules it again for
    /// the current text.
    pub fn set_disabled(&mut self, disabled: bool, platform: &mut dyn Platform) {
        if self.props.disabled == disabled {
            return;
        }
        self.props.disabled = disabled;
        if disabled {
            if self.search.is_pending() {
                self.search.cancel(platform);
                self.search_held = true;
            }
            self.close();
            self.focused = false;
        } else if std::mem::take(&mut self.search_held) {
            self.search.push(self.text.clone(), platform);
        }
    }

    // ---- Read side ----

    pub fn props(&self) -> &Props {
        &self.props
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn highlighted(&self) -> Option<usize> {
        self.highlighted
    }

    pub fn selected(&self) -> Option<&SelectOption> {
        self.selected.as_ref()
    }

    pub fn selected_id(&self) -> Option<&str> {
        self.selected_id.as_deref()
    }

    /// Options the dropdown lists right now
    pub fn visible_options(&self) -> Vec<&SelectOption> {
        if self.props.server_search || self.origin == TextOrigin::Selection {
            self.props.options.iter().collect()
        } else {
            filter_options(&self.props.options, &self.text)
        }
    }

    pub fn phase(&self) -> Phase {
        if !self.open {
            return Phase::Closed;
        }
        if self.props.is_loading {
            return Phase::OpenLoading;
        }
        if !self.visible_options().is_empty() {
            return Phase::OpenResults;
        }
        if self.origin == TextOrigin::Selection || self.text.trim().is_empty() {
            Phase::OpenEmpty
        } else {
            Phase::OpenNoResults
        }
    }
}

fn resolve(options: &[SelectOption], id: Option<&str>) -> Option<SelectOption> {
    let id = id?;
    options.iter().find(|o| o.id == id).cloned()
}
