use std::collections::HashMap;

use iced::widget::{button, column, container, row, text};
use iced::advanced::widget::operate;
use iced::advanced::widget::operation::focusable;
use iced::window;
use iced::{event, keyboard, mouse, Alignment, Color, Element, Fill, Padding, Size, Subscription, Task, Theme};

use crate::config::Config;
use crate::platform::{TaskPlatform, TimerId};
use crate::select::{Event, Input, Key, Props, SearchSelect, SelectOption};
use crate::source::{command, DirectoryRecord};
use crate::store::{self, Appearance, Store};
use crate::roles::Role;
use crate::ui::{result_list, search_select, theme};

/// Approver picker for a leave request.
///
/// This is the caller side of the search-select: it owns the option list and
/// the authoritative approver id, and talks to the directory source.
pub struct State {
    config: Config,
    store: Store,
    appearance: Appearance,
    platform: TaskPlatform,
    picker: SearchSelect,

    /// Authoritative approver selection
    approver: Option<String>,
    /// Display name captured when the approver was picked
    approver_name: Option<String>,
    /// Records behind the current option list
    records: Vec<DirectoryRecord>,
    roles: HashMap<String, Role>,
    /// Generation counter for in-flight searches; stale responses are dropped
    search_generation: u64,

    window_id: Option<window::Id>,
}

#[derive(Debug, Clone)]
pub enum Message {
    WindowOpened(window::Id),
    WindowClosed(window::Id),
    Picker(Input),
    KeyEvent(keyboard::Event),
    /// Pointer press no widget claimed
    PointerPressed,
    TimerFired(TimerId),
    DirectoryLoaded(Result<Vec<DirectoryRecord>, String>),
    SearchResults {
        generation: u64,
        result: Result<Vec<DirectoryRecord>, String>,
    },
    ToggleTheme,
    SignOut,
    ResetApprover,
}

impl State {
    pub fn new(config: Config, mut store: Store) -> (Self, Task<Message>) {
        if let Some(session) = &config.session {
            if store.state().session.as_ref() != Some(session) {
                if let Err(e) = store.sign_in(session.clone()) {
                    tracing::warn!("Failed to save session: {}", e);
                }
            }
        }
        let appearance = store::apply(store.state());
        let mut platform = TaskPlatform::new();

        let mut picker = SearchSelect::new(Props {
            placeholder: config.picker.placeholder.clone(),
            label: Some(config.picker.label.clone()),
            empty_message: config.picker.empty_message.clone(),
            server_search: config.search.is_enabled(),
            debounce: config.picker.debounce(),
            ..Props::default()
        });
        picker.mount(&mut platform);
        picker.set_loading(true);

        let (id, open_task) = window::open(window::Settings {
            size: Size::new(config.window.width, config.window.height),
            resizable: false,
            exit_on_close_request: true,
            ..window::Settings::default()
        });

        let load_task = if config.search.is_enabled() {
            tracing::info!("Server search mode: {:?}", config.search.source);
            Self::search_task(&config, 1, String::new())
        } else {
            tracing::info!("Local filter mode: {:?}", config.directory.source);
            let directory = config.directory.clone();
            Task::perform(
                async move { command::load_directory(&directory).await.map_err(|e| e.to_string()) },
                Message::DirectoryLoaded,
            )
        };

        let state = Self {
            config,
            store,
            appearance,
            platform,
            picker,
            approver: None,
            approver_name: None,
            records: Vec::new(),
            roles: HashMap::new(),
            search_generation: 1,
            window_id: Some(id),
        };

        (state, Task::batch([open_task.map(Message::WindowOpened), load_task]))
    }

    pub fn title(&self, _window: window::Id) -> String {
        String::from("hrdesk · Assign approver")
    }

    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::WindowOpened(id) => {
                self.window_id = Some(id);
                let open = self.picker_input(Input::Focus);
                Task::batch([
                    window::gain_focus(id),
                    iced::widget::operation::focus(search_select::SEARCH_INPUT_ID),
                    open,
                ])
            }
            Message::WindowClosed(id) => {
                if self.window_id != Some(id) {
                    return Task::none();
                }
                self.window_id = None;
                self.picker.unmount(&mut self.platform);
                iced::exit()
            }
            Message::Picker(input) => self.picker_input(input),
            Message::KeyEvent(kb_event) => match kb_event {
                keyboard::Event::KeyPressed {
                    key: keyboard::Key::Named(named),
                    ..
                } => match named {
                    keyboard::key::Named::Escape => Task::batch([
                        self.picker_input(Input::Key(Key::Escape)),
                        operate(focusable::unfocus()),
                    ]),
                    keyboard::key::Named::ArrowUp => self.picker_input(Input::Key(Key::ArrowUp)),
                    keyboard::key::Named::ArrowDown => {
                        self.picker_input(Input::Key(Key::ArrowDown))
                    }
                    _ => Task::none(),
                },
                _ => Task::none(),
            },
            Message::PointerPressed => self.picker_input(Input::PointerDownOutside),
            Message::TimerFired(id) => {
                if !self.platform.elapsed(id) {
                    return Task::none();
                }
                self.picker_input(Input::TimerFired(id))
            }
            Message::DirectoryLoaded(result) => {
                self.picker.set_loading(false);
                self.apply_records(result);
                Task::none()
            }
            Message::SearchResults { generation, result } => {
                if generation != self.search_generation {
                    tracing::debug!(
                        "SearchResults: dropping gen={}, current_gen={}",
                        generation,
                        self.search_generation
                    );
                    return Task::none();
                }
                self.picker.set_loading(false);
                self.apply_records(result);
                Task::none()
            }
            Message::ToggleTheme => {
                if let Err(e) = self.store.toggle_theme() {
                    tracing::warn!("Failed to save theme: {}", e);
                }
                self.appearance = store::apply(self.store.state());
                Task::none()
            }
            Message::SignOut => {
                if let Err(e) = self.store.sign_out() {
                    tracing::warn!("Failed to save session: {}", e);
                }
                self.appearance = store::apply(self.store.state());
                Task::none()
            }
            Message::ResetApprover => {
                self.approver = None;
                self.approver_name = None;
                self.picker.set_value(None, &mut self.platform);
                self.platform.drain(Message::TimerFired)
            }
        }
    }

    pub fn view(&self, _window: window::Id) -> Element<'_, Message> {
        let mut header = row![text(self.appearance.headline.as_str()).size(13)]
            .spacing(8)
            .align_y(Alignment::Center);
        if let Some(role) = self.appearance.role {
            header = header
                .push(result_list::role_badge(role))
                .push(button(text("Sign out").size(12)).on_press(Message::SignOut));
        }
        let theme_label = if self.appearance.dark { "Light" } else { "Dark" };
        header = header
            .push(container(text("")).width(Fill))
            .push(button(text(theme_label).size(12)).on_press(Message::ToggleTheme));

        let request = &self.config.request;
        let status_color = request.status.color();
        let request_line = row![
            text(format!("{} · {}", request.employee, request.kind)).size(16),
            container(text(request.status.label()).size(11))
                .padding(Padding::from([2, 8]))
                .style(move |_theme: &Theme| theme::badge(status_color)),
        ]
        .spacing(8)
        .align_y(Alignment::Center);

        let picker = search_select::view(&self.picker, &self.roles);

        let assigned = row![
            container(text(format!("Assigned approver: {}", self.approver_label())).size(13))
                .width(Fill),
            button(text("Reset").size(12)).on_press(Message::ResetApprover),
        ]
        .align_y(Alignment::Center);

        let content = column![header, request_line, picker, assigned]
            .spacing(12)
            .padding(Padding::new(16.0))
            .height(Fill);

        let main = container(content)
            .width(Fill)
            .height(Fill)
            .style(theme::main_container);

        container(main).width(Fill).height(Fill).into()
    }

    pub fn subscription(&self) -> Subscription<Message> {
        let mut subs = vec![
            window::close_events().map(Message::WindowClosed),
            event::listen_with(|event, status, _window| match event {
                iced::Event::Keyboard(kb_event) => {
                    if matches!(status, event::Status::Ignored) {
                        Some(Message::KeyEvent(kb_event))
                    } else {
                        match &kb_event {
                            keyboard::Event::KeyPressed {
                                key: keyboard::Key::Named(keyboard::key::Named::Escape),
                                ..
                            } => Some(Message::KeyEvent(kb_event)),
                            _ => None,
                        }
                    }
                }
                _ => None,
            }),
        ];

        // Presses captured by the input or a result row are inside the widget
        if self.platform.wants_outside_clicks() {
            subs.push(event::listen_with(|event, status, _window| match event {
                iced::Event::Mouse(mouse::Event::ButtonPressed(_))
                    if matches!(status, event::Status::Ignored) =>
                {
                    Some(Message::PointerPressed)
                }
                _ => None,
            }));
        }

        Subscription::batch(subs)
    }

    pub fn theme(&self, _window: window::Id) -> Theme {
        self.appearance.theme.clone()
    }

    pub fn style(&self, theme: &Theme) -> iced::theme::Style {
        iced::theme::Style {
            background_color: Color::TRANSPARENT,
            text_color: theme.palette().text,
        }
    }

    fn approver_label(&self) -> &str {
        match (&self.approver_name, &self.approver) {
            (Some(name), _) => name,
            (None, Some(id)) => id,
            (None, None) => "none",
        }
    }

    // ---- Search-select caller ----

    /// Feed one input to the picker and act on whatever it reports back.
    fn picker_input(&mut self, input: Input) -> Task<Message> {
        let follow_up = match self.picker.handle(input, &mut self.platform) {
            Some(Event::SelectionChanged(id)) => {
                tracing::info!("Approver changed: {:?}", id);
                self.approver_name = id
                    .as_deref()
                    .and_then(|id| self.records.iter().find(|r| r.id == id))
                    .map(|r| r.name.clone());
                self.approver = id.clone();
                self.picker.set_value(id, &mut self.platform);
                Task::none()
            }
            Some(Event::SearchChanged(term)) => self.start_search(term),
            None => Task::none(),
        };
        Task::batch([follow_up, self.platform.drain(Message::TimerFired)])
    }

    fn start_search(&mut self, term: String) -> Task<Message> {
        if !self.config.search.is_enabled() {
            return Task::none();
        }
        self.search_generation += 1;
        self.picker.set_loading(true);
        tracing::debug!("Searching '{}' (gen={})", term, self.search_generation);
        Self::search_task(&self.config, self.search_generation, term)
    }

    fn search_task(config: &Config, generation: u64, term: String) -> Task<Message> {
        let search = config.search.clone();
        Task::perform(
            async move { command::search(&search, &term).await.map_err(|e| e.to_string()) },
            move |result| Message::SearchResults { generation, result },
        )
    }

    fn apply_records(&mut self, result: Result<Vec<DirectoryRecord>, String>) {
        match result {
            Ok(records) => {
                tracing::debug!("Directory returned {} records", records.len());
                let options: Vec<SelectOption> =
                    records.iter().map(DirectoryRecord::to_option).collect();
                self.roles = records
                    .iter()
                    .filter_map(|r| r.role.map(|role| (r.id.clone(), role)))
                    .collect();
                self.records = records;
                self.picker.set_error(None);
                self.picker.set_options(options);
            }
            Err(e) => {
                tracing::warn!("Directory lookup failed: {}", e);
                self.picker.set_error(Some(e));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{AppState, Session};
    use pretty_assertions::assert_eq;

    fn record(id: &str, name: &str) -> DirectoryRecord {
        DirectoryRecord {
            id: id.to_string(),
            name: name.to_string(),
            title: None,
            avatar: None,
            role: Some(Role::Manager),
        }
    }

    fn option_ids(state: &State) -> Vec<&str> {
        state.picker.props().options.iter().map(|o| o.id.as_str()).collect()
    }

    fn server_state() -> State {
        let mut config = Config::default();
        config.search.source = vec!["hrdesk-directory".to_string()];
        let (state, _) = State::new(config, Store::in_memory(AppState::default()));
        state
    }

    #[test]
    fn stale_search_results_are_dropped() {
        let mut state = server_state();
        let _ = state.start_search("mar".to_string());
        let current = state.search_generation;
        assert!(state.picker.props().is_loading);

        let _ = state.update(Message::SearchResults {
            generation: current - 1,
            result: Ok(vec![record("e000", "Stale Result")]),
        });
        assert!(option_ids(&state).is_empty());
        assert!(state.picker.props().is_loading);

        let _ = state.update(Message::SearchResults {
            generation: current,
            result: Ok(vec![record("e002", "Marcus Lee")]),
        });
        assert_eq!(option_ids(&state), vec!["e002"]);
        assert!(!state.picker.props().is_loading);
        assert_eq!(state.roles.get("e002"), Some(&Role::Manager));
    }

    #[test]
    fn failed_search_keeps_options_and_reports_error() {
        let mut state = server_state();
        let _ = state.update(Message::SearchResults {
            generation: state.search_generation,
            result: Ok(vec![record("e002", "Marcus Lee")]),
        });
        let _ = state.start_search("x".to_string());
        let _ = state.update(Message::SearchResults {
            generation: state.search_generation,
            result: Err("directory unavailable".to_string()),
        });
        assert_eq!(option_ids(&state), vec!["e002"]);
        assert_eq!(
            state.picker.props().error.as_deref(),
            Some("directory unavailable")
        );
    }

    #[test]
    fn escape_closes_picker_and_unfocuses_input() {
        let mut state = server_state();
        let _ = state.update(Message::Picker(Input::Focus));
        assert!(state.picker.is_open());

        let task = state.update(Message::KeyEvent(keyboard::Event::KeyPressed {
            key: keyboard::Key::Named(keyboard::key::Named::Escape),
            modified_key: keyboard::Key::Named(keyboard::key::Named::Escape),
            physical_key: keyboard::key::Physical::Code(keyboard::key::Code::Escape),
            location: keyboard::Location::Standard,
            modifiers: keyboard::Modifiers::default(),
            text: None,
            repeat: false,
        }));
        assert!(!state.picker.is_open());
        assert!(!state.picker.is_focused());
        // The unfocus widget operation is the only work left to run
        assert_eq!(task.units(), 1);
    }

    #[test]
    fn configured_session_signs_in_and_sign_out_clears_it() {
        let mut config = Config::default();
        config.session = Some(Session {
            user_name: "Priya Nair".to_string(),
            company: "Acme Corp".to_string(),
            role: Role::Hr,
        });
        let (mut state, _) = State::new(config, Store::in_memory(AppState::default()));
        assert_eq!(state.appearance.headline, "Priya Nair · Acme Corp");
        assert_eq!(state.appearance.role, Some(Role::Hr));

        let _ = state.update(Message::SignOut);
        assert_eq!(state.appearance.headline, "Not signed in");
        assert_eq!(state.store.state().session, None);
    }
}
