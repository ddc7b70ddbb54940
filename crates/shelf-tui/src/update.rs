//! TUI reducer (update function).
//!
//! All state mutations happen here. The runtime calls `update(state, event)`
//! and executes the returned effects. This is the single source of truth for
//! the session state machine:
//!
//! - `Login -> Items` on a successful login (the token is persisted) or a
//!   restored credential.
//! - `Items -> Login` on logout or a failed current-user fetch; both clear
//!   the credential and all dependent user/item state.
//! - Every successful mutation re-fetches the full item list.
//! - List/create/update/delete failures raise a blocking notice and leave
//!   session and data intact.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tracing::{debug, warn};

use crate::effects::UiEffect;
use crate::events::UiEvent;
use crate::state::{
    AppState, EditForm, FormField, ItemsFocus, ItemsScreen, LoginField, LoginScreen, Screen,
};

pub const NOTICE_LOGIN_FAILED: &str = "Login failed";
pub const NOTICE_FETCH_ITEMS: &str = "Could not fetch items";
pub const NOTICE_CREATE_ITEM: &str = "Failed to create item";
pub const NOTICE_UPDATE_ITEM: &str = "Failed to update item";
pub const NOTICE_DELETE_ITEM: &str = "Failed to delete item";

/// The main reducer function.
///
/// Takes the current state and an event, mutates state, and returns effects
/// for the runtime to execute.
pub fn update(state: &mut AppState, event: UiEvent) -> Vec<UiEffect> {
    match event {
        UiEvent::Tick => vec![],
        UiEvent::Terminal(term_event) => handle_terminal_event(state, term_event),

        UiEvent::LoginCompleted(Ok(token)) => {
            state.screen = Screen::Items(ItemsScreen::loading());
            vec![
                UiEffect::PersistCredential { token },
                UiEffect::FetchCurrentUser,
                UiEffect::FetchItems,
            ]
        }
        UiEvent::LoginCompleted(Err(error)) => {
            warn!(%error, "login failed");
            if let Screen::Login(login) = &mut state.screen {
                login.submitting = false;
            }
            state.show_notice(NOTICE_LOGIN_FAILED);
            vec![]
        }

        UiEvent::UserLoaded(Ok(user)) => {
            if let Screen::Items(items) = &mut state.screen {
                items.user = Some(user);
            }
            vec![]
        }
        UiEvent::UserLoaded(Err(error)) => {
            // Any failure here is treated as credential invalidity, not
            // distinguished by cause. The transition is silent; the cause
            // only goes to the log.
            warn!(%error, "current-user fetch failed, clearing session");
            state.screen = Screen::Login(LoginScreen::new(state.config.email.as_deref()));
            vec![UiEffect::ClearCredential]
        }

        UiEvent::ItemsLoaded(Ok(list)) => {
            if let Screen::Items(items) = &mut state.screen {
                items.set_items(list);
            }
            vec![]
        }
        UiEvent::ItemsLoaded(Err(error)) => {
            warn!(%error, "item-list fetch failed");
            if let Screen::Items(items) = &mut state.screen {
                items.loading = false;
            }
            state.show_notice(NOTICE_FETCH_ITEMS);
            vec![]
        }

        UiEvent::ItemCreated(Ok(item)) => {
            debug!(id = item.id, "item created");
            if let Screen::Items(items) = &mut state.screen {
                items.create.clear();
                items.focus = ItemsFocus::List;
                items.loading = true;
                vec![UiEffect::FetchItems]
            } else {
                vec![]
            }
        }
        UiEvent::ItemCreated(Err(error)) => {
            warn!(%error, "item create failed");
            state.show_notice(NOTICE_CREATE_ITEM);
            vec![]
        }

        UiEvent::ItemUpdated(Ok(item)) => {
            debug!(id = item.id, "item updated");
            if let Screen::Items(items) = &mut state.screen {
                items.edit = None;
                items.focus = ItemsFocus::List;
                items.loading = true;
                vec![UiEffect::FetchItems]
            } else {
                vec![]
            }
        }
        UiEvent::ItemUpdated(Err(error)) => {
            warn!(%error, "item update failed");
            state.show_notice(NOTICE_UPDATE_ITEM);
            vec![]
        }

        UiEvent::ItemDeleted(Ok(id)) => {
            debug!(id, "item deleted");
            if let Screen::Items(items) = &mut state.screen {
                items.loading = true;
                vec![UiEffect::FetchItems]
            } else {
                vec![]
            }
        }
        UiEvent::ItemDeleted(Err(error)) => {
            warn!(%error, "item delete failed");
            state.show_notice(NOTICE_DELETE_ITEM);
            vec![]
        }
    }
}

/// Outcome of items-screen key handling that needs a screen transition.
enum ItemsAction {
    None,
    Logout,
}

fn handle_terminal_event(state: &mut AppState, event: Event) -> Vec<UiEffect> {
    let Event::Key(key) = event else {
        return vec![];
    };
    if !matches!(key.kind, KeyEventKind::Press | KeyEventKind::Repeat) {
        return vec![];
    }

    // A notice is blocking: the first key press dismisses it and nothing
    // else happens.
    if state.notice.take().is_some() {
        return vec![];
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return vec![UiEffect::Quit];
    }

    match &mut state.screen {
        Screen::Login(login) => handle_login_key(login, key),
        Screen::Items(items) => {
            let (mut effects, action) = handle_items_key(items, key);
            if matches!(action, ItemsAction::Logout) {
                state.screen = Screen::Login(LoginScreen::new(state.config.email.as_deref()));
                effects.push(UiEffect::ClearCredential);
            }
            effects
        }
    }
}

fn handle_login_key(login: &mut LoginScreen, key: KeyEvent) -> Vec<UiEffect> {
    match key.code {
        KeyCode::Tab | KeyCode::Down => {
            login.focus = LoginField::Password;
            vec![]
        }
        KeyCode::BackTab | KeyCode::Up => {
            login.focus = LoginField::Email;
            vec![]
        }
        KeyCode::Enter => {
            // Repeated submits are not debounced; `submitting` is display-only.
            login.submitting = true;
            vec![UiEffect::SubmitLogin {
                email: login.email.value().trim().to_string(),
                password: login.password.value().to_string(),
            }]
        }
        _ => {
            login.focused_field_mut().handle_key(key);
            vec![]
        }
    }
}

fn handle_items_key(items: &mut ItemsScreen, key: KeyEvent) -> (Vec<UiEffect>, ItemsAction) {
    match items.focus {
        ItemsFocus::List => match key.code {
            KeyCode::Up => {
                items.selected = items.selected.saturating_sub(1);
                (vec![], ItemsAction::None)
            }
            KeyCode::Down => {
                if items.selected + 1 < items.items.len() {
                    items.selected += 1;
                }
                (vec![], ItemsAction::None)
            }
            KeyCode::Char('r') => {
                items.loading = true;
                (vec![UiEffect::FetchItems], ItemsAction::None)
            }
            KeyCode::Char('n') => {
                items.focus = ItemsFocus::Create(FormField::Name);
                (vec![], ItemsAction::None)
            }
            KeyCode::Char('e') => {
                if let Some(item) = items.selected_item() {
                    items.edit = Some(EditForm::for_item(item));
                    items.focus = ItemsFocus::Edit(FormField::Name);
                }
                (vec![], ItemsAction::None)
            }
            KeyCode::Char('d') => {
                let effects = items
                    .selected_item()
                    .map(|item| vec![UiEffect::DeleteItem { id: item.id }])
                    .unwrap_or_default();
                (effects, ItemsAction::None)
            }
            KeyCode::Char('l') => (vec![], ItemsAction::Logout),
            KeyCode::Char('q') => (vec![UiEffect::Quit], ItemsAction::None),
            _ => (vec![], ItemsAction::None),
        },

        ItemsFocus::Create(field) => match key.code {
            KeyCode::Esc => {
                items.focus = ItemsFocus::List;
                (vec![], ItemsAction::None)
            }
            KeyCode::Tab | KeyCode::BackTab => {
                items.focus = ItemsFocus::Create(field.next());
                (vec![], ItemsAction::None)
            }
            KeyCode::Enter => (
                vec![UiEffect::CreateItem {
                    name: items.create.name.value().to_string(),
                    description: items.create.description.value().to_string(),
                }],
                ItemsAction::None,
            ),
            _ => {
                items.create.field_mut(field).handle_key(key);
                (vec![], ItemsAction::None)
            }
        },

        ItemsFocus::Edit(field) => {
            let Some(edit) = &mut items.edit else {
                items.focus = ItemsFocus::List;
                return (vec![], ItemsAction::None);
            };
            match key.code {
                KeyCode::Esc => {
                    items.edit = None;
                    items.focus = ItemsFocus::List;
                    (vec![], ItemsAction::None)
                }
                KeyCode::Tab | KeyCode::BackTab => {
                    items.focus = ItemsFocus::Edit(field.next());
                    (vec![], ItemsAction::None)
                }
                KeyCode::Enter => (
                    vec![UiEffect::UpdateItem {
                        id: edit.id,
                        name: edit.form.name.value().to_string(),
                        description: edit.form.description.value().to_string(),
                    }],
                    ItemsAction::None,
                ),
                _ => {
                    edit.form.field_mut(field).handle_key(key);
                    (vec![], ItemsAction::None)
                }
            }
        }
    }
}
