//! Application state composition.
//!
//! The top-level state is a two-screen machine:
//!
//! ```text
//! AppState
//! ├── screen: Screen
//! │   ├── Login(LoginScreen)   (email/password fields, focus)
//! │   └── Items(ItemsScreen)   (user, items, selection, create/edit forms)
//! ├── session: Session         (active credential + storage)
//! └── notice: Option<Notice>   (blocking modal message)
//! ```
//!
//! `Login -> Items` on successful login or credential restoration;
//! `Items -> Login` on logout or a failed current-user fetch. The reducer in
//! [`crate::update`] is the only place these transitions happen.

use shelf_core::config::Config;
use shelf_core::session::Session;
use shelf_core::types::{Item, User};

use crate::effects::UiEffect;
use crate::fields::TextField;

/// Combined application state for the TUI.
pub struct AppState {
    /// Flag indicating the app should quit.
    pub should_quit: bool,
    /// Client configuration (base URL, login prefill).
    pub config: Config,
    /// Session context (active credential + storage).
    pub session: Session,
    /// Current screen.
    pub screen: Screen,
    /// Blocking notice, if any. Input underneath is suspended until it is
    /// dismissed.
    pub notice: Option<Notice>,
}

impl AppState {
    /// Creates the initial state. A restored credential lands directly on
    /// the items screen in its loading state.
    pub fn new(config: Config, session: Session) -> Self {
        let screen = if session.is_authenticated() {
            Screen::Items(ItemsScreen::loading())
        } else {
            Screen::Login(LoginScreen::new(config.email.as_deref()))
        };

        Self {
            should_quit: false,
            config,
            session,
            screen,
            notice: None,
        }
    }

    /// Effects to run once at startup: a restored credential triggers
    /// exactly one user fetch and one item-list fetch.
    pub fn startup_effects(&self) -> Vec<UiEffect> {
        if self.session.is_authenticated() {
            vec![UiEffect::FetchCurrentUser, UiEffect::FetchItems]
        } else {
            vec![]
        }
    }

    pub fn show_notice(&mut self, message: impl Into<String>) {
        self.notice = Some(Notice {
            message: message.into(),
        });
    }
}

/// A blocking modal message; any key dismisses it.
#[derive(Debug, Clone)]
pub struct Notice {
    pub message: String,
}

/// The two view states.
pub enum Screen {
    Login(LoginScreen),
    Items(ItemsScreen),
}

/// Login form state.
pub struct LoginScreen {
    pub email: TextField,
    pub password: TextField,
    pub focus: LoginField,
    /// Display-only: a submission is in flight. Does not block re-submits.
    pub submitting: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginField {
    Email,
    Password,
}

impl LoginScreen {
    pub fn new(prefill_email: Option<&str>) -> Self {
        Self {
            email: prefill_email.map_or_else(TextField::new, TextField::with_value),
            password: TextField::masked(),
            focus: LoginField::Email,
            submitting: false,
        }
    }

    pub fn focused_field_mut(&mut self) -> &mut TextField {
        match self.focus {
            LoginField::Email => &mut self.email,
            LoginField::Password => &mut self.password,
        }
    }
}

/// Items screen state: profile header, list, and the create/edit forms.
pub struct ItemsScreen {
    pub user: Option<User>,
    pub items: Vec<Item>,
    /// Index into `items` of the selected row.
    pub selected: usize,
    /// Display-only: the list is being (re)fetched.
    pub loading: bool,
    pub focus: ItemsFocus,
    pub create: ItemForm,
    pub edit: Option<EditForm>,
}

impl ItemsScreen {
    /// A fresh items screen waiting for its first fetch.
    pub fn loading() -> Self {
        Self {
            user: None,
            items: Vec::new(),
            selected: 0,
            loading: true,
            focus: ItemsFocus::List,
            create: ItemForm::default(),
            edit: None,
        }
    }

    pub fn selected_item(&self) -> Option<&Item> {
        self.items.get(self.selected)
    }

    /// Replaces the list, keeping the selection in bounds.
    pub fn set_items(&mut self, items: Vec<Item>) {
        self.items = items;
        self.selected = self.selected.min(self.items.len().saturating_sub(1));
        self.loading = false;
    }
}

/// Where key input is routed on the items screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemsFocus {
    List,
    Create(FormField),
    Edit(FormField),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Name,
    Description,
}

impl FormField {
    pub fn next(self) -> Self {
        match self {
            FormField::Name => FormField::Description,
            FormField::Description => FormField::Name,
        }
    }
}

/// Name/description field pair shared by the create and edit forms.
#[derive(Default)]
pub struct ItemForm {
    pub name: TextField,
    pub description: TextField,
}

impl ItemForm {
    pub fn field_mut(&mut self, field: FormField) -> &mut TextField {
        match field {
            FormField::Name => &mut self.name,
            FormField::Description => &mut self.description,
        }
    }

    pub fn clear(&mut self) {
        self.name.clear();
        self.description.clear();
    }
}

/// Edit form: bound to one item; the identifier is immutable.
pub struct EditForm {
    pub id: i64,
    pub form: ItemForm,
}

impl EditForm {
    pub fn for_item(item: &Item) -> Self {
        Self {
            id: item.id,
            form: ItemForm {
                name: TextField::with_value(&item.name),
                description: TextField::with_value(&item.description),
            },
        }
    }
}
