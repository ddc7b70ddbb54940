//! Pure view/render functions for the TUI.
//!
//! Functions here take `&AppState` by immutable reference, draw to a ratatui
//! frame, and never mutate state or return effects.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use crate::fields::TextField;
use crate::state::{
    AppState, FormField, ItemsFocus, ItemsScreen, LoginField, LoginScreen, Notice, Screen,
};

const LOGIN_POPUP_WIDTH: u16 = 52;
const LOGIN_POPUP_HEIGHT: u16 = 9;
const NOTICE_WIDTH: u16 = 44;
const NOTICE_HEIGHT: u16 = 6;

/// Renders the entire TUI to the frame.
pub fn render(state: &AppState, frame: &mut Frame) {
    let area = frame.area();

    match &state.screen {
        Screen::Login(login) => render_login(state, login, frame, area),
        Screen::Items(items) => render_items(items, frame, area),
    }

    if let Some(notice) = &state.notice {
        render_notice(notice, frame, area);
    }
}

// ============================================================================
// Login screen
// ============================================================================

fn render_login(state: &AppState, login: &LoginScreen, frame: &mut Frame, area: Rect) {
    let popup = centered_rect(area, LOGIN_POPUP_WIDTH, LOGIN_POPUP_HEIGHT);
    render_container(frame, popup, " Sign in ", Color::Cyan);

    let inner = inset(popup, 2, 1);

    let mut lines = vec![
        field_line("Email", &login.email, login.focus == LoginField::Email),
        field_line(
            "Password",
            &login.password,
            login.focus == LoginField::Password,
        ),
        Line::from(""),
    ];
    if login.submitting {
        lines.push(Line::from(Span::styled(
            "Signing in...",
            Style::default().fg(Color::Yellow),
        )));
    } else {
        lines.push(Line::from(Span::styled(
            format!("Server: {}", state.config.base_url),
            Style::default().fg(Color::DarkGray),
        )));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Enter sign in / Tab next field / Ctrl+C quit",
        Style::default().fg(Color::DarkGray),
    )));

    frame.render_widget(Paragraph::new(lines), inner);
}

// ============================================================================
// Items screen
// ============================================================================

fn render_items(items: &ItemsScreen, frame: &mut Frame, area: Rect) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(area);

    render_header(items, frame, rows[0]);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(rows[1]);

    render_item_list(items, frame, columns[0]);
    render_forms(items, frame, columns[1]);
    render_footer(items, frame, rows[2]);
}

fn render_header(items: &ItemsScreen, frame: &mut Frame, area: Rect) {
    let who = items
        .user
        .as_ref()
        .map_or_else(|| "...".to_string(), |user| user.email.clone());

    let line = Line::from(vec![
        Span::styled(
            " shelf ",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled("signed in as ", Style::default().fg(Color::DarkGray)),
        Span::styled(who, Style::default().add_modifier(Modifier::BOLD)),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

fn render_item_list(items: &ItemsScreen, frame: &mut Frame, area: Rect) {
    let title = if items.loading {
        " Items (loading...) "
    } else {
        " Items "
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .title(title)
        .border_style(border_style(items.focus == ItemsFocus::List));
    let inner_width = area.width.saturating_sub(2) as usize;

    let mut lines: Vec<Line<'static>> = Vec::with_capacity(items.items.len().max(1));
    if items.items.is_empty() {
        let placeholder = if items.loading { "" } else { "(no items yet)" };
        lines.push(Line::from(Span::styled(
            placeholder,
            Style::default().fg(Color::DarkGray),
        )));
    }
    for (idx, item) in items.items.iter().enumerate() {
        let text = format!("{:>4}  {} · {}", item.id, item.name, item.description);
        let text = truncate_with_ellipsis(&text, inner_width);
        let style = if idx == items.selected && items.focus == ItemsFocus::List {
            Style::default().add_modifier(Modifier::REVERSED)
        } else if idx == items.selected {
            Style::default().add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        lines.push(Line::from(Span::styled(text, style)));
    }

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_forms(items: &ItemsScreen, frame: &mut Frame, area: Rect) {
    let has_edit = items.edit.is_some();
    let constraints = if has_edit {
        vec![
            Constraint::Length(5),
            Constraint::Length(5),
            Constraint::Min(0),
        ]
    } else {
        vec![Constraint::Length(5), Constraint::Min(0)]
    };
    let slots = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    let create_focus = match items.focus {
        ItemsFocus::Create(field) => Some(field),
        _ => None,
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" New item ")
        .border_style(border_style(create_focus.is_some()));
    let lines = vec![
        field_line(
            "Name",
            &items.create.name,
            create_focus == Some(FormField::Name),
        ),
        field_line(
            "Description",
            &items.create.description,
            create_focus == Some(FormField::Description),
        ),
    ];
    frame.render_widget(Paragraph::new(lines).block(block), slots[0]);

    if let Some(edit) = &items.edit {
        let edit_focus = match items.focus {
            ItemsFocus::Edit(field) => Some(field),
            _ => None,
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .title(format!(" Edit item {} ", edit.id))
            .border_style(border_style(edit_focus.is_some()));
        let lines = vec![
            field_line("Name", &edit.form.name, edit_focus == Some(FormField::Name)),
            field_line(
                "Description",
                &edit.form.description,
                edit_focus == Some(FormField::Description),
            ),
        ];
        frame.render_widget(Paragraph::new(lines).block(block), slots[1]);
    }
}

fn render_footer(items: &ItemsScreen, frame: &mut Frame, area: Rect) {
    let hint = match items.focus {
        ItemsFocus::List => {
            "up/down select / n new / e edit / d delete / r reload / l logout / q quit"
        }
        ItemsFocus::Create(_) | ItemsFocus::Edit(_) => "Tab next field / Enter submit / Esc back",
    };
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            format!(" {hint}"),
            Style::default().fg(Color::DarkGray),
        ))),
        area,
    );
}

// ============================================================================
// Notice overlay
// ============================================================================

fn render_notice(notice: &Notice, frame: &mut Frame, area: Rect) {
    let popup = centered_rect(area, NOTICE_WIDTH, NOTICE_HEIGHT);
    frame.render_widget(Clear, popup);
    render_container(frame, popup, " Notice ", Color::Red);

    let inner = inset(popup, 2, 1);
    let lines = vec![
        Line::from(notice.message.clone()),
        Line::from(""),
        Line::from(Span::styled(
            "press any key",
            Style::default().fg(Color::DarkGray),
        )),
    ];
    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner);
}

// ============================================================================
// Shared helpers
// ============================================================================

/// Renders one labeled field, drawing a block cursor when focused.
fn field_line(label: &str, field: &TextField, focused: bool) -> Line<'static> {
    let mut spans = vec![Span::styled(
        format!("{label:<12}"),
        Style::default().fg(Color::DarkGray),
    )];

    let display = field.display();
    if focused {
        let cursor = field.cursor();
        let before: String = display.chars().take(cursor).collect();
        let at: String = display
            .chars()
            .nth(cursor)
            .map_or_else(|| " ".to_string(), |ch| ch.to_string());
        let after: String = display.chars().skip(cursor + 1).collect();
        spans.push(Span::raw(before));
        spans.push(Span::styled(
            at,
            Style::default().add_modifier(Modifier::REVERSED),
        ));
        spans.push(Span::raw(after));
    } else {
        spans.push(Span::raw(display));
    }

    Line::from(spans)
}

fn border_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    }
}

/// Centers a `width` x `height` rect within `area`, clamped to fit.
fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width.saturating_sub(2));
    let height = height.min(area.height.saturating_sub(2));
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width, height)
}

/// Shrinks a rect by horizontal and vertical margins.
fn inset(area: Rect, dx: u16, dy: u16) -> Rect {
    Rect::new(
        area.x + dx,
        area.y + dy,
        area.width.saturating_sub(dx * 2),
        area.height.saturating_sub(dy * 2),
    )
}

fn render_container(frame: &mut Frame, area: Rect, title: &str, border_color: Color) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color))
        .title(title.to_string())
        .title_style(
            Style::default()
                .fg(border_color)
                .add_modifier(Modifier::BOLD),
        );
    frame.render_widget(block, area);
}

fn truncate_with_ellipsis(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let kept: String = text.chars().take(max_chars.saturating_sub(3)).collect();
    format!("{kept}...")
}
