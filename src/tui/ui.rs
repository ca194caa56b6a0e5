use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

use crate::domain::repository::TodoRepository;
use crate::domain::todo::TodoItem;

use super::app::{App, DATE_FORMAT, Field, Mode};

const HELP: &str = "Enter/space: toggle, n: new, e: edit, d: delete, f: filter, q: quit  |  Form: Tab to switch, Enter to save, Esc to cancel";

pub fn draw<R: TodoRepository>(f: &mut Frame, app: &App<R>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(1), Constraint::Length(3)])
        .split(f.size());

    let header = Paragraph::new(HELP).block(Block::default().borders(Borders::ALL).title("My Todo List"));
    f.render_widget(header, chunks[0]);

    let middle = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(chunks[1]);

    let visible = app.visible();
    let items = app.store.items();
    let rows: Vec<ListItem> = if visible.is_empty() {
        let hint = if items.is_empty() { "No todos yet! Add some with n" } else { "Nothing matches this filter" };
        vec![ListItem::new(hint).style(Style::default().fg(Color::Gray).add_modifier(Modifier::ITALIC))]
    } else {
        visible.iter().filter_map(|&p| items.get(p)).map(|t| row(t, app)).collect()
    };
    let mut list_state = ListState::default();
    if !visible.is_empty() { list_state.select(Some(app.selected)); }
    let list = List::new(rows)
        .block(Block::default().borders(Borders::ALL).title(format!("todos [{}]", app.filter.label())))
        .highlight_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD | Modifier::REVERSED))
        .highlight_symbol(">> ");
    f.render_stateful_widget(list, middle[0], &mut list_state);

    let (title, body) = match app.mode {
        Mode::View => ("details", details(app)),
        Mode::Create => ("add new todo", form(app)),
        Mode::Edit => ("edit todo", form(app)),
    };
    let pane = Paragraph::new(body).wrap(Wrap { trim: false }).block(Block::default().borders(Borders::ALL).title(title));
    f.render_widget(pane, middle[1]);

    let mut footer = format!("store: {}", app.store.repository().location());
    if !app.store.is_synced() { footer.push_str("  |  unsaved changes"); }
    if let Some(status) = &app.status { footer = format!("{status}  |  {footer}"); }
    let footer = Paragraph::new(footer).block(Block::default().borders(Borders::ALL).title("info"));
    f.render_widget(footer, chunks[2]);
}

fn row<R: TodoRepository>(todo: &TodoItem, app: &App<R>) -> ListItem<'static> {
    let mark = if todo.is_completed { "[x]" } else { "[ ]" };
    let mut title_style = Style::default();
    if todo.is_completed { title_style = title_style.fg(Color::Gray).add_modifier(Modifier::CROSSED_OUT); }
    let mut spans = vec![Span::raw(format!("{mark} ")), Span::styled(todo.title.clone(), title_style)];
    if let Some(due) = todo.due_date {
        let due_style = if todo.is_overdue(app.today) { Style::default().fg(Color::Red) } else { Style::default().fg(Color::Gray) };
        spans.push(Span::styled(format!("  {}", due.format(DATE_FORMAT)), due_style));
    }
    ListItem::new(Line::from(spans))
}

fn details<R: TodoRepository>(app: &App<R>) -> Vec<Line<'static>> {
    let Some(todo) = app.selected_item() else { return Vec::new() };
    let muted = Style::default().fg(Color::Gray).add_modifier(Modifier::ITALIC);
    let due = match todo.due_date {
        Some(d) if todo.is_overdue(app.today) => Span::styled(format!("{} (overdue)", d.format(DATE_FORMAT)), Style::default().fg(Color::Red)),
        Some(d) => Span::raw(d.format(DATE_FORMAT).to_string()),
        None => Span::styled("No due date", muted),
    };
    let notes = if todo.has_notes() { Span::raw(todo.notes.clone()) } else { Span::styled("No notes", muted) };
    vec![
        Line::from(Span::styled("Title", Style::default().add_modifier(Modifier::BOLD))),
        Line::from(todo.title.clone()),
        Line::from(""),
        Line::from(format!("Completed: {}", if todo.is_completed { "yes" } else { "no" })),
        Line::from(""),
        Line::from(Span::styled("Due Date", Style::default().add_modifier(Modifier::BOLD))),
        Line::from(due),
        Line::from(""),
        Line::from(Span::styled("Notes", Style::default().add_modifier(Modifier::BOLD))),
        Line::from(notes),
    ]
}

fn form<R: TodoRepository>(app: &App<R>) -> Vec<Line<'static>> {
    let field = |label: &str, which: Field, value: &str| {
        let active = app.field == which;
        let style = if active { Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD) } else { Style::default() };
        let cursor = if active { "_" } else { "" };
        Line::from(vec![Span::styled(format!("{label}: "), style), Span::raw(format!("{value}{cursor}"))])
    };
    let mut lines = vec![
        field("Title", Field::Title, &app.draft.title),
        field("Notes", Field::Notes, &app.draft.notes),
        field("Due (YYYY-MM-DD)", Field::Due, &app.draft.due),
    ];
    if app.mode == Mode::Edit {
        lines.push(field("Completed (space)", Field::Completed, if app.draft.completed { "[x]" } else { "[ ]" }));
    }
    lines
}
