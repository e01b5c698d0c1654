use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Wrap},
    Frame,
};
use textwrap::wrap;

use crate::app::{App, InputMode};
use crate::groq;
use crate::history::Sender;

/// Terminal palette for one theme. The RGB values come from the web
/// stylesheet this client replaced: #0e1117 background and #2f6e41 user
/// bubbles in dark mode, #DCF8C6 user bubbles in light mode.
struct Theme {
    bg: Color,
    fg: Color,
    user: Color,
    assistant: Color,
    error: Color,
    border: Color,
    dim: Color,
}

impl Theme {
    fn dark() -> Self {
        Self {
            bg: Color::Rgb(14, 17, 23),
            fg: Color::White,
            user: Color::Rgb(143, 224, 164),
            assistant: Color::Rgb(255, 223, 128),
            error: Color::Rgb(255, 105, 97),
            border: Color::DarkGray,
            dim: Color::DarkGray,
        }
    }

    fn light() -> Self {
        Self {
            bg: Color::White,
            fg: Color::Black,
            user: Color::Rgb(47, 110, 65),
            assistant: Color::Rgb(153, 102, 0),
            error: Color::Red,
            border: Color::Gray,
            dim: Color::DarkGray,
        }
    }
}

pub fn render(app: &mut App, frame: &mut Frame) {
    let theme = if app.dark_mode {
        Theme::dark()
    } else {
        Theme::light()
    };

    let area = frame.area();
    frame.render_widget(
        Block::default().style(Style::default().bg(theme.bg).fg(theme.fg)),
        area,
    );

    // Main layout: header, chat, notice, input, footer
    let [header_area, chat_area, notice_area, input_area, footer_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(0),
        Constraint::Length(1),
        Constraint::Length(3),
        Constraint::Length(1),
    ])
    .areas(area);

    render_header(app, frame, header_area, &theme);
    render_chat(app, frame, chat_area, &theme);
    render_notice(app, frame, notice_area);
    render_input(app, frame, input_area, &theme);
    render_footer(app, frame, footer_area);

    if app.show_model_picker {
        render_model_picker(app, frame, area, &theme);
    }
}

fn render_header(app: &App, frame: &mut Frame, area: Rect, theme: &Theme) {
    let mode_indicator = if app.dark_mode { " dark " } else { " light " };

    let title = Line::from(vec![
        Span::styled(
            " Groq AI Chatbot ",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!("[{}]", app.selected_model), Style::default().fg(theme.dim)),
        Span::raw(" "),
        Span::styled(mode_indicator, Style::default().fg(theme.dim)),
        Span::styled(
            format!("v{}", env!("CARGO_PKG_VERSION")),
            Style::default().fg(theme.dim),
        ),
    ]);

    frame.render_widget(Paragraph::new(title), area);
}

fn render_chat(app: &mut App, frame: &mut Frame, area: Rect, theme: &Theme) {
    let chat_block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border))
        .title(" Conversation ");

    if app.history.is_empty() {
        let placeholder = Paragraph::new(Text::from(Span::styled(
            "Ask a question...",
            Style::default().fg(theme.dim),
        )))
        .block(chat_block)
        .wrap(Wrap { trim: true });
        frame.render_widget(placeholder, area);
        return;
    }

    // Inner width minus borders and the highlight symbol
    let wrap_width = (area.width.saturating_sub(4) as usize).max(1);

    let items: Vec<ListItem> = app
        .history
        .snapshot()
        .iter()
        .map(|entry| {
            let (label, color) = match entry.sender {
                Sender::User => ("You:", theme.user),
                Sender::Assistant => ("Groq:", theme.assistant),
                Sender::Error => ("Error:", theme.error),
            };

            let mut lines = vec![Line::from(Span::styled(
                label,
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            ))];
            for row in wrap(&entry.text, wrap_width) {
                lines.push(Line::from(Span::styled(
                    row.into_owned(),
                    Style::default().fg(theme.fg),
                )));
            }
            lines.push(Line::default());

            ListItem::new(Text::from(lines))
        })
        .collect();

    let list = List::new(items)
        .block(chat_block)
        .highlight_style(Style::default().add_modifier(Modifier::BOLD))
        .highlight_symbol("> ");

    frame.render_stateful_widget(list, area, &mut app.chat_state);
}

fn render_notice(app: &App, frame: &mut Frame, area: Rect) {
    if let Some(notice) = &app.notice {
        let line = Line::from(Span::styled(
            format!(" {} ", notice),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ));
        frame.render_widget(Paragraph::new(line), area);
    }
}

fn render_input(app: &App, frame: &mut Frame, area: Rect, theme: &Theme) {
    let editing = app.input_mode == InputMode::Editing;
    let input_border_color = if editing { Color::Yellow } else { theme.border };

    let input_block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(input_border_color))
        .title(" You (i to type, Enter to send) ");

    // Calculate visible portion of input with horizontal scrolling
    // Inner width = total width - 2 (for borders)
    let inner_width = area.width.saturating_sub(2) as usize;
    let cursor_pos = app.input_cursor;

    let scroll_offset = if inner_width == 0 {
        0
    } else if cursor_pos >= inner_width {
        cursor_pos - inner_width + 1
    } else {
        0
    };

    let visible_text: String = app
        .input
        .chars()
        .skip(scroll_offset)
        .take(inner_width)
        .collect();

    let input = Paragraph::new(visible_text)
        .style(Style::default().fg(theme.user))
        .block(input_block);

    frame.render_widget(input, area);

    if editing {
        let cursor_x = (cursor_pos - scroll_offset) as u16;
        frame.set_cursor_position((area.x + cursor_x + 1, area.y + 1));
    }
}

fn render_footer(app: &App, frame: &mut Frame, area: Rect) {
    // Key style: dark background with bright text for visibility on both themes
    let key_style = Style::default().bg(Color::DarkGray).fg(Color::White);
    let label_style = Style::default().bg(Color::Black).fg(Color::White);

    let hints = match app.input_mode {
        InputMode::Normal => vec![
            Span::styled(" i ", key_style),
            Span::styled(" type ", label_style),
            Span::styled(" j/k ", key_style),
            Span::styled(" select ", label_style),
            Span::styled(" d ", key_style),
            Span::styled(" download ", label_style),
            Span::styled(" x ", key_style),
            Span::styled(" delete ", label_style),
            Span::styled(" C ", key_style),
            Span::styled(" clear chat ", label_style),
            Span::styled(" m ", key_style),
            Span::styled(" model ", label_style),
            Span::styled(" t ", key_style),
            Span::styled(" theme ", label_style),
            Span::styled(" q ", key_style),
            Span::styled(" quit ", label_style),
        ],
        InputMode::Editing => vec![
            Span::styled(" Enter ", key_style),
            Span::styled(" send ", label_style),
            Span::styled(" Esc ", key_style),
            Span::styled(" done ", label_style),
        ],
    };

    frame.render_widget(Paragraph::new(Line::from(hints)), area);
}

fn render_model_picker(app: &mut App, frame: &mut Frame, area: Rect, theme: &Theme) {
    let height = (groq::MODELS.len() + 2) as u16;
    let popup = centered_rect(40, height, area);

    frame.render_widget(Clear, popup);

    let items: Vec<ListItem> = groq::MODELS
        .iter()
        .map(|model| {
            let marker = if *model == app.selected_model { "* " } else { "  " };
            ListItem::new(format!("{}{}", marker, model))
        })
        .collect();

    let picker = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan))
                .title(" Select Groq Model ")
                .style(Style::default().bg(theme.bg).fg(theme.fg)),
        )
        .highlight_style(
            Style::default()
                .bg(Color::Cyan)
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");

    frame.render_stateful_widget(picker, popup, &mut app.model_picker_state);
}

fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let [_, middle, _] = Layout::vertical([
        Constraint::Min(0),
        Constraint::Length(height.min(area.height)),
        Constraint::Min(0),
    ])
    .areas(area);

    let [_, center, _] = Layout::horizontal([
        Constraint::Min(0),
        Constraint::Length(width.min(area.width)),
        Constraint::Min(0),
    ])
    .areas(middle);

    center
}
