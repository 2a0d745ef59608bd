use ratatui::{
    layout::{Alignment, Constraint, Layout, Position, Rect},
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::app::{App, InputField, InputMode, Phase};

pub fn render(app: &mut App, frame: &mut Frame) {
    let area = frame.area();

    // Main layout: header, body, footer
    let [header_area, body_area, footer_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .areas(area);

    render_header(frame, header_area);

    if app.show_input() {
        render_input_screen(app, frame, body_area);
    } else if app.generating {
        render_generating(app, frame, body_area);
    } else {
        render_story_screen(app, frame, body_area);
    }

    render_footer(app, frame, footer_area);
}

fn render_header(frame: &mut Frame, area: Rect) {
    let title = Line::from(vec![
        Span::styled(" Relatos ", Style::default().fg(Color::Cyan).bold()),
        Span::styled(
            format!("v{}", env!("CARGO_PKG_VERSION")),
            Style::default().fg(Color::DarkGray),
        ),
    ]);

    let header = Paragraph::new(title).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(header, area);
}

fn render_input_screen(app: &mut App, frame: &mut Frame, area: Rect) {
    let width = area.width.min(66);
    let [_, column, _] = Layout::horizontal([
        Constraint::Fill(1),
        Constraint::Length(width),
        Constraint::Fill(1),
    ])
    .areas(area);

    let [_, image_area, prompt_area, error_area, _] = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(4),
        Constraint::Length(3),
        Constraint::Length(2),
        Constraint::Fill(2),
    ])
    .areas(column);

    render_image_box(app, frame, image_area);
    render_prompt_box(app, frame, prompt_area);

    if let Some(error) = &app.attach_error {
        let error = Paragraph::new(error.as_str())
            .style(Style::default().fg(Color::Red))
            .wrap(Wrap { trim: true });
        frame.render_widget(error, error_area);
    }
}

fn render_image_box(app: &App, frame: &mut Frame, area: Rect) {
    let focused = app.focus == InputField::ImagePath;
    let editing = focused && app.input_mode == InputMode::Editing;
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Image ")
        .border_style(focus_style(focused));

    let path_line = if app.image_input.is_empty() && !editing {
        Line::from(Span::styled(
            "path/to/image.png",
            Style::default().fg(Color::DarkGray),
        ))
    } else {
        Line::from(app.image_input.as_str())
    };

    let preview_line = match &app.image {
        Some(image) => Line::from(Span::styled(
            image.preview(),
            Style::default().fg(Color::Green),
        )),
        None => Line::from(Span::styled(
            "Image Here",
            Style::default().fg(Color::DarkGray),
        )),
    };

    let inner = block.inner(area);
    frame.render_widget(Paragraph::new(vec![path_line, preview_line]).block(block), area);

    if editing {
        set_input_cursor(frame, inner, &app.image_input, app.image_cursor);
    }
}

fn render_prompt_box(app: &App, frame: &mut Frame, area: Rect) {
    let focused = app.focus == InputField::Prompt;
    let editing = focused && app.input_mode == InputMode::Editing;
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Prompt ")
        .border_style(focus_style(focused));

    let content = if app.prompt_input.is_empty() && !editing {
        Line::from(Span::styled(
            "Enter your prompt",
            Style::default().fg(Color::DarkGray),
        ))
    } else {
        Line::from(app.prompt_input.as_str())
    };

    let inner = block.inner(area);
    frame.render_widget(Paragraph::new(content).block(block), area);

    if editing {
        set_input_cursor(frame, inner, &app.prompt_input, app.prompt_cursor);
    }
}

fn render_generating(app: &App, frame: &mut Frame, area: Rect) {
    let [_, middle, _] = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(1),
        Constraint::Fill(1),
    ])
    .areas(area);

    let dots = ".".repeat(app.animation_frame as usize + 1);
    let text = Line::from(Span::styled(
        format!("Generating{dots}"),
        Style::default().fg(Color::Yellow).bold(),
    ));
    frame.render_widget(Paragraph::new(text).alignment(Alignment::Center), middle);
}

fn render_story_screen(app: &mut App, frame: &mut Frame, area: Rect) {
    let title = if app.is_summarized {
        " Summary "
    } else {
        " Story "
    };
    let block = Block::default().borders(Borders::ALL).title(title);
    let inner = block.inner(area);

    // Rough wrap estimate so scrolling clamps at the bottom
    let wrap_width = inner.width.max(1) as usize;
    let char_count = app.reveal.revealed().chars().count();
    app.story_height = inner.height;
    app.story_total_lines = ((char_count / wrap_width) + 1) as u16;

    let story = Paragraph::new(app.reveal.revealed().to_string())
        .wrap(Wrap { trim: false })
        .alignment(Alignment::Center)
        .scroll((app.story_scroll, 0))
        .block(block);
    frame.render_widget(story, area);
}

fn render_footer(app: &App, frame: &mut Frame, area: Rect) {
    let mode_style = match app.phase() {
        Phase::Submitting => Style::default().bg(Color::Yellow).fg(Color::Black),
        _ => Style::default().bg(Color::Blue).fg(Color::White),
    };
    let mode_text = match app.phase() {
        Phase::Idle => " INPUT ",
        Phase::Submitting => " GENERATING ",
        Phase::Revealing => " STORY ",
        Phase::Summarized => " SUMMARY ",
    };

    // Key style: dark background with bright text for visibility on both light/dark terminals
    let key_style = Style::default().bg(Color::DarkGray).fg(Color::White);
    let label_style = Style::default().bg(Color::Black).fg(Color::White);

    let mut hints: Vec<Span> = vec![Span::styled(mode_text, mode_style), Span::raw(" ")];

    match app.phase() {
        Phase::Idle => {
            if app.input_mode == InputMode::Editing {
                hints.extend([
                    Span::styled(" Tab ", key_style),
                    Span::styled(" field ", label_style),
                    Span::styled(" Enter ", key_style),
                    Span::styled(" attach/generate ", label_style),
                    Span::styled(" Esc ", key_style),
                    Span::styled(" done ", label_style),
                ]);
            } else {
                hints.extend([
                    Span::styled(" i ", key_style),
                    Span::styled(" edit ", label_style),
                    Span::styled(" Tab ", key_style),
                    Span::styled(" field ", label_style),
                    Span::styled(" Enter ", key_style),
                    Span::styled(" generate ", label_style),
                    Span::styled(" q ", key_style),
                    Span::styled(" quit ", label_style),
                ]);
            }
        }
        Phase::Submitting => {
            hints.push(Span::styled(" waiting for the story service ", label_style));
        }
        Phase::Revealing | Phase::Summarized => {
            hints.extend([
                Span::styled(" j/k ", key_style),
                Span::styled(" scroll ", label_style),
            ]);
            if app.can_summarize() {
                hints.extend([
                    Span::styled(" s ", key_style),
                    Span::styled(" summarize ", label_style),
                ]);
            }
            hints.extend([
                Span::styled(" n ", key_style),
                Span::styled(" new story ", label_style),
                Span::styled(" q ", key_style),
                Span::styled(" quit ", label_style),
            ]);
        }
    }

    frame.render_widget(Paragraph::new(Line::from(hints)), area);
}

fn set_input_cursor(frame: &mut Frame, inner: Rect, input: &str, cursor: usize) {
    let offset = cursor.min(input.chars().count()) as u16;
    let x = inner.x + offset.min(inner.width.saturating_sub(1));
    frame.set_cursor_position(Position::new(x, inner.y));
}

fn focus_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    }
}
