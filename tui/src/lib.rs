//! TUI rendering for teamgen using ratatui.

mod effects;
mod input;
mod theme;

pub use effects::reveal_rect;
pub use input::{InputPump, handle_events, handle_key};
pub use theme::{Glyphs, Palette, glyphs, palette, spinner_frame, styles};

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Margin, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{
        Block, BorderType, Borders, Clear, Padding, Paragraph, Scrollbar, ScrollbarOrientation,
        ScrollbarState, Wrap,
    },
};
use unicode_width::UnicodeWidthStr;

use teamgen_engine::{App, FormField, Reveal, Roster, RunState, Screen};

const CARD_WIDTH: u16 = 56;
const RESULTS_WIDTH: u16 = 96;
const REVEAL_WIDTH: u16 = 36;
const REVEAL_HEIGHT: u16 = 7;

/// Main draw function
pub fn draw(frame: &mut Frame, app: &mut App) {
    let options = app.ui_options();
    let palette = palette(options);
    let glyphs = glyphs(options);

    let bg_block = Block::default().style(Style::default().bg(palette.bg_dark));
    frame.render_widget(bg_block, frame.area());

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Min(1),    // Screen body
            Constraint::Length(1), // Key hints
        ])
        .split(frame.area());

    match app.screen() {
        Screen::Setup => draw_setup(frame, app, chunks[0], &palette, &glyphs),
        Screen::Draw => draw_draw(frame, app, chunks[0], &palette, &glyphs),
        Screen::Results => draw_results(frame, app, chunks[0], &palette, &glyphs),
    }
    draw_hints(frame, app, chunks[1], &palette, &glyphs);

    if let Some(reveal) = app.reveal() {
        draw_reveal(frame, app, reveal, &palette);
    }
}

fn card<'a>(title: &'a str, palette: &Palette) -> Block<'a> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(palette.bg_border))
        .style(Style::default().bg(palette.bg_panel))
        .title(Span::styled(format!(" {title} "), styles::title(palette)))
        .title_alignment(Alignment::Center)
        .padding(Padding::horizontal(2))
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

fn draw_setup(frame: &mut Frame, app: &App, area: Rect, palette: &Palette, glyphs: &Glyphs) {
    let form = app.form();
    let mut lines: Vec<Line> = vec![Line::from("")];

    for field in [FormField::Groups, FormField::Participants] {
        let focused = form.focus() == field;
        let marker = if focused { glyphs.selected } else { " " };
        let value_style = if focused {
            styles::field_focused(palette)
        } else {
            styles::field(palette)
        };
        lines.push(Line::from(vec![
            Span::styled(format!("{marker} "), Style::default().fg(palette.accent)),
            Span::styled(
                format!("{:<14}", field.label()),
                Style::default().fg(palette.text_secondary),
            ),
            Span::styled(format!(" {:<6}", form.value(field)), value_style),
        ]));
        lines.push(Line::from(""));
    }

    if let Some(err) = form.error() {
        lines.push(Line::from(Span::styled(
            format!("{} {err}", glyphs.error),
            styles::error(palette),
        )));
    }

    let height = lines.len() as u16 + 3;
    let body = centered(area, CARD_WIDTH, height);
    let paragraph = Paragraph::new(lines)
        .block(card("Team Generator", palette))
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, body);
}

fn draw_draw(frame: &mut Frame, app: &App, area: Rect, palette: &Palette, glyphs: &Glyphs) {
    let Some(run) = app.run() else {
        return;
    };
    let total = run.config().participant_count();

    let title = match app.current_participant() {
        Some(n) if n <= total => format!("Participant {n}"),
        _ => "All participants assigned".to_string(),
    };

    let prompt = if app.reveal().is_some() {
        Line::from(Span::styled(
            format!(
                "{} revealing...",
                spinner_frame(app.tick_count(), app.ui_options())
            ),
            Style::default().fg(palette.text_muted),
        ))
    } else if run.is_exhausted() {
        Line::from(Span::styled(
            "Press Enter to see the groups",
            Style::default()
                .fg(palette.accent)
                .add_modifier(Modifier::BOLD),
        ))
    } else {
        Line::from(Span::styled(
            "Press Enter to draw a group",
            Style::default()
                .fg(palette.accent)
                .add_modifier(Modifier::BOLD),
        ))
    };

    let lines = vec![
        Line::from(""),
        prompt,
        Line::from(""),
        progress_line(run, palette, glyphs),
    ];

    let body = centered(area, CARD_WIDTH, lines.len() as u16 + 3);
    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(card(&title, palette));
    frame.render_widget(paragraph, body);
}

fn progress_line<'a>(run: &RunState, palette: &Palette, glyphs: &Glyphs) -> Line<'a> {
    let mut spans = vec![Span::styled(
        format!(
            "Assigned {} / {}",
            run.assigned(),
            run.config().participant_count()
        ),
        Style::default().fg(palette.text_secondary),
    )];
    for roster in run.rosters() {
        spans.push(Span::styled(
            format!(" {} ", glyphs.separator),
            Style::default().fg(palette.text_muted),
        ));
        spans.push(Span::styled(
            format!("{} {}", roster.label().display_name(), roster.len()),
            Style::default().fg(palette.group(roster.label())),
        ));
    }
    Line::from(spans)
}

fn draw_results(frame: &mut Frame, app: &mut App, area: Rect, palette: &Palette, glyphs: &Glyphs) {
    let Some(run) = app.run() else {
        return;
    };

    let width = area.width.min(RESULTS_WIDTH);
    let outer = card("Group overview", palette);
    // Rightmost inner column is kept for the scrollbar; panels pad one cell each side.
    let panel_width = outer
        .inner(Rect::new(0, 0, width, 3))
        .width
        .saturating_sub(1);
    let text_width = panel_width.saturating_sub(2).max(1);

    let panels: Vec<(Paragraph<'static>, Color, u16)> = run
        .rosters()
        .iter()
        .map(|roster| {
            let paragraph = roster_paragraph(roster, glyphs);
            let height = u16::try_from(paragraph.line_count(text_width)).unwrap_or(u16::MAX);
            (paragraph, palette.group(roster.label()), height)
        })
        .collect();

    let content = panels
        .iter()
        .fold(0u16, |acc, (_, _, height)| acc.saturating_add(*height));
    let gaps = panels.len().saturating_sub(1) as u16;
    let gap = u16::from(content.saturating_add(gaps) <= area.height.saturating_sub(2));
    let total = content.saturating_add(gap * gaps);

    let body = centered(area, width, total.saturating_add(2));
    let inner = outer.inner(body);
    frame.render_widget(outer, body);

    let max_scroll = total.saturating_sub(inner.height);
    app.update_results_scroll_max(max_scroll);
    let offset = app.results_scroll();

    // Panels are laid out on a virtual column and clipped to the viewport.
    let rows = i32::from(inner.height);
    let mut top = -i32::from(offset);
    for (paragraph, color, height) in panels {
        let start = top.max(0);
        let end = (top + i32::from(height)).min(rows);
        if end > start {
            let rect = Rect {
                x: inner.x,
                y: inner.y + start as u16,
                width: panel_width,
                height: (end - start) as u16,
            };
            let style = styles::group_panel(palette, color);
            frame.render_widget(Block::default().style(style), rect);
            frame.render_widget(
                paragraph.style(style).scroll(((start - top) as u16, 0)),
                rect.inner(Margin {
                    horizontal: 1,
                    vertical: 0,
                }),
            );
        }
        top += i32::from(height) + i32::from(gap);
    }

    if max_scroll > 0 {
        let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight)
            .begin_symbol(Some(glyphs.arrow_up))
            .end_symbol(Some(glyphs.arrow_down))
            .track_symbol(Some(glyphs.track))
            .thumb_symbol(glyphs.thumb)
            .style(Style::default().fg(palette.text_muted));
        let mut state = ScrollbarState::new(max_scroll as usize).position(offset as usize);
        frame.render_stateful_widget(scrollbar, inner, &mut state);
    }
}

fn roster_paragraph(roster: &Roster, glyphs: &Glyphs) -> Paragraph<'static> {
    let names = roster
        .participants()
        .iter()
        .map(u32::to_string)
        .collect::<Vec<_>>()
        .join(", ");
    Paragraph::new(vec![
        Line::from(Span::styled(
            format!("Group {}", roster.label().display_name()),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(format!("{} Participants: {names}", glyphs.bullet)),
    ])
    .wrap(Wrap { trim: true })
}

fn draw_reveal(frame: &mut Frame, app: &App, reveal: &Reveal, palette: &Palette) {
    let text = format!("Group {}", reveal.label.display_name());
    let width = REVEAL_WIDTH.max(text.width() as u16 + 6);
    let base = centered(frame.area(), width, REVEAL_HEIGHT);
    let area = reveal_rect(&reveal.timer, base, app.ui_options());
    let color = palette.group(reveal.label);

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            text,
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(format!("Participant {}", reveal.participant)),
    ];
    let popup = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .style(styles::group_panel(palette, color))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Double)
                .border_style(styles::group_panel(palette, color)),
        );

    frame.render_widget(Clear, area);
    frame.render_widget(popup, area);
}

fn draw_hints(frame: &mut Frame, app: &App, area: Rect, palette: &Palette, glyphs: &Glyphs) {
    let hints: Vec<(&str, &str)> = match app.screen() {
        Screen::Setup => vec![("Tab", "switch"), ("Enter", "start"), ("Esc", "quit")],
        Screen::Draw => vec![("Enter", "draw"), ("q", "quit")],
        Screen::Results if app.results_scrollable() => {
            vec![("Up/Down", "scroll"), ("Enter", "new run"), ("q", "quit")]
        }
        Screen::Results => vec![("Enter", "new run"), ("q", "quit")],
    };

    let mut spans = Vec::new();
    for (i, (key, action)) in hints.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(
                format!(" {} ", glyphs.separator),
                styles::key_hint(palette),
            ));
        }
        spans.push(Span::styled(*key, styles::key_highlight(palette)));
        spans.push(Span::styled(format!(" {action}"), styles::key_hint(palette)));
    }

    frame.render_widget(
        Paragraph::new(Line::from(spans)).alignment(Alignment::Center),
        area,
    );
}
