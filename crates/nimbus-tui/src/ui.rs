//! Rendering. A pure function of [`App`]; all colors come from the active
//! palette so the whole screen follows the theme switch.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use nimbus_weather::FetchState;

use crate::app::App;
use crate::theme::Palette;

pub fn draw(frame: &mut Frame, app: &App) {
    let palette = app.palette();
    let area = frame.area();

    // Paint the themed background first.
    frame.render_widget(
        Block::default().style(Style::default().bg(palette.background)),
        area,
    );

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Min(7),
            Constraint::Length(1),
        ])
        .split(area);

    draw_header(frame, app, &palette, rows[0]);
    draw_search(frame, app, &palette, rows[1]);
    draw_body(frame, app, &palette, rows[2]);
    draw_footer(frame, &palette, rows[3]);
}

fn draw_header(frame: &mut Frame, app: &App, palette: &Palette, area: Rect) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(10), Constraint::Length(14)])
        .split(area);

    let title = Paragraph::new(Line::from(Span::styled(
        " Nimbus Weather",
        Style::default()
            .fg(palette.text)
            .add_modifier(Modifier::BOLD),
    )));
    frame.render_widget(title, cols[0]);

    // Theme switch: label plus a thumb-on-track glyph.
    let thumb = if app.prefs.dark_mode() { "(●)" } else { "(○)" };
    let switch = Paragraph::new(Line::from(vec![
        Span::styled(app.theme_label(), Style::default().fg(palette.secondary_text)),
        Span::raw(" "),
        Span::styled(thumb, Style::default().fg(palette.switch_thumb).bg(palette.switch_track)),
        Span::raw(" "),
    ]))
    .alignment(Alignment::Right);
    frame.render_widget(switch, cols[1]);
}

fn draw_search(frame: &mut Frame, app: &App, palette: &Palette, area: Rect) {
    // The border takes the accent color once there is something to submit.
    let border = if app.input().is_empty() {
        palette.secondary
    } else {
        palette.primary
    };
    let input = Paragraph::new(app.input())
        .style(Style::default().fg(palette.text))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(border))
                .title(Span::styled(
                    " Enter city ",
                    Style::default().fg(palette.secondary_text),
                )),
        );
    frame.render_widget(input, area);
}

fn draw_body(frame: &mut Frame, app: &App, palette: &Palette, area: Rect) {
    match app.fetcher.state() {
        FetchState::Disabled => {
            let hint = Paragraph::new("Type a city name and press Enter")
                .style(Style::default().fg(palette.secondary_text))
                .alignment(Alignment::Center);
            frame.render_widget(hint, centered_line(area));
        }
        FetchState::Loading => {
            let spinner = Paragraph::new(format!("{} Loading…", app.spinner_char()))
                .style(Style::default().fg(palette.activity_indicator))
                .alignment(Alignment::Center);
            frame.render_widget(spinner, centered_line(area));
        }
        FetchState::Error(err) => {
            let message = Paragraph::new(err.user_message())
                .style(
                    Style::default()
                        .fg(palette.error)
                        .add_modifier(Modifier::BOLD),
                )
                .alignment(Alignment::Center);
            frame.render_widget(message, centered_line(area));
        }
        FetchState::Success(conditions) => {
            let card = Paragraph::new(vec![
                Line::from(Span::styled(
                    conditions.city.clone(),
                    Style::default()
                        .fg(palette.text)
                        .add_modifier(Modifier::BOLD),
                )),
                Line::from(Span::styled(
                    App::format_celsius(conditions),
                    Style::default().fg(palette.text),
                )),
                Line::from(Span::styled(
                    conditions.description.clone(),
                    Style::default().fg(palette.secondary_text),
                )),
                Line::from(Span::styled(
                    conditions.icon_url(),
                    Style::default().fg(palette.secondary_text),
                )),
            ])
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .style(Style::default().bg(palette.card))
                    .border_style(Style::default().fg(palette.secondary)),
            );
            frame.render_widget(card, card_area(area));
        }
    }
}

fn draw_footer(frame: &mut Frame, palette: &Palette, area: Rect) {
    let help = Paragraph::new(" Enter search · Esc clear · Tab theme · F5 refresh · Ctrl-Q quit")
        .style(Style::default().fg(palette.secondary_text));
    frame.render_widget(help, area);
}

/// A single line vertically centered in `area`.
fn centered_line(area: Rect) -> Rect {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(45),
            Constraint::Length(1),
            Constraint::Percentage(45),
        ])
        .split(area);
    rows[1]
}

/// The weather card: six lines, horizontally inset.
fn card_area(area: Rect) -> Rect {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(6),
            Constraint::Min(0),
        ])
        .split(area);
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(15),
            Constraint::Percentage(70),
            Constraint::Percentage(15),
        ])
        .split(rows[1]);
    cols[1]
}
