//! Weather window rendering
//!
//! Renders the single-screen weather form: a city input box, a unit selector,
//! an output panel with the latest result and a key hint footer.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::app::{App, Output};
use crate::units::TemperatureUnit;

/// Condition category to icon mapping
fn condition_icon(category: &str) -> &'static str {
    match category {
        "Clear" => "\u{2600}",        // ☀
        "Clouds" => "\u{2601}",       // ☁
        "Rain" => "\u{1F327}",        // 🌧
        "Drizzle" => "\u{1F326}",     // 🌦
        "Thunderstorm" => "\u{26C8}", // ⛈
        "Snow" => "\u{2744}",         // ❄
        _ => "\u{1F32B}",             // 🌫 mist, haze, fog, dust...
    }
}

/// Color for temperature (warmer = more red, cooler = more blue)
fn temperature_color(celsius: f64) -> Color {
    if celsius >= 30.0 {
        Color::Red
    } else if celsius >= 25.0 {
        Color::LightRed
    } else if celsius >= 20.0 {
        Color::Yellow
    } else if celsius >= 15.0 {
        Color::Green
    } else if celsius >= 10.0 {
        Color::Cyan
    } else {
        Color::Blue
    }
}

/// Renders the whole window
pub fn render(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Length(3), // City input
            Constraint::Length(3), // Unit selector
            Constraint::Min(8),    // Output
            Constraint::Length(1), // Footer
        ])
        .split(frame.area());

    render_title(frame, chunks[0]);
    render_input(frame, app, chunks[1]);
    render_units(frame, app, chunks[2]);
    render_output(frame, app, chunks[3]);
    render_footer(frame, chunks[4]);
}

fn render_title(frame: &mut Frame, area: Rect) {
    let title = Paragraph::new(Line::from(vec![
        Span::raw("\u{1F324} "),
        Span::styled(
            "Weather App",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
    ]))
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::BOTTOM));

    frame.render_widget(title, area);
}

fn render_input(frame: &mut Frame, app: &App, area: Rect) {
    let input = Paragraph::new(Line::from(vec![
        Span::raw(app.city_input.as_str()),
        Span::styled("_", Style::default().add_modifier(Modifier::SLOW_BLINK)),
    ]))
    .block(
        Block::default()
            .title(" Enter City ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow)),
    );

    frame.render_widget(input, area);
}

/// A radio-button style option
fn unit_option(unit: TemperatureUnit, selected: TemperatureUnit) -> Span<'static> {
    if unit == selected {
        Span::styled(
            format!("(\u{2022}) {}", unit.name()),
            Style::default().add_modifier(Modifier::BOLD),
        )
    } else {
        Span::styled(
            format!("( ) {}", unit.name()),
            Style::default().fg(Color::DarkGray),
        )
    }
}

fn render_units(frame: &mut Frame, app: &App, area: Rect) {
    let units = Paragraph::new(Line::from(vec![
        unit_option(TemperatureUnit::Celsius, app.unit),
        Span::raw("   "),
        unit_option(TemperatureUnit::Fahrenheit, app.unit),
    ]))
    .block(Block::default().title(" Unit ").borders(Borders::ALL));

    frame.render_widget(units, area);
}

fn render_output(frame: &mut Frame, app: &App, area: Rect) {
    let mut lines: Vec<Line> = match &app.output {
        Output::Empty => vec![Line::from(Span::styled(
            "Type a city and press Enter",
            Style::default().fg(Color::DarkGray),
        ))],
        Output::Fetching(city) => vec![Line::from(Span::styled(
            format!("Fetching weather for {}...", city),
            Style::default().fg(Color::Cyan),
        ))],
        Output::Warning(message) => vec![Line::from(Span::styled(
            message.clone(),
            Style::default().fg(Color::Yellow),
        ))],
        Output::Error(message) => vec![Line::from(Span::styled(
            format!("Error: {}", message),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ))],
        Output::Reading(reading) => {
            let temp_style = Style::default().fg(temperature_color(reading.temperature));
            let mut lines = vec![Line::from(vec![
                Span::raw(condition_icon(&reading.condition)),
                Span::raw(" "),
                Span::styled(
                    reading.condition.clone(),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
            ])];
            lines.push(Line::from(""));
            for line in app.reading_lines().unwrap_or_default() {
                let value_style = if line.label == "Temperature" {
                    temp_style
                } else {
                    Style::default()
                };
                lines.push(Line::from(vec![
                    Span::styled(
                        format!("{:<13}", format!("{}:", line.label)),
                        Style::default().fg(Color::Gray),
                    ),
                    Span::styled(line.value, value_style),
                ]));
            }
            lines
        }
    };

    if let Some(status) = &app.save_status {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            status.clone(),
            Style::default().fg(Color::DarkGray),
        )));
    }

    let output = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(Block::default().title(" Weather ").borders(Borders::ALL));

    frame.render_widget(output, area);
}

fn render_footer(frame: &mut Frame, area: Rect) {
    let hint = |key: &'static str, desc: &'static str| {
        vec![
            Span::styled(key, Style::default().fg(Color::Yellow)),
            Span::raw(format!(" {}  ", desc)),
        ]
    };

    let mut spans = hint("Enter", "Get Weather");
    spans.extend(hint("Tab", "Toggle unit"));
    spans.extend(hint("Esc", "Quit"));

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
