mod components;

use std::sync::OnceLock;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::app::{App, Popup};
use crate::portal::{Section, View};
use crate::theme::Theme;

use components::{key_hint, link_row, section_row};

// Theme is resolved once at startup from the config
static THEME: OnceLock<Theme> = OnceLock::new();

/// Install the theme before the first draw. Later calls are ignored.
pub fn init_theme(theme: Theme) {
    let _ = THEME.set(theme);
}

fn theme() -> &'static Theme {
    THEME.get_or_init(Theme::default)
}

// Helper functions to get theme colors
fn accent() -> Color { theme().accent }
fn inactive() -> Color { theme().inactive }
fn danger() -> Color { theme().danger }
fn text() -> Color { theme().text }
fn text_dim() -> Color { theme().text_dim }
fn header() -> Color { theme().header }

/// Maximum width of the portal column
const COLUMN_WIDTH: u16 = 64;

const ICON_OFFICE: &str = "\u{F0991}";
const ICON_FACTORY: &str = "\u{F0247}";
const ICON_LOCK: &str = "\u{F033E}";
const ICON_UNLOCK: &str = "\u{F033F}";
const ICON_ALERT: &str = "\u{F0028}";
const ICON_BACK: &str = "\u{F0141}";

pub fn draw(f: &mut Frame, app: &App) {
    let area = centered_column(f.area(), COLUMN_WIDTH);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),  // Info line
            Constraint::Length(4),  // Title + tagline
            Constraint::Min(8),     // Current screen
            Constraint::Length(1),  // Footer
            Constraint::Length(1),  // Key hints
        ])
        .split(area);

    draw_info_line(f, app, chunks[0]);
    draw_header(f, chunks[1]);

    match app.view() {
        View::Menu => draw_menu(f, app, chunks[2]),
        View::Login => draw_login(f, app, chunks[2]),
        View::Unlocked => draw_links(f, app, chunks[2]),
    }

    draw_footer(f, chunks[3]);
    draw_key_hints(f, app, chunks[4]);

    if app.popup == Popup::Help {
        draw_help_popup(f);
    }
}

fn draw_info_line(f: &mut Frame, app: &App, area: Rect) {
    let line = match &app.status_message {
        Some(status) => Line::from(Span::styled(status.as_str(), Style::default().fg(accent()))),
        None => Line::from(""),
    };
    f.render_widget(Paragraph::new(line).alignment(Alignment::Center), area);
}

fn draw_header(f: &mut Frame, area: Rect) {
    let lines = vec![
        Line::from(Span::styled(ICON_OFFICE, Style::default().fg(accent()))),
        Line::from(Span::styled(
            "MOB Portal",
            Style::default().fg(header()).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            "Plan Smart. Spend Right. Perform Better",
            Style::default().fg(text_dim()).add_modifier(Modifier::ITALIC),
        )),
    ];
    f.render_widget(Paragraph::new(lines).alignment(Alignment::Center), area);
}

fn draw_menu(f: &mut Frame, app: &App, area: Rect) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),
            Constraint::Length(4),
            Constraint::Min(0),
        ])
        .split(area);

    for (i, section) in Section::ALL.into_iter().enumerate() {
        let icon = match section {
            Section::HeadOffice => ICON_OFFICE,
            Section::Factory => ICON_FACTORY,
        };
        let selected = i == app.selected_section;
        section_row(f, rows[i], section.label(), icon, i + 1, selected, theme());
    }
}

fn draw_login(f: &mut Frame, app: &App, area: Rect) {
    let Some(section) = app.portal.section() else {
        return;
    };

    let block = Block::default()
        .title(Span::styled(
            format!(" {} Access {} ", ICON_BACK, section.code()),
            Style::default().fg(header()).add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(accent()));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(1),  // Label
            Constraint::Length(3),  // Input
            Constraint::Length(3),  // Error banner
            Constraint::Length(1),  // Submit hint
            Constraint::Min(0),
        ])
        .split(inner);

    f.render_widget(
        Paragraph::new(Span::styled(
            "SECURITY KEY",
            Style::default().fg(text_dim()).add_modifier(Modifier::BOLD),
        )),
        chunks[0],
    );

    // Never render the typed characters
    let draft = app.portal.credential();
    let input_line = if draft.is_empty() {
        Line::from(vec![
            Span::styled("••••••••", Style::default().fg(inactive())),
            Span::styled("_", Style::default().fg(accent())),
        ])
    } else {
        Line::from(vec![
            Span::styled("•".repeat(draft.chars().count()), Style::default().fg(text())),
            Span::styled("_", Style::default().fg(accent())),
        ])
    };
    let input = Paragraph::new(input_line).block(
        Block::default()
            .title_top(Line::from(Span::styled(format!(" {} ", ICON_LOCK), Style::default().fg(accent()))).right_aligned())
            .borders(Borders::ALL)
            .border_style(Style::default().fg(accent())),
    );
    f.render_widget(input, chunks[1]);

    if let Some(error) = app.portal.error() {
        let banner = Paragraph::new(Line::from(vec![
            Span::styled(format!("{} ", ICON_ALERT), Style::default().fg(danger())),
            Span::styled(error, Style::default().fg(danger()).add_modifier(Modifier::BOLD)),
        ]))
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(danger())),
        );
        f.render_widget(banner, chunks[2]);
    }

    let submit = Paragraph::new(Line::from(vec![
        Span::styled("Enter", Style::default().fg(accent()).add_modifier(Modifier::BOLD)),
        Span::styled("  Verify Access", Style::default().fg(text()).add_modifier(Modifier::BOLD)),
    ]))
    .alignment(Alignment::Center);
    f.render_widget(submit, chunks[3]);
}

fn draw_links(f: &mut Frame, app: &App, area: Rect) {
    let Some(section) = app.portal.section() else {
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),  // Title + badge
            Constraint::Min(3),     // Links
        ])
        .split(area);

    let title = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(10), Constraint::Length(12)])
        .split(chunks[0]);

    f.render_widget(
        Paragraph::new(Span::styled(
            format!("{} {} Links", ICON_BACK, section.code()),
            Style::default().fg(header()).add_modifier(Modifier::BOLD),
        )),
        title[0],
    );
    f.render_widget(
        Paragraph::new(Span::styled(
            format!("{} SECURE", ICON_UNLOCK),
            Style::default().fg(accent()).add_modifier(Modifier::BOLD),
        ))
        .alignment(Alignment::Right),
        title[1],
    );

    let links = app.portal.links();
    let constraints: Vec<Constraint> = links
        .iter()
        .map(|_| Constraint::Length(4))
        .chain(std::iter::once(Constraint::Min(0)))
        .collect();
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(chunks[1]);

    for (i, link) in links.iter().enumerate() {
        link_row(f, rows[i], link, i + 1, i == app.selected_link, theme());
    }
}

fn draw_footer(f: &mut Frame, area: Rect) {
    let footer = Paragraph::new(Span::styled(
        "MONITORING OPERATIONAL BUDGET",
        Style::default().fg(inactive()).add_modifier(Modifier::BOLD),
    ))
    .alignment(Alignment::Center);
    f.render_widget(footer, area);
}

fn draw_key_hints(f: &mut Frame, app: &App, area: Rect) {
    let hints: &[(&str, &str)] = match app.view() {
        View::Menu => &[("↑↓", "move"), ("Enter", "select"), ("?", "help"), ("q", "quit")],
        View::Login => &[("Enter", "verify"), ("Esc", "back"), ("F1", "help")],
        View::Unlocked => &[("↑↓", "move"), ("Enter", "open"), ("Esc", "return to menu"), ("q", "quit")],
    };

    let mut spans = Vec::new();
    for (i, (k, desc)) in hints.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" │ ", Style::default().fg(inactive())));
        }
        spans.extend(key_hint(k, desc, theme()));
    }
    f.render_widget(Paragraph::new(Line::from(spans)).alignment(Alignment::Center), area);
}

fn draw_help_popup(f: &mut Frame) {
    let popup_area = centered_rect(80, 80, f.area());
    f.render_widget(Clear, popup_area);

    let heading = |s: &'static str| {
        Line::from(Span::styled(s, Style::default().fg(header()).add_modifier(Modifier::BOLD)))
    };
    let entry = |k: &'static str, desc: &'static str| {
        Line::from(vec![
            Span::styled(format!("  {:<10}", k), Style::default().fg(accent())),
            Span::raw(desc),
        ])
    };

    let help_text = vec![
        heading("═══ Menu ═══"),
        entry("↑/↓ j/k", "Move between sections"),
        entry("Enter", "Choose section"),
        entry("1 / 2", "Head Office / Pabrik Kelapa Sawit"),
        Line::from(""),
        heading("═══ Security Key ═══"),
        entry("Enter", "Verify access"),
        entry("Ctrl+U", "Clear what you typed"),
        entry("Esc", "Back to the menu"),
        Line::from(""),
        heading("═══ Links ═══"),
        entry("↑/↓ j/k", "Move between links"),
        entry("Enter/o", "Open the form in your browser"),
        entry("1-3", "Open a form directly"),
        entry("Esc/b", "Return to menu (locks the section)"),
        Line::from(""),
        entry("Ctrl+C", "Quit from anywhere"),
        Line::from(""),
        Line::from(vec![
            Span::styled("  Press ", Style::default().fg(text_dim())),
            Span::styled("Esc", Style::default().fg(accent())),
            Span::styled(" to close", Style::default().fg(text_dim())),
        ]),
    ];

    let help = Paragraph::new(help_text)
        .block(
            Block::default()
                .title(Span::styled(" MOB Portal Help ", Style::default().fg(accent())))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(accent())),
        )
        .wrap(Wrap { trim: false });

    f.render_widget(help, popup_area);
}

/// Horizontally centered column at most `width` wide
fn centered_column(r: Rect, width: u16) -> Rect {
    let width = width.min(r.width);
    Rect {
        x: r.x + (r.width - width) / 2,
        y: r.y,
        width,
        height: r.height,
    }
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use ratatui::{backend::TestBackend, Terminal};

    fn render(app: &App) -> String {
        let backend = TestBackend::new(70, 30);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| draw(f, app)).unwrap();

        let buffer = terminal.backend().buffer();
        let mut out = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                out.push_str(buffer[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    #[test]
    fn test_menu_screen() {
        let app = App::new(AppConfig::default());
        let screen = render(&app);
        assert!(screen.contains("MOB Portal"));
        assert!(screen.contains("Head Office"));
        assert!(screen.contains("Pabrik Kelapa Sawit"));
        assert!(screen.contains("MONITORING OPERATIONAL BUDGET"));
    }

    #[test]
    fn test_login_screen_masks_password() {
        let mut app = App::new(AppConfig::default());
        app.select_section(Section::HeadOffice);
        app.portal.update_credential_draft("secret");
        let _ = app.portal.submit();

        let screen = render(&app);
        assert!(screen.contains("Access HO"));
        assert!(screen.contains("Kata sandi salah"));
        assert!(screen.contains("••••••"));
        assert!(!screen.contains("secret"));
    }

    #[test]
    fn test_links_screen_in_catalog_order() {
        let mut app = App::new(AppConfig::default());
        app.select_section(Section::Factory);
        app.portal.submit_credential("PKS123").unwrap();

        let screen = render(&app);
        assert!(screen.contains("PKS Links"));
        assert!(screen.contains("SECURE"));
        let gon = screen.find("MOB PKS GON").unwrap();
        let apo = screen.find("MOB PKS APO").unwrap();
        let asl = screen.find("MOB PKS ASL").unwrap();
        assert!(gon < apo && apo < asl);
        assert!(!screen.contains("script.google.com"));
    }

    #[test]
    fn test_tiny_terminal_does_not_panic() {
        let mut app = App::new(AppConfig::default());
        app.select_section(Section::HeadOffice);
        app.portal.submit_credential("HO123").unwrap();
        app.popup = Popup::Help;

        let backend = TestBackend::new(10, 5);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| draw(f, &app)).unwrap();
    }
}
