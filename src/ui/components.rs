//! Row widgets shared by the menu and the link list.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::portal::LinkItem;
use crate::theme::Theme;

const ICON_CHEVRON: &str = "\u{F0142}";
const ICON_EXTERNAL: &str = "\u{F03CC}";

fn row_block(selected: bool, theme: &Theme) -> Block<'static> {
    let border = if selected { theme.accent } else { theme.inactive };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border));
    if selected {
        block.style(Style::default().bg(theme.bg_selected))
    } else {
        block
    }
}

/// A section entry on the menu: icon, label, "SECURE ACCESS" caption
pub fn section_row(
    f: &mut Frame,
    area: Rect,
    label: &str,
    icon: &str,
    number: usize,
    selected: bool,
    theme: &Theme,
) {
    let marker = if selected { ICON_CHEVRON } else { " " };
    let lines = vec![
        Line::from(vec![
            Span::styled(format!(" {} ", icon), Style::default().fg(theme.accent)),
            Span::styled(label.to_string(), Style::default().fg(theme.text).add_modifier(Modifier::BOLD)),
            Span::styled(format!("  ({})", number), Style::default().fg(theme.text_dim)),
            Span::styled(format!("  {}", marker), Style::default().fg(theme.accent)),
        ]),
        Line::from(Span::styled(
            "    SECURE ACCESS",
            Style::default().fg(theme.text_dim).add_modifier(Modifier::BOLD),
        )),
    ];
    f.render_widget(Paragraph::new(lines).block(row_block(selected, theme)), area);
}

/// A catalog entry: colored icon, name, organization label, external-link marker
pub fn link_row(f: &mut Frame, area: Rect, link: &LinkItem, number: usize, selected: bool, theme: &Theme) {
    let organization_color = link
        .secondary_color
        .map(|c| theme.link_color(c))
        .unwrap_or(theme.text_dim);
    let name_color = if selected { theme.accent } else { theme.text };

    let lines = vec![
        Line::from(vec![
            Span::styled(
                format!(" {} ", link.icon.glyph()),
                Style::default().fg(theme.link_color(link.color)).add_modifier(Modifier::BOLD),
            ),
            Span::styled(link.name, Style::default().fg(name_color).add_modifier(Modifier::BOLD)),
            Span::styled(format!("  ({})", number), Style::default().fg(theme.text_dim)),
            Span::styled(format!("  {}", ICON_EXTERNAL), Style::default().fg(theme.text_dim)),
        ]),
        Line::from(Span::styled(
            format!("    {}", link.organization.to_uppercase()),
            Style::default().fg(organization_color).add_modifier(Modifier::BOLD),
        )),
    ];
    f.render_widget(Paragraph::new(lines).block(row_block(selected, theme)), area);
}

/// "key desc" pair for the hint bar
pub fn key_hint<'a>(key: &'a str, desc: &'a str, theme: &Theme) -> [Span<'a>; 2] {
    [
        Span::styled(key, Style::default().fg(theme.accent)),
        Span::styled(format!(" {}", desc), Style::default().fg(theme.text_dim)),
    ]
}
