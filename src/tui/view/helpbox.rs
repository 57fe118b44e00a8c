use ratatui::prelude::{Line, Modifier, Span, Style};
use ratatui::widgets::Paragraph;

use crate::tui::controller::{Controller, Mode};
use crate::tui::theme::Theme;

/// Bottom bar: filter input while editing, otherwise the committed filter
/// plus the last status message or the key help.
pub fn get_footer(controller: &Controller, theme: &Theme) -> Paragraph<'static> {
    let label = Span::styled(
        "Filter (/): ",
        Style::default().fg(theme.bg).bg(theme.accent).add_modifier(Modifier::BOLD),
    );

    let line = match controller.mode() {
        Mode::FilterEditing => Line::from(vec![
            label,
            Span::styled(
                format!("{}|", controller.filter_input()),
                Style::default().fg(theme.fg),
            ),
            Span::styled("   Enter apply • Esc clear", Style::default().fg(theme.muted)),
        ]),
        Mode::Browsing | Mode::Downloading => {
            let filter = controller.list().filter();
            let filter_text = if filter.is_empty() {
                "(none)".to_string()
            } else {
                filter.to_string()
            };
            let status = controller.message().map(str::to_string).unwrap_or_else(|| {
                "↑/↓ j/k move • g/G first/last • Enter download • Esc clear filter • q quit".to_string()
            });
            Line::from(vec![
                label,
                Span::styled(filter_text, Style::default().fg(theme.fg)),
                Span::raw("   "),
                Span::styled(status, Style::default().fg(theme.muted)),
            ])
        }
    };

    Paragraph::new(line).style(Style::default().bg(theme.bg))
}
