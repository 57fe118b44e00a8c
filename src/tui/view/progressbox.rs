use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::prelude::Style;
use ratatui::widgets::{Block, Borders, Clear, Gauge, Paragraph};
use ratatui::Frame;

use crate::tui::controller::ActiveDownload;
use crate::tui::functions::centered_rect;
use crate::tui::theme::Theme;

/// Modal over the list while a download runs.
pub fn show_progress_box(f: &mut Frame<'_>, area: Rect, download: &ActiveDownload, theme: &Theme) {
    let popup = centered_rect(60, 7, area);
    f.render_widget(Clear, popup);

    let block = Block::default()
        .title("Downloading")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.accent))
        .style(Style::default().bg(theme.bg).fg(theme.fg));
    let inner = block.inner(popup);
    f.render_widget(block, popup);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .split(inner);

    let name = Paragraph::new(format!("'{}'\n{}", download.file.name, download.progress.label()))
        .style(Style::default().fg(theme.fg));
    f.render_widget(name, rows[0]);

    // unknown total: the byte count above is all we can show
    if let Some(ratio) = download.progress.ratio() {
        let gauge = Gauge::default()
            .gauge_style(Style::default().fg(theme.accent).bg(theme.bg))
            .ratio(ratio)
            .label(format!("{}%", download.progress.percent().unwrap_or(0)));
        f.render_widget(gauge, rows[1]);
    }
}
