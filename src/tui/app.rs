use std::io::{self, stdout, Stdout};
use std::path::PathBuf;
use std::sync::mpsc;
use std::time::Duration;

use crossterm::{
    event::{self, Event},
    execute,
    terminal::{enable_raw_mode, EnterAlternateScreen},
};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, List, ListState, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState},
    Terminal,
};
use tracing::{error, info};

use crate::config::Settings;
use crate::download::{spawn_download, DownloadEvent};
use crate::error::DlidxError;
use crate::http::HttpClient;
use crate::models::FileDescriptor;
use crate::tui::controller::{Action, Controller, Mode};
use crate::tui::theme::{self, Theme};
use crate::tui::view::{helpbox::get_footer, listitems::get_item_list, progressbox::show_progress_box};
use crate::util::restore_terminal;

/// Upper bound on how long a key press or a chunk event waits to be handled.
const TICK: Duration = Duration::from_millis(100);

/// Run the interactive browser until the user quits.
pub fn run_tui(mut controller: Controller, client: HttpClient, settings: &Settings) -> io::Result<()> {
    let theme = theme::from_settings(&settings.theme);

    enable_raw_mode()?;
    execute!(stdout(), EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout());
    let result = match Terminal::new(backend) {
        Ok(mut terminal) => event_loop(&mut terminal, &mut controller, &client, settings, &theme),
        Err(e) => Err(e),
    };
    restore_terminal();
    result
}

fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    controller: &mut Controller,
    client: &HttpClient,
    settings: &Settings,
    theme: &Theme,
) -> io::Result<()> {
    let (dl_tx, dl_rx) = mpsc::channel::<DownloadEvent>();
    let mut list_state = ListState::default();

    loop {
        // chunk events first so the frame shows the newest progress
        while let Ok(ev) = dl_rx.try_recv() {
            controller.handle_download_event(ev);
        }

        terminal.draw(|f| draw(f, controller, &mut list_state, theme))?;

        if !event::poll(TICK)? {
            continue;
        }
        let Event::Key(key) = event::read()? else {
            continue;
        };
        match controller.handle_key(key) {
            Action::None => {}
            Action::Quit => {
                info!("Quit requested");
                return Ok(());
            }
            Action::StartDownload { id, file } => {
                let local_path = destination(settings, &file);
                if let Err(e) = spawn_download(id, client.clone(), file.clone(), local_path.clone(), dl_tx.clone()) {
                    error!("Cannot start download thread: {e}");
                    controller.handle_download_event(DownloadEvent::Finished {
                        id,
                        file,
                        local_path,
                        result: Err(DlidxError::Io(e)),
                    });
                }
            }
        }
    }
}

/// `<download_dir>/<entry name>`; an existing file is overwritten.
pub fn destination(settings: &Settings, file: &FileDescriptor) -> PathBuf {
    settings.download_dir.join(&file.name)
}

fn draw(f: &mut Frame<'_>, controller: &mut Controller, list_state: &mut ListState, theme: &Theme) {
    let area = f.area();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .split(area);

    let title = Paragraph::new(Line::from(vec![Span::styled(
        format!(" {}", controller.title()),
        Style::default().fg(theme.accent).add_modifier(Modifier::BOLD),
    )]))
    .style(Style::default().bg(theme.bg));
    f.render_widget(title, chunks[0]);

    let list_area = chunks[1];
    controller.set_viewport(list_area.height.saturating_sub(2) as usize);

    let rows = controller.rows();
    let total = controller.list().len();
    let list_title = if rows.len() == total {
        format!("Entries ({})", total)
    } else {
        format!("Entries ({} of {})", rows.len(), total)
    };

    let list = List::new(get_item_list(&rows))
        .block(
            Block::default()
                .title(list_title)
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.accent))
                .style(Style::default().bg(theme.bg).fg(theme.fg)),
        )
        .highlight_symbol("➜ ")
        .highlight_style(Style::default().bg(theme.accent).fg(theme.bg).add_modifier(Modifier::BOLD));

    list_state.select(controller.selected());
    f.render_stateful_widget(list, list_area, list_state);

    let mut sb_state = ScrollbarState::new(rows.len().max(1)).position(controller.selected().unwrap_or(0));
    let sb = Scrollbar::default().orientation(ScrollbarOrientation::VerticalRight);
    f.render_stateful_widget(sb, list_area, &mut sb_state);

    f.render_widget(get_footer(controller, theme), chunks[2]);

    if controller.mode() == Mode::Downloading {
        if let Some(active) = controller.active_download() {
            show_progress_box(f, area, active, theme);
        }
    }
}
