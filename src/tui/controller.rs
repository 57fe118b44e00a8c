use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tracing::{error, info, warn};

use crate::download::{DownloadEvent, DownloadId};
use crate::filter::{FilteredList, Selection, VisibleRow};
use crate::models::{FileDescriptor, Progress};
use crate::util::human_bytes;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Browsing,
    FilterEditing,
    Downloading,
}

/// What the UI loop must do after an input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    None,
    Quit,
    StartDownload { id: DownloadId, file: FileDescriptor },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveDownload {
    pub id: DownloadId,
    pub file: FileDescriptor,
    pub progress: Progress,
}

/// Session state of the browser: the listing, the current mode, the
/// selection and at most one running download. Performs no terminal or
/// network I/O itself.
#[derive(Debug)]
pub struct Controller {
    title: String,
    list: FilteredList,
    mode: Mode,
    selection: Selection,
    filter_input: String,
    active: Option<ActiveDownload>,
    next_id: DownloadId,
    message: Option<String>,
    viewport: usize,
}

impl Controller {
    pub fn new(title: impl Into<String>, files: Vec<FileDescriptor>) -> Self {
        Self {
            title: title.into(),
            list: FilteredList::new(files),
            mode: Mode::Browsing,
            selection: Selection::default(),
            filter_input: String::new(),
            active: None,
            next_id: 1,
            message: None,
            viewport: 10,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn list(&self) -> &FilteredList {
        &self.list
    }

    pub fn rows(&self) -> Vec<VisibleRow> {
        self.list.visible_rows()
    }

    pub fn selected(&self) -> Option<usize> {
        self.selection.get(self.list.visible_len())
    }

    pub fn selected_row(&self) -> Option<VisibleRow> {
        self.selected().and_then(|pos| self.list.row_at(pos))
    }

    pub fn filter_input(&self) -> &str {
        &self.filter_input
    }

    pub fn active_download(&self) -> Option<&ActiveDownload> {
        self.active.as_ref()
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn set_message(&mut self, message: impl Into<String>) {
        self.message = Some(message.into());
    }

    /// Rows that fit in the list area; drives PageUp/PageDown.
    pub fn set_viewport(&mut self, rows: usize) {
        self.viewport = rows.max(1);
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Action {
        if key.kind != KeyEventKind::Press {
            return Action::None;
        }
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Action::Quit;
        }
        match self.mode {
            Mode::Browsing => self.browse_key(key),
            Mode::FilterEditing => {
                self.filter_key(key);
                Action::None
            }
            Mode::Downloading => match key.code {
                KeyCode::Char('q') | KeyCode::Char('Q') => Action::Quit,
                _ => Action::None,
            },
        }
    }

    fn browse_key(&mut self, key: KeyEvent) -> Action {
        let len = self.list.visible_len();
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => return Action::Quit,
            KeyCode::Up | KeyCode::Char('k') => self.selection.up(1),
            KeyCode::Down | KeyCode::Char('j') => self.selection.down(1, len),
            KeyCode::PageUp => self.selection.up(self.viewport),
            KeyCode::PageDown => self.selection.down(self.viewport, len),
            KeyCode::Home | KeyCode::Char('g') => self.selection.first(),
            KeyCode::End | KeyCode::Char('G') => self.selection.last(len),
            KeyCode::Char('/') => {
                self.mode = Mode::FilterEditing;
                self.filter_input = self.list.filter().to_string();
                self.message = None;
            }
            KeyCode::Esc => {
                self.filter_input.clear();
                self.apply_filter("");
            }
            KeyCode::Enter => return self.activate(),
            _ => {}
        }
        Action::None
    }

    fn filter_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => {
                self.filter_input.clear();
                self.apply_filter("");
                self.mode = Mode::Browsing;
            }
            KeyCode::Enter => {
                let committed = self.filter_input.clone();
                self.apply_filter(&committed);
                self.mode = Mode::Browsing;
            }
            KeyCode::Backspace => {
                self.filter_input.pop();
                let preview = self.filter_input.clone();
                self.apply_filter(&preview);
            }
            KeyCode::Char(c) => {
                self.filter_input.push(c);
                let preview = self.filter_input.clone();
                self.apply_filter(&preview);
            }
            _ => {}
        }
    }

    fn apply_filter(&mut self, filter: &str) {
        self.list.set_filter(filter);
        self.selection.first();
    }

    fn activate(&mut self) -> Action {
        let Some(row) = self.selected_row() else {
            return Action::None;
        };
        let file = match self.list.resolve(&row) {
            Ok(file) => file.clone(),
            Err(e) => {
                error!("{e}");
                self.message = Some(e.to_string());
                return Action::None;
            }
        };

        let id = self.next_id;
        self.next_id += 1;
        info!("Starting download {id}: {} <- {}", file.name, file.url);
        self.active = Some(ActiveDownload {
            id,
            file: file.clone(),
            progress: Progress::default(),
        });
        self.mode = Mode::Downloading;
        self.message = None;
        Action::StartDownload { id, file }
    }

    /// Apply an event from the download thread. Events for any session other
    /// than the active one are dropped.
    pub fn handle_download_event(&mut self, event: DownloadEvent) {
        let Some(active) = self.active.as_mut() else {
            return;
        };
        if active.id != event.id() {
            warn!("Dropping event for stale download {}", event.id());
            return;
        }
        match event {
            DownloadEvent::Started { total, .. } => {
                active.progress.total = total;
            }
            DownloadEvent::Progress { progress, .. } => {
                if progress.bytes_written >= active.progress.bytes_written {
                    active.progress = progress;
                }
            }
            DownloadEvent::Finished {
                file,
                local_path,
                result,
                ..
            } => {
                self.message = Some(match result {
                    Ok(bytes) => format!(
                        "Downloaded {} ({}) to {}",
                        file.name,
                        human_bytes(bytes),
                        local_path.display()
                    ),
                    Err(e) => format!("Download failed: {e}"),
                });
                self.active = None;
                self.mode = Mode::Browsing;
            }
        }
    }
}
