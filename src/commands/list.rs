use prettytable::{row, Table};

use crate::error::{DlidxError, Result};
use crate::filter::FilteredList;
use crate::models::FileDescriptor;

/// Visible entries of `files` under `filter`, as a table or JSON.
pub fn render_listing(files: Vec<FileDescriptor>, filter: Option<&str>, json: bool) -> Result<String> {
    let mut list = FilteredList::new(files);
    if let Some(f) = filter {
        list.set_filter(f);
    }

    if json {
        #[derive(serde::Serialize)]
        struct Out<'a> {
            index: usize,
            #[serde(flatten)]
            file: &'a FileDescriptor,
        }
        let out: Vec<Out> = list
            .visible_indices()
            .iter()
            .map(|&index| Out { index, file: &list.files()[index] })
            .collect();
        return serde_json::to_string_pretty(&out).map_err(|e| DlidxError::Io(e.into()));
    }

    if list.visible_len() == 0 {
        return Ok("No entries match your filter.\n".to_string());
    }
    let mut table = Table::new();
    table.add_row(row!["Index", "Name", "URL"]);
    for row in list.visible_rows() {
        let file = list.resolve(&row)?;
        table.add_row(row![row.index.to_string(), file.name, file.url]);
    }
    Ok(table.to_string())
}
