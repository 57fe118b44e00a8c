use ratatui::prelude::{Line, Span};
use ratatui::widgets::ListItem;

use crate::filter::VisibleRow;

pub fn get_item_list<'a>(rows: &[VisibleRow]) -> Vec<ListItem<'a>> {
    rows.iter()
        .map(|r| ListItem::new(Line::from(vec![Span::raw(r.text.clone())])))
        .collect()
}
