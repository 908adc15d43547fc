use geopointcore::{AttributeValue, CoreResult, WorkflowController};
use iced::{
    widget::{button, container, row, scrollable, text, text_input, Column, Row},
    Element, Length,
};
use std::collections::HashMap;

use crate::Message;

const CELL_WIDTH: f32 = 110.0;

/// Uncommitted cell text, keyed by (row, column).
pub type Drafts = HashMap<(usize, usize), String>;

/// Commit the draft for one cell; `None` when nothing was typed there.
///
/// A rejected edit puts the draft back so the text stays in the cell.
pub fn commit_draft(
    controller: &mut WorkflowController,
    drafts: &mut Drafts,
    row: usize,
    col: usize,
) -> Option<CoreResult<AttributeValue>> {
    let input = drafts.remove(&(row, col))?;
    let result = controller.edit_cell(row, col, &input);
    if result.is_err() {
        drafts.insert((row, col), input);
    }
    Some(result)
}

/// Editable attribute grid. The current row is boxed; clicking a row index
/// moves the cursor there. Edits commit on Enter.
pub fn attribute_table<'a>(controller: &'a WorkflowController, drafts: &'a Drafts) -> Element<'a, Message> {
    let table = controller.layer().table();

    let header = table.column_names().fold(
        Row::new()
            .spacing(4)
            .push(text("#").size(13).width(Length::Fixed(48.0)))
            .push(text("key").size(13).width(Length::Fixed(CELL_WIDTH))),
        |header, name| header.push(text(name.to_string()).size(13).width(Length::Fixed(CELL_WIDTH))),
    );

    let rows = table.rows().enumerate().fold(Column::new().spacing(2), |rows, (r, cells)| {
        let key = controller
            .layer()
            .feature(r)
            .map(|f| f.key.clone())
            .unwrap_or_default();
        let line = cells.iter().enumerate().fold(
            row![
                button(text(r.to_string()).size(12))
                    .on_press(Message::SelectRow(r))
                    .width(Length::Fixed(48.0))
                    .padding(2),
                text(key).size(12).width(Length::Fixed(CELL_WIDTH)),
            ]
            .spacing(4),
            |line, (c, cell)| {
                let shown = drafts.get(&(r, c)).cloned().unwrap_or_else(|| cell.as_text());
                line.push(
                    text_input("", &shown)
                        .on_input(move |value| Message::CellDraft(r, c, value))
                        .on_submit(Message::CellCommit(r, c))
                        .size(12)
                        .padding(2)
                        .width(Length::Fixed(CELL_WIDTH)),
                )
            },
        );
        if r == controller.index() {
            rows.push(container(line).style(container::rounded_box).padding(2))
        } else {
            rows.push(container(line).padding(2))
        }
    });

    Column::new()
        .spacing(4)
        .push(header)
        .push(scrollable(rows).height(Length::Fill))
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use geopointcore::data::{AttributeTable, ColumnDef, PointFeature, PointLayer};
    use geopointcore::{Coordinate, LoggerConfig};

    fn controller() -> WorkflowController {
        let mut table = AttributeTable::new(vec![ColumnDef::text("ID", 10), ColumnDef::integer("count")]);
        table.push_row(vec![AttributeValue::Null, AttributeValue::Null]).unwrap();
        let layer = PointLayer::new(vec![PointFeature::numbered(0, Coordinate::new(1.0, 2.0))], table).unwrap();
        WorkflowController::new(layer, LoggerConfig::default())
    }

    #[test]
    fn rejected_edit_keeps_its_draft() {
        let mut ctl = controller();
        let mut drafts = Drafts::new();
        drafts.insert((0, 1), "twelve".to_string());

        assert!(matches!(commit_draft(&mut ctl, &mut drafts, 0, 1), Some(Err(_))));
        assert_eq!(drafts.get(&(0, 1)).map(String::as_str), Some("twelve"));

        drafts.insert((0, 1), "12".to_string());
        assert!(matches!(commit_draft(&mut ctl, &mut drafts, 0, 1), Some(Ok(AttributeValue::Int(12)))));
        assert!(drafts.is_empty());
        assert!(commit_draft(&mut ctl, &mut drafts, 0, 1).is_none());
    }
}
