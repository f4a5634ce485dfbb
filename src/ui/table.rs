use eframe::egui::{self, Ui};
use egui_extras::{Column, TableBuilder};

use crate::data::model::Table;

const ROW_HEIGHT: f32 = 18.0;
const MAX_GRID_HEIGHT: f32 = 260.0;

// ---------------------------------------------------------------------------
// Grid view of a Table
// ---------------------------------------------------------------------------

/// Render `table` as a striped grid. `id` must be unique per call site.
pub fn data_grid(ui: &mut Ui, id: &str, table: &Table) {
    let schema = table.schema();
    if schema.is_empty() {
        ui.label("No columns.");
        return;
    }

    ui.push_id(id, |ui: &mut Ui| {
        egui::ScrollArea::horizontal().show(ui, |ui: &mut Ui| {
            TableBuilder::new(ui)
                .striped(true)
                .resizable(true)
                .max_scroll_height(MAX_GRID_HEIGHT)
                .column(Column::auto().at_least(32.0))
                .columns(Column::auto().at_least(80.0).clip(true), schema.len())
                .header(ROW_HEIGHT + 4.0, |mut header| {
                    header.col(|ui: &mut Ui| {
                        ui.strong("#");
                    });
                    for column in &schema.columns {
                        header.col(|ui: &mut Ui| {
                            ui.strong(&column.name)
                                .on_hover_text(column.ty.name());
                        });
                    }
                })
                .body(|body| {
                    body.rows(ROW_HEIGHT, table.len(), |mut row| {
                        let index = row.index();
                        row.col(|ui: &mut Ui| {
                            ui.weak(index.to_string());
                        });
                        for value in &table.records()[index].values {
                            row.col(|ui: &mut Ui| {
                                ui.label(value.to_searchable_text());
                            });
                        }
                    });
                });
        });
    });

    ui.weak(format!("{} rows", table.len()));
}
