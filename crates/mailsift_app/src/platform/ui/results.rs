use eframe::egui::{self, Color32, RichText};
use egui_extras::{Column, TableBuilder};
use mailsift_core::{AppViewModel, Msg, RecordStatus, ResultRowView};

const ROW_HEIGHT: f32 = 24.0;

pub fn draw(ui: &mut egui::Ui, view: &AppViewModel, intents: &mut Vec<Msg>) {
    ui.horizontal(|ui| {
        ui.label(
            RichText::new(format!(
                "Found {} emails across {} URLs.",
                view.total_emails, view.url_count
            ))
            .strong(),
        );
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            let download = ui
                .add_enabled(view.export_enabled, egui::Button::new("Download CSV"))
                .on_disabled_hover_text("No emails to export");
            if download.clicked() {
                intents.push(Msg::ExportClicked);
            }
            if ui.button("Start New").clicked() {
                intents.push(Msg::ResetClicked);
            }
        });
    });
    ui.add_space(8.0);

    TableBuilder::new(ui)
        .striped(true)
        .vscroll(false)
        .column(Column::exact(56.0))
        .column(Column::initial(340.0).at_least(120.0).resizable(true).clip(true))
        .column(Column::remainder().at_least(160.0))
        .header(ROW_HEIGHT, |mut header| {
            header.col(|ui| {
                ui.strong("Status");
            });
            header.col(|ui| {
                ui.strong("Source URL");
            });
            header.col(|ui| {
                ui.strong("Emails Found");
            });
        })
        .body(|body| {
            body.rows(ROW_HEIGHT, view.rows.len(), |mut row| {
                let record = &view.rows[row.index()];
                row.col(|ui| status_icon(ui, record.status));
                row.col(|ui| {
                    ui.hyperlink_to(record.url.as_str(), record.url.as_str());
                });
                row.col(|ui| emails_cell(ui, record));
            });
        });
}

fn status_icon(ui: &mut egui::Ui, status: RecordStatus) {
    match status {
        RecordStatus::Pending => {
            ui.spinner();
        }
        RecordStatus::Success => {
            ui.colored_label(Color32::from_rgb(0x4a, 0xde, 0x80), "✔")
                .on_hover_text("Success");
        }
        RecordStatus::Error => {
            ui.colored_label(ui.visuals().error_fg_color, "✖")
                .on_hover_text("Error");
        }
    }
}

fn emails_cell(ui: &mut egui::Ui, record: &ResultRowView) {
    match record.emails_label() {
        Some(emails) => {
            ui.label(emails);
        }
        None => {
            ui.label(RichText::new("None").weak().italics());
        }
    }
}
