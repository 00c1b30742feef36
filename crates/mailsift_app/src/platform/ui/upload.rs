use eframe::egui::{self, RichText};
use mailsift_core::{Msg, WorkbookSource};

const EXCEL_EXTENSIONS: [&str; 2] = ["xlsx", "xls"];

/// Drop zone with a browse button. Files dropped anywhere on the window count.
pub fn draw(ui: &mut egui::Ui, intents: &mut Vec<Msg>) {
    let hovering = ui.ctx().input(|input| !input.raw.hovered_files.is_empty());
    if let Some(source) = take_dropped(ui.ctx()) {
        intents.push(Msg::FileSelected(source));
    }

    let visuals = ui.visuals();
    let (stroke, fill) = if hovering {
        (
            egui::Stroke::new(2.0, visuals.selection.stroke.color),
            visuals.selection.bg_fill.gamma_multiply(0.25),
        )
    } else {
        (
            egui::Stroke::new(1.0, visuals.widgets.noninteractive.bg_stroke.color),
            visuals.faint_bg_color,
        )
    };

    egui::Frame::new()
        .stroke(stroke)
        .fill(fill)
        .corner_radius(8.0)
        .inner_margin(32.0)
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.vertical_centered(|ui| {
                ui.label(RichText::new("Drag and drop your spreadsheet here").size(18.0));
                ui.label(RichText::new("XLSX or XLS; URLs are read from the first sheet").weak());
                ui.add_space(12.0);
                if ui.button("Browse…").clicked() {
                    if let Some(path) = rfd::FileDialog::new()
                        .set_title("Open spreadsheet")
                        .add_filter("Excel", &EXCEL_EXTENSIONS)
                        .pick_file()
                    {
                        intents.push(Msg::FileSelected(WorkbookSource::Path(path)));
                    }
                }
            });
        });
}

/// Takes the first dropped file, preferring its path over in-memory bytes.
fn take_dropped(ctx: &egui::Context) -> Option<WorkbookSource> {
    let dropped = ctx.input(|input| input.raw.dropped_files.first().cloned())?;
    if let Some(path) = dropped.path {
        return Some(WorkbookSource::Path(path));
    }
    dropped.bytes.map(|bytes| WorkbookSource::Bytes {
        name: dropped.name,
        bytes,
    })
}
