//! egui views. Each function draws from the view model and pushes the user's
//! intents as `Msg`s; none of them touch `AppState` directly.

mod results;
mod upload;

use eframe::egui::{self, Color32, RichText};
use mailsift_core::{AppViewModel, Msg};

pub fn draw(ui: &mut egui::Ui, view: &AppViewModel, intents: &mut Vec<Msg>) {
    header(ui);
    ui.add_space(12.0);

    if let Some(error) = &view.error {
        error_banner(ui, error);
        ui.add_space(8.0);
    }
    if let Some(notice) = &view.notice {
        ui.label(RichText::new(notice).weak());
        ui.add_space(8.0);
    }

    if view.is_processing() {
        progress(ui, view.progress_message.as_deref());
    } else if view.has_results() {
        results::draw(ui, view, intents);
    } else {
        upload::draw(ui, intents);
    }
}

fn header(ui: &mut egui::Ui) {
    ui.vertical_centered(|ui| {
        ui.heading(RichText::new("AI Email Scraper").size(28.0).strong());
        ui.label(
            "Upload an Excel file with website URLs, and Gemini will extract the email addresses for you.",
        );
    });
}

fn error_banner(ui: &mut egui::Ui, message: &str) {
    let fill = Color32::from_rgb(0x45, 0x1a, 0x1a);
    egui::Frame::new()
        .fill(fill)
        .stroke(egui::Stroke::new(1.0, ui.visuals().error_fg_color))
        .corner_radius(6.0)
        .inner_margin(10.0)
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.colored_label(ui.visuals().error_fg_color, RichText::new("Error").strong());
            ui.label(message);
        });
}

fn progress(ui: &mut egui::Ui, message: Option<&str>) {
    ui.add_space(32.0);
    ui.vertical_centered(|ui| {
        ui.add(egui::Spinner::new().size(36.0));
        ui.add_space(8.0);
        if let Some(message) = message {
            ui.label(RichText::new(message).strong());
        }
        ui.label(RichText::new("This may take a while for large files.").weak());
    });
}
