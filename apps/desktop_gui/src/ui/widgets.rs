use client_core::style_for;
use eframe::egui;

use crate::ui::theme::{badge_colors, ERROR_FILL, ERROR_STROKE, ERROR_TEXT};

/// Label rendered with the colors of the category it maps to.
pub fn category_badge(ui: &mut egui::Ui, classification: &str) {
    let colors = badge_colors(style_for(classification));
    egui::Frame::group(ui.style())
        .fill(colors.fill)
        .stroke(egui::Stroke::new(1.0, colors.stroke))
        .show(ui, |ui| {
            ui.label(egui::RichText::new(classification).color(colors.text).strong());
        });
}

pub fn error_box(ui: &mut egui::Ui, message: &str) {
    egui::Frame::group(ui.style())
        .fill(ERROR_FILL)
        .stroke(egui::Stroke::new(1.0, ERROR_STROKE))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.label(egui::RichText::new(message).color(ERROR_TEXT).small());
        });
}

pub fn field_row(ui: &mut egui::Ui, label: &str, value: &str) {
    ui.horizontal_wrapped(|ui| {
        ui.label(egui::RichText::new(format!("{label}:")).strong());
        ui.label(value);
    });
}

pub fn section_heading(ui: &mut egui::Ui, title: &str, hint: &str) {
    ui.label(egui::RichText::new(title).strong().size(18.0));
    ui.label(egui::RichText::new(hint).weak());
    ui.add_space(6.0);
}
