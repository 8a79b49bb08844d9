//! The three cards of the form: input, results, category catalogue.

use client_core::SubmissionState;
use eframe::egui;
use shared::domain::CategoryInfo;

use crate::controller::reducer::FormModel;
use crate::ui::widgets::{category_badge, error_box, field_row, section_heading};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct InputActions {
    pub edited: bool,
    pub submit: bool,
    pub clear: bool,
}

pub fn input_panel(ui: &mut egui::Ui, model: &FormModel, draft_input: &mut String) -> InputActions {
    let mut actions = InputActions::default();
    let controller = &model.controller;

    section_heading(
        ui,
        "Email Content",
        "Paste your email content below to extract sender information and classify it",
    );

    let response = ui.add(
        egui::TextEdit::multiline(draft_input)
            .hint_text("Paste your email content here...")
            .desired_rows(12)
            .desired_width(f32::INFINITY),
    );
    actions.edited = response.changed();

    ui.add_space(6.0);
    ui.horizontal(|ui| {
        let processing = controller.is_processing();
        let submit_enabled =
            !processing && model.backend_error.is_none() && client_core::can_submit(draft_input);
        let submit_label = if processing {
            "Processing..."
        } else {
            "Process Email"
        };
        if ui
            .add_enabled(submit_enabled, egui::Button::new(submit_label))
            .clicked()
        {
            actions.submit = true;
        }
        if processing {
            ui.spinner();
        }
        if ui.button("Clear").clicked() {
            actions.clear = true;
        }
    });

    if let Some(notice) = controller.validation_notice() {
        ui.add_space(6.0);
        error_box(ui, notice);
    }
    if let Some(message) = controller.state().error_message() {
        ui.add_space(6.0);
        error_box(ui, message);
    }
    if let Some(message) = &model.backend_error {
        ui.add_space(6.0);
        error_box(ui, message);
    }

    actions
}

pub fn results_panel(ui: &mut egui::Ui, state: &SubmissionState) {
    section_heading(
        ui,
        "Processing Results",
        "Extracted information and classification results",
    );

    match state {
        SubmissionState::Succeeded { result, .. } => {
            egui::Frame::group(ui.style()).show(ui, |ui| {
                ui.set_width(ui.available_width());
                ui.label(egui::RichText::new("Sender Information").strong());
                field_row(ui, "Name", result.sender_display_name().unwrap_or("Not found"));
                field_row(ui, "Greeting", &result.greeting);
            });
            egui::Frame::group(ui.style()).show(ui, |ui| {
                ui.set_width(ui.available_width());
                ui.label(egui::RichText::new("Classification").strong());
                category_badge(ui, &result.classification);
                field_row(ui, "Suggested Label", &result.suggested_label);
            });
            egui::Frame::group(ui.style()).show(ui, |ui| {
                ui.set_width(ui.available_width());
                ui.label(egui::RichText::new("Email Snippet").strong());
                ui.label(egui::RichText::new(format!("\"{}\"", result.email_snippet)).italics());
            });
        }
        SubmissionState::Processing { .. } => {
            ui.vertical_centered(|ui| {
                ui.add_space(24.0);
                ui.spinner();
                ui.label(egui::RichText::new("Analyzing email...").weak());
            });
        }
        SubmissionState::Idle { .. } | SubmissionState::Failed { .. } => {
            ui.vertical_centered(|ui| {
                ui.add_space(24.0);
                ui.label(
                    egui::RichText::new("No results yet. Process an email to see the analysis.")
                        .weak(),
                );
            });
        }
    }
}

pub fn categories_panel(ui: &mut egui::Ui, categories: &[CategoryInfo]) {
    section_heading(
        ui,
        "Available Categories",
        "The system classifies emails into the following categories",
    );
    egui::Grid::new("categories_grid")
        .num_columns(2)
        .spacing([12.0, 8.0])
        .show(ui, |ui| {
            for category in categories {
                category_badge(ui, &category.label);
                ui.label(egui::RichText::new(&category.description).weak());
                ui.end_row();
            }
        });
}
