use std::time::Duration;

use crossbeam_channel::{Receiver, Sender};
use eframe::egui;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;
use crate::controller::orchestration::{clear_form, dispatch_backend_command, submit_draft};
use crate::controller::reducer::FormModel;
use crate::ui::panels::{categories_panel, input_panel, results_panel, InputActions};

pub struct EmailTriageApp {
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,
    model: FormModel,
    /// Mirror of the controller's draft that the text widget edits in place.
    draft_input: String,
    service_url: String,
}

impl EmailTriageApp {
    pub fn new(cmd_tx: Sender<BackendCommand>, ui_rx: Receiver<UiEvent>, service_url: String) -> Self {
        let mut model = FormModel::default();
        dispatch_backend_command(&cmd_tx, BackendCommand::FetchCategories, &mut model.status);
        Self {
            cmd_tx,
            ui_rx,
            model,
            draft_input: String::new(),
            service_url,
        }
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            self.model.apply(event);
        }
    }

    fn show_form(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.small(egui::RichText::new(&self.service_url).weak());
                ui.separator();
                ui.small(egui::RichText::new(&self.model.status).weak());
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.vertical_centered(|ui| {
                    ui.heading(egui::RichText::new("Email Processor").size(28.0).strong());
                    ui.label(
                        egui::RichText::new(
                            "AI-powered email classification and information extraction",
                        )
                        .weak(),
                    );
                });
                ui.add_space(12.0);

                let mut actions = InputActions::default();
                ui.columns(2, |columns| {
                    egui::Frame::group(columns[0].style()).show(&mut columns[0], |ui| {
                        actions = input_panel(ui, &self.model, &mut self.draft_input);
                    });
                    egui::Frame::group(columns[1].style()).show(&mut columns[1], |ui| {
                        results_panel(ui, self.model.controller.state());
                    });
                });

                ui.add_space(12.0);
                egui::Frame::group(ui.style()).show(ui, |ui| {
                    ui.set_width(ui.available_width());
                    categories_panel(ui, &self.model.categories);
                });

                self.handle_input_actions(actions);
            });
        });
    }

    fn handle_input_actions(&mut self, actions: InputActions) {
        if actions.edited {
            self.model.controller.edit(self.draft_input.clone());
        }
        if actions.submit {
            submit_draft(&mut self.model.controller, &self.cmd_tx, &mut self.model.status);
        }
        if actions.clear {
            clear_form(&mut self.model.controller, &self.cmd_tx, &mut self.model.status);
            self.draft_input = self.model.controller.draft_text().to_string();
            self.model.status = "Form cleared".to_string();
        }
    }
}

impl eframe::App for EmailTriageApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();
        self.show_form(ctx);

        if self.model.controller.is_processing() {
            ctx.request_repaint_after(Duration::from_millis(16));
        } else {
            ctx.request_repaint_after(Duration::from_millis(100));
        }
    }
}
