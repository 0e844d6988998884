use std::time::Duration;

use client_core::{CompanyCard, CompanyViewState, ViewPhase};
use crossbeam_channel::{Receiver, Sender};
use eframe::egui;
use shared::domain::{CompanyId, ContextId, UserRole};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;
use crate::controller::reducer::{apply_ui_event, request_context};
use crate::ui::widgets::{company_card, detail_window, error_banner};

#[derive(Debug, Clone)]
pub struct StartupConfig {
    pub backend_url: String,
    pub organization_id: ContextId,
    /// Accepted from the shell and shown, but nothing is gated on it.
    pub user_role: Option<UserRole>,
}

pub struct CateringDirectoryApp {
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,
    view: CompanyViewState,
    status: String,
    backend_url: String,
    user_role: Option<UserRole>,
    context_input: String,
}

impl CateringDirectoryApp {
    pub fn new(
        cmd_tx: Sender<BackendCommand>,
        ui_rx: Receiver<UiEvent>,
        startup: StartupConfig,
    ) -> Self {
        let mut app = Self {
            cmd_tx,
            ui_rx,
            view: CompanyViewState::new(),
            status: String::new(),
            backend_url: startup.backend_url,
            user_role: startup.user_role,
            context_input: startup.organization_id.to_string(),
        };
        app.switch_context(startup.organization_id);
        app
    }

    pub fn user_role(&self) -> Option<&UserRole> {
        self.user_role.as_ref()
    }

    fn switch_context(&mut self, context: ContextId) {
        request_context(&mut self.view, &context, &self.cmd_tx, &mut self.status);
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            apply_ui_event(&mut self.view, &mut self.status, event);
        }
    }

    fn show_context_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("context_bar").show(ctx, |ui| {
            ui.add_space(4.0);
            ui.horizontal(|ui| {
                ui.label(egui::RichText::new("Organization").strong());
                let response = ui.add(
                    egui::TextEdit::singleline(&mut self.context_input)
                        .desired_width(180.0)
                        .hint_text("organization id"),
                );
                let submitted =
                    response.lost_focus() && ui.input(|input| input.key_pressed(egui::Key::Enter));
                if ui.button("Open").clicked() || submitted {
                    let context = ContextId::new(self.context_input.trim());
                    if context.as_str().is_empty() {
                        self.status = "Enter an organization id".to_string();
                    } else {
                        self.switch_context(context);
                    }
                }

                ui.separator();
                ui.label(egui::RichText::new(&self.backend_url).weak().small());
                if let Some(role) = self.user_role() {
                    ui.separator();
                    ui.label(egui::RichText::new(format!("role: {role}")).weak().small());
                }
            });
            ui.add_space(4.0);
        });
    }

    fn show_status_bar(&self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.small(egui::RichText::new(&self.status).weak());
        });
    }

    fn show_directory(&mut self, ctx: &egui::Context) {
        let mut open_request: Option<CompanyId> = None;

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("Catering companies");
            ui.add_space(6.0);

            let phase = self.view.phase();
            if phase == ViewPhase::Loading {
                ui.horizontal(|ui| {
                    ui.spinner();
                    ui.label(phase.message().unwrap_or_default());
                });
                return;
            }

            if let Some(message) = self.view.error() {
                error_banner(ui, message);
                ui.add_space(6.0);
            }

            ui.add(
                egui::TextEdit::singleline(self.view.search_mut())
                    .desired_width(f32::INFINITY)
                    .hint_text("Search by company name"),
            );
            ui.add_space(6.0);

            match phase {
                ViewPhase::EmptyNoData | ViewPhase::EmptyNoMatch => {
                    ui.vertical_centered(|ui| {
                        ui.add_space(24.0);
                        ui.label(phase.message().unwrap_or_default());
                    });
                }
                _ => {
                    let cards: Vec<CompanyCard> = self
                        .view
                        .visible_companies()
                        .into_iter()
                        .map(CompanyCard::from_company)
                        .collect();
                    egui::ScrollArea::vertical()
                        .auto_shrink([false, false])
                        .show(ui, |ui| {
                            for card in &cards {
                                if company_card(ui, card) {
                                    open_request = Some(card.id.clone());
                                }
                                ui.add_space(6.0);
                            }
                        });
                }
            }
        });

        if let Some(id) = open_request {
            self.view.open_details(&id);
        }
    }

    fn show_detail_dialog(&mut self, ctx: &egui::Context) {
        let Some(card) = self.view.dialog_company().map(CompanyCard::from_company) else {
            return;
        };
        if !detail_window(ctx, &card) {
            self.view.close_details();
        }
    }
}

impl eframe::App for CateringDirectoryApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();

        self.show_context_bar(ctx);
        self.show_status_bar(ctx);
        self.show_directory(ctx);
        self.show_detail_dialog(ctx);

        if self.view.is_loading() {
            ctx.request_repaint_after(Duration::from_millis(50));
        } else {
            ctx.request_repaint_after(Duration::from_millis(250));
        }
    }
}
