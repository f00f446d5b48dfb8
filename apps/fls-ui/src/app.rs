use std::path::Path;
use std::time::Duration;

use fls_app::{AppResult, ClientSettings, HttpSimulationService, RunStatus, Session};

use crate::views::{ConfigView, ControlAction, ControlView, ResultsView};

/// Settings file picked up from the working directory when present.
const SETTINGS_FILE: &str = "fls.yaml";

pub fn connect_session() -> AppResult<(Session<HttpSimulationService>, String)> {
    let path = Path::new(SETTINGS_FILE);
    let settings = if path.exists() {
        ClientSettings::load(path)?
    } else {
        ClientSettings::default()
    };
    let session = Session::connect(&settings)?;
    Ok((session, settings.endpoint))
}

pub struct FlsApp {
    session: Session<HttpSimulationService>,
    endpoint: String,
    active_tab: Tab,
    config_view: ConfigView,
    control_view: ControlView,
    results_view: ResultsView,
    last_message: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Tab {
    Configuration,
    Control,
    Results,
}

impl FlsApp {
    pub fn new(
        _cc: &eframe::CreationContext<'_>,
        session: Session<HttpSimulationService>,
        endpoint: String,
    ) -> Self {
        Self {
            session,
            endpoint,
            active_tab: Tab::Configuration,
            config_view: ConfigView::default(),
            control_view: ControlView::default(),
            results_view: ResultsView::default(),
            last_message: None,
        }
    }

    fn handle_action(&mut self, action: ControlAction) {
        match action {
            ControlAction::Run => match self.session.run() {
                Ok(ticket) => {
                    tracing::debug!(%ticket, "run submitted from UI");
                    self.last_message = None;
                }
                Err(e) => self.last_message = Some(e.to_string()),
            },
            ControlAction::Cancel => {
                if self.session.controller_mut().cancel() {
                    self.last_message = Some("Run cancelled".to_string());
                }
            }
        }
    }
}

impl eframe::App for FlsApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let status = self.session.poll().clone();
        if status.is_running() {
            ctx.request_repaint_after(Duration::from_millis(100));
        }

        egui::TopBottomPanel::top("tabs").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.selectable_value(&mut self.active_tab, Tab::Configuration, "Configuration");
                ui.selectable_value(&mut self.active_tab, Tab::Control, "Simulation Control");
                ui.selectable_value(&mut self.active_tab, Tab::Results, "Results");
                ui.separator();
                ui.label(format!("Service: {}", self.endpoint));
            });
        });

        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(format!("Status: {}", status.label()));
                if let RunStatus::Failed(failure) = &status {
                    ui.separator();
                    ui.colored_label(egui::Color32::RED, failure.to_string());
                }
                if let Some(message) = &self.last_message {
                    ui.separator();
                    ui.label(message);
                }
            });
        });

        let mut action = None;
        egui::CentralPanel::default().show(ctx, |ui| match self.active_tab {
            Tab::Configuration => {
                self.config_view.show(ui, self.session.params_mut());
            }
            Tab::Control => {
                let elapsed = self.session.controller().elapsed();
                action = self
                    .control_view
                    .show(ui, self.session.params_mut(), &status, elapsed);
            }
            Tab::Results => {
                self.results_view.show(ui, self.session.results());
            }
        });

        if let Some(action) = action {
            self.handle_action(action);
        }
    }
}
