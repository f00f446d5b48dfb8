use std::time::Duration;

use fls_app::RunStatus;
use fls_params::{ParameterModel, domain};

use super::config_view::apply_edit;

/// Requests raised by the control panel for the app to carry out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlAction {
    Run,
    Cancel,
}

#[derive(Default)]
pub struct ControlView {
    last_error: Option<String>,
}

impl ControlView {
    pub fn show(
        &mut self,
        ui: &mut egui::Ui,
        params: &mut ParameterModel,
        status: &RunStatus,
        elapsed: Option<Duration>,
    ) -> Option<ControlAction> {
        ui.heading("Simulation Control");
        ui.separator();

        let before = params.snapshot();
        let mut edited = before;

        egui::Grid::new("run_params_grid")
            .num_columns(2)
            .spacing([16.0, 8.0])
            .show(ui, |ui| {
                ui.label("Number of Nodes");
                ui.add(egui::Slider::new(&mut edited.node_count, domain::NODE_COUNT));
                ui.end_row();

                ui.label("Simulation Time");
                ui.add(
                    egui::Slider::new(&mut edited.simulation_time_s, domain::SIMULATION_TIME_S)
                        .suffix(" s"),
                );
                ui.end_row();
            });

        if edited != before {
            match apply_edit(params, &before, &edited) {
                Ok(()) => self.last_error = None,
                Err(e) => self.last_error = Some(e.to_string()),
            }
        }
        if let Some(err) = &self.last_error {
            ui.colored_label(egui::Color32::RED, err);
        }

        ui.add_space(12.0);

        let mut action = None;
        ui.horizontal(|ui| {
            let running = status.is_running();
            let label = if running {
                "⏳ Running Simulation..."
            } else {
                "▶ Run Simulation"
            };
            if ui.add_enabled(!running, egui::Button::new(label)).clicked() {
                action = Some(ControlAction::Run);
            }

            if running {
                ui.spinner();
                if let Some(elapsed) = elapsed {
                    ui.label(format!("{:.1}s", elapsed.as_secs_f64()));
                }
                if ui.button("⏹ Cancel").clicked() {
                    action = Some(ControlAction::Cancel);
                }
            }
        });

        ui.add_space(8.0);
        match status {
            RunStatus::Idle => {
                ui.label("Ready to run.");
            }
            RunStatus::Running => {
                ui.label("Waiting for the simulation service...");
            }
            RunStatus::Succeeded => {
                ui.colored_label(
                    egui::Color32::from_rgb(0, 160, 0),
                    "✓ Simulation completed. See the Results tab.",
                );
            }
            RunStatus::Failed(failure) => {
                let kind = if failure.is_transport() {
                    "Could not reach the simulation service"
                } else {
                    "Simulation failed"
                };
                ui.colored_label(egui::Color32::RED, format!("✗ {}: {}", kind, failure.message()));
            }
        }

        action
    }
}
