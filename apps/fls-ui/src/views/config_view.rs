use fls_params::{
    ChannelWidth, ParamResult, ParameterModel, PhyType, PropagationModel, SimulationConfig, domain,
};

#[derive(Default)]
pub struct ConfigView {
    last_error: Option<String>,
}

impl ConfigView {
    pub fn show(&mut self, ui: &mut egui::Ui, params: &mut ParameterModel) {
        ui.heading("Wireless Network Configuration");
        ui.separator();

        let before = params.snapshot();
        let mut edited = before;

        ui.label("PHY Type");
        ui.horizontal(|ui| {
            for phy in PhyType::ALL {
                let radio = egui::RadioButton::new(edited.phy_type == phy, phy.display_name());
                let response = ui.add_enabled(params.is_phy_enabled(phy), radio);
                if response.clicked() {
                    edited.phy_type = phy;
                }
                if !params.is_phy_enabled(phy) {
                    response.on_disabled_hover_text("Not supported by the simulation service yet");
                }
            }
        });

        ui.add_space(8.0);

        if edited.wifi_params_apply() {
            egui::Grid::new("wifi_params_grid")
                .num_columns(2)
                .spacing([16.0, 8.0])
                .show(ui, |ui| {
                    ui.label("Tx Power");
                    ui.add(
                        egui::Slider::new(&mut edited.tx_power_dbm, domain::TX_POWER_DBM)
                            .suffix(" dBm"),
                    );
                    ui.end_row();

                    ui.label("Frequency");
                    ui.add(
                        egui::Slider::new(&mut edited.frequency_ghz, domain::FREQUENCY_GHZ)
                            .step_by(1.0 / domain::FREQUENCY_STEPS_PER_GHZ)
                            .fixed_decimals(1)
                            .suffix(" GHz"),
                    );
                    ui.end_row();

                    ui.label("Channel Width");
                    let mut mhz = edited.channel_width.mhz();
                    ui.add(
                        egui::Slider::new(&mut mhz, channel_width_range())
                            .step_by(20.0)
                            .suffix(" MHz"),
                    );
                    if let Some(width) = ChannelWidth::from_mhz(mhz) {
                        edited.channel_width = width;
                    }
                    ui.end_row();

                    ui.label("Propagation Model");
                    egui::ComboBox::from_id_salt("propagation_model")
                        .selected_text(edited.propagation_model.ns3_class_name())
                        .show_ui(ui, |ui| {
                            for model in PropagationModel::ALL {
                                ui.selectable_value(
                                    &mut edited.propagation_model,
                                    model,
                                    model.ns3_class_name(),
                                );
                            }
                        });
                    ui.end_row();
                });
        } else {
            ui.label(format!(
                "{} uses the service's own radio settings. Wi-Fi values are kept for later.",
                edited.phy_type.display_name()
            ));
        }

        if edited != before {
            match apply_edit(params, &before, &edited) {
                Ok(()) => self.last_error = None,
                Err(e) => self.last_error = Some(e.to_string()),
            }
        }

        if let Some(err) = &self.last_error {
            ui.add_space(8.0);
            ui.colored_label(egui::Color32::RED, err);
        }
    }
}

fn channel_width_range() -> std::ops::RangeInclusive<u32> {
    let (min, max) = (ChannelWidth::ALL[0], ChannelWidth::ALL[ChannelWidth::ALL.len() - 1]);
    min.mhz()..=max.mhz()
}

/// Route widget edits through the model's setters so the domain checks
/// apply to the UI exactly as they do to files and flags.
pub(crate) fn apply_edit(
    params: &mut ParameterModel,
    before: &SimulationConfig,
    after: &SimulationConfig,
) -> ParamResult<()> {
    if after.phy_type != before.phy_type {
        params.set_phy_type(after.phy_type)?;
    }
    if after.node_count != before.node_count {
        params.set_node_count(after.node_count)?;
    }
    if after.simulation_time_s != before.simulation_time_s {
        params.set_simulation_time(after.simulation_time_s)?;
    }
    if after.tx_power_dbm != before.tx_power_dbm {
        params.set_tx_power(after.tx_power_dbm)?;
    }
    if after.frequency_ghz != before.frequency_ghz {
        params.set_frequency(after.frequency_ghz)?;
    }
    if after.channel_width != before.channel_width {
        params.set_channel_width(after.channel_width.mhz())?;
    }
    if after.propagation_model != before.propagation_model {
        params.set_propagation_model(after.propagation_model);
    }
    Ok(())
}
