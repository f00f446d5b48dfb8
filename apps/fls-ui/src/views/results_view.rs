use egui_plot::{Legend, Line, Plot, PlotPoints};
use fls_app::{ResultsStore, query};

#[derive(Default)]
pub struct ResultsView {
    show_samples: bool,
}

impl ResultsView {
    pub fn show(&mut self, ui: &mut egui::Ui, results: &ResultsStore) {
        ui.heading("Simulation Results");
        ui.separator();

        let Some(result) = results.current() else {
            ui.label("Run a simulation to see results");
            return;
        };

        ui.horizontal(|ui| {
            ui.label(format!("Completed at {}", result.completed_at));
            ui.separator();
            ui.checkbox(&mut self.show_samples, "Show samples");
            if ui.button("📋 Copy CSV").clicked() {
                ui.ctx().copy_text(query::series_to_csv(&result.series));
            }
        });

        if let Some(summary) = query::summarize(&result.series) {
            ui.label(format!(
                "{} points | mean {:.2} Mbps | peak {:.2} Mbps at {:.1} s",
                summary.point_count,
                summary.mean_throughput_mbps,
                summary.peak_throughput_mbps,
                summary.peak_time_s
            ));
        }

        ui.add_space(8.0);
        ui.label("Throughput Over Time");

        let plot_height = if self.show_samples {
            ui.available_height() * 0.6
        } else {
            ui.available_height()
        };
        Plot::new("throughput_plot")
            .legend(Legend::default())
            .height(plot_height)
            .x_axis_label("Time (s)")
            .y_axis_label("Throughput (Mbps)")
            .show(ui, |plot_ui| {
                let points = PlotPoints::from(query::plot_points(&result.series));
                plot_ui.line(Line::new(points).name("Throughput"));
            });

        if self.show_samples {
            egui::ScrollArea::vertical()
                .id_salt("samples_scroll")
                .show(ui, |ui| {
                    egui::Grid::new("samples_grid").striped(true).show(ui, |ui| {
                        ui.strong("Time (s)");
                        ui.strong("Throughput (Mbps)");
                        ui.end_row();
                        for point in &result.series {
                            ui.label(format!("{:.3}", point.time_s));
                            ui.label(format!("{:.3}", point.throughput_mbps));
                            ui.end_row();
                        }
                    });
                });
        }
    }
}
