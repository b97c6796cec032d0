use egui::{Align2, Color32, RichText, Stroke};
use egui_plot::{
    HLine, Line, LineStyle, MarkerShape, Plot, PlotPoint, PlotPoints, Points, Polygon, Text, VLine,
};

use crate::physics::constants::AU;
use crate::physics::orbit::{self, RotationCurve};

/// Outer edge of the plotted curve, in astronomical units.
pub const MAX_RADIUS_AU: f64 = 100.0;
/// Points sampled along the curve between the horizon and the outer edge.
pub const CURVE_SAMPLES: usize = 1000;

pub struct UiState {
    pub show_ui: bool,
    pub screenshot_requested: bool,
    /// Distance of the observer from the black hole, in AU.
    pub radius_au: f64,
    /// log10 of the black hole mass in solar masses.
    pub log_mass: f64,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            show_ui: true,
            screenshot_requested: false,
            radius_au: MAX_RADIUS_AU,
            log_mass: 7.0,
        }
    }
}

pub fn draw_ui(ctx: &egui::Context, ui_state: &mut UiState) {
    if ui_state.show_ui {
        egui::Window::new("Black Hole Parameters")
            .default_pos([10.0, 10.0])
            .show(ctx, |ui| {
                ui.heading("Orbit");
                ui.add(
                    egui::Slider::new(&mut ui_state.radius_au, 0.0..=MAX_RADIUS_AU)
                        .text("Distance from BH (AU)"),
                );
                ui.add(
                    egui::Slider::new(&mut ui_state.log_mass, 6.0..=9.0)
                        .text("BH mass (log solar masses)"),
                );
                ui.label(format!(
                    "Mass: {:.2} million solar masses",
                    10f64.powf(ui_state.log_mass) / 1.0e6
                ));
            });
    }

    let curve = orbit::compute_rotation_curve(
        ui_state.radius_au,
        ui_state.log_mass,
        MAX_RADIUS_AU,
        CURVE_SAMPLES,
        AU,
    );

    egui::CentralPanel::default().show(ctx, |ui| match &curve {
        Ok(curve) => draw_curve(ui, curve),
        Err(err) => {
            // Unreachable through the sliders, but the core still guards.
            log::warn!("rotation curve rejected: {err}");
            ui.colored_label(Color32::RED, format!("Cannot plot: {err}"));
        }
    });
}

fn draw_curve(ui: &mut egui::Ui, curve: &RotationCurve) {
    let rs = curve.schwarzschild_radius;
    let v_max = curve.samples[0].velocity;

    if curve.fell_in {
        ui.label(
            RichText::new("You have fallen into the black hole!")
                .color(Color32::RED)
                .strong(),
        );
    } else {
        ui.label(
            RichText::new(format!(
                "You are at {:.2} AU from the black hole, orbiting at {:.2} km/s",
                curve.marker_radius, curve.marker_velocity
            ))
            .strong(),
        );
    }

    Plot::new("rotation_curve")
        .x_axis_label("Distance from BH (AU)")
        .y_axis_label("Orbital velocity (km/s)")
        .include_x(0.0)
        .include_x(MAX_RADIUS_AU)
        .include_y(0.0)
        .include_y(1.2 * v_max)
        .show(ui, |plot_ui| {
            // Shaded event-horizon region from the origin out to rs.
            plot_ui.polygon(
                Polygon::new(PlotPoints::from(vec![
                    [0.0, 0.0],
                    [rs, 0.0],
                    [rs, 1.2 * v_max],
                    [0.0, 1.2 * v_max],
                ]))
                .fill_color(Color32::from_rgba_unmultiplied(200, 0, 200, 96))
                .stroke(Stroke::NONE),
            );
            plot_ui.vline(VLine::new(rs).color(Color32::from_rgb(200, 0, 200)));
            plot_ui.text(
                Text::new(
                    PlotPoint::new(1.1 * rs, 0.9 * v_max),
                    RichText::new("Schwarzschild Radius").strong(),
                )
                .color(Color32::from_rgb(200, 0, 200))
                .anchor(Align2::LEFT_TOP),
            );

            // The Keplerian rotation curve itself.
            plot_ui.line(
                Line::new(PlotPoints::from_iter(
                    curve.samples.iter().map(|s| [s.radius, s.velocity]),
                ))
                .color(Color32::GRAY)
                .width(1.5),
            );

            // Cross-hairs and star marker at the queried position. The
            // marker keeps the raw radius even inside the horizon.
            plot_ui.vline(
                VLine::new(curve.marker_radius)
                    .color(Color32::RED)
                    .style(LineStyle::dashed_loose()),
            );
            plot_ui.hline(
                HLine::new(curve.marker_velocity)
                    .color(Color32::RED)
                    .style(LineStyle::dashed_loose()),
            );
            plot_ui.points(
                Points::new(vec![[curve.marker_radius, curve.marker_velocity]])
                    .shape(MarkerShape::Asterisk)
                    .radius(8.0)
                    .color(Color32::RED),
            );
        });
}
