//! Workout list entry widget.

use egui::{Align, Color32, CornerRadius, Frame, Layout, Response, RichText, Sense, Stroke, Ui, Vec2};

use crate::ui::theme::{activity_colors, Theme};
use crate::workouts::{workout_rows, Workout};

/// A clickable card showing one workout: description title and a row of
/// icon/value/unit stats.
pub struct WorkoutCard<'a> {
    workout: &'a Workout,
    theme: Theme,
    selected: bool,
}

impl<'a> WorkoutCard<'a> {
    pub fn new(workout: &'a Workout, theme: Theme) -> Self {
        Self {
            workout,
            theme,
            selected: false,
        }
    }

    /// Highlight the card as the current selection.
    pub fn selected(mut self, selected: bool) -> Self {
        self.selected = selected;
        self
    }

    /// Render the card. The returned response reports clicks on the whole card.
    pub fn show(self, ui: &mut Ui) -> Response {
        let accent = activity_colors::for_activity(self.workout.activity_type());
        let stroke_width = if self.selected { 2.0 } else { 0.0 };

        let inner = Frame::new()
            .fill(self.theme.card_bg())
            .corner_radius(CornerRadius::same(5))
            .stroke(Stroke::new(stroke_width, accent))
            .inner_margin(egui::Margin::symmetric(12, 10))
            .show(ui, |ui| {
                ui.set_min_width(ui.available_width());

                ui.horizontal(|ui| {
                    // Activity accent bar
                    let (bar, _) = ui.allocate_exact_size(Vec2::new(4.0, 44.0), Sense::hover());
                    ui.painter().rect_filled(bar, 2.0, accent);

                    ui.vertical(|ui| {
                        ui.label(RichText::new(self.workout.description()).size(15.0).strong());
                        ui.add_space(4.0);

                        ui.horizontal_wrapped(|ui| {
                            for row in workout_rows(self.workout) {
                                ui.label(RichText::new(row.icon).size(14.0));
                                ui.label(RichText::new(row.value).size(14.0).strong());
                                ui.label(
                                    RichText::new(row.unit)
                                        .size(11.0)
                                        .color(self.theme.text_secondary()),
                                );
                                ui.add_space(8.0);
                            }
                        });
                    });

                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        ui.label(RichText::new("→").color(Color32::GRAY));
                    });
                });
            });

        inner.response.interact(Sense::click())
    }
}
