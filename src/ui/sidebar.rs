//! Sidebar: workout entry form and the workout list.

use egui::{Key, RichText, ScrollArea, TextEdit, Ui};

use crate::storage::kv::KeyValueStore;
use crate::tracker::{MapStatus, Tracker};
use crate::ui::theme::Theme;
use crate::ui::widgets::WorkoutCard;
use crate::workouts::ActivityType;

/// Render the sidebar.
pub fn show<S: KeyValueStore>(ui: &mut Ui, tracker: &mut Tracker<S>, theme: Theme) {
    if tracker.form().is_visible() {
        render_form(ui, tracker);
        ui.add_space(12.0);
    } else if tracker.workouts().is_empty() {
        render_hint(ui, tracker.map_status(), theme);
    }

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui| {
            render_list(ui, tracker, theme);
        });
}

fn render_hint(ui: &mut Ui, status: MapStatus, theme: Theme) {
    let hint = match status {
        MapStatus::Locating => "Finding your position…",
        MapStatus::Ready { .. } => "Click on the map to log a workout",
        MapStatus::Unavailable => "The map is unavailable, saved workouts are listed below",
    };

    ui.vertical_centered(|ui| {
        ui.add_space(24.0);
        ui.label(RichText::new(hint).color(theme.text_secondary()));
    });
}

/// Render the workout entry form.
fn render_form<S: KeyValueStore>(ui: &mut Ui, tracker: &mut Tracker<S>) {
    let mut submit = false;
    let mut cancel = false;
    let keys_active = tracker.form_keys_active();

    ui.group(|ui| {
        ui.set_min_width(ui.available_width() - 8.0);

        let form = tracker.form_mut();
        let focus_distance = form.take_focus_request();

        egui::Grid::new("workout_form")
            .num_columns(2)
            .spacing([12.0, 8.0])
            .show(ui, |ui| {
                ui.label("Type");
                let mut activity = form.activity;
                egui::ComboBox::from_id_salt("activity_type")
                    .selected_text(activity.label())
                    .show_ui(ui, |ui| {
                        for option in [ActivityType::Running, ActivityType::Cycling] {
                            ui.selectable_value(&mut activity, option, option.label());
                        }
                    });
                form.set_activity(activity);
                ui.end_row();

                ui.label("Distance");
                let distance = ui.add(TextEdit::singleline(&mut form.distance).hint_text("km"));
                if focus_distance {
                    distance.request_focus();
                }
                ui.end_row();

                ui.label("Duration");
                ui.add(TextEdit::singleline(&mut form.duration).hint_text("min"));
                ui.end_row();

                match form.activity {
                    ActivityType::Running => {
                        ui.label("Cadence");
                        ui.add(TextEdit::singleline(&mut form.cadence).hint_text("step/min"));
                    }
                    ActivityType::Cycling => {
                        ui.label("Elev Gain");
                        ui.add(TextEdit::singleline(&mut form.elevation_gain).hint_text("meters"));
                    }
                }
                ui.end_row();
            });

        ui.add_space(8.0);
        ui.horizontal(|ui| {
            if ui.button("OK").clicked() {
                submit = true;
            }
            if ui.button("Cancel").clicked() {
                cancel = true;
            }
        });

        if keys_active {
            if ui.input(|i| i.key_pressed(Key::Enter)) {
                submit = true;
            }
            if ui.input(|i| i.key_pressed(Key::Escape)) {
                cancel = true;
            }
        }
    });

    if cancel {
        tracker.cancel_form();
    } else if submit {
        // Errors are reported through the tracker alert
        let _ = tracker.submit_form();
    }
}

/// Render the workout list, newest first.
fn render_list<S: KeyValueStore>(ui: &mut Ui, tracker: &mut Tracker<S>, theme: Theme) {
    let mut clicked = None;

    for workout in tracker.workouts().iter().rev() {
        let selected = tracker.selected() == Some(workout.id());
        let response = WorkoutCard::new(workout, theme).selected(selected).show(ui);
        if response.clicked() {
            clicked = Some(workout.id().to_string());
        }
        ui.add_space(6.0);
    }

    if let Some(id) = clicked {
        tracker.select_workout(&id);
    }
}
