//! Main application state and egui integration.
//!
//! The position request runs in the background and is polled each frame
//! through a crossbeam channel; the map is created once it resolves.

use eframe::egui;

use crossbeam::channel::{Receiver, TryRecvError};
use mapty::location::{request_configured_position, GeolocationError, PositionResult};
use mapty::storage::config::{self, AppConfig};
use mapty::storage::kv::{FileStore, KeyValueStore, MemoryStore};
use mapty::storage::workout_store::WorkoutStore;
use mapty::tracker::{MapStatus, Tracker};
use mapty::ui::sidebar;
use mapty::ui::theme::Theme;
use mapty::ui::MapView;
use std::time::Duration;

/// Poll interval while waiting for the position.
const LOCATING_REPAINT: Duration = Duration::from_millis(200);

/// Main application state.
pub struct MaptyApp {
    tracker: Tracker<Box<dyn KeyValueStore>>,
    config: AppConfig,
    theme: Theme,
    /// Created once the position is known
    map_view: Option<MapView>,
    position_rx: Option<Receiver<PositionResult>>,
}

impl MaptyApp {
    /// Create a new application instance.
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let config = match config::load_config() {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("Failed to load config, using defaults: {}", e);
                AppConfig {
                    data_dir: config::get_data_dir(),
                    ..Default::default()
                }
            }
        };

        let theme = Theme::from(config.ui.theme);
        cc.egui_ctx.set_visuals(theme.visuals());
        cc.egui_ctx.set_zoom_factor(config.ui.clamped_font_scale());

        let mut storage_alert = None;
        let storage: Box<dyn KeyValueStore> = match FileStore::open(&config.data_dir) {
            Ok(store) => {
                tracing::info!("Storing workouts in {}", store.dir().display());
                Box::new(store)
            }
            Err(e) => {
                tracing::error!("Failed to open data directory, workouts will not be kept: {}", e);
                storage_alert = Some(format!("Workouts will not be saved: {}", e));
                Box::new(MemoryStore::new())
            }
        };

        let store = WorkoutStore::open(storage, config.storage.slot_key.clone());
        let mut tracker = Tracker::new(store, config.map.zoom);
        if let Some(alert) = storage_alert {
            tracker.raise_alert(alert);
        }

        let position_rx = Some(request_configured_position(&config.geolocation));

        Self {
            tracker,
            config,
            theme,
            map_view: None,
            position_rx,
        }
    }

    /// Deliver the position result once it arrives.
    fn poll_position(&mut self, ctx: &egui::Context) {
        let Some(rx) = &self.position_rx else {
            return;
        };

        let result = match rx.try_recv() {
            Ok(result) => result,
            Err(TryRecvError::Empty) => {
                ctx.request_repaint_after(LOCATING_REPAINT);
                return;
            }
            Err(TryRecvError::Disconnected) => Err(GeolocationError::RequestFailed(
                "position request ended without a result".to_string(),
            )),
        };

        self.position_rx = None;
        self.tracker.handle_position(result);

        if let MapStatus::Ready { home } = self.tracker.map_status() {
            self.map_view = Some(MapView::new(ctx, home, self.tracker.zoom()));
        }
    }

    /// Toggle the theme between dark and light and remember the choice.
    fn toggle_theme(&mut self, ctx: &egui::Context) {
        self.theme = self.theme.toggled();
        ctx.set_visuals(self.theme.visuals());

        self.config.ui.theme = self.theme.into();
        if let Err(e) = config::save_config(&self.config) {
            tracing::warn!("Failed to save config: {}", e);
        }
    }

    /// Clear saved workouts and start over as on a fresh launch.
    fn reset(&mut self) {
        self.tracker.reset();
        self.map_view = None;
        self.position_rx = Some(request_configured_position(&self.config.geolocation));
    }

    fn render_map(&mut self, ui: &mut egui::Ui) {
        match (&mut self.map_view, self.tracker.map_status()) {
            (Some(map_view), MapStatus::Ready { .. }) => {
                if let Some(coords) = self.tracker.take_view_request() {
                    map_view.set_view(coords, self.tracker.zoom());
                }

                let pending = self.tracker.form().position();
                if let Some(coords) = map_view.show(ui, self.tracker.workouts(), pending) {
                    self.tracker.handle_map_click(coords);
                }
            }
            (_, MapStatus::Unavailable) => {
                ui.centered_and_justified(|ui| {
                    ui.label(
                        egui::RichText::new("Map unavailable: your position could not be determined")
                            .color(self.theme.text_secondary()),
                    );
                });
            }
            _ => {
                ui.centered_and_justified(|ui| {
                    ui.spinner();
                });
            }
        }
    }

    /// Render the alert dialog.
    fn render_alert(&mut self, ctx: &egui::Context) {
        let Some(message) = self.tracker.alert().map(str::to_string) else {
            return;
        };

        egui::Window::new("Mapty")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.set_min_width(280.0);
                ui.vertical_centered(|ui| {
                    ui.add_space(8.0);
                    ui.label(
                        egui::RichText::new("⚠")
                            .size(24.0)
                            .color(egui::Color32::from_rgb(234, 67, 53)),
                    );
                    ui.label(&message);
                    ui.add_space(12.0);
                    if ui.button("OK").clicked() {
                        self.tracker.dismiss_alert();
                    }
                });
            });
    }
}

impl eframe::App for MaptyApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_position(ctx);

        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading("Mapty");

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let theme_icon = match self.theme {
                        Theme::Dark => "🌙",
                        Theme::Light => "☀",
                    };
                    if ui.button(theme_icon).clicked() {
                        self.toggle_theme(ctx);
                    }

                    if ui
                        .button("Reset")
                        .on_hover_text("Delete all saved workouts")
                        .clicked()
                    {
                        self.reset();
                    }

                    ui.label(format!("{} workouts", self.tracker.workouts().len()));
                });
            });
        });

        egui::SidePanel::left("sidebar")
            .resizable(true)
            .default_width(380.0)
            .min_width(300.0)
            .show(ctx, |ui| {
                sidebar::show(ui, &mut self.tracker, self.theme);
            });

        egui::CentralPanel::default()
            .frame(egui::Frame::new())
            .show(ctx, |ui| {
                self.render_map(ui);
            });

        // Alerts are shown on top of everything
        self.render_alert(ctx);
    }
}
