//! Map panel using walkers (OpenStreetMap slippy tiles).
//!
//! Workout markers and their popups are drawn by a plugin, which also turns
//! clicks on the map into coordinates.

use egui::{Color32, FontId, Pos2, Rect, Stroke, Ui, Vec2};
use walkers::sources::OpenStreetMap;
use walkers::{lon_lat, HttpTiles, Map, MapMemory, Plugin, Position, Projector};

use crate::ui::theme::activity_colors;
use crate::workouts::{popup_text, Coordinates, Workout};

/// Marker radius in points.
const MARKER_RADIUS: f32 = 7.0;

/// Persistent map state (survives between frames).
pub struct MapView {
    tiles: HttpTiles,
    memory: MapMemory,
    home: Position,
}

impl MapView {
    /// Create a map centred at `home` with the given zoom.
    pub fn new(ctx: &egui::Context, home: Coordinates, zoom: f64) -> Self {
        let mut view = Self {
            tiles: HttpTiles::new(OpenStreetMap, ctx.clone()),
            memory: MapMemory::default(),
            home: to_position(home),
        };
        view.set_view(home, zoom);
        view
    }

    /// Centre the map on a position at the given zoom.
    pub fn set_view(&mut self, center: Coordinates, zoom: f64) {
        self.memory.center_at(to_position(center));
        if self.memory.set_zoom(zoom).is_err() {
            tracing::warn!("Map zoom {} out of range, keeping current zoom", zoom);
        }
    }

    /// Render the map with one marker per workout.
    ///
    /// Returns the coordinates of a click on the map, if any.
    pub fn show(
        &mut self,
        ui: &mut Ui,
        workouts: &[Workout],
        pending: Option<Coordinates>,
    ) -> Option<Coordinates> {
        let mut clicked = None;

        let markers = WorkoutMarkers {
            workouts,
            pending,
            clicked: &mut clicked,
        };

        let map = Map::new(Some(&mut self.tiles), &mut self.memory, self.home).with_plugin(markers);
        ui.add(map);

        clicked
    }
}

/// Plugin drawing workout markers with always-open popups.
struct WorkoutMarkers<'a> {
    workouts: &'a [Workout],
    pending: Option<Coordinates>,
    clicked: &'a mut Option<Coordinates>,
}

impl Plugin for WorkoutMarkers<'_> {
    fn run(
        self: Box<Self>,
        ui: &mut Ui,
        response: &egui::Response,
        projector: &Projector,
        _memory: &MapMemory,
    ) {
        let WorkoutMarkers {
            workouts,
            pending,
            clicked,
        } = *self;
        let painter = ui.painter();

        for workout in workouts {
            let accent = activity_colors::for_activity(workout.activity_type());
            let screen = projector.project(to_position(workout.coordinates()));
            let anchor = Pos2::new(screen.x, screen.y);

            painter.circle_filled(anchor, MARKER_RADIUS, accent);
            painter.circle_stroke(anchor, MARKER_RADIUS, Stroke::new(2.0, Color32::WHITE));
            draw_popup(painter, anchor, &popup_text(workout), accent);
        }

        if let Some(pending) = pending {
            let screen = projector.project(to_position(pending));
            let anchor = Pos2::new(screen.x, screen.y);
            painter.circle_stroke(anchor, MARKER_RADIUS, Stroke::new(2.0, Color32::WHITE));
        }

        if response.clicked() {
            if let Some(pointer) = response.interact_pointer_pos() {
                let position = projector.unproject(pointer.to_vec2());
                match Coordinates::new(position.y(), position.x()) {
                    Ok(coords) => *clicked = Some(coords),
                    Err(e) => tracing::debug!("Ignoring click outside the map: {}", e),
                }
            }
        }
    }
}

/// Draw a popup bubble above a marker.
fn draw_popup(painter: &egui::Painter, anchor: Pos2, text: &str, accent: Color32) {
    let galley = painter.layout_no_wrap(
        text.to_string(),
        FontId::proportional(13.0),
        Color32::from_rgb(45, 52, 57),
    );

    let padding = Vec2::new(10.0, 6.0);
    let size = galley.size() + padding * 2.0;
    let bottom = anchor - Vec2::new(0.0, MARKER_RADIUS + 6.0);
    let rect = Rect::from_center_size(bottom - Vec2::new(0.0, size.y / 2.0), size);

    painter.rect_filled(rect, 5.0, Color32::WHITE);
    let stripe = Rect::from_min_size(rect.min, Vec2::new(5.0, rect.height()));
    painter.rect_filled(stripe, 2.0, accent);

    let text_pos = rect.left_center() + Vec2::new(padding.x, 0.0);
    painter.galley(
        Pos2::new(text_pos.x, text_pos.y - galley.size().y / 2.0),
        galley,
        Color32::from_rgb(45, 52, 57),
    );
}

fn to_position(coords: Coordinates) -> Position {
    lon_lat(coords.longitude, coords.latitude)
}
