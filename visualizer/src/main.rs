use geopointcore::{
    data::{ImageLayer, LayerKind, LayerList},
    geo::{Extent, Viewport},
    imaging::Interpolation,
    io, Coordinate, CoreResult, LoggerConfig, StepOutcome, WorkflowController,
};
use iced::{
    widget::{
        button,
        canvas::Canvas,
        column, container,
        image::{FilterMethod, Handle},
        pick_list, row, scrollable, slider, text, text_input, Column, Container,
    },
    Alignment, Element, Length, Task, Theme,
};
use log::{info, warn};
use map_view::{MapCanvas, Overlay};
use std::path::Path;
use table_view::Drafts;

mod map_view;
mod settings;
mod table_view;

/// Longest side of the image texture handed to the renderer.
const DISPLAY_MAX_SIDE: u32 = 2048;
const HISTORY_LEN: usize = 20;

fn main() -> iced::Result {
    env_logger::init();
    iced::application(Viewer::boot, Viewer::update, Viewer::view)
        .title(application_title)
        .theme(application_theme)
        .run()
}

fn application_title(state: &Viewer) -> String {
    match state.controller.as_ref().and_then(|c| c.layer().source()) {
        Some(path) => format!("GeoPoint Logger - {}", path.display()),
        None => "GeoPoint Logger".into(),
    }
}

fn application_theme(_: &Viewer) -> Theme {
    Theme::Dark
}

struct Viewer {
    config: LoggerConfig,
    controller: Option<WorkflowController>,
    image: Option<ImageLayer>,
    overlay: Option<Overlay>,
    layers: LayerList,
    viewport: Viewport,
    value_input: String,
    goto_input: String,
    assign_column: Option<String>,
    assign_input: String,
    /// Zoom slider position; tenths of the zoom factor.
    zoom_slider: u8,
    drafts: Drafts,
    status: String,
    history: Vec<String>,
}

#[derive(Debug, Clone)]
pub enum Message {
    OpenShapefile,
    OpenImage,
    Save,
    ValueChanged(String),
    RecordAndNext,
    GoToChanged(String),
    GoTo,
    Next,
    Previous,
    ZoomChanged(u8),
    AssignColumn(String),
    UseAsRecordColumn,
    AddRecordColumn,
    AssignChanged(String),
    Assign,
    AssignAndNext,
    SelectRow(usize),
    CellDraft(usize, usize, String),
    CellCommit(usize, usize),
    MapZoom {
        factor: f64,
        anchor: (f32, f32),
        size: (f32, f32),
    },
    MapPan {
        dx: f32,
        dy: f32,
        size: (f32, f32),
    },
    MapSelect(usize),
    FitAll,
    ToggleLayer(String),
    Brightness(u8),
    Contrast(u8),
    Saturation(u8),
    Threshold(u8),
    InterpolationChanged(Interpolation),
}

impl Viewer {
    fn boot() -> (Self, Task<Message>) {
        let (config, config_error) = settings::from_args();
        let zoom = config.clamp_zoom(config.zoom);
        let viewport = Viewport::new(
            Coordinate::new(0.0, 0.0),
            config.base_zoom_range_x,
            config.base_zoom_range_y,
        );
        let mut viewer = Viewer {
            config,
            controller: None,
            image: None,
            overlay: None,
            layers: LayerList::new(),
            viewport,
            value_input: String::new(),
            goto_input: String::new(),
            assign_column: None,
            assign_input: String::new(),
            zoom_slider: (zoom * 10.0).round().clamp(1.0, 50.0) as u8,
            drafts: Drafts::new(),
            status: "Open a point shapefile to begin".into(),
            history: Vec::new(),
        };
        if let Some(err) = config_error {
            warn!("{}", err);
            viewer.status = format!("Using default settings: {}", err);
        }
        (viewer, Task::none())
    }

    fn update(state: &mut Self, message: Message) -> Task<Message> {
        match message {
            Message::OpenShapefile => state.open_shapefile(),
            Message::OpenImage => state.open_image(),
            Message::Save => state.save(),
            Message::ValueChanged(value) => state.value_input = value,
            Message::RecordAndNext => {
                let value = state.value_input.clone();
                let result = state.with_controller(|c| c.record_and_advance(&value));
                if state.apply_outcome(result) {
                    state.value_input.clear();
                }
            }
            Message::GoToChanged(value) => state.goto_input = value,
            Message::GoTo => {
                let id = state.goto_input.clone();
                let result = state.with_controller(|c| c.go_to(&id));
                state.apply_outcome(result);
            }
            Message::Next => {
                let result = state.with_controller(|c| c.next());
                state.apply_outcome(result);
            }
            Message::Previous => {
                let result = state.with_controller(|c| c.previous());
                state.apply_outcome(result);
            }
            Message::SelectRow(index) | Message::MapSelect(index) => {
                let result = state.with_controller(|c| c.move_to_index(index));
                state.apply_outcome(result);
            }
            Message::ZoomChanged(position) => {
                state.zoom_slider = position;
                let requested = position as f64 / 10.0;
                if let Some(controller) = state.controller.as_mut() {
                    controller.set_zoom(requested);
                    if let Some(recenter) = controller.recenter_current() {
                        state.viewport.recenter(recenter.coord, recenter.zoom, &state.config);
                    }
                }
            }
            Message::AssignColumn(column) => {
                state.assign_column = Some(column);
                state.prefill_assign();
            }
            Message::UseAsRecordColumn => {
                if let (Some(controller), Some(column)) = (state.controller.as_mut(), &state.assign_column) {
                    match controller.set_target_column(column) {
                        Ok(()) => state.status = format!("Recording into '{}'", column),
                        Err(err) => state.status = err.to_string(),
                    }
                }
            }
            Message::AddRecordColumn => {
                if let Some(controller) = state.controller.as_mut() {
                    match controller.add_target_column() {
                        Ok(true) => {
                            let entry = format!("Added column '{}'", controller.target_column());
                            state.push_history(entry.clone());
                            state.status = entry;
                        }
                        Ok(false) => {}
                        Err(err) => state.status = err.to_string(),
                    }
                }
            }
            Message::AssignChanged(value) => state.assign_input = value,
            Message::Assign | Message::AssignAndNext => {
                let move_next = matches!(message, Message::AssignAndNext);
                let Some(column) = state.assign_column.clone() else {
                    state.status = "Choose a column first".into();
                    return Task::none();
                };
                let value = state.assign_input.clone();
                let result = state.with_controller(|c| c.assign(&column, &value, move_next));
                state.apply_outcome(result);
            }
            Message::CellDraft(row, col, value) => {
                state.drafts.insert((row, col), value);
            }
            Message::CellCommit(row, col) => {
                let Some(controller) = state.controller.as_mut() else {
                    return Task::none();
                };
                match table_view::commit_draft(controller, &mut state.drafts, row, col) {
                    Some(Ok(value)) => {
                        state.status = format!("Row {} updated to '{}'", row, value);
                        state.prefill_assign();
                    }
                    Some(Err(err)) => state.status = format!("Edit rejected: {}", err),
                    None => {}
                }
            }
            Message::MapZoom { factor, anchor, size } => {
                state.viewport.zoom_at(factor, anchor, size.0, size.1);
            }
            Message::MapPan { dx, dy, size } => {
                state.viewport.pan_pixels(dx, dy, size.0, size.1);
            }
            Message::FitAll => state.fit_all(),
            Message::ToggleLayer(name) => {
                let visible = state
                    .layers
                    .entries()
                    .iter()
                    .find(|e| e.name == name)
                    .map(|e| !e.visible);
                if let Some(visible) = visible {
                    state.layers.set_visible(&name, visible);
                }
            }
            Message::Brightness(v) => state.adjust(|a| a.brightness = v),
            Message::Contrast(v) => state.adjust(|a| a.contrast = v),
            Message::Saturation(v) => state.adjust(|a| a.saturation = v),
            Message::Threshold(v) => state.adjust(|a| a.threshold = v),
            Message::InterpolationChanged(mode) => state.adjust(|a| a.interpolation = mode),
        }
        Task::none()
    }

    fn view(state: &Self) -> Element<'_, Message> {
        let files = row![
            button("Open points").on_press(Message::OpenShapefile).padding(8),
            button("Open image").on_press(Message::OpenImage).padding(8),
            button("Save as...").on_press_maybe(state.controller.as_ref().map(|_| Message::Save)).padding(8),
        ]
        .spacing(8);

        let (position, target) = match &state.controller {
            Some(c) if !c.is_empty() => (
                format!(
                    "Point {} of {} (key {})",
                    c.index(),
                    c.len(),
                    c.current_point().map(|p| p.key.as_str()).unwrap_or("")
                ),
                {
                    let (recorded, moves, failures) = c.metrics().snapshot();
                    format!(
                        "Recording into '{}', {} filled | session: {} recorded, {} moves, {} failed",
                        c.target_column(),
                        c.recorded_count(),
                        recorded,
                        moves,
                        failures
                    )
                },
            ),
            _ => ("No points loaded".into(), String::new()),
        };

        let workflow = column![
            text("Workflow").size(22),
            text(position).size(14),
            text(target).size(12),
            text_input("Value to record, Enter to advance", &state.value_input)
                .on_input(Message::ValueChanged)
                .on_submit(Message::RecordAndNext)
                .padding(6),
            row![
                button("Previous").on_press(Message::Previous).padding(6),
                button("Next").on_press(Message::Next).padding(6),
                button("Record").on_press(Message::RecordAndNext).padding(6),
            ]
            .spacing(6),
            row![
                text_input("Go to id", &state.goto_input)
                    .on_input(Message::GoToChanged)
                    .on_submit(Message::GoTo)
                    .padding(6),
                button("Go").on_press(Message::GoTo).padding(6),
            ]
            .spacing(6),
            text(format!("Zoom: {:.1}x", state.zoom_slider as f64 / 10.0)).size(12),
            slider(1..=50, state.zoom_slider, Message::ZoomChanged),
        ]
        .spacing(8);
        let missing_column = state
            .controller
            .as_ref()
            .filter(|c| !c.is_empty() && c.layer().table().column_index(c.target_column()).is_none())
            .map(|c| c.target_column().to_string());
        let workflow = match missing_column {
            Some(name) => workflow.push(
                button(text(format!("Add '{}' column", name)))
                    .on_press(Message::AddRecordColumn)
                    .padding(6),
            ),
            None => workflow,
        };

        let columns: Vec<String> = state
            .controller
            .as_ref()
            .map(|c| c.layer().table().column_names().map(str::to_string).collect())
            .unwrap_or_default();
        let assignment = column![
            text("Column assignment").size(18),
            pick_list(columns, state.assign_column.clone(), Message::AssignColumn)
                .placeholder("Column"),
            text_input("Value", &state.assign_input)
                .on_input(Message::AssignChanged)
                .on_submit(Message::AssignAndNext)
                .padding(6),
            row![
                button("Assign").on_press(Message::Assign).padding(6),
                button("Assign + next").on_press(Message::AssignAndNext).padding(6),
                button("Record here").on_press(Message::UseAsRecordColumn).padding(6),
            ]
            .spacing(6),
        ]
        .spacing(8);

        let layer_list = state.layers.entries().iter().fold(
            Column::new().spacing(4).push(text("Layers").size(18)),
            |list, entry| {
                let label = match entry.kind {
                    LayerKind::Points => "points",
                    LayerKind::Image => "image",
                };
                list.push(
                    row![
                        button(if entry.visible { "Hide" } else { "Show" })
                            .on_press(Message::ToggleLayer(entry.name.clone()))
                            .padding(4),
                        text(format!("{} ({})", entry.name, label)).size(12),
                    ]
                    .spacing(6)
                    .align_y(Alignment::Center),
                )
            },
        );

        let image_panel: Element<'_, Message> = match &state.image {
            Some(image) => {
                let a = image.adjustments;
                column![
                    text("Image settings").size(18),
                    text(format!("Brightness {}", a.brightness)).size(12),
                    slider(0..=100, a.brightness, Message::Brightness),
                    text(format!("Contrast {}", a.contrast)).size(12),
                    slider(0..=100, a.contrast, Message::Contrast),
                    text(format!("Saturation {}", a.saturation)).size(12),
                    slider(0..=100, a.saturation, Message::Saturation),
                    text(format!("Threshold {}", a.threshold)).size(12),
                    slider(0..=255, a.threshold, Message::Threshold),
                    pick_list(
                        Interpolation::ALL,
                        Some(a.interpolation),
                        Message::InterpolationChanged
                    ),
                ]
                .spacing(6)
                .into()
            }
            None => text("No image loaded").size(12).into(),
        };

        let history_list = if state.history.is_empty() {
            Column::new().push(text("No activity yet").size(12))
        } else {
            state
                .history
                .iter()
                .rev()
                .fold(Column::new().spacing(4), |col, entry| {
                    col.push(text(entry.clone()).size(12))
                })
        };

        let side = column![
            files,
            workflow,
            assignment,
            layer_list,
            image_panel,
            text(&state.status).size(14),
            text("Activity log").size(16),
            Container::new(scrollable(history_list).height(Length::Fixed(110.0))).padding(6),
        ]
        .spacing(14)
        .padding(16)
        .width(Length::Fixed(360.0));

        let map = Canvas::new(MapCanvas {
            viewport: state.viewport,
            points: state
                .controller
                .as_ref()
                .map(|c| c.layer().features().iter().map(|f| f.coord).collect())
                .unwrap_or_default(),
            current: state
                .controller
                .as_ref()
                .filter(|c| !c.is_empty())
                .map(|c| c.index()),
            overlay: state
                .overlay
                .clone()
                .filter(|_| state.layers.is_visible(LayerKind::Image)),
            show_points: state.layers.is_visible(LayerKind::Points),
        })
        .width(Length::Fill)
        .height(Length::FillPortion(3));

        let table: Element<'_, Message> = match &state.controller {
            Some(controller) => table_view::attribute_table(controller, &state.drafts),
            None => text("Attribute table appears here").size(12).into(),
        };

        let main = column![
            row![
                text("Map").size(18),
                button("Fit all").on_press(Message::FitAll).padding(4),
            ]
            .spacing(10)
            .align_y(Alignment::Center),
            map,
            container(table).height(Length::FillPortion(2)).padding(4),
        ]
        .spacing(8)
        .padding(16)
        .width(Length::Fill);

        Container::new(row![scrollable(side), main].spacing(10))
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }

    fn with_controller<F>(&mut self, step: F) -> Option<CoreResult<StepOutcome>>
    where
        F: FnOnce(&mut WorkflowController) -> CoreResult<StepOutcome>,
    {
        match self.controller.as_mut() {
            Some(controller) => Some(step(controller)),
            None => {
                self.status = "No points loaded".into();
                None
            }
        }
    }

    /// Show a step's status and follow its recenter request. Returns whether it succeeded.
    fn apply_outcome(&mut self, result: Option<CoreResult<StepOutcome>>) -> bool {
        match result {
            Some(Ok(outcome)) => {
                if let Some(recenter) = outcome.recenter {
                    self.viewport.recenter(recenter.coord, recenter.zoom, &self.config);
                }
                self.goto_input = outcome.index.to_string();
                self.push_history(outcome.status.clone());
                self.status = outcome.status;
                self.prefill_assign();
                true
            }
            Some(Err(err)) => {
                warn!("{}", err);
                self.status = err.to_string();
                false
            }
            None => false,
        }
    }

    fn prefill_assign(&mut self) {
        if let (Some(controller), Some(column)) = (&self.controller, &self.assign_column) {
            self.assign_input = controller.current_value(column).unwrap_or_default();
        }
    }

    fn open_shapefile(&mut self) {
        let Some(path) = rfd::FileDialog::new()
            .set_title("Open point shapefile")
            .add_filter("Shapefile", &["shp"])
            .pick_file()
        else {
            return;
        };
        match io::load_point_layer(&path, self.config.key_column.as_deref()) {
            Ok(layer) => {
                let count = layer.len();
                match self.controller.as_mut() {
                    Some(controller) => controller.load(layer),
                    None => self.controller = Some(WorkflowController::new(layer, self.config.clone())),
                }
                self.drafts.clear();
                self.layers.upsert(file_name(&path), LayerKind::Points);
                info!("loaded {} points from {}", count, path.display());
                self.push_history(format!("Loaded {} points", count));
                self.status = format!("Loaded {} points from {}", count, path.display());
                self.fit_all();
            }
            Err(err) => self.status = format!("Could not load {}: {}", path.display(), err),
        }
    }

    fn open_image(&mut self) {
        let Some(path) = rfd::FileDialog::new()
            .set_title("Open georeferenced image")
            .add_filter("Images", &["jpg", "jpeg", "png", "tif", "tiff"])
            .pick_file()
        else {
            return;
        };
        match io::load_image_layer(&path) {
            Ok(image) => {
                if !image.georeferenced {
                    self.push_history("Image has no world file, drawn in pixel units".into());
                }
                self.layers.upsert(file_name(&path), LayerKind::Image);
                self.status = format!("Loaded image {}x{}", image.width(), image.height());
                self.image = Some(image);
                self.refresh_overlay();
                if self.controller.is_none() {
                    self.fit_all();
                }
            }
            Err(err) => self.status = format!("Could not load {}: {}", path.display(), err),
        }
    }

    fn save(&mut self) {
        let Some(controller) = &self.controller else {
            return;
        };
        let suggested = controller
            .layer()
            .source()
            .and_then(|p| p.file_name())
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "points.shp".into());
        let Some(path) = rfd::FileDialog::new()
            .set_title("Save point shapefile")
            .add_filter("Shapefile", &["shp"])
            .set_file_name(suggested)
            .save_file()
        else {
            return;
        };
        let path = path.with_extension("shp");
        match io::save_point_layer(controller.layer(), &path) {
            Ok(()) => {
                info!("saved {}", path.display());
                self.push_history(format!("Saved {}", path.display()));
                self.status = format!("Saved {}", path.display());
            }
            Err(err) => self.status = format!("Save failed: {}", err),
        }
    }

    fn adjust<F>(&mut self, change: F)
    where
        F: FnOnce(&mut geopointcore::imaging::ImageAdjustments),
    {
        if let Some(image) = self.image.as_mut() {
            change(&mut image.adjustments);
            self.refresh_overlay();
        }
    }

    fn refresh_overlay(&mut self) {
        self.overlay = self.image.as_ref().map(|image| {
            let adjust = image.adjustments;
            let display = adjust.apply(&adjust.fit_for_display(image.pixels(), DISPLAY_MAX_SIDE));
            let (w, h) = display.dimensions();
            Overlay {
                handle: Handle::from_rgba(w, h, display.into_raw()),
                bounds: image.bounds(),
                filter: match adjust.interpolation {
                    Interpolation::Nearest => FilterMethod::Nearest,
                    Interpolation::Bilinear | Interpolation::Bicubic => FilterMethod::Linear,
                },
            }
        });
    }

    fn fit_all(&mut self) {
        let points = self.controller.as_ref().and_then(|c| c.layer().extent());
        let image = self.image.as_ref().map(|i| i.bounds());
        let extent: Option<Extent> = match (points, image) {
            (Some(p), Some(i)) => Some(p.union(&i)),
            (p, i) => p.or(i),
        };
        if let Some(extent) = extent {
            self.viewport.fit(&extent, 0.05);
        }
    }

    fn push_history(&mut self, entry: String) {
        self.history.push(entry);
        if self.history.len() > HISTORY_LEN {
            self.history.remove(0);
        }
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
