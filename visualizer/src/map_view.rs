use geopointcore::geo::{Extent, Viewport};
use geopointcore::Coordinate;
use iced::{
    mouse,
    widget::canvas::{self, Frame, Geometry, Path, Stroke, Text},
    widget::image::{FilterMethod, Handle},
    Color, Pixels, Point, Rectangle, Renderer, Size, Theme,
};

use crate::Message;

/// Image overlay prepared for drawing: pixels plus their map-space box.
#[derive(Debug, Clone)]
pub struct Overlay {
    pub handle: Handle,
    pub bounds: Extent,
    pub filter: FilterMethod,
}

/// Map canvas: image underneath, all points, the current point highlighted.
pub struct MapCanvas {
    pub viewport: Viewport,
    pub points: Vec<Coordinate>,
    pub current: Option<usize>,
    pub overlay: Option<Overlay>,
    pub show_points: bool,
}

#[derive(Debug, Default)]
pub struct Interaction {
    pressed_at: Option<Point>,
    last: Option<Point>,
    dragged: bool,
}

/// Cursor travel below which a press-release counts as a click.
const CLICK_SLOP: f32 = 4.0;
/// Pick radius for selecting a point by clicking, in screen pixels.
const PICK_RADIUS: f32 = 10.0;

impl MapCanvas {
    fn nearest_point(&self, position: Point, size: Size) -> Option<usize> {
        self.points
            .iter()
            .enumerate()
            .map(|(idx, coord)| {
                let (x, y) = self.viewport.world_to_screen(*coord, size.width, size.height);
                (idx, (x - position.x).hypot(y - position.y))
            })
            .filter(|(_, distance)| *distance <= PICK_RADIUS)
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(idx, _)| idx)
    }
}

impl canvas::Program<Message> for MapCanvas {
    type State = Interaction;

    fn update(
        &self,
        state: &mut Self::State,
        event: &canvas::Event,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> Option<canvas::Action<Message>> {
        let size = bounds.size();
        match event {
            canvas::Event::Mouse(mouse::Event::WheelScrolled { delta }) => {
                let position = cursor.position_in(bounds)?;
                let y = match delta {
                    mouse::ScrollDelta::Lines { y, .. } | mouse::ScrollDelta::Pixels { y, .. } => *y,
                };
                if y == 0.0 {
                    return None;
                }
                let factor = if y > 0.0 { 1.1 } else { 1.0 / 1.1 };
                Some(
                    canvas::Action::publish(Message::MapZoom {
                        factor,
                        anchor: (position.x, position.y),
                        size: (size.width, size.height),
                    })
                    .and_capture(),
                )
            }
            canvas::Event::Mouse(mouse::Event::ButtonPressed(mouse::Button::Left)) => {
                let position = cursor.position_in(bounds)?;
                state.pressed_at = Some(position);
                state.last = Some(position);
                state.dragged = false;
                Some(canvas::Action::capture())
            }
            canvas::Event::Mouse(mouse::Event::CursorMoved { .. }) => {
                let last = state.last?;
                let position = cursor.position_in(bounds)?;
                let origin = state.pressed_at.unwrap_or(last);
                if !state.dragged && origin.distance(position) < CLICK_SLOP {
                    return None;
                }
                state.dragged = true;
                state.last = Some(position);
                Some(
                    canvas::Action::publish(Message::MapPan {
                        dx: position.x - last.x,
                        dy: position.y - last.y,
                        size: (size.width, size.height),
                    })
                    .and_capture(),
                )
            }
            canvas::Event::Mouse(mouse::Event::ButtonReleased(mouse::Button::Left)) => {
                let pressed = state.pressed_at.take();
                state.last = None;
                if state.dragged {
                    state.dragged = false;
                    return Some(canvas::Action::capture());
                }
                let position = pressed.and_then(|_| cursor.position_in(bounds))?;
                if !self.show_points {
                    return None;
                }
                self.nearest_point(position, size)
                    .map(|idx| canvas::Action::publish(Message::MapSelect(idx)).and_capture())
            }
            _ => None,
        }
    }

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<Geometry> {
        let mut frame = Frame::new(renderer, bounds.size());
        let (width, height) = (bounds.width, bounds.height);
        frame.fill_rectangle(Point::ORIGIN, bounds.size(), Color::from_rgb(0.08, 0.08, 0.1));

        if let Some(overlay) = &self.overlay {
            let (x0, y0) = self.viewport.world_to_screen(
                Coordinate::new(overlay.bounds.min_x, overlay.bounds.max_y),
                width,
                height,
            );
            let (x1, y1) = self.viewport.world_to_screen(
                Coordinate::new(overlay.bounds.max_x, overlay.bounds.min_y),
                width,
                height,
            );
            let rect = Rectangle::new(Point::new(x0, y0), Size::new(x1 - x0, y1 - y0));
            if rect.width > 0.0 && rect.height > 0.0 {
                frame.draw_image(
                    rect,
                    canvas::Image::new(overlay.handle.clone()).filter_method(overlay.filter),
                );
            }
        }

        if self.show_points {
            for (idx, coord) in self.points.iter().enumerate() {
                if Some(idx) == self.current {
                    continue;
                }
                let (x, y) = self.viewport.world_to_screen(*coord, width, height);
                if x < -10.0 || y < -10.0 || x > width + 10.0 || y > height + 10.0 {
                    continue;
                }
                let marker = Path::circle(Point::new(x, y), 5.0);
                frame.fill(&marker, Color::from_rgba(0.9, 0.15, 0.15, 0.7));
            }

            if let Some(coord) = self.current.and_then(|idx| self.points.get(idx)) {
                let (x, y) = self.viewport.world_to_screen(*coord, width, height);
                let center = Point::new(x, y);
                frame.fill(&Path::circle(center, 6.0), Color::from_rgb(0.15, 0.35, 0.95));
                frame.stroke(
                    &Path::circle(center, 11.0),
                    Stroke::default()
                        .with_width(2.0)
                        .with_color(Color::from_rgb(0.95, 0.95, 1.0)),
                );
                if let Some(idx) = self.current {
                    frame.fill_text(Text {
                        content: format!("Current: {}", idx),
                        position: Point::new(x + 14.0, y - 18.0),
                        color: Color::WHITE,
                        size: Pixels(14.0),
                        ..Text::default()
                    });
                }
            }
        }

        let extent = self.viewport.extent();
        frame.fill_text(Text {
            content: format!(
                "x {:.1}..{:.1}  y {:.1}..{:.1}",
                extent.min_x, extent.max_x, extent.min_y, extent.max_y
            ),
            position: Point::new(8.0, height - 20.0),
            color: Color::from_rgb(0.7, 0.7, 0.75),
            size: Pixels(12.0),
            ..Text::default()
        });

        vec![frame.into_geometry()]
    }

    fn mouse_interaction(
        &self,
        state: &Self::State,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> mouse::Interaction {
        if state.dragged {
            mouse::Interaction::Grabbing
        } else if cursor.is_over(bounds) {
            mouse::Interaction::Crosshair
        } else {
            mouse::Interaction::default()
        }
    }
}
