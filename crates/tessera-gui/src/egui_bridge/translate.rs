//! Accumulates baseview input into egui's [`RawInput`].
//!
//! The editor panel is mouse-driven, so only pointer events, wheel
//! scrolling, modifier state, focus, and resizes are translated.

use baseview::{MouseButton as BvMouseButton, MouseEvent, ScrollDelta, WindowEvent};
use egui::{
    Event as EguiEvent, Modifiers, PointerButton, Pos2, RawInput, Rect, Vec2, ViewportId,
};
use keyboard_types::Modifiers as KbModifiers;

/// Points per wheel line.
const LINE_HEIGHT: f32 = 24.0;

/// Per-window input state between two egui passes.
pub struct InputState {
    raw: RawInput,
    /// Last pointer position in logical points.
    pointer: Pos2,
    /// Physical pixels per logical point.
    scale: f32,
    physical_size: [u32; 2],
}

impl InputState {
    /// Input state for a window of `physical_size` at `scale`.
    pub fn new(physical_size: [u32; 2], scale: f64) -> Self {
        Self {
            raw: RawInput {
                focused: true,
                ..RawInput::default()
            },
            pointer: Pos2::ZERO,
            scale: scale as f32,
            physical_size,
        }
    }

    /// Viewport size in physical pixels.
    pub fn physical_size(&self) -> [u32; 2] {
        self.physical_size
    }

    /// Hand the accumulated input to egui and start collecting anew.
    pub fn take(&mut self) -> RawInput {
        let [width, height] = self.physical_size;
        self.raw.screen_rect = Some(Rect::from_min_size(
            Pos2::ZERO,
            Vec2::new(width as f32, height as f32) / self.scale,
        ));
        self.raw
            .viewports
            .entry(ViewportId::ROOT)
            .or_default()
            .native_pixels_per_point = Some(self.scale);
        self.raw.take()
    }

    /// Record a mouse event. Baseview positions are physical pixels.
    pub fn on_mouse(&mut self, event: &MouseEvent) {
        match event {
            MouseEvent::CursorMoved {
                position,
                modifiers,
            } => {
                self.raw.modifiers = map_modifiers(*modifiers);
                self.pointer = Pos2::new(
                    position.x as f32 / self.scale,
                    position.y as f32 / self.scale,
                );
                self.raw.events.push(EguiEvent::PointerMoved(self.pointer));
            }
            MouseEvent::ButtonPressed { button, modifiers } => {
                self.raw.modifiers = map_modifiers(*modifiers);
                self.push_button(*button, true);
            }
            MouseEvent::ButtonReleased { button, modifiers } => {
                self.raw.modifiers = map_modifiers(*modifiers);
                self.push_button(*button, false);
            }
            MouseEvent::WheelScrolled { delta, modifiers } => {
                self.raw.modifiers = map_modifiers(*modifiers);
                let delta = match delta {
                    ScrollDelta::Lines { x, y } => Vec2::new(*x, *y) * LINE_HEIGHT,
                    ScrollDelta::Pixels { x, y } => Vec2::new(*x, *y) / self.scale,
                };
                self.raw.events.push(EguiEvent::MouseWheel {
                    unit: egui::MouseWheelUnit::Point,
                    delta,
                    modifiers: self.raw.modifiers,
                });
            }
            MouseEvent::CursorLeft => self.raw.events.push(EguiEvent::PointerGone),
            _ => {}
        }
    }

    /// Track modifier keys from a keyboard event.
    pub fn on_modifiers(&mut self, modifiers: KbModifiers) {
        self.raw.modifiers = map_modifiers(modifiers);
    }

    /// Record a window event. Returns `true` if the window is about to close.
    pub fn on_window(&mut self, event: &WindowEvent) -> bool {
        match event {
            WindowEvent::Focused => self.raw.focused = true,
            WindowEvent::Unfocused => self.raw.focused = false,
            WindowEvent::Resized(info) => {
                let size = info.physical_size();
                self.physical_size = [size.width, size.height];
                self.scale = info.scale() as f32;
            }
            WindowEvent::WillClose => return true,
        }
        false
    }

    fn push_button(&mut self, button: BvMouseButton, pressed: bool) {
        if let Some(button) = map_mouse_button(button) {
            self.raw.events.push(EguiEvent::PointerButton {
                pos: self.pointer,
                button,
                pressed,
                modifiers: self.raw.modifiers,
            });
        }
    }
}

fn map_modifiers(mods: KbModifiers) -> Modifiers {
    Modifiers {
        alt: mods.contains(KbModifiers::ALT),
        ctrl: mods.contains(KbModifiers::CONTROL),
        shift: mods.contains(KbModifiers::SHIFT),
        mac_cmd: false,
        command: mods.contains(KbModifiers::CONTROL),
    }
}

fn map_mouse_button(button: BvMouseButton) -> Option<PointerButton> {
    match button {
        BvMouseButton::Left => Some(PointerButton::Primary),
        BvMouseButton::Right => Some(PointerButton::Secondary),
        BvMouseButton::Middle => Some(PointerButton::Middle),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use baseview::Point;

    use super::*;

    #[test]
    fn pointer_positions_are_scaled_to_points() {
        let mut input = InputState::new([1600, 800], 2.0);
        input.on_mouse(&MouseEvent::CursorMoved {
            position: Point::new(200.0, 100.0),
            modifiers: KbModifiers::empty(),
        });
        input.on_mouse(&MouseEvent::ButtonPressed {
            button: BvMouseButton::Left,
            modifiers: KbModifiers::SHIFT,
        });

        let raw = input.take();
        assert_eq!(raw.events[0], EguiEvent::PointerMoved(Pos2::new(100.0, 50.0)));
        match &raw.events[1] {
            EguiEvent::PointerButton {
                pos,
                button,
                pressed,
                modifiers,
            } => {
                assert_eq!(*pos, Pos2::new(100.0, 50.0));
                assert_eq!(*button, PointerButton::Primary);
                assert!(*pressed);
                assert!(modifiers.shift);
            }
            other => panic!("unexpected event {other:?}"),
        }
        assert_eq!(
            raw.screen_rect,
            Some(Rect::from_min_size(Pos2::ZERO, Vec2::new(800.0, 400.0)))
        );
    }

    #[test]
    fn take_drains_events() {
        let mut input = InputState::new([800, 400], 1.0);
        input.on_mouse(&MouseEvent::CursorLeft);
        assert_eq!(input.take().events.len(), 1);
        assert!(input.take().events.is_empty());
    }

    #[test]
    fn focus_and_close_events() {
        let mut input = InputState::new([800, 400], 1.0);
        assert!(!input.on_window(&WindowEvent::Unfocused));
        assert!(!input.take().focused);
        assert!(input.on_window(&WindowEvent::WillClose));
    }
}
