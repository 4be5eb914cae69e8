use winit::event::{DeviceEvent, ElementState, MouseScrollDelta, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::Window;

use crate::input::{InputEvent, Key, KeyState, ScrollDelta};

/// Maps the window events the demos react to; everything else is `None`.
pub(crate) fn translate_window_event(window: &Window, event: &WindowEvent) -> Option<InputEvent> {
    match event {
        WindowEvent::Focused(focused) => Some(InputEvent::Focused(*focused)),

        WindowEvent::CursorMoved { position, .. } => {
            let logical = position.to_logical::<f64>(window.scale_factor());
            Some(InputEvent::CursorMoved {
                x: logical.x as f32,
                y: logical.y as f32,
            })
        }
        WindowEvent::CursorLeft { .. } => Some(InputEvent::CursorLeft),

        WindowEvent::MouseWheel { delta, .. } => Some(InputEvent::Scroll(match delta {
            MouseScrollDelta::LineDelta(_, y) => ScrollDelta::Lines(*y),
            MouseScrollDelta::PixelDelta(p) => {
                ScrollDelta::Pixels(p.to_logical::<f64>(window.scale_factor()).y as f32)
            }
        })),

        WindowEvent::KeyboardInput { event, .. } => Some(InputEvent::Key {
            key: map_key(event.physical_key),
            state: match event.state {
                ElementState::Pressed => KeyState::Pressed,
                ElementState::Released => KeyState::Released,
            },
            repeat: event.repeat,
        }),

        _ => None,
    }
}

/// Raw relative mouse motion, which drives mouse-look while the cursor is grabbed.
pub(crate) fn translate_device_event(event: &DeviceEvent) -> Option<InputEvent> {
    match event {
        DeviceEvent::MouseMotion { delta: (dx, dy) } => Some(InputEvent::MouseMotion {
            dx: *dx as f32,
            dy: *dy as f32,
        }),
        _ => None,
    }
}

fn map_key(key: PhysicalKey) -> Key {
    let PhysicalKey::Code(code) = key else {
        return Key::Other(0);
    };
    match code {
        KeyCode::Escape => Key::Escape,
        KeyCode::KeyW => Key::W,
        KeyCode::KeyA => Key::A,
        KeyCode::KeyS => Key::S,
        KeyCode::KeyD => Key::D,
        KeyCode::ArrowUp => Key::ArrowUp,
        KeyCode::ArrowDown => Key::ArrowDown,
        KeyCode::ArrowLeft => Key::ArrowLeft,
        KeyCode::ArrowRight => Key::ArrowRight,
        other => Key::Other(other as u32),
    }
}
