use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::keyboard::{KeyCode, ModifiersState, PhysicalKey};

use crate::input::{InputEvent, Key, KeyState, Modifiers, TextEvent};

/// Translates one winit event, passing zero or more input events to `emit`.
///
/// A key press that produces printable text yields both a `Key` and a `Text`
/// event, in that order.
pub(crate) fn translate_window_event(
    modifiers: Modifiers,
    event: &WindowEvent,
    mut emit: impl FnMut(InputEvent),
) {
    match event {
        // winit 0.30 wraps the state; `.state()` unwraps it.
        WindowEvent::ModifiersChanged(m) => {
            emit(InputEvent::ModifiersChanged(map_modifiers(m.state())));
        }

        WindowEvent::Focused(f) => emit(InputEvent::Focused(*f)),

        WindowEvent::KeyboardInput { event, .. } => {
            emit(InputEvent::Key {
                key: map_key(event.physical_key),
                state: match event.state {
                    ElementState::Pressed => KeyState::Pressed,
                    ElementState::Released => KeyState::Released,
                },
                modifiers,
                repeat: event.repeat,
            });

            if let Some(text) = committed_text(event, modifiers) {
                emit(InputEvent::Text(TextEvent { text }));
            }
        }

        WindowEvent::Ime(winit::event::Ime::Commit(text)) => {
            let text = printable(text);
            if !text.is_empty() {
                emit(InputEvent::Text(TextEvent { text }));
            }
        }

        _ => {}
    }
}

fn committed_text(event: &KeyEvent, modifiers: Modifiers) -> Option<String> {
    if event.state != ElementState::Pressed || modifiers.ctrl || modifiers.meta {
        return None;
    }
    let text = printable(event.text.as_deref()?);
    (!text.is_empty()).then_some(text)
}

fn printable(text: &str) -> String {
    text.chars().filter(|c| !c.is_control()).collect()
}

fn map_modifiers(m: ModifiersState) -> Modifiers {
    Modifiers {
        shift: m.shift_key(),
        ctrl: m.control_key(),
        alt: m.alt_key(),
        meta: m.super_key(),
    }
}

fn map_key(pk: PhysicalKey) -> Key {
    match pk {
        PhysicalKey::Code(code) => match code {
            KeyCode::Escape => Key::Escape,
            KeyCode::Enter | KeyCode::NumpadEnter => Key::Enter,
            KeyCode::Backspace => Key::Backspace,
            other => Key::Other(other as u32),
        },
        // NativeKeyCode has no stable numeric form.
        PhysicalKey::Unidentified(_) => Key::Other(0),
    }
}
