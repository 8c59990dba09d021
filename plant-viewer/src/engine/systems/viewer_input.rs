use bevy::input::ButtonState;
use bevy::prelude::*;
use bevy::window::{PrimaryWindow, WindowEvent};

use crate::engine::scene::lifecycle::ViewerCommand;

/// Map left mouse drags on the window to pointer commands, one per window
/// event and in arrival order. A press takes the position of the latest
/// cursor move seen before it.
pub fn forward_pointer_input(
    windows: Query<&Window, With<PrimaryWindow>>,
    mut window_events: EventReader<WindowEvent>,
    mut last_cursor: Local<Option<Vec2>>,
    mut viewer_commands: EventWriter<ViewerCommand>,
) {
    for event in window_events.read() {
        match event {
            WindowEvent::CursorMoved(moved) => {
                *last_cursor = Some(moved.position);
                viewer_commands.write(ViewerCommand::PointerMove(moved.position));
            }
            WindowEvent::MouseButtonInput(input) if input.button == MouseButton::Left => {
                match input.state {
                    ButtonState::Pressed => {
                        let position = last_cursor.or_else(|| {
                            windows
                                .single()
                                .ok()
                                .and_then(|window| window.cursor_position())
                        });
                        if let Some(position) = position {
                            viewer_commands.write(ViewerCommand::PointerDown(position));
                        }
                    }
                    ButtonState::Released => {
                        viewer_commands.write(ViewerCommand::PointerUp);
                    }
                }
            }
            WindowEvent::CursorLeft(_) => {
                viewer_commands.write(ViewerCommand::PointerLeave);
            }
            _ => {}
        }
    }
}

/// Keyboard shortcuts for the viewer (native builds only).
#[cfg(not(target_arch = "wasm32"))]
pub fn handle_viewer_keyboard_shortcuts(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut viewer_commands: EventWriter<ViewerCommand>,
    mut page_actions: EventWriter<crate::page::PageAction>,
) {
    if keyboard.just_pressed(KeyCode::KeyO) {
        viewer_commands.write(ViewerCommand::Open);
    }

    if keyboard.just_pressed(KeyCode::Escape) {
        viewer_commands.write(ViewerCommand::Close);
    }

    if keyboard.just_pressed(KeyCode::KeyV) {
        page_actions.write(crate::page::PageAction::KeyPressed(
            constants::speech::VOICE_KEY.to_string(),
        ));
    }
}

/// Placeholder system for WASM builds where the page owns the keyboard.
#[cfg(target_arch = "wasm32")]
pub fn handle_viewer_keyboard_shortcuts() {
    // Shortcuts arrive through the `key_pressed` RPC method.
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::session::ViewerSession;
    use bevy::input::mouse::MouseButtonInput;
    use bevy::window::{CursorLeft, CursorMoved};

    fn test_app() -> App {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .add_event::<WindowEvent>()
            .add_event::<ViewerCommand>()
            .add_systems(Update, forward_pointer_input);
        app
    }

    fn commands(app: &App) -> Vec<ViewerCommand> {
        app.world()
            .resource::<Events<ViewerCommand>>()
            .iter_current_update_events()
            .copied()
            .collect()
    }

    fn moved(x: f32, y: f32) -> WindowEvent {
        WindowEvent::CursorMoved(CursorMoved {
            window: Entity::PLACEHOLDER,
            position: Vec2::new(x, y),
            delta: None,
        })
    }

    fn left(state: ButtonState) -> WindowEvent {
        WindowEvent::MouseButtonInput(MouseButtonInput {
            button: MouseButton::Left,
            state,
            window: Entity::PLACEHOLDER,
        })
    }

    fn send_all(app: &mut App, events: Vec<WindowEvent>) {
        for event in events {
            app.world_mut().send_event(event);
        }
        app.update();
    }

    #[test]
    fn events_keep_arrival_order() {
        let mut app = test_app();

        send_all(
            &mut app,
            vec![
                moved(100.0, 100.0),
                left(ButtonState::Pressed),
                moved(110.0, 115.0),
                left(ButtonState::Released),
            ],
        );

        assert_eq!(
            commands(&app),
            vec![
                ViewerCommand::PointerMove(Vec2::new(100.0, 100.0)),
                ViewerCommand::PointerDown(Vec2::new(100.0, 100.0)),
                ViewerCommand::PointerMove(Vec2::new(110.0, 115.0)),
                ViewerCommand::PointerUp,
            ]
        );
    }

    #[test]
    fn release_then_press_in_one_frame_stays_dragging() {
        let mut app = test_app();
        send_all(
            &mut app,
            vec![moved(0.0, 0.0), left(ButtonState::Pressed)],
        );

        send_all(
            &mut app,
            vec![
                left(ButtonState::Released),
                moved(3.0, 3.0),
                left(ButtonState::Pressed),
                moved(5.0, 5.0),
            ],
        );

        let frame = commands(&app);
        assert_eq!(
            frame,
            vec![
                ViewerCommand::PointerUp,
                ViewerCommand::PointerMove(Vec2::new(3.0, 3.0)),
                ViewerCommand::PointerDown(Vec2::new(3.0, 3.0)),
                ViewerCommand::PointerMove(Vec2::new(5.0, 5.0)),
            ]
        );

        // Replaying the frame into a session with a model leaves the drag
        // active and rotates by the move after the re-press.
        let mut session = ViewerSession::default();
        let ticket = session.open(Entity::from_raw(1)).ticket;
        session.complete_load(ticket, Ok(Entity::from_raw(2)));
        session.pointer_down(Vec2::ZERO);
        let mut applied = Vec2::ZERO;
        for command in frame {
            match command {
                ViewerCommand::PointerDown(p) => session.pointer_down(p),
                ViewerCommand::PointerMove(p) => {
                    applied += session.pointer_move(p).unwrap_or(Vec2::ZERO);
                }
                ViewerCommand::PointerUp => session.pointer_up(),
                _ => {}
            }
        }

        assert!(session.drag().is_dragging());
        assert!(applied.length() > 0.0);
    }

    #[test]
    fn right_button_is_left_to_the_camera() {
        let mut app = test_app();

        send_all(
            &mut app,
            vec![WindowEvent::MouseButtonInput(MouseButtonInput {
                button: MouseButton::Right,
                state: ButtonState::Pressed,
                window: Entity::PLACEHOLDER,
            })],
        );

        assert!(commands(&app).is_empty());
    }

    #[test]
    fn leaving_the_window_releases_the_drag() {
        let mut app = test_app();

        send_all(
            &mut app,
            vec![WindowEvent::CursorLeft(CursorLeft {
                window: Entity::PLACEHOLDER,
            })],
        );

        assert_eq!(commands(&app), vec![ViewerCommand::PointerLeave]);
    }
}
