use zombie_survival::input::*;

#[test]
fn key_names_map_to_game_keys() {
    assert_eq!(Key::from_name("w"), Some(Key::Move(MoveKey::Up)));
    assert_eq!(Key::from_name("arrowup"), Some(Key::Move(MoveKey::Up)));
    assert_eq!(Key::from_name("s"), Some(Key::Move(MoveKey::Down)));
    assert_eq!(Key::from_name("arrowleft"), Some(Key::Move(MoveKey::Left)));
    assert_eq!(Key::from_name("d"), Some(Key::Move(MoveKey::Right)));
    assert_eq!(Key::from_name(" "), Some(Key::Attack));
    assert_eq!(Key::from_name("q"), None);
    // Names arrive lower-cased; anything else is unknown.
    assert_eq!(Key::from_name("W"), None);
}

#[test]
fn key_down_and_up_track_held_set() {
    let mut input = InputState::default();
    assert_eq!(input.apply(InputEvent::KeyDown(Key::Move(MoveKey::Left))), None);
    assert!(input.is_held(MoveKey::Left));
    assert!(!input.is_held(MoveKey::Right));

    input.apply(InputEvent::KeyUp(Key::Move(MoveKey::Left)));
    assert!(!input.is_held(MoveKey::Left));
}

#[test]
fn repeated_key_down_is_idempotent() {
    let mut input = InputState::default();
    input.apply(InputEvent::KeyDown(Key::Move(MoveKey::Up)));
    input.apply(InputEvent::KeyDown(Key::Move(MoveKey::Up)));
    input.apply(InputEvent::KeyUp(Key::Move(MoveKey::Up)));
    assert!(!input.is_held(MoveKey::Up));
}

#[test]
fn space_requests_attack_without_holding() {
    let mut input = InputState::default();
    assert_eq!(input.apply(InputEvent::KeyDown(Key::Attack)), Some(Action::Attack));
    assert_eq!(input.apply(InputEvent::KeyUp(Key::Attack)), None);
    assert_eq!(input, InputState::default());
}

#[test]
fn pointer_keeps_latest_position() {
    let mut input = InputState::default();
    input.apply(InputEvent::PointerMove { x: 10.0, y: 20.0 });
    input.apply(InputEvent::TouchMove { x: 30.0, y: 40.0 });
    assert_eq!((input.pointer_x, input.pointer_y), (30.0, 40.0));
}

#[test]
fn pointer_down_up_toggle_click() {
    let mut input = InputState::default();
    input.apply(InputEvent::PointerDown);
    assert!(input.clicking);
    input.apply(InputEvent::PointerUp);
    assert!(!input.clicking);
}

#[test]
fn touch_start_moves_pointer_and_attacks() {
    let mut input = InputState::default();
    let action = input.apply(InputEvent::TouchStart { x: 5.0, y: 6.0 });
    assert_eq!(action, Some(Action::Attack));
    assert_eq!((input.pointer_x, input.pointer_y), (5.0, 6.0));
}

#[test]
fn release_all_clears_movement_only() {
    let mut input = InputState::with_pointer(1.0, 2.0);
    input.apply(InputEvent::KeyDown(Key::Move(MoveKey::Up)));
    input.apply(InputEvent::KeyDown(Key::Move(MoveKey::Right)));
    input.release_all();
    assert!(!input.is_held(MoveKey::Up));
    assert!(!input.is_held(MoveKey::Right));
    assert_eq!((input.pointer_x, input.pointer_y), (1.0, 2.0));
}
