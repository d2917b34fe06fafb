use twenty48::{
    grid::Direction,
    input::{decode_key, decode_swipe, Command, SwipeTracker, MIN_SWIPE_DISTANCE},
};

#[test]
fn test_arrow_keys() {
    assert_eq!(decode_key("ArrowUp"), Some(Direction::Up));
    assert_eq!(decode_key("ArrowDown"), Some(Direction::Down));
    assert_eq!(decode_key("ArrowLeft"), Some(Direction::Left));
    assert_eq!(decode_key("ArrowRight"), Some(Direction::Right));

    for key in ["Enter", "arrowup", "w", " ", ""] {
        assert_eq!(decode_key(key), None, "{:?}", key);
    }
}

#[test]
fn test_short_swipes_are_ignored() {
    assert_eq!(decode_swipe(0.0, 0.0), None);
    assert_eq!(decode_swipe(29.9, -29.9), None);
    assert_eq!(decode_swipe(-10.0, 5.0), None);
    assert_eq!(decode_swipe(MIN_SWIPE_DISTANCE, 0.0), Some(Direction::Right));
}

#[test]
fn test_swipe_longer_axis_wins() {
    assert_eq!(decode_swipe(100.0, 20.0), Some(Direction::Right));
    assert_eq!(decode_swipe(-100.0, 99.0), Some(Direction::Left));
    assert_eq!(decode_swipe(20.0, 100.0), Some(Direction::Down));
    assert_eq!(decode_swipe(-40.0, -60.0), Some(Direction::Up));

    // one long axis is enough
    assert_eq!(decode_swipe(5.0, -31.0), Some(Direction::Up));
}

#[test]
fn test_swipe_ties_are_vertical() {
    assert_eq!(decode_swipe(50.0, 50.0), Some(Direction::Down));
    assert_eq!(decode_swipe(50.0, -50.0), Some(Direction::Up));
}

#[test]
fn test_swipe_rejects_non_finite() {
    assert_eq!(decode_swipe(f32::NAN, 100.0), None);
    assert_eq!(decode_swipe(f32::INFINITY, 0.0), None);
}

#[test]
fn test_tracker_gesture() {
    let mut swipe = SwipeTracker::new();

    assert!(swipe.start(100.0, 100.0, true));
    assert!(swipe.is_active());

    swipe.track(120.0, 110.0);
    swipe.track(160.0, 90.0);

    assert_eq!(swipe.end(), Some(Direction::Right));
    assert!(!swipe.is_active());
    assert_eq!(swipe.end(), None);
}

#[test]
fn test_tracker_tap_without_movement() {
    let mut swipe = SwipeTracker::new();

    swipe.start(10.0, 10.0, true);
    assert_eq!(swipe.end(), None);

    // a later gesture must not reuse the old coordinates
    swipe.start(300.0, 300.0, true);
    assert_eq!(swipe.end(), None);
}

#[test]
fn test_tracker_refuses_while_busy() {
    let mut swipe = SwipeTracker::new();

    assert!(!swipe.start(0.0, 0.0, false));
    swipe.track(0.0, 200.0);

    assert!(!swipe.is_active());
    assert_eq!(swipe.end(), None);
}

#[test]
fn test_tracker_cancel() {
    let mut swipe = SwipeTracker::new();

    swipe.start(0.0, 0.0, true);
    swipe.track(0.0, -80.0);
    swipe.cancel();

    assert_eq!(swipe.end(), None);
}

#[test]
fn test_commands() {
    assert_eq!("r".parse::<Command>(), Ok(Command::Reset));
    assert_eq!("Restart".parse::<Command>(), Ok(Command::Reset));
    assert_eq!("q".parse::<Command>(), Ok(Command::Quit));
    assert_eq!("menu".parse::<Command>(), Ok(Command::Quit));
    assert_eq!("left".parse::<Command>(), Ok(Command::Move(Direction::Left)));
    assert_eq!(" W ".parse::<Command>(), Ok(Command::Move(Direction::Up)));
    assert_eq!("s".parse::<Command>(), Ok(Command::Move(Direction::Down)));

    let err = "jump".parse::<Command>().unwrap_err();
    assert_eq!(err, "unknown command: jump");
}
