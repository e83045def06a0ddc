// Threshold mapping and level validation.

use minefield::{level_for, Level, LevelError, Thresholds};

#[test]
fn default_thresholds_match_game_settings() {
    let t = Thresholds::default();
    assert_eq!(t, Thresholds::new(16.0, 8.0, 5.0, 3.0));
}

#[test]
fn level_for_concrete_distances() {
    let t = Thresholds::new(16.0, 8.0, 5.0, 3.0);
    let cases = [
        (20.0, 0),
        (10.0, 1),
        (6.0, 2),
        (4.0, 3),
        (1.0, 4),
        (8.0, 2),
        (16.0, 1),
        (3.0, 4),
        (0.0, 4),
    ];
    for (distance, expected) in cases {
        assert_eq!(
            t.level_for(distance).get(),
            expected,
            "distance {distance} should map to level {expected}"
        );
        assert_eq!(level_for(distance, 16.0, 8.0, 5.0, 3.0).get(), expected);
    }
}

#[test]
fn level_for_is_non_increasing_in_distance() {
    let t = Thresholds::default();
    let mut prev = t.level_for(-1.0);
    let mut d = -1.0;
    while d < 25.0 {
        let level = t.level_for(d);
        assert!(level <= prev, "level rose from {prev} to {level} at {d}");
        prev = level;
        d += 0.125;
    }
    assert_eq!(prev, Level::OFF);
}

#[test]
fn level_for_nan_and_infinity_are_off() {
    let t = Thresholds::default();
    assert_eq!(t.level_for(f64::NAN), Level::OFF);
    assert_eq!(t.level_for(f64::INFINITY), Level::OFF);
    assert_eq!(t.level_for(f64::NEG_INFINITY), Level::MAX);
}

#[test]
fn unordered_thresholds_still_count_each_one() {
    // red wider than yellow: 4.0 meets blue, green and red only
    let t = Thresholds::new(16.0, 8.0, 3.0, 5.0);
    assert_eq!(t.level_for(4.0).get(), 3);
    assert_eq!(t.lit(4.0), [true, true, false, true]);
}

#[test]
fn lit_follows_each_threshold() {
    let t = Thresholds::default();
    assert_eq!(t.lit(20.0), [false; 4]);
    assert_eq!(t.lit(6.0), [true, true, false, false]);
    assert_eq!(t.lit(3.0), [true; 4]);
}

#[test]
fn level_accepts_integers_in_range() {
    for raw in 0..=4i64 {
        assert_eq!(Level::try_from(raw).map(Level::get), Ok(raw as u8));
    }
    assert_eq!(Level::try_from(4u8), Ok(Level::MAX));
    assert_eq!(Level::try_from(0usize), Ok(Level::OFF));
    assert_eq!(Level::try_from(2.0f64).map(u8::from), Ok(2));
}

#[test]
fn level_rejects_out_of_range() {
    assert_eq!(Level::try_from(5), Err(LevelError::OutOfRange(5)));
    assert_eq!(Level::try_from(-1), Err(LevelError::OutOfRange(-1)));
    assert_eq!(Level::try_from(7.0), Err(LevelError::OutOfRange(7)));
}

#[test]
fn out_of_range_reports_the_value_given() {
    assert_eq!(
        Level::try_from(u64::MAX),
        Err(LevelError::OutOfRange(u64::MAX as i128))
    );
    assert_eq!(
        Level::try_from(i64::MIN),
        Err(LevelError::OutOfRange(i64::MIN as i128))
    );
    assert_eq!(
        Level::try_from(usize::MAX),
        Err(LevelError::OutOfRange(usize::MAX as i128))
    );
    assert_eq!(
        LevelError::OutOfRange(u64::MAX as i128).to_string(),
        "level must be between 0 and 4, got 18446744073709551615"
    );
}

#[test]
fn level_from_f32() {
    assert_eq!(Level::try_from(2.0f32), Ok(Level::try_from(2).unwrap()));
    assert_eq!(Level::try_from(0.0f32), Ok(Level::OFF));
    assert_eq!(Level::try_from(2.5f32), Err(LevelError::NotInteger(2.5)));
    assert_eq!(Level::try_from(9.0f32), Err(LevelError::OutOfRange(9)));
    assert!(matches!(
        Level::try_from(f32::NAN),
        Err(LevelError::NotInteger(_))
    ));
}

#[test]
fn level_rejects_non_integers() {
    assert_eq!(Level::try_from(2.5), Err(LevelError::NotInteger(2.5)));
    assert!(matches!(
        Level::try_from(f64::NAN),
        Err(LevelError::NotInteger(_))
    ));
    assert!(matches!(
        Level::try_from(f64::INFINITY),
        Err(LevelError::NotInteger(_))
    ));
}

#[test]
fn level_errors_read_clearly() {
    assert_eq!(
        LevelError::OutOfRange(5).to_string(),
        "level must be between 0 and 4, got 5"
    );
    assert_eq!(
        LevelError::NotInteger(2.5).to_string(),
        "level must be an integer, got 2.5"
    );
}
