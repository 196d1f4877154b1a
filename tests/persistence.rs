mod common;

use bounce_arena::{persist, Arena, Body, BodyRecord, RestoreError, Rgb, ShapeKind};
use common::{body, record};
use ultraviolet::DVec2;

fn literal() -> BodyRecord {
    BodyRecord {
        position_x: 10.0,
        position_y: 20.0,
        velocity_x: 1.0,
        velocity_y: -1.0,
        acceleration_x: 0.0,
        acceleration_y: 0.0,
        color_r: 255,
        color_g: 0,
        color_b: 0,
        border_thickness: 2.0,
        size: 15.0,
        is_moving: true,
        is_accelerating: false,
        shape: ShapeKind::Square,
        mass: 2.0,
    }
}

#[test]
fn literal_round_trip() {
    let restored = literal().restore().unwrap();
    assert_eq!(restored.pos, DVec2::new(10.0, 20.0));
    assert_eq!(restored.vel, DVec2::new(1.0, -1.0));
    assert_eq!(restored.color, Rgb::new(255, 0, 0));
    assert_eq!(restored.size(), 15.0);
    assert_eq!(restored.shape(), ShapeKind::Square);

    let json = serde_json::to_string(&BodyRecord::from(&restored)).unwrap();
    let again: BodyRecord = serde_json::from_str(&json).unwrap();
    assert_eq!(again, literal());
    assert_eq!(again.restore().unwrap(), restored);
}

#[test]
fn record_uses_persisted_field_names() {
    let value = serde_json::to_value(literal()).unwrap();
    for key in [
        "PositionX",
        "PositionY",
        "VelocityX",
        "VelocityY",
        "AccelerationX",
        "AccelerationY",
        "ColorR",
        "ColorG",
        "ColorB",
        "BorderThickness",
        "Size",
        "IsMoving",
        "IsAccelerating",
        "Type",
        "Mass",
    ] {
        assert!(value.get(key).is_some(), "missing {key}");
    }
    assert_eq!(value["Type"], "Square");
}

#[test]
fn random_bodies_round_trip_exactly() {
    let mut rng = fastrand::Rng::with_seed(21);
    for shape in ShapeKind::ALL {
        let mut b = Body::random(DVec2::new(123.0, 456.0), shape, &mut rng);
        b.toggle_acceleration(&mut rng);
        b.set_moving(false);
        let json = serde_json::to_string(&BodyRecord::from(&b)).unwrap();
        let back: BodyRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back.restore().unwrap(), b);
    }
}

#[test]
fn non_positive_size_or_mass_is_rejected() {
    let mut r = literal();
    r.size = 0.0;
    assert!(matches!(
        r.restore(),
        Err(RestoreError::NonPositive { field: "Size", .. })
    ));

    let mut r = literal();
    r.mass = -2.0;
    assert!(matches!(
        r.restore(),
        Err(RestoreError::NonPositive { field: "Mass", .. })
    ));
}

#[test]
fn negative_border_is_rejected() {
    let mut r = literal();
    r.border_thickness = -0.5;
    assert!(matches!(r.restore(), Err(RestoreError::Negative { .. })));

    r.border_thickness = 0.0;
    assert!(r.restore().is_ok());
}

#[test]
fn color_out_of_range_is_rejected() {
    let mut r = literal();
    r.color_g = 256;
    assert!(matches!(
        r.restore(),
        Err(RestoreError::ColorOutOfRange { channel: "ColorG", value: 256 })
    ));
}

#[test]
fn non_finite_fields_are_rejected() {
    let mut r = literal();
    r.velocity_y = f64::NAN;
    assert!(matches!(
        r.restore(),
        Err(RestoreError::NonFinite { field: "VelocityY" })
    ));

    let mut r = literal();
    r.size = f64::INFINITY;
    assert!(matches!(r.restore(), Err(RestoreError::NonFinite { field: "Size" })));
}

#[test]
fn missing_field_is_malformed() {
    let mut value = serde_json::to_value(literal()).unwrap();
    value.as_object_mut().unwrap().remove("Mass");
    let json = format!("[{value}]");
    assert!(matches!(
        persist::population_from_json(&json),
        Err(RestoreError::Malformed(_))
    ));
}

#[test]
fn unknown_shape_is_malformed() {
    let mut value = serde_json::to_value(literal()).unwrap();
    value["Type"] = "Pentagon".into();
    let json = format!("[{value}]");
    assert!(matches!(
        persist::population_from_json(&json),
        Err(RestoreError::Malformed(_))
    ));
}

#[test]
fn population_keeps_slot_layout_on_save() {
    let mut arena = Arena::with_capacity(800, 600, 3);
    let first = arena.add(body(100.0, 100.0, 1.0, 0.0, 10.0, 2.0)).unwrap();
    arena.add(body(200.0, 100.0, 0.0, 1.0, 10.0, 2.0));
    arena.remove(first);

    let value: serde_json::Value = serde_json::from_str(&arena.to_json().unwrap()).unwrap();
    let slots = value.as_array().unwrap();
    assert_eq!(slots.len(), 3);
    assert!(slots[0].is_null());
    assert_eq!(slots[1]["PositionX"], 200.0);
    assert!(slots[2].is_null());
}

#[test]
fn load_compacts_into_leading_slots() {
    let mut source = Arena::with_capacity(800, 600, 3);
    let id = source.add(body(100.0, 100.0, 1.0, 0.0, 10.0, 2.0)).unwrap();
    source.add(body(200.0, 100.0, 0.0, 1.0, 11.0, 3.0));
    source.remove(id);
    let json = source.to_json().unwrap();

    let mut target = Arena::new(800, 600);
    target.populate(&mut bounce_arena::utils::rng_from_seed(Some(1)), ShapeKind::Circle);
    assert_eq!(target.load_json(&json).unwrap(), 1);

    assert_eq!(target.len(), 1);
    assert_eq!(target.body_at(0), source.body_at(1));
}

#[test]
fn load_overflow_is_dropped() {
    let mut source = Arena::with_capacity(800, 600, 4);
    for i in 0..4 {
        source.add(body(100.0 + 50.0 * i as f64, 100.0, 0.0, 0.0, 10.0, 2.0));
    }

    let mut target = Arena::with_capacity(800, 600, 2);
    assert_eq!(target.load_json(&source.to_json().unwrap()).unwrap(), 2);
    assert!(target.is_full());
    assert_eq!(target.body_at(1), source.body_at(1));
}

#[test]
fn failed_load_leaves_arena_untouched() {
    let mut arena = Arena::with_capacity(800, 600, 2);
    arena.add(body(100.0, 100.0, 1.0, 0.0, 10.0, 2.0));

    let mut bad = record(300.0, 100.0, 0.0, 0.0, 10.0, 2.0);
    bad.size = -1.0;
    let good = record(400.0, 100.0, 0.0, 0.0, 10.0, 2.0);
    let json = serde_json::to_string(&vec![Some(good), None, Some(bad)]).unwrap();

    assert!(arena.load_json(&json).is_err());
    assert_eq!(arena.len(), 1);
    assert_eq!(arena.body_at(0).unwrap().pos, DVec2::new(100.0, 100.0));
}

#[test]
fn file_round_trip() {
    let mut arena = Arena::new(800, 600);
    arena.populate(&mut bounce_arena::utils::rng_from_seed(Some(8)), ShapeKind::Triangle);
    for _ in 0..10 {
        arena.update();
    }

    let path = std::env::temp_dir().join(format!("bounce_arena_save_{}.json", std::process::id()));
    arena.save_to_file(&path).unwrap();

    let mut restored = Arena::new(800, 600);
    assert_eq!(restored.load_from_file(&path).unwrap(), 20);
    std::fs::remove_file(&path).unwrap();

    let original: Vec<_> = arena.slots().collect();
    let loaded: Vec<_> = restored.slots().collect();
    assert_eq!(original, loaded);
}

#[test]
fn missing_file_is_io_error() {
    let mut arena = Arena::new(800, 600);
    assert!(matches!(
        arena.load_from_file("/definitely/not/here.json"),
        Err(RestoreError::Io(_))
    ));
}
