use super::*;

#[test]
fn position_sub_is_component_wise() {
    let a = TilePosition::new(2, 1, 4, 100, 250);
    let b = TilePosition::new(1, 0, 4, 40, 50);
    assert_eq!(a - b, TilePosition::new(1, 1, 0, 60, 200));
}

#[test]
fn position_min_max_are_component_wise() {
    let a = TilePosition::new(0, 3, 1, -20, 500);
    let b = TilePosition::new(1, 0, 2, 10, -700);
    assert_eq!(a.min(b), TilePosition::new(0, 0, 1, -20, -700));
    assert_eq!(a.max(b), TilePosition::new(1, 3, 2, 10, 500));
}

#[test]
fn position_ordering_is_lexicographic() {
    let earlier = TilePosition::new(0, 1, 0, 900, 900);
    let later = TilePosition::new(0, 2, 0, 0, 0);
    assert!(earlier < later);
}

#[test]
fn shape_rejects_zero_axes() {
    assert!(TileShape::new(0, 10).is_err());
    assert!(TileShape::new(10, 0).is_err());
    let shape = TileShape::new(512, 768).unwrap();
    assert_eq!((shape.height, shape.width), (512, 768));
}

#[test]
fn shape_extent_has_singleton_leading_axes() {
    let shape = TileShape::new(2, 3).unwrap();
    assert_eq!(shape.extent(), [1, 1, 1, 2, 3]);
}

#[test]
fn position_serde_roundtrip() {
    let pos = TilePosition::new(1, 2, 3, -40, 50);
    let json = serde_json::to_string(&pos).unwrap();
    assert_eq!(serde_json::from_str::<TilePosition>(&json).unwrap(), pos);
}
