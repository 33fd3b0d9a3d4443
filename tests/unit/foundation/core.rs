use super::*;

#[test]
fn canvas_rejects_zero_and_oversized_sides() {
    assert!(Canvas::new(0, 10).is_err());
    assert!(Canvas::new(10, 70_000).is_err());
    let c = Canvas::new(300, 200).unwrap();
    assert_eq!((c.w(), c.h()), (300, 200));
    assert_eq!(Canvas::default(), Canvas::new(300, 300).unwrap());
}

#[test]
fn clip_rect_edges_and_kurbo_conversion() {
    let r = ClipRect::new(5, 0, 10, 300);
    assert_eq!(r.right(), 15);
    assert_eq!(r.bottom(), 300);
    assert_eq!(r.to_rect(), Rect::new(5.0, 0.0, 15.0, 300.0));
    assert!(r.contains(StrokePoint::new(5, 0)));
    assert!(!r.contains(StrokePoint::new(15, 0)));
}

#[test]
fn rgb_quantizes_and_clamps() {
    assert_eq!(Rgb::RED.to_rgba8(), [255, 0, 0, 255]);
    assert_eq!(Rgb::gray(0.5).to_rgba8(), [128, 128, 128, 255]);
    assert_eq!(Rgb::new(2.0, -1.0, 0.0).to_rgba8(), [255, 0, 0, 255]);
}

#[test]
fn rgb_serializes_as_triplet() {
    let json = serde_json::to_string(&Rgb::RED).unwrap();
    assert_eq!(json, "[1.0,0.0,0.0]");
    let back: Rgb = serde_json::from_str("[0.5,0.5,0.5]").unwrap();
    assert_eq!(back, Rgb::gray(0.5));
}
