use super::*;

fn frame(data: Vec<u8>, premultiplied: bool) -> FrameRGBA {
    FrameRGBA {
        width: 2,
        height: 1,
        data,
        premultiplied,
    }
}

#[test]
fn pixel_lookup_is_bounds_checked() {
    let f = frame(vec![1, 2, 3, 4, 5, 6, 7, 8], true);
    assert_eq!(f.pixel(1, 0), Some([5, 6, 7, 8]));
    assert_eq!(f.pixel(2, 0), None);
    assert_eq!(f.pixel(0, 1), None);
}

#[test]
fn unpremultiply_restores_straight_channels() {
    let f = frame(vec![64, 0, 32, 128, 10, 20, 30, 255], true);
    let s = f.to_straight_rgba8();
    assert_eq!(&s[..4], &[128, 0, 64, 128]);
    assert_eq!(&s[4..], &[10, 20, 30, 255]);

    let f = frame(vec![64, 0, 32, 128, 0, 0, 0, 0], false);
    assert_eq!(f.to_straight_rgba8(), f.data);
}
