use super::*;

fn solid(width: u32, height: u32, rgba: [u8; 4]) -> FrameRGBA {
    FrameRGBA {
        width,
        height,
        data: rgba.repeat((width * height) as usize),
        premultiplied: true,
    }
}

fn cfg(width: u32, height: u32) -> SinkConfig {
    SinkConfig {
        width,
        height,
        frame_delay: Duration::from_millis(40),
    }
}

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("strokeorder_sink_{name}_{}", std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    dir
}

#[test]
fn in_memory_sink_keeps_order_and_config() {
    let mut sink = InMemorySink::new();
    sink.begin(cfg(2, 2)).unwrap();
    sink.push_frame(0, &solid(2, 2, [0, 0, 0, 255])).unwrap();
    sink.push_frame(1, &solid(2, 2, [255, 0, 0, 255])).unwrap();
    sink.end().unwrap();
    assert_eq!(sink.config().unwrap().width, 2);
    let idx: Vec<u64> = sink.frames().iter().map(|(i, _)| *i).collect();
    assert_eq!(idx, vec![0, 1]);
}

#[test]
fn png_sequence_writes_numbered_files() {
    let dir = scratch_dir("png");
    let mut sink = PngSequenceSink::new(&dir, "frame");
    sink.begin(cfg(3, 2)).unwrap();
    sink.push_frame(0, &solid(3, 2, [255, 255, 255, 255])).unwrap();
    sink.push_frame(1, &solid(3, 2, [255, 0, 0, 255])).unwrap();
    sink.end().unwrap();

    assert_eq!(sink.written().len(), 2);
    let second = dir.join("frame_00001.png");
    assert!(second.is_file());
    let img = image::open(&second).unwrap().to_rgba8();
    assert_eq!(img.dimensions(), (3, 2));
    assert_eq!(img.get_pixel(0, 0).0, [255, 0, 0, 255]);
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn size_mismatch_and_missing_begin_are_errors() {
    let dir = scratch_dir("mismatch");
    let mut sink = PngSequenceSink::new(&dir, "f");
    assert!(sink.push_frame(0, &solid(3, 2, [0; 4])).is_err());
    sink.begin(cfg(3, 2)).unwrap();
    let err = sink.push_frame(0, &solid(2, 2, [0; 4])).unwrap_err();
    assert!(err.to_string().contains("render error:"));
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn gif_sink_writes_animated_gif() {
    let dir = scratch_dir("gif");
    let path = dir.join("anim.gif");
    let mut sink = GifSink::new(&path);
    sink.begin(cfg(4, 4)).unwrap();
    for (i, c) in [[0, 0, 0, 255], [255, 0, 0, 255], [255, 255, 255, 255]]
        .into_iter()
        .enumerate()
    {
        sink.push_frame(i as u64, &solid(4, 4, c)).unwrap();
    }
    sink.end().unwrap();

    let bytes = std::fs::read(&path).unwrap();
    assert!(bytes.starts_with(b"GIF89a"));
    let _ = std::fs::remove_dir_all(&dir);
}
