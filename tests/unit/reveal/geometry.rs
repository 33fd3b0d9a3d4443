use super::*;

const CANVAS: Canvas = Canvas {
    width: 300,
    height: 300,
};

const B: Bounds = Bounds {
    xmin: 40,
    xmax: 100,
    ymin: 20,
    ymax: 90,
};

#[test]
fn sweep_groups_directions() {
    use Direction::*;
    assert_eq!(LeftToRight.sweep(), Sweep::Rightwards);
    for d in [DownRight, Down, DownLeft] {
        assert_eq!(d.sweep(), Sweep::Downwards);
    }
    assert_eq!(RightToLeft.sweep(), Sweep::Leftwards);
    for d in [UpLeft, Up, UpRight] {
        assert_eq!(d.sweep(), Sweep::Upwards);
    }
}

#[test]
fn clip_rects_per_sweep() {
    assert_eq!(
        Sweep::Rightwards.reveal(B, 5, CANVAS).clip,
        ClipRect::new(0, 0, 45, 300)
    );
    assert_eq!(
        Sweep::Downwards.reveal(B, 5, CANVAS).clip,
        ClipRect::new(0, 0, 300, 25)
    );
    assert_eq!(
        Sweep::Leftwards.reveal(B, 5, CANVAS).clip,
        ClipRect::new(95, 0, 300, 300)
    );
    assert_eq!(
        Sweep::Upwards.reveal(B, 5, CANVAS).clip,
        ClipRect::new(0, 85, 300, 300)
    );
}

#[test]
fn completion_thresholds() {
    assert!(!Sweep::Rightwards.reveal(B, 59, CANVAS).complete);
    assert!(Sweep::Rightwards.reveal(B, 60, CANVAS).complete);
    assert!(!Sweep::Downwards.reveal(B, 69, CANVAS).complete);
    assert!(Sweep::Downwards.reveal(B, 70, CANVAS).complete);
    assert!(!Sweep::Leftwards.reveal(B, 59, CANVAS).complete);
    assert!(Sweep::Leftwards.reveal(B, 60, CANVAS).complete);
    assert!(!Sweep::Upwards.reveal(B, 69, CANVAS).complete);
    assert!(Sweep::Upwards.reveal(B, 70, CANVAS).complete);

    for sweep in [
        Sweep::Rightwards,
        Sweep::Downwards,
        Sweep::Leftwards,
        Sweep::Upwards,
    ] {
        let n = sweep.ticks_to_complete(B);
        assert!(sweep.reveal(B, n, CANVAS).complete);
        assert!(!sweep.reveal(B, n - 1, CANVAS).complete);
    }
}

#[test]
fn reveal_is_pure() {
    let a = Sweep::Leftwards.reveal(B, 17, CANVAS);
    let b = Sweep::Leftwards.reveal(B, 17, CANVAS);
    assert_eq!(a, b);
}

#[test]
fn left_to_right_front_is_monotonic_and_completes_once() {
    let mut last_right = i32::MIN;
    let mut completions = 0;
    let mut first_complete = None;
    for progress in 0..=100 {
        let r = Sweep::Rightwards.reveal(B, progress, CANVAS);
        assert!(r.clip.right() >= last_right);
        last_right = r.clip.right();
        if r.complete && first_complete.is_none() {
            first_complete = Some(progress);
            completions += 1;
            assert_eq!(r.clip.right(), B.xmax);
        }
    }
    assert_eq!(completions, 1);
    assert_eq!(first_complete, Some(60));
}

#[test]
fn scenario_first_stroke_progress_one_to_ten() {
    let strokes = crate::stroke::parse::parse_strokes(
        "1N0:0,0,10,0,10,10,0,10#2PR:10,0,20,0,20,20,10,20",
    )
    .unwrap();
    let s0 = &strokes[0];
    for progress in 1..=10u32 {
        let r = reveal_stroke(s0, progress, CANVAS);
        assert_eq!(r.clip, ClipRect::new(0, 0, progress as i32, 300));
        assert_eq!(r.complete, progress == 10);
    }
}

#[test]
fn degenerate_stroke_completes_on_first_tick() {
    let point = Bounds {
        xmin: 7,
        xmax: 7,
        ymin: 7,
        ymax: 7,
    };
    assert_eq!(Sweep::Upwards.ticks_to_complete(point), 1);
    assert!(Sweep::Upwards.reveal(point, 1, CANVAS).complete);
}
