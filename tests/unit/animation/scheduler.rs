use super::*;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

const SCENARIO: &str = "1N0:0,0,10,0,10,10,0,10#2PR:10,0,20,0,20,20,10,20";

fn anim(desc: &str) -> StrokeAnimation {
    StrokeAnimation::new(
        Character::from_description(desc).unwrap(),
        AnimationOpts::default(),
    )
    .unwrap()
}

struct Clock {
    now: Instant,
    step: Duration,
}

impl Clock {
    fn new() -> Self {
        Self {
            now: Instant::now(),
            step: Duration::from_millis(8),
        }
    }

    fn tick(&mut self, a: &mut StrokeAnimation) -> TickOutcome {
        self.now += self.step;
        a.tick_at(self.now)
    }
}

#[test]
fn initial_state() {
    let a = anim(SCENARIO);
    assert_eq!(a.state(), AnimationState::default());
    assert_eq!(a.phase(), AnimationPhase::Idle);
    assert_eq!(a.character().revealed_count(), 0);
}

#[test]
fn first_stroke_completes_at_progress_ten() {
    let mut a = anim(SCENARIO);
    let mut clock = Clock::new();
    for p in 1..10 {
        assert_eq!(
            clock.tick(&mut a),
            TickOutcome::Advanced {
                stroke: 0,
                progress: p
            }
        );
    }
    assert_eq!(clock.tick(&mut a), TickOutcome::StrokeCompleted { stroke: 0 });
    assert!(a.character().strokes()[0].revealed());
    assert_eq!(a.state().current_stroke_index, 1);
    assert_eq!(a.state().progress, 0);
    assert!(!a.state().pending_pause);
}

#[test]
fn every_tick_requests_one_redraw() {
    let count = Arc::new(AtomicUsize::new(0));
    let c = Arc::clone(&count);
    let mut a = anim(SCENARIO).with_redraw(move || {
        c.fetch_add(1, Ordering::SeqCst);
    });
    let mut clock = Clock::new();
    for _ in 0..200 {
        clock.tick(&mut a);
    }
    assert_eq!(count.load(Ordering::SeqCst), 200);

    a.close();
    assert_eq!(clock.tick(&mut a), TickOutcome::Closed);
    assert_eq!(count.load(Ordering::SeqCst), 200);
    assert_eq!(a.ticks(), 200);
}

#[test]
fn full_cycle_restarts_and_clears_flags() {
    let mut a = anim(SCENARIO);
    let mut clock = Clock::new();

    let mut restarted = false;
    for _ in 0..10 + 20 {
        let out = clock.tick(&mut a);
        if out == TickOutcome::CycleRestarted {
            restarted = true;
        }
    }
    assert!(restarted);
    assert_eq!(a.state().current_stroke_index, 0);
    assert_eq!(a.state().progress, 0);
    assert_eq!(a.character().revealed_count(), 0);
    assert_eq!(a.cycles_completed(), 1);
    // Second stroke pauses after itself, so the new cycle begins with a pause.
    assert!(a.state().pending_pause);
}

#[test]
fn loops_indefinitely() {
    let mut a = anim("1NO:0,0,3,0#3NO:0,0,0,2");
    let mut clock = Clock::new();
    for _ in 0..50 {
        clock.tick(&mut a);
    }
    // 3 + 2 ticks per cycle.
    assert_eq!(a.cycles_completed(), 10);
    assert!(a.state().current_stroke_index < a.character().len());
}

#[test]
fn pause_after_delays_next_stroke() {
    let mut a = anim("2PO:0,0,0,4#1NO:0,0,5,0#3NO:9,0,9,3");
    let mut clock = Clock::new();

    for _ in 0..3 {
        clock.tick(&mut a);
    }
    assert_eq!(clock.tick(&mut a), TickOutcome::StrokeCompleted { stroke: 0 });
    let completed_at = clock.now;
    assert!(a.state().pending_pause);

    assert_eq!(clock.tick(&mut a), TickOutcome::Paused);
    assert!(!a.state().pending_pause);
    assert!(matches!(a.phase(), AnimationPhase::Paused { .. }));
    assert!(a.pause_remaining(clock.now).is_some());

    let resumed_at = loop {
        match clock.tick(&mut a) {
            TickOutcome::Paused => continue,
            TickOutcome::Advanced { stroke: 1, progress: 1 } => break clock.now,
            other => panic!("unexpected outcome {other:?}"),
        }
    };
    assert!(resumed_at - completed_at >= a.opts().pause());

    // Stroke 1 has no pause flag: stroke 2 starts on the very next tick after completion.
    for _ in 0..3 {
        clock.tick(&mut a);
    }
    assert_eq!(clock.tick(&mut a), TickOutcome::StrokeCompleted { stroke: 1 });
    assert_eq!(
        clock.tick(&mut a),
        TickOutcome::Advanced {
            stroke: 2,
            progress: 1
        }
    );
}

#[test]
fn snapshot_and_view_agree() {
    let mut a = anim(SCENARIO);
    let mut clock = Clock::new();
    for _ in 0..12 {
        clock.tick(&mut a);
    }
    let snap = a.snapshot();
    assert_eq!(snap.current_stroke, 1);
    assert_eq!(snap.progress, 2);
    assert_eq!(snap.tick, 12);
    let view = a.view();
    assert_eq!(view.current_stroke, snap.view().current_stroke);
    assert_eq!(view.strokes, snap.view().strokes);
}

#[test]
fn invalid_opts_are_rejected() {
    let opts = AnimationOpts {
        tick_interval_ms: 0,
        ..AnimationOpts::default()
    };
    let ch = Character::from_description(SCENARIO).unwrap();
    assert!(StrokeAnimation::new(ch, opts).is_err());
}
