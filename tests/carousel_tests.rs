use std::time::Duration;

use tabtint::carousel::{AUTO_ADVANCE_INTERVAL, AutoAdvance, Carousel};
use tabtint::schedule::{Scheduler, TimerHandle, VirtualClock};

fn outcome(slides: usize, clock: &mut VirtualClock) -> Carousel {
    Carousel::new("outcome", slides, true, &AutoAdvance::default(), clock).unwrap()
}

/// Fire due timers the way a page would, routing them to `carousel`.
fn run_for(carousel: &mut Carousel, clock: &mut VirtualClock, by: Duration) {
    let deadline = clock.now() + by;
    while let Some(fired) = clock.pop_due(deadline) {
        if carousel.timer() == Some(fired.handle) {
            carousel.next(clock);
        }
    }
    clock.set_now(deadline);
}

#[test]
fn test_zero_slides_yields_no_carousel() {
    let mut clock = VirtualClock::new();
    assert!(Carousel::new("outcome", 0, true, &AutoAdvance::default(), &mut clock).is_none());
    assert_eq!(clock.pending(), 0);
}

#[test]
fn test_new_carousel_starts_at_first_slide_with_one_timer() {
    let mut clock = VirtualClock::new();
    let carousel = outcome(4, &mut clock);
    assert_eq!(carousel.current(), 0);
    assert_eq!(carousel.len(), 4);
    assert!(carousel.auto_advances());
    assert_eq!(clock.pending_for("outcome"), 1);
}

#[test]
fn test_next_and_prev_wrap() {
    let mut clock = VirtualClock::new();
    let mut carousel = outcome(3, &mut clock);

    assert_eq!(carousel.prev(&mut clock).current, 2);
    assert_eq!(carousel.next(&mut clock).current, 0);
    assert_eq!(carousel.next(&mut clock).current, 1);
    assert_eq!(carousel.next(&mut clock).current, 2);
    assert_eq!(carousel.next(&mut clock).current, 0);
}

#[test]
fn test_go_to_slide_wraps_out_of_range() {
    let mut clock = VirtualClock::new();
    let mut carousel = outcome(4, &mut clock);

    assert_eq!(carousel.go_to_slide(2, &mut clock).current, 2);
    assert_eq!(carousel.go_to_slide(4, &mut clock).current, 0);
    assert_eq!(carousel.go_to_slide(-1, &mut clock).current, 3);
    assert_eq!(carousel.go_to_slide(99, &mut clock).current, 0);
    assert_eq!(carousel.go_to_slide(-7, &mut clock).current, 3);
}

#[test]
fn test_single_slide_transition_still_resets_timer() {
    let mut clock = VirtualClock::new();
    let mut carousel = outcome(1, &mut clock);
    let before = carousel.timer().unwrap();

    let view = carousel.go_to_slide(0, &mut clock);
    assert_eq!(view.current, 0);

    let after = carousel.timer().unwrap();
    assert_ne!(before, after);
    assert_eq!(clock.pending_for("outcome"), 1);
}

#[test]
fn test_every_transition_keeps_exactly_one_timer() {
    let mut clock = VirtualClock::new();
    let mut carousel = outcome(5, &mut clock);

    for n in [3, -1, 8, 0, 2] {
        carousel.go_to_slide(n, &mut clock);
        carousel.next(&mut clock);
        carousel.prev(&mut clock);
        assert_eq!(clock.pending(), 1);
    }
}

#[test]
fn test_auto_advance_fires_every_interval() {
    let mut clock = VirtualClock::new();
    let mut carousel = outcome(3, &mut clock);

    run_for(&mut carousel, &mut clock, AUTO_ADVANCE_INTERVAL);
    assert_eq!(carousel.current(), 1);

    run_for(&mut carousel, &mut clock, AUTO_ADVANCE_INTERVAL * 2);
    assert_eq!(carousel.current(), 0);
}

#[test]
fn test_manual_navigation_restarts_countdown() {
    let mut clock = VirtualClock::new();
    let mut carousel = outcome(3, &mut clock);

    run_for(&mut carousel, &mut clock, Duration::from_millis(4000));
    assert_eq!(carousel.current(), 0);

    carousel.next(&mut clock);
    run_for(&mut carousel, &mut clock, Duration::from_millis(4000));
    assert_eq!(carousel.current(), 1, "countdown should restart on manual move");

    run_for(&mut carousel, &mut clock, Duration::from_millis(1000));
    assert_eq!(carousel.current(), 2);
}

#[test]
fn test_other_regions_never_schedule() {
    let mut clock = VirtualClock::new();
    let mut gallery =
        Carousel::new("gallery", 3, true, &AutoAdvance::default(), &mut clock).unwrap();
    assert!(!gallery.auto_advances());
    assert_eq!(clock.pending(), 0);

    gallery.next(&mut clock);
    gallery.go_to_slide(-1, &mut clock);
    assert_eq!(clock.pending(), 0);
    assert!(gallery.timer().is_none());
}

#[test]
fn test_custom_policy_region_and_interval() {
    let mut clock = VirtualClock::new();
    let policy = AutoAdvance {
        region: "gallery".to_string(),
        interval: Duration::from_millis(250),
    };
    let mut gallery = Carousel::new("gallery", 2, false, &policy, &mut clock).unwrap();
    let outcome = Carousel::new("outcome", 2, true, &policy, &mut clock).unwrap();
    assert!(!outcome.auto_advances());

    run_for(&mut gallery, &mut clock, Duration::from_millis(250));
    assert_eq!(gallery.current(), 1);
}

/// Scheduler that records every call.
#[derive(Default)]
struct RecordingScheduler {
    calls: Vec<String>,
    next: u64,
}

impl Scheduler for RecordingScheduler {
    fn schedule_repeating(&mut self, region: &str, interval: Duration) -> TimerHandle {
        self.next += 1;
        self.calls
            .push(format!("schedule {region} {}", interval.as_millis()));
        TimerHandle(self.next)
    }

    fn cancel(&mut self, handle: TimerHandle) {
        self.calls.push(format!("cancel {}", handle.0));
    }
}

#[test]
fn test_transition_cancels_before_rescheduling() {
    let mut scheduler = RecordingScheduler::default();
    let mut carousel =
        Carousel::new("outcome", 2, true, &AutoAdvance::default(), &mut scheduler).unwrap();
    carousel.next(&mut scheduler);

    assert_eq!(
        scheduler.calls,
        vec!["schedule outcome 5000", "cancel 1", "schedule outcome 5000"]
    );
}
