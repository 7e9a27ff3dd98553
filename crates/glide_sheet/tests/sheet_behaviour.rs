//! Integration tests for the bottom sheet
//!
//! These drive a mounted `Sheet` the way a host event loop would:
//! - drag and scroll reports arbitrate between sheet and content
//! - open/close requests settle exactly on their rest positions
//! - transition callbacks fire once per completed transition
//! - the page scroll lock follows the fully open position

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use glide_core::{Event, Size};
use glide_sheet::prelude::*;
use glide_sheet::{targets, SheetConfig};

const FRAME: f32 = 1.0 / 60.0;
const HEIGHT: f32 = 400.0;

#[derive(Clone, Default)]
struct Recorder {
    opened: Arc<AtomicUsize>,
    closed: Arc<AtomicUsize>,
    rewinds: Arc<AtomicUsize>,
}

impl Recorder {
    fn opened(&self) -> usize {
        self.opened.load(Ordering::SeqCst)
    }

    fn closed(&self) -> usize {
        self.closed.load(Ordering::SeqCst)
    }

    fn rewinds(&self) -> usize {
        self.rewinds.load(Ordering::SeqCst)
    }

    fn builder(&self) -> SheetBuilder {
        let opened = self.opened.clone();
        let closed = self.closed.clone();
        glide_sheet::sheet()
            .content(RecordingScroller(self.rewinds.clone()))
            .on_open_transition_end(move || {
                opened.fetch_add(1, Ordering::SeqCst);
            })
            .on_close_transition_end(move || {
                closed.fetch_add(1, Ordering::SeqCst);
            })
    }
}

struct RecordingScroller(Arc<AtomicUsize>);

impl ContentScroller for RecordingScroller {
    fn scroll_to_top(&mut self) {
        self.0.fetch_add(1, Ordering::SeqCst);
    }
}

fn dims(height: f32) -> SharedDimensions {
    SharedDimensions::new(Size::new(390.0, height))
}

fn mount(initial: Visibility, recorder: &Recorder) -> Sheet {
    recorder.builder().initial(initial).mount(dims(HEIGHT))
}

/// Tick until the in-flight animation settles, returning the events seen
fn settle(sheet: &mut Sheet) -> Vec<SheetEvent> {
    let mut events = Vec::new();
    for _ in 0..600 {
        events.extend(sheet.tick(FRAME));
        if !sheet.is_animating() {
            break;
        }
    }
    events
}

/// Scroll reports for content that overflows its viewport
fn scroll_to(sheet: &mut Sheet, scroll_top: f32) {
    sheet.on_content_scroll(ScrollMetrics::new(scroll_top, 300.0, 900.0));
}

#[test]
fn test_open_and_close_settle_exactly() {
    let recorder = Recorder::default();
    let mut sheet = mount(Visibility::Hidden, &recorder);
    assert_eq!(sheet.offset(), HEIGHT);

    sheet.open();
    settle(&mut sheet);
    assert_eq!(sheet.offset(), 0.0);

    sheet.close();
    settle(&mut sheet);
    assert_eq!(sheet.offset(), HEIGHT);
}

#[test]
fn test_interleaved_requests_settle_on_last() {
    let recorder = Recorder::default();
    let mut sheet = mount(Visibility::Hidden, &recorder);

    let sequences: [&[Visibility]; 3] = [
        &[Visibility::Visible, Visibility::Hidden, Visibility::Visible],
        &[Visibility::Hidden, Visibility::Visible, Visibility::Hidden],
        &[Visibility::Visible, Visibility::Visible, Visibility::Hidden],
    ];

    for sequence in sequences {
        for (i, target) in sequence.iter().enumerate() {
            match target {
                Visibility::Visible => sheet.open(),
                Visibility::Hidden => sheet.close(),
            }
            for _ in 0..(3 + i * 4) {
                sheet.tick(FRAME);
            }
        }
        settle(&mut sheet);

        let last = sequence[sequence.len() - 1];
        assert_eq!(sheet.animation_target(), last);
        assert_eq!(sheet.offset(), last.resolve(HEIGHT));
    }
}

#[test]
fn test_rapid_handle_requests_converge_on_last() {
    let recorder = Recorder::default();
    let mut sheet = mount(Visibility::Hidden, &recorder);
    let handle = sheet.handle();

    handle.open();
    sheet.tick(FRAME);
    handle.close();
    sheet.tick(FRAME);
    handle.open();
    handle.close();
    handle.open();

    let events = settle(&mut sheet);
    assert_eq!(events, vec![SheetEvent::OpenTransitionEnd]);
    assert_eq!(sheet.offset(), 0.0);
    assert_eq!(recorder.opened(), 1);
    assert_eq!(recorder.closed(), 0);
}

#[test]
fn test_scroll_back_to_top_allows_drag() {
    let recorder = Recorder::default();
    let mut sheet = mount(Visibility::Visible, &recorder);

    for scroll_top in [120.0, 340.0, 80.0, 0.0] {
        scroll_to(&mut sheet, scroll_top);
    }

    assert!(sheet.is_scrollable());
    assert_eq!(sheet.content_edge(), ContentEdge::Top);
    assert!(sheet.drag_allowed());
}

#[test]
fn test_mid_scroll_drag_goes_to_content() {
    let recorder = Recorder::default();
    let mut sheet = mount(Visibility::Visible, &recorder);

    scroll_to(&mut sheet, 200.0);
    assert_eq!(sheet.content_edge(), ContentEdge::InProgress);
    assert!(!sheet.drag_allowed());

    sheet.drag_start();
    sheet.drag_move(-30.0);
    sheet.drag_move(-60.0);
    sheet.drag_end(-60.0, -5.0);

    assert_eq!(sheet.offset(), 0.0);
    assert_eq!(sheet.animation_target(), Visibility::Visible);
}

#[test]
fn test_downward_drag_at_top_revokes_when_scrollable() {
    let recorder = Recorder::default();
    let mut sheet = mount(Visibility::Visible, &recorder);
    scroll_to(&mut sheet, 0.0);
    assert!(sheet.drag_allowed());

    sheet.drag_start();
    sheet.drag_move(10.0);

    assert_eq!(sheet.content_edge(), ContentEdge::InProgress);
    assert!(!sheet.drag_allowed());
    assert_eq!(sheet.offset(), 0.0);

    // Revoked for the rest of the gesture, even past the close distance
    sheet.drag_move(80.0);
    sheet.drag_end(80.0, 0.0);
    assert_eq!(sheet.offset(), 0.0);
    assert_eq!(sheet.animation_target(), Visibility::Visible);
}

#[test]
fn test_downward_drag_at_top_keeps_sheet_when_not_scrollable() {
    let recorder = Recorder::default();
    let mut sheet = mount(Visibility::Visible, &recorder);
    sheet.set_content_size(300.0, 300.5);
    assert!(!sheet.is_scrollable());

    sheet.drag_start();
    sheet.drag_move(10.0);

    assert!(sheet.drag_allowed());
    assert_eq!(sheet.content_edge(), ContentEdge::Top);
    assert_eq!(sheet.offset(), 10.0);
}

#[test]
fn test_upward_drag_at_bottom_revokes_when_scrollable() {
    let recorder = Recorder::default();
    let mut sheet = mount(Visibility::Visible, &recorder);
    scroll_to(&mut sheet, 600.0);
    assert_eq!(sheet.content_edge(), ContentEdge::Bottom);
    assert!(sheet.drag_allowed());

    sheet.drag_start();
    sheet.drag_move(-12.0);
    assert_eq!(sheet.content_edge(), ContentEdge::InProgress);
    assert!(!sheet.drag_allowed());
}

#[test]
fn test_flick_closes_regardless_of_position() {
    let recorder = Recorder::default();
    let mut sheet = mount(Visibility::Visible, &recorder);

    sheet.drag_start();
    sheet.drag_move(5.0);
    sheet.drag_end(5.0, 25.0);
    assert_eq!(sheet.animation_target(), Visibility::Hidden);

    settle(&mut sheet);
    assert_eq!(sheet.offset(), HEIGHT);
    assert_eq!(recorder.closed(), 1);
}

#[test]
fn test_slow_drag_past_close_distance_closes() {
    let recorder = Recorder::default();
    let mut sheet = mount(Visibility::Visible, &recorder);

    sheet.drag_start();
    sheet.drag_move(50.0);
    assert_eq!(sheet.offset(), 50.0);
    sheet.drag_end(50.0, 0.0);

    assert_eq!(sheet.animation_target(), Visibility::Hidden);
    settle(&mut sheet);
    assert_eq!(sheet.offset(), HEIGHT);
}

#[test]
fn test_short_drag_springs_back() {
    let recorder = Recorder::default();
    let mut sheet = mount(Visibility::Visible, &recorder);

    sheet.drag_start();
    sheet.drag_move(40.0);
    sheet.drag_end(40.0, 0.0);

    assert_eq!(sheet.animation_target(), Visibility::Visible);
    settle(&mut sheet);
    assert_eq!(sheet.offset(), 0.0);
    assert_eq!(recorder.closed(), 0);
}

#[test]
fn test_upward_release_past_close_distance_springs_back() {
    let recorder = Recorder::default();
    let mut sheet = mount(Visibility::Visible, &recorder);

    sheet.drag_start();
    sheet.drag_move(120.0);
    sheet.drag_end(120.0, -3.0);

    assert_eq!(sheet.animation_target(), Visibility::Visible);
    settle(&mut sheet);
    assert_eq!(sheet.offset(), 0.0);
}

#[test]
fn test_overdrag_is_bounded() {
    let recorder = Recorder::default();
    let mut sheet = mount(Visibility::Visible, &recorder);

    sheet.drag_start();
    sheet.drag_move(-500.0);
    let max_overdrag = sheet.config().gesture.max_overdrag;
    assert!(sheet.offset() < 0.0);
    assert!(sheet.offset() > -max_overdrag);

    sheet.drag_end(-500.0, 0.0);
    settle(&mut sheet);
    assert_eq!(sheet.offset(), 0.0);
}

#[test]
fn test_drag_cannot_pass_hidden() {
    let recorder = Recorder::default();
    let mut sheet = mount(Visibility::Visible, &recorder);

    sheet.drag_start();
    sheet.drag_move(HEIGHT * 3.0);
    assert_eq!(sheet.offset(), HEIGHT);
}

#[test]
fn test_not_draggable_ignores_gestures() {
    let recorder = Recorder::default();
    let mut sheet = recorder
        .builder()
        .initial(Visibility::Visible)
        .draggable(false)
        .mount(dims(HEIGHT));

    assert!(!sheet.drag_allowed());
    scroll_to(&mut sheet, 0.0);
    assert!(!sheet.drag_allowed());
    assert!(!sheet.is_scrollable());

    sheet.drag_start();
    sheet.drag_move(90.0);
    sheet.drag_end(90.0, 40.0);

    assert_eq!(sheet.offset(), 0.0);
    assert_eq!(sheet.animation_target(), Visibility::Visible);
}

#[test]
fn test_open_fires_only_open_callback() {
    let recorder = Recorder::default();
    let mut sheet = mount(Visibility::Hidden, &recorder);

    sheet.open();
    let events = settle(&mut sheet);

    assert_eq!(events, vec![SheetEvent::OpenTransitionEnd]);
    assert_eq!(recorder.opened(), 1);
    assert_eq!(recorder.closed(), 0);
    assert_eq!(recorder.rewinds(), 0);
}

#[test]
fn test_close_fires_only_close_callback_and_rewinds_content() {
    let recorder = Recorder::default();
    let mut sheet = mount(Visibility::Visible, &recorder);
    scroll_to(&mut sheet, 250.0);

    sheet.close();
    let events = settle(&mut sheet);

    assert_eq!(events, vec![SheetEvent::CloseTransitionEnd]);
    assert_eq!(recorder.opened(), 0);
    assert_eq!(recorder.closed(), 1);
    assert_eq!(recorder.rewinds(), 1);
    assert_eq!(sheet.content_edge(), ContentEdge::Top);
}

#[test]
fn test_settled_sheet_does_not_refire_callbacks() {
    let recorder = Recorder::default();
    let mut sheet = mount(Visibility::Hidden, &recorder);

    sheet.open();
    settle(&mut sheet);
    for _ in 0..120 {
        assert!(sheet.tick(FRAME).is_empty());
    }
    assert_eq!(recorder.opened(), 1);
}

#[test]
fn test_missing_callbacks_are_noops() {
    let mut sheet = glide_sheet::sheet().mount(dims(HEIGHT));
    sheet.open();
    assert_eq!(settle(&mut sheet), vec![SheetEvent::OpenTransitionEnd]);
    sheet.close();
    assert_eq!(settle(&mut sheet), vec![SheetEvent::CloseTransitionEnd]);
}

#[test]
fn test_callback_can_reopen_through_handle() {
    let slot: Arc<Mutex<Option<SheetHandle>>> = Arc::new(Mutex::new(None));
    let callback_slot = slot.clone();

    let mut sheet = glide_sheet::sheet()
        .initial(Visibility::Visible)
        .on_close_transition_end(move || {
            if let Some(handle) = callback_slot.lock().unwrap().as_ref() {
                handle.open();
            }
        })
        .mount(dims(HEIGHT));
    *slot.lock().unwrap() = Some(sheet.handle());

    sheet.close();
    assert_eq!(settle(&mut sheet), vec![SheetEvent::CloseTransitionEnd]);
    assert_eq!(sheet.animation_target(), Visibility::Hidden);

    // The request made inside the callback lands on the next frame
    sheet.tick(FRAME);
    assert_eq!(sheet.animation_target(), Visibility::Visible);
    settle(&mut sheet);
    assert_eq!(sheet.offset(), 0.0);
}

#[test]
fn test_entrance_waits_for_first_paint() {
    let recorder = Recorder::default();
    let mut sheet = recorder
        .builder()
        .initial(Visibility::Visible)
        .animate_on_mount(true)
        .mount(dims(HEIGHT));

    assert_eq!(sheet.offset(), HEIGHT);
    assert!(!sheet.has_played_entrance());
    for _ in 0..10 {
        sheet.tick(FRAME);
    }
    assert_eq!(sheet.offset(), HEIGHT);

    sheet.paint_committed();
    assert!(sheet.has_played_entrance());
    assert!(sheet.is_animating());
    sheet.tick(FRAME);
    assert!(sheet.offset() < HEIGHT);

    settle(&mut sheet);
    assert_eq!(sheet.offset(), 0.0);
    assert_eq!(recorder.opened(), 1);

    // One-shot per mount
    sheet.close();
    settle(&mut sheet);
    sheet.paint_committed();
    assert!(!sheet.is_animating());
    assert_eq!(sheet.offset(), HEIGHT);
}

#[test]
fn test_without_entrance_initial_position_is_immediate() {
    let recorder = Recorder::default();
    let sheet = mount(Visibility::Visible, &recorder);
    assert_eq!(sheet.offset(), 0.0);
    assert!(!sheet.is_animating());
}

#[test]
fn test_backdrop_follows_offset() {
    let recorder = Recorder::default();
    let mut sheet = mount(Visibility::Visible, &recorder);
    assert_eq!(sheet.backdrop().opacity, 1.0);
    assert!(sheet.backdrop().visible);

    sheet.drag_start();
    sheet.drag_move(100.0);
    assert_eq!(sheet.backdrop().opacity, 0.75);
    assert_eq!(sheet.progress(), 0.75);

    sheet.drag_move(HEIGHT);
    assert_eq!(sheet.backdrop().opacity, 0.0);
    assert!(!sheet.backdrop().visible);
}

#[test]
fn test_unmeasured_height_degrades_gracefully() {
    let recorder = Recorder::default();
    let mut sheet = recorder.builder().mount(dims(0.0));

    let backdrop = sheet.backdrop();
    assert_eq!(backdrop.opacity, 1.0);
    assert!(!sheet.progress().is_nan());

    sheet.open();
    assert_eq!(settle(&mut sheet), vec![SheetEvent::OpenTransitionEnd]);
    sheet.close();
    assert_eq!(settle(&mut sheet), vec![SheetEvent::CloseTransitionEnd]);

    let nan = recorder.builder().mount(dims(f32::NAN));
    assert_eq!(nan.height(), 0.0);
    assert_eq!(nan.backdrop().opacity, 1.0);
}

#[test]
fn test_hidden_sheet_tracks_resize() {
    let recorder = Recorder::default();
    let dims = dims(HEIGHT);
    let mut sheet = recorder.builder().mount(dims.clone());

    dims.set_height(520.0);
    sheet.remeasure();
    assert_eq!(sheet.offset(), 520.0);

    sheet.open();
    settle(&mut sheet);
    dims.set_height(300.0);
    assert!(sheet.handle_event(&Event::resize(targets::SURFACE, 390.0, 300.0)));
    assert_eq!(sheet.offset(), 0.0);

    sheet.close();
    settle(&mut sheet);
    assert_eq!(sheet.offset(), 300.0);
}

#[test]
fn test_backdrop_press_closes_when_enabled() {
    let recorder = Recorder::default();
    let mut sheet = mount(Visibility::Visible, &recorder);
    sheet.backdrop_pressed();
    assert_eq!(sheet.animation_target(), Visibility::Hidden);

    let mut sticky = recorder
        .builder()
        .initial(Visibility::Visible)
        .dismiss_on_backdrop(false)
        .mount(dims(HEIGHT));
    sticky.backdrop_pressed();
    assert_eq!(sticky.animation_target(), Visibility::Visible);
}

#[test]
fn test_page_scroll_lock_follows_open_position() {
    let lock = PageScrollLock::new();
    let recorder = Recorder::default();
    let mut sheet = recorder
        .builder()
        .name("details")
        .page_scroll_lock(lock.clone())
        .mount(dims(HEIGHT));
    assert!(!lock.is_locked());

    sheet.open();
    sheet.tick(FRAME);
    assert!(!lock.is_locked());
    settle(&mut sheet);
    assert!(lock.is_locked());
    assert_eq!(lock.holders(), vec!["details".to_string()]);

    sheet.drag_start();
    sheet.drag_move(20.0);
    assert!(!lock.is_locked());
    sheet.drag_end(20.0, 0.0);
    settle(&mut sheet);
    assert!(lock.is_locked());

    sheet.close();
    sheet.tick(FRAME);
    assert!(!lock.is_locked());
}

#[test]
fn test_unmount_mid_transition_releases_lock() {
    let lock = PageScrollLock::new();
    let mut sheet = glide_sheet::sheet()
        .initial(Visibility::Visible)
        .page_scroll_lock(lock.clone())
        .mount(dims(HEIGHT));
    assert!(lock.is_locked());

    sheet.open();
    sheet.tick(FRAME);
    assert!(lock.is_locked());

    sheet.unmount();
    assert!(!lock.is_locked());

    let dropped = glide_sheet::sheet()
        .initial(Visibility::Visible)
        .page_scroll_lock(lock.clone())
        .mount(dims(HEIGHT));
    assert!(lock.is_locked());
    drop(dropped);
    assert!(!lock.is_locked());
}

#[test]
fn test_events_after_content_detach() {
    let recorder = Recorder::default();
    let mut sheet = mount(Visibility::Visible, &recorder);
    scroll_to(&mut sheet, 150.0);

    sheet.detach_content();
    assert_eq!(sheet.content_edge(), ContentEdge::InProgress);

    sheet.drag_start();
    sheet.drag_move(20.0);
    sheet.drag_end(20.0, 0.0);

    sheet.close();
    settle(&mut sheet);
    assert_eq!(recorder.rewinds(), 0);
    assert_eq!(recorder.closed(), 1);
    assert_eq!(sheet.content_edge(), ContentEdge::Top);
}

#[test]
fn test_unified_event_stream() {
    let recorder = Recorder::default();
    let mut sheet = mount(Visibility::Visible, &recorder);

    let stream = [
        Event::scroll(targets::CONTENT, 0.0, 300.0, 300.0),
        Event::drag_start(targets::SURFACE),
        Event::drag(targets::SURFACE, 30.0),
        Event::drag(targets::SURFACE, 70.0),
        Event::drag_end(targets::SURFACE, 70.0, 2.0),
    ];
    for event in &stream {
        assert!(sheet.handle_event(event));
    }

    assert_eq!(sheet.animation_target(), Visibility::Hidden);
    settle(&mut sheet);
    assert_eq!(sheet.offset(), HEIGHT);
}

#[test]
fn test_config_drives_thresholds() {
    let config = SheetConfig::from_toml_str(
        r#"
        initial = "visible"

        [gesture]
        close_distance = 100.0
        "#,
    )
    .unwrap();

    let mut sheet = glide_sheet::sheet().config(config).mount(dims(HEIGHT));
    assert_eq!(sheet.offset(), 0.0);

    sheet.drag_start();
    sheet.drag_move(60.0);
    sheet.drag_end(60.0, 0.0);
    assert_eq!(sheet.animation_target(), Visibility::Visible);
}

#[test]
fn test_tap_during_open_still_settles() {
    let recorder = Recorder::default();
    let mut sheet = mount(Visibility::Hidden, &recorder);

    sheet.open();
    for _ in 0..6 {
        sheet.tick(FRAME);
    }
    assert!(sheet.offset() > 0.0 && sheet.offset() < HEIGHT);

    sheet.drag_start();
    sheet.drag_end(0.0, 0.0);

    let events = settle(&mut sheet);
    assert_eq!(sheet.offset(), 0.0);
    assert_eq!(events, vec![SheetEvent::OpenTransitionEnd]);
    assert_eq!(recorder.opened(), 1);
}

#[test]
fn test_short_drag_during_close_keeps_closing() {
    let recorder = Recorder::default();
    let mut sheet = mount(Visibility::Visible, &recorder);

    sheet.close();
    for _ in 0..5 {
        sheet.tick(FRAME);
    }

    sheet.drag_start();
    sheet.drag_move(10.0);
    sheet.drag_end(10.0, 0.0);
    assert_eq!(sheet.animation_target(), Visibility::Hidden);

    let events = settle(&mut sheet);
    assert_eq!(sheet.offset(), HEIGHT);
    assert_eq!(events, vec![SheetEvent::CloseTransitionEnd]);
    assert_eq!(recorder.closed(), 1);
}

#[test]
fn test_claimed_gesture_during_open_still_settles() {
    let recorder = Recorder::default();
    let mut sheet = mount(Visibility::Hidden, &recorder);
    scroll_to(&mut sheet, 0.0);

    sheet.open();
    for _ in 0..6 {
        sheet.tick(FRAME);
    }

    // Captured on grab, then claimed by the content on the first report
    sheet.drag_start();
    sheet.drag_move(10.0);
    assert!(!sheet.drag_allowed());
    assert!(sheet.is_animating());
    sheet.drag_move(30.0);
    sheet.drag_end(30.0, 0.0);

    let events = settle(&mut sheet);
    assert_eq!(sheet.offset(), 0.0);
    assert_eq!(events, vec![SheetEvent::OpenTransitionEnd]);
}

#[test]
fn test_claimed_gesture_does_not_block_next_gesture() {
    let recorder = Recorder::default();
    let mut sheet = mount(Visibility::Visible, &recorder);
    scroll_to(&mut sheet, 0.0);

    sheet.drag_start();
    sheet.drag_move(10.0);
    assert!(!sheet.drag_allowed());
    sheet.drag_end(10.0, 0.0);

    assert_eq!(sheet.content_edge(), ContentEdge::Top);
    assert!(sheet.drag_allowed());

    sheet.drag_start();
    sheet.drag_move(-5.0);
    assert!(sheet.drag_allowed());
    assert!(sheet.offset() < 0.0);
    sheet.drag_end(-5.0, 0.0);

    settle(&mut sheet);
    assert_eq!(sheet.offset(), 0.0);
}

#[test]
fn test_scroll_after_claim_keeps_content_in_charge() {
    let recorder = Recorder::default();
    let mut sheet = mount(Visibility::Visible, &recorder);
    scroll_to(&mut sheet, 0.0);

    sheet.drag_start();
    sheet.drag_move(10.0);
    scroll_to(&mut sheet, 120.0);
    sheet.drag_end(10.0, 0.0);

    assert_eq!(sheet.content_edge(), ContentEdge::InProgress);
    assert!(!sheet.drag_allowed());
}

#[test]
fn test_set_draggable_at_runtime() {
    let recorder = Recorder::default();
    let mut sheet = mount(Visibility::Visible, &recorder);

    sheet.set_draggable(false);
    assert!(!sheet.drag_allowed());
    sheet.drag_start();
    sheet.drag_move(60.0);
    sheet.drag_end(60.0, 0.0);
    assert_eq!(sheet.offset(), 0.0);
    assert_eq!(sheet.animation_target(), Visibility::Visible);

    sheet.set_draggable(true);
    assert!(sheet.drag_allowed());
    sheet.drag_start();
    sheet.drag_move(60.0);
    assert_eq!(sheet.offset(), 60.0);
}

#[test]
fn test_reattached_content_is_rewound_on_close() {
    let recorder = Recorder::default();
    let mut sheet = mount(Visibility::Visible, &recorder);
    sheet.detach_content();

    let replacement = Arc::new(AtomicUsize::new(0));
    sheet.attach_content(RecordingScroller(replacement.clone()));

    sheet.close();
    settle(&mut sheet);
    assert_eq!(recorder.rewinds(), 0);
    assert_eq!(replacement.load(Ordering::SeqCst), 1);
}
