//! End-to-end triage scenarios driven through `TriageSession`.
//!
//! Each test builds its own session and drives it the way the terminal host
//! does: inputs through `handle`, time through `poll_timers`.

use std::time::Duration;

use tokio::time::Instant;

use zen_core::events::TriageEvent;
use zen_core::types::{Counters, DecisionKind, Item, Priority, SourceCategory};
use zen_triage::keymap::{Command, Key, KeyMap};
use zen_triage::provider::{load_queue, DemoProvider};
use zen_triage::session::{InputEvent, SessionSettings, TriageSession};
use zen_triage::status::StatusIndicator;
use zen_triage::{GestureState, TriageQueue};

// =============================================================================
// Helpers
// =============================================================================

const MS: Duration = Duration::from_millis(1);

fn item(id: &str, title: &str) -> Item {
    Item::new(id, SourceCategory::Task, title, "", Priority::new(3).unwrap())
}

fn session(items: Vec<Item>, now: Instant) -> TriageSession {
    let queue = TriageQueue::new(items).unwrap();
    let mut s = TriageSession::new(queue, SessionSettings::default(), StatusIndicator::default(), now);
    s.drain_events();
    s
}

fn abc(now: Instant) -> TriageSession {
    session(vec![item("A", "Alpha"), item("B", "Bravo"), item("C", "Charlie")], now)
}

fn press(s: &mut TriageSession, key: Key, now: Instant) -> Vec<TriageEvent> {
    let command = KeyMap::new().resolve(key).expect("bound key");
    s.handle(InputEvent::Command(command), now).events
}

fn swipe(s: &mut TriageSession, target: &str, path: &[f64], now: Instant) -> Vec<TriageEvent> {
    let mut events = s.handle(InputEvent::DragStart { target: target.into() }, now).events;
    for offset in path {
        events.extend(s.handle(InputEvent::DragMove { offset: *offset }, now).events);
    }
    events.extend(s.handle(InputEvent::DragEnd { offset: None }, now).events);
    events
}

fn visible_ids(s: &TriageSession, now: Instant) -> Vec<String> {
    s.snapshot(now)
        .cards
        .iter()
        .map(|c| c.item.id.0.clone())
        .collect()
}

// =============================================================================
// Scenarios
// =============================================================================

#[test]
fn test_drag_right_past_threshold_approves() {
    let now = Instant::now();
    let mut s = abc(now);

    swipe(&mut s, "A", &[60.0, 120.0, 150.0], now);

    let view = s.snapshot(now);
    assert_eq!(visible_ids(&s, now), vec!["B", "C"]);
    assert_eq!(view.counters.approved, 1);
    assert_eq!(view.counters.dismissed, 0);
    let toast = view.toast.expect("toast after commit");
    assert_eq!(toast.kind, DecisionKind::Approve);
    assert!(toast.message.starts_with("Approved: Alpha"));
}

#[test]
fn test_drag_left_inside_threshold_snaps_back() {
    let now = Instant::now();
    let mut s = abc(now);

    let events = swipe(&mut s, "A", &[-50.0], now);

    assert_eq!(events.len(), 1);
    assert_eq!(events[0].event_name(), "gesture_snapped_back");
    let view = s.snapshot(now);
    assert_eq!(visible_ids(&s, now), vec!["A", "B", "C"]);
    assert_eq!(view.counters, Counters::default());
    assert!(view.toast.is_none());
    assert_eq!(view.top_motion.offset, 0.0);
    assert_eq!(view.gesture, GestureState::Idle);
}

#[test]
fn test_keyboard_dismiss_commits_without_drag() {
    let now = Instant::now();
    let mut s = abc(now);

    press(&mut s, Key::Left, now);

    let view = s.snapshot(now);
    assert_eq!(visible_ids(&s, now), vec!["B", "C"]);
    assert_eq!(view.counters.dismissed, 1);
    assert_eq!(view.toast.unwrap().kind, DecisionKind::Dismiss);
}

#[test]
fn test_two_approves_keep_only_latest_feedback() {
    let t0 = Instant::now();
    let mut s = abc(t0);

    press(&mut s, Key::Char('l'), t0);
    press(&mut s, Key::Char('l'), t0 + MS * 1000);

    assert!(s.snapshot(t0 + MS * 1000).toast.unwrap().message.contains("Bravo"));

    // The first decision's window would have closed at 3000 ms; it must not
    assert!(s.poll_timers(t0 + MS * 3000).is_empty());
    assert!(s.snapshot(t0 + MS * 3000).toast.is_some());

    let expired = s.poll_timers(t0 + MS * 4000);
    let names: Vec<&str> = expired.iter().map(|e| e.event_name()).collect();
    assert_eq!(names, vec!["feedback_expired"]);
    assert!(s.snapshot(t0 + MS * 4000).toast.is_none());
}

#[test]
fn test_last_item_shows_all_clear() {
    let now = Instant::now();
    let mut s = session(vec![item("A", "Alpha")], now);

    let events = press(&mut s, Key::Right, now);

    assert!(events
        .iter()
        .any(|e| matches!(e, TriageEvent::QueueDrained { approved: 1, .. })));
    let view = s.snapshot(now);
    assert!(view.all_clear);
    assert!(view.cards.is_empty());
    assert_eq!(view.header(), "0 items need your attention");
}

#[test]
fn test_empty_queue_ignores_every_input() {
    let now = Instant::now();
    let mut s = session(vec![], now);

    assert!(press(&mut s, Key::Right, now).is_empty());
    assert!(press(&mut s, Key::Left, now).is_empty());
    assert!(swipe(&mut s, "A", &[500.0], now).is_empty());

    let view = s.snapshot(now);
    assert!(view.all_clear);
    assert_eq!(view.counters, Counters::default());
}

#[test]
fn test_exit_transition_outlives_commit() {
    let t0 = Instant::now();
    let mut s = abc(t0);

    swipe(&mut s, "A", &[-180.0], t0);

    let view = s.snapshot(t0 + MS * 100);
    assert_eq!(view.exits.len(), 1);
    assert_eq!(view.exits[0].item.id.as_str(), "A");
    assert!(view.exits[0].x_offset < 0.0);
    // The queue has already moved on and B is interactive
    assert!(view.cards[0].presentation.interactive);
    assert_eq!(view.cards[0].item.id.as_str(), "B");

    s.poll_timers(t0 + MS * 300);
    assert!(s.snapshot(t0 + MS * 300).exits.is_empty());
}

#[test]
fn test_demo_session_counters_start_seeded() {
    let now = Instant::now();
    let queue = load_queue(&DemoProvider::new()).unwrap();
    let mut s = TriageSession::new(queue, SessionSettings::default(), StatusIndicator::default(), now);

    let started = s.drain_events();
    assert!(matches!(
        started.as_slice(),
        [TriageEvent::SessionStarted { item_count: 8, .. }]
    ));

    press(&mut s, Key::Right, now);
    press(&mut s, Key::Left, now);
    let view = s.snapshot(now);
    assert_eq!(view.counters.approved, 15);
    assert_eq!(view.counters.dismissed, 8);
    assert_eq!(view.remaining, 6);
}

#[test]
fn test_status_is_independent_of_triage() {
    let t0 = Instant::now();
    let mut s = abc(t0);
    let before = s.snapshot(t0).status;

    press(&mut s, Key::Right, t0);
    let after = s.snapshot(t0).status;
    assert_eq!(before, after);
    assert_eq!(after.label, "Monitoring your world");

    s.poll_timers(t0 + MS * 200);
    assert_ne!(s.snapshot(t0 + MS * 200).status.glyph, before.glyph);
}

#[test]
fn test_interleaved_key_and_drag_commit_once() {
    let now = Instant::now();
    let mut s = abc(now);

    // Keypress lands first; the drag that follows targets the departed card
    press(&mut s, Key::Right, now);
    let events = swipe(&mut s, "A", &[200.0], now);

    assert!(events.is_empty());
    assert_eq!(s.queue().len(), 2);
    assert_eq!(s.queue().approved_count(), 1);
}

// =============================================================================
// Paused clock
// =============================================================================

#[tokio::test(start_paused = true)]
async fn test_feedback_expires_after_three_seconds_of_runtime() {
    let mut s = abc(Instant::now());
    s.handle(InputEvent::Command(Command::Decide(DecisionKind::Approve)), Instant::now());

    let mut expired_at = None;
    let start = Instant::now();
    while expired_at.is_none() {
        let Some(deadline) = s.next_deadline(Instant::now()) else {
            break;
        };
        tokio::time::sleep_until(deadline).await;
        let events = s.poll_timers(Instant::now());
        if events.iter().any(|e| e.event_name() == "feedback_expired") {
            expired_at = Some(Instant::now() - start);
        }
    }

    let elapsed = expired_at.expect("feedback expired");
    assert!(elapsed >= MS * 3000 && elapsed < MS * 3002, "{elapsed:?}");
    assert!(s.snapshot(Instant::now()).toast.is_none());
}
