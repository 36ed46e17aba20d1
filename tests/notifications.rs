use inkfolio_wasm::notify::{Severity, ToastRequest, Toaster, REMOVE_DELAY};

fn request(title: &str) -> ToastRequest {
    ToastRequest::new(title, "details", Severity::Default)
}

#[test]
fn auto_dismiss_then_removal() {
    let mut toaster = Toaster::new();
    let id = toaster.raise(0.0, request("hello"));
    assert_eq!(toaster.get(id).unwrap().duration, 5000.0);

    assert!(!toaster.advance(4999.0));
    assert!(toaster.get(id).unwrap().open);

    assert!(toaster.advance(5000.0));
    assert!(!toaster.get(id).unwrap().open);

    assert!(!toaster.advance(5299.0));
    assert!(toaster.get(id).is_some());

    assert!(toaster.advance(5300.0));
    assert!(toaster.get(id).is_none());
    assert_eq!(toaster.next_deadline(), None);
}

#[test]
fn late_advance_times_removal_from_the_close() {
    let mut toaster = Toaster::new();
    let id = toaster.raise(0.0, request("late"));

    // A single late wake-up fires both the close and the removal.
    assert!(toaster.advance(6000.0));
    assert!(toaster.get(id).is_none());
}

#[test]
fn manual_dismiss_removes_after_exactly_the_delay() {
    let mut toaster = Toaster::new();
    let id = toaster.raise(0.0, request("bye"));

    toaster.dismiss(1000.0, id);
    assert!(!toaster.get(id).unwrap().open);
    assert_eq!(toaster.next_deadline(), Some(1000.0 + REMOVE_DELAY));

    toaster.advance(1299.0);
    assert!(toaster.get(id).is_some());
    toaster.advance(1300.0);
    assert!(toaster.get(id).is_none());

    // The earlier auto-dismiss deadline is now harmless.
    assert!(!toaster.advance(5000.0));
}

#[test]
fn dismissing_twice_is_the_same_as_once() {
    let mut once = Toaster::new();
    let mut twice = Toaster::new();
    let a = once.raise(0.0, request("x"));
    let b = twice.raise(0.0, request("x"));

    once.dismiss(100.0, a);
    twice.dismiss(100.0, b);
    twice.dismiss(200.0, b);

    assert_eq!(once.toasts(), twice.toasts());
    assert_eq!(once.pending_for(a), twice.pending_for(b));
    assert_eq!(once.next_deadline(), twice.next_deadline());

    once.advance(400.0);
    twice.advance(400.0);
    assert_eq!(once.toasts(), twice.toasts());
    assert!(twice.toasts().is_empty());
}

#[test]
fn unknown_ids_are_ignored() {
    let mut toaster = Toaster::new();
    let id = toaster.raise(0.0, request("only"));
    toaster.dismiss(10.0, id + 41);
    assert!(toaster.get(id).unwrap().open);
    assert_eq!(toaster.pending_for(id), 1);
}

#[test]
fn toasts_keep_insertion_order_and_close_independently() {
    let mut toaster = Toaster::new();
    let first = toaster.raise(0.0, request("first"));
    let second = toaster.raise(1000.0, request("second").with_duration(2000.0));
    let third = toaster.raise(2000.0, ToastRequest::new("third", "", Severity::Success));

    let titles: Vec<&str> = toaster.toasts().iter().map(|t| t.title.as_str()).collect();
    assert_eq!(titles, ["first", "second", "third"]);

    toaster.advance(3000.0);
    assert!(toaster.get(first).unwrap().open);
    assert!(!toaster.get(second).unwrap().open);

    toaster.advance(3300.0);
    let ids: Vec<_> = toaster.toasts().iter().map(|t| t.id).collect();
    assert_eq!(ids, [first, third]);
}
