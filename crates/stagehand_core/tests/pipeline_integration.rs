//! Integration tests for the event pipeline
//!
//! These tests drive a main context the way a platform backend does:
//! - Presses go through the backend, which queues them and synthesizes clicks
//! - The main loop drains the queue into the registered handler
//! - Handlers are replaced and torn down while events keep flowing

use stagehand_core::prelude::*;
use stagehand_core::ClickSlot;
use std::cell::RefCell;
use std::rc::Rc;

fn press(time: u32, x: i32, y: i32) -> Event {
    Event::button_press(ButtonEvent {
        time,
        x,
        y,
        button: 1,
        click_count: 1,
        ..Default::default()
    })
}

fn release(time: u32, x: i32, y: i32) -> Event {
    Event::button_release(ButtonEvent {
        time,
        x,
        y,
        button: 1,
        click_count: 1,
        ..Default::default()
    })
}

/// Collect every dispatched event type into a shared log
fn recording_context(settings: ClickSettings) -> (MainContext, Rc<RefCell<Vec<EventType>>>) {
    let log = Rc::new(RefCell::new(Vec::new()));
    let sink = log.clone();

    let mut context = MainContext::with_settings(settings);
    context.register_handler(
        move |event: &Event, _: &mut ()| sink.borrow_mut().push(event.event_type()),
        (),
        None,
    );
    (context, log)
}

#[test]
fn test_queue_preserves_arrival_order() {
    let (mut context, log) = recording_context(ClickSettings::default());

    context.put_event(&Event::key_press(KeyEvent::default()));
    context.put_event(&Event::motion(MotionEvent::default()));
    context.put_event(&Event::scroll(ScrollEvent::default()));
    context.put_event(&Event::key_release(KeyEvent::default()));

    assert_eq!(context.dispatch_pending(), 4);
    assert_eq!(
        *log.borrow(),
        vec![
            EventType::KeyPress,
            EventType::Motion,
            EventType::Scroll,
            EventType::KeyRelease
        ]
    );
}

#[test]
fn test_double_click_sequence() {
    let settings = ClickSettings {
        double_click_time: 250,
        double_click_distance: 2,
    };
    let (mut context, log) = recording_context(settings);

    context.backend_mut().push_button_press(press(0, 10, 10));
    context.put_event(&release(40, 10, 10));
    context.backend_mut().push_button_press(press(249, 11, 11));
    context.put_event(&release(290, 11, 11));

    assert_eq!(context.dispatch_pending(), 5);
    assert_eq!(
        *log.borrow(),
        vec![
            EventType::ButtonPress,
            EventType::ButtonRelease,
            EventType::ButtonPress,
            EventType::TwoButtonPress,
            EventType::ButtonRelease,
        ]
    );

    let history = context.backend().click_history();
    assert_eq!(history[0].time, 249);
    assert_eq!(history[1].time, 0);
}

#[test]
fn test_triple_click_sequence() {
    let settings = ClickSettings::default();
    let dct = settings.double_click_time;
    let (mut context, log) = recording_context(settings);

    for time in [0, dct / 2, dct * 3 / 2] {
        context.backend_mut().push_button_press(press(time, 50, 50));
    }

    context.dispatch_pending();
    let synthesized: Vec<_> = log
        .borrow()
        .iter()
        .copied()
        .filter(|kind| *kind != EventType::ButtonPress)
        .collect();
    assert_eq!(
        synthesized,
        vec![EventType::TwoButtonPress, EventType::ThreeButtonPress]
    );
    assert_eq!(
        context.backend().click_history(),
        &[ClickSlot::default(); 2]
    );
}

#[test]
fn test_distance_rejection() {
    let settings = ClickSettings {
        double_click_time: 250,
        double_click_distance: 2,
    };
    let (mut context, log) = recording_context(settings);

    context.backend_mut().push_button_press(press(0, 10, 10));
    context.backend_mut().push_button_press(press(50, 20, 10));
    context.dispatch_pending();

    assert_eq!(
        *log.borrow(),
        vec![EventType::ButtonPress, EventType::ButtonPress]
    );
    let history = context.backend().click_history();
    assert_eq!(history[0].x, 20);
    assert!(history[1].is_empty());
}

#[test]
fn test_accessor_totality_across_types() {
    let events = [
        Event::default(),
        Event::key_press(KeyEvent {
            time: 1,
            keyval: keys::RETURN,
            ..Default::default()
        }),
        Event::new(EventType::KeyRelease),
        press(2, 3, 4),
        release(2, 3, 4),
        Event::motion(MotionEvent::default()),
        Event::scroll(ScrollEvent {
            direction: ScrollDirection::Left,
            ..Default::default()
        }),
    ];

    for event in &events {
        let mut x = -1;
        let mut y = -1;
        event.write_coords(Some(&mut x), Some(&mut y));
        assert_eq!((x, y), event.coords());

        // None of these may panic
        let _ = (
            event.time(),
            event.modifier_state(),
            event.button(),
            event.click_count(),
            event.key_symbol(),
            event.key_code(),
            event.key_unicode(),
            event.scroll_direction(),
            event.device(),
            event.stage(),
        );
    }

    assert_eq!(events[1].key_unicode(), 0x0d);
    assert_eq!(events[1].coords(), (0, 0));
    assert_eq!(events[3].key_symbol(), 0);
    assert_eq!(events[6].scroll_direction(), Some(ScrollDirection::Left));
}

#[test]
fn test_handler_replacement_mid_stream() {
    let torn_down = Rc::new(RefCell::new(Vec::new()));
    let first_seen = Rc::new(RefCell::new(0));
    let second_seen = Rc::new(RefCell::new(0));

    let mut context = MainContext::new();

    let seen = first_seen.clone();
    let log = torn_down.clone();
    context.register_handler(
        move |_: &Event, _: &mut String| *seen.borrow_mut() += 1,
        String::from("first"),
        Some(Box::new(move |data: String| log.borrow_mut().push(data))),
    );

    context.put_event(&press(0, 0, 0));
    context.dispatch_pending();

    let seen = second_seen.clone();
    let log = torn_down.clone();
    context.register_handler(
        move |_: &Event, _: &mut String| *seen.borrow_mut() += 1,
        String::from("second"),
        Some(Box::new(move |data: String| log.borrow_mut().push(data))),
    );
    assert_eq!(*torn_down.borrow(), vec!["first"]);

    context.put_event(&press(10, 0, 0));
    context.put_event(&press(20, 0, 0));
    context.dispatch_pending();
    assert_eq!(*first_seen.borrow(), 1);
    assert_eq!(*second_seen.borrow(), 2);

    drop(context);
    assert_eq!(*torn_down.borrow(), vec!["first", "second"]);
}

#[test]
fn test_settings_from_toml_drive_synthesis() {
    let settings = ClickSettings::from_toml_str(
        r#"
        double_click_time = 100
        double_click_distance = 0
        "#,
    )
    .unwrap();
    let (mut context, log) = recording_context(settings);

    // Outside the shorter window
    context.backend_mut().push_button_press(press(0, 5, 5));
    context.backend_mut().push_button_press(press(150, 5, 5));
    // Inside it, but one pixel away
    context.backend_mut().push_button_press(press(200, 6, 5));
    context.dispatch_pending();

    assert!(log
        .borrow()
        .iter()
        .all(|kind| *kind == EventType::ButtonPress));
}
