//! Integration tests for frost-ui.
//!
//! These tests exercise the public API from outside the crate, verifying
//! that reflection, gestures, overlays and the document work together.

use std::time::Duration;

use frost_ui::event::{Key, NotificationKind, PointerEvent};
use frost_ui::geometry::{Point, Rect};
use frost_ui::overlay::{
    settle, NotificationQueue, OverlayLifecycle, OverlayPhase, DROPDOWN_EXIT, NOTIFICATION_GAP,
};
use frost_ui::reflect::SelectOption;
use frost_ui::testing::{attribute_listing, Pilot};
use frost_ui::widget::{flush, Widget, WidgetId};
use frost_ui::widgets::*;
use frost_ui::Document;
use pretty_assertions::assert_eq;
use slotmap::SlotMap;
use tokio::time::Instant;

fn ab_options() -> Vec<SelectOption> {
    vec![SelectOption::new("a", "A"), SelectOption::new("b", "B")]
}

// ---------------------------------------------------------------------------
// Scenarios
// ---------------------------------------------------------------------------

#[test]
fn slider_drag_snaps_to_step() {
    let mut pilot = Pilot::new();
    let slider = pilot.mount(Slider::from_config(
        SliderConfig::default().with_range(0.0, 100.0, 5.0).with_value(0.0),
    ));
    pilot.layout(slider, "track", Rect::new(0.0, 0.0, 200.0, 6.0));
    pilot.layout(slider, "thumb", Rect::new(-5.0, -2.0, 10.0, 10.0));

    assert!(pilot.drag(slider, "thumb", &[Point::new(104.0, 3.0)]));
    assert_eq!(pilot.document().get::<Slider>(slider).unwrap().value(), 50.0);
    assert_eq!(pilot.document().attribute(slider, "value"), Some("50"));
    assert_eq!(
        pilot.notification_kinds(),
        vec![NotificationKind::Input, NotificationKind::Change]
    );
}

#[test]
fn switch_drag_past_midpoint_checks() {
    let mut pilot = Pilot::new();
    let switch = pilot.mount(Switch::new());
    pilot.layout(switch, "thumb", Rect::new(1.0, 2.0, 28.0, 28.0));

    let start = Point::new(15.0, 16.0);
    assert!(pilot.drag(switch, "thumb", &[Point::new(25.0, 16.0), Point::new(start.x + 20.0, 16.0)]));
    assert!(pilot.document().get::<Switch>(switch).unwrap().is_checked());
    assert_eq!(pilot.notification_kinds(), vec![NotificationKind::Change]);
}

#[test]
fn select_option_by_index() {
    let mut doc = Document::new();
    let select = doc.mount(Select::new(ab_options()));
    assert_eq!(doc.get::<Select>(select).unwrap().selected_index(), -1);

    doc.update::<Select, _>(select, |s| s.select_option(1));
    let select_ref = doc.get::<Select>(select).unwrap();
    assert_eq!(select_ref.value(), Some("b"));
    assert_eq!(doc.attribute(select, "value"), Some("b"));

    let out = doc.drain_notifications();
    let changes: Vec<_> = out
        .iter()
        .filter(|e| e.kind() == NotificationKind::Change)
        .collect();
    assert_eq!(changes.len(), 1);
    assert_eq!(
        changes[0].notification.detail_json(),
        serde_json::json!({"index": 1, "value": "b", "text": "B"})
    );
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

#[test]
fn numeric_values_stay_on_grid() {
    let mut slider = Slider::from_config(SliderConfig::default().with_range(-1.5, 3.0, 0.25));
    for x in [-10.0, 0.1, 0.126, 1.0 / 3.0, 2.99, 3.0, 42.0, -1.5, 0.875] {
        slider.set_value(x);
        let value = slider.value();
        assert!((-1.5..=3.0).contains(&value), "{x} -> {value}");
        let steps = (value + 1.5) / 0.25;
        assert!((steps - steps.round()).abs() < 1e-9, "{x} -> {value}");
    }
}

#[test]
fn setting_current_value_has_no_effect() {
    let mut switch = Switch::from_config(SwitchConfig::default().with_checked(true));
    flush(&mut switch, None);
    let renders = switch.host().surface().render_count();

    assert!(!switch.set_checked(true));
    assert_eq!(flush(&mut switch, None), frost_ui::render::Invalidation::None);
    assert_eq!(switch.host().surface().render_count(), renders);
    assert!(switch.host_mut().take_notifications().is_empty());
}

#[test]
fn attribute_round_trip_reproduces_state() {
    let mut original = Slider::from_config(
        SliderConfig::default()
            .with_range(0.0, 10.0, 0.5)
            .with_value(7.5)
            .with_label("Volume"),
    );
    original.set_disabled(true);

    let mut copy = Slider::new();
    for (name, value) in original.host().attributes().iter() {
        frost_ui::reflect::set_attribute(&mut copy, name, Some(value));
    }
    assert_eq!(copy.value(), original.value());
    assert_eq!(copy.range(), original.range());
    assert_eq!(copy.label(), original.label());
    assert_eq!(copy.is_disabled(), original.is_disabled());
    assert_eq!(attribute_listing(&copy), attribute_listing(&original));
}

#[test]
fn drag_inputs_are_monotonic() {
    let mut doc = Document::new();
    let slider = doc.mount(Slider::from_config(SliderConfig::default().with_range(0.0, 10.0, 1.0)));
    doc.set_part_bounds(slider, "track", Rect::new(0.0, 0.0, 100.0, 4.0));
    doc.render();

    doc.pointer_down(slider, "thumb", PointerEvent::at(0.0, 2.0));
    for x in (1..=130).step_by(3) {
        doc.pointer_move(PointerEvent::at(x as f64, 2.0));
    }
    doc.pointer_up(PointerEvent::at(130.0, 2.0));

    let inputs: Vec<f64> = doc
        .drain_notifications()
        .iter()
        .filter(|e| e.kind() == NotificationKind::Input)
        .filter_map(|e| e.notification.detail_json()["value"].as_f64())
        .collect();
    assert!(inputs.windows(2).all(|w| w[0] <= w[1]), "{inputs:?}");
    assert_eq!(inputs.last(), Some(&10.0));
}

#[test]
fn drag_continues_across_a_rebuild() {
    let mut doc = Document::new();
    let slider = doc.mount(Slider::from_config(SliderConfig::default().with_range(0.0, 100.0, 5.0)));
    doc.set_part_bounds(slider, "track", Rect::new(0.0, 0.0, 200.0, 6.0));
    doc.render();

    doc.pointer_down(slider, "thumb", PointerEvent::at(0.0, 3.0));
    doc.pointer_move(PointerEvent::at(40.0, 3.0));
    assert!(doc.set_attribute(slider, "theme", Some("dark")));
    assert_eq!(doc.render(), 1);
    assert!(doc.is_capturing());
    assert_eq!(doc.focused().map(|(_, part)| part.to_owned()).as_deref(), Some("thumb"));

    doc.pointer_move(PointerEvent::at(104.0, 3.0));
    doc.pointer_up(PointerEvent::at(104.0, 3.0));
    assert_eq!(doc.get::<Slider>(slider).unwrap().value(), 50.0);
    assert_eq!(doc.count(NotificationKind::Change), 1);
    let markup = doc.markup(slider).unwrap();
    assert!(markup.lines().next().unwrap().contains("theme-dark"));
}

#[test]
fn overlay_phases_follow_the_cycle() {
    let mut overlay = OverlayLifecycle::new(DROPDOWN_EXIT);
    let start = Instant::now();
    let mut seen = vec![overlay.phase()];
    let mut record = |o: &OverlayLifecycle| {
        if seen.last() != Some(&o.phase()) {
            seen.push(o.phase());
        }
    };

    overlay.open();
    record(&overlay);
    overlay.close(start);
    record(&overlay);
    overlay.open();
    overlay.close(start);
    overlay.poll(start + DROPDOWN_EXIT / 2);
    record(&overlay);
    overlay.poll(start + DROPDOWN_EXIT);
    record(&overlay);

    assert_eq!(
        seen,
        vec![
            OverlayPhase::Idle,
            OverlayPhase::Opening,
            OverlayPhase::Closing,
            OverlayPhase::Idle,
        ]
    );
}

#[test]
fn queue_offsets_pack_and_repack() {
    let mut ids: SlotMap<WidgetId, ()> = SlotMap::with_key();
    let [a, b, c] = [ids.insert(()), ids.insert(()), ids.insert(())];
    let mut queue = NotificationQueue::new();
    queue.show(a, 40.0);
    queue.show(b, 64.0);
    queue.show(c, 30.0);

    // Newest first.
    assert_eq!(queue.ids(), vec![c, b, a]);
    assert_eq!(queue.offset_of(c), Some(0.0));
    assert_eq!(queue.offset_of(b), Some(30.0 + NOTIFICATION_GAP));
    assert_eq!(queue.offset_of(a), Some(30.0 + 64.0 + 2.0 * NOTIFICATION_GAP));

    queue.remove(b);
    assert_eq!(queue.offsets(), vec![(c, 0.0), (a, 30.0 + NOTIFICATION_GAP)]);
}

// ---------------------------------------------------------------------------
// Document
// ---------------------------------------------------------------------------

#[test]
fn notifications_cross_widget_boundaries() {
    let mut pilot = Pilot::new();
    let card = pilot.mount(Card::new("Team"));
    let persona = pilot.mount_child(card, Persona::new("Ada"));
    let menu = pilot.mount_child(
        card,
        Menu::new(vec![frost_ui::reflect::MenuItem::item("Edit", "edit")]),
    );

    pilot.click(persona, "avatar");
    pilot.click(menu, "trigger");
    pilot.frame();
    pilot.click(menu, "item-0");

    let out = pilot.notifications();
    let kinds: Vec<_> = out.iter().map(|e| e.kind()).collect();
    assert_eq!(kinds, vec![NotificationKind::PersonaClick, NotificationKind::MenuSelect]);
    assert!(out.iter().all(|e| e.reaches(card)));
    assert_eq!(out[0].sender, persona);
    assert_eq!(out[1].sender, menu);
}

#[test]
fn outside_click_ignores_own_subtree() {
    let mut pilot = Pilot::new();
    let select = pilot.mount(Select::new(ab_options()));
    let other = pilot.mount(Button::new("Elsewhere"));

    pilot.click(select, "field");
    pilot.frame();
    assert!(pilot.document().get::<Select>(select).unwrap().is_open());

    // Nothing inside the list box listens, so the click reaches the
    // document, which sees it landed inside the select.
    assert!(!pilot.click(select, "dropdown"));
    assert_eq!(pilot.document().get::<Select>(select).unwrap().phase(), OverlayPhase::Open);

    pilot.click(other, "button");
    assert_eq!(pilot.document().get::<Select>(select).unwrap().phase(), OverlayPhase::Closing);
}

#[test]
fn keyboard_steps_emit_input_and_change() {
    let mut pilot = Pilot::new();
    let slider = pilot.mount(Slider::from_config(SliderConfig::default().with_range(0.0, 100.0, 5.0)));
    assert!(pilot.focus(slider, "thumb"));

    pilot.press(Key::Right);
    pilot.press(Key::PageUp);
    pilot.press(Key::End);
    pilot.press(Key::End);
    assert_eq!(pilot.document().get::<Slider>(slider).unwrap().value(), 100.0);
    assert_eq!(pilot.notification_kinds().len(), 6);
}

#[tokio::test(start_paused = true)]
async fn notifications_settle_on_the_tokio_clock() {
    let mut doc = Document::new();
    let mut rx = doc.subscribe();
    let short = doc.show_notification(NotificationConfig::default().with_duration(500));
    let long = doc.show_notification(NotificationConfig::default().with_duration(2000));
    doc.frame();

    let before = Instant::now();
    settle(&mut doc).await;
    assert!(Instant::now() - before >= Duration::from_millis(2000));
    assert!(!doc.contains(short));
    assert!(!doc.contains(long));
    assert!(doc.registry().queue().is_empty());

    let mut closed = Vec::new();
    while let Ok(envelope) = rx.try_recv() {
        if envelope.kind() == NotificationKind::Close {
            closed.push(envelope.sender);
        }
    }
    assert_eq!(closed, vec![short, long]);
}

#[test]
fn sticky_notification_closes_from_button() {
    let mut pilot = Pilot::new();
    let id = pilot
        .document_mut()
        .show_notification(NotificationConfig::default().with_duration(0).with_message("Saved"));
    pilot.frame();
    assert_eq!(pilot.document().next_deadline(), None);

    pilot.click(id, "close");
    pilot.advance(300);
    assert!(!pilot.document().contains(id));
    assert_eq!(pilot.notification_kinds(), vec![NotificationKind::Close]);
}

#[test]
fn widget_trait_objects_share_one_document() {
    let widgets: Vec<Box<dyn FnOnce(&mut Document) -> WidgetId>> = vec![
        Box::new(|d| d.mount(Button::new("A"))),
        Box::new(|d| d.mount(Loader::default())),
        Box::new(|d| d.mount(Input::new())),
    ];
    let mut doc = Document::new();
    let ids: Vec<WidgetId> = widgets.into_iter().map(|f| f(&mut doc)).collect();
    assert_eq!(doc.render(), 3);
    let types: Vec<&str> = ids
        .iter()
        .filter_map(|id| doc.widget(*id).map(|w| w.widget_type()))
        .collect();
    assert_eq!(types, vec!["Button", "Loader", "Input"]);
}
