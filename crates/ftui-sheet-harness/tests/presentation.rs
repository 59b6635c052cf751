#![forbid(unsafe_code)]

//! Integration tests: presentation lifecycle, completions, and events.

use ftui_sheet::testing::{FakeHost, FakeSurface, SurfaceCall};
use ftui_sheet::{
    Phase, PresentationState, SheetConfig, SheetError, SheetEvent, SizeInfo, SizeSpec,
    SurfaceEvent,
};
use ftui_sheet_harness::{SheetScenario, assert_events, outcome};
use proptest::prelude::*;

fn scenario_config() -> SheetConfig {
    SheetConfig::new()
        .sizes([SizeSpec::Auto, SizeSpec::Percent(50.0), SizeSpec::Fixed(400.0)])
        .max_height(500.0)
}

fn size_spec() -> impl Strategy<Value = SizeSpec> {
    prop_oneof![
        Just(SizeSpec::Auto),
        Just(SizeSpec::Small),
        Just(SizeSpec::Medium),
        Just(SizeSpec::Large),
        (0.0f64..2000.0).prop_map(SizeSpec::Fixed),
        (0.0f64..=100.0).prop_map(SizeSpec::Percent),
    ]
}

// ============================================================================
// Resolution scenarios
// ============================================================================

#[test]
fn auto_is_clamped_to_max_height() {
    let mut s = SheetScenario::new(scenario_config()).with_content(600.0);
    assert_eq!(s.present_settled(0), Ok(()));
    assert_eq!(
        s.events.events(),
        vec![SheetEvent::Present(SizeInfo::new(0, 500.0))]
    );
}

#[test]
fn fixed_size_resolves_verbatim() {
    let mut s = SheetScenario::new(scenario_config()).with_content(600.0);
    assert_eq!(s.present_settled(2), Ok(()));
    assert_eq!(s.sheet.current_size(), Some(SizeInfo::new(2, 400.0)));
}

#[test]
fn percentage_of_available_height() {
    let host = FakeHost::new().with_available_height(800.0);
    let mut s = SheetScenario::with_fakes(scenario_config(), host, FakeSurface::new())
        .with_content(600.0);
    assert_eq!(s.present_settled(1), Ok(()));
    assert_eq!(s.sheet.current_size(), Some(SizeInfo::new(1, 400.0)));
}

#[test]
fn surface_receives_every_detent() {
    let mut s = SheetScenario::new(scenario_config()).with_content(600.0);
    s.present_settled(1).unwrap();
    assert_eq!(
        s.surface.calls().first(),
        Some(&SurfaceCall::Present {
            detents: vec![500.0, 400.0, 400.0],
            selected: 1,
        })
    );
}

// ============================================================================
// Present / dismiss contract
// ============================================================================

#[test]
fn out_of_bounds_while_presented_keeps_state() {
    let mut s = SheetScenario::new(scenario_config()).with_content(600.0);
    s.present_settled(1).unwrap();
    assert_eq!(
        s.present_settled(5),
        Err(SheetError::InvalidIndex { index: 5, len: 3 })
    );
    assert_eq!(
        s.sheet.state(),
        PresentationState {
            is_presented: true,
            active_index: Some(1),
        }
    );
    assert_events!(s, ["onPresent"]);
}

#[test]
fn no_host_rejects() {
    let host = FakeHost::new();
    host.set_can_present(false);
    let mut s = SheetScenario::with_fakes(scenario_config(), host, FakeSurface::new())
        .with_content(600.0);
    assert_eq!(s.present_settled(0), Err(SheetError::NoHost));
    assert_eq!(s.present_calls(), 0);
    assert!(!s.sheet.is_presented());
}

#[test]
fn dismiss_when_hidden_resolves_without_event() {
    let mut s = SheetScenario::new(scenario_config()).with_content(600.0);
    assert_eq!(s.dismiss_settled(), Ok(()));
    assert_eq!(s.dismiss_calls(), 0);
    assert_events!(s, []);
}

#[test]
fn dismiss_when_presented_fires_once() {
    let mut s = SheetScenario::new(scenario_config()).with_content(600.0);
    s.present_settled(0).unwrap();
    assert_eq!(s.dismiss_settled(), Ok(()));
    assert_eq!(s.dismiss_settled(), Ok(()));
    assert_events!(s, ["onPresent", "onDismiss"]);
    assert_eq!(s.sheet.active_index(), None);
    assert_eq!(s.dismiss_calls(), 1);
}

#[test]
fn user_gesture_dismiss_resets_state() {
    let mut s = SheetScenario::new(scenario_config()).with_content(600.0);
    s.present_settled(0).unwrap();
    s.swipe_away();
    assert_eq!(s.sheet.state(), PresentationState::default());
    assert_events!(s, ["onPresent", "onDismiss"]);
    assert_eq!(s.dismiss_calls(), 0);
}

#[test]
fn live_present_at_different_height_emits_size_change() {
    let mut s = SheetScenario::new(scenario_config()).with_content(600.0);
    s.present_settled(0).unwrap();
    assert_eq!(s.present_settled(1), Ok(()));
    assert_events!(s, ["onPresent", "onSizeChange"]);
    assert_eq!(
        s.events.events().last(),
        Some(&SheetEvent::SizeChange(SizeInfo::new(1, 400.0)))
    );
    assert_eq!(s.present_calls(), 1);
}

#[test]
fn live_present_at_same_height_is_silent() {
    let mut s = SheetScenario::new(scenario_config()).with_content(600.0);
    s.present_settled(1).unwrap();
    assert_eq!(s.present_settled(2), Ok(()));
    assert_events!(s, ["onPresent"]);
    assert_eq!(s.sheet.active_index(), Some(2));
}

#[test]
fn present_after_dismiss_presents_again() {
    let mut s = SheetScenario::new(scenario_config()).with_content(600.0);
    s.present_settled(0).unwrap();
    s.dismiss_settled().unwrap();
    s.present_settled(2).unwrap();
    assert_events!(s, ["onPresent", "onDismiss", "onPresent"]);
    assert_eq!(s.present_calls(), 2);
}

#[test]
fn platform_abort_abandons_pending_present() {
    let mut s = SheetScenario::new(scenario_config()).with_content(600.0);
    let done = s.sheet.present(0);
    s.sheet.handle_surface_event(SurfaceEvent::DismissFinished);
    assert_eq!(outcome(done), Err(SheetError::Abandoned));
    assert_eq!(s.sheet.phase(), Phase::Hidden);
    assert_events!(s, []);
}

#[test]
fn dismiss_and_present_interleave_in_order() {
    let mut s = SheetScenario::new(scenario_config()).with_content(600.0);
    s.present_settled(0).unwrap();
    let dismiss = s.sheet.dismiss();
    let present = s.sheet.present(2);
    s.settle();
    assert_eq!(outcome(dismiss), Ok(()));
    assert_eq!(outcome(present), Ok(()));
    assert_events!(s, ["onPresent", "onDismiss", "onPresent"]);
    assert_eq!(s.sheet.active_index(), Some(2));
}

#[test]
fn present_after_deferred_dismiss_keeps_sheet_shown() {
    let mut s = SheetScenario::new(scenario_config()).with_content(600.0);
    let first = s.sheet.present(0);
    let dismiss = s.sheet.dismiss();
    let second = s.sheet.present(0);
    s.settle();
    assert_eq!(outcome(first), Ok(()));
    assert_eq!(outcome(dismiss), Err(SheetError::Abandoned));
    assert_eq!(outcome(second), Ok(()));
    assert_eq!(s.sheet.phase(), Phase::Shown);
    assert!(s.sheet.is_presented());
    assert_events!(s, ["onPresent"]);
    assert_eq!(s.dismiss_calls(), 0);
}

#[test]
fn dismiss_after_deferred_present_wins() {
    let mut s = SheetScenario::new(scenario_config()).with_content(600.0);
    let first = s.sheet.present(0);
    let _second = s.sheet.present(1);
    let dismiss = s.sheet.dismiss();
    s.settle();
    assert_eq!(outcome(first), Ok(()));
    assert_eq!(outcome(dismiss), Ok(()));
    assert_eq!(s.sheet.phase(), Phase::Hidden);
}

// ============================================================================
// Platform notifications
// ============================================================================

#[test]
fn drag_to_other_detent_emits_size_change() {
    let mut s = SheetScenario::new(scenario_config()).with_content(600.0);
    s.present_settled(0).unwrap();
    s.drag_to(1);
    assert_eq!(s.sheet.active_index(), Some(1));
    assert_eq!(
        s.events.events().last(),
        Some(&SheetEvent::SizeChange(SizeInfo::new(1, 400.0)))
    );
}

#[test]
fn drag_between_equal_detents_is_silent() {
    let mut s = SheetScenario::new(scenario_config()).with_content(600.0);
    s.present_settled(1).unwrap();
    s.drag_to(2);
    assert_events!(s, ["onPresent"]);
    assert_eq!(s.sheet.active_index(), Some(2));
}

#[test]
fn available_height_change_reresolves_on_width_change() {
    let host = FakeHost::new();
    let config = SheetConfig::new().sizes([SizeSpec::Medium]);
    let mut s = SheetScenario::with_fakes(config, host.clone(), FakeSurface::new())
        .with_content(100.0);
    s.present_settled(0).unwrap();

    host.set_available_height(600.0);
    s.sheet.handle_surface_event(SurfaceEvent::WidthChanged(320.0));
    assert_eq!(
        s.events.events().last(),
        Some(&SheetEvent::SizeChange(SizeInfo::new(0, 300.0)))
    );
}

// ============================================================================
// Style
// ============================================================================

#[test]
fn shrinking_sizes_while_shown_clamps_index() {
    let mut s = SheetScenario::new(scenario_config()).with_content(600.0);
    s.present_settled(2).unwrap();
    s.sheet.set_sizes([SizeSpec::Fixed(250.0)]);
    assert_eq!(s.sheet.active_index(), Some(0));
    assert_eq!(
        s.events.events().last(),
        Some(&SheetEvent::SizeChange(SizeInfo::new(0, 250.0)))
    );
}

#[test]
fn unsupported_live_style_is_flushed_by_reconfigure() {
    let surface = FakeSurface::new().with_live_style(false);
    let mut s = SheetScenario::with_fakes(scenario_config(), FakeHost::new(), surface)
        .with_content(600.0);
    s.present_settled(0).unwrap();

    s.sheet.set_corner_radius(Some(20.0));
    assert_eq!(s.sheet.controller().queued_style().len(), 1);

    s.sheet.set_max_height(Some(450.0));
    assert!(s.sheet.controller().queued_style().is_empty());
    let style = s.surface.last_style().unwrap();
    assert_eq!(style.corner_radius, Some(20.0));
    assert_eq!(style.max_height, Some(450.0));
}

#[test]
fn dismissible_is_forwarded_while_visible() {
    let mut s = SheetScenario::new(scenario_config()).with_content(600.0);
    s.sheet.set_dismissible(false);
    assert!(s.surface.calls().is_empty());
    s.present_settled(0).unwrap();
    s.sheet.set_dismissible(true);
    assert_eq!(
        s.surface.calls().last(),
        Some(&SurfaceCall::SetDismissible(true))
    );
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #[test]
    fn present_in_range_resolves_at_index(
        sizes in prop::collection::vec(size_spec(), 1..=3),
        pick in 0usize..3,
        content in 0.0f64..2000.0,
    ) {
        let index = pick % sizes.len();
        let mut s = SheetScenario::new(SheetConfig::new().sizes(sizes)).with_content(content);
        prop_assert_eq!(s.present_settled(index), Ok(()));
        prop_assert_eq!(s.sheet.active_index(), Some(index));
        let presented = s.events.events().first().and_then(SheetEvent::size);
        prop_assert_eq!(presented.map(|info| info.index), Some(index));
    }

    #[test]
    fn present_out_of_range_rejects_and_keeps_state(
        sizes in prop::collection::vec(size_spec(), 1..=3),
        extra in 0usize..10,
        presented_first in any::<bool>(),
    ) {
        let len = sizes.len();
        let mut s = SheetScenario::new(SheetConfig::new().sizes(sizes)).with_content(300.0);
        if presented_first {
            s.present_settled(0).unwrap();
        }
        let before = s.sheet.state();
        let index = len + extra;
        prop_assert_eq!(
            s.present_settled(index),
            Err(SheetError::InvalidIndex { index, len })
        );
        prop_assert_eq!(s.sheet.state(), before);
    }

    #[test]
    fn resolved_heights_are_finite_and_bounded(
        sizes in prop::collection::vec(size_spec(), 1..=3),
        max in prop::option::of(0.0f64..1500.0),
        content in 0.0f64..3000.0,
    ) {
        let mut config = SheetConfig::new().sizes(sizes.clone());
        config.style.max_height = max;
        let mut s = SheetScenario::new(config).with_content(content);
        for index in 0..sizes.len() {
            s.present_settled(index).unwrap();
            let value = s.sheet.current_size().map(|info| info.value).unwrap_or(-1.0);
            prop_assert!(value.is_finite() && value >= 0.0);
            prop_assert!(value <= max.unwrap_or(800.0));
        }
    }

    #[test]
    fn live_present_emits_at_most_one_size_change(
        a in 1.0f64..700.0,
        b in 1.0f64..700.0,
    ) {
        let config = SheetConfig::new().sizes([SizeSpec::Fixed(a), SizeSpec::Fixed(b)]);
        let mut s = SheetScenario::new(config).with_content(100.0);
        s.present_settled(0).unwrap();
        s.present_settled(1).unwrap();
        let expected = usize::from(a != b);
        prop_assert_eq!(s.events.count("onSizeChange"), expected);
        prop_assert_eq!(s.events.count("onPresent"), 1);
    }
}
