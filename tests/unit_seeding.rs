// Unit tests for event seeding, selection edits, and aggregate helpers.
//
// Seeding is greedy and order-driven, so most tests pin exactly which ids
// land in which category list for a small hand-built catalog.

use std::collections::BTreeMap;

use reach::catalog::events::{EngagementEventCount, EventCatalog, EventCategory};
use reach::catalog::platforms::Platform;
use reach::catalog::purposes::{CampaignPurpose, PlatformRequirement, PurposeCatalog};
use reach::engine::seeding::seed_threshold;
use reach::engine::{
    seed_events, seed_for_purpose, selected_events_count, total_selected_events, EventSelection,
    DEFAULT_SEED_THRESHOLD,
};

fn event(id: &str, category: EventCategory, count: u64, order: u32) -> EngagementEventCount {
    EngagementEventCount {
        id: id.to_string(),
        label: id.to_string(),
        count,
        category,
        order,
    }
}

fn purpose(thresholds: &[(Platform, u64)], categories: &[EventCategory]) -> CampaignPurpose {
    CampaignPurpose {
        id: "test".to_string(),
        label: "Test".to_string(),
        description: String::new(),
        platforms: thresholds
            .iter()
            .map(|&(p, min)| {
                (
                    p,
                    PlatformRequirement {
                        display_name: p.display_name().to_string(),
                        min_events: min,
                    },
                )
            })
            .collect::<BTreeMap<_, _>>(),
        allowed_categories: categories.to_vec(),
    }
}

fn hundred_on_facebook() -> CampaignPurpose {
    purpose(
        &[(Platform::Facebook, 100)],
        &[EventCategory::Conversion, EventCategory::Intent],
    )
}

// ============================================================
// Sufficiency or exhaustion
// ============================================================

#[test]
fn stops_once_threshold_is_reached() {
    let events = EventCatalog::new(vec![
        event("third", EventCategory::Intent, 10, 3),
        event("first", EventCategory::Conversion, 60, 1),
        event("second", EventCategory::Intent, 50, 2),
    ]);
    let selection = seed_events(&hundred_on_facebook(), &[Platform::Facebook], &events);

    assert_eq!(selection.get(EventCategory::Conversion), ["first"]);
    assert_eq!(selection.get(EventCategory::Intent), ["second"]);
    assert!(!selection.contains(EventCategory::Intent, "third"));
    assert_eq!(total_selected_events(&selection, &events), 110);
}

#[test]
fn selects_everything_when_short() {
    let events = EventCatalog::new(vec![
        event("a", EventCategory::Conversion, 40, 1),
        event("b", EventCategory::Intent, 30, 2),
        event("c", EventCategory::Intent, 20, 3),
    ]);
    let selection = seed_events(&hundred_on_facebook(), &[Platform::Facebook], &events);

    assert_eq!(selection.get(EventCategory::Conversion), ["a"]);
    assert_eq!(selection.get(EventCategory::Intent), ["b", "c"]);
    assert_eq!(total_selected_events(&selection, &events), 90);
}

#[test]
fn exact_hit_stops_before_next_event() {
    let events = EventCatalog::new(vec![
        event("a", EventCategory::Conversion, 100, 1),
        event("b", EventCategory::Intent, 5, 2),
    ]);
    let selection = seed_events(&hundred_on_facebook(), &[Platform::Facebook], &events);
    assert_eq!(selection.get(EventCategory::Conversion), ["a"]);
    assert!(selection.get(EventCategory::Intent).is_empty());
}

#[test]
fn zero_threshold_seeds_only_exclusions() {
    // The stop check runs before each append, so a zero target is already met.
    let p = purpose(
        &[(Platform::Facebook, 0)],
        &[EventCategory::Conversion, EventCategory::Intent],
    );
    let events = EventCatalog::new(vec![
        event("a", EventCategory::Conversion, 40, 1),
        event("b", EventCategory::Intent, 30, 2),
        event("gone", EventCategory::Exclude, 0, 100),
    ]);
    let selection = seed_events(&p, &[Platform::Facebook], &events);

    assert_eq!(seed_threshold(&p, &[Platform::Facebook]), 0);
    assert!(selection.has_category(EventCategory::Conversion));
    assert!(selection.get(EventCategory::Conversion).is_empty());
    assert!(selection.get(EventCategory::Intent).is_empty());
    assert_eq!(selection.get(EventCategory::Exclude), ["gone"]);
    assert_eq!(total_selected_events(&selection, &events), 0);
    assert_eq!(selected_events_count(&selection), 1);
}

#[test]
fn greedy_takes_priority_over_size() {
    // A single big awareness-order event would finish the job alone, but
    // priority order wins: the small conversion comes first.
    let p = purpose(
        &[(Platform::Facebook, 100)],
        &[EventCategory::Conversion, EventCategory::Awareness],
    );
    let events = EventCatalog::new(vec![
        event("big", EventCategory::Awareness, 1000, 9),
        event("small", EventCategory::Conversion, 1, 1),
    ]);
    let selection = seed_events(&p, &[Platform::Facebook], &events);
    assert_eq!(selection.get(EventCategory::Conversion), ["small"]);
    assert_eq!(selection.get(EventCategory::Awareness), ["big"]);
}

#[test]
fn targets_the_largest_applicable_threshold() {
    let p = purpose(
        &[(Platform::Facebook, 50), (Platform::Google, 150)],
        &[EventCategory::Conversion],
    );
    let events = EventCatalog::new(vec![
        event("a", EventCategory::Conversion, 60, 1),
        event("b", EventCategory::Conversion, 60, 2),
        event("c", EventCategory::Conversion, 60, 3),
        event("d", EventCategory::Conversion, 60, 4),
    ]);
    let selection = seed_events(&p, &[Platform::Facebook, Platform::Google], &events);
    assert_eq!(selection.get(EventCategory::Conversion), ["a", "b", "c"]);

    let fb_only = seed_events(&p, &[Platform::Facebook], &events);
    assert_eq!(fb_only.get(EventCategory::Conversion), ["a"]);
}

#[test]
fn falls_back_to_default_threshold() {
    let p = purpose(&[(Platform::Google, 5000)], &[EventCategory::Conversion]);
    assert_eq!(seed_threshold(&p, &[Platform::Tiktok]), DEFAULT_SEED_THRESHOLD);

    let events = EventCatalog::new(vec![
        event("a", EventCategory::Conversion, 70, 1),
        event("b", EventCategory::Conversion, 70, 2),
        event("c", EventCategory::Conversion, 70, 3),
    ]);
    let selection = seed_events(&p, &[Platform::Tiktok], &events);
    assert_eq!(selection.get(EventCategory::Conversion), ["a", "b"]);
}

#[test]
fn equal_order_keeps_catalog_order() {
    let events = EventCatalog::new(vec![
        event("x", EventCategory::Conversion, 60, 1),
        event("y", EventCategory::Conversion, 60, 1),
        event("z", EventCategory::Conversion, 60, 1),
    ]);
    let selection = seed_events(&hundred_on_facebook(), &[Platform::Facebook], &events);
    assert_eq!(selection.get(EventCategory::Conversion), ["x", "y"]);
}

// ============================================================
// Category lists and exclusions
// ============================================================

#[test]
fn every_allowed_category_gets_a_list() {
    let selection = seed_events(
        &hundred_on_facebook(),
        &[Platform::Facebook],
        &EventCatalog::default(),
    );
    assert!(selection.has_category(EventCategory::Conversion));
    assert!(selection.has_category(EventCategory::Intent));
    assert!(selection.has_category(EventCategory::Exclude));
    assert!(!selection.has_category(EventCategory::Awareness));
    assert!(selection.is_empty());
}

#[test]
fn exclusions_are_always_fully_seeded() {
    let events = EventCatalog::new(vec![
        event("a", EventCategory::Conversion, 500, 1),
        event("buyers", EventCategory::Exclude, 0, 100),
        event("staff", EventCategory::Exclude, 9999, 101),
    ]);
    let selection = seed_events(&hundred_on_facebook(), &[Platform::Facebook], &events);
    assert_eq!(selection.get(EventCategory::Exclude), ["buyers", "staff"]);
}

#[test]
fn exclusions_never_count_toward_total() {
    let events = EventCatalog::new(vec![
        event("a", EventCategory::Conversion, 30, 1),
        event("staff", EventCategory::Exclude, 9999, 101),
    ]);
    let selection = seed_events(&hundred_on_facebook(), &[Platform::Facebook], &events);
    assert_eq!(total_selected_events(&selection, &events), 30);
    assert_eq!(selected_events_count(&selection), 2);
}

#[test]
fn disallowed_categories_are_not_seeded() {
    let events = EventCatalog::new(vec![
        event("views", EventCategory::Awareness, 5000, 0),
        event("a", EventCategory::Conversion, 10, 1),
    ]);
    let selection = seed_events(&hundred_on_facebook(), &[Platform::Facebook], &events);
    assert!(selection.get(EventCategory::Awareness).is_empty());
    assert_eq!(selection.get(EventCategory::Conversion), ["a"]);
}

// ============================================================
// By-id seeding and determinism
// ============================================================

#[test]
fn unknown_purpose_seeds_nothing() {
    let events = EventCatalog::new(vec![event("staff", EventCategory::Exclude, 1, 101)]);
    let selection = seed_for_purpose(
        &PurposeCatalog::builtin(),
        "nope",
        &[Platform::Facebook],
        &events,
    );
    assert_eq!(selection, EventSelection::new());
}

#[test]
fn seeding_is_deterministic() {
    let events = EventCatalog::new(vec![
        event("a", EventCategory::Conversion, 30, 2),
        event("b", EventCategory::Intent, 30, 1),
        event("c", EventCategory::Intent, 50, 3),
        event("d", EventCategory::Exclude, 3, 100),
    ]);
    let p = hundred_on_facebook();
    let first = seed_events(&p, &[Platform::Facebook], &events);
    let second = seed_events(&p, &[Platform::Facebook], &events);
    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}

// ============================================================
// Aggregates after user edits
// ============================================================

#[test]
fn toggles_change_the_total() {
    let events = EventCatalog::new(vec![
        event("a", EventCategory::Conversion, 60, 1),
        event("b", EventCategory::Intent, 50, 2),
        event("c", EventCategory::Intent, 10, 3),
    ]);
    let mut selection = seed_events(&hundred_on_facebook(), &[Platform::Facebook], &events);
    assert_eq!(total_selected_events(&selection, &events), 110);

    selection.toggle(EventCategory::Intent, "c");
    assert_eq!(total_selected_events(&selection, &events), 120);

    selection.toggle(EventCategory::Conversion, "a");
    assert_eq!(total_selected_events(&selection, &events), 60);
    assert_eq!(selected_events_count(&selection), 2);
}

#[test]
fn unknown_ids_contribute_zero() {
    let mut selection = EventSelection::new();
    selection.insert(EventCategory::Intent, "ghost");
    selection.insert(EventCategory::Exclude, "also_ghost");
    assert_eq!(total_selected_events(&selection, &EventCatalog::default()), 0);
    assert_eq!(selected_events_count(&selection), 2);
}
