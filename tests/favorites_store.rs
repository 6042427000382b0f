//! Favorites persistence across store handles: rows written by one process
//! generation must be readable by the next, including kinds that generation
//! does not recognize.

use serde_json::json;

use drilldown::favorites::{widget, FavoriteStore, NewFavorite, Source};
use drilldown::insights;

fn favorite(title: &str, kind: &str, data: serde_json::Value) -> NewFavorite {
    NewFavorite {
        title: title.to_string(),
        kind: kind.to_string(),
        data,
        source: Source::Exploration,
    }
}

#[test]
fn favorites_survive_reopening_the_database() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("favorites.sqlite");
    let path = path.to_str().unwrap();

    let saved = {
        let mut store = FavoriteStore::open(path).unwrap();
        store
            .save(favorite(
                "Supply Metrics",
                "metric",
                json!({ "primary": "96.8%", "trend": "+1.2%" }),
            ))
            .unwrap()
    };

    let store = FavoriteStore::open(path).unwrap();
    let all = store.all().unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0], saved);
}

#[test]
fn pinning_a_live_insight_round_trips_through_the_store() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("favorites.sqlite");
    let mut store = FavoriteStore::open(path.to_str().unwrap()).unwrap();

    // Pin a panel straight out of the insight selector.
    let set = insights::select(Some("revenue"), &[], &[]);
    let pinned = store
        .save(NewFavorite {
            title: set.top_right.title.clone(),
            kind: "metric".to_string(),
            data: set.top_right.data.clone(),
            source: Source::Exploration,
        })
        .unwrap();

    let restored = &store.all().unwrap()[0];
    assert_eq!(restored.data, set.top_right.data);
    let w = widget(restored);
    assert_eq!(w.id, pinned.id);
    assert_eq!(w.kind, "metric");
    assert_eq!(w.template["data"]["value"], set.top_right.data["primary"]);
}

#[test]
fn unrecognized_kinds_written_earlier_still_render() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("favorites.sqlite");
    let path = path.to_str().unwrap();

    {
        let mut store = FavoriteStore::open(path).unwrap();
        store
            .save(favorite("Heatmap", "heatmap", json!({ "cells": [1, 2, 3] })))
            .unwrap();
    }

    let store = FavoriteStore::open(path).unwrap();
    let widgets = store.widgets().unwrap();
    assert_eq!(widgets.len(), 1);
    assert_eq!(widgets[0].kind, "metric");
    assert_eq!(widgets[0].template["data"]["value"], "N/A");
}

#[test]
fn saved_ids_are_unique_across_rapid_saves() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("favorites.sqlite");
    let mut store = FavoriteStore::open(path.to_str().unwrap()).unwrap();

    let mut ids = std::collections::HashSet::new();
    for i in 0..10 {
        let saved = store
            .save(favorite(&format!("Insight {}", i), "chart", json!({ "type": "bar" })))
            .unwrap();
        assert!(ids.insert(saved.id), "duplicate id");
    }
}
