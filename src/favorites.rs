//! Persisted favorite insights.
//!
//! Insights pinned from the exploration panels land in a local SQLite
//! database and can be converted into dashboard widget templates. Payloads
//! are opaque JSON; the store never interprets them beyond the conversion
//! defaults below. Kinds are stored as raw text so rows written by newer
//! builds still load, falling back to the N/A metric widget.

use anyhow::Result;
use chrono::Utc;
use rusqlite::{params, Connection};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::seed;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    Exploration,
    Dashboard,
}

impl Source {
    pub fn as_str(&self) -> &'static str {
        match self {
            Source::Exploration => "exploration",
            Source::Dashboard => "dashboard",
        }
    }

    fn parse(s: &str) -> Self {
        match s {
            "dashboard" => Source::Dashboard,
            _ => Source::Exploration,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FavoriteInsight {
    pub id: String,
    pub title: String,
    /// Kind tag as stored: `chart`, `metric`, or `ai-text`. Kept as text so
    /// unrecognized kinds survive a round trip.
    pub kind: String,
    pub data: Value,
    pub created_at: String,
    pub source: Source,
}

/// Insight payload before the store assigns id and timestamp.
#[derive(Debug, Clone)]
pub struct NewFavorite {
    pub title: String,
    pub kind: String,
    pub data: Value,
    pub source: Source,
}

/// Dashboard widget rendered from a favorite.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WidgetTemplate {
    pub id: String,
    pub title: String,
    pub kind: String,
    pub color: String,
    pub description: String,
    pub template: Value,
}

/// Convert a favorite into its dashboard widget, applying the per-kind
/// display defaults. Unknown kinds become a neutral metric widget.
pub fn widget(insight: &FavoriteInsight) -> WidgetTemplate {
    let (kind, color, template) = match insight.kind.as_str() {
        "metric" => (
            "metric",
            "#22c55e",
            json!({
                "type": "metric",
                "data": {
                    "value": insight.data.get("primary").cloned().unwrap_or(Value::Null),
                    "change": insight.data.get("trend").cloned().unwrap_or(json!("+0%")),
                    "trend": insight.data.get("trendDirection").cloned().unwrap_or(json!("up")),
                },
            }),
        ),
        "chart" => (
            "chart",
            "#06b6d4",
            json!({
                "type": "chart",
                "data": {
                    "chartType": insight.data.get("type").cloned().unwrap_or(Value::Null),
                    "title": insight.title,
                    "option": insight.data,
                },
            }),
        ),
        "ai-text" => {
            let first_line = insight
                .data
                .get("insights")
                .and_then(|v| v.get(0))
                .cloned()
                .unwrap_or(json!("AI-generated insight"));
            let confidence = match insight.data.get("confidence") {
                Some(Value::Bool(true)) => "high",
                _ => "medium",
            };
            (
                "insight",
                "#8b5cf6",
                json!({
                    "type": "insight",
                    "data": {
                        "insight": first_line,
                        "confidence": confidence,
                        "impact": "positive",
                    },
                }),
            )
        }
        _ => (
            "metric",
            "#f59e0b",
            json!({
                "type": "metric",
                "data": { "value": "N/A", "change": "+0%", "trend": "up" },
            }),
        ),
    };
    WidgetTemplate {
        id: insight.id.clone(),
        title: insight.title.clone(),
        kind: kind.to_string(),
        color: color.to_string(),
        description: format!("Insight from exploration: {}", insight.title),
        template,
    }
}

pub struct FavoriteStore {
    conn: Connection,
}

impl FavoriteStore {
    pub fn open(path: &str) -> Result<Self> {
        let conn = Connection::open(path)?;
        conn.execute_batch(
            "BEGIN;
            CREATE TABLE IF NOT EXISTS favorites (
                id TEXT PRIMARY KEY,
                title TEXT NOT NULL,
                kind TEXT NOT NULL,
                data TEXT NOT NULL,
                created_at TEXT NOT NULL,
                source TEXT NOT NULL
            );
            COMMIT;",
        )?;
        Ok(Self { conn })
    }

    /// Persist a favorite, assigning its id and creation timestamp.
    pub fn save(&mut self, new: NewFavorite) -> Result<FavoriteInsight> {
        let now = Utc::now();
        let millis = now.timestamp_millis();
        let fingerprint = seed::digest(&[&new.title, &new.kind, &millis.to_string()]);
        let insight = FavoriteInsight {
            id: format!("insight-{}-{}", millis, &fingerprint[..9]),
            title: new.title,
            kind: new.kind,
            data: new.data,
            created_at: now.to_rfc3339_opts(chrono::SecondsFormat::Millis, true),
            source: new.source,
        };
        self.conn.execute(
            "INSERT INTO favorites (id, title, kind, data, created_at, source)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                insight.id,
                insight.title,
                insight.kind,
                insight.data.to_string(),
                insight.created_at,
                insight.source.as_str()
            ],
        )?;
        Ok(insight)
    }

    /// All favorites, oldest first.
    pub fn all(&self) -> Result<Vec<FavoriteInsight>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, title, kind, data, created_at, source
             FROM favorites ORDER BY created_at, id",
        )?;
        let rows = stmt.query_map([], |row| {
            let data_text: String = row.get(3)?;
            let source_text: String = row.get(5)?;
            Ok(FavoriteInsight {
                id: row.get(0)?,
                title: row.get(1)?,
                kind: row.get(2)?,
                data: serde_json::from_str(&data_text).unwrap_or(Value::Null),
                created_at: row.get(4)?,
                source: Source::parse(&source_text),
            })
        })?;
        let mut favorites = Vec::new();
        for row in rows {
            favorites.push(row?);
        }
        Ok(favorites)
    }

    /// Remove a favorite by id; true when a row was deleted.
    pub fn remove(&mut self, id: &str) -> Result<bool> {
        let changed = self
            .conn
            .execute("DELETE FROM favorites WHERE id = ?1", params![id])?;
        Ok(changed > 0)
    }

    /// Every favorite converted to its dashboard widget.
    pub fn widgets(&self) -> Result<Vec<WidgetTemplate>> {
        Ok(self.all()?.iter().map(widget).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> (tempfile::TempDir, FavoriteStore) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("favorites.sqlite");
        let store = FavoriteStore::open(path.to_str().unwrap()).unwrap();
        (dir, store)
    }

    fn sample(kind: &str) -> NewFavorite {
        NewFavorite {
            title: "Quality Score".to_string(),
            kind: kind.to_string(),
            data: json!({ "primary": "4.2/5.0", "trend": "+3%" }),
            source: Source::Exploration,
        }
    }

    #[test]
    fn save_assigns_id_and_round_trips() {
        let (_dir, mut store) = store();
        let saved = store.save(sample("metric")).unwrap();
        assert!(saved.id.starts_with("insight-"));

        let all = store.all().unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0], saved);
    }

    #[test]
    fn remove_deletes_only_the_named_row() {
        let (_dir, mut store) = store();
        let a = store.save(sample("metric")).unwrap();
        let b = store.save(sample("chart")).unwrap();
        assert!(store.remove(&a.id).unwrap());
        assert!(!store.remove(&a.id).unwrap());
        let remaining = store.all().unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].id, b.id);
    }

    #[test]
    fn metric_widget_uses_primary_value() {
        let (_dir, mut store) = store();
        let saved = store.save(sample("metric")).unwrap();
        let w = widget(&saved);
        assert_eq!(w.kind, "metric");
        assert_eq!(w.color, "#22c55e");
        assert_eq!(w.template["data"]["value"], "4.2/5.0");
        assert_eq!(w.template["data"]["change"], "+3%");
    }

    #[test]
    fn ai_text_widget_takes_the_first_line() {
        let insight = FavoriteInsight {
            id: "insight-1-abc".to_string(),
            title: "Analysis".to_string(),
            kind: "ai-text".to_string(),
            data: json!({ "insights": ["Line one.", "Line two."], "confidence": true }),
            created_at: "2026-01-01T00:00:00.000Z".to_string(),
            source: Source::Exploration,
        };
        let w = widget(&insight);
        assert_eq!(w.kind, "insight");
        assert_eq!(w.template["data"]["insight"], "Line one.");
        assert_eq!(w.template["data"]["confidence"], "high");
    }

    #[test]
    fn unknown_kind_falls_back_to_na_metric() {
        let (_dir, mut store) = store();
        let saved = store.save(sample("sparkline")).unwrap();
        let widgets = store.widgets().unwrap();
        assert_eq!(widgets.len(), 1);
        assert_eq!(widgets[0].id, saved.id);
        assert_eq!(widgets[0].kind, "metric");
        assert_eq!(widgets[0].color, "#f59e0b");
        assert_eq!(widgets[0].template["data"]["value"], "N/A");
    }

    #[test]
    fn widget_description_names_the_insight() {
        let (_dir, mut store) = store();
        let saved = store.save(sample("chart")).unwrap();
        assert_eq!(
            widget(&saved).description,
            "Insight from exploration: Quality Score"
        );
    }
}
