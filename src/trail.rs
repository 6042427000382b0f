//! Session breadcrumb trail.
//!
//! Append-only log of where the user has been. Exactly one step carries the
//! current-location marker: pushing a new step clears it from every earlier
//! step. Ids come from a per-trail counter so they stay unique and ordered
//! even when steps land within the same millisecond.

use serde::{Deserialize, Serialize};

use crate::logging;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepKind {
    Upload,
    Dashboard,
    Explore,
    Explorer,
    Builder,
    Trail,
    Agent,
}

impl StepKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            StepKind::Upload => "upload",
            StepKind::Dashboard => "dashboard",
            StepKind::Explore => "explore",
            StepKind::Explorer => "explorer",
            StepKind::Builder => "builder",
            StepKind::Trail => "trail",
            StepKind::Agent => "agent",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrailStep {
    pub id: u64,
    pub title: String,
    pub kind: StepKind,
    /// RFC3339 with milliseconds, same shape as the log timestamps.
    pub timestamp: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub is_current_location: bool,
}

/// Step payload before the trail assigns id, timestamp, and location marker.
#[derive(Debug, Clone)]
pub struct NewStep {
    pub title: String,
    pub kind: StepKind,
    pub path: Option<String>,
    pub description: Option<String>,
}

impl NewStep {
    pub fn new(title: &str, kind: StepKind) -> Self {
        Self {
            title: title.to_string(),
            kind,
            path: None,
            description: None,
        }
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }

    pub fn with_path(mut self, path: &str) -> Self {
        self.path = Some(path.to_string());
        self
    }
}

#[derive(Debug, Default)]
pub struct Trail {
    steps: Vec<TrailStep>,
    next_id: u64,
}

impl Trail {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a step and make it the current location.
    pub fn push(&mut self, step: NewStep) -> &TrailStep {
        for s in &mut self.steps {
            s.is_current_location = false;
        }
        let id = self.next_id;
        self.next_id += 1;
        self.steps.push(TrailStep {
            id,
            title: step.title,
            kind: step.kind,
            timestamp: logging::ts_now(),
            path: step.path,
            description: step.description,
            is_current_location: true,
        });
        self.steps.last().expect("just pushed")
    }

    /// Convenience wrapper for drill-in steps.
    pub fn push_exploration(&mut self, tile_id: &str) -> &TrailStep {
        self.push(
            NewStep::new(&format!("Exploring {}", tile_id), StepKind::Explore)
                .with_description(&format!("Deep dive into {} analytics", tile_id)),
        )
    }

    pub fn steps(&self) -> &[TrailStep] {
        &self.steps
    }

    pub fn current(&self) -> Option<&TrailStep> {
        self.steps.iter().find(|s| s.is_current_location)
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn clear(&mut self) {
        self.steps.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_marks_only_the_newest_step_current() {
        let mut trail = Trail::new();
        trail.push(NewStep::new("Dashboards", StepKind::Dashboard));
        trail.push_exploration("revenue");
        trail.push_exploration("revenue-growth");

        assert_eq!(trail.len(), 3);
        let current: Vec<bool> = trail.steps().iter().map(|s| s.is_current_location).collect();
        assert_eq!(current, vec![false, false, true]);
        assert_eq!(trail.current().unwrap().title, "Exploring revenue-growth");
    }

    #[test]
    fn ids_are_monotonic() {
        let mut trail = Trail::new();
        for i in 0..5 {
            let id = trail.push(NewStep::new("step", StepKind::Explorer)).id;
            assert_eq!(id, i);
        }
    }

    #[test]
    fn exploration_steps_carry_a_description() {
        let mut trail = Trail::new();
        let step = trail.push_exploration("inventory");
        assert_eq!(step.kind, StepKind::Explore);
        assert_eq!(
            step.description.as_deref(),
            Some("Deep dive into inventory analytics")
        );
    }

    #[test]
    fn empty_trail_has_no_current_location() {
        let trail = Trail::new();
        assert!(trail.is_empty());
        assert!(trail.current().is_none());
    }
}
