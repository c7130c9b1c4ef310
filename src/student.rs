use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

const BUNDLED_PROJECT: &str = include_str!("../data/student_project.json");

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Introduction {
    pub title: String,
    pub content: String,
    pub key_points: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectMaterial {
    pub name: String,
    pub icon: String,
    pub has_kit: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Step {
    pub title: String,
    pub description: String,
    pub details: String,
    pub safety: String,
    pub alternatives: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Alternative {
    pub title: String,
    pub description: String,
    pub instructions: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignedProject {
    pub title: String,
    pub description: String,
    pub introduction: Introduction,
    pub materials: Vec<ProjectMaterial>,
    pub steps: Vec<Step>,
    pub without_kit: Vec<Alternative>,
}

impl AssignedProject {
    pub fn bundled() -> anyhow::Result<Self> {
        Ok(serde_json::from_str(BUNDLED_PROJECT)?)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Progress {
    pub completed_steps: Vec<usize>,
    pub total: usize,
    pub percent: u32,
}

/// Which steps of the assigned project a student has marked done.
#[derive(Debug, Clone, Default)]
pub struct StepTracker {
    completed: BTreeSet<usize>,
}

impl StepTracker {
    /// Returns `Some(newly_completed)` for a valid index, `None` when the
    /// index is past the last step.
    pub fn complete(&mut self, index: usize, total: usize) -> Option<bool> {
        if index >= total {
            return None;
        }
        Some(self.completed.insert(index))
    }

    pub fn progress(&self, total: usize) -> Progress {
        let done = self.completed.len();
        let percent = if total == 0 {
            0
        } else {
            (done * 100 / total) as u32
        };
        Progress {
            completed_steps: self.completed.iter().copied().collect(),
            total,
            percent,
        }
    }

    pub fn clear(&mut self) {
        self.completed.clear();
    }
}
