use crate::catalog::Project;
use crate::db;
use rusqlite::Connection;
use serde::{Deserialize, Serialize};
use tracing::warn;

const BUNDLED_TEMPLATE: &str = include_str!("../data/lesson_plan_template.json");

pub const SETUP_KEY: &str = "setup.lessonPlan";
pub const DEFAULT_GENERATION_DELAY_MS: u64 = 2500;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleBlock {
    pub time: String,
    pub activity: String,
    pub description: String,
    #[serde(default)]
    pub materials: Vec<String>,
    #[serde(default)]
    pub safety_notes: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaterialLine {
    pub item: String,
    pub quantity: String,
    pub essential: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoLink {
    pub title: String,
    pub url: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resource {
    pub kind: String,
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanTemplate {
    schedule: Vec<ScheduleBlock>,
    materials: Vec<MaterialLine>,
    safety_practices: Vec<String>,
    pedagogical_recommendations: Vec<String>,
    videos: Vec<VideoLink>,
    additional_resources: Vec<Resource>,
}

impl PlanTemplate {
    pub fn bundled() -> anyhow::Result<Self> {
        Ok(serde_json::from_str(BUNDLED_TEMPLATE)?)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LessonPlan {
    pub project: Project,
    pub total_duration: String,
    pub schedule: Vec<ScheduleBlock>,
    pub materials: Vec<MaterialLine>,
    pub safety_practices: Vec<String>,
    pub pedagogical_recommendations: Vec<String>,
    pub videos: Vec<VideoLink>,
    pub additional_resources: Vec<Resource>,
}

/// Teacher edits to a generated plan. Absent fields keep their current value.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanEdit {
    pub schedule: Option<Vec<ScheduleBlock>>,
    pub materials: Option<Vec<MaterialLine>>,
    pub safety_practices: Option<Vec<String>>,
    pub pedagogical_recommendations: Option<Vec<String>>,
}

impl PlanEdit {
    pub fn is_empty(&self) -> bool {
        self.schedule.is_none()
            && self.materials.is_none()
            && self.safety_practices.is_none()
            && self.pedagogical_recommendations.is_none()
    }
}

impl LessonPlan {
    pub fn for_project(project: &Project, template: &PlanTemplate) -> Self {
        LessonPlan {
            project: project.clone(),
            total_duration: project.duration.clone(),
            schedule: template.schedule.clone(),
            materials: template.materials.clone(),
            safety_practices: template.safety_practices.clone(),
            pedagogical_recommendations: template.pedagogical_recommendations.clone(),
            videos: template.videos.clone(),
            additional_resources: template.additional_resources.clone(),
        }
    }

    pub fn apply_edit(&mut self, edit: PlanEdit) {
        if let Some(schedule) = edit.schedule {
            self.schedule = schedule;
        }
        if let Some(materials) = edit.materials {
            self.materials = materials;
        }
        if let Some(practices) = edit.safety_practices {
            self.safety_practices = practices;
        }
        if let Some(recs) = edit.pedagogical_recommendations {
            self.pedagogical_recommendations = recs;
        }
    }
}

/// How long the UI should show its "generating" state before revealing the
/// plan. Read from the workspace settings; falls back to the default.
pub fn generation_delay_ms(conn: Option<&Connection>) -> u64 {
    let Some(conn) = conn else {
        return DEFAULT_GENERATION_DELAY_MS;
    };
    let setup = match db::settings_get_json(conn, SETUP_KEY) {
        Ok(Some(v)) => v,
        Ok(None) => return DEFAULT_GENERATION_DELAY_MS,
        Err(e) => {
            warn!(error = %e, key = SETUP_KEY, "unreadable lesson plan settings; using default delay");
            return DEFAULT_GENERATION_DELAY_MS;
        }
    };
    match setup.get("generationDelayMs") {
        None => DEFAULT_GENERATION_DELAY_MS,
        Some(v) => v.as_u64().unwrap_or_else(|| {
            warn!(value = %v, "generationDelayMs is not a non-negative integer; using default");
            DEFAULT_GENERATION_DELAY_MS
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;

    fn sample_plan() -> LessonPlan {
        let catalog = Catalog::bundled().expect("catalog");
        let project = catalog.find_project(1, "alerta-granizo").expect("project");
        LessonPlan::for_project(project, &PlanTemplate::bundled().expect("template"))
    }

    #[test]
    fn plan_takes_duration_from_project() {
        let plan = sample_plan();
        assert_eq!(plan.total_duration, "45 minutos");
        assert_eq!(plan.project.id, "alerta-granizo");
        assert_eq!(plan.schedule.len(), 4);
        assert!(plan.materials.iter().any(|m| !m.essential));
        assert_eq!(plan.videos.len(), 2);
    }

    #[test]
    fn edit_replaces_only_given_sections() {
        let mut plan = sample_plan();
        let before = plan.clone();
        let edit: PlanEdit = serde_json::from_value(serde_json::json!({
            "safetyPractices": ["Usar lentes de protección"]
        }))
        .expect("edit");
        assert!(!edit.is_empty());
        plan.apply_edit(edit);
        assert_eq!(plan.safety_practices, vec!["Usar lentes de protección".to_string()]);
        assert_eq!(plan.schedule, before.schedule);
        assert_eq!(plan.project, before.project);
    }

    #[test]
    fn delay_defaults_without_workspace() {
        assert_eq!(generation_delay_ms(None), DEFAULT_GENERATION_DELAY_MS);
    }

    fn scratch_db() -> Connection {
        let dir = std::env::temp_dir().join(format!("yatina-plan-{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&dir).expect("create temp dir");
        db::open_db(&dir).expect("open db")
    }

    #[test]
    fn delay_comes_from_settings() {
        let conn = scratch_db();
        assert_eq!(generation_delay_ms(Some(&conn)), DEFAULT_GENERATION_DELAY_MS);
        db::settings_set_json(&conn, SETUP_KEY, &serde_json::json!({ "generationDelayMs": 400 }))
            .expect("write");
        assert_eq!(generation_delay_ms(Some(&conn)), 400);
    }

    #[test]
    fn bad_delay_settings_fall_back_to_default() {
        let conn = scratch_db();
        db::settings_set_json(&conn, SETUP_KEY, &serde_json::json!({ "generationDelayMs": "fast" }))
            .expect("write");
        assert_eq!(generation_delay_ms(Some(&conn)), DEFAULT_GENERATION_DELAY_MS);

        db::settings_set_json(&conn, SETUP_KEY, &serde_json::json!({ "generationDelayMs": -5 }))
            .expect("write");
        assert_eq!(generation_delay_ms(Some(&conn)), DEFAULT_GENERATION_DELAY_MS);

        conn.execute(
            "UPDATE settings SET value_json = 'not json' WHERE key = ?",
            [SETUP_KEY],
        )
        .expect("corrupt");
        assert_eq!(generation_delay_ms(Some(&conn)), DEFAULT_GENERATION_DELAY_MS);
    }
}
