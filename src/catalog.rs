//! Static curriculum data: grades, trimesters, per-trimester syllabi with
//! their projects, and the kit components students build with.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

const BUNDLED_CATALOG: &str = include_str!("../data/catalog.json");

pub const TRIMESTER_RANGE: std::ops::RangeInclusive<u8> = 1..=3;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trimester {
    pub number: u8,
    pub title: String,
    pub description: String,
    pub period: String,
    pub topic_count: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub name: String,
    pub description: String,
    pub image: String,
    pub materials: Vec<String>,
    pub rural_focus: String,
    pub duration: String,
    pub difficulty: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Topic {
    pub id: u32,
    pub title: String,
    pub description: String,
    pub project: Project,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Syllabus {
    pub title: String,
    pub topics: Vec<Topic>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KitComponent {
    pub name: String,
    pub icon: String,
    pub description: String,
    pub specs: String,
    pub purpose: String,
    pub usage: String,
    pub safety_tips: Vec<String>,
    pub applications: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Catalog {
    grades: Vec<String>,
    trimesters: Vec<Trimester>,
    // Keyed by trimester number as written in the asset ("1", "2", "3").
    syllabi: BTreeMap<String, Syllabus>,
    kit: Vec<KitComponent>,
}

impl Catalog {
    pub fn bundled() -> anyhow::Result<Self> {
        Ok(serde_json::from_str(BUNDLED_CATALOG)?)
    }

    pub fn grades(&self) -> &[String] {
        &self.grades
    }

    pub fn has_grade(&self, grade: &str) -> bool {
        self.grades.iter().any(|g| g == grade)
    }

    pub fn trimesters(&self) -> &[Trimester] {
        &self.trimesters
    }

    pub fn syllabus(&self, trimester: u8) -> Option<&Syllabus> {
        if !TRIMESTER_RANGE.contains(&trimester) {
            return None;
        }
        self.syllabi.get(&trimester.to_string())
    }

    pub fn find_project(&self, trimester: u8, project_id: &str) -> Option<&Project> {
        self.syllabus(trimester)?
            .topics
            .iter()
            .map(|t| &t.project)
            .find(|p| p.id == project_id)
    }

    pub fn kit(&self) -> &[KitComponent] {
        &self.kit
    }

    pub fn kit_component(&self, name: &str) -> Option<&KitComponent> {
        let wanted = name.trim();
        self.kit.iter().find(|c| c.name.eq_ignore_ascii_case(wanted))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_catalog_covers_all_trimesters() {
        let catalog = Catalog::bundled().expect("catalog");
        assert_eq!(catalog.grades().len(), 6);
        assert!(catalog.has_grade("3ro Secundaria"));
        assert!(!catalog.has_grade("7mo Secundaria"));
        assert_eq!(catalog.trimesters().len(), 3);
        for n in TRIMESTER_RANGE {
            let s = catalog.syllabus(n).expect("syllabus");
            assert!(!s.topics.is_empty(), "trimester {} has no topics", n);
        }
        assert!(catalog.syllabus(0).is_none());
        assert!(catalog.syllabus(4).is_none());
    }

    #[test]
    fn project_ids_are_unique() {
        let catalog = Catalog::bundled().expect("catalog");
        let mut seen = std::collections::HashSet::new();
        for n in TRIMESTER_RANGE {
            for topic in &catalog.syllabus(n).expect("syllabus").topics {
                assert!(seen.insert(topic.project.id.clone()), "duplicate {}", topic.project.id);
            }
        }
    }

    #[test]
    fn find_project_is_scoped_to_its_trimester() {
        let catalog = Catalog::bundled().expect("catalog");
        assert!(catalog.find_project(2, "bomba-riego").is_some());
        assert!(catalog.find_project(1, "bomba-riego").is_none());
        assert!(catalog.find_project(2, "nope").is_none());
    }

    #[test]
    fn kit_lookup_is_case_insensitive() {
        let catalog = Catalog::bundled().expect("catalog");
        let motor = catalog.kit_component(" motor ").expect("motor");
        assert_eq!(motor.name, "Motor");
        assert!(!motor.safety_tips.is_empty());
        assert!(catalog.kit_component("Arduino").is_none());
    }
}
