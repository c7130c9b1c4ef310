use crate::catalog::Project;
use crate::credentials::Role;
use crate::plan::LessonPlan;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum TeacherScreen {
    Grades,
    Trimesters,
    Syllabus,
    Plan,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum StudentScreen {
    AssignedProject,
}

/// Current screen, tagged by the role whose flow it belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Screen {
    SignedOut,
    Teacher(TeacherScreen),
    Student(StudentScreen),
}

impl TeacherScreen {
    pub const ROOT: TeacherScreen = TeacherScreen::Grades;

    pub fn next(self) -> Option<TeacherScreen> {
        match self {
            TeacherScreen::Grades => Some(TeacherScreen::Trimesters),
            TeacherScreen::Trimesters => Some(TeacherScreen::Syllabus),
            TeacherScreen::Syllabus => Some(TeacherScreen::Plan),
            TeacherScreen::Plan => None,
        }
    }

    pub fn previous(self) -> Option<TeacherScreen> {
        match self {
            TeacherScreen::Grades => None,
            TeacherScreen::Trimesters => Some(TeacherScreen::Grades),
            TeacherScreen::Syllabus => Some(TeacherScreen::Trimesters),
            TeacherScreen::Plan => Some(TeacherScreen::Syllabus),
        }
    }

    /// Number of selections that must be set while this screen is showing.
    pub fn depth(self) -> usize {
        match self {
            TeacherScreen::Grades => 0,
            TeacherScreen::Trimesters => 1,
            TeacherScreen::Syllabus => 2,
            TeacherScreen::Plan => 3,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TeacherScreen::Grades => "grades",
            TeacherScreen::Trimesters => "trimesters",
            TeacherScreen::Syllabus => "syllabus",
            TeacherScreen::Plan => "plan",
        }
    }
}

impl Screen {
    pub fn root_for(role: Role) -> Screen {
        match role {
            Role::Teacher => Screen::Teacher(TeacherScreen::ROOT),
            Role::Student => Screen::Student(StudentScreen::AssignedProject),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Screen::SignedOut => "signedOut",
            Screen::Teacher(s) => s.as_str(),
            Screen::Student(StudentScreen::AssignedProject) => "assignedProject",
        }
    }
}

/// Choices made so far on the teacher flow. The plan travels with the
/// project it was built from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    pub grade: Option<String>,
    pub trimester: Option<u8>,
    pub project: Option<Project>,
    pub plan: Option<LessonPlan>,
}

impl Selection {
    /// Drop every choice deeper than `screen` allows.
    pub fn truncate_to(&mut self, screen: TeacherScreen) {
        let depth = screen.depth();
        if depth < 3 {
            self.project = None;
            self.plan = None;
        }
        if depth < 2 {
            self.trimester = None;
        }
        if depth < 1 {
            self.grade = None;
        }
    }

    pub fn depth(&self) -> usize {
        [
            self.grade.is_some(),
            self.trimester.is_some(),
            self.project.is_some(),
        ]
        .iter()
        .take_while(|set| **set)
        .count()
    }

    pub fn is_empty(&self) -> bool {
        self.grade.is_none() && self.trimester.is_none() && self.project.is_none() && self.plan.is_none()
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionView {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grade: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trimester: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NavigationView {
    pub screen: &'static str,
    pub role: Option<Role>,
    pub selection: SelectionView,
}

impl NavigationView {
    pub fn new(screen: Screen, role: Option<Role>, selection: &Selection) -> Self {
        NavigationView {
            screen: screen.as_str(),
            role,
            selection: SelectionView {
                grade: selection.grade.clone(),
                trimester: selection.trimester,
                project_id: selection.project.as_ref().map(|p| p.id.clone()),
            },
        }
    }
}
