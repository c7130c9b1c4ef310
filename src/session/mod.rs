//! The session and navigation controller.
//!
//! One `Controller` lives in the daemon state. It holds the signed-in user,
//! the current screen of that user's flow, and the choices made so far.
//! Every operation either succeeds completely or leaves all of that
//! untouched.

mod error;
mod nav;
mod store;

pub use error::SessionError;
pub use nav::{NavigationView, Screen, Selection, TeacherScreen};
pub use store::{MemoryStore, SessionStore, WorkspaceStore};

use crate::catalog::{Catalog, Project};
use crate::credentials::{normalize_code, CredentialTable, Role, User};
use crate::plan::{LessonPlan, PlanEdit, PlanTemplate};
use crate::student::{AssignedProject, Progress, StepTracker};
use serde::Serialize;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Static content the flows draw from.
#[derive(Debug, Clone)]
pub struct Content {
    pub catalog: Catalog,
    pub template: PlanTemplate,
    pub student_project: AssignedProject,
}

impl Notification {
    pub fn grade_selected(grade: &str) -> Self {
        Notification {
            title: "Grado seleccionado".to_string(),
            description: format!("Mostrando proyectos para {}", grade),
        }
    }

    pub fn plan_generated(project_name: &str) -> Self {
        Notification {
            title: "¡Plan de clase generado!".to_string(),
            description: format!("Plan detallado creado para: {}", project_name),
        }
    }
}

impl Content {
    pub fn bundled() -> anyhow::Result<Self> {
        Ok(Content {
            catalog: Catalog::bundled()?,
            template: PlanTemplate::bundled()?,
            student_project: AssignedProject::bundled()?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Assignment {
    pub assignment_id: String,
    pub assigned_at: String,
    pub grade: String,
    pub trimester: u8,
    pub plan: LessonPlan,
    pub notification: Notification,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StepOutcome {
    pub progress: Progress,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notification: Option<Notification>,
}

pub struct Controller {
    credentials: CredentialTable,
    content: Content,
    store: Box<dyn SessionStore>,
    user: Option<User>,
    screen: Screen,
    selection: Selection,
    steps: StepTracker,
}

impl Controller {
    pub fn new(credentials: CredentialTable, content: Content) -> Self {
        Controller {
            credentials,
            content,
            store: Box::new(MemoryStore::default()),
            user: None,
            screen: Screen::SignedOut,
            selection: Selection::default(),
            steps: StepTracker::default(),
        }
    }

    /// Swap in a new store and restore whatever session it holds. When the
    /// store is empty but someone is signed in, they are written to it so
    /// the session keeps surviving restarts. The outgoing store is cleared
    /// first so a session lives in exactly one store.
    pub fn attach_store(&mut self, mut store: Box<dyn SessionStore>) -> anyhow::Result<()> {
        if let Err(e) = self.store.clear() {
            warn!(error = %e, "could not clear session from previous store");
        }
        if let Err(e) = self.restore_from(store.as_mut()) {
            if let Some(user) = self.user.as_ref() {
                if let Err(e) = self.store.save(user) {
                    warn!(error = %e, "could not put session back into previous store");
                }
            }
            return Err(e);
        }
        self.store = store;
        Ok(())
    }

    fn restore_from(&mut self, store: &mut dyn SessionStore) -> anyhow::Result<()> {
        let persisted = match store.load() {
            Ok(v) => v,
            Err(e) => {
                warn!(error = %e, "discarding unreadable persisted session");
                store.clear()?;
                None
            }
        };

        match persisted {
            Some(user) => {
                info!(role = user.role.as_str(), "restored persisted session");
                self.enter(user);
            }
            None => {
                if let Some(user) = self.user.as_ref() {
                    store.save(user)?;
                }
            }
        }
        Ok(())
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn catalog(&self) -> &Catalog {
        &self.content.catalog
    }

    pub fn navigation(&self) -> NavigationView {
        NavigationView::new(
            self.screen,
            self.user.as_ref().map(|u| u.role),
            &self.selection,
        )
    }

    pub fn login(&mut self, code: &str) -> Result<&User, SessionError> {
        if normalize_code(code).is_empty() {
            return Err(SessionError::EmptyCode);
        }
        let Some(user) = self.credentials.lookup(code) else {
            info!("login rejected");
            return Err(SessionError::InvalidCode);
        };
        self.store
            .save(&user)
            .map_err(|e| SessionError::Store(e.to_string()))?;
        info!(role = user.role.as_str(), "login accepted");
        Ok(self.enter(user))
    }

    pub fn logout(&mut self) {
        if let Err(e) = self.store.clear() {
            warn!(error = %e, "could not clear persisted session");
        }
        if self.user.take().is_some() {
            info!("logged out");
        }
        if !self.selection.is_empty() {
            debug!("discarding unfinished selection");
        }
        self.screen = Screen::SignedOut;
        self.selection = Selection::default();
        self.steps.clear();
    }

    pub fn select_grade(&mut self, grade: &str) -> Result<(), SessionError> {
        self.expect_teacher_on(TeacherScreen::Grades, "selectGrade")?;
        if !self.content.catalog.has_grade(grade) {
            return Err(SessionError::UnknownGrade(grade.to_string()));
        }
        self.selection.grade = Some(grade.to_string());
        self.advance();
        Ok(())
    }

    pub fn select_trimester(&mut self, trimester: i64) -> Result<(), SessionError> {
        self.expect_teacher_on(TeacherScreen::Trimesters, "selectTrimester")?;
        let n = u8::try_from(trimester)
            .ok()
            .filter(|n| self.content.catalog.syllabus(*n).is_some())
            .ok_or(SessionError::UnknownTrimester(trimester))?;
        self.selection.trimester = Some(n);
        self.advance();
        Ok(())
    }

    /// Choose a project from the current syllabus and build its lesson plan.
    pub fn select_project(&mut self, project_id: &str) -> Result<&LessonPlan, SessionError> {
        self.expect_teacher_on(TeacherScreen::Syllabus, "selectProject")?;
        let trimester = self
            .selection
            .trimester
            .ok_or(SessionError::UnexpectedScreen {
                action: "selectProject",
                screen: self.screen.as_str(),
            })?;
        let project: Project = self
            .content
            .catalog
            .find_project(trimester, project_id)
            .cloned()
            .ok_or_else(|| SessionError::UnknownProject(project_id.to_string()))?;
        let plan = LessonPlan::for_project(&project, &self.content.template);
        self.selection.project = Some(project);
        self.advance();
        Ok(self.selection.plan.insert(plan))
    }

    /// One step toward the root. A no-op at the root and outside the
    /// teacher flow.
    pub fn go_back(&mut self) {
        let Screen::Teacher(current) = self.screen else {
            return;
        };
        if let Some(prev) = current.previous() {
            self.screen = Screen::Teacher(prev);
            self.selection.truncate_to(prev);
            debug!(
                from = current.as_str(),
                to = prev.as_str(),
                kept = self.selection.depth(),
                "navigated back"
            );
        }
    }

    pub fn current_plan(&self) -> Result<&LessonPlan, SessionError> {
        self.expect_teacher_on(TeacherScreen::Plan, "plan")?;
        self.selection
            .plan
            .as_ref()
            .ok_or(SessionError::UnexpectedScreen {
                action: "plan",
                screen: self.screen.as_str(),
            })
    }

    pub fn update_plan(&mut self, edit: PlanEdit) -> Result<&LessonPlan, SessionError> {
        self.expect_teacher_on(TeacherScreen::Plan, "updatePlan")?;
        let screen = self.screen.as_str();
        let plan = self
            .selection
            .plan
            .as_mut()
            .ok_or(SessionError::UnexpectedScreen {
                action: "updatePlan",
                screen,
            })?;
        plan.apply_edit(edit);
        Ok(plan)
    }

    /// Hand the plan to the class and start over at grade selection. When
    /// `plan` is given it replaces the one on screen; the project stays the
    /// selected one.
    pub fn assign_plan(&mut self, plan: Option<LessonPlan>) -> Result<Assignment, SessionError> {
        let current = self.current_plan()?.clone();
        let mut plan = plan.unwrap_or_else(|| current.clone());
        plan.project = current.project;

        let assignment = Assignment {
            assignment_id: Uuid::new_v4().to_string(),
            assigned_at: chrono::Utc::now().to_rfc3339(),
            grade: self.selection.grade.clone().unwrap_or_default(),
            trimester: self.selection.trimester.unwrap_or_default(),
            notification: Notification {
                title: "¡Clase asignada exitosamente!".to_string(),
                description: format!(
                    "El plan de clase \"{}\" ha sido asignado a tus estudiantes",
                    plan.project.name
                ),
            },
            plan,
        };
        info!(
            assignment_id = %assignment.assignment_id,
            project = %assignment.plan.project.id,
            "plan assigned"
        );
        self.screen = Screen::Teacher(TeacherScreen::ROOT);
        self.selection = Selection::default();
        Ok(assignment)
    }

    pub fn assigned_project(&self) -> Result<(&AssignedProject, Progress), SessionError> {
        self.expect_role(Role::Student)?;
        let project = &self.content.student_project;
        Ok((project, self.steps.progress(project.steps.len())))
    }

    pub fn complete_step(&mut self, index: usize) -> Result<StepOutcome, SessionError> {
        self.expect_role(Role::Student)?;
        let total = self.content.student_project.steps.len();
        let newly = self
            .steps
            .complete(index, total)
            .ok_or(SessionError::StepOutOfRange { index, total })?;
        let notification = newly.then(|| Notification {
            title: "¡Paso completado!".to_string(),
            description: format!(
                "Has terminado: {}",
                self.content.student_project.steps[index].title
            ),
        });
        Ok(StepOutcome {
            progress: self.steps.progress(total),
            notification,
        })
    }

    fn enter(&mut self, user: User) -> &User {
        self.screen = Screen::root_for(user.role);
        self.selection = Selection::default();
        self.steps.clear();
        self.user.insert(user)
    }

    fn advance(&mut self) {
        if let Screen::Teacher(current) = self.screen {
            if let Some(next) = current.next() {
                self.screen = Screen::Teacher(next);
                debug!(from = current.as_str(), to = next.as_str(), "navigated forward");
            }
        }
    }

    fn expect_role(&self, role: Role) -> Result<(), SessionError> {
        let user = self.user.as_ref().ok_or(SessionError::NotAuthenticated)?;
        if user.role != role {
            return Err(SessionError::WrongRole(role.as_str()));
        }
        Ok(())
    }

    fn expect_teacher_on(&self, screen: TeacherScreen, action: &'static str) -> Result<(), SessionError> {
        self.expect_role(Role::Teacher)?;
        if self.screen != Screen::Teacher(screen) {
            return Err(SessionError::UnexpectedScreen {
                action,
                screen: self.screen.as_str(),
            });
        }
        Ok(())
    }
}
