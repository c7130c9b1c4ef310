use crate::ipc::error::{ok, session_err};
use crate::ipc::helpers::{required_i64, required_str};
use crate::ipc::types::{AppState, Request};
use crate::plan;
use crate::session::Notification;
use serde_json::json;

fn handle_state(state: &mut AppState, req: &Request) -> serde_json::Value {
    ok(&req.id, json!({ "navigation": state.session.navigation() }))
}

fn handle_select_grade(state: &mut AppState, req: &Request) -> serde_json::Value {
    let grade = match required_str(req, "grade") {
        Ok(v) => v,
        Err(e) => return e,
    };
    if let Err(e) = state.session.select_grade(&grade) {
        return session_err(&req.id, &e);
    }
    ok(
        &req.id,
        json!({
            "navigation": state.session.navigation(),
            "trimesters": state.session.catalog().trimesters(),
            "notification": Notification::grade_selected(&grade),
        }),
    )
}

fn handle_select_trimester(state: &mut AppState, req: &Request) -> serde_json::Value {
    let trimester = match required_i64(req, "trimester") {
        Ok(v) => v,
        Err(e) => return e,
    };
    if let Err(e) = state.session.select_trimester(trimester) {
        return session_err(&req.id, &e);
    }
    let syllabus = state
        .session
        .selection()
        .trimester
        .and_then(|n| state.session.catalog().syllabus(n));
    ok(
        &req.id,
        json!({
            "navigation": state.session.navigation(),
            "syllabus": syllabus,
        }),
    )
}

fn handle_select_project(state: &mut AppState, req: &Request) -> serde_json::Value {
    let project_id = match required_str(req, "projectId") {
        Ok(v) => v,
        Err(e) => return e,
    };
    let (plan, notification) = match state.session.select_project(&project_id) {
        Ok(p) => (json!(p), Notification::plan_generated(&p.project.name)),
        Err(e) => return session_err(&req.id, &e),
    };
    ok(
        &req.id,
        json!({
            "navigation": state.session.navigation(),
            "plan": plan,
            "notification": notification,
            "readyAfterMs": plan::generation_delay_ms(state.db.as_deref()),
        }),
    )
}

fn handle_back(state: &mut AppState, req: &Request) -> serde_json::Value {
    state.session.go_back();
    ok(&req.id, json!({ "navigation": state.session.navigation() }))
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "nav.state" => Some(handle_state(state, req)),
        "nav.selectGrade" => Some(handle_select_grade(state, req)),
        "nav.selectTrimester" => Some(handle_select_trimester(state, req)),
        "nav.selectProject" => Some(handle_select_project(state, req)),
        "nav.back" => Some(handle_back(state, req)),
        _ => None,
    }
}
