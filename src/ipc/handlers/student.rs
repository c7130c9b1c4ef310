use crate::ipc::error::{err, ok, session_err};
use crate::ipc::helpers::{required_i64, to_json};
use crate::ipc::types::{AppState, Request};
use serde_json::json;

fn handle_project(state: &mut AppState, req: &Request) -> serde_json::Value {
    match state.session.assigned_project() {
        Ok((project, progress)) => ok(
            &req.id,
            json!({
                "project": project,
                "progress": progress,
                "student": state.session.user(),
            }),
        ),
        Err(e) => session_err(&req.id, &e),
    }
}

fn handle_complete_step(state: &mut AppState, req: &Request) -> serde_json::Value {
    let index = match required_i64(req, "index") {
        Ok(v) => v,
        Err(e) => return e,
    };
    let Ok(index) = usize::try_from(index) else {
        return err(&req.id, "bad_params", "index must not be negative", None);
    };
    let outcome = match state.session.complete_step(index) {
        Ok(v) => v,
        Err(e) => return session_err(&req.id, &e),
    };
    match to_json(req, &outcome) {
        Ok(v) => ok(&req.id, v),
        Err(e) => e,
    }
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "student.project" => Some(handle_project(state, req)),
        "student.completeStep" => Some(handle_complete_step(state, req)),
        _ => None,
    }
}
