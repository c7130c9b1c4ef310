use crate::ipc::error::{err, ok, session_err};
use crate::ipc::helpers::optional_object;
use crate::ipc::types::{AppState, Request};
use crate::plan::{LessonPlan, PlanEdit};
use serde_json::json;

fn handle_get(state: &mut AppState, req: &Request) -> serde_json::Value {
    match state.session.current_plan() {
        Ok(plan) => ok(&req.id, json!({ "plan": plan })),
        Err(e) => session_err(&req.id, &e),
    }
}

fn handle_update(state: &mut AppState, req: &Request) -> serde_json::Value {
    let edit: PlanEdit = match serde_json::from_value(req.params.clone()) {
        Ok(v) => v,
        Err(e) => return err(&req.id, "bad_params", format!("invalid plan edit: {}", e), None),
    };
    if edit.is_empty() {
        return err(
            &req.id,
            "bad_params",
            "nothing to update; pass schedule, materials, safetyPractices or pedagogicalRecommendations",
            None,
        );
    }
    match state.session.update_plan(edit) {
        Ok(plan) => ok(&req.id, json!({ "plan": plan })),
        Err(e) => session_err(&req.id, &e),
    }
}

fn handle_assign(state: &mut AppState, req: &Request) -> serde_json::Value {
    let plan: Option<LessonPlan> = match optional_object(req, "plan") {
        Ok(v) => v,
        Err(e) => return e,
    };
    match state.session.assign_plan(plan) {
        Ok(assignment) => ok(
            &req.id,
            json!({
                "assignment": assignment,
                "navigation": state.session.navigation(),
            }),
        ),
        Err(e) => session_err(&req.id, &e),
    }
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "plan.get" => Some(handle_get(state, req)),
        "plan.update" => Some(handle_update(state, req)),
        "plan.assign" => Some(handle_assign(state, req)),
        _ => None,
    }
}
