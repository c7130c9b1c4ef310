use crate::ipc::error::{err, ok};
use crate::ipc::helpers::{required_i64, required_str};
use crate::ipc::types::{AppState, Request};
use serde_json::json;

fn handle_grades(state: &mut AppState, req: &Request) -> serde_json::Value {
    ok(&req.id, json!({ "grades": state.session.catalog().grades() }))
}

fn handle_trimesters(state: &mut AppState, req: &Request) -> serde_json::Value {
    ok(
        &req.id,
        json!({ "trimesters": state.session.catalog().trimesters() }),
    )
}

fn handle_syllabus(state: &mut AppState, req: &Request) -> serde_json::Value {
    let n = match required_i64(req, "trimester") {
        Ok(v) => v,
        Err(e) => return e,
    };
    let syllabus = u8::try_from(n)
        .ok()
        .and_then(|n| state.session.catalog().syllabus(n));
    match syllabus {
        Some(s) => ok(&req.id, json!({ "syllabus": s })),
        None => err(
            &req.id,
            "not_found",
            format!("no syllabus for trimester {}", n),
            None,
        ),
    }
}

fn handle_kit(state: &mut AppState, req: &Request) -> serde_json::Value {
    ok(&req.id, json!({ "components": state.session.catalog().kit() }))
}

fn handle_kit_component(state: &mut AppState, req: &Request) -> serde_json::Value {
    let name = match required_str(req, "name") {
        Ok(v) => v,
        Err(e) => return e,
    };
    match state.session.catalog().kit_component(&name) {
        Some(c) => ok(&req.id, json!({ "component": c })),
        None => err(
            &req.id,
            "not_found",
            format!("no kit component named {}", name),
            None,
        ),
    }
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "catalog.grades" => Some(handle_grades(state, req)),
        "catalog.trimesters" => Some(handle_trimesters(state, req)),
        "catalog.syllabus" => Some(handle_syllabus(state, req)),
        "catalog.kit" => Some(handle_kit(state, req)),
        "catalog.kitComponent" => Some(handle_kit_component(state, req)),
        _ => None,
    }
}
