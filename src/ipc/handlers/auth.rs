use crate::ipc::error::{ok, session_err};
use crate::ipc::helpers::required_str;
use crate::ipc::types::{AppState, Request};
use crate::session::SessionError;
use serde_json::json;

fn handle_login(state: &mut AppState, req: &Request) -> serde_json::Value {
    // An empty or missing code gets the same "enter your code" answer.
    let code = match required_str(req, "code") {
        Ok(v) => v,
        Err(_) => return session_err(&req.id, &SessionError::EmptyCode),
    };
    match state.session.login(&code) {
        Ok(user) => {
            let user = json!(user);
            ok(
                &req.id,
                json!({
                    "user": user,
                    "navigation": state.session.navigation(),
                    "notification": {
                        "title": "¡Bienvenido a YATIÑA-IA!",
                        "description": "Has iniciado sesión correctamente",
                    },
                }),
            )
        }
        Err(e) => session_err(&req.id, &e),
    }
}

fn handle_logout(state: &mut AppState, req: &Request) -> serde_json::Value {
    state.session.logout();
    ok(&req.id, json!({ "navigation": state.session.navigation() }))
}

fn handle_session_get(state: &mut AppState, req: &Request) -> serde_json::Value {
    ok(
        &req.id,
        json!({
            "user": state.session.user(),
            "navigation": state.session.navigation(),
        }),
    )
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "auth.login" => Some(handle_login(state, req)),
        "auth.logout" => Some(handle_logout(state, req)),
        "session.get" => Some(handle_session_get(state, req)),
        _ => None,
    }
}
