use std::path::PathBuf;
use std::rc::Rc;

use rusqlite::Connection;
use serde::Deserialize;

use crate::session::Controller;

#[derive(Debug, Deserialize, Clone)]
pub struct Request {
    pub id: String,
    pub method: String,
    #[serde(default)]
    pub params: serde_json::Value,
}

pub struct AppState {
    pub workspace: Option<PathBuf>,
    pub db: Option<Rc<Connection>>,
    pub session: Controller,
}

impl AppState {
    pub fn new(session: Controller) -> Self {
        AppState {
            workspace: None,
            db: None,
            session,
        }
    }
}
