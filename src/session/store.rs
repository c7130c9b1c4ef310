use crate::credentials::User;
use crate::db;
use rusqlite::Connection;
use std::path::Path;
use std::rc::Rc;

pub const SESSION_KEY: &str = "session.user";

/// Where the logged-in user is kept between runs.
pub trait SessionStore {
    fn load(&self) -> anyhow::Result<Option<User>>;
    fn save(&mut self, user: &User) -> anyhow::Result<()>;
    fn clear(&mut self) -> anyhow::Result<()>;
}

/// Used until a workspace is selected; nothing survives a restart.
#[derive(Debug, Default)]
pub struct MemoryStore {
    user: Option<User>,
}

impl SessionStore for MemoryStore {
    fn load(&self) -> anyhow::Result<Option<User>> {
        Ok(self.user.clone())
    }

    fn save(&mut self, user: &User) -> anyhow::Result<()> {
        self.user = Some(user.clone());
        Ok(())
    }

    fn clear(&mut self) -> anyhow::Result<()> {
        self.user = None;
        Ok(())
    }
}

/// The `session.user` row of the workspace settings table. The connection
/// is shared with the rest of the daemon's settings reads.
pub struct WorkspaceStore {
    conn: Rc<Connection>,
}

impl WorkspaceStore {
    pub fn open(workspace: &Path) -> anyhow::Result<Self> {
        Ok(WorkspaceStore {
            conn: Rc::new(db::open_db(workspace)?),
        })
    }

    pub fn connection(&self) -> Rc<Connection> {
        Rc::clone(&self.conn)
    }
}

impl SessionStore for WorkspaceStore {
    fn load(&self) -> anyhow::Result<Option<User>> {
        match db::settings_get_json(&self.conn, SESSION_KEY)? {
            Some(v) => Ok(Some(serde_json::from_value(v)?)),
            None => Ok(None),
        }
    }

    fn save(&mut self, user: &User) -> anyhow::Result<()> {
        db::settings_set_json(&self.conn, SESSION_KEY, &serde_json::to_value(user)?)
    }

    fn clear(&mut self) -> anyhow::Result<()> {
        db::settings_delete(&self.conn, SESSION_KEY)
    }
}
