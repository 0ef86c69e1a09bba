//! Helpers shared by the store tests.

use std::sync::atomic::{AtomicUsize, Ordering};

use super::Store;
use crate::{
    api::{mock::MockTransport, models::Role},
    session::{MemorySessionStore, Session, SessionStore},
    ClientError,
};

pub const TOKEN: &str = "t";
pub const HOME: &str = "/habbofutbol/";

/// A memory session store that counts how often it is written to and cleared.
#[derive(Debug, Default)]
pub struct CountingSessionStore {
    inner: MemorySessionStore,
    saves: AtomicUsize,
    clears: AtomicUsize,
}

impl CountingSessionStore {
    pub fn with_session(session: Session) -> Self {
        Self {
            inner: MemorySessionStore::with_session(session),
            ..Default::default()
        }
    }

    pub fn saves(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }

    pub fn clears(&self) -> usize {
        self.clears.load(Ordering::SeqCst)
    }

    pub fn saved(&self) -> Option<Session> {
        self.inner.load().unwrap()
    }
}

impl SessionStore for CountingSessionStore {
    fn load(&self) -> Result<Option<Session>, ClientError> {
        self.inner.load()
    }

    fn save(&self, session: &Session) -> Result<(), ClientError> {
        self.saves.fetch_add(1, Ordering::SeqCst);
        self.inner.save(session)
    }

    fn clear(&self) -> Result<(), ClientError> {
        self.clears.fetch_add(1, Ordering::SeqCst);
        self.inner.clear()
    }
}

pub type TestStore = Store<MockTransport, CountingSessionStore>;

pub fn anonymous(mock: MockTransport) -> TestStore {
    Store::new(mock, CountingSessionStore::default(), HOME)
}

pub fn logged_in(mock: MockTransport, role: Role) -> TestStore {
    let session = Session {
        token: TOKEN.to_string(),
        role,
        jugador_id: Some(7),
    };
    Store::new(mock, CountingSessionStore::with_session(session), HOME)
}
