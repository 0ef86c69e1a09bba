use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio::sync::RwLock;
use tracing::{debug, error, warn};

use crate::{
    api::{models::Role, ApiRequest, ApiResult, Transport},
    session::{Session, SessionStore},
    utils::error::ValidationError,
    ClientError,
};

pub use refresh::{Entity, Refresh, RefreshHooks};
pub use state::{Effect, Mutation, OfertasQuery, Slice, SliceKey, State};

mod asistencia;
mod auth;
mod equipos;
mod jugadores;
mod mercado;
mod noticias;
mod partidos;
/// Which reads to re-run after each kind of write.
pub mod refresh;
/// The state value and its reducer.
pub mod state;
mod tablas;
mod torneos;

#[cfg(test)]
pub(crate) mod testing;

pub use equipos::EquipoForm;
pub use noticias::{Imagen, NoticiaForm};

pub const CONNECTION_ERROR: &str = "Error de conexión con el servidor";
pub const SESSION_EXPIRED: &str = "Tu sesión ha expirado. Inicia sesión nuevamente.";
pub const UNKNOWN_ERROR: &str = "Ocurrió un error inesperado. Inténtalo de nuevo.";

/// The outcome of a write action, ready to be shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionResult {
    pub success: bool,
    pub message: String,
}

impl ActionResult {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }

    pub fn fail(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}

impl From<ValidationError> for ActionResult {
    fn from(error: ValidationError) -> Self {
        ActionResult::fail(error.to_string())
    }
}

/// Whether a request carries the session's bearer token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// Never sent with a token.
    Public,
    /// Sent with the token if there is a session, anonymously otherwise.
    Optional,
    /// Needs a session. Without one the request is not sent at all.
    Required,
}

/// The client-side store.
///
/// Owns the session and every cached collection, and is the only thing that talks to the
/// backend. Actions take `&self` and can run concurrently; the state lock is never held while a
/// request is in flight.
pub struct Store<T: Transport, S: SessionStore> {
    transport: T,
    sessions: S,
    hooks: RefreshHooks,
    state: RwLock<State>,
}

impl<T, S> Store<T, S>
where
    T: Transport,
    S: SessionStore,
{
    /// Create a store, picking up the session saved by a previous run if there is one.
    pub fn new(transport: T, sessions: S, home_route: impl Into<String>) -> Self {
        let session = match sessions.load() {
            Ok(session) => session,
            Err(e) => {
                warn!("Ignoring saved session: {:#}", e);
                None
            }
        };
        if let Some(session) = &session {
            debug!("Restored session with role {}", session.role);
        }

        Self {
            transport,
            sessions,
            hooks: RefreshHooks::default(),
            state: RwLock::new(State::new(session, home_route)),
        }
    }

    /// Replace the default refresh rules.
    pub fn with_hooks(mut self, hooks: RefreshHooks) -> Self {
        self.hooks = hooks;
        self
    }

    /// A copy of the whole state as it is right now.
    pub async fn state(&self) -> State {
        self.state.read().await.clone()
    }

    pub async fn session(&self) -> Option<Session> {
        self.state.read().await.session.clone()
    }

    pub async fn is_authenticated(&self) -> bool {
        self.state.read().await.session.is_some()
    }

    pub async fn role(&self) -> Option<Role> {
        self.state.read().await.session.as_ref().map(|s| s.role)
    }

    /// Hand the pending navigation over to the front-end, if there is one.
    pub async fn take_redirect(&self) -> Option<String> {
        self.state.write().await.redirect.take()
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn sessions(&self) -> &S {
        &self.sessions
    }

    async fn token(&self) -> Option<String> {
        self.state
            .read()
            .await
            .session
            .as_ref()
            .map(|s| s.token.clone())
    }

    /// Apply a mutation and carry out its session effects.
    ///
    /// Returns the refreshes it asked for. They are left to the caller so that no read runs
    /// while the lock is held.
    pub async fn apply(&self, mutation: Mutation) -> Vec<Refresh> {
        self.apply_if(mutation, |_| true)
            .await
            .unwrap_or_default()
    }

    /// Like [`Store::apply`], but only if `guard` holds for the state under the same lock.
    async fn apply_if<F>(&self, mutation: Mutation, guard: F) -> Option<Vec<Refresh>>
    where
        F: FnOnce(&State) -> bool,
    {
        let effects = {
            let mut state = self.state.write().await;
            if !guard(&*state) {
                return None;
            }
            let current = std::mem::take(&mut *state);
            let (next, effects) = current.reduce(mutation, &self.hooks);
            *state = next;
            effects
        };

        let mut refreshes = Vec::new();
        for effect in effects {
            match effect {
                Effect::PersistSession(session) => {
                    if let Err(e) = self.sessions.save(&session) {
                        error!("Error saving session: {:#}", e);
                    }
                }
                Effect::ClearPersistedSession => {
                    if let Err(e) = self.sessions.clear() {
                        error!("Error clearing saved session: {:#}", e);
                    }
                }
                Effect::Refresh(refresh) => refreshes.push(refresh),
            }
        }
        Some(refreshes)
    }

    /// Re-run the given reads, one after the other.
    ///
    /// Reads that depend on a query skip themselves if that query was never made.
    pub async fn run_refreshes(&self, refreshes: Vec<Refresh>) {
        for refresh in refreshes {
            debug!("Refreshing {}", refresh);
            match refresh {
                Refresh::Torneos => self.get_torneos().await,
                Refresh::Equipos => self.get_equipos().await,
                Refresh::Jugadores => self.get_jugadores().await,
                Refresh::PlayersWithRoles => {
                    if self.is_authenticated().await {
                        self.get_players_with_roles().await;
                    }
                }
                Refresh::Partidos => self.obtener_resumenes().await,
                Refresh::Convocatorias => {
                    let modalidad = self.state.read().await.convocatorias_modalidad;
                    if let Some(modalidad) = modalidad {
                        self.get_convocatorias(modalidad).await;
                    }
                }
                Refresh::Ofertas => {
                    let query = self.state.read().await.ofertas_query;
                    if let Some(query) = query {
                        self.get_ofertas(query.jugador_id, query.modalidad).await;
                    }
                }
                Refresh::Noticias => self.obtener_noticias().await,
                Refresh::Asistencias => self.obtener_asistencias().await,
            }
        }
    }

    /// Send a request, attaching the bearer token as `access` asks.
    pub async fn fetch(
        &self,
        request: ApiRequest,
        access: Access,
    ) -> Result<ApiResult<Value>, ClientError> {
        let authenticated = match access {
            Access::Public => false,
            Access::Optional => self.is_authenticated().await,
            Access::Required => true,
        };
        if authenticated {
            return self.secure_fetch(request).await;
        }

        let response = self.transport.send(request).await?;
        Ok(ApiResult::from_response(response))
    }

    /// Fetch and decode a body without caching it anywhere.
    ///
    /// Any failure is logged and comes back as None.
    async fn lookup<M>(&self, request: ApiRequest, access: Access) -> Option<M>
    where
        M: DeserializeOwned,
    {
        let path = request.path.clone();
        match self
            .fetch(request, access)
            .await
            .and_then(|result| result.decode::<M>())
        {
            Ok(ApiResult::Ok(body)) => Some(body),
            Ok(ApiResult::Rejected { status, message }) => {
                error!(
                    "Error loading {}: {} {}",
                    path,
                    status,
                    message.unwrap_or_default()
                );
                None
            }
            Ok(ApiResult::SessionExpired) => {
                error!("Error loading {}: session expired", path);
                None
            }
            Ok(ApiResult::NoSession) => {
                debug!("Skipped loading {}: not logged in", path);
                None
            }
            Err(e) => {
                error!("Error loading {}: {:#}", path, e);
                None
            }
        }
    }

    /// Fetch a collection into its slice. On any failure the slice is emptied instead.
    ///
    /// Returns whether the load went through.
    async fn load_slice<M, F>(
        &self,
        key: SliceKey,
        request: ApiRequest,
        access: Access,
        wrap: F,
    ) -> bool
    where
        M: DeserializeOwned,
        F: FnOnce(Vec<M>) -> Slice,
    {
        // A read made with a token only counts while that token is still the session's
        let sent_token = match access {
            Access::Public => None,
            Access::Optional | Access::Required => self.token().await,
        };

        let mutation = match self.lookup::<Vec<M>>(request, access).await {
            Some(items) => {
                let slice = wrap(items);
                debug!("Loaded {} {}", slice.len(), key);
                Mutation::Loaded(slice)
            }
            None => Mutation::LoadFailed(key),
        };
        let loaded = matches!(mutation, Mutation::Loaded(_));
        let applied = self
            .apply_if(mutation, |state| match &sent_token {
                Some(token) => state.session.as_ref().is_some_and(|s| &s.token == token),
                None => true,
            })
            .await;
        if applied.is_none() {
            debug!("Dropped {}: the session changed while it loaded", key);
            return false;
        }
        loaded
    }

    /// Send a write and classify its outcome.
    ///
    /// On success returns the response body; on failure the result to hand to the user.
    async fn submit(
        &self,
        request: ApiRequest,
        access: Access,
        fallback: &str,
    ) -> Result<Value, ActionResult> {
        let path = request.path.clone();
        match self.fetch(request, access).await {
            Ok(ApiResult::Ok(body)) => Ok(body),
            Ok(ApiResult::Rejected { status, message }) => {
                error!(
                    "{} was rejected with {}: {}",
                    path,
                    status,
                    message.as_deref().unwrap_or("no message")
                );
                Err(ActionResult::fail(message.unwrap_or(fallback.to_string())))
            }
            Ok(ApiResult::SessionExpired) => Err(ActionResult::fail(SESSION_EXPIRED)),
            Ok(ApiResult::NoSession) => Err(ValidationError::NotAuthenticated.into()),
            Err(e) => {
                error!("Error sending {}: {:#}", path, e);
                Err(ActionResult::fail(CONNECTION_ERROR))
            }
        }
    }

    /// Send a write that changes `entity` and refresh the reads registered for it.
    ///
    /// The backend's own message wins over `success`. Caches are left alone on failure.
    async fn mutate(
        &self,
        request: ApiRequest,
        access: Access,
        entity: Entity,
        success: &str,
        fallback: &str,
    ) -> ActionResult {
        match self.submit(request, access, fallback).await {
            Ok(body) => {
                let refreshes = self.apply(Mutation::Mutated(entity)).await;
                self.run_refreshes(refreshes).await;
                ActionResult::ok(backend_message(&body).unwrap_or(success.to_string()))
            }
            Err(failure) => failure,
        }
    }

    /// Checks the local session is an admin or superadmin.
    async fn require_admin(&self) -> Result<(), ValidationError> {
        match self.role().await {
            None => Err(ValidationError::NotAuthenticated),
            Some(role) if role.is_admin() => Ok(()),
            Some(_) => Err(ValidationError::Forbidden),
        }
    }
}

fn backend_message(body: &Value) -> Option<String> {
    body.get("message")
        .and_then(Value::as_str)
        .map(str::to_string)
}
