use strum::{Display, EnumIter};
use strum_macros::EnumDiscriminants;

use super::refresh::{Entity, Refresh, RefreshHooks};
use crate::{
    api::models::{
        Asistencia, Convocatoria, Equipo, FilaAsistidor, FilaGoleador, FilaMencion, FilaMvp,
        FilaPosicion, Jugador, JugadorConRol, Modalidad, Noticia, Oferta, Partido, Torneo,
    },
    session::Session,
};

/// Everything the store knows. Front-ends only ever read this.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct State {
    pub session: Option<Session>,
    pub jugadores: Vec<Jugador>,
    pub players_with_roles: Vec<JugadorConRol>,
    pub torneos: Vec<Torneo>,
    pub equipos: Vec<Equipo>,
    pub partidos: Vec<Partido>,
    /// Newest first.
    pub asistencias: Vec<Asistencia>,
    pub tabla_goleadores: Vec<FilaGoleador>,
    pub tabla_asistidores: Vec<FilaAsistidor>,
    /// The standings table.
    pub tabla_equipos: Vec<FilaPosicion>,
    pub tabla_mvps: Vec<FilaMvp>,
    pub tabla_menciones: Vec<FilaMencion>,
    pub convocatorias: Vec<Convocatoria>,
    pub ofertas: Vec<Oferta>,
    pub noticias: Vec<Noticia>,
    pub torneo_seleccionado: Option<Torneo>,
    /// The modality of the last `get_convocatorias` call.
    pub convocatorias_modalidad: Option<Modalidad>,
    /// The parameters of the last `get_ofertas` call.
    pub ofertas_query: Option<OfertasQuery>,
    /// Where logged out users are sent.
    pub home_route: String,
    /// A navigation the front-end has not carried out yet.
    pub redirect: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OfertasQuery {
    pub jugador_id: i64,
    pub modalidad: Modalidad,
}

/// One cached collection, with its data.
#[derive(Debug, Clone, PartialEq, EnumDiscriminants)]
#[strum_discriminants(name(SliceKey), derive(Hash, Display, EnumIter))]
pub enum Slice {
    Jugadores(Vec<Jugador>),
    PlayersWithRoles(Vec<JugadorConRol>),
    Torneos(Vec<Torneo>),
    Equipos(Vec<Equipo>),
    Partidos(Vec<Partido>),
    Asistencias(Vec<Asistencia>),
    TablaGoleadores(Vec<FilaGoleador>),
    TablaAsistidores(Vec<FilaAsistidor>),
    TablaEquipos(Vec<FilaPosicion>),
    TablaMvps(Vec<FilaMvp>),
    TablaMenciones(Vec<FilaMencion>),
    Convocatorias(Vec<Convocatoria>),
    Ofertas(Vec<Oferta>),
    Noticias(Vec<Noticia>),
}

impl Slice {
    pub fn empty(key: SliceKey) -> Self {
        match key {
            SliceKey::Jugadores => Slice::Jugadores(Vec::new()),
            SliceKey::PlayersWithRoles => Slice::PlayersWithRoles(Vec::new()),
            SliceKey::Torneos => Slice::Torneos(Vec::new()),
            SliceKey::Equipos => Slice::Equipos(Vec::new()),
            SliceKey::Partidos => Slice::Partidos(Vec::new()),
            SliceKey::Asistencias => Slice::Asistencias(Vec::new()),
            SliceKey::TablaGoleadores => Slice::TablaGoleadores(Vec::new()),
            SliceKey::TablaAsistidores => Slice::TablaAsistidores(Vec::new()),
            SliceKey::TablaEquipos => Slice::TablaEquipos(Vec::new()),
            SliceKey::TablaMvps => Slice::TablaMvps(Vec::new()),
            SliceKey::TablaMenciones => Slice::TablaMenciones(Vec::new()),
            SliceKey::Convocatorias => Slice::Convocatorias(Vec::new()),
            SliceKey::Ofertas => Slice::Ofertas(Vec::new()),
            SliceKey::Noticias => Slice::Noticias(Vec::new()),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Slice::Jugadores(v) => v.len(),
            Slice::PlayersWithRoles(v) => v.len(),
            Slice::Torneos(v) => v.len(),
            Slice::Equipos(v) => v.len(),
            Slice::Partidos(v) => v.len(),
            Slice::Asistencias(v) => v.len(),
            Slice::TablaGoleadores(v) => v.len(),
            Slice::TablaAsistidores(v) => v.len(),
            Slice::TablaEquipos(v) => v.len(),
            Slice::TablaMvps(v) => v.len(),
            Slice::TablaMenciones(v) => v.len(),
            Slice::Convocatorias(v) => v.len(),
            Slice::Ofertas(v) => v.len(),
            Slice::Noticias(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Something that happened and changes the state.
#[derive(Debug, Clone, PartialEq)]
pub enum Mutation {
    SessionStarted(Session),
    SessionEnded,
    Loaded(Slice),
    /// A read failed. The slice is emptied rather than left half stale.
    LoadFailed(SliceKey),
    /// A write went through on the backend.
    Mutated(Entity),
    TorneoSelected(Option<Torneo>),
    ConvocatoriasQueried(Modalidad),
    OfertasQueried(OfertasQuery),
}

/// Work the store has to carry out after a mutation has been applied.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    PersistSession(Session),
    ClearPersistedSession,
    Refresh(Refresh),
}

impl State {
    pub fn new(session: Option<Session>, home_route: impl Into<String>) -> Self {
        Self {
            session,
            home_route: home_route.into(),
            ..Default::default()
        }
    }

    /// Apply a mutation, returning the next state and the effects it calls for.
    pub fn reduce(mut self, mutation: Mutation, hooks: &RefreshHooks) -> (State, Vec<Effect>) {
        let mut effects = Vec::new();

        match mutation {
            Mutation::SessionStarted(session) => {
                effects.push(Effect::PersistSession(session.clone()));
                self.session = Some(session);
                self.redirect = None;
            }
            Mutation::SessionEnded => {
                self.session = None;
                // Only ever fetched with the old credentials
                self.players_with_roles.clear();
                self.ofertas.clear();
                self.ofertas_query = None;
                self.redirect = Some(self.home_route.clone());
                effects.push(Effect::ClearPersistedSession);
            }
            Mutation::Loaded(slice) => self.put(slice),
            Mutation::LoadFailed(key) => self.put(Slice::empty(key)),
            Mutation::Mutated(entity) => effects.extend(
                hooks
                    .for_entity(entity)
                    .iter()
                    .copied()
                    .map(Effect::Refresh),
            ),
            Mutation::TorneoSelected(torneo) => self.torneo_seleccionado = torneo,
            Mutation::ConvocatoriasQueried(modalidad) => {
                self.convocatorias_modalidad = Some(modalidad)
            }
            Mutation::OfertasQueried(query) => self.ofertas_query = Some(query),
        }

        (self, effects)
    }

    fn put(&mut self, slice: Slice) {
        match slice {
            Slice::Jugadores(v) => self.jugadores = v,
            Slice::PlayersWithRoles(v) => self.players_with_roles = v,
            Slice::Torneos(v) => self.torneos = v,
            Slice::Equipos(v) => self.equipos = v,
            Slice::Partidos(v) => self.partidos = v,
            Slice::Asistencias(v) => self.asistencias = v,
            Slice::TablaGoleadores(v) => self.tabla_goleadores = v,
            Slice::TablaAsistidores(v) => self.tabla_asistidores = v,
            Slice::TablaEquipos(v) => self.tabla_equipos = v,
            Slice::TablaMvps(v) => self.tabla_mvps = v,
            Slice::TablaMenciones(v) => self.tabla_menciones = v,
            Slice::Convocatorias(v) => self.convocatorias = v,
            Slice::Ofertas(v) => self.ofertas = v,
            Slice::Noticias(v) => self.noticias = v,
        }
    }

    /// Whether the slice for `key` currently holds nothing.
    pub fn is_slice_empty(&self, key: SliceKey) -> bool {
        match key {
            SliceKey::Jugadores => self.jugadores.is_empty(),
            SliceKey::PlayersWithRoles => self.players_with_roles.is_empty(),
            SliceKey::Torneos => self.torneos.is_empty(),
            SliceKey::Equipos => self.equipos.is_empty(),
            SliceKey::Partidos => self.partidos.is_empty(),
            SliceKey::Asistencias => self.asistencias.is_empty(),
            SliceKey::TablaGoleadores => self.tabla_goleadores.is_empty(),
            SliceKey::TablaAsistidores => self.tabla_asistidores.is_empty(),
            SliceKey::TablaEquipos => self.tabla_equipos.is_empty(),
            SliceKey::TablaMvps => self.tabla_mvps.is_empty(),
            SliceKey::TablaMenciones => self.tabla_menciones.is_empty(),
            SliceKey::Convocatorias => self.convocatorias.is_empty(),
            SliceKey::Ofertas => self.ofertas.is_empty(),
            SliceKey::Noticias => self.noticias.is_empty(),
        }
    }
}

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator;

    use super::*;
    use crate::api::models::{Formato, Role};

    fn session() -> Session {
        Session {
            token: "t".to_string(),
            role: Role::Admin,
            jugador_id: Some(7),
        }
    }

    fn torneo(id: i64) -> Torneo {
        Torneo {
            id,
            nombre: format!("Liga {id}"),
            modalidad: "OHB".to_string(),
            formato: Formato::Liga,
        }
    }

    #[test]
    fn login_persists_the_session() {
        let (state, effects) = State::new(None, "/")
            .reduce(Mutation::SessionStarted(session()), &RefreshHooks::default());

        assert_eq!(state.session, Some(session()));
        assert_eq!(effects, vec![Effect::PersistSession(session())]);
    }

    #[test]
    fn logout_clears_session_and_redirects_home() {
        let mut start = State::new(Some(session()), "/liga/");
        start.torneos = vec![torneo(1)];

        let (state, effects) = start.reduce(Mutation::SessionEnded, &RefreshHooks::default());

        assert_eq!(state.session, None);
        assert_eq!(state.redirect.as_deref(), Some("/liga/"));
        assert_eq!(effects, vec![Effect::ClearPersistedSession]);
        // Public data survives a logout
        assert_eq!(state.torneos, vec![torneo(1)]);
    }

    #[test]
    fn failed_load_empties_only_its_slice() {
        let mut start = State::new(None, "/");
        start.torneos = vec![torneo(1), torneo(2)];
        start.tabla_goleadores = vec![FilaGoleador {
            jugador: "Pepe".to_string(),
            equipo: None,
            goles: 3,
        }];

        let (state, effects) = start.reduce(
            Mutation::LoadFailed(SliceKey::Torneos),
            &RefreshHooks::default(),
        );

        assert!(state.torneos.is_empty());
        assert_eq!(state.tabla_goleadores.len(), 1);
        assert!(effects.is_empty());
    }

    #[test]
    fn every_key_empties_its_own_slice() {
        for key in SliceKey::iter() {
            let empty = Slice::empty(key);
            assert_eq!(SliceKey::from(&empty), key);
            assert!(empty.is_empty());

            let (state, _) =
                State::default().reduce(Mutation::LoadFailed(key), &RefreshHooks::default());
            assert!(state.is_slice_empty(key));
        }
    }

    #[test]
    fn mutation_emits_registered_refreshes() {
        let (state, effects) = State::default().reduce(
            Mutation::Mutated(Entity::Jugador),
            &RefreshHooks::default(),
        );

        assert_eq!(state, State::default());
        assert_eq!(
            effects,
            vec![
                Effect::Refresh(Refresh::Jugadores),
                Effect::Refresh(Refresh::PlayersWithRoles)
            ]
        );
    }

    #[test]
    fn loaded_overwrites_previous_contents() {
        let mut start = State::default();
        start.torneos = vec![torneo(1)];

        let (state, _) = start.reduce(
            Mutation::Loaded(Slice::Torneos(vec![torneo(2), torneo(3)])),
            &RefreshHooks::default(),
        );

        assert_eq!(state.torneos, vec![torneo(2), torneo(3)]);
    }
}
