use std::collections::HashMap;

use strum::{Display, EnumIter};

/// The kinds of backend records a write action can change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
pub enum Entity {
    Torneo,
    Equipo,
    Jugador,
    /// A player joining or leaving a team.
    Membresia,
    Partido,
    Convocatoria,
    Oferta,
    Noticia,
    Asistencia,
}

/// A read action that can be re-run to bring a cached collection back in line with the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Refresh {
    Torneos,
    Equipos,
    Jugadores,
    PlayersWithRoles,
    Partidos,
    /// Re-run with the last modality that was queried.
    Convocatorias,
    /// Re-run with the last player and modality that were queried.
    Ofertas,
    Noticias,
    Asistencias,
}

/// Which reads to re-run after a successful write, per entity.
///
/// Every write action goes through these rules instead of refetching by hand.
#[derive(Debug, Clone)]
pub struct RefreshHooks {
    hooks: HashMap<Entity, Vec<Refresh>>,
}

impl RefreshHooks {
    /// No rules at all. Writes will not refresh anything.
    pub fn empty() -> Self {
        Self {
            hooks: HashMap::new(),
        }
    }

    /// Re-run `refresh` after every successful write to `entity`.
    ///
    /// Registering the same pair twice has no effect.
    pub fn register(&mut self, entity: Entity, refresh: Refresh) -> &mut Self {
        let refreshes = self.hooks.entry(entity).or_default();
        if !refreshes.contains(&refresh) {
            refreshes.push(refresh);
        }
        self
    }

    pub fn for_entity(&self, entity: Entity) -> &[Refresh] {
        self.hooks.get(&entity).map(Vec::as_slice).unwrap_or_default()
    }
}

impl Default for RefreshHooks {
    fn default() -> Self {
        let mut hooks = Self::empty();
        hooks
            .register(Entity::Torneo, Refresh::Torneos)
            .register(Entity::Equipo, Refresh::Equipos)
            .register(Entity::Jugador, Refresh::Jugadores)
            .register(Entity::Jugador, Refresh::PlayersWithRoles)
            .register(Entity::Membresia, Refresh::Jugadores)
            .register(Entity::Partido, Refresh::Partidos)
            .register(Entity::Convocatoria, Refresh::Convocatorias)
            .register(Entity::Oferta, Refresh::Ofertas)
            // An accepted offer moves the player to a new team
            .register(Entity::Oferta, Refresh::Jugadores)
            .register(Entity::Noticia, Refresh::Noticias)
            .register(Entity::Asistencia, Refresh::Asistencias);
        hooks
    }
}
