use tracing::debug;

use super::{Access, Mutation, Slice, SliceKey, Store};
use crate::{
    api::{models::Torneo, ApiRequest, Transport},
    session::SessionStore,
};

/// `tablas/{name}`, or `tablas/{name}/{id}` for a single tournament.
fn tabla(name: &str, torneo_id: Option<i64>) -> ApiRequest {
    match torneo_id {
        Some(id) => ApiRequest::get(format!("tablas/{}/{}", name, id)),
        None => ApiRequest::get(format!("tablas/{}", name)),
    }
}

impl<T, S> Store<T, S>
where
    T: Transport,
    S: SessionStore,
{
    pub async fn get_tabla_goleadores(&self, torneo_id: i64) {
        self.load_slice(
            SliceKey::TablaGoleadores,
            tabla("goleadores", Some(torneo_id)),
            Access::Public,
            Slice::TablaGoleadores,
        )
        .await;
    }

    pub async fn get_tabla_asistidores(&self, torneo_id: i64) {
        self.load_slice(
            SliceKey::TablaAsistidores,
            tabla("asistidores", Some(torneo_id)),
            Access::Public,
            Slice::TablaAsistidores,
        )
        .await;
    }

    /// The standings of a tournament.
    pub async fn get_tabla_equipos(&self, torneo_id: i64) {
        self.load_slice(
            SliceKey::TablaEquipos,
            tabla("posiciones", Some(torneo_id)),
            Access::Public,
            Slice::TablaEquipos,
        )
        .await;
    }

    /// MVP counts for one tournament, or across all of them.
    pub async fn get_tabla_mvps(&self, torneo_id: Option<i64>) {
        self.load_slice(
            SliceKey::TablaMvps,
            tabla("mvps", torneo_id),
            Access::Public,
            Slice::TablaMvps,
        )
        .await;
    }

    /// Special mention counts for one tournament, or across all of them.
    pub async fn get_tabla_menciones(&self, torneo_id: Option<i64>) {
        self.load_slice(
            SliceKey::TablaMenciones,
            tabla("menciones", torneo_id),
            Access::Public,
            Slice::TablaMenciones,
        )
        .await;
    }

    /// Load every ranking table of a tournament at once.
    ///
    /// Knockout tournaments have no standings, so that table is emptied instead of fetched.
    pub async fn cargar_rankings(&self, torneo: &Torneo) {
        let standings = async {
            if torneo.formato.has_standings() {
                self.get_tabla_equipos(torneo.id).await;
            } else {
                debug!("{} is a knockout tournament, skipping standings", torneo.nombre);
                self.apply(Mutation::LoadFailed(SliceKey::TablaEquipos))
                    .await;
            }
        };

        futures::join!(
            self.get_tabla_goleadores(torneo.id),
            self.get_tabla_asistidores(torneo.id),
            standings,
            self.get_tabla_mvps(Some(torneo.id)),
            self.get_tabla_menciones(Some(torneo.id)),
        );
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use serde_json::json;

    use super::*;
    use crate::{
        api::{mock::MockTransport, models::Formato, Method},
        store::testing::*,
    };

    fn torneo(formato: Formato) -> Torneo {
        Torneo {
            id: 5,
            nombre: "Liga OHB".to_string(),
            modalidad: "OHB".to_string(),
            formato,
        }
    }

    fn scripted(mock: &MockTransport, delays: [u64; 5]) {
        let tables = [
            (
                "tablas/goleadores/5",
                json!([{"jugador": "Pepe", "equipo": "Los Pibes", "goles": 7}]),
            ),
            (
                "tablas/asistidores/5",
                json!([{"jugador": "Lola", "asistencias": 4}, {"jugador": "Ana", "asistencias": 2}]),
            ),
            (
                "tablas/posiciones/5",
                json!([{"equipo": "Los Pibes", "puntos": 9}, {"equipo": "Rayo", "puntos": 6},
                       {"equipo": "Sin liga", "puntos": 0}]),
            ),
            ("tablas/mvps/5", json!([{"nickhabbo": "Pepe", "mvps": 3}])),
            ("tablas/menciones/5", json!([])),
        ];
        for ((path, body), delay) in tables.into_iter().zip(delays) {
            mock.respond_after(Method::GET, path, Duration::from_millis(delay), 200, body);
        }
    }

    #[tokio::test]
    async fn concurrent_rankings_fill_their_own_slices() {
        // Reverse the completion order relative to the request order
        for delays in [[50, 40, 30, 20, 10], [10, 20, 30, 40, 50]] {
            let mock = MockTransport::new();
            scripted(&mock, delays);
            let store = anonymous(mock);

            store.cargar_rankings(&torneo(Formato::Liga)).await;

            let state = store.state().await;
            assert_eq!(state.tabla_goleadores.len(), 1);
            assert_eq!(state.tabla_goleadores[0].goles, 7);
            assert_eq!(state.tabla_asistidores.len(), 2);
            assert_eq!(state.tabla_equipos.len(), 3);
            assert_eq!(state.tabla_mvps[0].jugador, "Pepe");
            assert!(state.tabla_menciones.is_empty());
        }
    }

    #[tokio::test]
    async fn knockout_skips_standings() {
        let mock = MockTransport::new();
        scripted(&mock, [0; 5]);
        let store = anonymous(mock);
        store.get_tabla_equipos(5).await;
        assert_eq!(store.state().await.tabla_equipos.len(), 3);

        store.cargar_rankings(&torneo(Formato::Eliminacion)).await;

        let mock = store.transport();
        assert_eq!(mock.requests_to(Method::GET, "tablas/posiciones/5").len(), 1);
        assert!(store.state().await.tabla_equipos.is_empty());
        assert_eq!(store.state().await.tabla_goleadores.len(), 1);
    }

    #[tokio::test]
    async fn overall_tables_have_no_tournament_in_the_path() {
        let mock = MockTransport::new();
        mock.respond(Method::GET, "tablas/mvps", 200, json!([{"jugador": "Ana", "mvps": 1}]));
        let store = anonymous(mock);

        store.get_tabla_mvps(None).await;
        store.get_tabla_menciones(None).await;

        let state = store.state().await;
        assert_eq!(state.tabla_mvps.len(), 1);
        // Unscripted, so the mock answers 404
        assert!(state.tabla_menciones.is_empty());
        assert_eq!(
            store.transport().requests_to(Method::GET, "tablas/menciones").len(),
            1
        );
    }
}
