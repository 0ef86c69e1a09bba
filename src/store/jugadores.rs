use serde_json::json;

use super::{Access, ActionResult, Entity, Slice, SliceKey, Store};
use crate::{
    api::{
        models::{Modalidad, Role},
        ApiRequest, Transport,
    },
    session::SessionStore,
    utils::{error::ValidationError, validation::is_blank},
};

impl<T, S> Store<T, S>
where
    T: Transport,
    S: SessionStore,
{
    pub async fn get_jugadores(&self) {
        self.load_slice(
            SliceKey::Jugadores,
            ApiRequest::get("jugadores"),
            Access::Optional,
            Slice::Jugadores,
        )
        .await;
    }

    /// Every account with its role, for the role assignment screen.
    pub async fn get_players_with_roles(&self) {
        self.load_slice(
            SliceKey::PlayersWithRoles,
            ApiRequest::get("jugadores/roles"),
            Access::Required,
            Slice::PlayersWithRoles,
        )
        .await;
    }

    /// Create a player that has no account yet, known only by their Habbo nick.
    pub async fn create_player_by_admin(&self, nickhabbo: &str) -> ActionResult {
        if is_blank(nickhabbo) {
            return ValidationError::MissingField("nickhabbo").into();
        }

        self.mutate(
            ApiRequest::post("jugadores/admin").json(json!({ "nickhabbo": nickhabbo.trim() })),
            Access::Required,
            Entity::Jugador,
            "Jugador creado correctamente",
            "No se pudo crear el jugador",
        )
        .await
    }

    pub async fn update_player_nick(&self, jugador_id: i64, nickhabbo: &str) -> ActionResult {
        if is_blank(nickhabbo) {
            return ValidationError::MissingField("nickhabbo").into();
        }

        self.mutate(
            ApiRequest::put(format!("jugadores/{}", jugador_id))
                .json(json!({ "nickhabbo": nickhabbo.trim() })),
            Access::Required,
            Entity::Jugador,
            "Nick actualizado",
            "No se pudo actualizar el nick",
        )
        .await
    }

    pub async fn update_player_role(&self, jugador_id: i64, role: Role) -> ActionResult {
        self.mutate(
            ApiRequest::put("jugadores/rol").json(json!({
                "jugador_id": jugador_id,
                "role": role,
            })),
            Access::Required,
            Entity::Jugador,
            "Rol actualizado",
            "No se pudo actualizar el rol",
        )
        .await
    }

    pub async fn delete_player(&self, jugador_id: i64) -> ActionResult {
        self.mutate(
            ApiRequest::delete(format!("jugadores/{}", jugador_id)),
            Access::Required,
            Entity::Jugador,
            "Jugador eliminado",
            "No se pudo eliminar el jugador",
        )
        .await
    }

    /// Sign a player to a team. Admin route; the modality is only sent when given.
    pub async fn add_player_to_team(
        &self,
        jugador_id: i64,
        equipo_id: i64,
        modalidad: Option<Modalidad>,
    ) -> ActionResult {
        let mut body = json!({
            "jugador_id": jugador_id,
            "equipo_id": equipo_id,
        });
        if let Some(modalidad) = modalidad {
            body["modalidad"] = json!(modalidad);
        }

        self.mutate(
            ApiRequest::post("admin/players/add_team").json(body),
            Access::Required,
            Entity::Membresia,
            "Jugador añadido correctamente",
            "Error al añadir jugador al equipo",
        )
        .await
    }

    pub async fn remove_player_from_team(&self, jugador_id: i64, equipo_id: i64) -> ActionResult {
        self.mutate(
            ApiRequest::delete("remove_team").json(json!({
                "player_id": jugador_id,
                "team_id": equipo_id,
            })),
            Access::Optional,
            Entity::Membresia,
            "Jugador retirado del equipo",
            "Error al eliminar el equipo.",
        )
        .await
    }

    /// Add a player to a team through the team's own roster route.
    pub async fn agregar_jugador_a_equipo(&self, equipo_id: i64, jugador_id: i64) -> ActionResult {
        self.mutate(
            ApiRequest::post(format!("equipos/{}/jugadores", equipo_id))
                .json(json!({ "jugador_id": jugador_id })),
            Access::Optional,
            Entity::Membresia,
            "Jugador agregado al equipo",
            "No se pudo agregar el jugador al equipo",
        )
        .await
    }

    pub async fn eliminar_jugador_de_equipo(&self, equipo_id: i64, jugador_id: i64) -> ActionResult {
        self.mutate(
            ApiRequest::delete(format!("equipos/{}/jugadores/{}", equipo_id, jugador_id)),
            Access::Optional,
            Entity::Membresia,
            "Jugador eliminado del equipo",
            "No se pudo eliminar el jugador del equipo",
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use serde_json::json;

    use super::*;
    use crate::{
        api::{mock::MockTransport, Method, RequestBody},
        store::testing::*,
    };

    fn jugadores_json() -> serde_json::Value {
        json!([
            {"id": 7, "nickhabbo": "Vale", "role": "admin", "equipos": [
                {"id": 1, "nombre": "Los Pibes", "modalidad": "OHB"}
            ]},
            {"id": 8, "nickhabbo": "Lola"}
        ])
    }

    #[tokio::test]
    async fn loads_players_with_their_teams() {
        let mock = MockTransport::new();
        mock.respond(Method::GET, "jugadores", 200, jugadores_json());
        let store = anonymous(mock);

        store.get_jugadores().await;

        let jugadores = store.state().await.jugadores;
        assert_eq!(jugadores.len(), 2);
        assert_eq!(jugadores[0].equipos[0].nombre, "Los Pibes");
        assert_eq!(jugadores[1].role, None);
    }

    #[tokio::test]
    async fn role_change_refreshes_both_player_lists() {
        let mock = MockTransport::new();
        mock.respond(Method::PUT, "jugadores/rol", 200, json!({}))
            .respond(Method::GET, "jugadores", 200, jugadores_json())
            .respond(
                Method::GET,
                "jugadores/roles",
                200,
                json!([{"id": 8, "nickhabbo": "Lola", "role": "dt"}]),
            );
        let store = logged_in(mock, Role::Superadmin);

        let result = store.update_player_role(8, Role::Dt).await;

        assert!(result.success);
        let mock = store.transport();
        assert_eq!(
            mock.requests_to(Method::PUT, "jugadores/rol")[0].body,
            RequestBody::Json(json!({"jugador_id": 8, "role": "dt"}))
        );
        let state = store.state().await;
        assert_eq!(state.jugadores.len(), 2);
        assert_eq!(state.players_with_roles[0].role, Role::Dt);
    }

    #[tokio::test]
    async fn admin_writes_need_a_session() {
        let store = anonymous(MockTransport::new());

        assert!(!store.create_player_by_admin("Nuevo").await.success);
        assert!(!store.update_player_nick(1, "Otro").await.success);
        assert!(!store.delete_player(1).await.success);
        assert!(!store.add_player_to_team(1, 2, None).await.success);
        assert_eq!(store.transport().request_count(), 0);
    }

    #[tokio::test]
    async fn blank_nick_is_rejected_locally() {
        let store = logged_in(MockTransport::new(), Role::Admin);

        let result = store.update_player_nick(1, " ").await;

        assert_eq!(
            result,
            ActionResult::from(ValidationError::MissingField("nickhabbo"))
        );
        assert_eq!(store.transport().request_count(), 0);
    }

    #[tokio::test]
    async fn signing_sends_modality_only_when_given() {
        let mock = MockTransport::new();
        mock.respond(Method::POST, "admin/players/add_team", 200, json!({}))
            .respond(Method::GET, "jugadores", 200, json!([]));
        let store = logged_in(mock, Role::Admin);

        store.add_player_to_team(8, 1, None).await;
        store.add_player_to_team(8, 2, Some(Modalidad::Hes)).await;

        let sent = store
            .transport()
            .requests_to(Method::POST, "admin/players/add_team");
        assert_eq!(
            sent[0].body,
            RequestBody::Json(json!({"jugador_id": 8, "equipo_id": 1}))
        );
        assert_eq!(
            sent[1].body,
            RequestBody::Json(json!({"jugador_id": 8, "equipo_id": 2, "modalidad": "HES"}))
        );
        assert_eq!(sent[0].bearer.as_deref(), Some(TOKEN));
    }

    #[tokio::test]
    async fn membership_change_refreshes_players() {
        let mock = MockTransport::new();
        mock.respond(Method::DELETE, "equipos/1/jugadores/8", 200, json!({}))
            .respond(Method::GET, "jugadores", 200, jugadores_json());
        let store = anonymous(mock);

        let result = store.eliminar_jugador_de_equipo(1, 8).await;

        assert_eq!(result, ActionResult::ok("Jugador eliminado del equipo"));
        assert_eq!(
            store.transport().requests_to(Method::GET, "jugadores").len(),
            1
        );
    }

    #[tokio::test]
    async fn roles_loaded_after_logout_are_dropped() {
        let mock = MockTransport::new();
        mock.respond_after(
            Method::GET,
            "jugadores/roles",
            Duration::from_millis(30),
            200,
            json!([{"id": 8, "nickhabbo": "Lola", "role": "dt"}]),
        );
        let store = logged_in(mock, Role::Admin);

        let logout = async {
            tokio::time::sleep(Duration::from_millis(5)).await;
            store.logout().await;
        };
        futures::join!(store.get_players_with_roles(), logout);

        let state = store.state().await;
        assert_eq!(state.session, None);
        assert!(state.players_with_roles.is_empty());
    }
}
