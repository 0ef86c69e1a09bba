use tracing::error;

use super::{Access, ActionResult, Entity, Slice, SliceKey, Store, UNKNOWN_ERROR};
use crate::{
    api::{models::PartidoForm, ApiRequest, Transport},
    session::SessionStore,
    utils::error::ValidationError,
};

const JUEZ_POR_DEFECTO: &str = "Desconocido";
const SIN_OBSERVACIONES: &str = "Sin observaciones";

impl PartidoForm {
    /// Check every required id is set (non-zero) and the teams differ.
    ///
    /// An empty referee is missing, but one made only of spaces is accepted and later
    /// replaced by the default.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let required = [
            self.torneo_id,
            self.equipo_a_id,
            self.equipo_b_id,
            self.mvp_id,
            self.mencion_equipo_a_id,
            self.mencion_equipo_b_id,
        ];
        if required.contains(&0) || self.juez.is_empty() {
            return Err(ValidationError::MissingFields);
        }
        if self.equipo_a_id == self.equipo_b_id {
            return Err(ValidationError::SameTeam);
        }
        Ok(())
    }

    /// Fill in the defaults the backend expects.
    pub fn normalized(mut self) -> Self {
        self.juez = match self.juez.trim() {
            "" => JUEZ_POR_DEFECTO.to_string(),
            juez => juez.to_string(),
        };
        self.observaciones = match self.observaciones.trim() {
            "" => SIN_OBSERVACIONES.to_string(),
            observaciones => observaciones.to_string(),
        };
        self.link_video = self
            .link_video
            .map(|link| link.trim().to_string())
            .filter(|link| link.starts_with("http"));
        self
    }
}

impl<T, S> Store<T, S>
where
    T: Transport,
    S: SessionStore,
{
    /// Load the match summaries.
    pub async fn obtener_resumenes(&self) {
        self.load_slice(
            SliceKey::Partidos,
            ApiRequest::get("partidos"),
            Access::Public,
            Slice::Partidos,
        )
        .await;
    }

    /// Register a finished match with all of its player statistics in one call.
    pub async fn registrar_partido(&self, form: PartidoForm) -> ActionResult {
        if let Err(e) = form.validate() {
            return e.into();
        }

        let body = match serde_json::to_value(form.normalized()) {
            Ok(body) => body,
            Err(e) => {
                error!("Error encoding match report: {}", e);
                return ActionResult::fail(UNKNOWN_ERROR);
            }
        };
        self.mutate(
            ApiRequest::post("partidos").json(body),
            Access::Required,
            Entity::Partido,
            "Partido registrado correctamente",
            "Error al registrar el partido",
        )
        .await
    }
}
