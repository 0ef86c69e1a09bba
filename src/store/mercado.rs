use serde_json::json;
use tracing::debug;

use super::{Access, ActionResult, Entity, Mutation, OfertasQuery, Slice, SliceKey, Store};
use crate::{
    api::{models::Modalidad, ApiRequest, Transport},
    session::SessionStore,
    utils::{error::ValidationError, validation::is_blank},
};

impl<T, S> Store<T, S>
where
    T: Transport,
    S: SessionStore,
{
    /// Load the open calls of a modality. The modality is remembered for later refreshes.
    pub async fn get_convocatorias(&self, modalidad: Modalidad) {
        self.apply(Mutation::ConvocatoriasQueried(modalidad)).await;
        self.load_slice(
            SliceKey::Convocatorias,
            ApiRequest::get("convocatorias").query("modalidad", modalidad),
            Access::Public,
            Slice::Convocatorias,
        )
        .await;
    }

    /// Post a call for a team on behalf of a player.
    pub async fn crear_convocatoria(
        &self,
        jugador_id: i64,
        mensaje: &str,
        modalidad: Modalidad,
    ) -> ActionResult {
        if is_blank(mensaje) {
            return ValidationError::EmptyMessage.into();
        }

        self.mutate(
            ApiRequest::post("jugador/crear_convocatoria").json(json!({
                "jugador_id": jugador_id,
                "mensaje": mensaje.trim(),
                "modalidad": modalidad,
            })),
            Access::Optional,
            Entity::Convocatoria,
            "Convocatoria publicada",
            "No se pudo publicar la convocatoria",
        )
        .await
    }

    pub async fn eliminar_convocatoria(&self, convocatoria_id: i64) -> ActionResult {
        self.mutate(
            ApiRequest::delete(format!("convocatorias/{}", convocatoria_id)),
            Access::Optional,
            Entity::Convocatoria,
            "Convocatoria eliminada",
            "No se pudo eliminar la convocatoria",
        )
        .await
    }

    /// Load the offers a player has received in a modality.
    pub async fn get_ofertas(&self, jugador_id: i64, modalidad: Modalidad) {
        self.apply(Mutation::OfertasQueried(OfertasQuery {
            jugador_id,
            modalidad,
        }))
        .await;
        self.load_slice(
            SliceKey::Ofertas,
            ApiRequest::get("ofertas")
                .query("jugador_id", jugador_id)
                .query("modalidad", modalidad),
            Access::Optional,
            Slice::Ofertas,
        )
        .await;
    }

    /// Offer a player a place in one of the coach's teams.
    ///
    /// The ids usually come from selections the user may not have made yet, so any of them can
    /// be missing. Nothing is sent in that case.
    pub async fn enviar_oferta(
        &self,
        dt_id: Option<i64>,
        jugador_id: Option<i64>,
        equipo_id: Option<i64>,
    ) -> ActionResult {
        let (Some(dt_id), Some(jugador_id), Some(equipo_id)) = (dt_id, jugador_id, equipo_id) else {
            debug!("Not sending offer: dt {dt_id:?}, player {jugador_id:?}, team {equipo_id:?}");
            return ValidationError::MissingFields.into();
        };

        self.mutate(
            ApiRequest::post("dt/ofertar").json(json!({
                "dt_id": dt_id,
                "jugador_id": jugador_id,
                "equipo_id": equipo_id,
            })),
            Access::Required,
            Entity::Oferta,
            "Oferta enviada",
            "No se pudo enviar la oferta",
        )
        .await
    }

    pub async fn aceptar_oferta(&self, oferta_id: i64) -> ActionResult {
        self.mutate(
            ApiRequest::post("jugador/aceptar_oferta").json(json!({ "oferta_id": oferta_id })),
            Access::Required,
            Entity::Oferta,
            "Oferta aceptada",
            "No se pudo aceptar la oferta",
        )
        .await
    }
}
