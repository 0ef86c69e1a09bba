use serde_json::json;

use super::{Access, ActionResult, Entity, Mutation, Slice, SliceKey, Store};
use crate::{
    api::{
        models::{Formato, Modalidad, Torneo},
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
    pub async fn get_torneos(&self) {
        self.load_slice(
            SliceKey::Torneos,
            ApiRequest::get("torneos"),
            Access::Public,
            Slice::Torneos,
        )
        .await;
    }

    /// Load only the tournaments of one modality into the tournaments slice.
    pub async fn get_torneos_por_modalidad(&self, modalidad: Modalidad) {
        self.load_slice(
            SliceKey::Torneos,
            ApiRequest::get("torneos").query("modalidad", modalidad),
            Access::Public,
            Slice::Torneos,
        )
        .await;
    }

    pub async fn crear_torneo(
        &self,
        nombre: &str,
        modalidad: Modalidad,
        formato: Formato,
    ) -> ActionResult {
        if is_blank(nombre) {
            return ValidationError::MissingField("nombre").into();
        }

        let request = ApiRequest::post("torneos").json(json!({
            "nombre": nombre.trim(),
            "modalidad": modalidad,
            "formato": formato,
        }));
        self.mutate(
            request,
            Access::Optional,
            Entity::Torneo,
            "Torneo creado correctamente",
            "No se pudo crear el torneo",
        )
        .await
    }

    pub async fn eliminar_torneo(&self, torneo_id: i64) -> ActionResult {
        self.mutate(
            ApiRequest::delete(format!("torneos/{}", torneo_id)),
            Access::Required,
            Entity::Torneo,
            "Torneo eliminado",
            "No se pudo eliminar el torneo",
        )
        .await
    }

    /// Remember which tournament the front-end is looking at. Local only.
    pub async fn set_torneo_seleccionado(&self, torneo: Option<Torneo>) {
        self.apply(Mutation::TorneoSelected(torneo)).await;
    }
}
