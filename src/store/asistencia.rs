use serde_json::json;

use super::{Access, ActionResult, Entity, Slice, SliceKey, Store};
use crate::{
    api::{models::Asistencia, ApiRequest, Transport},
    session::SessionStore,
    utils::{error::ValidationError, validation::is_blank},
};

impl<T, S> Store<T, S>
where
    T: Transport,
    S: SessionStore,
{
    /// Load the attendance list, newest check-in first.
    ///
    /// Admins get the IP of each check-in as well, so the token goes along when there is one.
    pub async fn obtener_asistencias(&self) {
        self.load_slice(
            SliceKey::Asistencias,
            ApiRequest::get("asistencia"),
            Access::Optional,
            |mut asistencias: Vec<Asistencia>| {
                asistencias.reverse();
                Slice::Asistencias(asistencias)
            },
        )
        .await;
    }

    pub async fn registrar_asistencia(&self, nombre: &str) -> ActionResult {
        if is_blank(nombre) {
            return ValidationError::MissingField("nombre").into();
        }

        self.mutate(
            ApiRequest::post("asistencia").json(json!({ "nombre": nombre.trim() })),
            Access::Public,
            Entity::Asistencia,
            "Asistencia registrada",
            "No se pudo registrar la asistencia",
        )
        .await
    }
}
