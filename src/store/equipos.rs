use super::{Access, ActionResult, Entity, Mutation, Slice, SliceKey, Store};
use crate::{
    api::{
        models::{Equipo, JugadorEquipo, Modalidad, Plantilla},
        ApiRequest, FileUpload, FormField, Transport,
    },
    session::SessionStore,
    utils::{error::ValidationError, validation::is_blank},
};

/// A new team, sent as a multipart form so that a logo can go along with it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EquipoForm {
    pub nombre: String,
    pub torneo_id: i64,
    pub modalidad: Option<Modalidad>,
    pub logo: Option<FileUpload>,
}

impl EquipoForm {
    fn into_fields(self) -> Vec<FormField> {
        let mut fields = vec![
            FormField::text("nombre", self.nombre.trim()),
            FormField::text("torneo_id", self.torneo_id),
        ];
        if let Some(modalidad) = self.modalidad {
            fields.push(FormField::text("modalidad", modalidad));
        }
        if let Some(logo) = self.logo {
            fields.push(FormField::File {
                name: "logo".to_string(),
                upload: logo,
            });
        }
        fields
    }
}

impl<T, S> Store<T, S>
where
    T: Transport,
    S: SessionStore,
{
    pub async fn get_equipos(&self) {
        self.load_slice(
            SliceKey::Equipos,
            ApiRequest::get("equipos"),
            Access::Public,
            Slice::Equipos,
        )
        .await;
    }

    /// Same as [`Store::get_equipos`], from the endpoint that also fills in `logo_url`.
    pub async fn get_equipos_con_logo(&self) {
        self.load_slice(
            SliceKey::Equipos,
            ApiRequest::get("equipos-con-logo"),
            Access::Public,
            Slice::Equipos,
        )
        .await;
    }

    /// Load the teams of a tournament into the teams slice and return them.
    pub async fn get_equipos_por_torneo(&self, torneo_id: i64) -> Vec<Equipo> {
        let request = ApiRequest::get(format!("equipos/torneo/{}", torneo_id));
        match self.lookup::<Vec<Equipo>>(request, Access::Public).await {
            Some(equipos) => {
                self.apply(Mutation::Loaded(Slice::Equipos(equipos.clone())))
                    .await;
                equipos
            }
            None => {
                self.apply(Mutation::LoadFailed(SliceKey::Equipos)).await;
                Vec::new()
            }
        }
    }

    pub async fn obtener_equipos_por_modalidad(&self, modalidad: Modalidad) {
        self.load_slice(
            SliceKey::Equipos,
            ApiRequest::get(format!("{}/equipos", modalidad)),
            Access::Public,
            Slice::Equipos,
        )
        .await;
    }

    /// The cached teams that play in `modalidad`.
    pub async fn equipos_de_modalidad(&self, modalidad: Modalidad) -> Vec<Equipo> {
        self.state
            .read()
            .await
            .equipos
            .iter()
            .filter(|equipo| equipo.es_de_modalidad(modalidad))
            .cloned()
            .collect()
    }

    pub async fn crear_equipo(&self, form: EquipoForm) -> ActionResult {
        if is_blank(&form.nombre) {
            return ValidationError::MissingField("nombre").into();
        }

        self.mutate(
            ApiRequest::post("equipos").multipart(form.into_fields()),
            Access::Optional,
            Entity::Equipo,
            "Equipo creado correctamente",
            "No se pudo crear el equipo",
        )
        .await
    }

    pub async fn eliminar_equipo(&self, equipo_id: i64) -> ActionResult {
        self.mutate(
            ApiRequest::delete(format!("equipos/{}", equipo_id)),
            Access::Optional,
            Entity::Equipo,
            "Equipo eliminado",
            "No se pudo eliminar el equipo",
        )
        .await
    }

    /// The roster of a team. Not cached; an empty list on any failure.
    pub async fn get_jugadores_por_equipo(&self, equipo_id: i64) -> Vec<JugadorEquipo> {
        self.lookup::<Plantilla>(
            ApiRequest::get(format!("equipos/{}/jugadores", equipo_id)),
            Access::Public,
        )
        .await
        .map(Plantilla::into_jugadores)
        .unwrap_or_default()
    }

    /// The teams a coach manages. Not cached; an empty list on any failure.
    pub async fn get_equipos_por_dt(&self, dt_id: i64) -> Vec<Equipo> {
        self.lookup::<Vec<Equipo>>(
            ApiRequest::get(format!("dt/{}/equipos", dt_id)),
            Access::Optional,
        )
        .await
        .unwrap_or_default()
    }
}
