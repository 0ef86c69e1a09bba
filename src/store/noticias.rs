use serde_json::json;

use super::{Access, ActionResult, Entity, Slice, SliceKey, Store};
use crate::{
    api::{ApiRequest, FileUpload, FormField, Transport},
    session::SessionStore,
    utils::{error::ValidationError, validation::is_blank},
};

/// The picture attached to a news item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Imagen {
    /// A picture already hosted somewhere.
    Url(String),
    /// A file picked by the user, uploaded with the item.
    Archivo(FileUpload),
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NoticiaForm {
    pub titulo: String,
    pub contenido: String,
    pub imagen: Option<Imagen>,
}

impl NoticiaForm {
    fn validate(&self) -> Result<(), ValidationError> {
        if is_blank(&self.titulo) {
            return Err(ValidationError::MissingField("titulo"));
        }
        if is_blank(&self.contenido) {
            return Err(ValidationError::MissingField("contenido"));
        }
        Ok(())
    }

    /// JSON, unless there is a file to upload.
    fn into_request(self, request: ApiRequest) -> ApiRequest {
        let titulo = self.titulo.trim().to_string();
        let contenido = self.contenido.trim().to_string();
        match self.imagen {
            Some(Imagen::Archivo(upload)) => request.multipart(vec![
                FormField::text("titulo", titulo),
                FormField::text("contenido", contenido),
                FormField::File {
                    name: "imagen".to_string(),
                    upload,
                },
            ]),
            Some(Imagen::Url(url)) => request.json(json!({
                "titulo": titulo,
                "contenido": contenido,
                "imagen": url,
            })),
            None => request.json(json!({
                "titulo": titulo,
                "contenido": contenido,
            })),
        }
    }
}

impl<T, S> Store<T, S>
where
    T: Transport,
    S: SessionStore,
{
    pub async fn obtener_noticias(&self) {
        self.load_slice(
            SliceKey::Noticias,
            ApiRequest::get("noticias"),
            Access::Public,
            Slice::Noticias,
        )
        .await;
    }

    /// Publish a news item. Admins only.
    pub async fn crear_noticia(&self, form: NoticiaForm) -> ActionResult {
        if let Err(e) = self.require_admin().await.and_then(|_| form.validate()) {
            return e.into();
        }

        self.mutate(
            form.into_request(ApiRequest::post("noticias")),
            Access::Required,
            Entity::Noticia,
            "Noticia publicada",
            "No se pudo publicar la noticia",
        )
        .await
    }

    pub async fn editar_noticia(&self, noticia_id: i64, form: NoticiaForm) -> ActionResult {
        if let Err(e) = self.require_admin().await.and_then(|_| form.validate()) {
            return e.into();
        }

        self.mutate(
            form.into_request(ApiRequest::put(format!("noticias/{}", noticia_id))),
            Access::Required,
            Entity::Noticia,
            "Noticia actualizada",
            "No se pudo actualizar la noticia",
        )
        .await
    }

    pub async fn eliminar_noticia(&self, noticia_id: i64) -> ActionResult {
        if let Err(e) = self.require_admin().await {
            return e.into();
        }

        self.mutate(
            ApiRequest::delete(format!("noticias/{}", noticia_id)),
            Access::Required,
            Entity::Noticia,
            "Noticia eliminada",
            "No se pudo eliminar la noticia",
        )
        .await
    }
}
