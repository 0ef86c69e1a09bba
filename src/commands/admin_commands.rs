use std::path::{Path, PathBuf};

use anyhow::Context;
use habbofutbol::{
    api::{models::PartidoForm, FileUpload, Transport},
    session::SessionStore,
    store::{EquipoForm, Imagen, NoticiaForm, Store},
    ClientError,
};

use super::{render, report, AdminCommand};

pub async fn dispatch<T, S>(store: &Store<T, S>, command: AdminCommand) -> Result<bool, ClientError>
where
    T: Transport,
    S: SessionStore,
{
    let result = match command {
        AdminCommand::CrearTorneo {
            nombre,
            modalidad,
            formato,
        } => store.crear_torneo(&nombre, modalidad, formato).await,
        AdminCommand::EliminarTorneo { id } => store.eliminar_torneo(id).await,
        AdminCommand::CrearEquipo {
            nombre,
            torneo,
            modalidad,
            logo,
        } => {
            let logo = logo.as_deref().map(FileUpload::from_path).transpose()?;
            store
                .crear_equipo(EquipoForm {
                    nombre,
                    torneo_id: torneo,
                    modalidad,
                    logo,
                })
                .await
        }
        AdminCommand::EliminarEquipo { id } => store.eliminar_equipo(id).await,
        AdminCommand::CrearJugador { nickhabbo } => store.create_player_by_admin(&nickhabbo).await,
        AdminCommand::Nick { id, nickhabbo } => store.update_player_nick(id, &nickhabbo).await,
        AdminCommand::Rol { id, role } => store.update_player_role(id, role).await,
        AdminCommand::EliminarJugador { id } => store.delete_player(id).await,
        AdminCommand::Fichar {
            jugador,
            equipo,
            modalidad,
        } => store.add_player_to_team(jugador, equipo, modalidad).await,
        AdminCommand::Liberar { jugador, equipo } => {
            store.remove_player_from_team(jugador, equipo).await
        }
        AdminCommand::RegistrarPartido { file } => {
            store.registrar_partido(read_partido(&file)?).await
        }
        AdminCommand::CrearNoticia {
            titulo,
            contenido,
            imagen_url,
            imagen,
        } => {
            let form = noticia_form(titulo, contenido, imagen_url, imagen)?;
            store.crear_noticia(form).await
        }
        AdminCommand::EditarNoticia {
            id,
            titulo,
            contenido,
            imagen_url,
            imagen,
        } => {
            let form = noticia_form(titulo, contenido, imagen_url, imagen)?;
            store.editar_noticia(id, form).await
        }
        AdminCommand::EliminarNoticia { id } => store.eliminar_noticia(id).await,
        AdminCommand::Roles => {
            store.get_players_with_roles().await;
            println!(
                "{}",
                render::roles(&store.state().await.players_with_roles)
            );
            return Ok(true);
        }
    };

    Ok(report(result))
}

fn read_partido(path: &Path) -> Result<PartidoForm, ClientError> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read match report {}", path.display()))?;
    let partido = serde_json::from_str(&contents)
        .with_context(|| format!("Match report {} is not valid", path.display()))?;
    Ok(partido)
}

fn noticia_form(
    titulo: String,
    contenido: String,
    imagen_url: Option<String>,
    imagen: Option<PathBuf>,
) -> Result<NoticiaForm, ClientError> {
    let imagen = match (imagen, imagen_url) {
        (Some(path), _) => Some(Imagen::Archivo(FileUpload::from_path(&path)?)),
        (None, Some(url)) => Some(Imagen::Url(url)),
        (None, None) => None,
    };
    Ok(NoticiaForm {
        titulo,
        contenido,
        imagen,
    })
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn reads_match_report_from_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"torneo_id": 5, "equipo_a_id": 1, "equipo_b_id": 2, "juez": "Ana",
                "mvp_id": 9, "mencion_equipo_a_id": 9, "mencion_equipo_b_id": 11,
                "estadisticas": [{{"jugador_id": 9, "goles": 2}}]}}"#
        )
        .unwrap();

        let partido = read_partido(file.path()).unwrap();

        assert_eq!(partido.torneo_id, 5);
        assert_eq!(partido.estadisticas[0].goles, 2);
        assert_eq!(partido.link_video, None);
    }

    #[test]
    fn uploaded_image_wins_over_url() {
        let mut file = tempfile::Builder::new().suffix(".png").tempfile().unwrap();
        file.write_all(&[0x89, 0x50]).unwrap();

        let form = noticia_form(
            "Titulo".to_string(),
            "Contenido".to_string(),
            None,
            Some(file.path().to_path_buf()),
        )
        .unwrap();

        let Some(Imagen::Archivo(upload)) = form.imagen else {
            panic!("expected an uploaded image");
        };
        assert_eq!(upload.mime, "image/png");
        assert_eq!(upload.bytes, vec![0x89, 0x50]);
    }
}
