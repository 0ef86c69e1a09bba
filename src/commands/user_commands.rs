use habbofutbol::{
    api::{models::Modalidad, Transport},
    session::SessionStore,
    store::Store,
    utils::validation::RegisterForm,
};
use tracing::info;

use super::{render, report};

pub async fn register<T, S>(
    store: &Store<T, S>,
    email: String,
    name: String,
    password: String,
    nickhabbo: String,
) -> bool
where
    T: Transport,
    S: SessionStore,
{
    let form = RegisterForm {
        email,
        name,
        password,
        nickhabbo,
    };
    report(store.register(&form).await)
}

pub async fn whoami<T, S>(store: &Store<T, S>) -> bool
where
    T: Transport,
    S: SessionStore,
{
    match store.session().await {
        Some(session) => {
            match session.jugador_id {
                Some(id) => println!("Sesión iniciada como {} (jugador #{})", session.role, id),
                None => println!("Sesión iniciada como {}", session.role),
            }
            true
        }
        None => {
            println!("No has iniciado sesión.");
            false
        }
    }
}

pub async fn torneos<T, S>(store: &Store<T, S>, modalidad: Option<Modalidad>) -> bool
where
    T: Transport,
    S: SessionStore,
{
    match modalidad {
        Some(modalidad) => store.get_torneos_por_modalidad(modalidad).await,
        None => store.get_torneos().await,
    }
    println!("{}", render::torneos(&store.state().await.torneos));
    true
}

pub async fn equipos<T, S>(store: &Store<T, S>, modalidad: Option<Modalidad>) -> bool
where
    T: Transport,
    S: SessionStore,
{
    let equipos = match modalidad {
        Some(modalidad) => {
            store.obtener_equipos_por_modalidad(modalidad).await;
            store.equipos_de_modalidad(modalidad).await
        }
        None => {
            store.get_equipos_con_logo().await;
            store.state().await.equipos
        }
    };
    println!("{}", render::equipos(&equipos));
    true
}

pub async fn jugadores<T, S>(store: &Store<T, S>) -> bool
where
    T: Transport,
    S: SessionStore,
{
    store.get_jugadores().await;
    println!("{}", render::jugadores(&store.state().await.jugadores));
    true
}

pub async fn roster<T, S>(store: &Store<T, S>, equipo_id: i64) -> bool
where
    T: Transport,
    S: SessionStore,
{
    let jugadores = store.get_jugadores_por_equipo(equipo_id).await;
    println!("{}", render::plantilla(&jugadores));
    true
}

pub async fn rankings<T, S>(store: &Store<T, S>, torneo_id: i64) -> bool
where
    T: Transport,
    S: SessionStore,
{
    store.get_torneos().await;
    let Some(torneo) = store
        .state()
        .await
        .torneos
        .into_iter()
        .find(|torneo| torneo.id == torneo_id)
    else {
        eprintln!("❌ No existe el torneo {}", torneo_id);
        return false;
    };

    info!("Loading rankings for {}", torneo.nombre);
    store.set_torneo_seleccionado(Some(torneo.clone())).await;
    store.cargar_rankings(&torneo).await;

    let state = store.state().await;
    println!("{} ({}, {})", torneo.nombre, torneo.modalidad, torneo.formato);
    println!("\nGoleadores\n{}", render::goleadores(&state.tabla_goleadores));
    println!("Asistidores\n{}", render::asistidores(&state.tabla_asistidores));
    if torneo.formato.has_standings() {
        println!("Posiciones\n{}", render::posiciones(&state.tabla_equipos));
    }
    println!("MVPs\n{}", render::mvps(&state.tabla_mvps));
    println!("Menciones\n{}", render::menciones(&state.tabla_menciones));
    true
}

pub async fn resumenes<T, S>(store: &Store<T, S>) -> bool
where
    T: Transport,
    S: SessionStore,
{
    store.obtener_resumenes().await;
    println!("{}", render::partidos(&store.state().await.partidos));
    true
}

pub async fn noticias<T, S>(store: &Store<T, S>) -> bool
where
    T: Transport,
    S: SessionStore,
{
    store.obtener_noticias().await;
    println!("{}", render::noticias(&store.state().await.noticias));
    true
}

pub async fn convocatorias<T, S>(store: &Store<T, S>, modalidad: Modalidad) -> bool
where
    T: Transport,
    S: SessionStore,
{
    store.get_convocatorias(modalidad).await;
    println!(
        "{}",
        render::convocatorias(&store.state().await.convocatorias)
    );
    true
}

pub async fn convocar<T, S>(store: &Store<T, S>, modalidad: Modalidad, mensaje: &str) -> bool
where
    T: Transport,
    S: SessionStore,
{
    let Some(jugador_id) = jugador_id(store).await else {
        return false;
    };
    report(
        store
            .crear_convocatoria(jugador_id, mensaje, modalidad)
            .await,
    )
}

pub async fn ofertas<T, S>(store: &Store<T, S>, modalidad: Modalidad) -> bool
where
    T: Transport,
    S: SessionStore,
{
    let Some(jugador_id) = jugador_id(store).await else {
        return false;
    };
    store.get_ofertas(jugador_id, modalidad).await;
    println!("{}", render::ofertas(&store.state().await.ofertas));
    true
}

/// Send an offer as the logged in coach.
pub async fn ofertar<T, S>(store: &Store<T, S>, jugador: Option<i64>, equipo: Option<i64>) -> bool
where
    T: Transport,
    S: SessionStore,
{
    let dt_id = store.session().await.and_then(|s| s.jugador_id);
    // Show the coach which teams they can pick from
    if let (Some(dt_id), None) = (dt_id, equipo) {
        let equipos = store.get_equipos_por_dt(dt_id).await;
        if !equipos.is_empty() {
            println!("Tus equipos:\n{}", render::equipos(&equipos));
        }
    }
    report(store.enviar_oferta(dt_id, jugador, equipo).await)
}

pub async fn asistencia<T, S>(store: &Store<T, S>, nombre: Option<String>) -> bool
where
    T: Transport,
    S: SessionStore,
{
    if let Some(nombre) = nombre {
        return report(store.registrar_asistencia(&nombre).await);
    }
    store.obtener_asistencias().await;
    println!("{}", render::asistencias(&store.state().await.asistencias));
    true
}

/// The player id of the session, or a message saying why there is none.
async fn jugador_id<T, S>(store: &Store<T, S>) -> Option<i64>
where
    T: Transport,
    S: SessionStore,
{
    let id = store.session().await.and_then(|s| s.jugador_id);
    if id.is_none() {
        eprintln!("❌ Inicia sesión con una cuenta de jugador primero.");
    }
    id
}
