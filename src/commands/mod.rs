pub mod admin_commands;
mod render;
pub mod user_commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use habbofutbol::{
    api::{
        models::{Formato, Modalidad, Role},
        Transport,
    },
    session::SessionStore,
    store::{ActionResult, Store},
    ClientError,
};

#[derive(Parser, Debug)]
#[command(name = "habbofutbol", about = "Habbofutbol league client", version)]
pub struct Cli {
    /// Keep the session for this run only instead of saving it to disk.
    #[arg(long, default_value_t = false)]
    pub ephemeral: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create an account.
    Register {
        #[arg(long)]
        email: String,
        #[arg(long)]
        name: String,
        #[arg(long, env = "HABBOFUTBOL_PASSWORD")]
        password: String,
        #[arg(long)]
        nickhabbo: String,
    },
    Login {
        #[arg(long)]
        email: String,
        #[arg(long, env = "HABBOFUTBOL_PASSWORD")]
        password: String,
    },
    Logout,
    /// Show who is logged in.
    Whoami,
    Torneos {
        #[arg(long)]
        modalidad: Option<Modalidad>,
    },
    Equipos {
        #[arg(long)]
        modalidad: Option<Modalidad>,
    },
    Jugadores,
    /// List the players of a team.
    Roster { equipo: i64 },
    /// Show every ranking table of a tournament.
    Rankings { torneo_id: i64 },
    /// Match summaries.
    Resumenes,
    Noticias,
    Convocatorias { modalidad: Modalidad },
    /// Post a call looking for a team, as the logged in player.
    Convocar {
        modalidad: Modalidad,
        mensaje: String,
    },
    /// Offers received by the logged in player.
    Ofertas { modalidad: Modalidad },
    /// Offer a player a place in a team, as the logged in coach.
    Ofertar {
        #[arg(long)]
        jugador: Option<i64>,
        #[arg(long)]
        equipo: Option<i64>,
    },
    AceptarOferta { oferta_id: i64 },
    /// Check in on the attendance list, or show it when no name is given.
    Asistencia {
        #[arg(long)]
        nombre: Option<String>,
    },
    /// Commands for admins and staff.
    #[command(subcommand)]
    Admin(AdminCommand),
}

#[derive(Subcommand, Debug)]
pub enum AdminCommand {
    CrearTorneo {
        nombre: String,
        #[arg(long)]
        modalidad: Modalidad,
        #[arg(long, default_value = "liga")]
        formato: Formato,
    },
    EliminarTorneo { id: i64 },
    CrearEquipo {
        nombre: String,
        #[arg(long)]
        torneo: i64,
        #[arg(long)]
        modalidad: Option<Modalidad>,
        /// Image file to upload as the team logo.
        #[arg(long)]
        logo: Option<PathBuf>,
    },
    EliminarEquipo { id: i64 },
    /// Create a player that has no account yet.
    CrearJugador { nickhabbo: String },
    /// Change a player's Habbo nick.
    Nick { id: i64, nickhabbo: String },
    /// Change a player's role.
    Rol { id: i64, role: Role },
    EliminarJugador { id: i64 },
    /// Sign a player to a team.
    Fichar {
        jugador: i64,
        equipo: i64,
        #[arg(long)]
        modalidad: Option<Modalidad>,
    },
    /// Release a player from a team.
    Liberar { jugador: i64, equipo: i64 },
    /// Register a match from a JSON report.
    RegistrarPartido { file: PathBuf },
    CrearNoticia {
        #[arg(long)]
        titulo: String,
        #[arg(long)]
        contenido: String,
        #[arg(long)]
        imagen_url: Option<String>,
        /// Image file to upload with the item.
        #[arg(long, conflicts_with = "imagen_url")]
        imagen: Option<PathBuf>,
    },
    EditarNoticia {
        id: i64,
        #[arg(long)]
        titulo: String,
        #[arg(long)]
        contenido: String,
        #[arg(long)]
        imagen_url: Option<String>,
        #[arg(long, conflicts_with = "imagen_url")]
        imagen: Option<PathBuf>,
    },
    EliminarNoticia { id: i64 },
    /// List every account with its role.
    Roles,
}

/// Run a command against the store.
///
/// Returns whether it succeeded. Only problems outside the store, like an unreadable file, are
/// errors.
pub async fn dispatch<T, S>(store: &Store<T, S>, command: Command) -> Result<bool, ClientError>
where
    T: Transport,
    S: SessionStore,
{
    match command {
        Command::Register {
            email,
            name,
            password,
            nickhabbo,
        } => Ok(user_commands::register(store, email, name, password, nickhabbo).await),
        Command::Login { email, password } => Ok(report(store.login(&email, &password).await)),
        Command::Logout => {
            store.logout().await;
            println!("Sesión cerrada.");
            Ok(true)
        }
        Command::Whoami => Ok(user_commands::whoami(store).await),
        Command::Torneos { modalidad } => Ok(user_commands::torneos(store, modalidad).await),
        Command::Equipos { modalidad } => Ok(user_commands::equipos(store, modalidad).await),
        Command::Jugadores => Ok(user_commands::jugadores(store).await),
        Command::Roster { equipo } => Ok(user_commands::roster(store, equipo).await),
        Command::Rankings { torneo_id } => Ok(user_commands::rankings(store, torneo_id).await),
        Command::Resumenes => Ok(user_commands::resumenes(store).await),
        Command::Noticias => Ok(user_commands::noticias(store).await),
        Command::Convocatorias { modalidad } => {
            Ok(user_commands::convocatorias(store, modalidad).await)
        }
        Command::Convocar { modalidad, mensaje } => {
            Ok(user_commands::convocar(store, modalidad, &mensaje).await)
        }
        Command::Ofertas { modalidad } => Ok(user_commands::ofertas(store, modalidad).await),
        Command::Ofertar { jugador, equipo } => {
            Ok(user_commands::ofertar(store, jugador, equipo).await)
        }
        Command::AceptarOferta { oferta_id } => Ok(report(store.aceptar_oferta(oferta_id).await)),
        Command::Asistencia { nombre } => Ok(user_commands::asistencia(store, nombre).await),
        Command::Admin(command) => admin_commands::dispatch(store, command).await,
    }
}

/// Print the outcome of a write action.
pub(crate) fn report(result: ActionResult) -> bool {
    if result.success {
        println!("✅ {}", result.message);
    } else {
        eprintln!("❌ {}", result.message);
    }
    result.success
}
