use chrono::NaiveDateTime;
use serde::{Deserialize, Deserializer, Serialize};
use strum::{Display, EnumIter, EnumString};

/// The role of an account. Decides which screens and actions are available.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Role {
    Jugador,
    /// Team coach. The only role that can send transfer offers.
    Dt,
    Arbitro,
    Admin,
    Superadmin,
}

impl Role {
    /// Admins and superadmins manage news, tournaments and teams.
    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Admin | Role::Superadmin)
    }
}

/// The league categories that partition tournaments, teams and players.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
pub enum Modalidad {
    Ohb,
    Hfa,
    Hes,
    Aic,
}

/// How a tournament is played out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, Default)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Formato {
    #[default]
    Liga,
    #[serde(alias = "eliminacion_directa")]
    #[strum(to_string = "eliminacion", serialize = "eliminacion_directa")]
    Eliminacion,
    GruposPlayoffs,
}

impl Formato {
    /// Knockout tournaments have no standings table.
    pub fn has_standings(&self) -> bool {
        !matches!(self, Formato::Eliminacion)
    }
}

/// Body of a successful `POST /login`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub role: Role,
    #[serde(default)]
    pub id: Option<i64>,
}

/// The membership of a player in a team for one modality.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Membresia {
    pub id: i64,
    pub nombre: String,
    #[serde(default)]
    pub modalidad: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Jugador {
    pub id: i64,
    #[serde(default)]
    pub name: Option<String>,
    pub nickhabbo: String,
    #[serde(default)]
    pub role: Option<Role>,
    #[serde(default)]
    pub equipos: Vec<Membresia>,
}

/// A row of the role assignment screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JugadorConRol {
    pub id: i64,
    pub nickhabbo: String,
    pub role: Role,
}

/// A player as listed in a team roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JugadorEquipo {
    pub id: i64,
    /// Players created by an admin from a nick alone have no name yet.
    #[serde(default, alias = "nickhabbo")]
    pub nombre: Option<String>,
}

impl JugadorEquipo {
    pub fn nombre_o_placeholder(&self) -> &str {
        self.nombre.as_deref().unwrap_or("Sin nombre")
    }
}

/// The roster endpoint answers either a bare list or a list wrapped in `{"jugadores": ...}`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum Plantilla {
    Lista(Vec<JugadorEquipo>),
    Envuelta { jugadores: Vec<JugadorEquipo> },
}

impl Plantilla {
    pub fn into_jugadores(self) -> Vec<JugadorEquipo> {
        match self {
            Plantilla::Lista(jugadores) | Plantilla::Envuelta { jugadores } => jugadores,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Equipo {
    pub id: i64,
    pub nombre: String,
    #[serde(default)]
    pub modalidad: Option<String>,
    #[serde(default)]
    pub torneo_id: Option<i64>,
    #[serde(default)]
    pub logo_url: Option<String>,
}

impl Equipo {
    /// Whether the team plays in the given modality. Teams without one belong to none.
    pub fn es_de_modalidad(&self, modalidad: Modalidad) -> bool {
        self.modalidad
            .as_deref()
            .is_some_and(|m| m.eq_ignore_ascii_case(&modalidad.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Torneo {
    pub id: i64,
    pub nombre: String,
    pub modalidad: String,
    #[serde(default)]
    pub formato: Formato,
}

/// Per-player line of a match report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct EstadisticaJugador {
    pub jugador_id: i64,
    #[serde(default)]
    pub goles: u32,
    #[serde(default)]
    pub asistencias: u32,
    #[serde(default)]
    pub autogoles: u32,
}

/// A match summary as returned by `GET /partidos`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Partido {
    pub id: i64,
    pub torneo_id: i64,
    pub equipo_a_id: i64,
    pub equipo_b_id: i64,
    #[serde(default)]
    pub equipo_a: Option<String>,
    #[serde(default)]
    pub equipo_b: Option<String>,
    #[serde(default)]
    pub goles_equipo_a: u32,
    #[serde(default)]
    pub goles_equipo_b: u32,
    #[serde(default)]
    pub juez: Option<String>,
    #[serde(default)]
    pub mvp_id: Option<i64>,
    #[serde(default)]
    pub mencion_equipo_a_id: Option<i64>,
    #[serde(default)]
    pub mencion_equipo_b_id: Option<i64>,
    #[serde(default)]
    pub estadisticas: Vec<EstadisticaJugador>,
    #[serde(default)]
    pub observaciones: Option<String>,
    #[serde(default)]
    pub link_video: Option<String>,
}

/// Everything a referee submits to register a finished match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct PartidoForm {
    pub torneo_id: i64,
    pub equipo_a_id: i64,
    pub equipo_b_id: i64,
    pub juez: String,
    #[serde(default)]
    pub goles_equipo_a: u32,
    #[serde(default)]
    pub goles_equipo_b: u32,
    #[serde(default)]
    pub estadisticas: Vec<EstadisticaJugador>,
    pub mvp_id: i64,
    pub mencion_equipo_a_id: i64,
    pub mencion_equipo_b_id: i64,
    #[serde(default)]
    pub observaciones: String,
    #[serde(default)]
    pub link_video: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilaGoleador {
    #[serde(alias = "nickhabbo")]
    pub jugador: String,
    #[serde(default)]
    pub equipo: Option<String>,
    pub goles: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilaAsistidor {
    #[serde(alias = "nickhabbo")]
    pub jugador: String,
    #[serde(default)]
    pub equipo: Option<String>,
    pub asistencias: u32,
}

/// A row of the standings table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilaPosicion {
    pub equipo: String,
    pub puntos: i32,
    #[serde(default)]
    pub partidos_jugados: u32,
    #[serde(default)]
    pub ganados: u32,
    #[serde(default)]
    pub empatados: u32,
    #[serde(default)]
    pub perdidos: u32,
    #[serde(default)]
    pub goles_favor: u32,
    #[serde(default)]
    pub goles_contra: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilaMvp {
    #[serde(alias = "nickhabbo")]
    pub jugador: String,
    pub mvps: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilaMencion {
    #[serde(alias = "nickhabbo")]
    pub jugador: String,
    pub menciones: u32,
}

/// A player's public post looking for a team.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Convocatoria {
    pub id: i64,
    pub jugador_id: i64,
    #[serde(default)]
    pub nickhabbo: String,
    pub mensaje: String,
    #[serde(default)]
    pub modalidad: Option<String>,
}

/// A coach's proposal for a player to join one of the coach's teams.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Oferta {
    pub id: i64,
    pub dt_id: i64,
    pub jugador_id: i64,
    pub equipo_id: i64,
    #[serde(default)]
    pub equipo_nombre: Option<String>,
    #[serde(default)]
    pub estado: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Noticia {
    pub id: i64,
    pub titulo: String,
    pub contenido: String,
    #[serde(default)]
    pub imagen: Option<String>,
}

/// A check-in on the attendance list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Asistencia {
    pub id: i64,
    pub nombre: String,
    #[serde(deserialize_with = "deserialize_fecha_hora")]
    pub fecha_hora: NaiveDateTime,
    /// Only sent to admins.
    #[serde(default)]
    pub ip: Option<String>,
}

const FECHA_HORA_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

fn deserialize_fecha_hora<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    NaiveDateTime::parse_from_str(raw.trim(), FECHA_HORA_FORMAT)
        .or_else(|_| raw.trim().parse::<NaiveDateTime>())
        .map_err(serde::de::Error::custom)
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use serde_json::json;
    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn roles_parse_case_insensitively() {
        assert_eq!(Role::from_str("DT").unwrap(), Role::Dt);
        assert_eq!(Role::from_str("superAdmin").unwrap(), Role::Superadmin);
        assert!(Role::from_str("presidente").is_err());
        assert!(Role::Superadmin.is_admin());
        assert!(!Role::Arbitro.is_admin());
    }

    #[test]
    fn modalidades_are_uppercase_on_the_wire() {
        for modalidad in Modalidad::iter() {
            let wire = serde_json::to_value(modalidad).unwrap();
            assert_eq!(wire, json!(modalidad.to_string()));
            assert_eq!(wire.as_str().unwrap().to_uppercase(), modalidad.to_string());
        }
        assert_eq!(Modalidad::from_str("ohb").unwrap(), Modalidad::Ohb);
    }

    #[test]
    fn knockout_has_no_standings() {
        let torneo: Torneo = serde_json::from_value(
            json!({"id": 2, "nombre": "Copa", "modalidad": "HFA", "formato": "eliminacion_directa"}),
        )
        .unwrap();

        assert_eq!(torneo.formato, Formato::Eliminacion);
        assert!(!torneo.formato.has_standings());
        assert!(Formato::GruposPlayoffs.has_standings());
    }

    #[test]
    fn roster_accepts_both_shapes() {
        let bare: Plantilla =
            serde_json::from_value(json!([{"id": 1, "nombre": "Pepe"}])).unwrap();
        let wrapped: Plantilla =
            serde_json::from_value(json!({"jugadores": [{"id": 2, "nickhabbo": "Lola"}]}))
                .unwrap();

        assert_eq!(bare.into_jugadores()[0].nombre.as_deref(), Some("Pepe"));
        assert_eq!(wrapped.into_jugadores()[0].nombre.as_deref(), Some("Lola"));
    }

    #[test]
    fn roster_keeps_players_without_a_name() {
        let plantilla: Plantilla =
            serde_json::from_value(json!([{"id": 9, "nombre": "Pepe"}, {"id": 10, "nombre": null}]))
                .unwrap();

        let jugadores = plantilla.into_jugadores();
        assert_eq!(jugadores.len(), 2);
        assert_eq!(jugadores[1].nombre, None);
        assert_eq!(jugadores[1].nombre_o_placeholder(), "Sin nombre");
    }

    #[test]
    fn team_modality_match_ignores_case() {
        let equipo = Equipo {
            id: 1,
            nombre: "Los Pibes".to_string(),
            modalidad: Some("ohb".to_string()),
            torneo_id: Some(1),
            logo_url: None,
        };

        assert!(equipo.es_de_modalidad(Modalidad::Ohb));
        assert!(!equipo.es_de_modalidad(Modalidad::Hes));
    }

    #[test]
    fn attendance_timestamp_is_parsed() {
        let asistencia: Asistencia = serde_json::from_value(
            json!({"id": 4, "nombre": "Ana", "fecha_hora": "2025-03-01 20:15:00"}),
        )
        .unwrap();

        assert_eq!(
            asistencia.fecha_hora.format("%d/%m %H:%M").to_string(),
            "01/03 20:15"
        );
        assert_eq!(asistencia.ip, None);
    }

    #[test]
    fn attendance_written_out_reads_back() {
        let asistencia: Asistencia = serde_json::from_value(
            json!({"id": 4, "nombre": "Ana", "fecha_hora": "2025-03-01 20:15:00", "ip": "1.2.3.4"}),
        )
        .unwrap();

        let written = serde_json::to_value(&asistencia).unwrap();
        assert_eq!(written["fecha_hora"], json!("2025-03-01T20:15:00"));

        let read_back: Asistencia = serde_json::from_value(written).unwrap();
        assert_eq!(read_back, asistencia);
    }
}
