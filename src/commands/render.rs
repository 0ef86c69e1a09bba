//! Tables for the collections the CLI prints.

use habbofutbol::api::models::{
    Asistencia, Convocatoria, Equipo, FilaAsistidor, FilaGoleador, FilaMencion, FilaMvp,
    FilaPosicion, Jugador, JugadorConRol, JugadorEquipo, Noticia, Oferta, Partido, Torneo,
};
use prettytable::{row, Table};

fn or_dash(value: Option<&str>) -> &str {
    value.unwrap_or("-")
}

pub fn torneos(torneos: &[Torneo]) -> Table {
    let mut table = Table::new();
    table.set_titles(row!["ID", "Nombre", "Modalidad", "Formato"]);
    for torneo in torneos {
        table.add_row(row![
            torneo.id,
            &torneo.nombre,
            &torneo.modalidad,
            torneo.formato.to_string()
        ]);
    }
    table
}

pub fn equipos(equipos: &[Equipo]) -> Table {
    let mut table = Table::new();
    table.set_titles(row!["ID", "Nombre", "Modalidad", "Torneo", "Logo"]);
    for equipo in equipos {
        table.add_row(row![
            equipo.id,
            &equipo.nombre,
            or_dash(equipo.modalidad.as_deref()),
            equipo
                .torneo_id
                .map(|id| id.to_string())
                .unwrap_or("-".to_string()),
            or_dash(equipo.logo_url.as_deref())
        ]);
    }
    table
}

pub fn jugadores(jugadores: &[Jugador]) -> Table {
    let mut table = Table::new();
    table.set_titles(row!["ID", "Nick", "Rol", "Equipos"]);
    for jugador in jugadores {
        let equipos = jugador
            .equipos
            .iter()
            .map(|m| match &m.modalidad {
                Some(modalidad) => format!("{} ({})", m.nombre, modalidad),
                None => m.nombre.clone(),
            })
            .collect::<Vec<_>>()
            .join(", ");
        table.add_row(row![
            jugador.id,
            &jugador.nickhabbo,
            jugador
                .role
                .map(|role| role.to_string())
                .unwrap_or("-".to_string()),
            equipos
        ]);
    }
    table
}

pub fn roles(jugadores: &[JugadorConRol]) -> Table {
    let mut table = Table::new();
    table.set_titles(row!["ID", "Nick", "Rol"]);
    for jugador in jugadores {
        table.add_row(row![jugador.id, &jugador.nickhabbo, jugador.role.to_string()]);
    }
    table
}

pub fn plantilla(jugadores: &[JugadorEquipo]) -> Table {
    let mut table = Table::new();
    table.set_titles(row!["ID", "Nombre"]);
    for jugador in jugadores {
        table.add_row(row![jugador.id, jugador.nombre_o_placeholder()]);
    }
    table
}

pub fn partidos(partidos: &[Partido]) -> Table {
    let mut table = Table::new();
    table.set_titles(row!["ID", "Torneo", "Partido", "Resultado", "Juez", "Video"]);
    for partido in partidos {
        let equipo_a = partido
            .equipo_a
            .clone()
            .unwrap_or(format!("#{}", partido.equipo_a_id));
        let equipo_b = partido
            .equipo_b
            .clone()
            .unwrap_or(format!("#{}", partido.equipo_b_id));
        table.add_row(row![
            partido.id,
            partido.torneo_id,
            format!("{} vs {}", equipo_a, equipo_b),
            format!("{} - {}", partido.goles_equipo_a, partido.goles_equipo_b),
            or_dash(partido.juez.as_deref()),
            or_dash(partido.link_video.as_deref())
        ]);
    }
    table
}

pub fn goleadores(filas: &[FilaGoleador]) -> Table {
    let mut table = Table::new();
    table.set_titles(row!["#", "Jugador", "Equipo", "Goles"]);
    for (i, fila) in filas.iter().enumerate() {
        table.add_row(row![
            i + 1,
            &fila.jugador,
            or_dash(fila.equipo.as_deref()),
            fila.goles
        ]);
    }
    table
}

pub fn asistidores(filas: &[FilaAsistidor]) -> Table {
    let mut table = Table::new();
    table.set_titles(row!["#", "Jugador", "Equipo", "Asistencias"]);
    for (i, fila) in filas.iter().enumerate() {
        table.add_row(row![
            i + 1,
            &fila.jugador,
            or_dash(fila.equipo.as_deref()),
            fila.asistencias
        ]);
    }
    table
}

pub fn posiciones(filas: &[FilaPosicion]) -> Table {
    let mut table = Table::new();
    table.set_titles(row!["#", "Equipo", "PJ", "G", "E", "P", "GF", "GC", "Pts"]);
    for (i, fila) in filas.iter().enumerate() {
        table.add_row(row![
            i + 1,
            &fila.equipo,
            fila.partidos_jugados,
            fila.ganados,
            fila.empatados,
            fila.perdidos,
            fila.goles_favor,
            fila.goles_contra,
            fila.puntos
        ]);
    }
    table
}

pub fn mvps(filas: &[FilaMvp]) -> Table {
    let mut table = Table::new();
    table.set_titles(row!["#", "Jugador", "MVPs"]);
    for (i, fila) in filas.iter().enumerate() {
        table.add_row(row![i + 1, &fila.jugador, fila.mvps]);
    }
    table
}

pub fn menciones(filas: &[FilaMencion]) -> Table {
    let mut table = Table::new();
    table.set_titles(row!["#", "Jugador", "Menciones"]);
    for (i, fila) in filas.iter().enumerate() {
        table.add_row(row![i + 1, &fila.jugador, fila.menciones]);
    }
    table
}

pub fn convocatorias(convocatorias: &[Convocatoria]) -> Table {
    let mut table = Table::new();
    table.set_titles(row!["ID", "Jugador", "Mensaje"]);
    for convocatoria in convocatorias {
        table.add_row(row![
            convocatoria.id,
            format!("{} (#{})", convocatoria.nickhabbo, convocatoria.jugador_id),
            &convocatoria.mensaje
        ]);
    }
    table
}

pub fn ofertas(ofertas: &[Oferta]) -> Table {
    let mut table = Table::new();
    table.set_titles(row!["ID", "Equipo", "DT", "Estado"]);
    for oferta in ofertas {
        table.add_row(row![
            oferta.id,
            oferta
                .equipo_nombre
                .clone()
                .unwrap_or(format!("#{}", oferta.equipo_id)),
            oferta.dt_id,
            or_dash(oferta.estado.as_deref())
        ]);
    }
    table
}

pub fn noticias(noticias: &[Noticia]) -> Table {
    let mut table = Table::new();
    table.set_titles(row!["ID", "Título", "Contenido", "Imagen"]);
    for noticia in noticias {
        table.add_row(row![
            noticia.id,
            &noticia.titulo,
            &noticia.contenido,
            or_dash(noticia.imagen.as_deref())
        ]);
    }
    table
}

pub fn asistencias(asistencias: &[Asistencia]) -> Table {
    let mut table = Table::new();
    table.set_titles(row!["Nombre", "Fecha", "IP"]);
    for asistencia in asistencias {
        table.add_row(row![
            &asistencia.nombre,
            asistencia.fecha_hora.format("%d/%m/%Y %H:%M").to_string(),
            or_dash(asistencia.ip.as_deref())
        ]);
    }
    table
}
