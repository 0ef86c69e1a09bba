/// Problems caught before any request is sent.
///
/// The Display text is shown to the user as is.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Todos los datos tienen que estar completos.")]
    MissingFields,
    #[error("Falta el campo {0}.")]
    MissingField(&'static str),
    #[error("El correo electrónico no es válido.")]
    InvalidEmail,
    #[error(
        "La contraseña debe tener al menos 8 caracteres, una mayúscula, una minúscula y un número."
    )]
    WeakPassword,
    #[error("Debes ingresar un email y una contraseña.")]
    MissingCredentials,
    #[error("El mensaje no puede estar vacío.")]
    EmptyMessage,
    #[error("Un equipo no puede jugar contra sí mismo.")]
    SameTeam,
    #[error("No estás autenticado.")]
    NotAuthenticated,
    #[error("No tienes permisos para realizar esta acción.")]
    Forbidden,
}
