use serde_json::{json, Value};
use tracing::{error, info, warn};

use super::{backend_message, Access, ActionResult, Mutation, Store, UNKNOWN_ERROR};
use crate::{
    api::{models::LoginResponse, ApiRequest, ApiResult, StatusCode, Transport},
    session::{Session, SessionStore},
    utils::{
        error::ValidationError,
        validation::{is_blank, RegisterForm},
    },
    ClientError,
};

impl<T, S> Store<T, S>
where
    T: Transport,
    S: SessionStore,
{
    /// Sign up a new account. Nothing is sent unless the form passes local validation.
    pub async fn register(&self, form: &RegisterForm) -> ActionResult {
        if let Err(e) = form.validate() {
            return e.into();
        }

        let body = match serde_json::to_value(form) {
            Ok(body) => body,
            Err(e) => {
                error!("Error encoding sign-up form: {}", e);
                return ActionResult::fail(UNKNOWN_ERROR);
            }
        };
        let request = ApiRequest::post("register").json(body);
        match self
            .submit(request, Access::Public, "Error en el registro")
            .await
        {
            Ok(body) => ActionResult::ok(
                backend_message(&body).unwrap_or("Registro exitoso. Ya puedes iniciar sesión.".into()),
            ),
            Err(failure) => failure,
        }
    }

    /// Log in, then persist and keep the session the backend hands out.
    pub async fn login(&self, email: &str, password: &str) -> ActionResult {
        if is_blank(email) || is_blank(password) {
            return ValidationError::MissingCredentials.into();
        }

        let request = ApiRequest::post("login").json(json!({
            "email": email.trim(),
            "password": password,
        }));
        let body = match self
            .submit(request, Access::Public, "Credenciales incorrectas.")
            .await
        {
            Ok(body) => body,
            Err(failure) => return failure,
        };

        let login: LoginResponse = match serde_json::from_value(body) {
            Ok(login) => login,
            Err(e) => {
                error!("Error decoding login response: {}", e);
                return ActionResult::fail(UNKNOWN_ERROR);
            }
        };

        info!("Logged in with role {}", login.role);
        self.apply(Mutation::SessionStarted(Session {
            token: login.token,
            role: login.role,
            jugador_id: login.id,
        }))
        .await;

        ActionResult::ok("Sesión iniciada")
    }

    /// End the session and send the user back to the home route.
    pub async fn logout(&self) {
        info!("Logging out");
        self.apply(Mutation::SessionEnded).await;
    }

    /// Send a request with the session's bearer token.
    ///
    /// A 401 or 403 ends the session and comes back as [`ApiResult::SessionExpired`]. However
    /// many calls are rejected with the same token, the session is only ended once.
    pub async fn secure_fetch(&self, request: ApiRequest) -> Result<ApiResult<Value>, ClientError> {
        let Some(token) = self.token().await else {
            return Ok(ApiResult::NoSession);
        };

        let path = request.path.clone();
        let response = self.transport.send(request.bearer(&token)).await?;
        if matches!(
            response.status,
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN
        ) {
            let ended = self
                .apply_if(Mutation::SessionEnded, |state| {
                    state.session.as_ref().is_some_and(|s| s.token == token)
                })
                .await;
            if ended.is_some() {
                warn!("Session expired on {} ({})", path, response.status);
            }
            return Ok(ApiResult::SessionExpired);
        }

        Ok(ApiResult::from_response(response))
    }
}
