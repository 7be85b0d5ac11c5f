use axum::{
    Json,
    extract::{Query, State},
    response::Redirect,
};
use serde::Deserialize;
use serde_json::{Value, json};
use tower_sessions::Session;

use crate::{
    Res,
    management::{self, AuthSession},
    server::AppState,
};

#[derive(Debug, Deserialize)]
pub struct CallbackParams {
    pub code: Option<String>,
    pub state: Option<String>,
}

pub async fn login(State(state): State<AppState>, session: Session) -> Res<Redirect> {
    let client = state.client();
    let url =
        management::begin_login(&client, &AuthSession::new(&session), &state.config.scopes).await?;

    Ok(Redirect::to(&url))
}

pub async fn callback(
    State(state): State<AppState>,
    session: Session,
    Query(params): Query<CallbackParams>,
) -> Res<Json<Value>> {
    let mut client = state.client();
    management::complete_login(
        &mut client,
        &AuthSession::new(&session),
        params.code.as_deref(),
        params.state.as_deref(),
    )
    .await?;

    Ok(Json(json!({
        "message": "Successfully authenticated"
    })))
}

pub async fn logout(State(state): State<AppState>, session: Session) -> Json<Value> {
    let mut client = state.client();
    management::logout(&mut client, &AuthSession::new(&session)).await;

    Json(json!({
        "message": "Successfully logged out"
    }))
}
