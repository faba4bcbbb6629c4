use actix_web::{web, HttpResponse, Result};

use crate::config::settings::ServiceSettings;
use crate::db::helpers::error_response;
use crate::db::store::RivalryStore;
use crate::models::common::{ApiResponse, Role};
use crate::models::player::{PlayerFieldsUpdate, StatIncrements};
use crate::services::PlayerService;

fn player_service(store: web::Data<dyn RivalryStore>, settings: &ServiceSettings) -> PlayerService {
    PlayerService::new(store.into_inner(), settings.roster.clone())
}

/// List both players
pub async fn list_players(
    store: web::Data<dyn RivalryStore>,
    settings: web::Data<ServiceSettings>,
) -> Result<HttpResponse> {
    match player_service(store, &settings).list().await {
        Ok(players) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            format!("Found {} player(s)", players.len()),
            players,
        ))),
        Err(e) => Ok(error_response(&e)),
    }
}

/// Get a single player by name
pub async fn get_player(
    name: String,
    store: web::Data<dyn RivalryStore>,
    settings: web::Data<ServiceSettings>,
) -> Result<HttpResponse> {
    match player_service(store, &settings).find_by_name(&name).await {
        Ok(player) => Ok(HttpResponse::Ok().json(ApiResponse::success("Player found", player))),
        Err(e) => {
            tracing::warn!("Lookup of player {} failed: {}", name, e);
            Ok(error_response(&e))
        }
    }
}

/// Get the player seated in the given roster role
pub async fn get_player_by_role(
    role: Role,
    store: web::Data<dyn RivalryStore>,
    settings: web::Data<ServiceSettings>,
) -> Result<HttpResponse> {
    match player_service(store, &settings).find_by_role(role).await {
        Ok(player) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            format!("Player for role {}", role),
            player,
        ))),
        Err(e) => Ok(error_response(&e)),
    }
}

#[tracing::instrument(name = "Replace player fields request", skip(fields, store, settings))]
pub async fn replace_player_fields(
    name: String,
    fields: web::Json<PlayerFieldsUpdate>,
    store: web::Data<dyn RivalryStore>,
    settings: web::Data<ServiceSettings>,
) -> Result<HttpResponse> {
    match player_service(store, &settings).replace_fields(&name, &fields).await {
        Ok(player) => {
            tracing::info!("Replaced fields of player {}", name);
            Ok(HttpResponse::Ok().json(ApiResponse::success("Player updated", player)))
        }
        Err(e) => {
            tracing::warn!("Failed to replace fields of player {}: {}", name, e);
            Ok(error_response(&e))
        }
    }
}

#[tracing::instrument(name = "Increment player request", skip(increments, store, settings))]
pub async fn increment_player(
    name: String,
    increments: web::Json<StatIncrements>,
    store: web::Data<dyn RivalryStore>,
    settings: web::Data<ServiceSettings>,
) -> Result<HttpResponse> {
    match player_service(store, &settings).increment(&name, &increments).await {
        Ok(player) => Ok(HttpResponse::Ok().json(ApiResponse::success("Player incremented", player))),
        Err(e) => {
            tracing::warn!("Failed to increment player {}: {}", name, e);
            Ok(error_response(&e))
        }
    }
}
