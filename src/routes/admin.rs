use actix_web::{post, web, HttpResponse, Result};

use crate::config::settings::ServiceSettings;
use crate::db::store::RivalryStore;
use crate::handlers::admin_handler;

#[post("/reset")]
pub async fn reset_all(
    store: web::Data<dyn RivalryStore>,
    settings: web::Data<ServiceSettings>,
) -> Result<HttpResponse> {
    admin_handler::reset_all(store, settings).await
}
