use actix_web::web;

pub mod admin;
pub mod backend_health;
pub mod matches;
pub mod players;

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(backend_health::backend_health);

    cfg.service(
        web::scope("/api")
            .service(players::list_players)
            .service(players::get_player_by_role)
            .service(players::get_player)
            .service(players::replace_player_fields)
            .service(players::increment_player)
            .service(matches::get_history)
            .service(matches::reverse_match)
            .service(matches::submit_match)
            .service(matches::update_match)
            .service(admin::reset_all)
    );
}
