/// HTTP request handlers
pub mod posts;

use actix_web::web;

/// Register all API routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .route("/posts", web::post().to(posts::create_post))
            .route(
                "/members/{member_id}/posts",
                web::get().to(posts::list_member_posts),
            )
            .route("/posts/{post_id}", web::patch().to(posts::update_post))
            .route("/posts/{post_id}", web::delete().to(posts::delete_post))
            .route(
                "/posts/{post_id}/image",
                web::delete().to(posts::remove_post_image),
            ),
    );
}
