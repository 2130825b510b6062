//! HTTP handlers and route configuration.

mod health;
mod posts;
mod users;

#[cfg(test)]
mod testutil;

use actix_web::{HttpResponse, web};
use scribe_shared::ErrorResponse;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            // Public routes
            .route("/health", web::get().to(health::health_check))
            // User routes
            .service(
                web::scope("/users")
                    .route("/register", web::post().to(users::register))
                    .route("/login", web::post().to(users::login))
                    .route("/change-avatar", web::post().to(users::change_avatar))
                    .route("/edit-user", web::patch().to(users::edit_user))
                    .route("", web::get().to(users::get_authors))
                    .route("/{id}", web::get().to(users::get_user)),
            )
            // Post routes
            .service(
                web::scope("/posts")
                    .route("", web::post().to(posts::create_post))
                    .route("", web::get().to(posts::get_posts))
                    .route("/categories/{category}", web::get().to(posts::get_cat_posts))
                    .route("/users/{id}", web::get().to(posts::get_user_posts))
                    .route("/{id}", web::get().to(posts::get_post))
                    .route("/{id}", web::patch().to(posts::edit_post))
                    .route("/{id}", web::delete().to(posts::delete_post)),
            ),
    );
}

/// Fallback for requests matching no route - distinct from a resource 404.
pub async fn route_not_found() -> HttpResponse {
    HttpResponse::NotFound().json(
        ErrorResponse::new(404, "Route Not Found")
            .with_detail("The requested route does not exist"),
    )
}
