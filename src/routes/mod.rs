pub mod admin;
pub mod auth;
pub mod goals;
pub mod health;
pub mod tasks;

use actix_web::web;

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/auth")
            .service(auth::login)
            .service(auth::register)
            .service(auth::me),
    )
    .service(
        web::scope("/goals")
            .service(goals::list_goals)
            .service(goals::create_goal)
            .service(goals::get_goal)
            .service(goals::update_goal)
            .service(goals::delete_goal)
            .service(tasks::list_tasks)
            .service(tasks::create_task)
            .service(tasks::get_task),
    )
    .service(
        web::scope("/tasks")
            .service(tasks::update_task)
            .service(tasks::delete_task),
    )
    .service(web::scope("/admin").service(admin::list_users));
}
