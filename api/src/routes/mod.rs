pub mod ask;
pub mod health_route;
pub mod history_route;
