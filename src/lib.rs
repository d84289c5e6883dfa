pub mod auth;
pub mod clients;
pub mod config;
pub mod docs;
pub mod handlers;
pub mod models;
pub mod relay;
pub mod routes;
pub mod services;
pub mod state;
pub mod websocket;
