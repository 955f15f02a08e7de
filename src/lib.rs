/*
 * Responsibility
 * - crate の module 構成
 * - main.rs / tests/ から使う入口 (app::run, app::build_router)
 */
pub mod api;
pub mod app;
pub mod config;
pub mod error;
pub mod gateway;
pub mod middleware;
pub mod services;
pub mod state;
