/*
 * Responsibility
 * - process-level services (起動時に組み立てて AppState に注入する)
 */
pub mod auth;
