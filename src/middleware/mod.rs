/*
 * Responsibility
 * - middleware の公開インターフェース
 * - gateway (surface 判定 / guard / redirect) と HTTP 共通 layer
 * - /api 向けの CORS / security header
 */
pub mod cors;
pub mod gateway;
pub mod http;
pub mod security_headers;
