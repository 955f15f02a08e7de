/*!
 * Session extractor
 *
 * Responsibility:
 * - gateway が検証した AuthContext を handler に渡す
 * - 型 (AuthContext) は gateway 側で定義し、ここは axum との接続だけ
 */

mod core;

pub use self::core::SessionExtractor;
