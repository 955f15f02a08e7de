pub mod session;

pub use session::SessionExtractor;
