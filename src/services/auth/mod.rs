pub mod credential;
pub mod factory;
pub mod role_map;

pub use credential::{CredentialError, RoleResolver, VerifiedCredential};
pub use factory::build_role_resolver;
pub use role_map::{Role, RoleMap};
