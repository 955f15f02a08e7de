/// Factory: build `RoleResolver` from application `Config`.
use std::sync::Arc;

use crate::config::Config;
use crate::error::AppError;
use crate::services::auth::RoleResolver;

pub fn build_role_resolver(config: &Config) -> Result<Arc<RoleResolver>, AppError> {
    let resolver = RoleResolver::new(
        &config.verification_key,
        &config.credential_policy,
        config.role_map.clone(),
    )
    .map_err(|e| {
        tracing::error!(error = %e, "failed to load credential verification key");
        AppError::Internal
    })?;

    tracing::info!(roles = resolver.role_map().len(), "role resolver ready");

    Ok(Arc::new(resolver))
}
