// Adapters layer: concrete key-value backends behind the KeyValueBackend port.

pub mod local;
pub mod memory;

#[cfg(feature = "s3")]
pub mod s3;

use crate::core::engine::RosterEngine;
use crate::domain::model::BackendKind;
use crate::domain::ports::{RosterStore, StoreSettings};
use crate::utils::error::Result;
use std::sync::Arc;

/// Builds the engine for the backend selected in `settings`.
pub async fn open_store<S: StoreSettings>(settings: &S) -> Result<Arc<dyn RosterStore>> {
    let namespace = settings.namespace().to_string();
    tracing::debug!(
        "Opening {} backend (namespace '{}')",
        settings.backend(),
        namespace
    );

    match settings.backend() {
        BackendKind::Memory => Ok(Arc::new(RosterEngine::with_namespace(
            memory::MemoryBackend::new(),
            namespace,
        ))),
        BackendKind::Local => Ok(Arc::new(RosterEngine::with_namespace(
            local::LocalBackend::new(settings.data_dir()),
            namespace,
        ))),
        #[cfg(feature = "s3")]
        BackendKind::S3 => {
            let s3_settings = settings.s3().ok_or_else(|| {
                crate::utils::error::RosterError::MissingConfigError {
                    field: "s3".to_string(),
                }
            })?;
            let backend = s3::S3Backend::from_settings(s3_settings).await;
            Ok(Arc::new(RosterEngine::with_namespace(backend, namespace)))
        }
        #[cfg(not(feature = "s3"))]
        BackendKind::S3 => Err(crate::utils::error::RosterError::ConfigError {
            message: "this build does not include the s3 backend (enable the `s3` feature)"
                .to_string(),
        }),
    }
}
