use anyhow::Result;
use pinwheel_core::{InstalledItem, Platform, Release, Repository};
use pinwheel_prefs::PinwheelConfig;
use pinwheel_resolver::{resolve_update, Candidate};

/// The external download/install service.
pub trait DispatchHandle {
    fn enqueue(
        &self,
        package_name: &str,
        display_name: &str,
        repository: &Repository,
        release: &Release,
    ) -> Result<()>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    Enqueued {
        repository_id: u64,
        version_code: i64,
    },
    NothingSelected,
    DispatchFailed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateDispatcher {
    platform: Platform,
}

impl UpdateDispatcher {
    pub fn new(platform: Platform) -> Self {
        Self { platform }
    }

    pub fn from_config(config: &PinwheelConfig) -> Self {
        Self::new(config.primary_platform())
    }

    pub fn platform(&self) -> &Platform {
        &self.platform
    }

    /// Resolves the best release and hands it to `handle`. Failures of the
    /// handle are logged and reported, never retried.
    pub fn request_update<H>(
        &self,
        package_name: &str,
        installed: Option<&InstalledItem>,
        candidates: &[Candidate],
        handle: &H,
    ) -> DispatchOutcome
    where
        H: DispatchHandle + ?Sized,
    {
        let Some(selection) = resolve_update(candidates, installed, &self.platform) else {
            tracing::debug!(package = %package_name, "no suggested product");
            return DispatchOutcome::NothingSelected;
        };
        let Some(release) = selection.release else {
            tracing::debug!(
                package = %package_name,
                repository = %selection.repository.name,
                "no compatible release"
            );
            return DispatchOutcome::NothingSelected;
        };

        match handle.enqueue(
            package_name,
            &selection.product.name,
            selection.repository,
            release,
        ) {
            Ok(()) => {
                tracing::info!(
                    package = %package_name,
                    repository = %selection.repository.name,
                    version = %release.version_name,
                    release = %release.release_name,
                    "enqueued update"
                );
                DispatchOutcome::Enqueued {
                    repository_id: selection.repository.id,
                    version_code: release.version_code,
                }
            }
            Err(err) => {
                tracing::warn!(
                    package = %package_name,
                    error = %format!("{err:#}"),
                    "download service rejected update"
                );
                DispatchOutcome::DispatchFailed
            }
        }
    }
}
