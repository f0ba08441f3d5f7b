use pinwheel_core::{InstalledItem, Platform, Product, Release};

use crate::types::{Candidate, Selection};

/// Picks the (product, repository) pair with the highest product version
/// code. When an item is installed only products carrying a release signed
/// like the installed build are considered.
///
/// Candidate order is repository priority order: on equal version codes the
/// first pair encountered wins.
pub fn find_suggested<'a>(
    candidates: &'a [Candidate],
    installed: Option<&InstalledItem>,
) -> Option<&'a Candidate> {
    candidates
        .iter()
        .filter(|(product, _)| match installed {
            Some(installed) => product.has_signature(&installed.signature),
            None => true,
        })
        .fold(None::<&Candidate>, |best, next| match best {
            Some(best) if best.0.version_code >= next.0.version_code => Some(best),
            _ => Some(next),
        })
}

pub fn compatible_releases<'a>(
    product: &'a Product,
    installed: Option<&InstalledItem>,
) -> Vec<&'a Release> {
    product
        .selected_releases()
        .filter(|release| {
            installed
                .map(|installed| installed.signature == release.signature)
                .unwrap_or(true)
        })
        .collect()
}

/// Among several compatible builds prefer the most specific one targeting
/// `platform`, then the most specific one overall, then the first.
pub fn pick_release<'a>(compatible: &[&'a Release], platform: &Platform) -> Option<&'a Release> {
    if compatible.len() < 2 {
        return compatible.first().copied();
    }

    compatible
        .iter()
        .filter(|release| release.targets(platform.as_str()))
        .min_by_key(|release| release.platforms.len())
        .or_else(|| {
            compatible
                .iter()
                .min_by_key(|release| release.platforms.len())
        })
        .or_else(|| compatible.first())
        .copied()
}

pub fn resolve_update<'a>(
    candidates: &'a [Candidate],
    installed: Option<&InstalledItem>,
    platform: &Platform,
) -> Option<Selection<'a>> {
    let (product, repository) = find_suggested(candidates, installed)?;
    let compatible = compatible_releases(product, installed);
    let release = pick_release(&compatible, platform);

    tracing::debug!(
        package = %product.package_name,
        repository = %repository.name,
        version_code = product.version_code,
        compatible = compatible.len(),
        selected = release.map(|r| r.version_code),
        "resolved update candidate"
    );

    Some(Selection {
        product,
        repository,
        release,
    })
}
