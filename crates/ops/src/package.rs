//! Share link resolution and account lookup

use safely_errors::Error;
use safely_events::{AppEvent, EventEmitter, PackageEvent};
use safely_types::{Package, PackageMetadata, PackageSummary, UserInformation};
use tracing::info;

use crate::OpsCtx;

/// Resolve a share link and fetch the package it points to.
///
/// The link is parsed before anything goes over the wire, so a malformed
/// link never produces a request.
///
/// # Errors
///
/// Returns `PackageError::MalformedShareUrl` for a bad link, or the network
/// error from the package lookup.
pub async fn resolve_package(
    ctx: &OpsCtx,
    share_url: &str,
) -> Result<(PackageMetadata, Package), Error> {
    let metadata = PackageMetadata::from_share_url(share_url)?;
    ctx.emit_debug(format!("Fetching package {}", metadata.package_code));
    let package = ctx.net.get_package(&metadata.package_code).await?;

    info!(
        package_code = %metadata.package_code,
        files = package.files.len(),
        "Resolved package"
    );
    ctx.emit_correlated(
        &metadata.package_code,
        AppEvent::Package(PackageEvent::Resolved {
            summary: package.summary(),
            total_parts: package.total_parts(),
        }),
    );

    Ok((metadata, package))
}

/// Resolve a share link and describe the package without downloading it.
///
/// The file indices in the summary are the ones `download_package` accepts.
///
/// # Errors
///
/// Same as [`resolve_package`].
pub async fn package_info(ctx: &OpsCtx, share_url: &str) -> Result<PackageSummary, Error> {
    let (_, package) = resolve_package(ctx, share_url).await?;
    Ok(package.summary())
}

/// Fetch the account the configured API key belongs to.
///
/// # Errors
///
/// Returns the network error from the lookup.
pub async fn whoami(ctx: &OpsCtx) -> Result<UserInformation, Error> {
    ctx.net.user_information().await
}
