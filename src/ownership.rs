//! Ownership checks for name NFTs and avatar assets.

use std::sync::Arc;

use suins_transport::{ObjectProjection, ObjectReader, ObjectResponse};
use suins_types::{addresses_equal, normalize_address, Avatar};
use tracing::debug;

use crate::error::{ResolverError, Result};

/// Display key holding an asset's image.
const IMAGE_URL_KEY: &str = "image_url";

/// An avatar object as seen on chain.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AvatarAsset {
    /// Single-address owner, normalized. `None` for shared, wrapped or immutable assets.
    pub owner: Option<String>,
    pub image_url: Option<String>,
}

#[derive(Clone)]
pub struct OwnershipVerifier {
    reader: Arc<dyn ObjectReader>,
}

impl OwnershipVerifier {
    pub fn new(reader: Arc<dyn ObjectReader>) -> Self {
        Self { reader }
    }

    /// Current address owner of `object_id`.
    ///
    /// Only single-address ownership counts; shared, immutable and
    /// object-owned objects report `None`, as does a missing object.
    pub async fn verify_owner(&self, object_id: &str) -> Result<Option<String>> {
        let response = self
            .reader
            .fetch_object(object_id, ObjectProjection::new().with_owner())
            .await?;
        let Some(object) = present(object_id, response)? else {
            return Ok(None);
        };
        Ok(object
            .owner
            .as_ref()
            .and_then(|owner| owner.address())
            .map(normalize_address))
    }

    /// Owner and display image of an avatar asset; `None` when the asset is gone.
    pub async fn fetch_avatar(&self, object_id: &str) -> Result<Option<AvatarAsset>> {
        let projection = ObjectProjection::new().with_owner().with_display();
        let response = self.reader.fetch_object(object_id, projection).await?;
        let Some(object) = present(object_id, response)? else {
            return Ok(None);
        };
        Ok(Some(AvatarAsset {
            owner: object
                .owner
                .as_ref()
                .and_then(|owner| owner.address())
                .map(normalize_address),
            image_url: object
                .display
                .as_ref()
                .and_then(|display| display.get(IMAGE_URL_KEY))
                .filter(|url| !url.is_empty())
                .cloned(),
        }))
    }
}

fn present(
    object_id: &str,
    response: ObjectResponse,
) -> Result<Option<suins_transport::SuiObject>> {
    match response.error {
        Some(err) if err.is_not_found() => {
            debug!(object = object_id, "object not found");
            Ok(None)
        }
        Some(err) => Err(ResolverError::Transport(anyhow::Error::new(err))),
        None => Ok(response.data),
    }
}

/// Decide what a record shows for its avatar.
///
/// The image is surfaced only when the asset still belongs to the name's
/// owner. Any other situation, including an unknown owner on either side or
/// an asset that no longer exists, yields [`Avatar::NotOwned`].
pub fn apply_avatar_rule(asset: Option<&AvatarAsset>, name_owner: Option<&str>) -> Avatar {
    let owned = match (asset.and_then(|a| a.owner.as_deref()), name_owner) {
        (Some(asset_owner), Some(name_owner)) => addresses_equal(asset_owner, name_owner),
        _ => false,
    };
    match asset {
        Some(asset) if owned => asset
            .image_url
            .clone()
            .map(Avatar::ImageUrl)
            .unwrap_or(Avatar::NoImage),
        _ => Avatar::NotOwned,
    }
}
