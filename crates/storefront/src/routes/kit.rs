//! Kit designer: photo upload, validation, and add-to-cart.
//!
//! Add-to-cart is the variant resolver's entry point: the (size, frame)
//! pair is resolved to a product variant (created lazily on first use),
//! and a newly created variant is mirrored into Zoho Inventory on a
//! fire-and-forget task that never delays or fails the cart addition.

use axum::{
    Json,
    extract::{Multipart, State},
};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use charted_art_core::{FrameKind, PrintSize, kit_name, kit_price, kit_sku};

use crate::db::carts::CartRepository;
use crate::db::variants::VariantRepository;
use crate::error::{AppError, Result};
use crate::middleware::RequireAuth;
use crate::state::AppState;

/// Maximum accepted upload size.
pub const MAX_FILE_BYTES: usize = 10 * 1024 * 1024;

/// MIME types accepted for kit photos.
const ACCEPTED_TYPES: [&str; 2] = ["image/jpeg", "image/png"];

/// Upload response.
#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub image_url: String,
    pub path: String,
    /// Set when the image resolution is below the selected size's minimum.
    /// The upload itself still succeeds.
    pub quality_warning: Option<String>,
}

/// Remove-upload request body.
#[derive(Debug, Deserialize)]
pub struct RemoveUploadRequest {
    pub path: String,
}

/// Add-to-cart request body.
#[derive(Debug, Deserialize)]
pub struct AddToCartRequest {
    pub size: String,
    pub frame: String,
    pub image_url: String,
}

/// Add-to-cart response.
#[derive(Debug, Serialize)]
pub struct AddToCartResponse {
    pub item_count: i64,
}

/// Upload a kit photo (multipart: `size` + `file`).
///
/// Validation happens locally before anything touches the store: file
/// type, file size, then decoded pixel dimensions against the selected
/// print size. A low-resolution image is accepted with a warning.
#[instrument(skip(state, multipart))]
pub async fn upload(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>> {
    let mut size: Option<PrintSize> = None;
    let mut file: Option<(String, Vec<u8>)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(e.to_string()))?
    {
        let field_name = field.name().map(ToOwned::to_owned);
        match field_name.as_deref() {
            Some("size") => {
                let raw = field
                    .text()
                    .await
                    .map_err(|e| AppError::Validation(e.to_string()))?;
                size = Some(
                    raw.parse()
                        .map_err(|e: charted_art_core::CatalogError| {
                            AppError::Validation(e.to_string())
                        })?,
                );
            }
            Some("file") => {
                let content_type = field.content_type().unwrap_or_default().to_owned();
                if !ACCEPTED_TYPES.contains(&content_type.as_str()) {
                    return Err(AppError::Validation(
                        "Please upload a JPG or PNG file".to_string(),
                    ));
                }

                let name = field.file_name().unwrap_or("upload.jpg").to_owned();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Validation(e.to_string()))?;
                if bytes.len() > MAX_FILE_BYTES {
                    return Err(AppError::Validation(
                        "File size must be less than 10MB".to_string(),
                    ));
                }
                file = Some((name, bytes.to_vec()));
            }
            _ => {}
        }
    }

    let size = size.ok_or_else(|| AppError::Validation("missing size field".to_string()))?;
    let (name, bytes) =
        file.ok_or_else(|| AppError::Validation("missing file field".to_string()))?;

    let img = image::load_from_memory(&bytes)
        .map_err(|e| AppError::Validation(format!("Invalid image: {e}")))?;
    let quality_warning = quality_warning(size, img.width(), img.height());

    let stored = state
        .uploads()
        .store(user.id, &name, &bytes)
        .await
        .map_err(|e| AppError::Validation(e.to_string()))?;

    Ok(Json(UploadResponse {
        image_url: stored.public_url,
        path: stored.path,
        quality_warning,
    }))
}

/// Remove a previously uploaded photo.
#[instrument(skip(state))]
pub async fn remove_upload(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Json(body): Json<RemoveUploadRequest>,
) -> Result<()> {
    state
        .uploads()
        .delete(user.id, &body.path)
        .await
        .map_err(|e| AppError::Validation(e.to_string()))?;
    Ok(())
}

/// Add a configured kit to the caller's cart.
///
/// Resolves the (size, frame) variant, creating it (and mirroring it into
/// the external inventory) on first use, then appends a quantity-1 line
/// with the price and image snapshot.
#[instrument(skip(state, body))]
pub async fn add_to_cart(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Json(body): Json<AddToCartRequest>,
) -> Result<Json<AddToCartResponse>> {
    let size: PrintSize = body
        .size
        .parse()
        .map_err(|e: charted_art_core::CatalogError| AppError::Validation(e.to_string()))?;
    let frame: FrameKind = body
        .frame
        .parse()
        .map_err(|e: charted_art_core::CatalogError| AppError::Validation(e.to_string()))?;
    let price = kit_price(size, frame);

    let (variant, created) = VariantRepository::new(state.pool())
        .find_or_create(size, frame, price)
        .await?;

    if created {
        spawn_item_mirror(&state, variant.id, size, frame);
    }

    let carts = CartRepository::new(state.pool());
    let cart = carts.find_or_create_for_user(user.id).await?;
    carts
        .add_item(cart, variant.id, Some(&body.image_url), price)
        .await?;

    let item_count = carts.item_count(user.id).await?;
    Ok(Json(AddToCartResponse { item_count }))
}

/// Mirror a newly created variant into Zoho Inventory.
///
/// Fire-and-forget: failures are logged and swallowed; the triggering
/// cart addition has already succeeded by the time this runs. On success
/// the Zoho item id is recorded on the variant so sales-order mirroring
/// can reference it.
fn spawn_item_mirror(
    state: &AppState,
    variant: charted_art_core::VariantId,
    size: PrintSize,
    frame: FrameKind,
) {
    let Some(zoho) = state.zoho().cloned() else {
        tracing::warn!(
            "skipping inventory mirror for {}: Zoho not configured",
            kit_sku(size, frame)
        );
        return;
    };

    let state = state.clone();
    let name = kit_name(size, frame);
    let sku = kit_sku(size, frame);
    let rate = kit_price(size, frame);

    tokio::spawn(async move {
        match zoho.create_item(&name, &sku, rate).await {
            Ok(item) => {
                tracing::info!("mirrored variant {sku} as Zoho item {}", item.item_id);
                if let Err(e) = VariantRepository::new(state.pool())
                    .set_zoho_item_id(variant, &item.item_id)
                    .await
                {
                    tracing::warn!("failed to record Zoho item id for {sku}: {e}");
                }
            }
            Err(e) => tracing::warn!("failed to mirror variant {sku} into Zoho: {e}"),
        }
    });
}

/// Build the quality warning for an image against the selected size, if
/// its smaller dimension falls short.
///
/// Recommends the first catalog size (smallest upward) the image does
/// satisfy, or a generic low-resolution message when none fits.
fn quality_warning(size: PrintSize, width: u32, height: u32) -> Option<String> {
    let smaller = width.min(height);
    if smaller >= size.min_pixels() {
        return None;
    }

    PrintSize::ALL
        .iter()
        .find(|candidate| candidate.min_pixels() <= smaller)
        .map_or_else(
            || {
                Some(format!(
                    "This image resolution ({width}x{height}) might be too low for high-quality \
                     prints. We recommend using images with at least {}px for the smallest \
                     dimension.",
                    size.min_pixels()
                ))
            },
            |recommended| {
                Some(format!(
                    "This image might be too small for {size} prints. We recommend using \
                     {recommended} or smaller for best quality."
                ))
            },
        )
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_quality_warning_none_when_resolution_sufficient() {
        assert_eq!(quality_warning(PrintSize::A3, 2480, 3508), None);
        assert_eq!(quality_warning(PrintSize::A4, 1748, 1748), None);
    }

    #[test]
    fn test_quality_warning_recommends_smaller_size() {
        // 2000px smaller dimension: short of A3 (2480) but fine for A4 (1748)
        let warning = quality_warning(PrintSize::A3, 2000, 3000).unwrap();
        assert!(warning.contains("too small for A3"));
        assert!(warning.contains("A4 or smaller"));
    }

    #[test]
    fn test_quality_warning_generic_when_no_size_fits() {
        // 1000x1200 is short of even A4's 1748px minimum
        let warning = quality_warning(PrintSize::A3, 1000, 1200).unwrap();
        assert!(warning.contains("1000x1200"));
        assert!(warning.contains("2480px"));
        assert!(!warning.contains("or smaller for best quality"));
    }

    #[test]
    fn test_quality_warning_uses_smaller_dimension() {
        // Height is plenty; the 2000px width is what falls short of A0
        let warning = quality_warning(PrintSize::A0, 2000, 9000).unwrap();
        assert!(warning.contains("too small for A0"));
        assert!(warning.contains("A4 or smaller"));
    }
}
