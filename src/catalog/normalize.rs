//! Maps raw catalog volumes into normalized Book and BookDetails values
//!
//! A record only becomes a `Book` when a usable cover image can be derived;
//! everything else is dropped. Fields the catalog leaves blank (rating,
//! review count, listing condition) are filled with placeholders derived
//! deterministically from the volume id, so repeated fetches of the same
//! record always agree and tests are reproducible.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use super::client::{CatalogError, SaleInfo, Volume};
use super::{Book, BookDetails, Condition, Format};

/// Title used when the catalog record has none
const UNTITLED: &str = "Untitled";

/// Author used when the catalog record lists none
const UNKNOWN_AUTHOR: &str = "Unknown author";

/// Maps one raw volume to a Book
///
/// Returns `None` when no cover image resolves; list operations drop such
/// records silently.
pub fn book_from_volume(volume: &Volume) -> Option<Book> {
    let info = &volume.volume_info;
    let cover_url = info
        .image_links
        .as_ref()
        .and_then(|links| select_cover(links))?;

    let seed = placeholder_seed(&volume.id);
    let sale = volume.sale_info.as_ref();
    let format = derive_format(volume);
    let (is_used, condition) = derive_condition(sale, format, seed);

    Some(Book {
        id: volume.id.clone(),
        title: info.title.clone().unwrap_or_else(|| UNTITLED.to_string()),
        author: info
            .authors
            .first()
            .cloned()
            .unwrap_or_else(|| UNKNOWN_AUTHOR.to_string()),
        description: info.description.clone().unwrap_or_default(),
        cover_url,
        rating: info.average_rating.unwrap_or_else(|| placeholder_rating(seed)),
        review_count: info
            .ratings_count
            .unwrap_or_else(|| placeholder_review_count(seed)),
        categories: info.categories.clone(),
        published_date: info.published_date.clone(),
        is_used,
        condition,
        format,
        download_link: download_link(volume),
        preview_link: info.preview_link.clone(),
        purchase_link: sale.and_then(|s| s.buy_link.clone()),
    })
}

/// Maps one raw volume to a full detail record
///
/// Unlike the list path, a missing cover here is an error; the caller is
/// expected to surface it rather than substitute fallback data.
pub fn details_from_volume(volume: &Volume) -> Result<BookDetails, CatalogError> {
    let book =
        book_from_volume(volume).ok_or_else(|| CatalogError::MissingCover(volume.id.clone()))?;
    let info = &volume.volume_info;

    Ok(BookDetails {
        book,
        subtitle: info.subtitle.clone(),
        authors: info.authors.clone(),
        isbn: pick_isbn(volume),
        language: info.language.clone(),
        page_count: info.page_count,
        publisher: info.publisher.clone(),
    })
}

/// Picks the best cover variant and polishes its URL
///
/// Variants are tried in descending resolution order; the first non-empty one
/// wins. Even a smallThumbnail-only record yields a cover.
fn select_cover(links: &super::client::ImageLinks) -> Option<String> {
    let by_priority = [
        &links.extra_large,
        &links.large,
        &links.medium,
        &links.small,
        &links.thumbnail,
        &links.small_thumbnail,
    ];

    by_priority
        .into_iter()
        .flatten()
        .find(|url| !url.trim().is_empty())
        .map(|url| polish_cover_url(url))
}

/// Rewrites a raw cover URL for display
///
/// Upgrades to https, requests a higher zoom level, and strips the page-curl
/// watermark parameter the catalog appends to thumbnails.
fn polish_cover_url(raw: &str) -> String {
    let mut url = raw.replacen("http://", "https://", 1);
    url = url.replace("&edge=curl", "");
    if url.contains("zoom=1") {
        url = url.replace("zoom=1", "zoom=2");
    }
    url
}

/// Derives the delivery format from sale and access metadata
fn derive_format(volume: &Volume) -> Format {
    let ebook_sale = volume
        .sale_info
        .as_ref()
        .and_then(|s| s.is_ebook)
        .unwrap_or(false);
    let epub_available = volume
        .access_info
        .as_ref()
        .and_then(|a| a.epub.as_ref())
        .map(|e| e.is_available)
        .unwrap_or(false);

    if ebook_sale || epub_available {
        Format::Ebook
    } else {
        Format::Paperback
    }
}

/// Derives the used/new flag and condition label
///
/// The catalog carries no real condition data, so print listings split
/// between new and used stock on the deterministic seed; a volume not listed
/// for sale leans used. Ebooks are always new.
fn derive_condition(sale: Option<&SaleInfo>, format: Format, seed: u64) -> (bool, Condition) {
    if format == Format::Ebook {
        return (false, Condition::New);
    }

    let for_sale = sale.and_then(|s| s.saleability.as_deref()) == Some("FOR_SALE");
    let used = if for_sale { seed % 3 == 0 } else { seed % 2 == 0 };
    if !used {
        return (false, Condition::New);
    }

    let condition = match (seed >> 4) % 3 {
        0 => Condition::LikeNew,
        1 => Condition::VeryGood,
        _ => Condition::Good,
    };
    (true, condition)
}

/// Picks a direct download link, preferring epub over pdf
fn download_link(volume: &Volume) -> Option<String> {
    let access = volume.access_info.as_ref()?;
    access
        .epub
        .as_ref()
        .and_then(|e| e.download_link.clone())
        .or_else(|| access.pdf.as_ref().and_then(|p| p.download_link.clone()))
        .or_else(|| access.web_reader_link.clone())
}

/// Picks the preferred ISBN, ISBN-13 before ISBN-10
fn pick_isbn(volume: &Volume) -> Option<String> {
    let identifiers = &volume.volume_info.industry_identifiers;
    let by_kind = |kind: &str| {
        identifiers
            .iter()
            .find(|id| id.kind.as_deref() == Some(kind))
            .and_then(|id| id.identifier.clone())
    };
    by_kind("ISBN_13").or_else(|| by_kind("ISBN_10"))
}

/// Stable seed derived from a volume id
fn placeholder_seed(id: &str) -> u64 {
    let mut hasher = DefaultHasher::new();
    id.hash(&mut hasher);
    hasher.finish()
}

/// Placeholder rating in the 3.5 to 5.0 range
fn placeholder_rating(seed: u64) -> f64 {
    3.5 + (seed % 16) as f64 * 0.1
}

/// Placeholder review count in the 25 to 999 range
fn placeholder_review_count(seed: u64) -> u32 {
    25 + ((seed >> 8) % 975) as u32
}
