use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use rand::{Rng, distr::Alphanumeric};
use sha2::{Digest, Sha256};

pub fn generate_code_verifier() -> String {
    random_alphanumeric(128)
}

pub fn generate_code_challenge(verifier: &str) -> String {
    let hash = Sha256::digest(verifier.as_bytes());
    URL_SAFE_NO_PAD.encode(hash)
}

pub fn generate_session_id() -> String {
    random_alphanumeric(32)
}

fn random_alphanumeric(len: usize) -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(len)
        .map(char::from)
        .collect()
}

/// Splits `items` into consecutive chunks of `size`.
///
/// Every chunk but the last holds exactly `size` items. The last one holds
/// `items.len() % size` items, or `size` when the length divides evenly, so
/// an evenly divisible input never produces an empty trailing chunk. Empty
/// input produces no chunks. A `size` of zero puts everything in one chunk.
pub fn chunk<T>(items: &[T], size: usize) -> Vec<&[T]> {
    if items.is_empty() {
        return Vec::new();
    }
    if size == 0 {
        return vec![items];
    }

    let total = items.len();
    let remainder = total % size;

    (0..total)
        .step_by(size)
        .map(|start| {
            let len = if total < start + size { remainder } else { size };
            &items[start..start + len]
        })
        .collect()
}

/// Offsets of the pages needed to cover `total` items, `page_size` at a time.
///
/// The offsets are produced lazily, a huge `total` costs nothing up front.
pub fn page_offsets(total: u64, page_size: u32) -> impl Iterator<Item = u64> {
    let step = u64::from(page_size.max(1));
    (0..total).step_by(step as usize)
}

pub fn join_ids(ids: &[String]) -> String {
    ids.join(",")
}

pub fn playlist_url(playlist_id: &str) -> String {
    format!("https://open.spotify.com/playlist/{}", playlist_id)
}
