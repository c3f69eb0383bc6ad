//! Compression and content hashing for card database bundles.

use std::io::{Read, Write};

use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use serde_json::Value;
use sha2::{Digest, Sha256};

use crate::cards::Card;
use crate::core::{CatalogError, Result};

/// Hex characters of the digest kept in hashes and versions.
const HASH_CHARS: usize = 8;

/// Gzip `bytes`.
pub fn compress(bytes: &[u8]) -> Result<Vec<u8>> {
    let mut encoder = GzEncoder::new(
        Vec::with_capacity((bytes.len() / 4).max(256)),
        Compression::default(),
    );
    encoder
        .write_all(bytes)
        .map_err(|e| CatalogError::Bundle(format!("gzip encoding failed: {}", e)))?;
    encoder
        .finish()
        .map_err(|e| CatalogError::Bundle(format!("gzip finalize failed: {}", e)))
}

/// Gunzip `bytes`.
pub fn decompress(bytes: &[u8]) -> Result<Vec<u8>> {
    let mut out = Vec::with_capacity(bytes.len() * 4);
    GzDecoder::new(bytes)
        .read_to_end(&mut out)
        .map_err(|e| CatalogError::Bundle(format!("gzip decoding failed: {}", e)))?;
    Ok(out)
}

/// Short content hash of a card set: the first eight hex characters of the
/// SHA-256 of its JSON form, links excluded.
///
/// Links are derived data, so relinking the same cards keeps the hash.
pub fn content_hash(cards: &[Card]) -> Result<String> {
    let mut stripped = Vec::with_capacity(cards.len());
    for card in cards {
        let mut value = serde_json::to_value(card)?;
        if let Value::Object(fields) = &mut value {
            fields.remove("link");
        }
        stripped.push(value);
    }
    let json = serde_json::to_vec(&stripped)?;

    let digest = Sha256::digest(&json);
    let mut hash = hex::encode(digest);
    hash.truncate(HASH_CHARS);
    Ok(hash)
}

/// Version tag of a card set: `"v"` followed by its content hash.
///
/// ## Example
///
/// ```
/// use rust_ccg_search::bundle::content_version;
/// use rust_ccg_search::cards::Card;
///
/// let cards = vec![Card::new("S1/001", "C001", "S1").with_name("Alpha")];
/// let version = content_version(&cards).unwrap();
/// assert!(version.starts_with('v'));
/// assert_eq!(version.len(), 9);
/// ```
pub fn content_version(cards: &[Card]) -> Result<String> {
    Ok(format!("v{}", content_hash(cards)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cards() -> Vec<Card> {
        vec![
            Card::new("S1/001", "C001", "S1").with_name("Alpha"),
            Card::new("S1/002", "C002", "S1").with_name("Beta"),
        ]
    }

    #[test]
    fn test_gzip_round_trip() {
        let payload = br#"{"cards":[]}"#.repeat(100);
        let packed = compress(&payload).unwrap();
        assert!(packed.len() < payload.len());
        assert_eq!(decompress(&packed).unwrap(), payload);
    }

    #[test]
    fn test_decompress_rejects_garbage() {
        let err = decompress(b"not gzip").unwrap_err();
        assert!(matches!(err, CatalogError::Bundle(_)));
    }

    #[test]
    fn test_hash_is_stable() {
        let a = content_hash(&cards()).unwrap();
        let b = content_hash(&cards()).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.len(), 8);
        assert!(a.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_hash_is_digest_prefix() {
        // An empty card set serializes as `[]`.
        assert_eq!(content_hash(&[]).unwrap(), "4f53cda1");
    }

    #[test]
    fn test_hash_ignores_links() {
        let mut linked = cards();
        linked[0].link = vec!["S1/002".into()];
        assert_eq!(content_hash(&linked).unwrap(), content_hash(&cards()).unwrap());
    }

    #[test]
    fn test_hash_tracks_content() {
        let mut changed = cards();
        changed[1].name = Some("Gamma".into());
        assert_ne!(content_hash(&changed).unwrap(), content_hash(&cards()).unwrap());
        assert_eq!(
            content_version(&cards()).unwrap(),
            format!("v{}", content_hash(&cards()).unwrap())
        );
    }
}
