//! Property-based tests using proptest
//!
//! These tests generate many random inputs to check invariants of payload
//! parsing, blob naming and cache expiry.

use base64::engine::general_purpose::{STANDARD, STANDARD_NO_PAD};
use base64::Engine;
use chrono::{TimeZone, Utc};
use proptest::prelude::*;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use media_store::application::cache::{EntryState, TtlCache};
use media_store::domain::errors::DomainError;
use media_store::domain::value_objects::{BlobName, ImagePayload};
use media_store::infrastructure::storage::PathBuilder;

/// Strategy for image subtypes and the extension each maps to
fn image_type_strategy() -> impl Strategy<Value = (&'static str, &'static str)> {
    prop_oneof![
        Just(("png", "png")),
        Just(("jpeg", "jpg")),
        Just(("gif", "gif")),
        Just(("webp", "webp")),
        Just(("svg+xml", "svg")),
    ]
}

/// Strategy for non-empty image bodies
fn image_bytes_strategy() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(any::<u8>(), 1..2048)
}

proptest! {
    #[test]
    fn prop_data_uri_decodes_to_original_bytes(
        (subtype, extension) in image_type_strategy(),
        bytes in image_bytes_strategy(),
        padded in any::<bool>(),
    ) {
        let encoded = if padded {
            STANDARD.encode(&bytes)
        } else {
            STANDARD_NO_PAD.encode(&bytes)
        };
        let uri = format!("data:image/{subtype};base64,{encoded}");

        let payload = ImagePayload::from_data_uri(&uri).unwrap();

        prop_assert_eq!(payload.bytes(), bytes.as_slice());
        prop_assert_eq!(payload.extension(), extension);
        prop_assert_eq!(payload.content_type(), format!("image/{subtype}"));
    }

    #[test]
    fn prop_input_without_data_prefix_is_invalid_encoding(input in "[^d\\s].{0,200}") {
        prop_assert_eq!(
            ImagePayload::from_data_uri(&input),
            Err(DomainError::InvalidEncoding)
        );
    }

    #[test]
    fn prop_non_image_mime_is_rejected(
        kind in "(text|application|audio|video)",
        bytes in image_bytes_strategy(),
    ) {
        let uri = format!("data:{kind}/x-test;base64,{}", STANDARD.encode(&bytes));

        let is_unsupported = matches!(
            ImagePayload::from_data_uri(&uri),
            Err(DomainError::UnsupportedMediaType(_))
        );
        prop_assert!(is_unsupported);
    }

    #[test]
    fn prop_blob_name_encodes_creation_time(
        millis in 0i64..4_102_444_800_000,
        extension in "[a-z]{1,5}",
    ) {
        let created = Utc.timestamp_millis_opt(millis).unwrap();
        let name = BlobName::generate_at(created, &extension);
        let location = format!("images/{name}");

        prop_assert_eq!(BlobName::timestamp_of(&location), Some(created));
        let expected_suffix = format!(".{}", extension);
        prop_assert!(name.as_str().ends_with(&expected_suffix));
    }

    #[test]
    fn prop_names_with_separators_never_resolve(
        prefix in "[a-z0-9]{0,8}",
        separator in prop_oneof![Just("/"), Just("\\"), Just("../")],
        suffix in "[a-z0-9.]{0,8}",
    ) {
        let builder = PathBuilder::new(PathBuf::from("/srv/public"));
        let name = format!("{prefix}{separator}{suffix}");

        prop_assert!(builder.location_for(&name).is_err());
    }

    #[test]
    fn prop_expired_get_behaves_like_empty_cache(
        ttl_ms in 1u64..10_000,
        extra_ms in 0u64..10_000,
    ) {
        let cache: TtlCache<u32> = TtlCache::new(Duration::from_secs(60), 10);
        let empty: TtlCache<u32> = TtlCache::new(Duration::from_secs(60), 10);
        let now = Instant::now();
        let later = now + Duration::from_millis(ttl_ms + extra_ms);

        cache.set_at("all_media", 7, Duration::from_millis(ttl_ms), now);
        prop_assert_eq!(cache.state_at("all_media", later), EntryState::Expired);

        prop_assert_eq!(cache.get_at("all_media", later), empty.get_at("all_media", later));
        prop_assert_eq!(cache.state_at("all_media", later), EntryState::Empty);
        prop_assert_eq!(cache.len(), empty.len());
        prop_assert_eq!(cache.stats().misses, empty.stats().misses);
    }

    #[test]
    fn prop_fresh_entries_are_returned(ttl_ms in 2u64..10_000, elapsed_fraction in 0u64..100) {
        let cache: TtlCache<u32> = TtlCache::new(Duration::from_secs(60), 10);
        let now = Instant::now();
        let elapsed = Duration::from_millis((ttl_ms - 1) * elapsed_fraction / 100);

        cache.set_at("all_media", 7, Duration::from_millis(ttl_ms), now);

        prop_assert_eq!(cache.get_at("all_media", now + elapsed), Some(7));
    }

    #[test]
    fn prop_cache_never_exceeds_capacity(capacity in 1usize..20, inserts in 1usize..60) {
        let cache: TtlCache<usize> = TtlCache::new(Duration::from_secs(60), capacity);

        for i in 0..inserts {
            cache.set(format!("key-{i}"), i);
        }

        prop_assert!(cache.len() <= capacity);
        // The most recently set key always survives
        let last_key = format!("key-{}", inserts - 1);
        prop_assert_eq!(cache.get(&last_key), Some(inserts - 1));
    }
}
