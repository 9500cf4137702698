use wallify::types::{AlbumRef, Artist, ContentItem, ContentType, ExternalUrls, Image, Track};
use wallify::utils::*;

// Helper function to create a test artist item
fn create_test_artist(id: &str, name: &str, image: Option<&str>) -> ContentItem {
    ContentItem::Artist(Artist {
        id: id.to_string(),
        name: name.to_string(),
        genres: vec!["synthwave".to_string()],
        images: image
            .map(|url| {
                vec![Image {
                    url: url.to_string(),
                    height: Some(300),
                    width: Some(300),
                }]
            })
            .unwrap_or_default(),
        external_urls: ExternalUrls {
            spotify: Some(format!("https://open.spotify.com/artist/{}", id)),
        },
    })
}

// Helper function to create a test track item; tracks keep their image on
// the album
fn create_test_track(id: &str, name: &str, album_image: Option<&str>) -> ContentItem {
    ContentItem::Track(Track {
        id: id.to_string(),
        name: name.to_string(),
        album: AlbumRef {
            name: format!("{} (album)", name),
            images: album_image
                .map(|url| {
                    vec![Image {
                        url: url.to_string(),
                        height: Some(640),
                        width: Some(640),
                    }]
                })
                .unwrap_or_default(),
        },
        external_urls: ExternalUrls {
            spotify: Some(format!("https://open.spotify.com/track/{}", id)),
        },
    })
}

#[test]
fn test_generate_session_key() {
    let key = generate_session_key();

    // Should be exactly 32 characters
    assert_eq!(key.len(), 32);

    // Should contain only alphanumeric characters
    assert!(key.chars().all(|c| c.is_ascii_alphanumeric()));

    // Two generated keys should be different
    let key2 = generate_session_key();
    assert_ne!(key, key2);
}

#[test]
fn test_parse_content_type() {
    assert_eq!(parse_content_type("artists"), Ok(ContentType::Artists));
    assert_eq!(parse_content_type("tracks"), Ok(ContentType::Tracks));

    // Singular and mixed-case spellings are accepted
    assert_eq!(parse_content_type("Artist"), Ok(ContentType::Artists));
    assert_eq!(parse_content_type("TRACKS"), Ok(ContentType::Tracks));

    // Anything else is rejected with a message
    assert!(parse_content_type("albums").is_err());
    assert!(parse_content_type("").is_err());
}

#[test]
fn test_content_item_accessors() {
    let artist = create_test_artist("a1", "Artist One", Some("https://img.test/a1"));
    assert_eq!(artist.name(), "Artist One");
    assert_eq!(artist.image_url(), Some("https://img.test/a1"));
    assert_eq!(
        artist.external_url(),
        Some("https://open.spotify.com/artist/a1")
    );

    // Tracks resolve their image through the album reference
    let track = create_test_track("t1", "Track One", Some("https://img.test/t1"));
    assert_eq!(track.name(), "Track One");
    assert_eq!(track.image_url(), Some("https://img.test/t1"));

    // No images means no image URL, not a panic
    let bare = create_test_artist("a2", "Artist Two", None);
    assert_eq!(bare.image_url(), None);
}

#[test]
fn test_content_item_serde_tag() {
    let artist = create_test_artist("a1", "Artist One", Some("https://img.test/a1"));
    let json = serde_json::to_string(&artist).unwrap();

    // The variant is carried in an explicit kind tag
    assert!(json.contains("\"kind\":\"artist\""));

    let parsed: ContentItem = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed.name(), "Artist One");
    assert_eq!(parsed.image_url(), Some("https://img.test/a1"));
}

#[test]
fn test_filter_imageless() {
    let items = vec![
        create_test_artist("a1", "With Image", Some("https://img.test/a1")),
        create_test_artist("a2", "No Image", None),
        create_test_track("t1", "Covered", Some("https://img.test/t1")),
        create_test_track("t2", "Coverless", None),
        // an empty URL counts as missing
        create_test_artist("a3", "Blank Image", Some("")),
    ];

    let filtered = filter_imageless(items);

    assert_eq!(filtered.len(), 2);
    assert_eq!(filtered[0].name(), "With Image");
    assert_eq!(filtered[1].name(), "Covered");
}
