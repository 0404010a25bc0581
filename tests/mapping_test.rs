use nowplay::spotify::to_now_playing;
use nowplay::types::{CurrentlyPlaying, NowPlaying};
use serde_json::json;

fn parse(value: serde_json::Value) -> CurrentlyPlaying {
    serde_json::from_value(value).unwrap()
}

fn full_response() -> CurrentlyPlaying {
    parse(json!({
        "progress_ms": 42_000,
        "is_playing": true,
        "item": {
            "album": {
                "external_urls": { "spotify": "https://open.spotify.com/album/a1" },
                "images": [
                    { "url": "https://i.scdn.co/640", "height": 640, "width": 640 },
                    { "url": "https://i.scdn.co/300", "height": 300, "width": 300 },
                    { "url": "https://i.scdn.co/64", "height": null, "width": null }
                ],
                "name": "Album One"
            },
            "artists": [
                { "external_urls": { "spotify": "https://open.spotify.com/artist/x" }, "name": "X" },
                { "name": "Y" },
                { "external_urls": { "spotify": "https://open.spotify.com/artist/z" }, "name": "Z" }
            ],
            "duration_ms": 215_000,
            "external_urls": { "spotify": "https://open.spotify.com/track/t1" },
            "name": "Track One",
            "popularity": 12
        }
    }))
}

#[test]
fn test_empty_response_maps_to_empty_shape() {
    let np = to_now_playing(&CurrentlyPlaying::default());

    assert_eq!(np, NowPlaying::default());
    assert!(np.artists.is_empty());
    assert!(np.images.is_empty());
    assert_eq!(np.is_playing, None);
    assert_eq!(np.name, None);

    let body = serde_json::to_value(&np).unwrap();
    assert_eq!(body, json!({ "album": {}, "artists": [], "images": [] }));
}

#[test]
fn test_paused_without_item() {
    let np = to_now_playing(&parse(json!({
        "progress_ms": null,
        "is_playing": false,
        "item": null
    })));

    assert_eq!(np.is_playing, Some(false));
    assert_eq!(np.progress_ms, None);
    assert!(np.artists.is_empty());
    assert!(np.images.is_empty());
    assert_eq!(np.album.name, None);
}

#[test]
fn test_full_response_maps_every_field() {
    let np = to_now_playing(&full_response());

    assert_eq!(np.album.name.as_deref(), Some("Album One"));
    assert_eq!(
        np.album.url.as_deref(),
        Some("https://open.spotify.com/album/a1")
    );
    assert_eq!(np.duration_ms, Some(215_000));
    assert_eq!(np.is_playing, Some(true));
    assert_eq!(np.name.as_deref(), Some("Track One"));
    assert_eq!(np.progress_ms, Some(42_000));
    assert_eq!(
        np.url.as_deref(),
        Some("https://open.spotify.com/track/t1")
    );
}

#[test]
fn test_artists_and_images_keep_order_and_count() {
    let raw = full_response();
    let np = to_now_playing(&raw);

    let item = raw.item.as_ref().unwrap();
    let raw_artists = item.artists.as_ref().unwrap();
    let raw_images = item.album.as_ref().unwrap().images.as_ref().unwrap();

    assert_eq!(np.artists.len(), raw_artists.len());
    assert_eq!(np.images.len(), raw_images.len());

    let names: Vec<_> = np.artists.iter().map(|a| a.name.as_deref()).collect();
    assert_eq!(names, vec![Some("X"), Some("Y"), Some("Z")]);

    let urls: Vec<_> = np.images.iter().map(|i| i.url.as_deref()).collect();
    assert_eq!(
        urls,
        vec![
            Some("https://i.scdn.co/640"),
            Some("https://i.scdn.co/300"),
            Some("https://i.scdn.co/64")
        ]
    );
}

#[test]
fn test_missing_nested_fields_only_blank_their_output() {
    let np = to_now_playing(&full_response());

    // artist without external_urls
    assert_eq!(np.artists[1].name.as_deref(), Some("Y"));
    assert_eq!(np.artists[1].url, None);

    // image with null dimensions keeps them as null in the body
    let body = serde_json::to_value(&np.images[2]).unwrap();
    assert_eq!(
        body,
        json!({ "url": "https://i.scdn.co/64", "height": null, "width": null })
    );
}

#[test]
fn test_item_without_album_or_artists() {
    let np = to_now_playing(&parse(json!({
        "is_playing": true,
        "item": { "name": "Episode", "duration_ms": 1000 }
    })));

    assert_eq!(np.name.as_deref(), Some("Episode"));
    assert_eq!(np.duration_ms, Some(1000));
    assert_eq!(np.album.name, None);
    assert_eq!(np.album.url, None);
    assert!(np.artists.is_empty());
    assert!(np.images.is_empty());
    assert_eq!(np.url, None);
}

#[test]
fn test_album_without_images_or_urls() {
    let np = to_now_playing(&parse(json!({
        "item": { "album": { "name": "Bare" }, "artists": [] }
    })));

    assert_eq!(np.album.name.as_deref(), Some("Bare"));
    assert_eq!(np.album.url, None);
    assert!(np.images.is_empty());
    assert!(np.artists.is_empty());
}

#[test]
fn test_absent_scalars_are_omitted_from_json() {
    let np = to_now_playing(&parse(json!({
        "item": { "name": "Only Name" }
    })));

    let body = serde_json::to_value(&np).unwrap();
    assert_eq!(
        body,
        json!({ "album": {}, "artists": [], "images": [], "name": "Only Name" })
    );
}

#[test]
fn test_mapping_is_deterministic() {
    let raw = full_response();
    let first = serde_json::to_vec(&to_now_playing(&raw)).unwrap();
    let second = serde_json::to_vec(&to_now_playing(&raw)).unwrap();
    assert_eq!(first, second);
}
