use reqwest::{Client, StatusCode};

use crate::{
    config::Config,
    error::BridgeError,
    types::{
        CurrentlyPlaying, ExternalUrls, NowPlaying, NowPlayingAlbum, NowPlayingArtist,
        NowPlayingImage,
    },
};

/// Reads the user's currently playing track and reshapes it for the widget.
#[derive(Debug, Clone)]
pub struct NowPlayingClient {
    http: Client,
    endpoint: String,
    market: String,
}

impl NowPlayingClient {
    pub fn new(config: &Config) -> Self {
        Self {
            http: Client::new(),
            endpoint: format!("{}/me/player/currently-playing", config.api_url),
            market: config.market.clone(),
        }
    }

    /// Fetches the raw currently-playing resource.
    ///
    /// A `204 No Content` means nothing is playing and yields an empty
    /// [`CurrentlyPlaying`]. Anything other than 200 or 204 is an error; no
    /// partial result is returned.
    ///
    /// # Arguments
    ///
    /// * `access_token` - Non-empty bearer token taken from the token store
    pub async fn fetch_currently_playing(
        &self,
        access_token: &str,
    ) -> Result<CurrentlyPlaying, BridgeError> {
        let res = self
            .http
            .get(&self.endpoint)
            .query(&[("market", self.market.as_str())])
            .bearer_auth(access_token)
            .send()
            .await?;

        match res.status() {
            StatusCode::NO_CONTENT => Ok(CurrentlyPlaying::default()),
            StatusCode::OK => Ok(res.json::<CurrentlyPlaying>().await?),
            status => Err(BridgeError::Upstream { status }),
        }
    }

    /// Fetches and maps in one step. See [`to_now_playing`].
    pub async fn fetch_now_playing(&self, access_token: &str) -> Result<NowPlaying, BridgeError> {
        let raw = self.fetch_currently_playing(access_token).await?;
        Ok(to_now_playing(&raw))
    }
}

/// Flattens the provider response into the public shape.
///
/// Total over every input: each output field is looked up independently and a
/// missing level anywhere on its path only makes that field absent. Artists and
/// images keep the upstream order and count.
pub fn to_now_playing(raw: &CurrentlyPlaying) -> NowPlaying {
    let item = raw.item.as_ref();
    let album = item.and_then(|i| i.album.as_ref());

    NowPlaying {
        album: NowPlayingAlbum {
            name: album.and_then(|a| a.name.clone()),
            url: spotify_url(album.and_then(|a| a.external_urls.as_ref())),
        },
        artists: item
            .and_then(|i| i.artists.as_ref())
            .map(|artists| {
                artists
                    .iter()
                    .map(|artist| NowPlayingArtist {
                        name: artist.name.clone(),
                        url: spotify_url(artist.external_urls.as_ref()),
                    })
                    .collect()
            })
            .unwrap_or_default(),
        duration_ms: item.and_then(|i| i.duration_ms),
        images: album
            .and_then(|a| a.images.as_ref())
            .map(|images| {
                images
                    .iter()
                    .map(|image| NowPlayingImage {
                        url: image.url.clone(),
                        height: image.height,
                        width: image.width,
                    })
                    .collect()
            })
            .unwrap_or_default(),
        is_playing: raw.is_playing,
        name: item.and_then(|i| i.name.clone()),
        progress_ms: raw.progress_ms,
        url: spotify_url(item.and_then(|i| i.external_urls.as_ref())),
    }
}

fn spotify_url(urls: Option<&ExternalUrls>) -> Option<String> {
    urls.and_then(|u| u.spotify.clone())
}
