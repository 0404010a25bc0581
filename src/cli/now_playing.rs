use std::sync::Arc;

use tabled::Table;

use crate::{
    config::Config,
    error,
    management::{FileTokenStore, TokenManager},
    spotify::NowPlayingClient,
    types::{NowPlaying, NowPlayingTableRow},
    warning,
};

/// Performs one read through the same path as the public endpoint.
pub async fn now_playing(config: Config, json: bool) {
    let tokens = TokenManager::new(Arc::new(FileTokenStore::new(&config.token_store_dir)));
    let access_token = match tokens.access_token().await {
        Ok(t) => t,
        Err(e) => error!("{}. Please run nowplay setup first.", e),
    };

    let now_playing = match NowPlayingClient::new(&config)
        .fetch_now_playing(&access_token)
        .await
    {
        Ok(np) => np,
        Err(e) => error!("Cannot read the current track. Err: {}", e),
    };

    if json {
        match serde_json::to_string_pretty(&now_playing) {
            Ok(body) => println!("{}", body),
            Err(e) => error!("Cannot encode response. Err: {}", e),
        }
        return;
    }

    if now_playing.name.is_none() {
        warning!("Nothing is playing right now.");
        return;
    }

    println!("{}", Table::new(table_rows(&now_playing)));
}

fn table_rows(np: &NowPlaying) -> Vec<NowPlayingTableRow> {
    let text = |v: Option<&str>| v.unwrap_or("-").to_string();
    let artists = np
        .artists
        .iter()
        .filter_map(|a| a.name.as_deref())
        .collect::<Vec<_>>()
        .join(", ");
    let progress = match (np.progress_ms, np.duration_ms) {
        (Some(p), Some(d)) => format!("{} / {}", format_ms(p), format_ms(d)),
        (None, Some(d)) => format!("- / {}", format_ms(d)),
        _ => "-".to_string(),
    };
    let state = match np.is_playing {
        Some(true) => "playing",
        Some(false) => "paused",
        None => "-",
    };

    [
        ("track", text(np.name.as_deref())),
        ("artists", artists),
        ("album", text(np.album.name.as_deref())),
        ("state", state.to_string()),
        ("progress", progress),
        ("url", text(np.url.as_deref())),
    ]
    .into_iter()
    .map(|(field, value)| NowPlayingTableRow {
        field: field.to_string(),
        value,
    })
    .collect()
}

fn format_ms(ms: u64) -> String {
    let secs = ms / 1000;
    format!("{}:{:02}", secs / 60, secs % 60)
}
