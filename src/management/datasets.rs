use crate::{
    analysis::Datasets,
    config::Settings,
    spotify::{MusicApi, artists::unique_artist_ids},
    types::Source,
};

use super::Memo;

/// Fetches everything one analysis needs: the three playlists and the genres
/// of the user's and the curator's artists. All calls go through `memo`, so
/// repeated analyses of the same playlists don't hit the API again.
pub async fn collect_datasets(
    api: &dyn MusicApi,
    memo: &Memo,
    settings: &Settings,
    user_playlist_id: &str,
) -> Datasets {
    let user = memo.playlist(api, user_playlist_id, Source::User).await;
    let global = memo
        .playlist(api, &settings.global_playlist_id, Source::Global)
        .await;
    let curator = memo
        .playlist(api, &settings.curator_playlist_id, Source::Curator)
        .await;

    let user_genres = memo.genres(api, &unique_artist_ids(&user)).await;
    let curator_genres = memo.genres(api, &unique_artist_ids(&curator)).await;

    Datasets {
        user,
        global,
        curator,
        user_genres,
        curator_genres,
    }
}
