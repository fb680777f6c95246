//! Request handling for the library.
//!
//! The controller resolves ids against the catalogs and validates sort keys, so the playlist
//! operations it calls only ever see songs and keys that exist.

//----------------------------------------------------------------------------------------- std lib
use std::sync::Arc;
//--------------------------------------------------------------------------------- other libraries
use log::{info, warn};
use tracing::instrument;
//------------------------------------------------------------------------------- SETLIST libraries
use setlist_core::playlist::{PlaylistHandle, PlaylistSnapshot, sort::SortKey};
use setlist_storage::{
    db::schemas::{
        playlist::{PlaylistBrief, PlaylistId},
        song::{SongBrief, SongChangeSet, SongHandle, SongId},
    },
    util::{lock, read},
};

use crate::{errors::ServiceError, state::Library};

#[derive(Clone, Debug, Default)]
pub struct LibraryController {
    library: Arc<Library>,
}

impl LibraryController {
    #[must_use]
    pub const fn new(library: Arc<Library>) -> Self {
        Self { library }
    }

    #[must_use]
    pub fn library(&self) -> &Library {
        &self.library
    }

    fn song(&self, id: SongId) -> Result<SongHandle, ServiceError> {
        self.library
            .songs()
            .read(id)
            .ok_or(ServiceError::SongNotFound(id))
    }

    fn playlist(&self, id: PlaylistId) -> Result<PlaylistHandle, ServiceError> {
        self.library
            .playlist(id)
            .ok_or(ServiceError::PlaylistNotFound(id))
    }

    /// Songs: create a new song.
    #[instrument(skip(self))]
    pub fn song_create(&self, name: &str, artist: &str, genre: &str) -> SongBrief {
        info!("Creating song: {name} by {artist}");
        let handle = self.library.songs().create(name, artist, genre);
        let brief = SongBrief::from(&*read(&handle));
        brief
    }

    /// Songs: get a song by its id.
    #[instrument(skip(self))]
    pub fn song_get(&self, id: SongId) -> Result<SongBrief, ServiceError> {
        self.library
            .songs()
            .read_brief(id)
            .map_err(|_| ServiceError::SongNotFound(id))
    }

    /// Songs: update some (or none) of a song's fields.
    /// Every playlist the song is in sees the change.
    #[instrument(skip(self))]
    pub fn song_update(&self, id: SongId, changes: SongChangeSet) -> Result<SongBrief, ServiceError> {
        info!("Updating song {id}");
        self.library
            .songs()
            .update(id, changes)
            .map_err(|_| ServiceError::SongNotFound(id))
    }

    /// Songs: delete a song, removing it from every playlist.
    #[instrument(skip(self))]
    pub fn song_delete(&self, id: SongId) -> Result<(), ServiceError> {
        info!("Deleting song {id}");
        self.library
            .delete_song(id)
            .map(|_| ())
            .map_err(|_| ServiceError::SongNotFound(id))
    }

    /// Songs: every song in the library.
    #[instrument(skip(self))]
    pub fn song_list(&self) -> Vec<SongBrief> {
        info!("Listing songs");
        self.library.songs().read_all()
    }

    /// Playlists: create a new, empty, playlist.
    #[instrument(skip(self))]
    pub fn playlist_create(&self, name: &str) -> PlaylistSnapshot {
        info!("Creating new playlist: {name}");
        let handle = self.library.create_playlist(name);
        let snapshot = lock(&handle).to_snapshot();
        snapshot
    }

    /// Playlists: get a playlist, its songs in order and its recently played history.
    #[instrument(skip(self))]
    pub fn playlist_get(&self, id: PlaylistId) -> Result<PlaylistSnapshot, ServiceError> {
        info!("Getting playlist by ID: {id}");
        let playlist = self.playlist(id)?;
        let snapshot = lock(&playlist).to_snapshot();
        Ok(snapshot)
    }

    /// Playlists: brief information about every playlist.
    #[instrument(skip(self))]
    pub fn playlist_list(&self) -> Vec<PlaylistBrief> {
        info!("Listing playlists");
        self.library
            .playlists()
            .iter()
            .map(|playlist| lock(playlist).brief())
            .collect()
    }

    /// Playlists: delete a playlist.
    #[instrument(skip(self))]
    pub fn playlist_delete(&self, id: PlaylistId) -> Result<(), ServiceError> {
        info!("Removing playlist with id: {id}");
        self.library
            .delete_playlist(id)
            .map(|_| ())
            .map_err(|_| ServiceError::PlaylistNotFound(id))
    }

    /// Playlists: add a song to the end of a playlist.
    #[instrument(skip(self))]
    pub fn playlist_add_song(
        &self,
        playlist: PlaylistId,
        song: SongId,
    ) -> Result<PlaylistSnapshot, ServiceError> {
        info!("Adding song {song} to playlist {playlist}");
        let handle = self.playlist(playlist)?;
        let song_handle = self.song(song)?;
        self.add_resolved_song(playlist, &handle, song, &song_handle)
    }

    fn add_resolved_song(
        &self,
        playlist: PlaylistId,
        handle: &PlaylistHandle,
        song: SongId,
        song_handle: &SongHandle,
    ) -> Result<PlaylistSnapshot, ServiceError> {
        let mut guard = lock(handle);
        // a delete may have cascaded through this playlist since the song was resolved
        if !self.library.songs().contains(song) {
            warn!("Song {song} was deleted before it could be added to playlist {playlist}");
            return Err(ServiceError::SongNotFound(song));
        }
        if !guard.add_song(song_handle) {
            warn!("Song {song} is already in playlist {playlist}");
            return Err(ServiceError::SongAlreadyInPlaylist { playlist, song });
        }
        Ok(guard.to_snapshot())
    }

    /// Playlists: remove a song from a playlist.
    #[instrument(skip(self))]
    pub fn playlist_remove_song(
        &self,
        playlist: PlaylistId,
        song: SongId,
    ) -> Result<PlaylistSnapshot, ServiceError> {
        info!("Removing song {song} from playlist {playlist}");
        let handle = self.playlist(playlist)?;

        let mut guard = lock(&handle);
        if !guard.remove_song(song) {
            warn!("Song {song} is not in playlist {playlist}");
            return Err(ServiceError::SongNotInPlaylist { playlist, song });
        }
        Ok(guard.to_snapshot())
    }

    /// Playlists: sort a playlist by "name", "artist", or "genre".
    #[instrument(skip(self))]
    pub fn playlist_sort(
        &self,
        playlist: PlaylistId,
        key: &str,
    ) -> Result<PlaylistSnapshot, ServiceError> {
        info!("Sorting playlist {playlist} by {key}");
        let handle = self.playlist(playlist)?;
        let key = key
            .parse::<SortKey>()
            .map_err(|_| ServiceError::InvalidSortKey(key.to_string()))?;

        let mut guard = lock(&handle);
        guard.sort_songs(key);
        Ok(guard.to_snapshot())
    }

    /// Playlists: record a play of a song.
    /// Playing a song that isn't in the playlist does nothing.
    #[instrument(skip(self))]
    pub fn playlist_play_song(
        &self,
        playlist: PlaylistId,
        song: SongId,
    ) -> Result<PlaylistSnapshot, ServiceError> {
        info!("Playing song {song} from playlist {playlist}");
        let handle = self.playlist(playlist)?;

        let mut guard = lock(&handle);
        guard.play_song(song);
        Ok(guard.to_snapshot())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::controller;

    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn names(songs: &[SongBrief]) -> Vec<&str> {
        songs.iter().map(|s| &*s.name).collect()
    }

    /// A controller with a playlist holding three songs, plus their ids.
    fn populated(controller: &LibraryController) -> (PlaylistId, Vec<SongId>) {
        let playlist = controller.playlist_create("Classic Rock Hits").id;
        let songs = [
            ("Bohemian Rhapsody", "Queen", "Rock"),
            ("Stairway to Heaven", "Led Zeppelin", "Rock"),
            ("Yesterday", "The Beatles", "Pop"),
        ]
        .into_iter()
        .map(|(name, artist, genre)| controller.song_create(name, artist, genre).id)
        .collect::<Vec<_>>();
        for song in &songs {
            controller.playlist_add_song(playlist, *song).unwrap();
        }
        (playlist, songs)
    }

    #[rstest]
    fn test_song_crud(controller: LibraryController) {
        let created = controller.song_create("Yesterday", "The Beatles", "Rock");
        assert_eq!(controller.song_get(created.id), Ok(created.clone()));
        assert_eq!(controller.song_list(), vec![created.clone()]);

        let updated = controller
            .song_update(
                created.id,
                SongChangeSet {
                    genre: Some("Pop".into()),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(&*updated.name, "Yesterday");
        assert_eq!(&*updated.genre, "Pop");

        assert_eq!(controller.song_delete(created.id), Ok(()));
        assert_eq!(
            controller.song_get(created.id),
            Err(ServiceError::SongNotFound(created.id))
        );
        assert!(controller.song_list().is_empty());
    }

    #[rstest]
    fn test_unknown_song(controller: LibraryController) {
        let id = SongId::generate();
        let expected = Err(ServiceError::SongNotFound(id));
        assert_eq!(controller.song_get(id), expected);
        assert_eq!(
            controller.song_update(id, SongChangeSet::default()),
            expected
        );
        assert_eq!(controller.song_delete(id), Err(ServiceError::SongNotFound(id)));
    }

    #[rstest]
    fn test_unknown_playlist(controller: LibraryController) {
        let id = PlaylistId::generate();
        let song = controller.song_create("a", "b", "c").id;
        let expected = Err(ServiceError::PlaylistNotFound(id));

        assert_eq!(controller.playlist_get(id), expected);
        assert_eq!(controller.playlist_add_song(id, song), expected);
        assert_eq!(controller.playlist_remove_song(id, song), expected);
        assert_eq!(controller.playlist_sort(id, "name"), expected);
        assert_eq!(controller.playlist_play_song(id, song), expected);
        assert_eq!(
            controller.playlist_delete(id),
            Err(ServiceError::PlaylistNotFound(id))
        );
    }

    #[rstest]
    fn test_playlist_lifecycle(controller: LibraryController) {
        let created = controller.playlist_create("Empty");
        assert_eq!(&*created.name, "Empty");
        assert!(created.songs.is_empty());
        assert!(created.recently_played.is_empty());
        assert_eq!(controller.playlist_get(created.id), Ok(created.clone()));

        let briefs = controller.playlist_list();
        assert_eq!(briefs.len(), 1);
        assert_eq!(briefs[0].id, created.id);
        assert_eq!(briefs[0].songs, 0);

        assert_eq!(controller.playlist_delete(created.id), Ok(()));
        assert!(controller.playlist_list().is_empty());
    }

    #[rstest]
    fn test_add_song(controller: LibraryController) {
        let (playlist, songs) = populated(&controller);
        let snapshot = controller.playlist_get(playlist).unwrap();
        assert_eq!(
            names(&snapshot.songs),
            vec!["Bohemian Rhapsody", "Stairway to Heaven", "Yesterday"]
        );
        assert_eq!(controller.playlist_list()[0].songs, 3);

        // adding it again is rejected and changes nothing
        assert_eq!(
            controller.playlist_add_song(playlist, songs[0]),
            Err(ServiceError::SongAlreadyInPlaylist {
                playlist,
                song: songs[0]
            })
        );
        assert_eq!(controller.playlist_get(playlist), Ok(snapshot));
    }

    #[rstest]
    fn test_add_unknown_song(controller: LibraryController) {
        let playlist = controller.playlist_create("p").id;
        let song = SongId::generate();
        assert_eq!(
            controller.playlist_add_song(playlist, song),
            Err(ServiceError::SongNotFound(song))
        );
    }

    #[rstest]
    fn test_remove_song(controller: LibraryController) {
        let (playlist, songs) = populated(&controller);

        let snapshot = controller.playlist_remove_song(playlist, songs[0]).unwrap();
        assert_eq!(
            names(&snapshot.songs),
            vec!["Stairway to Heaven", "Yesterday"]
        );

        let err = controller
            .playlist_remove_song(playlist, songs[0])
            .unwrap_err();
        assert_eq!(err.status(), 404);
        assert_eq!(
            err,
            ServiceError::SongNotInPlaylist {
                playlist,
                song: songs[0]
            }
        );
    }

    #[rstest]
    #[case::name("name", vec!["Bohemian Rhapsody", "Stairway to Heaven", "Yesterday"])]
    #[case::artist("artist", vec!["Stairway to Heaven", "Bohemian Rhapsody", "Yesterday"])]
    #[case::genre("genre", vec!["Yesterday"])]
    fn test_sort(
        controller: LibraryController,
        #[case] key: &str,
        #[case] expected_prefix: Vec<&str>,
    ) {
        let (playlist, _) = populated(&controller);
        let snapshot = controller.playlist_sort(playlist, key).unwrap();
        let sorted = names(&snapshot.songs);
        assert_eq!(sorted.len(), 3);
        assert_eq!(&sorted[..expected_prefix.len()], expected_prefix.as_slice());
    }

    #[rstest]
    #[case("title")]
    #[case("Name")]
    #[case("")]
    fn test_sort_invalid_key(controller: LibraryController, #[case] key: &str) {
        let (playlist, _) = populated(&controller);
        let before = controller.playlist_get(playlist).unwrap();

        let err = controller.playlist_sort(playlist, key).unwrap_err();
        assert_eq!(err, ServiceError::InvalidSortKey(key.to_string()));
        assert_eq!(err.status(), 400);
        assert_eq!(controller.playlist_get(playlist), Ok(before));
    }

    #[rstest]
    fn test_play_song(controller: LibraryController) {
        let (playlist, songs) = populated(&controller);

        controller.playlist_play_song(playlist, songs[2]).unwrap();
        let snapshot = controller.playlist_play_song(playlist, songs[0]).unwrap();
        assert_eq!(
            names(&snapshot.recently_played),
            vec!["Yesterday", "Bohemian Rhapsody"]
        );

        // not in the playlist: nothing happens
        let stranger = controller.song_create("Stranger", "Nobody", "None").id;
        let snapshot = controller.playlist_play_song(playlist, stranger).unwrap();
        assert_eq!(snapshot.recently_played.len(), 2);
        let snapshot = controller
            .playlist_play_song(playlist, SongId::generate())
            .unwrap();
        assert_eq!(snapshot.recently_played.len(), 2);
    }

    #[rstest]
    fn test_song_update_shows_in_playlist(controller: LibraryController) {
        let (playlist, songs) = populated(&controller);
        controller.playlist_play_song(playlist, songs[1]).unwrap();

        controller
            .song_update(
                songs[1],
                SongChangeSet {
                    name: Some("Stairway".into()),
                    ..Default::default()
                },
            )
            .unwrap();

        let snapshot = controller.playlist_get(playlist).unwrap();
        assert_eq!(&*snapshot.songs[1].name, "Stairway");
        assert_eq!(&*snapshot.recently_played[0].name, "Stairway");
    }

    #[rstest]
    fn test_song_delete_leaves_history(controller: LibraryController) {
        let (playlist, songs) = populated(&controller);
        controller.playlist_play_song(playlist, songs[0]).unwrap();

        controller.song_delete(songs[0]).unwrap();

        let snapshot = controller.playlist_get(playlist).unwrap();
        assert_eq!(
            names(&snapshot.songs),
            vec!["Stairway to Heaven", "Yesterday"]
        );
        assert_eq!(names(&snapshot.recently_played), vec!["Bohemian Rhapsody"]);
        assert_eq!(
            controller.playlist_remove_song(playlist, songs[0]).unwrap_err().status(),
            404
        );
        assert_eq!(controller.playlist_list()[0].songs, 2);
    }

    #[rstest]
    fn test_add_song_deleted_after_lookup(controller: LibraryController) {
        let (playlist, songs) = populated(&controller);
        // the history keeps the song alive once it leaves the catalog
        controller.playlist_play_song(playlist, songs[0]).unwrap();
        controller.playlist_remove_song(playlist, songs[0]).unwrap();

        let handle = controller.playlist(playlist).unwrap();
        let song_handle = controller.song(songs[0]).unwrap();
        controller.song_delete(songs[0]).unwrap();

        assert_eq!(
            controller.add_resolved_song(playlist, &handle, songs[0], &song_handle),
            Err(ServiceError::SongNotFound(songs[0]))
        );
        let snapshot = controller.playlist_get(playlist).unwrap();
        assert_eq!(
            names(&snapshot.songs),
            vec!["Stairway to Heaven", "Yesterday"]
        );
        assert_eq!(names(&snapshot.recently_played), vec!["Bohemian Rhapsody"]);
    }

    #[rstest]
    fn test_delete_playlist_keeps_songs(controller: LibraryController) {
        let (playlist, songs) = populated(&controller);
        controller.playlist_delete(playlist).unwrap();
        assert_eq!(controller.song_list().len(), songs.len());
        assert_eq!(
            controller.playlist_get(playlist),
            Err(ServiceError::PlaylistNotFound(playlist))
        );
    }
}
