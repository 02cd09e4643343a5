use super::{Column, Field, TrackInfo};

/// Key of a track row in the library.
///
/// Unique within the library, but may appear at several queue positions.
pub type TrackId = i64;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrackRow {
    pub(crate) id: TrackId,
    pub(crate) title: String,
    pub(crate) artist: String,
    pub(crate) album: String,
}

impl TrackRow {
    pub fn new(
        id: TrackId,
        title: impl Into<String>,
        artist: impl Into<String>,
        album: impl Into<String>,
    ) -> Self {
        TrackRow {
            id,
            title: title.into(),
            artist: artist.into(),
            album: album.into(),
        }
    }

    pub fn field(&self, column: Column) -> Field<'_> {
        match column {
            Column::Id => Field::Id(self.id),
            Column::Title => Field::Text(&self.title),
            Column::Artist => Field::Text(&self.artist),
            Column::Album => Field::Text(&self.album),
        }
    }
}

impl TrackInfo for TrackRow {
    fn get_id(&self) -> TrackId {
        self.id
    }

    fn get_title(&self) -> &str {
        &self.title
    }

    fn get_artist(&self) -> &str {
        &self.artist
    }

    fn get_album(&self) -> &str {
        &self.album
    }
}
