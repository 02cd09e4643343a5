mod column;
mod track_row;

pub use column::{Column, Field};
pub use track_row::{TrackId, TrackRow};

pub trait TrackInfo {
    fn get_id(&self) -> TrackId;
    fn get_title(&self) -> &str;
    fn get_artist(&self) -> &str;
    fn get_album(&self) -> &str;
}
