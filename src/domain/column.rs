use super::TrackId;
use std::fmt::Display;

/// Fields a queue row exposes, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    Id,
    Title,
    Artist,
    Album,
}

impl Column {
    pub const ALL: [Column; 4] = [Column::Id, Column::Title, Column::Artist, Column::Album];

    pub fn name(&self) -> &'static str {
        match self {
            Column::Id => "id",
            Column::Title => "title",
            Column::Artist => "artist",
            Column::Album => "album",
        }
    }
}

impl Display for Column {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field<'a> {
    Id(TrackId),
    Text(&'a str),
}

impl Field<'_> {
    /// Value handed out when a row cannot be read.
    pub fn empty(column: Column) -> Field<'static> {
        match column {
            Column::Id => Field::Id(0),
            _ => Field::Text(""),
        }
    }
}

impl Display for Field<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Field::Id(id) => write!(f, "{id}"),
            Field::Text(text) => write!(f, "{text}"),
        }
    }
}
