pub mod entry;
pub mod mood;
pub mod theme;

pub use entry::{newest_first, Entry, EntryId, NewEntry};
pub use mood::Mood;
pub use theme::Theme;
