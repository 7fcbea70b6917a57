pub mod error;
pub mod note_api;

pub use error::ApiError;
pub use note_api::{DEFAULT_API_URL, NoteApi, ToggleAction};
