//! Catbox upload adapter.

mod client;

pub use client::{
    CATBOX_API_URL, CatboxUploader, file_name_from_url, interpret_album_response,
    interpret_upload_response,
};
