//! OpenAI image generation adapter.

mod client;
mod dto;

pub use client::{DEFAULT_IMAGE_MODEL, OPENAI_API_BASE, OpenAiImageClient, decode_png};
