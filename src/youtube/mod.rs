//! Thin clients for the video platform and transcript services

mod client;
mod transcript;

pub use client::YouTubeClient;
pub use transcript::TranscriptClient;
pub use transcript::TranscriptOutcome;
