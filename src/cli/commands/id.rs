//! Id command implementation.

use crate::cli::Output;
use crate::youtube::parse_video_id;
use anyhow::Result;

/// Print the video ID of a YouTube URL.
pub fn run_id(url: &str) -> Result<()> {
    match parse_video_id(url) {
        Some(id) => {
            println!("{}", id);
            Ok(())
        }
        None => {
            Output::error(&format!("No YouTube video ID found in '{}'", url));
            anyhow::bail!("Invalid YouTube URL: {}", url)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_id() {
        assert!(run_id("https://youtu.be/dQw4w9WgXcQ").is_ok());
        assert!(run_id("https://example.com/watch?v=dQw4w9WgXcQ").is_err());
    }
}
