use anyhow::{anyhow, Result};
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde::Deserialize;

use crate::images::AttachedImage;

/// A generated story plus its precomputed summary.
#[derive(Debug, Clone, Deserialize)]
pub struct StoryResponse {
    pub story: String,
    pub summary: String,
}

/// Client for the story generation service.
#[derive(Debug, Clone)]
pub struct StoryClient {
    client: Client,
    base_url: String,
}

impl StoryClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn generate_url(&self) -> String {
        format!("{}/generate-story", self.base_url)
    }

    /// Submit the image and prompt as a multipart form, returning the
    /// generated story and summary.
    pub async fn generate(&self, image: &AttachedImage, prompt: &str) -> Result<StoryResponse> {
        let part = Part::bytes(image.bytes.clone())
            .file_name(image.file_name.clone())
            .mime_str(image.mime)?;
        let form = Form::new()
            .part("image", part)
            .text("prompt", prompt.to_string());

        let response = self
            .client
            .post(self.generate_url())
            .multipart(form)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(anyhow!(
                "story request failed with status: {}",
                response.status()
            ));
        }

        Ok(response.json::<StoryResponse>().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generate_url_joins_the_endpoint() {
        let client = StoryClient::new("http://localhost:5000");
        assert_eq!(client.generate_url(), "http://localhost:5000/generate-story");

        let client = StoryClient::new("http://localhost:5000/");
        assert_eq!(client.generate_url(), "http://localhost:5000/generate-story");
    }

    #[test]
    fn response_parses_story_and_summary() {
        let body = r#"{"story": "A cat floats through the stars slowly",
                       "summary": "A cat floats in space"}"#;
        let parsed: StoryResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.story, "A cat floats through the stars slowly");
        assert_eq!(parsed.summary, "A cat floats in space");
    }

    #[test]
    fn response_rejects_other_shapes() {
        assert!(serde_json::from_str::<StoryResponse>(r#"{"story": "x"}"#).is_err());
        assert!(serde_json::from_str::<StoryResponse>(r#"{"text": "x"}"#).is_err());
        assert!(serde_json::from_str::<StoryResponse>("not json").is_err());
    }
}
