use std::path::Path;

use anyhow::{anyhow, Result};
use tokio::task::JoinHandle;

use crate::client::{StoryClient, StoryResponse};
use crate::config::Config;
use crate::images::AttachedImage;
use crate::reveal::Reveal;

/// Shown in place of a story when the generation request fails.
pub const GENERATION_ERROR_TEXT: &str = "An error occurred while generating the story.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Submitting,
    Revealing,
    Summarized,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Editing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputField {
    ImagePath,
    Prompt,
}

/// Result of a finished submission.
///
/// A failed request still produces a story (the fixed error text) but
/// no summary, so the summarize action stays unavailable.
#[derive(Debug, Clone)]
pub struct Generation {
    pub story: String,
    pub summary: Option<String>,
}

pub struct App {
    // Core state
    pub should_quit: bool,
    pub input_mode: InputMode,
    pub focus: InputField,

    // Input stage
    pub image: Option<AttachedImage>,
    pub image_input: String,
    pub image_cursor: usize,
    pub prompt_input: String,
    pub prompt_cursor: usize,
    pub attach_error: Option<String>,

    // Submission state
    pub generating: bool,
    pub generation_task: Option<JoinHandle<Result<StoryResponse>>>,
    pub generation: Option<Generation>,

    // Reveal state
    pub reveal: Reveal,
    pub is_summarized: bool,
    pub story_scroll: u16,
    pub story_height: u16,
    pub story_total_lines: u16,

    // Animation state
    pub animation_frame: u8,

    pub client: StoryClient,
}

impl App {
    pub fn new() -> Self {
        let config = Config::load().unwrap_or_else(|_| Config::new());

        Self {
            should_quit: false,
            input_mode: InputMode::Editing,
            focus: InputField::ImagePath,

            image: None,
            image_input: String::new(),
            image_cursor: 0,
            prompt_input: String::new(),
            prompt_cursor: 0,
            attach_error: None,

            generating: false,
            generation_task: None,
            generation: None,

            reveal: Reveal::new(),
            is_summarized: false,
            story_scroll: 0,
            story_height: 0,
            story_total_lines: 0,

            animation_frame: 0,

            client: StoryClient::new(config.endpoint()),
        }
    }

    pub fn phase(&self) -> Phase {
        if self.generating {
            Phase::Submitting
        } else if self.is_summarized {
            Phase::Summarized
        } else if self.generation.is_some() {
            Phase::Revealing
        } else {
            Phase::Idle
        }
    }

    /// The input stage is visible only while nothing has been generated
    /// and no request is in flight.
    pub fn show_input(&self) -> bool {
        self.generation.is_none() && !self.generating
    }

    pub fn can_submit(&self) -> bool {
        self.image.is_some() && !self.prompt_input.trim().is_empty()
    }

    pub fn can_summarize(&self) -> bool {
        !self.is_summarized
            && !self.generating
            && self
                .generation
                .as_ref()
                .is_some_and(|g| g.summary.is_some())
    }

    /// Load the image named by the path field, replacing any previous
    /// attachment. A failed load keeps the old attachment and reports
    /// the error inline.
    pub fn attach_image(&mut self) {
        let path = self.image_input.trim().to_string();
        if path.is_empty() {
            return;
        }
        match AttachedImage::load(Path::new(&path)) {
            Ok(image) => {
                tracing::info!(
                    path = %path,
                    width = image.width,
                    height = image.height,
                    "attached image"
                );
                self.image = Some(image);
                self.attach_error = None;
            }
            Err(e) => {
                tracing::warn!(path = %path, error = %e, "failed to attach image");
                self.attach_error = Some(e.to_string());
            }
        }
    }

    /// Enter the submitting phase, clearing any prior generation and
    /// the summary latch.
    ///
    /// Returns false without touching anything when an input is missing
    /// or a submission is already in flight.
    pub fn begin_submission(&mut self) -> bool {
        if self.generating || !self.can_submit() {
            return false;
        }
        self.generating = true;
        self.generation = None;
        self.reveal.clear();
        self.is_summarized = false;
        self.story_scroll = 0;
        self.animation_frame = 0;
        true
    }

    /// Reap the in-flight generation task once it finishes.
    pub async fn poll_generation(&mut self) {
        let Some(task) = self.generation_task.take() else {
            return;
        };
        if !task.is_finished() {
            self.generation_task = Some(task);
            return;
        }
        let result = match task.await {
            Ok(result) => result,
            Err(e) => Err(anyhow!("generation task failed: {e}")),
        };
        self.finish_generation(result);
    }

    /// Map the completed request into display state and leave the
    /// submitting phase. Failures collapse into the fixed error text;
    /// the cause goes to the diagnostic log only.
    pub fn finish_generation(&mut self, result: Result<StoryResponse>) {
        let generation = match result {
            Ok(response) => {
                tracing::info!("story generated");
                Generation {
                    story: response.story,
                    summary: Some(response.summary),
                }
            }
            Err(e) => {
                tracing::error!(error = %e, "story generation failed");
                Generation {
                    story: GENERATION_ERROR_TEXT.to_string(),
                    summary: None,
                }
            }
        };
        self.reveal.set_source(&generation.story);
        self.generation = Some(generation);
        self.generating = false;
    }

    /// Switch the displayed text to the summary and restart the reveal.
    /// One-way; no-op when no summary exists or it was already invoked.
    pub fn summarize(&mut self) {
        if self.is_summarized {
            return;
        }
        let Some(summary) = self.generation.as_ref().and_then(|g| g.summary.clone()) else {
            return;
        };
        self.is_summarized = true;
        self.story_scroll = 0;
        self.reveal.set_source(&summary);
    }

    /// Discard the current generation and return to the input stage.
    /// The image and prompt are kept; they only change by re-selection.
    pub fn reset(&mut self) {
        if self.generating {
            return;
        }
        self.generation = None;
        self.reveal.clear();
        self.is_summarized = false;
        self.story_scroll = 0;
    }

    pub fn tick(&mut self) {
        if self.generating {
            self.animation_frame = (self.animation_frame + 1) % 3;
            return;
        }
        if !self.reveal.is_done() {
            self.reveal.advance();
        }
    }

    // Story scrolling
    pub fn scroll_down(&mut self) {
        if self.story_scroll < self.story_total_lines.saturating_sub(self.story_height) {
            self.story_scroll = self.story_scroll.saturating_add(1);
        }
    }

    pub fn scroll_up(&mut self) {
        self.story_scroll = self.story_scroll.saturating_sub(1);
    }

    pub fn scroll_to_top(&mut self) {
        self.story_scroll = 0;
    }

    pub fn scroll_to_bottom(&mut self) {
        self.story_scroll = self.story_total_lines.saturating_sub(self.story_height);
    }
}
