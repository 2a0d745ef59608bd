use std::path::Path;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::app::{App, InputField, InputMode};
use crate::tui::AppEvent;

/// Convert a character index to a byte index for UTF-8 safe string operations
fn char_to_byte_index(s: &str, char_idx: usize) -> usize {
    s.char_indices()
        .nth(char_idx)
        .map(|(i, _)| i)
        .unwrap_or(s.len())
}

pub fn handle_event(app: &mut App, event: AppEvent) {
    match event {
        AppEvent::Key(key) => handle_key(app, key),
        AppEvent::Resize(_, _) => {}
        AppEvent::Tick => app.tick(),
    }
}

fn handle_key(app: &mut App, key: KeyEvent) {
    // Global quit, works in any mode
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.should_quit = true;
        return;
    }

    if app.show_input() {
        match app.input_mode {
            InputMode::Normal => handle_input_normal(app, key),
            InputMode::Editing => handle_input_editing(app, key),
        }
    } else {
        handle_story_keys(app, key);
    }
}

fn handle_input_normal(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') => app.should_quit = true,

        KeyCode::Char('i') | KeyCode::Char('/') => {
            app.input_mode = InputMode::Editing;
            focus_cursor_to_end(app);
        }

        KeyCode::Tab => {
            switch_field(app);
        }

        KeyCode::Enter => submit(app),

        _ => {}
    }
}

fn handle_input_editing(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => {
            app.input_mode = InputMode::Normal;
        }

        KeyCode::Tab => {
            switch_field(app);
            focus_cursor_to_end(app);
        }

        KeyCode::Enter => match app.focus {
            // Attach the typed path, then move on to the prompt
            InputField::ImagePath => {
                app.attach_image();
                if app.image.is_some() && app.attach_error.is_none() {
                    app.focus = InputField::Prompt;
                    focus_cursor_to_end(app);
                }
            }
            InputField::Prompt => submit(app),
        },

        _ => match app.focus {
            InputField::ImagePath => {
                edit_field(&mut app.image_input, &mut app.image_cursor, key);
            }
            InputField::Prompt => {
                edit_field(&mut app.prompt_input, &mut app.prompt_cursor, key);
            }
        },
    }
}

fn handle_story_keys(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') => app.should_quit = true,

        KeyCode::Char('s') => app.summarize(),

        KeyCode::Char('n') => app.reset(),

        KeyCode::Char('j') | KeyCode::Down => app.scroll_down(),
        KeyCode::Char('k') | KeyCode::Up => app.scroll_up(),
        KeyCode::Char('g') => app.scroll_to_top(),
        KeyCode::Char('G') => app.scroll_to_bottom(),

        _ => {}
    }
}

/// Kick off a submission: make sure the typed path is attached, then
/// enter the submitting phase and spawn the single outbound request.
fn submit(app: &mut App) {
    let path = app.image_input.trim();
    let stale = app
        .image
        .as_ref()
        .map(|i| i.path != Path::new(path))
        .unwrap_or(true);
    if !path.is_empty() && stale {
        app.attach_image();
    }

    let Some(image) = app.image.clone() else {
        return;
    };
    if !app.begin_submission() {
        return;
    }

    app.input_mode = InputMode::Normal;
    let client = app.client.clone();
    let prompt = app.prompt_input.clone();
    app.generation_task = Some(tokio::spawn(async move {
        client.generate(&image, &prompt).await
    }));
}

fn switch_field(app: &mut App) {
    app.focus = match app.focus {
        InputField::ImagePath => InputField::Prompt,
        InputField::Prompt => InputField::ImagePath,
    };
}

fn focus_cursor_to_end(app: &mut App) {
    match app.focus {
        InputField::ImagePath => app.image_cursor = app.image_input.chars().count(),
        InputField::Prompt => app.prompt_cursor = app.prompt_input.chars().count(),
    }
}

fn edit_field(input: &mut String, cursor: &mut usize, key: KeyEvent) {
    match key.code {
        KeyCode::Backspace => {
            if *cursor > 0 {
                *cursor -= 1;
                let byte_pos = char_to_byte_index(input, *cursor);
                input.remove(byte_pos);
            }
        }
        KeyCode::Delete => {
            let char_count = input.chars().count();
            if *cursor < char_count {
                let byte_pos = char_to_byte_index(input, *cursor);
                input.remove(byte_pos);
            }
        }
        KeyCode::Left => {
            *cursor = cursor.saturating_sub(1);
        }
        KeyCode::Right => {
            let char_count = input.chars().count();
            *cursor = (*cursor + 1).min(char_count);
        }
        KeyCode::Home => {
            *cursor = 0;
        }
        KeyCode::End => {
            *cursor = input.chars().count();
        }
        KeyCode::Char(c) => {
            let byte_pos = char_to_byte_index(input, *cursor);
            input.insert(byte_pos, c);
            *cursor += 1;
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn editing_inserts_at_the_cursor() {
        let mut input = String::from("cat");
        let mut cursor = 3;

        edit_field(&mut input, &mut cursor, key(KeyCode::Char('s')));
        assert_eq!(input, "cats");
        assert_eq!(cursor, 4);

        edit_field(&mut input, &mut cursor, key(KeyCode::Home));
        edit_field(&mut input, &mut cursor, key(KeyCode::Char('a')));
        assert_eq!(input, "acats");
        assert_eq!(cursor, 1);
    }

    #[test]
    fn editing_is_utf8_safe() {
        let mut input = String::from("héllo");
        let mut cursor = 2;

        edit_field(&mut input, &mut cursor, key(KeyCode::Backspace));
        assert_eq!(input, "hllo");
        assert_eq!(cursor, 1);

        edit_field(&mut input, &mut cursor, key(KeyCode::Char('é')));
        assert_eq!(input, "héllo");
        assert_eq!(cursor, 2);
    }

    #[test]
    fn cursor_movement_is_clamped() {
        let mut input = String::from("ab");
        let mut cursor = 0;

        edit_field(&mut input, &mut cursor, key(KeyCode::Left));
        assert_eq!(cursor, 0);

        edit_field(&mut input, &mut cursor, key(KeyCode::End));
        edit_field(&mut input, &mut cursor, key(KeyCode::Right));
        assert_eq!(cursor, 2);

        edit_field(&mut input, &mut cursor, key(KeyCode::Delete));
        assert_eq!(input, "ab");
    }

    #[test]
    fn submit_without_an_image_is_a_noop() {
        let mut app = App::new();
        app.prompt_input = "a cat in space".to_string();

        submit(&mut app);
        assert!(app.generation_task.is_none());
        assert!(!app.generating);
    }
}
