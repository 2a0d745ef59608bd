use rand::Rng;

/// Progressively discloses a source text in word chunks.
///
/// The source is split on whitespace; each tick reveals the next 2 or 3
/// words (coin flip per tick), joined to the already-revealed text by a
/// single space. Once the cursor reaches the end of the word list,
/// further ticks do nothing. Replacing the source restarts the reveal
/// from scratch.
#[derive(Debug, Default)]
pub struct Reveal {
    words: Vec<String>,
    cursor: usize,
    revealed: String,
}

impl Reveal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the source text and restart from the beginning.
    pub fn set_source(&mut self, text: &str) {
        self.words = text.split_whitespace().map(str::to_string).collect();
        self.cursor = 0;
        self.revealed.clear();
    }

    pub fn clear(&mut self) {
        self.words.clear();
        self.cursor = 0;
        self.revealed.clear();
    }

    pub fn revealed(&self) -> &str {
        &self.revealed
    }

    pub fn is_done(&self) -> bool {
        self.cursor >= self.words.len()
    }

    /// Reveal the next chunk of 2 or 3 words.
    pub fn advance(&mut self) {
        let chunk_size = if rand::rng().random_bool(0.5) { 2 } else { 3 };
        self.advance_by(chunk_size);
    }

    fn advance_by(&mut self, chunk_size: usize) {
        if self.is_done() {
            return;
        }
        let end = (self.cursor + chunk_size).min(self.words.len());
        let chunk = self.words[self.cursor..end].join(" ");
        if !self.revealed.is_empty() {
            self.revealed.push(' ');
        }
        self.revealed.push_str(&chunk);
        self.cursor = end;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn word_count(s: &str) -> usize {
        s.split_whitespace().count()
    }

    #[test]
    fn full_reveal_matches_source() {
        let mut reveal = Reveal::new();
        reveal.set_source("A cat floats through the stars slowly");

        let mut ticks = 0;
        while !reveal.is_done() {
            reveal.advance();
            ticks += 1;
            assert!(ticks <= 100, "reveal did not terminate");
        }

        assert_eq!(reveal.revealed(), "A cat floats through the stars slowly");
    }

    #[test]
    fn extra_whitespace_collapses_to_single_spaces() {
        let mut reveal = Reveal::new();
        reveal.set_source("  one   two\nthree\tfour ");

        while !reveal.is_done() {
            reveal.advance();
        }

        assert_eq!(reveal.revealed(), "one two three four");
    }

    #[test]
    fn each_tick_appends_two_or_three_words() {
        let mut reveal = Reveal::new();
        reveal.set_source("a b c d e f g h i j k l m");

        let mut previous = 0;
        while !reveal.is_done() {
            reveal.advance();
            let current = word_count(reveal.revealed());
            let appended = current - previous;
            if reveal.is_done() {
                // Final chunk may be clamped at the end of the text
                assert!((1..=3).contains(&appended));
            } else {
                assert!((2..=3).contains(&appended));
            }
            previous = current;
        }
    }

    #[test]
    fn tick_count_stays_within_chunking_bounds() {
        let text = "a b c d e f g h i j k";
        let n = word_count(text);
        let min_ticks = n.div_ceil(3);
        let max_ticks = n.div_ceil(2);

        for _ in 0..50 {
            let mut reveal = Reveal::new();
            reveal.set_source(text);
            let mut ticks = 0;
            while !reveal.is_done() {
                reveal.advance();
                ticks += 1;
            }
            assert!(
                (min_ticks..=max_ticks).contains(&ticks),
                "{ticks} ticks for {n} words"
            );
        }
    }

    #[test]
    fn deterministic_chunks_advance_the_cursor() {
        let mut reveal = Reveal::new();
        reveal.set_source("one two three four five");

        reveal.advance_by(2);
        assert_eq!(reveal.revealed(), "one two");
        reveal.advance_by(3);
        assert_eq!(reveal.revealed(), "one two three four five");
        assert!(reveal.is_done());

        // Ticks after completion are ignored
        reveal.advance_by(2);
        assert_eq!(reveal.revealed(), "one two three four five");
    }

    #[test]
    fn empty_source_is_done_immediately() {
        let mut reveal = Reveal::new();
        assert!(reveal.is_done());

        reveal.set_source("   ");
        assert!(reveal.is_done());
        reveal.advance();
        assert_eq!(reveal.revealed(), "");
    }

    #[test]
    fn replacing_the_source_restarts_the_reveal() {
        let mut reveal = Reveal::new();
        reveal.set_source("one two three four five six");
        reveal.advance();
        assert!(!reveal.revealed().is_empty());

        reveal.set_source("seven eight nine");
        assert_eq!(reveal.revealed(), "");
        assert!(!reveal.is_done());

        while !reveal.is_done() {
            reveal.advance();
        }
        assert_eq!(reveal.revealed(), "seven eight nine");
    }
}
