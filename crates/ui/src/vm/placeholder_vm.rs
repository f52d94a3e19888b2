use std::time::Duration;

/// Example prompts cycled through while the prompt box is empty.
pub const EXAMPLE_PROMPTS: [&str; 3] = [
    "Write a Python function that returns the most frequent element.",
    "Build me a landing page for my restaurant.",
    "Fix my code.",
];

const TYPE_DELAY: Duration = Duration::from_millis(40);
const ERASE_DELAY: Duration = Duration::from_millis(25);
const HOLD_DELAY: Duration = Duration::from_millis(1000);
const NEXT_DELAY: Duration = Duration::from_millis(250);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Direction {
    Typing,
    Erasing,
}

/// Typewriter animation over `EXAMPLE_PROMPTS`.
///
/// Types one example out, holds, erases it, then moves to the next.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlaceholderTicker {
    example: usize,
    chars: usize,
    direction: Direction,
}

impl Default for PlaceholderTicker {
    fn default() -> Self {
        Self::new()
    }
}

impl PlaceholderTicker {
    #[must_use]
    pub fn new() -> Self {
        Self {
            example: 0,
            chars: 0,
            direction: Direction::Typing,
        }
    }

    /// Text currently shown.
    #[must_use]
    pub fn text(&self) -> String {
        EXAMPLE_PROMPTS[self.example].chars().take(self.chars).collect()
    }

    /// Advance one frame and return how long to wait before the next one.
    pub fn step(&mut self) -> Duration {
        let len = EXAMPLE_PROMPTS[self.example].chars().count();
        match self.direction {
            Direction::Typing if self.chars < len => {
                self.chars += 1;
                TYPE_DELAY
            }
            Direction::Typing => {
                self.direction = Direction::Erasing;
                HOLD_DELAY
            }
            Direction::Erasing if self.chars > 0 => {
                self.chars -= 1;
                ERASE_DELAY
            }
            Direction::Erasing => {
                self.direction = Direction::Typing;
                self.example = (self.example + 1) % EXAMPLE_PROMPTS.len();
                NEXT_DELAY
            }
        }
    }

    /// Start over from an empty first example.
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn types_holds_erases_and_advances() {
        let mut ticker = PlaceholderTicker::new();
        assert_eq!(ticker.text(), "");

        let first = EXAMPLE_PROMPTS[0];
        for _ in 0..first.len() {
            assert_eq!(ticker.step(), TYPE_DELAY);
        }
        assert_eq!(ticker.text(), first);
        assert_eq!(ticker.step(), HOLD_DELAY);

        for _ in 0..first.len() {
            assert_eq!(ticker.step(), ERASE_DELAY);
        }
        assert_eq!(ticker.text(), "");
        assert_eq!(ticker.step(), NEXT_DELAY);

        ticker.step();
        assert_eq!(ticker.text(), "B");
    }

    #[test]
    fn wraps_to_first_example() {
        let mut ticker = PlaceholderTicker::new();
        for _ in 0..EXAMPLE_PROMPTS.len() {
            while ticker.step() != NEXT_DELAY {}
        }
        ticker.step();
        assert_eq!(ticker.text(), "W");
    }
}
