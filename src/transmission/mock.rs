use std::collections::VecDeque;

use super::RandomSource;

/// Replays a fixed list of draws, then keeps returning `fallback`.
#[derive(Debug, Clone)]
pub struct ScriptedSource {
    script: VecDeque<f64>,
    fallback: f64,
    consumed: usize,
}

impl ScriptedSource {
    // High enough to clear every default fault threshold.
    pub const CLEAN_DRAW: f64 = 0.99;

    pub fn new<I: IntoIterator<Item = f64>>(draws: I) -> Self {
        Self {
            script: draws.into_iter().collect(),
            fallback: Self::CLEAN_DRAW,
            consumed: 0,
        }
    }

    pub fn with_fallback(mut self, fallback: f64) -> Self {
        self.fallback = fallback;
        self
    }

    pub fn consumed(&self) -> usize {
        self.consumed
    }

    pub fn remaining(&self) -> usize {
        self.script.len()
    }
}

impl RandomSource for ScriptedSource {
    fn draw(&mut self) -> f64 {
        self.consumed += 1;
        self.script.pop_front().unwrap_or(self.fallback)
    }
}

#[test]
fn test_scripted_source_replays_then_falls_back() {
    let mut source = ScriptedSource::new([0.1, 0.2]).with_fallback(0.5);
    assert_eq!(source.draw(), 0.1);
    assert_eq!(source.remaining(), 1);
    assert_eq!(source.draw(), 0.2);
    assert_eq!(source.draw(), 0.5);
    assert_eq!(source.draw(), 0.5);
    assert_eq!(source.consumed(), 4);
}
