/// Number of discrete steps in one generation run.
pub const PIPELINE_STEPS: u8 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum GenerationStep {
    /// About to request the outline.
    Outline = 1,
    /// About to request the chapter bodies.
    Bodies = 2,
    /// All bodies assembled.
    Done = 3,
}

impl GenerationStep {
    pub fn index(self) -> u8 {
        self as u8
    }
}

/// Step counter for the active run. `current` never exceeds `total`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Progress {
    current: u8,
    total: u8,
}

impl Progress {
    pub fn idle() -> Self {
        Self::default()
    }

    pub fn current(&self) -> u8 {
        self.current
    }

    pub fn total(&self) -> u8 {
        self.total
    }

    pub fn is_idle(&self) -> bool {
        self.total == 0
    }

    /// Moves to `step` unless progress is already at or beyond it.
    /// Returns whether the counter changed.
    pub fn advance(&mut self, step: GenerationStep) -> bool {
        let next = step.index().min(PIPELINE_STEPS);
        if next <= self.current && self.total == PIPELINE_STEPS {
            return false;
        }
        self.total = PIPELINE_STEPS;
        self.current = next.max(self.current);
        true
    }

    pub fn reset(&mut self) {
        *self = Self::idle();
    }
}
