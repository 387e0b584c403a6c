use serde::{Deserialize, Serialize};

/// Screens of the builder flow.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Step {
    #[default]
    Style,
    Build,
    Preview,
    Themes,
    AiAssistant,
    Login,
}

/// Deepest history kept; older entries above the home step are dropped.
const MAX_HISTORY: usize = 32;

/// Explicit back-stack of visited steps. Never empty; the bottom entry is
/// always the home step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationHistory {
    stack: Vec<Step>,
}

impl Default for NavigationHistory {
    fn default() -> Self {
        Self {
            stack: vec![Step::default()],
        }
    }
}

impl NavigationHistory {
    pub fn current(&self) -> Step {
        self.stack.last().copied().unwrap_or_default()
    }

    pub fn steps(&self) -> &[Step] {
        &self.stack
    }

    /// Pushes `step` unless it is already the current step.
    pub fn navigate_to(&mut self, step: Step) {
        if step == self.current() {
            return;
        }
        self.stack.push(step);
        if self.stack.len() > MAX_HISTORY {
            self.stack.remove(1);
        }
    }

    /// Pops the current step. Returns `false` when already at the first step.
    pub fn go_back(&mut self) -> bool {
        if self.stack.len() <= 1 {
            return false;
        }
        self.stack.pop();
        true
    }

    pub fn go_home(&mut self) {
        self.stack.clear();
        self.stack.push(Step::default());
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UiLanguage {
    #[default]
    En,
    Bn,
}
