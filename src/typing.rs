use crate::{config::TypingConfig, error::FxError, error::Result};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TypingPhase {
    Typing,
    PausingFull,
    Deleting,
    PausingEmpty,
}

/// What to display after a step, and how long to wait before the next one.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypingFrame {
    pub text: String,
    pub delay_ms: u32,
}

/// Cycles through the role strings one character at a time.
#[derive(Clone, Debug)]
pub struct TypingMachine {
    roles: Vec<Vec<char>>,
    role_index: usize,
    char_index: usize,
    phase: TypingPhase,
    timing: TypingConfig,
}

impl TypingMachine {
    pub fn new(config: &TypingConfig) -> Result<Self> {
        if config.roles.is_empty() {
            return Err(FxError::Empty);
        }

        Ok(Self {
            roles: config.roles.iter().map(|role| role.chars().collect()).collect(),
            role_index: 0,
            char_index: 0,
            phase: TypingPhase::Typing,
            timing: config.clone(),
        })
    }

    pub fn phase(&self) -> TypingPhase {
        self.phase
    }

    pub fn role_index(&self) -> usize {
        self.role_index
    }

    pub fn visible_text(&self) -> String {
        self.current_role().iter().take(self.char_index).collect()
    }

    /// Delay before the first step; the element starts out empty.
    pub fn initial_delay_ms(&self) -> u32 {
        self.timing.type_ms
    }

    pub fn step(&mut self) -> TypingFrame {
        let delay_ms = match self.phase {
            TypingPhase::Typing => self.type_one(),
            TypingPhase::PausingFull => {
                self.phase = TypingPhase::Deleting;
                self.delete_one()
            }
            TypingPhase::Deleting => self.delete_one(),
            TypingPhase::PausingEmpty => {
                self.phase = TypingPhase::Typing;
                self.type_one()
            }
        };

        TypingFrame {
            text: self.visible_text(),
            delay_ms,
        }
    }

    fn current_role(&self) -> &[char] {
        &self.roles[self.role_index]
    }

    fn type_one(&mut self) -> u32 {
        let len = self.current_role().len();
        if self.char_index < len {
            self.char_index += 1;
        }

        if self.char_index >= len {
            self.phase = TypingPhase::PausingFull;
            self.timing.hold_full_ms
        } else {
            self.timing.type_ms
        }
    }

    fn delete_one(&mut self) -> u32 {
        self.char_index = self.char_index.saturating_sub(1);

        if self.char_index == 0 {
            self.role_index = (self.role_index + 1) % self.roles.len();
            self.phase = TypingPhase::PausingEmpty;
            self.timing.hold_empty_ms
        } else {
            self.timing.delete_ms
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(roles: &[&str]) -> TypingConfig {
        TypingConfig {
            roles: roles.iter().map(|role| (*role).to_string()).collect(),
            ..TypingConfig::default()
        }
    }

    #[test]
    fn refuses_an_empty_role_list() {
        assert!(matches!(
            TypingMachine::new(&config(&[])),
            Err(FxError::Empty)
        ));
    }

    #[test]
    fn full_cycle_types_deletes_and_advances_once() {
        let mut machine = TypingMachine::new(&config(&["Rust", "Wasm"])).expect("roles present");
        assert_eq!(machine.visible_text(), "");

        let typed = (0..4).map(|_| machine.step()).last().expect("stepped");
        assert_eq!(typed.text, "Rust");
        assert_eq!(typed.delay_ms, 2_800);
        assert_eq!(machine.phase(), TypingPhase::PausingFull);

        let deleted = (0..4).map(|_| machine.step()).last().expect("stepped");
        assert_eq!(deleted.text, "");
        assert_eq!(deleted.delay_ms, 400);
        assert_eq!(machine.role_index(), 1);
        assert_eq!(machine.phase(), TypingPhase::PausingEmpty);

        let resumed = machine.step();
        assert_eq!(resumed.text, "W");
        assert_eq!(machine.phase(), TypingPhase::Typing);
    }

    #[test]
    fn step_delays_follow_phase() {
        let mut machine = TypingMachine::new(&config(&["abc"])).expect("roles present");

        assert_eq!(machine.initial_delay_ms(), 55);
        assert_eq!(machine.step().delay_ms, 55);
        assert_eq!(machine.step().delay_ms, 55);
        assert_eq!(machine.step().delay_ms, 2_800);

        let first_delete = machine.step();
        assert_eq!(first_delete.text, "ab");
        assert_eq!(first_delete.delay_ms, 30);
    }

    #[test]
    fn single_role_wraps_to_itself() {
        let mut machine = TypingMachine::new(&config(&["ok"])).expect("roles present");

        for _ in 0..4 {
            machine.step();
        }
        assert_eq!(machine.role_index(), 0);
        assert_eq!(machine.step().text, "o");
    }

    #[test]
    fn reveals_multibyte_roles_per_character() {
        let mut machine = TypingMachine::new(&config(&["héllo ✓"])).expect("roles present");

        assert_eq!(machine.step().text, "h");
        assert_eq!(machine.step().text, "hé");
        for _ in 0..5 {
            machine.step();
        }
        assert_eq!(machine.visible_text(), "héllo ✓");
        assert_eq!(machine.phase(), TypingPhase::PausingFull);
    }

    #[test]
    fn never_types_and_deletes_in_the_same_step() {
        let mut machine = TypingMachine::new(&config(&["ab", "c"])).expect("roles present");
        let mut previous = machine.visible_text().chars().count();

        for _ in 0..40 {
            let frame = machine.step();
            let now = frame.text.chars().count();
            assert!(now.abs_diff(previous) <= 1 || now == 0);
            previous = now;
        }
    }

    #[test]
    fn empty_role_goes_straight_to_hold() {
        let mut machine = TypingMachine::new(&config(&["", "x"])).expect("roles present");

        let frame = machine.step();
        assert_eq!(frame.text, "");
        assert_eq!(frame.delay_ms, 2_800);

        let frame = machine.step();
        assert_eq!(frame.delay_ms, 400);
        assert_eq!(machine.role_index(), 1);
    }
}
