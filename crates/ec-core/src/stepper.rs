//! Paginated walk over a generated instruction set.

use crate::scan::{ReuseInstruction, ReuseStep};

/// Cursor over the steps of a [`ReuseInstruction`].
///
/// The view index is 0-based and always within `[0, len - 1]`. `next` and
/// `prev` are no-ops at the bounds; leaving the last step is done through
/// `can_finish` + the workflow's finish intent, never by `next` overflowing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReuseStepper {
    instruction: ReuseInstruction,
    index: usize,
}

impl ReuseStepper {
    pub fn new(instruction: ReuseInstruction) -> Self {
        Self {
            instruction,
            index: 0,
        }
    }

    pub fn instruction(&self) -> &ReuseInstruction {
        &self.instruction
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.instruction.len()
    }

    pub fn current(&self) -> &ReuseStep {
        // index < len holds: instruction sets are never empty and moves are clamped
        &self.instruction.steps()[self.index]
    }

    pub fn is_first(&self) -> bool {
        self.index == 0
    }

    pub fn is_last(&self) -> bool {
        self.index + 1 >= self.len()
    }

    /// Returns whether the cursor moved.
    pub fn next(&mut self) -> bool {
        if self.is_last() {
            return false;
        }
        self.index += 1;
        true
    }

    /// Returns whether the cursor moved.
    pub fn prev(&mut self) -> bool {
        if self.is_first() {
            return false;
        }
        self.index -= 1;
        true
    }

    pub fn remaining(&self) -> usize {
        self.len() - 1 - self.index
    }

    pub fn can_finish(&self) -> bool {
        self.is_last()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scan::StepDraft;

    fn stepper(n: usize) -> ReuseStepper {
        let drafts = (0..n)
            .map(|i| StepDraft {
                instruction: format!("step {i}"),
                visual_prompt: String::new(),
            })
            .collect();
        ReuseStepper::new(
            ReuseInstruction::from_ordered_steps("Lamp", "Bottle", drafts, "q").unwrap(),
        )
    }

    #[test]
    fn prev_at_first_step_is_a_no_op() {
        let mut s = stepper(3);
        assert!(!s.prev());
        assert_eq!(s.index(), 0);
    }

    #[test]
    fn next_at_last_step_is_a_no_op() {
        let mut s = stepper(3);
        assert!(s.next());
        assert!(s.next());
        assert_eq!(s.index(), 2);
        assert!(!s.next());
        assert_eq!(s.index(), 2);
        assert!(s.can_finish());
    }

    #[test]
    fn current_step_tracks_the_cursor() {
        let mut s = stepper(2);
        assert_eq!(s.current().step, 1);
        s.next();
        assert_eq!(s.current().step, 2);
        assert_eq!(s.current().instruction, "step 1");
        s.prev();
        assert_eq!(s.current().step, 1);
    }

    #[test]
    fn single_step_instruction_can_finish_immediately() {
        let s = stepper(1);
        assert!(s.is_first());
        assert!(s.is_last());
        assert_eq!(s.remaining(), 0);
    }

    #[test]
    fn remaining_counts_steps_after_the_cursor() {
        let mut s = stepper(4);
        assert_eq!(s.remaining(), 3);
        assert!(!s.can_finish());
        s.next();
        assert_eq!(s.remaining(), 2);
    }
}
