use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::Serialize;

use crate::chat::phases::ChatPhase;
use crate::chat::prompts::responses_for;
use crate::errors::AppError;

/// Session-level progress of the scripted discovery chat.
pub struct ChatWizard {
    phase: ChatPhase,
    discovered_items: Vec<String>,
    is_typing: bool,
    epoch: u64,
    rng: StdRng,
}

/// An exchange in flight: the phase it started in and the session it
/// belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Turn {
    pub phase: ChatPhase,
    epoch: u64,
}

/// Read-only view of the wizard for API responses.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WizardStatus {
    pub phase: ChatPhase,
    pub progress: f64,
    pub phase_message: Option<&'static str>,
    pub discovered_items: Vec<String>,
    pub is_typing: bool,
}

impl ChatWizard {
    /// A fixed seed makes the reply sequence reproducible.
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            phase: ChatPhase::Intro,
            discovered_items: Vec::new(),
            is_typing: false,
            epoch: 0,
            rng,
        }
    }

    pub fn phase(&self) -> ChatPhase {
        self.phase
    }

    #[cfg(test)]
    pub fn is_typing(&self) -> bool {
        self.is_typing
    }

    pub fn status(&self) -> WizardStatus {
        WizardStatus {
            phase: self.phase,
            progress: self.phase.progress(),
            phase_message: self.phase.message(),
            discovered_items: self.discovered_items.clone(),
            is_typing: self.is_typing,
        }
    }

    /// Starts an exchange: marks the agent as typing and records a discovered
    /// insight.
    pub fn begin_turn(&mut self) -> Result<Turn, AppError> {
        if self.is_typing {
            return Err(AppError::Conflict(
                "The assistant is still responding to the previous message".to_string(),
            ));
        }
        self.is_typing = true;
        let n = self.discovered_items.len() + 1;
        self.discovered_items.push(format!("Insight {n}"));
        Ok(Turn {
            phase: self.phase,
            epoch: self.epoch,
        })
    }

    pub fn compose_reply(&mut self, phase: ChatPhase) -> &'static str {
        responses_for(phase)
            .choose(&mut self.rng)
            .copied()
            .unwrap_or_default()
    }

    /// False once the session `turn` belongs to has been reset.
    pub fn is_current(&self, turn: Turn) -> bool {
        self.epoch == turn.epoch
    }

    /// Clears the typing flag, unless `turn` is from a session that has since
    /// been reset and the flag now belongs to a newer turn.
    pub fn end_turn(&mut self, turn: Turn) {
        if self.is_current(turn) {
            self.is_typing = false;
        }
    }

    /// Moves on from the phase `turn` started in. A wizard that has moved
    /// since, or was reset, is left alone so a late timer never skips a phase.
    pub fn advance_from(&mut self, turn: Turn) -> bool {
        if self.phase != turn.phase || self.epoch != turn.epoch {
            return false;
        }
        match turn.phase.next() {
            Some(next) => {
                self.phase = next;
                true
            }
            None => false,
        }
    }

    pub fn reset(&mut self) {
        self.phase = ChatPhase::Intro;
        self.discovered_items.clear();
        self.is_typing = false;
        self.epoch += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_turn_records_insight_and_blocks_overlap() {
        let mut wizard = ChatWizard::new(Some(1));
        let turn = wizard.begin_turn().unwrap();
        assert_eq!(turn.phase, ChatPhase::Intro);
        assert!(wizard.is_typing());
        assert!(matches!(wizard.begin_turn(), Err(AppError::Conflict(_))));

        wizard.end_turn(turn);
        wizard.begin_turn().unwrap();
        assert_eq!(
            wizard.status().discovered_items,
            vec!["Insight 1".to_string(), "Insight 2".to_string()]
        );
    }

    #[test]
    fn test_reply_comes_from_phase_table() {
        let mut wizard = ChatWizard::new(Some(3));
        for phase in ChatPhase::ALL {
            let reply = wizard.compose_reply(phase);
            assert!(responses_for(phase).contains(&reply));
        }
    }

    #[test]
    fn test_same_seed_same_replies() {
        let mut a = ChatWizard::new(Some(42));
        let mut b = ChatWizard::new(Some(42));
        for _ in 0..8 {
            assert_eq!(
                a.compose_reply(ChatPhase::Background),
                b.compose_reply(ChatPhase::Background)
            );
        }
    }

    #[test]
    fn test_advance_from_is_guarded() {
        let mut wizard = ChatWizard::new(Some(1));
        let first = wizard.begin_turn().unwrap();
        wizard.end_turn(first);
        let second = wizard.begin_turn().unwrap();
        wizard.end_turn(second);

        assert!(wizard.advance_from(first));
        assert_eq!(wizard.phase(), ChatPhase::Background);
        // Both turns started in intro; only one advance applies.
        assert!(!wizard.advance_from(second));
        assert_eq!(wizard.phase(), ChatPhase::Background);
    }

    #[test]
    fn test_complete_does_not_advance() {
        let mut wizard = ChatWizard::new(Some(1));
        loop {
            let turn = wizard.begin_turn().unwrap();
            wizard.end_turn(turn);
            if !wizard.advance_from(turn) {
                break;
            }
        }
        assert_eq!(wizard.phase(), ChatPhase::Complete);
    }

    #[test]
    fn test_timer_from_before_reset_is_ignored() {
        let mut wizard = ChatWizard::new(Some(1));
        let turn = wizard.begin_turn().unwrap();
        wizard.reset();
        assert!(!wizard.advance_from(turn));
        assert_eq!(wizard.phase(), ChatPhase::Intro);
    }

    #[test]
    fn test_stale_turn_leaves_new_session_typing() {
        let mut wizard = ChatWizard::new(Some(1));
        let old = wizard.begin_turn().unwrap();
        wizard.reset();
        let new = wizard.begin_turn().unwrap();

        assert!(!wizard.is_current(old));
        wizard.end_turn(old);
        assert!(wizard.is_typing());
        assert!(matches!(wizard.begin_turn(), Err(AppError::Conflict(_))));

        wizard.end_turn(new);
        assert!(!wizard.is_typing());
    }

    #[test]
    fn test_reset() {
        let mut wizard = ChatWizard::new(Some(1));
        let turn = wizard.begin_turn().unwrap();
        wizard.advance_from(turn);
        wizard.reset();
        let status = wizard.status();
        assert_eq!(status.phase, ChatPhase::Intro);
        assert!(status.discovered_items.is_empty());
        assert!(!status.is_typing);
    }
}
