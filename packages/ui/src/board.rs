//! View state of the decisions dashboard, kept apart from rendering so its
//! transitions can be tested without a runtime.

use api::{Decision, DecisionOption};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DecisionBoard {
    pub decisions: Vec<Decision>,
    pub selected: Option<Decision>,
    /// Options of the selected decision.
    pub options: Vec<DecisionOption>,
    pub adding_option: bool,
    pub editing_option: Option<String>,
    pub error: Option<String>,
}

impl DecisionBoard {
    pub fn set_decisions(&mut self, decisions: Vec<Decision>) {
        self.decisions = decisions;
    }

    /// Open a decision with its freshly loaded options.
    pub fn select(&mut self, decision: Decision, options: Vec<DecisionOption>) {
        self.selected = Some(decision);
        self.options = options;
        self.adding_option = false;
        self.editing_option = None;
    }

    pub fn selected_id(&self) -> Option<&str> {
        self.selected.as_ref().map(|d| d.id.as_str())
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.selected_id() == Some(id)
    }

    /// A decision was deleted on the server. Clears the option view if it
    /// was the selected one.
    pub fn decision_deleted(&mut self, id: &str) {
        self.decisions.retain(|d| d.id != id);
        if self.is_selected(id) {
            self.selected = None;
            self.options.clear();
            self.adding_option = false;
            self.editing_option = None;
        }
    }

    pub fn toggle_add_option(&mut self) {
        self.adding_option = !self.adding_option;
        self.editing_option = None;
    }

    pub fn start_edit(&mut self, option_id: &str) {
        self.editing_option = Some(option_id.to_string());
        self.adding_option = false;
    }

    pub fn cancel_edit(&mut self) {
        self.editing_option = None;
    }

    pub fn is_editing(&self, option_id: &str) -> bool {
        self.editing_option.as_deref() == Some(option_id)
    }

    pub fn fail(&mut self, message: String) {
        self.error = Some(message);
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use api::Rating;

    fn decision(id: &str) -> Decision {
        Decision {
            id: id.to_string(),
            title: format!("Decision {id}"),
            description: None,
            options: Vec::new(),
        }
    }

    fn option(id: &str, decision_id: &str) -> DecisionOption {
        DecisionOption {
            id: id.to_string(),
            decision_id: decision_id.to_string(),
            option_text: format!("Option {id}"),
            rating: Rating::new(3),
        }
    }

    #[test]
    fn test_deleting_selected_decision_clears_options() {
        let mut board = DecisionBoard::default();
        board.set_decisions(vec![decision("d1"), decision("d2")]);
        board.select(decision("d1"), vec![option("o1", "d1"), option("o2", "d1")]);
        board.start_edit("o1");

        board.decision_deleted("d1");

        assert!(board.selected.is_none());
        assert!(board.options.is_empty());
        assert!(board.editing_option.is_none());
        assert_eq!(board.decisions.len(), 1);
    }

    #[test]
    fn test_deleting_other_decision_keeps_selection() {
        let mut board = DecisionBoard::default();
        board.set_decisions(vec![decision("d1"), decision("d2")]);
        board.select(decision("d1"), vec![option("o1", "d1")]);

        board.decision_deleted("d2");

        assert!(board.is_selected("d1"));
        assert_eq!(board.options.len(), 1);
    }

    #[test]
    fn test_select_resets_forms() {
        let mut board = DecisionBoard::default();
        board.select(decision("d1"), Vec::new());
        board.toggle_add_option();
        assert!(board.adding_option);

        board.select(decision("d2"), vec![option("o9", "d2")]);
        assert!(!board.adding_option);
        assert_eq!(board.selected_id(), Some("d2"));
    }

    #[test]
    fn test_edit_and_add_are_exclusive() {
        let mut board = DecisionBoard::default();
        board.toggle_add_option();
        board.start_edit("o1");
        assert!(!board.adding_option);
        assert!(board.is_editing("o1"));

        board.toggle_add_option();
        assert!(board.editing_option.is_none());

        board.cancel_edit();
        assert!(!board.is_editing("o1"));
    }
}
