//! Modal stack for managing overlays
//!
//! Dialog components own their own input state; the stack only records
//! which overlays are open and in what order.

/// A modal overlay displayed on top of the table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Modal {
    /// Quit confirmation dialog
    QuitConfirm,
    /// Keyboard shortcut reference
    Help,
    /// Page number entry
    JumpToPage,
    /// Page-size picker
    RowsPerPage,
    /// Column filter editor
    Filter,
}

/// A stack of modal overlays
///
/// Modals are rendered from bottom to top, with only the top modal
/// receiving input events.
#[derive(Debug, Default)]
pub struct ModalStack {
    stack: Vec<Modal>,
}

impl ModalStack {
    pub fn new() -> Self {
        Self { stack: Vec::new() }
    }

    /// Push a modal unless it is already the top one
    pub fn push(&mut self, modal: Modal) {
        if self.top() != Some(modal) {
            self.stack.push(modal);
        }
    }

    pub fn pop(&mut self) -> Option<Modal> {
        self.stack.pop()
    }

    pub fn top(&self) -> Option<Modal> {
        self.stack.last().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = Modal> + '_ {
        self.stack.iter().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_modal_stack_push_pop() {
        let mut stack = ModalStack::new();
        assert!(stack.top().is_none());

        stack.push(Modal::Help);
        stack.push(Modal::QuitConfirm);
        assert_eq!(stack.top(), Some(Modal::QuitConfirm));

        assert_eq!(stack.pop(), Some(Modal::QuitConfirm));
        assert_eq!(stack.pop(), Some(Modal::Help));
        assert!(stack.is_empty());
    }

    #[test]
    fn test_push_same_modal_twice_is_ignored() {
        let mut stack = ModalStack::new();
        stack.push(Modal::Filter);
        stack.push(Modal::Filter);
        assert_eq!(stack.iter().count(), 1);
    }

    #[test]
    fn test_iter_is_bottom_to_top() {
        let mut stack = ModalStack::new();
        stack.push(Modal::RowsPerPage);
        stack.push(Modal::QuitConfirm);
        let order: Vec<Modal> = stack.iter().collect();
        assert_eq!(order, vec![Modal::RowsPerPage, Modal::QuitConfirm]);
    }
}
