//! Read-state bookkeeping for the received feedback page.
//!
//! Opening a feedback marks it read locally right away. The caller is told
//! whether a mark-as-read request is needed; it sends one at most once per
//! item and never rolls the local change back.

use crate::models::Feedback;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Inbox {
    items: Vec<Feedback>,
    selected: Option<u64>,
}

impl Inbox {
    pub fn new(items: Vec<Feedback>) -> Self {
        Self {
            items,
            selected: None,
        }
    }

    pub fn items(&self) -> &[Feedback] {
        &self.items
    }

    /// The feedback currently open, if any.
    pub fn selected(&self) -> Option<&Feedback> {
        let id = self.selected?;
        self.items.iter().find(|f| f.id == id)
    }

    /// Open `id`. Returns the id to mark read on the server when the item was
    /// unread.
    pub fn open(&mut self, id: u64) -> Option<u64> {
        let feedback = self.items.iter_mut().find(|f| f.id == id)?;
        self.selected = Some(id);
        if feedback.is_read {
            return None;
        }
        feedback.is_read = true;
        Some(id)
    }

    pub fn close(&mut self) {
        self.selected = None;
    }

    pub fn unread_count(&self) -> usize {
        self.items.iter().filter(|f| !f.is_read).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;
    use chrono::Utc;

    #[test]
    fn test_open_unread_marks_once() {
        let mut inbox = Inbox::new(fixtures::received(Utc::now()));
        assert_eq!(inbox.unread_count(), 2);

        assert_eq!(inbox.open(1), Some(1));
        assert!(inbox.selected().unwrap().is_read);
        assert_eq!(inbox.unread_count(), 1);

        inbox.close();
        assert!(inbox.selected().is_none());
        assert_eq!(inbox.open(1), None);
        assert_eq!(inbox.unread_count(), 1);
    }

    #[test]
    fn test_open_read_item_issues_nothing() {
        let mut inbox = Inbox::new(fixtures::received(Utc::now()));
        assert_eq!(inbox.open(2), None);
        assert_eq!(inbox.selected().map(|f| f.id), Some(2));
    }

    #[test]
    fn test_open_unknown_id() {
        let mut inbox = Inbox::new(fixtures::received(Utc::now()));
        assert_eq!(inbox.open(42), None);
        assert!(inbox.selected().is_none());
        assert_eq!(inbox.unread_count(), 2);
    }
}
