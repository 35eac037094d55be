#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

/// Queue of transient notices shown to the user after each operation.
#[derive(Debug, Default)]
pub struct Notifications {
    notices: Vec<Notice>,
}

impl Notifications {
    pub fn push(&mut self, level: NoticeLevel, message: impl Into<String>) {
        self.notices.push(Notice {
            level,
            message: message.into(),
        });
    }

    pub fn success(&mut self, message: impl Into<String>) {
        self.push(NoticeLevel::Success, message)
    }

    pub fn info(&mut self, message: impl Into<String>) {
        self.push(NoticeLevel::Info, message)
    }

    pub fn warning(&mut self, message: impl Into<String>) {
        self.push(NoticeLevel::Warning, message)
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.push(NoticeLevel::Error, message)
    }

    pub fn dismiss(&mut self, index: usize) -> Option<Notice> {
        (index < self.notices.len()).then(|| self.notices.remove(index))
    }

    pub fn drain(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    pub fn last(&self) -> Option<&Notice> {
        self.notices.last()
    }

    pub fn len(&self) -> usize {
        self.notices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notices.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dismiss_removes_one_notice() {
        let mut notifications = Notifications::default();
        notifications.success("ok");
        notifications.error("nope");
        let dismissed = notifications.dismiss(0).expect("Failed to dismiss");
        assert_eq!(dismissed.level, NoticeLevel::Success);
        assert_eq!(notifications.len(), 1);
        assert!(notifications.dismiss(5).is_none());
    }

    #[test]
    fn drain_empties_queue() {
        let mut notifications = Notifications::default();
        notifications.info("a");
        notifications.warning("b");
        assert_eq!(notifications.drain().len(), 2);
        assert!(notifications.is_empty());
    }
}
