use proptest::prelude::*;
use tmuxbot::conversation::{ConversationBuffer, MessageRole};

fn role(i: usize) -> MessageRole {
    if i % 2 == 0 {
        MessageRole::User
    } else {
        MessageRole::Assistant
    }
}

proptest! {
    #[test]
    fn length_never_exceeds_capacity(capacity in 0usize..12, appends in 0usize..60) {
        let mut buffer = ConversationBuffer::new(capacity);
        for i in 0..appends {
            buffer.append(role(i), format!("m{}", i));
            prop_assert!(buffer.len() <= capacity);
        }
        prop_assert_eq!(buffer.len(), appends.min(capacity));
    }

    #[test]
    fn first_message_and_newest_tail_are_retained(capacity in 2usize..12, appends in 1usize..60) {
        let mut buffer = ConversationBuffer::new(capacity);
        for i in 0..appends {
            buffer.append(role(i), format!("m{}", i));
        }
        let history = buffer.snapshot();
        prop_assert_eq!(history[0].content.as_str(), "m0");
        let last = format!("m{}", appends - 1);
        prop_assert_eq!(history[history.len() - 1].content.as_str(), last.as_str());
    }

    #[test]
    fn recent_returns_suffix(appends in 0usize..30, n in 0usize..40) {
        let mut buffer = ConversationBuffer::new(100);
        for i in 0..appends {
            buffer.append(role(i), format!("m{}", i));
        }
        let recent = buffer.recent(n);
        prop_assert_eq!(recent.len(), n.min(appends));
        let snapshot = buffer.snapshot();
        prop_assert_eq!(&snapshot[snapshot.len() - recent.len()..], recent.as_slice());
    }
}

#[test]
fn capacity_one_keeps_only_newest() {
    let mut buffer = ConversationBuffer::new(1);
    buffer.append(MessageRole::User, "first");
    buffer.append(MessageRole::Assistant, "second");
    let history = buffer.snapshot();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].content, "second");
}
