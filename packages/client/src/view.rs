//! Client-side view of one pairing.
//!
//! `ChatView` mirrors what the server pushes for a single connection:
//! it starts in `Searching`, moves to `Chatting` once a stranger is found and
//! ends in `PartnerLeft`. Finding another stranger means a new connection and
//! a new `ChatView`.

use randomly_server::infrastructure::dto::websocket::{ClientEvent, ServerMessage};

pub const SEARCHING_STATUS: &str = "Finding Stranger to talk... Have patience!";
pub const STRANGER_JOINED_STATUS: &str = "Stranger has joined, say hi!";
pub const PARTNER_LEFT_STATUS: &str = "Stranger has left the chat!";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewState {
    Searching,
    Chatting,
    PartnerLeft,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Author {
    Me,
    Stranger,
    System,
}

/// One entry in the chat history
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatLine {
    pub author: Author,
    pub text: String,
    /// Unix timestamp in milliseconds when the line was added locally
    pub timestamp: i64,
}

/// What an applied event changed, for rendering
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewChange {
    /// New status text, when the status was (re)set
    pub status: Option<String>,
    /// Lines appended to the history
    pub lines: Vec<ChatLine>,
}

impl ViewChange {
    pub fn is_empty(&self) -> bool {
        self.status.is_none() && self.lines.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct ChatView {
    state: ViewState,
    status: String,
    my_id: Option<String>,
    history: Vec<ChatLine>,
}

impl Default for ChatView {
    fn default() -> Self {
        Self::new()
    }
}

impl ChatView {
    pub fn new() -> Self {
        Self {
            state: ViewState::Searching,
            status: SEARCHING_STATUS.to_string(),
            my_id: None,
            history: Vec::new(),
        }
    }

    pub fn state(&self) -> ViewState {
        self.state
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    /// Own identity stamp, known once `welcome` has been received
    pub fn my_id(&self) -> Option<&str> {
        self.my_id.as_deref()
    }

    pub fn history(&self) -> &[ChatLine] {
        &self.history
    }

    pub fn input_enabled(&self) -> bool {
        self.state == ViewState::Chatting
    }

    pub fn can_restart(&self) -> bool {
        self.state == ViewState::PartnerLeft
    }

    /// Applies one server event. Events that make no sense in the current
    /// state are ignored and yield an empty change.
    pub fn apply(&mut self, message: ServerMessage, now: i64) -> ViewChange {
        match (self.state, message) {
            (ViewState::Searching, ServerMessage::Waiting) => {
                self.set_status(SEARCHING_STATUS)
            }
            (ViewState::Searching, ServerMessage::Welcome { message, id }) => {
                self.state = ViewState::Chatting;
                self.my_id = Some(id);
                let mut change = self.set_status("");
                change.lines.push(self.push_line(Author::System, message, now));
                change
            }
            (ViewState::Searching, ServerMessage::StrangerJoined) => {
                self.state = ViewState::Chatting;
                self.set_status(STRANGER_JOINED_STATUS)
            }
            (ViewState::Chatting, ServerMessage::SendMessage { message, id }) => {
                let author = if self.my_id.as_deref() == Some(id.as_str()) {
                    Author::Me
                } else {
                    Author::Stranger
                };
                ViewChange {
                    status: None,
                    lines: vec![self.push_line(author, message, now)],
                }
            }
            (ViewState::Chatting, ServerMessage::Leave) => {
                self.state = ViewState::PartnerLeft;
                self.set_status(PARTNER_LEFT_STATUS)
            }
            (state, message) => {
                tracing::debug!("Ignored {:?} while {:?}", message, state);
                ViewChange::default()
            }
        }
    }

    /// Turns user input into an outgoing event and records it as an own line.
    ///
    /// Returns `None` when input is disabled or the text is blank.
    pub fn compose(&mut self, text: &str, now: i64) -> Option<(ClientEvent, ChatLine)> {
        if !self.input_enabled() || text.trim().is_empty() {
            return None;
        }

        let line = self.push_line(Author::Me, text.to_string(), now);
        let event = ClientEvent::Message {
            message: text.to_string(),
            id: self.my_id.clone().unwrap_or_default(),
        };
        Some((event, line))
    }

    fn set_status(&mut self, status: &str) -> ViewChange {
        self.status = status.to_string();
        ViewChange {
            status: Some(self.status.clone()),
            lines: Vec::new(),
        }
    }

    fn push_line(&mut self, author: Author, text: String, timestamp: i64) -> ChatLine {
        let line = ChatLine {
            author,
            text,
            timestamp,
        };
        self.history.push(line.clone());
        line
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn welcome(id: &str) -> ServerMessage {
        ServerMessage::Welcome {
            message: "Say hi!".to_string(),
            id: id.to_string(),
        }
    }

    fn partner_message(text: &str, id: &str) -> ServerMessage {
        ServerMessage::SendMessage {
            message: text.to_string(),
            id: id.to_string(),
        }
    }

    fn chatting_view() -> ChatView {
        let mut view = ChatView::new();
        view.apply(welcome("me"), 0);
        view
    }

    #[test]
    fn test_initial_state_is_searching() {
        // テスト項目: 初期状態は Searching で入力不可
        // given (前提条件):
        // when (操作):
        let view = ChatView::new();

        // then (期待する結果):
        assert_eq!(view.state(), ViewState::Searching);
        assert_eq!(view.status(), SEARCHING_STATUS);
        assert!(!view.input_enabled());
        assert!(!view.can_restart());
        assert!(view.history().is_empty());
    }

    #[test]
    fn test_waiting_refreshes_status_idempotently() {
        // テスト項目: waiting を何度受け取っても Searching のまま
        // given (前提条件):
        let mut view = ChatView::new();

        // when (操作):
        let first = view.apply(ServerMessage::Waiting, 0);
        let second = view.apply(ServerMessage::Waiting, 1);

        // then (期待する結果):
        assert_eq!(first, second);
        assert_eq!(first.status.as_deref(), Some(SEARCHING_STATUS));
        assert_eq!(view.state(), ViewState::Searching);
    }

    #[test]
    fn test_welcome_records_identity_and_starts_chat() {
        // テスト項目: welcome で自身の ID を記録し、歓迎文を表示して Chatting になる
        // given (前提条件):
        let mut view = ChatView::new();

        // when (操作):
        let change = view.apply(welcome("me"), 42);

        // then (期待する結果):
        assert_eq!(view.state(), ViewState::Chatting);
        assert_eq!(view.my_id(), Some("me"));
        assert_eq!(view.status(), "");
        assert!(view.input_enabled());
        assert_eq!(
            change.lines,
            vec![ChatLine {
                author: Author::System,
                text: "Say hi!".to_string(),
                timestamp: 42,
            }]
        );
    }

    #[test]
    fn test_stranger_joined_starts_chat() {
        // テスト項目: strangerJoined で Chatting になり、案内文が表示される
        // given (前提条件):
        let mut view = ChatView::new();

        // when (操作):
        let change = view.apply(ServerMessage::StrangerJoined, 0);

        // then (期待する結果):
        assert_eq!(view.state(), ViewState::Chatting);
        assert_eq!(change.status.as_deref(), Some(STRANGER_JOINED_STATUS));
        assert_eq!(view.my_id(), None);
    }

    #[test]
    fn test_partner_message_is_attributed_to_stranger() {
        // テスト項目: 相手の ID のメッセージは Stranger の発言として追加される
        // given (前提条件):
        let mut view = chatting_view();

        // when (操作):
        let change = view.apply(partner_message("hi", "partner"), 5);

        // then (期待する結果):
        assert_eq!(change.lines.len(), 1);
        assert_eq!(change.lines[0].author, Author::Stranger);
        assert_eq!(change.lines[0].text, "hi");
        assert_eq!(view.history().len(), 2);
    }

    #[test]
    fn test_message_with_own_id_is_attributed_to_me() {
        // テスト項目: 自身の ID が付いたメッセージは自分の発言として扱う
        // given (前提条件):
        let mut view = chatting_view();

        // when (操作):
        let change = view.apply(partner_message("echo", "me"), 5);

        // then (期待する結果):
        assert_eq!(change.lines[0].author, Author::Me);
    }

    #[test]
    fn test_compose_forwards_text_with_identity() {
        // テスト項目: Chatting 中の入力は自分の発言として記録され、送信イベントになる
        // given (前提条件):
        let mut view = chatting_view();

        // when (操作):
        let (event, line) = view.compose("hello", 7).unwrap();

        // then (期待する結果):
        assert_eq!(
            event,
            ClientEvent::Message {
                message: "hello".to_string(),
                id: "me".to_string(),
            }
        );
        assert_eq!(line.author, Author::Me);
        assert_eq!(view.history().last(), Some(&line));
    }

    #[test]
    fn test_blank_input_is_noop() {
        // テスト項目: 空白のみの入力は何もしない
        // given (前提条件):
        let mut view = chatting_view();
        let before = view.history().len();

        // when (操作):
        let result = view.compose("   ", 7);

        // then (期待する結果):
        assert!(result.is_none());
        assert_eq!(view.history().len(), before);
    }

    #[test]
    fn test_input_disabled_while_searching() {
        // テスト項目: Searching 中の入力は送信されない
        // given (前提条件):
        let mut view = ChatView::new();

        // when (操作):
        let result = view.compose("hello?", 7);

        // then (期待する結果):
        assert!(result.is_none());
        assert!(view.history().is_empty());
    }

    #[test]
    fn test_leave_moves_to_partner_left() {
        // テスト項目: leave で PartnerLeft になり、入力不可・再開可能になる
        // given (前提条件):
        let mut view = chatting_view();

        // when (操作):
        let change = view.apply(ServerMessage::Leave, 9);

        // then (期待する結果):
        assert_eq!(view.state(), ViewState::PartnerLeft);
        assert_eq!(change.status.as_deref(), Some(PARTNER_LEFT_STATUS));
        assert!(!view.input_enabled());
        assert!(view.can_restart());
        assert!(view.compose("still there?", 10).is_none());
    }

    #[test]
    fn test_partner_left_ignores_further_events() {
        // テスト項目: PartnerLeft からは Searching や Chatting に戻らない
        // given (前提条件):
        let mut view = chatting_view();
        view.apply(ServerMessage::Leave, 9);

        // when (操作):
        let changes = [
            view.apply(ServerMessage::Waiting, 10),
            view.apply(ServerMessage::StrangerJoined, 10),
            view.apply(partner_message("late", "partner"), 10),
        ];

        // then (期待する結果):
        assert!(changes.iter().all(ViewChange::is_empty));
        assert_eq!(view.state(), ViewState::PartnerLeft);
    }

    #[test]
    fn test_leave_while_searching_is_ignored() {
        // テスト項目: Searching 中の leave や sendMessage は無視される
        // given (前提条件):
        let mut view = ChatView::new();

        // when (操作):
        let leave = view.apply(ServerMessage::Leave, 0);
        let message = view.apply(partner_message("early", "x"), 0);

        // then (期待する結果):
        assert!(leave.is_empty());
        assert!(message.is_empty());
        assert_eq!(view.state(), ViewState::Searching);
    }

    #[test]
    fn test_chatting_ignores_second_pairing() {
        // テスト項目: Chatting 中の welcome / waiting は無視され、ID も変わらない
        // given (前提条件):
        let mut view = chatting_view();

        // when (操作):
        let change = view.apply(welcome("other"), 1);
        view.apply(ServerMessage::Waiting, 1);

        // then (期待する結果):
        assert!(change.is_empty());
        assert_eq!(view.my_id(), Some("me"));
        assert_eq!(view.state(), ViewState::Chatting);
    }
}
