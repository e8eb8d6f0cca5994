use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::chat::phases::ChatPhase;
use crate::chat::prompts::{WELCOME_MESSAGE, WELCOME_MESSAGE_ID};
use crate::chat::wizard::{Turn, WizardStatus};
use crate::context::actions::ZcvAction;
use crate::errors::AppError;
use crate::models::chat::{ChatMessage, MessageRole};
use crate::state::AppState;
use crate::view::View;

/// The editor hand-off is offered once the conversation has some substance.
const CONTINUE_AFTER_MESSAGES: usize = 4;

#[derive(Deserialize)]
pub struct SendMessageRequest {
    pub content: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatSessionResponse {
    pub messages: Vec<ChatMessage>,
    #[serde(flatten)]
    pub wizard: WizardStatus,
    pub can_continue: bool,
}

async fn session(state: &AppState) -> ChatSessionResponse {
    let wizard = state.chat.lock().await.status();
    let messages = state.store.read(|s| s.chat_messages.clone()).await;
    ChatSessionResponse {
        can_continue: messages.len() > CONTINUE_AFTER_MESSAGES,
        messages,
        wizard,
    }
}

/// GET /api/v1/chat
/// Opens the session with the welcome message when the log is empty.
pub async fn handle_get_chat(
    State(state): State<AppState>,
) -> Result<Json<ChatSessionResponse>, AppError> {
    {
        // Held so concurrent first loads add a single welcome.
        let _wizard = state.chat.lock().await;
        if state.store.read(|s| s.chat_messages.is_empty()).await {
            let mut welcome = ChatMessage::new(MessageRole::Agent, WELCOME_MESSAGE);
            welcome.id = WELCOME_MESSAGE_ID.to_string();
            state.store.dispatch(ZcvAction::AddChatMessage(welcome)).await?;
        }
    }
    Ok(Json(session(&state).await))
}

/// POST /api/v1/chat/messages
pub async fn handle_send_message(
    State(state): State<AppState>,
    Json(req): Json<SendMessageRequest>,
) -> Result<Json<ChatSessionResponse>, AppError> {
    let content = req.content.trim();
    if content.is_empty() {
        return Err(AppError::Validation("Message cannot be empty".to_string()));
    }

    let turn = {
        let mut wizard = state.chat.lock().await;
        let turn = wizard.begin_turn()?;
        let user = ChatMessage::new(MessageRole::User, content);
        if let Err(e) = state.store.dispatch(ZcvAction::AddChatMessage(user)).await {
            wizard.end_turn(turn);
            return Err(e);
        }
        turn
    };

    let outcome = respond(&state, turn).await;
    state.chat.lock().await.end_turn(turn);
    outcome?;

    schedule_phase_advance(&state, turn);
    Ok(Json(session(&state).await))
}

/// Waits, then appends the agent reply. A session cleared in the meantime
/// gets no reply.
async fn respond(state: &AppState, turn: Turn) -> Result<(), AppError> {
    tokio::time::sleep(state.config.chat_response_delay).await;

    let mut wizard = state.chat.lock().await;
    if !wizard.is_current(turn) {
        debug!("Dropping reply for a cleared chat session");
        return Ok(());
    }
    let reply = wizard.compose_reply(turn.phase);
    state
        .store
        .dispatch(ZcvAction::AddChatMessage(ChatMessage::new(
            MessageRole::Agent,
            reply,
        )))
        .await
}

fn schedule_phase_advance(state: &AppState, turn: Turn) {
    if turn.phase == ChatPhase::Complete {
        return;
    }
    let chat = state.chat.clone();
    let delay = state.config.chat_phase_delay;
    tokio::spawn(async move {
        tokio::time::sleep(delay).await;
        let mut wizard = chat.lock().await;
        if wizard.advance_from(turn) {
            info!("Chat advanced to {:?}", wizard.phase());
        } else {
            debug!("Chat already moved past {:?}", turn.phase);
        }
    });
}

/// POST /api/v1/chat/continue
pub async fn handle_continue(State(state): State<AppState>) -> Result<Json<View>, AppError> {
    state
        .store
        .dispatch(ZcvAction::SetView(View::PortfolioBuilder))
        .await?;
    Ok(Json(View::PortfolioBuilder))
}

/// DELETE /api/v1/chat
pub async fn handle_clear_chat(
    State(state): State<AppState>,
) -> Result<Json<ChatSessionResponse>, AppError> {
    {
        let mut wizard = state.chat.lock().await;
        wizard.reset();
        state.store.dispatch(ZcvAction::ClearChat).await?;
    }
    Ok(Json(session(&state).await))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use std::sync::Arc;
    use std::time::Duration;

    use crate::chat::prompts::responses_for;
    use crate::config::Config;
    use crate::context::store::ZcvStore;
    use crate::persistence::MemoryStore;

    fn message(content: &str) -> Json<SendMessageRequest> {
        Json(SendMessageRequest {
            content: content.to_string(),
        })
    }

    #[tokio::test]
    async fn test_first_load_adds_single_welcome() {
        let state = AppState::for_tests();
        handle_get_chat(State(state.clone())).await.unwrap();
        let Json(session) = handle_get_chat(State(state)).await.unwrap();

        assert_eq!(session.messages.len(), 1);
        assert_eq!(session.messages[0].id, WELCOME_MESSAGE_ID);
        assert_eq!(session.messages[0].role, MessageRole::Agent);
        assert!(!session.can_continue);
    }

    #[tokio::test]
    async fn test_blank_message_is_rejected() {
        let state = AppState::for_tests();
        let err = handle_send_message(State(state.clone()), message("   "))
            .await
            .err()
            .unwrap();
        assert!(matches!(err, AppError::Validation(_)));
        assert!(state.store.read(|s| s.chat_messages.is_empty()).await);
    }

    #[tokio::test]
    async fn test_exchange_appends_user_and_agent_messages() {
        let state = AppState::for_tests();
        let Json(session) = handle_send_message(State(state), message("  I build compilers "))
            .await
            .unwrap();

        assert_eq!(session.messages.len(), 2);
        assert_eq!(session.messages[0].role, MessageRole::User);
        assert_eq!(session.messages[0].content, "I build compilers");
        assert_eq!(session.messages[1].role, MessageRole::Agent);
        assert!(responses_for(ChatPhase::Intro).contains(&session.messages[1].content.as_str()));
        assert_eq!(session.wizard.discovered_items, vec!["Insight 1".to_string()]);
        assert!(!session.wizard.is_typing);
    }

    #[tokio::test]
    async fn test_message_rejected_while_typing() {
        let state = AppState::for_tests();
        state.chat.lock().await.begin_turn().unwrap();
        let err = handle_send_message(State(state), message("hello"))
            .await
            .err()
            .unwrap();
        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_phase_advances_after_reply() {
        let state = AppState::for_tests();
        handle_send_message(State(state.clone()), message("hello"))
            .await
            .unwrap();
        tokio::time::sleep(std::time::Duration::from_millis(20)).await;
        assert_eq!(state.chat.lock().await.phase(), ChatPhase::Background);
    }

    #[tokio::test]
    async fn test_continue_offered_after_enough_messages() {
        let state = AppState::for_tests();
        handle_get_chat(State(state.clone())).await.unwrap();
        handle_send_message(State(state.clone()), message("one"))
            .await
            .unwrap();
        let Json(session) = handle_send_message(State(state.clone()), message("two"))
            .await
            .unwrap();
        assert_eq!(session.messages.len(), 5);
        assert!(session.can_continue);

        let Json(view) = handle_continue(State(state.clone())).await.unwrap();
        assert_eq!(view, View::PortfolioBuilder);
        assert_eq!(
            state.store.read(|s| s.current_view).await,
            View::PortfolioBuilder
        );
    }

    fn slow_state(reply_delay: Duration) -> AppState {
        let mut config = Config::for_tests(PathBuf::from("unused.json"));
        config.chat_response_delay = reply_delay;
        AppState::new(ZcvStore::new(Arc::new(MemoryStore::default())), config)
    }

    #[tokio::test(start_paused = true)]
    async fn test_reply_in_flight_does_not_leak_into_cleared_session() {
        let state = slow_state(Duration::from_millis(200));
        let old = tokio::spawn(handle_send_message(State(state.clone()), message("old session")));
        tokio::time::sleep(Duration::from_millis(20)).await;
        handle_clear_chat(State(state.clone())).await.unwrap();

        tokio::time::sleep(Duration::from_millis(60)).await;
        let new = tokio::spawn(handle_send_message(State(state.clone()), message("new session")));
        tokio::time::sleep(Duration::from_millis(10)).await;

        old.await.unwrap().unwrap();
        assert!(state.chat.lock().await.is_typing());
        let err = handle_send_message(State(state.clone()), message("overlap"))
            .await
            .err()
            .unwrap();
        assert!(matches!(err, AppError::Conflict(_)));

        let Json(session) = new.await.unwrap().unwrap();
        let log: Vec<(MessageRole, &str)> = session
            .messages
            .iter()
            .map(|m| (m.role, m.content.as_str()))
            .collect();
        assert_eq!(log.len(), 2);
        assert_eq!(log[0], (MessageRole::User, "new session"));
        assert_eq!(log[1].0, MessageRole::Agent);
        assert!(!session.wizard.is_typing);
    }

    #[tokio::test]
    async fn test_clear_resets_log_and_wizard() {
        let state = AppState::for_tests();
        handle_send_message(State(state.clone()), message("hello"))
            .await
            .unwrap();
        let Json(session) = handle_clear_chat(State(state)).await.unwrap();
        assert!(session.messages.is_empty());
        assert_eq!(session.wizard.phase, ChatPhase::Intro);
        assert!(session.wizard.discovered_items.is_empty());
    }
}
