use std::sync::Arc;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use chrono::Utc;

use handee_shared::constants::VOICE_MESSAGE_CONTENT;
use handee_shared::{DealId, MessageId, MessageKind, UserId};
use handee_store::{Deal, Message, User};

use crate::chat::{poll_once, CallTimer, ChatPoller};
use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Resolve the deal and the viewer's counterpart for a chat command.
fn conversation(state: &AppState, id: &DealId, action: &'static str) -> AppResult<(User, Deal, UserId)> {
    let user = state.require_user(action)?;
    let Some(deal) = state.store.deal_by_id(id) else {
        return state.fail(AppError::NotFound("Deal"));
    };
    let Some(other) = deal.counterpart(&user.id).cloned() else {
        return state.fail(AppError::AccessDenied("deal"));
    };
    Ok((user, deal, other))
}

fn post(
    state: &AppState,
    sender: UserId,
    deal: &Deal,
    receiver: UserId,
    kind: MessageKind,
    content: String,
    voice_data: Option<String>,
) -> Message {
    let message = Message {
        id: MessageId::generate(),
        deal_id: deal.id.clone(),
        sender_id: sender,
        receiver_id: receiver,
        content,
        kind,
        voice_data,
        timestamp: Utc::now(),
        read: false,
    };
    state.store.add_message(message.clone());
    message
}

pub fn send_text(state: &AppState, deal: &DealId, content: &str) -> AppResult<Message> {
    let (user, deal, other) = conversation(state, deal, "send messages")?;

    let content = content.trim();
    if content.is_empty() {
        return state.fail(AppError::EmptyMessage);
    }

    Ok(post(state, user.id, &deal, other, MessageKind::Text, content.to_string(), None))
}

/// Send a recorded voice clip.  The audio is stored base64-encoded.
pub fn send_voice(state: &AppState, deal: &DealId, audio: &[u8]) -> AppResult<Message> {
    let (user, deal, other) = conversation(state, deal, "send messages")?;

    if audio.is_empty() {
        return state.fail(AppError::EmptyMessage);
    }

    let encoded = STANDARD.encode(audio);
    tracing::debug!(deal = %deal.id, bytes = audio.len(), "sending voice message");
    Ok(post(
        state,
        user.id,
        &deal,
        other,
        MessageKind::Voice,
        VOICE_MESSAGE_CONTENT.to_string(),
        Some(encoded),
    ))
}

/// The deal's conversation, oldest first.  Messages addressed to the viewer
/// are marked read.
pub fn fetch_messages(state: &AppState, deal: &DealId) -> AppResult<Vec<Message>> {
    let (user, deal, _) = conversation(state, deal, "view messages")?;
    Ok(poll_once(&state.store, &deal.id, &user.id))
}

/// Keep the deal's conversation refreshed in the background.  Polling stops
/// when the returned handle is dropped.
pub fn watch_deal(state: &AppState, deal: &DealId) -> AppResult<ChatPoller> {
    let (user, deal, _) = conversation(state, deal, "view messages")?;
    Ok(ChatPoller::spawn(
        Arc::clone(&state.store),
        deal.id,
        user.id,
        state.config.poll_interval,
    ))
}

/// Start a call with the deal's counterpart.  Only the duration is tracked;
/// the call ends when the timer is dropped.
pub fn start_call(state: &AppState, deal: &DealId) -> AppResult<CallTimer> {
    let (user, deal, other) = conversation(state, deal, "start a call")?;
    tracing::info!(deal = %deal.id, from = %user.id, to = %other, "call started");
    Ok(CallTimer::start(state.config.call_tick))
}
