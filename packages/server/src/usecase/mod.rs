//! UseCase layer: application operations driven by the UI layer.

mod connect_participant;
mod disconnect_participant;
mod get_lobby_state;
mod join_match;
mod send_message;

pub use connect_participant::{ConnectParticipantUseCase, ConnectedParticipant};
pub use disconnect_participant::DisconnectParticipantUseCase;
pub use get_lobby_state::GetLobbyStateUseCase;
pub use join_match::{DEFAULT_WELCOME_MESSAGE, JoinMatchUseCase};
pub use send_message::SendMessageUseCase;
