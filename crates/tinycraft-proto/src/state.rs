//! Connection state machine.

use std::fmt;

use crate::error::ProtoError;

/// `next_state` field of the handshake.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum NextState {
    Status = 1,
    Login = 2,
}

impl NextState {
    pub fn from_i32(v: i32) -> Result<Self, ProtoError> {
        match v {
            1 => Ok(Self::Status),
            2 => Ok(Self::Login),
            _ => Err(ProtoError::InvalidNextState(v)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Handshake,
    Status,
    Login,
    Play,
    Closed,
}

/// Inputs that move a connection between states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    Handshake(NextState),
    PingAnswered,
    LoginStarted,
    Disconnected,
}

impl Event {
    fn name(self) -> &'static str {
        match self {
            Self::Handshake(_) => "handshake",
            Self::PingAnswered => "ping answered",
            Self::LoginStarted => "login started",
            Self::Disconnected => "disconnected",
        }
    }
}

impl ConnectionState {
    pub fn name(self) -> &'static str {
        match self {
            Self::Handshake => "handshake",
            Self::Status => "status",
            Self::Login => "login",
            Self::Play => "play",
            Self::Closed => "closed",
        }
    }

    pub fn transition(self, event: Event) -> Result<Self, ProtoError> {
        match (self, event) {
            (_, Event::Disconnected) => Ok(Self::Closed),
            (Self::Handshake, Event::Handshake(NextState::Status)) => Ok(Self::Status),
            (Self::Handshake, Event::Handshake(NextState::Login)) => Ok(Self::Login),
            (Self::Status, Event::PingAnswered) => Ok(Self::Closed),
            (Self::Login, Event::LoginStarted) => Ok(Self::Play),
            (from, event) => Err(ProtoError::InvalidTransition {
                from: from.name(),
                event: event.name(),
            }),
        }
    }
}

impl fmt::Display for ConnectionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_path() {
        let s = ConnectionState::Handshake
            .transition(Event::Handshake(NextState::Login))
            .unwrap();
        assert_eq!(s, ConnectionState::Login);
        let s = s.transition(Event::LoginStarted).unwrap();
        assert_eq!(s, ConnectionState::Play);
        assert_eq!(
            s.transition(Event::Disconnected).unwrap(),
            ConnectionState::Closed
        );
    }

    #[test]
    fn status_path() {
        let s = ConnectionState::Handshake
            .transition(Event::Handshake(NextState::Status))
            .unwrap();
        assert_eq!(s, ConnectionState::Status);
        assert_eq!(
            s.transition(Event::PingAnswered).unwrap(),
            ConnectionState::Closed
        );
    }

    #[test]
    fn invalid_transitions() {
        assert!(ConnectionState::Handshake
            .transition(Event::LoginStarted)
            .is_err());
        assert!(ConnectionState::Status
            .transition(Event::LoginStarted)
            .is_err());
        assert!(ConnectionState::Play
            .transition(Event::Handshake(NextState::Login))
            .is_err());
        assert!(matches!(
            ConnectionState::Login.transition(Event::PingAnswered),
            Err(ProtoError::InvalidTransition {
                from: "login",
                event: "ping answered"
            })
        ));
    }

    #[test]
    fn next_state_values() {
        assert_eq!(NextState::from_i32(1).unwrap(), NextState::Status);
        assert_eq!(NextState::from_i32(2).unwrap(), NextState::Login);
        assert!(matches!(
            NextState::from_i32(5),
            Err(ProtoError::InvalidNextState(5))
        ));
    }
}
