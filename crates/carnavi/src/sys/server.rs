use crate::events::AppEvent;
use async_channel::Sender;
use derive_more::{AsRef, Deref, Display, From, Into};
use navring::StateKind;
use serde::{Deserialize, Serialize};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::net::UnixListener;

pub const DEFAULT_SOCKET_PATH: &str = "/tmp/carnavi.sock";

#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display, Deref, From, Into, AsRef,
)]
#[serde(transparent)]
pub struct SocketPath(String);

crate::impl_string_newtype!(SocketPath);

impl Default for SocketPath {
    fn default() -> Self {
        Self::new(DEFAULT_SOCKET_PATH)
    }
}

/// Parses one line of the control protocol.
pub fn parse_command(line: &str) -> Option<AppEvent> {
    let mut words = line.split_whitespace();
    let event = match (words.next()?, words.next()) {
        ("show", None) => AppEvent::Show,
        ("hide", None) => AppEvent::Hide,
        ("progress", Some(value)) => AppEvent::Progress(value.parse().ok()?),
        ("state", Some(kind)) => AppEvent::SwitchState(kind.parse::<StateKind>().ok()?),
        _ => return None,
    };
    words.next().is_none().then_some(event)
}

pub async fn run_server(tx: Sender<AppEvent>, socket: SocketPath) {
    // Cleanup old socket if it exists
    if std::fs::metadata(socket.as_str()).is_ok() {
        let _ = std::fs::remove_file(socket.as_str());
    }

    let listener = match UnixListener::bind(socket.as_str()) {
        Ok(l) => l,
        Err(e) => {
            log::error!("Failed to bind unix socket {}: {}", socket, e);
            return;
        }
    };

    loop {
        match listener.accept().await {
            Ok((mut stream, _)) => {
                let tx = tx.clone();
                tokio::spawn(async move {
                    let reader = BufReader::new(&mut stream);
                    let mut lines = reader.lines();

                    while let Ok(Some(line)) = lines.next_line().await {
                        match parse_command(&line) {
                            Some(event) => {
                                let _ = tx.send(event).await;
                            }
                            None => log::warn!("Unknown command: {}", line.trim()),
                        }
                    }
                });
            }
            Err(e) => {
                log::error!("Failed to accept connection: {}", e);
            }
        }
    }
}
