use bytes::Bytes;
use futures::{SinkExt, StreamExt};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tokio::net::TcpStream;
use tokio_util::codec::{Framed, LengthDelimitedCodec};
use uuid::Uuid;

use crate::datatypes::{ContactMessage, NewMessage};
use crate::error::DeskError;

/// Wire requests, one bincode-encoded value per length-delimited frame.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum Request {
    SubmitMessage(NewMessage),
    ListMessages,
    MarkRead { id: Uuid },
    DeleteMessage { id: Uuid },
    GetSetting { key: String },
    PutSetting { key: String, value: String },
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum Response {
    Accepted(ContactMessage),
    Messages(Vec<ContactMessage>),
    Updated,
    Deleted,
    Setting(Option<String>),
    SettingStored,
    Error(String),
}

pub type MessageFrames = Framed<TcpStream, LengthDelimitedCodec>;

pub fn frame(stream: TcpStream) -> MessageFrames {
    Framed::new(stream, LengthDelimitedCodec::new())
}

pub async fn send<T: Serialize>(frames: &mut MessageFrames, value: &T) -> Result<(), DeskError> {
    let encoded = bincode::serialize(value)?;
    frames.send(Bytes::from(encoded)).await?;
    Ok(())
}

/// Reads the next frame; `Ok(None)` means the peer closed the connection.
pub async fn recv<T: DeserializeOwned>(frames: &mut MessageFrames) -> Result<Option<T>, DeskError> {
    match frames.next().await {
        None => Ok(None),
        Some(frame) => Ok(Some(bincode::deserialize(&frame?)?)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn requests_survive_the_wire_encoding() {
        let request = Request::SubmitMessage(NewMessage {
            name: "Jane".to_owned(),
            email: "jane@example.com".to_owned(),
            phone: None,
            service: Some("Project Planning".to_owned()),
            message: "Looking for a quote.".to_owned(),
        });

        let bytes = bincode::serialize(&request).unwrap();
        let decoded: Request = bincode::deserialize(&bytes).unwrap();
        match decoded {
            Request::SubmitMessage(new) => {
                assert_eq!(new.name, "Jane");
                assert_eq!(new.service.as_deref(), Some("Project Planning"));
            }
            other => panic!("decoded the wrong variant: {other:?}"),
        }
    }
}
