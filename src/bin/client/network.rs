use async_trait::async_trait;
use tokio::net::TcpStream;
use uuid::Uuid;

use contact_desk::dashboard::MessageBackend;
use contact_desk::datatypes::ContactMessage;
use contact_desk::error::DeskError;
use contact_desk::protocol::{self, MessageFrames, Request, Response};

/// Connection to the desk server, one request/response pair per call.
pub struct RemoteStore {
    frames: MessageFrames,
}

impl RemoteStore {
    pub async fn connect(addr: &str) -> Result<Self, DeskError> {
        let stream = TcpStream::connect(addr).await?;
        Ok(Self {
            frames: protocol::frame(stream),
        })
    }

    pub async fn request(&mut self, request: Request) -> Result<Response, DeskError> {
        protocol::send(&mut self.frames, &request).await?;
        match protocol::recv(&mut self.frames).await? {
            Some(response) => Ok(response),
            None => Err(DeskError::ConnectionClosed),
        }
    }

    pub async fn get_setting(&mut self, key: &str) -> Result<Option<String>, DeskError> {
        match self.request(Request::GetSetting { key: key.to_owned() }).await? {
            Response::Setting(value) => Ok(value),
            Response::Error(e) => Err(DeskError::Remote(e)),
            _ => Err(DeskError::UnexpectedResponse("GetSetting")),
        }
    }

    pub async fn put_setting(&mut self, key: &str, value: &str) -> Result<(), DeskError> {
        let request = Request::PutSetting {
            key: key.to_owned(),
            value: value.to_owned(),
        };
        match self.request(request).await? {
            Response::SettingStored => Ok(()),
            Response::Error(e) => Err(DeskError::Remote(e)),
            _ => Err(DeskError::UnexpectedResponse("PutSetting")),
        }
    }
}

#[async_trait]
impl MessageBackend for RemoteStore {
    async fn fetch_all(&mut self) -> Result<Vec<ContactMessage>, DeskError> {
        match self.request(Request::ListMessages).await? {
            Response::Messages(messages) => Ok(messages),
            Response::Error(e) => Err(DeskError::Remote(e)),
            _ => Err(DeskError::UnexpectedResponse("ListMessages")),
        }
    }

    async fn mark_read(&mut self, id: Uuid) -> Result<(), DeskError> {
        match self.request(Request::MarkRead { id }).await? {
            Response::Updated => Ok(()),
            Response::Error(e) => Err(DeskError::Remote(e)),
            _ => Err(DeskError::UnexpectedResponse("MarkRead")),
        }
    }

    async fn delete(&mut self, id: Uuid) -> Result<(), DeskError> {
        match self.request(Request::DeleteMessage { id }).await? {
            Response::Deleted => Ok(()),
            Response::Error(e) => Err(DeskError::Remote(e)),
            _ => Err(DeskError::UnexpectedResponse("DeleteMessage")),
        }
    }
}
