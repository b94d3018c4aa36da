use contact_desk::protocol::{Request, Response};

use crate::notify::Notifier;
use crate::server::Stores;
use crate::stores::settings::{ADMIN_EMAIL, ADMIN_PASSWORD};

/// Dispatches one request against the stores.
///
/// Store guards are released before any notifier call; the notifier awaits
/// network i/o and must never hold a lock across it.
pub async fn handle(stores: &Stores, notifier: &Notifier, request: Request) -> Response {
    match request {
        Request::SubmitMessage(new) => {
            let stored = stores.messages.write().insert(new);
            let recipient = stores.settings.read().get(ADMIN_EMAIL);

            if let Some(to) = recipient {
                notifier.contact_submission(&to, &stored).await;
            }

            Response::Accepted(stored)
        }

        Request::ListMessages => Response::Messages(stores.messages.read().all_newest_first()),

        Request::MarkRead { id } => {
            if stores.messages.write().mark_read(id) {
                Response::Updated
            } else {
                Response::Error(format!("no message with id {id}"))
            }
        }

        Request::DeleteMessage { id } => {
            if stores.messages.write().remove(id) {
                Response::Deleted
            } else {
                Response::Error(format!("no message with id {id}"))
            }
        }

        Request::GetSetting { key } => Response::Setting(stores.settings.read().get(&key)),

        Request::PutSetting { key, value } => {
            stores.settings.write().upsert(&key, &value);

            if key == ADMIN_PASSWORD {
                let recipient = stores.settings.read().get(ADMIN_EMAIL);
                if let Some(to) = recipient {
                    notifier.password_changed(&to).await;
                }
            }

            Response::SettingStored
        }
    }
}
