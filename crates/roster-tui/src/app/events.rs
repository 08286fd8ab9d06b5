use roster_client::ClientError;
use roster_core::{PageResponse, RecordId, User};

use super::App;
use crate::pager::{Completion, Ticket};

/// Completions delivered to the UI loop by the fetch driver.
#[derive(Debug)]
pub enum AppEvent {
    PageLoaded {
        ticket: Ticket,
        result: Result<PageResponse<User>, ClientError>,
    },
    RecordLoaded {
        id: RecordId,
        result: Result<Option<User>, ClientError>,
    },
}

/// Handle AppEvent routing in a lightweight way. This keeps the UI loop lean.
pub(crate) fn handle_event(app: &mut App, app_event: AppEvent) {
    match app_event {
        AppEvent::PageLoaded { ticket, result } => {
            let outcome = app.pager.complete(ticket, result);
            if outcome == Completion::Applied {
                app.clamp_selection();
            }
            app.driver.prune(&app.pager);
        }
        AppEvent::RecordLoaded { id, result } => {
            app.detail.complete(id, result);
        }
    }
    app.needs_redraw = true;
}
