//! Notifications Workflow - refresh and mark read

use crate::core::{AppCore, AppEvent, NotificationsEvent, OperationOutcome, OperationTracker};
use crate::views::NotificationsState;

/// Ask the server for notifications newer than the newest cached one.
///
/// May run again once the previous refresh has settled; a refresh already in
/// flight makes this return [`OperationOutcome::Skipped`].
pub async fn fetch_notifications(app: &AppCore) -> OperationOutcome {
    let tracker = OperationTracker::new(
        "notifications/fetchNotifications",
        app.notifications_store(),
        NotificationsState::status,
        NotificationsState::in_flight,
        NotificationsEvent::Fetch,
    )
    .restartable();
    let since = app
        .notification_feed()
        .latest_timestamp()
        .map(str::to_string);
    let transport = app.transport().clone();
    let outcome = tracker
        .run(
            || async move { transport.fetch_notifications(since).await },
            |event| app.publish(&AppEvent::Notifications(event.clone())),
        )
        .await;

    if let OperationOutcome::Succeeded = outcome {
        let feed = app.notification_feed();
        tracing::info!(
            cached = feed.notifications().len(),
            unread = feed.unread_count(),
            "notifications refreshed"
        );
    }
    outcome
}

/// Mark every cached notification read. Returns whether anything changed.
pub fn mark_all_read(app: &AppCore) -> bool {
    app.apply(NotificationsEvent::AllRead.into())
}
