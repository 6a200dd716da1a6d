// src/handlers/announcements.rs

use crate::error::AppError;
use crate::models::announcement::Announcement;
use crate::service::client::DataService;
use crate::state::SessionContext;

/// Lists announcements visible to the session, newest first.
///
/// Grade-targeted announcements only reach students of that grade;
/// global ones reach everyone. Admins see everything.
pub async fn list_announcements(
    svc: &dyn DataService,
    ctx: &SessionContext,
) -> Result<Vec<Announcement>, AppError> {
    let mut announcements = svc.fetch_announcements().await.map_err(|e| {
        tracing::error!("Failed to fetch announcements: {:?}", e);
        e
    })?;

    if !ctx.is_admin() {
        announcements.retain(|a| match a.audience_grade {
            Some(grade) => grade == ctx.grade_level,
            None => true,
        });
    }

    announcements.sort_by(|a, b| b.published_at.cmp(&a.published_at));

    Ok(announcements)
}
