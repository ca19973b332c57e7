use crate::config::EnvConfig;
use crate::db::service::DbService;
use crate::types::error::AppError;
use crate::types::identity::{ADMIN, MANAGER};
use crate::types::invitation::{NewInvitation, RInvite};
use crate::types::response::{ApiResponse, ApiResult};
use crate::utils::gate::authorize;
use crate::utils::mail::{invitation_email, invitation_link, Mailer};
use crate::utils::webutils::Caller;
use actix_web::{post, web};
use std::sync::Arc;
use tracing::{info, warn};

/*
The invitee inherits the sender's role and organization. The row is written
before the email goes out; a failed send leaves it in place and tells the
sender so they can retry.
 */

#[post("/invite")]
pub async fn invite(
    caller: Caller,
    db: web::Data<Arc<DbService>>,
    mailer: web::Data<dyn Mailer>,
    config: web::Data<EnvConfig>,
    body: web::Json<RInvite>,
) -> ApiResult<()> {
    authorize(&caller, &[ADMIN, MANAGER])?;

    let email = body
        .into_inner()
        .email
        .map(|e| e.trim().to_string())
        .filter(|e| !e.is_empty())
        .ok_or_else(|| AppError::Validation("email is required".to_string()))?;

    let (role_id, organization_id, sender_email) =
        match (caller.role_id, caller.organization_id, caller.email.clone()) {
            (Some(r), Some(o), Some(s)) => (r, o, s),
            _ => {
                return Err(AppError::Validation(
                    "Sender role and organization are required".to_string(),
                ))
            }
        };

    let invitation = db
        .create_invitation(NewInvitation {
            email: email.clone(),
            role_id,
            organization_id,
            sender_email,
        })
        .await?;
    info!(invitation_id = invitation.id, organization_id, "invitation issued");

    let link = invitation_link(&config.client_url, &invitation.token);
    if let Err(err) = mailer
        .send(invitation_email(&config.mail.sender, &email, &link))
        .await
    {
        warn!(invitation_id = invitation.id, error = %err, "invitation email not sent");
        return Err(AppError::EmailDispatch(err.to_string()));
    }

    Ok(ApiResponse::Message("Invitation sent successfully".to_string()))
}
