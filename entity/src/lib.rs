pub mod invitation;
pub mod organization;
pub mod role;
pub mod user;

/*
 Users arrive from the identity provider webhook with no role and no organization.
 Onboarding either assigns a role only, or assigns a role and creates a brand new organization.
 Everyone else joins an existing organization through an invitation:
 an admin or manager invites an email, the invitee follows the emailed link,
 and accepting copies the invitation's role + organization onto the account holding that email.
 */
