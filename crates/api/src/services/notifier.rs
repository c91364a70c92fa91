//! Fire-and-forget notification dispatcher.
//!
//! Notifications never block or fail the operation that triggered them:
//! `dispatch` spawns a task that sends the email and logs any failure.

use domain::models::{Space, Task, UserProfile};
use tracing::{debug, warn};

use super::email::{EmailMessage, EmailService};

/// Dispatches notification emails as detached side effects.
#[derive(Clone)]
pub struct Notifier {
    email: EmailService,
}

impl Notifier {
    pub fn new(email: EmailService) -> Self {
        Self { email }
    }

    /// Send a message without waiting for the outcome. Failures are logged
    /// with the subject for correlation.
    pub fn dispatch(&self, message: EmailMessage) {
        let email = self.email.clone();
        tokio::spawn(async move {
            let to = message.to.clone();
            let subject = message.subject.clone();
            if let Err(e) = email.send(message).await {
                warn!(
                    to = %to,
                    subject = %subject,
                    error = %e,
                    "Notification email failed"
                );
            } else {
                debug!(to = %to, subject = %subject, "Notification dispatched");
            }
        });
    }

    /// Welcome email after joining a space.
    pub fn space_welcome(&self, member: &UserProfile, space: &Space) {
        self.dispatch(build_welcome_message(member, space));
    }

    /// Assignment email when a space task is assigned to a member.
    pub fn task_assigned(
        &self,
        assignee: &UserProfile,
        assigner: &UserProfile,
        space: &Space,
        task: &Task,
    ) {
        self.dispatch(build_assignment_message(assignee, assigner, space, task));
    }
}

fn build_welcome_message(member: &UserProfile, space: &Space) -> EmailMessage {
    let body_text = format!(
        r#"Hi {name},

You have joined the study space "{space}". Say hello to your spacemates and
check the task board to see what the group is working on.

Happy studying,
The IskolarSpace Team"#,
        name = member.display_name(),
        space = space.name,
    );

    EmailMessage {
        to: member.email.clone(),
        to_name: Some(member.display_name().to_string()),
        subject: format!("Welcome to {}", space.name),
        body_text,
    }
}

fn build_assignment_message(
    assignee: &UserProfile,
    assigner: &UserProfile,
    space: &Space,
    task: &Task,
) -> EmailMessage {
    let task_label = task.title.as_deref().unwrap_or(&task.content);
    let deadline_line = task
        .deadline
        .map(|d| format!("\nDeadline: {}", d.format("%Y-%m-%d %H:%M UTC")))
        .unwrap_or_default();

    let body_text = format!(
        r#"Hi {name},

{assigner} assigned you a task in "{space}":

    {task}{deadline}

Open the space board to pick it up.

Happy studying,
The IskolarSpace Team"#,
        name = assignee.display_name(),
        assigner = assigner.display_name(),
        space = space.name,
        task = task_label,
        deadline = deadline_line,
    );

    EmailMessage {
        to: assignee.email.clone(),
        to_name: Some(assignee.display_name().to_string()),
        subject: format!("New task in {}", space.name),
        body_text,
    }
}
