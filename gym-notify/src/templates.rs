use chrono::NaiveDate;
use gym_core::{Client, EmailMessage};

use crate::money::format_inr;

/// Renders the gym's transactional emails
#[derive(Debug, Clone)]
pub struct EmailTemplates {
    gym_name: String,
}

impl EmailTemplates {
    pub fn new(gym_name: impl Into<String>) -> Self {
        Self {
            gym_name: gym_name.into(),
        }
    }

    pub fn gym_name(&self) -> &str {
        &self.gym_name
    }

    /// Sent after registration. `total` is what the client owes for the membership.
    pub fn welcome(&self, client: &Client, total: i64) -> EmailMessage {
        let body = format!(
            r#"<p>Welcome to the {gym} family! We're thrilled to have you join us on your fitness journey.</p>
<p>Your membership is now active and you can start working out immediately.</p>
<div style="background: #f3f4f6; padding: 20px; border-radius: 8px; margin: 20px 0;">
  <h3 style="margin-top: 0;">Membership Details:</h3>
  <ul style="line-height: 1.8; list-style: none; padding: 0;">
    <li><strong>Client ID:</strong> {id}</li>
    <li><strong>Time Slot:</strong> {slot}</li>
    <li><strong>Start Date:</strong> {start}</li>
    <li><strong>End Date:</strong> {end}</li>
    <li><strong>Amount:</strong> {amount}</li>
  </ul>
</div>
<p>Remember, consistency is key! We can't wait to see you achieve your fitness goals.</p>"#,
            gym = escape_html(&self.gym_name),
            id = escape_html(&client.client_id),
            slot = client.slot.display_name(),
            start = display_date(client.start_date),
            end = display_date(client.end_date),
            amount = format_inr(total),
        );

        EmailMessage {
            to: client.email.clone(),
            subject: format!("Welcome to {}!", self.gym_name),
            html: self.layout(&format!("Welcome to {}!", self.gym_name), &client.name, &body, "Best regards"),
        }
    }

    pub fn birthday(&self, client: &Client) -> EmailMessage {
        let body = format!(
            r#"<p>Happy Birthday!</p>
<p>On this special day, the entire {gym} family wishes you health, happiness and strength!</p>
<p>As a birthday treat, enjoy a special workout session on us. Visit the front desk to claim your birthday reward.</p>
<p>Keep crushing your goals!</p>"#,
            gym = escape_html(&self.gym_name),
        );

        EmailMessage {
            to: client.email.clone(),
            subject: format!("Happy Birthday {}!", client.name),
            html: self.layout("Happy Birthday!", &client.name, &body, "Warm wishes"),
        }
    }

    pub fn payment_reminder(&self, client: &Client, total: i64, paid: i64) -> EmailMessage {
        let body = format!(
            r#"<p>This is a friendly reminder regarding your membership payment.</p>
<ul style="line-height: 1.8;">
  <li>Total Amount (After Discount): {total}</li>
  <li>Paid: {paid}</li>
  <li>Remaining: {remaining}</li>
</ul>
<p>Please complete your payment at your earliest convenience to continue enjoying uninterrupted access to our facilities.</p>"#,
            total = format_inr(total),
            paid = format_inr(paid),
            remaining = format_inr(total - paid),
        );

        EmailMessage {
            to: client.email.clone(),
            subject: format!("Payment Reminder - {}", self.gym_name),
            html: self.layout(&self.gym_name, &client.name, &body, "Thank you"),
        }
    }

    /// Free-form message; `body` is plain text, one paragraph per blank-line block.
    pub fn custom(&self, client: &Client, subject: Option<&str>, body: &str) -> EmailMessage {
        let paragraphs: String = body
            .split("\n\n")
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(|p| format!("<p>{}</p>\n", escape_html(p).replace('\n', "<br/>")))
            .collect();

        let subject = match subject.map(str::trim) {
            Some(s) if !s.is_empty() => s.to_string(),
            _ => format!("Message from {}", self.gym_name),
        };

        EmailMessage {
            to: client.email.clone(),
            subject,
            html: self.layout(&self.gym_name, &client.name, &paragraphs, "Best regards"),
        }
    }

    fn layout(&self, heading: &str, recipient: &str, body: &str, sign_off: &str) -> String {
        let gym = escape_html(&self.gym_name);
        format!(
            r#"<div style="font-family: Arial, sans-serif; padding: 20px; max-width: 600px; margin: 0 auto;">
<div style="background: linear-gradient(135deg, #8b5cf6, #f59e0b); padding: 20px; border-radius: 10px 10px 0 0; text-align: center;">
  <h1 style="color: white; margin: 0;">{heading}</h1>
</div>
<div style="background: #f9fafb; padding: 30px; border-radius: 0 0 10px 10px; border: 1px solid #e5e7eb; border-top: none; color: #374151; line-height: 1.6;">
<h2>Dear {recipient},</h2>
{body}
<p style="margin-top: 30px;">{sign_off},<br/><strong>{gym} Team</strong></p>
</div>
</div>"#,
            heading = escape_html(heading),
            recipient = escape_html(recipient),
        )
    }
}

fn display_date(date: NaiveDate) -> String {
    date.format("%d %b %Y").to_string()
}

pub(crate) fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
