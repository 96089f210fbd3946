// SPDX-FileCopyrightText: 2026 Finbell Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Reminder email rendering.
//!
//! Each reminder kind gets its own subject line and urgency copy around a
//! shared layout: a branded gradient header, the bill facts, and an
//! automated-mail footer. Every email is rendered as HTML plus a plain
//! text alternative.

use chrono::NaiveDate;
use finbell_config::model::{NotifierConfig, ServiceConfig};
use finbell_core::types::{Bill, NotificationKind, RenderedEmail};

use crate::classification::Classification;

/// Renders reminder emails from bills and their classifications.
pub struct Renderer {
    app_name: String,
    currency_symbol: String,
}

impl Renderer {
    pub fn new(service: &ServiceConfig, notifier: &NotifierConfig) -> Self {
        Self {
            app_name: service.display_name.clone(),
            currency_symbol: notifier.currency_symbol.clone(),
        }
    }

    /// Render the reminder email for one bill.
    pub fn render(&self, bill: &Bill, classification: &Classification) -> RenderedEmail {
        let name = bill.name.as_str();
        let amount = self.format_amount(bill.amount_cents);
        let due = format_date(bill.due_on);
        let days = classification.days_overdue;

        let (subject, headline, urgency, advice) = match classification.kind {
            NotificationKind::TwoDaysBefore => (
                format!("Reminder: \"{name}\" is due in 2 days"),
                "Your bill is almost due!".to_string(),
                "Only 2 days left until the due date!".to_string(),
                Some("Don't forget to make the payment.".to_string()),
            ),
            NotificationKind::OneDayBefore => (
                format!("Urgent: \"{name}\" is due tomorrow"),
                "Your bill is due tomorrow!".to_string(),
                "Due tomorrow! Don't forget to pay.".to_string(),
                None,
            ),
            NotificationKind::DueToday => (
                format!("Due today: \"{name}\""),
                "Your bill is due today!".to_string(),
                "Due today! Pay now to avoid interest charges.".to_string(),
                None,
            ),
            NotificationKind::Overdue => (
                format!("Overdue: \"{name}\" is {} past due", days_phrase(days)),
                "Your bill is overdue!".to_string(),
                format!("Overdue by {}!", days_phrase(days)),
                Some("Pay as soon as possible to avoid interest and late fees.".to_string()),
            ),
        };

        // Overdue emails label the date as already missed.
        let date_label = match classification.kind {
            NotificationKind::Overdue => "Was due on:",
            _ => "Due date:",
        };

        let html = self.render_html(
            name,
            &amount,
            date_label,
            &due,
            &headline,
            &urgency,
            advice.as_deref(),
        );
        let text = self.render_text(
            name,
            &amount,
            date_label,
            &due,
            &headline,
            &urgency,
            advice.as_deref(),
        );

        RenderedEmail { subject, html, text }
    }

    #[allow(clippy::too_many_arguments)]
    fn render_html(
        &self,
        name: &str,
        amount: &str,
        date_label: &str,
        due: &str,
        headline: &str,
        urgency: &str,
        advice: Option<&str>,
    ) -> String {
        let app_name = escape_html(&self.app_name);
        let name = escape_html(name);
        let advice_html = advice
            .map(|a| format!("<p>{a}</p>\n        "))
            .unwrap_or_default();

        format!(
            r#"<div style="font-family: Arial, sans-serif; max-width: 600px; margin: 0 auto; padding: 20px;">
      <div style="background: linear-gradient(135deg, #3b82f6, #6366f1); padding: 20px; border-radius: 10px 10px 0 0; text-align: center;">
        <h1 style="color: white; margin: 0;">{app_name}</h1>
      </div>
      <div style="background: #f8fafc; padding: 30px; border-radius: 0 0 10px 10px; border: 1px solid #e2e8f0;">
        <h2>{headline}</h2>
        <p><strong>Bill:</strong> {name}</p>
        <p><strong>Amount:</strong> {amount}</p>
        <p><strong>{date_label}</strong> {due}</p>
        <p><strong>{urgency}</strong></p>
        {advice_html}<hr style="margin: 20px 0; border: none; border-top: 1px solid #e2e8f0;">
        <p style="color: #64748b; font-size: 14px; text-align: center;">
          This email was sent automatically by {app_name}.
        </p>
      </div>
    </div>"#
        )
    }

    #[allow(clippy::too_many_arguments)]
    fn render_text(
        &self,
        name: &str,
        amount: &str,
        date_label: &str,
        due: &str,
        headline: &str,
        urgency: &str,
        advice: Option<&str>,
    ) -> String {
        let mut text = format!(
            "{headline}\n\nBill: {name}\nAmount: {amount}\n{date_label} {due}\n\n{urgency}\n"
        );
        if let Some(advice) = advice {
            text.push_str(advice);
            text.push('\n');
        }
        text.push_str(&format!(
            "\nThis email was sent automatically by {}.\n",
            self.app_name
        ));
        text
    }

    /// Format minor units as a currency string, e.g. `145000` -> `$1,450.00`.
    fn format_amount(&self, cents: i64) -> String {
        let sign = if cents < 0 { "-" } else { "" };
        let abs = cents.unsigned_abs();
        let whole = (abs / 100).to_string();
        let frac = abs % 100;

        let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
        for (i, c) in whole.chars().enumerate() {
            if i > 0 && (whole.len() - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(c);
        }

        format!("{sign}{}{grouped}.{frac:02}", self.currency_symbol)
    }
}

fn format_date(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

fn days_phrase(n: i64) -> String {
    if n == 1 {
        "1 day".to_string()
    } else {
        format!("{n} days")
    }
}

/// Minimal HTML escaping for user-controlled strings.
fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
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
