//! Built-in demonstration backlog.

use zen_core::types::{Item, Priority, SourceCategory};

use crate::error::ProviderError;
use crate::provider::{ItemProvider, ProviderBatch};

const APPROVED_TODAY: u64 = 14;
const DISMISSED_TODAY: u64 = 7;

/// Serves a fixed set of eight sample items.
#[derive(Debug, Default, Clone, Copy)]
pub struct DemoProvider;

impl DemoProvider {
    pub fn new() -> Self {
        Self
    }
}

fn priority(value: u8) -> Result<Priority, ProviderError> {
    Priority::new(value).map_err(ProviderError::Parse)
}

impl ItemProvider for DemoProvider {
    fn name(&self) -> &str {
        "demo"
    }

    fn fetch(&self) -> Result<ProviderBatch, ProviderError> {
        let items = vec![
            Item::new(
                "1",
                SourceCategory::Email,
                "Re: Q1 Partnership Proposal",
                "Michael Chen from TechVentures wants to schedule a call about the partnership \
                 we discussed at the conference. He mentioned potential investment opportunities.",
                priority(2)?,
            )
            .with_sender("Michael Chen")
            .with_proposed_action("Reply with availability for next week. I drafted a response.")
            .with_time_label("2h ago"),
            Item::new(
                "2",
                SourceCategory::System,
                "Approve Sysco Invoice?",
                "Invoice from Sysco for $2,340.00 for Real Provisions. Amount matches expected \
                 monthly order.",
                priority(2)?,
            )
            .with_proposed_action(
                "Approve payment - this is a recurring vendor with correct amount.",
            )
            .with_time_label("Just now"),
            Item::new(
                "3",
                SourceCategory::Chat,
                "New PR needs review",
                "Sarah pushed the authentication refactor. 847 lines changed across 12 files. \
                 Tests are passing.",
                priority(3)?,
            )
            .with_sender("Sarah (Engineering)")
            .with_proposed_action("Schedule 30 min code review block tomorrow morning.")
            .with_time_label("45m ago"),
            Item::new(
                "4",
                SourceCategory::Calendar,
                "Reminder: Dentist appointment tomorrow",
                "Dr. Williams at 10:00 AM. Address: 1234 Medical Center Dr. Expected duration: \
                 1 hour for cleaning.",
                priority(3)?,
            )
            .with_proposed_action("I've blocked your calendar and set a reminder for 9:15 AM.")
            .with_time_label("Tomorrow"),
            Item::new(
                "5",
                SourceCategory::Task,
                "Weekly report overdue",
                "The investor update email was due yesterday. I have a draft ready based on \
                 last week's metrics.",
                priority(1)?,
            )
            .with_proposed_action("Send the draft I prepared, or let me know what to change.")
            .with_time_label("Overdue"),
            Item::new(
                "6",
                SourceCategory::Email,
                "Newsletter: AI Weekly Digest",
                "This week in AI: GPT-5 rumors, new open source models, and Apple's ML \
                 announcements. Low priority reading material.",
                priority(5)?,
            )
            .with_sender("AI Weekly")
            .with_proposed_action("Archive - I'll summarize if you want to catch up later.")
            .with_time_label("6h ago"),
            Item::new(
                "7",
                SourceCategory::System,
                "Danni's birthday in 2 weeks",
                "Based on your calendar, Danni's birthday is coming up on February 12th. Last \
                 year you took her to that sushi place downtown.",
                priority(3)?,
            )
            .with_proposed_action(
                "Would you like me to research restaurant options and make a reservation?",
            )
            .with_time_label("Heads up"),
            Item::new(
                "8",
                SourceCategory::Chat,
                "Team lunch poll results",
                "The team voted: Thai food won with 8 votes. Italian came second with 5. \
                 Friday at noon works for everyone.",
                priority(4)?,
            )
            .with_sender("Team Social")
            .with_proposed_action(
                "Order from Siam Garden for Friday pickup? They have the best Pad Thai.",
            )
            .with_time_label("3h ago"),
        ];

        Ok(ProviderBatch {
            approved_today: APPROVED_TODAY,
            dismissed_today: DISMISSED_TODAY,
            items,
        })
    }
}
