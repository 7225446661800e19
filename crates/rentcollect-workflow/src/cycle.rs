//! One collection cycle: a reminder to every customer on the roster.

use rentcollect_core::{messages, CollectionCycleResult, Customer};

use crate::context::AppContext;
use crate::dispatch::pace;

/// Fetch the roster and remind every customer on it.
///
/// There is no "already paid" state: every listed customer is reminded on
/// every run. An empty or unreadable roster is a no-op.
pub async fn run_collection_cycle(ctx: &AppContext) -> CollectionCycleResult {
    let started_at = chrono::Local::now();
    tracing::info!(
        started_at = %started_at.format("%d/%m/%Y %H:%M:%S"),
        "cycle: starting collection"
    );

    let customers = ctx.roster.fetch_customers().await;
    if customers.is_empty() {
        tracing::warn!("cycle: no customers to remind");
        return CollectionCycleResult::default();
    }

    let result = remind_customers(ctx, &customers).await;
    tracing::info!(
        attempted = result.attempted,
        succeeded = result.succeeded,
        failed = result.failed,
        "cycle: collection complete"
    );
    result
}

/// Send one reminder per customer, pacing after each delivered message.
///
/// A failed send is counted and the loop moves on.
async fn remind_customers(ctx: &AppContext, customers: &[Customer]) -> CollectionCycleResult {
    let mut result = CollectionCycleResult::default();

    for (idx, customer) in customers.iter().enumerate() {
        let body = messages::reminder(customer, &ctx.pix_key, ctx.due_time);
        let delivered = ctx.dispatcher.send_text(&customer.phone_identity, &body).await;
        if !delivered {
            tracing::warn!(customer = %customer.name, "cycle: reminder not delivered");
        }
        result.record(delivered);

        let is_last = idx + 1 == customers.len();
        if delivered && !is_last {
            pace(ctx.reminder_delay).await;
        }
    }

    result
}
