use crate::db::store::WaterTestStore;
use crate::models::alert::{NewGlobalAlert, NewLeaderAlert};
use crate::models::water_test::{Quality, WaterTest};
use crate::notify::templates;
use crate::notify::{is_valid_e164, MessageSender};
use std::sync::Arc;
use tracing::{error, info, warn};
use uuid::Uuid;

/// What a fan-out did, for logging and tests.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct FanOutReport {
    pub leader_alerts: usize,
    pub global_alert: Option<Uuid>,
    /// Recipients with a deliverable number.
    pub recipients: usize,
    /// Recipients skipped for a missing or malformed number.
    pub skipped: usize,
    pub failed_sends: usize,
}

/// Raises in-app alerts and texts recipients for a freshly recorded test.
///
/// Medium tests alert every leader; high tests raise one global alert and
/// text every user. Good tests do nothing. Sends go out one recipient at a
/// time on every channel in `senders`; a failed send is logged and the next
/// one is attempted. A store failure ends the fan-out but never undoes the
/// recorded test.
pub async fn dispatch_alerts(
    store: &dyn WaterTestStore,
    senders: &[Arc<dyn MessageSender>],
    test: &WaterTest,
) -> FanOutReport {
    let mut report = FanOutReport::default();

    let result = match test.quality {
        Quality::Good => return report,
        Quality::Medium => alert_leaders(store, senders, test, &mut report).await,
        Quality::High => alert_everyone(store, senders, test, &mut report).await,
    };

    if let Err(e) = result {
        error!(
            "Alert fan-out for {} water test {} stopped early: {:#}",
            test.quality, test.id, e
        );
    }

    info!(
        water_test_id = %test.id,
        quality = %test.quality,
        leader_alerts = report.leader_alerts,
        global_alert = ?report.global_alert,
        recipients = report.recipients,
        skipped = report.skipped,
        failed_sends = report.failed_sends,
        "Alert fan-out finished"
    );
    report
}

async fn alert_leaders(
    store: &dyn WaterTestStore,
    senders: &[Arc<dyn MessageSender>],
    test: &WaterTest,
    report: &mut FanOutReport,
) -> anyhow::Result<()> {
    let leaders = store.leader_contacts().await?;
    if leaders.is_empty() {
        info!("No leaders to alert for water test {}", test.id);
        return Ok(());
    }

    let message = templates::leader_alert_message(test);
    let alerts: Vec<NewLeaderAlert> = leaders
        .iter()
        .map(|leader| NewLeaderAlert {
            leader_id: leader.id,
            message: message.clone(),
            water_test_id: test.id,
        })
        .collect();
    report.leader_alerts = store.insert_leader_alerts(&alerts).await?.len();

    let text = templates::medium_risk_text(test);
    for leader in &leaders {
        deliver(senders, leader.number.as_deref(), &text, report).await;
    }
    Ok(())
}

async fn alert_everyone(
    store: &dyn WaterTestStore,
    senders: &[Arc<dyn MessageSender>],
    test: &WaterTest,
    report: &mut FanOutReport,
) -> anyhow::Result<()> {
    let alert = store
        .insert_global_alert(&NewGlobalAlert {
            message: templates::global_alert_message(test),
            water_test_id: test.id,
        })
        .await?;
    report.global_alert = Some(alert.id);

    let numbers = store.all_user_numbers().await?;
    let text = templates::high_risk_text(test);
    for number in &numbers {
        deliver(senders, number.as_deref(), &text, report).await;
    }
    Ok(())
}

async fn deliver(
    senders: &[Arc<dyn MessageSender>],
    number: Option<&str>,
    text: &str,
    report: &mut FanOutReport,
) {
    let number = match number {
        Some(n) if is_valid_e164(n) => n,
        Some(n) => {
            warn!("Skipping recipient with invalid phone number '{}'", n);
            report.skipped += 1;
            return;
        }
        None => {
            warn!("Skipping recipient without a phone number");
            report.skipped += 1;
            return;
        }
    };

    report.recipients += 1;
    for sender in senders {
        if let Err(e) = sender.send(number, text).await {
            warn!(
                channel = %sender.channel(),
                "Failed to deliver alert to {}: {:#}",
                number,
                e
            );
            report.failed_sends += 1;
        }
    }
}
