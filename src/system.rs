// File: ./src/system.rs
use crate::context::SharedContext;
use crate::handlers::reminder::upcoming;
use crate::model::{Clock, ScheduleEntry, StoreData};
use crate::storage::LocalStorage;
use chrono::NaiveDateTime;
use notify_rust::Notification;
use std::collections::HashSet;
use tokio::sync::mpsc;
use tokio::time::{Duration, sleep};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReminderMessage {
    Due {
        id: i64,
        activity: String,
        date: String,
        time: String,
        minutes_left: i64,
    },
}

impl ReminderMessage {
    pub fn describe(&self) -> String {
        match self {
            ReminderMessage::Due {
                activity,
                time,
                minutes_left,
                ..
            } => format!("🔔 {} pukul {} ({} menit lagi)", activity, time, minutes_left),
        }
    }
}

// An edited date or time makes the entry announce again.
fn history_key(entry: &ScheduleEntry) -> String {
    format!("{}:{}:{}", entry.id, entry.date, entry.time)
}

/// Entries inside the settings' lookahead window that have not been announced yet.
pub fn due_reminders<'a>(
    data: &'a StoreData,
    now: NaiveDateTime,
    fired: &HashSet<String>,
) -> Vec<(&'a ScheduleEntry, i64)> {
    if !data.settings.reminder_enabled {
        return Vec::new();
    }
    let window = i64::from(data.settings.default_reminder_minutes);
    upcoming(&data.schedules, now, window)
        .into_iter()
        .filter(|(entry, _)| !fired.contains(&history_key(entry)))
        .collect()
}

/// Spawns the background reminder manager.
/// returns: Sender that forces an immediate re-read of the store.
pub fn spawn_reminder_actor(
    ctx: SharedContext,
    interval: Duration,
    notifications: bool,
    clock: Clock,
    ui_sender: Option<mpsc::Sender<ReminderMessage>>,
) -> mpsc::Sender<()> {
    let (tx, mut rx) = mpsc::channel(10);

    tokio::spawn(async move {
        let mut fired_history: HashSet<String> = HashSet::new();

        loop {
            match LocalStorage::load(ctx.as_ref()) {
                Ok(data) => {
                    let due = due_reminders(&data, clock.now(), &fired_history);
                    for (entry, minutes_left) in due {
                        fired_history.insert(history_key(entry));
                        log::info!(
                            "Reminder for '{}' at {} {} ({} min)",
                            entry.activity,
                            entry.date,
                            entry.time,
                            minutes_left
                        );

                        if let Some(ui_tx) = &ui_sender {
                            let _ = ui_tx
                                .send(ReminderMessage::Due {
                                    id: entry.id,
                                    activity: entry.activity.clone(),
                                    date: entry.date.clone(),
                                    time: entry.time.clone(),
                                    minutes_left,
                                })
                                .await;
                        }

                        if notifications {
                            let summary = entry.activity.clone();
                            let body = format!("{} ({} menit lagi)", entry.time, minutes_left);
                            std::thread::spawn(move || {
                                let _ = Notification::new()
                                    .summary(&summary)
                                    .body(&body)
                                    .appname("Schedbot")
                                    .show();
                            });
                        }
                    }

                    let live: HashSet<String> = data.schedules.iter().map(history_key).collect();
                    fired_history.retain(|k| live.contains(k));
                }
                Err(e) => log::warn!("Reminder check skipped, store unreadable: {:#}", e),
            }

            tokio::select! {
                _ = sleep(interval) => {}
                msg = rx.recv() => {
                    if msg.is_none() {
                        break;
                    }
                }
            }
        }
    });

    tx
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::TestContext;
    use std::sync::Arc;
    use crate::model::Settings;
    use chrono::NaiveDate;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 10, 19)
            .unwrap()
            .and_hms_opt(8, 0, 0)
            .unwrap()
    }

    fn entry(id: i64, activity: &str, time: &str) -> ScheduleEntry {
        ScheduleEntry {
            id,
            activity: activity.to_string(),
            date: "19-10-2026".to_string(),
            time: time.to_string(),
            created: String::new(),
        }
    }

    fn data() -> StoreData {
        StoreData {
            schedules: vec![
                entry(1, "kopi", "08:20"),
                entry(2, "rapat", "09:00"),
                entry(3, "makan", "08:30"),
            ],
            settings: Settings::default(),
        }
    }

    #[test]
    fn uses_the_settings_window() {
        let data = data();
        let due = due_reminders(&data, now(), &HashSet::new());
        let names: Vec<&str> = due.iter().map(|(e, _)| e.activity.as_str()).collect();
        assert_eq!(names, vec!["kopi", "makan"]);
        assert_eq!(due[0].1, 20);
    }

    #[test]
    fn announced_entries_are_skipped_until_rescheduled() {
        let mut data = data();
        let mut fired = HashSet::new();
        fired.insert(history_key(&data.schedules[0]));
        let due = due_reminders(&data, now(), &fired);
        assert_eq!(due.len(), 1);

        data.schedules[0].time = "08:25".to_string();
        assert_eq!(due_reminders(&data, now(), &fired).len(), 2);
    }

    #[test]
    fn disabled_reminders() {
        let mut data = data();
        data.settings.reminder_enabled = false;
        assert!(due_reminders(&data, now(), &HashSet::new()).is_empty());
    }

    #[tokio::test]
    async fn actor_reports_each_entry_once() {
        let ctx = Arc::new(TestContext::new());
        LocalStorage::save(ctx.as_ref(), &data()).unwrap();

        let (ui_tx, mut ui_rx) = mpsc::channel(10);
        let refresh = spawn_reminder_actor(
            ctx.clone(),
            Duration::from_secs(3600),
            false,
            Clock::Fixed(now()),
            Some(ui_tx),
        );

        let first = ui_rx.recv().await.unwrap();
        assert_eq!(first.describe(), "🔔 kopi pukul 08:20 (20 menit lagi)");
        let second = ui_rx.recv().await.unwrap();
        assert!(matches!(second, ReminderMessage::Due { id: 3, .. }));

        refresh.send(()).await.unwrap();
        let quiet = tokio::time::timeout(Duration::from_millis(200), ui_rx.recv()).await;
        assert!(quiet.is_err());
    }
}
