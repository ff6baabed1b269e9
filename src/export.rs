// File: ./src/export.rs
//! CSV, plain-text and JSON backup writers.
//!
//! Files land in the context's export directory (`jadwal_<stamp>.csv`,
//! `jadwal_<stamp>.txt`) or backup directory (`backup_<stamp>.json`).
use crate::context::AppContext;
use crate::model::display::EntryDisplay;
use crate::model::{ScheduleEntry, StoreData};
use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDateTime};
use std::fs;
use std::path::PathBuf;

pub const CSV_HEADER: &str = "Aktivitas,Tanggal,Waktu,Dibuat";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Text,
    Csv,
    Backup,
    /// CSV plus a backup, when no format keyword is given.
    Full,
}

impl ExportFormat {
    pub fn detect(input: &str) -> Self {
        let lower = input.to_lowercase();
        if lower.contains("pdf") || lower.contains("text") {
            ExportFormat::Text
        } else if lower.contains("csv") {
            ExportFormat::Csv
        } else if lower.contains("backup") {
            ExportFormat::Backup
        } else {
            ExportFormat::Full
        }
    }
}

/// `2026-10-19T08-00-00-000`: an ISO timestamp with `:` and `.` made file-name safe.
pub fn file_stamp(now: NaiveDateTime) -> String {
    now.format("%Y-%m-%dT%H:%M:%S%.3f")
        .to_string()
        .replace([':', '.'], "-")
}

fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

// "19/10/2026 08.00.00"; anything that is not RFC 3339 is written unchanged.
fn created_display(created: &str) -> String {
    DateTime::parse_from_rfc3339(created)
        .map(|dt| dt.format("%d/%m/%Y %H.%M.%S").to_string())
        .unwrap_or_else(|_| created.to_string())
}

/// The whole list as CSV, header included, in store order.
pub fn to_csv_string(schedules: &[ScheduleEntry]) -> String {
    let mut out = String::from(CSV_HEADER);
    out.push('\n');
    for s in schedules {
        out.push_str(&format!(
            "{},{},{},{}\n",
            csv_field(&s.activity),
            csv_field(&s.date),
            csv_field(&s.time),
            csv_field(&created_display(&s.created))
        ));
    }
    out
}

pub fn to_text_string(schedules: &[ScheduleEntry], exported_at: NaiveDateTime) -> String {
    let mut sorted: Vec<&ScheduleEntry> = schedules.iter().collect();
    sorted.sort_by(|a, b| a.cmp_chronological(b));

    let mut out = String::from("JADWAL SAYA\n");
    out.push_str(&"=".repeat(50));
    out.push_str("\n\n");
    out.push_str(&format!(
        "Diekspor pada: {}\n\n",
        exported_at.format("%d/%m/%Y %H.%M.%S")
    ));
    for (i, s) in sorted.iter().enumerate() {
        out.push_str(&format!(
            "{}. {}\n   {} - {}\n\n",
            i + 1,
            s.activity,
            s.display_date(),
            s.time
        ));
    }
    out
}

pub fn export_csv(ctx: &dyn AppContext, schedules: &[ScheduleEntry], stamp: &str) -> Result<PathBuf> {
    let path = ctx.get_export_dir()?.join(format!("jadwal_{}.csv", stamp));
    fs::write(&path, to_csv_string(schedules))
        .with_context(|| format!("Failed to write {:?}", path))?;
    Ok(path)
}

pub fn export_text(
    ctx: &dyn AppContext,
    schedules: &[ScheduleEntry],
    stamp: &str,
    now: NaiveDateTime,
) -> Result<PathBuf> {
    let path = ctx.get_export_dir()?.join(format!("jadwal_{}.txt", stamp));
    fs::write(&path, to_text_string(schedules, now))
        .with_context(|| format!("Failed to write {:?}", path))?;
    Ok(path)
}

pub fn create_backup(ctx: &dyn AppContext, data: &StoreData, stamp: &str) -> Result<PathBuf> {
    let path = ctx.get_backup_dir()?.join(format!("backup_{}.json", stamp));
    let json = serde_json::to_string_pretty(data)?;
    fs::write(&path, json).with_context(|| format!("Failed to write {:?}", path))?;
    Ok(path)
}

fn file_name(path: &std::path::Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default()
}

fn csv_line(ctx: &dyn AppContext, data: &StoreData, stamp: &str) -> String {
    match export_csv(ctx, &data.schedules, stamp) {
        Ok(path) => format!("✅ CSV diekspor: {}", file_name(&path)),
        Err(e) => {
            log::error!("CSV export failed: {:#}", e);
            format!("❌ Error export CSV: {}", e)
        }
    }
}

fn backup_line(ctx: &dyn AppContext, data: &StoreData, stamp: &str) -> String {
    match create_backup(ctx, data, stamp) {
        Ok(path) => format!("✅ Backup dibuat: {}", file_name(&path)),
        Err(e) => {
            log::error!("Backup failed: {:#}", e);
            format!("❌ Error backup: {}", e)
        }
    }
}

/// Runs the export the input asks for and describes the result.
pub fn run(ctx: &dyn AppContext, input: &str, data: &StoreData, now: NaiveDateTime) -> String {
    if data.schedules.is_empty() {
        return "📁 Tidak ada jadwal untuk diekspor.".to_string();
    }

    let stamp = file_stamp(now);
    let format = ExportFormat::detect(input);
    log::info!("Exporting {} schedules as {:?}", data.schedules.len(), format);

    match format {
        ExportFormat::Text => match export_text(ctx, &data.schedules, &stamp, now) {
            Ok(path) => format!("✅ File text diekspor: {}", file_name(&path)),
            Err(e) => {
                log::error!("Text export failed: {:#}", e);
                format!("❌ Error export text: {}", e)
            }
        },
        ExportFormat::Csv => csv_line(ctx, data, &stamp),
        ExportFormat::Backup => backup_line(ctx, data, &stamp),
        ExportFormat::Full => format!(
            "📁 **EXPORT LENGKAP:**\n{}\n{}",
            csv_line(ctx, data, &stamp),
            backup_line(ctx, data, &stamp)
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::TestContext;
    use chrono::NaiveDate;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 10, 19)
            .unwrap()
            .and_hms_milli_opt(8, 5, 9, 42)
            .unwrap()
    }

    fn entry(activity: &str, date: &str, time: &str) -> ScheduleEntry {
        ScheduleEntry {
            id: 1,
            activity: activity.to_string(),
            date: date.to_string(),
            time: time.to_string(),
            created: "2026-10-19T08:00:00+07:00".to_string(),
        }
    }

    #[test]
    fn format_keywords() {
        assert_eq!(ExportFormat::detect("export pdf"), ExportFormat::Text);
        assert_eq!(ExportFormat::detect("export text"), ExportFormat::Text);
        assert_eq!(ExportFormat::detect("Export CSV"), ExportFormat::Csv);
        assert_eq!(ExportFormat::detect("backup jadwal"), ExportFormat::Backup);
        assert_eq!(ExportFormat::detect("ekspor"), ExportFormat::Full);
    }

    #[test]
    fn stamp_is_file_name_safe() {
        assert_eq!(file_stamp(now()), "2026-10-19T08-05-09-042");
    }

    #[test]
    fn csv_quotes_only_when_needed() {
        let csv = to_csv_string(&[
            entry("rapat, tim", "19-10-2026", "09:00"),
            entry("kata \"kunci\"", "20-10-2026", "10:00"),
        ]);
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[0], CSV_HEADER);
        assert_eq!(lines[1], "\"rapat, tim\",19-10-2026,09:00,19/10/2026 08.00.00");
        assert_eq!(lines[2], "\"kata \"\"kunci\"\"\",20-10-2026,10:00,19/10/2026 08.00.00");
    }

    #[test]
    fn text_export_is_chronological() {
        let text = to_text_string(
            &[
                entry("makan", "20-10-2026", "12:00"),
                entry("rapat", "19-10-2026", "09:00"),
            ],
            now(),
        );
        assert!(text.starts_with("JADWAL SAYA\n=================================================="));
        let rapat = text.find("1. rapat\n   19 OKT 2026 - 09:00").unwrap();
        let makan = text.find("2. makan\n   20 OKT 2026 - 12:00").unwrap();
        assert!(rapat < makan);
    }

    #[test]
    fn full_export_writes_csv_and_backup() {
        let ctx = TestContext::new();
        let data = StoreData {
            schedules: vec![entry("rapat", "19-10-2026", "09:00")],
            ..StoreData::default()
        };
        let reply = run(&ctx, "export", &data, now());
        assert_eq!(
            reply,
            "📁 **EXPORT LENGKAP:**\n✅ CSV diekspor: jadwal_2026-10-19T08-05-09-042.csv\n✅ Backup dibuat: backup_2026-10-19T08-05-09-042.json"
        );
        let backup = ctx
            .get_backup_dir()
            .unwrap()
            .join("backup_2026-10-19T08-05-09-042.json");
        let restored: StoreData =
            serde_json::from_str(&fs::read_to_string(backup).unwrap()).unwrap();
        assert_eq!(restored, data);
    }

    #[test]
    fn nothing_to_export() {
        let ctx = TestContext::new();
        assert_eq!(
            run(&ctx, "export csv", &StoreData::default(), now()),
            "📁 Tidak ada jadwal untuk diekspor."
        );
    }
}
