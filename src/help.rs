// File: ./src/help.rs
//! Help sections shown for "bantuan" / "help".
//!
//! Kept as data so the REPL banner and the chat reply render from one table.

#[derive(Clone, Debug)]
pub struct HelpItem {
    pub keys: String,
    pub example: String,
}

#[derive(Clone, Debug)]
pub struct HelpSection {
    pub title: String,
    pub items: Vec<HelpItem>,
}

fn item(keys: &str, example: &str) -> HelpItem {
    HelpItem {
        keys: keys.to_string(),
        example: example.to_string(),
    }
}

pub fn get_help_sections() -> Vec<HelpSection> {
    vec![
        HelpSection {
            title: "📝 **MENGELOLA JADWAL:**".to_string(),
            items: vec![
                item("Tambah", "\"Jadwalkan meeting besok jam 2\""),
                item("Lihat", "\"Lihat jadwal hari ini\" / \"Jadwal besok\""),
                item("Edit", "\"Ubah meeting jadi jam 3\""),
                item("Hapus", "\"Hapus meeting\" / \"Hapus semua\""),
            ],
        },
        HelpSection {
            title: "🔍 **PENCARIAN & REMINDER:**".to_string(),
            items: vec![
                item("Cari", "\"Cari meeting\" / \"Kapan ada rapat\""),
                item("Reminder", "\"Reminder 2 jam\" / \"Ingatkan 1 hari\""),
            ],
        },
        HelpSection {
            title: "📊 **ANALISIS & EXPORT:**".to_string(),
            items: vec![
                item("Statistik", "\"Berapa jadwal\" / \"Statistik\""),
                item("Export", "\"Export csv\" / \"Export text\""),
                item("Backup", "\"Backup jadwal\""),
            ],
        },
        HelpSection {
            title: "❓ **BANTUAN:**".to_string(),
            items: vec![item("Bantuan", "\"help\" / \"bantuan\" / \"perintah\"")],
        },
    ]
}

const TIPS: [&str; 3] = [
    "Gunakan bahasa natural seperti berbicara dengan asisten",
    "Sebutkan waktu dengan jelas: \"jam 2 siang\", \"besok pagi\"",
    "Gunakan kata kunci spesifik untuk edit/hapus: \"hapus makan 08:00\"",
];

pub fn render_help() -> String {
    let mut out = String::from("🤖 **SCHEDBOT - Bantuan Perintah:**\n");
    for section in get_help_sections() {
        out.push('\n');
        out.push_str(&section.title);
        out.push('\n');
        for item in &section.items {
            out.push_str(&format!("• {}: {}\n", item.keys, item.example));
        }
    }
    out.push_str("\n💡 **Tips:**");
    for tip in TIPS {
        out.push_str("\n• ");
        out.push_str(tip);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::intent::{Intent, classify};

    #[test]
    fn every_example_is_understood() {
        // Quoted examples must classify as something other than unknown.
        for section in get_help_sections() {
            for item in section.items {
                for example in item.example.split(" / ") {
                    let text = example.trim_matches('"');
                    assert_ne!(classify(text), Intent::Unknown, "{}", text);
                }
            }
        }
    }

    #[test]
    fn renders_all_sections() {
        let text = render_help();
        assert!(text.starts_with("🤖 **SCHEDBOT - Bantuan Perintah:**"));
        assert!(text.contains("📊 **ANALISIS & EXPORT:**"));
        assert!(text.contains("• Backup: \"Backup jadwal\""));
        assert!(text.ends_with("\"hapus makan 08:00\""));
    }
}
