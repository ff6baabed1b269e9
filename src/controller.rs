// File: src/controller.rs
//! Central entry point for conversations.
//!
//! Every utterance is classified, routed to one handler and answered with plain
//! text. Each call performs its own load -> handle -> save cycle against the
//! store; nothing is cached between calls, so several front ends (the REPL, a
//! chat bridge calling `handle_api`) can share one data directory.
use crate::config::Config;
use crate::context::SharedContext;
use crate::export;
use crate::handlers::{self, Env, Handler, Outcome};
use crate::help;
use crate::intent::{AmbiguousResolution, Intent, classify, resolve_ambiguous};
use crate::model::Clock;
use crate::storage::LocalStorage;
use chrono::Local;
use serde::Serialize;
use std::panic::{AssertUnwindSafe, catch_unwind};

pub const SAVE_FAILED_REPLY: &str = "❌ Gagal menyimpan perubahan jadwal.";
pub const PANIC_REPLY: &str = "❌ Terjadi kesalahan saat memproses pesan. Coba lagi nanti.";

const DELETE_NOT_RECOGNIZED: &str =
    "🤖 Perintah hapus tidak dikenali. Gunakan: \"hapus [kata kunci]\" atau \"hapus semua\".";
const EDIT_NOT_RECOGNIZED: &str =
    "🤖 Perintah edit tidak dikenali. Format: \"Ubah [jadwal lama] jadi [jadwal baru]\".";
const SEARCH_NOT_RECOGNIZED: &str = "🔍 Tidak ditemukan hasil untuk pencarian.";
const ADD_NOT_RECOGNIZED: &str =
    "❌ Format tambah jadwal tidak dikenali. Contoh: \"Jadwalkan nonton malam ini jam 7\"";
const CLARIFY: &str = "🤖 Maksud Anda melihat jadwal atau menambahkan jadwal? Contoh: \"Lihat jadwal hari ini\" atau \"Jadwalkan makan jam 7\".";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse {
    pub status: String,
    pub message: String,
    pub timestamp: String,
    pub user_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Health {
    pub status: String,
    pub total_schedules: usize,
    pub store_reachable: bool,
    pub data_file_exists: bool,
    pub timestamp: String,
}

#[derive(Clone)]
pub struct ScheduleController {
    pub ctx: SharedContext,
    pub config: Config,
    pub clock: Clock,
}

impl ScheduleController {
    pub fn new(ctx: SharedContext, config: Config) -> Self {
        Self {
            ctx,
            config,
            clock: Clock::System,
        }
    }

    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    fn env(&self) -> Env {
        Env::new(&self.config, self.clock)
    }

    /// Answers one utterance. Never panics; internal failures become a
    /// generic apology.
    pub fn handle(&self, input: &str) -> String {
        match catch_unwind(AssertUnwindSafe(|| self.process(input))) {
            Ok(reply) => reply,
            Err(_) => {
                log::error!("Panic while processing {:?}", input);
                PANIC_REPLY.to_string()
            }
        }
    }

    /// `handle` wrapped in an envelope for chat bridges.
    pub fn handle_api(&self, input: &str, user_id: Option<&str>) -> ApiResponse {
        ApiResponse {
            status: "success".to_string(),
            message: self.handle(input),
            timestamp: Local::now().to_rfc3339(),
            user_id: user_id.map(str::to_string),
        }
    }

    pub fn health(&self) -> Health {
        let timestamp = Local::now().to_rfc3339();
        let data_file_exists = self
            .ctx
            .get_data_file_path()
            .map(|p| p.exists())
            .unwrap_or(false);
        match LocalStorage::load(self.ctx.as_ref()) {
            Ok(data) => Health {
                status: "healthy".to_string(),
                total_schedules: data.schedules.len(),
                store_reachable: true,
                data_file_exists,
                timestamp,
            },
            Err(e) => {
                log::warn!("Health check could not read the store: {:#}", e);
                Health {
                    status: "error".to_string(),
                    total_schedules: 0,
                    store_reachable: false,
                    data_file_exists,
                    timestamp,
                }
            }
        }
    }

    fn process(&self, input: &str) -> String {
        let intent = classify(input);
        log::debug!("Classified {:?} as {}", input, intent);

        match intent {
            Intent::Help => help::render_help(),
            Intent::Stats => self.run(handlers::stats::handle, input, ""),
            Intent::Export => {
                let data = LocalStorage::load_or_empty(self.ctx.as_ref());
                export::run(self.ctx.as_ref(), input, &data, self.clock.now())
            }
            Intent::Reminder => self.run(handlers::reminder::handle, input, ""),
            Intent::View => self.run(handlers::view::handle, input, ""),
            Intent::Delete => self.run(handlers::delete::handle, input, DELETE_NOT_RECOGNIZED),
            Intent::Edit => self.run(handlers::edit::handle, input, EDIT_NOT_RECOGNIZED),
            Intent::Search => self.run(handlers::search::handle, input, SEARCH_NOT_RECOGNIZED),
            Intent::Add => self.run(handlers::add::handle, input, ADD_NOT_RECOGNIZED),
            Intent::Ambiguous => match resolve_ambiguous(input) {
                AmbiguousResolution::Stats => self.run(handlers::stats::handle, input, ""),
                AmbiguousResolution::View => self.run(handlers::view::handle, input, ""),
                AmbiguousResolution::Clarify => CLARIFY.to_string(),
            },
            Intent::Unknown => format!(
                "🤖 Maaf, saya tidak mengerti \"{}\". Ketik \"bantuan\" untuk melihat perintah yang tersedia.",
                input.trim()
            ),
        }
    }

    /// Load, run one handler, and persist its result when it changed the list.
    fn run(&self, handler: Handler, input: &str, not_recognized: &str) -> String {
        let ctx = self.ctx.as_ref();
        let mut data = LocalStorage::load_or_empty(ctx);

        match handler(input.trim(), &data.schedules, &self.env()) {
            Outcome::NoMatch => not_recognized.to_string(),
            Outcome::Handled(reply) => reply,
            Outcome::Mutated { reply, schedules } => {
                data.schedules = schedules;
                match LocalStorage::save(ctx, &data) {
                    Ok(()) => reply,
                    Err(e) => {
                        log::error!("Error saving schedules: {:#}", e);
                        SAVE_FAILED_REPLY.to_string()
                    }
                }
            }
        }
    }
}
