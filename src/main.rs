// ==========================================
// JIT 窗口分配系统 - 命令行入口
// ==========================================
// 子命令:
// - assign: 导入窗口计划 + 订单文件, 分配窗口, 预览/导出
// - init-config: 写出默认配置文件
// ==========================================

use std::path::PathBuf;

use anyhow::{anyhow, bail, Context, Result};
use chrono::NaiveDateTime;
use clap::{Parser, Subcommand};

use jit_window_assign::api::{AssignmentApi, AssignmentRequest, AssignmentRun};
use jit_window_assign::config::{default_config_path, ConfigManager, ElapsedCheck};
use jit_window_assign::exporter::AssignmentExporter;
use jit_window_assign::{i18n, logging};

/// --now 支持的时间格式
const NOW_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"];

#[derive(Parser)]
#[command(
    name = "jit-window-assign",
    version,
    about = "Assign JIT calls to vendor delivery windows"
)]
struct Cli {
    /// Emit logs as JSON
    #[arg(long, global = true)]
    json_log: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Assign every order to a delivery window
    Assign {
        /// Vendor window schedule (.xlsx/.xls/.csv)
        #[arg(short, long)]
        schedule: PathBuf,
        /// Order files (.xlsx/.xls/.csv), processed concurrently
        #[arg(short, long, required = true, num_args = 1..)]
        orders: Vec<PathBuf>,
        /// Output file (.csv or .json)
        #[arg(long)]
        output: Option<PathBuf>,
        /// Path to config.json (defaults to the user config directory)
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Mark orders before this instant as out of window ("YYYY-MM-DD HH:MM:SS")
        #[arg(long, conflicts_with = "elapsed_check")]
        now: Option<String>,
        /// Mark orders before the current system time as out of window
        #[arg(long)]
        elapsed_check: bool,
        /// Label language: en, es, zh-CN
        #[arg(long)]
        locale: Option<String>,
        /// Number of result rows to print
        #[arg(long)]
        preview: Option<usize>,
    },
    /// Write the default configuration file
    InitConfig {
        /// Target path (defaults to the user config directory)
        #[arg(long)]
        path: Option<PathBuf>,
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_with_default("info", cli.json_log);

    tracing::info!(version = jit_window_assign::VERSION, "{}", jit_window_assign::APP_NAME);

    match cli.command {
        Commands::Assign {
            schedule,
            orders,
            output,
            config,
            now,
            elapsed_check,
            locale,
            preview,
        } => {
            let mut manager = ConfigManager::load_or_default(config.as_deref())?;
            if let Some(locale) = locale {
                if !i18n::is_supported(&locale) {
                    bail!(
                        "unsupported locale '{locale}', expected one of {:?}",
                        i18n::SUPPORTED_LOCALES
                    );
                }
                manager.config_mut().locale = locale;
            }
            i18n::set_locale(&manager.config().locale);

            let elapsed_override = match (now, elapsed_check) {
                (Some(raw), _) => Some(ElapsedCheck::Fixed(parse_now(&raw)?)),
                (None, true) => Some(ElapsedCheck::SystemClock),
                (None, false) => None,
            };
            let preview_rows = preview.unwrap_or(manager.config().preview_rows);

            let api = AssignmentApi::new(manager.config().clone());
            let run = api
                .run(AssignmentRequest {
                    schedule,
                    orders,
                    output,
                    elapsed_check: elapsed_override,
                })
                .await?;

            print_preview(&run, &manager.config().locale, preview_rows);
        }
        Commands::InitConfig { path, force } => {
            let path = match path {
                Some(path) => path,
                None => default_config_path()?,
            };
            if path.exists() && !force {
                bail!("{} already exists (use --force to overwrite)", path.display());
            }
            ConfigManager::with_defaults()
                .save(&path)
                .with_context(|| format!("writing {}", path.display()))?;
            println!("{}", path.display());
        }
    }

    Ok(())
}

fn parse_now(raw: &str) -> Result<NaiveDateTime> {
    NOW_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw.trim(), fmt).ok())
        .ok_or_else(|| anyhow!("invalid --now '{raw}', expected YYYY-MM-DD HH:MM:SS"))
}

fn print_preview(run: &AssignmentRun, locale: &str, rows: usize) {
    let exporter = AssignmentExporter::new(locale);
    let records = run.records();

    println!("{}", exporter.headers().join("\t"));
    for record in records.iter().take(rows) {
        println!("{}", exporter.display_row(record).cells().join("\t"));
    }
    println!(
        "-- {} orders: {} matched, {} no date, {} out of window",
        run.summary.total, run.summary.matched, run.summary.no_date, run.summary.out_of_window
    );
    for (path, reason) in &run.failed_files {
        eprintln!("skipped {}: {}", path.display(), reason);
    }
}
