// ==========================================
// 船舶航次排期系统 - 命令行主入口
// ==========================================
// 输出: 结果以 JSON 写到 stdout, 日志写到 stderr
// 数据库: --db, 否则 VOYAGE_PLANNER_DB_PATH 或用户数据目录
// ==========================================

use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueHint};
use serde::Serialize;

use voyage_planner::app::{get_default_db_path, AppState};
use voyage_planner::domain::LegFilter;
use voyage_planner::logging;

#[derive(Parser, Debug)]
#[command(name = "voyage-planner", version, about = "PELNI 船舶航次排期系统命令行")]
struct Cli {
    /// 数据库文件路径 (默认: VOYAGE_PLANNER_DB_PATH 或用户数据目录)
    #[arg(long, global = true, value_hint = ValueHint::FilePath)]
    db: Option<PathBuf>,

    /// 操作人, 写入操作日志
    #[arg(long, global = true, env = "VOYAGE_PLANNER_ACTOR", default_value = "cli")]
    actor: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// 计划预览 (草稿 + 冲突)
    Preview,
    /// 公开计划
    Public,
    /// 录入航次计划 (.csv/.xlsx 表格或粘贴文本文件)
    ImportJadwal {
        ship: String,
        voyage: String,
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
        /// 航线标记 (单字符)
        #[arg(long)]
        route: Option<String>,
        /// 航速 (节)
        #[arg(long)]
        speed: Option<f64>,
    },
    /// 录入实际航行记录 (LPK)
    ImportLpk {
        ship: String,
        voyage: String,
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
    },
    /// 计算准点率
    Otp { ship: String, voyage: String },
    /// 航次列表
    Voyages { ship: Option<String> },
    /// 航段列表
    Legs {
        ship: Option<String>,
        #[arg(requires = "ship")]
        voyage: Option<String>,
    },
    /// 删除航次
    DeleteVoyage { ship: String, voyage: String },
    /// 新增坞修期
    DockingAdd {
        ship: String,
        /// 开始日期 YYYY-MM-DD
        #[arg(value_parser = parse_date)]
        start: NaiveDate,
        /// 结束日期 YYYY-MM-DD (含)
        #[arg(value_parser = parse_date)]
        end: NaiveDate,
        /// 说明
        #[arg(required = true, num_args = 1..)]
        label: Vec<String>,
    },
    /// 坞修期列表
    DockingList,
    /// 删除坞修期
    DockingDelete { id: i64 },
    /// 发布航次
    Publish { ship: String, voyage: String },
    /// 撤回已发布航次
    Unpublish { ship: String, voyage: String },
    /// 最近动态
    Activity {
        /// 条数 (默认 20)
        #[arg(value_parser = clap::value_parser!(u32).range(1..))]
        limit: Option<u32>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    logging::init();
    let cli = Cli::parse();

    let db_path = cli
        .db
        .map(|path| path.to_string_lossy().to_string())
        .unwrap_or_else(get_default_db_path);
    tracing::info!(
        "{} v{} 使用数据库: {}",
        voyage_planner::APP_NAME,
        voyage_planner::VERSION,
        db_path
    );
    let state = AppState::new(db_path).map_err(|e| anyhow!(e))?;
    let actor = cli.actor.as_str();

    match cli.command {
        Command::Preview => print_json(&state.plan_api.plan_preview().await?),
        Command::Public => print_json(&state.plan_api.plan_public().await?),

        Command::ImportJadwal {
            ship,
            voyage,
            file,
            route,
            speed,
        } => {
            let route = route.as_deref();
            let count = if is_table_file(&file) {
                state
                    .jadwal_api
                    .import_voyage_file(&ship, &voyage, route, speed, &file, actor)?
            } else {
                let text = read_text(&file)?;
                state
                    .jadwal_api
                    .import_voyage_text(&ship, &voyage, route, speed, &text, actor)?
            };
            print_json(&serde_json::json!({ "imported_legs": count }))
        }

        Command::ImportLpk { ship, voyage, file } => {
            let text = read_text(&file)?;
            print_json(&state.lpk_api.import_text(&ship, &voyage, &text, actor)?)
        }

        Command::Otp { ship, voyage } => {
            print_json(&state.otp_api.calculate(&ship, &voyage).await?)
        }

        Command::Voyages { ship } => print_json(&state.jadwal_api.list_voyages(ship.as_deref())?),
        Command::Legs { ship, voyage } => {
            let filter = LegFilter {
                ship_name: ship,
                voyage_id: voyage,
            };
            print_json(&state.jadwal_api.list_legs(&filter)?)
        }
        Command::DeleteVoyage { ship, voyage } => {
            let rows = state.jadwal_api.delete_voyage(&ship, &voyage, actor)?;
            print_json(&serde_json::json!({ "deleted_legs": rows }))
        }

        Command::DockingAdd {
            ship,
            start,
            end,
            label,
        } => {
            let label = label.join(" ");
            print_json(&state.docking_api.create(&ship, start, end, &label, actor)?)
        }
        Command::DockingList => print_json(&state.docking_api.list()?),
        Command::DockingDelete { id } => {
            state.docking_api.delete(id, actor)?;
            print_json(&serde_json::json!({ "deleted": id }))
        }

        Command::Publish { ship, voyage } => {
            let count = state.plan_api.publish_voyage(&ship, &voyage, actor)?;
            print_json(&serde_json::json!({ "published_legs": count }))
        }
        Command::Unpublish { ship, voyage } => {
            let count = state.plan_api.unpublish_voyage(&ship, &voyage, actor)?;
            print_json(&serde_json::json!({ "removed_legs": count }))
        }

        Command::Activity { limit } => print_json(&state.activity_api.recent(limit)?),
    }
}

fn is_table_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("csv") || ext.eq_ignore_ascii_case("xlsx"))
        .unwrap_or(false)
}

fn read_text(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("无法读取文件: {}", path.display()))
}

fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| format!("日期格式应为 YYYY-MM-DD: {}", raw))
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_import_jadwal_typed_args() {
        let cli = Cli::try_parse_from([
            "voyage-planner", "import-jadwal", "KM. AWU", "01", "jadwal.csv", "--route", "A", "--speed", "15.5",
        ])
        .unwrap();

        match cli.command {
            Command::ImportJadwal { ship, file, route, speed, .. } => {
                assert_eq!(ship, "KM. AWU");
                assert_eq!(file, PathBuf::from("jadwal.csv"));
                assert_eq!(route.as_deref(), Some("A"));
                assert_eq!(speed, Some(15.5));
            }
            other => panic!("Expected ImportJadwal, got {:?}", other),
        }
        assert_eq!(cli.actor, "cli");
    }

    #[test]
    fn test_docking_add_requires_label_and_valid_dates() {
        let cli = Cli::try_parse_from([
            "voyage-planner", "docking-add", "KM. KELUD", "2025-01-02", "2025-01-03", "DOCKING", "TAHUNAN",
        ])
        .unwrap();
        match cli.command {
            Command::DockingAdd { start, label, .. } => {
                assert_eq!(start, NaiveDate::from_ymd_opt(2025, 1, 2).unwrap());
                assert_eq!(label.join(" "), "DOCKING TAHUNAN");
            }
            other => panic!("Expected DockingAdd, got {:?}", other),
        }

        assert!(Cli::try_parse_from(["voyage-planner", "docking-add", "X", "2025-01-01", "2025-01-02"]).is_err());
        assert!(Cli::try_parse_from(["voyage-planner", "docking-add", "X", "1-Jan-25", "2025-01-02", "L"]).is_err());
    }

    #[test]
    fn test_activity_limit_must_be_positive() {
        assert!(Cli::try_parse_from(["voyage-planner", "activity", "0"]).is_err());
        assert!(Cli::try_parse_from(["voyage-planner", "activity", "abc"]).is_err());

        let cli = Cli::try_parse_from(["voyage-planner", "activity", "5"]).unwrap();
        assert!(matches!(cli.command, Command::Activity { limit: Some(5) }));
    }
}
