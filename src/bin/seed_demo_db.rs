// ==========================================
// 演示数据库生成工具
// ==========================================
// 用法: seed_demo_db [db_path]
// 内容: 三个航次 (其中两艘船在 SURABAYA 靠港时间重叠), 一个坞修期, 一个已发布航次
// ==========================================

use chrono::{Duration, Local, NaiveDateTime};
use std::error::Error;
use std::fs;
use std::path::Path;

use voyage_planner::app::{get_default_db_path, AppState};

const ACTOR: &str = "seed_demo_db";

/// 航次中的一站: (港口, 相对基准的到港小时, 靠港小时数; None 表示航次终点)
type Stop = (&'static str, i64, Option<i64>);

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    voyage_planner::logging::init();

    let db_path = std::env::args().nth(1).unwrap_or_else(get_default_db_path);
    backup_and_reset_db(&db_path)?;

    let state = AppState::new(db_path.clone())?;
    let base = Local::now()
        .date_naive()
        .and_hms_opt(0, 0, 0)
        .ok_or("无法构造基准时间")?;

    let voyages: [(&str, &str, &[Stop]); 3] = [
        (
            "KM. AWU",
            "01",
            &[
                ("TANJUNG PRIOK", 8, Some(6)),
                ("SURABAYA", 36, Some(8)),
                ("MAKASSAR", 70, None),
            ],
        ),
        (
            "KM. EGON",
            "07",
            &[
                ("SEMARANG", 12, Some(4)),
                ("SURABAYA", 40, Some(6)),
                ("BANJARMASIN", 64, None),
            ],
        ),
        (
            "KM. LAWIT",
            "03",
            &[
                ("PONTIANAK", 20, Some(10)),
                ("TANJUNG PRIOK", 54, Some(5)),
                ("BATAM", 90, None),
            ],
        ),
    ];

    for (ship, voyage, stops) in voyages {
        let text = jadwal_text(base, stops);
        let legs = state
            .jadwal_api
            .import_voyage_text(ship, voyage, None, Some(15.0), &text, ACTOR)?;
        eprintln!("Seeded {} {} ({} legs)", ship, voyage, legs);
    }

    let docking_start = base.date() + Duration::days(1);
    state.docking_api.create(
        "KM. KELUD",
        docking_start,
        docking_start + Duration::days(4),
        "DOCKING TAHUNAN",
        ACTOR,
    )?;

    state.plan_api.publish_voyage("KM. LAWIT", "03", ACTOR)?;

    let preview = state.plan_api.plan_preview().await?;
    eprintln!(
        "Demo database ready: {} ({} days, {} conflicts)",
        db_path,
        preview.day_headers.len(),
        preview.conflicts.len()
    );
    Ok(())
}

/// 生成粘贴格式的 Jadwal 文本
fn jadwal_text(base: NaiveDateTime, stops: &[Stop]) -> String {
    let stamp = |at: NaiveDateTime| at.format("%a %-d-%b-%y %H:%M").to_string();

    stops
        .iter()
        .map(|(port, arrive_h, stay_h)| {
            let eta = base + Duration::hours(*arrive_h);
            match stay_h {
                Some(stay) => format!(
                    "{} 0 - - - {} {} {}",
                    port,
                    stay,
                    stamp(eta),
                    stamp(eta + Duration::hours(*stay))
                ),
                None => format!("{} {}", port, stamp(eta)),
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn backup_and_reset_db(db_path: &str) -> Result<(), Box<dyn Error>> {
    let path = Path::new(db_path);
    if !path.exists() {
        return Ok(());
    }

    let ts = Local::now().format("%Y%m%d_%H%M%S").to_string();
    let backup_path = format!("{}.bak.{}", db_path, ts);
    fs::copy(path, &backup_path)?;
    fs::remove_file(path)?;

    eprintln!("Backed up {} -> {}", db_path, backup_path);
    Ok(())
}
