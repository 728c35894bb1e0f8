// ==========================================
// Jadwal 文件导入集成测试
// ==========================================


use std::io::Write;

use tempfile::Builder;
use test_helpers::{create_test_state, ts};
use voyage_planner::api::ApiError;
use voyage_planner::domain::LegFilter;

fn csv_file(content: &str) -> tempfile::NamedTempFile {
    let mut file = Builder::new().suffix(".csv").tempfile().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn test_import_csv_schedule() {
    let (_dir, state) = create_test_state().unwrap();
    let file = csv_file(
        "Pelabuhan,ETA,ETD,Jarak,Pasang Surut,Jam Labuh\n\
         TANJUNG PRIOK,29-Dec-24 08:00,29-Dec-24 14:00,0,-,6\n\
         SURABAYA,30-Dec-24 11:00,N/A,398,(1.5),\n",
    );

    let count = state
        .jadwal_api
        .import_voyage_file("KM. AWU", "01", Some("B"), Some(14.5), file.path(), "planner")
        .unwrap();
    assert_eq!(count, 2);

    let legs = state
        .jadwal_api
        .list_legs(&LegFilter::voyage("KM. AWU", "01"))
        .unwrap();
    assert_eq!(legs[0].departure, Some(ts("2024-12-29 14:00")));
    assert_eq!(legs[0].berth_hours, Some(6.0));
    assert_eq!(legs[1].departure, None);
    assert_eq!(legs[1].tide_factor, Some(-1.5));
    assert_eq!(legs[1].route_tag.as_deref(), Some("B"));
    assert_eq!(legs[1].speed_knots, Some(14.5));
}

#[test]
fn test_import_csv_missing_column_is_invalid_input() {
    let (_dir, state) = create_test_state().unwrap();
    let file = csv_file("Pelabuhan,ETA\nSURABAYA,30-Dec-24 11:00\n");

    let result = state
        .jadwal_api
        .import_voyage_file("KM. AWU", "01", None, None, file.path(), "planner");
    assert!(matches!(result, Err(ApiError::InvalidInput(_))));
}

#[test]
fn test_import_missing_file_is_not_found() {
    let (dir, state) = create_test_state().unwrap();
    let missing = dir.path().join("tidak_ada.csv");

    let result = state
        .jadwal_api
        .import_voyage_file("KM. AWU", "01", None, None, &missing, "planner");
    assert!(matches!(result, Err(ApiError::NotFound(_))));
}
