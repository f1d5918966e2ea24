use chrono::NaiveDate;
use cropstat_rs::storage;
use cropstat_rs::{AppState, CropList, DataRecord, DataType};
use std::fs;
use tempfile::TempDir;

fn sample() -> AppState {
    AppState {
        country: "China".into(),
        data_type: DataType::Production,
        crops: CropList::new(["Wheat", "Corn"]),
        data: vec![
            DataRecord::with_values(2019, [("Wheat", 50), ("Corn", 75)]),
            DataRecord::with_values(2020, [("Wheat", 100), ("Corn", 200)]),
        ],
    }
}

#[test]
fn save_csv_and_json() {
    let state = sample();
    let tmp = TempDir::new().unwrap();

    let csv_path = tmp.path().join("cropstat_test.csv");
    storage::save_csv(&state, &csv_path).unwrap();
    let csv_txt = fs::read_to_string(&csv_path).unwrap();
    let lines: Vec<&str> = csv_txt.lines().collect();
    assert_eq!(lines, vec!["Year,Wheat,Corn", "2019,50,75", "2020,100,200"]);

    let json_path = tmp.path().join("cropstat_test.json");
    storage::save_json(&state, &json_path).unwrap();
    let v: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&json_path).unwrap()).unwrap();
    assert_eq!(v["country"], "China");
    assert_eq!(v["dataType"], "production");
    assert_eq!(v["crops"], serde_json::json!(["Wheat", "Corn"]));
    assert_eq!(v["data"][1], serde_json::json!({"year": 2020, "Wheat": 100, "Corn": 200}));
}

#[test]
fn json_export_layout_is_exact() {
    let json = storage::to_json_string(&sample()).unwrap();
    assert_eq!(
        json,
        r#"{"country":"China","dataType":"production","crops":["Wheat","Corn"],"data":[{"year":2019,"Wheat":50,"Corn":75},{"year":2020,"Wheat":100,"Corn":200}]}"#
    );
}

#[test]
fn json_reload_restores_state() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("state.json");
    let state = sample().with_data_type(DataType::Import);
    storage::save_json(&state, &path).unwrap();
    assert_eq!(storage::load_json(&path).unwrap(), state);
}

#[test]
fn load_json_sorts_records() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("unsorted.json");
    fs::write(
        &path,
        r#"{"country":"Peru","dataType":"consumption","crops":["Rice"],
            "data":[{"year":2021,"Rice":3},{"year":2020,"Rice":2}]}"#,
    )
    .unwrap();
    let state = storage::load_json(&path).unwrap();
    assert_eq!(state.data_type, DataType::Consumption);
    let years: Vec<i32> = state.data.iter().map(|r| r.year).collect();
    assert_eq!(years, vec![2020, 2021]);
}

#[test]
fn load_json_reports_missing_file() {
    let tmp = TempDir::new().unwrap();
    assert!(storage::load_json(tmp.path().join("nope.json")).is_err());
}

#[test]
fn csv_fills_missing_crops_with_zero() {
    let mut state = sample();
    state.data.push(DataRecord::with_values(2021, [("Corn", 9)]));
    let csv = storage::to_csv_string(&state).unwrap();
    assert_eq!(csv.lines().last(), Some("2021,0,9"));
}

#[test]
fn empty_table_writes_header_only() {
    let state = AppState {
        data: Vec::new(),
        ..sample()
    };
    let csv = storage::to_csv_string(&state).unwrap();
    assert_eq!(csv.lines().collect::<Vec<_>>(), vec!["Year,Wheat,Corn"]);
}

//test if the CSV file is safe and won't include executable formulas
//crop names are free text and end up in the header row, so a name such as
//"=HYPERLINK(...)" would run as a formula when the export is opened in Excel
//we prefix those cells with a single quote to avoid this issue
#[test]
fn csv_header_cells_are_prefixed_to_avoid_formulas() {
    let state = AppState::default()
        .add_crop("=HYPERLINK(\"http://evil\")")
        .unwrap()
        .add_crop("+SUM(A1:A9)")
        .unwrap()
        .add_crop("@foo")
        .unwrap();
    let csv = storage::to_csv_string(&state).unwrap();
    let mut rdr = csv::Reader::from_reader(csv.as_bytes());
    let headers = rdr.headers().unwrap().clone();
    let tail: Vec<&str> = headers.iter().skip(8).collect();
    assert_eq!(
        tail,
        vec!["'=HYPERLINK(\"http://evil\")", "'+SUM(A1:A9)", "'@foo"]
    );
}

#[test]
fn file_names_use_slugged_country() {
    assert_eq!(
        storage::json_file_name(DataType::Production, "China"),
        "production_china_data.json"
    );
    let date = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
    assert_eq!(
        storage::csv_file_name(DataType::Import, "United  States", date),
        "import_united_states_2024-03-09.csv"
    );
}

#[test]
fn load_json_rejects_out_of_range_year() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("wide_year.json");
    fs::write(
        &path,
        r#"{"country":"China","dataType":"production","crops":["Wheat"],
            "data":[{"year":4294969306,"Wheat":1}]}"#,
    )
    .unwrap();
    let err = storage::load_json(&path).unwrap_err();
    assert!(format!("{err:#}").contains("year out of range"));
}
