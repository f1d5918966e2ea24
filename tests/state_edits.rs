use cropstat_rs::models::DEFAULT_CROPS;
use cropstat_rs::{AppState, CropList, DataRecord, DataType, StateError};

fn small_state() -> AppState {
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
fn add_crop_backfills_zero_everywhere() {
    let state = small_state();
    let next = state.add_crop("  Barley ").unwrap();

    assert_eq!(next.crops.as_slice(), ["Wheat", "Corn", "Barley"]);
    for rec in &next.data {
        assert_eq!(rec.value("Barley"), Some(0));
    }
    // previous snapshot unchanged
    assert_eq!(state.crops.len(), 2);
    assert!(!state.data[0].contains("Barley"));
}

#[test]
fn add_crop_rejects_blank_and_duplicate_names() {
    let state = small_state();
    assert_eq!(state.add_crop("   ").unwrap_err(), StateError::EmptyCropName);
    assert_eq!(state.add_crop("Corn").unwrap_err(), StateError::DuplicateCrop);
    assert_eq!(
        state.add_crop("Corn").unwrap_err().to_string(),
        "Crop already exists"
    );
}

#[test]
fn remove_crop_drops_column_from_every_record() {
    let next = small_state().remove_crop("Wheat").unwrap();
    assert_eq!(next.crops.as_slice(), ["Corn"]);
    assert!(next.data.iter().all(|r| !r.contains("Wheat")));
    assert_eq!(next.data[1].get("Corn"), 200);
}

#[test]
fn last_crop_cannot_be_removed() {
    let one = small_state().remove_crop("Wheat").unwrap();
    let err = one.remove_crop("Corn").unwrap_err();
    assert_eq!(err, StateError::LastCrop);
    assert_eq!(err.to_string(), "Cannot remove the last crop");
}

#[test]
fn unknown_crop_removal_is_rejected() {
    assert!(matches!(
        small_state().remove_crop("Millet"),
        Err(StateError::UnknownCrop(_))
    ));
}

#[test]
fn add_year_inserts_sorted_zero_record() {
    let next = small_state().add_year(2015).unwrap();
    let years: Vec<i32> = next.data.iter().map(|r| r.year).collect();
    assert_eq!(years, vec![2015, 2019, 2020]);
    assert_eq!(next.data[0].get("Wheat"), 0);
    assert_eq!(next.data[0].len(), 2);
}

#[test]
fn add_year_rejects_duplicates_and_non_positive() {
    let state = small_state();
    assert_eq!(
        state.add_year(2019).unwrap_err(),
        StateError::DuplicateYear(2019)
    );
    assert_eq!(state.add_year(0).unwrap_err(), StateError::InvalidYear(0));
    assert_eq!(state.add_year(-5).unwrap_err(), StateError::InvalidYear(-5));
}

#[test]
fn remove_year_ignores_unknown_years() {
    let state = small_state();
    assert_eq!(state.remove_year(1999), state);
    let next = state.remove_year(2019);
    assert_eq!(next.data.len(), 1);
    assert_eq!(next.data[0].year, 2020);
}

#[test]
fn set_value_parses_grouped_text() {
    let state = small_state();
    let next = state.set_value(2020, "Corn", "1,234");
    assert_eq!(next.data[1].get("Corn"), 1234);
    assert_eq!(next.data[0].get("Corn"), 75);

    let zeroed = next.set_value(2020, "Corn", "abc");
    assert_eq!(zeroed.data[1].get("Corn"), 0);

    let prefix = next.set_value(2019, "Wheat", "42kg");
    assert_eq!(prefix.data[0].get("Wheat"), 42);
}

#[test]
fn reset_keeps_crops_and_zeroes_default_years() {
    let state = small_state().add_crop("Barley").unwrap().reset_data();
    assert_eq!(state.crops.len(), 3);
    assert_eq!(state.data.len(), 14);
    assert_eq!(state.data.first().map(|r| r.year), Some(2010));
    assert_eq!(state.data.last().map(|r| r.year), Some(2023));
    assert!(state.data.iter().all(|r| r.get("Barley") == 0 && r.len() == 3));
}

#[test]
fn load_example_restores_default_schema() {
    let state = small_state()
        .with_country("Brazil")
        .with_data_type(DataType::Consumption)
        .load_example();
    assert_eq!(state.country, "China");
    assert_eq!(state.data_type, DataType::Consumption);
    assert_eq!(state.crops.as_slice(), DEFAULT_CROPS);
    assert_eq!(state.data.len(), 14);
    assert_eq!(state.data[0].get("Wheat"), 116093);
    assert_eq!(state.data[13].get("Corn"), 288842);
}

#[test]
fn titles_follow_selected_data_type_and_years() {
    let state = small_state().with_data_type(DataType::Import).with_country("Peru");
    assert_eq!(state.heading(), "Import of Food in Peru");
    assert_eq!(state.title(), "Import of Food in Peru (2019-2020)");
}

#[test]
fn next_year_suggestion_follows_table() {
    assert_eq!(small_state().next_year_suggestion(), 2021);
}

#[test]
fn set_value_ignores_unknown_year_and_crop() {
    let state = small_state();
    assert_eq!(state.set_value(1999, "Wheat", "5"), state);
    assert_eq!(state.set_value(2020, "Millet", "5"), state);
}

#[test]
fn year_cannot_be_used_as_crop_name() {
    let state = small_state();
    assert_eq!(
        state.add_crop("year").unwrap_err(),
        StateError::ReservedCropName("year".into())
    );
    assert!(matches!(
        state.add_crop(" Year "),
        Err(StateError::ReservedCropName(_))
    ));
}

#[test]
fn saved_state_reloads_after_crop_edits() {
    let tmp = tempfile::TempDir::new().unwrap();
    let path = tmp.path().join("state.json");
    let state = small_state().add_crop("Barley").unwrap();
    assert!(state.add_crop("year").is_err());

    cropstat_rs::storage::save_json(&state, &path).unwrap();
    assert_eq!(cropstat_rs::storage::load_json(&path).unwrap(), state);
}
