use housing_budget_core::housing::{compute_cost, HousingInput, HousingType};
use housing_budget_core::scenarios::{
    InMemoryScenarioStore, JsonFileScenarioStore, ScenarioRepository, MAX_SCENARIOS,
};
use housing_budget_core::HousingBudgetError;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn row_house() -> HousingInput {
    HousingInput {
        housing_type: HousingType::RowHouse,
        price: dec!(4_200_000),
        down_payment: dec!(840_000),
        cooperative_share: None,
        annual_income: Some(dec!(900_000)),
        annual_interest_rate: dec!(0.039),
        monthly_operating_cost: dec!(2_800),
        monthly_electricity_cost: dec!(1_400),
        renovation_cost: dec!(350_000),
        renovation_interval_years: 12,
        analysis_horizon_years: 20,
        living_area_sqm: Some(dec!(125)),
        registration_fee: Decimal::ZERO,
        lien_fee: Decimal::ZERO,
        broker_fee: Decimal::ZERO,
        other_one_time_costs: dec!(25_000),
        lien_already_exists: true,
    }
}

fn exercise_store(store: &mut impl ScenarioRepository) {
    let input = row_house();
    let result = compute_cost(&input).unwrap();

    let mut ids = Vec::new();
    for i in 0..MAX_SCENARIOS {
        let saved = store
            .save(&format!("Variant {i}"), input.clone(), result.clone())
            .unwrap();
        ids.push(saved.id);
    }

    match store.save("Sixth", input.clone(), result.clone()) {
        Err(HousingBudgetError::ScenarioLimitReached { .. }) => {}
        other => panic!("Expected ScenarioLimitReached, got {other:?}"),
    }

    let listed: Vec<String> = store.list_all().unwrap().into_iter().map(|s| s.id).collect();
    assert_eq!(listed, ids);

    assert!(store.delete(&ids[2]).unwrap());
    let replacement = store.save("Replacement", input, result.clone()).unwrap();
    assert_eq!(replacement.result, result);
    assert!(!ids.contains(&replacement.id));
    assert_eq!(store.list_all().unwrap().len(), MAX_SCENARIOS);
    assert!(store.get(&ids[2]).unwrap().is_none());

    store.clear().unwrap();
    assert!(store.list_all().unwrap().is_empty());
}

#[test]
fn test_ids_not_reused_after_delete() {
    let mut store = InMemoryScenarioStore::new();
    let input = row_house();
    let result = compute_cost(&input).unwrap();

    let mut ids = Vec::new();
    for name in ["First", "Second", "Third"] {
        ids.push(store.save(name, input.clone(), result.clone()).unwrap().id);
    }
    assert!(store.delete(&ids[1]).unwrap());

    let again = store.save("Fourth", input, result).unwrap();
    assert!(!ids.contains(&again.id));
    assert!(store.get(&ids[1]).unwrap().is_none());
    assert!(!store.delete(&ids[1]).unwrap());
}

#[test]
fn test_in_memory_store_policy() {
    exercise_store(&mut InMemoryScenarioStore::new());
}

#[test]
fn test_json_file_store_policy() {
    let path = std::env::temp_dir().join(format!(
        "housing-budget-store-policy-{}.json",
        std::process::id()
    ));
    let mut store = JsonFileScenarioStore::new(path);
    exercise_store(&mut store);
}
