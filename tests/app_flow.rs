use petfarm::{
    config::ConfigLoader, locale::LocaleBundle, rng::RngManager, terminal::ScriptedInput,
    AppSettings, FarmApp, FarmSummary,
};

fn settings() -> AppSettings {
    let loader = ConfigLoader::new(env!("CARGO_MANIFEST_DIR"));
    let mut config = loader.load("config/farm.yaml").expect("config parses");
    config.progress.max_delay_ms = 0;
    AppSettings::from_config(&config).expect("config is valid")
}

fn run_session(keys: &str, seed: u64) -> (Vec<FarmSummary>, String) {
    let mut app = FarmApp::new(
        LocaleBundle::embedded().expect("bundle parses"),
        settings(),
        RngManager::new(seed),
        Vec::new(),
        ScriptedInput::new(keys.chars()),
    );
    let summaries = app.run().expect("session runs");
    let text = String::from_utf8(app.into_output()).expect("utf-8 output");
    (summaries, text)
}

#[test]
fn english_session_generates_two_farms() {
    let (summaries, text) = run_session("1110", 12);

    assert_eq!(summaries.len(), 2);
    for summary in &summaries {
        assert!((10..20).contains(&summary.pets));
        assert!(text.contains(&format!(
            "The whole farm needs {} kg of food per month.",
            summary.total_food
        )));
    }
    assert_eq!(text.matches("1. Generate a farm").count(), 3);
}

#[test]
fn invalid_keys_are_ignored_in_menus() {
    let (summaries, text) = run_session("x7 2q0", 3);

    assert!(summaries.is_empty());
    assert!(text.contains("1. Создать ферму"));
    assert!(text.contains("0. Выход"));
}

#[test]
fn russian_pet_lines_are_capitalized() {
    let (summaries, text) = run_session("21", 8);

    assert_eq!(summaries.len(), 1);
    let pet_lines: Vec<&str> = text.lines().filter(|line| line.contains(", вес ")).collect();
    assert_eq!(pet_lines.len(), summaries[0].pets);
    for line in pet_lines {
        let first = line.chars().next().expect("non-empty line");
        assert!(first.is_uppercase(), "line {line:?} is not capitalized");
    }
}

#[test]
fn same_seed_same_session() {
    let (first, _) = run_session("110", 99);
    let (second, _) = run_session("110", 99);
    assert_eq!(first, second);
}
