// Property-based tests for menu layout.
// CI: 256 cases (default). Soak: PROPTEST_CASES=10000 cargo test --release

use proptest::prelude::*;
use sheetmenu::{
    compute_structure, CellValue, CheckboxSetting, MenuError, MenuLayout, MenuOptions, Setting,
    SettingKind, SettingSize, TextSetting,
};
use sheetmenu_engine::Workbook;

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

fn config_256() -> ProptestConfig {
    ProptestConfig {
        cases: std::env::var("PROPTEST_CASES")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(256),
        failure_persistence: None,
        ..ProptestConfig::default()
    }
}

// ---------------------------------------------------------------------------
// A multi-row setting, to check layout only relies on declared sizes
// ---------------------------------------------------------------------------

#[derive(Debug)]
struct TallSetting {
    name: String,
    rows: usize,
    columns: usize,
    default: CellValue,
}

impl Setting for TallSetting {
    fn name(&self) -> &str {
        &self.name
    }

    fn default_value(&self) -> &CellValue {
        &self.default
    }

    fn description(&self) -> &str {
        ""
    }

    fn kind(&self) -> SettingKind {
        SettingKind::Text
    }

    fn get_size(&self) -> SettingSize {
        SettingSize { rows: self.rows, columns: self.columns }
    }
}

// ---------------------------------------------------------------------------
// Generators
// ---------------------------------------------------------------------------

/// Unique names with a footprint height each (0 exercises the one-row floor).
fn arb_settings() -> impl Strategy<Value = Vec<(String, usize)>> {
    proptest::collection::hash_set(r"[A-Za-z][A-Za-z0-9 ]{0,8}", 1..=12)
        .prop_flat_map(|names| {
            let names: Vec<String> = names.into_iter().collect();
            let n = names.len();
            (Just(names), proptest::collection::vec(0usize..4, n))
        })
        .prop_map(|(names, rows)| names.into_iter().zip(rows).collect())
}

fn build(decls: &[(String, usize)]) -> Vec<Box<dyn Setting>> {
    decls
        .iter()
        .map(|(name, rows)| {
            Box::new(TallSetting {
                name: name.clone(),
                rows: *rows,
                columns: 3,
                default: CellValue::from(format!("{name}!")),
            }) as Box<dyn Setting>
        })
        .collect()
}

proptest! {
    #![proptest_config(config_256())]

    #[test]
    fn rows_increase_without_overlap(
        decls in arb_settings(),
        spacing in 0usize..4,
        header_rows in 1usize..3,
    ) {
        let opts = MenuOptions::default().with_row_spacing(spacing).with_header_rows(header_rows);
        let settings = build(&decls);
        let structure = compute_structure(&opts, &settings);

        prop_assert_eq!(structure.len(), decls.len());

        let mut previous_end = header_rows;
        for (name, rows) in &decls {
            let start = structure[name.as_str()];
            prop_assert!(start > previous_end, "{} starts at {} but previous ends at {}", name, start, previous_end);
            previous_end = start + (*rows).max(1) - 1;
        }
    }

    #[test]
    fn structure_is_deterministic(decls in arb_settings(), spacing in 0usize..4) {
        let opts = MenuOptions::default().with_row_spacing(spacing);

        let a = MenuLayout::new(opts.clone(), build(&decls), Workbook::new()).unwrap();
        let b = MenuLayout::new(opts, build(&decls), Workbook::new()).unwrap();

        prop_assert_eq!(a.structure(), a.structure());
        prop_assert_eq!(a.structure(), b.structure());
    }

    #[test]
    fn declared_footprints_draw_and_read_back(
        decls in arb_settings(),
        columns in 0usize..5,
        spacing in 0usize..3,
    ) {
        let settings: Vec<Box<dyn Setting>> = decls
            .iter()
            .map(|(name, rows)| {
                Box::new(TallSetting {
                    name: name.clone(),
                    rows: *rows,
                    columns,
                    default: CellValue::from(format!("{name}!")),
                }) as Box<dyn Setting>
            })
            .collect();
        let opts = MenuOptions::default().with_row_spacing(spacing);
        let mut menu = MenuLayout::new(opts, settings, Workbook::new()).unwrap();

        menu.draw().unwrap();
        for (name, _) in &decls {
            prop_assert_eq!(menu.get(name).unwrap(), CellValue::from(format!("{name}!")));
        }
    }

    #[test]
    fn duplicate_name_always_rejected(decls in arb_settings(), pick in any::<prop::sample::Index>()) {
        let mut settings = build(&decls);
        let dup = decls[pick.index(decls.len())].0.clone();
        settings.push(CheckboxSetting::new(dup.as_str(), true).into());

        let err = MenuLayout::new(MenuOptions::default(), settings, Workbook::new()).unwrap_err();
        prop_assert!(matches!(err, MenuError::DuplicateSettingName(ref n) if *n == dup));
    }

    #[test]
    fn default_values_are_name_default_description(
        name in r"[A-Za-z]{1,10}",
        default in r"[a-z0-9]{0,10}",
        description in r"[a-z ]{0,20}",
    ) {
        let setting = TextSetting::new(name.as_str(), default.as_str()).with_description(description.as_str());
        prop_assert_eq!(
            setting.get_default_values(),
            vec![CellValue::Text(name), CellValue::Text(default), CellValue::Text(description)]
        );
    }
}
