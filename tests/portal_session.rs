use healthconnect::domain::{CartState, ItemId, Variant};
use healthconnect::storage::CatalogSource;
use healthconnect::{handle_event, initialize, Action, AppState, CatalogError, Config, ConsultKind, Event};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const DOCTORS: &str = r#"[
  {"id": 1, "name": "Dr. Sarah Johnson", "specialty": "Cardiologist", "rating": 4.8, "reviews": 156,
   "experience": 12, "location": "Downtown Medical Center", "distance": 2.3, "consultationFee": 150,
   "availableToday": true, "acceptsInsurance": ["Blue Cross", "Aetna", "Cigna"],
   "nextAvailable": "Today 3:00 PM", "languages": ["English", "Spanish"]},
  {"id": 2, "name": "Dr. Michael Chen", "specialty": "Dermatologist", "rating": 4.9, "reviews": 203,
   "experience": 8, "location": "Skin Care Clinic", "distance": 1.8, "consultationFee": 120,
   "availableToday": false, "acceptsInsurance": ["Blue Cross", "United Health"],
   "nextAvailable": "Tomorrow 10:00 AM", "languages": ["English", "Mandarin"]},
  {"id": 3, "name": "Dr. Emily Rodriguez", "specialty": "Pediatrician", "rating": 4.7, "reviews": 89,
   "experience": 15, "location": "Children's Health Center", "distance": 3.1, "consultationFee": 100,
   "availableToday": true, "acceptsInsurance": ["Aetna", "Cigna", "Kaiser"],
   "nextAvailable": "Today 5:30 PM", "languages": ["English", "Spanish", "Portuguese"]}
]"#;

fn medicines_json(vitamin_price: f64, with_antibiotic: bool) -> String {
    let antibiotic = if with_antibiotic {
        r#"{"id": 2, "name": "Amoxicillin 250mg", "genericName": "Amoxicillin", "price": 24.99,
            "category": "Antibiotics", "prescriptionRequired": true},"#
    } else {
        ""
    };
    format!(
        r#"{{"success": true, "medicines": [
            {{"id": 1, "name": "Paracetamol 500mg", "genericName": "Acetaminophen", "price": 12.99,
              "category": "Pain Relief"}},
            {antibiotic}
            {{"id": 3, "name": "Vitamin D3 1000 IU", "genericName": "Cholecalciferol", "price": {vitamin_price},
              "category": "Vitamins"}},
            {{"id": 4, "name": "Metformin 500mg", "genericName": "Metformin", "price": 9.5,
              "category": "Diabetes", "inStock": false}}
        ]}}"#
    )
}

struct Fixture {
    _dir: TempDir,
    medicines: PathBuf,
    config: Config,
}

fn fixture() -> Fixture {
    let dir = TempDir::new().unwrap();
    let doctors = dir.path().join("doctors.json");
    let medicines = dir.path().join("medicines.json");
    fs::write(&doctors, DOCTORS).unwrap();
    fs::write(&medicines, medicines_json(18.99, true)).unwrap();

    let config_path = dir.path().join("config.toml");
    fs::write(
        &config_path,
        format!(
            "doctors_catalog = {:?}\nmedicines_catalog = {:?}\nrows = 40\n",
            doctors.display().to_string(),
            medicines.display().to_string()
        ),
    )
    .unwrap();

    let config = Config::load(&config_path).unwrap();
    Fixture {
        _dir: dir,
        medicines,
        config,
    }
}

fn ids(state: &AppState) -> Vec<u64> {
    state.result_ids().iter().map(|id| id.0).collect()
}

fn send(state: &mut AppState, cart: &mut CartState, event: Event) -> Vec<Action> {
    handle_event(state, cart, &event).unwrap().1
}

fn total(state: &AppState, cart: &CartState) -> f64 {
    cart.total(|id| state.store().price_of(id))
}

#[test]
fn doctor_search_narrows_sorts_and_books() {
    let fx = fixture();
    let mut state = initialize(&fx.config, &fx.config.catalog_source(), Variant::Doctors).unwrap();
    let mut cart = CartState::new();

    // nearest first by default
    assert_eq!(ids(&state), vec![2, 1, 3]);

    send(&mut state, &mut cart, Event::SetSearchTerm("CARDIO".to_string()));
    assert_eq!(ids(&state), vec![1]);
    send(&mut state, &mut cart, Event::SetSearchTerm(String::new()));

    send(&mut state, &mut cart, Event::SetTag { tag: "Kaiser".to_string(), selected: true });
    assert_eq!(ids(&state), vec![3]);
    send(&mut state, &mut cart, Event::SetTag { tag: "Aetna".to_string(), selected: true });
    assert_eq!(ids(&state), vec![1, 3]);
    send(&mut state, &mut cart, Event::ClearTags);

    send(&mut state, &mut cart, Event::SetFlagRequired(true));
    assert_eq!(ids(&state), vec![1, 3]);

    send(&mut state, &mut cart, Event::SetSortKey("experience".to_string()));
    assert_eq!(ids(&state), vec![3, 1]);

    // the cursor followed Dr. Rodriguez through every change above
    let actions = send(&mut state, &mut cart, Event::BookSelected { consult: ConsultKind::Video });
    assert_eq!(
        actions,
        vec![Action::BookAppointment {
            doctor_id: ItemId(3),
            doctor_name: "Dr. Emily Rodriguez".to_string(),
            slot: "Today 5:30 PM".to_string(),
            consult: ConsultKind::Video,
        }]
    );

    let mut out = Vec::new();
    healthconnect::ui::render(&state.compute_viewmodel(&cart, fx.config.rows), &mut out).unwrap();
    let screen = String::from_utf8(out).unwrap();
    assert!(screen.contains(" Find Doctors (2 of 3) "));
    assert!(screen.contains("> Dr. Emily Rodriguez"));
    assert!(screen.contains("available today | sort: experience"));
}

#[test]
fn medicine_cart_survives_filters_and_reloads() {
    let fx = fixture();
    let source = fx.config.catalog_source();
    let mut state = initialize(&fx.config, &source, Variant::Medicines).unwrap();
    let mut cart = CartState::new();
    assert_eq!(ids(&state), vec![1, 2, 3, 4]);

    send(&mut state, &mut cart, Event::SelectCategory("Vitamins".to_string()));
    send(&mut state, &mut cart, Event::AddSelected);
    send(&mut state, &mut cart, Event::AddSelected);
    send(&mut state, &mut cart, Event::SelectCategory("All Categories".to_string()));
    send(&mut state, &mut cart, Event::AddToCart(ItemId(2)));
    send(&mut state, &mut cart, Event::AddToCart(ItemId(4)));

    assert_eq!(cart.item_count(), 3);
    assert!(!cart.contains(ItemId(4)));
    assert!((total(&state, &cart) - 62.97).abs() < 1e-9);

    let footer = state.compute_viewmodel(&cart, fx.config.rows).footer;
    assert_eq!(footer.cart_summary, "3 items in cart · $62.97");

    let actions = send(&mut state, &mut cart, Event::Checkout);
    let [Action::PlaceOrder(draft)] = actions.as_slice() else {
        panic!("expected an order draft, got {actions:?}");
    };
    assert_eq!(draft.lines.len(), 2);
    assert!(draft.requires_prescription());
    assert_eq!(draft.prescription_items, vec![ItemId(2)]);

    // a price change is picked up; the cart is untouched
    fs::write(&fx.medicines, medicines_json(20.0, true)).unwrap();
    let items = source.load(Variant::Medicines).unwrap();
    send(&mut state, &mut cart, Event::CatalogReloaded { items });
    assert_eq!(cart.item_count(), 3);
    assert!((total(&state, &cart) - 64.99).abs() < 1e-9);

    // an item that disappears keeps its cart entry but contributes nothing
    fs::write(&fx.medicines, medicines_json(20.0, false)).unwrap();
    let items = source.load(Variant::Medicines).unwrap();
    send(&mut state, &mut cart, Event::CatalogReloaded { items });
    assert_eq!(ids(&state), vec![1, 3, 4]);
    assert_eq!(cart.quantity(ItemId(2)), 1);
    assert!((total(&state, &cart) - 40.0).abs() < 1e-9);
}

#[test]
fn config_errors_are_reported() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, "rows = [1, 2]").unwrap();

    assert!(matches!(Config::load(&path), Err(CatalogError::Config(_))));
    assert!(matches!(Config::load(dir.path().join("absent.toml")), Err(CatalogError::Io(_))));
    assert!(matches!(Config::discover(Some(path.as_path())), Err(CatalogError::Config(_))));
}

#[test]
fn duplicate_ids_in_a_file_are_rejected() {
    let dir = TempDir::new().unwrap();
    let doctors = dir.path().join("doctors.json");
    fs::write(
        &doctors,
        r#"[{"id": 9, "name": "A", "specialty": "X", "rating": 1, "experience": 1, "distance": 1, "consultationFee": 1},
            {"id": 9, "name": "B", "specialty": "Y", "rating": 1, "experience": 1, "distance": 1, "consultationFee": 1}]"#,
    )
    .unwrap();
    let config = Config {
        doctors_catalog: Some(doctors.display().to_string()),
        ..Config::default()
    };

    let err = initialize(&config, &config.catalog_source(), Variant::Doctors).unwrap_err();
    assert!(matches!(err, CatalogError::DuplicateItemId(ItemId(9))));
}

#[test]
fn bundled_demo_catalogs_load() {
    let root = Path::new(env!("CARGO_MANIFEST_DIR"));
    let config = Config::load(root.join("demos/healthconnect.toml")).unwrap();
    let config = Config {
        doctors_catalog: Some(root.join("demos/doctors.json").display().to_string()),
        medicines_catalog: Some(root.join("demos/medicines.json").display().to_string()),
        ..config
    };

    let doctors = initialize(&config, &config.catalog_source(), Variant::Doctors).unwrap();
    let medicines = initialize(&config, &config.catalog_source(), Variant::Medicines).unwrap();
    assert_eq!(doctors.store().len(), 3);
    assert_eq!(medicines.store().len(), 3);
    assert_eq!(medicines.store().categories(), vec!["Pain Relief", "Antibiotics", "Vitamins"]);
}
