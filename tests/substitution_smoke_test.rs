use nutri_swap_rs::repository::{FoodCatalog, InMemoryAllowedSubstitutes, InMemoryCatalog};
use nutri_swap_rs::{NutriError, Portion, RankConfig, SubstitutionService, ingest};

const TABLE: &str = "id;descricao;energia_kcal;proteina;carboidrato;lipideos\n\
                     1;Peito de frango grelhado;159;32,0;0;2,5\n\
                     2;Tilápia grelhada;128;26,0;0;2,7\n\
                     3;Ovo cozido;146;13,3;0,6;9,5\n\
                     4;Arroz branco cozido;128;2,5;28,1;0,2\n\
                     5;Feijão carioca cozido;76;4,8;13,6;0,5\n\
                     6;Carne moída refogada;212;26,7;0;10,9\n";

fn service() -> SubstitutionService<InMemoryCatalog, InMemoryAllowedSubstitutes> {
    let foods = ingest(TABLE).unwrap();
    SubstitutionService::new(
        InMemoryCatalog::new(foods),
        InMemoryAllowedSubstitutes::default(),
        RankConfig::default(),
    )
}

#[test]
fn test_find_substitutes_for_chicken() {
    let svc = service();
    let result = svc.find_substitutes("p1", "1", Portion::grams(100.0)).unwrap();

    assert_eq!(result.target.food.name, "Peito de frango grelhado");
    assert_eq!(result.by_macros[0].food.name, "Tilápia grelhada");
    assert!(result.by_macros.len() <= 5);
    assert!(result.by_macros.iter().all(|s| s.food.id != "1"));
    assert!(result.by_macros_and_kcal.iter().all(|s| s.delta_kcal.is_some()));
}

#[test]
fn test_search_through_service() {
    let svc = service();
    let hits = svc.search("GRELHAD", 10);
    assert_eq!(hits.len(), 2);
    assert!(svc.search("o", 10).is_empty());
}

#[test]
fn test_approved_substitute_replaced_not_duplicated() {
    let mut svc = service();
    svc.add_allowed_substitute("p1", "4", "5", Portion::grams(100.0)).unwrap();
    svc.add_allowed_substitute("p1", "4", "5", Portion::grams(180.0)).unwrap();

    let allowed = svc.get_allowed_substitutes("p1", "4");
    assert_eq!(allowed.len(), 1);
    assert_eq!(allowed[0].portion, Portion::grams(180.0));

    let result = svc.find_substitutes("p1", "4", Portion::grams(100.0)).unwrap();
    assert_eq!(result.allowed.len(), 1);
    assert_eq!(result.allowed[0].food.id, "5");
}

#[test]
fn test_catalog_replacement_is_wholesale() {
    let mut svc = service();
    svc.catalog_mut().set_foods(ingest("descricao;energia_kcal\nBanana;98\n").unwrap());
    assert!(matches!(
        svc.find_substitutes("p1", "1", Portion::grams(100.0)),
        Err(NutriError::FoodNotFound(_))
    ));
    assert_eq!(svc.catalog().get_all()[0].id, "banana");
}

#[test]
fn test_approvals_resolve_against_reingested_catalog() {
    let mut svc = service();
    svc.add_allowed_substitute("p1", "1", "2", Portion::grams(100.0)).unwrap();

    let reingested =
        TABLE.replace("2;Tilápia grelhada;128;26,0", "2;Tilápia grelhada;128;5,0");
    svc.catalog_mut().set_foods(ingest(&reingested).unwrap());
    let result = svc.find_substitutes("p1", "1", Portion::grams(100.0)).unwrap();
    assert_eq!(result.allowed[0].nutrients.protein, 5.0);

    let without_tilapia = TABLE
        .lines()
        .filter(|l| !l.starts_with("2;"))
        .collect::<Vec<_>>()
        .join("\n");
    svc.catalog_mut().set_foods(ingest(&without_tilapia).unwrap());
    let result = svc.find_substitutes("p1", "1", Portion::grams(100.0)).unwrap();
    assert!(result.allowed.is_empty());
    assert!(svc.get_allowed_substitutes("p1", "1").is_empty());
}

#[test]
fn test_food_cannot_be_approved_for_itself() {
    let mut svc = service();
    assert!(matches!(
        svc.add_allowed_substitute("p1", "1", "1", Portion::grams(100.0)),
        Err(NutriError::InvalidInput(_))
    ));
}
