use proptest::prelude::*;

use crate::api::{Owner, OwnerId};
use crate::db::repositories::LocalRepository;
use crate::services::owner_search::{
    annotate_telephone, city_prefix, classify, search, SearchResult, CITY_PREFIXES,
};

fn owner(last_name: &str, city: &str, telephone: &str) -> Owner {
    Owner::new("Test", last_name, "1 Main St.", city, telephone)
}

fn telephones(result: &SearchResult) -> Vec<String> {
    match result {
        SearchResult::Many(owners) => owners.iter().map(|o| o.telephone.clone()).collect(),
        other => panic!("expected Many, got {:?}", other),
    }
}

#[tokio::test]
async fn test_two_smiths_get_regional_prefixes() {
    let repo = LocalRepository::new();
    repo.insert_owner(owner("Smith", "Seoul", "1234567"));
    repo.insert_owner(owner("Smith", "Busan", "7654321"));

    let result = search(&repo, Some("Smith")).await.unwrap();
    assert_eq!(telephones(&result), vec!["02-1234567", "051-7654321"]);
}

#[tokio::test]
async fn test_internet_number_is_left_alone() {
    let repo = LocalRepository::new();
    repo.insert_owner(owner("Smith", "Seoul", "0701234567"));
    repo.insert_owner(owner("Smith", "Busan", "7654321"));

    let result = search(&repo, Some("Smith")).await.unwrap();
    assert_eq!(telephones(&result), vec!["0701234567", "051-7654321"]);
}

#[tokio::test]
async fn test_unknown_city_is_left_alone() {
    let repo = LocalRepository::new();
    repo.insert_owner(owner("Smith", "Atlantis", "9998887"));
    repo.insert_owner(owner("Smith", "", "1112223"));
    repo.insert_owner(owner("Smith", "Seol", "4445556"));

    let result = search(&repo, Some("Smith")).await.unwrap();
    assert_eq!(telephones(&result), vec!["9998887", "1112223", "4445556"]);
}

#[tokio::test]
async fn test_absent_last_name_returns_everyone() {
    let repo = LocalRepository::new();
    repo.insert_owner(owner("Franklin", "Seoul", "6085551023"));
    repo.insert_owner(owner("Davis", "Jeju", "6085551749"));
    repo.insert_owner(owner("Coleman", "Atlantis", "6085552654"));

    let result = search(&repo, None).await.unwrap();
    assert_eq!(result.len(), 3);
    assert_eq!(
        telephones(&result),
        vec!["02-6085551023", "064-6085551749", "6085552654"]
    );
}

#[tokio::test]
async fn test_no_match_is_empty() {
    let repo = LocalRepository::with_sample_data();
    let result = search(&repo, Some("Nobody")).await.unwrap();
    assert_eq!(result, SearchResult::Empty);
    assert!(result.is_empty());
}

#[tokio::test]
async fn test_single_match_keeps_its_own_id_and_number() {
    let repo = LocalRepository::new();
    repo.insert_owner(owner("Franklin", "Seoul", "6085551023"));
    let id = repo.insert_owner(owner("Coleman", "Daejeon", "6085552654"));

    match search(&repo, Some("Coleman")).await.unwrap() {
        SearchResult::Single(found) => {
            assert_eq!(found.id, Some(id));
            assert_eq!(found.telephone, "6085552654");
        }
        other => panic!("expected Single, got {:?}", other),
    }
}

#[tokio::test]
async fn test_annotation_never_reaches_the_store() {
    let repo = LocalRepository::new();
    let first = repo.insert_owner(owner("Smith", "Seoul", "1234567"));
    repo.insert_owner(owner("Smith", "Busan", "7654321"));

    let _ = search(&repo, Some("Smith")).await.unwrap();
    let again = search(&repo, Some("Smith")).await.unwrap();

    // A second search starts from the raw numbers again
    assert_eq!(telephones(&again), vec!["02-1234567", "051-7654321"]);
    let stored = crate::db::services::find_owner_by_id(&repo, first).await.unwrap();
    assert_eq!(stored.telephone, "1234567");
}

#[tokio::test]
async fn test_repository_failure_propagates() {
    let repo = LocalRepository::new();
    repo.set_healthy(false);
    assert!(search(&repo, Some("Smith")).await.is_err());
}

#[test]
fn test_annotation_twice_double_prefixes() {
    // Known limitation: the internet check reads "02-" on the second pass
    let mut o = owner("Smith", "Seoul", "0701234567");
    let mut raw = owner("Smith", "Seoul", "1234567");
    annotate_telephone(&mut o);
    annotate_telephone(&mut raw);
    annotate_telephone(&mut raw);
    assert_eq!(o.telephone, "0701234567");
    assert_eq!(raw.telephone, "02-02-1234567");
}

#[test]
fn test_classify_many_preserves_ids_and_order() {
    let owners = vec![
        owner("Davis", "Busan", "6085551749").with_id(OwnerId(2)),
        owner("Davis", "Incheon", "6085553198").with_id(OwnerId(4)),
    ];
    match classify(owners) {
        SearchResult::Many(found) => {
            assert_eq!(found[0].id, Some(OwnerId(2)));
            assert_eq!(found[1].id, Some(OwnerId(4)));
            assert_eq!(found[1].telephone, "032-6085553198");
        }
        other => panic!("expected Many, got {:?}", other),
    }
}

fn city_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        prop::sample::select(CITY_PREFIXES.iter().map(|(c, _)| c.to_string()).collect::<Vec<_>>()),
        "[A-Za-z]{0,12}",
    ]
}

proptest! {
    #[test]
    fn prop_many_results_follow_annotation_rule(
        records in prop::collection::vec((city_strategy(), "[0-9]{3,10}"), 2..8)
    ) {
        let owners: Vec<Owner> = records
            .iter()
            .enumerate()
            .map(|(i, (city, tel))| owner("Smith", city, tel).with_id(OwnerId(i as i64 + 1)))
            .collect();

        let result = classify(owners.clone());
        let annotated = match result {
            SearchResult::Many(found) => found,
            other => return Err(TestCaseError::fail(format!("expected Many, got {:?}", other))),
        };
        prop_assert_eq!(annotated.len(), owners.len());

        for (before, after) in owners.iter().zip(annotated.iter()) {
            prop_assert_eq!(before.id, after.id);
            let expected = if before.telephone.starts_with("070") {
                before.telephone.clone()
            } else {
                match city_prefix(&before.city) {
                    Some(prefix) => format!("{}-{}", prefix, before.telephone),
                    None => before.telephone.clone(),
                }
            };
            prop_assert_eq!(&after.telephone, &expected);
        }
    }

    #[test]
    fn prop_single_result_is_unchanged(city in city_strategy(), tel in "[0-9]{0,10}") {
        let only = owner("Smith", &city, &tel).with_id(OwnerId(9));
        prop_assert_eq!(classify(vec![only.clone()]), SearchResult::Single(only));
    }
}
