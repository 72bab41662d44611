//! Property-based tests for pagination and lookup consistency
//!
//! Uses proptest to check the listing invariants across random catalogs,
//! page sizes and page numbers.

use imagecat::{Catalog, MetadataService};
use proptest::prelude::*;

fn service_with(filenames: &[String]) -> MetadataService {
    let catalog = Catalog::from_rows(
        ["filename", "original", "protanope"],
        filenames.iter().enumerate().map(|(i, name)| {
            vec![
                Some(name.clone()),
                Some(format!("ann-{}", i)),
                Some(format!("p-{}", i)),
            ]
        }),
    )
    .unwrap();
    MetadataService::from_catalog(catalog)
}

fn unique_names(count: usize) -> Vec<String> {
    (0..count).map(|i| format!("img{:04}.png", i)).collect()
}

proptest! {
    #[test]
    fn prop_page_never_exceeds_page_size(
        total in 0usize..300,
        page_size in 1usize..=100,
        page in 1usize..50
    ) {
        let service = service_with(&unique_names(total));
        let result = service.list_page(page, page_size).unwrap();
        let info = result.pagination;

        prop_assert!(result.data.len() <= page_size);
        if info.page < info.total_pages {
            prop_assert_eq!(result.data.len(), page_size);
        }
    }

    #[test]
    fn prop_total_pages_is_ceiling(
        total in 0usize..300,
        page_size in 1usize..=100
    ) {
        let service = service_with(&unique_names(total));
        let info = service.list_page(1, page_size).unwrap().pagination;

        prop_assert_eq!(info.total, total);
        prop_assert_eq!(info.total_pages, (total + page_size - 1) / page_size);
        if total == 0 {
            prop_assert_eq!(info.total_pages, 0);
        }
    }

    #[test]
    fn prop_page_past_end_clamps_to_last(
        total in 1usize..300,
        page_size in 1usize..=100,
        overshoot in 1usize..1000
    ) {
        let service = service_with(&unique_names(total));
        let last_page = (total + page_size - 1) / page_size;

        let clamped = service.list_page(last_page + overshoot, page_size).unwrap();
        let last = service.list_page(last_page, page_size).unwrap();

        prop_assert!(!clamped.data.is_empty());
        prop_assert_eq!(clamped.pagination.page, last_page);
        prop_assert_eq!(clamped.data, last.data);
    }

    #[test]
    fn prop_pages_concatenate_to_catalog(
        total in 0usize..300,
        page_size in 1usize..=100
    ) {
        let names = unique_names(total);
        let service = service_with(&names);
        let total_pages = service.list_page(1, page_size).unwrap().pagination.total_pages;

        let mut seen = Vec::with_capacity(total);
        for page in 1..=total_pages {
            for record in service.list_page(page, page_size).unwrap().data {
                seen.push(record.filename().to_string());
            }
        }

        prop_assert_eq!(seen, names);
    }

    #[test]
    fn prop_get_and_exists_agree(
        names in prop::collection::vec("[a-d]{1,2}\\.png", 0..40),
        lookups in prop::collection::vec("[a-e]{1,2}\\.png", 1..20)
    ) {
        let service = service_with(&names);
        for name in lookups.iter().chain(names.iter()) {
            let record = service.get_by_filename(name).unwrap();
            prop_assert_eq!(record.is_some(), service.exists(name).unwrap());
            prop_assert_eq!(record.is_some(), names.contains(name));
        }
    }

    #[test]
    fn prop_duplicates_resolve_to_first(
        names in prop::collection::vec("[a-c]\\.png", 1..40)
    ) {
        let service = service_with(&names);
        for name in &names {
            let first = names.iter().position(|n| n == name).unwrap();
            let expected = format!("ann-{}", first);

            for _ in 0..3 {
                let record = service.get_by_filename(name).unwrap().unwrap();
                prop_assert_eq!(record.get("original"), Some(expected.as_str()));
            }
        }
    }
}
