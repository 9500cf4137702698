use wallify::spotify::top::{PAGE_LIMIT, concat_pages, page_plan};
use wallify::types::{Artist, ContentItem, ExternalUrls, MAX_TOP_ITEMS};

// Helper function to create a minimal test item
fn item(i: usize) -> ContentItem {
    ContentItem::Artist(Artist {
        id: format!("artist-{}", i),
        name: format!("Artist {}", i),
        genres: vec![],
        images: vec![],
        external_urls: ExternalUrls::default(),
    })
}

#[test]
fn test_page_plan_partitions_the_ceiling() {
    // 99 items need two pages: a full one and a 49-item remainder
    assert_eq!(page_plan(99), vec![(0, 50), (50, 49)]);
}

#[test]
fn test_page_plan_single_page() {
    assert_eq!(page_plan(50), vec![(0, 50)]);
    assert_eq!(page_plan(30), vec![(0, 30)]);
    assert_eq!(page_plan(1), vec![(0, 1)]);
}

#[test]
fn test_page_plan_zero_is_empty() {
    assert!(page_plan(0).is_empty());
}

#[test]
fn test_page_plan_caps_at_ceiling() {
    // asking past the ceiling plans the same pages as the ceiling itself
    assert_eq!(page_plan(150), page_plan(MAX_TOP_ITEMS));
}

#[test]
fn test_page_plan_covers_range_exactly() {
    for total in [1, 49, 50, 51, 98, 99] {
        let plan = page_plan(total);

        // Pages are contiguous, in order, and sum to the requested total
        let mut expected_offset = 0;
        for (offset, limit) in &plan {
            assert_eq!(*offset, expected_offset);
            assert!(*limit <= PAGE_LIMIT);
            expected_offset += limit;
        }
        assert_eq!(expected_offset, total);
    }
}

#[test]
fn test_concat_pages_preserves_page_order() {
    let pages = vec![
        (0..50).map(item).collect::<Vec<_>>(),
        (50..99).map(item).collect::<Vec<_>>(),
    ];

    let assembled = concat_pages(pages, 99);

    assert_eq!(assembled.len(), 99);
    assert_eq!(assembled[0].name(), "Artist 0");
    assert_eq!(assembled[49].name(), "Artist 49");
    assert_eq!(assembled[50].name(), "Artist 50");
    assert_eq!(assembled[98].name(), "Artist 98");
}

#[test]
fn test_concat_pages_truncates_to_requested_total() {
    let pages = vec![(0..50).map(item).collect::<Vec<_>>()];

    let assembled = concat_pages(pages, 30);

    assert_eq!(assembled.len(), 30);
    assert_eq!(assembled[29].name(), "Artist 29");
}

#[test]
fn test_concat_pages_short_upstream_is_not_an_error() {
    // A user with 30 tracked artists answers the (0,50) page with 30 items
    // and the (50,49) page with none
    let pages = vec![(0..30).map(item).collect::<Vec<_>>(), vec![]];

    let assembled = concat_pages(pages, 99);

    // The short list comes back as-is: no padding, no duplicates, no error
    assert_eq!(assembled.len(), 30);
    let mut ids: Vec<&str> = assembled
        .iter()
        .map(|i| match i {
            ContentItem::Artist(a) => a.id.as_str(),
            ContentItem::Track(t) => t.id.as_str(),
        })
        .collect();
    ids.dedup();
    assert_eq!(ids.len(), 30);
}
