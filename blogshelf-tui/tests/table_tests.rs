use blogshelf_core::{SortField, SortOrder};
use blogshelf_test_utils::fixtures::{sample_catalog, sample_wishlist};
use blogshelf_test_utils::generators::arb_blog_entry;
use blogshelf_tui::columns::{listing_columns, wishlist_columns};
use blogshelf_tui::controllers::RowActionState;
use blogshelf_tui::widgets::{build_table, clamp_lines, sort_target, ActionButton, CellContent};
use proptest::prelude::*;

#[test]
fn listing_headers_mark_active_sort() {
    let columns = listing_columns();
    let rows = sample_catalog();
    let rows: Vec<_> = rows.iter().collect();
    let model = build_table(
        &columns,
        &rows,
        &RowActionState::default(),
        Some((SortField::Title, SortOrder::Desc)),
    );

    let labels: Vec<_> = model.headers.iter().map(|h| h.label).collect();
    assert_eq!(
        labels,
        ["Image", "Title", "Category", "Description", "Author", "Actions"]
    );
    let sortable: Vec<_> = model.headers.iter().map(|h| h.sortable).collect();
    assert_eq!(sortable, [true, true, true, true, true, false]);

    let title = &model.headers[1];
    assert_eq!(title.indicator, Some(SortOrder::Desc));
    assert_eq!(title.display(), "Title ▼");
    assert!(model.headers.iter().filter(|h| h.indicator.is_some()).count() == 1);
}

#[test]
fn listing_cells_follow_column_renderers() {
    let columns = listing_columns();
    let rows = sample_catalog();
    let rows: Vec<_> = rows.iter().collect();
    let model = build_table(&columns, &rows, &RowActionState::default(), None);

    assert_eq!(model.rows.len(), 3);
    let first = &model.rows[0].cells;
    assert_eq!(
        first[0],
        CellContent::Image {
            uri: "https://img.example/b1.png".to_string(),
            badge: "Mathematics".to_string(),
        }
    );
    assert_eq!(first[1], CellContent::Emphasis("Algebra Basics".to_string()));
    assert_eq!(first[2], CellContent::Text("Mathematics".to_string()));
    assert!(matches!(first[3], CellContent::Clamped { max_lines: 2, .. }));
    assert_eq!(
        first[5],
        CellContent::Actions(vec![ActionButton::new("Add Wishlist", 'w', true)])
    );
    assert!(model.headers.iter().all(|h| h.indicator.is_none()));
}

#[test]
fn wishlist_columns_are_not_sortable() {
    let columns = wishlist_columns();
    let items = sample_wishlist();
    let rows: Vec<_> = items.iter().collect();
    let model = build_table(
        &columns,
        &rows,
        &RowActionState::default(),
        Some((SortField::Title, SortOrder::Asc)),
    );

    assert!(model.headers.iter().all(|h| !h.sortable && h.indicator.is_none()));
    assert!((0..columns.len()).all(|idx| sort_target(&columns, idx).is_none()));
    assert_eq!(
        model.rows[0].cells[4],
        CellContent::Actions(vec![ActionButton::new("Delete", 'd', true)])
    );
}

#[test]
fn sort_target_resolves_header_index() {
    let columns = listing_columns();
    assert_eq!(sort_target(&columns, 0), Some(SortField::Image));
    assert_eq!(sort_target(&columns, 1), Some(SortField::Title));
    assert_eq!(sort_target(&columns, 4), Some(SortField::AuthorEmail));
    assert_eq!(sort_target(&columns, 5), None);
    assert_eq!(sort_target(&columns, 99), None);
}

#[test]
fn empty_rows_give_empty_model() {
    let columns = listing_columns();
    let model = build_table(&columns, &[], &RowActionState::default(), None);
    assert!(model.is_empty());
    assert_eq!(model.headers.len(), columns.len());
    assert_eq!(model.widths.len(), columns.len());
}

#[test]
fn clamped_height_is_capped() {
    let cell = CellContent::Clamped {
        text: "one\ntwo\nthree\nfour".to_string(),
        max_lines: 2,
    };
    assert_eq!(cell.height(40), 2);
    let short = CellContent::Clamped {
        text: "one".to_string(),
        max_lines: 2,
    };
    assert_eq!(short.height(40), 1);
}

#[test]
fn long_description_wraps_before_clamping() {
    let text = "Vectors, matrices and the spaces they span, from first principles";
    assert_eq!(
        clamp_lines(text, 20, 2),
        ["Vectors, matrices", "and the spaces they…"]
    );
    assert_eq!(clamp_lines(text, 80, 2), [text]);

    let cell = CellContent::Clamped {
        text: text.to_string(),
        max_lines: 2,
    };
    assert_eq!(cell.height(20), 2);
    assert_eq!(cell.height(80), 1);
}

#[test]
fn overlong_word_is_split_at_width() {
    assert_eq!(clamp_lines("abcdefghij", 4, 3), ["abcd", "efgh", "ij"]);
    assert_eq!(clamp_lines("abcdefghij", 4, 2), ["abcd", "efg…"]);
    assert_eq!(clamp_lines("", 10, 2), [""]);
}

proptest! {
    #[test]
    fn every_row_has_one_cell_per_column(rows in prop::collection::vec(arb_blog_entry(), 0..12)) {
        let columns = listing_columns();
        let refs: Vec<_> = rows.iter().collect();
        let model = build_table(&columns, &refs, &RowActionState::default(), None);
        prop_assert_eq!(model.rows.len(), rows.len());
        for (row, entry) in model.rows.iter().zip(&rows) {
            prop_assert_eq!(row.cells.len(), columns.len());
            prop_assert_eq!(row.cells[1].plain(), entry.title.clone());
        }
    }
}
