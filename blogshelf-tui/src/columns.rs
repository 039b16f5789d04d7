//! Column sets of the All Blogs and Wishlist tables.

use crate::controllers::RowActionState;
use crate::widgets::table::{ActionButton, CellContent, ColumnDescriptor};
use blogshelf_core::{BlogEntry, SortField, WishlistItem};

pub type BlogColumn = ColumnDescriptor<BlogEntry, RowActionState>;
pub type WishlistColumn = ColumnDescriptor<WishlistItem, RowActionState>;

const DESCRIPTION_LINES: u16 = 2;

pub fn listing_columns() -> Vec<BlogColumn> {
    vec![
        ColumnDescriptor {
            id: "image",
            header: "Image",
            sort_key: Some(SortField::Image),
            accessor: |blog| blog.image.clone(),
            cell: Some(|blog, _| CellContent::Image {
                uri: blog.image.clone(),
                badge: blog.category.to_string(),
            }),
            weight: 3,
        },
        ColumnDescriptor {
            id: "title",
            header: "Title",
            sort_key: Some(SortField::Title),
            accessor: |blog| blog.title.clone(),
            cell: Some(|blog, _| CellContent::Emphasis(blog.title.clone())),
            weight: 4,
        },
        ColumnDescriptor {
            id: "category",
            header: "Category",
            sort_key: Some(SortField::Category),
            accessor: |blog| blog.category.to_string(),
            cell: None,
            weight: 2,
        },
        ColumnDescriptor {
            id: "short_description",
            header: "Description",
            sort_key: Some(SortField::ShortDescription),
            accessor: |blog| blog.short_description.clone(),
            cell: Some(|blog, _| CellContent::Clamped {
                text: blog.short_description.clone(),
                max_lines: DESCRIPTION_LINES,
            }),
            weight: 5,
        },
        ColumnDescriptor {
            id: "email",
            header: "Author",
            sort_key: Some(SortField::AuthorEmail),
            accessor: |blog| blog.author_email.clone(),
            cell: None,
            weight: 3,
        },
        ColumnDescriptor {
            id: "actions",
            header: "Actions",
            sort_key: None,
            accessor: |_| String::new(),
            cell: Some(|blog, actions| {
                let adding = actions.is_adding(&blog.id);
                let label = if adding { "Adding..." } else { "Add Wishlist" };
                CellContent::Actions(vec![ActionButton::new(label, 'w', !adding)])
            }),
            weight: 2,
        },
    ]
}

/// Wishlist table columns. Sorting is not offered here.
pub fn wishlist_columns() -> Vec<WishlistColumn> {
    vec![
        ColumnDescriptor {
            id: "image",
            header: "Image",
            sort_key: None,
            accessor: |item| item.image.clone(),
            cell: Some(|item, _| CellContent::Image {
                uri: item.image.clone(),
                badge: String::new(),
            }),
            weight: 3,
        },
        ColumnDescriptor {
            id: "title",
            header: "Title",
            sort_key: None,
            accessor: |item| item.title.clone(),
            cell: Some(|item, _| CellContent::Emphasis(item.title.clone())),
            weight: 4,
        },
        ColumnDescriptor {
            id: "category",
            header: "Category",
            sort_key: None,
            accessor: |item| item.category.to_string(),
            cell: None,
            weight: 2,
        },
        ColumnDescriptor {
            id: "short_description",
            header: "Description",
            sort_key: None,
            accessor: |item| item.short_description.clone(),
            cell: Some(|item, _| CellContent::Clamped {
                text: item.short_description.clone(),
                max_lines: DESCRIPTION_LINES,
            }),
            weight: 5,
        },
        ColumnDescriptor {
            id: "actions",
            header: "Actions",
            sort_key: None,
            accessor: |_| String::new(),
            cell: Some(|item, actions| {
                let deleting = actions.is_deleting(item.id());
                let label = if deleting { "Deleting..." } else { "Delete" };
                CellContent::Actions(vec![ActionButton::new(label, 'd', !deleting)])
            }),
            weight: 2,
        },
    ]
}
