//! Terminal rendering for the storefront.

use std::io;

use tabled::{
    builder::Builder,
    settings::{Alignment, Style, object::Columns},
};

use crate::{
    filters,
    products::{Product, SeedSummary, format_price, render_stars},
    suggest::{SnapshotView, SuggestSnapshot},
};

/// Print the product grid followed by its count label.
///
/// # Errors
///
/// Returns any error from writing to `out`.
pub fn write_products(out: &mut impl io::Write, products: &[&Product]) -> io::Result<()> {
    if !products.is_empty() {
        let mut builder = Builder::default();

        builder.push_record(["#", "Name", "Category", "Price", "Rating"]);

        for (index, product) in products.iter().enumerate() {
            builder.push_record([
                (index + 1).to_string(),
                product.name.clone(),
                product.category.clone(),
                format_price(product.price),
                format!("{} {}", render_stars(product.rating), product.rating),
            ]);
        }

        let mut table = builder.build();

        table.with(Style::modern_rounded());
        table.modify(Columns::new(3..4), Alignment::right());

        writeln!(out, "{table}")?;
    }

    writeln!(out, "{}", filters::showing_label(products.len()))
}

/// Print the category filter options, marking the selected one.
///
/// # Errors
///
/// Returns any error from writing to `out`.
pub fn write_categories(
    out: &mut impl io::Write,
    categories: &[String],
    selected: &str,
) -> io::Result<()> {
    for category in categories {
        let marker = if category == selected { '*' } else { ' ' };

        writeln!(out, "{marker} {category}")?;
    }

    Ok(())
}

/// Print the outcome of a reseed.
///
/// # Errors
///
/// Returns any error from writing to `out`.
pub fn write_seed_summary(out: &mut impl io::Write, summary: &SeedSummary) -> io::Result<()> {
    writeln!(out, "{} ({} products)", summary.message, summary.count)
}

/// Print the input line and the suggestion list beneath it.
///
/// # Errors
///
/// Returns any error from writing to `out`.
pub fn write_snapshot(out: &mut impl io::Write, snapshot: &SuggestSnapshot) -> io::Result<()> {
    let spinner = if snapshot.loading { " …" } else { "" };

    writeln!(out, "> {}{spinner}", snapshot.text)?;

    match &snapshot.view {
        SnapshotView::Hidden => Ok(()),
        SnapshotView::Loading => writeln!(out, "  Searching..."),
        SnapshotView::NoResults => writeln!(out, "  No products found"),
        SnapshotView::Suggestions(products) => {
            for (index, product) in products.iter().enumerate() {
                writeln!(
                    out,
                    "  {}. {}  {}",
                    index + 1,
                    product.name,
                    format_price(product.price)
                )?;
            }

            Ok(())
        }
    }
}
