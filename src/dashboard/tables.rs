//! Table views for the category breakdown.

use maud::{Markup, html};

use crate::{
    analytics::Breakdown,
    html::{TABLE_CELL_STYLE, TABLE_HEADER_STYLE, TABLE_ROW_STYLE, format_currency, format_percentage},
};

/// Renders a table with one row per category, sorted by category name.
pub(super) fn breakdown_table(breakdown: &Breakdown) -> Markup {
    let grand_total: f64 = breakdown.values().map(|entry| entry.total).sum();

    html! {
        div class="w-full" {
            h3 class="text-xl font-semibold mb-4" { "Expense Breakdown" }

            div class="overflow-x-auto rounded-lg shadow" {
                table class="w-full text-sm text-left text-gray-500 dark:text-gray-400" {
                    thead class=(TABLE_HEADER_STYLE) {
                        tr {
                            th scope="col" class=(TABLE_CELL_STYLE) { "Category" }
                            th scope="col" class={(TABLE_CELL_STYLE) " text-right"} { "Total" }
                            th scope="col" class={(TABLE_CELL_STYLE) " text-right"} { "Percentage" }
                        }
                    }
                    tbody {
                        @for (category, entry) in breakdown {
                            tr class=(TABLE_ROW_STYLE) {
                                th scope="row" class={(TABLE_CELL_STYLE) " font-medium text-gray-900 dark:text-white"} {
                                    (category)
                                }
                                td class={(TABLE_CELL_STYLE) " text-right"} { (format_currency(entry.total)) }
                                td class={(TABLE_CELL_STYLE) " text-right"} { (format_percentage(entry.percentage)) }
                            }
                        }
                    }
                    tfoot {
                        tr class="font-semibold text-gray-900 dark:text-white" {
                            th scope="row" class=(TABLE_CELL_STYLE) { "Total" }
                            td class={(TABLE_CELL_STYLE) " text-right"} { (format_currency(grand_total)) }
                            td class=(TABLE_CELL_STYLE) {}
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use scraper::{Html, Selector};

    use crate::{analytics::category_breakdown, expense::CategoryTotal};

    use super::breakdown_table;

    #[test]
    fn renders_row_per_category() {
        let breakdown = category_breakdown(&[
            CategoryTotal {
                category: "Rent".to_owned(),
                total: 20.0,
            },
            CategoryTotal {
                category: "Food".to_owned(),
                total: 15.0,
            },
        ]);

        let html = Html::parse_fragment(&breakdown_table(&breakdown).into_string());
        let row_selector = Selector::parse("tbody tr").unwrap();
        let cell_selector = Selector::parse("th, td").unwrap();

        let rows: Vec<Vec<String>> = html
            .select(&row_selector)
            .map(|row| {
                row.select(&cell_selector)
                    .map(|cell| cell.text().collect::<String>().trim().to_owned())
                    .collect()
            })
            .collect();

        assert_eq!(
            rows,
            vec![
                vec!["Food".to_owned(), "$15.00".to_owned(), "42.86%".to_owned()],
                vec!["Rent".to_owned(), "$20.00".to_owned(), "57.14%".to_owned()],
            ]
        );

        let footer = html
            .select(&Selector::parse("tfoot td").unwrap())
            .next()
            .expect("No footer total found");
        assert_eq!(footer.text().collect::<String>().trim(), "$35.00");
    }
}
