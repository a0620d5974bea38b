//! Dashboard page rendering

use crate::AppState;
use axum::extract::Query;
use axum::http::StatusCode;
use axum::response::Html;
use paydash_core::{
    PaymentMethod, SortField, Transaction, TransactionQuery, TransactionStatus, TransactionSummary,
};
use paydash_utils::escape_html;
use std::collections::HashMap;

/// Dashboard page: summary cards, filter form and the transaction table
pub async fn page_dashboard(
    state: axum::extract::State<AppState>,
    params: Query<HashMap<String, String>>,
) -> (StatusCode, Html<String>) {
    match super::api::run_query(&state, &params) {
        Ok((query, items)) => {
            let content = render_dashboard(&query, &items, None);
            (StatusCode::OK, Html(base_html("Transactions", &content)))
        }
        Err(e) => {
            let query = TransactionQuery::from_params_lenient(&params, state.default_sort);
            let message = e.details().message;
            let content = render_dashboard(&query, &[], Some(&message));
            (e.status(), Html(base_html("Transactions", &content)))
        }
    }
}

/// Base HTML template
pub fn base_html(title: &str, content: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{} - Paydash</title>
    <script src="https://cdn.tailwindcss.com"></script>
</head>
<body class="bg-gray-50 text-gray-900">
    <main class="max-w-6xl mx-auto p-6 space-y-4">
    <h1 class="text-xl font-bold">Payments Admin</h1>
    {}
    </main>
</body>
</html>"#,
        escape_html(title),
        content
    )
}

/// Canonical query string for a descriptor, without the leading `?`
pub fn query_string(query: &TransactionQuery) -> String {
    let mut pairs: Vec<String> = Vec::new();
    if let Some(ref q) = query.search {
        pairs.push(format!("q={}", urlencoding::encode(q)));
    }
    if let Some(status) = query.status {
        pairs.push(format!("status={}", status));
    }
    if let Some(method) = query.method {
        pairs.push(format!("method={}", method));
    }
    pairs.push(format!("sort={}", urlencoding::encode(&query.sort.to_string())));
    pairs.join("&")
}

/// Render the page body
pub fn render_dashboard(query: &TransactionQuery, items: &[Transaction], error: Option<&str>) -> String {
    let summary = TransactionSummary::from_transactions(items);
    let mut html = String::new();

    html.push_str(&render_summary_cards(&summary));

    if let Some(message) = error {
        html.push_str(&format!(
            r#"<div class='bg-red-50 border border-red-200 rounded p-4 text-red-700'>{}</div>"#,
            escape_html(message)
        ));
    }

    html.push_str("<div class='bg-white border border-gray-200 rounded'>");
    html.push_str(&render_filter_form(query, summary.total_count));
    html.push_str(&render_table(query, items));
    html.push_str("</div>");
    html
}

fn render_summary_cards(summary: &TransactionSummary) -> String {
    let card = |label: &str, value: &str| {
        format!(
            r#"<div class='bg-white border border-gray-200 rounded p-4'><div class='text-sm text-gray-500'>{}</div><div class='text-2xl font-semibold'>{}</div></div>"#,
            label, value
        )
    };

    let breakdown = TransactionStatus::ALL
        .iter()
        .map(|s| format!("{} {}", summary.by_status.get(*s), s))
        .collect::<Vec<_>>()
        .join(" · ");

    format!(
        "<div class='grid grid-cols-1 md:grid-cols-3 gap-4'>{}{}{}</div>",
        card("Total Transactions", &summary.total_count.to_string()),
        card("Total Amount", &escape_html(&summary.total_amount_display)),
        card("By Status", &breakdown),
    )
}

fn render_filter_form(query: &TransactionQuery, count: usize) -> String {
    let option = |value: &str, label: &str, selected: bool| {
        format!(
            "<option value='{}'{}>{}</option>",
            value,
            if selected { " selected" } else { "" },
            label
        )
    };

    let mut status_options = option("", "All Status", query.status.is_none());
    for status in TransactionStatus::ALL {
        let label = match status {
            TransactionStatus::Success => "Success",
            TransactionStatus::Failed => "Failed",
            TransactionStatus::Pending => "Pending",
        };
        status_options.push_str(&option(status.as_str(), label, query.status == Some(status)));
    }

    let mut method_options = option("", "All Methods", query.method.is_none());
    for method in PaymentMethod::ALL {
        method_options.push_str(&option(method.as_str(), method.label(), query.method == Some(method)));
    }

    format!(
        r#"<form method='get' action='/' class='p-4 flex flex-col gap-3 md:flex-row md:items-center md:justify-between'>
            <div class='flex gap-2'>
                <input name='q' value='{}' placeholder='Search by ID or customer' class='w-64 border border-gray-200 rounded px-3 py-2 text-sm'>
                <select name='status' class='border border-gray-200 rounded px-3 py-2 text-sm'>{}</select>
                <select name='method' class='border border-gray-200 rounded px-3 py-2 text-sm'>{}</select>
                <input type='hidden' name='sort' value='{}'>
                <button type='submit' class='px-3 py-2 border rounded text-sm'>Apply</button>
            </div>
            <div class='text-sm text-gray-500'>{} results</div>
        </form>"#,
        escape_html(query.search.as_deref().unwrap_or("")),
        status_options,
        method_options,
        query.sort,
        count
    )
}

fn render_table(query: &TransactionQuery, items: &[Transaction]) -> String {
    let sortable = |field: SortField, label: &str| {
        let next = query.with_sort(query.sort.toggled(field));
        let arrow = if query.sort.field == field {
            if query.sort.is_descending() { " ↓" } else { " ↑" }
        } else {
            ""
        };
        format!(
            "<th class='text-left px-4 py-2'><a href='/?{}'>{}{}</a></th>",
            escape_html(&query_string(&next)),
            label,
            arrow
        )
    };
    let plain = |label: &str| format!("<th class='text-left px-4 py-2'>{}</th>", label);

    let mut html = String::from("<div class='overflow-x-auto'><table class='min-w-full text-sm'><thead class='bg-gray-50 border-t border-b border-gray-200'><tr>");
    html.push_str(&sortable(SortField::Id, "ID"));
    html.push_str(&sortable(SortField::CustomerName, "Customer"));
    html.push_str(&plain("Method"));
    html.push_str(&sortable(SortField::AmountInPaise, "Amount"));
    html.push_str(&plain("Currency"));
    html.push_str(&sortable(SortField::CreatedAt, "Created"));
    html.push_str(&plain("Status"));
    html.push_str("</tr></thead><tbody>");

    if items.is_empty() {
        html.push_str("<tr><td colspan='7' class='text-center py-12 text-gray-500'>No transactions</td></tr>");
    }

    for tx in items {
        html.push_str(&format!(
            r#"<tr class='border-b border-gray-200 hover:bg-gray-50'>
                <td class='px-4 py-2 font-mono'>{}</td>
                <td class='px-4 py-2'>{}</td>
                <td class='px-4 py-2 uppercase'>{}</td>
                <td class='px-4 py-2'>{}</td>
                <td class='px-4 py-2'>{}</td>
                <td class='px-4 py-2'>{}</td>
                <td class='px-4 py-2'><span class='inline-flex items-center rounded px-2 py-0.5 text-xs font-medium {}'>{}</span></td>
            </tr>"#,
            escape_html(&tx.id),
            escape_html(&tx.customer_name),
            tx.method,
            escape_html(&tx.amount_display()),
            escape_html(&tx.currency),
            tx.created_at.format("%Y-%m-%d %H:%M:%S UTC"),
            status_badge_class(tx.status),
            tx.status
        ));
    }

    html.push_str("</tbody></table></div>");
    html
}

fn status_badge_class(status: TransactionStatus) -> &'static str {
    match status {
        TransactionStatus::Success => "bg-green-100 text-green-800",
        TransactionStatus::Failed => "bg-red-100 text-red-800",
        TransactionStatus::Pending => "bg-yellow-100 text-yellow-800",
    }
}
