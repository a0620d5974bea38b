//! Utility functions and helpers

/// Format an integer with Indian digit grouping (e.g. `12,34,567`)
///
/// The last three digits form one group; every group above that has two.
pub fn format_indian_number(n: u64) -> String {
    let digits = n.to_string();
    if digits.len() <= 3 {
        return digits;
    }

    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(2);
        groups.push(&head[start..end]);
        end = start;
    }
    groups.reverse();
    groups.push(tail);
    groups.join(",")
}

/// Format a paise amount as rupees with at most two fraction digits
///
/// Trailing zeros in the fraction are dropped: `50000` → `₹500`, `123450` → `₹1,234.5`.
pub fn format_rupees(paise: u64) -> String {
    let rupees = format_indian_number(paise / 100);
    let fraction = paise % 100;
    if fraction == 0 {
        format!("₹{}", rupees)
    } else if fraction % 10 == 0 {
        format!("₹{}.{}", rupees, fraction / 10)
    } else {
        format!("₹{}.{:02}", rupees, fraction)
    }
}

/// Escape text for inclusion in HTML bodies and attribute values
pub fn escape_html(content: &str) -> String {
    let mut out = String::with_capacity(content.len());
    for c in content.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
