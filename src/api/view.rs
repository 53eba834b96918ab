//! HTML table rendering for the `/stats/view` endpoint.

use chrono::{DateTime, SecondsFormat, Utc};

use crate::types::PriceSummary;

const HEADERS: [&str; 10] = [
    "item_id",
    "city",
    "sell_price_min",
    "sell_price_min_date",
    "sell_price_max",
    "sell_price_max_date",
    "buy_price_min",
    "buy_price_min_date",
    "buy_price_max",
    "buy_price_max_date",
];

/// Cells for one row; same order as `HEADERS`.
fn cells(s: &PriceSummary) -> [String; 10] {
    [
        s.item_id.clone(),
        s.location.to_string(),
        s.sell_price_min.to_string(),
        date_cell(s.sell_price_min_date),
        s.sell_price_max.to_string(),
        date_cell(s.sell_price_max_date),
        s.buy_price_min.to_string(),
        date_cell(s.buy_price_min_date),
        s.buy_price_max.to_string(),
        date_cell(s.buy_price_max_date),
    ]
}

const HEAD: &str = r#"<html>
	<head>
		<style>
			table, th, td {
				border: 1px solid black;
				border-collapse: collapse;
			}
		</style>
	</head>
	<body>
		<table style='width:100%'>
"#;

const TAIL: &str = r#"		</table>
	</body>
</html>"#;

fn date_cell(at: Option<DateTime<Utc>>) -> String {
    at.map(|d| d.to_rfc3339_opts(SecondsFormat::Secs, true))
        .unwrap_or_default()
}

fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
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

pub fn render_price_table(summaries: &[PriceSummary]) -> String {
    let mut html = String::from(HEAD);

    html.push_str("\t\t\t<tr>");
    for header in HEADERS {
        html.push_str(&format!("<th>{header}</th>"));
    }
    html.push_str("</tr>\n");

    for summary in summaries {
        html.push_str("\t\t\t<tr>");
        for cell in cells(summary) {
            html.push_str(&format!("<td>{}</td>", escape_html(&cell)));
        }
        html.push_str("</tr>\n");
    }

    html.push_str(TAIL);
    html
}
