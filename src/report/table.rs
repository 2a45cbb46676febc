use crate::models::bs::{OptionParameters, PricingResult};

fn render(headers: &[&str], cells: &[String]) -> String {
    let widths: Vec<usize> = headers
        .iter()
        .zip(cells)
        .map(|(h, c)| h.chars().count().max(c.chars().count()))
        .collect();

    let mut out = String::new();
    let mut line = |items: Vec<String>| {
        out.push('|');
        for (item, width) in items.iter().zip(&widths) {
            let pad = width - item.chars().count();
            out.push_str(&format!(" {}{} |", item, " ".repeat(pad)));
        }
        out.push('\n');
    };

    line(headers.iter().map(|h| h.to_string()).collect());
    line(widths.iter().map(|w| "-".repeat(*w)).collect());
    line(cells.to_vec());
    out
}

/// One-row table of the option inputs.
pub fn inputs_table(params: &OptionParameters) -> String {
    render(
        &[
            "Current Asset Price",
            "Strike Price",
            "Time to Maturity (Years)",
            "Volatility (σ)",
            "Risk-Free Interest Rate",
        ],
        &[
            format!("{:.4}", params.current_price),
            format!("{:.4}", params.strike),
            format!("{:.4}", params.time_to_maturity),
            format!("{:.4}", params.volatility),
            format!("{:.4}", params.risk_free_rate),
        ],
    )
}

/// Call and put values with their Greeks.
pub fn summary_table(result: &PricingResult) -> String {
    render(
        &[
            "CALL Value",
            "PUT Value",
            "Call Delta",
            "Put Delta",
            "Call Gamma",
            "Put Gamma",
        ],
        &[
            format!("${:.2}", result.call_price),
            format!("${:.2}", result.put_price),
            format!("{:.4}", result.call_delta),
            format!("{:.4}", result.put_delta),
            format!("{:.4}", result.call_gamma),
            format!("{:.4}", result.put_gamma),
        ],
    )
}
